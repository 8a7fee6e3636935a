use super::ui;
use crate::core::CurrencyCode;

pub fn run(currencies: &[CurrencyCode]) {
    println!(
        "{}",
        ui::style_text("Configured currencies", ui::StyleType::Title)
    );
    for code in currencies {
        println!("  {code}");
    }
    println!(
        "{}",
        ui::style_text(
            "Any 3-letter code known to the rate provider can be used.",
            ui::StyleType::Subtle
        )
    );
}
