use super::ui;
use crate::core::share;
use crate::core::RateLookupService;
use anyhow::Result;

/// Converts the amount and prints a `mailto:` link carrying the result.
pub async fn run(
    service: &RateLookupService,
    recipient: &str,
    from: &str,
    to: &str,
    amount: f64,
) -> Result<String> {
    let result = super::convert::run(service, from, to, amount).await?;
    let link = share::mailto_link(recipient, &result)?;

    println!(
        "\n{}",
        ui::style_text("Open this link to send the result:", ui::StyleType::Title)
    );
    println!("{link}");
    Ok(link)
}
