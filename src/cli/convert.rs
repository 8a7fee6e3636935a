use super::ui;
use crate::core::{ConversionRequest, ConversionResult, RateLookupService};
use anyhow::Result;

pub async fn run(
    service: &RateLookupService,
    from: &str,
    to: &str,
    amount: f64,
) -> Result<ConversionResult> {
    let request = ConversionRequest::new(from, to, amount)?;

    let pb = ui::new_spinner("Fetching current rate...");
    let result = service.convert_request(request).await;
    pb.finish_and_clear();

    let result = result?;

    println!("{}", ui::style_text(&result.summary(), ui::StyleType::Result));
    println!(
        "{}",
        ui::style_text(
            &format!(
                "1 {} = {:.4} {} as of {}",
                result.request.from,
                result.rate,
                result.request.to,
                result.timestamp.format("%Y-%m-%d %H:%M UTC")
            ),
            ui::StyleType::Subtle
        )
    );
    Ok(result)
}
