//! Share a conversion result as a `mailto:` link
//!
//! Sending mail is left to the user's mail client, so no SMTP transport or
//! credentials live in this crate.

use super::conversion::ConversionResult;
use super::error::{FxError, Result};

pub fn subject(result: &ConversionResult) -> String {
    format!(
        "Currency Conversion {} to {}",
        result.request.from, result.request.to
    )
}

pub fn mailto_link(recipient: &str, result: &ConversionResult) -> Result<String> {
    let recipient = recipient.trim();
    // `?`, `&`, `#` and `%` would add mailto headers, a fragment or escapes
    let has_reserved = recipient
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '?' | '&' | '#' | '%'));
    let valid = !has_reserved
        && match recipient.split_once('@') {
            Some((user, domain)) => {
                !user.is_empty() && !domain.is_empty() && !domain.contains('@')
            }
            None => false,
        };
    if !valid {
        return Err(FxError::InvalidInput(format!(
            "'{recipient}' is not an email address"
        )));
    }

    Ok(format!(
        "mailto:{}?subject={}&body={}",
        recipient,
        urlencoding::encode(&subject(result)),
        urlencoding::encode(&result.summary())
    ))
}
