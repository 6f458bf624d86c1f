//! Validation of target URLs submitted for shortening.

use url::Url;
use validator::ValidationError;

/// Accepts absolute `http`/`https` URLs with a host.
///
/// Used as a `validator` custom function on request DTOs.
pub fn validate_target_url(value: &str) -> Result<(), ValidationError> {
    let parsed = Url::parse(value).map_err(|_| invalid("Invalid URL format"))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("Only http and https URLs can be shortened"));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("URL must include a host"));
    }

    Ok(())
}

fn invalid(message: &'static str) -> ValidationError {
    ValidationError::new("target_url").with_message(message.into())
}
