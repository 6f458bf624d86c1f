//! DTOs for link shortening endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::utils::target_url::validate_target_url;

/// Request to shorten a single URL.
///
/// Length bounds and alphabet of `custom_code` and the `days` range are
/// enforced by the issuance engine against the configured policy.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(custom(function = validate_target_url))]
    pub url: String,

    /// Lifetime of the link in days.
    pub days: i64,

    /// Optional caller-chosen code. An empty string means none.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub custom_code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub code: String,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|code| !code.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str, custom_code: Option<&str>) -> ShortenRequest {
        ShortenRequest {
            url: url.to_string(),
            days: 1,
            custom_code: custom_code.map(str::to_string),
        }
    }

    #[test]
    fn test_accepts_plain_request() {
        assert!(request("https://example.com/a", None).validate().is_ok());
        assert!(request("https://example.com/a", Some("my_code-1")).validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_url() {
        let errors = request("not a url", None).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("url"));
    }

    #[test]
    fn test_deserializes_without_custom_code() {
        let req: ShortenRequest =
            serde_json::from_str(r#"{"url":"https://example.com","days":3}"#).unwrap();

        assert_eq!(req.days, 3);
        assert!(req.custom_code.is_none());
    }

    #[test]
    fn test_empty_custom_code_means_none() {
        let req: ShortenRequest =
            serde_json::from_str(r#"{"url":"https://example.com","days":1,"custom_code":""}"#)
                .unwrap();

        assert!(req.custom_code.is_none());
    }

    #[test]
    fn test_null_custom_code_means_none() {
        let req: ShortenRequest =
            serde_json::from_str(r#"{"url":"https://example.com","days":1,"custom_code":null}"#)
                .unwrap();

        assert!(req.custom_code.is_none());
    }

    #[test]
    fn test_custom_code_alphabet_left_to_engine() {
        let req: ShortenRequest =
            serde_json::from_str(r#"{"url":"https://example.com","days":1,"custom_code":"a b"}"#)
                .unwrap();

        assert_eq!(req.custom_code.as_deref(), Some("a b"));
        assert!(req.validate().is_ok());
    }
}
