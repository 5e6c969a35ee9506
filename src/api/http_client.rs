use log::debug;
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use super::types::{ErrorBody, Format};
use crate::error::{KakaoError, Result};

/// Build the HTTP client shared by every builder created from one `KakaoClient`
pub fn create_client(timeout_secs: u64, user_agent: &str) -> Result<Client> {
    let client = ClientBuilder::new()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(timeout_secs))
        .tcp_keepalive(Duration::from_secs(60))
        .tcp_nodelay(true)
        .user_agent(user_agent)
        .use_rustls_tls()
        .build()?;
    Ok(client)
}

/// Join `base` and `path`, then append `params` as an escaped query string.
///
/// Every endpoint goes through here so query text is escaped the same way
/// regardless of which builder produced it.
pub fn build_url(base: &str, path: &str, params: &[(&str, String)]) -> Result<Url> {
    let joined = format!("{}{}", base.trim_end_matches('/'), path);
    let url = if params.is_empty() {
        Url::parse(&joined)
    } else {
        Url::parse_with_params(&joined, params)
    };
    url.map_err(|e| KakaoError::InvalidInput(format!("invalid request URL '{}': {}", joined, e)))
}

/// Turn a response into its body text, mapping non-success statuses to errors
pub async fn read_body(response: Response) -> Result<String> {
    let status = response.status();
    let text = response.text().await?;

    if status.is_success() {
        if text.trim().is_empty() {
            return Err(KakaoError::api_error(
                "EMPTY_RESPONSE",
                "API returned an empty response.",
                None,
            ));
        }
        return Ok(text);
    }

    debug!("Request failed with status {}: {}", status, truncate(&text, 200));

    match status {
        StatusCode::TOO_MANY_REQUESTS => Err(KakaoError::RateLimit),
        s if s.is_server_error() => Err(KakaoError::ServerError(format!(
            "Server returned status {}",
            s
        ))),
        s => {
            let body: Option<ErrorBody> = serde_json::from_str(&text).ok();
            let message = body
                .as_ref()
                .and_then(|b| b.message.clone())
                .unwrap_or_else(|| format!("API request failed with status {}", s));
            let code = body
                .as_ref()
                .and_then(|b| b.error_type.clone().or_else(|| b.code.map(|c| c.to_string())))
                .unwrap_or_else(|| s.as_u16().to_string());
            let hint = match s {
                StatusCode::UNAUTHORIZED => {
                    Some("Check that the REST API key is correct.".to_string())
                }
                StatusCode::FORBIDDEN => Some(
                    "Make sure the API is enabled for this application in the developer console."
                        .to_string(),
                ),
                _ => None,
            };
            Err(KakaoError::ApiError { code, message, hint })
        }
    }
}

/// Decode a response body in the requested format
pub fn decode<T: DeserializeOwned>(format: Format, body: &str) -> Result<T> {
    match format {
        Format::Json => serde_json::from_str(body).map_err(|e| {
            KakaoError::Parse(format!(
                "Failed to parse JSON response: {}. Response starts with: {}",
                e,
                truncate(body, 100)
            ))
        }),
        Format::Xml => quick_xml::de::from_str(body).map_err(|e| {
            KakaoError::Parse(format!(
                "Failed to parse XML response: {}. Response starts with: {}",
                e,
                truncate(body, 100)
            ))
        }),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Meta, PageResult};

    #[test]
    fn test_client_creation() {
        assert!(create_client(10, "test-agent/1.0").is_ok());
    }

    #[test]
    fn test_build_url_escapes_reserved_characters() {
        let url = build_url(
            "https://dapi.kakao.com/",
            "/v2/search/web",
            &[("query", "a&b=c #d".to_string())],
        )
        .unwrap();
        assert_eq!(url.path(), "/v2/search/web");
        assert_eq!(url.query(), Some("query=a%26b%3Dc+%23d"));
        let (_, value) = url.query_pairs().next().unwrap();
        assert_eq!(value, "a&b=c #d");
    }

    #[test]
    fn test_decode_reports_parse_error() {
        let err = decode::<PageResult<serde_json::Value>>(Format::Json, "not json").unwrap_err();
        assert!(matches!(err, KakaoError::Parse(msg) if msg.contains("not json")));
    }

    #[test]
    fn test_decode_xml_meta() {
        let xml = "<meta><total_count>7</total_count><pageable_count>7</pageable_count><is_end>true</is_end></meta>";
        let meta: Meta = decode(Format::Xml, xml).unwrap();
        assert_eq!(meta.total_count, 7);
        assert!(meta.is_end);
    }
}
