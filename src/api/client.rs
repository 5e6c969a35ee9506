use log::debug;
use reqwest::multipart::Form;
use reqwest::{Client, Url};
use std::fmt;
use std::sync::Arc;

use super::http_client::{build_url, create_client, read_body};
use crate::error::{KakaoError, Result};

pub const DEFAULT_BASE_URL: &str = "https://dapi.kakao.com";
pub const DEFAULT_POSE_BASE_URL: &str = "https://cv-api.kakaobrain.com";

/// Scheme token the gateway expects in front of a REST API key
pub const AUTH_SCHEME: &str = "KakaoAK";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// REST API key
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// User agent string
    pub user_agent: String,
    /// Upper bound on concurrent requests during a bulk drain
    pub max_concurrent: usize,
    /// Base URL for search, local, translation and vision
    pub base_url: String,
    /// Base URL for pose estimation
    pub pose_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            timeout: 30,
            user_agent: format!("kakao-api/{}", env!("CARGO_PKG_VERSION")),
            max_concurrent: 8,
            base_url: DEFAULT_BASE_URL.to_string(),
            pose_base_url: DEFAULT_POSE_BASE_URL.to_string(),
        }
    }
}

/// Which service host an endpoint lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    Dapi,
    Pose,
}

/// Format a key as an `Authorization` header value, `None` when the key is blank
pub fn authorization(key: &str) -> Option<String> {
    let key = key.trim();
    if key.is_empty() {
        None
    } else {
        Some(format!("{} {}", AUTH_SCHEME, key))
    }
}

/// Handle to the Kakao APIs.
///
/// Cheap to clone; every builder created from it shares one connection pool.
#[derive(Clone)]
pub struct KakaoClient {
    inner: Arc<Inner>,
}

struct Inner {
    config: ClientConfig,
    http: Client,
    authorization: Option<String>,
}

impl fmt::Debug for KakaoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KakaoClient")
            .field("base_url", &self.inner.config.base_url)
            .field("pose_base_url", &self.inner.config.pose_base_url)
            .field("has_key", &self.inner.authorization.is_some())
            .finish()
    }
}

impl KakaoClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = create_client(config.timeout, &config.user_agent)?;
        let authorization = authorization(&config.api_key);
        Ok(Self {
            inner: Arc::new(Inner {
                config,
                http,
                authorization,
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn is_configured(&self) -> bool {
        self.inner.authorization.is_some()
    }

    pub(crate) fn default_authorization(&self) -> Option<String> {
        self.inner.authorization.clone()
    }

    pub(crate) fn max_concurrent(&self) -> usize {
        self.inner.config.max_concurrent.max(1)
    }

    pub(crate) fn url(&self, host: Host, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let base = match host {
            Host::Dapi => &self.inner.config.base_url,
            Host::Pose => &self.inner.config.pose_base_url,
        };
        build_url(base, path, params)
    }

    pub(crate) async fn get(&self, url: Url, authorization: Option<&str>) -> Result<String> {
        let authorization = authorization.ok_or(KakaoError::NoApiKey)?;
        debug!("GET {}", url);
        let response = self
            .inner
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .send()
            .await?;
        read_body(response).await
    }

    pub(crate) async fn post_form(
        &self,
        url: Url,
        params: &[(&str, String)],
        authorization: Option<&str>,
    ) -> Result<String> {
        let authorization = authorization.ok_or(KakaoError::NoApiKey)?;
        debug!("POST {} ({} form fields)", url, params.len());
        let response = self
            .inner
            .http
            .post(url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .form(params)
            .send()
            .await?;
        read_body(response).await
    }

    pub(crate) async fn post_multipart(
        &self,
        url: Url,
        form: Form,
        authorization: Option<&str>,
    ) -> Result<String> {
        let authorization = authorization.ok_or(KakaoError::NoApiKey)?;
        debug!("POST {} (multipart)", url);
        let response = self
            .inner
            .http
            .post(url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .multipart(form)
            .send()
            .await?;
        read_body(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_trims_and_prefixes() {
        assert_eq!(authorization("  abc123\n").as_deref(), Some("KakaoAK abc123"));
        assert_eq!(authorization("   "), None);
    }

    #[test]
    fn test_debug_hides_key() {
        let client = KakaoClient::new(ClientConfig {
            api_key: "secret-key".to_string(),
            ..Default::default()
        })
        .unwrap();
        let printed = format!("{:?}", client);
        assert!(!printed.contains("secret-key"));
        assert!(printed.contains("has_key: true"));
    }

    #[test]
    fn test_url_uses_configured_host() {
        let client = KakaoClient::new(ClientConfig {
            pose_base_url: "http://127.0.0.1:9000/".to_string(),
            ..Default::default()
        })
        .unwrap();
        let url = client.url(Host::Pose, "/pose", &[]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/pose");
    }
}
