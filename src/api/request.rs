//! Single-shot builder for endpoints that answer with one response.
//!
//! Same fail-soft setter policy as [`Query`](super::query::Query); the
//! terminal [`Request::send`] reports the parked error before any I/O.

use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::path::PathBuf;

use super::client::{authorization, Host, KakaoClient};
use super::http_client::decode;
use super::types::Format;
use crate::error::{KakaoError, Result};

/// Where an image comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Url(String),
    File(PathBuf),
}

impl ImageSource {
    /// Treat `http(s)://` input as a URL and anything else as a local path
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

/// How a lookup's parameters travel
#[derive(Debug, Clone)]
pub enum Payload {
    /// GET with a query string
    Query(Vec<(&'static str, String)>),
    /// POST with a url-encoded form
    Form(Vec<(&'static str, String)>),
    /// POST with an image, by URL (form) or by file (multipart)
    Image {
        fields: Vec<(&'static str, String)>,
        image: ImageSource,
    },
}

/// Static description of one single-shot endpoint
pub trait Lookup: Debug + Clone + Send + Sync + 'static {
    type Output: DeserializeOwned + Send;

    const NAME: &'static str;
    const PATH: &'static str;
    const HOST: Host = Host::Dapi;
    const XML: bool = false;
    /// Multipart field carrying an uploaded image
    const IMAGE_FIELD: &'static str = "image";

    fn payload(&self) -> Payload;

    fn check(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug)]
pub struct Request<L: Lookup> {
    client: KakaoClient,
    lookup: L,
    format: Format,
    authorization: Option<String>,
    last_error: Option<KakaoError>,
}

impl<L: Lookup> Request<L> {
    pub(crate) fn new(client: &KakaoClient, lookup: L) -> Self {
        Self {
            client: client.clone(),
            lookup,
            format: Format::Json,
            authorization: client.default_authorization(),
            last_error: None,
        }
    }

    pub(crate) fn reject(mut self, err: KakaoError) -> Self {
        warn!("{}: {}", L::NAME, err);
        self.last_error = Some(err);
        self
    }

    pub(crate) fn lookup_mut(&mut self) -> &mut L {
        &mut self.lookup
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn format(mut self, format: &str) -> Self {
        match format.parse::<Format>() {
            Ok(Format::Xml) if !L::XML => {
                self.reject(KakaoError::UnsupportedFormat(format.to_string()))
            }
            Ok(parsed) => {
                self.format = parsed;
                self
            }
            Err(err) => self.reject(err),
        }
    }

    pub fn auth(mut self, key: &str) -> Self {
        match authorization(key) {
            Some(value) => {
                self.authorization = Some(value);
                self
            }
            None => self.reject(KakaoError::NoApiKey),
        }
    }

    pub fn output_format(&self) -> Format {
        self.format
    }

    pub fn last_error(&self) -> Option<&KakaoError> {
        self.last_error.as_ref()
    }

    fn path(&self) -> String {
        if L::XML {
            format!("{}.{}", L::PATH, self.format.as_str())
        } else {
            L::PATH.to_string()
        }
    }

    pub async fn send(self) -> Result<L::Output> {
        if let Some(err) = self.last_error {
            return Err(err);
        }
        self.lookup.check()?;

        let path = self.path();
        let auth = self.authorization.as_deref();
        debug!("Sending {}", L::NAME);

        let body = match self.lookup.payload() {
            Payload::Query(params) => {
                let url = self.client.url(L::HOST, &path, &params)?;
                self.client.get(url, auth).await?
            }
            Payload::Form(params) => {
                let url = self.client.url(L::HOST, &path, &[])?;
                self.client.post_form(url, &params, auth).await?
            }
            Payload::Image {
                mut fields,
                image: ImageSource::Url(image_url),
            } => {
                fields.push(("image_url", image_url));
                let url = self.client.url(L::HOST, &path, &[])?;
                self.client.post_form(url, &fields, auth).await?
            }
            Payload::Image {
                fields,
                image: ImageSource::File(file),
            } => {
                let bytes = tokio::fs::read(&file).await?;
                let file_name = file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "image".to_string());
                let mut form = Form::new();
                for (key, value) in fields {
                    form = form.text(key, value);
                }
                form = form.part(L::IMAGE_FIELD, Part::bytes(bytes).file_name(file_name));
                let url = self.client.url(L::HOST, &path, &[])?;
                self.client.post_multipart(url, form, auth).await?
            }
        };

        decode(self.format, &body)
    }
}

pub(crate) fn check_coordinate(x: f64, y: f64) -> Result<()> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(KakaoError::InvalidInput(format!(
            "coordinate ({}, {}) is not a finite number",
            x, y
        )))
    }
}
