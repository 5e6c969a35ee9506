//! Chainable, validating query builder shared by every paginated endpoint.
//!
//! Setters never abort the chain. An invalid value is dropped, the previous
//! value is kept, a warning is logged and the error is parked in
//! `last_error`, where the terminal call picks it up before doing any I/O.

use log::{debug, warn};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use super::client::{authorization, Host, KakaoClient};
use super::http_client::decode;
use super::types::{Format, PageResult, Sort};
use crate::error::{KakaoError, Result};

/// Static description of one paginated endpoint
pub trait Endpoint: Debug + Clone + Send + Sync + 'static {
    /// Decoded document type
    type Document: DeserializeOwned + Serialize + Debug + Send + 'static;

    /// Name used in log lines
    const NAME: &'static str;
    /// Request path, without the format extension
    const PATH: &'static str;
    const MAX_PAGE: u32;
    const MAX_SIZE: u32;
    const DEFAULT_SIZE: u32;
    /// Accepted sort orders, the first one is the default
    const SORTS: &'static [Sort] = &[];
    /// Whether the path takes a `.json` / `.xml` extension
    const XML: bool = false;

    /// Endpoint specific query parameters
    fn params(&self) -> Vec<(&'static str, String)>;

    /// Requirements that can only be judged once the chain is complete
    fn check(&self, _sort: Option<Sort>) -> Result<()> {
        Ok(())
    }

    fn sort_value(sort: Sort) -> &'static str {
        sort.as_str()
    }

    fn path(format: Format) -> String {
        if Self::XML {
            format!("{}.{}", Self::PATH, format.as_str())
        } else {
            Self::PATH.to_string()
        }
    }
}

/// Everything needed to fetch any page; cloned for each concurrent fetch
#[derive(Debug, Clone)]
pub(crate) struct QueryParams<E: Endpoint> {
    pub(crate) client: KakaoClient,
    pub(crate) endpoint: E,
    pub(crate) sort: Option<Sort>,
    pub(crate) size: u32,
    pub(crate) format: Format,
    pub(crate) authorization: Option<String>,
}

impl<E: Endpoint> QueryParams<E> {
    fn params(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = self.endpoint.params();
        if let Some(sort) = self.sort {
            params.push(("sort", E::sort_value(sort).to_string()));
        }
        params.push(("page", page.to_string()));
        params.push(("size", self.size.to_string()));
        params
    }

    pub(crate) fn url(&self, page: u32) -> Result<Url> {
        self.client
            .url(Host::Dapi, &E::path(self.format), &self.params(page))
    }

    pub(crate) async fn fetch(&self, page: u32) -> Result<PageResult<E::Document>> {
        let url = self.url(page)?;
        debug!("Fetching {} page {}", E::NAME, page);
        let body = self.client.get(url, self.authorization.as_deref()).await?;
        decode(self.format, &body)
    }
}

/// Query builder and page iterator for one endpoint
#[derive(Debug)]
pub struct Query<E: Endpoint> {
    pub(crate) params: QueryParams<E>,
    pub(crate) page: u32,
    pub(crate) exhausted: bool,
    pub(crate) last_error: Option<KakaoError>,
}

impl<E: Endpoint> Query<E> {
    pub(crate) fn new(client: &KakaoClient, endpoint: E) -> Self {
        Self {
            params: QueryParams {
                authorization: client.default_authorization(),
                client: client.clone(),
                endpoint,
                sort: E::SORTS.first().copied(),
                size: E::DEFAULT_SIZE,
                format: Format::Json,
            },
            page: 1,
            exhausted: false,
            last_error: None,
        }
    }

    /// Record a rejected value without breaking the chain
    pub(crate) fn reject(mut self, err: KakaoError) -> Self {
        warn!("{}: {}", E::NAME, err);
        self.last_error = Some(err);
        self
    }

    pub(crate) fn endpoint_mut(&mut self) -> &mut E {
        &mut self.params.endpoint
    }

    pub fn endpoint(&self) -> &E {
        &self.params.endpoint
    }

    pub fn sort(mut self, order: &str) -> Self {
        match order.parse::<Sort>() {
            Ok(sort) if E::SORTS.contains(&sort) => {
                self.params.sort = Some(sort);
                self
            }
            _ => self.reject(KakaoError::UnsupportedSortingOrder(order.to_string())),
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        if (1..=E::MAX_PAGE).contains(&page) {
            self.page = page;
            self
        } else {
            self.reject(KakaoError::PageOutOfBound {
                page,
                max: E::MAX_PAGE,
            })
        }
    }

    pub fn size(mut self, size: u32) -> Self {
        if (1..=E::MAX_SIZE).contains(&size) {
            self.params.size = size;
            self
        } else {
            self.reject(KakaoError::SizeOutOfBound {
                size,
                max: E::MAX_SIZE,
            })
        }
    }

    pub fn format(mut self, format: &str) -> Self {
        match format.parse::<Format>() {
            Ok(Format::Xml) if !E::XML => {
                self.reject(KakaoError::UnsupportedFormat(format.to_string()))
            }
            Ok(parsed) => {
                self.params.format = parsed;
                self
            }
            Err(err) => self.reject(err),
        }
    }

    /// Replace the client's key for this query only
    pub fn auth(mut self, key: &str) -> Self {
        match authorization(key) {
            Some(value) => {
                self.params.authorization = Some(value);
                self
            }
            None => self.reject(KakaoError::NoApiKey),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.params.size
    }

    pub fn sort_order(&self) -> Option<Sort> {
        self.params.sort
    }

    pub fn output_format(&self) -> Format {
        self.params.format
    }

    pub fn last_error(&self) -> Option<&KakaoError> {
        self.last_error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<KakaoError> {
        self.last_error.take()
    }

    /// URL the next fetch would request
    pub fn url(&self) -> Result<Url> {
        self.params.url(self.page)
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(KakaoError::InvalidInput(format!("{} cannot be empty", field)))
    } else {
        Ok(())
    }
}
