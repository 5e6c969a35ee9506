pub mod client;
pub mod deserializers;
pub mod geo;
pub mod http_client;
pub mod local;
pub mod paginator;
pub mod pose;
pub mod query;
pub mod request;
pub mod search;
pub mod translation;
pub mod types;
pub mod vision;

pub use client::{ClientConfig, KakaoClient};
pub use paginator::PageIterator;
pub use query::{Endpoint, Query};
pub use request::{ImageSource, Lookup, Request};
pub use types::{Format, Meta, PageResult, Sort};
