//! Typed async client for the Kakao REST APIs: Daum search, Local, translation,
//! Vision and pose estimation, plus the `kakao` command-line front end.
//!
//! ```no_run
//! use kakao_api::api::{ClientConfig, KakaoClient, PageIterator};
//!
//! # async fn run() -> kakao_api::error::Result<()> {
//! let client = KakaoClient::new(ClientConfig {
//!     api_key: "REST_API_KEY".to_string(),
//!     ..Default::default()
//! })?;
//! let mut blogs = client.blog_search("러스트").sort("recency").size(20);
//! let first = blogs.next_page().await?;
//! println!("{} posts", first.meta.total_count);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
