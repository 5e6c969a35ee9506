//! Daum search: web documents, video clips, images, blogs, cafes and books.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::client::KakaoClient;
use super::deserializers::empty_as_none_datetime;
use super::query::{require_text, Endpoint, Query};
use super::types::{BookTarget, Sort};
use crate::error::Result;

const TEXT_SORTS: &[Sort] = &[Sort::Accuracy, Sort::Recency];

macro_rules! text_search {
    (
        $(#[$meta:meta])*
        $name:ident => $doc:ty, $path:literal,
        max_page: $max_page:literal, max_size: $max_size:literal, default_size: $default:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            pub query: String,
        }

        impl Endpoint for $name {
            type Document = $doc;

            const NAME: &'static str = stringify!($name);
            const PATH: &'static str = $path;
            const MAX_PAGE: u32 = $max_page;
            const MAX_SIZE: u32 = $max_size;
            const DEFAULT_SIZE: u32 = $default;
            const SORTS: &'static [Sort] = TEXT_SORTS;

            fn params(&self) -> Vec<(&'static str, String)> {
                vec![("query", self.query.clone())]
            }

            fn check(&self, _sort: Option<Sort>) -> Result<()> {
                require_text("query", &self.query)
            }
        }
    };
}

text_search! {
    /// Web document search
    WebSearch => WebDocument, "/v2/search/web",
    max_page: 50, max_size: 50, default_size: 10
}

text_search! {
    /// Video clip search
    VideoSearch => VideoDocument, "/v2/search/vclip",
    max_page: 15, max_size: 30, default_size: 15
}

text_search! {
    /// Image search
    ImageSearch => ImageDocument, "/v2/search/image",
    max_page: 50, max_size: 80, default_size: 80
}

text_search! {
    /// Blog post search
    BlogSearch => BlogDocument, "/v2/search/blog",
    max_page: 50, max_size: 50, default_size: 10
}

text_search! {
    /// Cafe post search
    CafeSearch => CafeDocument, "/v2/search/cafe",
    max_page: 50, max_size: 50, default_size: 10
}

/// Book search, optionally restricted to one field
#[derive(Debug, Clone)]
pub struct BookSearch {
    pub query: String,
    pub target: Option<BookTarget>,
}

impl Endpoint for BookSearch {
    type Document = BookDocument;

    const NAME: &'static str = "BookSearch";
    const PATH: &'static str = "/v3/search/book";
    const MAX_PAGE: u32 = 50;
    const MAX_SIZE: u32 = 50;
    const DEFAULT_SIZE: u32 = 10;
    const SORTS: &'static [Sort] = TEXT_SORTS;

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("query", self.query.clone())];
        if let Some(target) = self.target {
            params.push(("target", target.as_str().to_string()));
        }
        params
    }

    fn check(&self, _sort: Option<Sort>) -> Result<()> {
        require_text("query", &self.query)
    }

    // The book API names recency ordering "latest"
    fn sort_value(sort: Sort) -> &'static str {
        match sort {
            Sort::Recency => "latest",
            other => other.as_str(),
        }
    }
}

impl Query<BookSearch> {
    pub fn target(mut self, target: &str) -> Self {
        match target.parse::<BookTarget>() {
            Ok(parsed) => {
                self.endpoint_mut().target = Some(parsed);
                self
            }
            Err(err) => self.reject(err),
        }
    }
}

impl KakaoClient {
    pub fn web_search(&self, query: &str) -> Query<WebSearch> {
        Query::new(self, WebSearch { query: query.to_string() })
    }

    pub fn video_search(&self, query: &str) -> Query<VideoSearch> {
        Query::new(self, VideoSearch { query: query.to_string() })
    }

    pub fn image_search(&self, query: &str) -> Query<ImageSearch> {
        Query::new(self, ImageSearch { query: query.to_string() })
    }

    pub fn blog_search(&self, query: &str) -> Query<BlogSearch> {
        Query::new(self, BlogSearch { query: query.to_string() })
    }

    pub fn cafe_search(&self, query: &str) -> Query<CafeSearch> {
        Query::new(self, CafeSearch { query: query.to_string() })
    }

    pub fn book_search(&self, query: &str) -> Query<BookSearch> {
        Query::new(
            self,
            BookSearch {
                query: query.to_string(),
                target: None,
            },
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebDocument {
    pub title: String,
    pub contents: String,
    pub url: String,
    #[serde(deserialize_with = "empty_as_none_datetime")]
    pub datetime: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoDocument {
    pub title: String,
    pub url: String,
    #[serde(deserialize_with = "empty_as_none_datetime")]
    pub datetime: Option<DateTime<FixedOffset>>,
    /// Running time in seconds
    pub play_time: u32,
    pub thumbnail: String,
    pub author: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageDocument {
    pub collection: String,
    pub thumbnail_url: String,
    pub image_url: String,
    pub width: u32,
    pub height: u32,
    pub display_sitename: String,
    pub doc_url: String,
    #[serde(deserialize_with = "empty_as_none_datetime")]
    pub datetime: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogDocument {
    pub title: String,
    pub contents: String,
    pub url: String,
    pub blogname: String,
    pub thumbnail: String,
    #[serde(deserialize_with = "empty_as_none_datetime")]
    pub datetime: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CafeDocument {
    pub title: String,
    pub contents: String,
    pub url: String,
    pub cafename: String,
    pub thumbnail: String,
    #[serde(deserialize_with = "empty_as_none_datetime")]
    pub datetime: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookDocument {
    pub title: String,
    pub contents: String,
    pub url: String,
    /// Space separated ISBN10 and ISBN13
    pub isbn: String,
    #[serde(deserialize_with = "empty_as_none_datetime")]
    pub datetime: Option<DateTime<FixedOffset>>,
    pub authors: Vec<String>,
    pub publisher: String,
    pub translators: Vec<String>,
    pub price: i64,
    /// -1 when not on sale
    pub sale_price: i64,
    pub thumbnail: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ClientConfig;
    use crate::api::types::PageResult;
    use crate::error::KakaoError;
    use pretty_assertions::assert_eq;

    fn client() -> KakaoClient {
        KakaoClient::new(ClientConfig {
            api_key: "test-key".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    const BOOK_PAGE: &str = r#"{
        "meta": {"total_count": 2, "pageable_count": 2, "is_end": true},
        "documents": [{
            "title": "미움받을 용기",
            "contents": "인간은 변할 수 있고, 누구나 행복해 질 수 있다.",
            "url": "https://search.daum.net/search?w=bookpage&bookId=1467038",
            "isbn": "8996991341 9788996991342",
            "datetime": "2014-11-17T00:00:00.000+09:00",
            "authors": ["기시미 이치로", "고가 후미타케"],
            "publisher": "인플루엔셜",
            "translators": ["전경아"],
            "price": 14900,
            "sale_price": 13410,
            "thumbnail": "https://example.com/thumb.jpg",
            "status": "정상판매"
        }, {
            "title": "오래된 책",
            "datetime": "",
            "authors": [],
            "price": 5000,
            "sale_price": -1
        }]
    }"#;

    #[test]
    fn test_book_page_round_trip() {
        let page: PageResult<BookDocument> = serde_json::from_str(BOOK_PAGE).unwrap();
        assert_eq!(page.documents.len(), 2);
        assert_eq!(page.documents[0].price, 14900);
        assert_eq!(page.documents[0].authors, vec!["기시미 이치로", "고가 후미타케"]);
        assert!(page.documents[1].datetime.is_none());
        assert_eq!(page.documents[1].sale_price, -1);

        let encoded = serde_json::to_string(&page).unwrap();
        let decoded: PageResult<BookDocument> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, page);
    }

    #[test]
    fn test_defaults() {
        let query = client().blog_search("rust");
        assert_eq!(query.current_page(), 1);
        assert_eq!(query.page_size(), 10);
        assert_eq!(query.sort_order(), Some(Sort::Accuracy));
        assert!(query.last_error().is_none());

        assert_eq!(client().image_search("cat").page_size(), 80);
        assert_eq!(client().video_search("cat").page_size(), 15);
    }

    #[test]
    fn test_book_recency_is_sent_as_latest() {
        let url = client().book_search("rust").sort("recency").target("title").url().unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("sort".to_string(), "latest".to_string())));
        assert!(pairs.contains(&("target".to_string(), "title".to_string())));
    }

    #[test]
    fn test_book_rejects_unknown_target() {
        let query = client().book_search("rust").target("title").target("author");
        assert_eq!(query.endpoint().target, Some(BookTarget::Title));
        assert!(matches!(query.last_error(), Some(KakaoError::UnsupportedTarget(t)) if t == "author"));
    }

    #[test]
    fn test_distance_sort_not_offered_for_text_search() {
        let query = client().web_search("rust").sort("distance");
        assert_eq!(query.sort_order(), Some(Sort::Accuracy));
        assert!(matches!(query.last_error(), Some(KakaoError::UnsupportedSortingOrder(_))));
    }

    #[test]
    fn test_xml_rejected_for_search() {
        let query = client().cafe_search("rust").format("xml");
        assert_eq!(query.output_format(), crate::api::types::Format::Json);
        assert!(matches!(query.last_error(), Some(KakaoError::UnsupportedFormat(_))));
    }
}
