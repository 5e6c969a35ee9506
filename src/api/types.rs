use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{KakaoError, Result};

/// Declares a closed set of wire values with case-insensitive parsing.
///
/// Parsing failures map to the given `KakaoError` variant so builders can
/// report them through their fail-soft setters.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $err:path {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl FromStr for $name {
            type Err = KakaoError;

            fn from_str(s: &str) -> Result<Self> {
                let needle = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| $err(needle.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Response body format
    Format, KakaoError::UnsupportedFormat {
        Json => "json",
        Xml => "xml",
    }
}

impl Default for Format {
    fn default() -> Self {
        Self::Json
    }
}

wire_enum! {
    /// Result ordering
    Sort, KakaoError::UnsupportedSortingOrder {
        Accuracy => "accuracy",
        Recency => "recency",
        /// Requires a center coordinate
        Distance => "distance",
    }
}

wire_enum! {
    /// Book search field restriction
    BookTarget, KakaoError::UnsupportedTarget {
        Title => "title",
        Isbn => "isbn",
        Publisher => "publisher",
        Person => "person",
    }
}

wire_enum! {
    /// Address matching mode
    AnalyzeType, KakaoError::UnsupportedAnalyzeType {
        Similar => "similar",
        Exact => "exact",
    }
}

wire_enum! {
    /// Coordinate reference systems accepted by the geo endpoints
    CoordSystem, KakaoError::UnsupportedCoordSystem {
        Wgs84 => "WGS84",
        Wcongnamul => "WCONGNAMUL",
        Congnamul => "CONGNAMUL",
        Wtm => "WTM",
        Tm => "TM",
        Ktm => "KTM",
        Utm => "UTM",
        Bessel => "BESSEL",
        Wktm => "WKTM",
        Wutm => "WUTM",
    }
}

impl Default for CoordSystem {
    fn default() -> Self {
        Self::Wgs84
    }
}

wire_enum! {
    /// Place category group codes
    CategoryGroup, KakaoError::UnsupportedCategory {
        Mart => "MT1",
        ConvenienceStore => "CS2",
        Kindergarten => "PS3",
        School => "SC4",
        Academy => "AC5",
        Parking => "PK6",
        GasStation => "OL7",
        Subway => "SW8",
        Bank => "BK9",
        Culture => "CT1",
        Broker => "AG2",
        PublicOffice => "PO3",
        Attraction => "AT4",
        Lodging => "AD5",
        Restaurant => "FD6",
        Cafe => "CE7",
        Hospital => "HP8",
        Pharmacy => "PM9",
    }
}

impl CategoryGroup {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Mart => "대형마트",
            Self::ConvenienceStore => "편의점",
            Self::Kindergarten => "어린이집, 유치원",
            Self::School => "학교",
            Self::Academy => "학원",
            Self::Parking => "주차장",
            Self::GasStation => "주유소, 충전소",
            Self::Subway => "지하철역",
            Self::Bank => "은행",
            Self::Culture => "문화시설",
            Self::Broker => "중개업소",
            Self::PublicOffice => "공공기관",
            Self::Attraction => "관광명소",
            Self::Lodging => "숙박",
            Self::Restaurant => "음식점",
            Self::Cafe => "카페",
            Self::Hospital => "병원",
            Self::Pharmacy => "약국",
        }
    }
}

wire_enum! {
    /// Translation language codes
    Language, KakaoError::UnsupportedLanguage {
        Korean => "kr",
        English => "en",
        Japanese => "jp",
        Chinese => "cn",
        Vietnamese => "vi",
        Indonesian => "id",
        Arabic => "ar",
        Bengali => "bn",
        German => "de",
        Spanish => "es",
        French => "fr",
        Hindi => "hi",
        Italian => "it",
        Malay => "ms",
        Dutch => "nl",
        Portuguese => "pt",
        Russian => "ru",
        Thai => "th",
        Turkish => "tr",
    }
}

/// Pagination metadata reported with every page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Number of documents matching the query
    pub total_count: u32,
    /// Number of documents reachable through paging
    pub pageable_count: u32,
    /// Whether this is the last page
    pub is_end: bool,
    /// Region analysis of the keyword query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_name: Option<SameName>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SameName {
    #[serde(default)]
    pub region: Vec<String>,
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub selected_region: String,
}

/// One decoded page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<D> {
    pub meta: Meta,
    #[serde(default = "Vec::new")]
    pub documents: Vec<D>,
}

impl<D> PageResult<D> {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountMeta {
    pub total_count: u32,
}

/// Envelope used by the single-shot geo endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoResult<D> {
    pub meta: CountMeta,
    #[serde(default = "Vec::new")]
    pub documents: Vec<D>,
}

/// Kakao error body, in either of the two shapes the gateway returns
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(rename = "errorType")]
    pub error_type: Option<String>,
    #[serde(alias = "msg")]
    pub message: Option<String>,
    pub code: Option<i64>,
}
