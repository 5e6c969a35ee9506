//! Local search: address geocoding, keyword and category place search.

use serde::{Deserialize, Serialize};

use super::client::KakaoClient;
use super::query::{require_text, Endpoint, Query};
use super::request::check_coordinate;
use super::types::{AnalyzeType, CategoryGroup, Sort};
use crate::error::{KakaoError, Result};

pub const MAX_RADIUS: u32 = 20_000;

const PLACE_SORTS: &[Sort] = &[Sort::Accuracy, Sort::Distance];

/// Bounding rectangle given by its lower-left and upper-right corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    fn as_param(&self) -> String {
        format!("{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// Geographic restriction shared by keyword and category search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spatial {
    pub center: Option<(f64, f64)>,
    pub radius: Option<u32>,
    pub rect: Option<Rect>,
}

impl Spatial {
    fn push_params(&self, params: &mut Vec<(&'static str, String)>) {
        if let Some((x, y)) = self.center {
            params.push(("x", x.to_string()));
            params.push(("y", y.to_string()));
        }
        if let Some(radius) = self.radius {
            params.push(("radius", radius.to_string()));
        }
        if let Some(rect) = self.rect {
            params.push(("rect", rect.as_param()));
        }
    }

    fn check(&self, sort: Option<Sort>) -> Result<()> {
        if self.center.is_none() {
            if sort == Some(Sort::Distance) {
                return Err(KakaoError::InvalidInput(
                    "distance sorting requires a center coordinate".to_string(),
                ));
            }
            if self.radius.is_some() {
                return Err(KakaoError::InvalidInput(
                    "radius requires a center coordinate".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Endpoints that accept place filters
pub trait PlaceFilter: Endpoint {
    fn spatial_mut(&mut self) -> &mut Spatial;
    fn category_mut(&mut self) -> &mut Option<CategoryGroup>;
}

impl<E: PlaceFilter> Query<E> {
    pub fn category(mut self, code: &str) -> Self {
        match code.parse::<CategoryGroup>() {
            Ok(group) => {
                *self.endpoint_mut().category_mut() = Some(group);
                self
            }
            Err(err) => self.reject(err),
        }
    }

    /// Center point as longitude (x) and latitude (y)
    pub fn center(mut self, x: f64, y: f64) -> Self {
        match check_coordinate(x, y) {
            Ok(()) => {
                self.endpoint_mut().spatial_mut().center = Some((x, y));
                self
            }
            Err(err) => self.reject(err),
        }
    }

    /// Search radius in meters
    pub fn radius(mut self, meters: u32) -> Self {
        if meters <= MAX_RADIUS {
            self.endpoint_mut().spatial_mut().radius = Some(meters);
            self
        } else {
            self.reject(KakaoError::RadiusOutOfBound(meters))
        }
    }

    pub fn rect(mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        let ordered = min_x < max_x && min_y < max_y;
        if check_coordinate(min_x, min_y).is_ok() && check_coordinate(max_x, max_y).is_ok() && ordered {
            self.endpoint_mut().spatial_mut().rect = Some(Rect {
                min_x,
                min_y,
                max_x,
                max_y,
            });
            self
        } else {
            self.reject(KakaoError::InvalidInput(format!(
                "rect ({}, {}, {}, {}) must list the lower-left corner before the upper-right corner",
                min_x, min_y, max_x, max_y
            )))
        }
    }
}

#[derive(Debug, Clone)]
pub struct AddressSearch {
    pub query: String,
    pub analyze_type: Option<AnalyzeType>,
}

impl Endpoint for AddressSearch {
    type Document = AddressDocument;

    const NAME: &'static str = "AddressSearch";
    const PATH: &'static str = "/v2/local/search/address";
    const MAX_PAGE: u32 = 45;
    const MAX_SIZE: u32 = 30;
    const DEFAULT_SIZE: u32 = 10;
    const XML: bool = true;

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("query", self.query.clone())];
        if let Some(analyze_type) = self.analyze_type {
            params.push(("analyze_type", analyze_type.as_str().to_string()));
        }
        params
    }

    fn check(&self, _sort: Option<Sort>) -> Result<()> {
        require_text("query", &self.query)
    }
}

impl Query<AddressSearch> {
    pub fn analyze_type(mut self, analyze_type: &str) -> Self {
        match analyze_type.parse::<AnalyzeType>() {
            Ok(parsed) => {
                self.endpoint_mut().analyze_type = Some(parsed);
                self
            }
            Err(err) => self.reject(err),
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeywordSearch {
    pub query: String,
    pub category: Option<CategoryGroup>,
    pub spatial: Spatial,
}

impl Endpoint for KeywordSearch {
    type Document = Place;

    const NAME: &'static str = "KeywordSearch";
    const PATH: &'static str = "/v2/local/search/keyword";
    const MAX_PAGE: u32 = 45;
    const MAX_SIZE: u32 = 15;
    const DEFAULT_SIZE: u32 = 15;
    const SORTS: &'static [Sort] = PLACE_SORTS;
    const XML: bool = true;

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("query", self.query.clone())];
        if let Some(category) = self.category {
            params.push(("category_group_code", category.as_str().to_string()));
        }
        self.spatial.push_params(&mut params);
        params
    }

    fn check(&self, sort: Option<Sort>) -> Result<()> {
        require_text("query", &self.query)?;
        self.spatial.check(sort)
    }
}

impl PlaceFilter for KeywordSearch {
    fn spatial_mut(&mut self) -> &mut Spatial {
        &mut self.spatial
    }

    fn category_mut(&mut self) -> &mut Option<CategoryGroup> {
        &mut self.category
    }
}

#[derive(Debug, Clone)]
pub struct CategorySearch {
    pub category: Option<CategoryGroup>,
    pub spatial: Spatial,
}

impl Endpoint for CategorySearch {
    type Document = Place;

    const NAME: &'static str = "CategorySearch";
    const PATH: &'static str = "/v2/local/search/category";
    const MAX_PAGE: u32 = 45;
    const MAX_SIZE: u32 = 15;
    const DEFAULT_SIZE: u32 = 15;
    const SORTS: &'static [Sort] = PLACE_SORTS;
    const XML: bool = true;

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(category) = self.category {
            params.push(("category_group_code", category.as_str().to_string()));
        }
        self.spatial.push_params(&mut params);
        params
    }

    fn check(&self, sort: Option<Sort>) -> Result<()> {
        if self.category.is_none() {
            return Err(KakaoError::InvalidInput(
                "category search requires a category group code".to_string(),
            ));
        }
        let circle = self.spatial.center.is_some() && self.spatial.radius.is_some();
        if !circle && self.spatial.rect.is_none() {
            return Err(KakaoError::InvalidInput(
                "category search requires center and radius, or rect".to_string(),
            ));
        }
        self.spatial.check(sort)
    }
}

impl PlaceFilter for CategorySearch {
    fn spatial_mut(&mut self) -> &mut Spatial {
        &mut self.spatial
    }

    fn category_mut(&mut self) -> &mut Option<CategoryGroup> {
        &mut self.category
    }
}

impl KakaoClient {
    pub fn address_search(&self, query: &str) -> Query<AddressSearch> {
        Query::new(
            self,
            AddressSearch {
                query: query.to_string(),
                analyze_type: None,
            },
        )
    }

    pub fn keyword_search(&self, query: &str) -> Query<KeywordSearch> {
        Query::new(
            self,
            KeywordSearch {
                query: query.to_string(),
                category: None,
                spatial: Spatial::default(),
            },
        )
    }

    pub fn category_search(&self, code: &str) -> Query<CategorySearch> {
        Query::new(
            self,
            CategorySearch {
                category: None,
                spatial: Spatial::default(),
            },
        )
        .category(code)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressDocument {
    pub address_name: String,
    /// REGION, ROAD, REGION_ADDR or ROAD_ADDR
    pub address_type: String,
    pub x: String,
    pub y: String,
    pub address: Option<LotAddress>,
    pub road_address: Option<RoadAddress>,
}

/// Lot-number (jibun) address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LotAddress {
    pub address_name: String,
    pub region_1depth_name: String,
    pub region_2depth_name: String,
    pub region_3depth_name: String,
    pub region_3depth_h_name: String,
    pub h_code: String,
    pub b_code: String,
    /// "Y" for mountain lots
    pub mountain_yn: String,
    pub main_address_no: String,
    pub sub_address_no: String,
    pub x: String,
    pub y: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadAddress {
    pub address_name: String,
    pub region_1depth_name: String,
    pub region_2depth_name: String,
    pub region_3depth_name: String,
    pub road_name: String,
    pub underground_yn: String,
    pub main_building_no: String,
    pub sub_building_no: String,
    pub building_name: String,
    pub zone_no: String,
    pub x: String,
    pub y: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Place {
    pub id: String,
    pub place_name: String,
    pub category_name: String,
    pub category_group_code: String,
    pub category_group_name: String,
    pub phone: String,
    pub address_name: String,
    pub road_address_name: String,
    pub x: String,
    pub y: String,
    pub place_url: String,
    /// Meters from the center, empty without one
    pub distance: String,
}

/// Parse the string coordinates the local API reports
fn parse_coordinate(x: &str, y: &str) -> Option<(f64, f64)> {
    Some((x.trim().parse().ok()?, y.trim().parse().ok()?))
}

impl AddressDocument {
    pub fn coordinate(&self) -> Option<(f64, f64)> {
        parse_coordinate(&self.x, &self.y)
    }
}

impl Place {
    pub fn coordinate(&self) -> Option<(f64, f64)> {
        parse_coordinate(&self.x, &self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ClientConfig;
    use crate::api::http_client::decode;
    use crate::api::paginator::PageIterator;
    use crate::api::types::{Format, PageResult};
    use pretty_assertions::assert_eq;

    fn client() -> KakaoClient {
        KakaoClient::new(ClientConfig {
            api_key: "test-key".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_xml_address_page() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<result>
  <meta>
    <total_count>1</total_count>
    <pageable_count>1</pageable_count>
    <is_end>true</is_end>
  </meta>
  <documents>
    <address_name>전북 삼성동 100</address_name>
    <address_type>REGION_ADDR</address_type>
    <x>126.99597295767953</x>
    <y>35.97664845766847</y>
    <address>
      <address_name>전북 익산시 부송동 100</address_name>
      <region_1depth_name>전북</region_1depth_name>
      <region_2depth_name>익산시</region_2depth_name>
      <region_3depth_name>부송동</region_3depth_name>
      <mountain_yn>N</mountain_yn>
      <main_address_no>100</main_address_no>
      <x>126.99597295767953</x>
      <y>35.97664845766847</y>
    </address>
  </documents>
</result>"#;
        let page: PageResult<AddressDocument> = decode(Format::Xml, xml).unwrap();
        assert!(page.meta.is_end);
        assert_eq!(page.documents.len(), 1);
        let doc = &page.documents[0];
        assert_eq!(doc.address_type, "REGION_ADDR");
        assert_eq!(doc.coordinate(), Some((126.99597295767953, 35.97664845766847)));
        assert_eq!(doc.address.as_ref().unwrap().region_2depth_name, "익산시");
        assert!(doc.road_address.is_none());
    }

    #[test]
    fn test_place_json_with_string_coordinates() {
        let json = r#"{
            "meta": {"total_count": 1, "pageable_count": 1, "is_end": true,
                     "same_name": {"region": [], "keyword": "카카오프렌즈", "selected_region": ""}},
            "documents": [{
                "id": "26338954", "place_name": "카카오프렌즈 코엑스점",
                "category_name": "가정,생활 > 문구,사무용품", "category_group_code": "",
                "category_group_name": "", "phone": "02-6002-1880",
                "address_name": "서울 강남구 삼성동 159", "road_address_name": "서울 강남구 영동대로 513",
                "x": "127.05902969025047", "y": "37.51207412593136",
                "place_url": "http://place.map.kakao.com/26338954", "distance": "418"
            }]
        }"#;
        let page: PageResult<Place> = decode(Format::Json, json).unwrap();
        assert_eq!(page.meta.same_name.as_ref().unwrap().keyword, "카카오프렌즈");
        assert_eq!(page.documents[0].coordinate(), Some((127.05902969025047, 37.51207412593136)));
        assert_eq!(page.documents[0].distance, "418");
    }

    #[test]
    fn test_radius_out_of_bound_keeps_previous() {
        let query = client().keyword_search("카페").center(127.0, 37.5).radius(500).radius(20_001);
        assert_eq!(query.endpoint().spatial.radius, Some(500));
        assert!(matches!(query.last_error(), Some(KakaoError::RadiusOutOfBound(20_001))));
    }

    #[test]
    fn test_rect_must_be_ordered() {
        let query = client().keyword_search("카페").rect(127.1, 37.6, 127.0, 37.5);
        assert!(query.endpoint().spatial.rect.is_none());
        assert!(matches!(query.last_error(), Some(KakaoError::InvalidInput(_))));

        let query = client().keyword_search("카페").rect(127.0, 37.5, 127.1, 37.6);
        let url = query.url().unwrap();
        assert!(url.query_pairs().any(|(k, v)| k == "rect" && v == "127,37.5,127.1,37.6"));
    }

    #[test]
    fn test_category_factory_rejects_unknown_code() {
        let query = client().category_search("ZZ1");
        assert!(query.endpoint().category.is_none());
        assert!(matches!(query.last_error(), Some(KakaoError::UnsupportedCategory(c)) if c == "ZZ1"));
    }

    #[test]
    fn test_local_paths_carry_format_extension() {
        let url = client().address_search("판교역로 235").format("xml").url().unwrap();
        assert_eq!(url.path(), "/v2/local/search/address.xml");
        let url = client().keyword_search("카페").url().unwrap();
        assert_eq!(url.path(), "/v2/local/search/keyword.json");
    }

    #[tokio::test]
    async fn test_distance_sort_without_center_fails_before_request() {
        let mut query = client().keyword_search("카페").sort("distance");
        assert!(query.last_error().is_none());
        let err = query.next_page().await.unwrap_err();
        assert!(matches!(err, KakaoError::InvalidInput(msg) if msg.contains("center")));
        assert_eq!(query.current_page(), 1);
        assert!(!query.is_exhausted());
    }

    #[tokio::test]
    async fn test_category_search_needs_area() {
        let mut query = client().category_search("CE7").center(127.0, 37.5);
        let err = query.next_page().await.unwrap_err();
        assert!(matches!(err, KakaoError::InvalidInput(msg) if msg.contains("radius")));
    }
}
