use kakao_api::api::request::ImageSource;
use kakao_api::api::types::{CategoryGroup, Sort};
use kakao_api::api::{ClientConfig, KakaoClient, PageIterator};
use kakao_api::config::Config;
use kakao_api::error::KakaoError;
use mockito::{Matcher, Server, ServerGuard};
use pretty_assertions::assert_eq;
use std::io::Write;

fn client(server: &ServerGuard) -> KakaoClient {
    KakaoClient::new(ClientConfig {
        api_key: "test_key".to_string(),
        base_url: server.url(),
        pose_base_url: server.url(),
        ..Default::default()
    })
    .unwrap()
}

const EMPTY_PAGE: &str =
    r#"{"meta":{"total_count":0,"pageable_count":0,"is_end":true},"documents":[]}"#;

#[test]
fn test_query_text_is_escaped_the_same_everywhere() {
    let client = KakaoClient::new(ClientConfig {
        api_key: "k".to_string(),
        ..Default::default()
    })
    .unwrap();
    let text = "카카오 & 프렌즈?";

    let urls = vec![
        client.web_search(text).url().unwrap(),
        client.blog_search(text).url().unwrap(),
        client.book_search(text).url().unwrap(),
        client.address_search(text).url().unwrap(),
        client.keyword_search(text).url().unwrap(),
    ];
    for url in &urls {
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(query.contains(&("query".to_string(), text.to_string())), "{}", url);
        assert!(!url.as_str().contains(' '));
        assert!(url.as_str().contains("query=%EC%B9%B4%EC%B9%B4%EC%98%A4+%26+"));
    }
    assert_eq!(urls[3].path(), "/v2/local/search/address.json");
}

#[test]
fn test_defaults_per_endpoint() {
    let client = KakaoClient::new(ClientConfig::default()).unwrap();
    assert!(!client.is_configured());

    let image = client.image_search("cat");
    assert_eq!(image.page_size(), 80);
    assert_eq!(image.sort_order(), Some(Sort::Accuracy));

    let video = client.video_search("cat").page(16);
    assert!(matches!(
        video.last_error(),
        Some(KakaoError::PageOutOfBound { page: 16, max: 15 })
    ));

    let address = client.address_search("판교역로 235");
    assert_eq!(address.sort_order(), None);
    assert_eq!(address.current_page(), 1);
}

#[tokio::test]
async fn test_missing_key_fails_without_io() {
    let mut server = Server::new_async().await;
    let client = KakaoClient::new(ClientConfig {
        base_url: server.url(),
        ..Default::default()
    })
    .unwrap();
    let err = client.web_search("rust").next_page().await.unwrap_err();
    assert!(matches!(err, KakaoError::NoApiKey));

    // A per-query key is enough
    let ok = server
        .mock("GET", "/v2/search/web")
        .match_query(Matcher::Any)
        .match_header("authorization", "KakaoAK other_key")
        .with_body(EMPTY_PAGE)
        .create_async()
        .await;
    client.web_search("rust").auth(" other_key ").next_page().await.unwrap();
    ok.assert_async().await;
}

#[tokio::test]
async fn test_api_error_body_is_mapped() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/v2/search/cafe")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"errorType":"AccessDeniedError","message":"cannot find appKey"}"#)
        .create_async()
        .await;

    let err = client(&server).cafe_search("rust").next_page().await.unwrap_err();
    match err {
        KakaoError::ApiError { code, message, hint } => {
            assert_eq!(code, "AccessDeniedError");
            assert_eq!(message, "cannot find appKey");
            assert!(hint.is_some());
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rate_limit_and_legacy_error_shape() {
    let mut server = Server::new_async().await;
    let _limited = server
        .mock("GET", "/v2/search/web")
        .match_query(Matcher::Any)
        .with_status(429)
        .create_async()
        .await;
    let _bad = server
        .mock("GET", "/v3/search/book")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"code":-2,"msg":"page is more than max"}"#)
        .create_async()
        .await;

    let client = client(&server);
    assert!(matches!(
        client.web_search("rust").next_page().await,
        Err(KakaoError::RateLimit)
    ));
    match client.book_search("rust").next_page().await.unwrap_err() {
        KakaoError::ApiError { code, message, .. } => {
            assert_eq!(code, "-2");
            assert_eq!(message, "page is more than max");
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_book_search_parameters() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/v3/search/book")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "미움받을 용기".into()),
            Matcher::UrlEncoded("target".into(), "title".into()),
            Matcher::UrlEncoded("sort".into(), "latest".into()),
            Matcher::UrlEncoded("size".into(), "5".into()),
        ]))
        .with_body(
            r#"{"meta":{"total_count":1,"pageable_count":1,"is_end":true},"documents":[{
                "title":"미움받을 용기","contents":"","url":"","isbn":"8996991341 9788996991342",
                "datetime":"2014-11-17T00:00:00.000+09:00","authors":["기시미 이치로"],
                "publisher":"인플루엔셜","translators":["전경아"],"price":14900,"sale_price":13410,
                "thumbnail":"","status":"정상판매"}]}"#,
        )
        .create_async()
        .await;

    let page = client(&server)
        .book_search("미움받을 용기")
        .target("title")
        .sort("recency")
        .size(5)
        .next_page()
        .await
        .unwrap();
    assert_eq!(page.documents[0].authors, vec!["기시미 이치로"]);
    assert_eq!(page.documents[0].sale_price, 13410);
    m.assert_async().await;
}

#[tokio::test]
async fn test_local_address_search_in_xml() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/v2/local/search/address.xml")
        .match_query(Matcher::UrlEncoded("analyze_type".into(), "exact".into()))
        .with_header("content-type", "application/xml")
        .with_body(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <result><meta><total_count>1</total_count><pageable_count>1</pageable_count>\
             <is_end>true</is_end></meta>\
             <documents><address_name>경기 성남시 분당구 판교역로 235</address_name>\
             <address_type>ROAD_ADDR</address_type><x>127.110449292622</x><y>37.4020025730828</y>\
             </documents></result>",
        )
        .create_async()
        .await;

    let mut query = client(&server)
        .address_search("판교역로 235")
        .analyze_type("exact")
        .format("xml");
    let page = query.next_page().await.unwrap();

    assert!(page.meta.is_end);
    assert_eq!(page.documents[0].address_type, "ROAD_ADDR");
    assert_eq!(
        page.documents[0].coordinate(),
        Some((127.110449292622, 37.4020025730828))
    );
    assert!(query.is_exhausted());
    m.assert_async().await;
}

#[tokio::test]
async fn test_keyword_search_with_center_and_distance_sort() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/v2/local/search/keyword.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "카카오프렌즈".into()),
            Matcher::UrlEncoded("category_group_code".into(), "CE7".into()),
            Matcher::UrlEncoded("x".into(), "127.06283102249932".into()),
            Matcher::UrlEncoded("y".into(), "37.514322572335935".into()),
            Matcher::UrlEncoded("radius".into(), "2000".into()),
            Matcher::UrlEncoded("sort".into(), "distance".into()),
        ]))
        .with_body(EMPTY_PAGE)
        .create_async()
        .await;

    let page = client(&server)
        .keyword_search("카카오프렌즈")
        .category("ce7")
        .center(127.06283102249932, 37.514322572335935)
        .radius(2000)
        .sort("distance")
        .next_page()
        .await
        .unwrap();
    assert!(page.is_empty());
    m.assert_async().await;
}

#[tokio::test]
async fn test_category_search_requires_area_before_io() {
    let mut server = Server::new_async().await;
    let never = server.mock("GET", Matcher::Any).expect(0).create_async().await;

    let mut query = client(&server).category_search(CategoryGroup::Pharmacy.as_str());
    let err = query.next_page().await.unwrap_err();
    assert!(matches!(err, KakaoError::InvalidInput(_)));
    assert!(!query.is_exhausted());
    never.assert_async().await;
}

#[tokio::test]
async fn test_coord_to_region() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/v2/local/geo/coord2regioncode.json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("x".into(), "127.1".into()),
            Matcher::UrlEncoded("input_coord".into(), "WGS84".into()),
            Matcher::UrlEncoded("output_coord".into(), "WTM".into()),
        ]))
        .with_body(
            r#"{"meta":{"total_count":1},"documents":[{"region_type":"H","code":"4113565500",
                "address_name":"경기도 성남시 분당구 삼평동","region_1depth_name":"경기도",
                "region_2depth_name":"성남시 분당구","region_3depth_name":"삼평동",
                "region_4depth_name":"","x":209925.4,"y":437435.6}]}"#,
        )
        .create_async()
        .await;

    let result = client(&server)
        .coord_to_region(127.1, 37.4)
        .output_coord("wtm")
        .send()
        .await
        .unwrap();
    assert_eq!(result.documents[0].region_3depth_name, "삼평동");
    m.assert_async().await;
}

#[tokio::test]
async fn test_translate_posts_form() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/v2/translation/translate")
        .match_header("authorization", "KakaoAK test_key")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "지금 몇 시야?".into()),
            Matcher::UrlEncoded("src_lang".into(), "kr".into()),
            Matcher::UrlEncoded("target_lang".into(), "jp".into()),
        ]))
        .with_body(r#"{"translated_text":[["今何時？"]]}"#)
        .create_async()
        .await;

    let translation = client(&server)
        .translate("지금 몇 시야?")
        .target_lang("JP")
        .send()
        .await
        .unwrap();
    assert_eq!(translation.text(), "今何時？");
    m.assert_async().await;
}

#[tokio::test]
async fn test_face_detect_by_url_uses_form() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/v2/vision/face/detect")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("image_url".into(), "https://example.com/face.jpg".into()),
            Matcher::UrlEncoded("threshold".into(), "0.5".into()),
        ]))
        .with_body(r#"{"rid":"r1","result":{"width":640,"height":480,"faces":[]}}"#)
        .create_async()
        .await;

    let result = client(&server)
        .detect_faces(ImageSource::parse("https://example.com/face.jpg"))
        .threshold(0.5)
        .send()
        .await
        .unwrap();
    assert_eq!(result.result.width, 640);
    m.assert_async().await;
}

#[tokio::test]
async fn test_ocr_uploads_file_as_multipart() {
    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(b"not really a png").unwrap();

    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/v2/vision/text/ocr")
        .match_header("content-type", Matcher::Regex("^multipart/form-data".into()))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="image""#.into()),
            Matcher::Regex("not really a png".into()),
        ]))
        .with_body(r#"{"result":[{"boxes":[[0,0],[10,0],[10,5],[0,5]],"recognition_words":["hello"]}]}"#)
        .create_async()
        .await;

    let result = client(&server).ocr(file.path()).send().await.unwrap();
    assert_eq!(result.text(), "hello");
    m.assert_async().await;
}

#[tokio::test]
async fn test_pose_uploads_under_file_field() {
    let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
    file.write_all(b"jpeg bytes").unwrap();

    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/pose")
        .match_body(Matcher::Regex(r#"name="file""#.into()))
        .with_body(r#"[{"area":100.0,"bbox":[1,2,3,4],"category_id":1,"keypoints":[],"score":0.9}]"#)
        .create_async()
        .await;

    let poses = client(&server)
        .estimate_pose(ImageSource::File(file.path().to_path_buf()))
        .send()
        .await
        .unwrap();
    assert_eq!(poses.len(), 1);
    assert_eq!(poses[0].score, 0.9);
    m.assert_async().await;
}

#[tokio::test]
async fn test_missing_image_file_is_io_error() {
    let server = Server::new_async().await;
    let err = client(&server)
        .multitag(ImageSource::parse("/definitely/not/here.jpg"))
        .send()
        .await
        .unwrap_err();
    assert!(matches!(err, KakaoError::Io(_)));
}

#[test]
fn test_config_file_drives_client() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");

    let mut config = Config::default();
    config.set("auth.rest_api_key", "from_file").unwrap();
    config.set("http.max_concurrent", "3").unwrap();
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    let client = KakaoClient::new(loaded.to_client_config(None)).unwrap();
    assert!(client.is_configured());
    assert_eq!(client.config().max_concurrent, 3);
    assert_eq!(client.config().api_key, "from_file");
}
