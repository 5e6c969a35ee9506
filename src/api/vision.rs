//! Vision: OCR, face and product detection, tagging, adult content and thumbnails.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::client::KakaoClient;
use super::request::{ImageSource, Lookup, Payload, Request};
use crate::error::KakaoError;

/// Detection confidence bounds accepted by the detectors
pub const MIN_THRESHOLD: f32 = 0.1;
pub const MAX_THRESHOLD: f32 = 1.0;

macro_rules! image_lookup {
    ($(#[$meta:meta])* $name:ident => $output:ty, $path:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            pub image: ImageSource,
        }

        impl Lookup for $name {
            type Output = $output;

            const NAME: &'static str = stringify!($name);
            const PATH: &'static str = $path;

            fn payload(&self) -> Payload {
                Payload::Image {
                    fields: Vec::new(),
                    image: self.image.clone(),
                }
            }
        }
    };
}

image_lookup! {
    /// Tags describing the image content
    Multitag => MultitagResult, "/v2/vision/multitag/generate"
}

image_lookup! {
    /// Adult and suggestive content scores
    AdultDetect => AdultResult, "/v2/vision/adult/detect"
}

/// Text recognition; only uploaded files are accepted
#[derive(Debug, Clone)]
pub struct Ocr {
    pub image: PathBuf,
}

impl Lookup for Ocr {
    type Output = OcrResult;

    const NAME: &'static str = "Ocr";
    const PATH: &'static str = "/v2/vision/text/ocr";

    fn payload(&self) -> Payload {
        Payload::Image {
            fields: Vec::new(),
            image: ImageSource::File(self.image.clone()),
        }
    }
}

/// Detectors that take a confidence threshold
pub trait Thresholded: Lookup {
    fn threshold_mut(&mut self) -> &mut Option<f32>;
}

#[derive(Debug, Clone)]
pub struct FaceDetect {
    pub image: ImageSource,
    pub threshold: Option<f32>,
}

impl Lookup for FaceDetect {
    type Output = FaceResult;

    const NAME: &'static str = "FaceDetect";
    const PATH: &'static str = "/v2/vision/face/detect";

    fn payload(&self) -> Payload {
        Payload::Image {
            fields: threshold_field(self.threshold),
            image: self.image.clone(),
        }
    }
}

impl Thresholded for FaceDetect {
    fn threshold_mut(&mut self) -> &mut Option<f32> {
        &mut self.threshold
    }
}

#[derive(Debug, Clone)]
pub struct ProductDetect {
    pub image: ImageSource,
    pub threshold: Option<f32>,
}

impl Lookup for ProductDetect {
    type Output = ProductResult;

    const NAME: &'static str = "ProductDetect";
    const PATH: &'static str = "/v2/vision/product/detect";

    fn payload(&self) -> Payload {
        Payload::Image {
            fields: threshold_field(self.threshold),
            image: self.image.clone(),
        }
    }
}

impl Thresholded for ProductDetect {
    fn threshold_mut(&mut self) -> &mut Option<f32> {
        &mut self.threshold
    }
}

fn threshold_field(threshold: Option<f32>) -> Vec<(&'static str, String)> {
    threshold
        .map(|t| vec![("threshold", t.to_string())])
        .unwrap_or_default()
}

impl<L: Thresholded> Request<L> {
    pub fn threshold(mut self, threshold: f32) -> Self {
        if (MIN_THRESHOLD..=MAX_THRESHOLD).contains(&threshold) {
            *self.lookup_mut().threshold_mut() = Some(threshold);
            self
        } else {
            self.reject(KakaoError::ThresholdOutOfBound(threshold))
        }
    }
}

/// Best thumbnail area for a target aspect ratio
#[derive(Debug, Clone)]
pub struct ThumbnailDetect {
    pub image: ImageSource,
    pub width: u32,
    pub height: u32,
}

impl Lookup for ThumbnailDetect {
    type Output = ThumbnailDetectResult;

    const NAME: &'static str = "ThumbnailDetect";
    const PATH: &'static str = "/v2/vision/thumbnail/detect";

    fn payload(&self) -> Payload {
        Payload::Image {
            fields: vec![("width", self.width.to_string()), ("height", self.height.to_string())],
            image: self.image.clone(),
        }
    }
}

/// Thumbnail cropped and resized to the given size
#[derive(Debug, Clone)]
pub struct ThumbnailCrop {
    pub image: ImageSource,
    pub width: u32,
    pub height: u32,
}

impl Lookup for ThumbnailCrop {
    type Output = ThumbnailCropResult;

    const NAME: &'static str = "ThumbnailCrop";
    const PATH: &'static str = "/v2/vision/thumbnail/crop";

    fn payload(&self) -> Payload {
        Payload::Image {
            fields: vec![("width", self.width.to_string()), ("height", self.height.to_string())],
            image: self.image.clone(),
        }
    }
}

fn check_dimensions<L: Lookup>(request: Request<L>, width: u32, height: u32) -> Request<L> {
    if width == 0 || height == 0 {
        request.reject(KakaoError::InvalidInput(format!(
            "thumbnail size {}x{} must be positive",
            width, height
        )))
    } else {
        request
    }
}

impl KakaoClient {
    pub fn ocr(&self, image: impl Into<PathBuf>) -> Request<Ocr> {
        Request::new(self, Ocr { image: image.into() })
    }

    pub fn detect_faces(&self, image: ImageSource) -> Request<FaceDetect> {
        Request::new(self, FaceDetect { image, threshold: None })
    }

    pub fn detect_products(&self, image: ImageSource) -> Request<ProductDetect> {
        Request::new(self, ProductDetect { image, threshold: None })
    }

    pub fn multitag(&self, image: ImageSource) -> Request<Multitag> {
        Request::new(self, Multitag { image })
    }

    pub fn detect_adult(&self, image: ImageSource) -> Request<AdultDetect> {
        Request::new(self, AdultDetect { image })
    }

    pub fn detect_thumbnail(&self, image: ImageSource, width: u32, height: u32) -> Request<ThumbnailDetect> {
        check_dimensions(
            Request::new(self, ThumbnailDetect { image, width, height }),
            width,
            height,
        )
    }

    pub fn crop_thumbnail(&self, image: ImageSource, width: u32, height: u32) -> Request<ThumbnailCrop> {
        check_dimensions(
            Request::new(self, ThumbnailCrop { image, width, height }),
            width,
            height,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    #[serde(default)]
    pub result: Vec<OcrLine>,
}

impl OcrResult {
    /// Recognized words, one detected line per output line
    pub fn text(&self) -> String {
        self.result
            .iter()
            .map(|line| line.recognition_words.join(" "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrLine {
    /// Corner points of the text box, clockwise from the top left
    pub boxes: Vec<[f64; 2]>,
    pub recognition_words: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceResult {
    pub rid: String,
    pub result: FaceData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceData {
    pub width: u32,
    pub height: u32,
    pub faces: Vec<Face>,
}

/// Detected face; position and size are ratios of the image dimensions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Face {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub score: f64,
    pub class_idx: i32,
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
    pub facial_attributes: Option<FacialAttributes>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacialAttributes {
    pub gender: Gender,
    pub age: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gender {
    pub male: f64,
    pub female: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductResult {
    pub rid: String,
    pub result: ProductData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductData {
    pub width: u32,
    pub height: u32,
    pub objects: Vec<DetectedObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectedObject {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub class: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultitagResult {
    pub rid: String,
    pub result: Tags,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tags {
    pub label: Vec<String>,
    pub label_kr: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdultResult {
    pub rid: String,
    pub result: AdultScores,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdultScores {
    pub normal: f64,
    pub soft: f64,
    pub adult: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailDetectResult {
    pub rid: String,
    pub result: ThumbnailData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailData {
    pub width: u32,
    pub height: u32,
    pub thumbnail: ThumbnailArea,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailArea {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailCropResult {
    pub thumbnail_image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::ClientConfig;

    fn client() -> KakaoClient {
        KakaoClient::new(ClientConfig {
            api_key: "test-key".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_ocr_text() {
        let result: OcrResult = serde_json::from_str(
            r#"{"result":[
                {"boxes":[[40,84],[316,84],[316,117],[40,117]],"recognition_words":["지하철역"]},
                {"boxes":[[40,130],[200,130],[200,160],[40,160]],"recognition_words":["2번", "출구"]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(result.result[0].boxes[1], [316.0, 84.0]);
        assert_eq!(result.text(), "지하철역\n2번 출구");
    }

    #[test]
    fn test_threshold_bounds() {
        let request = client()
            .detect_faces(ImageSource::Url("https://example.com/a.jpg".into()))
            .threshold(0.5)
            .threshold(1.5);
        assert_eq!(request.lookup().threshold, Some(0.5));
        assert!(matches!(request.last_error(), Some(KakaoError::ThresholdOutOfBound(_))));
    }

    #[test]
    fn test_zero_thumbnail_rejected() {
        let request = client().crop_thumbnail(ImageSource::Url("https://example.com/a.jpg".into()), 0, 100);
        assert!(matches!(request.last_error(), Some(KakaoError::InvalidInput(_))));
    }

    #[test]
    fn test_face_result() {
        let result: FaceResult = serde_json::from_str(
            r#"{"rid":"abc","result":{"width":500,"height":400,"faces":[
                {"x":0.1,"y":0.2,"w":0.3,"h":0.4,"score":0.98,"class_idx":0,"pitch":1.0,"yaw":-2.0,"roll":0.5,
                 "facial_attributes":{"gender":{"male":0.9,"female":0.1},"age":31.0}}]}}"#,
        )
        .unwrap();
        let face = &result.result.faces[0];
        assert_eq!(face.facial_attributes.as_ref().unwrap().age, 31.0);
    }
}
