use serde::{Deserialize, Serialize};

use super::client::{Host, KakaoClient};
use super::request::{ImageSource, Lookup, Payload, Request};

/// Keypoint order reported by the pose model
pub const KEYPOINT_NAMES: [&str; 17] = [
    "nose",
    "left_eye",
    "right_eye",
    "left_ear",
    "right_ear",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_hip",
    "right_hip",
    "left_knee",
    "right_knee",
    "left_ankle",
    "right_ankle",
];

#[derive(Debug, Clone)]
pub struct PoseEstimate {
    pub image: ImageSource,
}

impl Lookup for PoseEstimate {
    type Output = Vec<Pose>;

    const NAME: &'static str = "PoseEstimate";
    const PATH: &'static str = "/pose";
    const HOST: Host = Host::Pose;
    const IMAGE_FIELD: &'static str = "file";

    fn payload(&self) -> Payload {
        Payload::Image {
            fields: Vec::new(),
            image: self.image.clone(),
        }
    }
}

impl KakaoClient {
    pub fn estimate_pose(&self, image: ImageSource) -> Request<PoseEstimate> {
        Request::new(self, PoseEstimate { image })
    }
}

/// One detected person
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pose {
    pub area: f64,
    /// x, y, width, height
    pub bbox: Vec<f64>,
    pub category_id: u32,
    /// Flattened (x, y, score) triples in `KEYPOINT_NAMES` order
    pub keypoints: Vec<f64>,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    pub name: &'static str,
    pub x: f64,
    pub y: f64,
    pub score: f64,
}

impl Pose {
    pub fn keypoints(&self) -> Vec<Keypoint> {
        self.keypoints
            .chunks_exact(3)
            .zip(KEYPOINT_NAMES)
            .map(|(triple, name)| Keypoint {
                name,
                x: triple[0],
                y: triple[1],
                score: triple[2],
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypoints_are_named_in_order() {
        let mut flat = Vec::new();
        for i in 0..17 {
            flat.extend([i as f64, i as f64 * 2.0, 0.9]);
        }
        let pose = Pose {
            keypoints: flat,
            ..Default::default()
        };
        let points = pose.keypoints();
        assert_eq!(points.len(), 17);
        assert_eq!(points[0].name, "nose");
        assert_eq!(points[16].name, "right_ankle");
        assert_eq!(points[16].y, 32.0);
    }

    #[test]
    fn test_pose_response() {
        let poses: Vec<Pose> = serde_json::from_str(
            r#"[{"area":5986.0,"bbox":[521.0,1.0,89.0,67.0],"category_id":1,"keypoints":[],"score":0.73}]"#,
        )
        .unwrap();
        assert_eq!(poses[0].bbox.len(), 4);
        assert_eq!(poses[0].category_id, 1);
    }
}
