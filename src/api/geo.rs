//! Coordinate lookups: region codes, addresses and coordinate transforms.

use serde::{Deserialize, Serialize};

use super::client::KakaoClient;
use super::local::{LotAddress, RoadAddress};
use super::request::{check_coordinate, Lookup, Payload, Request};
use super::types::{CoordSystem, GeoResult};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct CoordToRegion {
    pub x: f64,
    pub y: f64,
    pub input_coord: CoordSystem,
    pub output_coord: CoordSystem,
}

impl Lookup for CoordToRegion {
    type Output = GeoResult<Region>;

    const NAME: &'static str = "CoordToRegion";
    const PATH: &'static str = "/v2/local/geo/coord2regioncode";
    const XML: bool = true;

    fn payload(&self) -> Payload {
        Payload::Query(vec![
            ("x", self.x.to_string()),
            ("y", self.y.to_string()),
            ("input_coord", self.input_coord.as_str().to_string()),
            ("output_coord", self.output_coord.as_str().to_string()),
        ])
    }

    fn check(&self) -> Result<()> {
        check_coordinate(self.x, self.y)
    }
}

#[derive(Debug, Clone)]
pub struct CoordToAddress {
    pub x: f64,
    pub y: f64,
    pub input_coord: CoordSystem,
}

impl Lookup for CoordToAddress {
    type Output = GeoResult<CoordAddress>;

    const NAME: &'static str = "CoordToAddress";
    const PATH: &'static str = "/v2/local/geo/coord2address";
    const XML: bool = true;

    fn payload(&self) -> Payload {
        Payload::Query(vec![
            ("x", self.x.to_string()),
            ("y", self.y.to_string()),
            ("input_coord", self.input_coord.as_str().to_string()),
        ])
    }

    fn check(&self) -> Result<()> {
        check_coordinate(self.x, self.y)
    }
}

#[derive(Debug, Clone)]
pub struct TransformCoord {
    pub x: f64,
    pub y: f64,
    pub input_coord: CoordSystem,
    pub output_coord: CoordSystem,
}

impl Lookup for TransformCoord {
    type Output = GeoResult<Point>;

    const NAME: &'static str = "TransformCoord";
    const PATH: &'static str = "/v2/local/geo/transcoord";
    const XML: bool = true;

    fn payload(&self) -> Payload {
        Payload::Query(vec![
            ("x", self.x.to_string()),
            ("y", self.y.to_string()),
            ("input_coord", self.input_coord.as_str().to_string()),
            ("output_coord", self.output_coord.as_str().to_string()),
        ])
    }

    fn check(&self) -> Result<()> {
        check_coordinate(self.x, self.y)
    }
}

impl Request<CoordToRegion> {
    pub fn input_coord(mut self, system: &str) -> Self {
        match system.parse::<CoordSystem>() {
            Ok(parsed) => {
                self.lookup_mut().input_coord = parsed;
                self
            }
            Err(err) => self.reject(err),
        }
    }

    pub fn output_coord(mut self, system: &str) -> Self {
        match system.parse::<CoordSystem>() {
            Ok(parsed) => {
                self.lookup_mut().output_coord = parsed;
                self
            }
            Err(err) => self.reject(err),
        }
    }
}

impl Request<CoordToAddress> {
    pub fn input_coord(mut self, system: &str) -> Self {
        match system.parse::<CoordSystem>() {
            Ok(parsed) => {
                self.lookup_mut().input_coord = parsed;
                self
            }
            Err(err) => self.reject(err),
        }
    }
}

impl Request<TransformCoord> {
    pub fn input_coord(mut self, system: &str) -> Self {
        match system.parse::<CoordSystem>() {
            Ok(parsed) => {
                self.lookup_mut().input_coord = parsed;
                self
            }
            Err(err) => self.reject(err),
        }
    }
}

impl KakaoClient {
    /// Administrative and legal region containing a coordinate
    pub fn coord_to_region(&self, x: f64, y: f64) -> Request<CoordToRegion> {
        Request::new(
            self,
            CoordToRegion {
                x,
                y,
                input_coord: CoordSystem::Wgs84,
                output_coord: CoordSystem::Wgs84,
            },
        )
    }

    /// Lot and road address at a coordinate
    pub fn coord_to_address(&self, x: f64, y: f64) -> Request<CoordToAddress> {
        Request::new(
            self,
            CoordToAddress {
                x,
                y,
                input_coord: CoordSystem::Wgs84,
            },
        )
    }

    /// Convert a WGS84 coordinate into `output_coord`; change the source with `input_coord`
    pub fn transform_coord(&self, x: f64, y: f64, output_coord: &str) -> Request<TransformCoord> {
        let mut request = Request::new(
            self,
            TransformCoord {
                x,
                y,
                input_coord: CoordSystem::Wgs84,
                output_coord: CoordSystem::Wgs84,
            },
        );
        match output_coord.parse::<CoordSystem>() {
            Ok(parsed) => {
                request.lookup_mut().output_coord = parsed;
                request
            }
            Err(err) => request.reject(err),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    /// "H" for administrative, "B" for legal districts
    pub region_type: String,
    pub address_name: String,
    pub region_1depth_name: String,
    pub region_2depth_name: String,
    pub region_3depth_name: String,
    pub region_4depth_name: String,
    pub code: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordAddress {
    pub address: Option<LotAddress>,
    pub road_address: Option<RoadAddress>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}
