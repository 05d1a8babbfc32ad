//! Recognizer output as the engine sees it.
//!
//! The recognizer reports hands as lists of normalized landmarks (MediaPipe
//! hand model ordering). Only the first hand's index fingertip is consumed.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

pub const INDEX_FINGER_TIP: usize = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// 0.0..1.0 across the video frame.
    pub x: f64,
    /// 0.0..1.0 down the video frame.
    pub y: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HandSample {
    #[serde(default)]
    pub landmarks: Vec<Vec<Landmark>>,
}

impl HandSample {
    pub fn single(points: Vec<Landmark>) -> Self {
        Self { landmarks: vec![points] }
    }

    /// A one-hand sample with only the fingertip set, for drivers and tests.
    pub fn fingertip(x: f64, y: f64) -> Self {
        let mut points = vec![Landmark::default(); INDEX_FINGER_TIP + 1];
        points[INDEX_FINGER_TIP] = Landmark { x, y };
        Self::single(points)
    }

    /// Hand 0, point 8, if present and finite.
    pub fn fingertip_point(&self) -> Option<Landmark> {
        let tip = *self.landmarks.first()?.get(INDEX_FINGER_TIP)?;
        (tip.x.is_finite() && tip.y.is_finite()).then_some(tip)
    }

    /// Decode the JSON form of a recognizer result (`{"landmarks": [[{x, y, z}, ..]]}`).
    /// Extra fields such as `z`, `handedness` or `gestures` are ignored.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| GameError::MalformedResult(e.to_string()))
    }
}
