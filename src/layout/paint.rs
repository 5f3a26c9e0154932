//! Paint descriptors attachable to node backgrounds and borders

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Opaque reference the host assigns to an uploaded image
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHash(pub String);

impl std::fmt::Display for ImageHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How an image paint covers its node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScaleMode {
    Fill,
    Fit,
    Crop,
    Tile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    Solid {
        color: Rgb,
        opacity: f64,
    },
    Image {
        #[serde(rename = "imageHash")]
        image_hash: ImageHash,
        #[serde(rename = "scaleMode")]
        scale_mode: ScaleMode,
    },
}

impl Paint {
    pub fn solid(color: Rgb, opacity: f64) -> Self {
        Paint::Solid { color, opacity }
    }

    pub fn image(image_hash: ImageHash, scale_mode: ScaleMode) -> Self {
        Paint::Image {
            image_hash,
            scale_mode,
        }
    }

    /// Everything about the paint except its color value.
    pub(crate) fn shape(&self) -> String {
        match self {
            Paint::Solid { opacity, .. } => format!("SOLID@{}", opacity),
            Paint::Image {
                image_hash,
                scale_mode,
            } => format!("IMAGE:{}:{:?}", image_hash, scale_mode),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrokeAlign {
    Inside,
    Center,
    Outside,
}

/// Border paint with weight and alignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub paints: Vec<Paint>,
    pub weight: f64,
    pub align: StrokeAlign,
}
