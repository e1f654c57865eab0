//! Cropper configuration.
//!
//! Hosts build a [`CropperConfig`] in code or deserialize it (the WASM
//! bindings accept a plain JS object). Every config is validated before a
//! cropper is created; an invalid one is rejected up front instead of
//! producing odd crops later.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crop::OutOfBoundsPolicy;

/// Fraction of the container the crop window fills by default.
pub const DEFAULT_FILL_FRACTION: f64 = 0.9;

/// Errors reported when validating a [`CropperConfig`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Aspect ratio must be a positive, finite number.
    #[error("Invalid aspect ratio {0}: must be a positive finite number")]
    InvalidAspectRatio(f64),

    /// Fill fraction must be in (0, 1].
    #[error("Invalid fill fraction {0}: must be greater than 0 and at most 1")]
    InvalidFillFraction(f64),

    /// A button label is empty or whitespace.
    #[error("Button label for {0} must not be empty")]
    EmptyLabel(&'static str),
}

/// Where the image being cropped came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageSource {
    /// Captured with the camera. The camera has its own retake preview, so
    /// the cropper shows no cancel button.
    Camera,
    /// Picked from the photo library.
    #[default]
    Library,
    /// Handed over directly by the host.
    Provided,
}

/// Settings for a cropper session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropperConfig {
    /// Aspect ratio of the cropped image (width / height)
    pub aspect_ratio: f64,
    /// Label of the confirm button
    pub crop_button_text: String,
    /// Label of the cancel / retake button
    pub cancel_button_text: String,
    /// Fraction of the container the crop window fills (0 to 1)
    pub fill_fraction: f64,
    /// Behavior when the crop window extends past the image
    pub out_of_bounds: OutOfBoundsPolicy,
    /// Origin of the image
    pub source: ImageSource,
}

impl Default for CropperConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            crop_button_text: "Crop".to_string(),
            cancel_button_text: "Retake".to_string(),
            fill_fraction: DEFAULT_FILL_FRACTION,
            out_of_bounds: OutOfBoundsPolicy::default(),
            source: ImageSource::default(),
        }
    }
}

impl CropperConfig {
    /// Create a default config with the given aspect ratio (width / height).
    pub fn with_aspect_ratio(aspect_ratio: f64) -> Self {
        Self {
            aspect_ratio,
            ..Self::default()
        }
    }

    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(ConfigError::InvalidAspectRatio(self.aspect_ratio));
        }
        if !(self.fill_fraction > 0.0 && self.fill_fraction <= 1.0) {
            return Err(ConfigError::InvalidFillFraction(self.fill_fraction));
        }
        if self.crop_button_text.trim().is_empty() {
            return Err(ConfigError::EmptyLabel("crop"));
        }
        if self.cancel_button_text.trim().is_empty() {
            return Err(ConfigError::EmptyLabel("cancel"));
        }
        Ok(())
    }

    /// Whether the host should offer a cancel/retake button.
    pub fn shows_cancel_button(&self) -> bool {
        self.source != ImageSource::Camera
    }
}
