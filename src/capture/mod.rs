// Mon Oct 19 2026 - Alex

pub mod error;

pub use error::CaptureError;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A binary image resident in the traced process when the trace was taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedImage {
    pub path: String,
    pub load_address: u64,
    /// Subtract from a runtime address to get the link map address.
    pub slide: u64,
}

impl LoadedImage {
    pub fn new(path: impl Into<String>, load_address: u64, slide: u64) -> Self {
        Self {
            path: path.into(),
            load_address,
            slide,
        }
    }
}

/// Addresses in first-touch order, plus the images they may belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureResult {
    pub addresses: Vec<u64>,
    pub loaded_images: Vec<LoadedImage>,
}

impl CaptureResult {
    pub fn new(addresses: Vec<u64>, loaded_images: Vec<LoadedImage>) -> Self {
        Self {
            addresses,
            loaded_images,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CaptureError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CaptureError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CaptureError::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        let capture = Self::from_json(&contents)?;
        log::info!(
            "Loaded capture with {} addresses across {} images",
            capture.addresses.len(),
            capture.loaded_images.len()
        );
        Ok(capture)
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
