// Tue Oct 20 2026 - Alex

use crate::capture::CaptureError;
use crate::config::ConfigError;
use crate::linkmap::LinkMapError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Link map unavailable: {0}")]
    LinkMap(#[from] LinkMapError),
    #[error("Capture unavailable: {0}")]
    Capture(#[from] CaptureError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
