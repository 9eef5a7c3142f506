// Mon Oct 19 2026 - Alex

pub mod capture;
pub mod config;
pub mod linkmap;
pub mod order;
pub mod pipeline;
pub mod resolver;
pub mod ui;
pub mod utils;

pub use capture::{CaptureResult, LoadedImage};
pub use config::{Config, RemainingOrder};
pub use linkmap::{EligibilityFilter, LinkMap, LinkMapParser, ObjectFile, Symbol};
pub use order::{OrderFile, OrderFileGenerator, REMAINING_SYMBOLS_MARKER};
pub use pipeline::{Pipeline, PipelineError, PipelineOutput};
pub use resolver::{AddressResolver, ResolvedTrace};
