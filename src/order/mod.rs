// Tue Oct 20 2026 - Alex

pub mod file;
pub mod generator;

pub use file::OrderFile;
pub use generator::{GenerationStats, OrderFileGenerator};

use crate::linkmap::{EligibilityFilter, LinkMap, Symbol};

pub const REMAINING_SYMBOLS_MARKER: &str = "# begin remaining symbol";

/// Generates with local/outlined filtering only and an unordered tail.
pub fn generate(resolved: &[Symbol], map: &LinkMap) -> OrderFile {
    let filter = EligibilityFilter::permissive();
    OrderFileGenerator::new(map, &filter).generate(resolved)
}
