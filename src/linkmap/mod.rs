// Mon Oct 19 2026 - Alex

pub mod error;
pub mod object_file;
pub mod parser;
pub mod symbol;
pub mod table;

pub use error::LinkMapError;
pub use object_file::ObjectFile;
pub use parser::{LinkMapParser, ParseStats, Section};
pub use symbol::{EligibilityFilter, Symbol};
pub use table::LinkMap;

/// Parses with local/outlined filtering only.
pub fn parse(text: &str) -> LinkMap {
    LinkMapParser::default().parse(text)
}
