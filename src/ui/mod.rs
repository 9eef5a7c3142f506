// Wed Oct 21 2026 - Alex

pub mod cli;
pub mod spinner;

pub use spinner::ProgressSpinner;
