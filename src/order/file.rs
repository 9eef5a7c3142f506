// Tue Oct 20 2026 - Alex

use crate::order::REMAINING_SYMBOLS_MARKER;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Lines of a linker order file.
///
/// Lines before the separator follow first-execution order. Lines after it
/// cover every other eligible symbol and carry no ordering guarantee unless
/// the generator was asked to sort them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFile {
    lines: Vec<String>,
    separator_index: usize,
}

impl OrderFile {
    pub(crate) fn new(observed: Vec<String>, remaining: Vec<String>) -> Self {
        let separator_index = observed.len();
        let mut lines = observed;
        lines.reserve(remaining.len() + 1);
        lines.push(REMAINING_SYMBOLS_MARKER.to_string());
        lines.extend(remaining);
        Self { lines, separator_index }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn observed(&self) -> &[String] {
        &self.lines[..self.separator_index]
    }

    pub fn separator(&self) -> &str {
        &self.lines[self.separator_index]
    }

    pub fn remaining(&self) -> &[String] {
        &self.lines[self.separator_index + 1..]
    }

    /// Number of symbol entries, not counting the separator.
    pub fn len(&self) -> usize {
        self.lines.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for line in &self.lines {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        self.write_to(BufWriter::new(File::create(path)?))
    }
}

impl fmt::Display for OrderFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
