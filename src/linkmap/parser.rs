// Mon Oct 19 2026 - Alex

use crate::linkmap::{EligibilityFilter, LinkMap, LinkMapError, ObjectFile, Symbol};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

pub const OBJECT_FILES_MARKER: &str = "# Object files:";
pub const SECTIONS_MARKER: &str = "# Sections:";
pub const SYMBOLS_MARKER: &str = "# Symbols:";
pub const TEXT_SECTION_MARKER: &str = "__TEXT\t__text";

/// Sections of a link map, in the order the linker writes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    Preamble,
    ObjectFiles,
    Sections,
    Symbols,
}

impl Section {
    fn from_marker(line: &str) -> Option<Self> {
        if line.contains(SYMBOLS_MARKER) {
            Some(Section::Symbols)
        } else if line.contains(SECTIONS_MARKER) {
            Some(Section::Sections)
        } else if line.contains(OBJECT_FILES_MARKER) {
            Some(Section::ObjectFiles)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub object_files: usize,
    pub symbol_lines: usize,
    pub recorded: usize,
    pub malformed: usize,
    pub filtered: usize,
    pub text_section_found: bool,
    pub terminated_early: bool,
}

pub struct LinkMapParser {
    filter: EligibilityFilter,
}

impl LinkMapParser {
    pub fn new(filter: EligibilityFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &EligibilityFilter {
        &self.filter
    }

    /// Parses link map text. Malformed lines are skipped, so this never fails.
    pub fn parse(&self, text: &str) -> LinkMap {
        self.parse_with_stats(text).0
    }

    pub fn parse_with_stats(&self, text: &str) -> (LinkMap, ParseStats) {
        let mut state = ParseState::new(&self.filter);
        for line in text.lines() {
            if !state.feed(line) {
                break;
            }
        }
        state.finish()
    }

    pub fn parse_reader<R: BufRead>(&self, mut reader: R) -> Result<(LinkMap, ParseStats), LinkMapError> {
        let mut state = ParseState::new(&self.filter);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            if !state.feed(line) {
                break;
            }
        }

        Ok(state.finish())
    }

    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<(LinkMap, ParseStats), LinkMapError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LinkMapError::NotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        log::debug!("Parsing link map {:?}", path);
        self.parse_reader(BufReader::new(file))
    }
}

impl Default for LinkMapParser {
    fn default() -> Self {
        Self::new(EligibilityFilter::default())
    }
}

struct ParseState<'a> {
    filter: &'a EligibilityFilter,
    section: Section,
    objects: Vec<Arc<ObjectFile>>,
    map: LinkMap,
    stats: ParseStats,
}

impl<'a> ParseState<'a> {
    fn new(filter: &'a EligibilityFilter) -> Self {
        Self {
            filter,
            section: Section::Preamble,
            objects: Vec::new(),
            map: LinkMap::default(),
            stats: ParseStats::default(),
        }
    }

    /// Returns `false` once the symbol scan has left the text section.
    fn feed(&mut self, line: &str) -> bool {
        if let Some(next) = Section::from_marker(line) {
            if next > self.section {
                log::trace!("Entering {:?}", next);
                self.section = next;
                return true;
            }
        }

        match self.section {
            Section::Preamble => true,
            Section::ObjectFiles => {
                self.object_line(line);
                true
            }
            Section::Sections => {
                self.section_line(line);
                true
            }
            Section::Symbols => self.symbol_line(line),
        }
    }

    fn object_line(&mut self, line: &str) {
        let Some(close) = line.find(']') else {
            return;
        };

        let index = line
            .get(..close)
            .and_then(|head| head.strip_prefix('['))
            .and_then(|digits| digits.trim().parse::<usize>().ok());
        if index != Some(self.objects.len()) {
            log::debug!("Object file index {:?} out of sequence, expected {}", index, self.objects.len());
        }

        let descriptor = line[close + 1..].trim_start();
        self.objects.push(Arc::new(ObjectFile::from_descriptor(descriptor)));
        self.stats.object_files += 1;
    }

    fn section_line(&mut self, line: &str) {
        if self.stats.text_section_found || !line.contains(TEXT_SECTION_MARKER) {
            return;
        }

        let fields: Vec<&str> = line.splitn(3, '\t').collect();
        if fields.len() != 3 {
            return;
        }

        let start = parse_hex(fields[0]).unwrap_or(0);
        let size = parse_hex(fields[1]).unwrap_or(0);
        log::debug!("Text section at 0x{:x} (0x{:x} bytes)", start, size);
        self.map = LinkMap::new(start, size);
        self.stats.text_section_found = true;
    }

    fn symbol_line(&mut self, line: &str) -> bool {
        if !line.starts_with("0x") {
            return true;
        }

        let fields: Vec<&str> = line.splitn(3, '\t').collect();
        if fields.len() != 3 {
            self.stats.malformed += 1;
            return true;
        }
        self.stats.symbol_lines += 1;

        let Some(address) = parse_hex(fields[0]) else {
            log::debug!("Skipping symbol line with bad address: {}", line);
            self.stats.malformed += 1;
            return true;
        };

        let size = parse_hex(fields[1]).unwrap_or(0);
        let (object_index, name) = split_descriptor(fields[2]);

        let Some(object) = self.objects.get(object_index) else {
            log::debug!("Symbol {} references unknown object [{}]", name, object_index);
            self.stats.malformed += 1;
            return true;
        };

        let symbol = Symbol::new(name, object.clone());
        if size == 0 || !self.filter.is_eligible(&symbol) {
            self.stats.filtered += 1;
            return true;
        }

        // Only a recordable symbol outside __text ends the scan.
        if !self.map.contains_address(address) {
            log::debug!("Symbol scan left the text section at 0x{:x}", address);
            self.stats.terminated_early = true;
            return false;
        }

        if self.map.insert(address, symbol) {
            self.stats.recorded += 1;
        }
        true
    }

    fn finish(self) -> (LinkMap, ParseStats) {
        if !self.stats.text_section_found {
            log::warn!("No __TEXT,__text section found in link map");
        }
        log::info!(
            "Parsed link map: {} objects, {} symbols recorded, {} filtered, {} malformed",
            self.stats.object_files,
            self.map.len(),
            self.stats.filtered,
            self.stats.malformed
        );
        (self.map, self.stats)
    }
}

/// Splits `[  3] _name` into `(3, "_name")`. A missing or unreadable index means object 0.
fn split_descriptor(descriptor: &str) -> (usize, &str) {
    if let Some(rest) = descriptor.strip_prefix('[') {
        if let Some(end) = rest.find("] ") {
            let index = rest[..end].trim().parse().unwrap_or(0);
            return (index, &rest[end + 2..]);
        }
    }
    (0, descriptor)
}

fn parse_hex(field: &str) -> Option<u64> {
    let digits = field.trim().strip_prefix("0x")?;
    u64::from_str_radix(digits, 16).ok()
}
