// Mon Oct 19 2026 - Alex

use crate::linkmap::ObjectFile;
use std::fmt;
use std::sync::Arc;

pub const LOCAL_SYMBOL_PREFIX: &str = "l";
pub const OUTLINED_MARKER: &str = "_OUTLINED_";

/// A compiled symbol and the object file that defines it.
///
/// Two symbols with the same name from different objects are distinct values
/// but belong to the same collision group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    name: String,
    object: Arc<ObjectFile>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, object: Arc<ObjectFile>) -> Self {
        Self {
            name: name.into(),
            object,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object(&self) -> &ObjectFile {
        &self.object
    }

    pub fn is_local(&self) -> bool {
        self.name.starts_with(LOCAL_SYMBOL_PREFIX)
    }

    pub fn is_outlined(&self) -> bool {
        self.name.contains(OUTLINED_MARKER)
    }

    /// `object.o:name`, or the bare name when the object has no `.o` form.
    pub fn qualified_name(&self) -> String {
        match self.object.order_file_prefix() {
            Some(prefix) => format!("{}:{}", prefix, self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.object)
    }
}

/// Decides which symbols may appear in an order file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibilityFilter {
    excluded_library_prefixes: Vec<String>,
}

impl EligibilityFilter {
    pub fn new(excluded_library_prefixes: Vec<String>) -> Self {
        Self { excluded_library_prefixes }
    }

    /// Accepts everything except local and outlined symbols.
    pub fn permissive() -> Self {
        Self::default()
    }

    pub fn excluded_library_prefixes(&self) -> &[String] {
        &self.excluded_library_prefixes
    }

    pub fn is_eligible(&self, symbol: &Symbol) -> bool {
        !symbol.is_local() && !symbol.is_outlined() && !self.is_excluded_library(symbol.object())
    }

    fn is_excluded_library(&self, object: &ObjectFile) -> bool {
        match object.library() {
            Some(library) => self
                .excluded_library_prefixes
                .iter()
                .any(|prefix| library.starts_with(prefix.as_str())),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(descriptor: &str) -> Arc<ObjectFile> {
        Arc::new(ObjectFile::from_descriptor(descriptor))
    }

    #[test]
    fn test_local_and_outlined_are_ineligible() {
        let filter = EligibilityFilter::permissive();
        let obj = object("/b/main.o");
        assert!(filter.is_eligible(&Symbol::new("_main", obj.clone())));
        assert!(!filter.is_eligible(&Symbol::new("ltmp0", obj.clone())));
        assert!(!filter.is_eligible(&Symbol::new("_OUTLINED_FUNCTION_3", obj.clone())));
        assert!(!filter.is_eligible(&Symbol::new("_foo_OUTLINED_bar", obj)));
    }

    #[test]
    fn test_excluded_library_prefix() {
        let filter = EligibilityFilter::new(vec!["GoogleMobileAds".to_string()]);
        let ads = object("/sdk/GoogleMobileAds(GADRequest.o)");
        let other = object("/sdk/libOther.a(GADRequest.o)");
        let plain = object("/b/GoogleMobileAdsWrapper.o");

        assert!(!filter.is_eligible(&Symbol::new("_GADInit", ads)));
        assert!(filter.is_eligible(&Symbol::new("_GADInit", other)));
        // only the containing library is matched, never the object file
        assert!(filter.is_eligible(&Symbol::new("_wrap", plain)));
    }

    #[test]
    fn test_identity_includes_object() {
        let a = Symbol::new("_foo", object("/b/a.o"));
        let b = Symbol::new("_foo", object("/b/b.o"));
        let a2 = Symbol::new("_foo", object("/b/a.o"));
        assert_ne!(a, b);
        assert_eq!(a, a2);
        assert_eq!(a.qualified_name(), "a.o:_foo");
    }
}
