// Mon Oct 19 2026 - Alex

use std::fmt;
use std::path::Path;

/// An object file listed in the `# Object files:` section of a link map.
///
/// Members of static libraries appear as `libFoo.a(bar.o)`; `library` then
/// holds the basename of the archive and `file` the basename of the member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectFile {
    path: String,
    file: String,
    library: Option<String>,
}

impl ObjectFile {
    pub fn new(file: &str, library: Option<&str>) -> Self {
        let path = library.unwrap_or(file).to_string();
        Self {
            path,
            file: basename(file),
            library: library.map(basename),
        }
    }

    /// Decodes the remainder of an object-file line (after `[N] `).
    pub fn from_descriptor(descriptor: &str) -> Self {
        match split_library_member(descriptor) {
            Some((library, member)) => Self::new(member, Some(library)),
            None => Self::new(descriptor, None),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn library(&self) -> Option<&str> {
        self.library.as_deref()
    }

    /// The `file.o` form the linker accepts as `file.o:symbol`.
    pub fn order_file_prefix(&self) -> Option<&str> {
        if self.file.ends_with(".o") {
            Some(&self.file)
        } else {
            None
        }
    }
}

impl fmt::Display for ObjectFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.library {
            Some(library) => write!(f, "{}({})", library, self.file),
            None => write!(f, "{}", self.file),
        }
    }
}

/// Splits `outer(inner)` into `(outer, inner)`. Returns `None` unless the text
/// ends with `)` and has a matching `(`. `outer` may be empty.
fn split_library_member(text: &str) -> Option<(&str, &str)> {
    let body = text.strip_suffix(')')?;
    let open = body.rfind('(')?;
    Some((&body[..open], &body[open + 1..]))
}

fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linkmap::{EligibilityFilter, Symbol};
    use std::sync::Arc;

    #[test]
    fn test_plain_object() {
        let obj = ObjectFile::from_descriptor("/build/Objects/AppDelegate.o");
        assert_eq!(obj.file(), "AppDelegate.o");
        assert_eq!(obj.library(), None);
        assert_eq!(obj.path(), "/build/Objects/AppDelegate.o");
        assert_eq!(obj.order_file_prefix(), Some("AppDelegate.o"));
    }

    #[test]
    fn test_library_member() {
        let obj = ObjectFile::from_descriptor("/sdk/GoogleMobileAds.framework/GoogleMobileAds(GADBanner.o)");
        assert_eq!(obj.file(), "GADBanner.o");
        assert_eq!(obj.library(), Some("GoogleMobileAds"));
        assert_eq!(obj.path(), "/sdk/GoogleMobileAds.framework/GoogleMobileAds");
        assert_eq!(obj.order_file_prefix(), Some("GADBanner.o"));
    }

    #[test]
    fn test_no_prefix_without_object_extension() {
        let obj = ObjectFile::from_descriptor("linker synthesized");
        assert_eq!(obj.file(), "linker synthesized");
        assert_eq!(obj.order_file_prefix(), None);

        let dylib = ObjectFile::from_descriptor("/usr/lib/libSystem.tbd");
        assert_eq!(dylib.order_file_prefix(), None);
    }

    #[test]
    fn test_unbalanced_parentheses_stay_in_file() {
        let obj = ObjectFile::from_descriptor("weird(name.o");
        assert_eq!(obj.file(), "weird(name.o");
        assert_eq!(obj.library(), None);
    }

    #[test]
    fn test_empty_library_keeps_member() {
        let obj = ObjectFile::from_descriptor("(only.o)");
        assert_eq!(obj.file(), "only.o");
        assert_eq!(obj.library(), Some(""));
        assert_eq!(obj.path(), "");
        assert_eq!(obj.order_file_prefix(), Some("only.o"));
        assert_eq!(obj.to_string(), "(only.o)");
        let filter = EligibilityFilter::new(vec!["GoogleMobileAds".to_string()]);
        assert!(filter.is_eligible(&Symbol::new("_f", Arc::new(obj))));
    }

    #[test]
    fn test_equality_is_by_value() {
        let a = ObjectFile::from_descriptor("/x/libA.a(foo.o)");
        let b = ObjectFile::from_descriptor("/x/libA.a(foo.o)");
        let c = ObjectFile::from_descriptor("/y/libA.a(foo.o)");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
