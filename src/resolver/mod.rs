// Tue Oct 20 2026 - Alex

use crate::capture::{CaptureResult, LoadedImage};
use crate::linkmap::{LinkMap, Symbol};
use itertools::Itertools;
use std::cmp::Reverse;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveStats {
    pub total: usize,
    pub resolved: usize,
    pub no_image: usize,
    pub missing_symbol: usize,
}

impl ResolveStats {
    pub fn dropped(&self) -> usize {
        self.no_image + self.missing_symbol
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedTrace {
    pub symbols: Vec<Symbol>,
    pub stats: ResolveStats,
}

/// Maps runtime addresses back to link map symbols, undoing each image's ASLR slide.
pub struct AddressResolver<'a> {
    map: &'a LinkMap,
}

impl<'a> AddressResolver<'a> {
    pub fn new(map: &'a LinkMap) -> Self {
        Self { map }
    }

    pub fn resolve(&self, capture: &CaptureResult) -> ResolvedTrace {
        let images: Vec<&LoadedImage> = capture
            .loaded_images
            .iter()
            .sorted_by_key(|image| Reverse(image.load_address))
            .collect();

        let mut trace = ResolvedTrace::default();
        trace.symbols.reserve(capture.addresses.len());

        for &address in &capture.addresses {
            trace.stats.total += 1;

            let Some(image) = owning_image(&images, address) else {
                log::debug!("No loaded image contains 0x{:x}", address);
                trace.stats.no_image += 1;
                continue;
            };

            match self.lookup(image, address) {
                Some(symbol) => {
                    trace.symbols.push(symbol.clone());
                    trace.stats.resolved += 1;
                }
                None => {
                    log::debug!("Missing symbol at 0x{:x} ({})", address.wrapping_sub(image.slide), image.path);
                    trace.stats.missing_symbol += 1;
                }
            }
        }

        if trace.stats.dropped() > 0 {
            log::warn!(
                "Dropped {} of {} addresses ({} outside any image, {} without a symbol)",
                trace.stats.dropped(),
                trace.stats.total,
                trace.stats.no_image,
                trace.stats.missing_symbol
            );
        }
        log::info!("Resolved {} addresses to symbols", trace.stats.resolved);
        trace
    }

    fn lookup(&self, image: &LoadedImage, address: u64) -> Option<&'a Symbol> {
        let static_address = address.checked_sub(image.slide)?;
        self.map.get(static_address)
    }
}

/// The image with the highest load address not above `address`. `images` must
/// be sorted by descending load address.
fn owning_image<'i>(images: &[&'i LoadedImage], address: u64) -> Option<&'i LoadedImage> {
    images.iter().copied().find(|image| image.load_address <= address)
}

pub fn resolve(capture: &CaptureResult, map: &LinkMap) -> Vec<Symbol> {
    AddressResolver::new(map).resolve(capture).symbols
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linkmap::ObjectFile;
    use std::sync::Arc;

    fn map_with(entries: &[(u64, &str)]) -> LinkMap {
        let obj = Arc::new(ObjectFile::new("/b/main.o", None));
        let mut map = LinkMap::new(0x1000, 0x1000);
        for (addr, name) in entries {
            map.insert(*addr, Symbol::new(*name, obj.clone()));
        }
        map
    }

    #[test]
    fn test_attribution_picks_nearest_image_below() {
        let map = map_with(&[(0x1500, "_in_b")]);
        let capture = CaptureResult::new(
            vec![0x9500, 0x4500],
            vec![
                LoadedImage::new("/A", 0x5000, 0x4000),
                LoadedImage::new("/B", 0x9000, 0x8000),
            ],
        );

        let trace = AddressResolver::new(&map).resolve(&capture);
        let names: Vec<&str> = trace.symbols.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["_in_b"]);
        assert_eq!(trace.stats.no_image, 1);
        assert_eq!(trace.stats.missing_symbol, 0);
    }

    #[test]
    fn test_address_at_load_address_belongs_to_image() {
        let map = map_with(&[(0x1000, "_start")]);
        let capture = CaptureResult::new(vec![0x5000], vec![LoadedImage::new("/A", 0x5000, 0x4000)]);
        assert_eq!(resolve(&capture, &map).len(), 1);
    }

    #[test]
    fn test_slide_not_load_address_is_subtracted() {
        // static = 0x7100 - 0x6000, not 0x7100 - 0x7000
        let map = map_with(&[(0x1100, "_slid"), (0x1000, "_wrong")]);
        let capture = CaptureResult::new(vec![0x7100], vec![LoadedImage::new("/A", 0x7000, 0x6000)]);
        let symbols = resolve(&capture, &map);
        assert_eq!(symbols[0].name(), "_slid");
    }

    #[test]
    fn test_mid_symbol_and_underflow_are_dropped() {
        let map = map_with(&[(0x1000, "_f")]);
        let capture = CaptureResult::new(
            vec![0x5004, 0x5000, 0x10],
            vec![LoadedImage::new("/A", 0x5000, 0x4000), LoadedImage::new("/low", 0x0, 0x100)],
        );
        let trace = AddressResolver::new(&map).resolve(&capture);
        assert_eq!(trace.symbols.len(), 1);
        assert_eq!(trace.stats.missing_symbol, 2);
    }

    #[test]
    fn test_preserves_order_and_repeats() {
        let map = map_with(&[(0x1000, "_a"), (0x1010, "_b")]);
        let capture = CaptureResult::new(
            vec![0x5010, 0x5000, 0x5010],
            vec![LoadedImage::new("/A", 0x5000, 0x4000)],
        );
        let names: Vec<String> = resolve(&capture, &map).iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["_b", "_a", "_b"]);
    }

    #[test]
    fn test_no_images_drops_everything() {
        let map = map_with(&[(0x1000, "_a")]);
        let capture = CaptureResult::new(vec![0x1000], Vec::new());
        let trace = AddressResolver::new(&map).resolve(&capture);
        assert!(trace.symbols.is_empty());
        assert_eq!(trace.stats.no_image, 1);
    }
}
