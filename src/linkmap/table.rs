// Mon Oct 19 2026 - Alex

use crate::linkmap::Symbol;
use ahash::AHashMap;

/// Static address → symbol table for the `__TEXT,__text` section.
///
/// Every key lies inside `[text_section_start, text_section_start + text_section_size)`.
/// Iteration order of [`LinkMap::symbols`] is unspecified.
#[derive(Debug, Clone, Default)]
pub struct LinkMap {
    text_section_start: u64,
    text_section_size: u64,
    address_to_symbol: AHashMap<u64, Symbol>,
}

impl LinkMap {
    pub fn new(text_section_start: u64, text_section_size: u64) -> Self {
        Self {
            text_section_start,
            text_section_size,
            address_to_symbol: AHashMap::new(),
        }
    }

    pub fn text_section_start(&self) -> u64 {
        self.text_section_start
    }

    pub fn text_section_size(&self) -> u64 {
        self.text_section_size
    }

    pub fn text_section_end(&self) -> u64 {
        self.text_section_start.saturating_add(self.text_section_size)
    }

    pub fn contains_address(&self, address: u64) -> bool {
        address >= self.text_section_start && address < self.text_section_end()
    }

    /// Records `symbol` at `address`, replacing any previous entry. Addresses
    /// outside the text section are rejected.
    pub fn insert(&mut self, address: u64, symbol: Symbol) -> bool {
        if !self.contains_address(address) {
            return false;
        }
        self.address_to_symbol.insert(address, symbol);
        true
    }

    pub fn get(&self, address: u64) -> Option<&Symbol> {
        self.address_to_symbol.get(&address)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.address_to_symbol.values()
    }

    pub fn entries(&self) -> impl Iterator<Item = (u64, &Symbol)> {
        self.address_to_symbol.iter().map(|(addr, sym)| (*addr, sym))
    }

    /// All recorded static addresses in ascending order.
    pub fn addresses(&self) -> Vec<u64> {
        let mut addresses: Vec<u64> = self.address_to_symbol.keys().copied().collect();
        addresses.sort_unstable();
        addresses
    }

    pub fn len(&self) -> usize {
        self.address_to_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.address_to_symbol.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linkmap::ObjectFile;
    use std::sync::Arc;

    #[test]
    fn test_insert_respects_text_bounds() {
        let obj = Arc::new(ObjectFile::new("a.o", None));
        let mut map = LinkMap::new(0x1000, 0x1000);
        assert!(map.insert(0x1000, Symbol::new("_a", obj.clone())));
        assert!(map.insert(0x1FFF, Symbol::new("_b", obj.clone())));
        assert!(!map.insert(0x2000, Symbol::new("_c", obj.clone())));
        assert!(!map.insert(0x0FFF, Symbol::new("_d", obj)));
        assert_eq!(map.len(), 2);
        assert_eq!(map.addresses(), vec![0x1000, 0x1FFF]);
    }

    #[test]
    fn test_last_write_wins() {
        let obj = Arc::new(ObjectFile::new("a.o", None));
        let mut map = LinkMap::new(0x1000, 0x100);
        map.insert(0x1010, Symbol::new("_first", obj.clone()));
        map.insert(0x1010, Symbol::new("_second", obj));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(0x1010).map(|s| s.name()), Some("_second"));
    }
}
