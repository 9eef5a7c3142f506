// Tue Oct 20 2026 - Alex

use crate::config::RemainingOrder;
use crate::linkmap::{EligibilityFilter, LinkMap, Symbol};
use crate::order::OrderFile;
use ahash::AHashSet;
use indexmap::IndexMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub observed: usize,
    pub remaining: usize,
    pub collisions_prefixed: usize,
    pub collisions_unprefixed: usize,
}

/// Builds an order file from resolved trace symbols.
///
/// Symbols sharing a name form a collision group. The linker places a group
/// contiguously no matter which member is named, so the first member reached
/// emits one line for the whole group and marks every member as emitted.
pub struct OrderFileGenerator<'a> {
    map: &'a LinkMap,
    filter: &'a EligibilityFilter,
    remaining_order: RemainingOrder,
    groups: IndexMap<&'a str, Vec<&'a Symbol>>,
}

impl<'a> OrderFileGenerator<'a> {
    pub fn new(map: &'a LinkMap, filter: &'a EligibilityFilter) -> Self {
        let mut groups: IndexMap<&'a str, Vec<&'a Symbol>> = IndexMap::new();
        for symbol in map.symbols().filter(|s| filter.is_eligible(s)) {
            groups.entry(symbol.name()).or_default().push(symbol);
        }

        Self {
            map,
            filter,
            remaining_order: RemainingOrder::default(),
            groups,
        }
    }

    pub fn with_remaining_order(mut self, order: RemainingOrder) -> Self {
        self.remaining_order = order;
        self
    }

    /// Names shared by more than one eligible symbol.
    pub fn collision_groups<'s>(&'s self) -> impl Iterator<Item = (&'a str, &'s [&'a Symbol])> + 's {
        self.groups
            .iter()
            .filter(|(_, members)| members.len() > 1)
            .map(|(name, members)| (*name, members.as_slice()))
    }

    pub fn generate(&self, resolved: &[Symbol]) -> OrderFile {
        self.generate_with_stats(resolved).0
    }

    pub fn generate_with_stats(&self, resolved: &[Symbol]) -> (OrderFile, GenerationStats) {
        let mut state = EmitState::default();

        let mut observed = Vec::new();
        for symbol in resolved {
            if let Some(line) = self.emit(symbol, &mut state) {
                observed.push(line);
            }
        }

        let mut remaining = Vec::new();
        for symbol in self.remaining_symbols() {
            if let Some(line) = self.emit(symbol, &mut state) {
                remaining.push(line);
            }
        }

        state.stats.observed = observed.len();
        state.stats.remaining = remaining.len();
        log::info!(
            "Generated order file: {} observed, {} remaining, {} collision groups",
            state.stats.observed,
            state.stats.remaining,
            state.stats.collisions_prefixed + state.stats.collisions_unprefixed
        );

        (OrderFile::new(observed, remaining), state.stats)
    }

    fn remaining_symbols(&self) -> Vec<&'a Symbol> {
        match self.remaining_order {
            RemainingOrder::Unspecified => self.map.symbols().collect(),
            RemainingOrder::Address => {
                let mut entries: Vec<(u64, &'a Symbol)> = self.map.entries().collect();
                entries.sort_unstable_by_key(|(address, _)| *address);
                entries.into_iter().map(|(_, symbol)| symbol).collect()
            }
        }
    }

    fn emit(&self, symbol: &Symbol, state: &mut EmitState) -> Option<String> {
        if !self.filter.is_eligible(symbol) || state.emitted.contains(symbol) {
            return None;
        }

        let group = self.groups.get(symbol.name()).map(Vec::as_slice).unwrap_or_default();
        for member in group {
            state.emitted.insert((*member).clone());
        }
        state.emitted.insert(symbol.clone());

        let is_collision = group.len() > 1;
        if !is_collision {
            return Some(symbol.name().to_string());
        }

        match symbol.object().order_file_prefix() {
            Some(prefix) => {
                state.stats.collisions_prefixed += 1;
                Some(format!("{}:{}", prefix, symbol.name()))
            }
            None => {
                log::debug!(
                    "{} collides across {} objects but {} has no .o form",
                    symbol.name(),
                    group.len(),
                    symbol.object()
                );
                state.stats.collisions_unprefixed += 1;
                Some(symbol.name().to_string())
            }
        }
    }
}

#[derive(Default)]
struct EmitState {
    emitted: AHashSet<Symbol>,
    stats: GenerationStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linkmap::ObjectFile;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn obj(descriptor: &str) -> Arc<ObjectFile> {
        Arc::new(ObjectFile::from_descriptor(descriptor))
    }

    fn scenario_map() -> (LinkMap, Symbol, Symbol) {
        let foo_a = Symbol::new("foo", obj("/b/a.o"));
        let foo_b = Symbol::new("foo", obj("/b/b.o"));
        let mut map = LinkMap::new(0x1000, 0x1000);
        map.insert(0x1000, foo_a.clone());
        map.insert(0x1800, foo_b.clone());
        (map, foo_a, foo_b)
    }

    #[test]
    fn test_collision_group_claimed_by_first_hit() {
        let (map, foo_a, foo_b) = scenario_map();
        let filter = EligibilityFilter::permissive();
        let file = OrderFileGenerator::new(&map, &filter).generate(&[foo_b, foo_a]);

        assert_eq!(file.observed(), ["b.o:foo"]);
        assert!(file.remaining().is_empty());
        assert_eq!(file.lines(), ["b.o:foo", "# begin remaining symbol"]);
    }

    #[test]
    fn test_collision_prefix_uses_triggering_object() {
        let (map, foo_a, _) = scenario_map();
        let filter = EligibilityFilter::permissive();
        let file = OrderFileGenerator::new(&map, &filter).generate(&[foo_a]);
        assert_eq!(file.observed(), ["a.o:foo"]);
    }

    #[test]
    fn test_collision_without_object_prefix_falls_back_to_bare_name() {
        let mut map = LinkMap::new(0x1000, 0x1000);
        let synthesized = Symbol::new("dup", obj("linker synthesized"));
        map.insert(0x1000, synthesized.clone());
        map.insert(0x1100, Symbol::new("dup", obj("/b/c.o")));
        let filter = EligibilityFilter::permissive();

        let (file, stats) = OrderFileGenerator::new(&map, &filter).generate_with_stats(&[synthesized]);
        assert_eq!(file.observed(), ["dup"]);
        assert!(file.remaining().is_empty());
        assert_eq!(stats.collisions_unprefixed, 1);
    }

    #[test]
    fn test_repeated_symbol_is_noop() {
        let mut map = LinkMap::new(0x1000, 0x1000);
        let main = Symbol::new("_main", obj("/b/main.o"));
        map.insert(0x1000, main.clone());
        let filter = EligibilityFilter::permissive();

        let file = OrderFileGenerator::new(&map, &filter).generate(&[main.clone(), main.clone(), main]);
        assert_eq!(file.observed(), ["_main"]);
    }

    #[test]
    fn test_remaining_tail_is_complete() {
        let mut map = LinkMap::new(0x1000, 0x1000);
        let o = obj("/b/x.o");
        for (i, name) in ["_a", "_b", "_c", "_d"].iter().enumerate() {
            map.insert(0x1000 + i as u64 * 0x10, Symbol::new(*name, o.clone()));
        }
        map.insert(0x1100, Symbol::new("_b", obj("/b/y.o")));
        let filter = EligibilityFilter::permissive();

        let traced = vec![Symbol::new("_c", o.clone())];
        let file = OrderFileGenerator::new(&map, &filter).generate(&traced);

        assert_eq!(file.observed(), ["_c"]);
        let tail: HashSet<&str> = file.remaining().iter().map(String::as_str).collect();
        assert_eq!(tail.len(), 3);
        assert!(tail.contains("_a"));
        assert!(tail.contains("_d"));
        assert!(tail.contains("x.o:_b") || tail.contains("y.o:_b"));
    }

    #[test]
    fn test_address_order_for_tail() {
        let mut map = LinkMap::new(0x1000, 0x1000);
        let o = obj("/b/x.o");
        map.insert(0x1300, Symbol::new("_late", o.clone()));
        map.insert(0x1100, Symbol::new("_early", o.clone()));
        map.insert(0x1200, Symbol::new("_middle", o));
        let filter = EligibilityFilter::permissive();

        let generator = OrderFileGenerator::new(&map, &filter).with_remaining_order(RemainingOrder::Address);
        let file = generator.generate(&[]);
        assert_eq!(file.remaining(), ["_early", "_middle", "_late"]);
        assert_eq!(generator.generate(&[]), file);
    }

    #[test]
    fn test_ineligible_symbols_never_emitted() {
        let mut map = LinkMap::new(0x1000, 0x1000);
        let ads = Symbol::new("_GADStart", obj("/sdk/GoogleMobileAds(GADStart.o)"));
        map.insert(0x1000, ads.clone());
        map.insert(0x1010, Symbol::new("_app", obj("/b/app.o")));
        let filter = EligibilityFilter::new(vec!["GoogleMobileAds".to_string()]);

        let file = OrderFileGenerator::new(&map, &filter).generate(&[ads]);
        assert!(file.observed().is_empty());
        assert_eq!(file.remaining(), ["_app"]);
    }

    #[test]
    fn test_collision_listing_and_fixed_separator() {
        let (map, _, _) = scenario_map();
        let filter = EligibilityFilter::permissive();
        let generator = OrderFileGenerator::new(&map, &filter);
        let groups: Vec<(&str, usize)> = generator.collision_groups().map(|(n, m)| (n, m.len())).collect();
        assert_eq!(groups, vec![("foo", 2)]);

        let file = generator.generate(&[]);
        assert_eq!(file.separator(), "# begin remaining symbol");
        assert_eq!(file.lines().iter().filter(|l| l.starts_with('#')).count(), 1);
    }
}
