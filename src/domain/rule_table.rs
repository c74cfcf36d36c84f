//! Explicit lookup-table rules.
//!
//! A table maps each of the 512 rule keys (current state plus eight ordered
//! neighbor states) to a next state. Keys never inserted fall back to the
//! current state, so every lookup succeeds and unmapped configurations are
//! stable.

use super::{Cell, Neighborhood, Rule};

/// Number of distinct rule keys: 2 current states x 256 neighborhoods
pub const KEY_COUNT: usize = 512;

/// A cell's current state together with its ordered neighborhood.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RuleKey {
    pub current: Cell,
    pub neighbors: Neighborhood,
}

impl RuleKey {
    pub const fn new(current: Cell, neighbors: Neighborhood) -> Self {
        Self { current, neighbors }
    }

    /// Packed index in `0..KEY_COUNT`: current state in bit 8, neighborhood bits below
    pub fn index(&self) -> usize {
        (usize::from(self.current.is_alive()) << 8) | usize::from(self.neighbors.bits())
    }

    pub fn from_index(index: usize) -> Self {
        Self {
            current: Cell::from_alive((index >> 8) & 1 == 1),
            neighbors: Neighborhood::from_bits((index & 0xFF) as u8),
        }
    }

    /// Every rule key, in index order
    pub fn all() -> impl Iterator<Item = RuleKey> {
        (0..KEY_COUNT).map(Self::from_index)
    }
}

/// Total mapping from [`RuleKey`] to next state with identity fallback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleTable {
    name: String,
    entries: [Option<Cell>; KEY_COUNT],
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new("Table")
    }
}

impl RuleTable {
    /// Empty table: every key maps to its current state
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: [None; KEY_COUNT],
        }
    }

    /// Next state for a key; keys never inserted leave the cell unchanged
    pub fn lookup(&self, current: Cell, neighbors: &Neighborhood) -> Cell {
        self.entries[RuleKey::new(current, *neighbors).index()].unwrap_or(current)
    }

    /// Map a key to a next state, replacing any earlier mapping for it
    pub fn insert(&mut self, current: Cell, neighbors: Neighborhood, next: Cell) {
        self.entries[RuleKey::new(current, neighbors).index()] = Some(next);
    }

    /// Drop an explicit mapping, returning what it was
    pub fn remove(&mut self, current: Cell, neighbors: &Neighborhood) -> Option<Cell> {
        self.entries[RuleKey::new(current, *neighbors).index()].take()
    }

    pub fn contains(&self, current: Cell, neighbors: &Neighborhood) -> bool {
        self.entries[RuleKey::new(current, *neighbors).index()].is_some()
    }

    /// Number of explicitly inserted keys
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    /// Explicit entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (RuleKey, Cell)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| entry.map(|next| (RuleKey::from_index(index), next)))
    }

    /// Classic Life (B3/S23), built by neighbor count over all 256 neighborhoods.
    ///
    /// Dead cells without exactly three alive neighbors are not inserted and
    /// stay dead through the fallback.
    pub fn standard_life_rule() -> Self {
        let mut table = Self::new("Life");
        for neighbors in Neighborhood::all() {
            let alive = neighbors.alive_count();
            if alive == 3 {
                table.insert(Cell::Dead, neighbors, Cell::Alive);
            }
            let survives = alive == 2 || alive == 3;
            table.insert(Cell::Alive, neighbors, Cell::from_alive(survives));
        }
        table
    }

    /// Freeze any rule into an explicit table covering every key
    pub fn tabulate(rule: &dyn Rule) -> Self {
        let mut table = Self::new(rule.name());
        for key in RuleKey::all() {
            table.insert(key.current, key.neighbors, rule.next_state(key.current, &key.neighbors));
        }
        table
    }
}

impl Rule for RuleTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> String {
        format!("lookup table, {} of {} keys", self.len(), KEY_COUNT)
    }

    fn next_state(&self, current: Cell, neighbors: &Neighborhood) -> Cell {
        self.lookup(current, neighbors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LifeLike;

    #[test]
    fn test_key_index_roundtrip() {
        for index in 0..KEY_COUNT {
            assert_eq!(RuleKey::from_index(index).index(), index);
        }
    }

    #[test]
    fn test_empty_table_is_identity() {
        let table = RuleTable::default();
        assert!(table.is_empty());
        for key in RuleKey::all() {
            assert_eq!(table.lookup(key.current, &key.neighbors), key.current);
        }
    }

    #[test]
    fn test_fallback_for_uninserted_keys() {
        let mut table = RuleTable::default();
        let mapped = Neighborhood::from_bits(0b0000_0111);
        table.insert(Cell::Dead, mapped, Cell::Alive);
        table.insert(Cell::Alive, mapped, Cell::Dead);

        for neighbors in Neighborhood::all().filter(|n| *n != mapped) {
            assert_eq!(table.lookup(Cell::Dead, &neighbors), Cell::Dead);
            assert_eq!(table.lookup(Cell::Alive, &neighbors), Cell::Alive);
        }
        assert_eq!(table.lookup(Cell::Dead, &mapped), Cell::Alive);
        assert_eq!(table.lookup(Cell::Alive, &mapped), Cell::Dead);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut table = RuleTable::default();
        let n = Neighborhood::from_bits(0b1000_0001);
        table.insert(Cell::Dead, n, Cell::Alive);
        table.insert(Cell::Dead, n, Cell::Alive);
        assert_eq!(table.len(), 1);

        table.insert(Cell::Dead, n, Cell::Dead);
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(Cell::Dead, &n), Cell::Dead);
    }

    #[test]
    fn test_remove_restores_fallback() {
        let mut table = RuleTable::default();
        let n = Neighborhood::from_bits(0b0101_0000);
        table.insert(Cell::Alive, n, Cell::Dead);
        assert!(table.contains(Cell::Alive, &n));

        assert_eq!(table.remove(Cell::Alive, &n), Some(Cell::Dead));
        assert_eq!(table.lookup(Cell::Alive, &n), Cell::Alive);
        assert_eq!(table.remove(Cell::Alive, &n), None);
    }

    #[test]
    fn test_standard_life_rule_entries() {
        let table = RuleTable::standard_life_rule();
        // 256 alive-state keys plus C(8,3) = 56 births
        assert_eq!(table.len(), 256 + 56);
        assert!(!table.contains(Cell::Dead, &Neighborhood::from_bits(0)));
    }

    #[test]
    fn test_standard_life_matches_closed_form() {
        let table = RuleTable::standard_life_rule();
        let conway = LifeLike::conway();
        for key in RuleKey::all() {
            assert_eq!(
                table.lookup(key.current, &key.neighbors),
                conway.next_state(key.current, &key.neighbors),
                "mismatch at key {}",
                key.index()
            );
        }
    }

    #[test]
    fn test_tabulate_covers_every_key() {
        let rule = LifeLike::highlife();
        let table = RuleTable::tabulate(&rule);
        assert_eq!(table.len(), KEY_COUNT);
        assert_eq!(table.name(), "HighLife");
        for (key, next) in table.iter() {
            assert_eq!(next, rule.next_state(key.current, &key.neighbors));
        }
    }
}
