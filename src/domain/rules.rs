use super::{Cell, Neighborhood, RuleTable};

/// Trait for cellular automaton rules.
///
/// A rule is a total function from a cell's state and its ordered
/// neighborhood to the cell's next state. Both the explicit [`RuleTable`]
/// and the closed-form [`LifeLike`] rules plug into the grid through it.
pub trait Rule: Send + Sync {
    /// Name of the rule
    fn name(&self) -> &str;

    /// Short description
    fn description(&self) -> String;

    /// Apply rule to compute next cell state
    fn next_state(&self, current: Cell, neighbors: &Neighborhood) -> Cell;
}

/// Outer-totalistic birth/survival rule.
///
/// Only the number of alive neighbors matters, so the result is the same for
/// every ordering of the neighborhood.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifeLike {
    name: &'static str,
    /// Bit `k` set: a dead cell with `k` alive neighbors is born
    birth: u16,
    /// Bit `k` set: an alive cell with `k` alive neighbors survives
    survival: u16,
}

impl LifeLike {
    /// Build from neighbor counts. Counts above 8 can never occur and are ignored.
    pub fn new(name: &'static str, birth: &[u8], survival: &[u8]) -> Self {
        Self {
            name,
            birth: Self::mask(birth),
            survival: Self::mask(survival),
        }
    }

    fn mask(counts: &[u8]) -> u16 {
        counts
            .iter()
            .filter(|&&k| k <= 8)
            .fold(0, |acc, &k| acc | (1 << k))
    }

    /// Conway's Game of Life (B3/S23)
    pub fn conway() -> Self {
        Self::new("Conway", &[3], &[2, 3])
    }

    /// HighLife (B36/S23)
    /// Like Conway's Life but cells with 6 neighbors are born.
    /// Creates replicators.
    pub fn highlife() -> Self {
        Self::new("HighLife", &[3, 6], &[2, 3])
    }

    /// Seeds (B2/S)
    /// Every live cell dies each generation
    pub fn seeds() -> Self {
        Self::new("Seeds", &[2], &[])
    }

    /// Day & Night (B3678/S34678)
    /// Symmetric under inverting every cell
    pub fn day_and_night() -> Self {
        Self::new("Day&Night", &[3, 6, 7, 8], &[3, 4, 6, 7, 8])
    }

    pub fn is_born(&self, alive_neighbors: u8) -> bool {
        (self.birth >> alive_neighbors) & 1 == 1
    }

    pub fn survives(&self, alive_neighbors: u8) -> bool {
        (self.survival >> alive_neighbors) & 1 == 1
    }

    /// Birth/survival notation, e.g. `B3/S23`
    pub fn notation(&self) -> String {
        let digits = |mask: u16| -> String {
            (0..=8u8)
                .filter(|k| (mask >> k) & 1 == 1)
                .map(|k| char::from(b'0' + k))
                .collect()
        };
        format!("B{}/S{}", digits(self.birth), digits(self.survival))
    }
}

impl Rule for LifeLike {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> String {
        self.notation()
    }

    fn next_state(&self, current: Cell, neighbors: &Neighborhood) -> Cell {
        let k = neighbors.alive_count();
        match current {
            Cell::Alive => Cell::from_alive(self.survives(k)),
            Cell::Dead => Cell::from_alive(self.is_born(k)),
        }
    }
}

/// Get all available rules
pub fn all_rules() -> Vec<(&'static str, Box<dyn Rule>)> {
    vec![
        ("Life", Box::new(RuleTable::standard_life_rule()) as Box<dyn Rule>),
        ("Conway", Box::new(LifeLike::conway())),
        ("HighLife", Box::new(LifeLike::highlife())),
        ("Seeds", Box::new(LifeLike::seeds())),
        ("Day&Night", Box::new(LifeLike::day_and_night())),
    ]
}

/// Get default rule: the explicit Life table
pub fn default_rule() -> Box<dyn Rule> {
    Box::new(RuleTable::standard_life_rule())
}
