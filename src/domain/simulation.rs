use super::{Algorithm, Grid, Pattern, Result, Rule};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Simulation owns a grid, the rule that drives it and the random source
/// used to seed it.
///
/// A driver calls [`Simulation::step`] once per tick and then reads
/// [`Simulation::snapshot`]. The snapshot is a shared borrow, so it cannot be
/// held across the next `step` or `reset`.
pub struct Simulation {
    grid: Grid,
    rule: Box<dyn Rule>,
    algorithm: Algorithm,
    rng: ChaCha8Rng,
    generation: u64,
}

impl Simulation {
    /// Create a randomly seeded simulation
    pub fn new(
        width: usize,
        height: usize,
        rule: Box<dyn Rule>,
        initial_density: f64,
    ) -> Result<Self> {
        let rng = ChaCha8Rng::from_rng(&mut rand::rng());
        Self::with_rng(width, height, rule, initial_density, rng)
    }

    /// Create a simulation whose grids are reproducible from `seed`
    pub fn with_seed(
        width: usize,
        height: usize,
        rule: Box<dyn Rule>,
        initial_density: f64,
        seed: u64,
    ) -> Result<Self> {
        Self::with_rng(width, height, rule, initial_density, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(
        width: usize,
        height: usize,
        rule: Box<dyn Rule>,
        initial_density: f64,
        mut rng: ChaCha8Rng,
    ) -> Result<Self> {
        let grid = Grid::new(width, height, initial_density, &mut rng)?;
        log::debug!(
            "Simulation created: {}x{} rule={} density={:.2} population={}",
            width,
            height,
            rule.name(),
            initial_density,
            grid.population()
        );
        Ok(Self {
            grid,
            rule,
            algorithm: Algorithm::default(),
            rng,
            generation: 0,
        })
    }

    /// Start from a hand-built grid; later resets draw from an entropy-seeded source
    pub fn from_grid(grid: Grid, rule: Box<dyn Rule>) -> Self {
        Self {
            grid,
            rule,
            algorithm: Algorithm::default(),
            rng: ChaCha8Rng::from_rng(&mut rand::rng()),
            generation: 0,
        }
    }

    /// Select the evaluation algorithm (builder pattern)
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    /// Advance exactly one generation
    pub fn step(&mut self) {
        match self.algorithm {
            Algorithm::Serial => self.grid.advance(self.rule.as_ref()),
            Algorithm::Parallel => self.grid.advance_parallel(self.rule.as_ref()),
        }
        self.generation += 1;
        log::trace!("Generation {} population={}", self.generation, self.grid.population());
    }

    /// Advance `generations` steps
    pub fn run(&mut self, generations: u64) {
        for _ in 0..generations {
            self.step();
        }
    }

    /// Replace the grid with a freshly randomized one of the same size,
    /// optionally installing a new rule. The generation counter restarts at 0.
    pub fn reset(&mut self, initial_density: f64, rule: Option<Box<dyn Rule>>) {
        let (width, height) = self.grid.dimensions();
        self.grid = Grid::random_unchecked(width, height, initial_density, &mut self.rng);
        if let Some(rule) = rule {
            self.rule = rule;
        }
        self.generation = 0;
        log::debug!(
            "Simulation reset: density={:.2} rule={} population={}",
            initial_density,
            self.rule.name(),
            self.grid.population()
        );
    }

    /// Read-only view of the current generation
    pub fn snapshot(&self) -> &Grid {
        &self.grid
    }

    /// Clear the grid and start over from `pattern` placed at its center.
    /// The generation counter restarts at 0.
    pub fn stamp(&mut self, pattern: &Pattern) {
        self.grid.clear();
        pattern.place_centered(&mut self.grid);
        self.generation = 0;
        log::debug!("Simulation stamped with {}", pattern.name);
    }

    /// Switch to the next entry of `Algorithm::all`
    pub fn cycle_algorithm(&mut self) -> Algorithm {
        let all = Algorithm::all();
        let idx = all.iter().position(|a| *a == self.algorithm).unwrap_or(0);
        self.set_algorithm(all[(idx + 1) % all.len()]);
        self.algorithm
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn rule(&self) -> &dyn Rule {
        self.rule.as_ref()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }
}
