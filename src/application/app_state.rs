use crate::config::DensityRange;
use crate::domain::{Pattern, Simulation, all_rules, clamp_density};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Upper bound on the interactive speed unless the configured rate is higher
pub const DEFAULT_MAX_UPDATES_PER_SECOND: f32 = 60.0;

/// AppState orchestrates the simulation for the viewer.
/// This is the application layer that coordinates domain logic with
/// tick pacing and reset requests.
pub struct AppState {
    pub simulation: Simulation,
    pub is_running: bool,
    pub update_timer: f32,
    pub updates_per_second: f32,
    /// Ceiling for `adjust_speed`; never below the configured rate
    pub max_updates_per_second: f32,
    pub reset_density: DensityRange,
    /// Density used by the most recent seeding
    pub density: f64,
    pub last_step_time_ms: f32,
    /// Position of the active rule in `all_rules`
    pub rule_index: usize,
    rng: ChaCha8Rng,
}

impl AppState {
    /// Create the app state around a seeded simulation
    pub fn new(
        simulation: Simulation,
        density: f64,
        updates_per_second: f32,
        reset_density: DensityRange,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s.wrapping_add(1)),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        let rule_index = all_rules()
            .iter()
            .position(|(_, rule)| rule.name() == simulation.rule().name())
            .unwrap_or(0);
        Self {
            simulation,
            is_running: true,
            update_timer: 0.0,
            updates_per_second,
            max_updates_per_second: updates_per_second.max(DEFAULT_MAX_UPDATES_PER_SECOND),
            reset_density,
            density: clamp_density(density),
            last_step_time_ms: 0.0,
            rule_index,
            rng,
        }
    }

    /// Set running state (builder pattern)
    pub fn with_running(mut self, running: bool) -> Self {
        self.is_running = running;
        self
    }

    /// Toggle play/pause state
    pub fn toggle_running(mut self) -> Self {
        self.is_running = !self.is_running;
        log::info!("Simulation {}", if self.is_running { "resumed" } else { "paused" });
        self
    }

    /// Advance a single generation, only while paused
    pub fn single_step(mut self) -> Self {
        if !self.is_running {
            self.step_timed();
        }
        self
    }

    /// Reseed the grid with a density drawn from the reset range
    pub fn reset_random(mut self) -> Self {
        let DensityRange { min, max } = self.reset_density;
        let density = if min < max {
            self.rng.random_range(min..=max)
        } else {
            min
        };
        self.reset_with(density)
    }

    /// Reseed the grid with an explicit density
    pub fn reset_with(mut self, density: f64) -> Self {
        self.density = clamp_density(density);
        self.simulation.reset(self.density, None);
        self.update_timer = 0.0;
        log::info!("Resetting pattern with density {:.2}", self.density);
        self
    }

    /// Clear the grid and stamp a pattern at its center
    pub fn stamp(mut self, pattern: &Pattern) -> Self {
        self.simulation.stamp(pattern);
        self.update_timer = 0.0;
        log::info!("Placed pattern {}", pattern.name);
        self
    }

    /// Reseed with the next rule from `all_rules`
    pub fn cycle_rule(mut self) -> Self {
        let mut rules = all_rules();
        self.rule_index = (self.rule_index + 1) % rules.len();
        let (name, rule) = rules.swap_remove(self.rule_index);
        self.simulation.reset(self.density, Some(rule));
        self.update_timer = 0.0;
        log::info!("Switched rule to {}", name);
        self
    }

    /// Switch between serial and parallel evaluation
    pub fn cycle_algorithm(mut self) -> Self {
        let algorithm = self.simulation.cycle_algorithm();
        log::info!("Algorithm {}: {}", algorithm.name(), algorithm.description());
        self
    }

    /// Adjust simulation speed
    pub fn adjust_speed(mut self, delta: f32) -> Self {
        self.updates_per_second = (self.updates_per_second + delta).clamp(1.0, self.max_updates_per_second);
        self
    }

    /// Update simulation by one frame.
    /// Steps at most once per frame, when a full tick interval has elapsed.
    pub fn tick(mut self, delta_time: f32) -> Self {
        if !self.is_running {
            return self;
        }

        self.update_timer += delta_time;
        let update_interval = 1.0 / self.updates_per_second;

        if self.update_timer >= update_interval {
            self.step_timed();
            self.update_timer = 0.0;
        }

        self
    }

    fn step_timed(&mut self) {
        let start = std::time::Instant::now();
        self.simulation.step();
        self.last_step_time_ms = start.elapsed().as_secs_f32() * 1000.0;
    }
}
