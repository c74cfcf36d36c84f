use std::path::PathBuf;

use cellular_automaton::{
    AppState, Config, Simulation,
    config::{Overrides, RulePreset},
    rendering::{self, BACKGROUND_COLOR},
    input,
};
use clap::Parser;
use macroquad::prelude::*;

#[derive(Parser)]
#[command(name = "cellular_automaton")]
#[command(version)]
#[command(about = "Toroidal cellular automaton viewer")]
struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Initial density, clamped into [0, 1]
    #[arg(short, long)]
    density: Option<f64>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Rule preset
    #[arg(short, long, value_enum)]
    rule: Option<RulePreset>,

    /// Evaluate generations with rayon
    #[arg(long)]
    parallel: bool,
}

fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    config.apply_overrides(&Overrides {
        seed: cli.seed,
        density: cli.density,
        width: cli.width,
        height: cli.height,
        rule: cli.rule,
        parallel: cli.parallel,
    });

    config.validate()?;
    Ok(config)
}

fn build_state(config: &Config) -> Result<AppState, Box<dyn std::error::Error>> {
    let (width, height) = config.grid_dimensions();
    let rule = config.build_rule();
    let density = config.grid.initial_density;

    let simulation = match config.grid.seed {
        Some(seed) => Simulation::with_seed(width, height, rule, density, seed)?,
        None => Simulation::new(width, height, rule, density)?,
    }
    .with_algorithm(config.grid.algorithm);

    log::info!(
        "Starting {}x{} grid: rule={} density={:.2} algorithm={}",
        width,
        height,
        simulation.rule().name(),
        density,
        simulation.algorithm().name()
    );

    Ok(AppState::new(
        simulation,
        density,
        config.display.tick_rate_hz,
        config.grid.reset_density,
        config.grid.seed,
    ))
}

fn window_conf(config: &Config) -> Conf {
    Conf {
        window_title: "Evolving Visual Patterns".to_owned(),
        window_width: config.display.screen_width as i32,
        window_height: config.display.screen_height as i32,
        window_resizable: true,
        ..Default::default()
    }
}

async fn run(mut state: AppState, cell_size: f32) {
    loop {
        if input::quit_requested() {
            log::info!("Quit after generation {}", state.simulation.generation());
            break;
        }

        state = input::process_keyboard_input(state);
        state = state.tick(get_frame_time());

        clear_background(BACKGROUND_COLOR);
        rendering::draw_grid(state.simulation.snapshot(), cell_size);
        rendering::draw_hud(&state);

        next_frame().await;
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            env_logger::init();
            log::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.log_level.as_str()),
    )
    .init();

    let state = match build_state(&config) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to create simulation: {}", e);
            std::process::exit(1);
        }
    };

    let cell_size = config.display.cell_size as f32;
    macroquad::Window::from_config(window_conf(&config), run(state, cell_size));
}
