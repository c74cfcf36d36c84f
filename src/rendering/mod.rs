use macroquad::prelude::*;
use crate::application::AppState;
use crate::domain::Grid;

/// Alive cells are drawn green on a black background
pub const ALIVE_COLOR: Color = Color::new(0.0, 1.0, 0.0, 1.0);
pub const BACKGROUND_COLOR: Color = BLACK;

/// Format large numbers with K/M/B suffixes
fn format_number(n: usize) -> String {
    if n >= 1_000_000_000 {
        format!("{:.1}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// Draw one filled rectangle per alive cell.
/// Cell (0, 0) is the top-left corner; rows grow downward, columns rightward.
pub fn draw_grid(grid: &Grid, cell_size: f32) {
    let (max_row, max_col) = visible_extent(screen_width(), screen_height(), cell_size);

    for (row, col, cell) in grid.iter_cells() {
        if !cell.is_alive() || row >= max_row || col >= max_col {
            continue;
        }
        draw_rectangle(
            col as f32 * cell_size,
            row as f32 * cell_size,
            cell_size,
            cell_size,
            ALIVE_COLOR,
        );
    }
}

/// Rows and columns that intersect a window of the given size; cells at or
/// beyond either bound are off screen
fn visible_extent(width: f32, height: f32, cell_size: f32) -> (usize, usize) {
    (
        (height / cell_size).ceil() as usize,
        (width / cell_size).ceil() as usize,
    )
}

/// Helper to draw text labels
fn draw_text_label(text: &str, x: f32, y: f32, size: f32, color: Color) {
    draw_text(text, x, y, size, color);
}

/// Draw a small status overlay in the top-left corner
pub fn draw_hud(state: &AppState) {
    let sim = &state.simulation;
    let grid = sim.snapshot();
    let (gw, gh) = grid.dimensions();

    // Color code the step time
    let step_ms = state.last_step_time_ms;
    let perf_color = if step_ms < 5.0 {
        Color::from_rgba(0, 255, 0, 255)
    } else if step_ms < 33.0 {
        Color::from_rgba(255, 255, 0, 255)
    } else {
        Color::from_rgba(255, 0, 0, 255)
    };

    let status = if state.is_running { "Running" } else { "Paused" };
    let labels = [
        (
            format!("Gen {}  Pop {}", sim.generation(), format_number(grid.population())),
            16.0,
            WHITE,
        ),
        (
            format!("{} ({})  {}x{}", sim.rule().name(), sim.rule().description(), gw, gh),
            32.0,
            GRAY,
        ),
        (
            format!("Density {:.2}  {:.0} gen/s  {}", state.density, state.updates_per_second, status),
            48.0,
            GRAY,
        ),
        (
            format!("Step {:.1}ms  {}  FPS {}", step_ms, sim.algorithm().name(), get_fps()),
            64.0,
            perf_color,
        ),
    ];

    labels.iter().for_each(|(text, y, color)| {
        draw_text_label(text, 8.0, *y, 16.0, *color);
    });
}
