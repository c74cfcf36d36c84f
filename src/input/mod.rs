use macroquad::prelude::*;
use crate::application::AppState;
use crate::domain::presets;

/// Keys 1-9 stamp the pattern at the same index in `presets::all_patterns`
const PATTERN_KEYS: [KeyCode; 9] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
    KeyCode::Key8,
    KeyCode::Key9,
];

/// True once the user asks to leave
pub fn quit_requested() -> bool {
    is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q)
}

/// Process keyboard input functionally
pub fn process_keyboard_input(state: AppState) -> AppState {
    type KeyAction = (KeyCode, fn(AppState) -> AppState);

    let actions: [KeyAction; 7] = [
        (KeyCode::Space, AppState::reset_random),
        (KeyCode::P, AppState::toggle_running),
        (KeyCode::N, AppState::single_step),
        (KeyCode::R, AppState::cycle_rule),
        (KeyCode::A, AppState::cycle_algorithm),
        (KeyCode::Up, |s| s.adjust_speed(1.0)),
        (KeyCode::Down, |s| s.adjust_speed(-1.0)),
    ];

    let state = actions.iter().fold(state, |s, (key, action)| {
        if is_key_pressed(*key) { action(s) } else { s }
    });

    let patterns = presets::all_patterns();
    PATTERN_KEYS
        .iter()
        .zip(patterns.iter())
        .fold(state, |s, (key, pattern)| {
            if is_key_pressed(*key) { s.stamp(pattern) } else { s }
        })
}
