//! Default settings applied when building recognition objects

use crate::overlay::DrawStyle;
use crate::recognition::TemplateMatchMode;

#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    /// Match quality threshold (0.0 to 1.0 for the normalised modes)
    pub threshold: f32,
    /// Scoring method handed to the matcher
    pub match_mode: TemplateMatchMode,
    /// Register found areas with the overlay
    pub draw_on_window: bool,
    pub draw_style: DrawStyle,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: 0.8,
            match_mode: TemplateMatchMode::CCorrNormed,
            draw_on_window: false,
            draw_style: DrawStyle::default(),
        }
    }
}

/// Configuration preset for UI elements (buttons, menus)
pub fn create_ui_config() -> MatchConfig {
    MatchConfig {
        threshold: 0.9,
        match_mode: TemplateMatchMode::CCorrNormed,
        draw_on_window: true,
        draw_style: DrawStyle::default(),
    }
}

/// Configuration preset for in-game objects, which vary more between frames
pub fn create_game_object_config() -> MatchConfig {
    MatchConfig {
        threshold: 0.75,
        match_mode: TemplateMatchMode::SqDiffNormed,
        draw_on_window: false,
        draw_style: DrawStyle::default(),
    }
}

/// Look up a preset by the name used on the command line.
pub fn preset(name: &str) -> Option<MatchConfig> {
    match name {
        "default" => Some(MatchConfig::default()),
        "ui" => Some(create_ui_config()),
        "game-object" => Some(create_game_object_config()),
        _ => None,
    }
}
