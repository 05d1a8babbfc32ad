pub mod app;
pub mod board_view;
pub mod game_over_overlay;
pub mod hazard_layer;
pub mod intro_overlay;
pub mod play_view;
pub mod pointer;
pub mod round_overlay;
pub mod stats_panel;
pub mod time_display;
pub mod warning_toast;
