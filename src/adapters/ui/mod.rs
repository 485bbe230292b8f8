pub mod banner;
pub mod progress;
pub mod tui;

pub use tui::TuiInputPort;

/// Prints the welcome banner and applies the theme for all subsequent inquire prompts.
/// Call once before entering interactive mode.
pub fn init_ui() {
    banner::print_welcome();
    tui::apply_theme();
}
