use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use std::time::Duration;

// RGB tuple constants for use with the `colored` crate's `.truecolor()` method
pub mod rgb {
    pub const ELECTRIC_PURPLE: (u8, u8, u8) = (225, 53, 255);
    pub const NEON_CYAN: (u8, u8, u8) = (128, 255, 234);
    pub const CORAL: (u8, u8, u8) = (255, 106, 193);
    pub const ELECTRIC_YELLOW: (u8, u8, u8) = (241, 250, 140);
    pub const SUCCESS_GREEN: (u8, u8, u8) = (80, 250, 123);
    pub const ERROR_RED: (u8, u8, u8) = (255, 99, 99);
    pub const DIM_WHITE: (u8, u8, u8) = (180, 180, 190);
}

/// Track quiet mode state
static QUIET_MODE: std::sync::LazyLock<Mutex<bool>> =
    std::sync::LazyLock::new(|| Mutex::new(false));

/// Enable or disable quiet mode
pub fn set_quiet_mode(enabled: bool) {
    let mut quiet_mode = QUIET_MODE.lock();
    *quiet_mode = enabled;
}

/// Check if quiet mode is enabled
pub fn is_quiet_mode() -> bool {
    *QUIET_MODE.lock()
}

pub fn create_spinner(message: &str) -> ProgressBar {
    // Don't create a spinner in quiet mode
    if is_quiet_mode() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.magenta} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn print_info(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.cyan().bold());
    }
}

pub fn print_warning(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.yellow().bold());
    }
}

pub fn print_error(message: &str) {
    eprintln!("{}", message.red().bold());
}

pub fn print_success(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.green().bold());
    }
}

pub fn print_version(version: &str) {
    if !is_quiet_mode() {
        println!(
            "{} {} {}",
            "🎶 Chorus".magenta().bold(),
            "version".cyan(),
            version.green()
        );
    }
}

/// Print the final answer with a dim separator line above and below
pub fn print_answer(answer: &str) {
    let (r, g, b) = rgb::DIM_WHITE;
    if !is_quiet_mode() {
        println!("{}", "─".repeat(60).truecolor(r, g, b));
    }
    println!("{answer}");
    if !is_quiet_mode() {
        println!("{}", "─".repeat(60).truecolor(r, g, b));
    }
}
