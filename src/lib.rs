//! Local Spotify OAuth Backend Library
//!
//! This library implements the server side of the OAuth 2.0 Authorization
//! Code flow for a single local user: the login redirect with CSRF state,
//! the authorization-code exchange, in-memory token caching with lazy
//! refresh, and the small HTTP API the browser front-end talks to. The
//! client secret never leaves the process.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the login/callback/token endpoints
//! - `config` - Environment-backed configuration
//! - `management` - In-memory token store and refresh logic
//! - `server` - Router assembly and the listening loop
//! - `spotify` - Spotify accounts-service client (authorize URL, token exchange)
//! - `types` - Token data structures
//! - `utils` - CSRF state generation

pub mod api;
pub mod config;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object with Send + Sync bounds so it
/// composes across async boundaries without a dedicated error enum for
/// every call site.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Accepts the same arguments as `println!`.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates with exit code 1 after printing. Only used for unrecoverable
/// startup errors such as a failure to bind the listening port.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Accepts the same arguments as `println!`.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
