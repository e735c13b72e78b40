//! Weekly Releases Library
//!
//! This library builds a "recent releases" playlist for a Spotify user. It walks
//! the user's followed artists and saved albums, collects every album those
//! artists released within the last year, and writes a sample track of each
//! release into a new private playlist.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error types for the API layer, the cache and the pipeline
//! - `management` - On-disk response cache
//! - `model` - Artist, album, track and user profile value types
//! - `platform` - Injected clock and sleep capability
//! - `service` - Release aggregation pipeline and playlist creation
//! - `spotify` - Spotify Web API client implementation
//! - `types` - JSON wire structures of the Spotify Web API
//! - `utils` - Dedup, filtering and parsing helpers
//!
//! # Example
//!
//! ```
//! use weekly_releases::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> weekly_releases::Res<()> {
//!     config::load_env().await?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod model;
pub mod platform;
pub mod service;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern for glue code using a boxed
/// dynamic error trait object. The API layer and the pipeline use the typed
/// errors from [`error`] instead.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message.
///
/// # Example
///
/// ```
/// info!("Creating a playlist from {} releases...", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Playlist {} created", name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the program with exit code 1 right after printing. Only use it
/// for fatal errors at the top of the CLI.
///
/// # Example
///
/// ```
/// error!("Error retrieving recent releases: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Album {} has no tracks, skipping", album.name);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
