// Crate root library declaration and module exports.
pub mod browser;
pub mod cli;
pub mod config;
pub mod context;
pub mod extract;
pub mod lazy;
pub mod logging;
pub mod model;

#[cfg(feature = "tui")]
pub mod tui;
