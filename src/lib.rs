pub mod config;
pub mod model;
pub mod storage;
pub mod theme;

#[cfg(feature = "tui")]
pub mod tui;
