// Core types shared across the hoopcast crates: the league domain model, the
// league source seam, and configuration loading.

pub mod config;
pub mod league;
pub mod source;
