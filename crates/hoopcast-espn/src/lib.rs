//! ESPN fantasy basketball league source.

pub mod client;
mod wire;

pub use client::EspnClient;
