//! Domain models and validation shared by every `hound` crate.
//!
//! * [`config`]: the environment-sourced launcher configuration and its validation.
//! * [`network::address`]: spoofed client-address policy and generation.
//! * [`network::target`]: the scan target file model.

pub mod config;
pub mod macros;
pub mod network;

#[doc(hidden)]
pub use tracing;
