//! End-to-end checks that drive a whole launch across the workspace crates.

mod launch;
#[cfg(unix)]
mod process;
