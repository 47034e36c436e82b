//! Logging shorthands used across the workspace.
//!
//! Every macro forwards to `tracing` under a dedicated target, which the CLI
//! formatter maps to its own prefix and colour.

/// A completed step worth highlighting.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "hound::success", $($arg)*)
    };
}

/// A neutral status notice.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "hound::notice", $($arg)*)
    };
}

/// Something the operator should look at, but which does not stop the run.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!(target: "hound::notice", $($arg)*)
    };
}
