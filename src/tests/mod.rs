//! Scenario tests for the plate session.
//!
//! These drive several modules together the way the editor does: selection
//! feeding fills, gestures feeding the sample selection, and session state
//! surviving a save and reload.

mod selection_tests;
mod session_tests;

/// Install a test logger once so `RUST_LOG` works under `cargo test`.
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
