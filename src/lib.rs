//! Liftlog library exports for the binary and tests

pub mod api;
pub mod core;
pub mod engine;
pub mod tui;

#[cfg(test)]
pub mod test_support;
