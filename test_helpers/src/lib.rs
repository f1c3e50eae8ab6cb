//! Test helpers shared across crates in the workspace.
//!
//! Currently provides guards for tests that read configuration from the
//! process environment.

pub mod env;
