//! Shared builders and assertions for integration tests.
#![allow(dead_code)]

pub mod fixtures;
pub mod trees;

pub use fixtures::*;
pub use trees::*;
