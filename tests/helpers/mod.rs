//! Shared test helpers.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

pub mod source_fixtures;
pub mod tree_helpers;
