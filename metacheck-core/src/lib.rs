#![allow(clippy::cargo_common_metadata)]

pub mod config;
pub mod error;
pub mod extract;
pub mod field;
pub mod reference;
pub mod sample;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
