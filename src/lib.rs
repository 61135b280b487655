//! Contact book core: an owned, validated contact collection mirrored to a
//! key/value storage slot after every change.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod prelude;
pub mod storage;
