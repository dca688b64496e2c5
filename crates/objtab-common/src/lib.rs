//! Common utilities for objtab.
//!
//! This crate provides the low-level pieces shared by the objtab crates:
//!
//! - [`BinaryReader`] - Zero-copy cursor over little-endian byte slices
//! - [`Error`] - Errors raised while reading raw tables

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
