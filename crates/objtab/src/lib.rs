//! objtab - object entry tables for park files.
//!
//! This crate provides a unified interface to the objtab crates.
//!
//! # Crates
//!
//! - [`objtab_common`] - Common utilities (binary reading, shared errors)
//! - [`objtab_catalog`] - Object entries, group tables, bulk loading and lookup
//!
//! # Example
//!
//! ```no_run
//! use objtab::prelude::*;
//!
//! let bytes = std::fs::read("objects.bin")?;
//! let mut table: ObjectTable<Vec<u8>> = ObjectTable::default();
//!
//! let entries = decode_entries(&bytes, table.config().total_capacity())?;
//! table.load_entries(&entries, |_: ObjectType, entry: &ObjectEntry, _: ChunkEncoding| {
//!     std::fs::read(format!("{}.DAT", entry.name_str())).map_err(ResolveError::from)
//! })?;
//!
//! if let Some(entry) = table.get_entry(0) {
//!     println!("First ride: {:?}", entry);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use objtab_catalog as catalog;
pub use objtab_common as common;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use objtab_catalog::{
        decode_entries, encode_entries, ChunkCodec, ChunkEncoding, FailReason, GroupConfig,
        LoadFailure, LoadSummary, MatchRule, ObjectEntry, ObjectResolver, ObjectTable, ObjectType,
        RawChunk, ResolveError,
    };
    pub use objtab_common::BinaryReader;
}

// Re-export commonly used types at the crate root
pub use objtab_catalog::{Error, ObjectEntry, ObjectTable, Result};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
