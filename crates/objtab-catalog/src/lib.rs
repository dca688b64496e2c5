//! Object entry catalog.
//!
//! A catalog lists the objects a saved park depends on: one 16-byte
//! [`ObjectEntry`] per slot, grouped by object type. This crate decodes such
//! catalogs, loads the referenced objects into an [`ObjectTable`], and serves
//! lookups through a single flat index spanning every type.
//!
//! # Flat Index Layout
//!
//! With the standard [`GroupConfig`] the 721 slots are laid out as:
//!
//! | Type              | Capacity | Flat range |
//! |-------------------|----------|------------|
//! | ride              | 128      | 0..128     |
//! | small scenery     | 252      | 128..380   |
//! | large scenery     | 128      | 380..508   |
//! | wall              | 128      | 508..636   |
//! | banner            | 32       | 636..668   |
//! | footpath          | 16       | 668..684   |
//! | footpath addition | 15       | 684..699   |
//! | scenery group     | 19       | 699..718   |
//! | park entrance     | 1        | 718        |
//! | water             | 1        | 719        |
//! | scenario text     | 1        | 720        |
//!
//! # Loading
//!
//! [`ObjectTable::load_entries`] resolves every present entry through an
//! [`ObjectResolver`]. The load is all-or-nothing: if any entry fails, the
//! table is emptied and [`Error::LoadFailed`] carries every failure, each of
//! which can be turned into a user-facing [`FailReason`].

mod catalog;
mod diagnostics;
mod entry;
mod error;
mod group;
mod loader;
mod table;

pub use catalog::{decode_entries, encode_entries, ChunkCodec, RawChunk};
pub use diagnostics::{Expansion, FailReason};
pub use entry::ObjectEntry;
pub use error::{Error, Result};
pub use group::{
    ChunkEncoding, GroupConfig, GroupSpec, MatchRule, ObjectType, MAX_GROUP_CAPACITY,
    OBJECT_TYPE_COUNT,
};
pub use loader::{LoadFailure, LoadSummary, ObjectResolver, ResolveError};
pub use table::{LoadedObject, ObjectTable};
