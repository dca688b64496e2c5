//! Bulk loading of an object catalog into an [`ObjectTable`].
//!
//! Loading is all-or-nothing: every present entry is resolved, failures are
//! collected across the whole catalog, and if anything failed the table is
//! reset before the error is returned.

use std::io::Read;

use tracing::{debug, warn};

use crate::catalog::{decode_entries, ChunkCodec};
use crate::diagnostics::FailReason;
use crate::entry::ObjectEntry;
use crate::group::{ChunkEncoding, ObjectType};
use crate::table::ObjectTable;
use crate::{Error, Result};

/// Why a single descriptor could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// No known definition matches the descriptor.
    #[error("no object definition found for {identifier}")]
    NotFound { identifier: String },

    /// The definition was found but its payload could not be decoded.
    #[error("failed to decode object payload: {0}")]
    Decode(String),

    /// I/O error while reading the definition.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResolveError {
    /// A [`ResolveError::NotFound`] for `entry`.
    pub fn not_found(entry: &ObjectEntry) -> Self {
        Self::NotFound {
            identifier: entry.identifier(),
        }
    }
}

/// Locates the definition of a descriptor and loads its payload.
///
/// `encoding` is the chunk encoding configured for `object_type`; the
/// resolver is expected to decode the payload with it.
pub trait ObjectResolver<P> {
    fn resolve(
        &mut self,
        object_type: ObjectType,
        entry: &ObjectEntry,
        encoding: ChunkEncoding,
    ) -> std::result::Result<P, ResolveError>;
}

impl<P, F> ObjectResolver<P> for F
where
    F: FnMut(ObjectType, &ObjectEntry, ChunkEncoding) -> std::result::Result<P, ResolveError>,
{
    fn resolve(
        &mut self,
        object_type: ObjectType,
        entry: &ObjectEntry,
        encoding: ChunkEncoding,
    ) -> std::result::Result<P, ResolveError> {
        self(object_type, entry, encoding)
    }
}

/// A present catalog entry that failed to resolve.
#[derive(Debug)]
pub struct LoadFailure {
    pub flat_index: usize,
    pub object_type: ObjectType,
    pub entry: ObjectEntry,
    pub error: ResolveError,
}

impl LoadFailure {
    /// User-facing reason, given the bitmask of installed expansions.
    pub fn reason(&self, installed_expansions: u16) -> FailReason {
        FailReason::for_entry(&self.entry, installed_expansions)
    }
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Entries resolved and stored.
    pub loaded: usize,
    /// Empty entries skipped.
    pub skipped: usize,
}

impl<P> ObjectTable<P> {
    /// Replace the table contents with the objects described by `entries`.
    ///
    /// `entries` must hold exactly one descriptor per slot, laid out in flat
    /// index order. Absent entries leave their slot empty. If any present
    /// entry fails to resolve, the table is left empty and
    /// [`Error::LoadFailed`] lists every failure.
    pub fn load_entries<R>(&mut self, entries: &[ObjectEntry], mut resolver: R) -> Result<LoadSummary>
    where
        R: ObjectResolver<P>,
    {
        let expected = self.config().total_capacity();
        if entries.len() != expected {
            return Err(Error::EntryCount {
                expected,
                actual: entries.len(),
            });
        }

        debug!(count = entries.len(), "loading required objects");
        self.reset();

        let config = self.config().clone();
        let mut summary = LoadSummary::default();
        let mut failures = Vec::new();

        for (flat_index, (entry, (object_type, slot))) in
            entries.iter().zip(config.positions()).enumerate()
        {
            if !entry.is_present() {
                summary.skipped += 1;
                continue;
            }

            if entry.type_code() != object_type.code() {
                warn!(
                    flat_index,
                    expected = %object_type,
                    type_code = entry.type_code(),
                    "entry stored in another type's range"
                );
            }

            let encoding = config.encoding_of(object_type);
            match resolver.resolve(object_type, entry, encoding) {
                Ok(payload) => {
                    self.store(object_type, slot, *entry, payload);
                    summary.loaded += 1;
                }
                Err(error) => {
                    warn!(id = %entry.identifier(), %object_type, %error, "failed to load object");
                    failures.push(LoadFailure {
                        flat_index,
                        object_type,
                        entry: *entry,
                        error,
                    });
                }
            }
        }

        if !failures.is_empty() {
            self.reset();
            return Err(Error::LoadFailed { failures });
        }

        debug!(loaded = summary.loaded, "finished loading required objects");
        Ok(summary)
    }

    /// Read one catalog chunk from `reader` and load it.
    pub fn read_and_load_entries<C, R>(
        &mut self,
        reader: &mut dyn Read,
        codec: &mut C,
        resolver: R,
    ) -> Result<LoadSummary>
    where
        C: ChunkCodec + ?Sized,
        R: ObjectResolver<P>,
    {
        let chunk = codec.read_chunk(reader)?;
        let entries = decode_entries(&chunk, self.config().total_capacity())?;
        self.load_entries(&entries, resolver)
    }
}
