//! Directory-backed object resolver.
//!
//! Object definitions are looked up as `<NAME>.DAT` files in a single
//! directory, where `NAME` is the entry name with its padding removed. The
//! file contents are kept as opaque payload bytes; decoding them is left to
//! whatever consumes the table.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use objtab::prelude::*;

/// Resolves entries to `.DAT` files in a directory.
#[derive(Debug)]
pub struct DirectoryResolver {
    /// Upper-cased file stem to path.
    files: HashMap<String, PathBuf>,
}

impl DirectoryResolver {
    /// Index every `.dat` file in `dir` (case-insensitive).
    pub fn open<P: AsRef<Path>>(dir: P) -> std::io::Result<Self> {
        let mut files = HashMap::new();
        for dir_entry in fs::read_dir(dir)? {
            let path = dir_entry?.path();
            let is_dat = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("dat"));
            if !is_dat {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                files.insert(stem.to_ascii_uppercase(), path);
            }
        }
        Ok(Self { files })
    }

    /// Number of indexed definition files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Path of the definition file for `entry`, if one exists.
    pub fn path_for(&self, entry: &ObjectEntry) -> Option<&Path> {
        self.files
            .get(&entry.name_str().to_ascii_uppercase())
            .map(PathBuf::as_path)
    }
}

impl ObjectResolver<Vec<u8>> for DirectoryResolver {
    fn resolve(
        &mut self,
        _object_type: ObjectType,
        entry: &ObjectEntry,
        _encoding: ChunkEncoding,
    ) -> std::result::Result<Vec<u8>, ResolveError> {
        let path = self
            .path_for(entry)
            .ok_or_else(|| ResolveError::not_found(entry))?;
        let data = fs::read(path)?;
        if data.len() < ObjectEntry::SIZE {
            return Err(ResolveError::Decode(format!(
                "{} is too short to hold an object header",
                path.display()
            )));
        }
        Ok(data)
    }
}
