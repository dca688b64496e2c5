//! User-facing reasons for load failures.

use std::fmt;

use crate::entry::ObjectEntry;

/// Expansion packs that can be named in a failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expansion {
    WackyWorlds,
    TimeTwister,
}

impl Expansion {
    /// Source code carried in the entry flags for this expansion.
    pub const fn source_code(self) -> u8 {
        match self {
            Expansion::WackyWorlds => 1,
            Expansion::TimeTwister => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Expansion::WackyWorlds => "Wacky Worlds",
            Expansion::TimeTwister => "Time Twister",
        }
    }
}

/// Why a required object could not be loaded, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailReason {
    /// The object's data is missing even though its source is available.
    MissingObjectData { identifier: String },
    /// The object ships with a known expansion that is not installed.
    RequiresExpansion(Expansion),
    /// The object ships with some other add-on pack.
    RequiresAddOnPack,
}

impl FailReason {
    /// Pick the reason for a failed `entry`.
    ///
    /// `installed_expansions` has bit `n` set when the expansion with source
    /// code `n` is installed. Source codes 0 (base game) and 8 (custom) are
    /// always treated as available.
    pub fn for_entry(entry: &ObjectEntry, installed_expansions: u16) -> Self {
        let source = entry.source_code();
        if source == 0 || source == 8 || installed_expansions & (1 << source) != 0 {
            return FailReason::MissingObjectData {
                identifier: entry.identifier(),
            };
        }

        match source {
            1 => FailReason::RequiresExpansion(Expansion::WackyWorlds),
            2 => FailReason::RequiresExpansion(Expansion::TimeTwister),
            _ => FailReason::RequiresAddOnPack,
        }
    }
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailReason::MissingObjectData { identifier } => {
                write!(f, "Missing object data, ID: {identifier}")
            }
            FailReason::RequiresExpansion(expansion) => {
                write!(f, "Requires the following add-on pack: {}", expansion.name())
            }
            FailReason::RequiresAddOnPack => f.write_str("Requires an add-on pack"),
        }
    }
}
