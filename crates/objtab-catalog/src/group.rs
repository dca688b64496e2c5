//! Object types and the per-type group configuration.
//!
//! Every object type owns a contiguous range of the flat index space. The
//! ranges are laid out in [`ObjectType::ALL`] order, so a flat index can be
//! mapped to a `(type, slot)` pair using nothing but the capacity table.

use std::fmt;

use crate::entry::ObjectEntry;
use crate::{Error, Result};

/// Number of object types.
pub const OBJECT_TYPE_COUNT: usize = 11;

/// Largest capacity a single type may have; slots are addressed by one byte.
pub const MAX_GROUP_CAPACITY: usize = 256;

/// The category of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum ObjectType {
    Ride = 0,
    SmallScenery = 1,
    LargeScenery = 2,
    Wall = 3,
    Banner = 4,
    Footpath = 5,
    FootpathAddition = 6,
    SceneryGroup = 7,
    ParkEntrance = 8,
    Water = 9,
    ScenarioText = 10,
}

impl ObjectType {
    /// All object types in flat index order.
    pub const ALL: [ObjectType; OBJECT_TYPE_COUNT] = [
        ObjectType::Ride,
        ObjectType::SmallScenery,
        ObjectType::LargeScenery,
        ObjectType::Wall,
        ObjectType::Banner,
        ObjectType::Footpath,
        ObjectType::FootpathAddition,
        ObjectType::SceneryGroup,
        ObjectType::ParkEntrance,
        ObjectType::Water,
        ObjectType::ScenarioText,
    ];

    /// Look up a type by its 4-bit code.
    #[inline]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// The 4-bit code of this type.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            ObjectType::Ride => "ride",
            ObjectType::SmallScenery => "small scenery",
            ObjectType::LargeScenery => "large scenery",
            ObjectType::Wall => "wall",
            ObjectType::Banner => "banner",
            ObjectType::Footpath => "footpath",
            ObjectType::FootpathAddition => "footpath addition",
            ObjectType::SceneryGroup => "scenery group",
            ObjectType::ParkEntrance => "park entrance",
            ObjectType::Water => "water",
            ObjectType::ScenarioText => "scenario text",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Chunk encoding applied to an object's on-disk payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChunkEncoding {
    Rle,
    Rotate,
}

/// How a loaded descriptor is compared with a query descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatchRule {
    /// Objects with a non-zero source code match on type code and name;
    /// everything else must agree on flags, name and checksum.
    #[default]
    Standard,
    /// Flags, name and checksum must all agree.
    Exact,
    /// Type code and name must agree.
    NameOnly,
}

impl MatchRule {
    /// Compare two descriptors under this rule.
    pub fn matches(self, a: &ObjectEntry, b: &ObjectEntry) -> bool {
        let name_and_type = a.type_code() == b.type_code() && a.name() == b.name();
        match self {
            MatchRule::Standard => {
                if a.source_code() != 0 || b.source_code() != 0 {
                    name_and_type
                } else {
                    a.flags() == b.flags() && a.name() == b.name() && a.checksum() == b.checksum()
                }
            }
            MatchRule::Exact => {
                a.flags() == b.flags() && a.name() == b.name() && a.checksum() == b.checksum()
            }
            MatchRule::NameOnly => name_and_type,
        }
    }
}

/// Configuration of a single object type group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupSpec {
    pub object_type: ObjectType,
    pub capacity: usize,
    pub encoding: ChunkEncoding,
    #[cfg_attr(feature = "serde", serde(default))]
    pub match_rule: MatchRule,
}

impl GroupSpec {
    const fn standard(object_type: ObjectType, capacity: usize, encoding: ChunkEncoding) -> Self {
        Self {
            object_type,
            capacity,
            encoding,
            match_rule: MatchRule::Standard,
        }
    }
}

const STANDARD_GROUPS: [GroupSpec; OBJECT_TYPE_COUNT] = [
    GroupSpec::standard(ObjectType::Ride, 128, ChunkEncoding::Rle),
    GroupSpec::standard(ObjectType::SmallScenery, 252, ChunkEncoding::Rle),
    GroupSpec::standard(ObjectType::LargeScenery, 128, ChunkEncoding::Rle),
    GroupSpec::standard(ObjectType::Wall, 128, ChunkEncoding::Rle),
    GroupSpec::standard(ObjectType::Banner, 32, ChunkEncoding::Rle),
    GroupSpec::standard(ObjectType::Footpath, 16, ChunkEncoding::Rle),
    GroupSpec::standard(ObjectType::FootpathAddition, 15, ChunkEncoding::Rle),
    GroupSpec::standard(ObjectType::SceneryGroup, 19, ChunkEncoding::Rle),
    GroupSpec::standard(ObjectType::ParkEntrance, 1, ChunkEncoding::Rle),
    GroupSpec::standard(ObjectType::Water, 1, ChunkEncoding::Rle),
    GroupSpec::standard(ObjectType::ScenarioText, 1, ChunkEncoding::Rotate),
];

/// Static group table: capacity, encoding and match rule of every type.
///
/// A configuration always describes all [`OBJECT_TYPE_COUNT`] types in
/// [`ObjectType::ALL`] order. Types may have a capacity of zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupConfig {
    groups: [GroupSpec; OBJECT_TYPE_COUNT],
}

impl GroupConfig {
    /// The standard configuration, 721 slots in total.
    pub const fn standard() -> Self {
        Self {
            groups: STANDARD_GROUPS,
        }
    }

    /// Build a configuration from a list of groups in type order.
    pub fn new(groups: Vec<GroupSpec>) -> Result<Self> {
        let found = groups.len();
        let groups: [GroupSpec; OBJECT_TYPE_COUNT] = groups.try_into().map_err(|_| {
            Error::InvalidConfig(format!(
                "expected {OBJECT_TYPE_COUNT} groups, got {found}"
            ))
        })?;

        for (spec, expected) in groups.iter().zip(ObjectType::ALL) {
            if spec.object_type != expected {
                return Err(Error::InvalidConfig(format!(
                    "group {} must be {}, got {}",
                    expected.code(),
                    expected,
                    spec.object_type
                )));
            }
            if spec.capacity > MAX_GROUP_CAPACITY {
                return Err(Error::InvalidConfig(format!(
                    "{} capacity {} exceeds {MAX_GROUP_CAPACITY}",
                    spec.object_type, spec.capacity
                )));
            }
        }

        Ok(Self { groups })
    }

    /// Standard encodings and match rules with the given capacities.
    ///
    /// Types that are not listed get a capacity of zero. Capacities above
    /// [`MAX_GROUP_CAPACITY`] are clamped.
    pub fn with_capacities(capacities: &[(ObjectType, usize)]) -> Self {
        let mut groups = STANDARD_GROUPS;
        for spec in groups.iter_mut() {
            spec.capacity = capacities
                .iter()
                .find(|(ty, _)| *ty == spec.object_type)
                .map_or(0, |&(_, capacity)| capacity.min(MAX_GROUP_CAPACITY));
        }
        Self { groups }
    }

    /// Replace the match rule of one type.
    pub fn with_match_rule(mut self, object_type: ObjectType, rule: MatchRule) -> Self {
        self.groups[object_type.index()].match_rule = rule;
        self
    }

    /// All group specs in type order.
    #[inline]
    pub fn groups(&self) -> &[GroupSpec] {
        &self.groups
    }

    /// Settings for one type.
    #[inline]
    pub fn group(&self, object_type: ObjectType) -> &GroupSpec {
        &self.groups[object_type.index()]
    }

    /// Slot capacity of a type.
    #[inline]
    pub fn capacity_of(&self, object_type: ObjectType) -> usize {
        self.group(object_type).capacity
    }

    /// Chunk encoding of a type.
    #[inline]
    pub fn encoding_of(&self, object_type: ObjectType) -> ChunkEncoding {
        self.group(object_type).encoding
    }

    /// Match rule of a type.
    #[inline]
    pub fn match_rule_of(&self, object_type: ObjectType) -> MatchRule {
        self.group(object_type).match_rule
    }

    /// Sum of all capacities; the size of the flat index space.
    pub fn total_capacity(&self) -> usize {
        self.groups.iter().map(|g| g.capacity).sum()
    }

    /// First flat index belonging to a type.
    pub fn group_offset(&self, object_type: ObjectType) -> usize {
        self.groups[..object_type.index()]
            .iter()
            .map(|g| g.capacity)
            .sum()
    }

    /// Convert a `(type, slot)` pair to a flat index.
    ///
    /// `slot` must be below the type's capacity.
    #[inline]
    pub fn to_flat(&self, object_type: ObjectType, slot: usize) -> usize {
        debug_assert!(
            slot < self.capacity_of(object_type),
            "slot {slot} out of range for {object_type}"
        );
        self.group_offset(object_type) + slot
    }

    /// Convert a flat index to its `(type, slot)` pair.
    ///
    /// Returns `None` if `index` is beyond the total capacity.
    pub fn from_flat(&self, index: usize) -> Option<(ObjectType, usize)> {
        let mut remainder = index;
        for spec in &self.groups {
            if remainder < spec.capacity {
                return Some((spec.object_type, remainder));
            }
            remainder -= spec.capacity;
        }
        None
    }

    /// Every `(type, slot)` pair in flat index order.
    pub fn positions(&self) -> impl Iterator<Item = (ObjectType, usize)> + '_ {
        self.groups
            .iter()
            .flat_map(|spec| (0..spec.capacity).map(move |slot| (spec.object_type, slot)))
    }

    /// Parse a configuration from JSON of the form `{"groups": [...]}`.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(json)?;
        Self::new(file.groups)
    }

    /// Serialize the configuration as pretty JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        let file = ConfigFile {
            groups: self.groups.to_vec(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct ConfigFile {
    groups: Vec<GroupSpec>,
}
