//! Per-type slot storage and flat index lookups.

use tracing::trace;

use crate::entry::ObjectEntry;
use crate::group::{GroupConfig, ObjectType};

/// Slots of a single object type.
///
/// `payloads` and `entries` are parallel arrays. An empty slot holds no
/// payload and the [`ObjectEntry::EMPTY`] sentinel.
#[derive(Debug)]
struct Group<P> {
    payloads: Vec<Option<P>>,
    entries: Vec<ObjectEntry>,
}

impl<P> Group<P> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            payloads: std::iter::repeat_with(|| None).take(capacity).collect(),
            entries: vec![ObjectEntry::EMPTY; capacity],
        }
    }

    fn clear(&mut self) {
        self.payloads.iter_mut().for_each(|p| *p = None);
        self.entries.fill(ObjectEntry::EMPTY);
    }
}

/// A loaded object: its slot position, descriptor and payload.
#[derive(Debug, Clone, Copy)]
pub struct LoadedObject<'a, P> {
    pub object_type: ObjectType,
    pub slot: usize,
    pub flat_index: usize,
    pub entry: &'a ObjectEntry,
    pub payload: &'a P,
}

/// The object table: one fixed-capacity slot array per object type.
///
/// The table owns every loaded payload. Payloads are dropped when the table
/// is reset, reloaded or dropped.
///
/// # Example
///
/// ```
/// use objtab_catalog::{
///     ChunkEncoding, GroupConfig, ObjectEntry, ObjectTable, ObjectType, ResolveError,
/// };
///
/// let config = GroupConfig::with_capacities(&[(ObjectType::Ride, 2), (ObjectType::SmallScenery, 1)]);
/// let mut table: ObjectTable<String> = ObjectTable::new(config);
///
/// let entries = [
///     ObjectEntry::with_name(0x00, "AAAA", 1),
///     ObjectEntry::EMPTY,
///     ObjectEntry::with_name(0x01, "BBBB", 2),
/// ];
/// table.load_entries(&entries, |_: ObjectType, entry: &ObjectEntry, _: ChunkEncoding| {
///     Ok::<_, ResolveError>(entry.name_str())
/// })?;
///
/// assert_eq!(table.get_payload(0).map(String::as_str), Some("AAAA"));
/// assert!(table.get_payload(1).is_none());
/// assert_eq!(table.find_object_in_group(&entries[2]), Some((ObjectType::SmallScenery, 0)));
/// # Ok::<(), objtab_catalog::Error>(())
/// ```
#[derive(Debug)]
pub struct ObjectTable<P> {
    config: GroupConfig,
    groups: Vec<Group<P>>,
}

impl<P> ObjectTable<P> {
    /// Create an empty table for a configuration.
    pub fn new(config: GroupConfig) -> Self {
        let groups = config
            .groups()
            .iter()
            .map(|spec| Group::with_capacity(spec.capacity))
            .collect();
        Self { config, groups }
    }

    /// The group configuration.
    #[inline]
    pub fn config(&self) -> &GroupConfig {
        &self.config
    }

    /// Empty every slot of every type, dropping all payloads.
    pub fn reset(&mut self) {
        for group in &mut self.groups {
            group.clear();
        }
    }

    #[inline]
    fn group(&self, object_type: ObjectType) -> &Group<P> {
        &self.groups[object_type as usize]
    }

    pub(crate) fn store(&mut self, object_type: ObjectType, slot: usize, entry: ObjectEntry, payload: P) {
        trace!(%object_type, slot, name = %entry.name_str(), "storing object");
        let group = &mut self.groups[object_type as usize];
        group.payloads[slot] = Some(payload);
        group.entries[slot] = entry;
    }

    /// First occupied slot of `object_type` whose descriptor matches `entry`.
    ///
    /// Slots are scanned in ascending order, so duplicates always resolve to
    /// the lowest slot.
    pub fn find_matching_slot(&self, object_type: ObjectType, entry: &ObjectEntry) -> Option<usize> {
        let rule = self.config.match_rule_of(object_type);
        let group = self.group(object_type);
        group
            .payloads
            .iter()
            .zip(&group.entries)
            .position(|(payload, loaded)| payload.is_some() && rule.matches(loaded, entry))
    }

    /// Find the loaded slot of a descriptor within its own type's group.
    pub fn find_object_in_group(&self, entry: &ObjectEntry) -> Option<(ObjectType, usize)> {
        let object_type = entry.object_type()?;
        self.find_matching_slot(object_type, entry)
            .map(|slot| (object_type, slot))
    }

    /// Map a flat index to its `(type, slot)` pair.
    #[inline]
    pub fn type_entry_index(&self, flat_index: usize) -> Option<(ObjectType, usize)> {
        self.config.from_flat(flat_index)
    }

    /// Descriptor stored at a flat index.
    ///
    /// Unpopulated slots yield [`ObjectEntry::EMPTY`]; `None` means the index
    /// is out of range.
    pub fn get_entry(&self, flat_index: usize) -> Option<&ObjectEntry> {
        let (object_type, slot) = self.type_entry_index(flat_index)?;
        self.group(object_type).entries.get(slot)
    }

    /// Payload loaded at a flat index, if any.
    pub fn get_payload(&self, flat_index: usize) -> Option<&P> {
        let (object_type, slot) = self.type_entry_index(flat_index)?;
        self.slot(object_type, slot)
    }

    /// Payload loaded at a `(type, slot)` position, if any.
    pub fn slot(&self, object_type: ObjectType, slot: usize) -> Option<&P> {
        self.group(object_type).payloads.get(slot)?.as_ref()
    }

    /// Number of occupied slots across all types.
    pub fn loaded_count(&self) -> usize {
        self.groups
            .iter()
            .map(|g| g.payloads.iter().filter(|p| p.is_some()).count())
            .sum()
    }

    /// Whether no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.groups
            .iter()
            .all(|g| g.payloads.iter().all(Option::is_none))
    }

    /// Iterate over occupied slots in flat index order.
    pub fn iter_loaded(&self) -> impl Iterator<Item = LoadedObject<'_, P>> + '_ {
        self.config
            .groups()
            .iter()
            .zip(&self.groups)
            .flat_map(move |(spec, group)| {
                let offset = self.config.group_offset(spec.object_type);
                group
                    .payloads
                    .iter()
                    .zip(&group.entries)
                    .enumerate()
                    .filter_map(move |(slot, (payload, entry))| {
                        payload.as_ref().map(|payload| LoadedObject {
                            object_type: spec.object_type,
                            slot,
                            flat_index: offset + slot,
                            entry,
                            payload,
                        })
                    })
            })
    }
}

impl<P> Default for ObjectTable<P> {
    fn default() -> Self {
        Self::new(GroupConfig::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table() -> ObjectTable<u32> {
        ObjectTable::new(GroupConfig::with_capacities(&[
            (ObjectType::Ride, 2),
            (ObjectType::SmallScenery, 1),
        ]))
    }

    #[test]
    fn test_new_table_is_empty() {
        let table: ObjectTable<u32> = ObjectTable::default();
        assert!(table.is_empty());
        for index in 0..721 {
            assert!(table.get_payload(index).is_none());
            assert_eq!(table.get_entry(index), Some(&ObjectEntry::EMPTY));
        }
        assert!(table.get_entry(721).is_none());
    }

    #[test]
    fn test_store_and_reset() {
        let mut table = small_table();
        let entry = ObjectEntry::with_name(0x00, "AAAA", 7);
        table.store(ObjectType::Ride, 1, entry, 42);

        assert_eq!(table.get_payload(1), Some(&42));
        assert_eq!(table.get_entry(1), Some(&entry));
        assert_eq!(table.slot(ObjectType::Ride, 1), Some(&42));
        assert_eq!(table.loaded_count(), 1);

        table.reset();
        assert!(table.is_empty());
        assert_eq!(table.get_entry(1), Some(&ObjectEntry::EMPTY));
    }

    #[test]
    fn test_find_matching_slot_first_match() {
        let mut table = small_table();
        let entry = ObjectEntry::with_name(0x00, "DUP", 7);
        table.store(ObjectType::Ride, 1, entry, 1);
        assert_eq!(table.find_matching_slot(ObjectType::Ride, &entry), Some(1));

        table.store(ObjectType::Ride, 0, entry, 2);
        assert_eq!(table.find_matching_slot(ObjectType::Ride, &entry), Some(0));
    }

    #[test]
    fn test_find_skips_empty_slots() {
        let table = small_table();
        assert_eq!(table.find_matching_slot(ObjectType::Ride, &ObjectEntry::EMPTY), None);
        assert_eq!(table.find_object_in_group(&ObjectEntry::with_name(0x0C, "X", 0)), None);
    }

    #[test]
    fn test_iter_loaded() {
        let mut table = small_table();
        table.store(ObjectType::SmallScenery, 0, ObjectEntry::with_name(0x01, "BBBB", 0), 9);
        table.store(ObjectType::Ride, 0, ObjectEntry::with_name(0x00, "AAAA", 0), 8);

        let loaded: Vec<_> = table
            .iter_loaded()
            .map(|o| (o.flat_index, o.object_type, o.slot, *o.payload))
            .collect();
        assert_eq!(
            loaded,
            vec![(0, ObjectType::Ride, 0, 8), (2, ObjectType::SmallScenery, 0, 9)]
        );
    }
}
