use std::io::Read;
use std::rc::Rc;

use objtab_catalog::{
    decode_entries, encode_entries, ChunkEncoding, Error, FailReason, GroupConfig, ObjectEntry,
    ObjectTable, ObjectType, RawChunk, ResolveError,
};

/// Two ride slots followed by one small scenery slot.
fn two_type_config() -> GroupConfig {
    GroupConfig::with_capacities(&[(ObjectType::Ride, 2), (ObjectType::SmallScenery, 1)])
}

fn ride(name: &str) -> ObjectEntry {
    ObjectEntry::with_name(0x0000_0000, name, 0x0102_0304)
}

fn scenery(name: &str) -> ObjectEntry {
    ObjectEntry::with_name(0x0000_0001, name, 0x0506_0708)
}

fn by_name(
    _: ObjectType,
    entry: &ObjectEntry,
    _: ChunkEncoding,
) -> Result<String, ResolveError> {
    Ok(entry.name_str())
}

#[test]
fn loads_present_entries_into_their_slots() {
    let mut table = ObjectTable::new(two_type_config());
    let entries = [ride("AAAA"), ObjectEntry::EMPTY, scenery("BBBB")];

    let summary = table.load_entries(&entries, by_name).unwrap();
    assert_eq!(summary.loaded, 2);
    assert_eq!(summary.skipped, 1);

    assert_eq!(table.get_entry(0), Some(&entries[0]));
    assert_eq!(table.get_payload(0).map(String::as_str), Some("AAAA"));
    assert_eq!(table.type_entry_index(0), Some((ObjectType::Ride, 0)));

    assert_eq!(table.get_entry(1), Some(&ObjectEntry::EMPTY));
    assert!(table.get_payload(1).is_none());

    assert_eq!(table.get_entry(2), Some(&entries[2]));
    assert_eq!(table.get_payload(2).map(String::as_str), Some("BBBB"));
    assert_eq!(table.type_entry_index(2), Some((ObjectType::SmallScenery, 0)));

    assert_eq!(table.find_object_in_group(&entries[0]), Some((ObjectType::Ride, 0)));
    assert_eq!(table.find_object_in_group(&entries[2]), Some((ObjectType::SmallScenery, 0)));
    assert_eq!(table.find_object_in_group(&ride("CCCC")), None);
}

#[test]
fn failed_resolution_rolls_back_everything() {
    let mut table = ObjectTable::new(two_type_config());
    let entries = [ride("AAAA"), ObjectEntry::EMPTY, scenery("BBBB")];

    let result = table.load_entries(
        &entries,
        |ty: ObjectType, entry: &ObjectEntry, _: ChunkEncoding| match ty {
            ObjectType::SmallScenery => Err(ResolveError::not_found(entry)),
            _ => Ok(entry.name_str()),
        },
    );

    let failures = match result {
        Err(Error::LoadFailed { failures }) => failures,
        other => panic!("expected a load failure, got {other:?}"),
    };
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].flat_index, 2);
    assert_eq!(failures[0].object_type, ObjectType::SmallScenery);
    assert_eq!(failures[0].entry, entries[2]);
    assert_eq!(
        failures[0].reason(0),
        FailReason::MissingObjectData {
            identifier: "BBBB/0100000008070605".to_string()
        }
    );

    assert!(table.is_empty());
    for index in 0..3 {
        assert!(table.get_payload(index).is_none());
        assert_eq!(table.get_entry(index), Some(&ObjectEntry::EMPTY));
    }
    assert_eq!(table.find_object_in_group(&entries[0]), None);
}

#[test]
fn failed_reload_discards_previous_contents() {
    let mut table = ObjectTable::new(two_type_config());
    table
        .load_entries(&[ride("OLD"), ObjectEntry::EMPTY, ObjectEntry::EMPTY], by_name)
        .unwrap();
    assert_eq!(table.loaded_count(), 1);

    let result = table.load_entries(
        &[ride("NEW"), ObjectEntry::EMPTY, scenery("GONE")],
        |_: ObjectType, entry: &ObjectEntry, _: ChunkEncoding| {
            if entry.name_str() == "GONE" {
                Err(ResolveError::Decode("truncated chunk".to_string()))
            } else {
                Ok(entry.name_str())
            }
        },
    );

    assert!(matches!(result, Err(Error::LoadFailed { .. })));
    assert!(table.is_empty());
}

#[test]
fn reload_releases_every_previous_payload() {
    let token = Rc::new(());
    let mut table = ObjectTable::new(two_type_config());

    let first = [ride("AAAA"), ride("AAAB"), scenery("BBBB")];
    table
        .load_entries(&first, |_: ObjectType, _: &ObjectEntry, _: ChunkEncoding| {
            Ok::<_, ResolveError>(Rc::clone(&token))
        })
        .unwrap();
    assert_eq!(Rc::strong_count(&token), 4);

    let fresh = Rc::new(());
    let second = [ObjectEntry::EMPTY, ride("CCCC"), ObjectEntry::EMPTY];
    table
        .load_entries(&second, |_: ObjectType, _: &ObjectEntry, _: ChunkEncoding| {
            Ok::<_, ResolveError>(Rc::clone(&fresh))
        })
        .unwrap();

    assert_eq!(Rc::strong_count(&token), 1);
    assert_eq!(Rc::strong_count(&fresh), 2);
    assert_eq!(table.find_object_in_group(&first[0]), None);
    assert_eq!(table.find_object_in_group(&second[1]), Some((ObjectType::Ride, 1)));

    table.reset();
    assert_eq!(Rc::strong_count(&fresh), 1);
}

#[test]
fn rollback_releases_payloads_of_successful_entries() {
    let token = Rc::new(());
    let mut table = ObjectTable::new(two_type_config());

    let result = table.load_entries(
        &[ride("AAAA"), ride("AAAB"), scenery("BBBB")],
        |ty: ObjectType, entry: &ObjectEntry, _: ChunkEncoding| match ty {
            ObjectType::Ride => Ok(Rc::clone(&token)),
            _ => Err(ResolveError::not_found(entry)),
        },
    );

    assert!(result.is_err());
    assert_eq!(Rc::strong_count(&token), 1);
}

#[test]
fn duplicate_descriptors_resolve_to_lowest_slot() {
    let mut table = ObjectTable::new(two_type_config());
    let entries = [ride("TWIN"), ride("TWIN"), ObjectEntry::EMPTY];

    table.load_entries(&entries, by_name).unwrap();
    assert_eq!(table.find_object_in_group(&ride("TWIN")), Some((ObjectType::Ride, 0)));
}

#[test]
fn standard_catalog_round_trip_through_raw_chunk() {
    let config = GroupConfig::standard();
    let mut entries = vec![ObjectEntry::EMPTY; config.total_capacity()];
    entries[config.to_flat(ObjectType::Ride, 5)] = ride("TWIST1");
    entries[config.to_flat(ObjectType::Water, 0)] = ObjectEntry::with_name(0x09, "WTRCYAN", 0);
    entries[config.to_flat(ObjectType::ScenarioText, 0)] = ObjectEntry::with_name(0x0A, "SCTEXT", 0);

    let bytes = encode_entries(&entries);
    assert_eq!(bytes.len(), 721 * ObjectEntry::SIZE);
    assert_eq!(decode_entries(&bytes, 721).unwrap(), entries);

    let mut table: ObjectTable<ChunkEncoding> = ObjectTable::new(config);
    let mut codec = RawChunk::for_entries(721);
    let summary = table
        .read_and_load_entries(
            &mut &bytes[..],
            &mut codec,
            |_: ObjectType, _: &ObjectEntry, encoding: ChunkEncoding| Ok::<_, ResolveError>(encoding),
        )
        .unwrap();

    assert_eq!(summary.loaded, 3);
    assert_eq!(summary.skipped, 718);
    assert_eq!(table.get_payload(5), Some(&ChunkEncoding::Rle));
    assert_eq!(table.get_payload(719), Some(&ChunkEncoding::Rle));
    assert_eq!(table.get_payload(720), Some(&ChunkEncoding::Rotate));

    let loaded: Vec<usize> = table.iter_loaded().map(|o| o.flat_index).collect();
    assert_eq!(loaded, vec![5, 719, 720]);
}

#[test]
fn truncated_catalog_is_malformed() {
    let mut table: ObjectTable<()> = ObjectTable::default();
    let bytes = vec![0xFFu8; 720 * ObjectEntry::SIZE];

    let mut codec = |reader: &mut dyn Read| -> objtab_catalog::Result<Vec<u8>> {
        let mut out = Vec::new();
        reader.read_to_end(&mut out)?;
        Ok(out)
    };
    let result = table.read_and_load_entries(
        &mut &bytes[..],
        &mut codec,
        |_: ObjectType, _: &ObjectEntry, _: ChunkEncoding| Ok::<_, ResolveError>(()),
    );

    assert!(matches!(result, Err(Error::MalformedCatalog { .. })));
}
