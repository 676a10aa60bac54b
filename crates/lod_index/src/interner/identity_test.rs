use std::io::Cursor;
use std::sync::Arc;

use rayon::prelude::*;

use super::*;

fn pos() -> SectionPos {
  SectionPos::new(6, 3, -2).unwrap()
}

fn pair(block: &str) -> BlockBiomePair {
  BlockBiomePair::new("minecraft:plains", block)
}

fn interner_with(blocks: &[&str]) -> IdentityInterner<BlockBiomePair> {
  let interner = IdentityInterner::new(pos());
  for block in blocks {
    interner.add_if_absent(pair(block));
  }
  interner
}

// =========================================================================
// Interning
// =========================================================================

#[test]
fn test_ids_follow_insertion_order() {
  let interner = IdentityInterner::new(pos());
  assert_eq!(interner.max_valid_id(), -1);
  assert!(interner.is_empty());

  assert_eq!(interner.add_if_absent(pair("stone")), 0);
  assert_eq!(interner.add_if_absent(pair("dirt")), 1);
  assert_eq!(interner.add_if_absent(pair("sand")), 2);
  assert_eq!(interner.max_valid_id(), 2);
}

/// add_if_absent(t) twice returns the same ID and does not grow the interner.
#[test]
fn test_add_if_absent_is_idempotent() {
  let interner = interner_with(&["stone"]);
  let first = interner.add_if_absent(pair("grass"));
  let second = interner.add_if_absent(BlockBiomePair::new(
    String::from("minecraft:plains"),
    String::from("grass"),
  ));

  assert_eq!(first, second);
  assert_eq!(interner.len(), 2);
}

#[test]
fn test_get_and_accessors() {
  let interner = IdentityInterner::new(pos());
  let id = interner.add_if_absent(BlockBiomePair::new("minecraft:ocean", "minecraft:water"));

  assert_eq!(interner.get(id).unwrap().block_state(), "minecraft:water");
  assert_eq!(interner.biome(id).unwrap(), "minecraft:ocean");
  assert_eq!(interner.block_state(id).unwrap(), "minecraft:water");
}

/// Out-of-range lookups are structured errors naming the owning section.
#[test]
fn test_get_out_of_range() {
  let interner = interner_with(&["stone", "dirt"]);

  let err = interner.get(2).unwrap_err();
  match &err {
    InternerError::IdOutOfRange { id, len, pos: owner } => {
      assert_eq!(*id, 2);
      assert_eq!(*len, 2);
      assert_eq!(*owner, pos());
    }
    other => panic!("unexpected error: {other:?}"),
  }
  assert!(err.to_string().contains("6*3,-2"));
}

#[test]
fn test_clear_resets_everything() {
  let interner = interner_with(&["stone", "dirt"]);
  let new_pos = SectionPos::new(0, 1, 1).unwrap();

  interner.clear(new_pos);
  assert!(interner.is_empty());
  assert_eq!(interner.pos(), new_pos);
  // IDs start over
  assert_eq!(interner.add_if_absent(pair("dirt")), 0);
}

// =========================================================================
// Merge
// =========================================================================

/// [stone, grass] merged with [grass, water] -> 4 entries, remap {0: 2, 1: 3}.
#[test]
fn test_merge_appends_and_remaps() {
  let a = interner_with(&["stone", "grass"]);
  let b = interner_with(&["grass", "water"]);

  let remap = a.merge(&b);

  assert_eq!(remap, vec![2, 3]);
  assert_eq!(
    a.entries(),
    vec![pair("stone"), pair("grass"), pair("grass"), pair("water")]
  );
  // The source is untouched
  assert_eq!(b.len(), 2);
}

/// Every ID valid before a merge resolves to the same entry afterwards.
#[test]
fn test_merge_keeps_existing_ids() {
  let a = interner_with(&["stone", "grass", "log"]);
  let before: Vec<_> = (0..3).map(|id| a.get(id).unwrap()).collect();

  a.merge(&interner_with(&["log", "leaves", "stone"]));

  for (id, entry) in before.iter().enumerate() {
    assert_eq!(&a.get(id as u32).unwrap(), entry);
  }
  // Lookups still resolve to the first ID assigned
  assert_eq!(a.add_if_absent(pair("stone")), 0);
  assert_eq!(a.add_if_absent(pair("leaves")), 4);
}

/// Merged IDs resolve to the merged entries.
#[test]
fn test_merge_remap_resolves() {
  let a = interner_with(&["stone"]);
  let b = interner_with(&["water", "sand", "gravel"]);

  let remap = a.merge(&b);
  for (old_id, new_id) in remap.iter().enumerate() {
    assert_eq!(a.get(*new_id).unwrap(), b.get(old_id as u32).unwrap());
  }
}

#[test]
fn test_merge_into_self() {
  let a = interner_with(&["stone", "dirt"]);
  let remap = a.merge(&a);
  assert_eq!(remap, vec![2, 3]);
  assert_eq!(a.len(), 4);
}

#[test]
fn test_add_all_keeps_duplicates() {
  let a = interner_with(&["stone"]);
  a.add_all(&interner_with(&["stone", "dirt"]));
  assert_eq!(a.entries(), vec![pair("stone"), pair("stone"), pair("dirt")]);
}

// =========================================================================
// Concurrency
// =========================================================================

/// Concurrent workers agree on one ID per distinct entry.
#[test]
fn test_concurrent_add_if_absent() {
  let interner = Arc::new(IdentityInterner::new(pos()));
  let blocks: Vec<String> = (0..64).map(|i| format!("minecraft:block_{i}")).collect();

  let ids: Vec<Vec<u32>> = (0..8)
    .into_par_iter()
    .map(|_| {
      blocks
        .iter()
        .map(|block| interner.add_if_absent(pair(block)))
        .collect()
    })
    .collect();

  assert_eq!(interner.len(), blocks.len());
  for worker_ids in &ids {
    assert_eq!(worker_ids, &ids[0]);
  }
  for (block, id) in blocks.iter().zip(&ids[0]) {
    assert_eq!(interner.get(*id).unwrap(), pair(block));
  }
}

// =========================================================================
// Serialization
// =========================================================================

#[test]
fn test_serialize_roundtrip() {
  let original = interner_with(&["stone", "grass", "water"]);
  original.merge(&interner_with(&["stone"]));

  let mut bytes = Vec::new();
  original.serialize(&mut bytes).unwrap();
  assert_eq!(&bytes[..4], &[0, 0, 0, 4]);

  let restored = IdentityInterner::<BlockBiomePair>::deserialize(&mut Cursor::new(bytes), pos()).unwrap();
  assert_eq!(restored.entries(), original.entries());
  assert_eq!(restored.pos(), pos());
}

#[test]
fn test_serialize_empty() {
  let mut bytes = Vec::new();
  IdentityInterner::<BlockBiomePair>::new(pos()).serialize(&mut bytes).unwrap();
  assert_eq!(bytes, vec![0, 0, 0, 0]);

  let restored = IdentityInterner::<BlockBiomePair>::deserialize(&mut Cursor::new(bytes), pos()).unwrap();
  assert!(restored.is_empty());
}

/// A stream declaring 5 entries but holding 3 is corrupted, not an I/O failure.
#[test]
fn test_deserialize_truncated_stream() {
  let mut bytes = Vec::new();
  interner_with(&["stone", "grass", "water"])
    .serialize(&mut bytes)
    .unwrap();
  bytes[..4].copy_from_slice(&5u32.to_be_bytes());

  let result = IdentityInterner::<BlockBiomePair>::deserialize(&mut Cursor::new(bytes), pos());
  match result {
    Err(InternerError::DataCorrupted { pos: owner, reason }) => {
      assert_eq!(owner, pos());
      assert!(reason.contains("expected [5]"), "{reason}");
      assert!(reason.contains("[3]"), "{reason}");
    }
    other => panic!("expected DataCorrupted, got {other:?}"),
  }
}

#[test]
fn test_deserialize_missing_count() {
  let result = IdentityInterner::<BlockBiomePair>::deserialize(&mut Cursor::new(vec![0, 0]), pos());
  assert!(matches!(result, Err(InternerError::DataCorrupted { .. })));
}

#[test]
fn test_deserialize_negative_count() {
  let bytes = (-1i32).to_be_bytes().to_vec();
  let result = IdentityInterner::<BlockBiomePair>::deserialize(&mut Cursor::new(bytes), pos());
  assert!(matches!(result, Err(InternerError::DataCorrupted { .. })));
}

#[test]
fn test_deserialize_entry_without_separator() {
  let mut bytes = Vec::new();
  codec::write_u32(&mut bytes, 1).unwrap();
  codec::write_utf(&mut bytes, "minecraft:stone").unwrap();

  let result = IdentityInterner::<BlockBiomePair>::deserialize(&mut Cursor::new(bytes), pos());
  assert!(matches!(result, Err(InternerError::DataCorrupted { .. })));
}

/// Bytes that are not UTF-8 are corrupted data, not a failing reader.
#[test]
fn test_deserialize_invalid_utf8() {
  let bytes = vec![0, 0, 0, 1, 0, 1, 0xFF];
  let result = IdentityInterner::<BlockBiomePair>::deserialize(&mut Cursor::new(bytes), pos());
  match result {
    Err(InternerError::DataCorrupted { pos: owner, reason }) => {
      assert_eq!(owner, pos());
      assert!(reason.contains("entry [0]"), "{reason}");
    }
    other => panic!("expected DataCorrupted, got {other:?}"),
  }
}
