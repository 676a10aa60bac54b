use super::*;
use crate::constants::{CHUNK_DETAIL_LEVEL, REGION_DETAIL_LEVEL};

#[test]
fn test_default_config() {
  let config = QuadTreeConfig::default();
  assert_eq!(config.top_detail_level, 12);
  assert_eq!(config.min_detail_level, 0);
  assert_eq!(config.level_count(), 13);
}

/// Top level is clamped to what a SectionPos can pack.
#[test]
fn test_new_clamps_levels() {
  let config = QuadTreeConfig::new(40, 200);
  assert_eq!(config.top_detail_level, MAX_DETAIL_LEVEL);
  assert_eq!(config.min_detail_level, MAX_DETAIL_LEVEL);
  assert_eq!(config.level_count(), 1);
}

#[test]
fn test_validate_range() {
  let config = QuadTreeConfig::new(CHUNK_DETAIL_LEVEL, REGION_DETAIL_LEVEL);

  assert!(config.validate(&SectionPos::new(CHUNK_DETAIL_LEVEL, 0, 0).unwrap()).is_ok());
  assert!(config.validate(&SectionPos::new(REGION_DETAIL_LEVEL, 0, 0).unwrap()).is_ok());
  assert_eq!(
    config.validate(&SectionPos::new(REGION_DETAIL_LEVEL + 1, 0, 0).unwrap()),
    Err(IndexError::LevelOutOfTree {
      level: REGION_DETAIL_LEVEL + 1,
      min: CHUNK_DETAIL_LEVEL,
      top: REGION_DETAIL_LEVEL,
    })
  );
  assert!(config.validate(&SectionPos::new(0, 0, 0).unwrap()).is_err());
}

#[test]
fn test_root_of() {
  let config = QuadTreeConfig::new(0, 6);

  // 64-wide roots: block (100, -1) lives in root (1, -1)
  let leaf = SectionPos::new(0, 100, -1).unwrap();
  let root = config.root_of(&leaf).unwrap();
  assert_eq!(root.decode(), (6, 1, -1));

  // A root is its own root
  assert_eq!(config.root_of(&root).unwrap(), root);
}
