mod common;

use common::sample_record;
use entrylab::error::EntryLabError;
use entrylab::trial::{
    load_all, load_trial, merge, parse_trial, ChallengeType, DirStore, Layout, MemoryStore,
    Provenance, TrialItem, TrialStore,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_dir_store_lists_yaml_stems() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("trial-2.yaml"), "trial: []").unwrap();
    fs::write(dir.path().join("trial-1.yml"), "trial: []").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
    fs::create_dir(dir.path().join("nested.yaml")).unwrap();

    let store = DirStore::new(dir.path());
    assert_eq!(store.ids().unwrap(), vec!["trial-1", "trial-2"]);
}

#[test]
fn test_dir_store_missing_id() {
    let dir = tempdir().unwrap();
    let store = DirStore::new(dir.path());
    match load_trial(&store, "trial-9") {
        Err(EntryLabError::TrialNotFound(id)) => assert_eq!(id, "trial-9"),
        other => panic!("expected TrialNotFound, got {:?}", other),
    }
}

#[test]
fn test_load_trial_from_disk() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("trial-0.yaml"),
        sample_record("ArcType", "hello", "hellp", 12.0),
    )
    .unwrap();

    let set = load_trial(&DirStore::new(dir.path()), "trial-0").unwrap();
    assert_eq!(
        set.provenance,
        Provenance::Source {
            id: "trial-0".to_string()
        }
    );
    assert_eq!(set.items.len(), 3);
    assert!(matches!(&set.items[0], TrialItem::Command { key, .. } if key == "next-layout"));

    let blind = set.challenges().next().unwrap();
    assert_eq!(blind.kind, ChallengeType::Blind);
    assert_eq!(blind.layout, Layout::ArcType);
    assert_eq!(blind.output, "hellp");
    assert_eq!(blind.time.duration, Some(12.0));
    assert_eq!(blind.keypresses.len(), 2);
    assert_eq!(blind.keypresses[0].key.as_deref(), Some("a"));
    assert_eq!(blind.keypresses[0].rotation(), Some([3.0, 4.0, 0.0]));
    assert_eq!(blind.keypresses[1].press_pos, Some([0.75, 1.0, -0.25]));

    let meta = set.meta.unwrap();
    assert_eq!(meta.unixseconds, Some(1594866987));
    assert_eq!(meta.platform.as_deref(), Some("WindowsPlayer"));
}

#[test]
fn test_parse_rejects_non_trial_documents() {
    assert!(matches!(
        parse_trial("bad", "meta: {}\n"),
        Err(EntryLabError::Parse { .. })
    ));
    assert!(matches!(
        parse_trial("bad", "trial: [unclosed"),
        Err(EntryLabError::Parse { .. })
    ));
}

#[test]
fn test_empty_trial_is_valid() {
    let set = parse_trial("empty", "trial: []\n").unwrap();
    assert!(set.items.is_empty());
    assert_eq!(set.meta, None);
}

#[test]
fn test_merge_preserves_order_and_drops_provenance() {
    let store = MemoryStore::new()
        .with("a", sample_record("ArcType", "first", "first", 5.0))
        .with("b", sample_record("Raycast", "second", "second", 5.0));

    let sets = load_all(&store).unwrap();
    assert_eq!(sets.len(), 2);
    let lens: usize = sets.iter().map(|s| s.items.len()).sum();

    let merged = merge(sets);
    assert!(merged.is_merged());
    assert_eq!(merged.meta, None);
    assert_eq!(merged.items.len(), lens);

    let prompts: Vec<_> = merged.challenges().map(|c| c.prompt.as_str()).collect();
    assert_eq!(prompts, vec!["first", "warm up", "second", "warm up"]);
}

#[test]
fn test_merge_of_nothing_is_empty() {
    let merged = merge(Vec::new());
    assert!(merged.is_merged());
    assert!(merged.items.is_empty());
    assert_eq!(merged.skipped, 0);
}

#[test]
fn test_malformed_challenge_is_skipped_not_fatal() {
    let text = r#"
trial:
  - challenge:
      type: Blind
      layout: Keyboard
      prompt: "x"
  - challenge:
      type: Perfect
      layout: SliderOnly
      prompt: "ok"
      output: "ok"
      time: { start: 0, stop: 2, duration: 2 }
  - 42
"#;
    let set = parse_trial("mixed", text).unwrap();
    assert_eq!(set.challenge_count(), 1);
    assert_eq!(set.skipped, 2);
}

#[test]
fn test_repeated_keypress_id_does_not_abort_loading() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("trial-0.yaml"),
        sample_record("ArcType", "hello", "hello", 10.0),
    )
    .unwrap();
    // Two presses landing in the same frame share a timestamp key.
    let repeated = sample_record("TiltType", "ab", "ab", 10.0).replace("2.5:", "2.0:");
    fs::write(dir.path().join("trial-1.yaml"), repeated).unwrap();

    let sets = load_all(&DirStore::new(dir.path())).unwrap();
    assert_eq!(sets.len(), 2);

    let tilt = sets[1].challenges().next().unwrap();
    assert_eq!(tilt.layout, Layout::TiltType);
    assert_eq!(tilt.keypresses.len(), 2);
    assert_eq!(tilt.keypresses[0].id, tilt.keypresses[1].id);
    assert_eq!(tilt.keypresses[1].key.as_deref(), Some("b"));
}
