// tests/store_tests.rs
//! Settings store: upsert/load/delete/list/filter and load fallbacks

mod common;
mod support;
use support::{map_of, memory_store, record, unwritable_store};

use hash_master::backup::{RestorePlan, ScriptedDecisions};
use hash_master::prefs::PreferencesStore;
use hash_master::{
    run_merge, AppPreferences, FilePersistence, MemoryPersistence, MergeDecision, Persistence,
    SettingsMap, SettingsStore,
};
use tempfile::tempdir;

#[test]
fn save_load_delete_roundtrip() {
    common::setup();
    let (mut store, persisted) = memory_store(&[]);

    store.save("github", record("github", "1")).unwrap();
    assert_eq!(store.load("github"), Some(&record("github", "1")));
    assert!(persisted.contents().is_some());

    // upsert
    store.save("github", record("github", "4")).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.load("github").unwrap().iterations, "4");

    assert!(store.delete("github").unwrap());
    assert!(!store.delete("github").unwrap());
    assert!(store.load("github").is_none());
    assert!(store.is_empty());
}

#[test]
fn empty_description_is_not_saved() {
    let (mut store, persisted) = memory_store(&[]);
    store.save("", record("", "1")).unwrap();
    assert!(store.is_empty());
    assert!(persisted.contents().is_none());
}

#[test]
fn keys_are_case_sensitive_and_listed_sorted() {
    let (store, _) = memory_store(&[
        record("bank", "1"),
        record("Bank", "1"),
        record("amazon", "1"),
        record("zebra", "2"),
    ]);
    assert_eq!(store.list(), vec!["Bank", "amazon", "bank", "zebra"]);
}

#[test]
fn persisted_data_reloads() {
    let (mut store, persisted) = memory_store(&[]);
    store.save("a", record("a", "1")).unwrap();
    store.save("b", record("b", "0")).unwrap();

    let reopened = SettingsStore::open(persisted.clone());
    assert_eq!(reopened.records(), store.records());
    assert!(reopened.load_warning().is_none());
}

#[test]
fn filter_hides_only_exact_zero_iterations() {
    let mut weird = record("weird", "");
    weird.iterations = "lots".into();
    let (store, _) = memory_store(&[
        record("active", "3"),
        record("inactive", "0"),
        weird,
        record("negative", "-1"),
    ]);

    assert_eq!(
        store.filter("", true),
        vec!["active", "negative", "weird"]
    );
    assert_eq!(
        store.filter("", false),
        vec!["active", "inactive", "negative", "weird"]
    );
}

#[test]
fn filter_text_is_case_insensitive_substring() {
    let (store, _) = memory_store(&[
        record("GitHub Work", "1"),
        record("github personal", "0"),
        record("gitlab", "1"),
    ]);

    assert_eq!(store.filter("HUB", false), vec!["GitHub Work", "github personal"]);
    assert_eq!(store.filter("HUB", true), vec!["GitHub Work"]);
    assert_eq!(store.filter("git", false).len(), 3);
    assert!(store.filter("nomatch", false).is_empty());
}

#[test]
fn malformed_settings_reset_to_empty_with_warning() {
    let persisted = MemoryPersistence::with_contents("{not json");
    let store = SettingsStore::open(persisted);
    assert!(store.is_empty());
    let warning = store.load_warning().expect("warning recorded");
    assert!(warning.is_persistence());
}

#[test]
fn wrong_shape_settings_reset_to_empty() {
    let store = SettingsStore::open(MemoryPersistence::with_contents("[1, 2, 3]"));
    assert!(store.is_empty());
    assert!(store.load_warning().is_some());
}

#[test]
fn missing_file_is_an_empty_store() {
    let dir = tempdir().unwrap();
    let store = SettingsStore::open(FilePersistence::new(dir.path().join("absent.json")));
    assert!(store.is_empty());
    assert!(store.load_warning().is_none());
}

#[test]
fn file_persistence_creates_parent_dirs_and_replaces_atomically() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/deeper/settings.json");
    let mut p = FilePersistence::new(&path);

    assert_eq!(p.read_all().unwrap(), None);
    p.write_all(b"first").unwrap();
    p.write_all(b"second").unwrap();
    assert_eq!(p.read_all().unwrap(), Some(b"second".to_vec()));

    // only the target file is left behind
    let entries: Vec<_> = std::fs::read_dir(path.parent().unwrap())
        .unwrap()
        .collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn store_json_uses_expected_field_names() {
    let (mut store, persisted) = memory_store(&[]);
    store.save("github", record("github", "2")).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&persisted.contents().unwrap()).unwrap();
    let entry = &value["github"];
    assert_eq!(entry["description"], "github");
    assert_eq!(entry["algorithm"], "SHA-256");
    assert_eq!(
        entry["char_restrictions"],
        "Alphanumeric (replace others with underscore)"
    );
    assert_eq!(entry["length"], "12");
    assert_eq!(entry["iterations"], "2");
}

#[test]
fn records_with_missing_fields_load_as_empty_strings() {
    let store = SettingsStore::open(MemoryPersistence::with_contents(
        r#"{"old": {"description": "old", "algorithm": "MD5"}}"#,
    ));
    let rec = store.load("old").unwrap();
    assert_eq!(rec.algorithm, "MD5");
    assert_eq!(rec.iterations, "");
    assert!(!rec.is_inactive());
}

#[test]
fn preference_defaults_contract() {
    let prefs = AppPreferences::default();
    assert_eq!(prefs.last_description, "");
    assert_eq!(prefs.last_filter, "");
    assert_eq!(prefs.last_algorithm, "SHA-256");
    assert_eq!(
        prefs.last_char_restriction,
        "Alphanumeric (replace others with underscore)"
    );
    assert_eq!(prefs.last_length, "12");
    assert_eq!(prefs.last_iterations, "1");
    assert!(prefs.hide_inactive);
    assert!(prefs.auto_copy);
}

#[test]
fn preferences_fall_back_to_defaults() {
    let empty = PreferencesStore::open(MemoryPersistence::new());
    assert_eq!(empty.get(), &AppPreferences::default());

    let corrupt = PreferencesStore::open(MemoryPersistence::with_contents("nope"));
    assert_eq!(corrupt.get(), &AppPreferences::default());

    // missing fields keep their defaults
    let partial = PreferencesStore::open(MemoryPersistence::with_contents(
        r#"{"last_filter": "bank", "hide_zero_iter": false}"#,
    ));
    assert_eq!(partial.get().last_filter, "bank");
    assert!(!partial.get().hide_inactive);
    assert_eq!(partial.get().last_length, "12");
    assert!(partial.get().auto_copy);
}

#[test]
fn preferences_update_persists() {
    let persisted = MemoryPersistence::new();
    let mut prefs = PreferencesStore::open(persisted.clone());
    prefs
        .update(|p| {
            p.last_filter = "mail".into();
            p.auto_copy = false;
        })
        .unwrap();

    let value: serde_json::Value = serde_json::from_slice(&persisted.contents().unwrap()).unwrap();
    assert_eq!(value["copy_to_clipboard"], false);
    assert_eq!(value["last_char_rest"], "Alphanumeric (replace others with underscore)");

    let reopened = PreferencesStore::open(persisted);
    assert_eq!(reopened.get().last_filter, "mail");
    assert!(!reopened.get().auto_copy);
}

#[test]
fn replace_all_swaps_contents() {
    let (mut store, persisted) = memory_store(&[record("old", "1")]);
    let mut fresh = SettingsMap::new();
    fresh.insert("new".into(), record("new", "2"));
    store.replace_all(fresh.clone()).unwrap();

    assert_eq!(store.records(), &fresh);
    let reloaded: SettingsMap = serde_json::from_slice(&persisted.contents().unwrap()).unwrap();
    assert_eq!(reloaded, fresh);
}

#[test]
fn differing_fields_lists_changes() {
    let a = record("x", "1");
    let mut b = a.clone();
    b.length = "20".into();
    b.iterations = "3".into();
    let fields = a.differing_fields(&b);
    assert_eq!(
        fields,
        vec![
            hash_master::settings::Field::Length,
            hash_master::settings::Field::Iterations
        ]
    );
    assert!(a.differing_fields(&a.clone()).is_empty());
}

#[test]
fn failed_writes_leave_memory_untouched() {
    let mut store = unwritable_store(&[record("a", "1"), record("b", "2")]);
    let before = store.records().clone();

    let err = store.replace_all(map_of(&[record("x", "1")])).unwrap_err();
    assert!(err.is_persistence());
    assert_eq!(store.records(), &before);

    assert!(store.delete("a").unwrap_err().is_persistence());
    assert!(store.load("a").is_some());

    // a missing key needs no write
    assert!(!store.delete("zzz").unwrap());
}

#[test]
fn failed_restore_or_merge_commit_keeps_current_records() {
    let mut store = unwritable_store(&[record("a", "1")]);
    let before = store.records().clone();

    let plan = RestorePlan::new(&store, map_of(&[record("x", "1"), record("y", "1")]));
    assert!(plan.apply(&mut store).unwrap_err().is_persistence());
    assert_eq!(store.records(), &before);

    let mut decisions = ScriptedDecisions::new([MergeDecision::Overwrite]);
    let result = run_merge(&mut store, map_of(&[record("new", "1")]), &mut decisions);
    assert!(result.unwrap_err().is_persistence());
    assert_eq!(store.list(), vec!["a"]);
}
