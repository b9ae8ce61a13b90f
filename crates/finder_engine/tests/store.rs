use std::fs;
use std::sync::Once;

use finder_core::{NoConversion, RawVacancy};
use finder_engine::{
    AppendSummary, DeleteFailure, DeleteOutcome, Degraded, JsonFileStore, LoadOutcome, RecordStore,
    StoreError,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(finder_logging::initialize_for_tests);
}

fn raw(value: Value) -> RawVacancy {
    value.as_object().cloned().unwrap()
}

fn sample() -> Vec<RawVacancy> {
    vec![
        raw(json!({"name": "Python Developer", "salary": "100000"})),
        raw(json!({"name": "Data Scientist", "salary": "120000"})),
    ]
}

fn store_in(temp: &TempDir) -> JsonFileStore {
    JsonFileStore::new(temp.path().join("vacancies.json"))
}

fn names(store: &JsonFileStore) -> Vec<String> {
    store
        .list()
        .into_records()
        .iter()
        .map(|record| record["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn missing_file_lists_as_degraded_empty() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    let outcome = store.list();
    assert_eq!(
        outcome.degraded(),
        Some(&Degraded::Missing(store.path().to_path_buf()))
    );
    assert!(outcome.into_records().is_empty());
}

#[test]
fn corrupt_file_lists_as_degraded_empty() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    for content in ["{invalid json}", "{\"name\": \"not an array\"}", "[1, 2]", ""] {
        fs::write(store.path(), content).unwrap();
        let outcome = store.list();
        assert!(
            matches!(outcome.degraded(), Some(Degraded::Corrupt { .. })),
            "{content:?}"
        );
        assert!(outcome.into_records().is_empty());
    }
}

#[test]
fn append_creates_file_and_round_trips_raw_form() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp.path().join("nested").join("vacancies.json"));
    let vacancy = raw(json!({
        "name": "Rust Engineer",
        "link": "https://hh.ru/vacancy/42",
        "salary": {"from": 100000, "to": null, "currency": "RUR", "gross": true},
        "area": "москва",
    }));

    let summary = store.append(std::slice::from_ref(&vacancy)).unwrap();
    assert_eq!(
        summary,
        AppendSummary {
            added: 1,
            duplicates: 0,
            unnamed: 0,
            total: 1,
        }
    );
    assert!(store.path().exists());

    match store.list() {
        LoadOutcome::Loaded(records) => assert_eq!(records, vec![vacancy]),
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn append_skips_existing_names_without_overwriting() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    store.append(&sample()).unwrap();

    let summary = store
        .append(&[raw(json!({"name": "Python Developer", "salary": "110000"}))])
        .unwrap();
    assert_eq!(summary.added, 0);
    assert_eq!(summary.duplicates, 1);

    let records = store.list().into_records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["salary"], json!("100000"));
}

#[test]
fn append_dedups_within_one_batch_and_is_case_sensitive() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    let summary = store
        .append(&[
            raw(json!({"name": "Go Developer"})),
            raw(json!({"name": "Go Developer", "salary": null})),
            raw(json!({"name": "go developer"})),
        ])
        .unwrap();

    assert_eq!(summary.added, 2);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(names(&store), vec!["Go Developer", "go developer"]);
}

#[test]
fn append_skips_records_without_a_name() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    let summary = store
        .append(&[
            raw(json!({"link": "https://hh.ru/vacancy/1"})),
            raw(json!({"name": ""})),
            raw(json!({"name": null})),
            raw(json!({"name": "Kept"})),
        ])
        .unwrap();

    assert_eq!(summary.unnamed, 3);
    assert_eq!(summary.added, 1);
    assert_eq!(names(&store), vec!["Kept"]);
}

#[test]
fn append_over_corrupt_file_starts_fresh() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    fs::write(store.path(), "not json").unwrap();

    store.append(&sample()).unwrap();
    assert_eq!(names(&store), vec!["Python Developer", "Data Scientist"]);
}

#[test]
fn invalid_utf8_file_counts_as_corrupt() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    fs::write(store.path(), [b'[', 0xff, 0xfe, b']']).unwrap();

    assert!(matches!(
        store.list().degraded(),
        Some(Degraded::Corrupt { .. })
    ));

    store.append(&sample()).unwrap();
    assert_eq!(names(&store), vec!["Python Developer", "Data Scientist"]);
}

#[test]
fn append_refuses_to_replace_an_unreadable_path() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    fs::create_dir(store.path()).unwrap();
    fs::write(store.path().join("keep.txt"), "precious").unwrap();

    let err = store.append(&sample()).unwrap_err();
    assert!(matches!(err, StoreError::Read(Degraded::Unreadable { .. })));
    assert!(store.path().is_dir());
    assert_eq!(
        fs::read_to_string(store.path().join("keep.txt")).unwrap(),
        "precious"
    );
}

#[cfg(unix)]
#[test]
fn append_leaves_permission_denied_file_intact() {
    use std::os::unix::fs::PermissionsExt;

    init_logging();
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    let original = r#"[{"name": "Precious 1"}, {"name": "Precious 2"}]"#;
    fs::write(store.path(), original).unwrap();
    fs::set_permissions(store.path(), fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users read through mode 000; nothing to check then.
    if fs::read(store.path()).is_ok() {
        return;
    }

    let result = store.append(&[raw(json!({"name": "New"}))]);
    fs::set_permissions(store.path(), fs::Permissions::from_mode(0o644)).unwrap();

    assert!(matches!(
        result,
        Err(StoreError::Read(Degraded::Unreadable { .. }))
    ));
    assert_eq!(fs::read_to_string(store.path()).unwrap(), original);
}

#[test]
fn clear_is_idempotent() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    store.append(&sample()).unwrap();

    store.clear().unwrap();
    let once = fs::read_to_string(store.path()).unwrap();
    store.clear().unwrap();
    let twice = fs::read_to_string(store.path()).unwrap();

    assert_eq!(once, twice);
    assert_eq!(store.list(), LoadOutcome::Loaded(Vec::new()));
}

#[test]
fn delete_removes_case_insensitive_substring_matches() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    store
        .append(&[
            raw(json!({"name": "Senior PYTHON Developer"})),
            raw(json!({"name": "Java Developer"})),
            raw(json!({"name": "python intern"})),
        ])
        .unwrap();

    let outcome = store.delete(Some("name"), Some("python"));
    assert_eq!(
        outcome,
        DeleteOutcome::Deleted {
            removed: 2,
            remaining: 1,
        }
    );
    assert_eq!(names(&store), vec!["Java Developer"]);
}

#[test]
fn delete_matches_on_any_field() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    store.append(&sample()).unwrap();

    store.delete(Some("salary"), Some("120000"));
    assert_eq!(names(&store), vec!["Python Developer"]);

    let outcome = store.delete(Some("name"), Some("Java"));
    assert_eq!(
        outcome,
        DeleteOutcome::Deleted {
            removed: 0,
            remaining: 1,
        }
    );
}

#[test]
fn delete_keeps_records_missing_the_key() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    store
        .append(&[
            raw(json!({"name": "With area", "area": "Moscow"})),
            raw(json!({"name": "Without area"})),
            raw(json!({"name": "Null area", "area": null})),
        ])
        .unwrap();

    store.delete(Some("area"), Some("mos"));
    assert_eq!(names(&store), vec!["Without area", "Null area"]);
}

#[test]
fn delete_without_key_or_value_is_a_noop() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    store.append(&sample()).unwrap();
    let before = fs::read_to_string(store.path()).unwrap();

    assert_eq!(store.delete(None, None), DeleteOutcome::Skipped);
    assert_eq!(store.delete(Some("name"), None), DeleteOutcome::Skipped);
    assert_eq!(store.delete(None, Some("python")), DeleteOutcome::Skipped);
    assert_eq!(store.delete(Some("name"), Some("")), DeleteOutcome::Skipped);

    assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
}

#[test]
fn delete_failure_leaves_file_untouched() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);

    let outcome = store.delete(Some("name"), Some("python"));
    assert!(matches!(
        outcome,
        DeleteOutcome::Failed(DeleteFailure::Read(Degraded::Missing(_)))
    ));
    assert!(!store.path().exists());

    fs::write(store.path(), "{broken").unwrap();
    let outcome = store.delete(Some("name"), Some("python"));
    assert!(matches!(
        outcome,
        DeleteOutcome::Failed(DeleteFailure::Read(Degraded::Corrupt { .. }))
    ));
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "{broken");
}

#[test]
fn records_hydrates_stored_vacancies() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    store
        .append(&[raw(json!({
            "name": "Rust Engineer",
            "link": "https://hh.ru/vacancy/42",
            "salary": {"from": 100000, "to": 150000, "currency": "RUR"},
            "description": null,
            "area": "казань",
            "contact": "HR",
        }))])
        .unwrap();

    let records = store.records(&NoConversion).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].salary(), 125000);
    assert_eq!(records[0].location(), "Казань");
}

#[test]
fn records_fail_on_invalid_stored_vacancy() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp);
    store.append(&sample()).unwrap();

    assert!(store.records(&NoConversion).is_err());
}
