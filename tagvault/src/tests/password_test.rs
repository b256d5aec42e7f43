use std::fs;
use crate::common::mode::{FilterMode, TagMode};
use crate::crypto::{derive, transform};
use crate::record::location;
use crate::store::{Settings, StoreError};
use super::{p, Fixture};

#[test]
fn test_password_gate() {
    let fx = Fixture::new();
    let mut store = fx.open();

    store.set_password(None, "p1").unwrap();
    assert!(store.has_password());

    assert!(matches!(store.set_password(Some("wrong"), "p2"), Err(StoreError::AuthFailure)));
    assert!(matches!(store.set_password(None, "p2"), Err(StoreError::AuthFailure)));

    store.set_password(Some("p1"), "p2").unwrap();
    store.save().unwrap();

    let mut reopened = fx.open();
    assert!(matches!(reopened.set_password(Some("p1"), "p3"), Err(StoreError::AuthFailure)));
    reopened.set_password(Some("p2"), "p3").unwrap();
}

#[test]
fn test_empty_password_is_rejected() {
    let fx = Fixture::new();
    let mut store = fx.open();
    assert!(matches!(store.set_password(None, ""), Err(StoreError::InvalidArgument(_))));
    assert!(!store.has_password());
}

#[test]
fn test_config_is_enciphered_with_identity_key() {
    let fx = Fixture::new();
    let mut store = fx.open();
    store.set_password(None, "hunter2").unwrap();
    store.save().unwrap();

    let raw = fs::read(fx.layout().config_file()).unwrap();
    assert!(!String::from_utf8_lossy(&raw).contains("hunter2"));

    let key = derive("test-machine", 1024).unwrap();
    let settings: Settings = serde_json::from_slice(&transform(&raw, &key)).unwrap();
    assert_eq!(settings.pw.as_deref(), Some("hunter2"));
}

#[test]
fn test_records_use_password_key_once_set() {
    let fx = Fixture::new();
    let file = fx.user_file("a.txt", "a");
    let mut store = fx.open();
    store.set_password(None, "pw").unwrap();
    store.tag(&file, TagMode::Add, &["x"]).unwrap();

    let raw = fs::read(location::file_record_path(&file).unwrap()).unwrap();
    let key = derive("pw", 1024).unwrap();
    let plain: serde_json::Value = serde_json::from_slice(&transform(&raw, &key)).unwrap();
    assert_eq!(plain["tags"][0], "x");
}

#[test]
fn test_save_after_password_change_rekeys_all_records() {
    let fx = Fixture::new();
    let file = fx.user_file("d/a.txt", "a");
    let dir = fx.user_subdir("d");
    {
        let mut store = fx.open();
        store.tag(&file, TagMode::Add, &["file"]).unwrap();
        store.tag(&dir, TagMode::Add, &["dir"]).unwrap();
        store.save().unwrap();

        store.set_password(None, "fresh").unwrap();
        assert!(store.rekey_pending());
        store.save().unwrap();
        assert!(!store.rekey_pending());
    }

    let store = fx.open();
    assert_eq!(store.filter(FilterMode::Any, &["file"]), vec![p(&file)]);
    assert!(store.record(&dir).unwrap().tags().contains("dir"));
}

#[test]
fn test_unsaved_password_change_is_discarded() {
    let fx = Fixture::new();
    let file = fx.user_file("a.txt", "a");
    {
        let mut store = fx.open();
        store.set_password(None, "first").unwrap();
        store.tag(&file, TagMode::Add, &["x"]).unwrap();
        store.save().unwrap();
        store.set_password(Some("first"), "second").unwrap();
        // Dropped without saving.
    }
    let mut store = fx.open();
    assert_eq!(store.filter(FilterMode::Any, &["x"]), vec![p(&file)]);
    assert!(matches!(store.set_password(Some("second"), "third"), Err(StoreError::AuthFailure)));
}

#[test]
fn test_mutation_after_unsaved_password_change_leaves_record_undecodable() {
    let fx = Fixture::new();
    let file = fx.user_file("a.txt", "a");
    let record_file = location::file_record_path(&file).unwrap();
    {
        let mut store = fx.open();
        store.set_password(None, "first").unwrap();
        store.tag(&file, TagMode::Add, &["before"]).unwrap();
        store.save().unwrap();

        store.set_password(Some("first"), "second").unwrap();
        // Written immediately with the new key while the config on disk still says "first".
        store.tag(&file, TagMode::Add, &["x"]).unwrap();
    }

    let store = fx.open();
    assert!(store.filter(FilterMode::Any, &["before", "x"]).is_empty());
    assert!(crate::utils::fs::undecodable_sibling(&record_file).is_file());
}

#[test]
fn test_record_undecodable_with_wrong_key_is_preserved() {
    let fx = Fixture::new();
    let file = fx.user_file("a.txt", "a");
    let record_file = location::file_record_path(&file).unwrap();
    {
        let mut store = fx.open();
        store.tag(&file, TagMode::Add, &["x"]).unwrap();
    }
    let original = fs::read(&record_file).unwrap();
    // Re-encipher the record under a key the store will not use.
    let identity = derive("test-machine", 1024).unwrap();
    let other = derive("someone-else", 1024).unwrap();
    fs::write(&record_file, transform(&transform(&original, &identity), &other)).unwrap();
    let foreign = fs::read(&record_file).unwrap();

    let mut store = fx.open();
    store.tag(&file, TagMode::Add, &["y"]).unwrap();

    let preserved = crate::utils::fs::undecodable_sibling(&record_file);
    assert_eq!(fs::read(preserved).unwrap(), foreign);
    let tags: Vec<_> = store.record(&file).unwrap().tags().iter().cloned().collect();
    assert_eq!(tags, vec!["y".to_string()]);
}

#[test]
fn test_recovery_seed_opens_config_after_identity_change() {
    let fx = Fixture::new();
    {
        let mut store = fx.open();
        store.set_password(None, "pw").unwrap();
        store.save().unwrap();
    }

    // Same store, different machine identity.
    let moved = crate::store::Store::open(
        fx.layout(),
        crate::identity::StaticIdentity::new("new-machine"),
        None,
    )
    .unwrap();
    assert!(!moved.has_password());

    let mut recovered = crate::store::Store::open(
        fx.layout(),
        crate::identity::StaticIdentity::new("new-machine"),
        Some("test-machine"),
    )
    .unwrap();
    assert!(recovered.has_password());
    recovered.save().unwrap();

    // The config is now bound to the new identity.
    let again = crate::store::Store::open(
        fx.layout(),
        crate::identity::StaticIdentity::new("new-machine"),
        None,
    )
    .unwrap();
    assert!(again.has_password());
}

#[test]
fn test_save_under_new_identity_keeps_config_recoverable() {
    let fx = Fixture::new();
    let file = fx.user_file("a.txt", "a");
    {
        let mut store = fx.open();
        store.set_password(None, "pw").unwrap();
        store.tag(&file, TagMode::Add, &["keep"]).unwrap();
        store.save().unwrap();
    }
    let config = fx.layout().config_file();
    let record_file = location::file_record_path(&file).unwrap();
    let original_config = fs::read(&config).unwrap();
    let original_record = fs::read(&record_file).unwrap();

    // Opened and saved twice under the new identity before anyone notices.
    for _ in 0..2 {
        let mut moved = crate::store::Store::open(
            fx.layout(),
            crate::identity::StaticIdentity::new("new-machine"),
            None,
        )
        .unwrap();
        assert!(!moved.has_password());
        moved.save().unwrap();
    }
    assert_eq!(fs::read(&config).unwrap(), original_config);
    assert_eq!(fs::read(&record_file).unwrap(), original_record);

    let recovered = crate::store::Store::open(
        fx.layout(),
        crate::identity::StaticIdentity::new("new-machine"),
        Some("test-machine"),
    )
    .unwrap();
    assert!(recovered.has_password());
    assert_eq!(recovered.filter(FilterMode::Any, &["keep"]), vec![p(&file)]);
}

#[test]
fn test_new_password_replaces_undecodable_config() {
    let fx = Fixture::new();
    {
        let mut store = fx.open();
        store.set_password(None, "old").unwrap();
        store.save().unwrap();
    }
    let original_config = fs::read(fx.layout().config_file()).unwrap();

    let mut moved = crate::store::Store::open(
        fx.layout(),
        crate::identity::StaticIdentity::new("new-machine"),
        None,
    )
    .unwrap();
    moved.set_password(None, "fresh").unwrap();
    moved.save().unwrap();

    let raw = fs::read(fx.layout().config_file()).unwrap();
    let settings: Settings = serde_json::from_slice(&transform(&raw, &derive("new-machine", 1024).unwrap())).unwrap();
    assert_eq!(settings.pw.as_deref(), Some("fresh"));
    let preserved = crate::utils::fs::undecodable_sibling(&fx.layout().config_file());
    assert_eq!(fs::read(preserved).unwrap(), original_config);
}
