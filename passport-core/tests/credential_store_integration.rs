//! End-to-end credential box flows over the bundled substrates.

mod common;

use std::sync::Arc;

use passport_core::credentials::documents::{
    CredentialDocument, CredentialStatus, DocumentKind, EducationCredential,
};
use passport_core::credentials::{codec, CredentialEntry, CredentialError, CredentialStore, EntityId};
use passport_core::dispatch::{Call, Dispatcher, Outcome};
use passport_core::platform::{BoxStore, FileBoxStore, MemoryBoxStore, StorageError};
use test_case::test_case;

const ASSET: EntityId = EntityId::new(744_102_318);

#[test]
fn test_storage_flow_end_to_end() {
    let (boxes, store) = common::recording_store();

    store.view(ASSET).expect_err("absent before first add");
    store.add(ASSET, &"a".into()).expect("add");
    store.add(ASSET, &"b".into()).expect("add");
    store.add(ASSET, &"c".into()).expect("add");
    assert_eq!(common::texts(&store, ASSET), vec!["a", "b", "c"]);

    store.modify(ASSET, 1, "B".into()).expect("modify");
    assert_eq!(common::texts(&store, ASSET), vec!["a", "B", "c"]);

    store.delete(ASSET, 0).expect("delete");
    store.delete(ASSET, 0).expect("delete");
    assert_eq!(common::texts(&store, ASSET), vec!["c"]);

    store.delete(ASSET, 0).expect("delete");
    store.view(ASSET).expect("empty record still present");
    assert!(store.read(ASSET).expect("read").is_empty());

    assert_eq!(boxes.writes(), 7);
}

#[test_case(Call::new("addCredential", ASSET) ; "add without entry")]
#[test_case(Call::new("addCredential", ASSET).arg("a").arg("b") ; "add with two entries")]
#[test_case(Call::new("viewCredentials", ASSET).arg("a") ; "view with argument")]
#[test_case(Call::new("modifyCredential", ASSET).index_arg(0) ; "modify missing entry")]
#[test_case(Call::new("modifyCredential", ASSET).index_arg(0).arg("a").arg("b") ; "modify extra argument")]
#[test_case(Call::new("deleteCredential", ASSET) ; "delete missing index")]
#[test_case(Call::new("purgeCredentials", ASSET) ; "unknown operation")]
fn test_rejected_before_touching_store(call: Call) {
    let (boxes, store) = common::recording_store();
    let dispatcher = Dispatcher::new(store);

    let outcome = dispatcher.dispatch(&call);

    assert!(matches!(
        outcome,
        Outcome::Reject(CredentialError::ArgumentCount { .. } | CredentialError::UnknownOperation(_))
    ));
    assert_eq!(boxes.reads(), 0);
    assert_eq!(boxes.writes(), 0);
}

#[test_case(Call::new("modifyCredential", ASSET).index_arg(3).arg("x") ; "modify past end")]
#[test_case(Call::new("deleteCredential", ASSET).index_arg(u64::MAX) ; "delete far past end")]
#[test_case(Call::new("deleteCredential", ASSET).arg(vec![0u8; 9]) ; "oversized index")]
#[test_case(Call::new("modifyCredential", EntityId::new(1)).index_arg(0).arg("x") ; "modify other asset")]
#[test_case(Call::new("viewCredentials", EntityId::new(1)) ; "view other asset")]
#[test_case(Call::new("addCredential", ASSET).arg("a") ; "add")]
fn test_rejection_leaves_record_identical(call: Call) {
    let (boxes, store) = common::recording_store();
    for entry in ["a", "b", "c"] {
        store.add(ASSET, &entry.into()).expect("seed");
    }
    let before = store.read_raw(ASSET).expect("raw");
    let writes = boxes.writes();

    // The plain add case only rejects because writes fail.
    boxes.fail_writes(true);
    let outcome = Dispatcher::new(store.clone()).dispatch(&call);
    boxes.fail_writes(false);

    assert!(!outcome.is_approved(), "{outcome:?}");
    assert_eq!(store.read_raw(ASSET).expect("raw"), before);
    assert_eq!(boxes.writes(), writes);
}

#[test]
fn test_storage_failure_surfaces_as_storage_error() {
    let (boxes, store) = common::recording_store();
    boxes.fail_writes(true);
    match store.add(ASSET, &"a".into()) {
        Err(CredentialError::Storage(StorageError::Io { context, .. })) => {
            assert_eq!(context, "injected write failure");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!store.exists(ASSET).expect("exists"));
}

#[test]
fn test_box_size_limit_stops_growth() {
    let boxes = Arc::new(MemoryBoxStore::with_max_box_size(32));
    let store = CredentialStore::new(boxes.clone());

    // Each 12-byte entry takes a 16-byte frame.
    store.add(ASSET, &"0123456789ab".into()).expect("first");
    store.add(ASSET, &"0123456789ab".into()).expect("second");
    let err = store.add(ASSET, &"x".into()).expect_err("third overflows");
    assert!(matches!(
        err,
        CredentialError::Storage(StorageError::BoxTooLarge { size: 37, limit: 32 })
    ));
    assert_eq!(store.read(ASSET).expect("read").len(), 2);
}

#[test]
fn test_entries_with_commas_keep_boundaries() {
    let (_, store) = common::recording_store();
    let first = r#"{"company":"Acme, Inc.","role":"Engineer, Senior"}"#;
    store.add(ASSET, &first.into()).expect("add");
    store.add(ASSET, &",".into()).expect("add");
    store.add(ASSET, &"".into()).expect("add");

    assert_eq!(common::texts(&store, ASSET), vec![first, ",", ""]);
    store.modify(ASSET, 2, "filled".into()).expect("modify");
    assert_eq!(common::texts(&store, ASSET), vec![first, ",", "filled"]);
}

#[test]
fn test_raw_record_matches_codec() {
    let (_, store) = common::recording_store();
    store.add(ASSET, &"a".into()).expect("add");
    store.add(ASSET, &"bc".into()).expect("add");

    let raw = store.read_raw(ASSET).expect("raw").expect("present");
    assert_eq!(raw, vec![0, 0, 0, 1, b'a', 0, 0, 0, 2, b'b', b'c']);
    assert_eq!(codec::decode(&raw).expect("decode"), store.read(ASSET).expect("read"));

    let key = store.key(ASSET);
    assert!(key.as_bytes().starts_with(b"credentials-"));
}

#[test]
fn test_file_store_persists_between_handles() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let store = CredentialStore::new(Arc::new(FileBoxStore::new(dir.path()).expect("open")));
        store.add(ASSET, &"first".into()).expect("add");
        store.add(ASSET, &"second".into()).expect("add");
    }

    let boxes = Arc::new(FileBoxStore::new(dir.path()).expect("reopen"));
    let store = CredentialStore::new(boxes.clone());
    store.delete(ASSET, 0).expect("delete");
    assert_eq!(common::texts(&store, ASSET), vec!["second"]);
    assert!(boxes
        .exists(store.key(ASSET).as_bytes())
        .expect("exists"));
}

#[test]
fn test_documents_stored_as_entries() {
    let (_, store) = common::recording_store();
    let doc = CredentialDocument::Education(EducationCredential {
        credential_id: DocumentKind::Education.credential_id(1_718_000_000_000, 3),
        student_name: "Grace Hopper".to_string(),
        student_id: "S-9".to_string(),
        degree: "PhD".to_string(),
        major: "Mathematics".to_string(),
        institution: "Yale".to_string(),
        start_date: "1930-09-01".to_string(),
        end_date: Some("1934-06-01".to_string()),
        reference_id: None,
        credential_proof: None,
        notes: Some("Thesis on irreducible polynomials, with honors".to_string()),
        version: Some("1.0".to_string()),
        image: None,
        status: CredentialStatus::from_end_date(Some("1934-06-01")),
        issue_date: "2024-06-10".to_string(),
        extra: serde_json::Map::new(),
    });

    let entry = doc.to_entry().expect("entry");
    store.add(ASSET, &entry).expect("add");
    store.add(ASSET, &CredentialEntry::from("not json")).expect("opaque add");

    let list = store.read(ASSET).expect("read");
    let parsed = CredentialDocument::from_entry(list.get(0).expect("first")).expect("parse");
    assert_eq!(parsed, doc);
    assert_eq!(parsed.status(), CredentialStatus::Closed);
    assert_eq!(list.get(0).expect("first").content_hash(), entry.content_hash());
    assert!(CredentialDocument::from_entry(list.get(1).expect("second")).is_err());
}

#[test]
fn test_assets_have_separate_boxes() {
    let boxes = Arc::new(MemoryBoxStore::new());
    let store = CredentialStore::new(boxes.clone());
    for id in [1, 2, 256] {
        store
            .add(EntityId::new(id), &format!("asset-{id}").into())
            .expect("add");
    }
    assert_eq!(boxes.len().expect("len"), 3);
    assert_eq!(common::texts(&store, EntityId::new(256)), vec!["asset-256"]);
}
