//! Log output seen by a host logger during dispatched calls.

use std::sync::{Arc, Mutex};

use passport_core::credentials::{CredentialStore, EntityId};
use passport_core::dispatch::{Call, Dispatcher};
use passport_core::logger::{set_logger, LogLevel, Logger};
use passport_core::platform::MemoryBoxStore;

#[derive(Default)]
struct CapturingLogger {
    records: Mutex<Vec<(LogLevel, String)>>,
}

impl CapturingLogger {
    fn warnings(&self) -> Vec<String> {
        self.records
            .lock()
            .expect("lock")
            .iter()
            .filter(|(level, _)| *level == LogLevel::Warn)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Logger for CapturingLogger {
    fn log(&self, level: LogLevel, message: String) {
        self.records.lock().expect("lock").push((level, message));
    }
}

#[test]
fn test_rejected_call_warns_once() {
    let logger = Arc::new(CapturingLogger::default());
    set_logger(logger.clone());

    let asset = EntityId::new(31_337);
    let dispatcher = Dispatcher::new(CredentialStore::new(Arc::new(MemoryBoxStore::new())));
    assert!(dispatcher
        .dispatch(&Call::new("addCredential", asset).arg("a"))
        .is_approved());
    assert!(!dispatcher
        .dispatch(&Call::new("modifyCredential", asset).index_arg(3).arg("b"))
        .is_approved());
    assert!(!dispatcher
        .dispatch(&Call::new("deleteCredential", asset).index_arg(3))
        .is_approved());

    let warnings = logger.warnings();
    assert_eq!(warnings.len(), 2, "{warnings:?}");
    assert!(warnings[0].contains("modifyCredential"), "{warnings:?}");
    assert!(warnings[1].contains("deleteCredential"), "{warnings:?}");
}
