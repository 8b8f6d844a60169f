//! Storage key derivation for credential boxes.
//!
//! ```text
//! key = "credentials-" || asset_id (8 bytes BE)
//! ```
//!
//! The fixed-width id encoding keeps keys collision-free: two keys share the
//! same length and differ exactly where their ids differ.

use crate::defaults::KEY_PREFIX;

use super::types::{EntityId, StorageKey};

/// Length of every derived key in bytes.
pub const KEY_LEN: usize = KEY_PREFIX.len() + 8;

/// Derives the box key holding the credential record of `entity_id`.
#[must_use]
pub fn derive_key(entity_id: EntityId) -> StorageKey {
    let mut bytes = Vec::with_capacity(KEY_LEN);
    bytes.extend_from_slice(KEY_PREFIX);
    bytes.extend_from_slice(&entity_id.to_be_bytes());
    StorageKey::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let key = derive_key(EntityId::new(1));
        assert_eq!(key.as_bytes().len(), KEY_LEN);
        assert_eq!(&key.as_bytes()[..KEY_PREFIX.len()], b"credentials-");
        assert_eq!(&key.as_bytes()[KEY_PREFIX.len()..], &[0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_key_is_deterministic() {
        let id = EntityId::new(744_102_318);
        assert_eq!(derive_key(id), derive_key(id));
    }

    #[test]
    fn test_distinct_ids_give_distinct_keys() {
        let ids = [0, 1, 255, 256, 65_536, u64::from(u32::MAX), u64::MAX];
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(
                    derive_key(EntityId::new(*a)),
                    derive_key(EntityId::new(*b)),
                    "{a} and {b} collide"
                );
            }
        }
    }

    #[test]
    fn test_hex_rendering() {
        let key = derive_key(EntityId::new(0x2a));
        assert_eq!(
            key.to_string(),
            format!("{}000000000000002a", hex::encode(b"credentials-"))
        );
    }
}
