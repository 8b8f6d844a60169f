//! Binary encoding of a credential list into one box value.
//!
//! A record is a sequence of frames, one per entry, in list order:
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  -----
//! 0       4     entry_len (u32 BE)
//! 4       N     entry bytes
//! 4+N     ...   next frame
//! ```
//!
//! The empty list encodes to the empty byte string. Entries may contain any
//! byte, so there is no delimiter to escape. Appending an entry is the same as
//! concatenating its frame onto the existing record.

use super::error::{CredentialError, CredentialResult};
use super::types::{CredentialEntry, CredentialList};

/// Size of the length header preceding each entry.
pub const FRAME_HEADER_SIZE: usize = 4;

/// Encodes a single entry as one frame.
///
/// # Errors
///
/// Returns [`CredentialError::EntryTooLarge`] if the entry does not fit a
/// 32-bit length.
pub fn encode_entry(entry: &CredentialEntry) -> CredentialResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(FRAME_HEADER_SIZE + entry.len());
    write_frame(&mut buf, entry)?;
    Ok(buf)
}

/// Encodes a list into a record.
///
/// # Errors
///
/// Returns [`CredentialError::EntryTooLarge`] if any entry does not fit a
/// 32-bit length.
pub fn encode(list: &CredentialList) -> CredentialResult<Vec<u8>> {
    let total: usize = list
        .iter()
        .map(|entry| FRAME_HEADER_SIZE + entry.len())
        .sum();
    let mut buf = Vec::with_capacity(total);
    for entry in list {
        write_frame(&mut buf, entry)?;
    }
    Ok(buf)
}

/// Decodes a record into a list.
///
/// # Errors
///
/// Returns [`CredentialError::Decode`] if a frame header or body is cut short.
pub fn decode(record: &[u8]) -> CredentialResult<CredentialList> {
    let mut entries = Vec::new();
    let mut rest = record;

    while !rest.is_empty() {
        let offset = record.len() - rest.len();
        let Some((header, body)) = rest.split_first_chunk::<FRAME_HEADER_SIZE>() else {
            return Err(CredentialError::Decode(format!(
                "truncated frame header at offset {offset}: {} byte(s) left",
                rest.len()
            )));
        };
        let len = u32::from_be_bytes(*header) as usize;
        if body.len() < len {
            return Err(CredentialError::Decode(format!(
                "frame at offset {offset} declares {len} byte(s), {} available",
                body.len()
            )));
        }
        let (entry, tail) = body.split_at(len);
        entries.push(CredentialEntry::from(entry));
        rest = tail;
    }

    Ok(CredentialList::from(entries))
}

fn write_frame(buf: &mut Vec<u8>, entry: &CredentialEntry) -> CredentialResult<()> {
    let len = u32::try_from(entry.len())
        .map_err(|_| CredentialError::EntryTooLarge { len: entry.len() })?;
    buf.extend_from_slice(&len.to_be_bytes());
    buf.extend_from_slice(entry.as_bytes());
    Ok(())
}
