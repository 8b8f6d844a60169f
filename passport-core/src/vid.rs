//! VerifyID (VID) hashing.
//!
//! A VID is a deterministic, non-reversible identifier for a passport holder:
//!
//! ```text
//! vid = hex(SHA256(lower(trim(full_name)) || "|" || dob || "|" || upper(trim(passport_number))))
//! ```

use sha2::{Digest, Sha256};

/// Computes the VID of a passport holder as 64 lowercase hex characters.
///
/// The name is case-folded and the passport number upper-cased so that the
/// same person always maps to the same VID regardless of how the form was
/// typed. The date of birth is used verbatim.
#[must_use]
pub fn generate_vid(full_name: &str, dob: &str, passport_number: &str) -> String {
    let input = format!(
        "{}|{dob}|{}",
        full_name.trim().to_lowercase(),
        passport_number.trim().to_uppercase()
    );
    hex::encode(Sha256::digest(input.as_bytes()))
}
