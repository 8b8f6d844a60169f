//! Typed credential documents issued into passport boxes.
//!
//! Issuers produce JSON documents of two kinds, tagged by a `"type"` field.
//! Field names follow the issuing forms, including their mixed casing
//! (`credential_id`, `issue_date` on employment vs `issueDate` on education).
//!
//! The store treats entries as opaque bytes; nothing here is enforced when an
//! entry is written. Keys a form adds beyond the typed fields are kept in
//! `extra` so parsing and re-encoding loses nothing, but key order is not
//! preserved: hash the stored entry ([`CredentialEntry::content_hash`]), not
//! a re-encoded document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

use super::error::{CredentialError, CredentialResult};
use super::types::CredentialEntry;

/// Kind of an issued credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum DocumentKind {
    /// Employment history entry.
    Employment,
    /// Education history entry.
    Education,
}

impl DocumentKind {
    /// Prefix of credential ids of this kind.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Employment => "EMP",
            Self::Education => "EDU",
        }
    }

    /// Builds a credential id such as `EMP-1718000000000-42`.
    #[must_use]
    pub fn credential_id(self, issued_at_millis: u64, nonce: u32) -> String {
        format!("{}-{issued_at_millis}-{nonce}", self.id_prefix())
    }
}

/// Whether the credentialed period has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialStatus {
    /// No end date: still employed or enrolled.
    Open,
    /// An end date is recorded.
    Closed,
}

impl CredentialStatus {
    /// `Closed` when a non-empty end date is present, `Open` otherwise.
    #[must_use]
    pub fn from_end_date(end_date: Option<&str>) -> Self {
        match end_date {
            Some(date) if !date.trim().is_empty() => Self::Closed,
            _ => Self::Open,
        }
    }
}

/// Employment credential issued by a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct EmploymentCredential {
    #[serde(rename = "credential_id")]
    pub credential_id: String,
    pub employee_name: String,
    pub employee_id: String,
    pub employee_wallet: String,
    pub company: String,
    pub role: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_proof: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Snake-case copy of `endDate` written by the employment form.
    #[serde(rename = "end_date", default, skip_serializing_if = "Option::is_none")]
    pub legacy_end_date: Option<String>,
    pub status: CredentialStatus,
    #[serde(rename = "issue_date")]
    pub issue_date: String,
    /// Any other keys, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Education credential issued by an institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct EducationCredential {
    #[serde(rename = "credential_id")]
    pub credential_id: String,
    pub student_name: String,
    pub student_id: String,
    pub degree: String,
    pub major: String,
    pub institution: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_proof: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub status: CredentialStatus,
    pub issue_date: String,
    /// Any other keys, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A credential document of either kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CredentialDocument {
    /// Employment credential.
    Employment(EmploymentCredential),
    /// Education credential.
    Education(EducationCredential),
}

impl CredentialDocument {
    /// Returns the document kind.
    #[must_use]
    pub const fn kind(&self) -> DocumentKind {
        match self {
            Self::Employment(_) => DocumentKind::Employment,
            Self::Education(_) => DocumentKind::Education,
        }
    }

    /// Returns the credential id.
    #[must_use]
    pub fn credential_id(&self) -> &str {
        match self {
            Self::Employment(doc) => &doc.credential_id,
            Self::Education(doc) => &doc.credential_id,
        }
    }

    /// Returns the recorded status.
    #[must_use]
    pub const fn status(&self) -> CredentialStatus {
        match self {
            Self::Employment(doc) => doc.status,
            Self::Education(doc) => doc.status,
        }
    }

    /// Serializes the document to a compact JSON entry.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Document`] if serialization fails.
    pub fn to_entry(&self) -> CredentialResult<CredentialEntry> {
        serde_json::to_vec(self)
            .map(CredentialEntry::from)
            .map_err(|err| CredentialError::Document(err.to_string()))
    }

    /// Parses a document from a stored entry.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Document`] if the entry is not a JSON
    /// document of a known kind.
    pub fn from_entry(entry: &CredentialEntry) -> CredentialResult<Self> {
        serde_json::from_slice(entry.as_bytes())
            .map_err(|err| CredentialError::Document(err.to_string()))
    }
}
