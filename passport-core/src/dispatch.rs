//! Routing of application calls to credential store operations.
//!
//! A call names an operation, the passport asset, and positional byte-string
//! arguments (the operation name itself excluded):
//!
//! | operation          | arguments              |
//! |--------------------|------------------------|
//! | `addCredential`    | entry                  |
//! | `viewCredentials`  | none                   |
//! | `modifyCredential` | index, entry           |
//! | `deleteCredential` | index                  |
//!
//! Indices are unsigned big-endian integers of at most 8 bytes; the empty
//! byte string is index 0. Unknown operations and wrong argument counts are
//! rejected before the box store is touched.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::credentials::{
    CredentialEntry, CredentialError, CredentialResult, CredentialStore, EntityId,
};

/// Operations accepted by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum Operation {
    /// Append one entry.
    AddCredential,
    /// Existence gate on the asset's record.
    ViewCredentials,
    /// Replace the entry at an index.
    ModifyCredential,
    /// Remove the entry at an index.
    DeleteCredential,
}

impl Operation {
    /// Wire name of the operation.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Number of arguments the operation takes, excluding its name.
    #[must_use]
    pub const fn arg_count(self) -> usize {
        match self {
            Self::ViewCredentials => 0,
            Self::AddCredential | Self::DeleteCredential => 1,
            Self::ModifyCredential => 2,
        }
    }

    /// Parses a wire name.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::UnknownOperation`] for any other name.
    pub fn from_wire(name: &[u8]) -> CredentialResult<Self> {
        std::str::from_utf8(name)
            .ok()
            .and_then(|name| name.parse().ok())
            .ok_or_else(|| {
                CredentialError::UnknownOperation(String::from_utf8_lossy(name).into_owned())
            })
    }
}

/// One application call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Operation name as received.
    pub operation: Vec<u8>,
    /// Passport asset the call targets.
    pub entity_id: EntityId,
    /// Positional arguments after the operation name.
    pub args: Vec<Vec<u8>>,
}

impl Call {
    /// Creates a call without arguments.
    #[must_use]
    pub fn new(operation: impl Into<Vec<u8>>, entity_id: EntityId) -> Self {
        Self {
            operation: operation.into(),
            entity_id,
            args: Vec::new(),
        }
    }

    /// Appends a positional argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<Vec<u8>>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends an index argument in its 8-byte big-endian form.
    #[must_use]
    pub fn index_arg(self, index: u64) -> Self {
        self.arg(encode_index(index))
    }
}

/// Terminal result of a call.
#[derive(Debug)]
pub enum Outcome {
    /// The operation succeeded and its write, if any, is committed.
    Approve,
    /// A precondition failed; nothing was written.
    Reject(CredentialError),
}

impl Outcome {
    /// Returns `true` for [`Outcome::Approve`].
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        matches!(self, Self::Approve)
    }

    /// Converts the outcome back into a result.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason.
    pub fn into_result(self) -> CredentialResult<()> {
        match self {
            Self::Approve => Ok(()),
            Self::Reject(err) => Err(err),
        }
    }
}

impl From<CredentialResult<()>> for Outcome {
    fn from(result: CredentialResult<()>) -> Self {
        match result {
            Ok(()) => Self::Approve,
            Err(err) => Self::Reject(err),
        }
    }
}

/// Encodes an index as an 8-byte big-endian argument.
#[must_use]
pub fn encode_index(index: u64) -> Vec<u8> {
    index.to_be_bytes().to_vec()
}

/// Parses an index argument: an unsigned big-endian integer of 0 to 8 bytes.
///
/// # Errors
///
/// Returns [`CredentialError::InvalidIndex`] if the argument is longer than 8
/// bytes.
pub fn parse_index(arg: &[u8]) -> CredentialResult<u64> {
    if arg.len() > 8 {
        return Err(CredentialError::InvalidIndex(format!(
            "{} bytes, at most 8 allowed",
            arg.len()
        )));
    }
    Ok(arg
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte)))
}

/// Routes calls to a [`CredentialStore`].
#[derive(Debug, Clone)]
pub struct Dispatcher {
    store: CredentialStore,
}

impl Dispatcher {
    /// Creates a dispatcher over `store`.
    #[must_use]
    pub const fn new(store: CredentialStore) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Executes `call` and resolves it to approve or reject.
    #[must_use]
    pub fn dispatch(&self, call: &Call) -> Outcome {
        let outcome = Outcome::from(self.execute(call));
        match &outcome {
            Outcome::Approve => log::info!(
                "approved {} for asset {}",
                String::from_utf8_lossy(&call.operation),
                call.entity_id
            ),
            Outcome::Reject(err) => log::warn!(
                "rejected {} for asset {}: {err}",
                String::from_utf8_lossy(&call.operation),
                call.entity_id
            ),
        }
        outcome
    }

    fn execute(&self, call: &Call) -> CredentialResult<()> {
        let operation = Operation::from_wire(&call.operation)?;
        log::debug!("dispatching {operation} for asset {}", call.entity_id);

        let entity_id = call.entity_id;
        match (operation, call.args.as_slice()) {
            (Operation::AddCredential, [entry]) => {
                self.store.add(entity_id, &CredentialEntry::from(entry.as_slice()))
            }
            (Operation::ViewCredentials, []) => self.store.view(entity_id),
            (Operation::ModifyCredential, [index, entry]) => self.store.modify(
                entity_id,
                parse_index(index)?,
                CredentialEntry::from(entry.as_slice()),
            ),
            (Operation::DeleteCredential, [index]) => {
                self.store.delete(entity_id, parse_index(index)?)
            }
            (operation, args) => Err(CredentialError::ArgumentCount {
                operation: operation.name(),
                expected: operation.arg_count(),
                found: args.len(),
            }),
        }
    }
}
