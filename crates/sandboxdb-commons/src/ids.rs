//! Type-safe identifier wrappers.
//!
//! A `WorkspaceId` can only be obtained through [`WorkspaceId::parse`], and a
//! [`Namespace`] can only be derived from a `WorkspaceId`, so any namespace
//! name reaching the engine is injection-safe by construction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix for all live namespace names. One namespace per workspace; the
/// namespace is the sole isolation boundary between tenants.
pub const NAMESPACE_PREFIX: &str = "workspace_";

/// Error returned when a caller-supplied identifier fails validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Identifier was empty or missing.
    Empty,
    /// Identifier contained a character outside `[A-Za-z0-9_]`.
    InvalidCharacter(char),
}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierError::Empty => write!(f, "workspace id is required"),
            IdentifierError::InvalidCharacter(c) => {
                write!(f, "invalid character {:?} in workspace id", c)
            }
        }
    }
}

impl std::error::Error for IdentifierError {}

/// Trait for keys that can address an entity in the document store.
pub trait StorageKey {
    /// Byte representation used as the storage key.
    fn storage_key(&self) -> Vec<u8>;
}

/// Validated workspace identifier.
///
/// Accepts only `[A-Za-z0-9_]+`. Everything else - empty values, quotes,
/// semicolons, whitespace - is rejected before any engine or store call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceId(String);

impl WorkspaceId {
    /// Validates and wraps a caller-supplied identifier.
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        if raw.is_empty() {
            return Err(IdentifierError::Empty);
        }
        if let Some(c) = raw.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '_') {
            return Err(IdentifierError::InvalidCharacter(c));
        }
        Ok(Self(raw.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for WorkspaceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl StorageKey for WorkspaceId {
    fn storage_key(&self) -> Vec<u8> {
        self.0.as_bytes().to_vec()
    }
}

/// Live namespace name, derived deterministically from a validated
/// [`WorkspaceId`] (`workspace_<id>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    /// Derives the namespace for a workspace.
    pub fn for_workspace(id: &WorkspaceId) -> Self {
        Self(format!("{}{}", NAMESPACE_PREFIX, id.as_str()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
