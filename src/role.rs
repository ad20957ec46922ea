//! Role identifiers and declared protection markers.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque role identifier.
///
/// Roles are flat name tokens at this layer: holding one role never implies
/// holding another. Mapping identities to roles is the identity provider's
/// job; this crate only tests membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Role {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Protection declared on a type or on a single field.
///
/// A `Guarded` marker without a role means "inherit": the owning type's
/// binding applies, and failing that the configured baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Protection {
    /// No marker declared; resolution is left untouched.
    #[default]
    Open,
    /// Marker present, optionally binding the role it requires.
    Guarded(Option<Role>),
}

impl Protection {
    pub fn is_guarded(&self) -> bool {
        matches!(self, Protection::Guarded(_))
    }

    /// The explicitly bound role, if the marker carries one.
    pub fn role(&self) -> Option<&Role> {
        match self {
            Protection::Guarded(Some(role)) => Some(role),
            _ => None,
        }
    }
}
