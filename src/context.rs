//! Per-request authentication context.
//!
//! Produced by the upstream authentication middleware once the transport
//! credentials have been validated. This crate never authenticates; it only
//! reads the already-resolved identity.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::Role;

/// Authenticated principal attached to a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: Uuid,
    /// Roles explicitly granted to this principal. The baseline role is not
    /// stored here; the execution guard injects it at check time.
    pub grants: HashSet<Role>,
}

impl Identity {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            grants: HashSet::new(),
        }
    }

    pub fn with_grants<I>(user_id: Uuid, grants: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Role>,
    {
        Self {
            user_id,
            grants: grants.into_iter().map(Into::into).collect(),
        }
    }

    pub fn grant(mut self, role: impl Into<Role>) -> Self {
        self.grants.insert(role.into());
        self
    }
}

/// Request-scoped view of who is calling.
///
/// Created fresh for every request and discarded with it; never shared
/// across requests.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    identity: Option<Identity>,
}

impl AuthContext {
    /// Context for a request that presented no valid credentials.
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}
