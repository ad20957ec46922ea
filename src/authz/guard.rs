//! Runtime admission check for protected fields.

use crate::context::AuthContext;
use crate::role::Role;

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

/// Stateless gate evaluated before a protected field is resolved.
///
/// Reentrant and safe to share across arbitrarily many concurrent requests;
/// the only state is the baseline role, fixed at build time. The check never
/// performs I/O and never suspends.
#[derive(Debug, Clone)]
pub struct ExecutionGuard {
    baseline: Role,
}

impl ExecutionGuard {
    pub fn new(baseline: Role) -> Self {
        Self { baseline }
    }

    pub fn baseline(&self) -> &Role {
        &self.baseline
    }

    /// Decide whether the caller may resolve a field requiring `required`.
    ///
    /// Unauthenticated callers are denied outright. Authenticated callers
    /// are matched against their granted set plus the baseline; membership
    /// is flat, so holding an elevated role never satisfies a different one.
    pub fn check(&self, ctx: &AuthContext, required: &Role) -> Access {
        let identity = match ctx.identity() {
            Some(identity) => identity,
            None => return Access::Deny,
        };

        if *required == self.baseline || identity.grants.contains(required) {
            Access::Allow
        } else {
            Access::Deny
        }
    }
}
