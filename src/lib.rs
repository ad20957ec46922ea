//! Role-based field authorization for graph-shaped API schemas.
//!
//! Provides a single schema transformation, [`instrument`], that installs
//! guarded wrappers on protected fields at build time:
//! - Per-field role bindings override per-type bindings, which override a
//!   configurable baseline
//! - Each type is instrumented exactly once, however often the build
//!   revisits it
//! - Value resolvers and subscription establishment are wrapped uniformly
//! - Denial fails closed with one opaque error kind, whether the caller was
//!   unauthenticated or under-privileged
//!
//! Unprotected fields are never touched: no wrapper, no overhead, no
//! behavior change.

pub mod authz;
pub mod config;
pub mod context;
pub mod error;
pub mod role;
pub mod schema;

pub use authz::{instrument, instrument_with, Access, ExecutionGuard, RoleTable};
pub use config::AuthzConfig;
pub use context::{AuthContext, Identity};
pub use error::{FieldError, FieldResult};
pub use role::{Protection, Role};
pub use schema::resolver::{FieldRef, FieldStream, ResolverContext};
pub use schema::{FieldDef, Schema, TypeDef};
