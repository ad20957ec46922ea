//! Schema instrumentation: declarative role enforcement installed at build
//! time.
//!
//! At build time the registry walks every type and, through the
//! interceptor, replaces the resolution capabilities of fields the scanner
//! reports as protected with guarded versions bound to their effective role.
//! At request time the installed wrapper consults the execution guard with
//! the request's auth context and either delegates to the original
//! capability or fails the field, never both.

pub mod guard;
pub mod roles;
pub mod scanner;

mod interceptor;
mod registry;

use std::sync::Arc;

use tracing::info;

use crate::config::AuthzConfig;
use crate::schema::Schema;

pub use guard::{Access, ExecutionGuard};
pub use roles::{effective_role, RoleTable};

/// Instrument `schema` with the default settings.
pub fn instrument(schema: Schema) -> Schema {
    instrument_with(schema, &AuthzConfig::default())
}

/// Install authorization guards on every protected field of `schema`.
///
/// Invoked once by the schema builder before serving begins; all mutation
/// happens here, in the single-threaded build phase. Idempotent: types
/// already carrying guards are left alone, so calling this again on the
/// result changes nothing.
pub fn instrument_with(mut schema: Schema, config: &AuthzConfig) -> Schema {
    let table = RoleTable::build(&schema, config.baseline_role.clone());
    let guard = Arc::new(ExecutionGuard::new(config.baseline_role.clone()));

    let mut wrapped = 0;
    for ty in schema.types_mut() {
        wrapped += registry::ensure_instrumented(ty, &table, &guard);
    }

    info!(
        types = schema.len(),
        fields = wrapped,
        baseline = %config.baseline_role,
        "authorization instrumentation complete"
    );
    schema
}
