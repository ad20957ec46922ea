//! Effective-role resolution and the build-time role table.

use std::collections::BTreeMap;

use crate::role::Role;
use crate::schema::{FieldDef, Schema, TypeDef};

use super::scanner;

/// Resolve the single role enforced for `field` on `ty`.
///
/// Priority: the field's own binding, then the owning type's, then the
/// baseline. Total: there is always an answer because the baseline is the
/// floor.
pub fn effective_role(ty: &TypeDef, field: &FieldDef, baseline: &Role) -> Role {
    scanner::required_role_of_field(field)
        .or_else(|| scanner::required_role_of_type(ty))
        .unwrap_or(baseline)
        .clone()
}

/// Immutable mapping from protected field identity to its effective role.
///
/// Built once while the schema is instrumented, during the single-threaded
/// build phase, and never written afterwards, so request handling reads it
/// without coordination.
#[derive(Debug, Clone)]
pub struct RoleTable {
    baseline: Role,
    entries: BTreeMap<(String, String), Role>,
}

impl RoleTable {
    pub fn build(schema: &Schema, baseline: Role) -> Self {
        let mut entries = BTreeMap::new();
        for ty in schema.types() {
            for field in ty.fields() {
                if scanner::is_protected(ty, field) {
                    entries.insert(
                        (ty.name().to_string(), field.name().to_string()),
                        effective_role(ty, field, &baseline),
                    );
                }
            }
        }
        Self { baseline, entries }
    }

    /// Effective role for a field. Unknown fields get the baseline: lookups
    /// never come back empty, they come back at the floor.
    pub fn effective(&self, type_name: &str, field_name: &str) -> &Role {
        self.entries
            .get(&(type_name.to_string(), field_name.to_string()))
            .unwrap_or(&self.baseline)
    }

    pub fn baseline(&self) -> &Role {
        &self.baseline
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn field(name: &str) -> FieldDef {
        FieldDef::new(name, |_| async { Ok(Value::Null) })
    }

    fn baseline() -> Role {
        Role::new("USER")
    }

    #[test]
    fn field_binding_wins_over_type_binding() {
        let ty = TypeDef::new("Report").require("ADMIN");
        let f = field("internalNotes").require("ANALYST");
        assert_eq!(effective_role(&ty, &f, &baseline()), Role::new("ANALYST"));
    }

    #[test]
    fn type_binding_applies_when_field_is_silent() {
        let ty = TypeDef::new("SensitiveReport").require("ADMIN");
        let f = field("title");
        assert_eq!(effective_role(&ty, &f, &baseline()), Role::new("ADMIN"));
    }

    #[test]
    fn baseline_is_the_floor() {
        let ty = TypeDef::new("Report").guarded();
        let f = field("title");
        assert_eq!(effective_role(&ty, &f, &baseline()), baseline());
    }

    #[test]
    fn table_covers_protected_fields_only() {
        let schema = Schema::new()
            .register(
                TypeDef::new("SensitiveReport")
                    .require("ADMIN")
                    .field(field("title"))
                    .field(field("summary")),
            )
            .register(
                TypeDef::new("Report")
                    .field(field("title"))
                    .field(field("internalNotes").require("ANALYST")),
            );

        let table = RoleTable::build(&schema, baseline());
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.effective("SensitiveReport", "title"),
            &Role::new("ADMIN")
        );
        assert_eq!(
            table.effective("Report", "internalNotes"),
            &Role::new("ANALYST")
        );
    }

    #[test]
    fn unknown_lookup_falls_back_to_baseline() {
        let table = RoleTable::build(&Schema::new(), baseline());
        assert!(table.is_empty());
        assert_eq!(table.effective("Nope", "nothing"), &baseline());
    }
}
