//! Read-only scan of declared protection metadata.
//!
//! Pure functions over the schema model; no side effects, stable across
//! repeated calls for the same schema.

use crate::role::Role;
use crate::schema::{FieldDef, TypeDef};

/// Role bound on the type itself, if any.
pub fn required_role_of_type(ty: &TypeDef) -> Option<&Role> {
    ty.protection().role()
}

/// Role bound on the field itself, if any.
pub fn required_role_of_field(field: &FieldDef) -> Option<&Role> {
    field.protection().role()
}

/// A field is protected when it or its owning type carries a marker.
pub fn is_protected(ty: &TypeDef, field: &FieldDef) -> bool {
    field.protection().is_guarded() || ty.protection().is_guarded()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDef;
    use serde_json::Value;

    fn open_field(name: &str) -> FieldDef {
        FieldDef::new(name, |_| async { Ok(Value::Null) })
    }

    #[test]
    fn open_type_and_field_are_unprotected() {
        let field = open_field("title");
        let ty = TypeDef::new("Report");
        assert!(!is_protected(&ty, &field));
        assert!(required_role_of_type(&ty).is_none());
        assert!(required_role_of_field(&field).is_none());
    }

    #[test]
    fn type_marker_protects_every_field() {
        let field = open_field("title");
        let ty = TypeDef::new("SensitiveReport").require("ADMIN");
        assert!(is_protected(&ty, &field));
        assert_eq!(required_role_of_type(&ty).map(Role::as_str), Some("ADMIN"));
    }

    #[test]
    fn field_marker_protects_on_open_type() {
        let field = open_field("internalNotes").require("ANALYST");
        let ty = TypeDef::new("Report");
        assert!(is_protected(&ty, &field));
        assert_eq!(
            required_role_of_field(&field).map(Role::as_str),
            Some("ANALYST")
        );
    }

    #[test]
    fn marker_without_role_still_protects() {
        let field = open_field("title").guarded();
        let ty = TypeDef::new("Report");
        assert!(is_protected(&ty, &field));
        assert!(required_role_of_field(&field).is_none());
    }
}
