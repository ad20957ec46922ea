//! Schema object model consumed and transformed by the authorization layer.
//!
//! This is the seam an external schema builder populates and an external
//! execution engine drives: named object types, each holding named fields,
//! each field owning its resolution capability and, for subscription roots,
//! an establishment capability. The model is mutable only while the schema
//! is being built; once instrumented and handed to the serving layer it is
//! read-only and safe to share.

pub mod resolver;

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::FutureExt;
use serde_json::Value;

use crate::error::FieldResult;
use crate::role::{Protection, Role};

use self::resolver::{
    FieldStream, ResolveFuture, Resolver, ResolverContext, SubscribeFuture, Subscriber,
};

/// A single field definition: declared protection plus its capabilities.
#[derive(Clone)]
pub struct FieldDef {
    name: String,
    protection: Protection,
    pub(crate) resolver: Resolver,
    pub(crate) subscriber: Option<Subscriber>,
}

impl FieldDef {
    pub fn new<F, Fut>(name: impl Into<String>, resolver: F) -> Self
    where
        F: Fn(ResolverContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = FieldResult<Value>> + Send + 'static,
    {
        Self {
            name: name.into(),
            protection: Protection::Open,
            resolver: Arc::new(move |ctx| resolver(ctx).boxed()),
            subscriber: None,
        }
    }

    /// Mark the field protected without binding a role; the owning type's
    /// binding applies, falling back to the baseline.
    pub fn guarded(mut self) -> Self {
        self.protection = Protection::Guarded(None);
        self
    }

    /// Mark the field protected and bind the role it requires.
    pub fn require(mut self, role: impl Into<Role>) -> Self {
        self.protection = Protection::Guarded(Some(role.into()));
        self
    }

    /// Attach a subscription establishment capability.
    pub fn with_subscriber<F, Fut>(mut self, subscriber: F) -> Self
    where
        F: Fn(ResolverContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = FieldResult<FieldStream>> + Send + 'static,
    {
        self.subscriber = Some(Arc::new(move |ctx| subscriber(ctx).boxed()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn protection(&self) -> &Protection {
        &self.protection
    }

    pub fn has_subscriber(&self) -> bool {
        self.subscriber.is_some()
    }

    /// Invoke the field's resolution capability.
    pub fn resolve(&self, ctx: ResolverContext) -> ResolveFuture {
        (self.resolver)(ctx)
    }

    /// Invoke the field's subscription establishment capability, if any.
    pub fn subscribe(&self, ctx: ResolverContext) -> Option<SubscribeFuture> {
        self.subscriber.as_ref().map(|subscribe| subscribe(ctx))
    }
}

impl fmt::Debug for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("protection", &self.protection)
            .field("has_subscriber", &self.subscriber.is_some())
            .finish()
    }
}

/// A named object type and its fields.
#[derive(Clone)]
pub struct TypeDef {
    name: String,
    protection: Protection,
    fields: BTreeMap<String, FieldDef>,
    /// Wrap state: set once when the type's fields are instrumented, never
    /// reset. Carried on the type itself so idempotence survives repeated
    /// instrumentation of the same schema value.
    instrumented: bool,
}

impl TypeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            protection: Protection::Open,
            fields: BTreeMap::new(),
            instrumented: false,
        }
    }

    /// Mark every field of this type protected, with no bound role.
    pub fn guarded(mut self) -> Self {
        self.protection = Protection::Guarded(None);
        self
    }

    /// Mark every field of this type protected, requiring `role` unless a
    /// field overrides it.
    pub fn require(mut self, role: impl Into<Role>) -> Self {
        self.protection = Protection::Guarded(Some(role.into()));
        self
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.insert(field.name().to_string(), field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn protection(&self) -> &Protection {
        &self.protection
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.values()
    }

    pub fn field_def(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }

    pub fn is_instrumented(&self) -> bool {
        self.instrumented
    }

    pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut FieldDef> {
        self.fields.get_mut(name)
    }

    pub(crate) fn set_instrumented(&mut self) {
        self.instrumented = true;
    }
}

impl fmt::Debug for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDef")
            .field("name", &self.name)
            .field("protection", &self.protection)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("instrumented", &self.instrumented)
            .finish()
    }
}

/// The full schema: a set of named types.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    types: BTreeMap<String, TypeDef>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, ty: TypeDef) -> Self {
        self.types.insert(ty.name().to_string(), ty);
        self
    }

    pub fn type_def(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&FieldDef> {
        self.types
            .get(type_name)
            .and_then(|ty| ty.field_def(field_name))
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub(crate) fn types_mut(&mut self) -> impl Iterator<Item = &mut TypeDef> {
        self.types.values_mut()
    }
}
