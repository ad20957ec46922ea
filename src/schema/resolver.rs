//! Resolver capability types and the per-call context they receive.
//!
//! A resolver is any capability matching one fixed signature: it takes the
//! parent value, the call arguments, the request's auth context and the
//! field descriptor, and returns a boxed future. Subscription establishment
//! uses the identical signature but its future yields a stream. Keeping both
//! shapes behind the same call contract is what lets the interceptor wrap
//! either kind without knowing which it holds.

use std::fmt;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::stream::BoxStream;
use serde_json::{Map, Value};

use crate::context::AuthContext;
use crate::error::FieldResult;

/// Identity of the field being resolved, as seen by resolvers and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub type_name: String,
    pub field_name: String,
}

impl FieldRef {
    pub fn new(type_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            field_name: field_name.into(),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.field_name)
    }
}

/// Everything a resolver call receives.
#[derive(Debug, Clone)]
pub struct ResolverContext {
    /// Parent object value the field is being resolved on.
    pub source: Value,
    /// Call arguments, by name.
    pub args: Map<String, Value>,
    /// Request-scoped authentication context, shared across the fields of
    /// one request and dropped with it.
    pub auth: Arc<AuthContext>,
    pub field: FieldRef,
}

impl ResolverContext {
    pub fn new(auth: Arc<AuthContext>, field: FieldRef) -> Self {
        Self {
            source: Value::Null,
            args: Map::new(),
            auth,
            field,
        }
    }

    pub fn with_source(mut self, source: Value) -> Self {
        self.source = source;
        self
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: Value) -> Self {
        self.args.insert(name.into(), value);
        self
    }
}

/// Stream of values produced by an established subscription.
pub type FieldStream = BoxStream<'static, FieldResult<Value>>;

/// Future returned by a value resolver.
pub type ResolveFuture = BoxFuture<'static, FieldResult<Value>>;

/// Future returned by a subscription establishment call. Rejection here
/// means no stream was ever created.
pub type SubscribeFuture = BoxFuture<'static, FieldResult<FieldStream>>;

/// Value-resolution capability installed on a field.
pub type Resolver = Arc<dyn Fn(ResolverContext) -> ResolveFuture + Send + Sync>;

/// Subscription-establishment capability installed on a field.
pub type Subscriber = Arc<dyn Fn(ResolverContext) -> SubscribeFuture + Send + Sync>;
