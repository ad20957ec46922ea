//! Guarded replacement of a field's resolution capabilities.

use std::sync::Arc;

use futures_util::future;
use futures_util::FutureExt;
use tracing::debug;

use crate::error::FieldError;
use crate::role::Role;
use crate::schema::FieldDef;

use super::guard::{Access, ExecutionGuard};

/// Swap the field's resolver (and subscriber, when present) for versions
/// that consult the guard first.
///
/// The check runs synchronously when the capability is invoked, before any
/// future is constructed. On allow the original capability runs with the
/// call unchanged, keeping its suspension model intact; caller cancellation
/// drops straight through. On deny the original is never invoked and the
/// failure takes the channel the original would have used: a ready error
/// future for value resolution, a rejected establishment future for
/// subscriptions.
pub(crate) fn wrap_field(field: &mut FieldDef, role: Role, guard: Arc<ExecutionGuard>) {
    let inner = field.resolver.clone();
    let resolve_role = role.clone();
    let resolve_guard = Arc::clone(&guard);
    field.resolver = Arc::new(move |ctx| match resolve_guard.check(&ctx.auth, &resolve_role) {
        Access::Allow => inner(ctx),
        Access::Deny => {
            debug!(field = %ctx.field, "field access denied");
            future::ready(Err(FieldError::ForbiddenAccess)).boxed()
        }
    });

    if let Some(inner) = field.subscriber.clone() {
        field.subscriber = Some(Arc::new(move |ctx| match guard.check(&ctx.auth, &role) {
            Access::Allow => inner(ctx),
            Access::Deny => {
                debug!(field = %ctx.field, "subscription denied");
                future::ready(Err(FieldError::ForbiddenAccess)).boxed()
            }
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{AuthContext, Identity};
    use crate::schema::resolver::{FieldRef, ResolverContext};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    fn guard() -> Arc<ExecutionGuard> {
        Arc::new(ExecutionGuard::new(Role::new("USER")))
    }

    fn ctx(auth: AuthContext) -> ResolverContext {
        ResolverContext::new(Arc::new(auth), FieldRef::new("Report", "title"))
    }

    #[tokio::test]
    async fn denied_call_never_reaches_the_original() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let mut field = FieldDef::new("title", move |_| {
            let seen = seen.clone();
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(json!("secret"))
            }
        });

        wrap_field(&mut field, Role::new("ADMIN"), guard());

        let result = field.resolve(ctx(AuthContext::anonymous())).await;
        assert_eq!(result, Err(FieldError::ForbiddenAccess));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn allowed_call_returns_the_original_value() {
        let mut field = FieldDef::new("title", |_| async { Ok(json!("secret")) });
        wrap_field(&mut field, Role::new("ADMIN"), guard());

        let auth =
            AuthContext::authenticated(Identity::with_grants(Uuid::new_v4(), ["ADMIN"]));
        let value = field.resolve(ctx(auth)).await.unwrap();
        assert_eq!(value, json!("secret"));
    }

    #[tokio::test]
    async fn allowed_call_forwards_the_context_unmodified() {
        let mut field = FieldDef::new("title", |ctx: ResolverContext| async move {
            Ok(json!({ "source": ctx.source, "limit": ctx.args["limit"] }))
        });
        wrap_field(&mut field, Role::new("USER"), guard());

        let auth = AuthContext::authenticated(Identity::new(Uuid::new_v4()));
        let call = ctx(auth)
            .with_source(json!({"id": 42}))
            .with_arg("limit", json!(5));
        let value = field.resolve(call).await.unwrap();
        assert_eq!(value, json!({"source": {"id": 42}, "limit": 5}));
    }

    #[tokio::test]
    async fn resolver_errors_pass_through_on_allow() {
        let mut field = FieldDef::new("title", |_| async {
            Err::<Value, _>(FieldError::Resolver("upstream broke".into()))
        });
        wrap_field(&mut field, Role::new("USER"), guard());

        let auth = AuthContext::authenticated(Identity::new(Uuid::new_v4()));
        let result = field.resolve(ctx(auth)).await;
        assert_eq!(result, Err(FieldError::Resolver("upstream broke".into())));
    }
}
