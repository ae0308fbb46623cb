//! Entitlement reconciliation for verified webhook events.
//!
//! Acts only on completed-checkout events: the customer email is matched
//! exactly against local accounts and the entitlement flag is set through a
//! single atomic update in the store, never read-modify-write. Granting is
//! naturally idempotent, so redelivered events are no-ops.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::ports::{GrantOutcome, UserRepository};

use super::errors::WebhookError;
use super::event::{EventKind, ProviderEvent};

/// What a verified event did to local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Entitlement set for the matched account.
    Granted { email: String },

    /// Payment completed for an email with no local account. Acknowledged
    /// so the provider stops redelivering, but this is a paid-but-unentitled
    /// state that must stay observable.
    Unmatched { email: String },

    /// Event type carries no entitlement consequence; acknowledged.
    Skipped { event_type: String },
}

/// Applies verified events to the account store.
pub struct EntitlementReconciler {
    users: Arc<dyn UserRepository>,
    unmatched: AtomicU64,
}

impl EntitlementReconciler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            unmatched: AtomicU64::new(0),
        }
    }

    /// Number of completed checkouts that matched no local account.
    pub fn unmatched_count(&self) -> u64 {
        self.unmatched.load(Ordering::Relaxed)
    }

    /// Apply a verified event.
    ///
    /// # Errors
    ///
    /// - `MalformedPayload` if a completed-checkout object does not parse
    /// - `MissingEmail` if it carries no customer email
    /// - `Storage` if the entitlement update cannot be persisted (the caller
    ///   maps this to a 500 so the provider redelivers)
    pub async fn apply(&self, event: &ProviderEvent) -> Result<Reconciliation, WebhookError> {
        if event.kind() != EventKind::CheckoutCompleted {
            tracing::debug!(event_id = %event.id, event_type = %event.event_type, "event ignored");
            return Ok(Reconciliation::Skipped {
                event_type: event.event_type.clone(),
            });
        }

        let session = event.checkout_session()?;
        let email = session.email().ok_or(WebhookError::MissingEmail)?;

        match self
            .users
            .grant_premium(email)
            .await
            .map_err(|e| WebhookError::Storage(e.to_string()))?
        {
            GrantOutcome::Granted => {
                tracing::info!(event_id = %event.id, email = %email, "entitlement granted");
                Ok(Reconciliation::Granted {
                    email: email.to_string(),
                })
            }
            GrantOutcome::NoMatchingAccount => {
                self.unmatched.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    event_id = %event.id,
                    email = %email,
                    "completed checkout matched no account; payment received without entitlement"
                );
                Ok(Reconciliation::Unmatched {
                    email: email.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::test_support::InMemoryUserRepository;
    use crate::domain::user::User;
    use chrono::Utc;
    use uuid::Uuid;

    fn account(email: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            is_premium: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn checkout_event(id: &str, email: &str) -> ProviderEvent {
        ProviderEvent::from_payload(
            format!(
                r#"{{"id":"{}","type":"checkout.session.completed","created":1704067200,"data":{{"object":{{"id":"cs_test","customer_email":"{}"}}}}}}"#,
                id, email
            )
            .as_bytes(),
        )
        .unwrap()
    }

    fn other_event(event_type: &str) -> ProviderEvent {
        ProviderEvent::from_payload(
            format!(
                r#"{{"id":"evt_other","type":"{}","created":1704067200,"data":{{"object":{{}}}}}}"#,
                event_type
            )
            .as_bytes(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn completed_checkout_grants_entitlement() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = account("a@example.com");
        repo.insert(user.clone());
        let reconciler = EntitlementReconciler::new(repo.clone());

        let result = reconciler
            .apply(&checkout_event("evt_1", "a@example.com"))
            .await
            .unwrap();

        assert_eq!(
            result,
            Reconciliation::Granted {
                email: "a@example.com".to_string()
            }
        );
        assert!(repo.get(user.id).unwrap().is_premium);
    }

    #[tokio::test]
    async fn redelivered_event_is_a_noop() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = account("a@example.com");
        repo.insert(user.clone());
        let reconciler = EntitlementReconciler::new(repo.clone());
        let event = checkout_event("evt_dup", "a@example.com");

        let first = reconciler.apply(&event).await.unwrap();
        let second = reconciler.apply(&event).await.unwrap();

        assert_eq!(first, second);
        assert!(repo.get(user.id).unwrap().is_premium);
        assert_eq!(reconciler.unmatched_count(), 0);
    }

    #[tokio::test]
    async fn unknown_email_is_acknowledged_and_counted() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let reconciler = EntitlementReconciler::new(repo.clone());

        let result = reconciler
            .apply(&checkout_event("evt_miss", "ghost@example.com"))
            .await
            .unwrap();

        assert_eq!(
            result,
            Reconciliation::Unmatched {
                email: "ghost@example.com".to_string()
            }
        );
        assert_eq!(reconciler.unmatched_count(), 1);
        assert_eq!(repo.count(), 0);
    }

    #[tokio::test]
    async fn email_match_is_exact() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = account("a@example.com");
        repo.insert(user.clone());
        let reconciler = EntitlementReconciler::new(repo.clone());

        let result = reconciler
            .apply(&checkout_event("evt_case", "A@example.com"))
            .await
            .unwrap();

        assert!(matches!(result, Reconciliation::Unmatched { .. }));
        assert!(!repo.get(user.id).unwrap().is_premium);
    }

    #[tokio::test]
    async fn unrelated_event_types_are_skipped() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = account("a@example.com");
        repo.insert(user.clone());
        let reconciler = EntitlementReconciler::new(repo.clone());

        let result = reconciler
            .apply(&other_event("invoice.payment_succeeded"))
            .await
            .unwrap();

        assert_eq!(
            result,
            Reconciliation::Skipped {
                event_type: "invoice.payment_succeeded".to_string()
            }
        );
        assert!(!repo.get(user.id).unwrap().is_premium);
    }

    #[tokio::test]
    async fn completed_checkout_without_email_is_rejected() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let reconciler = EntitlementReconciler::new(repo);
        let event = ProviderEvent::from_payload(
            br#"{"id":"evt_no_email","type":"checkout.session.completed","created":1704067200,"data":{"object":{"id":"cs_test"}}}"#,
        )
        .unwrap();

        let result = reconciler.apply(&event).await;

        assert!(matches!(result, Err(WebhookError::MissingEmail)));
    }

    #[tokio::test]
    async fn storage_failure_surfaces_as_retryable_error() {
        let repo = Arc::new(InMemoryUserRepository::failing());
        let reconciler = EntitlementReconciler::new(repo);

        let result = reconciler
            .apply(&checkout_event("evt_db", "a@example.com"))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, WebhookError::Storage(_)));
        assert!(err.is_retryable());
    }
}
