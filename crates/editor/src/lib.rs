//! `shopadmin-editor`
//!
//! **Responsibility:** the product-variant editing screen's state and its
//! synchronization with the server.
//!
//! This crate provides:
//! - Owned editing state (remembered list, edited list, selected attributes)
//! - Local variant upsert/delete and attribute pruning
//! - Reconciliation: diffing the edited list against the remembered list and
//!   dispatching create/update/delete calls concurrently
//!
//! UI concerns (toasts, dialogs) are reached through injected traits.

pub mod editor;
pub mod notify;
pub mod reconcile;

#[cfg(test)]
pub(crate) mod test_support;

pub use editor::{ReconcileState, VariantEditor};
pub use notify::{Notifier, NotifyError, TracingNotifier};
pub use reconcile::{ReconcileOutcome, ReconcilePlan, plan, reconcile};
