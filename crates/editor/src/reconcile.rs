//! Reconciliation of the edited variant list against the server.
//!
//! [`plan`] is the pure diff; [`reconcile`] executes it. Execution issues all
//! create, update and delete calls at once and waits for every one of them.
//! The first failure wins: the remaining calls are dropped (which cancels
//! their client-side transport) and the error is returned unchanged. Calls
//! the server already received may still have been applied; the next save
//! recomputes the diff from the unchanged remembered list.

use std::collections::BTreeSet;

use futures::future::try_join_all;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use shopadmin_catalog::{RememberedVariant, VariantDraft, VariantRecord};
use shopadmin_client::{ServiceResult, VariantService};
use shopadmin_core::{ProductId, VariantId};

/// The remote operations needed to bring the server in line with the
/// edited list.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcilePlan {
    pub product_id: ProductId,
    /// New variants. Local temporary identifiers are stripped.
    pub to_create: Vec<VariantRecord>,
    /// Variants the server already knows, with their full new state.
    pub to_update: Vec<(VariantId, VariantRecord)>,
    /// Remembered variants missing from the edited list.
    pub to_delete: Vec<VariantId>,
}

impl ReconcilePlan {
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }
}

/// Identifiers confirmed by a reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileOutcome {
    pub created: Vec<VariantId>,
    pub updated: Vec<VariantId>,
    pub deleted: Vec<VariantId>,
}

impl ReconcileOutcome {
    /// True when nothing was sent to the server.
    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }
}

/// Diff `edited` against `remembered`.
///
/// - create: records without an identifier, or whose identifier the server
///   never confirmed
/// - update: records whose identifier is remembered (always issued, even if
///   no field changed)
/// - delete: remembered identifiers absent from `edited`
pub fn plan(
    remembered: &[RememberedVariant],
    edited: &[VariantDraft],
    product_id: ProductId,
) -> ReconcilePlan {
    let records: Vec<VariantRecord> = edited
        .iter()
        .map(|draft| VariantRecord::from_draft(draft, product_id))
        .collect();

    let old_ids: BTreeSet<VariantId> = remembered.iter().map(|v| v.id).collect();
    let new_ids: BTreeSet<VariantId> = records.iter().filter_map(|r| r.id).collect();

    let mut to_create = Vec::new();
    let mut to_update = Vec::new();
    for mut record in records {
        match record.id {
            Some(id) if old_ids.contains(&id) => to_update.push((id, record)),
            _ => {
                record.id = None;
                to_create.push(record);
            }
        }
    }

    let to_delete = remembered
        .iter()
        .map(|v| v.id)
        .filter(|id| !new_ids.contains(id))
        .collect();

    ReconcilePlan {
        product_id,
        to_create,
        to_update,
        to_delete,
    }
}

/// Compute and execute the plan for `edited` against `remembered`.
pub async fn reconcile<S>(
    service: &S,
    remembered: &[RememberedVariant],
    edited: &[VariantDraft],
    product_id: ProductId,
) -> ServiceResult<ReconcileOutcome>
where
    S: VariantService + ?Sized,
{
    execute(service, &plan(remembered, edited, product_id)).await
}

/// Execute a precomputed plan.
///
/// An empty plan returns immediately without touching the network.
pub async fn execute<S>(service: &S, plan: &ReconcilePlan) -> ServiceResult<ReconcileOutcome>
where
    S: VariantService + ?Sized,
{
    if plan.is_empty() {
        tracing::debug!(product_id = %plan.product_id, "no variant changes to reconcile");
        return Ok(ReconcileOutcome::default());
    }

    let span = tracing::info_span!(
        "reconcile",
        batch_id = %Uuid::now_v7(),
        product_id = %plan.product_id,
    );

    async move {
        tracing::info!(
            "reconciling variants: {} to create, {} to update, {} to delete",
            plan.to_create.len(),
            plan.to_update.len(),
            plan.to_delete.len()
        );

        let creates = try_join_all(plan.to_create.iter().map(|record| service.create_variant(record)));
        let updates = try_join_all(
            plan.to_update
                .iter()
                .map(|(id, record)| service.update_variant(*id, record)),
        );
        let deletes = try_join_all(plan.to_delete.iter().map(|id| service.delete_variant_by_id(*id)));

        let result = futures::try_join!(creates, updates, deletes);

        match result {
            Ok((created, updated, _)) => {
                tracing::info!("reconciliation succeeded");
                Ok(ReconcileOutcome {
                    created,
                    updated,
                    deleted: plan.to_delete.clone(),
                })
            }
            Err(e) => {
                tracing::error!("reconciliation failed: {e}");
                Err(e)
            }
        }
    }
    .instrument(span)
    .await
}
