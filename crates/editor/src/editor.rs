//! Editing state of the product-variant screen.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopadmin_catalog::{
    AttributeDefinition, RememberedVariant, VariantDraft, ensure_unique_ids, remove_variant,
    upsert_variant,
};
use shopadmin_client::{ServiceResult, VariantService};
use shopadmin_core::{AttributeId, AttributeValueId, DomainError, DomainResult, ProductId, VariantId};

use crate::notify::{self, Notifier};
use crate::reconcile::{self, ReconcileOutcome, ReconcilePlan};

const SAVED_TITLE: &str = "Variants saved";
const SAVED_MESSAGE: &str = "Product variants have been updated";
const FAILED_TITLE: &str = "Saving variants failed";

/// Lifecycle of the last reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// Owned editing state for one product's variants.
///
/// The remembered list is the server-confirmed baseline and is only replaced
/// by [`VariantEditor::refresh`]. All local edits go to the edited list, which
/// is reassigned as a whole on every change (observers compare
/// [`VariantEditor::revision`]).
#[derive(Debug, Clone)]
pub struct VariantEditor {
    product_id: ProductId,
    remembered: Vec<RememberedVariant>,
    edited: Vec<VariantDraft>,
    selected_attributes: Vec<AttributeDefinition>,
    revision: u64,
    state: ReconcileState,
    last_synced_at: Option<DateTime<Utc>>,
}

impl VariantEditor {
    /// Start editing `remembered` with `selected_attributes` chosen.
    pub fn new(
        product_id: ProductId,
        remembered: Vec<RememberedVariant>,
        selected_attributes: Vec<AttributeDefinition>,
    ) -> Self {
        let edited = remembered.iter().map(RememberedVariant::to_draft).collect();
        let mut editor = Self {
            product_id,
            remembered,
            edited,
            selected_attributes,
            revision: 0,
            state: ReconcileState::Idle,
            last_synced_at: None,
        };
        editor.prune();
        editor
    }

    /// Load a product's variants from the server.
    ///
    /// The selected attributes are the ones the loaded variants use.
    pub async fn load<S>(service: &S, product_id: ProductId) -> ServiceResult<Self>
    where
        S: VariantService + ?Sized,
    {
        let (remembered, attributes) =
            futures::try_join!(service.list_variants(product_id), service.list_attributes())?;

        let used: BTreeSet<AttributeId> = remembered
            .iter()
            .flat_map(|v| v.attribute_values.attributes())
            .collect();
        let selected = attributes
            .into_iter()
            .filter(|a| used.contains(&a.id))
            .collect();

        tracing::info!(
            product_id = %product_id,
            "loaded {} variant(s)",
            remembered.len()
        );

        let mut editor = Self::new(product_id, remembered, selected);
        editor.last_synced_at = Some(Utc::now());
        Ok(editor)
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn remembered(&self) -> &[RememberedVariant] {
        &self.remembered
    }

    pub fn edited(&self) -> &[VariantDraft] {
        &self.edited
    }

    pub fn selected_attributes(&self) -> &[AttributeDefinition] {
        &self.selected_attributes
    }

    pub fn selected_attribute_ids(&self) -> BTreeSet<AttributeId> {
        self.selected_attributes.iter().map(|a| a.id).collect()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn state(&self) -> ReconcileState {
        self.state
    }

    pub fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.last_synced_at
    }

    /// Replace the edited list.
    ///
    /// Attribute values for attributes that are not selected are dropped. A
    /// list in which two entries share an identifier is rejected and the
    /// current list is kept.
    pub fn set_edited(&mut self, edited: Vec<VariantDraft>) -> DomainResult<()> {
        ensure_unique_ids(&edited)?;
        self.reassign(edited);
        Ok(())
    }

    /// Change the selected attribute set and prune every edited variant.
    pub fn select_attributes(&mut self, attributes: Vec<AttributeDefinition>) {
        self.selected_attributes = attributes;
        self.prune();
    }

    fn prune(&mut self) {
        let edited = self.edited.clone();
        self.reassign(edited);
    }

    fn reassign(&mut self, mut edited: Vec<VariantDraft>) {
        let selected = self.selected_attribute_ids();
        for draft in &mut edited {
            draft.prune_attributes(&selected);
        }
        self.edited = edited;
        self.revision += 1;
    }

    /// Set the value of one attribute on an edited variant.
    pub fn assign_attribute_value(
        &mut self,
        variant_id: VariantId,
        attribute_id: AttributeId,
        value_id: AttributeValueId,
    ) -> DomainResult<()> {
        let attribute = self
            .selected_attributes
            .iter()
            .find(|a| a.id == attribute_id)
            .ok_or_else(|| {
                DomainError::validation(format!("attribute {attribute_id} is not selected"))
            })?;
        let value = attribute.value(value_id).cloned().ok_or_else(|| {
            DomainError::validation(format!(
                "value {value_id} does not belong to attribute {attribute_id}"
            ))
        })?;

        let mut edited = self.edited.clone();
        let draft = edited
            .iter_mut()
            .find(|v| v.id == Some(variant_id))
            .ok_or_else(|| DomainError::not_found(format!("variant {variant_id}")))?;
        draft.attribute_values.insert(attribute_id, value);

        self.reassign(edited);
        Ok(())
    }

    /// Draft for the variant dialog: a copy of an existing entry, or an empty
    /// one for "add variant".
    pub fn open_variant_dialog(&self, id: Option<VariantId>) -> DomainResult<VariantDraft> {
        match id {
            None => Ok(VariantDraft::new()),
            Some(id) => self
                .edited
                .iter()
                .find(|v| v.id == Some(id))
                .cloned()
                .ok_or_else(|| DomainError::not_found(format!("variant {id}"))),
        }
    }

    /// Save a dialog's draft into the edited list.
    ///
    /// Replaces the entry with the same identifier, or appends the draft under
    /// a fresh local identifier. Never talks to the server.
    pub fn upsert_variant(&mut self, draft: VariantDraft) -> DomainResult<VariantId> {
        draft.validate()?;

        let mut edited = self.edited.clone();
        let id = upsert_variant(&mut edited, draft)?;
        self.reassign(edited);

        tracing::debug!(variant_id = %id, "variant stored in edited list");
        Ok(id)
    }

    /// Remove a variant from the edited list.
    pub fn delete_variant(&mut self, id: VariantId) -> Option<VariantDraft> {
        let mut edited = self.edited.clone();
        let removed = remove_variant(&mut edited, id)?;
        self.reassign(edited);
        Some(removed)
    }

    /// Preview of what [`VariantEditor::save`] would send.
    pub fn plan(&self) -> ReconcilePlan {
        reconcile::plan(&self.remembered, &self.edited, self.product_id)
    }

    /// Synchronize the server with the edited list.
    ///
    /// On success a success toast is shown and both lists are refreshed from
    /// the server. On failure an error toast carrying the error's detail is
    /// shown, the remembered list stays as it was, and the error is returned
    /// unchanged. A save with nothing to send succeeds without any toast or
    /// request.
    pub async fn save<S, N>(&mut self, service: &S, notifier: &N) -> ServiceResult<ReconcileOutcome>
    where
        S: VariantService + ?Sized,
        N: Notifier + ?Sized,
    {
        self.prune();

        let plan = self.plan();
        if plan.is_empty() {
            self.state = ReconcileState::Succeeded;
            return Ok(ReconcileOutcome::default());
        }

        self.state = ReconcileState::InFlight;
        match reconcile::execute(service, &plan).await {
            Ok(outcome) => {
                self.state = ReconcileState::Succeeded;
                notify::success(notifier, SAVED_TITLE, SAVED_MESSAGE).await;
                self.refresh(service).await?;
                Ok(outcome)
            }
            Err(e) => {
                self.state = ReconcileState::Failed;
                notify::error(notifier, FAILED_TITLE, e.detail()).await;
                Err(e)
            }
        }
    }

    /// Replace the remembered and edited lists with the server's state.
    pub async fn refresh<S>(&mut self, service: &S) -> ServiceResult<()>
    where
        S: VariantService + ?Sized,
    {
        let remembered = service.list_variants(self.product_id).await?;
        let edited = remembered.iter().map(RememberedVariant::to_draft).collect();

        self.remembered = remembered;
        self.reassign(edited);
        self.last_synced_at = Some(Utc::now());

        tracing::info!(
            product_id = %self.product_id,
            "refreshed {} remembered variant(s)",
            self.remembered.len()
        );
        Ok(())
    }
}
