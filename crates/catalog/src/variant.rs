use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use shopadmin_core::{AttributeId, DomainError, DomainResult, VariantId};

use crate::attribute::{AttributeValueMap, null_as_empty};

/// A locally edited variant.
///
/// `id` is `None` until the variant is stored in an edited list; from then on
/// it holds either a server-assigned identifier or a temporary local one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<VariantId>,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub base_price: f64,
    #[serde(default)]
    pub discounted_price: f64,
    #[serde(default)]
    pub quantity: u64,
    #[serde(default)]
    pub unlimited: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub attribute_values: AttributeValueMap,
}

impl VariantDraft {
    /// Empty draft, as seeded by the "add variant" dialog.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    pub fn with_id(mut self, id: VariantId) -> Self {
        self.id = Some(id);
        self
    }

    /// Check the constraints the variant form guarantees before saving.
    pub fn validate(&self) -> DomainResult<()> {
        if self.sku.trim().is_empty() {
            return Err(DomainError::validation("SKU cannot be empty"));
        }
        if !self.base_price.is_finite() || self.base_price < 0.0 {
            return Err(DomainError::validation("base price must be a non-negative number"));
        }
        if !self.discounted_price.is_finite() || self.discounted_price < 0.0 {
            return Err(DomainError::validation(
                "discounted price must be a non-negative number",
            ));
        }
        Ok(())
    }

    /// Drop attribute values whose attribute is no longer selected.
    pub fn prune_attributes(&mut self, selected: &BTreeSet<AttributeId>) {
        self.attribute_values = prune_attribute_values(&self.attribute_values, selected);
    }
}

/// A variant as last confirmed by the server. Always carries an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RememberedVariant {
    pub id: VariantId,
    pub sku: String,
    pub base_price: f64,
    pub discounted_price: f64,
    pub quantity: u64,
    pub unlimited: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub attribute_values: AttributeValueMap,
}

impl RememberedVariant {
    /// Editable copy of this variant.
    pub fn to_draft(&self) -> VariantDraft {
        VariantDraft::from(self.clone())
    }
}

impl From<RememberedVariant> for VariantDraft {
    fn from(v: RememberedVariant) -> Self {
        Self {
            id: Some(v.id),
            sku: v.sku,
            base_price: v.base_price,
            discounted_price: v.discounted_price,
            quantity: v.quantity,
            unlimited: v.unlimited,
            attribute_values: v.attribute_values,
        }
    }
}

/// Restrict `values` to the attributes in `selected`.
pub fn prune_attribute_values(
    values: &AttributeValueMap,
    selected: &BTreeSet<AttributeId>,
) -> AttributeValueMap {
    values.pruned(selected)
}

/// Next temporary identifier for a new entry of `variants`.
///
/// `max(existing ids, 0) + 1`. Local and server identifiers share one
/// numbering space while editing, so this is computed over the edited list.
pub fn next_variant_id(variants: &[VariantDraft]) -> DomainResult<VariantId> {
    let max = variants
        .iter()
        .filter_map(|v| v.id)
        .map(|id| id.get())
        .fold(0, i64::max);
    max.checked_add(1)
        .map(VariantId::new)
        .ok_or_else(|| DomainError::validation(format!("no variant identifier left after {max}")))
}

/// Reject lists in which two entries carry the same identifier.
pub fn ensure_unique_ids(variants: &[VariantDraft]) -> DomainResult<()> {
    let mut seen = BTreeSet::new();
    for id in variants.iter().filter_map(|v| v.id) {
        if !seen.insert(id) {
            return Err(DomainError::validation(format!("duplicate variant identifier {id}")));
        }
    }
    Ok(())
}

/// Store `draft` in `variants`, returning the identifier it was stored under.
///
/// A draft whose identifier is already in the list replaces that entry in
/// place. Anything else gets a fresh identifier and is appended.
pub fn upsert_variant(
    variants: &mut Vec<VariantDraft>,
    mut draft: VariantDraft,
) -> DomainResult<VariantId> {
    if let Some(id) = draft.id {
        if let Some(slot) = variants.iter_mut().find(|v| v.id == Some(id)) {
            *slot = draft;
            return Ok(id);
        }
    }

    let id = next_variant_id(variants)?;
    draft.id = Some(id);
    variants.push(draft);
    Ok(id)
}

/// Remove the entry with identifier `id`, if present.
pub fn remove_variant(variants: &mut Vec<VariantDraft>, id: VariantId) -> Option<VariantDraft> {
    let index = variants.iter().position(|v| v.id == Some(id))?;
    Some(variants.remove(index))
}
