//! Transport record sent to the variant endpoints.

use serde::{Deserialize, Serialize};

use shopadmin_core::{AttributeValueId, ProductId, VariantId};

use crate::variant::VariantDraft;

/// Flattened variant as the server expects it on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<VariantId>,
    pub product_id: ProductId,
    pub sku: String,
    pub base_price: f64,
    pub discounted_price: f64,
    pub quantity: u64,
    pub unlimited: bool,
    #[serde(default)]
    pub attribute_value_ids: Vec<AttributeValueId>,
}

impl VariantRecord {
    /// Build the record for `draft` under `product_id`.
    ///
    /// The attribute-value map is reduced to its value ids, in map order.
    pub fn from_draft(draft: &VariantDraft, product_id: ProductId) -> Self {
        Self {
            id: draft.id,
            product_id,
            sku: draft.sku.clone(),
            base_price: draft.base_price,
            discounted_price: draft.discounted_price,
            quantity: draft.quantity,
            unlimited: draft.unlimited,
            attribute_value_ids: draft.attribute_values.value_ids(),
        }
    }
}
