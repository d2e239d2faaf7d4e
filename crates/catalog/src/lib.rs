//! Catalog domain module: attributes and product variants.
//!
//! This crate contains the variant editing rules, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod attribute;
pub mod record;
pub mod variant;

pub use attribute::{AttributeDefinition, AttributeValue, AttributeValueMap};
pub use record::VariantRecord;
pub use variant::{
    RememberedVariant, VariantDraft, ensure_unique_ids, next_variant_id, prune_attribute_values,
    remove_variant, upsert_variant,
};
