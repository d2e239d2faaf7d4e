//! The remote variant service seam.

use shopadmin_catalog::{AttributeDefinition, RememberedVariant, VariantRecord};
use shopadmin_core::{ProductId, VariantId};

use crate::error::ServiceResult;

/// Remote operations on a product's variants.
///
/// Calls are not guaranteed idempotent at the transport layer; callers must
/// not retry blindly.
#[async_trait::async_trait]
pub trait VariantService: Send + Sync {
    /// Create a variant under `record.product_id`, returning its new id.
    async fn create_variant(&self, record: &VariantRecord) -> ServiceResult<VariantId>;

    /// Replace the persisted fields of variant `id`.
    async fn update_variant(&self, id: VariantId, record: &VariantRecord) -> ServiceResult<VariantId>;

    async fn delete_variant_by_id(&self, id: VariantId) -> ServiceResult<()>;

    /// Server-confirmed variants of a product.
    async fn list_variants(&self, product_id: ProductId) -> ServiceResult<Vec<RememberedVariant>>;

    /// All attribute definitions with their values.
    async fn list_attributes(&self) -> ServiceResult<Vec<AttributeDefinition>>;
}
