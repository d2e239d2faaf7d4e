//! In-memory collaborators for unit tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Barrier;

use shopadmin_catalog::{AttributeDefinition, RememberedVariant, VariantRecord};
use shopadmin_client::{ServiceError, ServiceResult, VariantService};
use shopadmin_core::{ProductId, VariantId};

use crate::notify::{Notifier, NotifyError};

pub(crate) fn remembered(id: i64, sku: &str) -> RememberedVariant {
    RememberedVariant {
        id: VariantId::new(id),
        sku: sku.to_string(),
        base_price: 10.0,
        discounted_price: 10.0,
        quantity: 1,
        unlimited: false,
        attribute_values: Default::default(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Create(VariantRecord),
    Update(VariantId, VariantRecord),
    Delete(VariantId),
    ListVariants(ProductId),
    ListAttributes,
}

/// Fake variant service that records calls and keeps a server-side listing.
///
/// Successful create/update/delete calls are applied to `listing`, so a
/// refresh after a save sees the new state.
pub(crate) struct MockService {
    pub calls: Mutex<Vec<Call>>,
    pub listing: Mutex<Vec<RememberedVariant>>,
    pub attributes: Vec<AttributeDefinition>,
    pub fail_create: Option<ServiceError>,
    pub fail_update: Option<ServiceError>,
    pub fail_delete: Option<ServiceError>,
    pub fail_list: Option<ServiceError>,
    /// When set, calls of that kind wait on the barrier before completing.
    pub create_gate: Option<Arc<Barrier>>,
    pub update_gate: Option<Arc<Barrier>>,
    pub delete_gate: Option<Arc<Barrier>>,
    /// Delete calls never complete once past their gate.
    pub stall_delete: bool,
    pub next_id: AtomicI64,
}

impl Default for MockService {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            listing: Mutex::new(Vec::new()),
            attributes: Vec::new(),
            fail_create: None,
            fail_update: None,
            fail_delete: None,
            fail_list: None,
            create_gate: None,
            update_gate: None,
            delete_gate: None,
            stall_delete: false,
            next_id: AtomicI64::new(1000),
        }
    }
}

impl MockService {
    pub fn with_listing(listing: Vec<RememberedVariant>) -> Self {
        Self {
            listing: Mutex::new(listing),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that modify server state (create/update/delete).
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Create(_) | Call::Update(..) | Call::Delete(_)))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    /// Gate shared by creates, updates and deletes.
    pub fn gated(barrier: Arc<Barrier>) -> Self {
        Self {
            create_gate: Some(barrier.clone()),
            update_gate: Some(barrier.clone()),
            delete_gate: Some(barrier),
            ..Self::default()
        }
    }
}

async fn pass(gate: &Option<Arc<Barrier>>) {
    if let Some(gate) = gate {
        gate.wait().await;
    }
}

fn to_remembered(id: VariantId, record: &VariantRecord) -> RememberedVariant {
    RememberedVariant {
        id,
        sku: record.sku.clone(),
        base_price: record.base_price,
        discounted_price: record.discounted_price,
        quantity: record.quantity,
        unlimited: record.unlimited,
        attribute_values: Default::default(),
    }
}

#[async_trait::async_trait]
impl VariantService for MockService {
    async fn create_variant(&self, record: &VariantRecord) -> ServiceResult<VariantId> {
        self.record(Call::Create(record.clone()));
        pass(&self.create_gate).await;
        if let Some(e) = &self.fail_create {
            return Err(e.clone());
        }
        let id = VariantId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.listing.lock().unwrap().push(to_remembered(id, record));
        Ok(id)
    }

    async fn update_variant(&self, id: VariantId, record: &VariantRecord) -> ServiceResult<VariantId> {
        self.record(Call::Update(id, record.clone()));
        pass(&self.update_gate).await;
        if let Some(e) = &self.fail_update {
            return Err(e.clone());
        }
        let mut listing = self.listing.lock().unwrap();
        if let Some(slot) = listing.iter_mut().find(|v| v.id == id) {
            *slot = to_remembered(id, record);
        }
        Ok(id)
    }

    async fn delete_variant_by_id(&self, id: VariantId) -> ServiceResult<()> {
        self.record(Call::Delete(id));
        pass(&self.delete_gate).await;
        if self.stall_delete {
            std::future::pending::<()>().await;
        }
        if let Some(e) = &self.fail_delete {
            return Err(e.clone());
        }
        self.listing.lock().unwrap().retain(|v| v.id != id);
        Ok(())
    }

    async fn list_variants(&self, product_id: ProductId) -> ServiceResult<Vec<RememberedVariant>> {
        self.record(Call::ListVariants(product_id));
        if let Some(e) = &self.fail_list {
            return Err(e.clone());
        }
        Ok(self.listing.lock().unwrap().clone())
    }

    async fn list_attributes(&self) -> ServiceResult<Vec<AttributeDefinition>> {
        self.record(Call::ListAttributes);
        Ok(self.attributes.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Toast {
    Success(String, String),
    Error(String, String),
}

/// Notifier that records toasts; optionally fails every call.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    pub toasts: Mutex<Vec<Toast>>,
    pub broken: bool,
}

impl RecordingNotifier {
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }

    fn push(&self, toast: Toast) -> Result<(), NotifyError> {
        self.toasts.lock().unwrap().push(toast);
        if self.broken {
            return Err(NotifyError::Failed("toast container missing".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn show_success_toast(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        self.push(Toast::Success(title.to_string(), message.to_string()))
    }

    async fn show_error_toast(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        self.push(Toast::Error(title.to_string(), message.to_string()))
    }
}
