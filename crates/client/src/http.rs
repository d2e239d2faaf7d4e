//! reqwest-backed implementation of [`VariantService`].

use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use shopadmin_catalog::{
    AttributeDefinition, AttributeValue, AttributeValueMap, RememberedVariant, VariantRecord,
};
use shopadmin_core::{AttributeId, AttributeValueId, ProductId, VariantId};

use crate::config::ClientConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::service::VariantService;

/// HTTP client for the shop's variant endpoints.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpVariantService {
    client: Client,
    base_url: String,
    token: Option<String>,
}

/// Body returned by create and update.
#[derive(Debug, Deserialize)]
struct IdResponse {
    id: VariantId,
}

/// Variant as returned by the list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariantResource {
    id: VariantId,
    sku: String,
    #[serde(default)]
    base_price: f64,
    #[serde(default)]
    discounted_price: f64,
    #[serde(default)]
    quantity: u64,
    #[serde(default)]
    unlimited: bool,
    #[serde(default)]
    attribute_values: Option<Vec<AttributeValueResource>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttributeValueResource {
    id: AttributeValueId,
    attribute_id: AttributeId,
    #[serde(default)]
    value: String,
}

impl From<VariantResource> for RememberedVariant {
    fn from(r: VariantResource) -> Self {
        let attribute_values: AttributeValueMap = r
            .attribute_values
            .unwrap_or_default()
            .into_iter()
            .map(|v| (v.attribute_id, AttributeValue::new(v.id, v.value)))
            .collect();

        Self {
            id: r.id,
            sku: r.sku,
            base_price: r.base_price,
            discounted_price: r.discounted_price,
            quantity: r.quantity,
            unlimited: r.unlimited,
            attribute_values,
        }
    }
}

impl HttpVariantService {
    pub fn new(config: &ClientConfig) -> ServiceResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ServiceError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> ServiceResult<reqwest::Response> {
        let resp = self.authorize(req).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::from_response(status.as_u16(), &body));
        }

        Ok(resp)
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> ServiceResult<T> {
        let resp = self.send(req).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl VariantService for HttpVariantService {
    async fn create_variant(&self, record: &VariantRecord) -> ServiceResult<VariantId> {
        let url = self.url(&format!("/products/{}/variants", record.product_id));
        tracing::debug!(sku = %record.sku, "POST {url}");

        let created: IdResponse = self.send_json(self.client.post(&url).json(record)).await?;
        Ok(created.id)
    }

    async fn update_variant(&self, id: VariantId, record: &VariantRecord) -> ServiceResult<VariantId> {
        let url = self.url(&format!("/variants/{id}"));
        tracing::debug!(sku = %record.sku, "PUT {url}");

        let updated: IdResponse = self.send_json(self.client.put(&url).json(record)).await?;
        Ok(updated.id)
    }

    async fn delete_variant_by_id(&self, id: VariantId) -> ServiceResult<()> {
        let url = self.url(&format!("/variants/{id}"));
        tracing::debug!("DELETE {url}");

        self.send(self.client.delete(&url)).await?;
        Ok(())
    }

    async fn list_variants(&self, product_id: ProductId) -> ServiceResult<Vec<RememberedVariant>> {
        let url = self.url(&format!("/products/{product_id}/variants"));
        tracing::debug!("GET {url}");

        let resources: Vec<VariantResource> = self.send_json(self.client.get(&url)).await?;
        Ok(resources.into_iter().map(RememberedVariant::from).collect())
    }

    async fn list_attributes(&self) -> ServiceResult<Vec<AttributeDefinition>> {
        let url = self.url("/attributes");
        tracing::debug!("GET {url}");

        self.send_json(self.client.get(&url)).await
    }
}
