//! `shopadmin-sync`: apply an edited variant list to a product.
//!
//! Usage: `shopadmin-sync <session.json>`
//!
//! The session file holds the product id, optionally the attribute ids to
//! keep selected, and the edited variant list:
//!
//! ```json
//! { "productId": 100, "selectedAttributes": [1], "edited": [{ "sku": "NEW-1" }] }
//! ```
//!
//! Connection settings come from `SHOPADMIN_API_URL`, `SHOPADMIN_AUTH_TOKEN`
//! and `SHOPADMIN_HTTP_TIMEOUT_SECS`.

use std::path::PathBuf;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use shopadmin_catalog::VariantDraft;
use shopadmin_client::{ClientConfig, HttpVariantService, VariantService};
use shopadmin_core::{AttributeId, ProductId};
use shopadmin_editor::{ReconcileOutcome, ReconcileState, TracingNotifier, VariantEditor};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Session {
    product_id: ProductId,
    #[serde(default)]
    selected_attributes: Option<Vec<AttributeId>>,
    #[serde(default)]
    edited: Vec<VariantDraft>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    product_id: ProductId,
    state: ReconcileState,
    outcome: ReconcileOutcome,
    remembered: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shopadmin_observability::init();

    let path = match std::env::args_os().nth(1) {
        Some(path) => PathBuf::from(path),
        None => bail!("usage: shopadmin-sync <session.json>"),
    };

    let span = shopadmin_observability::service_span("shopadmin-sync", env!("CARGO_PKG_VERSION"));
    run(path).instrument(span).await
}

async fn run(path: PathBuf) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read session file {}", path.display()))?;
    let session: Session = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse session file {}", path.display()))?;

    let config = ClientConfig::from_env();
    tracing::info!(api_url = %config.base_url, "using shop API");
    let service = HttpVariantService::new(&config).context("failed to create HTTP client")?;

    let mut editor = VariantEditor::load(&service, session.product_id)
        .await
        .with_context(|| format!("failed to load variants of product {}", session.product_id))?;

    if let Some(ids) = session.selected_attributes {
        let attributes = service
            .list_attributes()
            .await
            .context("failed to load attribute definitions")?;
        let selected = attributes
            .into_iter()
            .filter(|a| ids.contains(&a.id))
            .collect::<Vec<_>>();
        if selected.len() != ids.len() {
            tracing::warn!("some selected attributes are unknown to the server and were skipped");
        }
        editor.select_attributes(selected);
    }

    editor
        .set_edited(session.edited)
        .context("invalid edited variant list")?;

    let outcome = editor
        .save(&service, &TracingNotifier)
        .await
        .context("failed to save variants")?;

    let report = Report {
        product_id: editor.product_id(),
        state: editor.state(),
        outcome,
        remembered: editor.remembered().len(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
