//! AI model search: a fixed local catalog or the live model hub.

use std::time::Duration;

use log::{debug, warn};
use serde::Deserialize;

use crate::{
    error::{ForgeError, RemoteResultExt, Result},
    models::AiModel,
};

/// Default model hub endpoint.
pub const DEFAULT_HUB_URL: &str = "https://huggingface.co";

/// Maximum number of hub results per search.
pub const HUB_RESULT_LIMIT: usize = 12;

/// The built-in catalog searched when no hub is configured.
pub fn catalog() -> Vec<AiModel> {
    [
        (
            "llama3-8b",
            "Llama 3 (8B)",
            "Meta's Llama 3 8B parameter model optimized for various tasks",
            "meta-llama/Llama-3-8B",
        ),
        (
            "mistralai-7b",
            "Mistral AI (7B)",
            "Mistral 7B parameter model optimized for code generation",
            "mistralai/Mistral-7B-v0.1",
        ),
        (
            "phi-2",
            "Phi-2",
            "Microsoft's 2.7B parameter model with strong reasoning capabilities",
            "microsoft/phi-2",
        ),
    ]
    .into_iter()
    .map(|(id, name, description, source)| AiModel {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        hugging_face_id: source.to_string(),
        downloaded_at: None,
        size: None,
    })
    .collect()
}

/// Filters the catalog; a blank query returns everything.
pub fn search_catalog(query: &str) -> Vec<AiModel> {
    let query = query.trim();
    catalog()
        .into_iter()
        .filter(|model| query.is_empty() || model.matches(query))
        .collect()
}

/// Where model searches are answered from.
#[derive(Debug, Clone, Default)]
pub enum ModelSource {
    #[default]
    Catalog,
    Hub(HubClient),
}

impl ModelSource {
    pub async fn search(&self, query: &str) -> Result<Vec<AiModel>> {
        match self {
            ModelSource::Catalog => Ok(search_catalog(query)),
            ModelSource::Hub(client) => client.search(query).await,
        }
    }
}

/// One entry of the hub's model listing.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HubModel {
    pub id: String,
    #[serde(rename = "modelId")]
    pub model_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pipeline_tag: Option<String>,
    #[serde(default)]
    pub downloads: Option<u64>,
}

impl From<HubModel> for AiModel {
    fn from(model: HubModel) -> Self {
        let description = model
            .description
            .or_else(|| model.pipeline_tag.map(|tag| format!("{tag} model")))
            .unwrap_or_else(|| "No description available".to_string());
        AiModel {
            id: model.id,
            name: model.model_id.clone(),
            description,
            hugging_face_id: model.model_id,
            downloaded_at: None,
            size: model.downloads.map(|count| format!("{} downloads", group_thousands(count))),
        }
    }
}

/// Formats `1234567` as `1,234,567`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// HTTP client for the model hub search endpoint.
#[derive(Debug, Clone)]
pub struct HubClient {
    client: reqwest::Client,
    base_url: String,
}

impl HubClient {
    /// Creates a client against `base_url` (e.g. [`DEFAULT_HUB_URL`]).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .remote_context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Query parameters sent for `query`.
    pub fn query_params(query: &str) -> Vec<(&'static str, String)> {
        let query = query.trim();
        let mut params = vec![("limit", HUB_RESULT_LIMIT.to_string())];
        if query.is_empty() {
            params.push(("sort", "downloads".to_string()));
            params.push(("direction", "-1".to_string()));
        } else {
            params.push(("search", query.to_string()));
        }
        params
    }

    /// Searches the hub; non-2xx responses fail the search.
    pub async fn search(&self, query: &str) -> Result<Vec<AiModel>> {
        let url = format!("{}/api/models", self.base_url);
        debug!("Searching model hub at {url} for '{query}'");

        let response = self
            .client
            .get(&url)
            .query(&Self::query_params(query))
            .send()
            .await
            .remote_context("Failed to reach model hub")?;

        let status = response.status();
        if !status.is_success() {
            warn!("Model hub returned {status}");
            return Err(ForgeError::remote(format!("Model hub returned {status}")));
        }

        let models: Vec<HubModel> = response
            .json()
            .await
            .remote_context("Failed to parse model hub response")?;
        Ok(models.into_iter().map(AiModel::from).collect())
    }
}
