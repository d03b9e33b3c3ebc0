use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use crate::models::{Coordinates, ProviderDocument, ProviderFilter, ProviderRecord, RIO_DE_JANEIRO_CENTER};
use crate::services::source::{ProviderSource, SourceError};

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Appwrite API client
///
/// Reads provider profiles from the users collection. Documents missing a
/// display name, service type or neighborhood are dropped while parsing.
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
    fallback_location: Coordinates,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub users: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
            fallback_location: RIO_DE_JANEIRO_CENTER,
        })
    }

    /// Coordinates assigned to provider documents that have none
    pub fn with_fallback_location(mut self, fallback: Coordinates) -> Self {
        self.fallback_location = fallback;
        self
    }

    fn provider_queries(filter: &ProviderFilter) -> Vec<String> {
        let mut queries = vec![format!("equal(\"userType\", \"{}\")", filter.role)];

        if filter.must_be_profile_complete {
            queries.push("equal(\"isProfileComplete\", true)".to_string());
        }

        if let Some(limit) = filter.limit {
            queries.push(format!("limit({})", limit));
        }

        queries
    }

    /// Query provider profiles matching `filter`
    pub async fn query_providers(
        &self,
        filter: &ProviderFilter,
    ) -> Result<Vec<ProviderRecord>, AppwriteError> {
        let query_string = Self::provider_queries(filter)
            .iter()
            .map(|q| format!("queries[]={}", urlencoding::encode(q)))
            .collect::<Vec<_>>()
            .join("&");

        let url = format!(
            "{}/databases/{}/collections/{}/documents?{}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.users,
            query_string
        );

        tracing::debug!("Querying providers from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppwriteError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to query providers: {} - {}", status, body);
            return Err(AppwriteError::ApiError(format!(
                "Failed to query providers: {}",
                status
            )));
        }

        let json: Value = response.json().await?;
        self.parse_providers(&json)
    }

    fn parse_providers(&self, json: &Value) -> Result<Vec<ProviderRecord>, AppwriteError> {
        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        let providers: Vec<ProviderRecord> = documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                let mut document: ProviderDocument = match serde_json::from_value(data.clone()) {
                    Ok(document) => document,
                    Err(e) => {
                        tracing::warn!("Skipping unparseable provider document: {}", e);
                        return None;
                    }
                };
                if document.uid.is_none() {
                    document.uid = doc.get("$id").and_then(|id| id.as_str()).map(str::to_string);
                }
                document.into_record(self.fallback_location)
            })
            .collect();

        tracing::debug!(
            "Parsed {} usable providers from {} documents",
            providers.len(),
            documents.len()
        );

        Ok(providers)
    }
}

#[async_trait]
impl ProviderSource for AppwriteClient {
    async fn list_available_providers(
        &self,
        filter: ProviderFilter,
    ) -> Result<Vec<ProviderRecord>, SourceError> {
        Ok(self.query_providers(&filter).await?)
    }
}
