//! TCGplayer catalog API client
//!
//! Thin async wrapper around the catalog endpoints. Every response arrives
//! in the same envelope (`totalItems`/`success`/`errors`/`results`); the
//! count operations issue a `limit=1` request and read `totalItems`.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Result, SyncError};
use crate::tcgplayer::records::{
    CardRecord, ConditionRecord, PrintingRecord, RarityRecord, SetRecord,
};

/// Production API endpoint
const DEFAULT_BASE_URL: &str = "https://api.tcgplayer.com";

const USER_AGENT: &str = "catalog_sync/1.0";

/// Envelope wrapped around every catalog endpoint response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<T> {
    #[serde(default)]
    total_items: u64,
    success: bool,
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

/// Async client for the TCGplayer catalog API
pub struct TcgPlayerClient {
    http: reqwest::Client,
    base_url: String,
    category_id: u32,
    bearer_token: Option<String>,
}

impl TcgPlayerClient {
    /// Client against the production endpoint
    pub fn new(category_id: u32, bearer_token: Option<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, category_id, bearer_token)
    }

    /// Client against a non-default endpoint (tests point this at a mock server)
    pub fn with_base_url(base_url: &str, category_id: u32, bearer_token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            category_id,
            bearer_token,
        }
    }

    async fn get_envelope<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<Envelope<T>> {
        let url = format!("{}{}", self.base_url, path_and_query);

        let mut request = self.http.get(&url).header("User-Agent", USER_AGENT);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(SyncError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        if !envelope.success {
            return Err(SyncError::Api(envelope.errors));
        }

        Ok(envelope)
    }

    /// Fetch all printings for the category
    pub async fn fetch_card_printings(&self) -> Result<Vec<PrintingRecord>> {
        let envelope = self
            .get_envelope(&format!(
                "/catalog/categories/{}/printings",
                self.category_id
            ))
            .await?;
        Ok(envelope.results)
    }

    /// Fetch all conditions for the category
    pub async fn fetch_card_conditions(&self) -> Result<Vec<ConditionRecord>> {
        let envelope = self
            .get_envelope(&format!(
                "/catalog/categories/{}/conditions",
                self.category_id
            ))
            .await?;
        Ok(envelope.results)
    }

    /// Fetch all rarities for the category
    pub async fn fetch_card_rarities(&self) -> Result<Vec<RarityRecord>> {
        let envelope = self
            .get_envelope(&format!("/catalog/categories/{}/rarities", self.category_id))
            .await?;
        Ok(envelope.results)
    }

    /// Fetch one window of the set (group) collection
    pub async fn fetch_card_sets(&self, offset: u64, limit: u64) -> Result<Vec<SetRecord>> {
        let envelope = self
            .get_envelope(&format!(
                "/catalog/categories/{}/groups?offset={}&limit={}",
                self.category_id, offset, limit
            ))
            .await?;
        Ok(envelope.results)
    }

    /// Total number of sets in the remote collection
    pub async fn fetch_total_card_set_count(&self) -> Result<u64> {
        let envelope: Envelope<SetRecord> = self
            .get_envelope(&format!(
                "/catalog/categories/{}/groups?offset=0&limit=1",
                self.category_id
            ))
            .await?;
        Ok(envelope.total_items)
    }

    /// Fetch one window of a set's card collection, SKUs included
    pub async fn fetch_cards(&self, offset: u64, limit: u64, set_id: i64) -> Result<Vec<CardRecord>> {
        let envelope = self
            .get_envelope(&format!(
                "/catalog/products?categoryId={}&groupId={}&offset={}&limit={}&includeSkus=true",
                self.category_id, set_id, offset, limit
            ))
            .await?;
        Ok(envelope.results)
    }

    /// Total number of cards in a set
    pub async fn fetch_total_card_count(&self, set_id: i64) -> Result<u64> {
        let envelope: Envelope<CardRecord> = self
            .get_envelope(&format!(
                "/catalog/products?categoryId={}&groupId={}&offset=0&limit=1&includeSkus=true",
                self.category_id, set_id
            ))
            .await?;
        Ok(envelope.total_items)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
