//! REST API client for the character endpoints.
//!
//! Wraps the backend's `/characters` collection and record resources
//! (list, create, read, update, delete) using [`reqwest`].

use async_trait::async_trait;
use lore_core::character::Character;
use lore_core::form::FormFields;
use lore_core::types::DbId;

/// Errors from the character REST API layer.
///
/// The UI reports every variant the same way ("request failed"); the
/// distinction only shows up in logs.
#[derive(Debug, thiserror::Error)]
pub enum CharacterApiError {
    /// The HTTP request itself failed (network, DNS, TLS, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Character API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Operations the list controller needs from the backend.
///
/// Futures are `?Send` so the same implementation runs on the browser event
/// loop, where `fetch` futures are not `Send`.
#[async_trait(?Send)]
pub trait CharacterApi {
    /// `GET /characters/`
    async fn list_characters(&self) -> Result<Vec<Character>, CharacterApiError>;

    /// `GET /characters/{id}`
    async fn get_character(&self, id: DbId) -> Result<Character, CharacterApiError>;

    /// `POST /characters/` with the form fields as a flat JSON object.
    async fn create_character(&self, fields: &FormFields) -> Result<Character, CharacterApiError>;

    /// `PUT /characters/{id}`; `fields` must not contain the id.
    async fn update_character(
        &self,
        id: DbId,
        fields: &FormFields,
    ) -> Result<Character, CharacterApiError>;

    /// `DELETE /characters/{id}`; the confirmation body is discarded.
    async fn delete_character(&self, id: DbId) -> Result<(), CharacterApiError>;
}

/// HTTP client for one character backend.
pub struct HttpCharacterApi {
    client: reqwest::Client,
    api_url: String,
}

impl HttpCharacterApi {
    /// Create a new API client.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://localhost:8000`. A trailing
    ///   slash is ignored.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    fn collection_url(&self) -> String {
        format!("{}/characters/", self.api_url)
    }

    fn record_url(&self, id: DbId) -> String {
        format!("{}/characters/{}", self.api_url, id)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`CharacterApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CharacterApiError> {
        let status = response.status();
        if !status.is_success() {
            let url = response.url().to_string();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), url = %url, "Character API returned an error status");
            return Err(CharacterApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CharacterApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait(?Send)]
impl CharacterApi for HttpCharacterApi {
    async fn list_characters(&self) -> Result<Vec<Character>, CharacterApiError> {
        tracing::debug!(url = %self.collection_url(), "Listing characters");
        let response = self.client.get(self.collection_url()).send().await?;
        Self::parse_response(response).await
    }

    async fn get_character(&self, id: DbId) -> Result<Character, CharacterApiError> {
        tracing::debug!(character_id = id, "Fetching character");
        let response = self.client.get(self.record_url(id)).send().await?;
        Self::parse_response(response).await
    }

    async fn create_character(&self, fields: &FormFields) -> Result<Character, CharacterApiError> {
        tracing::debug!(fields = fields.len(), "Creating character");
        let response = self
            .client
            .post(self.collection_url())
            .json(fields)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn update_character(
        &self,
        id: DbId,
        fields: &FormFields,
    ) -> Result<Character, CharacterApiError> {
        tracing::debug!(character_id = id, fields = fields.len(), "Updating character");
        let response = self
            .client
            .put(self.record_url(id))
            .json(fields)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn delete_character(&self, id: DbId) -> Result<(), CharacterApiError> {
        tracing::debug!(character_id = id, "Deleting character");
        let response = self.client.delete(self.record_url(id)).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
