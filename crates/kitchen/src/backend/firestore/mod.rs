//! Remote recipe store over the Firestore REST API.
//!
//! Talks to a single collection of schemaless documents:
//! - read: list every document, following page tokens
//! - create: insert one document and take the generated id
//! - update: replace all fields of an existing document
//!
//! There is no delete and no query pushdown; filtering happens client-side.

pub mod value;

use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, trace};

use super::RecipeBackend;
use crate::config::RemoteConfig;
use crate::error::{Error, Result};
use crate::recipe::Recipe;

use value::{decode_document, encode_fields, Document};

/// Documents requested per list page.
const PAGE_SIZE: &str = "300";

/// One page of a list call.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// Recipe backend stored in a Firestore collection.
pub struct FirestoreBackend {
    client: Client,
    /// `{base_url}/projects/{project}/databases/(default)/documents/{collection}`
    collection_url: String,
    api_key: String,
}

impl std::fmt::Debug for FirestoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreBackend")
            .field("collection_url", &self.collection_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl FirestoreBackend {
    /// Build a backend for the configured project and collection.
    ///
    /// No request is made here; a bad key only shows up on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client
    /// cannot be built.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::ConfigValidation {
                message: "remote.api_key is required for the remote store".to_string(),
            })?;

        let client = Client::builder()
            .user_agent(concat!("kitchen/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            collection_url: config.collection_url(),
            api_key,
        })
    }

    /// The URL of the recipe collection.
    #[must_use]
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{id}", self.collection_url)
    }

    /// Turn a non-success response into [`Error::RemoteStatus`].
    async fn check(response: Response, operation: &'static str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = if body.is_empty() {
            status.canonical_reason().unwrap_or("unknown").to_string()
        } else {
            body
        };
        Err(Error::RemoteStatus {
            operation,
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait::async_trait]
impl RecipeBackend for FirestoreBackend {
    fn name(&self) -> &'static str {
        "firestore"
    }

    async fn fetch_all(&self) -> Result<Vec<Recipe>> {
        let mut recipes = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(&self.collection_url)
                .query(&[("key", self.api_key.as_str()), ("pageSize", PAGE_SIZE)]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = Self::check(request.send().await?, "list").await?;
            let page: ListDocumentsResponse = response.json().await?;
            trace!("Fetched page of {} documents", page.documents.len());

            for document in &page.documents {
                recipes.push(decode_document(document)?);
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!("Fetched {} recipes from remote store", recipes.len());
        Ok(recipes)
    }

    async fn insert(&self, recipe: Recipe) -> Result<Recipe> {
        let body = json!({ "fields": encode_fields(&recipe)? });
        let response = self
            .client
            .post(&self.collection_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let document: Document = Self::check(response, "add").await?.json().await?;
        let id = document.id()?.to_string();
        debug!(id = %id, "Added recipe to remote store");
        Ok(recipe.with_id(id))
    }

    async fn update(&self, id: &str, recipe: &Recipe) -> Result<()> {
        let body = json!({ "fields": encode_fields(recipe)? });
        let response = self
            .client
            .patch(self.document_url(id))
            .query(&[
                ("key", self.api_key.as_str()),
                ("currentDocument.exists", "true"),
            ])
            .json(&body)
            .send()
            .await?;

        Self::check(response, "update").await?;
        debug!(id, "Updated recipe in remote store");
        Ok(())
    }
}
