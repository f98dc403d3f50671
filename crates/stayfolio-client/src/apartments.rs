//! Apartments API
//!
//! Typed operations over [`ApiClient`]. Reads are public and never carry the
//! session token; create, update and delete do.

use std::sync::Arc;

use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use stayfolio_auth::TokenStore;
use stayfolio_types::{Apartment, ApartmentDraft, ApartmentId, LoginRequest, LoginResponse};
use tracing::instrument;

use crate::fetch::{FetchController, FetchSlot, FetchState};
use crate::http::{ApiClient, RequestOptions};
use crate::ClientError;

/// Collection endpoint
pub const APARTMENTS_PATH: &str = "/api/apartments";

/// Login endpoint
pub const LOGIN_API_PATH: &str = "/api/login";

/// Path of a single apartment; the id is percent-encoded as one segment
pub fn apartment_path(id: &ApartmentId) -> String {
    format!("{APARTMENTS_PATH}/{}", urlencoding::encode(id.as_str()))
}

/// Client for the apartment endpoints and login
#[derive(Debug, Clone)]
pub struct ApartmentsClient {
    api: ApiClient,
}

impl ApartmentsClient {
    /// Wrap an API client
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Underlying request client
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Session token store
    pub fn store(&self) -> &Arc<TokenStore> {
        self.api.store()
    }

    /// List all apartments in server order
    #[instrument(skip(self), level = "debug")]
    pub async fn list(&self) -> Result<Vec<Apartment>, ClientError> {
        let response = self
            .api
            .request(Method::GET, APARTMENTS_PATH, RequestOptions::new().without_auth())
            .await?;
        json(ensure_success(response, APARTMENTS_PATH)?).await
    }

    /// Fetch one apartment
    #[instrument(skip(self), fields(id = %id), level = "debug")]
    pub async fn get(&self, id: &ApartmentId) -> Result<Apartment, ClientError> {
        let path = apartment_path(id);
        let response = self
            .api
            .request(Method::GET, &path, RequestOptions::new().without_auth())
            .await?;
        json(ensure_success(response, &path)?).await
    }

    /// Fetch one apartment as a load state for a detail view
    pub async fn load_details(&self, id: &ApartmentId) -> FetchState<Apartment> {
        let result = self
            .api
            .request(
                Method::GET,
                &apartment_path(id),
                RequestOptions::new().without_auth(),
            )
            .await;
        FetchState::from_response(result).await
    }

    /// Bind a detail slot to `id`, loading through this client
    pub fn bind_details(
        &self,
        slot: &FetchSlot<Apartment>,
        id: ApartmentId,
    ) -> FetchController<Apartment> {
        let client = self.clone();
        slot.bind(id, move |id| async move { client.load_details(&id).await })
    }

    /// Create an apartment and return it with its server-assigned id
    #[instrument(skip(self, draft), fields(title = draft.title()), level = "debug")]
    pub async fn create(&self, draft: &ApartmentDraft) -> Result<Apartment, ClientError> {
        let body = serde_json::to_value(draft)?;
        let response = self
            .api
            .request(
                Method::POST,
                APARTMENTS_PATH,
                RequestOptions::new().json(body),
            )
            .await?;
        let created: Apartment = json(ensure_success(response, APARTMENTS_PATH)?).await?;
        tracing::info!(id = %created.id, "apartment created");
        Ok(created)
    }

    /// Replace an apartment's fields
    #[instrument(skip(self, draft), fields(id = %id), level = "debug")]
    pub async fn update(&self, id: &ApartmentId, draft: &ApartmentDraft) -> Result<(), ClientError> {
        let path = apartment_path(id);
        let body = serde_json::to_value(draft)?;
        let response = self
            .api
            .request(Method::PUT, &path, RequestOptions::new().json(body))
            .await?;
        ensure_success(response, &path)?;
        tracing::info!(id = %id, "apartment updated");
        Ok(())
    }

    /// Delete an apartment
    #[instrument(skip(self), fields(id = %id), level = "debug")]
    pub async fn delete(&self, id: &ApartmentId) -> Result<(), ClientError> {
        let path = apartment_path(id);
        let response = self
            .api
            .request(Method::DELETE, &path, RequestOptions::new())
            .await?;
        ensure_success(response, &path)?;
        tracing::info!(id = %id, "apartment deleted");
        Ok(())
    }

    /// Exchange credentials for a session token and store it.
    ///
    /// The email is trimmed; the password is sent as typed.
    #[instrument(skip(self, password), level = "debug")]
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ClientError> {
        let body = serde_json::to_value(LoginRequest::new(email, password))?;
        let response = self
            .api
            .request(
                Method::POST,
                LOGIN_API_PATH,
                RequestOptions::new().without_auth().json(body),
            )
            .await?;

        if !response.status().is_success() {
            tracing::info!(status = response.status().as_u16(), "login refused");
            return Err(ClientError::InvalidCredentials);
        }

        let LoginResponse { token } = json(response).await?;
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(ClientError::MissingToken)?;

        self.store().save(token)?;
        tracing::info!("logged in");
        Ok(())
    }

    /// Forget the session token
    pub fn logout(&self) -> Result<(), ClientError> {
        self.store().clear()?;
        tracing::info!("logged out");
        Ok(())
    }
}

fn ensure_success(response: Response, resource: &str) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ClientError::from_status(status.as_u16(), resource))
    }
}

async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
