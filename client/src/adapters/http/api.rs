//! REST adapter for the status service

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use urlencoding::encode;

use crate::adapters::wire::{FeedItem, ProfileResponse};
use crate::domain::entities::{Post, PostId, Profile};
use crate::domain::ports::StatusApi;
use crate::error::ApiError;

/// Implementation of the status API over HTTP
pub struct HttpStatusApi {
    http: Client,
    base_url: String,
}

impl HttpStatusApi {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::Deserialization(e.to_string()))
        } else if status.as_u16() == 401 {
            Err(ApiError::Unauthorized)
        } else {
            Err(ApiError::Api {
                status: status.as_u16(),
                message: extract_message(response).await,
            })
        }
    }

    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else if status.as_u16() == 401 {
            Err(ApiError::Unauthorized)
        } else {
            Err(ApiError::Api {
                status: status.as_u16(),
                message: extract_message(response).await,
            })
        }
    }
}

/// Pull the human-readable message out of an error body, which is either
/// `{"message": "..."}` or plain text.
async fn extract_message(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.message,
        Err(_) => body,
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Request types for the status API
#[derive(Serialize)]
struct CreatePostRequest<'a> {
    status: &'a str,
    #[serde(rename = "imageUrl")]
    image_url: Option<&'a str>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    password: &'a str,
    #[serde(rename = "confirmPassword")]
    confirm_password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

#[async_trait]
impl StatusApi for HttpStatusApi {
    async fn fetch_feed(&self, token: &str) -> Result<Vec<Post>, ApiError> {
        let response = self
            .http
            .get(self.api_url("/posts"))
            .bearer_auth(token)
            .send()
            .await?;

        let items: Vec<FeedItem> = self.handle_response(response).await?;
        Ok(items.into_iter().map(Post::from).collect())
    }

    async fn fetch_profile(&self, token: &str) -> Result<Profile, ApiError> {
        let response = self
            .http
            .get(self.api_url("/profile"))
            .bearer_auth(token)
            .send()
            .await?;

        let profile: ProfileResponse = self.handle_response(response).await?;
        Ok(profile.into())
    }

    async fn create_post(
        &self,
        token: &str,
        text: &str,
        image_url: Option<&str>,
    ) -> Result<Post, ApiError> {
        let response = self
            .http
            .post(self.api_url("/posts"))
            .bearer_auth(token)
            .json(&CreatePostRequest {
                status: text,
                image_url,
            })
            .send()
            .await?;

        let item: FeedItem = self.handle_response(response).await?;
        Ok(item.into())
    }

    async fn delete_post(&self, token: &str, id: &PostId) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.api_url(&format!("/posts/{}", encode(&id.0))))
            .bearer_auth(token)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.api_url("/auth/login"))
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        let body: TokenResponse = self.handle_response(response).await?;
        Ok(body.token)
    }

    async fn register(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.api_url("/auth/register"))
            .json(&RegisterRequest {
                username,
                password,
                confirm_password,
            })
            .send()
            .await?;

        let body: TokenResponse = self.handle_response(response).await?;
        Ok(body.token)
    }
}
