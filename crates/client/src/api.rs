//! HTTP client for the salon API.
//!
//! Wraps the public endpoints, the auth endpoints, and generic CRUD calls
//! for any [`Resource`] using [`reqwest`]. Authenticated calls take the
//! bearer token from the shared [`Session`].

use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use salon_core::category::CategoryType;
use salon_core::types::DbId;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::ClientError;
use crate::model::{
    Category, FeedbackSubmission, LoginResponse, MessageResponse, PortfolioItem, Service, User,
};
use crate::resource::{RequestBody, Resource};
use crate::session::Session;

/// Client for one salon API root, e.g. `http://localhost:8000/api`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<Session>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, session)
    }

    /// Reuse an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        session: Arc<Session>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            session,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- auth ----

    /// Exchange credentials for a token and store it in the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let response: LoginResponse = self
            .send(
                self.request(Method::POST, "/login")
                    .json(&json!({ "email": email, "password": password })),
            )
            .await?;

        tracing::debug!(user_id = response.user.id, "Signed in");
        self.session
            .sign_in(response.token, response.user.clone())
            .await?;
        Ok(response.user)
    }

    /// Revoke the token on the server and clear the session.
    ///
    /// The session is cleared even when the server call fails; that failure
    /// is only logged.
    pub async fn logout(&self) -> Result<(), ClientError> {
        if self.session.is_authenticated() {
            let result: Result<MessageResponse, _> = match self.authed(Method::POST, "/logout") {
                Ok(builder) => self.send(builder).await,
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                tracing::warn!(error = %e, "Server logout failed, clearing session anyway");
            }
        }
        self.session.sign_out().await
    }

    /// Fetch the signed-in user. A rejected token ends the session.
    pub async fn current_user(&self) -> Result<User, ClientError> {
        let result: Result<User, _> = self.send(self.authed(Method::GET, "/user")?).await;
        match result {
            Ok(user) => {
                self.session.set_user(user.clone());
                Ok(user)
            }
            Err(e) if e.is_unauthorized() => {
                self.session.sign_out().await?;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    // ---- public site ----

    /// Categories for the public site, optionally of one type (plus `both`).
    pub async fn public_categories(
        &self,
        category_type: Option<CategoryType>,
    ) -> Result<Vec<Category>, ClientError> {
        let mut builder = self.request(Method::GET, "/categories");
        if let Some(category_type) = category_type {
            builder = builder.query(&[("type", category_type.as_str())]);
        }
        self.send(builder).await
    }

    pub async fn public_services(
        &self,
        category_id: Option<DbId>,
    ) -> Result<Vec<Service>, ClientError> {
        self.send(with_category(self.request(Method::GET, "/services"), category_id))
            .await
    }

    pub async fn public_portfolio(
        &self,
        category_id: Option<DbId>,
    ) -> Result<Vec<PortfolioItem>, ClientError> {
        self.send(with_category(self.request(Method::GET, "/portfolio"), category_id))
            .await
    }

    /// Send the contact form. Returns the server's thank-you message.
    pub async fn submit_feedback(
        &self,
        submission: &FeedbackSubmission,
    ) -> Result<String, ClientError> {
        let response: MessageResponse = self
            .send(self.request(Method::POST, "/feedback").json(submission))
            .await?;
        Ok(response.message)
    }

    // ---- admin resources ----

    pub async fn list<R: Resource>(&self) -> Result<Vec<R::Item>, ClientError> {
        self.send(self.authed(Method::GET, R::PATH)?).await
    }

    pub async fn create<R: Resource>(&self, input: &R::Create) -> Result<R::Item, ClientError> {
        let builder = self.authed(Method::POST, R::PATH)?;
        self.send(attach(builder, R::create_body(input)?)).await
    }

    pub async fn update<R: Resource>(
        &self,
        id: DbId,
        input: &R::Update,
    ) -> Result<R::Item, ClientError> {
        let builder = self.authed(R::update_method(), &format!("{}/{id}", R::PATH))?;
        self.send(attach(builder, R::update_body(input)?)).await
    }

    /// Delete one item. Returns the server's confirmation message.
    pub async fn delete<R: Resource>(&self, id: DbId) -> Result<String, ClientError> {
        let builder = self.authed(Method::DELETE, &format!("{}/{id}", R::PATH))?;
        let response: MessageResponse = self.send(builder).await?;
        Ok(response.message)
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// A request carrying the session's bearer token.
    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let token = self.session.token().ok_or(ClientError::NotAuthenticated)?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    /// Send a request and decode a successful JSON body. Non-2xx statuses
    /// become [`ClientError::Api`] with the server's message and field errors.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = ClientError::from_response(status, &body);
            tracing::debug!(status = status.as_u16(), error = %error, "API request failed");
            return Err(error);
        }
        Ok(response.json::<T>().await?)
    }
}

fn with_category(builder: RequestBuilder, category_id: Option<DbId>) -> RequestBuilder {
    match category_id {
        Some(id) => builder.query(&[("category_id", id)]),
        None => builder,
    }
}

fn attach(builder: RequestBuilder, body: RequestBody) -> RequestBuilder {
    match body {
        RequestBody::Json(value) => builder.json(&value),
        RequestBody::Multipart(form) => builder.multipart(form),
    }
}
