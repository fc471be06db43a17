//! The single outgoing HTTP surface. Every other service goes through the
//! gateway; it owns credential propagation, the network-identity header, and
//! the uniform error contract.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::auth::{ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest};
use crate::models::contest::{Attachment, Contest, ContestList, JoinRequest, JoinResponse};
use crate::models::leaderboard::LeaderboardPage;
use crate::models::preferences::Preferences;
use crate::models::problem::{Problem, ProblemList, RunRequest, RunResponse};
use crate::models::settings::{
    FooterContent, HomepageContent, RegistrationSettings, TurnstileSettings,
    TurnstileVerifyResponse,
};
use crate::models::submission::{NewSubmission, Submission};
use crate::models::User;
use crate::storage::{KvStore, SessionStore, keys};

/// Header carrying the STUN-derived public address on auth mutations.
pub const WEBRTC_IP_HEADER: &str = "X-WebRTC-IP";

pub struct ApiGateway {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
    /// Latched by the first 401; consumed once by the auth service to drive
    /// the redirect to `/login`.
    auth_expired: AtomicBool,
    network_identity: std::sync::RwLock<Option<String>>,
}

impl ApiGateway {
    pub fn new(api: &ApiConfig, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::BaseUrl(e.to_string()))?;
        let base_url = api.base_url();
        reqwest::Url::parse(&base_url).map_err(|e| ApiError::BaseUrl(e.to_string()))?;
        Ok(Self {
            http,
            base_url,
            session,
            auth_expired: AtomicBool::new(false),
            network_identity: std::sync::RwLock::new(None),
        })
    }

    /// Record the resolved public address; subsequent auth mutations carry
    /// it as [`WEBRTC_IP_HEADER`].
    pub fn set_network_identity(&self, ip: String) {
        if let Ok(mut slot) = self.network_identity.write() {
            *slot = Some(ip);
        }
    }

    pub fn network_identity(&self) -> Option<String> {
        self.network_identity.read().ok().and_then(|s| s.clone())
    }

    /// One-shot read of the 401 latch. Returns true exactly once after the
    /// session expired.
    pub fn take_auth_expired(&self) -> bool {
        self.auth_expired.swap(false, Ordering::SeqCst)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut rb = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(token) = self.session.get(keys::AUTH_TOKEN) {
            rb = rb.bearer_auth(token);
        }
        rb
    }

    /// Same as `request` plus the network-identity header when resolved.
    fn auth_request(&self, method: Method, path: &str) -> RequestBuilder {
        let rb = self.request(method, path);
        match self.network_identity() {
            Some(ip) => rb.header(WEBRTC_IP_HEADER, ip),
            None => rb,
        }
    }

    async fn send<T: DeserializeOwned>(&self, rb: RequestBuilder) -> Result<T, ApiError> {
        let response = rb.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(self.classify(status.as_u16(), &body))
        }
    }

    async fn send_unit(&self, rb: RequestBuilder) -> Result<(), ApiError> {
        let response = rb.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(self.classify(status.as_u16(), &body))
        }
    }

    async fn send_bytes(&self, rb: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = rb.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(self.classify(status.as_u16(), &body))
        }
    }

    fn classify(&self, status: u16, body: &str) -> ApiError {
        let err = ApiError::from_status_body(status, body);
        if matches!(err, ApiError::AuthRequired) {
            // First 401 wins; the token is gone either way.
            if !self.auth_expired.swap(true, Ordering::SeqCst) {
                debug!("session expired, latching auth redirect");
            }
            self.session.remove(keys::AUTH_TOKEN);
        }
        err
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path)).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    // Auth.

    pub async fn login(&self, body: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.send(self.auth_request(Method::POST, "/auth/login").json(body))
            .await
    }

    pub async fn register(&self, body: &RegisterRequest) -> Result<(), ApiError> {
        self.send_unit(self.auth_request(Method::POST, "/auth/register").json(body))
            .await
    }

    pub async fn change_password(&self, body: &ChangePasswordRequest) -> Result<(), ApiError> {
        self.send_unit(self.request(Method::POST, "/auth/change-password").json(body))
            .await
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        self.get("/auth/me").await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.send_unit(self.request(Method::POST, "/auth/logout"))
            .await
    }

    // Problems.

    pub async fn list_problems(&self, page: u64, page_size: u64) -> Result<ProblemList, ApiError> {
        self.send(
            self.request(Method::GET, "/problems")
                .query(&[("page", page), ("pageSize", page_size)]),
        )
        .await
    }

    pub async fn get_problem(&self, id: i64) -> Result<Problem, ApiError> {
        self.get(&format!("/problems/{id}")).await
    }

    pub async fn run(&self, body: &RunRequest) -> Result<RunResponse, ApiError> {
        self.post_json("/run", body).await
    }

    // Submissions.

    pub async fn list_submissions(
        &self,
        contest_id: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<Submission>, ApiError> {
        let mut rb = self.request(Method::GET, "/submissions");
        if let Some(id) = contest_id {
            rb = rb.query(&[("contest_id", id)]);
        }
        if let Some(limit) = limit {
            rb = rb.query(&[("limit", limit)]);
        }
        self.send(rb).await
    }

    pub async fn create_submission(&self, body: &NewSubmission) -> Result<Submission, ApiError> {
        self.post_json("/submissions", body).await
    }

    pub async fn get_submission(&self, id: i64) -> Result<Submission, ApiError> {
        self.get(&format!("/submissions/{id}")).await
    }

    // Contests.

    pub async fn list_contests(
        &self,
        page: u64,
        page_size: u64,
        filter: Option<&str>,
    ) -> Result<ContestList, ApiError> {
        let mut rb = self
            .request(Method::GET, "/contests/public")
            .query(&[("page", page), ("pageSize", page_size)]);
        if let Some(filter) = filter {
            rb = rb.query(&[("filter", filter)]);
        }
        self.send(rb).await
    }

    pub async fn join_contest(
        &self,
        id: i64,
        password: Option<String>,
    ) -> Result<JoinResponse, ApiError> {
        self.post_json(&format!("/contests/{id}/join"), &JoinRequest { password })
            .await
    }

    pub async fn get_contest(&self, id: i64) -> Result<Contest, ApiError> {
        self.get(&format!("/contests/public/{id}")).await
    }

    pub async fn get_contest_problem(&self, id: i64, order: usize) -> Result<Problem, ApiError> {
        self.get(&format!("/contests/public/{id}/problem/{order}"))
            .await
    }

    pub async fn get_leaderboard(
        &self,
        id: i64,
        page: u64,
        page_size: u64,
        sort: &str,
        order: &str,
    ) -> Result<LeaderboardPage, ApiError> {
        self.send(
            self.request(Method::GET, &format!("/contests/public/{id}/leaderboard"))
                .query(&[
                    ("page", page.to_string()),
                    ("pageSize", page_size.to_string()),
                    ("sort", sort.to_string()),
                    ("order", order.to_string()),
                ]),
        )
        .await
    }

    pub async fn list_attachments(&self, id: i64) -> Result<Vec<Attachment>, ApiError> {
        self.get(&format!("/contests/public/{id}/attachments")).await
    }

    pub async fn download_attachment(&self, id: i64, name: &str) -> Result<Vec<u8>, ApiError> {
        self.send_bytes(self.request(
            Method::GET,
            &format!("/contests/public/{id}/attachments/{name}"),
        ))
        .await
    }

    /// Contest data export as an opaque blob.
    pub async fn export_contest(&self, id: i64) -> Result<Vec<u8>, ApiError> {
        self.send_bytes(self.request(Method::GET, &format!("/contests/{id}/export")))
            .await
    }

    // Preferences and settings.

    /// Raw server-side preferences. Returned untyped so the store can merge
    /// partial server state over local state key by key.
    pub async fn get_preferences(&self) -> Result<serde_json::Value, ApiError> {
        self.get("/user/preferences").await
    }

    pub async fn put_preferences(&self, preferences: &Preferences) -> Result<(), ApiError> {
        self.send_unit(
            self.request(Method::PUT, "/user/preferences")
                .json(&serde_json::json!({ "preferences": preferences })),
        )
        .await
    }

    pub async fn turnstile_settings(&self) -> Result<TurnstileSettings, ApiError> {
        self.get("/settings/turnstile").await
    }

    pub async fn verify_turnstile(&self, token: &str) -> Result<TurnstileVerifyResponse, ApiError> {
        self.post_json(
            "/settings/turnstile/verify",
            &serde_json::json!({ "token": token }),
        )
        .await
    }

    pub async fn registration_settings(&self) -> Result<RegistrationSettings, ApiError> {
        self.get("/settings/registration").await
    }

    pub async fn homepage(&self) -> Result<HomepageContent, ApiError> {
        self.get("/settings/homepage").await
    }

    /// Footer content; absence or failure yields an empty footer. The one
    /// silent fallback in the error policy.
    pub async fn footer_or_empty(&self) -> FooterContent {
        match self.get::<FooterContent>("/settings/footer").await {
            Ok(footer) => footer,
            Err(e) => {
                debug!(error = %e, "footer fetch failed, rendering empty");
                FooterContent::default()
            }
        }
    }
}
