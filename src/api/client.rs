//! HTTP client with an explicit authorization interceptor.

use super::{ApiError, AttendeeApi, AttendeeSubmission, LoginCredentials, SessionStore, User};
use crate::config::ApiConfig;
use crate::matches::MatchesResponse;
use crate::metrics::{ClientMetrics, Outcome};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;

/// User-Agent header sent with every request.
pub const USER_AGENT: &str = concat!("spot-my-photo/", env!("CARGO_PKG_VERSION"));

/// Body of `/login` and `/refresh-token` responses.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    user: User,
}

/// REST client for the photo-sharing API.
///
/// Cookies are kept across requests so the session established by
/// `login` or `refresh_token` is sent with every later call.
pub struct HttpClient {
    http: Client,
    base_url: String,
    session: SessionStore,
    metrics: ClientMetrics,
}

impl HttpClient {
    /// Builds a client for `config`, sharing `session` and `metrics` with the caller.
    pub fn new(
        config: &ApiConfig,
        session: SessionStore,
        metrics: ClientMetrics,
    ) -> Result<Self, ApiError> {
        config
            .validate()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            base_url: config.root().to_string(),
            session,
            metrics,
        })
    }

    /// Absolute URL of an API path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// URL of an attendee's matches, with the id pushed as one escaped
    /// path segment.
    pub fn matches_url(&self, attendee_id: &str) -> Result<Url, ApiError> {
        if matches!(attendee_id, "" | "." | "..") {
            return Err(ApiError::InvalidRequest(format!(
                "attendee id {attendee_id:?} is not a path segment"
            )));
        }

        let mut url = Url::parse(&self.endpoint("attendees"))
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidRequest(format!("{} cannot carry a path", self.base_url)))?
            .push(attendee_id)
            .push("matches");
        Ok(url)
    }

    /// Session shared with the application context.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Counters updated by every call.
    pub fn metrics(&self) -> &ClientMetrics {
        &self.metrics
    }

    /// Sends a request built by `build`, refreshing the session on 401.
    ///
    /// At most one refresh and one retry happen per call; `build` is
    /// invoked again for the retry because multipart bodies cannot be
    /// cloned.
    pub async fn send_authorized<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn(&Client) -> Result<RequestBuilder, ApiError>,
    {
        let response = build(&self.http)?.send().await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return ensure_success(response).await;
        }

        tracing::warn!(url = %response.url(), "Authorization expired, refreshing session");
        self.refresh_token().await?;

        let retried = build(&self.http)?.send().await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(url = %retried.url(), "Request still unauthorized after refresh");
            return Err(ApiError::Unauthorized);
        }
        ensure_success(retried).await
    }

    /// Exchanges the refresh cookie for a new session.
    ///
    /// Never intercepted itself. On failure the local session is cleared.
    pub async fn refresh_token(&self) -> Result<User, ApiError> {
        let result = self.post_auth("refresh-token", None).await;
        self.metrics.record_auth_refresh(Outcome::of(&result));

        match result {
            Ok(user) => {
                self.session.authenticate(user.clone()).await;
                tracing::info!("Session refreshed");
                Ok(user)
            }
            Err(e) => {
                self.session.clear().await;
                Err(ApiError::RefreshFailed(e.to_string()))
            }
        }
    }

    /// Logs in with email and password. Not intercepted.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User, ApiError> {
        let user = self.post_auth("login", Some(credentials)).await?;
        self.session.authenticate(user.clone()).await;
        tracing::info!(email = %credentials.email, "Logged in");
        Ok(user)
    }

    /// Ends the session on the server, then forgets it locally.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = self.endpoint("logout");
        self.send_authorized(|http| Ok(http.post(&url))).await?;
        self.session.clear().await;
        Ok(())
    }

    async fn post_auth(
        &self,
        path: &str,
        credentials: Option<&LoginCredentials>,
    ) -> Result<User, ApiError> {
        let mut request = self.http.post(self.endpoint(path));
        if let Some(credentials) = credentials {
            request = request.json(credentials);
        }

        let response = request.send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        let body: AuthResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        Ok(body.user)
    }
}

impl AttendeeApi for HttpClient {
    async fn create_attendee(&self, submission: AttendeeSubmission) -> Result<(), ApiError> {
        let url = self.endpoint("attendees");

        tracing::debug!(
            url = %url,
            has_email = submission.identity.email.is_some(),
            has_phone = submission.identity.phone_number.is_some(),
            image_bytes = submission.image.len(),
            "Submitting attendee"
        );

        let result = self
            .send_authorized(|http| Ok(http.post(&url).multipart(submission_form(&submission)?)))
            .await;
        self.metrics.record_submission(Outcome::of(&result));

        result?;
        tracing::info!(name = %submission.identity.name, "Attendee created");
        Ok(())
    }

    async fn fetch_matches(&self, attendee_id: &str) -> Result<MatchesResponse, ApiError> {
        let result = async {
            let url = self.matches_url(attendee_id)?;
            let response = self.send_authorized(|http| Ok(http.get(url.clone()))).await?;
            response
                .json::<MatchesResponse>()
                .await
                .map_err(|e| ApiError::InvalidResponse(e.to_string()))
        }
        .await;
        self.metrics.record_match_fetch(Outcome::of(&result));

        result
    }
}

/// Builds the multipart body for attendee creation.
fn submission_form(submission: &AttendeeSubmission) -> Result<Form, ApiError> {
    let identity = &submission.identity;
    let mut form = Form::new().text("name", identity.name.clone());
    if let Some(email) = &identity.email {
        form = form.text("email", email.clone());
    }
    if let Some(phone) = &identity.phone_number {
        form = form.text("phoneNumber", phone.clone());
    }

    let image = &submission.image;
    let mut part = Part::bytes(image.bytes().to_vec()).file_name(image.filename().to_string());
    // An empty type is sent without a Content-Type header.
    if !image.mime().is_empty() {
        part = part.mime_str(image.mime()).map_err(|e| {
            ApiError::InvalidRequest(format!("image content type {:?}: {}", image.mime(), e))
        })?;
    }

    Ok(form.part("image", part))
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}
