use gloo_net::http::Response;

use crate::data::{CheckIn, CheckedIn, ErrorBody, Session, SessionStarted, StartSession};
use crate::id::SessionId;
use crate::validate::{RollNo, Subject};

#[derive(Debug, Clone, Copy)]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend refused the request and said why.
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Unprocessable request to {0}")]
    Unprocessable(String),
    #[error("Internal Server Error")]
    InternalServerError,
    #[error("Unauthorized Access")]
    UnauthorizedAccess,
    #[error("Forbidden Access")]
    ForbiddenAccess,
    #[error("Network error: {0}")]
    NetworkError(gloo_net::Error),
    #[error("Parse error: {0}")]
    ParseError(gloo_net::Error),
    #[error("Serialize error: {0}")]
    SerializeError(gloo_net::Error),
    #[error("Unexpected response status code: {0}")]
    UnexpectedStatusCode(u16),
}

impl ApiError {
    /// HTTP status of the failed response, if a response arrived at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::NotFound(_) => Some(404),
            ApiError::BadRequest(_) => Some(400),
            ApiError::Unprocessable(_) => Some(422),
            ApiError::InternalServerError => Some(500),
            ApiError::UnauthorizedAccess => Some(401),
            ApiError::ForbiddenAccess => Some(403),
            ApiError::UnexpectedStatusCode(status) => Some(*status),
            ApiError::NetworkError(_) | ApiError::ParseError(_) | ApiError::SerializeError(_) => {
                None
            }
        }
    }

    /// The structured `detail` message sent by the backend.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } => Some(detail),
            _ => None,
        }
    }

    /// True when the request never got a response.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::NetworkError(_))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Maps a raw status and an optional `detail` to an error.
/// A string detail wins over the status-based variants.
pub(crate) fn status_error(status: u16, detail: Option<String>, endpoint: &str) -> ApiError {
    if let Some(detail) = detail {
        return ApiError::Rejected { status, detail };
    }
    match status {
        400 => ApiError::BadRequest(format!("Bad request to {endpoint}")),
        401 => ApiError::UnauthorizedAccess,
        403 => ApiError::ForbiddenAccess,
        404 => ApiError::NotFound(format!("{endpoint} not found")),
        422 => ApiError::Unprocessable(endpoint.to_string()),
        500..=599 => ApiError::InternalServerError,
        status => ApiError::UnexpectedStatusCode(status),
    }
}

// Reusable response handling functions
async fn handle_response_status(response: Response, endpoint: &str) -> ApiResult<Response> {
    let status = response.status();
    if (200..=299).contains(&status) {
        return Ok(response);
    }

    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message().map(str::to_owned));
    tracing::debug!(status, endpoint, ?detail, "request rejected");

    Err(status_error(status, detail, endpoint))
}

async fn parse_json_response<T>(response: Response) -> ApiResult<T>
where
    T: serde::de::DeserializeOwned,
{
    response.json::<T>().await.map_err(ApiError::ParseError)
}

// Combined function for the common pattern
async fn handle_json_response<T>(response: Response, endpoint: &str) -> ApiResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let validated_response = handle_response_status(response, endpoint).await?;
    parse_json_response(validated_response).await
}

#[async_trait::async_trait(?Send)]
pub trait ApiClient {
    // Core request methods
    async fn make_request(&self, method: HttpMethod, endpoint: &str) -> ApiResult<Response>;

    async fn make_request_with_body<B>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<Response>
    where
        B: serde::Serialize;

    // HTTP method implementations
    async fn get<T>(&self, endpoint: &str) -> ApiResult<T>
    where
        T: serde::de::DeserializeOwned;

    async fn post<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize;

    /// POST without a request body; whatever the backend answers on success is ignored.
    async fn post_empty(&self, endpoint: &str) -> ApiResult<()>;
}

pub struct HttpApiClient {
    root_url: String,
}

impl HttpApiClient {
    pub fn new(root_url: impl Into<String>) -> Self {
        Self {
            root_url: root_url.into(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl ApiClient for HttpApiClient {
    async fn make_request(&self, method: HttpMethod, endpoint: &str) -> ApiResult<Response> {
        let url = format!("{}{}", self.root_url, endpoint);

        let request = match method {
            HttpMethod::Get => gloo_net::http::Request::get(&url),
            HttpMethod::Post => gloo_net::http::Request::post(&url),
        };

        request
            .send()
            .await
            .map_err(ApiError::NetworkError)
    }

    async fn make_request_with_body<B>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<Response>
    where
        B: serde::Serialize,
    {
        let url = format!("{}{}", self.root_url, endpoint);

        let request = match method {
            HttpMethod::Get => gloo_net::http::Request::get(&url),
            HttpMethod::Post => gloo_net::http::Request::post(&url),
        };

        request
            .json(body)
            .map_err(ApiError::SerializeError)?
            .send()
            .await
            .map_err(ApiError::NetworkError)
    }

    async fn get<T>(&self, endpoint: &str) -> ApiResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.make_request(HttpMethod::Get, endpoint).await?;
        handle_json_response(response, endpoint).await
    }

    async fn post<T, B>(&self, endpoint: &str, body: &B) -> ApiResult<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize,
    {
        let response = self
            .make_request_with_body(HttpMethod::Post, endpoint, body)
            .await?;
        handle_json_response(response, endpoint).await
    }

    async fn post_empty(&self, endpoint: &str) -> ApiResult<()> {
        let response = self.make_request(HttpMethod::Post, endpoint).await?;
        handle_response_status(response, endpoint).await.map(|_| ())
    }
}

/// The attendance operations the views need from the backend.
///
/// Inputs are the validated newtypes from [`crate::validate`], so nothing that fails
/// client-side validation can be sent.
#[async_trait::async_trait(?Send)]
pub trait AttendanceApi {
    async fn start_session(&self, subject: &Subject) -> ApiResult<SessionStarted>;

    async fn fetch_session(&self, id: &SessionId) -> ApiResult<Session>;

    async fn check_in(&self, id: &SessionId, roll_no: &RollNo) -> ApiResult<CheckedIn>;

    async fn end_session(&self, id: &SessionId) -> ApiResult<()>;
}

/// The attendance backend reached over HTTP.
pub struct Api<C = HttpApiClient> {
    client: C,
}

impl Api<HttpApiClient> {
    pub fn new(base_url: &str) -> Self {
        Api {
            client: HttpApiClient::new(base_url),
        }
    }
}

impl<C> Api<C> {
    pub fn with_client(client: C) -> Self {
        Api { client }
    }
}

#[async_trait::async_trait(?Send)]
impl<C: ApiClient> AttendanceApi for Api<C> {
    async fn start_session(&self, subject: &Subject) -> ApiResult<SessionStarted> {
        let body = StartSession {
            subject: subject.as_str().to_string(),
        };
        self.client.post("/session/start", &body).await
    }

    async fn fetch_session(&self, id: &SessionId) -> ApiResult<Session> {
        self.client.get(&format!("/session/{id}")).await
    }

    async fn check_in(&self, id: &SessionId, roll_no: &RollNo) -> ApiResult<CheckedIn> {
        let body = CheckIn {
            roll_no: roll_no.as_str().to_string(),
        };
        self.client
            .post(&format!("/session/{id}/checkin"), &body)
            .await
    }

    async fn end_session(&self, id: &SessionId) -> ApiResult<()> {
        self.client.post_empty(&format!("/session/{id}/end")).await
    }
}
