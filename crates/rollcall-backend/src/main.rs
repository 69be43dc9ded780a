mod config;
mod error;
mod handlers;
mod services;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use rollcall::errors::Report;
use rollcall::log;

use config::Settings;
use services::SessionServiceInMemory;

pub struct AppState {
    pub sessions: SessionServiceInMemory,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(sessions: SessionServiceInMemory) -> Self {
        Self {
            sessions,
            started_at: Utc::now(),
        }
    }
}

fn cors(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Setup the routes for the server and configure CORS
fn app(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(handlers::health::get))
        .route("/session/start", post(handlers::session::start))
        .route("/session/{session_id}", get(handlers::session::get))
        .route("/session/{session_id}/checkin", post(handlers::session::check_in))
        .route("/session/{session_id}/end", post(handlers::session::end))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Report> {
    // Setup logging
    rollcall::log::setup()?;

    let settings = Settings::from_env()?;
    log::debug!(?settings, "loaded settings");

    let state = Arc::new(AppState::new(SessionServiceInMemory::new(
        settings.session_ttl,
    )));
    let app = app(state, cors(&settings.allowed_origins));

    let listener = tokio::net::TcpListener::bind(settings.addr).await?;
    log::info!("Starting server on http://{}", listener.local_addr()?);
    log::info!("Press Ctrl+C to stop the server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Shutting down server");

    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            log::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(err) => {
                log::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::info!("Signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use chrono::TimeDelta;
    use rollcall::data::{CheckedIn, ErrorBody, HealthResponse, Session, SessionStarted, SessionStatus};
    use rollcall::serde::de::DeserializeOwned;
    use rollcall::serde_json::{self, json};
    use tower::ServiceExt;

    use super::*;
    use crate::services::sessions::tests::ManualClock;

    fn test_app() -> (Router, ManualClock) {
        let clock = ManualClock::new();
        let sessions = SessionServiceInMemory::with_clock(TimeDelta::hours(2), clock.clock());
        let origins = vec!["http://localhost:8080".to_string()];
        (app(Arc::new(AppState::new(sessions)), cors(&origins)), clock)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> Response {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn read<T: DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn detail(response: Response) -> String {
        read::<ErrorBody>(response).await.message().unwrap().to_string()
    }

    async fn start(app: &Router, subject: &str) -> SessionStarted {
        let response = send(app, "POST", "/session/start", Some(json!({ "subject": subject }))).await;
        assert_eq!(response.status(), StatusCode::OK);
        read(response).await
    }

    #[tokio::test]
    async fn full_session_lifecycle() {
        let (app, _) = test_app();
        let started = start(&app, "Artificial Intelligence").await;
        let id = started.session_id.as_str();

        let response = send(&app, "POST", &format!("/session/{id}/checkin"), Some(json!({ "roll_no": " AIE22039 " }))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read::<CheckedIn>(response).await, CheckedIn { ok: true, total: 1 });

        let response = send(&app, "GET", &format!("/session/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let session: Session = read(response).await;
        assert_eq!(session.subject, "Artificial Intelligence");
        assert_eq!(session.status, SessionStatus::Active);
        assert_eq!(session.attendees_count, 1);
        assert_eq!(session.attendees[0].roll_no, "AIE22039");

        let response = send(&app, "POST", &format!("/session/{id}/end"), None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let session: Session = read(send(&app, "GET", &format!("/session/{id}"), None).await).await;
        assert_eq!(session.status, SessionStatus::Ended);
    }

    #[tokio::test]
    async fn invalid_subjects_are_unprocessable_with_detail() {
        let (app, _) = test_app();

        let response = send(&app, "POST", "/session/start", Some(json!({ "subject": "   " }))).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(detail(response).await, "Please enter a subject");

        let response = send(&app, "POST", "/session/start", Some(json!({ "subject": "x".repeat(26) }))).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(detail(response).await, "Subject cannot exceed 25 characters");

        let response = send(&app, "POST", "/session/start", Some(json!({ "topic": "Maths" }))).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(!detail(response).await.is_empty());
    }

    #[tokio::test]
    async fn check_in_rejections_carry_details() {
        let (app, _) = test_app();
        let id = start(&app, "Maths").await.session_id;
        let uri = format!("/session/{id}/checkin");

        let response = send(&app, "POST", &uri, Some(json!({ "roll_no": "AIE 22039" }))).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            detail(response).await,
            "Roll number can only contain letters, numbers, and hyphens"
        );

        send(&app, "POST", &uri, Some(json!({ "roll_no": "AIE22039" }))).await;
        let response = send(&app, "POST", &uri, Some(json!({ "roll_no": "aie22039" }))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(detail(response).await, "Student already checked in");

        send(&app, "POST", &format!("/session/{id}/end"), None).await;
        let response = send(&app, "POST", &uri, Some(json!({ "roll_no": "AIE22001" }))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(detail(response).await, "Session has ended");
    }

    #[tokio::test]
    async fn unknown_sessions_are_404_everywhere() {
        let (app, _) = test_app();

        for (method, uri, body) in [
            ("GET", "/session/nope", None),
            ("POST", "/session/nope/checkin", Some(json!({ "roll_no": "AIE22039" }))),
            ("POST", "/session/nope/end", None),
        ] {
            let response = send(&app, method, uri, body).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
            assert_eq!(detail(response).await, "Session not found");
        }
    }

    #[tokio::test]
    async fn check_in_bodies_are_validated_before_the_session_lookup() {
        let (app, _) = test_app();

        let response = send(&app, "POST", "/session/nope/checkin", Some(json!({ "roll_no": "   " }))).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(detail(response).await, "Please enter a roll number");

        let response = send(&app, "POST", "/session/nope/checkin", Some(json!({ "student": "AIE22039" }))).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn expired_sessions_read_as_ended() {
        let (app, clock) = test_app();
        let id = start(&app, "Maths").await.session_id;

        clock.advance(TimeDelta::hours(3));

        let session: Session = read(send(&app, "GET", &format!("/session/{id}"), None).await).await;
        assert_eq!(session.status, SessionStatus::Ended);

        let response = send(&app, "POST", &format!("/session/{id}/checkin"), Some(json!({ "roll_no": "AIE22039" }))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(detail(response).await, "Session has ended");
    }

    #[tokio::test]
    async fn health_reports_up_and_counts_active_sessions() {
        let (app, _) = test_app();
        start(&app, "Maths").await;
        let ended = start(&app, "Physics").await.session_id;
        send(&app, "POST", &format!("/session/{ended}/end"), None).await;

        let response = send(&app, "GET", "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let health: HealthResponse = read(response).await;
        assert_eq!(health.status, rollcall::data::HealthStatus::Up);
        assert_eq!(health.active_sessions, 1);
        assert!(health.uptime.seconds >= 0);
    }

    #[tokio::test]
    async fn cors_allows_configured_origins_only() {
        let (app, _) = test_app();
        let preflight = |origin: &str| {
            Request::builder()
                .method("OPTIONS")
                .uri("/session/start")
                .header(header::ORIGIN, origin)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap()
        };

        let allowed = app.clone().oneshot(preflight("http://localhost:8080")).await.unwrap();
        assert_eq!(
            allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:8080"
        );

        let denied = app.clone().oneshot(preflight("https://elsewhere.example")).await.unwrap();
        assert!(denied.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
