//! HTTP routes.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use caprate_domain::{remaining_count, Caption, Vote, VotedSet};
use caprate_shared::{
    CaptionData, CaptionsResponse, ErrorResponse, MeResponse, StoreErrorBody, UserData,
    VoteAccepted, VoteData,
};

use crate::api::cookies;
use crate::app::App;
use crate::infrastructure::ports::StoreFailure;
use crate::use_cases::VoteOutcome;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(home))
        .route("/api/health", get(health))
        .route("/api/captions", get(list_captions))
        .route("/api/me", get(me))
        .route("/api/vote", post(submit_vote))
        .route("/auth/callback", get(auth_callback))
        .route("/auth/signout", post(sign_out))
        .route("/login", get(login))
        .route("/protected", get(protected))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// JSON API
// =============================================================================

async fn list_captions(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
) -> Result<Json<CaptionsResponse>, ApiError> {
    let token = cookies::access_token(&headers);
    let captions = app
        .use_cases
        .list_captions
        .execute(token)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(CaptionsResponse {
        captions: captions.iter().map(caption_data).collect(),
    }))
}

async fn me(State(app): State<Arc<App>>, headers: HeaderMap) -> Result<Json<MeResponse>, ApiError> {
    let token = cookies::access_token(&headers);
    let user = app
        .use_cases
        .current_user
        .execute(token.as_deref())
        .await
        .ok_or(ApiError::Unauthenticated)?;

    Ok(Json(MeResponse {
        user: UserData {
            id: user.id.into_string(),
            email: user.email,
        },
    }))
}

async fn submit_vote(State(app): State<Arc<App>>, headers: HeaderMap, body: String) -> Response {
    // Malformed JSON classifies as an invalid payload, not a framework
    // rejection, so the body is parsed leniently here.
    let body: serde_json::Value = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
    let token = cookies::access_token(&headers);

    let outcome = app
        .use_cases
        .submit_vote
        .execute(&body, token.as_deref())
        .await;

    outcome_response(outcome)
}

/// Map a vote outcome onto the wire: one status and body per variant.
fn outcome_response(outcome: VoteOutcome) -> Response {
    match outcome {
        VoteOutcome::Accepted(vote) => (
            StatusCode::OK,
            Json(VoteAccepted {
                ok: true,
                vote: vote_data(&vote),
            }),
        )
            .into_response(),
        VoteOutcome::InvalidPayload(message) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
        }
        VoteOutcome::Unauthenticated => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Not authenticated.")),
        )
            .into_response(),
        VoteOutcome::Forbidden(message) => {
            (StatusCode::FORBIDDEN, Json(ErrorResponse::new(message))).into_response()
        }
        VoteOutcome::Conflict => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::new("You already voted for this caption.")),
        )
            .into_response(),
        VoteOutcome::StoreFailed(failure) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(store_error_response(failure)),
        )
            .into_response(),
    }
}

fn store_error_response(failure: StoreFailure) -> ErrorResponse {
    ErrorResponse::with_detail(
        format!(
            "Unable to insert vote into caption_votes: {}",
            failure.message
        ),
        StoreErrorBody {
            message: failure.message,
            code: failure.code,
            details: failure.details,
        },
    )
}

// =============================================================================
// Auth pages and callback
// =============================================================================

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
}

async fn auth_callback(
    State(app): State<Arc<App>>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    // After the session cookies are set, send the user to the protected
    // page. A missing or failed code still lands there, unauthenticated.
    let mut response = Redirect::to("/protected").into_response();

    if let Some(code) = query.code {
        match app.use_cases.exchange_code.execute(&code).await {
            Ok(session) => {
                let headers = response.headers_mut();
                if let Some(cookie) =
                    cookies::session_cookie(cookies::ACCESS_TOKEN_COOKIE, &session.access_token)
                {
                    headers.append(header::SET_COOKIE, cookie);
                }
                if let Some(cookie) =
                    cookies::session_cookie(cookies::REFRESH_TOKEN_COOKIE, &session.refresh_token)
                {
                    headers.append(header::SET_COOKIE, cookie);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "code exchange failed");
            }
        }
    }

    response
}

async fn sign_out(State(app): State<Arc<App>>, headers: HeaderMap) -> Response {
    if let Some(token) = cookies::access_token(&headers) {
        app.use_cases.sign_out.execute(&token).await;
    }

    let mut response = Redirect::to("/").into_response();
    let headers = response.headers_mut();
    for name in [cookies::ACCESS_TOKEN_COOKIE, cookies::REFRESH_TOKEN_COOKIE] {
        if let Some(cookie) = cookies::clear_cookie(name) {
            headers.append(header::SET_COOKIE, cookie);
        }
    }
    response
}

#[derive(Debug, Deserialize)]
struct LoginQuery {
    next: Option<String>,
}

async fn login(State(app): State<Arc<App>>, Query(query): Query<LoginQuery>) -> Html<String> {
    let redirect_to = format!("{}/auth/callback", app.config.site_url);
    let url = app
        .use_cases
        .sign_in_url
        .execute(&app.config.oauth_provider, &redirect_to);
    let next = query.next.unwrap_or_else(|| "/".to_string());

    Html(format!(
        "<!doctype html><html><body>\
         <h1>Sign in</h1>\
         <p><a href=\"{}\">Continue with {}</a></p>\
         <p><a href=\"{}\">Back</a></p>\
         </body></html>",
        escape_html(&url),
        escape_html(&app.config.oauth_provider),
        escape_html(&next),
    ))
}

async fn protected(State(app): State<Arc<App>>, headers: HeaderMap) -> Response {
    let token = cookies::access_token(&headers);
    let Some(user) = app.use_cases.current_user.execute(token.as_deref()).await else {
        return Redirect::to("/login").into_response();
    };

    Html(format!(
        "<!doctype html><html><body>\
         <h1>Protected page</h1>\
         <p>Signed in as <strong>{}</strong> (id {})</p>\
         <form method=\"post\" action=\"/auth/signout\"><button>Sign out</button></form>\
         <p><a href=\"/\">Home</a></p>\
         </body></html>",
        escape_html(user.email.as_deref().unwrap_or("(none)")),
        escape_html(user.id.as_str()),
    ))
    .into_response()
}

// =============================================================================
// Landing page
// =============================================================================

async fn home(State(app): State<Arc<App>>, headers: HeaderMap) -> Html<String> {
    let token = cookies::access_token(&headers);
    let captions = match app.use_cases.list_captions.execute(token).await {
        Ok(captions) => captions,
        Err(e) => {
            tracing::error!(error = %e, "error fetching captions");
            Vec::new()
        }
    };

    // Fresh page load: nothing voted yet, pick a random caption to show.
    let voted = VotedSet::new();
    let body = match app.use_cases.next_caption.execute(&captions, &voted) {
        Some(caption) => format!(
            "<p>Remaining captions to rate: <strong>{}</strong></p>\
             <blockquote>{}</blockquote>",
            remaining_count(&captions, &voted),
            escape_html(caption.content.as_deref().unwrap_or("(no content)")),
        ),
        None => "<p>No captions found yet.</p>".to_string(),
    };

    Html(format!(
        "<!doctype html><html><body>\
         <h1>Rate captions</h1>{body}\
         <p><a href=\"/login?next=/\">Log in</a> | <a href=\"/protected\">Protected page</a></p>\
         </body></html>"
    ))
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// =============================================================================
// Conversions and errors
// =============================================================================

fn caption_data(caption: &Caption) -> CaptionData {
    CaptionData {
        id: caption.id.as_str().to_string(),
        content: caption.content.clone(),
        extra: caption.extra.clone(),
    }
}

fn vote_data(vote: &Vote) -> VoteData {
    VoteData {
        id: vote.id.as_str().to_string(),
        created_datetime_utc: vote.created_datetime_utc.to_rfc3339(),
        modified_datetime_utc: vote.modified_datetime_utc.to_rfc3339(),
        caption_id: vote.caption_id.as_str().to_string(),
        profile_id: vote.profile_id.as_str().to_string(),
        vote_value: vote.vote_value.as_i8(),
    }
}

#[derive(Debug)]
pub enum ApiError {
    Unauthenticated,
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Not authenticated.")),
            )
                .into_response(),
            ApiError::Internal(message) => {
                tracing::error!(message = %message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Internal error")),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use chrono::{TimeZone, Utc};
    use tower::ServiceExt;

    use caprate_domain::{CaptionId, ProfileId, VoteId, VoteValue};

    use crate::app::SiteConfig;
    use crate::infrastructure::ports::{MockAuthPort, MockCaptionRepo, MockVoteRepo};

    use super::*;

    /// Full router over mock ports. Unprimed mocks panic when called,
    /// so requests that must not reach a port fail loudly if they do.
    fn mock_router(auth: MockAuthPort, captions: MockCaptionRepo, votes: MockVoteRepo) -> Router {
        let app = Arc::new(App::new(
            Arc::new(auth),
            Arc::new(captions),
            Arc::new(votes),
            SiteConfig {
                site_url: "http://localhost:3000".to_string(),
                oauth_provider: "github".to_string(),
            },
        ));
        routes().with_state(app)
    }

    fn sample_vote() -> Vote {
        let now = Utc
            .with_ymd_and_hms(2025, 6, 15, 10, 30, 0)
            .single()
            .expect("valid time");
        Vote {
            id: VoteId::new("v1"),
            created_datetime_utc: now,
            modified_datetime_utc: now,
            caption_id: CaptionId::new("c2"),
            profile_id: ProfileId::new("p1"),
            vote_value: VoteValue::Up,
        }
    }

    #[tokio::test]
    async fn health_responds_through_the_router() {
        let router = mock_router(MockAuthPort::new(), MockCaptionRepo::new(), MockVoteRepo::new());

        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .expect("request");
        let response = router.oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_vote_body_is_a_bad_request_and_touches_no_port() {
        let router = mock_router(MockAuthPort::new(), MockCaptionRepo::new(), MockVoteRepo::new());

        let request = Request::builder()
            .method("POST")
            .uri("/api/vote")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .expect("request");
        let response = router.oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(
            body["error"],
            "Invalid payload. Expected { captionId: string, value: 1 | -1 }."
        );
    }

    #[tokio::test]
    async fn vote_without_a_token_is_unauthorized() {
        let router = mock_router(MockAuthPort::new(), MockCaptionRepo::new(), MockVoteRepo::new());

        let request = Request::builder()
            .method("POST")
            .uri("/api/vote")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"captionId": "c1", "value": 1}"#))
            .expect("request");
        let response = router.oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn outcome_statuses_match_the_wire_contract() {
        let cases = [
            (outcome_response(VoteOutcome::Accepted(sample_vote())), StatusCode::OK),
            (
                outcome_response(VoteOutcome::InvalidPayload("bad".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                outcome_response(VoteOutcome::Unauthenticated),
                StatusCode::UNAUTHORIZED,
            ),
            (
                outcome_response(VoteOutcome::Forbidden("denied".to_string())),
                StatusCode::FORBIDDEN,
            ),
            (outcome_response(VoteOutcome::Conflict), StatusCode::CONFLICT),
            (
                outcome_response(VoteOutcome::StoreFailed(StoreFailure::message_only("boom"))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (response, expected) in cases {
            assert_eq!(response.status(), expected);
        }
    }

    #[tokio::test]
    async fn store_failure_body_carries_last_error() {
        let response = outcome_response(VoteOutcome::StoreFailed(StoreFailure {
            message: "out of shared memory".to_string(),
            code: Some("53200".to_string()),
            details: None,
        }));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert!(body["error"]
            .as_str()
            .is_some_and(|e| e.contains("out of shared memory")));
        assert_eq!(body["lastError"]["code"], "53200");
    }

    #[tokio::test]
    async fn accepted_body_references_the_vote_row() {
        let response = outcome_response(VoteOutcome::Accepted(sample_vote()));
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body["ok"], true);
        assert_eq!(body["vote"]["caption_id"], "c2");
        assert_eq!(body["vote"]["vote_value"], 1);
    }

    #[test]
    fn html_escaping_covers_markup_characters() {
        assert_eq!(
            escape_html("<b>\"caption\" & more</b>"),
            "&lt;b&gt;&quot;caption&quot; &amp; more&lt;/b&gt;"
        );
    }
}
