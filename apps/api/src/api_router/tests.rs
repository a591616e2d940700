use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::{Extension, Router};
use subportal_application::{AuthorizationService, SubmissionService};
use subportal_core::{CommunityId, MemberId};
use subportal_domain::{AuthorizedRoleNames, CommunityRole, RoleColor};
use subportal_infrastructure::{FilesystemSubmissionStore, InMemoryRoleDirectory};
use tower::ServiceExt;
use tower_sessions::{MemoryStore, Session, SessionManagerLayer};

use crate::auth::SESSION_MEMBER_KEY;
use crate::state::AppState;

use super::{build_router, member_routes};

const COMMUNITY: CommunityId = CommunityId::new(432_708_847_304_704_010);
const CURATOR: MemberId = MemberId::new(11);
const GUEST: MemberId = MemberId::new(22);
const STRANGER: MemberId = MemberId::new(33);
const BOUNDARY: &str = "subportal-test-boundary";

async fn app_state(submissions_dir: &Path) -> AppState {
    let directory = InMemoryRoleDirectory::new();
    directory
        .define_role(
            COMMUNITY,
            CommunityRole::new(1, "Curator", RoleColor::from_rgb(0x2ECC71)),
        )
        .await;
    directory
        .define_role(COMMUNITY, CommunityRole::new(2, "Guest", RoleColor::from_rgb(0)))
        .await;
    directory.set_member_roles(COMMUNITY, CURATOR, ["2", "1"]).await;
    directory.set_member_roles(COMMUNITY, GUEST, ["2"]).await;

    AppState {
        authorization_service: AuthorizationService::new(
            Arc::new(directory),
            COMMUNITY,
            AuthorizedRoleNames::default(),
        ),
        submission_service: SubmissionService::new(
            Arc::new(FilesystemSubmissionStore::new(submissions_dir)),
            1024,
        ),
    }
}

fn signed_in_router(state: AppState, member_id: MemberId) -> Router {
    member_routes(state.clone())
        .layer(Extension(member_id))
        .with_state(state)
}

fn file_part_body(filename: &str, extra_headers: &str, content: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n\
         --{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n{extra_headers}\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/submission-receiver")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap_or_default()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap_or_default()
}

/// Stores a signed-in session for the member and returns its cookie header value.
async fn session_cookie(store: &MemoryStore, member_id: MemberId) -> String {
    let session = Session::new(None, Arc::new(store.clone()), None);
    if let Err(error) = session.insert(SESSION_MEMBER_KEY, member_id).await {
        panic!("session insert: {error}");
    }
    if let Err(error) = session.save().await {
        panic!("session save: {error}");
    }

    match session.id() {
        Some(id) => format!("id={id}"),
        None => panic!("saved session has no id"),
    }
}

fn temp_dir() -> tempfile::TempDir {
    match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(error) => panic!("tempdir: {error}"),
    }
}

#[tokio::test]
async fn health_is_public() {
    let temp = temp_dir();
    let state = app_state(&temp.path().join("submissions")).await;
    let router = build_router(state, SessionManagerLayer::new(MemoryStore::default()));

    let response = router
        .oneshot(get_request("/api/health", None))
        .await;

    assert!(matches!(response, Ok(response) if response.status() == StatusCode::OK));
}

#[tokio::test]
async fn protected_routes_require_a_session() {
    let temp = temp_dir();
    let state = app_state(&temp.path().join("submissions")).await;
    let router = build_router(state, SessionManagerLayer::new(MemoryStore::default()));

    let response = router
        .oneshot(upload_request(file_part_body("game.zip", "", b"data")))
        .await;

    assert!(matches!(response, Ok(response) if response.status() == StatusCode::UNAUTHORIZED));
    assert!(!temp.path().join("submissions").exists());
}

#[tokio::test]
async fn authorized_member_upload_is_stored() {
    let temp = temp_dir();
    let submissions = temp.path().join("submissions");
    let router = signed_in_router(app_state(&submissions).await, CURATOR);

    let response = router
        .oneshot(upload_request(file_part_body(
            "game.zip",
            "Content-Length: 11\r\n",
            b"hello world",
        )))
        .await;

    let Ok(response) = response else {
        panic!("router failed");
    };
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.is_empty());
    assert_eq!(
        std::fs::read(submissions.join("game.zip")).ok(),
        Some(b"hello world".to_vec())
    );
}

#[tokio::test]
async fn member_without_authorized_role_is_forbidden() {
    let temp = temp_dir();
    let submissions = temp.path().join("submissions");
    let router = signed_in_router(app_state(&submissions).await, GUEST);

    let response = router
        .oneshot(upload_request(file_part_body("game.zip", "", b"data")))
        .await;

    assert!(matches!(response, Ok(response) if response.status() == StatusCode::FORBIDDEN));
    assert!(!submissions.join("game.zip").exists());
}

#[tokio::test]
async fn directory_failure_denies_access() {
    let temp = temp_dir();
    let submissions = temp.path().join("submissions");
    let router = signed_in_router(app_state(&submissions).await, STRANGER);

    let response = router
        .oneshot(upload_request(file_part_body("game.zip", "", b"data")))
        .await;

    assert!(matches!(response, Ok(response) if response.status() == StatusCode::FORBIDDEN));
    assert!(!submissions.join("game.zip").exists());
}

#[tokio::test]
async fn upload_without_file_part_is_bad_request() {
    let temp = temp_dir();
    let router = signed_in_router(app_state(&temp.path().join("submissions")).await, CURATOR);
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{BOUNDARY}--\r\n"
    );

    let response = router.oneshot(upload_request(body.into_bytes())).await;

    let Ok(response) = response else {
        panic!("router failed");
    };
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("no file supplied"));
}

#[tokio::test]
async fn non_multipart_body_is_bad_request() {
    let temp = temp_dir();
    let router = signed_in_router(app_state(&temp.path().join("submissions")).await, CURATOR);

    let request = Request::builder()
        .method("POST")
        .uri("/submission-receiver")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap_or_default();
    let response = router.oneshot(request).await;

    assert!(matches!(response, Ok(response) if response.status() == StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn size_mismatch_is_internal_error_and_keeps_the_file() {
    let temp = temp_dir();
    let submissions = temp.path().join("submissions");
    let router = signed_in_router(app_state(&submissions).await, CURATOR);

    let response = router
        .oneshot(upload_request(file_part_body(
            "game.zip",
            "Content-Length: 1000\r\n",
            &[0x5A; 998],
        )))
        .await;

    let Ok(response) = response else {
        panic!("router failed");
    };
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(response).await.contains("declared 1000 bytes, wrote 998"));
    assert_eq!(
        std::fs::metadata(submissions.join("game.zip"))
            .map(|meta| meta.len())
            .ok(),
        Some(998)
    );
}

#[tokio::test]
async fn profile_lists_resolved_roles() {
    let temp = temp_dir();
    let router = signed_in_router(app_state(&temp.path().join("submissions")).await, CURATOR);

    let response = router
        .oneshot(get_request("/api/profile", None))
        .await;

    let Ok(response) = response else {
        panic!("router failed");
    };
    assert_eq!(response.status(), StatusCode::OK);

    let payload: serde_json::Value =
        serde_json::from_str(&body_text(response).await).unwrap_or_default();
    assert_eq!(payload["user_id"], "11");
    assert_eq!(payload["authorized"], true);
    assert_eq!(payload["roles"][0]["name"], "Guest");
    assert_eq!(payload["roles"][1]["color"], "#2ecc71");
}

#[tokio::test]
async fn profile_requires_an_authorized_role() {
    let temp = temp_dir();

    for member_id in [GUEST, STRANGER] {
        let router = signed_in_router(app_state(&temp.path().join("submissions")).await, member_id);
        let response = router.oneshot(get_request("/api/profile", None)).await;

        assert!(
            matches!(response, Ok(ref response) if response.status() == StatusCode::FORBIDDEN),
            "member {member_id} reached the profile"
        );
    }
}

#[tokio::test]
async fn logout_deletes_the_session() {
    let temp = temp_dir();
    let store = MemoryStore::default();
    let cookie = session_cookie(&store, CURATOR).await;
    let router = build_router(
        app_state(&temp.path().join("submissions")).await,
        SessionManagerLayer::new(store),
    );

    let before = router
        .clone()
        .oneshot(get_request("/api/profile", Some(&cookie)))
        .await;
    assert!(matches!(before, Ok(response) if response.status() == StatusCode::OK));

    let logout = router
        .clone()
        .oneshot(get_request("/logout", Some(&cookie)))
        .await;
    assert!(matches!(logout, Ok(response) if response.status() == StatusCode::NO_CONTENT));

    let after = router
        .oneshot(get_request("/api/profile", Some(&cookie)))
        .await;
    assert!(matches!(after, Ok(response) if response.status() == StatusCode::UNAUTHORIZED));
}
