//! Handler tests for the programs domain
//!
//! Drive the domain router directly; the full app adds `/api/programs`.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::ErrorResponse;
use chrono::{Duration, Utc};
use database::DatabaseError;
use domain_programs::*;
use http_body_util::BodyExt;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn program(title: &str, is_active: bool, age_days: i64) -> Program {
    Program {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        is_active,
        created_at: Utc::now() - Duration::days(age_days),
    }
}

struct UnreachableStore;

#[async_trait]
impl ProgramRepository for UnreachableStore {
    async fn list_active(&self) -> ProgramResult<Vec<Program>> {
        Err(ProgramError::Store(DatabaseError::Status {
            status: 503,
            message: "upstream connect error".to_string(),
        }))
    }

    async fn health_check(&self) -> ProgramResult<()> {
        Err(ProgramError::Internal("unreachable".to_string()))
    }
}

#[tokio::test]
async fn test_list_programs_returns_active_newest_first() {
    let repo = InMemoryProgramRepository::with_programs(vec![
        program("Autumn", true, 30),
        program("Archived", false, 1),
        program("Spring", true, 2),
    ]);
    let app = handlers::router(ProgramService::new(repo));

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let programs: Vec<Program> = json_body(response.into_body()).await;
    let titles: Vec<&str> = programs.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Spring", "Autumn"]);
}

#[tokio::test]
async fn test_list_programs_empty() {
    let app = handlers::router(ProgramService::new(InMemoryProgramRepository::new()));

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let programs: Vec<Program> = json_body(response.into_body()).await;
    assert!(programs.is_empty());
}

#[tokio::test]
async fn test_store_failure_returns_bad_gateway() {
    let app = handlers::router(ProgramService::new(UnreachableStore));

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(body.error, "UPSTREAM_ERROR");
}
