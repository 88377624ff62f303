//! End-to-end HTTP tests over the in-memory repository.
//!
//! Requests go through the same app the server runs: trace middleware, user
//! routes, JSON error mapping, and health probes.

use std::collections::HashSet;
use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use users_service::TraceId;
use users_service::domain::{TRACE_ID_HEADER, UserService};
use users_service::inbound::http::state::HttpState;
use users_service::outbound::memory::InMemoryUserRepository;
use users_service::server::build_app;

mod support;

fn memory_state() -> HttpState {
    let service = Arc::new(UserService::new(Arc::new(InMemoryUserRepository::new())));
    HttpState::new(service.clone(), service)
}

async fn json_body(res: ServiceResponse) -> Value {
    let bytes = test::read_body(res).await;
    serde_json::from_slice(&bytes).expect("JSON body")
}

macro_rules! app {
    () => {
        test::init_service(build_app(
            support::ready_health_state(),
            support::http_state(memory_state()),
        ))
        .await
    };
}

#[rstest]
#[actix_web::test]
async fn create_then_update_keeps_id() {
    let app = app!();

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/user")
            .set_json(json!({"username": "Aks", "email": "aks@g.com", "password": "1223"}))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::OK);
    let created = json_body(created).await;
    let id = created["id"].as_i64().expect("numeric id");
    assert_eq!(created["username"], "Aks");
    assert_eq!(created["email"], "aks@g.com");

    let updated = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/user/update/{id}"))
            .set_json(json!({"username": "Aksay", "email": "aksay@g.com"}))
            .to_request(),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = json_body(updated).await;
    assert_eq!(
        updated,
        json!({"id": id, "username": "Aksay", "email": "aksay@g.com", "password": "1223"})
    );

    let found = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/user/find/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(found.status(), StatusCode::OK);
    assert_eq!(json_body(found).await, updated);
}

#[rstest]
#[actix_web::test]
async fn created_ids_are_distinct_and_all_listed() {
    let app = app!();
    let mut ids = Vec::new();
    for n in 0..5 {
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/user")
                .set_json(json!({
                    "username": format!("user{n}"),
                    "email": "same@g.com",
                    "password": "pw"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        ids.push(json_body(res).await["id"].as_i64().expect("numeric id"));
    }

    let unique: HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());

    let listed = test::call_service(&app, test::TestRequest::get().uri("/api/users").to_request())
        .await;
    assert_eq!(listed.status(), StatusCode::OK);
    let listed_ids: Vec<i64> = json_body(listed)
        .await
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|user| user["id"].as_i64())
        .collect();
    assert_eq!(listed_ids, ids);
}

#[rstest]
#[actix_web::test]
async fn update_of_unknown_id_creates_nothing() {
    let app = app!();

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/user/update/41")
            .set_json(json!({"username": "Ghost", "email": "ghost@g.com", "password": "pw"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(res).await["code"], "not_found");

    let listed = test::call_service(&app, test::TestRequest::get().uri("/api/users").to_request())
        .await;
    assert_eq!(json_body(listed).await, json!([]));
}

#[rstest]
#[actix_web::test]
async fn find_of_unknown_id_is_not_found() {
    let app = app!();
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/user/find/3").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn errors_echo_the_response_trace_id() {
    let app = app!();
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/user")
            .set_json(json!({"username": "Aks", "email": "aks", "password": "1"}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace-id header");
    assert!(header.parse::<TraceId>().is_ok());

    let body = json_body(res).await;
    assert_eq!(body["traceId"], header.as_str());
    assert_eq!(body["details"], json!({"field": "email", "code": "invalid_email"}));
}

#[rstest]
#[actix_web::test]
async fn malformed_json_uses_error_envelope() {
    let app = app!();
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/user")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"username\": ")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["code"], "invalid_request");
}

#[rstest]
#[case("/health/ready")]
#[case("/health/live")]
#[actix_web::test]
async fn health_probes_pass_when_ready(#[case] uri: &str) {
    let app = app!();
    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
}
