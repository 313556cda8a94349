//! HTTP tests: the full router over an in-memory database, with individual
//! services swapped for mocks where a failure has to be forced.

mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use contoso_university::api::{create_router, AppState};
use contoso_university::config::ANTIFORGERY_HEADER;
use contoso_university::infra::RepositoryScope;
use contoso_university::services::MockStudentService;
use contoso_university::types::{FormView, ModelErrors, Submission};

use common::{seed_course, seed_department, seed_instructor, seed_student, TestContext};

fn app(ctx: &TestContext) -> Router {
    create_router(AppState::from_services(&ctx.services, ctx.database.clone()))
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, uri: &str, body: &str, token: Option<&str>) -> Response {
    let mut request =
        Request::post(uri).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        request = request.header(ANTIFORGERY_HEADER, token);
    }

    app.clone()
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

async fn antiforgery_token(app: &Router) -> String {
    let response = get(app, "/antiforgery/token").await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"].as_str().unwrap().to_string()
}

// =============================================================================
// Home and health
// =============================================================================

#[tokio::test]
async fn test_root_endpoint_returns_welcome_message() {
    let ctx = TestContext::new().await;

    let response = get(&app(&ctx), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("Contoso University"));
}

#[tokio::test]
async fn test_health_reports_database() {
    let ctx = TestContext::new().await;

    let response = get(&app(&ctx), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let ctx = TestContext::new().await;

    let response = get(&app(&ctx), "/api-docs/openapi.json").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/Student/Details/{id}"].is_object());
}

#[tokio::test]
async fn test_enrollment_report() {
    let ctx = TestContext::new().await;
    seed_student(&ctx.uow, "Alexander", "Carson").await;
    seed_student(&ctx.uow, "Anand", "Arturo").await;

    let response = get(&app(&ctx), "/Home/About").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body[0]["enrollment_date"], "2005-09-01");
    assert_eq!(body[0]["student_count"], 2);
}

// =============================================================================
// Ids
// =============================================================================

#[tokio::test]
async fn test_details_without_id_is_bad_request() {
    let ctx = TestContext::new().await;
    let app = app(&ctx);

    for uri in ["/Student/Details", "/Course/Edit", "/Instructor/Delete", "/Department/Details"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }

    let response = get(&app, "/Student/Details/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let ctx = TestContext::new().await;
    let app = app(&ctx);

    for uri in [
        "/Student/Details/999",
        "/Course/Edit/999",
        "/Instructor/Delete/999",
        "/Department/Details/999",
    ] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[tokio::test]
async fn test_id_may_come_from_query() {
    let ctx = TestContext::new().await;
    let id = seed_student(&ctx.uow, "Li", "Yan").await;

    let response = get(&app(&ctx), &format!("/Student/Details?id={}", id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["last_name"], "Li");
}

// =============================================================================
// Anti-forgery
// =============================================================================

#[tokio::test]
async fn test_post_without_token_is_rejected() {
    let ctx = TestContext::new().await;
    let body = "last_name=Li&first_mid_name=Yan&enrollment_date=2005-09-01";

    let response = post_form(&app(&ctx), "/Student/Create", body, None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "ANTIFORGERY_TOKEN_INVALID");
    assert_eq!(ctx.uow.students().get_all().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_post_with_forged_token_is_rejected() {
    let ctx = TestContext::new().await;
    let body = "last_name=Li&first_mid_name=Yan&enrollment_date=2005-09-01";

    let response = post_form(&app(&ctx), "/Student/Create", body, Some("not-a-token")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_form_pages_carry_a_token() {
    let ctx = TestContext::new().await;
    seed_department(&ctx.uow, "Economics", None).await;

    let response = get(&app(&ctx), "/Course/Create").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["antiforgery_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["lookups"]["departments"][0]["text"], "Economics");
}

// =============================================================================
// Submissions
// =============================================================================

#[tokio::test]
async fn test_valid_create_redirects_to_list() {
    let ctx = TestContext::new().await;
    let app = app(&ctx);
    let token = antiforgery_token(&app).await;

    let response = post_form(
        &app,
        "/Student/Create",
        "last_name=Li&first_mid_name=Yan&enrollment_date=2002-09-01&id=77",
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/Student");

    let list = body_json(get(&app, "/Student").await).await;
    assert_eq!(list["students"]["data"][0]["last_name"], "Li");
    assert_ne!(list["students"]["data"][0]["id"], 77);
}

#[tokio::test]
async fn test_invalid_create_returns_form_with_messages() {
    let ctx = TestContext::new().await;
    let app = app(&ctx);
    let token = antiforgery_token(&app).await;

    let response = post_form(
        &app,
        "/Student/Create",
        "last_name=&first_mid_name=Yan&enrollment_date=2002-09-01",
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["errors"]["last_name"].is_array());
    assert_eq!(body["values"]["first_mid_name"], "Yan");
    assert!(body["antiforgery_token"].is_string());
}

#[tokio::test]
async fn test_malformed_date_returns_form_with_field_message() {
    let ctx = TestContext::new().await;
    let app = app(&ctx);
    let token = antiforgery_token(&app).await;

    let response = post_form(
        &app,
        "/Student/Create",
        "last_name=Li&first_mid_name=Yan&enrollment_date=not-a-date",
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(
        body["errors"]["enrollment_date"][0],
        "The value 'not-a-date' is not valid for Enrollment Date."
    );
    assert_eq!(body["values"]["enrollment_date"], "not-a-date");
    assert_eq!(body["values"]["last_name"], "Li");
    assert!(body["antiforgery_token"].is_string());
}

#[tokio::test]
async fn test_missing_fields_are_reported_per_field() {
    let ctx = TestContext::new().await;
    let department = seed_department(&ctx.uow, "Economics", None).await;
    let app = app(&ctx);
    let token = antiforgery_token(&app).await;

    let response = post_form(
        &app,
        "/Course/Create",
        &format!("title=Chemistry&department_id={}", department),
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["errors"]["course_id"][0], "The Number field is required.");
    assert_eq!(body["errors"]["credits"][0], "The Credits field is required.");
    assert_eq!(body["values"]["title"], "Chemistry");
    assert_eq!(body["lookups"]["departments"][0]["selected"], true);
}

#[tokio::test]
async fn test_student_list_survives_huge_page_number() {
    let ctx = TestContext::new().await;
    seed_student(&ctx.uow, "Li", "Yan").await;

    let response = get(&app(&ctx), "/Student?page=4000000000000000000").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["students"]["data"].as_array().unwrap().len(), 0);
    assert_eq!(body["students"]["meta"]["total"], 1);
}

#[tokio::test]
async fn test_save_failure_returns_form_for_retry() {
    let ctx = TestContext::new().await;

    let mut students = MockStudentService::new();
    students.expect_create().returning(|input| {
        Ok(Submission::SaveFailed(
            FormView::with_values(None, input).errors(ModelErrors::save_failed()),
        ))
    });
    let services = ctx.services.clone().with_students(Arc::new(students));
    let app = create_router(AppState::from_services(&services, ctx.database.clone()));
    let token = antiforgery_token(&app).await;

    let response = post_form(
        &app,
        "/Student/Create",
        "last_name=Li&first_mid_name=Yan&enrollment_date=2002-09-01",
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["values"]["last_name"], "Li");
    assert!(body["errors"][""][0].as_str().unwrap().starts_with("Unable to save changes"));
}

#[tokio::test]
async fn test_instructor_edit_binds_repeated_course_keys() {
    let ctx = TestContext::new().await;
    let department = seed_department(&ctx.uow, "Mathematics", None).await;
    seed_course(&ctx.uow, 1045, "Calculus", department).await;
    seed_course(&ctx.uow, 3141, "Trigonometry", department).await;
    let id = seed_instructor(&ctx.uow, "Zheng").await;
    let app = app(&ctx);
    let token = antiforgery_token(&app).await;

    let response = post_form(
        &app,
        &format!("/Instructor/Edit/{}", id),
        "last_name=Zheng&first_mid_name=Roger&hire_date=2004-02-12&office_location=Gowan+27\
         &selected_courses=1045&selected_courses=3141",
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/Instructor");

    let details = body_json(get(&app, &format!("/Instructor/Details/{}", id)).await).await;
    assert_eq!(details["first_mid_name"], "Roger");
    assert_eq!(details["office_location"], "Gowan 27");
    assert_eq!(details["courses"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_course_list_ignores_malformed_department() {
    let ctx = TestContext::new().await;
    let department = seed_department(&ctx.uow, "Economics", None).await;
    seed_course(&ctx.uow, 4041, "Macroeconomics", department).await;

    let response = get(&app(&ctx), "/Course?departmentId=economics").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["courses"].as_array().unwrap().len(), 1);
    assert!(body["selected_department"].is_null());
}
