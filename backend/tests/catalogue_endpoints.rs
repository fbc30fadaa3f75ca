//! End-to-end coverage of the course catalogue endpoints.

use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use backend::domain::Course;
use backend::inbound::http;
use backend::inbound::http::state::HttpState;
use backend::test_support::{TestBackend, demo_admin, demo_user, session_middleware};

fn demo_course(id: i64, title: &str, category: &str, price: f64, tags: &[&str]) -> Course {
    Course {
        id,
        title: title.to_owned(),
        category: category.to_owned(),
        price,
        popularity: 50,
        tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
        description: String::new(),
    }
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(session_middleware())
        .configure(http::configure(web::Data::new(state)))
}

async fn login<S>(app: &S, email: &str, password: &str) -> actix_web::cookie::Cookie<'static>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "login must succeed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

#[actix_web::test]
async fn twelve_courses_with_limit_nine_paginate_into_two_pages() {
    let backend = TestBackend::new();
    let courses = (1..=12i64)
        .map(|i| demo_course(i, &format!("Курс {i}"), "web", 100.0, &[]))
        .collect();
    backend.seed_courses(courses).await;
    let app = actix_test::init_service(test_app(backend.state.clone())).await;

    let page_one: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/courses?page=1&limit=9")
            .to_request(),
    )
    .await;
    assert_eq!(page_one["items"].as_array().map(Vec::len), Some(9));
    assert_eq!(page_one["total"], 12);
    assert_eq!(page_one["totalPages"], 2);

    let page_two: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/courses?page=2&limit=9")
            .to_request(),
    )
    .await;
    assert_eq!(page_two["items"].as_array().map(Vec::len), Some(3));

    let past_the_end: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/courses?page=5&limit=9")
            .to_request(),
    )
    .await;
    assert_eq!(past_the_end["items"].as_array().map(Vec::len), Some(0));
    assert_eq!(past_the_end["totalPages"], 2);
}

#[actix_web::test]
async fn filter_matches_title_or_tags_case_insensitively() {
    let backend = TestBackend::new();
    backend
        .seed_courses(vec![
            demo_course(1, "Аналіз даних", "data", 100.0, &["Python", "pandas"]),
            demo_course(2, "React для початківців", "web", 200.0, &["frontend"]),
        ])
        .await;
    let app = actix_test::init_service(test_app(backend.state.clone())).await;

    let matched: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/courses?query=PYTHON")
            .to_request(),
    )
    .await;
    assert_eq!(matched["total"], 1);
    assert_eq!(matched["items"][0]["id"], 1);
}

#[actix_web::test]
async fn sort_and_category_parameters_shape_the_listing() {
    let backend = TestBackend::new();
    backend
        .seed_courses(vec![
            demo_course(1, "Дорогий", "web", 900.0, &[]),
            demo_course(2, "Дешевий", "web", 100.0, &[]),
            demo_course(3, "Інша категорія", "data", 500.0, &[]),
        ])
        .await;
    let app = actix_test::init_service(test_app(backend.state.clone())).await;

    let listing: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/courses?category=web&sort=price&order=desc")
            .to_request(),
    )
    .await;
    assert_eq!(listing["total"], 2);
    assert_eq!(listing["items"][0]["id"], 1);
    assert_eq!(listing["items"][1]["id"], 2);
}

#[actix_web::test]
async fn zero_page_parameter_is_a_field_mapped_validation_error() {
    let backend = TestBackend::new();
    let app = actix_test::init_service(test_app(backend.state.clone())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/courses?page=0")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert!(body["errors"]["page"].is_string());
}

#[actix_web::test]
async fn get_of_unknown_course_is_404() {
    let backend = TestBackend::new();
    let app = actix_test::init_service(test_app(backend.state.clone())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/courses/4040")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn non_admin_create_is_403_and_stores_nothing() {
    let backend = TestBackend::new();
    backend.seed_users(vec![demo_admin(), demo_user()]).await;
    let app = actix_test::init_service(test_app(backend.state.clone())).await;
    let cookie = login(&app, "taras@courses.ua", "password123").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/courses")
            .cookie(cookie)
            .set_json(json!({ "title": "Недозволений", "price": 100 }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::FORBIDDEN);

    let listing: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/courses")
            .to_request(),
    )
    .await;
    assert_eq!(listing["total"], 0, "no record may be created");
}

#[actix_web::test]
async fn anonymous_create_is_401() {
    let backend = TestBackend::new();
    let app = actix_test::init_service(test_app(backend.state.clone())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/courses")
            .set_json(json!({ "title": "Без сесії", "price": 1 }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn admin_create_patch_delete_round_trip() {
    let backend = TestBackend::new();
    backend.seed_users(vec![demo_admin()]).await;
    let app = actix_test::init_service(test_app(backend.state.clone())).await;
    let cookie = login(&app, "admin@courses.ua", "admin12345").await;

    let created: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/courses")
            .cookie(cookie.clone())
            .set_json(json!({
                "title": "Нова назва",
                "price": 4500,
                "tags": ["Rust", "backend"]
            }))
            .to_request(),
    )
    .await;
    let id = created["id"].as_i64().expect("created id");
    assert_eq!(created["category"], "web");

    let patched: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/courses/{id}"))
            .cookie(cookie.clone())
            .set_json(json!({ "price": 5000 }))
            .to_request(),
    )
    .await;
    assert_eq!(patched["price"], 5000.0);
    assert_eq!(patched["title"], "Нова назва");

    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/courses/{id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), actix_web::http::StatusCode::NO_CONTENT);

    let gone = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/courses/{id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(gone.status(), actix_web::http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn create_without_required_fields_returns_the_complete_field_map() {
    let backend = TestBackend::new();
    backend.seed_users(vec![demo_admin()]).await;
    let app = actix_test::init_service(test_app(backend.state.clone())).await;
    let cookie = login(&app, "admin@courses.ua", "admin12345").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/courses")
            .cookie(cookie)
            .set_json(json!({ "popularity": 300 }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    let errors = body["errors"].as_object().expect("field map present");
    assert!(errors.contains_key("title"));
    assert!(errors.contains_key("price"));
    assert!(errors.contains_key("popularity"));
}

#[actix_web::test]
async fn corrupt_courses_file_serves_503_not_an_empty_catalogue() {
    let backend = TestBackend::new();
    std::fs::write(backend.data_dir.path().join("courses.json"), b"{torn")
        .expect("write corrupt file");
    let app = actix_test::init_service(test_app(backend.state.clone())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/courses")
            .to_request(),
    )
    .await;
    assert_eq!(
        response.status(),
        actix_web::http::StatusCode::SERVICE_UNAVAILABLE
    );
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "store_corruption");
}
