//! API-level tests that exercise routing and the auth middleware rejection
//! paths. Requests here are turned away before any database query runs, so
//! the suite needs no MongoDB instance; the client below only parses its URI.

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use mongodb::Client;
use serde_json::{Value, json};

use blog_api::middleware::not_found::not_found;
use blog_api::post::post_service::PostService;
use blog_api::router::index::routes;
use blog_api::user::service::UserService;

async fn lazy_client() -> Client {
    Client::with_uri_str("mongodb://localhost:27017")
        .await
        .expect("client options should parse")
}

macro_rules! test_app {
    ($client:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(PostService::new($client)))
                .app_data(web::Data::new(UserService::new($client)))
                .service(web::scope("/api").configure(routes))
                .default_service(web::route().to(not_found)),
        )
        .await
    };
}

#[actix_web::test]
async fn create_without_token_returns_401() {
    let client = lazy_client().await;
    let app = test_app!(&client);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({
            "title": "Test Post",
            "content": "This is a test post",
            "category": "general",
        }))
        .to_request();

    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Not authorized, no token");
}

#[actix_web::test]
async fn create_with_invalid_token_returns_401() {
    let client = lazy_client().await;
    let app = test_app!(&client);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("Authorization", "Bearer invalidtoken"))
        .set_json(json!({
            "title": "Test Post",
            "content": "This is a test post",
            "category": "general",
        }))
        .to_request();

    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Not authorized, token failed");
}

#[actix_web::test]
async fn update_without_token_returns_401() {
    let client = lazy_client().await;
    let app = test_app!(&client);

    let req = test::TestRequest::put()
        .uri("/api/posts/68b3f2a1c9d4e5f6a7b8c9d0")
        .set_json(json!({ "title": "New Title" }))
        .to_request();

    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Not authorized, no token");
}

#[actix_web::test]
async fn delete_without_token_returns_401() {
    let client = lazy_client().await;
    let app = test_app!(&client);

    let req = test::TestRequest::delete()
        .uri("/api/posts/68b3f2a1c9d4e5f6a7b8c9d0")
        .to_request();

    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Not authorized, no token");
}

#[actix_web::test]
async fn non_bearer_authorization_header_counts_as_no_token() {
    let client = lazy_client().await;
    let app = test_app!(&client);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .set_json(json!({
            "title": "Test Post",
            "content": "This is a test post",
            "category": "general",
        }))
        .to_request();

    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Not authorized, no token");
}

#[actix_web::test]
async fn unknown_route_returns_404_json() {
    let client = lazy_client().await;
    let app = test_app!(&client);

    let req = test::TestRequest::get()
        .uri("/api/non-existent-route")
        .to_request();

    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Route not found");
}
