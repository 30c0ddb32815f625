use carrent_api::app::{build_app, services::AppServices};
use carrent_bookings::{Booking, BookingDto};
use carrent_core::UserId;
use chrono::{DateTime, Duration as ChronoDuration, SecondsFormat, Utc};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, in-memory repositories, ephemeral port.
        let app = build_app(AppServices::in_memory());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn rfc3339(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn booking_body(start: DateTime<Utc>) -> serde_json::Value {
    json!({
        "userId": "user1",
        "carId": 1,
        "totalPrice": 100,
        "isCancelled": false,
        "startDate": rfc3339(start),
        "endDate": rfc3339(start + ChronoDuration::days(2)),
    })
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn booking_create_then_fetch_returns_the_posted_fields() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let start = Utc::now();

    let input = BookingDto {
        car_id: 1,
        user_id: UserId::new("user1"),
        start_date: start,
        end_date: start + ChronoDuration::days(2),
        total_price: Decimal::new(9999, 2),
        is_cancelled: false,
    };

    let res = client
        .post(srv.url("/bookings"))
        .json(&input)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let location = res.headers()["location"].to_str().unwrap().to_string();
    let created: Booking = res.json().await.unwrap();
    assert_eq!(location, format!("/bookings/{}", created.id));

    let res = client.get(srv.url(&location)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Booking = res.json().await.unwrap();

    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.to_dto(), input);
    assert_eq!(fetched.total_price.to_string(), "99.99");
}

#[tokio::test]
async fn booking_with_end_before_start_is_stored_as_sent() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let start = Utc::now();

    let mut body = booking_body(start);
    body["endDate"] = json!(rfc3339(start - ChronoDuration::days(1)));

    let res = client.post(srv.url("/bookings")).json(&body).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Booking = res.json().await.unwrap();
    assert!(created.end_date < created.start_date);
}

#[tokio::test]
async fn update_and_delete_of_missing_booking_are_no_content() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .put(srv.url("/bookings/7"))
        .json(&booking_body(Utc::now()))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client.delete(srv.url("/bookings/7")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client.get(srv.url("/bookings/7")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn booking_lifecycle_update_then_delete() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let start = Utc::now();

    let created: serde_json::Value = client
        .post(srv.url("/bookings"))
        .json(&booking_body(start))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    let mut update = booking_body(start);
    update["isCancelled"] = json!(true);
    let res = client
        .put(srv.url(&format!("/bookings/{id}")))
        .json(&update)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let fetched: serde_json::Value = client
        .get(srv.url(&format!("/bookings/{id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["isCancelled"], true);

    let res = client
        .delete(srv.url(&format!("/bookings/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // Deleting again is idempotent.
    let res = client
        .delete(srv.url(&format!("/bookings/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let list: Vec<serde_json::Value> = client
        .get(srv.url("/bookings"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn unknown_booking_has_diagnostic_body() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/bookings/404")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let err: serde_json::Value = res.json().await.unwrap();
    assert_eq!(err["message"], "booking 404 not found");
}

#[tokio::test]
async fn unknown_user_is_not_found_with_empty_body() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/users/2")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn user_lifecycle_create_update_delete() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/users"))
        .json(&json!({ "id": "3", "userName": "User3", "email": "user3@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers()["location"], "/users/3");
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["id"], "3");

    let res = client
        .put(srv.url("/users/3"))
        .json(&json!({ "userName": "Renamed", "email": "user3@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let users: Vec<serde_json::Value> = client
        .get(srv.url("/users"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["userName"], "Renamed");

    let res = client.delete(srv.url("/users/3")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client.delete(srv.url("/users/3")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_of_missing_user_is_no_content_and_creates_nothing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .put(srv.url("/users/ghost"))
        .json(&json!({ "userName": "Ghost", "email": "ghost@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client.get(srv.url("/users/ghost")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_location_routes_back_for_ids_with_reserved_characters() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for id in ["auth0/abc", "bad\u{1}id"] {
        let res = client
            .post(srv.url("/users"))
            .json(&json!({ "id": id, "userName": "Subject", "email": "subject@example.com" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let location = res.headers()["location"].to_str().unwrap().to_string();
        let res = client.get(srv.url(&location)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "GET {location}");
        let fetched: serde_json::Value = res.json().await.unwrap();
        assert_eq!(fetched["id"], id);
    }
}

#[tokio::test]
async fn malformed_booking_body_is_a_client_error() {
    let srv = TestServer::spawn().await;
    let res = reqwest::Client::new()
        .post(srv.url("/bookings"))
        .json(&json!({ "carId": "not-a-number" }))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_client_error());
}
