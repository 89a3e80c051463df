//! HTTP tests for the quote, pay and confirm booking workflow.

mod common;

use axum::http::StatusCode;
use common::{TestApp, hotel_form, spawn_app};
use serde_json::{Value, json};
use uuid::Uuid;

async fn hotel_id(app: &TestApp) -> String {
    let host = app.register("host@example.com").await;
    let reply = app
        .send_form("POST", "/api/my-hotels", &host, hotel_form("Canal Side"))
        .await;
    assert_eq!(reply.status, StatusCode::CREATED, "{:?}", reply.body);
    reply.body["_id"].as_str().unwrap().to_string()
}

fn guest(payment_intent_id: &str) -> Value {
    json!({
        "paymentIntentId": payment_intent_id,
        "firstName": "Guest",
        "lastName": "Person",
        "email": "guest@example.com",
        "adultCount": "2",
        "childCount": 0,
        "checkIn": "2026-11-01T00:00:00Z",
        "checkOut": "2026-11-04T00:00:00Z",
    })
}

#[tokio::test]
async fn quote_pay_and_confirm() {
    let app = spawn_app().await;
    let hotel = hotel_id(&app).await;
    let cookie = app.register("guest@example.com").await;

    let quote = app
        .post_json(
            &format!("/api/hotels/{hotel}/bookings/payment-intent"),
            Some(&cookie),
            json!({ "numberOfNights": "3" }),
        )
        .await;
    assert_eq!(quote.status, StatusCode::OK, "{:?}", quote.body);
    assert_eq!(quote.body["totalCost"], 300.0);
    let intent = quote.body["paymentIntentId"].as_str().unwrap().to_string();
    assert!(quote.body["clientSecret"].as_str().unwrap().starts_with(&intent));
    assert_eq!(app.payments.get(&intent).unwrap().amount, 30_000);

    let early = app
        .post_json(
            &format!("/api/hotels/{hotel}/bookings"),
            Some(&cookie),
            guest(&intent),
        )
        .await;
    assert_eq!(early.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        early.message(),
        "payment intent not succeeded. Status: requires_payment_method"
    );

    app.payments.succeed(&intent);
    let booked = app
        .post_json(
            &format!("/api/hotels/{hotel}/bookings"),
            Some(&cookie),
            guest(&intent),
        )
        .await;
    assert_eq!(booked.status, StatusCode::OK, "{:?}", booked.body);
    assert_eq!(booked.body["totalCost"], 300.0);
    assert_eq!(booked.body["adultCount"], 2);

    let mine = app.get("/api/my-bookings", Some(&cookie)).await;
    let hotels = mine.body.as_array().unwrap();
    assert_eq!(hotels.len(), 1);
    assert_eq!(hotels[0]["_id"], hotel.as_str());
    assert_eq!(hotels[0]["bookings"].as_array().unwrap().len(), 1);

    let host_view = app.get(&format!("/api/hotels/{hotel}"), None).await;
    assert_eq!(host_view.body["bookings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn intent_for_another_hotel_is_rejected() {
    let app = spawn_app().await;
    let hotel = hotel_id(&app).await;
    let host = app.register("second-host@example.com").await;
    let other = app
        .send_form("POST", "/api/my-hotels", &host, hotel_form("Other Place"))
        .await;
    let other = other.body["_id"].as_str().unwrap().to_string();
    let cookie = app.register("guest@example.com").await;

    let quote = app
        .post_json(
            &format!("/api/hotels/{hotel}/bookings/payment-intent"),
            Some(&cookie),
            json!({ "numberOfNights": 1 }),
        )
        .await;
    let intent = quote.body["paymentIntentId"].as_str().unwrap().to_string();
    app.payments.succeed(&intent);

    let reply = app
        .post_json(
            &format!("/api/hotels/{other}/bookings"),
            Some(&cookie),
            guest(&intent),
        )
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    let mine = app.get("/api/my-bookings", Some(&cookie)).await;
    assert!(mine.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_intent_is_rejected() {
    let app = spawn_app().await;
    let hotel = hotel_id(&app).await;
    let cookie = app.register("guest@example.com").await;

    let reply = app
        .post_json(
            &format!("/api/hotels/{hotel}/bookings"),
            Some(&cookie),
            guest("pi_does_not_exist"),
        )
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn quote_for_unknown_hotel_is_rejected() {
    let app = spawn_app().await;
    let cookie = app.register("guest@example.com").await;

    for hotel in [Uuid::new_v4().to_string(), "garbage".to_string()] {
        let reply = app
            .post_json(
                &format!("/api/hotels/{hotel}/bookings/payment-intent"),
                Some(&cookie),
                json!({ "numberOfNights": 2 }),
            )
            .await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.message(), "Hotel not found");
    }
    assert!(app.payments.is_empty());
}

#[tokio::test]
async fn booking_requires_a_session() {
    let app = spawn_app().await;
    let hotel = hotel_id(&app).await;

    let quote = app
        .post_json(
            &format!("/api/hotels/{hotel}/bookings/payment-intent"),
            None,
            json!({ "numberOfNights": 2 }),
        )
        .await;
    assert_eq!(quote.status, StatusCode::UNAUTHORIZED);

    let bookings = app.get("/api/my-bookings", None).await;
    assert_eq!(bookings.status, StatusCode::UNAUTHORIZED);
}
