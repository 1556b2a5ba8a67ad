//! Integration tests for the Garden Paradise REST API
//!
//! These tests exercise the full HTTP surface: catalog browsing and
//! filtering, cart mutation, coupon handling, checkout and order history,
//! including the session cookie round-trip.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

use garden_paradise::cart::AppState;
use garden_paradise::router::create_app_router;

/// Helper function to create a test app instance
fn create_test_app() -> axum::Router {
    let state = Arc::new(AppState::new());
    create_app_router(state)
}

/// Sends a request, optionally with a JSON body and a session cookie.
/// Returns the status, the `Set-Cookie` value if one was attached, and
/// the parsed JSON body.
async fn send_request(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!({}));

    (status, set_cookie, body)
}

/// Parses a money field, which the API serializes as a decimal string.
fn money(value: &Value) -> Decimal {
    value
        .as_str()
        .unwrap_or_else(|| panic!("expected money string, got {value}"))
        .parse()
        .unwrap()
}

/// Adds a plant `n` times under one session, returning the cookie.
async fn fill_cart(app: &axum::Router, plant_id: u32, n: u32) -> String {
    let (status, cookie, _) = send_request(
        app,
        "POST",
        "/cart/items",
        Some(json!({ "plantId": plant_id })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let cookie = cookie.expect("first contact should set the session cookie");

    for _ in 1..n {
        let (status, _, _) = send_request(
            app,
            "POST",
            "/cart/items",
            Some(json!({ "plantId": plant_id })),
            Some(&cookie),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    cookie
}

#[tokio::test]
async fn test_plant_listing_and_filters() {
    let app = create_test_app();

    let (status, _, body) = send_request(&app, "GET", "/plants", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plants"].as_array().unwrap().len(), 12);

    let (_, _, body) = send_request(&app, "GET", "/plants?size=big", None, None).await;
    assert_eq!(body["plants"].as_array().unwrap().len(), 4);

    let (_, _, body) = send_request(&app, "GET", "/plants?size=big,small", None, None).await;
    assert_eq!(body["plants"].as_array().unwrap().len(), 8);

    let (_, _, body) = send_request(&app, "GET", "/plants?color=red", None, None).await;
    let names: Vec<_> = body["plants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Rose Bush", "Geranium"]);

    let (_, _, body) = send_request(&app, "GET", "/plants?size=big&color=green", None, None).await;
    assert_eq!(body["plants"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_coupon_listing() {
    let app = create_test_app();

    let (status, _, body) = send_request(&app, "GET", "/coupons", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let coupons = body["coupons"].as_array().unwrap();
    let codes: Vec<_> = coupons
        .iter()
        .map(|c| c["code"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        codes,
        vec!["GARDEN25", "NEWCUSTOMER", "SAVE5", "SPRING20", "WELCOME10"]
    );
    assert_eq!(coupons[4]["discountPercent"], 10);
}

#[tokio::test]
async fn test_add_item_merges_and_confirms() {
    let app = create_test_app();

    let (status, cookie, body) = send_request(
        &app,
        "POST",
        "/cart/items",
        Some(json!({ "plantId": 1 })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Added Sunflower to cart!");
    assert_eq!(body["cart"]["itemCount"], 1);
    let cookie = cookie.expect("session cookie");
    assert!(cookie.starts_with("cart_session="));

    // Adding the same plant again increments the line instead of
    // duplicating it.
    let (_, repeat_cookie, body) = send_request(
        &app,
        "POST",
        "/cart/items",
        Some(json!({ "plantId": 1 })),
        Some(&cookie),
    )
    .await;
    assert!(repeat_cookie.is_none(), "existing session keeps its cookie");
    let items = body["cart"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(money(&body["cart"]["subtotal"]), dec!(67.00));
}

#[tokio::test]
async fn test_add_unknown_plant_is_404() {
    let app = create_test_app();

    let (status, _, body) = send_request(
        &app,
        "POST",
        "/cart/items",
        Some(json!({ "plantId": 999 })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "plant 999 is not in the catalog");
}

#[tokio::test]
async fn test_cart_pricing_breakdown() {
    let app = create_test_app();
    let cookie = fill_cart(&app, 1, 3).await; // 3x Sunflower @ 33.50, big

    // Without a coupon: 20% big-tier discount, then 10% GST.
    let (status, _, body) = send_request(&app, "GET", "/cart", None, Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(money(&body["subtotal"]), dec!(100.50));
    assert_eq!(money(&body["autoDiscount"]["amount"]), dec!(20.10));
    assert_eq!(body["autoDiscount"]["percent"], 20);
    assert_eq!(body["autoDiscount"]["label"], "3 big plants");
    assert_eq!(money(&body["gst"]), dec!(8.04));
    assert_eq!(money(&body["total"]), dec!(88.44));
    assert_eq!(body["coupon"], Value::Null);
    assert_eq!(body["couponInvalid"], false);

    // SAVE5 applies to the 80.40 left after the auto discount.
    let (_, _, body) = send_request(&app, "GET", "/cart?coupon=save5", None, Some(&cookie)).await;
    assert_eq!(body["coupon"]["code"], "SAVE5");
    assert_eq!(money(&body["coupon"]["amount"]), dec!(4.02));
    assert_eq!(money(&body["gst"]), dec!(7.638));
    assert_eq!(money(&body["total"]), dec!(84.018));

    // An unknown code is flagged but charges nothing.
    let (_, _, body) = send_request(&app, "GET", "/cart?coupon=BOGUS99", None, Some(&cookie)).await;
    assert_eq!(body["couponInvalid"], true);
    assert_eq!(body["coupon"], Value::Null);
    assert_eq!(money(&body["total"]), dec!(88.44));
}

#[tokio::test]
async fn test_quantity_update_and_removal() {
    let app = create_test_app();
    let cookie = fill_cart(&app, 4, 1).await; // Marigold

    let (status, _, body) = send_request(
        &app,
        "PUT",
        "/cart/items/4",
        Some(json!({ "quantity": 5 })),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["quantity"], 5);
    assert_eq!(money(&body["subtotal"]), dec!(42.50));

    // Zero quantity removes the line.
    let (_, _, body) = send_request(
        &app,
        "PUT",
        "/cart/items/4",
        Some(json!({ "quantity": 0 })),
        Some(&cookie),
    )
    .await;
    assert!(body["items"].as_array().unwrap().is_empty());
    assert_eq!(money(&body["subtotal"]), Decimal::ZERO);

    // Deleting an absent line is a no-op, not an error.
    let (status, _, _) = send_request(&app, "DELETE", "/cart/items/4", None, Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_checkout_rejects_empty_cart() {
    let app = create_test_app();

    let (status, _, body) = send_request(&app, "POST", "/checkout", None, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "cart is empty");
}

#[tokio::test]
async fn test_checkout_and_history_flow() {
    let app = create_test_app();
    let cookie = fill_cart(&app, 1, 3).await;

    let (status, _, order) = send_request(
        &app,
        "POST",
        "/checkout",
        Some(json!({ "coupon": "SAVE5" })),
        Some(&cookie),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["id"], 1);
    assert_eq!(money(&order["subtotal"]), dec!(100.50));
    assert_eq!(money(&order["finalTotal"]), dec!(84.018));
    assert_eq!(order["discount"], "-$24.12");
    assert_eq!(order["coupon"], "SAVE5");

    // The cart is cleared by checkout.
    let (_, _, cart) = send_request(&app, "GET", "/cart", None, Some(&cookie)).await;
    assert!(cart["items"].as_array().unwrap().is_empty());

    // A second order gets the next id and the NIL sentinels.
    let (_, _, _) = send_request(
        &app,
        "POST",
        "/cart/items",
        Some(json!({ "plantId": 5 })),
        Some(&cookie),
    )
    .await;
    let (_, _, order) = send_request(&app, "POST", "/checkout", None, Some(&cookie)).await;
    assert_eq!(order["id"], 2);
    assert_eq!(order["discount"], "NIL");
    assert_eq!(order["coupon"], "NIL");

    // History keeps both orders, ascending.
    let (status, _, body) = send_request(&app, "GET", "/history", None, Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    let orders = body["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["id"], 1);
    assert_eq!(orders[1]["id"], 2);
    assert_eq!(orders[0]["items"][0]["name"], "Sunflower");
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let app = create_test_app();

    let first = fill_cart(&app, 1, 1).await;
    let second = fill_cart(&app, 2, 1).await;
    assert_ne!(first, second);

    let (_, _, cart) = send_request(&app, "GET", "/cart", None, Some(&first)).await;
    let items = cart["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Sunflower");

    let (_, _, cart) = send_request(&app, "GET", "/cart", None, Some(&second)).await;
    let items = cart["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Rose Bush");
}
