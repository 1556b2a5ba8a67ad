//! REST API handlers for cart, checkout and order history
//!
//! Every handler resolves the shopper's session from the `cart_session`
//! cookie, minting one (and setting the cookie) on first contact, the
//! session store serializing mutations within a session.

use super::models::{
    AddItemInput, AddItemResponse, CartLine, CartQuery, CartView, CheckoutInput, CouponView,
    DiscountView, HistoryResponse, SetQuantityInput,
};
use super::pricing::{self, PricingBreakdown};
use super::state::{resolve_session_id, session_cookie, Session, SharedState};
use crate::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use rust_decimal::Decimal;

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(view_cart))
        .route("/cart/items", post(add_item))
        .route("/cart/items/:id", put(set_quantity).delete(remove_item))
        .route("/checkout", post(checkout))
        .route("/history", get(history))
}

/// Attaches the session cookie when the id was minted for this request.
fn with_session(mut response: Response, session_id: &str, is_new: bool) -> Response {
    if is_new {
        if let Ok(value) = session_cookie(session_id).parse() {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
    response
}

fn cart_view(items: Vec<CartLine>, pricing: PricingBreakdown) -> CartView {
    let item_count = items.iter().map(|line| line.quantity).sum();
    let auto_discount = (pricing.auto_discount.amount > Decimal::ZERO).then(|| DiscountView {
        amount: pricing.auto_discount.amount,
        percent: pricing.auto_discount.percent,
        label: pricing.auto_discount.label,
    });
    let coupon = pricing.coupon.map(|c| CouponView {
        code: c.code,
        amount: c.amount,
        percent: c.percent,
    });

    CartView {
        items,
        item_count,
        subtotal: pricing.subtotal,
        auto_discount,
        coupon,
        coupon_invalid: pricing.coupon_invalid,
        gst: pricing.gst,
        total: pricing.total,
    }
}

/// Endpoint: GET /cart?coupon=CODE
/// The cart page view-model, optionally previewing a coupon code.
async fn view_cart(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<CartQuery>,
) -> Response {
    let (session_id, is_new) = resolve_session_id(&headers);
    let session = state.sessions.entry(session_id.clone()).or_default();

    let pricing = pricing::price_cart(&session.cart, &state.catalog, query.coupon.as_deref());
    let view = cart_view(session.cart.values().cloned().collect(), pricing);

    with_session(Json(view).into_response(), &session_id, is_new)
}

/// Endpoint: POST /cart/items
/// Adds one unit of a plant, snapshotting its name and price from the
/// catalog.
async fn add_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<AddItemInput>,
) -> Result<Response, ApiError> {
    let (session_id, is_new) = resolve_session_id(&headers);
    let plant = state
        .catalog
        .plant(payload.plant_id)
        .ok_or(ApiError::UnknownPlant(payload.plant_id))?
        .clone();

    let mut session = state.sessions.entry(session_id.clone()).or_default();
    let name = pricing::add_item(&mut session.cart, plant.id, &plant.name, plant.price);
    tracing::info!(session = %session_id, plant = %name, "added to cart");

    let breakdown = pricing::price_cart(&session.cart, &state.catalog, None);
    let view = cart_view(session.cart.values().cloned().collect(), breakdown);

    let response = Json(AddItemResponse {
        message: format!("Added {name} to cart!"),
        cart: view,
    })
    .into_response();
    Ok(with_session(response, &session_id, is_new))
}

/// Endpoint: PUT /cart/items/:id
/// Overwrites a line's quantity; zero or below removes the line.
async fn set_quantity(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(plant_id): Path<u32>,
    Json(payload): Json<SetQuantityInput>,
) -> Response {
    let (session_id, is_new) = resolve_session_id(&headers);
    let mut session = state.sessions.entry(session_id.clone()).or_default();

    pricing::set_quantity(&mut session.cart, plant_id, payload.quantity);

    let breakdown = pricing::price_cart(&session.cart, &state.catalog, None);
    let view = cart_view(session.cart.values().cloned().collect(), breakdown);
    with_session(Json(view).into_response(), &session_id, is_new)
}

/// Endpoint: DELETE /cart/items/:id
/// Removes a line; absent ids are a no-op, not an error.
async fn remove_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(plant_id): Path<u32>,
) -> Response {
    let (session_id, is_new) = resolve_session_id(&headers);
    let mut session = state.sessions.entry(session_id.clone()).or_default();

    pricing::remove_item(&mut session.cart, plant_id);

    let breakdown = pricing::price_cart(&session.cart, &state.catalog, None);
    let view = cart_view(session.cart.values().cloned().collect(), breakdown);
    with_session(Json(view).into_response(), &session_id, is_new)
}

/// Endpoint: POST /checkout
/// Records an order snapshot and clears the cart. Rejects an empty cart.
async fn checkout(
    State(state): State<SharedState>,
    headers: HeaderMap,
    payload: Option<Json<CheckoutInput>>,
) -> Result<Response, ApiError> {
    let (session_id, is_new) = resolve_session_id(&headers);
    let mut session = state.sessions.entry(session_id.clone()).or_default();

    if session.cart.is_empty() {
        return Err(ApiError::EmptyCart);
    }

    let coupon = payload.and_then(|Json(p)| p.coupon);
    let Session { cart, history } = &mut *session;
    let order = pricing::checkout(cart, history, &state.catalog, coupon.as_deref());
    tracing::info!(
        session = %session_id,
        order = order.id,
        total = %order.final_total,
        "checkout complete"
    );

    Ok(with_session(Json(order).into_response(), &session_id, is_new))
}

/// Endpoint: GET /history
/// All orders recorded for the session, ascending by id.
async fn history(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let (session_id, is_new) = resolve_session_id(&headers);
    let session = state.sessions.entry(session_id.clone()).or_default();

    let orders = session.history.values().cloned().collect();
    with_session(
        Json(HistoryResponse { orders }).into_response(),
        &session_id,
        is_new,
    )
}
