//! Cart CRUD endpoints.
//!
//! Every endpoint is scoped to the authenticated user: the identity comes
//! from the `x-user-id` header (see [`crate::auth::AuthUser`]) and no
//! request can name another user's cart.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use cart_store::CartStore;
use common::CartItemId;
use domain::{AddItemRequest, Cart, CartCounts, CartLine, CartService};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::ApiError;

/// Shared application state accessible from all cart handlers.
pub struct AppState<S: CartStore> {
    pub cart_service: CartService<S>,
}

/// PATCH body for quantity updates.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i32,
}

/// GET /api/v1/cart. Returns the user's computed cart view.
#[tracing::instrument(skip(state))]
pub async fn get_cart<S: CartStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Cart>, ApiError> {
    let cart = state.cart_service.get_cart(user_id).await?;
    Ok(Json(cart))
}

/// POST /api/v1/cart. Adds a product; repeat adds merge quantities.
#[tracing::instrument(skip(state, req))]
pub async fn add_item<S: CartStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<CartLine>), ApiError> {
    let line = state.cart_service.add_to_cart(user_id, req).await?;
    Ok((StatusCode::CREATED, Json(line)))
}

/// GET /api/v1/cart/count. Returns both cart cardinalities.
#[tracing::instrument(skip(state))]
pub async fn cart_count<S: CartStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<CartCounts>, ApiError> {
    let counts = state.cart_service.cart_counts(user_id).await?;
    Ok(Json(counts))
}

/// PATCH /api/v1/cart/items/{id}. Sets a line item's quantity.
#[tracing::instrument(skip(state, req))]
pub async fn update_item<S: CartStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    AuthUser(user_id): AuthUser,
    Path(item_id): Path<i64>,
    Json(req): Json<UpdateQuantityRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .cart_service
        .update_item_quantity(user_id, CartItemId::new(item_id), req.quantity)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/cart/items/{id}. Removes a line item.
#[tracing::instrument(skip(state))]
pub async fn remove_item<S: CartStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    AuthUser(user_id): AuthUser,
    Path(item_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .cart_service
        .remove_item(user_id, CartItemId::new(item_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/cart. Empties the user's cart.
#[tracing::instrument(skip(state))]
pub async fn clear_cart<S: CartStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    AuthUser(user_id): AuthUser,
) -> Result<StatusCode, ApiError> {
    state.cart_service.clear_cart(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
