//! Router Module Index
//!
//! Splits the API into sub-routers by who may call them. Each gated route carries
//! its own Authorization Gate as a route layer, so the allowed roles sit right next
//! to the path they protect.

/// Operational routes (health check). No role header needed.
pub mod public;

/// Shopping list routes, each gated by its own role set.
pub mod shopping_lists;

/// Product catalog routes.
pub mod catalog;

use crate::{
    AppState,
    auth::{self, RoleSet},
};
use axum::{middleware, routing::MethodRouter};

/// Wraps a method router with the Authorization Gate for `allowed`.
pub(crate) fn gated(route: MethodRouter<AppState>, allowed: RoleSet) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(allowed, auth::authorize))
}
