use super::gated;
use crate::{AppState, auth, handlers};
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// Shopping List Router Module
///
/// All list operations. The Authorization Gate runs before the handler's body
/// extractor, so an unauthorized request gets 403 even when its body is malformed.
pub fn shopping_list_routes() -> Router<AppState> {
    Router::new()
        // POST /shoppingList/create
        // Any role that may own a list can create one. Names are unique store-wide.
        .route(
            "/shoppingList/create",
            gated(post(handlers::create_list), auth::LIST_CREATORS),
        )
        // DELETE /shoppingList/delete
        // Idempotent: unknown ids still succeed.
        .route(
            "/shoppingList/delete",
            gated(delete(handlers::delete_list), auth::LIST_MANAGERS),
        )
        // PUT /shoppingList/invite
        .route(
            "/shoppingList/invite",
            gated(put(handlers::invite), auth::LIST_MANAGERS),
        )
        // GET /shoppingList/get/{id}
        .route(
            "/shoppingList/get/{id}",
            gated(get(handlers::get_list), auth::LIST_MEMBERS),
        )
        // POST /shoppingList/post
        // Adds a product object to a list.
        .route(
            "/shoppingList/post",
            gated(post(handlers::add_product), auth::LIST_MEMBERS),
        )
        // POST /shoppingList/tag
        .route(
            "/shoppingList/tag",
            gated(post(handlers::tag_product), auth::LIST_MEMBERS),
        )
        // DELETE /shoppingList/removeProduct
        .route(
            "/shoppingList/removeProduct",
            gated(delete(handlers::remove_product), auth::LIST_MEMBERS),
        )
        // GET /listOfLists/get/{userId}
        // Lists owned by or shared with a user.
        .route(
            "/listOfLists/get/{userId}",
            gated(get(handlers::lists_for_user), auth::LIST_MEMBERS),
        )
}
