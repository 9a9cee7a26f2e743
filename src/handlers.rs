use crate::{
    AppState,
    error::ApiError,
    models::{
        AddProductRequest, CatalogResponse, CreateListRequest, DeleteListRequest, InviteRequest,
        ListProductsResponse, RemoveProductRequest, ShoppingList, ShoppingListsResponse,
        StatusResponse, TagProductRequest,
    },
    repository::StoreError,
    validation::Valid,
};
use axum::{
    Json,
    extract::{Path, State},
};

// Every handler below sits behind the Authorization Gate (`auth::authorize`),
// which runs as a route layer before any extractor. A body is only validated
// once the role claim has been accepted.

/// create_list
///
/// Creates an empty shopping list. List names are unique across the whole store,
/// independent of the owner.
///
/// *Note*: `owner` is not checked against known users.
#[utoipa::path(
    post,
    path = "/shoppingList/create",
    request_body = CreateListRequest,
    params(("role" = String, Header, description = "Admin, Owner or User")),
    responses(
        (status = 200, description = "Created", body = ShoppingList),
        (status = 400, description = "Invalid body or duplicate name"),
        (status = 403, description = "Role not allowed")
    )
)]
pub async fn create_list(
    State(state): State<AppState>,
    Valid(payload): Valid<CreateListRequest>,
) -> Result<Json<ShoppingList>, ApiError> {
    let list = state.repo.create_list(payload.name, payload.owner).await?;
    tracing::info!(list_id = %list.id, name = %list.name, "shopping list created");
    Ok(Json(list))
}

/// delete_list
///
/// Deletes a list by id. Idempotent: deleting an unknown id still reports success.
#[utoipa::path(
    delete,
    path = "/shoppingList/delete",
    request_body = DeleteListRequest,
    params(("role" = String, Header, description = "Admin or Owner")),
    responses(
        (status = 200, description = "Deleted (or already absent)", body = StatusResponse),
        (status = 403, description = "Role not allowed")
    )
)]
pub async fn delete_list(
    State(state): State<AppState>,
    Valid(payload): Valid<DeleteListRequest>,
) -> Json<StatusResponse> {
    let removed = state.repo.delete_list(&payload.id).await;
    tracing::info!(list_id = %payload.id, removed, "shopping list delete");
    Json(StatusResponse::success())
}

/// invite
///
/// Appends user ids to a list's `invited` sequence. No de-duplication.
#[utoipa::path(
    put,
    path = "/shoppingList/invite",
    request_body = InviteRequest,
    params(("role" = String, Header, description = "Admin or Owner")),
    responses(
        (status = 200, description = "Updated list", body = ShoppingList),
        (status = 404, description = "Shopping list not found")
    )
)]
pub async fn invite(
    State(state): State<AppState>,
    Valid(payload): Valid<InviteRequest>,
) -> Result<Json<ShoppingList>, ApiError> {
    let list = state
        .repo
        .invite(&payload.shopping_list_id, payload.invited)
        .await?;
    Ok(Json(list))
}

/// get_list
///
/// Returns a single list by id.
#[utoipa::path(
    get,
    path = "/shoppingList/get/{id}",
    params(
        ("id" = String, Path, description = "Shopping list id"),
        ("role" = String, Header, description = "Admin, Owner or Invited")
    ),
    responses(
        (status = 200, description = "Found", body = ShoppingList),
        (status = 404, description = "Shopping list not found")
    )
)]
pub async fn get_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ShoppingList>, ApiError> {
    state
        .repo
        .get_list(&id)
        .await
        .map(Json)
        .ok_or(ApiError::Store(StoreError::ListNotFound))
}

/// add_product
///
/// Appends a product object to a list and returns the list's full product sequence.
/// The object is stored as sent; no `solved` default is added.
#[utoipa::path(
    post,
    path = "/shoppingList/post",
    request_body = AddProductRequest,
    params(("role" = String, Header, description = "Admin, Owner or Invited")),
    responses(
        (status = 200, description = "Products after the add", body = ListProductsResponse),
        (status = 404, description = "Shopping list not found")
    )
)]
pub async fn add_product(
    State(state): State<AppState>,
    Valid(payload): Valid<AddProductRequest>,
) -> Result<Json<ListProductsResponse>, ApiError> {
    let products = state
        .repo
        .add_product(&payload.shopping_list_id, payload.product)
        .await?;
    Ok(Json(ListProductsResponse { products }))
}

/// get_catalog
///
/// Returns the read-only product catalog.
#[utoipa::path(
    get,
    path = "/products/get",
    params(("role" = String, Header, description = "Admin, Owner, Invited or User")),
    responses((status = 200, description = "Catalog", body = CatalogResponse))
)]
pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        products: state.repo.catalog().await,
    })
}

/// tag_product
///
/// Marks a product in a list as solved (or unsolved).
#[utoipa::path(
    post,
    path = "/shoppingList/tag",
    request_body = TagProductRequest,
    params(("role" = String, Header, description = "Admin, Owner or Invited")),
    responses(
        (status = 200, description = "Updated list", body = ShoppingList),
        (status = 404, description = "Shopping list or product not found")
    )
)]
pub async fn tag_product(
    State(state): State<AppState>,
    Valid(payload): Valid<TagProductRequest>,
) -> Result<Json<ShoppingList>, ApiError> {
    let list = state
        .repo
        .tag_product(&payload.shopping_list_id, &payload.product_id, payload.solved)
        .await?;
    Ok(Json(list))
}

/// lists_for_user
///
/// Lists every shopping list the user owns or was invited to. An unknown user
/// simply gets an empty sequence.
#[utoipa::path(
    get,
    path = "/listOfLists/get/{userId}",
    params(
        ("userId" = String, Path, description = "User id"),
        ("role" = String, Header, description = "Admin, Owner or Invited")
    ),
    responses((status = 200, description = "Matching lists", body = ShoppingListsResponse))
)]
pub async fn lists_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<ShoppingListsResponse> {
    Json(ShoppingListsResponse {
        shopping_lists: state.repo.lists_for_user(&user_id).await,
    })
}

/// remove_product
///
/// Removes a product (every entry with that id) from a list.
#[utoipa::path(
    delete,
    path = "/shoppingList/removeProduct",
    request_body = RemoveProductRequest,
    params(("role" = String, Header, description = "Admin, Owner or Invited")),
    responses(
        (status = 200, description = "Updated list", body = ShoppingList),
        (status = 404, description = "Shopping list or product not found")
    )
)]
pub async fn remove_product(
    State(state): State<AppState>,
    Valid(payload): Valid<RemoveProductRequest>,
) -> Result<Json<ShoppingList>, ApiError> {
    let list = state
        .repo
        .remove_product(&payload.shopping_list_id, &payload.product_id)
        .await?;
    tracing::info!(
        list_id = %list.id,
        product_id = %payload.product_id,
        "product removed from list"
    );
    Ok(Json(list))
}
