use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::validation::{FieldKind, FieldRule, Validate};

// --- Core Records (held by the in-memory store) ---

/// ShoppingList
///
/// A named, owned collection of products shared with invited users.
/// `owner` and `invited` are user ids, but nothing checks that those users exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ShoppingList {
    pub id: String,
    pub name: String,
    pub owner: String,
    // Products are stored exactly as the client posted them.
    #[ts(type = "Array<Record<string, unknown>>")]
    #[schema(value_type = Vec<Object>)]
    pub products: Vec<ListProduct>,
    // Appended to by invites; duplicates are kept.
    pub invited: Vec<String>,
    pub archived: bool,
}

impl ShoppingList {
    /// Builds an empty, unarchived list with a fresh UUID v4 id.
    pub fn new(name: String, owner: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            owner,
            products: Vec::new(),
            invited: Vec::new(),
            archived: false,
        }
    }

    /// True when `user_id` owns the list or has been invited to it.
    pub fn is_visible_to(&self, user_id: &str) -> bool {
        self.owner == user_id || self.invited.iter().any(|invited| invited == user_id)
    }
}

/// ListProduct
///
/// A product entry inside a shopping list. Conventionally `{ id, solved }`, but any
/// extra fields the client sends are kept and echoed back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ListProduct(Map<String, Value>);

impl ListProduct {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The product id, if the entry carries a string `id`.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn solved(&self) -> Option<bool> {
        self.0.get("solved").and_then(Value::as_bool)
    }

    pub fn set_solved(&mut self, solved: bool) {
        self.0.insert("solved".to_string(), Value::Bool(solved));
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// CatalogProduct
///
/// Read-only reference product. Unrelated to the entries stored inside lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CatalogProduct {
    pub id: String,
    pub name: String,
}

/// User
///
/// Reference data only; no endpoint creates or edits users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// --- Request Payloads (Input Schemas) ---

/// CreateListRequest
///
/// Body of `POST /shoppingList/create`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CreateListRequest {
    pub name: String,
    pub owner: String,
}

impl Validate for CreateListRequest {
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("name", FieldKind::String),
        FieldRule::new("owner", FieldKind::String),
    ];
}

/// DeleteListRequest
///
/// Body of `DELETE /shoppingList/delete`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct DeleteListRequest {
    pub id: String,
}

impl Validate for DeleteListRequest {
    const RULES: &'static [FieldRule] = &[FieldRule::new("id", FieldKind::String)];
}

/// InviteRequest
///
/// Body of `PUT /shoppingList/invite`. `invited` is appended as-is.
///
/// Every `invited` entry must be a string user id. This is stricter than a bare
/// array check: `[1, 2]` is rejected with a validation error.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InviteRequest {
    pub shopping_list_id: String,
    pub invited: Vec<String>,
}

impl Validate for InviteRequest {
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("shoppingListId", FieldKind::String),
        FieldRule::new("invited", FieldKind::StringArray),
    ];
}

/// AddProductRequest
///
/// Body of `POST /shoppingList/post`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AddProductRequest {
    pub shopping_list_id: String,
    #[ts(type = "Record<string, unknown>")]
    #[schema(value_type = Object)]
    pub product: ListProduct,
}

impl Validate for AddProductRequest {
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("shoppingListId", FieldKind::String),
        FieldRule::new("product", FieldKind::Object),
    ];
}

/// TagProductRequest
///
/// Body of `POST /shoppingList/tag`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TagProductRequest {
    pub shopping_list_id: String,
    pub product_id: String,
    pub solved: bool,
}

impl Validate for TagProductRequest {
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("shoppingListId", FieldKind::String),
        FieldRule::new("productId", FieldKind::String),
        FieldRule::new("solved", FieldKind::Boolean),
    ];
}

/// RemoveProductRequest
///
/// Body of `DELETE /shoppingList/removeProduct`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RemoveProductRequest {
    pub shopping_list_id: String,
    pub product_id: String,
}

impl Validate for RemoveProductRequest {
    const RULES: &'static [FieldRule] = &[
        FieldRule::new("shoppingListId", FieldKind::String),
        FieldRule::new("productId", FieldKind::String),
    ];
}

/// --- Response Envelopes (Output Schemas) ---

/// StatusResponse
///
/// `{ "status": "success" }`, returned by delete whether or not the list existed.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

/// ListProductsResponse
///
/// The full product sequence of a list after an add.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ListProductsResponse {
    #[ts(type = "Array<Record<string, unknown>>")]
    #[schema(value_type = Vec<Object>)]
    pub products: Vec<ListProduct>,
}

/// CatalogResponse
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CatalogResponse {
    pub products: Vec<CatalogProduct>,
}

/// ShoppingListsResponse
///
/// Lists a user owns or was invited to (GET /listOfLists/get/{userId}).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShoppingListsResponse {
    pub shopping_lists: Vec<ShoppingList>,
}
