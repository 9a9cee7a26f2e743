use serde_json::json;
use shopping_list_api::{
    auth::{self, Role},
    models::{AddProductRequest, InviteRequest, ShoppingList, ShoppingListsResponse, TagProductRequest},
    validation::{FieldKind, FieldRule, FieldViolation, Validate, check_fields},
};

// --- Wire format ---

#[test]
fn test_request_payloads_use_camel_case() {
    let tag: TagProductRequest = serde_json::from_value(json!({
        "shoppingListId": "l1", "productId": "p1", "solved": true
    }))
    .unwrap();
    assert_eq!(tag.shopping_list_id, "l1");
    assert_eq!(tag.product_id, "p1");
    assert!(tag.solved);

    let invite: InviteRequest =
        serde_json::from_value(json!({ "shoppingListId": "l1", "invited": ["a", "a"] })).unwrap();
    assert_eq!(invite.invited, vec!["a", "a"]);
}

#[test]
fn test_list_product_keeps_arbitrary_fields() {
    let request: AddProductRequest = serde_json::from_value(json!({
        "shoppingListId": "l1",
        "product": { "id": "p1", "solved": false, "tags": ["fresh"], "qty": 3 }
    }))
    .unwrap();

    assert_eq!(request.product.id(), Some("p1"));
    assert_eq!(
        serde_json::to_value(&request.product).unwrap(),
        json!({ "id": "p1", "solved": false, "tags": ["fresh"], "qty": 3 })
    );
}

#[test]
fn test_shopping_list_serialization_shape() {
    let list = ShoppingList::new("Groceries".to_string(), "u1".to_string());
    let encoded = serde_json::to_value(&list).unwrap();

    assert_eq!(
        encoded,
        json!({
            "id": list.id,
            "name": "Groceries",
            "owner": "u1",
            "products": [],
            "invited": [],
            "archived": false
        })
    );
}

#[test]
fn test_shopping_lists_response_key() {
    let response = ShoppingListsResponse {
        shopping_lists: vec![],
    };
    let json_output = serde_json::to_string(&response).unwrap();
    assert_eq!(json_output, r#"{"shoppingLists":[]}"#);
}

#[test]
fn test_visibility_owner_or_invited() {
    let mut list = ShoppingList::new("Groceries".to_string(), "owner".to_string());
    list.invited.push("guest".to_string());

    assert!(list.is_visible_to("owner"));
    assert!(list.is_visible_to("guest"));
    assert!(!list.is_visible_to("stranger"));
}

// --- Validation rules ---

const RULES: &[FieldRule] = &[
    FieldRule::new("name", FieldKind::String),
    FieldRule::new("invited", FieldKind::StringArray),
    FieldRule::new("solved", FieldKind::Boolean),
];

#[test]
fn test_all_violations_reported_in_rule_order() {
    let violations = check_fields(&json!({ "name": 3, "solved": "yes" }), RULES);

    let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
    assert_eq!(paths, vec!["name", "invited", "solved"]);
    assert_eq!(violations[0].value, Some(json!(3)));
    assert_eq!(violations[1].value, None);
}

#[test]
fn test_valid_body_has_no_violations() {
    let body = json!({ "name": "Groceries", "invited": ["u1", "u1"], "solved": false });
    assert!(check_fields(&body, RULES).is_empty());
}

#[test]
fn test_non_object_body_misses_every_field() {
    assert_eq!(check_fields(&json!([1, 2]), RULES).len(), RULES.len());
}

#[test]
fn test_string_array_rejects_mixed_items() {
    assert!(!FieldKind::StringArray.matches(&json!(["u1", 2])));
    assert!(FieldKind::StringArray.matches(&json!([])));
}

#[test]
fn test_payload_rules_cover_required_fields() {
    let fields: Vec<&str> = AddProductRequest::RULES.iter().map(|r| r.field).collect();
    assert_eq!(fields, vec!["shoppingListId", "product"]);
}

#[test]
fn test_missing_value_is_omitted_from_json() {
    let encoded = serde_json::to_value(FieldViolation::invalid_field("owner", None)).unwrap();
    assert_eq!(
        encoded,
        json!({ "type": "field", "msg": "Invalid value", "path": "owner", "location": "body" })
    );
}

// --- Role claims ---

#[test]
fn test_role_parsing_is_exact() {
    assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
    assert_eq!("Invited".parse::<Role>(), Ok(Role::Invited));
    assert!("admin".parse::<Role>().is_err());
    assert!(" Owner".parse::<Role>().is_err());
    assert_eq!(Role::User.to_string(), "User");
}

#[test]
fn test_role_sets() {
    assert!(auth::is_permitted(Some(Role::User), auth::LIST_CREATORS));
    assert!(!auth::is_permitted(Some(Role::Invited), auth::LIST_CREATORS));
    assert!(!auth::is_permitted(Some(Role::User), auth::LIST_MEMBERS));
    assert!(auth::is_permitted(Some(Role::Invited), auth::CATALOG_READERS));
    assert!(!auth::is_permitted(None, auth::CATALOG_READERS));
}

#[test]
fn test_claimed_role_from_headers() {
    let mut headers = axum::http::HeaderMap::new();
    assert_eq!(auth::claimed_role(&headers), None);

    headers.insert(auth::ROLE_HEADER, "Owner".parse().unwrap());
    assert_eq!(auth::claimed_role(&headers), Some(Role::Owner));

    headers.insert(auth::ROLE_HEADER, "Root".parse().unwrap());
    assert_eq!(auth::claimed_role(&headers), None);
}

#[test]
fn test_raw_claim_keeps_unrecognised_value() {
    let mut headers = axum::http::HeaderMap::new();
    assert_eq!(auth::raw_claim(&headers), None);

    headers.insert(auth::ROLE_HEADER, "admin".parse().unwrap());
    assert_eq!(auth::claimed_role(&headers), None);
    assert_eq!(auth::raw_claim(&headers).as_deref(), Some("admin"));
}
