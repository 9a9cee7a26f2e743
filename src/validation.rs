use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// FieldKind
///
/// The JSON shape a request field must have. Checks are shape-only: no length
/// limits, no cross-field rules, no lookups against stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    StringArray,
    Object,
    Boolean,
}

impl FieldKind {
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::StringArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            Self::Object => value.is_object(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

/// A single required body field and the shape it must have.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub kind: FieldKind,
}

impl FieldRule {
    pub const fn new(field: &'static str, kind: FieldKind) -> Self {
        Self { field, kind }
    }
}

/// FieldViolation
///
/// One entry of the `errors` array in a 400 response.
/// `value` is left out when the field was absent from the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub msg: String,
    pub path: String,
    pub location: &'static str,
}

impl FieldViolation {
    pub fn invalid_field(path: &str, value: Option<Value>) -> Self {
        Self {
            kind: "field",
            value,
            msg: "Invalid value".to_string(),
            path: path.to_string(),
            location: "body",
        }
    }

    /// The body as a whole could not be read (e.g. malformed JSON).
    pub fn unreadable_body(reason: impl Into<String>) -> Self {
        Self {
            kind: "body",
            value: None,
            msg: reason.into(),
            path: String::new(),
            location: "body",
        }
    }
}

/// Validate
///
/// Implemented by request payloads to declare their required fields.
pub trait Validate: DeserializeOwned {
    const RULES: &'static [FieldRule];
}

/// Checks every rule against `body` and returns all violations, in rule order.
pub fn check_fields(body: &Value, rules: &[FieldRule]) -> Vec<FieldViolation> {
    let empty = Map::new();
    let fields = body.as_object().unwrap_or(&empty);

    rules
        .iter()
        .filter_map(|rule| match fields.get(rule.field) {
            Some(value) if rule.kind.matches(value) => None,
            value => Some(FieldViolation::invalid_field(rule.field, value.cloned())),
        })
        .collect()
}

/// Valid
///
/// JSON body extractor that runs the payload's field rules before deserializing.
/// A request without a JSON content type is treated as an empty object, so each
/// required field is reported as missing.
///
/// Rejection: `ApiError::Validation` (400) carrying every violation.
pub struct Valid<T>(pub T);

impl<S, T> FromRequest<S> for Valid<T>
where
    S: Send + Sync,
    T: Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = match Json::<Value>::from_request(req, state).await {
            Ok(Json(body)) => body,
            Err(JsonRejection::MissingJsonContentType(_)) => Value::Object(Map::new()),
            Err(rejection) => {
                return Err(ApiError::Validation(vec![FieldViolation::unreadable_body(
                    rejection.body_text(),
                )]));
            }
        };

        let violations = check_fields(&body, T::RULES);
        if !violations.is_empty() {
            tracing::debug!(count = violations.len(), "request body failed validation");
            return Err(ApiError::Validation(violations));
        }

        serde_json::from_value(body)
            .map(Valid)
            .map_err(|e| ApiError::Validation(vec![FieldViolation::unreadable_body(e.to_string())]))
    }
}
