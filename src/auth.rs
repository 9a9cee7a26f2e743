use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::{fmt, str::FromStr};

use crate::error::ApiError;

/// Header carrying the caller's role claim.
pub const ROLE_HEADER: &str = "role";

/// Role
///
/// The permission level a caller claims. The claim is read from the `role`
/// header and trusted verbatim: nothing signs or verifies it, so any client can
/// claim any role. This is a capability check, not authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Owner,
    Invited,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Owner => "Owner",
            Self::Invited => "Invited",
            Self::User => "User",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a header value is not one of the known role names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role `{0}`")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    // Matching is exact and case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Self::Admin),
            "Owner" => Ok(Self::Owner),
            "Invited" => Ok(Self::Invited),
            "User" => Ok(Self::User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A fixed set of roles allowed on a route.
pub type RoleSet = &'static [Role];

/// May create lists.
pub const LIST_CREATORS: RoleSet = &[Role::Admin, Role::Owner, Role::User];
/// May delete lists and invite collaborators.
pub const LIST_MANAGERS: RoleSet = &[Role::Admin, Role::Owner];
/// May read lists and edit their products.
pub const LIST_MEMBERS: RoleSet = &[Role::Admin, Role::Owner, Role::Invited];
/// May browse the product catalog.
pub const CATALOG_READERS: RoleSet = &[Role::Admin, Role::Owner, Role::Invited, Role::User];

/// Reads the role claim from the request headers, if present and recognised.
pub fn claimed_role(headers: &HeaderMap) -> Option<Role> {
    headers
        .get(ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

/// The `role` header exactly as sent, for logging rejected claims.
pub fn raw_claim(headers: &HeaderMap) -> Option<String> {
    headers
        .get(ROLE_HEADER)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
}

/// True when `claim` names one of the `allowed` roles.
pub fn is_permitted(claim: Option<Role>, allowed: RoleSet) -> bool {
    claim.is_some_and(|role| allowed.contains(&role))
}

/// authorize
///
/// The Authorization Gate. Attached per route with
/// `middleware::from_fn_with_state(roles, authorize)`, where `roles` is the set
/// of roles that may call it.
///
/// *Mechanism*: the request is only forwarded when the `role` header names an
/// allowed role. Otherwise the handler never runs (and its body is never read)
/// and the caller gets 403 `{"error":"Unauthorized"}`.
pub async fn authorize(State(allowed): State<RoleSet>, request: Request, next: Next) -> Response {
    let claim = claimed_role(request.headers());

    if !is_permitted(claim, allowed) {
        tracing::warn!(
            claimed = ?raw_claim(request.headers()),
            uri = %request.uri(),
            "role claim rejected"
        );
        return ApiError::Unauthorized.into_response();
    }

    next.run(request).await
}
