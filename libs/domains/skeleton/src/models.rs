use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Page size used when the request does not carry a usable `limit`.
pub const DEFAULT_LIMIT: i64 = 20;

/// Item entity, owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Owner; every list, update and delete is filtered on it
    pub user_id: Uuid,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    /// Absent until the first update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Item {
    /// Build a new item for `user_id` with a fresh id and creation time.
    ///
    /// `created_at` is truncated to microseconds, the precision Postgres
    /// stores, so the returned value equals what a later read yields.
    pub fn new(user_id: Uuid, input: CreateItem) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            user_id,
            active: input.active,
            created_at: Utc::now().trunc_subsecs(6),
            updated_at: None,
        }
    }
}

/// Request body for creating an item
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
    #[serde(default)]
    pub active: bool,
}

/// Request body for a partial update. Absent (or `null`) fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl UpdateItem {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.active.is_none()
    }
}

/// Raw list query parameters.
///
/// Kept as strings: a value that is not an integer is ignored rather than
/// rejected.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Page size; defaults to 20, capped at the configured maximum
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
    /// Rows to skip; defaults to 0
    #[param(value_type = Option<i64>)]
    pub offset: Option<String>,
}

/// Effective page window of a list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    /// Resolve raw parameters against `max_items`:
    /// - `limit`: missing, unparsable or `<= 0` gives [`DEFAULT_LIMIT`];
    ///   larger than `max_items` gives `max_items`
    /// - `offset`: missing, unparsable or negative gives 0
    pub fn resolve(params: &ListParams, max_items: i64) -> Self {
        let limit = parse_param(params.limit.as_deref())
            .filter(|l| *l > 0)
            .map(|l| l.min(max_items))
            .unwrap_or(DEFAULT_LIMIT);

        let offset = parse_param(params.offset.as_deref())
            .filter(|o| *o >= 0)
            .unwrap_or(0);

        Self { limit, offset }
    }
}

fn parse_param(raw: Option<&str>) -> Option<i64> {
    raw.filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i64>().ok())
}

/// One page of the caller's items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemList {
    pub items: Vec<Item>,
    /// Number of items the caller owns, independent of the page window
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
