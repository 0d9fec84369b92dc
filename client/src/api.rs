//! The REST collaborator as seen by the state core.

use std::future::Future;

use common::{
    facet_catalog::ResourceType,
    filter_state::FilterState,
    resource::ResultPage,
    vote::VoteValue,
};

use crate::error::ApiError;


/// One `GET /api/<resource type>` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub resource_type: ResourceType,
    pub filter: FilterState,
    pub cursor: Option<String>,
    pub page_size: u64,
}

impl PageRequest {
    pub fn is_first_page(&self) -> bool {
        self.cursor.is_none()
    }
}

/// What the server reported after a vote mutation. A missing score leaves
/// the optimistic one in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteReceipt {
    pub score: Option<i64>,
}

impl VoteReceipt {
    /// Accepts either a bare number or an object with a `score` member.
    /// Anything else, including an empty body, yields no score.
    pub fn from_body(body: &str) -> Self {
        let score = match serde_json::from_str::<serde_json::Value>(body) {
            Ok(serde_json::Value::Number(number)) => number.as_i64(),
            Ok(serde_json::Value::Object(object)) => object.get("score").and_then(serde_json::Value::as_i64),
            _ => None,
        };
        Self { score }
    }
}

/// Calls are made from a single-threaded UI loop, so the returned futures
/// need not be `Send`.
pub trait ResourceApi {
    fn fetch_page(&self, request: &PageRequest) -> impl Future<Output = Result<ResultPage, ApiError>>;

    fn cast_vote(&self, post_id: &str, value: VoteValue) -> impl Future<Output = Result<VoteReceipt, ApiError>>;

    fn clear_vote(&self, post_id: &str) -> impl Future<Output = Result<VoteReceipt, ApiError>>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_receipt_shapes() {
        assert_eq!(VoteReceipt::from_body("12").score, Some(12));
        assert_eq!(VoteReceipt::from_body(r#"{"score": -3, "userVote": -1}"#).score, Some(-3));
        assert_eq!(VoteReceipt::from_body("").score, None);
        assert_eq!(VoteReceipt::from_body(r#"{"ok": true}"#).score, None);
    }
}
