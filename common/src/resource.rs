use serde::{Deserialize, Serialize};

use crate::vote::VoteState;


/// The list-rendering shape of any directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Per-type fields the list view passes through untouched.
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<VoteState>,
}

impl ResourceSummary {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: String::new(),
            kind: String::new(),
            data: serde_json::Value::Null,
            votes: None,
        }
    }

    /// String field from `data`, for per-type details such as a city or deadline.
    pub fn data_str(&self, field: &str) -> Option<&str> {
        self.data.get(field).and_then(serde_json::Value::as_str)
    }
}


/// One page returned by `GET /api/<resource type>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage {
    pub items: Vec<ResourceSummary>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl ResultPage {
    pub fn new(items: Vec<ResourceSummary>, next_cursor: Option<&str>) -> Self {
        let total = items.len() as u64;
        Self { items, total, next_cursor: next_cursor.map(str::to_string) }
    }

    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::vote::VoteValue;

    #[test]
    fn parses_backend_page() {
        let body = r#"{
            "items": [
                {"id": "u-17", "title": "UC Davis", "type": "university",
                 "data": {"city": "Davis"}},
                {"id": "p-3", "title": "Drip lines", "summary": "Question",
                 "votes": {"score": 4, "userVote": 1}}
            ],
            "total": 42,
            "nextCursor": "c2"
        }"#;
        let page: ResultPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.total, 42);
        assert_eq!(page.next_cursor.as_deref(), Some("c2"));
        assert_eq!(page.items[0].kind, "university");
        assert_eq!(page.items[0].data_str("city"), Some("Davis"));
        assert_eq!(page.items[1].votes.map(|v| v.user_vote), Some(Some(VoteValue::Up)));
    }

    #[test]
    fn null_cursor_marks_last_page() {
        let page: ResultPage = serde_json::from_str(r#"{"items": [], "total": 0, "nextCursor": null}"#).unwrap();
        assert!(page.is_last());
    }
}
