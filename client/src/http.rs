//! `reqwest` implementation of [`ResourceApi`].

use common::vote::VoteValue;
use url::Url;

use crate::{
    api::{PageRequest, ResourceApi, VoteReceipt},
    config::ClientConfig,
    error::ApiError,
    url_sync::{FILTERS_PARAM, QUERY_PARAM, SORT_PARAM, filters_json},
};
use common::resource::ResultPage;


pub const CURSOR_PARAM: &str = "cursor";
pub const LIMIT_PARAM: &str = "limit";

#[derive(Debug, Clone)]
pub struct HttpResourceApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpResourceApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_base_url.clone(),
        }
    }

    pub fn page_url(&self, request: &PageRequest) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&["api", request.resource_type.as_str()])?;
        {
            let mut pairs = url.query_pairs_mut();
            let query = request.filter.query.trim();
            if !query.is_empty() {
                pairs.append_pair(QUERY_PARAM, query);
            }
            if let Some(filters) = filters_json(&request.filter) {
                pairs.append_pair(FILTERS_PARAM, &filters);
            }
            if !request.filter.sort.is_default() {
                pairs.append_pair(SORT_PARAM, request.filter.sort.as_str());
            }
            if let Some(cursor) = &request.cursor {
                pairs.append_pair(CURSOR_PARAM, cursor);
            }
            pairs.append_pair(LIMIT_PARAM, &request.page_size.to_string());
        }
        Ok(url)
    }

    pub fn vote_url(&self, post_id: &str) -> Result<Url, ApiError> {
        self.endpoint(&["api", "forum", "posts", post_id, "vote"])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(format!("{} cannot be a base url", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl ResourceApi for HttpResourceApi {
    async fn fetch_page(&self, request: &PageRequest) -> Result<ResultPage, ApiError> {
        let url = self.page_url(request)?;
        tracing::debug!(%url, "fetching result page");
        let response = self.client.get(url).send().await?;
        let body = read_body(response).await?;
        let page: ResultPage = serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))?;
        tracing::debug!(items = page.items.len(), total = page.total, "result page received");
        Ok(page)
    }

    async fn cast_vote(&self, post_id: &str, value: VoteValue) -> Result<VoteReceipt, ApiError> {
        let url = self.vote_url(post_id)?;
        let body = serde_json::json!({ "value": i8::from(value) });
        let response = self.client.post(url).json(&body).send().await?;
        Ok(VoteReceipt::from_body(&read_body(response).await?))
    }

    async fn clear_vote(&self, post_id: &str) -> Result<VoteReceipt, ApiError> {
        let url = self.vote_url(post_id)?;
        let response = self.client.delete(url).send().await?;
        Ok(VoteReceipt::from_body(&read_body(response).await?))
    }
}

async fn read_body(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_client_error() || status.is_server_error() {
        tracing::warn!(%status, "request rejected by server");
        return Err(ApiError::Status { status: status.as_u16(), body });
    }
    Ok(body)
}


#[cfg(test)]
mod tests {
    use common::{
        facet_catalog::{FacetKey, ResourceType},
        filter_state::{FilterState, SortKey},
    };

    use super::*;

    fn api(base: &str) -> HttpResourceApi {
        HttpResourceApi::new(&ClientConfig::default().with_base_url(base))
    }

    #[test]
    fn page_url_carries_filters_and_cursor() {
        let request = PageRequest {
            resource_type: ResourceType::Universities,
            filter: FilterState::new()
                .with_query(" tomato ")
                .with_facet(FacetKey::State, ["CA"])
                .with_sort(SortKey::Newest),
            cursor: Some("c2".to_string()),
            page_size: 20,
        };
        let url = api("https://growers.example.org").page_url(&request).unwrap();
        assert_eq!(url.path(), "/api/universities");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "tomato".to_string()),
                ("filters".to_string(), r#"{"state":["CA"]}"#.to_string()),
                ("sort".to_string(), "newest".to_string()),
                ("cursor".to_string(), "c2".to_string()),
                ("limit".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn first_page_of_unfiltered_query_only_sends_limit() {
        let request = PageRequest {
            resource_type: ResourceType::Bulletins,
            filter: FilterState::new(),
            cursor: None,
            page_size: 10,
        };
        let url = api("http://127.0.0.1:8080/portal/").page_url(&request).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/portal/api/bulletins?limit=10");
    }

    #[test]
    fn vote_url_escapes_post_id() {
        let url = api("https://growers.example.org").vote_url("p 1/2").unwrap();
        assert_eq!(url.path(), "/api/forum/posts/p%201%2F2/vote");
    }

    #[test]
    fn unusable_base_url_is_reported() {
        let err = api("not a url").vote_url("p1").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
        let err = api("mailto:growers@example.org").vote_url("p1").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }
}
