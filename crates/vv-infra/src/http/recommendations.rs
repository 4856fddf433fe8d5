use async_trait::async_trait;
use reqwest::Method;
use vv_core::api::ApiResult;
use vv_core::places::{QuickRecsResponse, Recommendation, TopRecommendations, TopRecommendationsQuery};
use vv_core::ports::RecommendationsPort;

use super::HttpBackendClient;

#[async_trait]
impl RecommendationsPort for HttpBackendClient {
    async fn quick_recommendations(
        &self,
        category: &str,
        limit: u32,
        token: Option<&str>,
    ) -> ApiResult<QuickRecsResponse> {
        let limit = limit.to_string();
        let builder = self
            .request(Method::GET, "/api/quick_recs", token)?
            .query(&[("category", category), ("limit", limit.as_str())]);
        self.fetch(builder).await
    }

    async fn top_recommendations(
        &self,
        query: &TopRecommendationsQuery,
        token: Option<&str>,
    ) -> ApiResult<Vec<Recommendation>> {
        let builder = self
            .request(Method::GET, "/api/top_recommendations", token)?
            .query(&query.to_query_pairs());
        let wrapper: TopRecommendations = self.fetch(builder).await?;
        Ok(wrapper.places)
    }
}
