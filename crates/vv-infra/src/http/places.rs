use async_trait::async_trait;
use reqwest::Method;
use vv_core::api::ApiResult;
use vv_core::location::Coordinate;
use vv_core::places::{DashboardResponse, DirectionsResponse, EventsResponse};
use vv_core::ports::PlacesPort;

use super::HttpBackendClient;

#[async_trait]
impl PlacesPort for HttpBackendClient {
    async fn directions(
        &self,
        destination: Coordinate,
        origin: Option<Coordinate>,
    ) -> ApiResult<DirectionsResponse> {
        let mut params = vec![
            ("lat", destination.latitude.to_string()),
            ("lng", destination.longitude.to_string()),
        ];
        if let Some(origin) = origin {
            params.push(("origin_lat", origin.latitude.to_string()));
            params.push(("origin_lng", origin.longitude.to_string()));
        }
        let builder = self
            .request(Method::GET, "/api/directions", None)?
            .query(&params);
        self.fetch(builder).await
    }

    async fn events(&self) -> ApiResult<EventsResponse> {
        let builder = self.request(Method::GET, "/api/events", None)?;
        self.fetch(builder).await
    }

    async fn dashboard(
        &self,
        token: &str,
        at: Option<Coordinate>,
    ) -> ApiResult<DashboardResponse> {
        let mut builder = self
            .request(Method::GET, "/api/dashboard", Some(token))?
            .timeout(self.dashboard_timeout());
        if let Some(at) = at {
            builder = builder.query(&[("latitude", at.latitude), ("longitude", at.longitude)]);
        }
        self.fetch(builder).await
    }
}
