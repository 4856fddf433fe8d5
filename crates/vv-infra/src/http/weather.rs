use async_trait::async_trait;
use reqwest::Method;
use vv_core::api::ApiResult;
use vv_core::location::Coordinate;
use vv_core::places::{Weather, WeatherForecast};
use vv_core::ports::WeatherPort;

use super::HttpBackendClient;

#[async_trait]
impl WeatherPort for HttpBackendClient {
    async fn current_weather(&self, at: Option<Coordinate>) -> ApiResult<Weather> {
        let mut builder = self.request(Method::GET, "/api/weather", None)?;
        if let Some(at) = at {
            builder = builder.query(&[("lat", at.latitude), ("lon", at.longitude)]);
        }
        self.fetch(builder).await
    }

    async fn forecast(&self, at: Coordinate) -> ApiResult<WeatherForecast> {
        let builder = self
            .request(Method::GET, "/api/weather/forecast", None)?
            .query(&[("lat", at.latitude), ("lon", at.longitude)]);
        self.fetch(builder).await
    }
}
