use crate::{
    cities,
    error::BotError,
    model::{CurrentWeather, WeatherApiResponse},
};

pub const WEATHER_ERROR_REPLY: &str = "Sorry, we encountered an error. Please try again.";
pub const INVALID_CITY_REPLY: &str = "Invalid city entered.";

/// Client for the OpenWeatherMap current weather endpoint.
#[derive(Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(
        client: reqwest::Client,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        WeatherClient {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    pub async fn current(&self, city_id: &str) -> Result<CurrentWeather, BotError> {
        match cities::find_by_id(city_id) {
            Some(city) => log::info!("API call {}?id={} ({})", self.api_url, city_id, city.name),
            None => log::warn!("API call {}?id={} (not a menu city)", self.api_url, city_id),
        }

        let res = self
            .client
            .get(&self.api_url)
            .query(&[("id", city_id), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(BotError::Status {
                service: "weather API",
                status: res.status(),
            });
        }

        let data = res.json::<WeatherApiResponse>().await?;
        log::debug!("weather data {:?}", data);

        let description = data
            .weather
            .into_iter()
            .next()
            .and_then(|condition| condition.description);

        match (data.name, description) {
            (Some(place), Some(description)) => Ok(CurrentWeather { place, description }),
            _ => Err(BotError::MalformedWeather),
        }
    }

    /// Text reply for a city selection. Failures become a fixed apology.
    pub async fn reply_for(&self, payload: &str) -> String {
        if payload.is_empty() {
            return INVALID_CITY_REPLY.to_string();
        }

        match self.current(payload).await {
            Ok(weather) => format!(
                "Current weather in {} is {}",
                weather.place, weather.description
            ),
            Err(e) => {
                log::error!("Weather lookup for {} failed: {}", payload, e);
                WEATHER_ERROR_REPLY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn client_for(server: &MockServer) -> WeatherClient {
        WeatherClient::new(
            reqwest::Client::new(),
            format!("{}/data/2.5/weather", server.uri()),
            "test-key",
        )
    }

    #[tokio::test]
    async fn test_reply_formats_current_weather() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("id", "1880252"))
            .and(query_param("appid", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Singapore",
                "weather": [{"id": 800, "main": "Clear", "description": "clear sky"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let weather = client_for(&server);
        assert_eq!(
            weather.reply_for("1880252").await,
            "Current weather in Singapore is clear sky"
        );
    }

    #[tokio::test]
    async fn test_reply_apologises_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let weather = client_for(&server);
        assert_eq!(weather.reply_for("1880252").await, WEATHER_ERROR_REPLY);
    }

    #[tokio::test]
    async fn test_reply_apologises_on_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "name": "Jakarta", "weather": [] })),
            )
            .mount(&server)
            .await;

        let weather = client_for(&server);
        assert!(matches!(
            weather.current("1642911").await,
            Err(BotError::MalformedWeather)
        ));
        assert_eq!(weather.reply_for("1642911").await, WEATHER_ERROR_REPLY);
    }

    #[tokio::test]
    async fn test_reply_apologises_when_unreachable() {
        let weather = WeatherClient::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/data/2.5/weather",
            "test-key",
        );
        assert_eq!(weather.reply_for("1733046").await, WEATHER_ERROR_REPLY);
    }

    #[tokio::test]
    async fn test_empty_payload_skips_the_api() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let weather = client_for(&server);
        assert_eq!(weather.reply_for("").await, INVALID_CITY_REPLY);
    }
}
