//! Garmin Connect HTTP client
//!
//! Session handling mirrors the web client: an SSO sign-in yields a service
//! ticket, the ticket exchange sets session cookies in the client's cookie
//! jar, and every later API call goes through the Connect `modern/proxy`
//! gateway with those cookies attached.

use super::auth::{extract_csrf_token, extract_ticket, signin_params};
use crate::adapters::provider::FitnessProvider;
use crate::config::{GarminConfig, SecretString};
use crate::domain::{
    BackfillError, GarminError, RawActivity, RawDailySteps, RawSleepSession, Result,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, ClientBuilder, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko)";

/// Buffer around the sleep window that Garmin folds into the nightly summary
const NON_SLEEP_BUFFER_MINUTES: u32 = 60;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SocialProfile {
    display_name: Option<String>,
}

/// Garmin Connect client
///
/// # Example
///
/// ```no_run
/// use garmin_backfill::adapters::garmin::GarminClient;
/// use garmin_backfill::adapters::provider::FitnessProvider;
/// use garmin_backfill::config::{secret_string, GarminConfig};
///
/// # async fn example() -> garmin_backfill::domain::Result<()> {
/// let mut client = GarminClient::new(
///     &GarminConfig::default(),
///     "runner@example.com".to_string(),
///     secret_string("hunter2".to_string()),
/// )?;
/// client.login().await?;
/// let latest = client.fetch_activities(0, 10).await?;
/// # Ok(())
/// # }
/// ```
pub struct GarminClient {
    client: Client,
    sso_base: Url,
    connect_base: Url,
    email: String,
    password: SecretString,
    display_name: Option<String>,
}

fn parse_base(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized)
        .map_err(|e| BackfillError::Configuration(format!("Invalid Garmin URL '{raw}': {e}")))
}

fn connection_error(e: reqwest::Error) -> BackfillError {
    GarminError::ConnectionFailed(e.to_string()).into()
}

impl GarminClient {
    /// Builds a client for the configured region
    ///
    /// No request is made until [`FitnessProvider::login`].
    ///
    /// # Errors
    ///
    /// Returns an error if a base URL is invalid or the HTTP client cannot be
    /// built.
    pub fn new(config: &GarminConfig, email: String, password: SecretString) -> Result<Self> {
        let client = ClientBuilder::new()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                BackfillError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            sso_base: parse_base(&config.sso_base_url())?,
            connect_base: parse_base(&config.connect_base_url())?,
            email,
            password,
            display_name: None,
        })
    }

    /// Display name of the signed-in user, known after login
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    fn sso_url(&self, path: &str) -> Result<Url> {
        self.sso_base
            .join(path)
            .map_err(|e| GarminError::InvalidResponse(format!("Invalid SSO path {path}: {e}")).into())
    }

    fn api_url(&self, path: &str) -> Result<Url> {
        self.connect_base
            .join("modern/proxy/")
            .and_then(|proxy| proxy.join(path))
            .map_err(|e| GarminError::InvalidResponse(format!("Invalid API path {path}: {e}")).into())
    }

    /// Sends a request and maps non-success statuses
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(connection_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message: String = body.chars().take(200).collect();
        let err = match status {
            StatusCode::TOO_MANY_REQUESTS => GarminError::RateLimited(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                GarminError::AuthenticationFailed(format!("{status}: {message}"))
            }
            _ => GarminError::RequestFailed {
                status: status.as_u16(),
                message,
            },
        };
        Err(err.into())
    }

    /// GETs a proxied API path and decodes the body
    ///
    /// An empty body decodes to `T::default()`.
    async fn get_api<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        if self.display_name.is_none() {
            return Err(GarminError::NotAuthenticated.into());
        }

        let url = self.api_url(path)?;
        tracing::debug!(url = %url, "Garmin API request");

        let response = self
            .send(self.client.get(url).query(query).header("NK", "NT"))
            .await?;
        let body = response.text().await.map_err(connection_error)?;
        if body.trim().is_empty() {
            return Ok(T::default());
        }

        serde_json::from_str(&body).map_err(|e| {
            GarminError::InvalidResponse(format!("Failed to decode {path}: {e}")).into()
        })
    }

    async fn fetch_csrf_token(&self, params: &[(&str, String)]) -> Result<String> {
        let url = self.sso_url("sso/signin")?;
        let html = self
            .send(self.client.get(url).query(params))
            .await?
            .text()
            .await
            .map_err(connection_error)?;
        extract_csrf_token(&html)
    }

    async fn submit_credentials(&self, params: &[(&str, String)], csrf: &str) -> Result<String> {
        let url = self.sso_url("sso/signin")?;
        let form = [
            ("username", self.email.as_str()),
            ("password", self.password.expose_secret().as_str()),
            ("embed", "true"),
            ("_csrf", csrf),
        ];
        let html = self
            .send(
                self.client
                    .post(url)
                    .query(params)
                    .header("Referer", self.sso_base.as_str())
                    .form(&form),
            )
            .await?
            .text()
            .await
            .map_err(connection_error)?;
        extract_ticket(&html)
    }

    async fn exchange_ticket(&self, ticket: &str) -> Result<()> {
        let url = self
            .connect_base
            .join("modern/")
            .map_err(|e| GarminError::InvalidResponse(e.to_string()))?;
        self.send(self.client.get(url).query(&[("ticket", ticket)]))
            .await?;
        Ok(())
    }

    async fn fetch_display_name(&self) -> Result<String> {
        let url = self.api_url("userprofile-service/socialProfile")?;
        let profile: SocialProfile = self
            .send(self.client.get(url).header("NK", "NT"))
            .await?
            .json()
            .await
            .map_err(|e| GarminError::InvalidResponse(format!("socialProfile: {e}")))?;

        profile
            .display_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                GarminError::InvalidResponse("socialProfile has no displayName".to_string()).into()
            })
    }
}

#[async_trait]
impl FitnessProvider for GarminClient {
    async fn login(&mut self) -> Result<()> {
        let params = signin_params(self.sso_base.as_str(), self.connect_base.as_str());

        tracing::info!(sso = %self.sso_base, "Signing in to Garmin Connect");
        let csrf = self.fetch_csrf_token(&params).await?;
        let ticket = self.submit_credentials(&params, &csrf).await?;
        self.exchange_ticket(&ticket).await?;

        let display_name = self.fetch_display_name().await?;
        tracing::info!(display_name = %display_name, "Signed in to Garmin Connect");
        self.display_name = Some(display_name);
        Ok(())
    }

    async fn fetch_activities(&self, start: usize, limit: usize) -> Result<Vec<RawActivity>> {
        self.get_api(
            "activitylist-service/activities/search/activities",
            &[("start", start.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    async fn fetch_daily_steps(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawDailySteps>> {
        let path = format!("usersummary-service/stats/steps/daily/{start}/{end}");
        self.get_api(&path, &[]).await
    }

    async fn fetch_sleep(&self, date: NaiveDate) -> Result<RawSleepSession> {
        let display_name = self
            .display_name
            .as_deref()
            .ok_or(GarminError::NotAuthenticated)?;
        let path = format!("wellness-service/wellness/dailySleepData/{display_name}");
        self.get_api(
            &path,
            &[
                ("date", date.to_string()),
                (
                    "nonSleepBufferMinutes",
                    NON_SLEEP_BUFFER_MINUTES.to_string(),
                ),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use mockito::{Matcher, Server, ServerGuard};

    fn config_for(server: &ServerGuard) -> GarminConfig {
        GarminConfig {
            sso_base_url: Some(server.url()),
            connect_base_url: Some(server.url()),
            timeout_seconds: 5,
            ..Default::default()
        }
    }

    fn client_for(server: &ServerGuard) -> GarminClient {
        GarminClient::new(
            &config_for(server),
            "runner@example.com".to_string(),
            secret_string("hunter2".to_string()),
        )
        .unwrap()
    }

    async fn mock_login(server: &mut ServerGuard) -> Vec<mockito::Mock> {
        vec![
            server
                .mock("GET", "/sso/signin")
                .match_query(Matcher::Any)
                .with_body(r#"<input type="hidden" name="_csrf" value="csrf-77" />"#)
                .create_async()
                .await,
            server
                .mock("POST", "/sso/signin")
                .match_query(Matcher::Any)
                .match_body(Matcher::AllOf(vec![
                    Matcher::UrlEncoded("username".into(), "runner@example.com".into()),
                    Matcher::UrlEncoded("password".into(), "hunter2".into()),
                    Matcher::UrlEncoded("_csrf".into(), "csrf-77".into()),
                ]))
                .with_body(
                    r#"<title>Success</title><script>var u = "embed?ticket=ST-1-xyz-cas";</script>"#,
                )
                .create_async()
                .await,
            server
                .mock("GET", "/modern/")
                .match_query(Matcher::UrlEncoded("ticket".into(), "ST-1-xyz-cas".into()))
                .with_header("set-cookie", "SESSIONID=abc; Path=/")
                .with_body("<html></html>")
                .create_async()
                .await,
            server
                .mock("GET", "/modern/proxy/userprofile-service/socialProfile")
                .match_header("NK", "NT")
                .with_header("content-type", "application/json")
                .with_body(r#"{"displayName":"runner42","fullName":"Runner"}"#)
                .create_async()
                .await,
        ]
    }

    #[tokio::test]
    async fn test_login_flow_sets_display_name() {
        let mut server = Server::new_async().await;
        let mocks = mock_login(&mut server).await;

        let mut client = client_for(&server);
        client.login().await.unwrap();

        assert_eq!(client.display_name(), Some("runner42"));
        for mock in mocks {
            mock.assert_async().await;
        }
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/sso/signin")
            .match_query(Matcher::Any)
            .with_body(r#"<input type="hidden" name="_csrf" value="csrf-77" />"#)
            .create_async()
            .await;
        let _m = server
            .mock("POST", "/sso/signin")
            .match_query(Matcher::Any)
            .with_body("<title>GARMIN Authentication Application</title>")
            .create_async()
            .await;

        let mut client = client_for(&server);
        let err = client.login().await.unwrap_err();
        assert!(matches!(
            err,
            BackfillError::Garmin(GarminError::AuthenticationFailed(_))
        ));
        assert!(client.display_name().is_none());
    }

    #[tokio::test]
    async fn test_fetch_before_login_is_rejected() {
        let server = Server::new_async().await;
        let client = client_for(&server);

        let err = client.fetch_activities(0, 10).await.unwrap_err();
        assert!(matches!(
            err,
            BackfillError::Garmin(GarminError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_fetch_activities_sends_offset_and_limit() {
        let mut server = Server::new_async().await;
        let _login = mock_login(&mut server).await;
        let page = server
            .mock(
                "GET",
                "/modern/proxy/activitylist-service/activities/search/activities",
            )
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("start".into(), "100".into()),
                Matcher::UrlEncoded("limit".into(), "50".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"activityName":"Morning Run","startTimeGMT":"2024-05-01 06:00:00",
                     "activityType":{"typeKey":"running"},"distance":5000.0,
                     "calories":null,"pr":true}]"#,
            )
            .create_async()
            .await;

        let mut client = client_for(&server);
        client.login().await.unwrap();
        let activities = client.fetch_activities(100, 50).await.unwrap();

        page.assert_async().await;
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].name(), "Morning Run");
        assert_eq!(activities[0].calories, 0.0);
        assert!(activities[0].pr);
    }

    #[tokio::test]
    async fn test_fetch_daily_steps_uses_date_path() {
        let mut server = Server::new_async().await;
        let _login = mock_login(&mut server).await;
        let _m = server
            .mock(
                "GET",
                "/modern/proxy/usersummary-service/stats/steps/daily/2024-05-02/2024-05-02",
            )
            .with_body(
                r#"[{"calendarDate":"2024-05-02","totalSteps":11234,"stepGoal":8000,"totalDistance":8765}]"#,
            )
            .create_async()
            .await;

        let mut client = client_for(&server);
        client.login().await.unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let steps = client.fetch_daily_steps(day, day).await.unwrap();

        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].total_steps, Some(11_234));
    }

    #[tokio::test]
    async fn test_fetch_sleep_uses_display_name() {
        let mut server = Server::new_async().await;
        let _login = mock_login(&mut server).await;
        let sleep = server
            .mock(
                "GET",
                "/modern/proxy/wellness-service/wellness/dailySleepData/runner42",
            )
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("date".into(), "2024-05-03".into()),
                Matcher::UrlEncoded("nonSleepBufferMinutes".into(), "60".into()),
            ]))
            .with_body(
                r#"{"dailySleepDTO":{"calendarDate":"2024-05-03","sleepTimeSeconds":27000},
                    "restingHeartRate":48}"#,
            )
            .create_async()
            .await;

        let mut client = client_for(&server);
        client.login().await.unwrap();
        let night = client
            .fetch_sleep(NaiveDate::from_ymd_opt(2024, 5, 3).unwrap())
            .await
            .unwrap();

        sleep.assert_async().await;
        assert_eq!(night.daily_sleep.sleep_time_seconds, 27_000.0);
        assert_eq!(night.resting_heart_rate, 48);
    }

    #[tokio::test]
    async fn test_rate_limit_is_mapped() {
        let mut server = Server::new_async().await;
        let _login = mock_login(&mut server).await;
        let _m = server
            .mock(
                "GET",
                "/modern/proxy/activitylist-service/activities/search/activities",
            )
            .match_query(Matcher::Any)
            .with_status(429)
            .with_body("slow down")
            .create_async()
            .await;

        let mut client = client_for(&server);
        client.login().await.unwrap();
        let err = client.fetch_activities(0, 100).await.unwrap_err();

        assert!(matches!(
            err,
            BackfillError::Garmin(GarminError::RateLimited(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_body_is_empty_page() {
        let mut server = Server::new_async().await;
        let _login = mock_login(&mut server).await;
        let _m = server
            .mock(
                "GET",
                "/modern/proxy/activitylist-service/activities/search/activities",
            )
            .match_query(Matcher::Any)
            .with_status(204)
            .create_async()
            .await;

        let mut client = client_for(&server);
        client.login().await.unwrap();
        assert!(client.fetch_activities(0, 100).await.unwrap().is_empty());
    }
}
