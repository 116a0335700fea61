//! Log ingestion and search endpoints.

use super::{push_num, push_str, successful};
use crate::client::Bucket;
use crate::error::{ZeusError, ZeusResult};
use crate::transport::Params;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Deserialize;
use tracing::debug;
use zeus_core::{Log, LogList};

/// Logs API for sending and searching logs.
pub struct LogsApi<'a> {
    bucket: &'a Bucket<'a>,
}

impl<'a> LogsApi<'a> {
    pub(crate) fn new(bucket: &'a Bucket<'a>) -> Self {
        Self { bucket }
    }

    /// Send logs under their log name. Returns how many the service stored.
    pub async fn post(&self, logs: &LogList) -> ZeusResult<u64> {
        if logs.name.is_empty() || logs.is_empty() {
            return Err(ZeusError::InvalidInput("logs is empty".to_string()));
        }
        for log in &logs.logs {
            log.validate()?;
        }

        let params = vec![("logs", serde_json::to_string(logs)?)];
        debug!(log_name = %logs.name, count = logs.logs.len(), "posting logs");

        let response = self
            .bucket
            .request(Method::POST, "logs", &[logs.name.as_str()], &params)
            .await?;
        successful(response, &[200])
    }

    /// Search logs. At most `limit` records come back (10 by default on the
    /// service); page through the rest with `offset`.
    pub async fn get(&self, query: &LogQuery) -> ZeusResult<LogPage> {
        if query.log_name.is_empty() {
            return Err(ZeusError::InvalidInput("log_name is required".to_string()));
        }

        let response = self
            .bucket
            .request(Method::GET, "logs", &[], &query.to_params())
            .await?
            .expect(&[200])?;

        let body: LogsResponse = response.json()?;
        Ok(LogPage {
            total: body.total,
            logs: LogList {
                name: query.log_name.clone(),
                logs: body.result,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
struct LogsResponse {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    result: Vec<Log>,
}

/// One page of log search results.
#[derive(Debug, Clone, PartialEq)]
pub struct LogPage {
    /// Number of matching logs on the service, which may exceed `logs.len()`.
    pub total: u64,
    pub logs: LogList,
}

/// Log search constraints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogQuery {
    pub log_name: String,
    /// Field the pattern is matched against.
    pub attribute_name: Option<String>,
    pub pattern: Option<String>,
    /// Epoch seconds.
    pub from: Option<i64>,
    /// Epoch seconds.
    pub to: Option<i64>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl LogQuery {
    pub fn new(log_name: impl Into<String>) -> Self {
        Self {
            log_name: log_name.into(),
            ..Default::default()
        }
    }

    /// Match `pattern` against the `attribute` field.
    pub fn matching(mut self, attribute: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.attribute_name = Some(attribute.into());
        self.pattern = Some(pattern.into());
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Only logs at or after `from` (epoch seconds).
    pub fn since(mut self, from: i64) -> Self {
        self.from = Some(from);
        self
    }

    /// Only logs at or before `to` (epoch seconds).
    pub fn until(mut self, to: i64) -> Self {
        self.to = Some(to);
        self
    }

    pub fn between(self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.since(from.timestamp()).until(to.timestamp())
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    fn to_params(&self) -> Params {
        let mut params = vec![("log_name", self.log_name.clone())];
        push_str(&mut params, "attribute_name", &self.attribute_name);
        push_str(&mut params, "pattern", &self.pattern);
        push_num(&mut params, "from", self.from.filter(|v| *v > 0));
        push_num(&mut params, "to", self.to.filter(|v| *v > 0));
        push_num(&mut params, "offset", self.offset);
        push_num(&mut params, "limit", self.limit);
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{client, client_without_token, form, BUCKET, TOKEN};
    use chrono::TimeZone;
    use wiremock::matchers::{body_string, header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use zeus_core::LogValue;

    #[test]
    fn test_query_params_skip_unset() {
        let params = LogQuery::new("app").limit(10).offset(0).to_params();
        assert_eq!(
            params,
            vec![("log_name", "app".to_string()), ("limit", "10".to_string())]
        );
    }

    #[test]
    fn test_query_between() {
        let from = Utc.timestamp_opt(1_430_000_000, 0).unwrap();
        let to = Utc.timestamp_opt(1_430_000_010, 0).unwrap();
        let query = LogQuery::new("app").between(from, to);

        assert_eq!(query.from, Some(1_430_000_000));
        assert_eq!(query.to, Some(1_430_000_010));
    }

    #[tokio::test]
    async fn test_post_logs() {
        let server = MockServer::start().await;
        let logs = LogList::new("syslog").with_log(
            Log::new()
                .with("timestamp", 1430355869_i64)
                .with("message", "Message from Rust"),
        );
        let encoded = serde_json::to_string(&logs).unwrap();

        Mock::given(method("POST"))
            .and(path(format!("/logs/{}/syslog/", TOKEN)))
            .and(header("Authorization", format!("Bearer {}", TOKEN).as_str()))
            .and(header("Bucket-Name", BUCKET))
            .and(body_string(form(&[("logs", encoded.as_str())])))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"successful": 1}"#))
            .mount(&server)
            .await;

        let client = client(&server);
        let stored = client.bucket(BUCKET).logs().post(&logs).await.unwrap();
        assert_eq!(stored, 1);
    }

    #[tokio::test]
    async fn test_post_logs_preconditions() {
        let server = MockServer::start().await;
        let client = client(&server);
        let bucket = client.bucket(BUCKET);

        let result = bucket.logs().post(&LogList::default()).await;
        assert!(matches!(result, Err(ZeusError::InvalidInput(_))));

        let bad = LogList::new("x").with_log(Log::new().with("v", f64::NAN));
        let result = bucket.logs().post(&bad).await;
        assert!(matches!(result, Err(ZeusError::InvalidLog(_))));

        let no_token = client_without_token(&server);
        let logs = LogList::new("x").with_log(Log::new().with("v", 1));
        let result = no_token.bucket(BUCKET).logs().post(&logs).await;
        assert!(matches!(result, Err(ZeusError::MissingToken)));
    }

    #[tokio::test]
    async fn test_post_logs_error_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("/logs/{}/app/", TOKEN)))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_string(r#"{"successful": 0, "failed": 1, "error": "invalid log"}"#),
            )
            .mount(&server)
            .await;

        let client = client(&server);
        let logs = LogList::new("app").with_log(Log::new().with("a", "b"));
        match client.bucket(BUCKET).logs().post(&logs).await {
            Err(ZeusError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "invalid log");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_logs() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/logs/{}/", TOKEN)))
            .and(query_param("log_name", "app"))
            .and(query_param("attribute_name", "message"))
            .and(query_param("pattern", "needle"))
            .and(query_param("from", "1430355869"))
            .and(query_param("to", "1430355879"))
            .and(query_param("limit", "10"))
            .and(query_param_is_missing("offset"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"total": 3, "result": [{"timestamp": 1430355870, "message": "needle"}]}"#,
            ))
            .mount(&server)
            .await;

        let client = client(&server);
        let query = LogQuery::new("app")
            .matching("message", "needle")
            .since(1430355869)
            .until(1430355879)
            .limit(10);

        let page = client.bucket(BUCKET).logs().get(&query).await.unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.logs.name, "app");
        assert_eq!(page.logs.logs.len(), 1);
        assert_eq!(
            page.logs.logs[0].get("message"),
            Some(&LogValue::Text("needle".to_string()))
        );
    }

    #[tokio::test]
    async fn test_get_logs_requires_name() {
        let server = MockServer::start().await;
        let client = client(&server);

        let result = client.bucket(BUCKET).logs().get(&LogQuery::default()).await;
        assert!(matches!(result, Err(ZeusError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_get_logs_bad_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/logs/{}/", TOKEN)))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let client = client(&server);
        let result = client
            .bucket(BUCKET)
            .logs()
            .get(&LogQuery::new("app"))
            .await;
        assert_eq!(result.unwrap_err().status(), Some(400));
    }
}
