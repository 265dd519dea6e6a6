use super::config::Config;
use super::error::{NotionError, Result};
use super::models::ApiErrorBody;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

pub struct NotionClient {
    client: Client,
    api_url: String,
    token: String,
    notion_version: String,
}

impl NotionClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("notion-inspect/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            token: config.token.clone(),
            notion_version: config.notion_version.clone(),
        })
    }

    /// Retrieve a database object. Sends exactly one request.
    pub async fn retrieve_database(&self, database_id: &str) -> Result<Value> {
        let url = format!("{}/v1/databases/{}", self.api_url, database_id);

        debug!("Retrieving database from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Notion-Version", &self.notion_version)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let database = response.json::<Value>().await?;
            debug!("Database {} retrieved ({})", database_id, status);
            return Ok(database);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let err = api_error(status, &body);
        warn!("Notion rejected request for database {}: {}", database_id, err);
        Err(err)
    }
}

fn api_error(status: StatusCode, body: &str) -> NotionError {
    match ApiErrorBody::parse(body) {
        Some(envelope) => NotionError::Api {
            status: envelope.status_or(status),
            code: envelope.code,
            message: envelope.message,
        },
        None => NotionError::Api {
            status,
            code: "unknown".to_string(),
            message: body.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notion::config::{DATABASE_ID_ENV, TOKEN_ENV};
    use serde_json::json;

    fn config_for(server: &mockito::ServerGuard) -> Config {
        Config::from_lookup(|key| match key {
            TOKEN_ENV => Some("secret_test_token".to_string()),
            DATABASE_ID_ENV => Some("db123".to_string()),
            _ => None,
        })
        .unwrap()
        .with_api_url(server.url())
    }

    #[tokio::test]
    async fn sends_bearer_token_and_version_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/databases/db123")
            .match_header("authorization", "Bearer secret_test_token")
            .match_header("notion-version", "2022-06-28")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"object":"database","id":"db123"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = NotionClient::new(&config_for(&server)).unwrap();
        let database = client.retrieve_database("db123").await.unwrap();

        assert_eq!(database, json!({ "object": "database", "id": "db123" }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn custom_notion_version_is_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/databases/db123")
            .match_header("notion-version", "2025-09-03")
            .with_status(200)
            .with_body("{}")
            .expect(1)
            .create_async()
            .await;

        let config = config_for(&server).with_notion_version("2025-09-03");
        let client = NotionClient::new(&config).unwrap();
        client.retrieve_database("db123").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_envelope_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/databases/missing")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"object":"error","status":404,"code":"object_not_found","message":"Could not find database with ID: missing."}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let client = NotionClient::new(&config_for(&server)).unwrap();
        let err = client.retrieve_database("missing").await.unwrap_err();

        match &err {
            NotionError::Api { status, code, message } => {
                assert_eq!(*status, StatusCode::NOT_FOUND);
                assert_eq!(code, "object_not_found");
                assert!(message.contains("Could not find database"));
            }
            other => panic!("expected API error, got {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_json_error_body_is_kept_verbatim() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/databases/db123")
            .with_status(502)
            .with_body("Bad Gateway")
            .expect(1)
            .create_async()
            .await;

        let client = NotionClient::new(&config_for(&server)).unwrap();
        let err = client.retrieve_database("db123").await.unwrap_err();

        match err {
            NotionError::Api { status, code, message } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(code, "unknown");
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("expected API error, got {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_errors_are_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/databases/db123")
            .with_status(503)
            .with_body(r#"{"object":"error","status":503,"code":"service_unavailable","message":"Notion is unavailable."}"#)
            .expect(1)
            .create_async()
            .await;

        let client = NotionClient::new(&config_for(&server)).unwrap();
        assert!(client.retrieve_database("db123").await.is_err());

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unreachable_server_is_a_request_error() {
        let config = Config::from_lookup(|key| match key {
            TOKEN_ENV => Some("secret_test_token".to_string()),
            DATABASE_ID_ENV => Some("db123".to_string()),
            _ => None,
        })
        .unwrap()
        .with_api_url("http://127.0.0.1:1");

        let client = NotionClient::new(&config).unwrap();
        let err = client.retrieve_database("db123").await.unwrap_err();
        assert!(matches!(err, NotionError::Request(_)));
    }
}
