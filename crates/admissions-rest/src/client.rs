//! PostgREST-style row inserts over HTTPS.

use admissions_core::{RecordStore, Table};
use admissions_core::submit::StoreResult;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Request, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::settings::RestConfig;
use crate::error::{RestError, RestResult};

/// Error body returned by PostgREST on a failed write.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    code: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

/// Record store talking to a PostgREST (Supabase) endpoint.
pub struct RestStore {
    client: Client,
    config: RestConfig,
}

impl RestStore {
    pub fn new(config: RestConfig) -> RestResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(default_headers(&config)?)
            .build()?;
        Ok(Self { client, config })
    }

    /// Build from `admissions.*` / `ADMISSIONS_*` settings.
    pub fn from_env() -> RestResult<Self> {
        Self::new(RestConfig::load()?)
    }

    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    /// The single-row insert request, asking the backend to echo the inserted row.
    pub fn insert_request(&self, table: Table, row: &Value) -> RestResult<Request> {
        let mut builder = self
            .client
            .post(self.config.table_url(table.as_ref()))
            .header("Prefer", "return=representation")
            .json(&[row]);
        if let Some(schema) = &self.config.schema {
            builder = builder.header("Content-Profile", schema.as_str());
        }
        Ok(builder.build()?)
    }

    async fn insert_row(&self, table: Table, row: Value) -> RestResult<Value> {
        let request = self.insert_request(table, &row)?;
        debug!("POST {}", request.url());

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;
        parse_insert_response(status, &body)
    }
}

fn default_headers(config: &RestConfig) -> RestResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    let mut api_key = HeaderValue::from_str(&config.api_key)?;
    api_key.set_sensitive(true);
    headers.insert("apikey", api_key);

    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}

/// Interpret an insert response: the first echoed row, or the backend's rejection.
pub fn parse_insert_response(status: StatusCode, body: &str) -> RestResult<Value> {
    if !status.is_success() {
        return Err(rejection(status, body));
    }

    if body.trim().is_empty() {
        warn!("Insert returned {} with an empty body", status);
        return Ok(Value::Null);
    }

    match serde_json::from_str::<Value>(body)? {
        Value::Array(rows) => match rows.into_iter().next() {
            Some(row) => Ok(row),
            None => {
                warn!("Insert returned {} with no rows", status);
                Ok(Value::Null)
            }
        },
        row => Ok(row),
    }
}

fn rejection(status: StatusCode, body: &str) -> RestError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => {
            let mut message = err.message.unwrap_or_else(|| status.to_string());
            if let Some(details) = err.details {
                message = format!("{} ({})", message, details);
            }
            if let Some(hint) = err.hint {
                message = format!("{}; hint: {}", message, hint);
            }
            RestError::Rejected {
                status: status.as_u16(),
                code: err.code,
                message,
            }
        }
        Err(_) => RestError::Rejected {
            status: status.as_u16(),
            code: None,
            message: if body.trim().is_empty() {
                status.to_string()
            } else {
                body.trim().to_string()
            },
        },
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn insert(&self, table: Table, row: Value) -> StoreResult<Value> {
        Ok(self.insert_row(table, row).await?)
    }
}
