//! REST table backend.
//!
//! Reads `GET {base_url}/rest/v1/{table}?select=*` with the API key sent as
//! both `apikey` header and bearer token.

use std::time::Duration;

use async_trait::async_trait;
use pulse_core::dashboard::{DataStoreError, Department, KpiRow, RowSource};
use tracing::{debug, warn};

use crate::row::decode_rows;

/// Row source backed by hosted REST tables.
#[derive(Debug, Clone)]
pub struct RestRowSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestRowSource {
    /// Creates a source with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// URL of a department's table.
    #[must_use]
    pub fn table_url(&self, department: Department) -> String {
        format!("{}/rest/v1/{}?select=*", self.base_url, department.table())
    }
}

#[async_trait]
impl RowSource for RestRowSource {
    async fn fetch(&self, department: Department) -> Result<Vec<KpiRow>, DataStoreError> {
        let table = department.table();
        let unavailable = |message: String| DataStoreError::Unavailable {
            table: table.to_string(),
            message,
        };

        let resp = self
            .client
            .get(self.table_url(department))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| unavailable(format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            warn!(table, %status, "Row store rejected request");
            return Err(unavailable(format!("{status}: {text}")));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| unavailable(format!("reading body failed: {e}")))?;

        let rows = decode_rows(&bytes, department).map_err(|e| DataStoreError::Decode {
            table: table.to_string(),
            message: e.to_string(),
        })?;

        debug!(table, rows = rows.len(), "Fetched rows");
        Ok(rows)
    }

    fn name(&self) -> &'static str {
        "rest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url() {
        let source = RestRowSource::new(
            "https://rows.example.com/",
            "anon-key",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            source.table_url(Department::Marketing),
            "https://rows.example.com/rest/v1/marketing_dashboard?select=*"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unavailable() {
        let source =
            RestRowSource::new("http://127.0.0.1:9", "anon-key", Duration::from_secs(2)).unwrap();
        let err = source.fetch(Department::Sales).await.unwrap_err();
        assert!(matches!(
            err,
            DataStoreError::Unavailable { ref table, .. } if table == "sales_dashboard"
        ));
    }
}
