//! Exoplanet Archive TAP client
//!
//! Sends a single synchronous TAP query as a form-encoded POST and returns the
//! CSV body. Failures are reported once; nothing is retried.

use super::query::ArchiveQuery;
use crate::config::ArchiveConfig;
use thiserror::Error;

/// Error type for archive requests
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Transport failure: DNS, connection, TLS, body read
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Archive returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Success status but the service answered with an error document
    #[error("Archive service error: {0}")]
    ServiceError(String),

    /// Success status with no tabular content
    #[error("Archive returned an empty response")]
    EmptyResponse,
}

/// Blocking client for the archive's synchronous TAP endpoint
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    endpoint: String,
    format: String,
    http: reqwest::blocking::Client,
}

impl ArchiveClient {
    /// Create a client for the given endpoint URL, requesting CSV output
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            format: "csv".to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }

    pub fn from_config(config: &ArchiveConfig) -> Self {
        Self {
            format: config.format.clone(),
            ..Self::new(&config.endpoint)
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run `query` and return the response body as text
    pub fn fetch_csv(&self, query: &ArchiveQuery) -> Result<String, ArchiveError> {
        let adql = query.to_adql();
        log::info!("POST {} ({} byte query)", self.endpoint, adql.len());
        log::debug!("Query: {adql}");

        let response = self
            .http
            .post(&self.endpoint)
            .form(&[("query", adql.as_str()), ("format", self.format.as_str())])
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(ArchiveError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        log::info!("Received {} bytes", body.len());
        check_body(body)
    }
}

/// Reject bodies that cannot be a CSV table
fn check_body(body: String) -> Result<String, ArchiveError> {
    let trimmed = body.trim_start();
    if trimmed.is_empty() {
        return Err(ArchiveError::EmptyResponse);
    }
    // TAP reports ADQL errors as a VOTable even with a 200 status
    if trimmed.starts_with('<') {
        return Err(ArchiveError::ServiceError(trimmed.trim_end().to_string()));
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_body_accepts_csv() {
        let body = "pl_name,hostname\nKepler-10 b,Kepler-10\n".to_string();
        assert_eq!(check_body(body.clone()).unwrap(), body);
    }

    #[test]
    fn test_check_body_rejects_empty() {
        assert!(matches!(
            check_body("  \n".to_string()),
            Err(ArchiveError::EmptyResponse)
        ));
    }

    #[test]
    fn test_check_body_rejects_votable_error() {
        let body = r#"<?xml version="1.0"?><VOTABLE><INFO name="QUERY_STATUS" value="ERROR"/></VOTABLE>"#;
        match check_body(body.to_string()) {
            Err(ArchiveError::ServiceError(msg)) => assert!(msg.contains("QUERY_STATUS")),
            other => panic!("Expected ServiceError, got {other:?}"),
        }
    }

    #[test]
    fn test_client_from_config() {
        let config = ArchiveConfig {
            endpoint: "http://localhost:9/TAP/sync".to_string(),
            ..ArchiveConfig::default()
        };
        let client = ArchiveClient::from_config(&config);
        assert_eq!(client.endpoint(), "http://localhost:9/TAP/sync");
    }
}
