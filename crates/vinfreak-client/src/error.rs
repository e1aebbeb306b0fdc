use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("GET {url} {status}")]
    Status { status: u16, url: String },

    #[error("not found: {url}")]
    NotFound { url: String },

    #[error("JSON parse error for {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl ClientError {
    /// HTTP status carried by the error, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::NotFound { .. } => Some(404),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::Timeout { .. }
            | ClientError::Parse { .. }
            | ClientError::InvalidBaseUrl { .. } => None,
        }
    }

    /// Returns `true` for failures of the request itself rather than its body:
    /// non-2xx statuses, timeouts and network errors.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Status { .. }
                | ClientError::NotFound { .. }
                | ClientError::Timeout { .. }
                | ClientError::Http(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_names_status() {
        let err = ClientError::Status {
            status: 500,
            url: "http://localhost/cars?page=1&page_size=24".to_string(),
        };
        assert_eq!(err.status(), Some(500));
        assert!(err.is_transport());
        assert!(err.to_string().contains("500"), "got: {err}");
    }

    #[test]
    fn timeout_is_transport_without_status() {
        let err = ClientError::Timeout {
            url: "http://localhost/cars".to_string(),
        };
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn parse_error_is_not_transport() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = ClientError::Parse {
            context: "GET /cars".to_string(),
            source,
        };
        assert!(!err.is_transport());
        assert_eq!(err.status(), None);
    }
}
