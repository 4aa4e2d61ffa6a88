//! Error types for the API layer.

use std::fmt;

use thiserror::Error;

/// The four request shapes the client issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Fetch,
    Create,
    Replace,
    Remove,
}

impl Operation {
    pub fn method(&self) -> &'static str {
        match self {
            Self::Fetch => "GET",
            Self::Create => "POST",
            Self::Replace => "PUT",
            Self::Remove => "DELETE",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::Fetch => "Erro ao carregar dados",
            Self::Create => "Erro ao salvar dados",
            Self::Replace => "Erro ao atualizar dados",
            Self::Remove => "Erro ao deletar dados",
        };
        f.write_str(message)
    }
}

/// Failure of a single backend call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The backend answered with a non-success HTTP status.
    #[error("{op} (HTTP {status})")]
    Status {
        op: Operation,
        status: u16,
        /// `error` field of the response body, when it had one.
        message: Option<String>,
    },
    /// No response: connection refused, DNS, CORS, aborted request.
    #[error("{op}: {reason}")]
    Network { op: Operation, reason: String },
    /// The response body was not the JSON we expected.
    #[error("{op}: resposta inválida ({reason})")]
    Decode { op: Operation, reason: String },
    #[error("Falha ao iniciar o cliente HTTP: {0}")]
    Setup(String),
}

impl ApiError {
    /// Message the backend put in the error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// True when the backend could not be reached at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Setup(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure to build an [`crate::ApiConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[cfg(not(target_arch = "wasm32"))]
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("invalid base url `{0}`: expected http(s)://… or an absolute path")]
    InvalidBaseUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_names_the_operation() {
        let err = ApiError::Status {
            op: Operation::Fetch,
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "Erro ao carregar dados (HTTP 500)");
        assert!(!err.is_connectivity());
    }

    #[test]
    fn test_server_message_only_from_status() {
        let err = ApiError::Status {
            op: Operation::Create,
            status: 400,
            message: Some("NOT NULL constraint failed".into()),
        };
        assert_eq!(err.server_message(), Some("NOT NULL constraint failed"));

        let err = ApiError::Network {
            op: Operation::Remove,
            reason: "connection refused".into(),
        };
        assert_eq!(err.server_message(), None);
        assert!(err.is_connectivity());
        assert_eq!(err.to_string(), "Erro ao deletar dados: connection refused");
    }
}
