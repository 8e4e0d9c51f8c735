use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// 單一驗證請求的錯誤，只終止該請求
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VerificationError {
    #[error("{0}")]
    BadRequest(String),

    #[error("no verifier registered for domain '{0}'")]
    UnsupportedDomain(String),

    #[error("method {method} not allowed for domain '{domain}' (allowed: {allowed})")]
    MethodNotAllowed {
        domain: String,
        method: String,
        allowed: Method,
    },

    #[error("verifier failure: {0}")]
    VerifierFailure(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    UnsupportedDomain,
    MethodNotAllowed,
    VerifierFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::UnsupportedDomain => "unsupported_domain",
            ErrorKind::MethodNotAllowed => "method_not_allowed",
            ErrorKind::VerifierFailure => "verifier_failure",
        }
    }
}

impl VerificationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VerificationError::BadRequest(_) => ErrorKind::BadRequest,
            VerificationError::UnsupportedDomain(_) => ErrorKind::UnsupportedDomain,
            VerificationError::MethodNotAllowed { .. } => ErrorKind::MethodNotAllowed,
            VerificationError::VerifierFailure(_) => ErrorKind::VerifierFailure,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::UnsupportedDomain => StatusCode::NOT_FOUND,
            ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorKind::VerifierFailure => StatusCode::BAD_GATEWAY,
        }
    }

    /// 回傳給呼叫端的訊息；上游細節只寫入日誌
    pub fn public_message(&self) -> String {
        match self {
            VerificationError::VerifierFailure(_) => "upstream verification failed".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for VerificationError {
    fn into_response(self) -> Response {
        if let VerificationError::VerifierFailure(detail) = &self {
            tracing::error!("Verifier failure: {}", detail);
        }

        let status = self.status();
        let body = Json(serde_json::json!({
            "error": self.kind().as_str(),
            "message": self.public_message(),
        }));

        // 405 必須附上 Allow
        if let VerificationError::MethodNotAllowed { allowed, .. } = &self {
            return (status, [(header::ALLOW, allowed.to_string())], body).into_response();
        }

        (status, body).into_response()
    }
}

/// 行程層級錯誤：設定、啟動、綁定
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Server error: {0}")]
    ServerError(String),
}

impl OracleError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            OracleError::IoError(e) => format!("Could not read a required file: {}", e),
            OracleError::TomlError(_) => {
                "The configuration file is not valid TOML".to_string()
            }
            OracleError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            OracleError::ServerError(msg) => format!("The oracle node failed: {}", msg),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OracleError>;
