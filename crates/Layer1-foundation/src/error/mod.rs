//! Error types for Quill
//!
//! 모든 에러를 중앙에서 관리

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Quill 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // Host 관련
    // ========================================================================
    #[error("Host error: {0}")]
    Host(String),

    // ========================================================================
    // Metadata 관련
    // ========================================================================
    #[error("Metadata fetch failed: {0}")]
    MetadataFetch(String),

    // ========================================================================
    // Feature 관련
    // ========================================================================
    #[error("Feature registration failed: {feature} - {message}")]
    FeatureRegistration { feature: String, message: String },

    // ========================================================================
    // 해제 관련
    // ========================================================================
    #[error("Disposal failed: {label} - {message}")]
    Disposal { label: String, message: String },

    // ========================================================================
    // 서버 관련
    // ========================================================================
    #[error("Server error: {0}")]
    Server(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    // ========================================================================
    // 일반
    // ========================================================================
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    // ========================================================================
    // 기타
    // ========================================================================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// 재시도 가능한 에러인지 확인
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Timeout(_) | Error::MetadataFetch(_) | Error::Server(_) | Error::Http(_)
        )
    }

    /// Feature 등록 에러 생성 헬퍼
    pub fn feature_registration(
        feature: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::FeatureRegistration {
            feature: feature.into(),
            message: message.into(),
        }
    }

    /// 해제 에러 생성 헬퍼
    pub fn disposal(label: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Disposal {
            label: label.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// From 구현 (추가 변환)
// ============================================================================

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Internal(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Internal(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(Error::MetadataFetch("connection refused".into()).is_retryable());
        assert!(Error::Timeout("fetch".into()).is_retryable());
        assert!(!Error::Host("duplicate command".into()).is_retryable());
    }

    #[test]
    fn test_helpers() {
        let err = Error::feature_registration("documents-tree", "view id taken");
        assert!(err.to_string().contains("documents-tree"));

        let err = Error::disposal("command:quill.activate", "already released");
        assert!(err.to_string().contains("quill.activate"));
    }
}
