//! quill-core: Core Runtime for Quill
//!
//! Layer2 - workbench feature 구현 레이어
//!
//! # 주요 모듈
//!
//! - `context`: Feature 공유 컨텍스트 (HostApi + ServerApi + 설정)
//! - `lifecycle`: LifecycleController (등록/재초기화 파이프라인)
//! - `features`: command/provider feature 구현
//! - `formatter`: annotation 메타데이터 기반 문서 포매터
//! - `server`: 원격 자동화 서버 HTTP 클라이언트
//!
//! # 사용 예시
//!
//! ```ignore
//! use quill_core::{LifecycleController, ServerClient, WorkbenchContext};
//! use quill_foundation::WorkbenchConfig;
//! use std::sync::Arc;
//!
//! // host는 에디터가 제공하는 HostApi 구현
//! let config = WorkbenchConfig::load()?;
//! let server = Arc::new(ServerClient::new(&config)?);
//! let ctx = WorkbenchContext::new(host, server, config);
//!
//! // 시작 시 1회: entry point 등록 + annotation fetch 시작
//! let controller = LifecycleController::new(ctx);
//! controller.register()?;
//!
//! // 이후 entry point 호출(= reset)이 전체 feature 집합을 재구축
//! ```

// Core modules
pub mod context;
pub mod features;
pub mod formatter;
pub mod lifecycle;
pub mod server;

// Re-exports: Context
pub use context::WorkbenchContext;

// Re-exports: Lifecycle
pub use lifecycle::{LifecycleController, ResetSummary, ENTRY_POINT_COMMAND};

// Re-exports: Features
pub use features::{
    fixed_features,
    ConnectServerCommand,
    DefinitionFeature,
    DocumentSymbolFeature,
    // Providers
    DocumentsTreeFeature,
    GetDocumentationCommand,
    GetTestCaseCommand,
    InvokeAllTestCasesCommand,
    InvokeTestCaseCommand,
    PipelinesTreeFeature,
    RegisterEnvironmentCommand,
    RegisterModelsCommand,
    RegisterPluginsCommand,
    // Commands
    RegisterTestCaseCommand,
    ScriptsTreeFeature,
    UpdateSymbolsCommand,
    FIXED_FEATURE_COUNT,
};

// Re-exports: Formatter
pub use formatter::{Annotation, AnnotationSet, FormatterFactory, FormatterFeature, TestCaseFormatter};

// Re-exports: Server
pub use server::ServerClient;

// Layer1 re-exports
pub use quill_foundation::{Error, Result};

/// Layer2 버전
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
