//! Core Traits - 핵심 인터페이스 정의
//!
//! Layer2 이상에서 구현하는 핵심 trait들을 정의합니다.
//! Host 등록 API, Feature 계약, 원격 서버 경계를 포함합니다.
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Host (에디터)                                           │
//! │  └── HostApi 구현 (command/provider 등록, 해제 토큰 발급) │
//! ├─────────────────────────────────────────────────────────┤
//! │  Layer2-core                                            │
//! │  ├── Feature 구현 (command, tree, symbol, formatter)    │
//! │  ├── ServerApi 구현 (HTTP 전송)                          │
//! │  └── LifecycleController (등록/재초기화 파이프라인)       │
//! ├─────────────────────────────────────────────────────────┤
//! │  Layer1-Foundation (이 레이어)                           │
//! │  ├── Trait 정의 (Feature, HostApi, ServerApi, Provider) │
//! │  └── 값 타입 (DisposableHandle, RegistrationLedger)     │
//! └─────────────────────────────────────────────────────────┘
//! ```

use crate::core::types::{
    DisposableHandle, DocumentSymbol, Location, Position, ResourceKind, TextDocument, TextEdit,
    TreeItem,
};
use crate::Result;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::sync::Arc;

// ============================================================================
// Command Handler
// ============================================================================

/// Command 핸들러 타입
///
/// Host가 command 호출 시 실행합니다. 핸들러 내부의 네트워크 I/O는
/// 핸들러 자신의 비동기 블록 안에서 처리됩니다.
pub type CommandHandler = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

// ============================================================================
// Provider Traits - Host가 콜백하는 제공자 인터페이스
// ============================================================================

/// 탐색기 트리 데이터 제공자
pub trait TreeDataProvider: Send + Sync {
    /// 하위 항목 조회 (None이면 루트)
    fn get_children(&self, parent: Option<&TreeItem>) -> Vec<TreeItem>;
}

/// 문서 심볼 제공자
pub trait DocumentSymbolProvider: Send + Sync {
    /// 문서 내 심볼 목록 반환
    fn provide_document_symbols(&self, document: &TextDocument) -> Vec<DocumentSymbol>;
}

/// 정의 제공자
pub trait DefinitionProvider: Send + Sync {
    /// 주어진 위치의 심볼 정의 위치 반환
    fn provide_definition(&self, document: &TextDocument, position: Position)
        -> Option<Location>;
}

/// 문서 포매팅 제공자
pub trait DocumentFormattingProvider: Send + Sync {
    /// 문서 전체에 대한 포매팅 편집 목록 반환
    fn provide_formatting_edits(&self, document: &TextDocument) -> Vec<TextEdit>;
}

// ============================================================================
// HostApi - Host 등록 API
// ============================================================================

/// Host 등록 API
///
/// 임베딩하는 host(에디터)가 구현합니다. 각 등록은 해제 토큰을 반환하며,
/// 토큰의 해제는 LifecycleController가 ledger를 통해 관리합니다.
pub trait HostApi: Send + Sync {
    /// command 등록
    fn register_command(&self, id: &str, handler: CommandHandler) -> Result<DisposableHandle>;

    /// 탐색기 트리 제공자 등록
    fn register_tree_provider(
        &self,
        view_id: &str,
        provider: Arc<dyn TreeDataProvider>,
    ) -> Result<DisposableHandle>;

    /// 문서 심볼 제공자 등록
    fn register_document_symbol_provider(
        &self,
        language_id: &str,
        provider: Arc<dyn DocumentSymbolProvider>,
    ) -> Result<DisposableHandle>;

    /// 정의 제공자 등록
    fn register_definition_provider(
        &self,
        language_id: &str,
        provider: Arc<dyn DefinitionProvider>,
    ) -> Result<DisposableHandle>;

    /// 문서 포매팅 제공자 등록
    fn register_formatting_provider(
        &self,
        language_id: &str,
        provider: Arc<dyn DocumentFormattingProvider>,
    ) -> Result<DisposableHandle>;

    /// 현재 활성 문서 스냅샷
    fn active_document(&self) -> Option<TextDocument>;

    /// 사용자 입력 요청 (입력 취소 시 None)
    fn request_input(&self, prompt: &str) -> Option<String>;
}

// ============================================================================
// Feature - 등록 가능한 기능 단위
// ============================================================================

/// Feature 인터페이스
///
/// Workbench가 관리하는 모든 command/provider가 구현합니다.
/// reset마다 새로 생성되며 reset 사이에 상태를 유지하지 않습니다.
pub trait Feature: Send + Sync {
    /// feature 이름 (보고용 식별자)
    fn name(&self) -> &str;

    /// Host 등록을 수행하고 생성된 해제 토큰을 반환
    ///
    /// host 등록에 필요한 I/O 외에는 블로킹하지 않아야 합니다.
    /// ledger 반영과 중복 등록 회피는 호출자(LifecycleController)의 몫입니다.
    fn register(&self) -> Result<Vec<DisposableHandle>>;
}

// ============================================================================
// ServerApi - 원격 자동화 서버 경계
// ============================================================================

/// 원격 자동화 서버 API
///
/// 전송 구현은 Layer2에서 제공합니다. 이 core는 호출 경계만 알고,
/// 서버 쪽 동작의 세부는 다루지 않습니다.
#[async_trait]
pub trait ServerApi: Send + Sync {
    /// annotation 메타데이터 payload 조회 (직렬화된 원본)
    async fn fetch_annotations(&self) -> Result<String>;

    /// 서버 연결 확인
    async fn connect(&self) -> Result<()>;

    /// 테스트 케이스 소스 실행
    async fn invoke(&self, source: &str) -> Result<String>;

    /// 등록된 전체 테스트 실행
    async fn invoke_all(&self) -> Result<String>;

    /// 리소스 등록
    async fn register_resource(&self, kind: ResourceKind, body: &str) -> Result<()>;

    /// 리소스 조회
    async fn get_resource(&self, kind: ResourceKind, key: &str) -> Result<String>;

    /// 서버 심볼 목록 동기화
    async fn sync_symbols(&self) -> Result<Vec<String>>;
}
