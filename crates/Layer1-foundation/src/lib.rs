//! # quill-foundation
//!
//! Foundation layer for Quill:
//! - Core: 핵심 계약 정의 (Feature, HostApi, ServerApi, DisposableHandle)
//! - Config: 워크벤치 설정 (WorkbenchConfig)
//! - Event: 라이프사이클 이벤트 버스
//! - Storage: JSON 설정 저장소
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Host (에디터)                                           │
//! │  └── HostApi 구현                                        │
//! │                     │                                   │
//! │                     ▼                                   │
//! │  LifecycleController (Layer2)                           │
//! │  ├── RegistrationLedger (index 0 = entry point)         │
//! │  └── Feature 고정 순서 등록 / reset 시 전체 해제          │
//! │                     │                                   │
//! │                     ▼                                   │
//! │  ServerApi (원격 자동화 서버)                            │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod event;
pub mod storage;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Core (핵심 Trait 및 타입)
// ============================================================================
pub use self::core::{
    // Traits - Host 경계 (traits.rs)
    CommandHandler,
    DefinitionProvider,
    // Types - 등록 토큰 및 원장 (types.rs)
    DisposableHandle,
    DocumentFormattingProvider,
    DocumentSymbol,
    DocumentSymbolProvider,
    // Traits - Feature 계약 (traits.rs)
    Feature,
    HostApi,
    // Types - 문서 타입 (types.rs)
    Location,
    Position,
    Range,
    RegistrationLedger,
    ResourceKind,
    // Traits - 서버 경계 (traits.rs)
    ServerApi,
    SymbolKind,
    TextDocument,
    TextEdit,
    TreeDataProvider,
    TreeItem,
};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{
    ViewsConfig, WorkbenchConfig, DEFAULT_LANGUAGE_ID, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS,
    QUILL_CONFIG_FILE,
};

// ============================================================================
// Event (이벤트 시스템)
// ============================================================================
pub use event::{EventBus, LifecycleEvent};

// ============================================================================
// Storage (저장소)
// ============================================================================
pub use storage::JsonStore;
