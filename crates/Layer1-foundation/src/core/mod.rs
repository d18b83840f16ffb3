//! Core - 핵심 계약 정의
//!
//! Workbench 전체가 공유하는 trait과 값 타입.

pub mod traits;
pub mod types;

pub use traits::{
    CommandHandler, DefinitionProvider, DocumentFormattingProvider, DocumentSymbolProvider,
    Feature, HostApi, ServerApi, TreeDataProvider,
};
pub use types::{
    DisposableHandle, DocumentSymbol, Location, Position, Range, RegistrationLedger, ResourceKind,
    SymbolKind, TextDocument, TextEdit, TreeItem,
};
