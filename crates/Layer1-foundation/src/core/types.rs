//! Core Types - 핵심 값 타입 정의
//!
//! Host 등록 토큰(DisposableHandle)과 등록 원장(RegistrationLedger),
//! 그리고 host와 주고받는 경량 문서 타입을 정의합니다.
//! lsp-types 크레이트 없이 필수 타입만 직접 정의.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// DisposableHandle - 등록 해제 토큰
// ============================================================================

type ReleaseFn = Box<dyn FnOnce() -> Result<()> + Send>;

/// Host 등록 해제 토큰
///
/// `dispose()`가 self를 소비하므로 이중 해제는 타입 수준에서 차단됩니다.
/// 생성은 host 등록 API, 소유는 ledger, 해제는 LifecycleController만 수행합니다.
pub struct DisposableHandle {
    id: Uuid,
    label: String,
    release: Option<ReleaseFn>,
}

impl DisposableHandle {
    /// 해제 콜백과 함께 토큰 생성
    pub fn new(
        label: impl Into<String>,
        release: impl FnOnce() -> Result<()> + Send + 'static,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            release: Some(Box::new(release)),
        }
    }

    /// 해제 동작이 없는 토큰
    pub fn noop(label: impl Into<String>) -> Self {
        Self::new(label, || Ok(()))
    }

    /// 토큰 고유 ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 등록 라벨 (보고용)
    pub fn label(&self) -> &str {
        &self.label
    }

    /// 등록 해제 수행
    pub fn dispose(mut self) -> Result<()> {
        match self.release.take() {
            Some(release) => release(),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for DisposableHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisposableHandle")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish()
    }
}

// ============================================================================
// RegistrationLedger - 등록 원장
// ============================================================================

/// 활성 등록 토큰의 순서 있는 목록 (삽입 순서 = 등록 순서)
///
/// index 0은 entry point 등록 전용이며 reset 중에도 해제되지 않습니다.
/// LifecycleController 외에는 이 타입을 변경하지 않습니다.
#[derive(Debug, Default)]
pub struct RegistrationLedger {
    handles: Vec<DisposableHandle>,
}

impl RegistrationLedger {
    /// 빈 원장 생성
    pub fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    /// entry point 토큰 설치 (index 0, 한 번만)
    pub fn install_entry_point(&mut self, handle: DisposableHandle) -> Result<()> {
        if !self.handles.is_empty() {
            return Err(Error::Host("entry point already installed".to_string()));
        }
        self.handles.push(handle);
        Ok(())
    }

    /// 토큰 추가 (entry point 설치 이후에만 가능)
    pub fn append(&mut self, handle: DisposableHandle) -> Result<()> {
        if self.handles.is_empty() {
            return Err(Error::Host("entry point not installed".to_string()));
        }
        self.handles.push(handle);
        Ok(())
    }

    /// entry point를 제외한 모든 토큰을 해제하고 원장을 길이 1로 절단
    ///
    /// 해제 실패는 수집해서 반환하며, 남은 토큰 해제를 중단하지 않습니다.
    pub fn truncate_to_entry_point(&mut self) -> Vec<Error> {
        let mut failures = Vec::new();
        if self.handles.len() <= 1 {
            return failures;
        }
        for handle in self.handles.drain(1..) {
            let label = handle.label().to_string();
            if let Err(e) = handle.dispose() {
                failures.push(Error::disposal(label, e.to_string()));
            }
        }
        failures
    }

    /// entry point 설치 여부
    pub fn has_entry_point(&self) -> bool {
        !self.handles.is_empty()
    }

    /// 토큰 개수
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// 비어있는지 확인
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// 등록 순서대로 라벨 반환 (검증/디버깅용)
    pub fn labels(&self) -> Vec<&str> {
        self.handles.iter().map(|h| h.label()).collect()
    }

    /// 등록 순서대로 토큰 ID 반환
    pub fn ids(&self) -> Vec<Uuid> {
        self.handles.iter().map(|h| h.id()).collect()
    }
}

// ============================================================================
// 문서 위치 타입
// ============================================================================

/// 텍스트 위치 (0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// 라인 번호 (0부터 시작)
    pub line: u32,

    /// 컬럼 (0부터 시작)
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// 텍스트 범위
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// 단일 위치 범위
    pub fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// 한 라인 내 컬럼 구간
    pub fn span(line: u32, start: u32, end: u32) -> Self {
        Self {
            start: Position::new(line, start),
            end: Position::new(line, end),
        }
    }
}

/// 파일 내 위치
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// 파일 URI (file:///path/to/file)
    pub uri: String,

    /// 범위
    pub range: Range,
}

impl Location {
    pub fn new(uri: impl Into<String>, range: Range) -> Self {
        Self {
            uri: uri.into(),
            range,
        }
    }
}

// ============================================================================
// 문서 심볼
// ============================================================================

/// 심볼 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Namespace,
    Class,
    Method,
    Property,
    Key,
    String,
}

/// 문서 심볼
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSymbol {
    /// 심볼 이름
    pub name: String,

    /// 종류
    pub kind: SymbolKind,

    /// 심볼 전체 범위
    pub range: Range,
}

impl DocumentSymbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, range: Range) -> Self {
        Self {
            name: name.into(),
            kind,
            range,
        }
    }
}

// ============================================================================
// 텍스트 편집
// ============================================================================

/// 포매팅 결과로 반환되는 단일 편집
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    /// 대상 범위
    pub range: Range,

    /// 대체 텍스트 (빈 문자열이면 삭제)
    pub new_text: String,
}

impl TextEdit {
    /// 범위 대체 편집
    pub fn replace(range: Range, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }

    /// 라인 전체 삭제 편집 (다음 라인 시작까지)
    pub fn delete_line(line: u32) -> Self {
        Self {
            range: Range::new(Position::new(line, 0), Position::new(line + 1, 0)),
            new_text: String::new(),
        }
    }
}

// ============================================================================
// 문서 스냅샷
// ============================================================================

/// Host가 전달하는 문서 스냅샷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDocument {
    /// 파일 URI
    pub uri: String,

    /// 언어 ID
    pub language_id: String,

    /// 전체 텍스트
    pub text: String,
}

impl TextDocument {
    pub fn new(
        uri: impl Into<String>,
        language_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            language_id: language_id.into(),
            text: text.into(),
        }
    }

    /// 라인 순회
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

// ============================================================================
// 탐색기 트리 항목
// ============================================================================

/// 탐색기 뷰의 트리 항목
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeItem {
    /// 항목 ID
    pub id: String,

    /// 표시 라벨
    pub label: String,

    /// 하위 항목 펼침 가능 여부
    #[serde(default)]
    pub collapsible: bool,
}

impl TreeItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            collapsible: false,
        }
    }

    pub fn collapsible(mut self) -> Self {
        self.collapsible = true;
        self
    }
}

// ============================================================================
// 서버 리소스 종류
// ============================================================================

/// 원격 서버가 관리하는 리소스 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    TestCase,
    Plugin,
    Model,
    Environment,
    Documentation,
}

impl ResourceKind {
    /// API 경로 세그먼트
    pub fn segment(&self) -> &'static str {
        match self {
            Self::TestCase => "tests",
            Self::Plugin => "plugins",
            Self::Model => "models",
            Self::Environment => "environments",
            Self::Documentation => "docs",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segment())
    }
}

// ============================================================================
// 테스트
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_handle_dispose_runs_release() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);
        let handle = DisposableHandle::new("command:test", move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        assert_eq!(handle.label(), "command:test");
        handle.dispose().unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_ledger_entry_point_is_exclusive() {
        let mut ledger = RegistrationLedger::new();
        ledger
            .install_entry_point(DisposableHandle::noop("entry"))
            .unwrap();

        let err = ledger.install_entry_point(DisposableHandle::noop("entry-again"));
        assert!(err.is_err());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_ledger_append_requires_entry_point() {
        let mut ledger = RegistrationLedger::new();
        assert!(ledger.append(DisposableHandle::noop("orphan")).is_err());

        ledger
            .install_entry_point(DisposableHandle::noop("entry"))
            .unwrap();
        ledger.append(DisposableHandle::noop("feature")).unwrap();
        assert_eq!(ledger.labels(), vec!["entry", "feature"]);
    }

    #[test]
    fn test_truncate_keeps_entry_point() {
        let disposed = Arc::new(AtomicUsize::new(0));
        let mut ledger = RegistrationLedger::new();
        ledger
            .install_entry_point(DisposableHandle::noop("entry"))
            .unwrap();
        for i in 0..3 {
            let disposed = Arc::clone(&disposed);
            ledger
                .append(DisposableHandle::new(format!("feature-{}", i), move || {
                    disposed.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }))
                .unwrap();
        }

        let failures = ledger.truncate_to_entry_point();
        assert!(failures.is_empty());
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.labels(), vec!["entry"]);
        assert_eq!(disposed.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_truncate_collects_failures_and_continues() {
        let disposed = Arc::new(AtomicUsize::new(0));
        let mut ledger = RegistrationLedger::new();
        ledger
            .install_entry_point(DisposableHandle::noop("entry"))
            .unwrap();
        ledger
            .append(DisposableHandle::new("broken", || {
                Err(Error::Host("release rejected".to_string()))
            }))
            .unwrap();
        let disposed_clone = Arc::clone(&disposed);
        ledger
            .append(DisposableHandle::new("healthy", move || {
                disposed_clone.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }))
            .unwrap();

        let failures = ledger.truncate_to_entry_point();
        assert_eq!(failures.len(), 1);
        assert_eq!(ledger.len(), 1);
        // 실패한 토큰 뒤의 토큰도 해제되어야 함
        assert_eq!(disposed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_resource_kind_segments() {
        assert_eq!(ResourceKind::TestCase.segment(), "tests");
        assert_eq!(ResourceKind::Documentation.segment(), "docs");
        assert_eq!(ResourceKind::Environment.to_string(), "environments");
    }

    #[test]
    fn test_text_edit_builders() {
        let edit = TextEdit::replace(Range::span(2, 1, 5), "Test-Id");
        assert_eq!(edit.range.start.line, 2);
        assert_eq!(edit.new_text, "Test-Id");

        let edit = TextEdit::delete_line(4);
        assert_eq!(edit.range.start, Position::new(4, 0));
        assert_eq!(edit.range.end, Position::new(5, 0));
        assert!(edit.new_text.is_empty());
    }
}
