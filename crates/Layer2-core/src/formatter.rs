//! Formatter - annotation 메타데이터 기반 문서 포매터
//!
//! 서버에서 받은 annotation 스키마로 formatter feature를 구성합니다.
//! AnnotationSet은 하나의 formatter 빌드에만 쓰이는 불변 값이며
//! reset 사이에 캐시되지 않습니다.

use crate::context::WorkbenchContext;
use quill_foundation::{
    DisposableHandle, DocumentFormattingProvider, Error, Feature, Range, Result, TextDocument,
    TextEdit,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// Annotation 모델
// ============================================================================

/// 서버 annotation 스키마의 단일 항목
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// 공식 표기 키 (예: "test-id")
    pub key: String,

    /// 문서 내 리터럴 표기 (예: "[test-id]")
    #[serde(default)]
    pub literal: String,

    /// 설명
    #[serde(default)]
    pub description: String,
}

/// 하나의 formatter 빌드에 쓰이는 불변 annotation 집합
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSet {
    entries: Vec<Annotation>,
}

impl AnnotationSet {
    /// 서버 payload 파싱
    pub fn parse(payload: &str) -> Result<Self> {
        let entries: Vec<Annotation> = serde_json::from_str(payload)
            .map_err(|e| Error::MetadataFetch(format!("Unparsable annotation payload: {}", e)))?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 대소문자 무시 비교로 공식 표기 조회
    pub fn canonical(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|a| a.key.eq_ignore_ascii_case(key))
            .map(|a| a.key.as_str())
    }
}

// ============================================================================
// TestCaseFormatter
// ============================================================================

/// annotation 헤더 표기를 정규화하는 포매터
///
/// - `[Key]` 헤더를 스키마의 공식 표기로 교체
/// - 섹션 사이 연속 빈 줄을 하나로 축소
pub struct TestCaseFormatter {
    annotations: AnnotationSet,
}

impl TestCaseFormatter {
    pub fn new(annotations: AnnotationSet) -> Self {
        Self { annotations }
    }

    /// 문서 전체에 대한 포매팅 편집 생성
    pub fn format(&self, document: &TextDocument) -> Vec<TextEdit> {
        let mut edits = Vec::new();
        let mut blank_run = 0usize;

        for (index, line) in document.lines().enumerate() {
            let line_no = index as u32;
            let trimmed = line.trim();

            if trimmed.is_empty() {
                blank_run += 1;
                if blank_run > 1 {
                    edits.push(TextEdit::delete_line(line_no));
                }
                continue;
            }
            blank_run = 0;

            let Some(key) = trimmed
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
            else {
                continue;
            };
            let Some(canonical) = self.annotations.canonical(key) else {
                continue;
            };
            if key == canonical {
                continue;
            }

            // 헤더 키 구간만 교체 ('[' 바로 다음부터)
            let indent = (line.len() - line.trim_start().len()) as u32;
            let start = indent + 1;
            let end = start + key.len() as u32;
            edits.push(TextEdit::replace(
                Range::span(line_no, start, end),
                canonical,
            ));
        }

        edits
    }
}

impl DocumentFormattingProvider for TestCaseFormatter {
    fn provide_formatting_edits(&self, document: &TextDocument) -> Vec<TextEdit> {
        self.format(document)
    }
}

// ============================================================================
// FormatterFactory / FormatterFeature
// ============================================================================

/// AnnotationSet으로부터 formatter feature를 구성
pub struct FormatterFactory;

impl FormatterFactory {
    /// formatter feature 생성 (순수 함수)
    pub fn build(ctx: Arc<WorkbenchContext>, annotations: AnnotationSet) -> FormatterFeature {
        FormatterFeature {
            ctx,
            formatter: Arc::new(TestCaseFormatter::new(annotations)),
        }
    }
}

/// 문서 포매팅 provider를 등록하는 feature
pub struct FormatterFeature {
    ctx: Arc<WorkbenchContext>,
    formatter: Arc<TestCaseFormatter>,
}

impl Feature for FormatterFeature {
    fn name(&self) -> &str {
        "document-formatter"
    }

    fn register(&self) -> Result<Vec<DisposableHandle>> {
        let handle = self.ctx.host().register_formatting_provider(
            self.ctx.config().language_id(),
            Arc::clone(&self.formatter) as Arc<dyn DocumentFormattingProvider>,
        )?;
        Ok(vec![handle])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_foundation::Position;

    fn annotations() -> AnnotationSet {
        AnnotationSet::parse(
            r#"[
                { "key": "test-id", "literal": "[test-id]" },
                { "key": "test-scenario", "literal": "[test-scenario]" }
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = AnnotationSet::parse("not json").unwrap_err();
        assert!(matches!(err, Error::MetadataFetch(_)));
    }

    #[test]
    fn test_canonical_lookup_is_case_insensitive() {
        let set = annotations();
        assert_eq!(set.canonical("Test-Id"), Some("test-id"));
        assert_eq!(set.canonical("unknown"), None);
    }

    #[test]
    fn test_format_normalizes_header_casing() {
        let formatter = TestCaseFormatter::new(annotations());
        let document = TextDocument::new(
            "file:///case.quill",
            "quill",
            "[Test-Id]\nTC-001\n[test-scenario]\nlogin works\n",
        );

        let edits = formatter.format(&document);
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].new_text, "test-id");
        assert_eq!(edits[0].range.start, Position::new(0, 1));
        assert_eq!(edits[0].range.end, Position::new(0, 8));
    }

    #[test]
    fn test_format_collapses_blank_runs() {
        let formatter = TestCaseFormatter::new(annotations());
        let document = TextDocument::new(
            "file:///case.quill",
            "quill",
            "[test-id]\nTC-001\n\n\n\n[test-scenario]\n",
        );

        let edits = formatter.format(&document);
        // 첫 빈 줄은 유지, 이후 두 줄은 삭제
        assert_eq!(edits.len(), 2);
        assert_eq!(edits[0].range.start.line, 3);
        assert_eq!(edits[1].range.start.line, 4);
    }

    #[test]
    fn test_format_leaves_unknown_headers_untouched() {
        let formatter = TestCaseFormatter::new(annotations());
        let document = TextDocument::new("file:///case.quill", "quill", "[Custom-Header]\nbody\n");

        assert!(formatter.format(&document).is_empty());
    }

    #[test]
    fn test_format_respects_indent() {
        let formatter = TestCaseFormatter::new(annotations());
        let document = TextDocument::new("file:///case.quill", "quill", "  [TEST-ID]\n");

        let edits = formatter.format(&document);
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].range.start, Position::new(0, 3));
    }
}
