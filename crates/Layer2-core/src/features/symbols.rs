//! Symbol Providers - 심볼/정의 feature
//!
//! quill 문서의 annotation 헤더를 심볼로 노출하고,
//! 서버에서 동기화한 심볼 테이블로 정의 위치를 해석합니다.

use crate::context::WorkbenchContext;
use quill_foundation::{
    DefinitionProvider, DisposableHandle, DocumentSymbol, DocumentSymbolProvider, Feature,
    Location, Position, Range, Result, SymbolKind, TextDocument,
};
use std::sync::Arc;

// ============================================================================
// AnnotationSymbolProvider
// ============================================================================

/// annotation 헤더 스캔 기반 문서 심볼 제공자
struct AnnotationSymbolProvider;

impl AnnotationSymbolProvider {
    /// `[name]` 형태의 헤더 라인에서 이름 추출
    fn header_name(line: &str) -> Option<&str> {
        line.trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .filter(|name| !name.is_empty())
    }
}

impl DocumentSymbolProvider for AnnotationSymbolProvider {
    fn provide_document_symbols(&self, document: &TextDocument) -> Vec<DocumentSymbol> {
        document
            .lines()
            .enumerate()
            .filter_map(|(index, line)| {
                let name = Self::header_name(line)?;
                let line_no = index as u32;
                Some(DocumentSymbol::new(
                    name,
                    SymbolKind::Key,
                    Range::span(line_no, 0, line.len() as u32),
                ))
            })
            .collect()
    }
}

// ============================================================================
// KnownSymbolDefinitionProvider
// ============================================================================

/// 알려진 심볼 테이블 기반 정의 제공자
///
/// 커서 위치의 단어가 동기화된 심볼이면, 문서 내 해당 헤더 라인을
/// 정의 위치로 반환합니다.
struct KnownSymbolDefinitionProvider {
    ctx: Arc<WorkbenchContext>,
}

impl KnownSymbolDefinitionProvider {
    /// 위치의 단어 추출 (영숫자, '-', '_' 연속 구간)
    fn word_at(document: &TextDocument, position: Position) -> Option<String> {
        let line = document.lines().nth(position.line as usize)?;
        let chars: Vec<char> = line.chars().collect();
        let col = position.character as usize;
        if col >= chars.len() || !Self::is_word_char(chars[col]) {
            return None;
        }

        let mut start = col;
        while start > 0 && Self::is_word_char(chars[start - 1]) {
            start -= 1;
        }
        let mut end = col;
        while end < chars.len() && Self::is_word_char(chars[end]) {
            end += 1;
        }
        Some(chars[start..end].iter().collect())
    }

    fn is_word_char(c: char) -> bool {
        c.is_alphanumeric() || c == '-' || c == '_'
    }

    /// 문서 내 `[word]` 헤더 라인 탐색
    fn header_line(document: &TextDocument, word: &str) -> Option<u32> {
        let needle = format!("[{}]", word);
        document
            .lines()
            .position(|line| line.trim() == needle)
            .map(|index| index as u32)
    }
}

impl DefinitionProvider for KnownSymbolDefinitionProvider {
    fn provide_definition(
        &self,
        document: &TextDocument,
        position: Position,
    ) -> Option<Location> {
        let word = Self::word_at(document, position)?;
        if !self.ctx.known_symbols().iter().any(|s| s == &word) {
            return None;
        }
        let line = Self::header_line(document, &word)?;
        Some(Location::new(
            document.uri.clone(),
            Range::point(Position::new(line, 0)),
        ))
    }
}

// ============================================================================
// Symbol Features
// ============================================================================

/// 문서 심볼 provider feature
pub struct DocumentSymbolFeature {
    ctx: Arc<WorkbenchContext>,
}

impl DocumentSymbolFeature {
    pub fn new(ctx: Arc<WorkbenchContext>) -> Self {
        Self { ctx }
    }
}

impl Feature for DocumentSymbolFeature {
    fn name(&self) -> &str {
        "document-symbols"
    }

    fn register(&self) -> Result<Vec<DisposableHandle>> {
        let handle = self.ctx.host().register_document_symbol_provider(
            self.ctx.config().language_id(),
            Arc::new(AnnotationSymbolProvider),
        )?;
        Ok(vec![handle])
    }
}

/// 정의 provider feature
pub struct DefinitionFeature {
    ctx: Arc<WorkbenchContext>,
}

impl DefinitionFeature {
    pub fn new(ctx: Arc<WorkbenchContext>) -> Self {
        Self { ctx }
    }
}

impl Feature for DefinitionFeature {
    fn name(&self) -> &str {
        "definitions"
    }

    fn register(&self) -> Result<Vec<DisposableHandle>> {
        let provider = Arc::new(KnownSymbolDefinitionProvider {
            ctx: Arc::clone(&self.ctx),
        });
        let handle = self
            .ctx
            .host()
            .register_definition_provider(self.ctx.config().language_id(), provider)?;
        Ok(vec![handle])
    }
}
