//! Tree Providers - 탐색기 콘텐츠 feature
//!
//! 문서/파이프라인/스크립트 탐색기 뷰를 등록합니다.
//! 뷰 내용의 구체적 동작은 이 core의 범위 밖이며, 여기서는
//! 등록/해제 단위로서의 feature 경계만 구현합니다.

use crate::context::WorkbenchContext;
use quill_foundation::{DisposableHandle, Feature, Result, TreeDataProvider, TreeItem};
use std::sync::Arc;

// ============================================================================
// StaticTreeProvider
// ============================================================================

/// 정적 루트 항목을 노출하는 트리 제공자
struct StaticTreeProvider {
    roots: Vec<TreeItem>,
}

impl TreeDataProvider for StaticTreeProvider {
    fn get_children(&self, parent: Option<&TreeItem>) -> Vec<TreeItem> {
        match parent {
            None => self.roots.clone(),
            Some(_) => Vec::new(),
        }
    }
}

// ============================================================================
// Tree Features
// ============================================================================

/// 문서 탐색기 feature
pub struct DocumentsTreeFeature {
    ctx: Arc<WorkbenchContext>,
}

impl DocumentsTreeFeature {
    pub fn new(ctx: Arc<WorkbenchContext>) -> Self {
        Self { ctx }
    }
}

impl Feature for DocumentsTreeFeature {
    fn name(&self) -> &str {
        "documents-tree"
    }

    fn register(&self) -> Result<Vec<DisposableHandle>> {
        let provider = Arc::new(StaticTreeProvider {
            roots: vec![TreeItem::new("documents", "Documents").collapsible()],
        });
        let handle = self
            .ctx
            .host()
            .register_tree_provider(&self.ctx.config().views.documents, provider)?;
        Ok(vec![handle])
    }
}

/// 파이프라인 탐색기 feature
pub struct PipelinesTreeFeature {
    ctx: Arc<WorkbenchContext>,
}

impl PipelinesTreeFeature {
    pub fn new(ctx: Arc<WorkbenchContext>) -> Self {
        Self { ctx }
    }
}

impl Feature for PipelinesTreeFeature {
    fn name(&self) -> &str {
        "pipelines-tree"
    }

    fn register(&self) -> Result<Vec<DisposableHandle>> {
        let provider = Arc::new(StaticTreeProvider {
            roots: vec![TreeItem::new("pipelines", "Pipelines").collapsible()],
        });
        let handle = self
            .ctx
            .host()
            .register_tree_provider(&self.ctx.config().views.pipelines, provider)?;
        Ok(vec![handle])
    }
}

/// 스크립트 탐색기 feature
pub struct ScriptsTreeFeature {
    ctx: Arc<WorkbenchContext>,
}

impl ScriptsTreeFeature {
    pub fn new(ctx: Arc<WorkbenchContext>) -> Self {
        Self { ctx }
    }
}

impl Feature for ScriptsTreeFeature {
    fn name(&self) -> &str {
        "scripts-tree"
    }

    fn register(&self) -> Result<Vec<DisposableHandle>> {
        let provider = Arc::new(StaticTreeProvider {
            roots: vec![TreeItem::new("scripts", "Scripts").collapsible()],
        });
        let handle = self
            .ctx
            .host()
            .register_tree_provider(&self.ctx.config().views.scripts, provider)?;
        Ok(vec![handle])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_provider_children() {
        let provider = StaticTreeProvider {
            roots: vec![TreeItem::new("documents", "Documents").collapsible()],
        };

        let roots = provider.get_children(None);
        assert_eq!(roots.len(), 1);
        assert!(roots[0].collapsible);

        // 정적 트리는 하위 항목이 없음
        assert!(provider.get_children(Some(&roots[0])).is_empty());
    }
}
