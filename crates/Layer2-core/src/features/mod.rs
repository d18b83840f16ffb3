//! Features - workbench가 관리하는 기능 단위
//!
//! ## 등록 순서
//!
//! 순서는 보장 사항입니다: content provider → symbol/definition provider
//! → command. 협력자는 command 실행 시점에 provider가 이미 살아있음을
//! 전제할 수 있습니다.

pub mod commands;
pub mod providers;
pub mod symbols;

pub use commands::{
    ConnectServerCommand, GetDocumentationCommand, GetTestCaseCommand, InvokeAllTestCasesCommand,
    InvokeTestCaseCommand, RegisterEnvironmentCommand, RegisterModelsCommand,
    RegisterPluginsCommand, RegisterTestCaseCommand, UpdateSymbolsCommand,
};
pub use providers::{DocumentsTreeFeature, PipelinesTreeFeature, ScriptsTreeFeature};
pub use symbols::{DefinitionFeature, DocumentSymbolFeature};

use crate::context::WorkbenchContext;
use quill_foundation::Feature;
use std::sync::Arc;

/// 고정 등록 순서의 전체 feature 목록
///
/// reset마다 새로 생성됩니다. formatter는 여기 없습니다 -
/// annotation fetch 완료 후 LifecycleController가 별도로 등록합니다.
pub fn fixed_features(ctx: &Arc<WorkbenchContext>) -> Vec<Box<dyn Feature>> {
    vec![
        // providers: explorer views
        Box::new(DocumentsTreeFeature::new(Arc::clone(ctx))) as Box<dyn Feature>,
        Box::new(PipelinesTreeFeature::new(Arc::clone(ctx))),
        Box::new(ScriptsTreeFeature::new(Arc::clone(ctx))),
        // providers: symbols
        Box::new(DocumentSymbolFeature::new(Arc::clone(ctx))),
        // providers: context
        Box::new(DefinitionFeature::new(Arc::clone(ctx))),
        // commands
        Box::new(RegisterTestCaseCommand::new(Arc::clone(ctx))),
        Box::new(InvokeTestCaseCommand::new(Arc::clone(ctx))),
        Box::new(InvokeAllTestCasesCommand::new(Arc::clone(ctx))),
        Box::new(RegisterPluginsCommand::new(Arc::clone(ctx))),
        Box::new(RegisterModelsCommand::new(Arc::clone(ctx))),
        Box::new(GetTestCaseCommand::new(Arc::clone(ctx))),
        Box::new(RegisterEnvironmentCommand::new(Arc::clone(ctx))),
        Box::new(GetDocumentationCommand::new(Arc::clone(ctx))),
        Box::new(UpdateSymbolsCommand::new(Arc::clone(ctx))),
        Box::new(ConnectServerCommand::new(Arc::clone(ctx))),
    ]
}

/// 고정 순서의 feature 개수
pub const FIXED_FEATURE_COUNT: usize = 15;
