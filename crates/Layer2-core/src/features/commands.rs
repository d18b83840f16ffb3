//! Commands - 서버 연동 command feature
//!
//! 각 command는 host에 자신을 등록하고, 호출 시 서버 클라이언트로
//! 위임합니다. 서버 쪽 동작의 세부는 이 core의 범위 밖입니다.

use crate::context::WorkbenchContext;
use futures::future::BoxFuture;
use quill_foundation::{CommandHandler, DisposableHandle, Feature, ResourceKind, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// 컨텍스트를 캡처하는 command 핸들러 생성
fn handler<F>(ctx: &Arc<WorkbenchContext>, run: F) -> CommandHandler
where
    F: Fn(Arc<WorkbenchContext>) -> BoxFuture<'static, ()> + Send + Sync + 'static,
{
    let ctx = Arc::clone(ctx);
    Arc::new(move || run(Arc::clone(&ctx)))
}

// ============================================================================
// 테스트 케이스 command
// ============================================================================

/// 현재 문서를 서버에 테스트 케이스로 등록
pub struct RegisterTestCaseCommand {
    ctx: Arc<WorkbenchContext>,
}

impl RegisterTestCaseCommand {
    pub const ID: &'static str = "quill.registerTestCase";

    pub fn new(ctx: Arc<WorkbenchContext>) -> Self {
        Self { ctx }
    }
}

impl Feature for RegisterTestCaseCommand {
    fn name(&self) -> &str {
        "register-test-case"
    }

    fn register(&self) -> Result<Vec<DisposableHandle>> {
        let handler = handler(&self.ctx, |ctx| {
            Box::pin(async move {
                let Some(document) = ctx.host().active_document() else {
                    warn!("No active document to register");
                    return;
                };
                match ctx
                    .server()
                    .register_resource(ResourceKind::TestCase, &document.text)
                    .await
                {
                    Ok(()) => info!("Test case registered from {}", document.uri),
                    Err(e) => warn!("Test case registration failed: {}", e),
                }
            })
        });
        Ok(vec![self.ctx.host().register_command(Self::ID, handler)?])
    }
}

/// 현재 문서의 테스트 케이스 실행
pub struct InvokeTestCaseCommand {
    ctx: Arc<WorkbenchContext>,
}

impl InvokeTestCaseCommand {
    pub const ID: &'static str = "quill.invokeTestCase";

    pub fn new(ctx: Arc<WorkbenchContext>) -> Self {
        Self { ctx }
    }
}

impl Feature for InvokeTestCaseCommand {
    fn name(&self) -> &str {
        "invoke-test-case"
    }

    fn register(&self) -> Result<Vec<DisposableHandle>> {
        let handler = handler(&self.ctx, |ctx| {
            Box::pin(async move {
                let Some(document) = ctx.host().active_document() else {
                    warn!("No active document to invoke");
                    return;
                };
                match ctx.server().invoke(&document.text).await {
                    Ok(run_id) => info!("Test case invoked: {}", run_id),
                    Err(e) => warn!("Test case invocation failed: {}", e),
                }
            })
        });
        Ok(vec![self.ctx.host().register_command(Self::ID, handler)?])
    }
}

/// 등록된 전체 테스트 실행
pub struct InvokeAllTestCasesCommand {
    ctx: Arc<WorkbenchContext>,
}

impl InvokeAllTestCasesCommand {
    pub const ID: &'static str = "quill.invokeAllTestCases";

    pub fn new(ctx: Arc<WorkbenchContext>) -> Self {
        Self { ctx }
    }
}

impl Feature for InvokeAllTestCasesCommand {
    fn name(&self) -> &str {
        "invoke-all-test-cases"
    }

    fn register(&self) -> Result<Vec<DisposableHandle>> {
        let handler = handler(&self.ctx, |ctx| {
            Box::pin(async move {
                match ctx.server().invoke_all().await {
                    Ok(run_id) => info!("All test cases invoked: {}", run_id),
                    Err(e) => warn!("Bulk invocation failed: {}", e),
                }
            })
        });
        Ok(vec![self.ctx.host().register_command(Self::ID, handler)?])
    }
}

/// ID로 테스트 케이스 조회
pub struct GetTestCaseCommand {
    ctx: Arc<WorkbenchContext>,
}

impl GetTestCaseCommand {
    pub const ID: &'static str = "quill.getTestCase";

    pub fn new(ctx: Arc<WorkbenchContext>) -> Self {
        Self { ctx }
    }
}

impl Feature for GetTestCaseCommand {
    fn name(&self) -> &str {
        "get-test-case"
    }

    fn register(&self) -> Result<Vec<DisposableHandle>> {
        let handler = handler(&self.ctx, |ctx| {
            Box::pin(async move {
                let Some(id) = ctx.host().request_input("Test case id") else {
                    return;
                };
                match ctx.server().get_resource(ResourceKind::TestCase, &id).await {
                    Ok(body) => info!("Test case {} fetched ({} bytes)", id, body.len()),
                    Err(e) => warn!("Test case lookup failed: {}", e),
                }
            })
        });
        Ok(vec![self.ctx.host().register_command(Self::ID, handler)?])
    }
}

// ============================================================================
// 리소스 등록 command
// ============================================================================

/// 현재 문서의 플러그인 정의를 서버에 등록
pub struct RegisterPluginsCommand {
    ctx: Arc<WorkbenchContext>,
}

impl RegisterPluginsCommand {
    pub const ID: &'static str = "quill.registerPlugins";

    pub fn new(ctx: Arc<WorkbenchContext>) -> Self {
        Self { ctx }
    }
}

impl Feature for RegisterPluginsCommand {
    fn name(&self) -> &str {
        "register-plugins"
    }

    fn register(&self) -> Result<Vec<DisposableHandle>> {
        let handler = handler(&self.ctx, |ctx| {
            Box::pin(async move {
                let Some(document) = ctx.host().active_document() else {
                    warn!("No active document to register plugins from");
                    return;
                };
                match ctx
                    .server()
                    .register_resource(ResourceKind::Plugin, &document.text)
                    .await
                {
                    Ok(()) => info!("Plugins registered from {}", document.uri),
                    Err(e) => warn!("Plugin registration failed: {}", e),
                }
            })
        });
        Ok(vec![self.ctx.host().register_command(Self::ID, handler)?])
    }
}

/// 현재 문서의 모델 정의를 서버에 등록
pub struct RegisterModelsCommand {
    ctx: Arc<WorkbenchContext>,
}

impl RegisterModelsCommand {
    pub const ID: &'static str = "quill.registerModels";

    pub fn new(ctx: Arc<WorkbenchContext>) -> Self {
        Self { ctx }
    }
}

impl Feature for RegisterModelsCommand {
    fn name(&self) -> &str {
        "register-models"
    }

    fn register(&self) -> Result<Vec<DisposableHandle>> {
        let handler = handler(&self.ctx, |ctx| {
            Box::pin(async move {
                let Some(document) = ctx.host().active_document() else {
                    warn!("No active document to register models from");
                    return;
                };
                match ctx
                    .server()
                    .register_resource(ResourceKind::Model, &document.text)
                    .await
                {
                    Ok(()) => info!("Models registered from {}", document.uri),
                    Err(e) => warn!("Model registration failed: {}", e),
                }
            })
        });
        Ok(vec![self.ctx.host().register_command(Self::ID, handler)?])
    }
}

/// 현재 문서의 환경 정의를 서버에 등록
pub struct RegisterEnvironmentCommand {
    ctx: Arc<WorkbenchContext>,
}

impl RegisterEnvironmentCommand {
    pub const ID: &'static str = "quill.registerEnvironment";

    pub fn new(ctx: Arc<WorkbenchContext>) -> Self {
        Self { ctx }
    }
}

impl Feature for RegisterEnvironmentCommand {
    fn name(&self) -> &str {
        "register-environment"
    }

    fn register(&self) -> Result<Vec<DisposableHandle>> {
        let handler = handler(&self.ctx, |ctx| {
            Box::pin(async move {
                let Some(document) = ctx.host().active_document() else {
                    warn!("No active document to register environment from");
                    return;
                };
                match ctx
                    .server()
                    .register_resource(ResourceKind::Environment, &document.text)
                    .await
                {
                    Ok(()) => info!("Environment registered from {}", document.uri),
                    Err(e) => warn!("Environment registration failed: {}", e),
                }
            })
        });
        Ok(vec![self.ctx.host().register_command(Self::ID, handler)?])
    }
}

// ============================================================================
// 조회/동기화 command
// ============================================================================

/// annotation 키 문서 조회
pub struct GetDocumentationCommand {
    ctx: Arc<WorkbenchContext>,
}

impl GetDocumentationCommand {
    pub const ID: &'static str = "quill.getDocumentation";

    pub fn new(ctx: Arc<WorkbenchContext>) -> Self {
        Self { ctx }
    }
}

impl Feature for GetDocumentationCommand {
    fn name(&self) -> &str {
        "get-documentation"
    }

    fn register(&self) -> Result<Vec<DisposableHandle>> {
        let handler = handler(&self.ctx, |ctx| {
            Box::pin(async move {
                let Some(key) = ctx.host().request_input("Documentation key") else {
                    return;
                };
                match ctx
                    .server()
                    .get_resource(ResourceKind::Documentation, &key)
                    .await
                {
                    Ok(body) => info!("Documentation {} fetched ({} bytes)", key, body.len()),
                    Err(e) => warn!("Documentation lookup failed: {}", e),
                }
            })
        });
        Ok(vec![self.ctx.host().register_command(Self::ID, handler)?])
    }
}

/// 서버 심볼 테이블 동기화
pub struct UpdateSymbolsCommand {
    ctx: Arc<WorkbenchContext>,
}

impl UpdateSymbolsCommand {
    pub const ID: &'static str = "quill.updateSymbols";

    pub fn new(ctx: Arc<WorkbenchContext>) -> Self {
        Self { ctx }
    }
}

impl Feature for UpdateSymbolsCommand {
    fn name(&self) -> &str {
        "update-symbols"
    }

    fn register(&self) -> Result<Vec<DisposableHandle>> {
        let handler = handler(&self.ctx, |ctx| {
            Box::pin(async move {
                match ctx.server().sync_symbols().await {
                    Ok(symbols) => {
                        info!("Symbols updated: {} entries", symbols.len());
                        ctx.replace_symbols(symbols);
                    }
                    Err(e) => warn!("Symbol sync failed: {}", e),
                }
            })
        });
        Ok(vec![self.ctx.host().register_command(Self::ID, handler)?])
    }
}

/// 서버 연결 확인
pub struct ConnectServerCommand {
    ctx: Arc<WorkbenchContext>,
}

impl ConnectServerCommand {
    pub const ID: &'static str = "quill.connectServer";

    pub fn new(ctx: Arc<WorkbenchContext>) -> Self {
        Self { ctx }
    }
}

impl Feature for ConnectServerCommand {
    fn name(&self) -> &str {
        "connect-server"
    }

    fn register(&self) -> Result<Vec<DisposableHandle>> {
        let handler = handler(&self.ctx, |ctx| {
            Box::pin(async move {
                match ctx.server().connect().await {
                    Ok(()) => info!("Server connection verified: {}", ctx.config().server_url()),
                    Err(e) => warn!("Server connection failed: {}", e),
                }
            })
        });
        Ok(vec![self.ctx.host().register_command(Self::ID, handler)?])
    }
}
