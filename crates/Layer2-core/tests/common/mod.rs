//! 테스트 공용 픽스처 - 기록형 MockHost와 스크립트형 서버

#![allow(dead_code)]

use async_trait::async_trait;
use quill_foundation::{
    CommandHandler, DefinitionProvider, DisposableHandle, DocumentFormattingProvider,
    DocumentSymbolProvider, Error, HostApi, LifecycleEvent, ResourceKind, Result, ServerApi,
    TextDocument, TreeDataProvider,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{broadcast, Semaphore};

// ============================================================================
// MockHost
// ============================================================================

/// 등록/해제를 순서대로 기록하는 host
pub struct MockHost {
    registrations: Mutex<Vec<String>>,
    disposed: Arc<Mutex<Vec<String>>>,
    commands: Mutex<HashMap<String, CommandHandler>>,
    failing: Mutex<HashSet<String>>,
    active_document: Mutex<Option<TextDocument>>,
    input: Mutex<Option<String>>,
}

impl MockHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            registrations: Mutex::new(Vec::new()),
            disposed: Arc::new(Mutex::new(Vec::new())),
            commands: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
            active_document: Mutex::new(None),
            input: Mutex::new(None),
        })
    }

    /// 지정 라벨의 등록을 실패시키도록 설정
    pub fn fail_registration(&self, label: &str) {
        self.failing.lock().unwrap().insert(label.to_string());
    }

    pub fn set_active_document(&self, document: TextDocument) {
        *self.active_document.lock().unwrap() = Some(document);
    }

    pub fn set_input(&self, input: &str) {
        *self.input.lock().unwrap() = Some(input.to_string());
    }

    /// 지금까지의 등록 라벨 (등록 순서)
    pub fn registrations(&self) -> Vec<String> {
        self.registrations.lock().unwrap().clone()
    }

    /// 지금까지 해제된 라벨 (해제 순서)
    pub fn disposed(&self) -> Vec<String> {
        self.disposed.lock().unwrap().clone()
    }

    /// 등록된 command 호출
    pub async fn invoke(&self, id: &str) {
        let handler = self
            .commands
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or_else(|| panic!("command not registered: {}", id));
        handler().await;
    }

    pub fn has_command(&self, id: &str) -> bool {
        self.commands.lock().unwrap().contains_key(id)
    }

    fn register(&self, label: String) -> Result<DisposableHandle> {
        if self.failing.lock().unwrap().contains(&label) {
            return Err(Error::Host(format!("{} rejected", label)));
        }
        self.registrations.lock().unwrap().push(label.clone());

        let disposed = Arc::clone(&self.disposed);
        let disposed_label = label.clone();
        Ok(DisposableHandle::new(label, move || {
            disposed.lock().unwrap().push(disposed_label);
            Ok(())
        }))
    }
}

impl HostApi for MockHost {
    fn register_command(&self, id: &str, handler: CommandHandler) -> Result<DisposableHandle> {
        let handle = self.register(format!("command:{}", id))?;
        self.commands
            .lock()
            .unwrap()
            .insert(id.to_string(), handler);
        Ok(handle)
    }

    fn register_tree_provider(
        &self,
        view_id: &str,
        _provider: Arc<dyn TreeDataProvider>,
    ) -> Result<DisposableHandle> {
        self.register(format!("tree:{}", view_id))
    }

    fn register_document_symbol_provider(
        &self,
        language_id: &str,
        _provider: Arc<dyn DocumentSymbolProvider>,
    ) -> Result<DisposableHandle> {
        self.register(format!("symbols:{}", language_id))
    }

    fn register_definition_provider(
        &self,
        language_id: &str,
        _provider: Arc<dyn DefinitionProvider>,
    ) -> Result<DisposableHandle> {
        self.register(format!("definitions:{}", language_id))
    }

    fn register_formatting_provider(
        &self,
        language_id: &str,
        _provider: Arc<dyn DocumentFormattingProvider>,
    ) -> Result<DisposableHandle> {
        self.register(format!("formatting:{}", language_id))
    }

    fn active_document(&self) -> Option<TextDocument> {
        self.active_document.lock().unwrap().clone()
    }

    fn request_input(&self, _prompt: &str) -> Option<String> {
        self.input.lock().unwrap().clone()
    }
}

// ============================================================================
// ScriptedServer
// ============================================================================

/// 미리 정해진 응답을 돌려주는 서버
pub struct ScriptedServer {
    annotations: std::result::Result<String, String>,
    symbols: Vec<String>,
    gate: Option<Arc<Semaphore>>,
    fetches: AtomicUsize,
    calls: Mutex<Vec<String>>,
}

/// 기본 annotation payload
pub const ANNOTATIONS_PAYLOAD: &str = r#"[
    { "key": "test-id", "literal": "[test-id]" },
    { "key": "test-scenario", "literal": "[test-scenario]" }
]"#;

impl ScriptedServer {
    /// fetch가 항상 성공하는 서버
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            annotations: Ok(ANNOTATIONS_PAYLOAD.to_string()),
            symbols: Vec::new(),
            gate: None,
            fetches: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// fetch가 항상 실패하는 서버
    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            annotations: Err(reason.to_string()),
            symbols: Vec::new(),
            gate: None,
            fetches: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// fetch가 게이트 허가를 기다리는 서버 (허가 1개 = fetch 1건 완료)
    pub fn gated() -> (Arc<Self>, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let server = Arc::new(Self {
            annotations: Ok(ANNOTATIONS_PAYLOAD.to_string()),
            symbols: Vec::new(),
            gate: Some(Arc::clone(&gate)),
            fetches: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        });
        (server, gate)
    }

    /// 심볼 동기화 결과가 있는 서버
    pub fn with_symbols(symbols: Vec<&str>) -> Arc<Self> {
        Arc::new(Self {
            annotations: Ok(ANNOTATIONS_PAYLOAD.to_string()),
            symbols: symbols.into_iter().map(String::from).collect(),
            gate: None,
            fetches: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// fetch 시도 횟수
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// 기록된 호출 목록
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl ServerApi for ScriptedServer {
    async fn fetch_annotations(&self) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|_| Error::Internal("gate closed".to_string()))?;
            permit.forget();
        }
        match &self.annotations {
            Ok(payload) => Ok(payload.clone()),
            Err(reason) => Err(Error::MetadataFetch(reason.clone())),
        }
    }

    async fn connect(&self) -> Result<()> {
        self.record("connect");
        Ok(())
    }

    async fn invoke(&self, _source: &str) -> Result<String> {
        self.record("invoke");
        Ok("run-1".to_string())
    }

    async fn invoke_all(&self) -> Result<String> {
        self.record("invoke_all");
        Ok("run-all".to_string())
    }

    async fn register_resource(&self, kind: ResourceKind, _body: &str) -> Result<()> {
        self.record(format!("register:{}", kind));
        Ok(())
    }

    async fn get_resource(&self, kind: ResourceKind, key: &str) -> Result<String> {
        self.record(format!("get:{}:{}", kind, key));
        Ok("{}".to_string())
    }

    async fn sync_symbols(&self) -> Result<Vec<String>> {
        self.record("sync_symbols");
        Ok(self.symbols.clone())
    }
}

// ============================================================================
// 이벤트 대기 헬퍼
// ============================================================================

/// 조건을 만족하는 라이프사이클 이벤트가 올 때까지 대기
pub async fn wait_for_event(
    rx: &mut broadcast::Receiver<LifecycleEvent>,
    predicate: impl Fn(&LifecycleEvent) -> bool,
) -> LifecycleEvent {
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            let event = rx.recv().await.expect("event bus closed");
            if predicate(&event) {
                return event;
            }
        }
    })
    .await
    .expect("timed out waiting for lifecycle event")
}
