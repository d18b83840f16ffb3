//! Workbench Context - 공유 컨텍스트
//!
//! 모든 Feature가 공유하는 읽기 전용 핸들.
//! Feature는 컨텍스트를 통해 host API, 서버 클라이언트, 설정에 접근합니다.

use parking_lot::RwLock;
use quill_foundation::{EventBus, HostApi, ServerApi, WorkbenchConfig};
use std::sync::Arc;

/// Workbench 통합 컨텍스트
///
/// ledger는 여기 없습니다 - ledger는 LifecycleController가 단독으로
/// 소유하고 변경합니다. Feature는 등록 결과 토큰을 반환할 뿐입니다.
pub struct WorkbenchContext {
    /// Host 등록 API
    host: Arc<dyn HostApi>,

    /// 원격 자동화 서버 클라이언트
    server: Arc<dyn ServerApi>,

    /// 워크벤치 설정
    config: WorkbenchConfig,

    /// 라이프사이클 이벤트 버스
    events: EventBus,

    /// 서버에서 동기화한 심볼 테이블 (definition provider가 참조)
    symbols: RwLock<Vec<String>>,
}

impl WorkbenchContext {
    /// 새 컨텍스트 생성
    pub fn new(
        host: Arc<dyn HostApi>,
        server: Arc<dyn ServerApi>,
        config: WorkbenchConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            host,
            server,
            config,
            events: EventBus::new(),
            symbols: RwLock::new(Vec::new()),
        })
    }

    /// Host API 접근
    pub fn host(&self) -> &Arc<dyn HostApi> {
        &self.host
    }

    /// 서버 클라이언트 접근
    pub fn server(&self) -> &Arc<dyn ServerApi> {
        &self.server
    }

    /// 설정 접근
    pub fn config(&self) -> &WorkbenchConfig {
        &self.config
    }

    /// 이벤트 버스 접근
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // ========================================================================
    // 심볼 테이블
    // ========================================================================

    /// 현재 알려진 심볼 목록
    pub fn known_symbols(&self) -> Vec<String> {
        self.symbols.read().clone()
    }

    /// 심볼 테이블 교체 (update-symbols command가 호출)
    pub fn replace_symbols(&self, symbols: Vec<String>) {
        *self.symbols.write() = symbols;
    }
}
