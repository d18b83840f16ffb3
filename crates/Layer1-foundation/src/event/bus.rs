//! Event Bus - 라이프사이클 이벤트 브로드캐스트
//!
//! 구독자가 없어도 발행은 실패하지 않습니다.

use super::types::LifecycleEvent;
use tokio::sync::broadcast;
use tracing::trace;

/// 기본 채널 용량
const DEFAULT_CAPACITY: usize = 256;

/// 라이프사이클 이벤트 버스
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<LifecycleEvent>,
}

impl EventBus {
    /// 기본 용량으로 버스 생성
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// 지정 용량으로 버스 생성
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// 이벤트 발행
    pub fn publish(&self, event: LifecycleEvent) {
        trace!("Lifecycle event: {:?}", event);
        // 수신자가 없으면 SendError가 반환되지만 정상 상황임
        let _ = self.tx.send(event);
    }

    /// 구독 시작
    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.tx.subscribe()
    }

    /// 현재 구독자 수
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
