//! Lifecycle Controller - feature 등록/재초기화 파이프라인
//!
//! Host에 보이는 feature 상태의 단일 권한. 어떤 관측 시점에도 등록된
//! feature 집합은 "entry point + 가장 최근 reset이 설치한 것"입니다.
//!
//! ## 직렬화
//!
//! 컨트롤러 상태(ledger + 세대 카운터)는 하나의 뮤텍스 아래에서만
//! 변경됩니다. reset은 뮤텍스를 잡은 채 해제와 재등록을 모두 끝내므로,
//! 겹쳐 호출된 reset이 부분 해제 상태의 ledger를 관측할 수 없습니다.
//! annotation fetch의 완료 continuation도 같은 뮤텍스를 거칩니다.

use crate::context::WorkbenchContext;
use crate::features;
use crate::formatter::{AnnotationSet, FormatterFactory, FormatterFeature};
use parking_lot::Mutex;
use quill_foundation::{
    CommandHandler, Error, Feature, LifecycleEvent, RegistrationLedger, Result,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// entry point command ID
pub const ENTRY_POINT_COMMAND: &str = "quill.activate";

// ============================================================================
// ResetSummary
// ============================================================================

/// 단일 reset의 결과 요약
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetSummary {
    /// 이 reset의 세대 번호
    pub generation: u64,

    /// 등록에 성공한 feature 수
    pub registered: usize,

    /// 등록에 실패(건너뜀)한 feature 수
    pub failed: usize,

    /// 해제에 실패한 기존 토큰 수
    pub disposal_failures: usize,
}

// ============================================================================
// LifecycleController
// ============================================================================

/// 컨트롤러 내부 상태
struct ControllerState {
    ledger: RegistrationLedger,
    generation: u64,
}

/// Feature 라이프사이클 컨트롤러
pub struct LifecycleController {
    ctx: Arc<WorkbenchContext>,
    state: Mutex<ControllerState>,
}

impl LifecycleController {
    /// 새 컨트롤러 생성
    pub fn new(ctx: Arc<WorkbenchContext>) -> Arc<Self> {
        Arc::new(Self {
            ctx,
            state: Mutex::new(ControllerState {
                ledger: RegistrationLedger::new(),
                generation: 0,
            }),
        })
    }

    /// 공유 컨텍스트 접근
    pub fn context(&self) -> &Arc<WorkbenchContext> {
        &self.ctx
    }

    // ========================================================================
    // register - 프로세스 시작 시 1회
    // ========================================================================

    /// entry point를 ledger[0]에 등록하고 annotation fetch를 시작
    ///
    /// 두 번째 호출은 에러를 반환하며 ledger를 건드리지 않습니다.
    /// fetch 실패는 formatter 생략으로만 이어지고 entry point 사용성에는
    /// 영향을 주지 않습니다.
    pub fn register(self: &Arc<Self>) -> Result<()> {
        let generation = {
            let mut state = self.state.lock();
            if state.ledger.has_entry_point() {
                return Err(Error::Host(format!(
                    "{} is already registered",
                    ENTRY_POINT_COMMAND
                )));
            }

            let controller = Arc::clone(self);
            let handler: CommandHandler = Arc::new(move || {
                let controller = Arc::clone(&controller);
                Box::pin(async move {
                    if let Err(e) = controller.reset() {
                        error!("Reset failed: {}", e);
                    }
                })
            });

            let handle = self
                .ctx
                .host()
                .register_command(ENTRY_POINT_COMMAND, handler)?;
            state.ledger.install_entry_point(handle)?;
            state.generation
        };

        info!("Entry point registered: {}", ENTRY_POINT_COMMAND);
        self.ctx.events().publish(LifecycleEvent::EntryPointRegistered {
            command_id: ENTRY_POINT_COMMAND.to_string(),
        });

        self.spawn_formatter_build(generation);
        Ok(())
    }

    // ========================================================================
    // reset - 전체 teardown + rebuild
    // ========================================================================

    /// entry point가 호출될 때마다 실행되는 재초기화 루틴
    ///
    /// 1. entry point를 제외한 모든 토큰 해제 (실패는 보고 후 계속)
    /// 2. 고정 순서로 전체 feature 재생성/재등록 (개별 실패는 건너뜀)
    /// 3. 이 세대의 annotation fetch 시작
    ///
    /// 개별 feature의 실패가 이 경계를 넘어 전파되지 않습니다.
    pub fn reset(self: &Arc<Self>) -> Result<ResetSummary> {
        let summary = {
            let mut state = self.state.lock();
            if !state.ledger.has_entry_point() {
                return Err(Error::Host("reset requested before register".to_string()));
            }

            state.generation += 1;
            let generation = state.generation;
            debug!(generation, "Reset started");

            // 1. 기존 토큰 해제
            let disposal_failures = state.ledger.truncate_to_entry_point();
            for failure in &disposal_failures {
                warn!("Disposal failed during reset: {}", failure);
                if let Error::Disposal { label, message } = failure {
                    self.ctx.events().publish(LifecycleEvent::DisposalFailed {
                        label: label.clone(),
                        reason: message.clone(),
                    });
                }
            }

            // 2. 고정 순서 재등록
            let mut registered = 0usize;
            let mut failed = 0usize;
            for feature in features::fixed_features(&self.ctx) {
                match feature.register() {
                    Ok(handles) => {
                        let count = handles.len();
                        for handle in handles {
                            if let Err(e) = state.ledger.append(handle) {
                                error!("Ledger append failed for {}: {}", feature.name(), e);
                            }
                        }
                        registered += 1;
                        self.ctx.events().publish(LifecycleEvent::FeatureRegistered {
                            feature: feature.name().to_string(),
                            handles: count,
                        });
                    }
                    Err(e) => {
                        failed += 1;
                        let err = Error::feature_registration(feature.name(), e.to_string());
                        warn!("{}", err);
                        self.ctx.events().publish(LifecycleEvent::FeatureFailed {
                            feature: feature.name().to_string(),
                            reason: e.to_string(),
                        });
                    }
                }
            }

            ResetSummary {
                generation,
                registered,
                failed,
                disposal_failures: disposal_failures.len(),
            }
        };

        // 3. 이 세대의 formatter 재구축
        self.spawn_formatter_build(summary.generation);

        info!(
            generation = summary.generation,
            registered = summary.registered,
            failed = summary.failed,
            "Reset completed"
        );
        self.ctx.events().publish(LifecycleEvent::ResetCompleted {
            generation: summary.generation,
            registered: summary.registered,
            failed: summary.failed,
        });

        Ok(summary)
    }

    // ========================================================================
    // formatter - 비동기 annotation fetch → 등록
    // ========================================================================

    /// annotation fetch 태스크 시작
    ///
    /// 완료 시점에 세대가 바뀌었으면 결과를 버립니다. 이미 해제된 자리에
    /// 늦게 도착한 fetch가 등록하는 경합을 차단합니다.
    fn spawn_formatter_build(self: &Arc<Self>, generation: u64) {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            let payload = match controller.ctx.server().fetch_annotations().await {
                Ok(payload) => payload,
                Err(e) => {
                    warn!(generation, "Annotation fetch failed: {}", e);
                    controller.publish_formatter_skipped(generation, e.to_string());
                    return;
                }
            };

            let annotations = match AnnotationSet::parse(&payload) {
                Ok(annotations) => annotations,
                Err(e) => {
                    warn!(generation, "Annotation parse failed: {}", e);
                    controller.publish_formatter_skipped(generation, e.to_string());
                    return;
                }
            };

            let feature = FormatterFactory::build(Arc::clone(&controller.ctx), annotations);
            controller.install_formatter(generation, feature);
        });
    }

    /// fetch가 끝난 formatter를 현재 세대에 한해 등록
    fn install_formatter(&self, generation: u64, feature: FormatterFeature) {
        let mut state = self.state.lock();
        if state.generation != generation {
            debug!(
                generation,
                current = state.generation,
                "Stale formatter build discarded"
            );
            self.ctx.events().publish(LifecycleEvent::FormatterSkipped {
                generation,
                reason: "superseded by a newer reset".to_string(),
            });
            return;
        }

        match feature.register() {
            Ok(handles) => {
                for handle in handles {
                    if let Err(e) = state.ledger.append(handle) {
                        error!("Ledger append failed for formatter: {}", e);
                    }
                }
                info!(generation, "Formatter installed");
                self.ctx
                    .events()
                    .publish(LifecycleEvent::FormatterInstalled { generation });
            }
            Err(e) => {
                warn!(generation, "Formatter registration failed: {}", e);
                self.publish_formatter_skipped(generation, e.to_string());
            }
        }
    }

    fn publish_formatter_skipped(&self, generation: u64, reason: String) {
        self.ctx
            .events()
            .publish(LifecycleEvent::FormatterSkipped { generation, reason });
    }

    // ========================================================================
    // 조회
    // ========================================================================

    /// 현재 ledger 길이
    pub fn ledger_len(&self) -> usize {
        self.state.lock().ledger.len()
    }

    /// 등록 순서대로 ledger 라벨 반환
    pub fn ledger_labels(&self) -> Vec<String> {
        self.state
            .lock()
            .ledger
            .labels()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// 등록 순서대로 ledger 토큰 ID 반환
    pub fn ledger_ids(&self) -> Vec<uuid::Uuid> {
        self.state.lock().ledger.ids()
    }

    /// 현재 reset 세대
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }
}
