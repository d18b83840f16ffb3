//! Event Types - 라이프사이클 이벤트 정의
//!
//! 등록 파이프라인에서 발생하는 모든 이벤트를 정의합니다.
//! 부분 실패는 삼켜지지 않고 반드시 이벤트로 보고됩니다.

use serde::{Deserialize, Serialize};

// ============================================================================
// LifecycleEvent
// ============================================================================

/// 라이프사이클 이벤트
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum LifecycleEvent {
    /// entry point 등록 완료
    EntryPointRegistered { command_id: String },

    /// feature 등록 성공
    FeatureRegistered { feature: String, handles: usize },

    /// feature 등록 실패 (건너뜀, 파이프라인은 계속)
    FeatureFailed { feature: String, reason: String },

    /// 토큰 해제 실패 (best-effort, 나머지 해제는 계속)
    DisposalFailed { label: String, reason: String },

    /// reset 완료
    ResetCompleted {
        generation: u64,
        registered: usize,
        failed: usize,
    },

    /// formatter 등록 완료
    FormatterInstalled { generation: u64 },

    /// formatter 생략 (fetch 실패, 파싱 실패 또는 세대 폐기)
    FormatterSkipped { generation: u64, reason: String },
}

impl LifecycleEvent {
    /// 이벤트가 가리키는 feature/토큰 이름 (있는 경우)
    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::EntryPointRegistered { command_id } => Some(command_id),
            Self::FeatureRegistered { feature, .. } => Some(feature),
            Self::FeatureFailed { feature, .. } => Some(feature),
            Self::DisposalFailed { label, .. } => Some(label),
            _ => None,
        }
    }

    /// 실패 계열 이벤트인지 확인
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::FeatureFailed { .. } | Self::DisposalFailed { .. } | Self::FormatterSkipped { .. }
        )
    }
}
