//! Workbench Config - 통합 설정
//!
//! 글로벌 설정과 프로젝트 설정을 병합해서 로드합니다.

use crate::storage::JsonStore;
use crate::Result;
use serde::{Deserialize, Serialize};

/// 설정 파일명
pub const QUILL_CONFIG_FILE: &str = "config.json";

/// 기본 서버 엔드포인트
pub const DEFAULT_SERVER_URL: &str = "http://localhost:9001";

/// 기본 대상 언어 ID
pub const DEFAULT_LANGUAGE_ID: &str = "quill";

/// 기본 요청 타임아웃 (초)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Workbench Config (통합)
// ============================================================================

/// Quill workbench 통합 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkbenchConfig {
    /// 버전 (마이그레이션용)
    #[serde(default = "default_version")]
    pub version: u32,

    /// 자동화 서버 엔드포인트
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    /// 대상 언어 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_id: Option<String>,

    /// 서버 요청 타임아웃 (초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// 탐색기 뷰 설정
    #[serde(default)]
    pub views: ViewsConfig,
}

fn default_version() -> u32 {
    1
}

impl WorkbenchConfig {
    pub fn new() -> Self {
        Self {
            version: default_version(),
            ..Self::default()
        }
    }

    // ========================================================================
    // 유효 값 접근자
    // ========================================================================

    /// 유효 서버 엔드포인트
    pub fn server_url(&self) -> &str {
        self.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    /// 유효 언어 ID
    pub fn language_id(&self) -> &str {
        self.language_id.as_deref().unwrap_or(DEFAULT_LANGUAGE_ID)
    }

    /// 유효 요청 타임아웃
    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// 글로벌 + 프로젝트 병합 로드
    pub fn load() -> Result<Self> {
        let mut config = Self::new();

        // 1. 글로벌 설정
        if let Ok(global) = JsonStore::global() {
            if let Some(global_config) =
                global.load_optional::<WorkbenchConfig>(QUILL_CONFIG_FILE)?
            {
                config.merge(global_config);
            }
        }

        // 2. 프로젝트 설정
        if let Ok(project) = JsonStore::current_project() {
            if let Some(project_config) =
                project.load_optional::<WorkbenchConfig>(QUILL_CONFIG_FILE)?
            {
                config.merge(project_config);
            }
        }

        Ok(config)
    }

    /// 글로벌 설정만 로드
    pub fn load_global() -> Result<Self> {
        let store = JsonStore::global()?;
        Ok(store.load_or_default(QUILL_CONFIG_FILE))
    }

    /// 글로벌 설정 저장
    pub fn save_global(&self) -> Result<()> {
        let store = JsonStore::global()?;
        store.save(QUILL_CONFIG_FILE, self)
    }

    /// 프로젝트 설정 저장
    pub fn save_project(&self) -> Result<()> {
        let store = JsonStore::current_project()?;
        store.save(QUILL_CONFIG_FILE, self)
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// 다른 설정과 병합 (other가 우선)
    pub fn merge(&mut self, other: WorkbenchConfig) {
        if other.version > self.version {
            self.version = other.version;
        }
        if other.server_url.is_some() {
            self.server_url = other.server_url;
        }
        if other.language_id.is_some() {
            self.language_id = other.language_id;
        }
        if other.request_timeout_secs.is_some() {
            self.request_timeout_secs = other.request_timeout_secs;
        }
        if other.views != ViewsConfig::default() {
            self.views = other.views;
        }
    }
}

// ============================================================================
// Views Config
// ============================================================================

/// 탐색기 뷰 ID 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewsConfig {
    /// 문서 뷰 ID
    #[serde(default = "default_documents_view")]
    pub documents: String,

    /// 파이프라인 뷰 ID
    #[serde(default = "default_pipelines_view")]
    pub pipelines: String,

    /// 스크립트 뷰 ID
    #[serde(default = "default_scripts_view")]
    pub scripts: String,
}

fn default_documents_view() -> String {
    "quillDocuments".to_string()
}

fn default_pipelines_view() -> String {
    "quillPipelines".to_string()
}

fn default_scripts_view() -> String {
    "quillScripts".to_string()
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            documents: default_documents_view(),
            pipelines: default_pipelines_view(),
            scripts: default_scripts_view(),
        }
    }
}
