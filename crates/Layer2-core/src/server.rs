//! Server Client - 원격 자동화 서버 HTTP 클라이언트
//!
//! ServerApi의 HTTP 전송 구현. 이 core는 호출 경계만 소유하며
//! 서버 쪽 실행 의미론은 다루지 않습니다.

use async_trait::async_trait;
use quill_foundation::{Error, ResourceKind, Result, ServerApi, WorkbenchConfig};
use std::time::Duration;
use tracing::debug;

/// 원격 자동화 서버 클라이언트
#[derive(Debug, Clone)]
pub struct ServerClient {
    /// 서버 base URL (끝 슬래시 제거)
    base_url: String,

    /// HTTP 클라이언트
    client: reqwest::Client,
}

impl ServerClient {
    /// 설정으로부터 클라이언트 생성
    pub fn new(config: &WorkbenchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs()))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.server_url().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v3/{}", self.base_url, path)
    }

    async fn get_text(&self, path: &str) -> Result<String> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Server(format!("{} returned {}", path, status)));
        }
        response.text().await.map_err(|e| Error::Http(e.to_string()))
    }

    async fn post_text(&self, path: &str, body: &str) -> Result<String> {
        let url = self.url(path);
        debug!("POST {} ({} bytes)", url, body.len());

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "text/plain")
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Server(format!("{} returned {}", path, status)));
        }
        response.text().await.map_err(|e| Error::Http(e.to_string()))
    }
}

#[async_trait]
impl ServerApi for ServerClient {
    async fn fetch_annotations(&self) -> Result<String> {
        self.get_text("meta/annotations")
            .await
            .map_err(|e| Error::MetadataFetch(e.to_string()))
    }

    async fn connect(&self) -> Result<()> {
        self.get_text("ping").await.map(|_| ())
    }

    async fn invoke(&self, source: &str) -> Result<String> {
        self.post_text("execute", source).await
    }

    async fn invoke_all(&self) -> Result<String> {
        self.post_text("execute/all", "").await
    }

    async fn register_resource(&self, kind: ResourceKind, body: &str) -> Result<()> {
        self.post_text(&format!("{}/register", kind.segment()), body)
            .await
            .map(|_| ())
    }

    async fn get_resource(&self, kind: ResourceKind, key: &str) -> Result<String> {
        self.get_text(&format!("{}/{}", kind.segment(), key)).await
    }

    async fn sync_symbols(&self) -> Result<Vec<String>> {
        let body = self.get_text("meta/symbols").await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Server(format!("Unparsable symbol payload: {}", e)))
    }
}
