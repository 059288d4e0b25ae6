//! 외부 린터 설정 파일 조회 구현(HTTP 또는 로컬 경로).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::application::ports::ConfigFetcher;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// URL은 HTTP로 내려받고, 그 외 값은 로컬 파일 경로로 읽는다.
pub struct HttpConfigFetcher {
    client: Client,
}

impl Default for HttpConfigFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpConfigFetcher {
    pub fn new() -> Self {
        // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent("lintpilot")
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }

    async fn fetch_url(&self, url: Url) -> Result<String> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("failed to request {url}"))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .with_context(|| format!("failed to read response body from {url}"))?;
        if !status.is_success() {
            bail!("{url} responded with {status}");
        }
        Ok(body)
    }
}

enum Location {
    Remote(Url),
    Local(PathBuf),
}

fn locate(locator: &str) -> Location {
    match Url::parse(locator) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Location::Remote(url),
        Ok(url) if url.scheme() == "file" => match url.to_file_path() {
            Ok(path) => Location::Local(path),
            Err(()) => Location::Local(PathBuf::from(locator)),
        },
        // 드라이브 문자(`C:\..`)도 URL로 파싱되므로 나머지는 경로로 취급한다.
        _ => Location::Local(PathBuf::from(locator)),
    }
}

#[async_trait]
impl ConfigFetcher for HttpConfigFetcher {
    async fn fetch(&self, locator: &str) -> Result<String> {
        match locate(locator) {
            Location::Remote(url) => self.fetch_url(url).await,
            Location::Local(path) => tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read config file {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_kinds() {
        assert!(matches!(
            locate("https://example.com/.vale.ini"),
            Location::Remote(_)
        ));
        assert!(matches!(locate("styles/.vale.ini"), Location::Local(_)));
        assert!(matches!(locate("ftp://example.com/x.ini"), Location::Local(_)));
    }

    #[tokio::test]
    async fn reads_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".vale.ini");
        std::fs::write(&path, "MinAlertLevel = warning\n").unwrap();

        let fetcher = HttpConfigFetcher::new();
        let content = fetcher.fetch(&path.to_string_lossy()).await.unwrap();
        assert_eq!(content, "MinAlertLevel = warning\n");

        let missing = dir.path().join("missing.ini");
        assert!(fetcher.fetch(&missing.to_string_lossy()).await.is_err());
    }
}
