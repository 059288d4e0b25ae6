//! GitHub Pull Request 변경 파일 API 기반 제공자.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;

use super::patch::added_lines;
use crate::application::ports::ChangeSource;
use crate::domain::changeset::{ChangeRecord, ChangeSet};
use crate::domain::errors::ChangeSourceError;
use crate::domain::target::PullRequestRef;

const PER_PAGE: usize = 100;

pub struct GitHubPullChanges {
    client: Client,
    target: PullRequestRef,
    token: Option<String>,
    api_base: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PullFile {
    filename: String,
    status: String,
    /// 바이너리/대용량 파일은 patch가 없다.
    #[serde(default)]
    patch: Option<String>,
}

impl GitHubPullChanges {
    pub fn new(target: PullRequestRef, token: Option<String>, api_base: Option<String>) -> Self {
        Self {
            client: Client::new(),
            target,
            token,
            api_base,
        }
    }

    fn api_base(&self) -> String {
        // github.com은 공개 API, 그 외는 Enterprise 기본 경로를 사용한다.
        if let Some(base) = &self.api_base {
            return base.trim_end_matches('/').to_string();
        }
        if self.target.host == "github.com" {
            "https://api.github.com".to_string()
        } else {
            format!("https://{}/api/v3", self.target.host)
        }
    }

    fn files_endpoint(&self, page: usize) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}/files?per_page={PER_PAGE}&page={page}",
            self.api_base(),
            self.target.owner,
            self.target.repo,
            self.target.number
        )
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        let req = self
            .client
            .request(method, url)
            .header("User-Agent", "lintpilot")
            .header("Accept", "application/vnd.github+json");

        if let Some(token) = &self.token {
            req.bearer_auth(token)
        } else {
            req
        }
    }

    async fn fetch_page(&self, page: usize) -> Result<Vec<PullFile>, ChangeSourceError> {
        let resp = self
            .request(Method::GET, self.files_endpoint(page))
            .send()
            .await
            .map_err(|err| {
                ChangeSourceError::Unreachable(format!("github: failed to list PR files: {err}"))
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|err| {
            ChangeSourceError::Unreachable(format!("github: failed to read PR files body: {err}"))
        })?;
        if !status.is_success() {
            return Err(ChangeSourceError::Unreachable(format!(
                "github: failed to list PR files ({status}): {body}"
            )));
        }

        serde_json::from_str(&body)
            .map_err(|err| ChangeSourceError::Malformed(format!("github: invalid PR files JSON: {err}")))
    }
}

#[async_trait]
impl ChangeSource for GitHubPullChanges {
    async fn load(&self) -> Result<ChangeSet, ChangeSourceError> {
        let mut files = Vec::new();
        let mut page = 1;
        loop {
            let batch = self.fetch_page(page).await?;
            let last = batch.len() < PER_PAGE;
            files.extend(batch);
            if last {
                break;
            }
            page += 1;
        }
        tracing::debug!(pr = %self.target.url, files = files.len(), "fetched pull request files");

        Ok(changes_from_files(files))
    }
}

fn changes_from_files(files: Vec<PullFile>) -> ChangeSet {
    ChangeSet::from_records(
        files
            .into_iter()
            .filter(|file| file.status != "removed")
            .map(|file| {
                let lines = file.patch.as_deref().map(added_lines).unwrap_or_default();
                ChangeRecord::new(file.filename, lines)
            }),
    )
}
