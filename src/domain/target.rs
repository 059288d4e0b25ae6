//! 변경 목록을 가져올 GitHub Pull Request 식별자.

use anyhow::{Result, bail};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    pub host: String,
    pub owner: String,
    pub repo: String,
    pub number: u64,
    pub url: String,
}

impl PullRequestRef {
    /// `https://<host>/<owner>/<repo>/pull/<number>` 형태만 허용한다.
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input.trim())?;
        let host = url
            .host_str()
            .ok_or_else(|| anyhow::anyhow!("URL host is missing"))?
            .to_string();

        let segments: Vec<String> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).map(ToString::to_string).collect())
            .unwrap_or_default();

        // /owner/repo/pull/<number>
        if segments.len() < 4 || segments[2] != "pull" {
            bail!("unsupported pull request URL: {input}");
        }
        let Ok(number) = segments[3].parse() else {
            bail!("invalid pull request number in URL: {input}");
        };

        Ok(Self {
            host,
            owner: segments[0].clone(),
            repo: segments[1].clone(),
            number,
            url: input.trim().to_string(),
        })
    }
}
