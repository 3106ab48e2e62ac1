use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use urlencoding::encode;

use crate::types::{
    DependencyReport, LoginResponse, RepoInfo, SummaryResponse, UpdateRequest, UpdateResult,
};

const GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const OAUTH_SCOPE: &str = "repo,user";

pub fn build_authorize_url(client_id: &str, redirect_uri: &str) -> String {
    format!(
        "{GITHUB_AUTHORIZE_URL}?client_id={client_id}&redirect_uri={}&scope={OAUTH_SCOPE}",
        encode(redirect_uri)
    )
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    code: &'a str,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent("repo-scout/0.1.0")
            .timeout(Duration::from_secs(10))
            .build()
            .context("HTTPクライアントの初期化に失敗しました")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn login(&self, code: &str) -> Result<LoginResponse> {
        let url = format!("{}/api/github/login/", self.base_url);
        let response = self
            .post_json(&url, &LoginBody { code })
            .context("ログインリクエストの送信に失敗しました")?;
        parse_response(response, "ログイン")
    }

    pub fn repos(&self) -> Result<Vec<RepoInfo>> {
        let url = format!("{}/api/github/repos", self.base_url);
        let response = self
            .get(&url)
            .context("リポジトリ一覧リクエストの送信に失敗しました")?;
        parse_response(response, "リポジトリ一覧の取得")
    }

    pub fn dependencies(&self, repo: &str) -> Result<DependencyReport> {
        let url = self.repo_endpoint(repo, "dependencies");
        let response = self
            .get(&url)
            .with_context(|| format!("依存関係リクエストの送信に失敗しました: {repo}"))?;
        parse_response(response, "依存関係の取得")
    }

    pub fn summary(&self, repo: &str) -> Result<SummaryResponse> {
        let url = self.repo_endpoint(repo, "summary");
        let response = self
            .get(&url)
            .with_context(|| format!("サマリーリクエストの送信に失敗しました: {repo}"))?;
        parse_response(response, "サマリーの取得")
    }

    pub fn update_dependencies(&self, repo: &str, request: &UpdateRequest) -> Result<UpdateResult> {
        let url = self.repo_endpoint(repo, "update-dependencies");
        let response = self
            .post_json(&url, request)
            .with_context(|| format!("依存関係更新リクエストの送信に失敗しました: {repo}"))?;
        parse_response(response, "依存関係の更新")
    }

    fn repo_endpoint(&self, repo: &str, tail: &str) -> String {
        format!("{}/api/github/repos/{}/{tail}", self.base_url, encode(repo))
    }

    fn get(&self, url: &str) -> reqwest::Result<Response> {
        self.authorize(self.http.get(url)).send()
    }

    fn post_json<B: Serialize>(&self, url: &str, body: &B) -> reqwest::Result<Response> {
        self.authorize(self.http.post(url)).json(body).send()
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

fn parse_response<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    if !response.status().is_success() {
        bail!("APIがエラーを返しました({what}): {}", response.status());
    }

    response
        .json()
        .with_context(|| format!("APIレスポンスの解析に失敗({what})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_url_percent_encodes_redirect_uri() {
        let url = build_authorize_url("abc123", "http://localhost:3000/github/callback");
        assert_eq!(
            url,
            "https://github.com/login/oauth/authorize?client_id=abc123\
             &redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fgithub%2Fcallback\
             &scope=repo,user"
        );
    }

    #[test]
    fn repo_endpoint_encodes_repo_name_and_trims_base_slash() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(
            client.repo_endpoint("my repo", "dependencies"),
            "http://localhost:8000/api/github/repos/my%20repo/dependencies"
        );
        assert_eq!(
            client.repo_endpoint("fintrac", "update-dependencies"),
            "http://localhost:8000/api/github/repos/fintrac/update-dependencies"
        );
    }
}
