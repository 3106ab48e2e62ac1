mod api;
mod cli;
mod deps;
mod listing;
mod output;
mod progress;
mod session;
mod types;

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::api::ApiClient;
use crate::cli::{Cli, Command};
use crate::deps::{SortField, SortOrder, SortState};
use crate::listing::Listing;
use crate::session::Session;
use crate::types::Ecosystem;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Login { code } => login(&cli.api_base, code),
        Command::Logout => logout(),
        Command::Whoami => whoami(),
        Command::Repos {
            search,
            page,
            print_json,
            json_output,
        } => list_repos(
            &cli.api_base,
            search.as_deref(),
            page,
            print_json,
            json_output.as_deref(),
        ),
        Command::Deps {
            repo,
            sort,
            order,
            print_json,
            json_output,
        } => show_deps(
            &cli.api_base,
            &repo,
            sort,
            order,
            print_json,
            json_output.as_deref(),
        ),
        Command::Update { repo, ecosystem } => update_deps(&cli.api_base, &repo, ecosystem),
        Command::Summary { repo } => show_summary(&cli.api_base, &repo),
    }
}

fn login(api_base: &str, code: Option<String>) -> Result<()> {
    let code = match code {
        Some(code) => code,
        None => prompt_for_code()?,
    };

    let client = ApiClient::new(api_base)?;
    let response = progress::with_spinner("GitHubログインを処理中...", || {
        client.login(code.trim())
    })
    .context("ログインに失敗しました")?;

    let name = response.user.display_name().to_string();
    let mut session = Session::load()?;
    session.store(response.access_token, response.user);
    session.save()?;

    println!("✔ {name} としてログインしました。");
    Ok(())
}

fn prompt_for_code() -> Result<String> {
    let client_id = std::env::var("GITHUB_CLIENT_ID")
        .context("環境変数GITHUB_CLIENT_IDが設定されていません")?;
    let redirect_uri = std::env::var("GITHUB_REDIRECT_URI")
        .context("環境変数GITHUB_REDIRECT_URIが設定されていません")?;

    println!("ブラウザで以下のURLを開き、GitHubへのアクセスを許可してください:");
    println!("  {}", api::build_authorize_url(&client_id, &redirect_uri));
    println!("リダイレクト先URLのcodeパラメータを貼り付けてください。");
    print!("code: ");
    io::stdout().flush()?;

    let mut code = String::new();
    io::stdin()
        .read_line(&mut code)
        .context("認可コードの読み取りに失敗しました")?;

    let code = code.trim().to_string();
    if code.is_empty() {
        bail!("認可コードが入力されませんでした");
    }
    Ok(code)
}

fn logout() -> Result<()> {
    let mut session = Session::load()?;
    if !session.is_logged_in() {
        println!("ログインしていません。");
        return Ok(());
    }

    session.clear()?;
    println!("✔ ログアウトしました。");
    Ok(())
}

fn whoami() -> Result<()> {
    let session = Session::load()?;
    let Some(user) = session.user() else {
        bail!("ログインしていません。`repo-scout login` を実行してください。");
    };

    println!("id:     {}", user.id);
    println!("login:  {}", user.login);
    if let Some(name) = user.name.as_deref().filter(|name| !name.is_empty()) {
        println!("name:   {name}");
    }
    if let Some(email) = user.email.as_deref().filter(|email| !email.is_empty()) {
        println!("email:  {email}");
    }
    if let Some(avatar) = user.avatar_url.as_deref() {
        println!("avatar: {avatar}");
    }
    Ok(())
}

fn authed_client(api_base: &str) -> Result<(ApiClient, Session)> {
    let session = Session::load()?;
    let Some(token) = session.token() else {
        bail!("ログインしていません。`repo-scout login` を実行してください。");
    };

    let client = ApiClient::new(api_base)?.with_token(token);
    Ok((client, session))
}

fn list_repos(
    api_base: &str,
    search: Option<&str>,
    page: usize,
    print_json: bool,
    json_output: Option<&Path>,
) -> Result<()> {
    let (client, session) = authed_client(api_base)?;

    let fetched = progress::with_spinner("リポジトリ一覧を取得中...", || client.repos())
        .context("リポジトリ一覧の取得に失敗しました")?;

    let mut listing = Listing::new(fetched);
    if let Some(query) = search {
        listing.set_query(Some(query));
        println!("> 検索クエリ \"{query}\" を適用: {}件が一致", listing.filtered().len());
    }
    if !listing.set_page(page) {
        eprintln!(
            "警告: ページ番号{page}は範囲外です(1〜{}ページ)。1ページ目を表示します。",
            listing.total_pages()
        );
    }

    if let Some(user) = session.user() {
        output::print_user_line(user);
    }

    output::print_repo_table(&listing.current_page());
    println!("Page {} / {}", listing.page(), listing.total_pages());

    let filtered = listing.filtered();
    output::output_json(&filtered, print_json, json_output)?;
    Ok(())
}

fn show_deps(
    api_base: &str,
    repo: &str,
    sort: Option<SortField>,
    order: SortOrder,
    print_json: bool,
    json_output: Option<&Path>,
) -> Result<()> {
    let (client, _session) = authed_client(api_base)?;

    let report = progress::with_spinner("依存関係レポートを取得中...", || {
        client.dependencies(repo)
    })
    .context("依存関係の取得に失敗しました")?;

    let mut state = SortState::default();
    if let Some(field) = sort {
        state.toggle(field);
        if order == SortOrder::Desc {
            state.toggle(field);
        }
    }

    println!("Dependencies for {repo}");
    if let Some(npm) = &report.npm {
        output::print_dependency_table(Ecosystem::Npm, npm, &state);
    }
    if let Some(pip) = &report.pip {
        output::print_dependency_table(Ecosystem::Pip, pip, &state);
    }
    if report.is_empty() {
        println!("package.json も requirements.txt も見つかりませんでした。");
    }

    output::output_json(&report, print_json, json_output)?;
    Ok(())
}

fn update_deps(api_base: &str, repo: &str, ecosystem: Ecosystem) -> Result<()> {
    let (client, _session) = authed_client(api_base)?;

    let report = progress::with_spinner("依存関係レポートを取得中...", || {
        client.dependencies(repo)
    })
    .context("依存関係の取得に失敗しました")?;

    let Some(records) = report.ecosystem(ecosystem) else {
        println!("{}のマニフェストは見つかりませんでした。", ecosystem.title());
        return Ok(());
    };

    let Some(request) = deps::build_update_request(records) else {
        println!("すべての{}依存関係は最新です。更新は不要でした。", ecosystem.title());
        return Ok(());
    };

    println!(
        "> {}件の古い依存関係を更新します({})",
        request.updates.len(),
        request.file_path
    );
    let result = progress::with_spinner("Pull Requestを作成中...", || {
        client.update_dependencies(repo, &request)
    })
    .context("依存関係の更新に失敗しました。時間をおいて再試行してください。")?;

    println!("✔ Pull Requestを作成しました: {}", result.pr_url);
    Ok(())
}

fn show_summary(api_base: &str, repo: &str) -> Result<()> {
    let (client, _session) = authed_client(api_base)?;

    let summary = progress::with_spinner("サマリーを生成中...", || client.summary(repo))
        .context("サマリーの取得に失敗しました")?;

    output::print_summary(repo, &summary);
    Ok(())
}
