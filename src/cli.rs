use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::deps::{SortField, SortOrder};
use crate::types::Ecosystem;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "GitHubリポジトリの依存関係チェックとサマリー生成を行うCLIクライアント",
    long_about = None
)]
pub struct Cli {
    /// 連携APIサーバーのベースURL。
    #[arg(
        long = "api-base",
        value_name = "URL",
        global = true,
        default_value = "http://localhost:8000"
    )]
    pub api_base: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// GitHub OAuthでログインし、セッションを保存します。
    Login {
        /// OAuthコールバックで受け取った認可コード。省略時は対話的に入力します。
        #[arg(long = "code", value_name = "CODE")]
        code: Option<String>,
    },

    /// 保存済みセッションを破棄します。
    Logout,

    /// ログイン中のユーザー情報を表示します。
    Whoami,

    /// リポジトリ一覧を表示します(1ページ9件)。
    Repos {
        /// 名前と説明文に対する部分一致フィルタ。大文字小文字は区別しません。
        #[arg(long = "search", value_name = "QUERY")]
        search: Option<String>,

        /// 表示するページ番号。
        #[arg(long = "page", value_name = "N", default_value_t = 1)]
        page: usize,

        /// JSONを標準出力へ出す場合は指定してください。
        #[arg(long = "print-json")]
        print_json: bool,

        /// JSON出力を書き出すファイルパス。
        #[arg(long = "json-output", value_name = "FILE")]
        json_output: Option<PathBuf>,
    },

    /// リポジトリの依存関係レポートを表示します。
    Deps {
        /// 対象リポジトリ名。
        repo: String,

        /// ソート対象の列。現在はstatusのみ対応しています。
        #[arg(long = "sort", value_enum, value_name = "FIELD")]
        sort: Option<SortField>,

        /// ソート順。
        #[arg(long = "order", value_enum, value_name = "ORDER", default_value = "asc")]
        order: SortOrder,

        /// JSONを標準出力へ出す場合は指定してください。
        #[arg(long = "print-json")]
        print_json: bool,

        /// JSON出力を書き出すファイルパス。
        #[arg(long = "json-output", value_name = "FILE")]
        json_output: Option<PathBuf>,
    },

    /// 古くなった依存関係をまとめて更新するPull Requestを作成します。
    ///
    /// 更新リクエストは最初に見つかった古いレコードのfile_pathにまとめて
    /// 送信されます。複数マニフェストへの分割送信には対応していません。
    Update {
        /// 対象リポジトリ名。
        repo: String,

        /// 対象エコシステム。
        #[arg(value_enum)]
        ecosystem: Ecosystem,
    },

    /// リポジトリのAIサマリーを取得して表示します。
    Summary {
        /// 対象リポジトリ名。
        repo: String,
    },
}
