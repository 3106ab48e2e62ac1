use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::UserProfile;

/// ログインで作成され、ログアウトで破棄される認証セッション。
/// トークンとユーザープロファイルを設定ディレクトリ配下のJSONに保持します。
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    data: SessionData,
    dirty: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionData {
    version: u8,
    access_token: Option<String>,
    user: Option<UserProfile>,
}

impl Default for SessionData {
    fn default() -> Self {
        Self {
            version: 1,
            access_token: None,
            user: None,
        }
    }
}

impl Session {
    pub fn load() -> Result<Self> {
        Self::load_from(default_session_path())
    }

    pub fn load_from(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("セッションディレクトリの作成に失敗: {}", parent.display())
            })?;
        }

        let data = if path.exists() {
            let content = fs::read_to_string(&path).with_context(|| {
                format!("セッションファイルの読み込みに失敗: {}", path.display())
            })?;
            serde_json::from_str(&content).with_context(|| {
                format!("セッションファイルの解析に失敗: {}", path.display())
            })?
        } else {
            SessionData::default()
        };

        Ok(Self {
            path,
            data,
            dirty: false,
        })
    }

    pub fn is_logged_in(&self) -> bool {
        self.data.access_token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.data.access_token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.data.user.as_ref()
    }

    pub fn store(&mut self, access_token: String, user: UserProfile) {
        self.data.access_token = Some(access_token);
        self.data.user = Some(user);
        self.dirty = true;
    }

    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .context("セッションのJSON化に失敗しました")?;
        fs::write(&self.path, json).with_context(|| {
            format!("セッションファイルの書き込みに失敗: {}", self.path.display())
        })?;
        self.dirty = false;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).with_context(|| {
                format!("セッションファイルの削除に失敗: {}", self.path.display())
            })?;
        }
        self.data = SessionData::default();
        self.dirty = false;
        Ok(())
    }
}

fn default_session_path() -> PathBuf {
    if let Some(dir) = dirs::config_dir() {
        dir.join("repo-scout").join("session.json")
    } else {
        Path::new(".repo-scout-session.json").to_path_buf()
    }
}
