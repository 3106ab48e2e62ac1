use clap::ValueEnum;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// パッケージ名をキーとする依存関係マップ。APIが返した並び順を保持します。
pub type DependencyMap = IndexMap<String, DependencyRecord>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    pub current: String,
    pub latest: String,
    pub file_path: String,
}

impl DependencyRecord {
    pub fn is_up_to_date(&self) -> bool {
        self.current == self.latest
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyReport {
    #[serde(default)]
    pub npm: Option<DependencyMap>,
    #[serde(default)]
    pub pip: Option<DependencyMap>,
}

impl DependencyReport {
    pub fn ecosystem(&self, ecosystem: Ecosystem) -> Option<&DependencyMap> {
        match ecosystem {
            Ecosystem::Npm => self.npm.as_ref(),
            Ecosystem::Pip => self.pip.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.npm.is_none() && self.pip.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Ecosystem {
    Npm,
    Pip,
}

impl Ecosystem {
    pub fn title(self) -> &'static str {
        match self {
            Ecosystem::Npm => "NPM",
            Ecosystem::Pip => "Python",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateRequest {
    pub file_path: String,
    pub updates: DependencyMap,
}

#[derive(Debug, Deserialize)]
pub struct UpdateResult {
    pub pr_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoInfo {
    #[allow(dead_code)]
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.login)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
pub struct SummaryResponse {
    pub content: String,
    #[serde(default)]
    pub repo_name: Option<String>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_to_date_is_plain_string_equality() {
        let current = DependencyRecord {
            current: "1.0.0".to_string(),
            latest: "1.0.0".to_string(),
            file_path: "package.json".to_string(),
        };
        let stale = DependencyRecord {
            current: "1.0.0".to_string(),
            latest: "2.0.0".to_string(),
            file_path: "package.json".to_string(),
        };
        assert!(current.is_up_to_date());
        assert!(!stale.is_up_to_date());
    }

    #[test]
    fn dependency_map_preserves_arrival_order() {
        let json = r#"{
            "npm": {
                "zod": {"current": "3.22.0", "latest": "3.23.8", "file_path": "package.json"},
                "axios": {"current": "1.6.0", "latest": "1.6.0", "file_path": "package.json"}
            }
        }"#;
        let report: DependencyReport = serde_json::from_str(json).unwrap();
        let keys: Vec<&String> = report.npm.as_ref().unwrap().keys().collect();
        assert_eq!(keys, ["zod", "axios"]);
        assert!(report.pip.is_none());
        assert!(!report.is_empty());
    }

    #[test]
    fn display_name_falls_back_to_login() {
        let mut user = UserProfile {
            id: 1,
            login: "octocat".to_string(),
            name: Some("The Octocat".to_string()),
            avatar_url: None,
            email: None,
        };
        assert_eq!(user.display_name(), "The Octocat");

        user.name = Some(String::new());
        assert_eq!(user.display_name(), "octocat");

        user.name = None;
        assert_eq!(user.display_name(), "octocat");
    }
}
