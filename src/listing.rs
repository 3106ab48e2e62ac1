use crate::types::RepoInfo;

pub const PAGE_SIZE: usize = 9;

/// 取得済みリポジトリ一覧に対する検索とページ送りの状態。
#[derive(Debug)]
pub struct Listing {
    repos: Vec<RepoInfo>,
    query: Option<String>,
    page: usize,
}

impl Listing {
    pub fn new(repos: Vec<RepoInfo>) -> Self {
        Self {
            repos,
            query: None,
            page: 1,
        }
    }

    /// 検索クエリを差し替えます。クエリが変わると1ページ目に戻ります。
    pub fn set_query(&mut self, query: Option<&str>) {
        self.query = query
            .map(|q| q.to_ascii_lowercase())
            .filter(|q| !q.is_empty());
        self.page = 1;
    }

    /// 1〜総ページ数の範囲外は拒否し、現在のページを維持します。
    pub fn set_page(&mut self, page: usize) -> bool {
        if (1..=self.total_pages()).contains(&page) {
            self.page = page;
            true
        } else {
            false
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.filtered().len().div_ceil(PAGE_SIZE).max(1)
    }

    pub fn filtered(&self) -> Vec<&RepoInfo> {
        match &self.query {
            None => self.repos.iter().collect(),
            Some(needle) => self
                .repos
                .iter()
                .filter(|repo| repo_matches_query(repo, needle))
                .collect(),
        }
    }

    pub fn current_page(&self) -> Vec<&RepoInfo> {
        self.filtered()
            .into_iter()
            .skip((self.page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect()
    }
}

fn repo_matches_query(repo: &RepoInfo, needle: &str) -> bool {
    let description = repo.description.as_deref().unwrap_or("");

    [repo.name.as_str(), description]
        .iter()
        .map(|value| value.to_ascii_lowercase())
        .any(|value| value.contains(needle))
}
