use clap::ValueEnum;

use crate::types::{DependencyMap, DependencyRecord, UpdateRequest};

pub fn outdated_subset(deps: &DependencyMap) -> DependencyMap {
    deps.iter()
        .filter(|(_, record)| !record.is_up_to_date())
        .map(|(name, record)| (name.clone(), record.clone()))
        .collect()
}

/// 古いレコードがひとつもなければNoneを返し、ネットワーク送信は発生しません。
/// file_pathは最初に見つかった古いレコードのものをバッチ全体に適用します。
pub fn build_update_request(deps: &DependencyMap) -> Option<UpdateRequest> {
    let updates = outdated_subset(deps);
    let file_path = updates.values().next()?.file_path.clone();
    Some(UpdateRequest { file_path, updates })
}

pub fn status_label(record: &DependencyRecord) -> &'static str {
    if record.is_up_to_date() {
        "Up to date"
    } else {
        "Update available"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Default)]
pub struct SortState {
    pub field: Option<SortField>,
    pub order: SortOrder,
}

impl SortState {
    /// 選択中の列を再度選ぶと昇順と降順が切り替わり、別の列を選ぶと昇順で有効になります。
    pub fn toggle(&mut self, field: SortField) {
        if self.field == Some(field) {
            self.order = self.order.flipped();
        } else {
            self.field = Some(field);
            self.order = SortOrder::Asc;
        }
    }

    /// ソート対象の列が未選択であれば受信順のまま返します。昇順は更新可能な
    /// レコードが先、最新のレコードが後になります。
    pub fn sorted_entries<'a>(&self, deps: &'a DependencyMap) -> Vec<(&'a str, &'a DependencyRecord)> {
        let mut entries: Vec<(&str, &DependencyRecord)> =
            deps.iter().map(|(name, record)| (name.as_str(), record)).collect();

        if let Some(SortField::Status) = self.field {
            entries.sort_by(|a, b| {
                let ordering = a.1.is_up_to_date().cmp(&b.1.is_up_to_date());
                match self.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(current: &str, latest: &str, file_path: &str) -> DependencyRecord {
        DependencyRecord {
            current: current.to_string(),
            latest: latest.to_string(),
            file_path: file_path.to_string(),
        }
    }

    fn sample_map() -> DependencyMap {
        DependencyMap::from([
            ("react".to_string(), record("17.0.2", "18.2.0", "package.json")),
            ("axios".to_string(), record("1.6.0", "1.6.0", "package.json")),
            (
                "lodash".to_string(),
                record("4.17.20", "4.17.21", "web/package.json"),
            ),
        ])
    }

    #[test]
    fn outdated_subset_keeps_only_stale_records() {
        let subset = outdated_subset(&sample_map());
        let keys: Vec<&String> = subset.keys().collect();
        assert_eq!(keys, ["react", "lodash"]);
        assert_eq!(subset["react"], record("17.0.2", "18.2.0", "package.json"));
    }

    #[test]
    fn outdated_subset_is_idempotent() {
        let first = outdated_subset(&sample_map());
        let second = outdated_subset(&first);
        assert_eq!(first, second);
    }

    #[test]
    fn outdated_subset_of_empty_map_is_empty() {
        assert!(outdated_subset(&DependencyMap::new()).is_empty());
    }

    #[test]
    fn status_label_uses_string_equality() {
        assert_eq!(status_label(&record("1.0.0", "1.0.0", "package.json")), "Up to date");
        assert_eq!(
            status_label(&record("1.0.0", "2.0.0", "package.json")),
            "Update available"
        );
    }

    #[test]
    fn update_request_is_skipped_when_everything_is_current() {
        let deps = DependencyMap::from([
            ("axios".to_string(), record("1.6.0", "1.6.0", "package.json")),
            ("react".to_string(), record("18.2.0", "18.2.0", "package.json")),
        ]);
        assert!(build_update_request(&deps).is_none());
    }

    #[test]
    fn update_request_takes_file_path_from_first_stale_record() {
        let request = build_update_request(&sample_map()).unwrap();
        assert_eq!(request.file_path, "package.json");
        assert_eq!(request.updates.len(), 2);
        assert!(request.updates.contains_key("react"));
        assert!(request.updates.contains_key("lodash"));
        assert!(!request.updates.contains_key("axios"));
    }

    #[test]
    fn toggle_starts_ascending_then_flips() {
        let mut state = SortState::default();
        assert_eq!(state.field, None);

        state.toggle(SortField::Status);
        assert_eq!(state.field, Some(SortField::Status));
        assert_eq!(state.order, SortOrder::Asc);

        state.toggle(SortField::Status);
        assert_eq!(state.order, SortOrder::Desc);

        state.toggle(SortField::Status);
        assert_eq!(state.order, SortOrder::Asc);
    }

    #[test]
    fn ascending_status_sort_puts_stale_records_first() {
        let deps = sample_map();
        let mut state = SortState::default();
        state.toggle(SortField::Status);

        let names: Vec<&str> = state.sorted_entries(&deps).iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["react", "lodash", "axios"]);

        state.toggle(SortField::Status);
        let names: Vec<&str> = state.sorted_entries(&deps).iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["axios", "react", "lodash"]);
    }

    #[test]
    fn no_active_sort_keeps_arrival_order() {
        let deps = sample_map();
        let state = SortState::default();
        let names: Vec<&str> = state.sorted_entries(&deps).iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["react", "axios", "lodash"]);
    }
}
