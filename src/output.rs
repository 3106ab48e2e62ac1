use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Attribute, Cell, Color, Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;

use crate::deps::{SortState, status_label};
use crate::types::{DependencyMap, DependencyRecord, Ecosystem, RepoInfo, SummaryResponse, UserProfile};

pub fn print_user_line(user: &UserProfile) {
    match user.email.as_deref().filter(|email| !email.is_empty()) {
        Some(email) => println!("{} <{email}>", user.display_name()),
        None => println!("{}", user.display_name()),
    }
}

pub fn print_repo_table(repos: &[&RepoInfo]) {
    if repos.is_empty() {
        println!("リポジトリは見つかりませんでした。");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec![
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Description").add_attribute(Attribute::Bold),
        Cell::new("Language").add_attribute(Attribute::Bold),
        Cell::new("Stars").add_attribute(Attribute::Bold),
        Cell::new("Forks").add_attribute(Attribute::Bold),
        Cell::new("URL").add_attribute(Attribute::Bold),
    ]);

    for repo in repos {
        let description = repo
            .description
            .as_deref()
            .unwrap_or("No description available");

        table.add_row(vec![
            Cell::new(&repo.name).add_attribute(Attribute::Bold),
            Cell::new(shorten_text(description, 48)),
            Cell::new(repo.language.as_deref().unwrap_or("-")),
            Cell::new(repo.stargazers_count).fg(Color::Cyan),
            Cell::new(repo.forks_count).fg(Color::Cyan),
            Cell::new(shorten_text(&repo.html_url, 60)),
        ]);
    }

    println!("{table}");
}

pub fn print_dependency_table(ecosystem: Ecosystem, deps: &DependencyMap, sort: &SortState) {
    println!("{} Dependencies ({}件)", ecosystem.title(), deps.len());

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec![
        Cell::new("Package").add_attribute(Attribute::Bold),
        Cell::new("Current Version").add_attribute(Attribute::Bold),
        Cell::new("Latest Version").add_attribute(Attribute::Bold),
        Cell::new("Status").add_attribute(Attribute::Bold),
    ]);

    for (name, record) in sort.sorted_entries(deps) {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(&record.current),
            Cell::new(&record.latest),
            status_cell(record),
        ]);
    }

    println!("{table}");
}

fn status_cell(record: &DependencyRecord) -> Cell {
    let cell = Cell::new(status_label(record)).add_attribute(Attribute::Bold);
    if record.is_up_to_date() {
        cell.fg(Color::Green)
    } else {
        cell.fg(Color::Yellow)
    }
}

pub fn print_summary(repo: &str, summary: &SummaryResponse) {
    println!(
        "Repository Summary: {}",
        summary.repo_name.as_deref().unwrap_or(repo)
    );
    if let Some(languages) = summary.languages.as_deref().filter(|l| !l.is_empty()) {
        println!("Languages: {}", languages.join(", "));
    }
    println!();
    println!("{}", summary.content);
}

fn shorten_text(text: &str, max_chars: usize) -> String {
    let mut buf = String::new();
    for (idx, ch) in text.chars().enumerate() {
        if idx >= max_chars {
            buf.push_str("...");
            return buf;
        }
        buf.push(ch);
    }
    buf
}

pub fn output_json<T: Serialize>(
    value: &T,
    print_json: bool,
    output_path: Option<&Path>,
) -> Result<()> {
    if !print_json && output_path.is_none() {
        return Ok(());
    }

    let json = serde_json::to_string_pretty(value)?;
    if let Some(path) = output_path {
        fs::write(path, &json)
            .with_context(|| format!("JSONファイルの書き込みに失敗: {}", path.display()))?;
        println!("JSONを{}に書き出しました。", path.display());
    }

    if print_json {
        println!("JSON出力:\n{json}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorten_text_truncates_long_values() {
        assert_eq!(shorten_text("short", 10), "short");
        assert_eq!(shorten_text("abcdefghij", 5), "abcde...");
    }
}
