use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

/// ネットワーク待ちの間スピナーを表示します。成功時は完了メッセージを残し、
/// 失敗時はスピナーを消してエラー表示に道を譲ります。
pub fn with_spinner<T, F>(message: &str, action: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_chars("|/-\\ "),
    );
    spinner.set_message(message.to_string());

    let result = action();
    match &result {
        Ok(_) => spinner.finish_with_message(format!("{message} 完了")),
        Err(_) => spinner.finish_and_clear(),
    }
    result
}
