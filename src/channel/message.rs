// src/channel/message.rs

//! Notification text shared by every channel.

use chrono::Local;

use crate::watch::NormalizedEvent;

/// Title / subject line ("file change notification").
pub const TITLE: &str = "文件变动通知";

/// Format used for the timestamp line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time as `YYYY-MM-DD HH:MM:SS`.
pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Default body: path, operation and time on separate lines.
pub fn render_body(event: &NormalizedEvent, time: &str) -> String {
    format!(
        "文件路径: {}\n操作类型: {}\n时间: {}",
        event.path, event.operation, time
    )
}

/// Render a user template, substituting `{path}`, `{op}` and `{time}`.
///
/// An empty (or whitespace-only) template falls back to [`render_body`].
pub fn render_template(template: &str, event: &NormalizedEvent, time: &str) -> String {
    if template.trim().is_empty() {
        return render_body(event, time);
    }
    template
        .replace("{path}", &event.path)
        .replace("{op}", event.operation.as_str())
        .replace("{time}", time)
}
