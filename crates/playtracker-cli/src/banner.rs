use std::path::Path;

use playtracker_config::AppConfig;

/// Print the startup banner with the address and storage summary.
pub fn print_banner(config: &AppConfig, config_path: &Path) {
    for line in banner_lines(config, config_path) {
        println!("{line}");
    }
}

fn banner_lines(config: &AppConfig, config_path: &Path) -> Vec<String> {
    let version = env!("CARGO_PKG_VERSION");
    let url = format!("http://{}:{}", config.server.host, config.server.port);

    let width = 70;
    let label_w = 12;
    let value_w = width - label_w - 4; // "│  " + "│"

    let title = format!("Play Tracker v{version}");
    let title_dashes = width - 2 - title.chars().count() - 5; // ╭╮ and "─── " + " "
    let top = format!("╭─── {title} {}╮", "─".repeat(title_dashes));
    let bottom = format!("╰{}╯", "─".repeat(width - 2));

    let row = |label: &str, value: &str| {
        format!(
            "│  {:<label_w$}{:<value_w$}│",
            label,
            truncate(value, value_w)
        )
    };

    vec![
        top,
        row("", ""),
        row("", &config.web.site_title),
        row("", ""),
        row("Listening", &url),
        row("Database", &tilde(&config.database.path)),
        row("Migrations", &tilde(&config.database.migrations_dir)),
        row("Config", &tilde(config_path)),
        row("", ""),
        row("", "Press Ctrl+C to stop"),
        bottom,
    ]
}

fn tilde(path: &Path) -> String {
    let shown = path.to_string_lossy().to_string();
    match dirs::home_dir() {
        Some(home) if !home.as_os_str().is_empty() => {
            shown.replace(&*home.to_string_lossy(), "~")
        }
        _ => shown,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}
