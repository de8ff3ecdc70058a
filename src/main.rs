use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;
mod config;
mod format;
mod i18n;
mod links;
mod panel;
mod ui;

use app::TimeRange;
use config::{AppConfig, CliOverrides};
use i18n::Locale;
use panel::{Endpoints, InitialData, PanelClient};
use ui::theme::Theme;

const DEBUG_LOG_DEFAULT: &str = "/tmp/subdash-debug.log";

#[derive(Parser)]
#[command(name = "subdash")]
#[command(version = "0.1.0")]
#[command(about = "Terminal dashboard for a proxy panel subscription", long_about = None)]
struct Cli {
    /// Subscription URL, e.g. https://panel.example.com/sub/TOKEN
    #[arg(short = 'u', long, env = "SUBDASH_URL")]
    url: Option<String>,

    /// Panel origin used for API calls instead of the URL's own
    #[arg(long, env = "SUBDASH_PANEL_DOMAIN")]
    panel_domain: Option<String>,

    /// UI language (en, fa, ru, zh)
    #[arg(long, value_parser = parse_locale)]
    locale: Option<Locale>,

    /// Color theme (dark, light, dracula, nord)
    #[arg(long, value_parser = parse_theme)]
    theme: Option<Theme>,

    /// Usage chart window (12h, 24h, 7d, 30d, 90d)
    #[arg(long, value_parser = parse_time_range)]
    time_range: Option<TimeRange>,

    /// JSON file with `{ user, links, apps }` shown before the first fetch
    #[arg(long)]
    initial_data: Option<PathBuf>,

    /// Fetch once and print a summary instead of starting the TUI
    #[arg(long)]
    print: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_locale(s: &str) -> Result<Locale, String> {
    Locale::from_str(s).ok_or_else(|| format!("unsupported locale '{}'", s))
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    Theme::from_str(s).ok_or_else(|| format!("unknown theme '{}'", s))
}

fn parse_time_range(s: &str) -> Result<TimeRange, String> {
    TimeRange::from_str(s).ok_or_else(|| format!("unknown time range '{}'", s))
}

/// `--log-file`, then `SUBDASH_DEBUG_LOG`, then `SUBDASH_DEBUG=1`
fn log_path(cli: &Cli) -> Option<PathBuf> {
    if let Some(path) = &cli.log_file {
        return Some(path.clone());
    }
    if let Ok(path) = std::env::var("SUBDASH_DEBUG_LOG") {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    if let Ok(enabled) = std::env::var("SUBDASH_DEBUG") {
        let enabled = enabled.to_ascii_lowercase();
        if enabled == "1" || enabled == "true" || enabled == "yes" {
            return Some(PathBuf::from(DEBUG_LOG_DEFAULT));
        }
    }
    None
}

/// File-only tracing; the terminal belongs to the TUI. Nothing is logged
/// unless a log path is configured.
fn setup_tracing(cli: &Cli) -> Option<WorkerGuard> {
    let path = log_path(cli)?;

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("subdash={log_level}")));

    let log_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("."));
    let log_filename = path
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("subdash.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = setup_tracing(&cli);

    // Load or create config
    let mut config = AppConfig::load().unwrap_or_else(|err| {
        warn!(error = %err, "ignoring unreadable config");
        AppConfig::default()
    });

    config.merge_cli(CliOverrides {
        subscription_url: cli.url.clone(),
        panel_domain: cli.panel_domain.clone(),
        locale: cli.locale,
        theme: cli.theme,
        time_range: cli.time_range,
        initial_data_path: cli.initial_data.clone(),
    });

    let url = config.subscription_url.clone().context(
        "No subscription URL configured: pass --url or set SUBDASH_URL",
    )?;
    let endpoints = Endpoints::from_subscription_url(&url, config.panel_domain.as_deref())?;
    let initial = config.load_initial_data()?;

    // Save config for next time
    if let Err(err) = config.save() {
        warn!(error = %err, "failed to save config");
    }

    info!(base = endpoints.base(), "starting");
    let client = PanelClient::new(endpoints)?;

    if cli.print {
        return print_summary(&config, &client, initial).await;
    }

    ui::run(&mut config, client, initial).await
}

async fn print_summary(config: &AppConfig, client: &PanelClient, initial: InitialData) -> Result<()> {
    use crate::format::{
        format_bytes, format_compact_date, format_relative_expiry, format_time_ago, on_hold_expiry,
        usage_percentage,
    };
    use crate::i18n::Translate;
    use crate::links::{filter_config_links, links_from_text, parse_links};
    use crate::panel::UserStatus;

    let t = config.translator();
    let now = Utc::now();
    let endpoints = client.endpoints();

    println!("{}: {}", t.t("config.subscriptionLink"), endpoints.subscription_url());

    // User info
    println!("\nFetching {}...", endpoints.info_url());
    let user = match client.get_user_info().await {
        Ok(user) => user,
        Err(e) => match initial.user.clone() {
            Some(user) => {
                eprintln!("✗ {} (showing embedded data)", e);
                user
            }
            None => {
                eprintln!("✗ {}", e);
                std::process::exit(1);
            }
        },
    };

    println!(
        "✓ {} [{}]",
        user.username,
        t.t(&format!("status.{}", user.status.as_str()))
    );
    let limit = if user.is_unlimited_traffic() {
        t.t("userInfo.unlimited")
    } else {
        format_bytes(user.data_limit as f64)
    };
    println!(
        "  {}: {} / {} ({:.1}%)",
        t.t("userInfo.used"),
        format_bytes(user.used_traffic as f64),
        limit,
        usage_percentage(user.used_traffic, user.data_limit)
    );
    println!(
        "  {}: {}",
        t.t("userInfo.remaining"),
        user.remaining_traffic()
            .map(|b| format_bytes(b as f64))
            .unwrap_or_else(|| "∞".to_string())
    );
    let expiry = if user.status == UserStatus::OnHold {
        on_hold_expiry(user.on_hold_expire_duration, &t)
    } else {
        format_relative_expiry(user.expire.as_ref().filter(|e| !e.is_unset()), now, &t)
    };
    println!("  {}: {}", expiry.status, expiry.time);
    println!(
        "  {}: {}",
        t.t("userInfo.lastOnline"),
        format_time_ago(user.online_at.as_ref(), now, &t).text
    );

    // Links
    let seeded = initial
        .links
        .clone()
        .map(filter_config_links)
        .filter(|links| !links.is_empty());
    let links = match seeded {
        Some(links) => Ok(links),
        None => {
            println!("\nFetching {}...", endpoints.links_url());
            client.get_links_text().await.map(|body| links_from_text(&body))
        }
    };
    match links {
        Ok(links) => {
            println!("✓ {} ({}):", t.t("config.title"), links.len());
            for link in parse_links(&links) {
                let endpoint = match (&link.server, &link.port) {
                    (Some(server), Some(port)) => format!(" ({}:{})", server, port),
                    (Some(server), None) => format!(" ({})", server),
                    _ => String::new(),
                };
                println!("  - [{}] {}{}", link.protocol.as_str(), link.name, endpoint);
            }
        }
        Err(e) => eprintln!("✗ {}", e),
    }

    // Usage
    let (start, period) = config.time_range.window(now);
    println!(
        "\nFetching usage ({}, since {})...",
        config.time_range.as_str(),
        format_compact_date(&start.with_timezone(&Local), t.locale.date_tag())
    );
    match client.get_usage(start, period).await {
        Ok(chart) => println!(
            "✓ {}: {}",
            t.t("usage.totalUsage"),
            format_bytes(chart.total_traffic() as f64)
        ),
        Err(e) => eprintln!("✗ {}", e),
    }

    // Apps
    let apps = match initial.apps.filter(|apps| !apps.is_empty()) {
        Some(apps) => Ok(apps),
        None => client.get_apps().await,
    };
    match apps {
        Ok(apps) => {
            println!("\n✓ {} ({}):", t.t("apps.title"), apps.len());
            let os = app::platform::OperatingSystem::detect();
            for group in app::platform::group_apps(&apps, os) {
                let names: Vec<_> = group.apps.iter().map(|a| a.name.as_str()).collect();
                println!(
                    "  {}: {}",
                    t.t(&format!("apps.platform.{}", group.platform)),
                    names.join(", ")
                );
            }
        }
        Err(e) => eprintln!("\n✗ {}", e),
    }

    Ok(())
}
