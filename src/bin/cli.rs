//! EHR Dashboard CLI
//!
//! Command-line interface for dashboard operations:
//! - Validate registration fields
//! - List patients and notifications from a running API server
//! - Check server status
//! - Simulate an idle-session countdown locally

use clap::{Parser, Subcommand};
use ehr_dashboard::compliance::{mask, MaskKind};
use ehr_dashboard::registration::{validate_field_today, Field};
use ehr_dashboard::session::{SessionConfig, SessionEvent, SessionMonitor};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "ehr-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Clinical dashboard tooling")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8086", global = true)]
    pub api_url: String,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate one registration field value
    Validate {
        /// Field name, e.g. email, zipCode, dateOfBirth
        field: String,
        /// Value to check
        value: String,
    },

    /// Mask a sensitive value for display
    Mask {
        value: String,
        /// ssn, phone, email or custom
        #[arg(short, long, default_value = "custom")]
        kind: String,
        /// Characters left visible for custom masking
        #[arg(long, default_value = "4")]
        show: usize,
    },

    /// List patients
    Patients {
        /// Search name, MRN or condition
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by status (stable, caution, critical, inactive)
        #[arg(long)]
        status: Option<String>,
    },

    /// List notifications
    Notifications {
        /// all, unread, critical or starred
        #[arg(long, default_value = "all")]
        filter: String,
    },

    /// Show server status
    Status,

    /// Run a session countdown locally, printing every notice
    Session {
        /// Idle timeout in minutes
        #[arg(long, default_value = "20")]
        timeout: u64,
        /// Warning lead time in minutes
        #[arg(long, default_value = "5")]
        warning: u64,
        /// Real milliseconds per simulated second
        #[arg(long, default_value = "1")]
        tick_ms: u64,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Validate { field, value } => {
            let field: Field = match field.parse() {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("{}", e);
                    eprintln!();
                    eprintln!("Known fields:");
                    for f in Field::all() {
                        eprintln!("  {:<24} {}", f.name(), f.label());
                    }
                    std::process::exit(1);
                }
            };

            match validate_field_today(field, &value) {
                None => println!("{}: ok", field.label()),
                Some(message) => {
                    eprintln!("{}: {}", field.label(), message);
                    std::process::exit(1);
                }
            }
        }

        Commands::Mask { value, kind, show } => {
            let kind = match kind.to_lowercase().as_str() {
                "ssn" => MaskKind::Ssn,
                "phone" => MaskKind::Phone,
                "email" => MaskKind::Email,
                "custom" => MaskKind::Custom { show },
                other => {
                    eprintln!("Unknown mask kind: {}. Use ssn, phone, email or custom", other);
                    std::process::exit(1);
                }
            };
            println!("{}", mask(&value, kind));
        }

        Commands::Patients { search, status } => {
            let mut query = Vec::new();
            if let Some(search) = &search {
                query.push(("search", search.as_str()));
            }
            if let Some(status) = &status {
                query.push(("status", status.as_str()));
            }

            let response = client
                .get(format!("{}/api/v1/patients", cli.api_url))
                .query(&query)
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Failed to fetch patients ({}): {}", status, text);
                std::process::exit(1);
            }

            let data: serde_json::Value = response.json().await?;
            let rows = data["patients"].as_array().cloned().unwrap_or_default();

            let columns = ["mrn", "name", "age", "status", "location", "primary_condition"];
            render(&cli.format, &data, &rows, &columns, "No patients match")?;
        }

        Commands::Notifications { filter } => {
            let response = client
                .get(format!("{}/api/v1/notifications", cli.api_url))
                .query(&[("filter", filter.as_str())])
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Failed to fetch notifications ({}): {}", status, text);
                std::process::exit(1);
            }

            let data: serde_json::Value = response.json().await?;
            let rows = data["notifications"].as_array().cloned().unwrap_or_default();

            let columns = ["id", "kind", "title", "timestamp", "read", "starred"];
            render(&cli.format, &data, &rows, &columns, "No notifications")?;

            if cli.format == "table" {
                println!();
                println!(
                    "Unread: {}  Critical: {}",
                    data["counts"]["unread"].as_u64().unwrap_or(0),
                    data["counts"]["critical"].as_u64().unwrap_or(0)
                );
            }
        }

        Commands::Status => {
            let response = client
                .get(format!("{}/health", cli.api_url))
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("EHR Dashboard v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    println!(
                        "Data provider: {}",
                        health["data_provider"].as_str().unwrap_or("unknown")
                    );
                    println!(
                        "Open sessions: {}",
                        health["open_sessions"].as_u64().unwrap_or(0)
                    );

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to EHR dashboard API at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the API server is running:");
                    eprintln!("  cargo run --bin ehr-api");
                    std::process::exit(1);
                }
            }
        }

        Commands::Session {
            timeout,
            warning,
            tick_ms,
        } => {
            let config = SessionConfig::new(timeout, warning)?
                .tick_interval(Duration::from_millis(tick_ms));
            let monitor = SessionMonitor::start(config);
            let mut events = monitor.subscribe();

            println!(
                "Session started: {} min timeout, warning at {} min",
                timeout, warning
            );

            while let Ok(event) = events.recv().await {
                let remaining = monitor.snapshot().await.display;
                match event {
                    SessionEvent::Warning { remaining_secs } => {
                        println!("[{}] Session expiring soon ({}s left)", remaining, remaining_secs)
                    }
                    SessionEvent::Expired { cause } => {
                        println!("[{}] Session expired ({:?})", remaining, cause);
                        break;
                    }
                    other => println!("[{}] {:?}", remaining, other),
                }
            }

            monitor.shutdown();
        }

        Commands::Config { output } => {
            let config = ehr_dashboard::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn cell(row: &serde_json::Value, column: &str) -> String {
    match &row[column] {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

fn render(
    format: &str,
    data: &serde_json::Value,
    rows: &[serde_json::Value],
    columns: &[&str],
    empty: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(data)?),
        "csv" => print_csv(rows, columns)?,
        _ => print_table(rows, columns, empty),
    }
    Ok(())
}

fn print_table(rows: &[serde_json::Value], columns: &[&str], empty: &str) {
    if rows.is_empty() {
        println!("{}", empty);
        return;
    }

    let widths: Vec<usize> = columns
        .iter()
        .map(|c| {
            rows.iter()
                .map(|r| cell(r, c).chars().count())
                .chain(std::iter::once(c.len()))
                .max()
                .unwrap_or(c.len())
                .min(40)
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:<w$}", c, w = *w))
        .collect();
    println!("{}", header.join(" | "));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 3 * (columns.len() - 1)));

    for row in rows {
        let line: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| {
                let value: String = cell(row, c).chars().take(*w).collect();
                format!("{:<w$}", value, w = *w)
            })
            .collect();
        println!("{}", line.join(" | "));
    }
}

fn print_csv(rows: &[serde_json::Value], columns: &[&str]) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(columns)?;
    for row in rows {
        writer.write_record(columns.iter().map(|c| cell(row, c)))?;
    }
    writer.flush()?;
    Ok(())
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}
