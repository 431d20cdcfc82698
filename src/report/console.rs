//! Coloured terminal output

use crate::models::{ProbeOutcome, RunSummary};
use crate::scanner::dispatch::PreparedProbe;
use colored::Colorize;
use tabled::builder::Builder;
use tabled::settings::Style;

const SUCCESS: &str = "✅";
const ERROR: &str = "❌";
const WARNING: &str = "⚠️";
const INFO: &str = "🔹";
const ROCKET: &str = "🚀";
const LIST: &str = "📄";

pub fn print_banner() {
    let banner = r#"
    ╔═══════════════════════════════════════╗
    ║  🔥 SSRF BLIND v0.1.0                ║
    ║  Blind SSRF validation tool          ║
    ╚═══════════════════════════════════════╝
    "#;
    println!("{}", banner.red().bold());
}

pub fn print_success(message: &str) {
    println!("{}", format!("{SUCCESS} {message}").green());
}

pub fn print_error(message: &str) {
    eprintln!("{}", format!("{ERROR} {message}").red());
}

pub fn print_info(message: &str) {
    println!("{}", format!("{INFO} {message}").cyan());
}

pub fn print_warning(message: &str) {
    println!("{}", format!("{WARNING} {message}").yellow());
}

/// Prints what is about to be sent. `total` is set in list mode only.
pub fn print_probe_header(
    probe: &PreparedProbe,
    callback_url: &str,
    targets: &[String],
    number: usize,
    total: Option<usize>,
) {
    if let Some(total) = total {
        println!("\n{}", "═".repeat(60).cyan().bold());
        println!("{}", format!("{LIST} Request {number}/{total}").magenta().bold());
    }
    println!("{} {}", "HTTP Method:".cyan().bold(), probe.method.yellow());
    println!("{} {}", "Target URL:".cyan().bold(), probe.url.white());
    println!("{} {}", "Callback:".cyan().bold(), callback_url.magenta());
    if !targets.is_empty() {
        println!(
            "{} {}",
            "Target Parameters:".cyan().bold(),
            targets.join(", ").yellow()
        );
    }
    println!("\n{}", format!("{ROCKET} Sending SSRF request...").yellow().bold());
}

/// Prints the response status or the failure reason
pub fn print_probe_result(outcome: &ProbeOutcome) {
    match (outcome.status, &outcome.error) {
        (Some(status), _) => {
            let status_text = status.to_string();
            let status_text = if status < 400 {
                status_text.green()
            } else {
                status_text.yellow()
            };
            println!("{} {}", "Response Status:".cyan().bold(), status_text);
        }
        (None, Some(error)) => print_error(&format!("Failed to send request: {error}")),
        (None, None) => print_error("Failed to send request"),
    }
}

/// Prints the closing summary; the counter table is shown in list mode only
pub fn print_summary(summary: &RunSummary, with_counts: bool) {
    println!("\n{}", "═".repeat(60).cyan().bold());
    println!("{}", "SCAN SUMMARY".cyan().bold());
    println!("{}", "═".repeat(60).cyan().bold());

    if with_counts {
        let mut builder = Builder::default();
        builder.push_record(["Requests", "Count"]);
        builder.push_record(["Total URLs processed".to_string(), summary.total_requests.to_string()]);
        builder.push_record(["Successful".to_string(), summary.successful_requests.to_string()]);
        builder.push_record(["Failed".to_string(), summary.failed_requests().to_string()]);

        let mut table = builder.build();
        table.with(Style::rounded());
        println!("{table}");
    }

    if summary.successful_requests > 0 {
        print_success("SSRF testing completed!");
        print_info(&format!("Monitor your callback: {}", summary.callback_url));
    } else {
        print_error("SSRF testing failed or no requests were successful");
    }
}
