use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use cxaudit_core::{Audit, Tier, COMPANIES};
use std::time::Duration;

const LOADING_STEPS: [&str; 5] = [
    "Scanning website...",
    "Analyzing app reviews...",
    "Assessing AI readiness...",
    "Evaluating accessibility...",
    "Generating report...",
];

/// Each scripted step is shown for this long, independent of how fast
/// the backend answers; the result renders only after both finish.
const STEP_DURATION: Duration = Duration::from_millis(1800);

#[derive(Parser)]
#[command(name = "cxaudit")]
#[command(about = "CX audit client - AI-synthesized customer experience audits", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the audit API server
    #[arg(long, global = true, env = "CXAUDIT_SERVER", default_value = "http://127.0.0.1:3000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate (or fetch a cached) audit for a company
    Audit {
        /// Allow-listed company id, e.g. "wells-fargo"
        company_id: String,
    },

    /// List the companies eligible for auditing
    Companies,
}

/// Client-side view states. Idle is the shell prompt itself; the run
/// enters loading immediately and resolves to ready or error.
enum ViewState {
    Loading,
    Error(String),
    Ready(Box<Audit>),
}

impl ViewState {
    fn heading(&self) -> &'static str {
        match self {
            ViewState::Loading => "Generating CX Audit",
            ViewState::Error(_) => "Audit failed",
            ViewState::Ready(_) => "Audit ready",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Audit { company_id } => run_audit(&cli.server, &company_id).await,
        Commands::Companies => {
            list_companies();
            Ok(())
        }
    }
}

async fn run_audit(server: &str, company_id: &str) -> Result<()> {
    let state = ViewState::Loading;
    println!("{}", state.heading().bold());
    println!("Analyzing customer experience across multiple dimensions\n");

    // The scripted sequence and the request run as independent tasks;
    // both are awaited before the transition out of loading.
    let (response, _script) = tokio::join!(
        request_audit(server, company_id),
        run_loading_script(),
    );

    let state = match response {
        Ok(audit) => ViewState::Ready(Box::new(audit)),
        Err(e) => ViewState::Error(e.to_string()),
    };

    match state {
        ViewState::Ready(audit) => {
            render_audit(&audit);
            Ok(())
        }
        ViewState::Error(message) => {
            eprintln!("\n{} {}", "error:".red().bold(), message);
            std::process::exit(1);
        }
        ViewState::Loading => unreachable!("loading resolves to ready or error"),
    }
}

async fn run_loading_script() {
    for step in LOADING_STEPS {
        println!("  {} {}", "•".cyan(), step);
        tokio::time::sleep(STEP_DURATION).await;
    }
    println!("  {} Finalizing report...", "•".cyan());
}

async fn request_audit(server: &str, company_id: &str) -> Result<Audit> {
    let client = reqwest::Client::new();
    let url = format!("{}/api/generate-audit", server.trim_end_matches('/'));
    let response = client
        .post(&url)
        .json(&serde_json::json!({ "company": { "id": company_id } }))
        .send()
        .await
        .with_context(|| format!("request to {} failed", url))?;

    let status = response.status();
    if !status.is_success() {
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        let message = body["error"].as_str().unwrap_or("request failed").to_string();
        return Err(anyhow!("{} ({})", message, status));
    }

    response
        .json::<Audit>()
        .await
        .context("failed to parse audit response")
}

fn list_companies() {
    println!("{}", "Companies eligible for auditing:".bold());
    for company in COMPANIES.iter() {
        println!(
            "  {:<18} {:<20} {:<22} {}",
            company.id.cyan(),
            company.name,
            company.website.dimmed(),
            company.sector
        );
    }
}

fn render_audit(audit: &Audit) {
    let tier_label = match audit.tier {
        Tier::Strong => audit.tier.label().green().bold(),
        Tier::Adequate => audit.tier.label().yellow().bold(),
        Tier::NeedsWork => audit.tier.label().red().bold(),
    };

    println!();
    println!(
        "{}  {} ({})",
        audit.company.name.bold(),
        audit.company.website.dimmed(),
        audit.company.sector
    );
    println!(
        "Generated {}",
        audit.generated_at.format("%B %-d, %Y").to_string().dimmed()
    );
    println!();
    println!(
        "  Overall: {} {}  {}",
        audit.overall_score.to_string().bold(),
        score_gauge(audit.overall_score),
        tier_label
    );
    println!();

    for category in &audit.categories {
        println!(
            "  {:<24} {:>3}  {}  ({}%)",
            category.label,
            category.score,
            score_gauge(category.score),
            category.weight
        );
        for finding in &category.findings {
            println!("      {} {}", "-".dimmed(), finding.observation);
            println!("        {} {}", "why:".dimmed(), finding.why_it_matters);
            println!("        {} {}", "evidence:".dimmed(), finding.evidence);
        }
    }

    println!();
    println!("  {}", "Recommendations".bold());
    for (i, rec) in audit.recommendations.iter().enumerate() {
        println!("    {}. {}", i + 1, rec.title.bold());
        println!("       {}", rec.description);
    }

    println!();
    println!("  {}", "Methodology".bold().dimmed());
    println!(
        "  {}",
        "Weighted categories: AI readiness 25%, mobile app 25%, customer sentiment 20%, \
         web experience 15%, accessibility 15%. Tiers: strong >= 75, adequate 50-74, \
         needs work < 50. Sources: homepage content and PageSpeed Insights (mobile). \
         Audits are cached for 7 days."
            .dimmed()
    );
}

/// Ten-segment bar for a 0-100 score.
fn score_gauge(score: u8) -> String {
    let filled = (score as usize + 5) / 10;
    let filled = filled.min(10);
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauge_spans_the_score_range() {
        assert_eq!(score_gauge(0), "░░░░░░░░░░");
        assert_eq!(score_gauge(100), "██████████");
        assert_eq!(score_gauge(62), "██████░░░░");
    }

    #[test]
    fn loading_script_has_five_steps() {
        assert_eq!(LOADING_STEPS.len(), 5);
        assert_eq!(STEP_DURATION, Duration::from_millis(1800));
    }
}
