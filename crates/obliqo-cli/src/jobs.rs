//! Job feed command handlers for the CLI.

use std::io::Write;

use clap::Subcommand;
use obliqo_client::{JobFeedQuery, ObliqoClient};
use obliqo_core::{AppConfig, Decision, JobFeed, JobMatch, ScoreCounter};

/// Sub-commands available under `jobs`.
#[derive(Debug, Subcommand)]
pub enum JobsCommands {
    /// List scored matches, best first
    List {
        #[arg(long, default_value = "1")]
        page: u32,
        /// Jobs per page (defaults to OBLIQO_PAGE_SIZE)
        #[arg(long)]
        page_size: Option<u32>,
        /// Only show jobs with this decision (Apply, Wait, Skip, Avoid)
        #[arg(long)]
        decision: Option<Decision>,
    },
    /// Show the full match breakdown for one job
    Show {
        /// Job id or link, as printed by `jobs list`
        id: String,
        /// Count the fit score up instead of printing it at once
        #[arg(long)]
        animate: bool,
    },
}

/// Dispatches a `jobs` sub-command.
///
/// # Errors
///
/// Returns an error if the API call fails, for example when no profile has
/// been saved yet.
pub(crate) async fn run(
    client: &ObliqoClient,
    config: &AppConfig,
    command: JobsCommands,
) -> anyhow::Result<()> {
    match command {
        JobsCommands::List {
            page,
            page_size,
            decision,
        } => {
            let query = JobFeedQuery {
                page,
                page_size: page_size.unwrap_or(config.page_size),
                decision,
            };
            run_list(client, &query).await
        }
        JobsCommands::Show { id, animate } => run_show(client, &id, animate).await,
    }
}

async fn run_list(client: &ObliqoClient, query: &JobFeedQuery) -> anyhow::Result<()> {
    let response = client.get_job_feed(query).await?;

    let mut feed = JobFeed::new();
    feed.replace(response.jobs);

    if feed.jobs().is_empty() {
        println!(
            "no jobs found{}",
            query
                .decision
                .map(|d| format!(" with decision {d}"))
                .unwrap_or_default()
        );
        return Ok(());
    }

    println!(
        "{:<7}{:<10}{:<42}{:<26}ID",
        "FIT", "DECISION", "TITLE", "COMPANY"
    );
    for job in feed.jobs() {
        let normalized = job.normalized();
        println!(
            "{:<7}{:<10}{:<42}{:<26}{}",
            format!("{:.0}%", job.fit_score),
            job.decision.as_str(),
            truncate(&normalized.title, 40),
            truncate(&normalized.company, 24),
            normalized.id
        );
    }

    println!();
    println!(
        "page {} of {} ({} jobs)",
        response.page,
        total_pages(response.total_count, response.page_size),
        response.total_count
    );
    if let Some(top) = feed.selected() {
        let normalized = top.normalized();
        println!(
            "top match: {} at {} ({})",
            normalized.title,
            normalized.company,
            top.fit_band().label()
        );
    }
    Ok(())
}

async fn run_show(client: &ObliqoClient, id: &str, animate: bool) -> anyhow::Result<()> {
    let job = client.get_job_detail(id).await?;
    let normalized = job.normalized();

    println!("{} - {}", normalized.title, normalized.company);
    if let Some(location) = &normalized.location {
        println!("location:    {location}{}", if normalized.is_remote { " (remote)" } else { "" });
    }
    if let Some(stipend) = &normalized.stipend {
        println!("stipend:     {stipend}");
    }
    if let Some(link) = &normalized.link {
        println!("link:        {link}");
    }
    if !normalized.skills.is_empty() {
        println!("skills:      {}", normalized.skills.join(", "));
    }
    println!();

    if animate {
        animate_score(job.fit_score).await?;
    } else {
        println!("Fit score: {:.0}%", job.fit_score);
    }
    print_breakdown(&job);
    Ok(())
}

/// Counts the fit score up on one terminal line, one frame per tick.
async fn animate_score(score: f64) -> anyhow::Result<()> {
    let mut ticker = tokio::time::interval(ScoreCounter::frame_interval());
    let mut stdout = std::io::stdout();
    for value in ScoreCounter::new(score) {
        ticker.tick().await;
        write!(stdout, "\rFit score: {value:.0}%")?;
        stdout.flush()?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn print_breakdown(job: &JobMatch) {
    println!(
        "Decision:  {} ({}, {} fit)",
        job.decision,
        job.decision.describe(),
        job.fit_band().label()
    );
    if !job.decision_reason.is_empty() {
        println!("Reason:    {}", job.decision_reason);
    }
    println!("Competition: {}   Career impact: {}", job.competition_level, job.career_impact);

    let explanation = &job.explanation;
    print_list("Matched skills", &explanation.matched_skills);
    print_list("Missing skills", &explanation.missing_skills);
    print_list("Strengths", &explanation.strengths);
    print_list("Risk factors", &explanation.risk_factors);

    if !explanation.skill_gaps.is_empty() {
        println!();
        println!("Skill gaps:");
        println!("  {:<24}{:<12}TIME TO LEARN", "SKILL", "IMPORTANCE");
        for gap in &explanation.skill_gaps {
            println!(
                "  {:<24}{:<12}{}",
                gap.skill, gap.importance, gap.estimated_learning_time
            );
            for resource in &gap.resources {
                println!("    - {resource}");
            }
        }
    }
}

fn print_list(label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{label}:");
    for item in items {
        println!("  - {item}");
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() > max_chars {
        format!("{}...", value.chars().take(max_chars - 3).collect::<String>())
    } else {
        value.to_owned()
    }
}

fn total_pages(total_count: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(u64::from(page_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_values() {
        assert_eq!(truncate("Initech", 24), "Initech");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        let long = "Ingénieur logiciel backend junior";
        let cut = truncate(long, 12);
        assert_eq!(cut.chars().count(), 12);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(5, 0), 0);
    }
}
