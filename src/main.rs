mod api;
mod assemble;
mod classify;
mod config;
mod db;
mod detect;
mod dom;
mod extractor;
mod legacy;
mod logging;
mod models;
mod modern;
mod selectors;
#[cfg(test)]
mod testdata;

use anyhow::{anyhow, Context, Result};
use api::{request_report, selected_opening, HttpScreeningApi, ScreeningApi};
use clap::{Parser, Subcommand};
use config::{Config, Overrides};
use db::Database;
use extractor::ResumeExtractor;
use models::{ExperienceItem, ResumeRecord};
use scraper::Html;
use std::fs;
use std::path::{Path, PathBuf};

const WRAP_WIDTH: usize = 78;

#[derive(Parser)]
#[command(name = "resdex")]
#[command(about = "Extract structured resume data from saved profile pages and request screening reports")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Database file (overrides RESDEX_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Screening API base URL (overrides RESDEX_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Selector table overrides as JSON (overrides RESDEX_SELECTORS)
    #[arg(long, global = true)]
    selectors: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a resume from a saved profile page and store it
    Extract {
        /// Saved HTML of the profile page
        file: PathBuf,

        /// Re-read the file until resume markup appears
        #[arg(short, long)]
        wait: bool,

        /// Print a summary of the extracted record
        #[arg(short, long)]
        print: bool,
    },

    /// Show the stored resume
    Show {
        /// Print the full record as JSON
        #[arg(long)]
        json: bool,
    },

    /// List job openings from the screening service
    Openings,

    /// Request a screening report for the stored resume
    Report {
        /// Opening ID (see `resdex openings`)
        #[arg(short, long)]
        opening: Option<String>,

        /// Send this page's cleaned markup instead of the stored one
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Remove the stored resume
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config = Config::resolve(Overrides {
        api_url: cli.api_url,
        db_path: cli.db,
        selectors: cli.selectors,
    });

    match cli.command {
        Commands::Extract { file, wait, print } => {
            let extractor = ResumeExtractor::new(config.selector_table()?);
            let doc = if wait {
                dom::wait_for(
                    || load_page(&file),
                    |doc| detect::has_resume_markers(doc, extractor.table()),
                    dom::WAIT_ATTEMPTS,
                    dom::WAIT_DELAY,
                )?
                .ok_or_else(|| {
                    anyhow!(
                        "No resume markup found in {} after {} attempts",
                        file.display(),
                        dom::WAIT_ATTEMPTS
                    )
                })?
            } else {
                let doc = load_page(&file)?;
                if !detect::has_resume_markers(&doc, extractor.table()) {
                    tracing::warn!(file = %file.display(), "no resume markup found, extracting anyway");
                }
                doc
            };

            let record = extractor.extract(&doc);
            let db = Database::open_at(&config.db_path)?;
            db.save_record(&record)?;
            db.save_source_html(&dom::cleaned_html(&doc))?;

            println!(
                "Extracted {} profile: {}",
                record.dialect.as_str(),
                record.personal_info.name.as_deref().unwrap_or("(no name)")
            );
            println!("Saved to {}", db.path().display());
            if print {
                println!();
                print_summary(&record);
            }
        }

        Commands::Show { json } => {
            let db = Database::open_at(&config.db_path)?;
            match db.latest_record()? {
                None => println!("No resume stored. Run `resdex extract <file>` first."),
                Some(record) if json => println!("{}", serde_json::to_string_pretty(&record)?),
                Some(record) => {
                    print_summary(&record);
                    if let Some(updated) = db.updated_at(db::RECORD_KEY)? {
                        println!("\nStored: {}", updated);
                    }
                }
            }
        }

        Commands::Openings => {
            let api = HttpScreeningApi::new(&config.api_url)?;
            let openings = api
                .fetch_openings()
                .context("Could not load openings; run `resdex openings` again to retry")?;
            println!("{:<26} {:<50}", "OPENING ID", "TITLE");
            println!("{}", "-".repeat(77));
            for opening in openings {
                println!(
                    "{:<26} {:<50}",
                    truncate(&opening.opening_id, 26),
                    truncate(&opening.title, 50)
                );
            }
        }

        Commands::Report { opening, html } => {
            let (opening, cleaned) = report_inputs(opening.as_deref(), html.as_deref())?;
            let db = Database::open_at(&config.db_path)?;
            let api = HttpScreeningApi::new(&config.api_url)?;
            let link = request_report(&api, &db, Some(opening), cleaned.as_deref())?;
            println!("Screening report: {}", link);
        }

        Commands::Clear => {
            let db = Database::open_at(&config.db_path)?;
            let removed = db.clear()?;
            println!("Cleared {} stored item(s) from {}", removed, db.path().display());
        }
    }

    Ok(())
}

// The opening is checked before the page is read so a bad path can't hide it.
fn report_inputs<'a>(
    opening: Option<&'a str>,
    html: Option<&Path>,
) -> Result<(&'a str, Option<String>)> {
    let opening = selected_opening(opening)?;
    let cleaned = match html {
        Some(path) => Some(dom::cleaned_html(&load_page(path)?)),
        None => None,
    };
    Ok((opening, cleaned))
}

fn load_page(path: &Path) -> Result<Html> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read page: {}", path.display()))?;
    Ok(Html::parse_document(&raw))
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn print_wrapped(text: &str) {
    for line in textwrap::wrap(text, WRAP_WIDTH - 2) {
        println!("  {}", line);
    }
}

fn print_summary(record: &ResumeRecord) {
    let info = &record.personal_info;
    println!("Name:       {}", or_dash(&info.name));
    println!("Email:      {}", or_dash(&info.email));
    println!("Phone:      {}", or_dash(&info.phone));
    println!("LinkedIn:   {}", or_dash(&info.linked_in));
    println!("Location:   {}", or_dash(&info.location));
    if let Some(total) = &record.header.total_experience {
        println!("Experience: {}", total);
    }
    if let Some(position) = &record.header.current_position {
        println!("Position:   {}", position);
    }

    if let Some(profile) = &record.profile {
        println!("\nPROFILE");
        print_wrapped(profile);
    }

    if !record.work_experience.is_empty() {
        println!("\nWORK EXPERIENCE");
        println!("  {:<30} {:<24} {:<20}", "DESIGNATION", "COMPANY", "DURATION");
        for item in &record.work_experience {
            match item {
                ExperienceItem::Engagement(job) => println!(
                    "  {:<30} {:<24} {:<20}",
                    truncate(&job.designation, 30),
                    truncate(or_dash(&job.company), 24),
                    truncate(or_dash(&job.duration), 20)
                ),
                ExperienceItem::Gap(gap) => println!(
                    "  {:<30} {:<24} {:<20}",
                    "(career gap)",
                    truncate(or_dash(&gap.duration), 24),
                    truncate(or_dash(&gap.period), 20)
                ),
            }
        }
    }

    if !record.education.is_empty() {
        println!("\nEDUCATION");
        for edu in &record.education {
            println!(
                "  {:<30} {:<36} {:<6}",
                truncate(&edu.degree, 30),
                truncate(or_dash(&edu.institution), 36),
                or_dash(&edu.year)
            );
        }
    }

    if !record.key_skills.is_empty() {
        println!("\nKEY SKILLS");
        print_wrapped(&record.key_skills.join(", "));
    }

    println!(
        "\n{} project(s), {} certification(s), {} IT skill(s), {} language(s), {} achievement(s)",
        record.projects.len(),
        record.certifications.len(),
        record.it_skills.len(),
        record.languages.len(),
        record.achievements.len()
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
