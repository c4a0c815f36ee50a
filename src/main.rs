use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;

mod aggregate;
mod db;
mod fields;
mod filter;
mod models;
mod report;

#[derive(Parser)]
#[command(name = "survey-dashboard")]
#[command(about = "Aggregate survey responses into dashboard metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic seed data
    Seed,
    /// Import survey responses from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// List the available filter values
    Filters,
    /// Print the KPI summary for a filter scope
    Kpi {
        #[arg(long)]
        institution: Option<String>,
        #[arg(long)]
        survey_type: Option<String>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Generate the full markdown dashboard report
    Report {
        #[arg(long)]
        institution: Option<String>,
        #[arg(long)]
        survey_type: Option<String>,
        #[arg(long, default_value = "dashboard.md")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a Postgres instance")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let inserted = db::import_csv(&pool, &csv).await?;
            println!("Inserted {inserted} responses from {}.", csv.display());
        }
        Commands::Filters => {
            let institutions = db::list_institutions(&pool).await?;
            let survey_types = db::list_survey_types(&pool).await?;

            println!("Institutions:");
            for institution in institutions {
                println!("- {institution}");
            }
            println!("Survey types:");
            for survey_type in survey_types {
                println!("- {survey_type}");
            }
        }
        Commands::Kpi {
            institution,
            survey_type,
            json,
        } => {
            let rows = db::fetch_responses(&pool).await?;
            let scoped =
                filter::filter_rows(&rows, institution.as_deref(), survey_type.as_deref());
            let kpi = aggregate::summary_kpi(&scoped);

            if json {
                println!("{}", serde_json::to_string_pretty(&kpi)?);
            } else {
                println!("Participants: {}", kpi.total_participants);
                println!("Average familiarity: {:.2}", kpi.avg_familiarity);
                println!("Strength: {} ({:.2})", kpi.strength.label, kpi.strength.value);
                println!("Gap: {} ({:.2})", kpi.gap.label, kpi.gap.value);
            }
        }
        Commands::Report {
            institution,
            survey_type,
            out,
        } => {
            let rows = db::fetch_responses(&pool).await?;
            let scoped =
                filter::filter_rows(&rows, institution.as_deref(), survey_type.as_deref());
            let report = report::build_report(
                institution.as_deref(),
                survey_type.as_deref(),
                &scoped,
            );
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
