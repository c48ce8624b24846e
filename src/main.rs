use anyhow::{Context, Result};
use case_catalog::config::{self, Config};
use case_catalog::{seo, slug_from_name, source, CaseStudyEntry, CatalogStore};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(author, version, about = "Query the agency case-study catalog")]
struct Args {
    /// Path to YAML config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the base slug derived from a display name
    Slug { name: String },
    #[command(flatten)]
    Query(Query),
}

/// Commands that read the loaded catalog.
#[derive(Debug, Subcommand)]
enum Query {
    /// List every case study in display order
    List,
    /// Show one case study and its related set
    Show { slug: String },
    /// Show the related case studies for a slug
    Related {
        slug: String,
        /// Overrides catalog.related_limit
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print page metadata for the catalog page, or a detail page when a slug is given
    Meta { slug: Option<String> },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let query = match args.command {
        // Slug derivation needs neither config nor records.
        Command::Slug { name } => {
            println!("{}", slug_from_name(&name));
            return Ok(ExitCode::SUCCESS);
        }
        Command::Query(query) => query,
    };

    let cfg = config::load(Some(&args.config))
        .with_context(|| format!("failed to load config {}", args.config.display()))?;
    let store = CatalogStore::new();
    let source = source::from_config(&cfg.catalog).context("invalid catalog source")?;
    let catalog = store
        .load(source.as_ref())
        .await
        .with_context(|| format!("failed to load catalog from {}", source.describe()))?;
    info!(records = catalog.len(), "catalog ready");

    run(&cfg, &store, query).await
}

async fn run(cfg: &Config, store: &CatalogStore, query: Query) -> Result<ExitCode> {
    match query {
        Query::List => {
            for entry in store.snapshot().entries() {
                println!(
                    "{}\t{}\t{}\t{}",
                    entry.slug,
                    entry.id(),
                    entry.name(),
                    entry.study.industry
                );
            }
        }
        Query::Show { slug } => match store.detail(&slug, cfg.catalog.related_limit).await {
            Some(view) => print_json(&view)?,
            None => return Ok(not_found(&slug)),
        },
        Query::Related { slug, limit } => {
            let Some(entry) = store.case_study_by_slug(&slug).await else {
                return Ok(not_found(&slug));
            };
            let limit = limit.unwrap_or(cfg.catalog.related_limit);
            let related: Vec<CaseStudyEntry> =
                store.related(entry.id(), &entry.study.industry, limit).await;
            print_json(&related)?;
        }
        Query::Meta { slug: None } => {
            print_json(&seo::catalog_meta(&cfg.site, &store.snapshot()))?;
        }
        Query::Meta { slug: Some(slug) } => match store.case_study_by_slug(&slug).await {
            Some(entry) => print_json(&seo::detail_meta(&cfg.site, &entry))?,
            None => {
                print_json(&seo::not_found_meta(&cfg.site))?;
                return Ok(ExitCode::FAILURE);
            }
        },
    }
    Ok(ExitCode::SUCCESS)
}

fn not_found(slug: &str) -> ExitCode {
    warn!(slug, "case study not found");
    eprintln!("case study not found: {slug}");
    ExitCode::FAILURE
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_and_queries_parse_to_separate_arms() {
        let args = Args::try_parse_from(["case-catalog", "slug", "Acme Co!"]).unwrap();
        assert!(matches!(args.command, Command::Slug { ref name } if name == "Acme Co!"));

        let args = Args::try_parse_from(["case-catalog", "related", "acme-co", "--limit", "2"])
            .unwrap();
        assert!(matches!(
            args.command,
            Command::Query(Query::Related { ref slug, limit: Some(2) }) if slug == "acme-co"
        ));

        let args = Args::try_parse_from(["case-catalog", "list"]).unwrap();
        assert!(matches!(args.command, Command::Query(Query::List)));
        assert_eq!(args.config, PathBuf::from("config.yaml"));
    }
}
