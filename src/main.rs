use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;

use career_quiz::api::{CareerDomainSource, HttpBackend, QuestionSource};
use career_quiz::cli::{Cli, Commands};
use career_quiz::config::{ClientConfig, normalize_api_url, request_timeout};
use career_quiz::handoff::{FileHandoff, ResultHandoff, SessionHandoff};
use career_quiz::report;
use career_quiz::terminal::Terminal;
use career_quiz::wizard::AssessmentWizard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ClientConfig::from_env()?;
    if let Some(ref url) = cli.api_url {
        config.api_url = normalize_api_url(url)?;
    }
    if let Some(secs) = cli.timeout_secs {
        config.request_timeout = request_timeout("--timeout-secs", secs)?;
    }
    if let Some(ref path) = cli.result_path {
        config.result_path = Some(path.clone());
    }

    let backend = HttpBackend::new(&config)?;
    tracing::info!(api = %backend.base_url(), "Using quiz backend");

    let handoff: Arc<dyn ResultHandoff> = match config.result_path {
        Some(ref path) => Arc::new(FileHandoff::new(path)),
        None => Arc::new(SessionHandoff::new()),
    };

    let mut term = Terminal::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());

    match cli.command() {
        Commands::Take => {
            term.print("Loading assessment questions...").await?;
            let mut wizard = match AssessmentWizard::load(&backend).await {
                Ok(wizard) => wizard,
                Err(e) => {
                    eprintln!("Error: {e}");
                    eprintln!("  Check that the backend is reachable at {}", config.api_url);
                    std::process::exit(1);
                }
            };

            let Some(result) = term
                .run_assessment(&mut wizard, &backend, handoff.as_ref())
                .await?
            else {
                term.print("Assessment abandoned.").await?;
                return Ok(());
            };
            // The display step reads from the handoff, not from the wizard.
            drop(wizard);
            let shown = handoff.load().await.ok().flatten().unwrap_or(result);
            show_result(&mut term, &backend, &shown).await?;
        }
        Commands::LastResult => match handoff.load().await.context("reading handed-off result")? {
            Some(result) => show_result(&mut term, &backend, &result).await?,
            None => {
                term.print("No assessment result found. Run `career-quiz take` to start one.")
                    .await?;
            }
        },
        Commands::History { email } => {
            let results = backend.assessments_by_email(&email).await?;
            term.print(&report::render_history(&results)).await?;
        }
        Commands::Show { id } => {
            let result = backend.assessment_by_id(&id).await?;
            show_result(&mut term, &backend, &result).await?;
        }
        Commands::Domains => {
            let domains = backend.fetch_domains().await?;
            term.print(&report::render_domains(&domains)).await?;
        }
        Commands::Questions { category } => {
            let questions = match category {
                Some(category) => backend.questions_by_category(category).await?,
                None => backend.fetch_questions().await?,
            };
            term.print(&report::render_questions(&questions)).await?;
        }
    }

    Ok(())
}

/// Render a result, enriching it with its dominant career domain when it loads.
async fn show_result<R, W>(
    term: &mut Terminal<R, W>,
    backend: &HttpBackend,
    result: &career_quiz::assessment::AssessmentResult,
) -> anyhow::Result<()>
where
    R: tokio::io::AsyncBufRead + Unpin,
    W: tokio::io::AsyncWrite + Unpin,
{
    let domains = match backend
        .domain_by_name(result.dominant_category.as_str())
        .await
    {
        Ok(domain) => vec![domain],
        Err(e) => {
            tracing::warn!(error = %e, "Could not load career domain");
            Vec::new()
        }
    };
    term.print(&report::render_result(result, &domains)).await?;
    Ok(())
}
