//! One-shot prediction from the command line.
//!
//! Fills a page's form from `--set field=value` pairs, submits it once and
//! prints the classification.
//!
//! Usage:
//!   strokecast-predict --page xgboost --set age=67 --set weight=90
//!   strokecast-predict --page random-forest --set bmi=31.2 --show-request

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use strokecast::adapters::HttpPredictionApi;
use strokecast::application::{PageConfig, PageSlug, PredictionService, ResultView};
use strokecast::config::Config;
use strokecast::domain::{AccuracyReading, Field, PredictionRequest};
use strokecast::PredictionSession;

#[derive(Parser)]
#[command(
    name = "strokecast-predict",
    version,
    about = "Submit one stroke-risk prediction and print the result"
)]
struct Cli {
    /// Page preset (random-forest, random-forest-vector, xgboost, xgboost-manual).
    #[arg(long, value_name = "PAGE")]
    page: Option<PageSlug>,

    /// Set a form field before submitting, e.g. `--set avg_glucose_level=180`.
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    assignments: Vec<(Field, String)>,

    /// Backend origin (overrides STROKECAST_API_URL).
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Print the request body before sending it.
    #[arg(long)]
    show_request: bool,

    /// Print the raw response body.
    #[arg(long)]
    raw: bool,

    /// Skip the accuracy lookup.
    #[arg(long)]
    no_accuracy: bool,
}

fn parse_assignment(s: &str) -> std::result::Result<(Field, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
    let field = name.parse::<Field>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the result.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let page = cli
        .page
        .map(|slug| slug.0)
        .or(config.start_page)
        .unwrap_or(&PageConfig::RANDOM_FOREST_VECTOR);
    let api_url = cli.api_url.unwrap_or(config.api_url);

    let api = Arc::new(HttpPredictionApi::new(api_url.as_str())?);
    let service = PredictionService::new(api);
    let mut session = PredictionSession::new(page);

    for (field, value) in &cli.assignments {
        session
            .set_field(*field, value)
            .with_context(|| format!("cannot set {field} on page '{}'", page.slug))?;
    }

    if cli.show_request {
        let request = PredictionRequest::serialize(session.form(), page.payload, page.model);
        eprintln!("POST {}{}", api_url, page.model.predict_path());
        eprintln!("{}", request.to_json()?);
    }

    if !cli.no_accuracy {
        service.load_accuracy(&mut session);
    }
    service.submit(&mut session);

    if let Some(notice) = session.notice() {
        eprintln!("{notice}");
        return Ok(ExitCode::FAILURE);
    }

    if let ResultView::Classified {
        class, model, raw, ..
    } = session.view()
    {
        println!("{}", class.label());
        println!("{}", class.description());
        println!("Model: {model}");
        if let Some(label) = session.accuracy().and_then(AccuracyReading::label) {
            println!("{label}");
        }
        if cli.raw {
            println!("{raw}");
        }
    }

    Ok(ExitCode::SUCCESS)
}
