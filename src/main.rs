use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use roster_ai::config::AppConfig;
use roster_ai::error::AppError;
use roster_ai::telemetry;
use roster_ai::workflows::staffing::import::RosterCsvImporter;
use roster_ai::workflows::staffing::roster::{
    selection_router, ScoringConfig, SelectionEngine, SelectionOutcome, SelectionRequest,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Substitute Staffing Orchestrator",
    about = "Rank substitute-teacher candidates and run the staffing selection service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Work with roster exports from the command line
    Roster {
        #[command(subcommand)]
        command: RosterCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum RosterCommand {
    /// Select the best-ranked substitute from a CSV roster export
    Select(SelectArgs),
}

#[derive(Args, Debug)]
struct SelectArgs {
    /// Roster CSV export to load candidates from
    #[arg(long)]
    roster_csv: PathBuf,
    /// Subject the substitute must cover
    #[arg(long)]
    subject: String,
    /// Reference date for review decay (defaults to today)
    #[arg(long, value_parser = parse_date)]
    as_of: Option<NaiveDate>,
    /// School the assignment is for, used for preference matching
    #[arg(long)]
    school: Option<String>,
    /// Include the full per-candidate score breakdown in the output
    #[arg(long)]
    list_scores: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Roster {
            command: RosterCommand::Select(args),
        } => run_roster_select(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let engine = Arc::new(SelectionEngine::new(ScoringConfig::default()));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(selection_router(engine))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        environment = config.environment.label(),
        %addr,
        "staffing selection service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_roster_select(args: SelectArgs) -> Result<(), AppError> {
    let SelectArgs {
        roster_csv,
        subject,
        as_of,
        school,
        list_scores,
    } = args;

    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let candidates = RosterCsvImporter::from_path(roster_csv)?;

    let mut request = SelectionRequest::new(subject, as_of);
    if let Some(school) = school {
        request = request.with_target_school(school);
    }

    let engine = SelectionEngine::new(ScoringConfig::default());
    let outcome = engine.select(&candidates, &request)?;

    render_selection_report(&request, &outcome, list_scores);
    Ok(())
}

fn render_selection_report(request: &SelectionRequest, outcome: &SelectionOutcome, list_scores: bool) {
    println!("Substitute selection");
    println!(
        "Subject: {} (evaluated {})",
        request.subject, request.as_of
    );
    if let Some(school) = &request.target_school {
        println!("School: {school}");
    }

    let winner = outcome.winning_score();
    println!(
        "\nBest match: {} (score {:.2})",
        winner.label, winner.breakdown.total
    );
    for component in &winner.breakdown.components {
        println!("- {:+.2} {}", component.points, component.notes);
    }

    if list_scores {
        let mut ranked: Vec<_> = outcome.scores.iter().collect();
        ranked.sort_by(|a, b| {
            b.breakdown
                .total
                .partial_cmp(&a.breakdown.total)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        println!("\nFull ranking");
        for score in ranked {
            println!(
                "- #{} {} | total {:.2}",
                score.index, score.label, score.breakdown.total
            );
        }
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
