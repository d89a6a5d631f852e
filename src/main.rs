use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;
use sherpa_client::config::client_config::ClientConfig;
use sherpa_client::config::default_config::config_from_env;
use sherpa_client::health_service::HealthService;
use sherpa_client::services::stage1_service::Stage1Service;
use sherpa_client::{FormController, FormError, FormState, QueryParameters, telemetry};
use sherpa_view::{ResultView, SpinnerProgress};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{Level, debug};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "sherpa",
    about = "SourceSherpa: ask a codebase question",
    version,
    after_help = "Settings are also read from SHERPA_API_URL, SHERPA_MODEL_ID,\nSHERPA_MAX_CONTEXT_DOCS and SHERPA_TIMEOUT_SECS (a .env file is honoured)."
)]
struct Cli {
    /// Base URL of the SourceSherpa API (e.g. "http://localhost:8000")
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask one question and print the answer
    Ask {
        /// The question about the codebase
        question: String,

        #[command(flatten)]
        form: FormArgs,

        /// Print the raw JSON response instead of the rendered panels
        #[arg(long)]
        json: bool,
    },
    /// Ask questions one per line from stdin until EOF or ":q"
    Interactive {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Check that the API is reachable
    Ping,
}

#[derive(Args)]
struct FormArgs {
    /// Model identifier forwarded to the backend
    #[arg(long)]
    model_id: Option<String>,

    /// Maximum number of context documents (1-1000)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=1000))]
    max_context_docs: Option<u32>,

    /// Ask the backend for its debug payload
    #[arg(long)]
    debug: bool,
}

impl FormArgs {
    fn params(&self, question: &str, cfg: &ClientConfig) -> QueryParameters {
        let mut params = QueryParameters::new(question, cfg);
        if let Some(model_id) = &self.model_id {
            params.model_id = model_id.clone();
        }
        if let Some(n) = self.max_context_docs {
            params.max_context_docs = n;
        }
        params.debug = self.debug;
        params
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // A .env file is optional for the client.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut cfg = config_from_env().context("invalid SHERPA_* environment")?;
    if let Some(url) = cli.api_url {
        cfg.api_url = url;
    }
    if let Some(secs) = cli.timeout_secs {
        cfg.timeout_secs = Some(secs);
    }
    debug!(api_url = %cfg.api_url, model = %cfg.model_id, "config resolved");

    match cli.command {
        Commands::Ask {
            question,
            form,
            json,
        } => ask(&cfg, form.params(&question, &cfg), json).await,
        Commands::Interactive { form } => interactive(&cfg, &form).await,
        Commands::Ping => ping(&cfg).await,
    }
}

fn init_tracing(verbose: bool) {
    let filter = telemetry::env_filter_with_level("warn", verbose.then_some(Level::DEBUG));

    tracing_subscriber::registry()
        .with(filter)
        .with(telemetry::layer())
        .init();
}

fn controller(cfg: &ClientConfig) -> anyhow::Result<FormController> {
    let service = Stage1Service::new(cfg).context("failed to create API client")?;
    Ok(FormController::new(Arc::new(service)))
}

async fn ask(cfg: &ClientConfig, params: QueryParameters, json: bool) -> anyhow::Result<ExitCode> {
    let ctl = controller(cfg)?;

    if let Err(err) = ctl.submit_with(&params, &SpinnerProgress::new()).await {
        print_form_error(&err);
        return Ok(ExitCode::from(2));
    }

    let state = ctl.state().await;
    if json {
        print_raw(&state)?;
    } else {
        print_view(&ResultView::from_state(&state));
    }

    Ok(if state.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn interactive(cfg: &ClientConfig, form: &FormArgs) -> anyhow::Result<ExitCode> {
    let ctl = controller(cfg)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{} ", "question>".bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let question = line.trim();
        if question == ":q" {
            break;
        }

        // One request at a time: the prompt returns only once the answer settled.
        let params = form.params(question, cfg);
        match ctl.submit_with(&params, &SpinnerProgress::new()).await {
            Ok(()) => print_view(&ResultView::from_state(&ctl.state().await)),
            Err(err) => print_form_error(&err),
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn ping(cfg: &ClientConfig) -> anyhow::Result<ExitCode> {
    let health = HealthService::new(cfg, cfg.timeout_secs).context("failed to create API client")?;
    let status = health.check().await;

    let mark = if status.ok { "ok".green() } else { "down".red() };
    println!(
        "{mark} {} ({} ms) {}",
        status.endpoint,
        status.latency_ms,
        status.message.dimmed()
    );

    Ok(if status.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_form_error(err: &FormError) {
    eprintln!("{} {err}", "invalid input:".yellow().bold());
}

fn print_raw(state: &FormState) -> anyhow::Result<()> {
    if let Some(err) = &state.error {
        eprintln!("{}", err.red());
    }
    if let Some(result) = &state.result {
        println!("{}", serde_json::to_string_pretty::<Value>(result)?);
    }
    Ok(())
}

fn print_view(view: &ResultView) {
    if let Some(err) = &view.error {
        eprintln!("{}", err.red());
    }

    for panel in view.panels() {
        println!("{}", panel.title.bold().underline());
        if panel.title == sherpa_view::render::RESULT_PANEL_TITLE {
            if let Some(n) = view.context_docs {
                println!("{}", format!("{n} context documents").dimmed());
            }
        }
        for section in &panel.sections {
            println!("{}", section.title.cyan().bold());
            println!("{}\n", section.body);
        }
    }
}
