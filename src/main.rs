//! Wiring & DI. Entry point: bootstrap adapters, inject into the router, run once or interactively.
//! No business logic here.

use assistant_router::adapters::ai::{MockGenerator, OpenAiGenerator};
use assistant_router::adapters::google::{
    GmailAdapter, GoogleCalendarAdapter, GoogleSession, Unconfigured,
};
use assistant_router::adapters::persistence::MarkdownArchive;
use assistant_router::adapters::telegram::ExportExcerpts;
use assistant_router::adapters::ui::{self, TuiInputPort};
use assistant_router::ports::{
    CalendarPort, GeneratorPort, InputPort, MailPort, QueryRequest, QueryResponse,
};
use assistant_router::shared::config::AppConfig;
use assistant_router::usecases::{Backends, QueryRouter, RouterSettings};
use clap::{CommandFactory, Parser};
use dotenv::dotenv;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "assistant")]
#[command(version, about = "Route natural-language requests to calendar, email, chat and guidance handlers")]
struct Cli {
    /// Answer a single query and exit
    #[arg(short, long, conflicts_with = "interactive")]
    query: Option<String>,

    /// Print a JSON response object. Without --query, reads {"query": ...} from stdin
    #[arg(long)]
    json: bool,

    /// Read queries line by line until quit
    #[arg(short, long)]
    interactive: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.query.is_none() && !cli.interactive && !cli.json {
        let _ = Cli::command().print_help();
        std::process::exit(1);
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed, using defaults");
        AppConfig::default()
    });
    let router = Arc::new(build_router(&cfg));

    if cli.interactive {
        ui::init_ui();
        let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(Arc::clone(&router)));
        input_port
            .run()
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        return Ok(());
    }

    if cli.json {
        let request = match cli.query {
            Some(query) => QueryRequest {
                query,
                user_id: None,
            },
            None => {
                let mut body = String::new();
                std::io::stdin().read_to_string(&mut body)?;
                match serde_json::from_str::<QueryRequest>(&body) {
                    Ok(request) => request,
                    Err(e) => {
                        let response = QueryResponse::failed(format!("Invalid request: {}", e));
                        println!("{}", serde_json::to_string(&response)?);
                        std::process::exit(1);
                    }
                }
            }
        };
        let response = router.handle(&request).await;
        println!("{}", serde_json::to_string(&response)?);
        return Ok(());
    }

    if let Some(query) = cli.query {
        println!("{}", router.process(&query).await);
    }
    Ok(())
}

/// Choose adapters from configuration and assemble the router.
fn build_router(cfg: &AppConfig) -> QueryRouter {
    let generator: Arc<dyn GeneratorPort> = if cfg.is_ai_configured() {
        info!(
            model = %cfg.ai_model_or_default(),
            url = %cfg.ai_api_url_or_default(),
            "text generation via OpenAI-compatible API"
        );
        Arc::new(
            OpenAiGenerator::new(
                cfg.ai_api_url_or_default(),
                cfg.ai_api_key().unwrap_or_default(),
                cfg.ai_model_or_default(),
            )
            .with_sampling(
                cfg.ai_temperature_or_default(),
                cfg.ai_max_tokens_or_default(),
            ),
        )
    } else {
        warn!("ASSISTANT_AI_API_KEY not set, using mock generator");
        Arc::new(MockGenerator::new())
    };

    let (mail, calendar): (Arc<dyn MailPort>, Arc<dyn CalendarPort>) =
        match cfg.google_access_token() {
            Some(token) => {
                let session = GoogleSession::new(token);
                info!(calendar_id = %cfg.calendar_id_or_default(), "Gmail and Calendar enabled");
                (
                    Arc::new(GmailAdapter::new(session.clone())),
                    Arc::new(GoogleCalendarAdapter::new(
                        session,
                        cfg.calendar_id_or_default(),
                    )),
                )
            }
            None => {
                warn!("ASSISTANT_GOOGLE_ACCESS_TOKEN not set, mail and calendar disabled");
                (Arc::new(Unconfigured), Arc::new(Unconfigured))
            }
        };

    let backends = Backends {
        mail,
        archive: Arc::new(MarkdownArchive::new(cfg.email_archive_dir_or_default())),
        calendar,
        chats: Arc::new(ExportExcerpts::new(cfg.telegram_export_dir_or_default())),
    };

    QueryRouter::assemble(
        generator,
        backends,
        RouterSettings {
            llm_classification: cfg.llm_classification_enabled(),
            owner_name: cfg.owner_name_or_default(),
            fallback_recipient: cfg.fallback_recipient_or_default(),
            chat_excerpt_length: cfg.chat_excerpt_length_or_default(),
        },
    )
}
