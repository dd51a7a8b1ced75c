use std::sync::Arc;

use clap::Parser;
use clap::Subcommand;
use faqrag::config::AppConfig;
use faqrag::embeddings::EmbeddingService;
use faqrag::faq::FaqService;
use faqrag::llm::LlmService;
use faqrag::store::PgStore;
use faqrag::Result;
use tracing::info;

#[derive(Parser)]
#[command(name = "faqrag")]
#[command(about = "Self-updating FAQ answering service with semantic matching and LLM fallback")]
#[command(version)]
struct Cli {
    /// Path to the configuration file (defaults to config.toml)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Host to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,
        /// Enable permissive CORS
        #[arg(long)]
        cors: bool,
    },
    /// Answer a single question and exit
    Ask {
        /// The question to answer
        question: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };

    faqrag::logging::init_logging_with_config(Some(&config))?;

    match cli.command {
        Commands::Serve { host, port, cors } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let enable_cors = cors || config.server.enable_cors;

            faqrag::api::serve_api(&config, host, port, enable_cors).await
        }
        Commands::Ask { question } => {
            let store = PgStore::from_config(&config).await?;
            store.ensure_schema().await?;

            let service = FaqService::new(
                Arc::new(store),
                Arc::new(EmbeddingService::new(&config)?),
                Arc::new(LlmService::new(&config)?),
            );
            service.init().await?;

            let reply = service.answer(&question).await?;
            info!("Outcome: {:?}", reply.outcome);
            println!("{}", reply.text);

            Ok(())
        }
    }
}
