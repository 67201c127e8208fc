use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::{Duration, Instant};

use reflex_bot::application::messaging::{Dispatcher, MessageParser};
use reflex_bot::application::services::{FallbackResponder, MessageService};
use reflex_bot::domain::entities::{Channel, User};
use reflex_bot::domain::traits::Bot;
use reflex_bot::handlers::{HandlerLoader, HandlerRegistry};
use reflex_bot::infrastructure::adapters::ConsoleAdapter;
use reflex_bot::infrastructure::config::Config;
use reflex_bot::infrastructure::llm::{GroqProvider, LLM};

#[derive(Parser)]
#[command(name = "reflex-bot")]
#[command(about = "Auto-response bot with drop-in message handlers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_bot(cli.config);
        }
        Commands::Version => {
            println!("reflex-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config();
        }
    }
}

fn run_bot(config_path: String) {
    // Load config
    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using environment", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    };

    tracing::info!("Starting reflex-bot: {}", config.bot.name);

    // Handler registry
    let loader = HandlerLoader::new(&config.handlers.directory);
    let registry = Arc::new(HandlerRegistry::new(loader));

    if config.handlers.auto_load {
        match registry.load() {
            Ok(count) => {
                tracing::info!(
                    "Loaded {} handler(s) from {}",
                    count,
                    config.handlers.directory.display()
                );
            }
            Err(e) => {
                // Unreadable handler directory is fatal at startup
                tracing::error!("Failed to load handler directory: {}", e);
                std::process::exit(1);
            }
        }
    }

    // LLM provider for the fallback responder
    let llm_config = config.llm.clone().unwrap_or_default().with_env_overrides();
    let llm: Option<Arc<dyn LLM>> = match &llm_config.api_key {
        Some(key) => Some(Arc::new(GroqProvider::new(key, Some(llm_config.model())))),
        None => {
            tracing::warn!("No LLM API key configured, fallback responses disabled");
            None
        }
    };

    let mut dispatcher =
        Dispatcher::new(registry.clone()).with_mode(config.handlers.dispatch_mode);
    if let Some(secs) = config.handlers.handler_timeout_seconds {
        dispatcher = dispatcher.with_timeout(Duration::from_secs(secs));
    }

    let system_prompt = llm_config
        .system_prompt
        .clone()
        .unwrap_or_else(|| "You are a helpful AI assistant.".to_string());
    let fallback =
        FallbackResponder::new(system_prompt, llm_config.temperature, llm_config.max_tokens);

    let bot = Arc::new(ConsoleAdapter::new(config.bot.name.clone()));
    let service = MessageService::new(bot.clone(), llm, dispatcher, fallback);

    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(run_console_bot(bot, service, registry, &config));
}

async fn run_console_bot(
    bot: Arc<ConsoleAdapter>,
    service: MessageService,
    registry: Arc<HandlerRegistry>,
    config: &Config,
) {
    if let Err(e) = bot.start().await {
        tracing::error!("Failed to start bot: {}", e);
        return;
    }

    let info = bot.bot_info();
    tracing::info!(
        "Bot started: @{} ({} handler(s) active)",
        info.username,
        registry.len()
    );

    let parser = MessageParser::new("console");
    let reload_interval = Duration::from_secs(config.handlers.reload_interval_seconds);
    let mut last_reload_check = Instant::now();

    loop {
        let Some(input) = bot.read_line("> ").await else {
            break;
        };
        if input.is_empty() {
            continue;
        }

        // Pick up handler files dropped or renamed since the last check
        if config.handlers.auto_load
            && !reload_interval.is_zero()
            && last_reload_check.elapsed() >= reload_interval
        {
            if registry.needs_reload() {
                match registry.load() {
                    Ok(count) => {
                        tracing::info!(
                            "Reloaded handler directory, {} dynamic handler(s) active",
                            count
                        );
                    }
                    Err(e) => tracing::error!("Failed to reload handlers: {}", e),
                }
            }
            last_reload_check = Instant::now();
        }

        let message = parser.parse(User::new("console-user"), Channel::new("console"), input);
        if let Err(e) = service.process(message).await {
            tracing::error!("Failed to process message: {}", e);
        }
    }

    tracing::info!("Input closed, shutting down");
}

fn init_config() {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
}
