use crate::{
    config::{AppConfig, ConfigOverrides},
    services::Provider,
    web, PlanGenerator,
};
use anyhow::Context;
use clap::{value_parser, Arg, ArgMatches, Command};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn command() -> Command {
    Command::new("trip-mate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Serve the TripMate travel planner: trip details in, Markdown itinerary out")
        .arg(
            Arg::new("provider")
                .short('p')
                .long("provider")
                .value_name("PROVIDER")
                .help("Text-generation backend: gemini or openai (or set TRIPMATE_PROVIDER)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("API key (or set GOOGLE_API_KEY / OPENAI_API_KEY)"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Model name (or set TRIPMATE_MODEL)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Service base URL (or set TRIPMATE_BASE_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .value_parser(value_parser!(u64))
                .help("Request timeout in seconds (or set TRIPMATE_TIMEOUT_SECS)"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Address to bind (or set HOST)"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .value_name("PORT")
                .value_parser(value_parser!(u16))
                .help("Port to listen on (or set PORT)"),
        )
}

fn overrides(matches: &ArgMatches) -> anyhow::Result<ConfigOverrides> {
    let provider = matches
        .get_one::<String>("provider")
        .map(|value| value.parse::<Provider>())
        .transpose()?;

    Ok(ConfigOverrides {
        provider,
        api_key: matches.get_one::<String>("api-key").cloned(),
        model: matches.get_one::<String>("model").cloned(),
        base_url: matches.get_one::<String>("base-url").cloned(),
        timeout_secs: matches.get_one::<u64>("timeout").copied(),
        host: matches.get_one::<String>("host").cloned(),
        port: matches.get_one::<u16>("port").copied(),
    })
}

/// CLI entry point for the trip-mate server
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = command().get_matches();
    let overrides = overrides(&matches)?;

    // A missing API key stops the process before anything is served
    let config = match AppConfig::load(overrides) {
        Ok(config) => config,
        Err(err) => {
            error!("startup failed: {}", err);
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    let generator = PlanGenerator::from_config(&config)?;
    info!(
        provider = %config.provider(),
        model = config.model(),
        base_url = config.base_url(),
        timeout_secs = config.timeout().as_secs(),
        "plan generator ready"
    );

    let app = web::router(web::AppState::new(generator));
    web::serve(app, &config.bind_addr())
        .await
        .with_context(|| format!("server on {} failed", config.bind_addr()))?;

    Ok(())
}
