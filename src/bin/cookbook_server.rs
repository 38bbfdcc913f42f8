use clap::Parser;
use cookbook::utils::{logger, validation::Validate};
use cookbook::{CookbookConfig, CookbookError};

#[derive(Parser)]
#[command(name = "cookbook-server")]
#[command(about = "HTTP server for the in-memory cookbook")]
struct Args {
    /// Optional TOML file with settings and seed entries
    #[arg(short, long)]
    config: Option<String>,

    /// Override server.bind from the config file
    #[arg(short, long)]
    bind: Option<String>,

    /// Override resolver.max_depth from the config file
    #[arg(long)]
    max_depth: Option<usize>,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match CookbookConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => CookbookConfig::default(),
    };

    logger::init_server_logger(args.verbose, args.json_logs || config.json_logs());

    if let Some(bind) = &args.bind {
        config.server.get_or_insert_with(Default::default).bind = Some(bind.clone());
    }
    config.apply_max_depth_override(args.max_depth);

    if let Err(e) = start(&config).await {
        tracing::error!(
            "❌ Server failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}

async fn start(config: &CookbookConfig) -> Result<(), CookbookError> {
    config.validate()?;
    let addr = config.bind_address()?;
    let cookbook = config.build_cookbook(None)?;

    cookbook::server::serve(cookbook, addr).await
}
