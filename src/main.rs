use clap::Parser;
use cookbook::utils::error::ErrorSeverity;
use cookbook::utils::{logger, validation::Validate};
use cookbook::{CliConfig, Command, Cookbook, CookbookConfig, CookbookError};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate().and_then(|_| run(&config)) {
        report_and_exit(&e);
    }
}

fn run(config: &CliConfig) -> Result<(), CookbookError> {
    match &config.command {
        Command::Parse { input } => {
            println!("{}", Cookbook::default().parse_name(input)?);
        }
        Command::Summary { cookbook, name } => {
            let book = load(cookbook, config.max_depth)?;
            let summary = book.summary(name)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Check { cookbook } => {
            let book = load(cookbook, config.max_depth)?;
            let mut failed = 0usize;

            for (name, outcome) in book.check_all() {
                match outcome {
                    Ok(summary) => println!(
                        "✅ {} (cook time {}, {} ingredients)",
                        name,
                        summary.cook_time,
                        summary.ingredients.len()
                    ),
                    Err(e) => {
                        failed += 1;
                        println!("❌ {}: {}", name, e);
                    }
                }
            }

            if failed > 0 {
                tracing::error!("{} recipe(s) failed to resolve", failed);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn load(path: &str, max_depth: Option<usize>) -> Result<Cookbook, CookbookError> {
    tracing::info!("📁 Loading cookbook from: {}", path);
    let mut file = CookbookConfig::from_file(path)?;
    file.apply_max_depth_override(max_depth);
    file.validate()?;
    file.build_cookbook(None)
}

fn report_and_exit(e: &CookbookError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
