use clap::Parser;
use smartdoc_exec::utils::error::{DocError, ErrorSeverity};
use smartdoc_exec::utils::{logger, validation::Validate};
use smartdoc_exec::{CliConfig, CommandGenerator, DocExecutor};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting smartdoc-exec");
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match cli.load_settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    let program = settings.generator.program.clone();
    let generator = CommandGenerator::new(
        program.clone().unwrap_or_default(),
        settings.generator.args.clone(),
    );
    let executor = DocExecutor::new(generator, settings);

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - the generator will not be started");
        match executor.plan(&cli.file, &cli.project).await {
            Ok(plan) => {
                println!("{}", serde_json::to_string_pretty(&plan.config)?);
                println!("📁 Expected output: {}", plan.expected_output.display());
                return Ok(());
            }
            Err(e) => exit_with(&e),
        }
    }

    if program.is_none() {
        exit_with(&DocError::MissingConfigError {
            field: "generator.program".to_string(),
        });
    }

    match executor.run(&cli.file, &cli.project).await {
        Ok(outcome) => match outcome.output {
            Some(path) => println!("✅ {}", path.display()),
            None => println!(
                "⚠️  No documentation appeared at {}",
                outcome.expected_output.display()
            ),
        },
        Err(e) => exit_with(&e),
    }

    Ok(())
}

fn exit_with(e: &DocError) -> ! {
    tracing::error!(
        "❌ smartdoc-exec failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
