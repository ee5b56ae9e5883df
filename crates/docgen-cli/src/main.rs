use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use docgen_core::policy::RuleAction;
use docgen_core::{AppConfig, RuleEngine};
use docgen_pipeline::DocumentationPipeline;

#[derive(Parser)]
#[command(name = "docgen")]
#[command(about = "Generate documentation for a function definition")]
#[command(version)]
struct Cli {
    /// Policy file or directory (overrides DOCGEN_POLICY_PATH)
    #[arg(long, global = true)]
    policy_path: Option<PathBuf>,

    /// Enable debug mode
    #[arg(long, short, global = true, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Document a snippet given inline, from a file, or on stdin
    Generate {
        /// Function definition text
        text: Option<String>,

        /// Read the function definition from a file
        #[arg(long, short, conflicts_with = "text")]
        file: Option<PathBuf>,
    },
    /// Load and compile the policy configuration, then list its rules
    CheckPolicy,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let mut config = AppConfig::load();
    if let Some(policy_path) = cli.policy_path {
        config.policy_path = policy_path;
    }

    let result = match cli.command {
        Commands::Generate { text, file } => generate(&config, text, file).await,
        Commands::CheckPolicy => check_policy(&config),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` takes precedence when set; otherwise `debug` selects the level.
fn init_logging(debug: bool) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_level(debug)),
    )
    .try_init();
}

fn default_log_level(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}

fn read_input(text: Option<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e));
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

async fn generate(
    config: &AppConfig,
    text: Option<String>,
    file: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let input = read_input(text, file)?;
    let pipeline = DocumentationPipeline::from_config(config)?;

    match pipeline.generate_documentation(&input).await {
        Ok(response) if response.is_refusal() => {
            println!("{}", response.text.yellow());
            Ok(ExitCode::SUCCESS)
        }
        Ok(response) => {
            println!("{}", response.text);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{} {}", format!("{} error:", e.kind()).red().bold(), e);
            Ok(ExitCode::from(2))
        }
    }
}

fn check_policy(config: &AppConfig) -> anyhow::Result<ExitCode> {
    let engine = RuleEngine::from_path(&config.policy_path)?;

    println!(
        "{} {}",
        "Policy OK:".green().bold(),
        config.policy_path.display()
    );
    for (direction, rules) in [("input", engine.input_rules()), ("output", engine.output_rules())] {
        println!("  {} rules: {}", direction, rules.len());
        for rule in rules {
            let action = match rule.action() {
                RuleAction::Block => "block",
                RuleAction::Mask => "mask",
            };
            println!("    - {} ({})", rule.name(), action.dimmed());
        }
    }
    Ok(ExitCode::SUCCESS)
}
