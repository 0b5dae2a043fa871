use anyhow::Result;
use clap::Parser;
use ticker_research::cli::{Cli, Commands, ResearchArgs};
use ticker_research::research::{ResearchMode, ResearchOverrides, ResearchRunner, Ticker};
use ticker_research::{utils, AgentClient, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Usage errors and --help must not depend on a readable config
    let cli = Cli::parse();

    let settings = Settings::new()?;
    init_tracing(&settings);

    match cli.command {
        Commands::Single(args) => handle_research(ResearchMode::Single, args, settings).await,
        Commands::Multi(args) => handle_research(ResearchMode::Multi, args, settings).await,
    }
}

fn init_tracing(settings: &Settings) {
    // Progress goes to stdout, diagnostics to stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn handle_research(mode: ResearchMode, args: ResearchArgs, settings: Settings) -> Result<()> {
    let ticker = Ticker::parse(&args.ticker)?;

    let overrides = ResearchOverrides {
        model: args.model,
        max_turns: args.max_turns,
        cwd: args.cwd,
        plugin_dirs: args.plugin_dirs,
    };

    let client = AgentClient::from_settings(&settings);
    let runner = ResearchRunner::new(client, settings);
    let plan = runner.plan(mode, &ticker, &overrides);

    if args.dry_run {
        utils::print_header(&format!("{} research for {}", mode, ticker));
        println!("{}", runner.settings().agent.cli_path.display());
        for arg in plan.options.to_cli_args(&plan.prompt) {
            println!("  {:?}", arg);
        }
        return Ok(());
    }

    let outcome = runner.run(&plan).await?;
    tracing::info!(
        ticker = %ticker,
        messages = outcome.messages_seen,
        report_written = outcome.report_written,
        "Research finished"
    );

    match outcome.result {
        Some(ref result) if result.is_error => {
            anyhow::bail!("research for {} ended with '{}'", ticker, result.subtype)
        }
        Some(_) => Ok(()),
        None => anyhow::bail!("research for {} produced no result", ticker),
    }
}
