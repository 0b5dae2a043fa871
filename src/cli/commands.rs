use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ticker-research")]
#[command(author, version, about = "Investment research reports for a stock ticker", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// One agent searches the web and writes the report
    Single(ResearchArgs),

    /// A lead agent dispatches news and ratings researchers, then writes the report
    Multi(ResearchArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ResearchArgs {
    /// Stock ticker symbol, e.g. AAPL
    pub ticker: String,

    /// Model for the (lead) agent
    #[arg(short, long)]
    pub model: Option<String>,

    /// Maximum conversation turns
    #[arg(long)]
    pub max_turns: Option<u32>,

    /// Working directory for the agent; the report is written here (default: current dir)
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Local plugin directory to load (repeatable)
    #[arg(long = "plugin-dir")]
    pub plugin_dirs: Vec<PathBuf>,

    /// Print the agent CLI invocation instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_multi_with_flags() {
        let cli = Cli::try_parse_from([
            "ticker-research",
            "multi",
            "AAPL",
            "--max-turns",
            "5",
            "--plugin-dir",
            "../../",
            "--plugin-dir",
            "./extra",
        ])
        .unwrap();

        let Commands::Multi(args) = cli.command else {
            panic!("expected multi");
        };
        assert_eq!(args.ticker, "AAPL");
        assert_eq!(args.max_turns, Some(5));
        assert_eq!(args.plugin_dirs.len(), 2);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_missing_ticker_is_rejected() {
        assert!(Cli::try_parse_from(["ticker-research", "single"]).is_err());
    }
}
