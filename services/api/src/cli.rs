use crate::extract::{run_extract, ExtractArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use zefix_leads::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "ZEFIX leads",
    about = "Extract newly registered Swiss companies into a prospecting workbook",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run one extraction and write the workbook to disk
    Extract(ExtractArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Extract(args) => run_extract(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["zefix-leads-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn extract_accepts_repeated_cantons() {
        let cli = Cli::try_parse_from([
            "zefix-leads-api",
            "extract",
            "--canton",
            "GE",
            "--canton",
            "NE",
            "--days",
            "14",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Extract(args)) => {
                assert_eq!(args.canton, vec!["GE", "NE"]);
                assert_eq!(args.days, Some(14));
                assert!(args.output.is_none());
            }
            other => panic!("expected extract command, got {other:?}"),
        }
    }
}
