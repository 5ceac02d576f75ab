use crate::commands::{run_batch, run_evaluate, BatchArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use premium_accounts::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Premium Account Evaluator",
    about = "Evaluate premium account applications from the command line or over HTTP",
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
    /// Evaluate a single application and print the decision
    Evaluate(EvaluateArgs),
    /// Evaluate every application in a CSV file (account_number,age,amount)
    Batch(BatchArgs),
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
        Command::Evaluate(args) => run_evaluate(args),
        Command::Batch(args) => run_batch(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["premium-accounts-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_evaluate_arguments() {
        let cli = Cli::try_parse_from([
            "premium-accounts-api",
            "evaluate",
            "--amount",
            "49.50",
            "--age",
            "30",
            "--account",
            "PA-1001",
            "--out-slot",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Evaluate(args)) => {
                assert_eq!(args.amount.to_string(), "49.50");
                assert_eq!(args.age, 30);
                assert_eq!(args.account, "PA-1001");
                assert!(args.out_slot);
            }
            other => panic!("expected evaluate command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_decimal_amount() {
        let result = Cli::try_parse_from([
            "premium-accounts-api",
            "evaluate",
            "--amount",
            "plenty",
            "--age",
            "30",
            "--account",
            "PA-1001",
        ]);
        assert!(result.is_err());
    }
}
