use crate::report::{run_score, run_vectors, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use impact_vectors::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Impact Vectors",
    about = "Score retro funding projects by weighted impact vectors and split the token budget",
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
    /// Score a project export from the command line
    Impact {
        #[command(subcommand)]
        command: ImpactCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ImpactCommand {
    /// Score projects for a vector selection and print their allocations
    Score(ScoreArgs),
    /// List the impact vectors known to the round's data export
    Vectors,
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
        Command::Impact {
            command: ImpactCommand::Score(args),
        } => run_score(args),
        Command::Impact {
            command: ImpactCommand::Vectors,
        } => run_vectors(),
    }
}
