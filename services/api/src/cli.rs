use crate::commands::{run_assess, run_questions, AssessArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lifescore::config::AppConfig;
use lifescore::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Lifescore",
    about = "Score the lifestyle questionnaire and serve health reports",
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
    /// Print the questionnaire with option scores
    Questions,
    /// Score a set of answers and print the report and share link
    Assess(AssessArgs),
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
        Command::Questions => {
            run_questions();
            Ok(())
        }
        Command::Assess(args) => {
            let config = AppConfig::load()?;
            run_assess(args, &config.delivery).await
        }
    }
}
