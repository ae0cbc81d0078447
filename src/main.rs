use anyhow::Result;
use clap::Parser;

use apollo_cli::api::print_models;
use apollo_cli::cli::commands::{ask, chat, configure};
use apollo_cli::cli::{Args, Command};
use apollo_cli::{logging, ui};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args).await {
        ui::print_error(&e);
        std::process::exit(exitcode::SOFTWARE);
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Command::Models) => {
            print_models(None);
        }
        Some(Command::Configure { show }) => {
            configure::run_configure(show)?;
        }
        Some(Command::Ask { file, session }) => {
            ask::run_ask(file, session.or(args.session)).await?;
        }
        Some(Command::Chat { session }) => {
            chat::run_chat(session.or(args.session)).await?;
        }
        None => {
            chat::run_chat(args.session).await?;
        }
    }

    Ok(())
}
