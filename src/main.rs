use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use takehome::{
    config::{Cli, Command},
    handlers::{aggregate, cookbook, postgres},
};

#[tokio::main]
async fn main() {
    // stdout carries the JSON results, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = start(Cli::parse()).await {
        tracing::error!("takehome failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn start(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Aggregate(args) => {
            aggregate::aggregate_command(&args)?;
        }
        Command::ParseHandwriting(args) => {
            cookbook::parse_handwriting_command(&args, io::stdout().lock())?;
        }
        Command::Summary(args) => {
            cookbook::summary_command(&args, io::stdout().lock())?;
        }
        Command::Schema => {
            let pool = postgres::connect(&cli.database).await?;
            postgres::schema_command(&pool).await?;
        }
        Command::CreateForm(args) => {
            let pool = postgres::connect(&cli.database).await?;
            postgres::create_form_command(&pool, &args, io::stdout().lock()).await?;
        }
        Command::AddQuestion(args) => {
            let pool = postgres::connect(&cli.database).await?;
            postgres::add_question_command(&pool, &args, io::stdout().lock()).await?;
        }
        Command::Questions(args) => {
            let pool = postgres::connect(&cli.database).await?;
            postgres::questions_command(&pool, &args, io::stdout().lock()).await?;
        }
        Command::DeleteForm(args) => {
            let pool = postgres::connect(&cli.database).await?;
            postgres::delete_form_command(&pool, args.form_id, io::stdout().lock()).await?;
        }
    }

    Ok(())
}
