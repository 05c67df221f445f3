use chrono::Utc;
use clap::Parser;
use linkdown::{cmd, Args, Config, Logger, Subcommands};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    Logger::init(args.verbose);

    run_app(args).await?;

    Ok(())
}

async fn run_app(args: Args) -> Result<(), anyhow::Error> {
    match args.subcommands {
        Subcommands::Fetch(fetch_args) => {
            let config = Config::init(args.config.as_deref(), &fetch_args, Utc::now())?;
            cmd::fetch(&config).await?;
        }
        Subcommands::Init(init_args) => cmd::init(&init_args)?,
    }

    Ok(())
}
