use clap::{Parser, Subcommand};

mod dispatch;
mod orders;
mod parsers;
mod render;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan multi-trip delivery rounds for an order list
    Dispatch {
        #[command(flatten)]
        args: dispatch::DispatchArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Dispatch { args } => dispatch::run(args).await,
    }
}
