use clap::{Args, Subcommand};

mod summary;

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// Print category and product counts
    Summary(summary::SummaryArgs),
}

pub(crate) async fn run(command: CatalogCommand) -> Result<(), String> {
    match command.command {
        CatalogSubcommand::Summary(args) => summary::run(args).await,
    }
}
