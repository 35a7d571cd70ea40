use clap::{Parser, Subcommand};

mod catalog;
mod images;

#[derive(Debug, Parser)]
#[command(name = "qrmenu-app", about = "QR menu maintenance CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Images(images::ImagesCommand),
    Catalog(catalog::CatalogCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Images(command) => images::run(command).await,
            Commands::Catalog(command) => catalog::run(command).await,
        }
    }
}
