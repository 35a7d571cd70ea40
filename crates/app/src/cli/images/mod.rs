use clap::{Args, Subcommand};

mod sweep;

#[derive(Debug, Args)]
pub(crate) struct ImagesCommand {
    #[command(subcommand)]
    command: ImagesSubcommand,
}

#[derive(Debug, Subcommand)]
enum ImagesSubcommand {
    /// Delete stored images that no category or product references
    Sweep(sweep::SweepArgs),
}

pub(crate) async fn run(command: ImagesCommand) -> Result<(), String> {
    match command.command {
        ImagesSubcommand::Sweep(args) => sweep::run(args).await,
    }
}
