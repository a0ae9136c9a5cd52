#![allow(unexpected_cfgs)]
#![cfg(not(tarpaulin_include))]

mod commands;
mod error;
mod util;
use argh::FromArgs;
use core::error::Error;
use tracing::Level;

#[derive(FromArgs, Debug)]
/// Encoder for RIF luminance + alpha images
struct TopLevel {
    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Commands {
    Encode(commands::encode::EncodeCmd),
}

fn init_logging(verbose: bool) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli: TopLevel = argh::from_env();

    match cli.command {
        Commands::Encode(cmd) => {
            init_logging(cmd.verbose);
            commands::encode::handle_encode_command(cmd)?;
        }
    }

    Ok(())
}
