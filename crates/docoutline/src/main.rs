use crate::prelude::*;
use clap::Parser;

mod batch;
mod config;
mod error;
mod extract;
mod prelude;
mod render;
mod source;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Extract a title and a heading outline from PDF documents"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// TOML file overriding profile thresholds
    #[clap(long, env = "DOCOUTLINE_CONFIG", global = true)]
    config: Option<std::path::PathBuf>,

    /// Threshold profile (defaults to the command's own profile)
    #[clap(long, env = "DOCOUTLINE_PROFILE", global = true)]
    profile: Option<config::ProfileArg>,

    /// Whether to display additional information.
    #[clap(long, env = "DOCOUTLINE_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Process every PDF in a directory and write one JSON outline per file
    Batch(crate::batch::App),

    /// Extract the outline of a single document
    Extract(crate::extract::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    let app = App::parse();

    let default_filter = if app.global.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    color_eyre::install()?;

    match app.command {
        SubCommands::Batch(sub_app) => crate::batch::run(sub_app, app.global).await,
        SubCommands::Extract(sub_app) => crate::extract::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
