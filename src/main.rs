use clap::Parser;

use service_check::{cli::Cli, util, Config, Runtime};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    util::log::init(cli.debug);

    let config = Config::load_or_default(&cli.config)?;
    Runtime::new(config).run().await
}
