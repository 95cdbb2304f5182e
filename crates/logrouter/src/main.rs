use clap::error::ErrorKind;
use clap::Parser;

use logrouter::conf::cli::version_string;
use logrouter::conf::{Cli, RouterConfig};
use logrouter::runtime::{boot, launch};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if cli.version {
        println!("{}", version_string());
        return;
    }

    let settings = RouterConfig::load(&cli).and_then(|config| config.validate());
    let debug = match &settings {
        Ok(settings) => settings.debug,
        Err(_) => cli.debug,
    };
    boot::init_logging(debug);

    let code = launch(settings).await;
    if code != 0 {
        std::process::exit(code);
    }
}
