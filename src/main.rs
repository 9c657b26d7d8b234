mod logger;

use asciify::cli::{handle_config_action, run_convert, Args, Command};
use asciify::config::Config;
use clap::Parser;

fn main() {
    let args = Args::parse();
    logger::init(args.verbose);

    let result = match args.command {
        Command::Convert(ref convert) => Config::load(args.config.as_deref())
            .map_err(|e| e.to_string())
            .and_then(|config| run_convert(convert, &config)),
        Command::Config { action } => handle_config_action(action, args.config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
