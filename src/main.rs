//! # Command Line Interface
//!
//! Subcommands are in the `commands` module.

mod cli;

use env_logger;
use log::error;
use bbcdump::commands;
use bbcdump::commands::CommandError;

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let main_cmd = cli::build_cli();
    let matches = main_cmd.clone().get_matches();

    return match matches.subcommand() {
        Some(("catalog",cmd)) => commands::disc::catalog(cmd),
        Some(("get",cmd)) => commands::disc::get(cmd),
        Some(("dump",cmd)) => commands::disc::dump(cmd),
        Some(("unpack",cmd)) => commands::unpack::unpack(cmd),
        Some(("completions",cmd)) => commands::completions::generate(main_cmd,cmd),
        _ => {
            error!("No subcommand was found, try `bbcdump --help`");
            Err(Box::new(CommandError::InvalidCommand))
        }
    };
}
