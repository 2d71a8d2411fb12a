//! geoweb-config CLI entry point.

use clap::Parser;

use geoweb_config::cli::{commands, handle_error, Cli, Commands};
use geoweb_config::infrastructure::logging;

fn main() {
    let cli = Cli::parse();

    // Bring logging up before resolution so its events are visible; invalid
    // LOG_* values fall back here and are reported by the resolver.
    let log_settings = cli.command.resolve_args().resolver().bootstrap_logging();
    if let Err(err) = logging::init(&log_settings) {
        eprintln!("warning: {err:#}");
    }

    let result = match &cli.command {
        Commands::Check(args) => commands::check::execute(args, cli.json),
        Commands::Show(args) => commands::show::execute(args, cli.json),
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
