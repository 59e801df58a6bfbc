use clap::{Arg, Command};
use crate::internal::config::LoggingConfig;

pub fn build_cli() -> Command {
    Command::new("app-logger")
        .version(crate::internal::config::VERSION)
        .about("Forward stdin lines to the application logger")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to a logging config file (yaml, toml or json)")
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Override the file sink path (default: logs/app.log)")
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .action(clap::ArgAction::SetTrue)
                .help("Disable ANSI colors on the console sink")
        )
}

pub fn parse_config(matches: &clap::ArgMatches) -> anyhow::Result<LoggingConfig> {
    let path = matches.get_one::<String>("config").map(|s| s.as_str());
    let mut config = LoggingConfig::load(path)?;

    if let Some(log_file) = matches.get_one::<String>("log-file") {
        config.file.filename = log_file.clone();
    }

    if matches.get_flag("no-color") {
        config.console.colorize = false;
    }

    config.validate()?;
    Ok(config)
}
