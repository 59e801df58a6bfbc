use std::io::BufRead;
use app_logger::cli::{build_cli, parse_config};
use app_logger::internal::config::get_version_info;

fn main() -> anyhow::Result<()> {
    let matches = build_cli().get_matches();
    let config = match parse_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let logger = match app_logger::init_logger(&config) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialize logger: {}", e);
            std::process::exit(1);
        }
    };

    app_logger::log_debug!(logger, "{}", get_version_info());
    app_logger::log_debug!(logger, "File sink: {}", config.file.filename);

    let stream = logger.stream();
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        stream.write(&line);
    }

    Ok(())
}
