//! PrimePulse CLI entry point

use anyhow::{Context, Result};
use primepulse::config::cli::Cli;
use primepulse::config::{toml::load_config, validator::validate_config, Config};
use primepulse::coordinator::Coordinator;
use primepulse::output::sink::FileSink;
use primepulse::output::{json, text};
use primepulse::util::resource::ResourceSnapshot;
use std::time::Instant;

fn main() -> Result<()> {
    println!("PrimePulse v{}", env!("CARGO_PKG_VERSION"));
    println!("Parallel prime counting and summing");
    println!();

    let cli = Cli::parse_args();
    cli.validate()?;

    let config_start = Instant::now();
    let config = load_config(&cli)?;
    validate_config(&config).context("Configuration validation failed")?;
    if config.runtime.debug {
        eprintln!(
            "DEBUG TIMING: Config build: {:.3}s",
            config_start.elapsed().as_secs_f64()
        );
    }

    println!("{}", config);

    if config.runtime.dry_run {
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    println!();
    println!("Starting computation...");
    println!();

    run(&config)
}

/// Run the computation, hand the result to the sink and print it
fn run(config: &Config) -> Result<()> {
    let coordinator = Coordinator::from_config(config)?;

    let before = ResourceSnapshot::take();
    let result = if config.output.no_sink {
        coordinator.run()?
    } else {
        let mut sink = FileSink::new(&config.output.sink_path);
        coordinator.run_with_sink(&mut sink)?
    };
    let after = ResourceSnapshot::take();

    let cpu_percent = before.zip(after).map(|(b, a)| a.cpu_percent_since(&b));
    if config.runtime.debug && cpu_percent.is_none() {
        eprintln!("DEBUG: CPU utilization unavailable on this platform");
    }

    text::print_results(&result, cpu_percent, config.output.per_worker);

    if !config.output.no_sink {
        println!("Result written to {}", config.output.sink_path.display());
    }

    if let Some(ref path) = config.output.json_output {
        json::write_json(path, &result, config, cpu_percent)?;
        println!("JSON results written to {}", path.display());
    }

    Ok(())
}
