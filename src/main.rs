use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use appcatfinder::cli::Args;
use appcatfinder::config::{AppConfig, QueryLabel};
use appcatfinder::logger::{self, RunLogger, VerbosityLevel};
use appcatfinder::lookup::LookupEngine;
use appcatfinder::session::BrowserSession;
use appcatfinder::{export, input, pipeline};

fn main() -> Result<()> {
    let args = Args::parse();
    if let Err(message) = args.validate() {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }

    // Handle --init before any other processing.
    if args.init {
        match AppConfig::create_default_config() {
            Ok(path) => {
                println!("Created default configuration file at: {}", path.display());
                println!("Edit this file to customize settings, then run appcatfinder again.");
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("Failed to create configuration file: {}", e);
                std::process::exit(1);
            }
        }
    }

    let mut config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    apply_style_overrides(&args, &mut config);

    let verbosity = VerbosityLevel::from_verbose_count(args.verbose);
    logger::init_tracing(verbosity);
    let run_logger = RunLogger::new(verbosity);

    // An unreadable input file aborts before any lookups.
    run_logger.info(&format!("Reading input file {}", args.input));
    let queries = input::read_queries(Path::new(&args.input))
        .with_context(|| format!("failed to read queries from {}", args.input))?;
    run_logger.info(&format!("Processing {} queries", queries.len()));

    let records = {
        let session = BrowserSession::launch(&config.lookup, config.timing.page_timeout())
            .context("failed to launch browser session")?;
        let mut engine = LookupEngine::new(&session, &config.lookup, &config.timing);

        run_logger.start_progress(queries.len() as u64);
        let records = pipeline::run_lookups(
            &mut engine,
            &queries,
            config.timing.query_delay(),
            &run_logger,
        );
        run_logger.finish_progress("Lookups complete");
        records
        // The session drops here - Chrome is torn down before the results
        // are written, and on every error path above.
    };

    run_logger.info(&format!("Saving results to {}", args.output));
    let output_path = Path::new(&args.output);
    match args.output_format.as_str() {
        "csv" => export::write_csv(&records, output_path, &config.report),
        _ => export::write_xlsx(&records, output_path, &config.report),
    }
    .with_context(|| format!("failed to write results to {}", args.output))?;

    run_logger.record_output_file(&args.output);
    run_logger.print_final_summary();
    Ok(())
}

/// CLI flags override the report style variant from the config file.
fn apply_style_overrides(args: &Args, config: &mut AppConfig) {
    if let Some(label) = &args.query_label {
        config.report.query_label = match label.to_lowercase().as_str() {
            "application" => QueryLabel::Application,
            _ => QueryLabel::Url,
        };
    }
    if args.color_categories_only {
        config.report.color_whole_row = false;
    }
}
