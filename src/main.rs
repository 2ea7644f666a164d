//! EpicPrefill - Lancache prefill tool for the Epic Games Store
//!
//! Binds and validates the command line, sets up logging and the cache and
//! config directories, then hands the prepared request to the download engine.

use anyhow::Result;
use epic_prefill::cli::{BindError, Cli, Commands, PrefillRequest};
use epic_prefill::utils::{logging, AppConfig, ValidationError};
use tracing::{debug, info};

fn main() -> Result<()> {
    let cli = match Cli::try_bind_from(std::env::args_os()) {
        Ok(cli) => cli,
        Err(BindError::Validation(e)) => exit_with(e),
        Err(BindError::Clap(e)) => e.exit(),
    };

    // Initialize logging
    logging::init();

    match cli.command {
        Commands::Prefill(args) => {
            let options = args.validate().unwrap_or_else(|e| exit_with(e));

            let config = AppConfig::initialize_verbose(args.verbose())?;
            debug!("Resolved configuration:\n{}", config);

            let request = PrefillRequest::new(options, &config);
            info!(
                "Prefill request ready for {} operating system(s), speeds shown in {}",
                request.options.operating_systems.len(),
                request.options.transfer_speed_unit
            );
            print_request(&request);
        }
        Commands::ClearTemp(args) => {
            let config = AppConfig::initialize_verbose(args.verbose())?;

            let removed = config.clear_cache()?;
            println!(
                "Removed {} item(s) from {}",
                removed,
                config.cache_dir.display()
            );
        }
    }

    Ok(())
}

/// Print the diagnostic and stop. Nothing has run yet at this point.
fn exit_with(err: ValidationError) -> ! {
    eprintln!("{}", err.render());
    std::process::exit(err.exit_code);
}

fn print_request(request: &PrefillRequest) {
    let os_list: Vec<&str> = request
        .options
        .operating_systems
        .iter()
        .map(|os| os.as_str())
        .collect();

    println!("Operating systems:        {}", os_list.join(", "));
    println!("Transfer speed unit:      {}", request.options.transfer_speed_unit);
    println!("All owned apps:           {}", request.options.download_all_owned);
    println!("Recently played apps:     {}", request.options.prefill_recent);
    println!("Force download:           {}", request.options.force);
    println!("Max concurrent requests:  {}", request.max_concurrent_requests);
    println!("Request timeout:          {}s", request.request_timeout.as_secs());
    println!("Cache directory:          {}", request.cache_dir.display());
}
