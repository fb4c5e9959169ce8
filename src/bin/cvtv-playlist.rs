use clap::Parser;
use cvtv_playlist::config::{CliConfig, Config};
use cvtv_playlist::core::constants::exit_codes;
use cvtv_playlist::pipeline;
use cvtv_playlist::reporting::logging;
use cvtv_playlist::ui::output;
use cvtv_playlist::ui::{Cli, ProgressReporter, cli_to_config};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, on stdout
            let code = if e.use_stderr() {
                exit_codes::CONFIG_ERROR
            } else {
                exit_codes::SUCCESS
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };
    std::process::exit(run_playlist_logic(&cli).await);
}

/// Main playlist logic extracted from main() for testing
pub async fn run_playlist_logic(cli: &Cli) -> i32 {
    let cli_config = cli_to_config(cli);

    let config = match Config::resolve(&cli_config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return exit_codes::CONFIG_ERROR;
        }
    };

    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);
    logging::log_config_info(&config);

    let progress = create_progress_reporter(&output_settings);

    match pipeline::run(&config, progress.as_ref(), output_settings.quiet).await {
        Ok(summary) => {
            if !output_settings.quiet {
                output::display_summary(&summary);
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!("Fatal: {e}");
            exit_codes::FATAL
        }
    }
}

/// Settings for console output
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub show_progress: bool,
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    let quiet = cli_config.quiet;
    let verbose = config.verbose.unwrap_or(false);
    let show_progress = !quiet && !cli_config.no_progress && config.should_validate();

    OutputSettings {
        quiet,
        verbose,
        show_progress,
    }
}

/// Create progress reporter if needed
pub fn create_progress_reporter(output_settings: &OutputSettings) -> Option<ProgressReporter> {
    output_settings
        .show_progress
        .then(|| ProgressReporter::new(true))
}
