use clap::{Arg, Command};
use indicatif::{MultiProgress, ProgressBar};
use indicatif_log_bridge::LogWrapper;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use libpifgen::config::Config;
use libpifgen::process::process_file;

fn make_template_config(path: &Path) {
    let config = Config::default();
    let yaml_str = serde_yaml::to_string(&config).unwrap();
    let mut file = File::create(path).expect("Could not create template config file!");
    file.write_all(yaml_str.as_bytes())
        .expect("Failed to write yaml data to file!");
}

fn main() {
    // Create a cli
    let matches = Command::new("pifgen_cli")
        .arg_required_else_help(true)
        .subcommand(Command::new("new").about("Make a template configuration yaml file"))
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .help("Path to the configuration file"),
        )
        .get_matches();

    // Initialize feedback
    let logger = simplelog::TermLogger::new(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );

    let pb_manager = MultiProgress::new();

    LogWrapper::new(pb_manager.clone(), logger)
        .try_init()
        .expect("Could not create logging/progress!");

    // Parse the cli
    let config_path = PathBuf::from(matches.get_one::<String>("path").expect("We require args"));

    if matches.subcommand_matches("new").is_some() {
        log::info!(
            "Making a template config at {}...",
            config_path.to_string_lossy()
        );

        make_template_config(&config_path);
        log::info!("Done.");
        return;
    }

    // Load our config
    log::info!("Loading config from {}...", config_path.to_string_lossy());
    let config = match Config::read_config_file(&config_path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    log::info!("Config successfully loaded.");
    log::info!("Output Path: {}", config.output_path.to_string_lossy());
    log::info!("Duplicate Policy: {:?}", config.duplicate_policy);
    log::info!("Directory Retries: {}", config.directory_retries);
    log::info!("Input Files: {}", config.input_files.len());

    // Convert each sheet, one progress tick per input file
    let pb = pb_manager.add(ProgressBar::new(config.input_files.len() as u64));
    let mut total_records = 0;
    for input_file in &config.input_files {
        log::info!("Processing {}...", input_file.display());
        match process_file(&config, input_file) {
            Ok(written) => {
                total_records += written.len();
                log::info!("Finished processing {}.", input_file.display());
            }
            Err(e) => {
                pb.abandon();
                log::error!("Processing failed with error: {e}");
                std::process::exit(1);
            }
        }
        pb.inc(1);
    }
    pb.finish();

    log::info!(
        "Successfully wrote {} records from {} input files.",
        total_records,
        config.input_files.len()
    );
    log::info!("Done.");
}
