use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

use replicr::config::Config;
use replicr::error::MirrorError;
use replicr::journal::Journal;
use replicr::logging;
use replicr::reconcile::Reconciler;
use replicr::scheduler::{MirrorJob, PassRunner, Scheduler};
use replicr::utils;

fn build_cli() -> Command {
	Command::new("replicr")
		.version(env!("CARGO_PKG_VERSION"))
		.author("Szilard Hajba <szilu@symbion.hu>")
		.about("Mirrors a source folder onto a destination folder at a fixed interval")
		.arg(
			Arg::new("source")
				.short('s')
				.long("source")
				.alias("source_folder")
				.value_name("DIR")
				.value_parser(value_parser!(PathBuf))
				.help("Folder to be replicated"),
		)
		.arg(
			Arg::new("destination")
				.short('d')
				.long("destination")
				.alias("destination_folder")
				.value_name("DIR")
				.value_parser(value_parser!(PathBuf))
				.help("Folder the content is replicated into"),
		)
		.arg(
			Arg::new("interval")
				.short('i')
				.long("interval")
				.value_name("SECONDS")
				.value_parser(value_parser!(u64).range(1..))
				.help("Seconds between synchronization starts"),
		)
		.arg(
			Arg::new("log")
				.short('l')
				.long("log")
				.value_name("FILE")
				.value_parser(value_parser!(PathBuf))
				.help("Log file synchronization activity is appended to"),
		)
		.arg(
			Arg::new("config")
				.short('c')
				.long("config")
				.value_name("FILE")
				.value_parser(value_parser!(PathBuf))
				.help("Config file (TOML, or JSON5 with a .json/.json5 extension)"),
		)
		.arg(
			Arg::new("log-level")
				.long("log-level")
				.value_name("LEVEL")
				.help("Diagnostic log level on stderr (RUST_LOG overrides)"),
		)
		.arg(
			Arg::new("no-echo")
				.long("no-echo")
				.action(ArgAction::SetTrue)
				.help("Do not echo the synchronization log to stdout"),
		)
		.arg(
			Arg::new("once")
				.long("once")
				.action(ArgAction::SetTrue)
				.help("Run a single synchronization and exit"),
		)
}

/// Defaults, then config file, then environment, then CLI flags
fn load_config(matches: &ArgMatches) -> Result<Config, MirrorError> {
	let mut config = match matches.get_one::<PathBuf>("config") {
		Some(path) => Config::from_file(path)?,
		None => Config::default(),
	};
	config.apply_env()?;

	if let Some(v) = matches.get_one::<PathBuf>("source") {
		config.source = Some(v.clone());
	}
	if let Some(v) = matches.get_one::<PathBuf>("destination") {
		config.destination = Some(v.clone());
	}
	if let Some(v) = matches.get_one::<u64>("interval") {
		config.interval = Some(*v);
	}
	if let Some(v) = matches.get_one::<PathBuf>("log") {
		config.log_file = Some(v.clone());
	}
	if let Some(v) = matches.get_one::<String>("log-level") {
		config.log_level = v.clone();
	}
	if matches.get_flag("no-echo") {
		config.echo_console = false;
	}
	Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
	let mut cmd = build_cli();
	let matches = cmd.get_matches_mut();

	let config = match load_config(&matches) {
		Ok(config) => config,
		Err(MirrorError::InvalidConfig(e)) => cmd.error(ErrorKind::ValueValidation, e).exit(),
		Err(e) => {
			eprintln!("Error: {}", e);
			return ExitCode::FAILURE;
		}
	};
	let settings = match config.resolve() {
		Ok(settings) => settings,
		Err(e) => cmd.error(ErrorKind::ValueValidation, e).exit(),
	};

	logging::init_tracing(&config.log_level);

	let mut job = MirrorJob::new(
		Reconciler::new(&settings.source, &settings.destination),
		Journal::new(&settings.log_file, settings.echo_console),
	);

	if matches.get_flag("once") {
		return match job.run_pass().await {
			Ok(report) if report.error_count() == 0 => ExitCode::SUCCESS,
			Ok(_) => ExitCode::FAILURE,
			Err(e) => {
				error!("Synchronization failed: {}", e);
				ExitCode::FAILURE
			}
		};
	}

	let shutdown = utils::shutdown_channel();
	let mut scheduler = Scheduler::new(settings.interval, job);
	scheduler.run(shutdown).await;
	println!("Mirroring terminated by user.");
	ExitCode::SUCCESS
}


// vim: ts=4
