//! Fixture media CLI
//!
//! Dumps records together with the files their file-valued fields point
//! at, and loads them back.
//!
//! ## Usage
//!
//! ```bash
//! fixturemedia dump_object gallery.Photo 1 2 --outfile gallery/fixtures/photos.json
//! fixturemedia loaddata photos
//! fixturemedia --settings site/fixturemedia.toml loaddata photos --app gallery
//! ```

mod logging;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use reinhardt_fixturemedia::{
	CommandError, CommandResult, DumpObjectArgs, DumpObjectCommand, DumpObjectOptions,
	FixtureMediaSettings, MediaLoadDataCommand,
};
use reinhardt_seeding::commands::{LoadDataArgs, LoadDataOptions};
use reinhardt_storages::create_storage;

#[derive(Parser, Debug)]
#[command(name = "fixturemedia")]
#[command(about = "Dump and load fixtures together with their media files", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Settings file (defaults to $FIXTUREMEDIA_SETTINGS, then ./fixturemedia.toml)
	#[arg(long, global = true, value_name = "PATH")]
	settings: Option<PathBuf>,

	/// Verbosity level (can be repeated)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	verbosity: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Dump objects to a fixture, copying their media next to it
	#[command(name = "dump_object")]
	DumpObject {
		/// Model label (app.Model)
		#[arg(value_name = "MODEL")]
		model: String,

		/// Primary keys to dump (all records when omitted)
		#[arg(value_name = "IDS")]
		ids: Vec<String>,

		/// Specifies the file to write the serialized items to (required)
		#[arg(long, value_name = "PATH")]
		outfile: Option<PathBuf>,

		/// Serialization format (`yaml` needs the `yaml` feature)
		#[arg(long, default_value = "json")]
		format: String,

		/// Indentation width for pretty output
		#[arg(long, default_value_t = 4)]
		indent: usize,
	},

	/// Install fixtures, restoring their media into storage
	Loaddata {
		/// Fixture labels or files
		#[arg(value_name = "FIXTURE", required = true)]
		fixtures: Vec<String>,

		/// Ignore records of models that are not registered
		#[arg(long, short = 'i')]
		ignorenonexistent: bool,

		/// Only load records of the given app
		#[arg(long, value_name = "LABEL")]
		app: Option<String>,
	},
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
	let cli = Cli::parse();
	logging::init(cli.verbosity);

	if let Err(e) = run(cli).await {
		eprintln!("CommandError: {}", e);
		process::exit(1);
	}
}

async fn run(cli: Cli) -> CommandResult<()> {
	match cli.command {
		Commands::DumpObject {
			model,
			ids,
			outfile,
			format,
			indent,
		} => {
			let outfile = outfile.ok_or(CommandError::MissingOutfile)?;
			let options = DumpObjectOptions::new()
				.with_outfile(outfile)
				.with_format(format)
				.with_indent(indent);
			run_dump_object(cli.settings, DumpObjectArgs::new(model).with_ids(ids), options).await
		}
		Commands::Loaddata {
			fixtures,
			ignorenonexistent,
			app,
		} => {
			let options = LoadDataOptions::new()
				.with_ignore_missing(ignorenonexistent)
				.with_app_labels(app.into_iter().collect());
			run_loaddata(cli.settings, LoadDataArgs::new(fixtures), options).await
		}
	}
}

async fn run_dump_object(
	settings: Option<PathBuf>,
	args: DumpObjectArgs,
	options: DumpObjectOptions,
) -> CommandResult<()> {
	let settings = FixtureMediaSettings::load(settings.as_deref())?;
	let storage = create_storage(settings.storage_config()?)?;
	let command = DumpObjectCommand::new(
		Arc::new(settings.record_store()?),
		Arc::new(settings.to_schema_registry()),
		storage,
	);
	tracing::debug!(command = command.name(), "{}", command.description());

	let result = command.execute(args, options).await?;
	tracing::info!(
		"Dumped {} object(s) and {} media file(s) to {}",
		result.records_dumped,
		result.media_files.len(),
		result.outfile.display()
	);
	Ok(())
}

async fn run_loaddata(
	settings: Option<PathBuf>,
	args: LoadDataArgs,
	options: LoadDataOptions,
) -> CommandResult<()> {
	let settings = FixtureMediaSettings::load(settings.as_deref())?;
	let storage = create_storage(settings.storage_config()?)?;
	let command = MediaLoadDataCommand::new(
		Arc::new(settings.record_store()?),
		Arc::new(settings.to_schema_registry()),
		storage,
	);
	tracing::debug!(command = command.name(), "{}", command.description());

	let options = options.with_fixture_dirs(settings.all_fixture_dirs());
	let result = command.execute(args, options).await?;
	println!(
		"Installed {} object(s) from {} fixture(s)",
		result.records_loaded, result.fixtures_loaded
	);
	Ok(())
}
