//! Tile viewer utility.
//!
//! Browses the tile atlases, static objects and maps of a game data directory
//! without a GUI: every view the viewer offers is written to an image file.
//!
//! # Usage
//!
//! ```bash
//! # Summarize the loaded atlases
//! cargo run --example tkview_utils -- info
//!
//! # Export every frame of every set as BMP files
//! cargo run --example tkview_utils -- export --all -o export/
//!
//! # Export a single atlas B frame
//! cargo run --example tkview_utils -- export b --frame 12 -o tile.bmp
//!
//! # Lay out the static object sprites on one sheet
//! cargo run --example tkview_utils -- sheet static -o sobj.png
//!
//! # Render a map
//! cargo run --example tkview_utils -- render-map town.map -o town.png
//! ```
//!
//! Asset locations come from `tkview.toml` (or `--config`), `TKVIEW_*`
//! environment variables, and `--data-dir`, in increasing priority.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use serde::Serialize;
use tkview_rs::prelude::*;

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	let mut settings = load_settings(cli.config.as_deref()).context("Failed to load settings")?;
	if let Some(dir) = cli.data_dir {
		settings.assets.data_dir = dir;
	}
	debug!("settings: {settings:?}");
	info!("Loading assets from {}", settings.assets.data_dir.display());

	let session = Session::load(settings.assets.clone())
		.map_err(describe)
		.with_context(|| format!("Failed to load assets from {}", settings.assets.data_dir.display()))?;

	match cli.command {
		Command::Info(opts) => run_info(&session, &opts),
		Command::Export(opts) => run_export(&session, &settings, opts),
		Command::Sheet(opts) => run_sheet(&session, &settings, opts),
		Command::RenderMap(opts) => run_render_map(&session, &settings, opts),
	}
}

#[derive(Parser)]
#[command(name = "tkview_utils")]
#[command(author = "tkview-rs project")]
#[command(version)]
#[command(about = "Inspect, export and render tile atlases and maps", long_about = None)]
struct Cli {
	/// Settings file (TOML)
	#[arg(short, long, value_name = "FILE", global = true)]
	config: Option<PathBuf>,

	/// Asset directory, overriding the settings
	#[arg(short, long, value_name = "DIR", global = true, env = "TKVIEW_DATA_DIR")]
	data_dir: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Summarize the loaded atlases and static objects
	Info(InfoArgs),
	/// Export frames or sprites to image files
	Export(ExportArgs),
	/// Lay out a tile set as a contact sheet
	Sheet(SheetArgs),
	/// Compose a map into one image
	RenderMap(RenderMapArgs),
}

#[derive(Args)]
struct InfoArgs {
	/// Print the summary as JSON
	#[arg(long, default_value_t = false)]
	json: bool,
}

#[derive(Args)]
struct ExportArgs {
	/// Tile set to export: a, b, c or static
	#[arg(value_name = "SET", required_unless_present = "all")]
	set: Option<TileSet>,

	/// Export every set, prefixed tileA, tileB, tileC and tileStatic
	#[arg(long, default_value_t = false, conflicts_with_all = ["set", "frame"])]
	all: bool,

	/// Export only this frame; the output is then a file path
	#[arg(short, long, value_name = "INDEX")]
	frame: Option<usize>,

	/// Output directory, or file with --frame
	#[arg(short, long, value_name = "PATH", default_value = "export")]
	output: PathBuf,

	/// Image format (bmp or png)
	#[arg(long, value_name = "FORMAT")]
	format: Option<ImageFormat>,
}

#[derive(Args)]
struct SheetArgs {
	/// Tile set to lay out: a, b, c or static
	#[arg(value_name = "SET")]
	set: TileSet,

	/// Output image path
	#[arg(short, long, value_name = "FILE")]
	output: PathBuf,

	/// Columns per row (0 for a single row)
	#[arg(long, value_name = "COUNT")]
	columns: Option<usize>,
}

#[derive(Args)]
struct RenderMapArgs {
	/// Map file, relative to the data directory unless absolute
	#[arg(value_name = "MAP")]
	map: PathBuf,

	/// Output image path
	#[arg(short, long, value_name = "FILE")]
	output: PathBuf,
}

#[derive(Debug, Serialize)]
struct AtlasSummary {
	set: String,
	frames: usize,
	palettes: usize,
	data_size: u32,
}

#[derive(Debug, Serialize)]
struct Summary {
	data_dir: PathBuf,
	atlases: Vec<AtlasSummary>,
	static_objects: usize,
	tallest_object: u32,
}

/// Adds the error kind to asset errors; the path is already in the message.
fn describe(err: AssetError) -> anyhow::Error {
	let kind = err.kind_name();
	anyhow::Error::new(err).context(kind)
}

/// Format from the flag, then the output extension, then the settings.
fn pick_format(explicit: Option<ImageFormat>, output: &std::path::Path, settings: &Settings) -> ImageFormat {
	explicit.or_else(|| ImageFormat::from_path(output)).unwrap_or(settings.export.format)
}

fn run_info(session: &Session, args: &InfoArgs) -> Result<()> {
	let atlases = [(TileSet::A, session.tile_a()), (TileSet::B, session.tile_b()), (TileSet::C, session.tile_c())]
		.into_iter()
		.map(|(set, atlas)| AtlasSummary {
			set: set.to_string(),
			frames: atlas.frames().len(),
			palettes: atlas.palettes().len(),
			data_size: atlas.index().data_size(),
		})
		.collect();
	let objects = session.static_objects();
	let summary = Summary {
		data_dir: session.paths().data_dir.clone(),
		atlases,
		static_objects: objects.len(),
		tallest_object: objects.objects().iter().map(StaticObject::height).max().unwrap_or(0),
	};

	if args.json {
		println!("{}", serde_json::to_string_pretty(&summary)?);
		return Ok(());
	}

	println!("Data directory: {}", summary.data_dir.display());
	for atlas in &summary.atlases {
		println!(
			"  Atlas {}: {} frames, {} palettes, {} bytes",
			atlas.set, atlas.frames, atlas.palettes, atlas.data_size
		);
	}
	println!("  Static objects: {} (tallest {} tiles)", summary.static_objects, summary.tallest_object);
	Ok(())
}

fn run_export(session: &Session, settings: &Settings, args: ExportArgs) -> Result<()> {
	if args.all {
		let format = args.format.unwrap_or(settings.export.format);
		let written = session.export_all(&args.output, format)?;
		println!("Exported {} images to {}", written.len(), args.output.display());
		return Ok(());
	}

	let Some(set) = args.set else {
		bail!("No tile set given");
	};
	match args.frame {
		Some(index) => {
			let format = pick_format(args.format, &args.output, settings);
			session
				.export_frame(set, index, &args.output, format)
				.with_context(|| format!("Failed to export {set} frame {index}"))?;
			println!("Exported {set} frame {index} to {}", args.output.display());
		}
		None => {
			let format = args.format.unwrap_or(settings.export.format);
			let written = session.export(set, &args.output, format)?;
			println!("Exported {} images to {}", written.len(), args.output.display());
		}
	}
	Ok(())
}

fn run_sheet(session: &Session, settings: &Settings, args: SheetArgs) -> Result<()> {
	let mut layout = match args.set {
		TileSet::Static => args.set.sheet_layout(),
		_ => settings.export.sheet_layout(),
	};
	if let Some(columns) = args.columns {
		layout.columns = columns;
	}

	debug!("{} sheet layout: {layout:?}", args.set);
	let sheet = session.sheet(args.set, layout);
	if sheet.width() == 0 || sheet.height() == 0 {
		bail!("Tile set {} is empty", args.set);
	}
	save_raster(&sheet, &args.output, pick_format(None, &args.output, settings))?;
	println!("Wrote {} sheet ({sheet}) to {}", args.set, args.output.display());
	Ok(())
}

fn run_render_map(session: &Session, settings: &Settings, args: RenderMapArgs) -> Result<()> {
	info!("Rendering {}", args.map.display());
	let raster = session.render_map(&args.map).map_err(describe)?;
	save_raster(&raster, &args.output, pick_format(None, &args.output, settings))?;
	println!("Rendered {} ({raster}) to {}", args.map.display(), args.output.display());
	Ok(())
}
