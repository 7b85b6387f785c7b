use tkview_rs::prelude::*;

use crate::fixtures::{DataDir, color_a};

#[test_log::test]
fn test_session_renders_relative_map() {
	let data = DataDir::new();
	let session = Session::load(data.paths()).unwrap();

	assert_eq!(session.tile_a().frames().len(), 6);
	assert_eq!(session.static_objects().len(), 2);

	let raster = session.render_map("scenario.map").unwrap();
	assert_eq!((raster.width(), raster.height()), (48, 48));
	assert_eq!(raster.get(0, 0), Some(color_a(5)));
}

#[test_log::test]
fn test_session_compositor_background() {
	let data = DataDir::new();
	let teal = Color::rgb(0, 128, 128);
	let session = Session::load(data.paths()).unwrap().with_compositor(Compositor::new().with_background(teal));

	let map = session.load_map("scenario.map").unwrap();
	assert_eq!((map.width(), map.height()), (2, 2));
	let raster = session.render(&map).unwrap();
	assert_eq!(raster.get(30, 5), Some(teal));
	assert_eq!(raster.get(0, 0), Some(color_a(5)));

	let absolute = session.load_map(data.path().join("scenario.map")).unwrap();
	assert_eq!(absolute, map);
	assert!(session.load_map("absent.map").is_err());
}

#[test_log::test]
fn test_export_all_uses_set_prefixes() {
	let data = DataDir::new();
	let session = Session::load(data.paths()).unwrap();
	let out = data.path().join("export");

	let written = session.export_all(&out, ImageFormat::Bmp).unwrap();
	assert_eq!(written.len(), 6 + 3 + 3 + 2);
	for name in ["tileA_0.bmp", "tileA_5.bmp", "tileB_2.bmp", "tileC_0.bmp", "tileStatic_1.bmp"] {
		assert!(out.join(name).is_file(), "{name} missing");
	}
}

#[test_log::test]
fn test_export_single_frame() {
	let data = DataDir::new();
	let session = Session::load(data.paths()).unwrap();
	let path = data.path().join("tile.png");

	session.export_frame(TileSet::A, 3, &path, ImageFormat::Png).unwrap();
	assert!(path.is_file());
	assert!(matches!(
		session.export_frame(TileSet::Static, 2, &path, ImageFormat::Png),
		Err(ExportError::FrameOutOfRange {
			index: 2,
			count: 2,
		})
	));
}

#[test_log::test]
fn test_sheets() {
	let data = DataDir::new();
	let session = Session::load(data.paths()).unwrap();

	let tiles = session.sheet(TileSet::A, TileSet::A.sheet_layout());
	assert_eq!((tiles.width(), tiles.height()), (6 * 24 + 5, 24));

	let sprites = session.sheet(TileSet::Static, TileSet::Static.sheet_layout());
	assert_eq!((sprites.width(), sprites.height()), (2 * 24 + 1, 58));
}

#[test_log::test]
fn test_failed_load_names_the_file() {
	let data = DataDir::new();
	std::fs::remove_file(data.path().join("SObj.tbl")).unwrap();

	let err = Session::load(data.paths()).unwrap_err();
	assert!(err.to_string().contains("SObj.tbl"), "{err}");
}
