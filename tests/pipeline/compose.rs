use tkview_rs::prelude::*;

use crate::fixtures::{DataDir, color_a, color_b, color_c, scenario_map};

struct Loaded {
	tile_a: Atlas,
	tile_b: Atlas,
	objects: StaticObjects,
}

fn load(data: &DataDir) -> Loaded {
	let tile_c = load_atlas(data.stem("TileC")).unwrap();
	Loaded {
		tile_a: load_atlas(data.stem("TileA")).unwrap(),
		tile_b: load_atlas(data.stem("TileB")).unwrap(),
		objects: load_static_objects(data.path().join("SObj.tbl"), &tile_c).unwrap(),
	}
}

fn render(loaded: &Loaded, map: &MapGrid) -> Result<Raster, AssetError> {
	compose(
		map,
		loaded.tile_a.frames(),
		loaded.tile_b.frames(),
		loaded.objects.objects(),
		loaded.objects.composite_sprites(),
	)
}

#[test_log::test]
fn test_two_by_two_map() {
	let data = DataDir::new();
	let loaded = load(&data);
	let raster = render(&loaded, &scenario_map()).unwrap();

	assert_eq!((raster.width(), raster.height()), (48, 48));

	// Cell (0, 0): A frame 5, with the object's transparent top half over it.
	assert_eq!(raster.get(0, 0), Some(color_a(5)));
	assert_eq!(raster.get(23, 11), Some(color_a(5)));
	// The object anchored at (0, 1) is two rows tall and reaches into row 0.
	assert_eq!(raster.get(0, 12), Some(color_c(7)));
	assert_eq!(raster.get(23, 24), Some(color_c(9)));
	// Its bottom tile is transparent from row 36 down, exposing atlas B frame 1.
	assert_eq!(raster.get(0, 36), Some(color_b(2)));
	assert_eq!(raster.get(23, 47), Some(color_b(2)));
	// Empty cells show the background.
	assert_eq!(raster.get(30, 5), Some(Color::BLACK));
	assert_eq!(raster.get(47, 47), Some(Color::BLACK));
}

#[test_log::test]
fn test_base_tile_without_object() {
	let data = DataDir::new();
	let loaded = load(&data);
	let map = MapGrid::new(2, 1, vec![MapCell::new(49151, 0), MapCell::new(49153, 0)]).unwrap();
	let raster = render(&loaded, &map).unwrap();

	assert_eq!(raster.get(0, 0), Some(color_b(1)));
	assert_eq!(raster.get(24, 0), Some(color_b(3)));
}

#[test_log::test]
fn test_compose_is_repeatable() {
	let data = DataDir::new();
	let loaded = load(&data);
	let map = scenario_map();

	let first = render(&loaded, &map).unwrap();
	let second = render(&loaded, &map).unwrap();
	assert_eq!(first, second);
}

#[test_log::test]
fn test_missing_object_aborts() {
	let data = DataDir::new();
	let loaded = load(&data);
	let map = MapGrid::new(1, 1, vec![MapCell::new(1, 2)]).unwrap();

	let err = render(&loaded, &map).unwrap_err();
	assert!(matches!(
		err,
		AssetError::MissingReference {
			kind: ReferenceKind::StaticObject,
			index: 2,
			available: 2,
		}
	));
}

#[test_log::test]
fn test_missing_tile_aborts() {
	let data = DataDir::new();
	let loaded = load(&data);
	let map = MapGrid::new(1, 1, vec![MapCell::new(6, 0)]).unwrap();

	assert!(matches!(
		render(&loaded, &map),
		Err(AssetError::MissingReference {
			kind: ReferenceKind::AtlasA,
			index: 6,
			available: 6,
		})
	));
}
