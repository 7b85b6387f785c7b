use tkview_rs::prelude::*;
use tkview_rs::tkview_types::file::epf::encode_tile;

use crate::fixtures::{DataDir, TILE, color_a, color_c, write_map};

#[test_log::test]
fn test_atlas_yields_one_frame_per_entry() {
	let data = DataDir::new();
	let atlas = load_atlas(data.stem("TileA")).unwrap();

	assert_eq!(atlas.frames().len(), atlas.index().frame_count());
	assert_eq!(atlas.frames().len(), 6);
	for (n, frame) in atlas.frames().iter().enumerate() {
		assert_eq!((frame.width(), frame.height()), (24, 24));
		assert_eq!(frame.color_at(0, 0), Some(color_a(n as u8)));
		assert!(frame.indices().iter().all(|&i| i == n as u8));
	}
}

#[test_log::test]
fn test_entries_select_their_palette_file() {
	let data = DataDir::new();
	let root = data.path();

	let entries = vec![TableEntry::new(0, 0), TableEntry::new(0x06C0, 1)];
	let index = TableIndex::new(2, 2 * 0x06C0, entries).unwrap();
	let store: Vec<u8> = [encode_tile(&[3; TILE]), encode_tile(&[3; TILE])].concat();
	std::fs::write(root.join("Multi.tbl"), index.to_bytes()).unwrap();
	std::fs::write(root.join("Multi.epf"), store).unwrap();
	for (slot, color) in [Color::rgb(1, 1, 1), Color::rgb(2, 2, 2)].into_iter().enumerate() {
		let palette = Palette::from_colors(vec![color; 256]);
		std::fs::write(root.join(format!("Multi{slot}.pal")), palette.to_bytes()).unwrap();
	}

	let atlas = load_atlas(data.stem("Multi")).unwrap();
	assert_eq!(atlas.palettes().len(), 2);
	assert_eq!(atlas.frames()[0].color_at(0, 0), Some(Color::rgb(1, 1, 1)));
	assert_eq!(atlas.frames()[1].color_at(0, 0), Some(Color::rgb(2, 2, 2)));
}

#[test_log::test]
fn test_short_store_fails_with_path() {
	let data = DataDir::new();
	let epf = data.path().join("TileA.epf");
	let store = std::fs::read(&epf).unwrap();
	std::fs::write(&epf, &store[..store.len() - 1]).unwrap();

	let err = load_atlas(data.stem("TileA")).unwrap_err();
	assert!(err.to_string().contains("TileA.epf"), "{err}");
	assert!(matches!(
		err.root(),
		AssetError::FrameDecode(FrameDecodeError::OutOfBounds {
			frame: 5,
			..
		})
	));
}

#[test_log::test]
fn test_missing_palette_file_fails_with_path() {
	let data = DataDir::new();
	std::fs::remove_file(data.path().join("TileB0.pal")).unwrap();

	let err = load_atlas(data.stem("TileB")).unwrap_err();
	assert!(err.to_string().contains("TileB0.pal"), "{err}");
	assert!(matches!(err.root(), AssetError::IOError(_)));
}

#[test_log::test]
fn test_load_map() {
	let data = DataDir::new();
	let map = load_map(data.path().join("scenario.map")).unwrap();

	assert_eq!((map.width(), map.height()), (2, 2));
	assert_eq!(map.get(0, 1), Some(&MapCell::new(49152, 1)));
	assert_eq!(map.get(0, 1).map(MapCell::tile), Some(TileRef::B(1)));
}

#[test_log::test]
fn test_short_map_fails() {
	let data = DataDir::new();
	let mut bytes = crate::fixtures::scenario_map().to_bytes();
	bytes.truncate(bytes.len() - 4);
	let path = data.path().join("short.map");
	std::fs::write(&path, bytes).unwrap();

	let err = load_map(&path).unwrap_err();
	assert!(matches!(
		err.root(),
		AssetError::MalformedMap {
			..
		}
	));

	let zero = data.path().join("zero.map");
	std::fs::write(&zero, [0, 0, 0, 1]).unwrap();
	assert!(load_map(&zero).is_err());
	// a valid map still loads after a failed one
	let ok = write_map(data.path(), "ok.map", &crate::fixtures::scenario_map());
	assert!(load_map(ok).is_ok());
}

#[test_log::test]
fn test_static_objects_from_atlas_c() {
	let data = DataDir::new();
	let tile_c = load_atlas(data.stem("TileC")).unwrap();
	let objects = load_static_objects(data.path().join("SObj.tbl"), &tile_c).unwrap();

	assert_eq!(objects.len(), 2);
	assert_eq!(objects.objects()[1].height(), 2);

	let sprite = &objects.composite_sprites()[1];
	assert_eq!((sprite.width(), sprite.height()), (24, 48));
	assert_eq!(sprite.get(0, 0), Some(Color::transparent()));
	assert_eq!(sprite.get(0, 12), Some(color_c(7)));
	assert_eq!(sprite.get(0, 24), Some(color_c(9)));
	assert_eq!(sprite.get(0, 47), Some(Color::transparent()));

	let display = &objects.display_sprites()[1];
	assert_eq!((display.width(), display.height()), (24, 58));
	assert_eq!(display.get(0, 0), Some(Color::BLUE));
	assert_eq!(display.get(0, 10), Some(Color::BLUE));
	assert_eq!(display.get(0, 22), Some(color_c(7)));
}

#[test_log::test]
fn test_truncated_object_table_fails() {
	let data = DataDir::new();
	let tile_c = load_atlas(data.stem("TileC")).unwrap();
	let path = data.path().join("SObj.tbl");
	let table = std::fs::read(&path).unwrap();
	std::fs::write(&path, &table[..table.len() - 1]).unwrap();

	let err = load_static_objects(&path, &tile_c).unwrap_err();
	assert!(err.to_string().contains("SObj.tbl"), "{err}");
	assert!(matches!(
		err.root(),
		AssetError::SourceTruncated {
			file_type: FileType::SObj,
			..
		}
	));
}
