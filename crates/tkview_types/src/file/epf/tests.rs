//! Unit tests for atlas frame decoding

use super::*;
use crate::file::{Color, TILE_PIXELS};

fn palettes() -> Vec<Palette> {
	vec![
		Palette::from_colors((0..=255u8).map(|i| Color::rgb(i, 0, 0)).collect()),
		Palette::from_colors((0..=255u8).map(|i| Color::rgb(0, i, 0)).collect()),
	]
}

/// Builds a store where tile `n` is filled with palette index `n + 1`.
fn create_test_store(tiles: usize) -> File {
	let mut data = Vec::new();
	for n in 0..tiles {
		data.extend(encode_tile(&[(n + 1) as u8; TILE_PIXELS]));
	}
	File::from_bytes(data)
}

fn table(entries: Vec<TableEntry>, data_size: usize) -> TableIndex {
	TableIndex::new(2, data_size as u32, entries).unwrap()
}

#[test]
fn test_decodes_one_frame_per_entry() {
	let store = create_test_store(3);
	let index = TableIndex::contiguous(3);
	let palettes = palettes();
	let frames = Decoder::new(&store, &index, &palettes).get_frames(Transparency::None).unwrap();

	assert_eq!(frames.len(), 3);
	for (n, frame) in frames.iter().enumerate() {
		assert_eq!((frame.width(), frame.height()), (24, 24));
		assert_eq!(frame.color_at(5, 5), Some(Color::rgb(n as u8 + 1, 0, 0)));
	}
}

#[test]
fn test_uses_palette_slot_of_entry() {
	let store = create_test_store(2);
	let index = table(vec![TableEntry::new(0, 0), TableEntry::new(1728, 1)], 2 * 1728);
	let palettes = palettes();
	let decoder = Decoder::new(&store, &index, &palettes);

	assert_eq!(decoder.decode(0, Transparency::None).unwrap().color_at(0, 0), Some(Color::rgb(1, 0, 0)));
	assert_eq!(decoder.decode(1, Transparency::None).unwrap().color_at(0, 0), Some(Color::rgb(0, 2, 0)));
}

#[test]
fn test_preserves_table_indexing() {
	// Two entries share a block and the table order differs from store order.
	let store = create_test_store(3);
	let index = table(
		vec![TableEntry::new(1728, 0), TableEntry::new(1728, 0), TableEntry::new(3456, 0)],
		3 * 1728,
	);
	let palettes = palettes();
	let frames = Decoder::new(&store, &index, &palettes).get_frames(Transparency::None).unwrap();

	assert_eq!(frames.len(), 3);
	assert_eq!(frames[0], frames[1]);
	assert_eq!(frames[2].index_at(0, 0), Some(3));
}

#[test]
fn test_last_frame_past_store_end_fails() {
	let store = create_test_store(2);
	// The table claims three tiles, but the store only has two.
	let index = TableIndex::contiguous(3);
	let palettes = palettes();
	let err = Decoder::new(&store, &index, &palettes).get_frames(Transparency::None).unwrap_err();

	assert!(matches!(
		err,
		AssetError::FrameDecode(FrameDecodeError::OutOfBounds {
			frame: 2,
			offset: 3456,
			required: 5184,
			available: 3456,
		})
	));
}

#[test]
fn test_truncated_last_block_fails() {
	let mut data = create_test_store(2).as_bytes().to_vec();
	data.truncate(data.len() - 1);
	let store = File::from_bytes(data);
	let index = TableIndex::contiguous(2);
	let palettes = palettes();
	let decoder = Decoder::new(&store, &index, &palettes);

	assert!(decoder.decode(0, Transparency::None).is_ok());
	assert!(matches!(
		decoder.decode(1, Transparency::None),
		Err(AssetError::FrameDecode(FrameDecodeError::OutOfBounds {
			..
		}))
	));
}

#[test]
fn test_missing_palette_slot() {
	let store = create_test_store(1);
	let index = table(vec![TableEntry::new(0, 1)], 1728);
	let palettes = vec![palettes().remove(0)];
	let err = Decoder::new(&store, &index, &palettes).decode(0, Transparency::None).unwrap_err();

	assert!(matches!(
		err,
		AssetError::MissingReference {
			kind: ReferenceKind::Palette,
			index: 1,
			available: 1,
		}
	));
}

#[test]
fn test_frame_outside_table() {
	let store = create_test_store(1);
	let index = TableIndex::contiguous(1);
	let palettes = palettes();
	assert!(matches!(
		Decoder::new(&store, &index, &palettes).decode(1, Transparency::None),
		Err(AssetError::MissingReference {
			kind: ReferenceKind::Frame,
			..
		})
	));
}

#[test]
fn test_short_palette_rejects_large_indices() {
	let store = create_test_store(4);
	let index = TableIndex::contiguous(4);
	let palettes = vec![Palette::from_colors(vec![Color::BLACK; 3])];
	let mut frames = Decoder::new(&store, &index, &palettes).iter(Transparency::None);

	assert_eq!(frames.len(), 4);
	assert!(frames.next().unwrap().is_ok());
	assert!(frames.next().unwrap().is_ok());
	assert!(matches!(
		frames.next().unwrap(),
		Err(AssetError::FrameDecode(FrameDecodeError::PaletteIndexOutOfRange {
			index: 3,
			len: 3
		}))
	));
	assert_eq!(frames.len(), 1);
}

#[test]
fn test_lazy_and_eager_agree() {
	let store = create_test_store(5);
	let index = TableIndex::contiguous(5);
	let palettes = palettes();
	let decoder = Decoder::new(&store, &index, &palettes);

	let lazy = decoder.iter(Transparency::alpha()).collect::<Result<Vec<_>, _>>().unwrap();
	assert_eq!(lazy, decoder.get_frames(Transparency::alpha()).unwrap());
}

#[test]
fn test_from_reader_matches_from_bytes() {
	let data = create_test_store(2).as_bytes().to_vec();
	let read = File::from_reader(&mut data.as_slice()).unwrap();
	assert_eq!(read, File::from_bytes(data));
	assert_eq!(read.len(), 2 * TILE_BYTES);
}

#[test]
fn test_open_reports_missing_path() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("TileA.epf");
	let err = File::open(&path).unwrap_err();
	assert!(err.to_string().contains("TileA.epf"), "{err}");
	assert!(matches!(err.root(), AssetError::IOError(_)));

	std::fs::write(&path, encode_tile(&[1; TILE_PIXELS])).unwrap();
	assert_eq!(File::open(&path).unwrap().len(), TILE_BYTES);
}
