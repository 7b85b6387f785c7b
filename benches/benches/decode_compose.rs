//! Benchmark suite for atlas decoding and map composition
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tkview_benches::{generate_atlas, generate_map, generate_objects, generate_palette};
use tkview_types::file::epf::Decoder;
use tkview_types::file::{StaticObjects, TableIndex, Transparency};
use tkview_types::render::compose;

const ATLAS_FRAMES: usize = 64;

/// Benchmark decoding a whole atlas under each transparency policy
fn bench_decode_atlas(c: &mut Criterion) {
	let mut group = c.benchmark_group("atlas_decode");
	let (store, index) = generate_atlas(ATLAS_FRAMES);
	let palettes = vec![generate_palette()];
	group.throughput(Throughput::Elements(ATLAS_FRAMES as u64));

	for (name, transparency) in [("opaque", Transparency::None), ("alpha", Transparency::alpha())] {
		group.bench_function(name, |b| {
			let decoder = Decoder::new(&store, &index, &palettes);
			b.iter(|| black_box(decoder.get_frames(black_box(transparency))));
		});
	}

	group.finish();
}

/// Benchmark frame table parsing
fn bench_table_parsing(c: &mut Criterion) {
	let data = TableIndex::contiguous(4096).to_bytes();
	c.bench_function("table_parse", |b| {
		b.iter(|| black_box(TableIndex::from_bytes(black_box(&data))));
	});
}

/// Benchmark map composition for several map sizes
fn bench_compose(c: &mut Criterion) {
	let mut group = c.benchmark_group("map_compose");
	let (store, index) = generate_atlas(ATLAS_FRAMES);
	let palettes = vec![generate_palette()];
	let decoder = Decoder::new(&store, &index, &palettes);
	let frames = decoder.get_frames(Transparency::None).unwrap_or_default();
	let objects = StaticObjects::build(generate_objects(32, ATLAS_FRAMES), &decoder)
		.unwrap_or_else(|e| panic!("cannot build objects: {e}"));

	for size in [16u16, 64, 128] {
		let map = generate_map(size, size, ATLAS_FRAMES, objects.len());
		group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));
		group.bench_with_input(BenchmarkId::new("cells", size), &map, |b, map| {
			b.iter(|| {
				black_box(compose(
					map,
					&frames,
					&frames,
					objects.objects(),
					objects.composite_sprites(),
				))
			});
		});
	}

	group.finish();
}

criterion_group!(benches, bench_decode_atlas, bench_table_parsing, bench_compose);
criterion_main!(benches);
