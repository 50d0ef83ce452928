use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hgtgrid::HgtTile;

const SRTM3_SAMPLES: usize = 1201;

/// Build a synthetic SRTM3 payload with a simple elevation gradient.
fn srtm3_tile() -> HgtTile<Vec<u8>> {
    let mut data = Vec::with_capacity(SRTM3_SAMPLES * SRTM3_SAMPLES * 2);
    for row in 0..SRTM3_SAMPLES {
        for col in 0..SRTM3_SAMPLES {
            let elev = ((row + col) % 4000) as i16;
            data.extend_from_slice(&elev.to_be_bytes());
        }
    }
    HgtTile::from_source("N35E138", data).unwrap()
}

fn bench_single_lookup(c: &mut Criterion) {
    let tile = srtm3_tile();

    c.bench_function("single_lookup", |b| {
        b.iter(|| {
            black_box(
                tile.get_elevation(black_box(35.3606), black_box(138.7274))
                    .unwrap(),
            );
        });
    });
}

fn bench_lookup_1000(c: &mut Criterion) {
    let tile = srtm3_tile();

    // Generate 1000 coords within the tile
    let coords: Vec<(f64, f64)> = (0..1000)
        .map(|i| {
            let frac = i as f64 / 1000.0;
            (35.0 + frac * 0.99, 138.0 + frac * 0.99)
        })
        .collect();

    c.bench_function("lookup_1000", |b| {
        b.iter(|| {
            for &(lat, lon) in &coords {
                black_box(tile.get_elevation(lat, lon).unwrap());
            }
        });
    });
}

fn bench_full_grid(c: &mut Criterion) {
    let tile = srtm3_tile();

    c.bench_function("values_full_grid", |b| {
        b.iter(|| {
            let sum: i64 = tile
                .values()
                .map(|cell| i64::from(cell.unwrap().value))
                .sum();
            black_box(sum);
        });
    });
}

fn bench_blocks(c: &mut Criterion) {
    let tile = srtm3_tile();

    c.bench_function("samples_50x50", |b| {
        b.iter(|| {
            let count = tile
                .samples(50, 50)
                .unwrap()
                .map(|block| block.unwrap().values.len())
                .sum::<usize>();
            black_box(count);
        });
    });
}

criterion_group!(
    benches,
    bench_single_lookup,
    bench_lookup_1000,
    bench_full_grid,
    bench_blocks,
);
criterion_main!(benches);
