use criterion::{Criterion, criterion_group, criterion_main};
use tristrip::StripConfig;
use tristrip::strip::{Stripifier, concatenate, split};

/// Generate a flat grid index buffer with `n x n` quads (2 triangles each).
fn make_grid(n: u32) -> (Vec<u32>, usize) {
    let verts_per_side = n + 1;
    let mut indices = Vec::with_capacity((n * n * 6) as usize);
    for y in 0..n {
        for x in 0..n {
            let tl = y * verts_per_side + x;
            let tr = tl + 1;
            let bl = tl + verts_per_side;
            let br = bl + 1;
            indices.extend_from_slice(&[tl, bl, tr, tr, bl, br]);
        }
    }
    (indices, (verts_per_side * verts_per_side) as usize)
}

fn bench_stripify(c: &mut Criterion) {
    // 100x100 grid = 20000 triangles
    let (indices, vertex_count) = make_grid(100);

    c.bench_function("stripify_20k", |b| {
        b.iter(|| Stripifier::run(&indices, &StripConfig::default()));
    });

    let swaps = StripConfig {
        allow_swaps: true,
        ..Default::default()
    };
    c.bench_function("stripify_swaps_20k", |b| {
        b.iter(|| Stripifier::run(&indices, &swaps));
    });

    let joined = StripConfig {
        concatenate: true,
        ..Default::default()
    };
    c.bench_function("stripify_concatenate_20k", |b| {
        b.iter(|| Stripifier::run(&indices, &joined));
    });

    c.bench_function("meshopt_stripify_20k", |b| {
        b.iter(|| meshopt::stripify(&indices, vertex_count, 0));
    });
}

fn bench_concat(c: &mut Criterion) {
    let strips: Vec<Vec<u32>> = (0..5000u32)
        .map(|i| (i * 7..i * 7 + 3 + i % 5).collect())
        .collect();
    let joined = concatenate(&strips);

    c.bench_function("concatenate_5k_strips", |b| {
        b.iter(|| concatenate(&strips));
    });

    c.bench_function("split_5k_strips", |b| {
        b.iter(|| split(&joined));
    });
}

criterion_group!(benches, bench_stripify, bench_concat);
criterion_main!(benches);
