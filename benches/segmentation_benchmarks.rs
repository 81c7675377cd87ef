//! Benchmarks for column segmentation.
//!
//! Pages are generated synthetically so the benchmarks need no fixtures:
//! - `kmeans_1d`: clustering of fragment left edges
//! - `segment`: the full pipeline on single and double column pages

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use column_oxide::geometry::Rect;
use column_oxide::layout::{kmeans_1d, PageGeometry, TextBlock, TextLine};
use column_oxide::{ColumnSegmenter, SegmenterConfig};

/// Build a letter-sized page with `paragraphs` blocks per column.
fn synthetic_page(columns: usize, paragraphs: usize) -> PageGeometry {
    let mut page = PageGeometry::new(Rect::new(0.0, 0.0, 612.0, 792.0));
    let column_width = 504.0 / columns as f32;
    let row_height = 700.0 / paragraphs as f32;

    for p in 0..paragraphs {
        for c in 0..columns {
            let x0 = 54.0 + c as f32 * column_width;
            let y0 = 40.0 + p as f32 * row_height;
            let lines = (0..3)
                .map(|i| {
                    let top = y0 + i as f32 * (row_height / 4.0);
                    TextLine::new(
                        Rect::new(x0, top, x0 + column_width - 20.0, top + row_height / 5.0),
                        "benchmark text line",
                    )
                })
                .collect();
            page.blocks.push(TextBlock::from_lines(lines));
        }
    }
    page
}

// =============================================================================
// Benchmark Groups
// =============================================================================

fn bench_kmeans(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans_1d");

    for n in [16usize, 128, 1024] {
        let data: Vec<f32> = (0..n)
            .map(|i| if i % 2 == 0 { 54.0 + (i % 7) as f32 } else { 322.0 + (i % 5) as f32 })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(n), &data, |b, data| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| kmeans_1d(black_box(data), 2, 100, &mut rng).expect("clustering failed"))
        });
    }

    group.finish();
}

fn bench_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment");
    let segmenter = ColumnSegmenter::new(SegmenterConfig::region_extraction().with_seed(42))
        .expect("valid config");

    let pages = [
        ("single_20", synthetic_page(1, 20)),
        ("double_20", synthetic_page(2, 20)),
        ("double_80", synthetic_page(2, 80)),
    ];

    for (name, page) in &pages {
        group.bench_with_input(BenchmarkId::from_parameter(name), page, |b, page| {
            b.iter(|| segmenter.segment(black_box(page)).expect("segmentation failed"))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_kmeans, bench_segment);
criterion_main!(benches);
