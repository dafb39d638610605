//! Criterion benchmarks for parsing and rendering a large synthetic board.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nailmap_wasm::board;
use nailmap_wasm::config::ViewerConfig;
use nailmap_wasm::navigation::{SearchMode, SearchState};
use nailmap_wasm::viewport::{render, ViewportState};

fn synthetic_board(rows: u32) -> String {
    let mut text = String::from("Tebo-ICT Nail Report\nMetric units\n12-March-2024 10:00\n");
    for i in 0..rows {
        let x = f64::from(i % 200) * 1.27;
        let y = f64::from(i / 200) * 1.27;
        let net = i % 97;
        text.push_str(&format!(
            "${i} {x:.3} {y:.3} T{} A{} (T) #{net} NET{net} T PIN {}\n",
            i % 4,
            i % 10,
            i % 8
        ));
    }
    text
}

fn parse_bench(c: &mut Criterion) {
    let text = synthetic_board(20_000);
    let mut group = c.benchmark_group("board");
    group.sample_size(10);

    group.bench_function("parse_20k", |b| {
        b.iter(|| black_box(board::parse(black_box(&text), "synthetic.asc")))
    });

    let Ok(dataset) = board::parse(&text, "synthetic.asc") else {
        return;
    };
    let config = ViewerConfig::default();
    let mut search = SearchState::default();
    search.set_query("net42", SearchMode::ByNet);
    search.cycle(&dataset);
    let mut view = ViewportState::default();
    view.zoom_by(4.0, &config);

    group.bench_function("render_20k", |b| {
        b.iter(|| black_box(render(Some(&dataset), &view, &search, &config)))
    });

    group.finish();
}

criterion_group!(benches, parse_bench);
criterion_main!(benches);
