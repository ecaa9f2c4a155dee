use criterion::{criterion_group, criterion_main, Criterion};
use ir_serial_remote::remote::{CodeTable, GridGeometry, IrCommand};
use std::hint::black_box;
use std::time::Duration;

pub fn bench_hit_test(c: &mut Criterion) {
    let geometry = GridGeometry::classic_window();
    c.bench_function("hit_test_sweep", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for y in (0..768).step_by(7) {
                for x in (0..400).step_by(5) {
                    if geometry.hit_test(black_box(x), black_box(y)).is_some() {
                        hits += 1;
                    }
                }
            }
            black_box(hits)
        })
    });
}

pub fn bench_command_parsing(c: &mut Criterion) {
    c.bench_function("parse_command", |b| {
        b.iter(|| {
            let cmd: IrCommand = black_box("5,37c107").parse().unwrap();
            black_box(cmd)
        })
    });

    let table = CodeTable::builtin();
    c.bench_function("wire_bytes_all_buttons", |b| {
        b.iter(|| {
            for (_, button) in table.iter() {
                black_box(button.command.to_wire());
            }
        })
    });
}

criterion_group!{
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_millis(300))
        .measurement_time(Duration::from_secs(2));
    targets = bench_hit_test, bench_command_parsing
}
criterion_main!(benches);
