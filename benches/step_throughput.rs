use cdcfifo_core::FifoBuilder;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_stepped(c: &mut Criterion) {
    let mut group = c.benchmark_group("stepped_fifo");

    for (name, write_bits, read_bits) in [("8_to_8", 8, 8), ("32_to_8", 32, 8), ("8_to_32", 8, 32)] {
        let mut fifo = FifoBuilder::new()
            .with_depth(64)
            .with_widths(write_bits, read_bits)
            .with_look_ahead(true)
            .build()
            .unwrap();

        // One producer edge and one consumer edge per iteration.
        group.bench_function(name, |b| {
            let mut word = 0u64;
            b.iter(|| {
                word = word.wrapping_add(1);
                black_box(fifo.write_step(true, black_box(word)));
                black_box(fifo.read_step(true));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_stepped);
criterion_main!(benches);
