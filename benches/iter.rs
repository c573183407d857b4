use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cyclic_buffer::RingBuffer;

fn ring_buffer_skip_benchmark(c: &mut Criterion) {
    let mut ring_buffer: RingBuffer<u32> = RingBuffer::from_iter_with_capacity(16, 0..16);
    ring_buffer.pop_head().unwrap();
    ring_buffer.pop_push(16);

    c.bench_function("ring_buffer_skip", |b| {
        b.iter(|| {
            let _ = black_box(&ring_buffer)
                .iter()
                .cycle()
                .step_by(103)
                .take(black_box(2048))
                .sum::<u32>();

            let _ = black_box(&ring_buffer).to_vec();
        });
    });
}

criterion_group!(benches, ring_buffer_skip_benchmark);
criterion_main!(benches);
