#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};

use seqvec::Vector;

fn standard_compare(c: &mut Criterion) {
    const SMALL_COUNT: usize = 100;
    const LARGE_COUNT: usize = 1000;

    for count in [SMALL_COUNT, LARGE_COUNT] {
        c.bench_function(&format!("seqvec push_back {} values", count), |b| {
            b.iter(|| {
                let mut buf = Vector::<usize>::new();
                for value in 0..count {
                    buf.push_back(black_box(value));
                }
            });
        });

        c.bench_function(
            &format!("seqvec with_capacity({0}) push_back {0} values", count),
            |b| {
                b.iter(|| {
                    let mut buf = Vector::<usize>::with_capacity(count);
                    for value in 0..count {
                        buf.push_back(black_box(value));
                    }
                });
            },
        );

        c.bench_function(&format!("stdvec push {} values", count), |b| {
            b.iter(|| {
                let mut buf = Vec::<usize>::new();
                for value in 0..count {
                    buf.push(black_box(value));
                }
            });
        });

        c.bench_function(
            &format!("stdvec with_capacity({0}) push {0} values", count),
            |b| {
                b.iter(|| {
                    let mut buf = Vec::<usize>::with_capacity(count);
                    for value in 0..count {
                        buf.push(black_box(value));
                    }
                });
            },
        );

        c.bench_function(&format!("seqvec extend {} values", count), |b| {
            b.iter(|| {
                let mut buf = Vector::<usize>::new();
                buf.extend(black_box(0..count));
            });
        });

        c.bench_function(&format!("stdvec extend {} values", count), |b| {
            b.iter(|| {
                let mut buf = Vec::<usize>::new();
                buf.extend(black_box(0..count));
            });
        });

        c.bench_function(&format!("seqvec resize {} values", count), |b| {
            b.iter(|| {
                let mut buf = Vector::<usize>::new();
                buf.resize(count, black_box(1));
            });
        });

        c.bench_function(&format!("stdvec resize {} values", count), |b| {
            b.iter(|| {
                let mut buf = Vec::<usize>::new();
                buf.resize(count, black_box(1));
            });
        });

        if count == SMALL_COUNT {
            c.bench_function(&format!("seqvec insert front {} values", count), |b| {
                b.iter(|| {
                    let mut buf = Vector::<usize>::new();
                    for value in 0..count {
                        buf.insert(0, black_box(value));
                    }
                });
            });

            c.bench_function(&format!("stdvec insert front {} values", count), |b| {
                b.iter(|| {
                    let mut buf = Vec::<usize>::new();
                    for value in 0..count {
                        buf.insert(0, black_box(value));
                    }
                });
            });

            c.bench_function(&format!("seqvec insert_n {} values", count), |b| {
                b.iter(|| {
                    let mut buf = Vector::from_slice(&[0usize, 0]);
                    buf.insert_n(1, count, black_box(1));
                });
            });

            c.bench_function(
                &format!("seqvec extend from slice {} values", count),
                |b| {
                    let mut data = [0usize; SMALL_COUNT];
                    for (idx, item) in data.iter_mut().enumerate() {
                        *item = idx;
                    }
                    b.iter(|| {
                        let mut buf = Vector::<usize>::new();
                        buf.extend_from_slice(black_box(&data[..count]));
                    });
                },
            );

            c.bench_function(&format!("stdvec extend from slice {} values", count), |b| {
                let mut data = [0usize; SMALL_COUNT];
                for (idx, item) in data.iter_mut().enumerate() {
                    *item = idx;
                }
                b.iter(|| {
                    let mut buf = Vec::<usize>::new();
                    buf.extend_from_slice(black_box(&data[..count]));
                });
            });
        }
    }
}

criterion_group!(benches, standard_compare);
criterion_main!(benches);
