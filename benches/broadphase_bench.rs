use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use quantized_sap::*;
use std::hint::black_box;

const WORLD_SIZE: f32 = 1000.0;

fn world() -> Aabb {
    Aabb::from_coords(0.0, 0.0, WORLD_SIZE, WORLD_SIZE)
}

/// Box `i` of a loose grid, offset by `t` to emulate coherent motion.
fn grid_box(i: usize, count: usize, t: f32) -> Aabb {
    let side = (count as f32).sqrt().ceil() as usize;
    let spacing = WORLD_SIZE / (side as f32 + 1.0);
    let x = (i % side) as f32 * spacing + spacing * 0.5 + (t + i as f32).sin() * spacing * 0.3;
    let y = (i / side) as f32 * spacing + spacing * 0.5 + (t * 0.7 + i as f32).cos() * spacing * 0.3;
    Aabb::from_center(Vec2::new(x, y), Vec2::splat(spacing * 0.6))
}

fn populated(count: usize) -> (BroadPhase<usize>, Vec<ProxyId>) {
    let mut broadphase = BroadPhase::new(world(), count).expect("valid world");
    let ids = (0..count)
        .map(|i| {
            broadphase
                .create_proxy(grid_box(i, count, 0.0), i)
                .expect("capacity")
        })
        .collect();
    (broadphase, ids)
}

fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_proxies");
    for &count in &[128usize, 512, 2048] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| black_box(populated(count)))
        });
    }
    group.finish();
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_and_commit");
    for &count in &[128usize, 512, 2048] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let (mut broadphase, ids) = populated(count);
            let mut t = 0.0f32;
            b.iter(|| {
                t += 1.0 / 60.0;
                for (i, id) in ids.iter().enumerate() {
                    broadphase
                        .move_proxy(*id, grid_box(i, count, t))
                        .expect("live proxy");
                }
                black_box(broadphase.commit())
            })
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let (mut broadphase, _) = populated(2048);
    let probe = Aabb::from_coords(400.0, 400.0, 600.0, 600.0);
    c.bench_function("query_aabb_2048", |b| {
        b.iter(|| black_box(broadphase.query_aabb_ids(black_box(&probe), usize::MAX)))
    });
}

criterion_group!(benches, bench_create, bench_step, bench_query);
criterion_main!(benches);
