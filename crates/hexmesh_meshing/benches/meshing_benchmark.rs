//! Benchmark for chunk remesh performance.
//!
//! TARGET: one 32x32x32 chunk rebuild well under a millisecond, so a
//! physics-rate tick can afford to remesh every dirty chunk.
//!
//! Run with: cargo bench --package hexmesh_meshing --bench meshing_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use hexmesh_meshing::{
    GreedyMesher, MesherResources, Voxel, VoxelChunk, VoxelMaterial, CHUNK_SIZE, CHUNK_VOLUME,
};

fn solid_chunk() -> VoxelChunk {
    let mut chunk = VoxelChunk::new();
    chunk.fill(Voxel::solid(VoxelMaterial::Stone));
    chunk
}

fn checkerboard_chunk() -> VoxelChunk {
    let mut chunk = VoxelChunk::new();
    for z in 0..CHUNK_SIZE {
        for y in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                if (x + y + z) % 2 == 0 {
                    chunk.set(x, y, z, Voxel::solid(VoxelMaterial::Metal));
                }
            }
        }
    }
    chunk
}

fn terrain_chunk() -> VoxelChunk {
    // Layered fill with a jagged surface, the typical gameplay shape.
    let mut chunk = VoxelChunk::new();
    for z in 0..CHUNK_SIZE {
        for x in 0..CHUNK_SIZE {
            let height = 12 + (x * 7 + z * 13) % 9;
            for y in 0..height {
                let material = if y + 3 < height {
                    VoxelMaterial::Stone
                } else {
                    VoxelMaterial::Dirt
                };
                chunk.set(x, y, z, Voxel::solid(material));
            }
        }
    }
    chunk
}

fn bench_remesh(c: &mut Criterion, name: &str, chunk: &VoxelChunk) {
    let mesher = GreedyMesher::new(MesherResources::shared());

    let mut group = c.benchmark_group("chunk_remesh");
    group.throughput(Throughput::Elements(CHUNK_VOLUME as u64));
    group.bench_function(name, |b| {
        b.iter(|| {
            let mesh = mesher.mesh(black_box(chunk)).unwrap();
            let boxes = mesh.box_count();
            mesh.recycle(mesher.resources());
            black_box(boxes)
        });
    });
    group.finish();
}

fn benchmark_solid(c: &mut Criterion) {
    bench_remesh(c, "full_solid", &solid_chunk());
}

fn benchmark_checkerboard(c: &mut Criterion) {
    bench_remesh(c, "checkerboard_worst_case", &checkerboard_chunk());
}

fn benchmark_terrain(c: &mut Criterion) {
    bench_remesh(c, "layered_terrain", &terrain_chunk());
}

criterion_group!(
    benches,
    benchmark_solid,
    benchmark_checkerboard,
    benchmark_terrain
);
criterion_main!(benches);
