use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

fn rand01(rng: &mut StdRng) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Uniform canvas points.
#[allow(dead_code)]
pub fn canvas_points(count: usize, size: f32, seed: u64) -> Vec<Vec2> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Vec2::new(rand01(&mut rng) * size, rand01(&mut rng) * size))
        .collect()
}

/// World positions scattered around `center` on the horizontal plane.
#[allow(dead_code)]
pub fn world_cluster(count: usize, center: Vec3, radius: f32, seed: u64) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let dx = (rand01(&mut rng) * 2.0 - 1.0) * radius;
            let dz = (rand01(&mut rng) * 2.0 - 1.0) * radius;
            center + Vec3::new(dx, 0.0, dz)
        })
        .collect()
}
