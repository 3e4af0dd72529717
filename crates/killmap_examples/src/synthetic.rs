//! Shared helpers for the example binaries: tracing setup, synthetic kill clusters
//! and a procedural minimap background.
use glam::Vec3;
use image::{Rgba, RgbaImage};
use rand::Rng as RngCore;
use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber honouring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// A roughly Gaussian blob of kills on the horizontal plane.
#[derive(Clone, Copy, Debug)]
pub struct KillCluster {
    /// World-space center.
    pub center: Vec3,
    /// Standard deviation of the horizontal offset in world units.
    pub spread: f32,
    /// Number of kills.
    pub count: usize,
}

impl KillCluster {
    pub fn new(center: Vec3, spread: f32, count: usize) -> Self {
        Self {
            center,
            spread,
            count,
        }
    }

    /// Samples kill positions using the Box-Muller transform.
    pub fn sample(&self, rng: &mut dyn RngCore) -> Vec<Vec3> {
        (0..self.count)
            .map(|_| {
                let u1 = rand01(rng).max(f32::MIN_POSITIVE);
                let u2 = rand01(rng);
                let r = (-2.0 * u1.ln()).sqrt() * self.spread;
                let theta = std::f32::consts::TAU * u2;
                self.center + Vec3::new(r * theta.cos(), rand01(rng) * 4.0, r * theta.sin())
            })
            .collect()
    }
}

/// Kills spread evenly along a ring, e.g. around a contested room.
pub fn ring_cluster(center: Vec3, radius: f32, count: usize, rng: &mut dyn RngCore) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let jitter = (rand01(rng) - 0.5) * 0.2;
            let theta = std::f32::consts::TAU * (i as f32 / count.max(1) as f32 + jitter);
            center + Vec3::new(radius * theta.cos(), 0.0, radius * theta.sin())
        })
        .collect()
}

/// A light-grey minimap with darker corridors every `spacing` pixels.
pub fn grid_minimap(size: u32, spacing: u32) -> RgbaImage {
    let spacing = spacing.max(1);
    RgbaImage::from_fn(size, size, |x, y| {
        let on_line = x % spacing < 3 || y % spacing < 3;
        if on_line {
            Rgba([60, 60, 70, 255])
        } else {
            Rgba([210, 210, 215, 255])
        }
    })
}
