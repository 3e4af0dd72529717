use glam::Vec3;
use killmap::prelude::*;
use killmap_examples::{grid_minimap, init_tracing, KillCluster};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// One faction holds the middle of the map, the other never scores.
/// The result is a single strong blob at the center on a neutral map.
fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(42);

    let geometry = MapGeometry::from_extents(&MinimapExtents::new("0 0 0", "2048 0 2048"))?;
    let kills = FactionKills::new(
        KillCluster::new(Vec3::ZERO, 60.0, 150).sample(&mut rng),
        Vec::new(),
    );

    let config = HeatmapConfig::default();
    let background = grid_minimap(config.canvas.width, 128);
    let heatmap = render_heatmap("center_cluster", &config, &geometry, &kills, &background)?;

    let mut sink = DirectorySink::new(".");
    sink.write(&heatmap.artifact_name(), &heatmap.png)?;
    println!(
        "Wrote {} ({} bytes, {} vs {} kills)",
        sink.path_for(&heatmap.artifact_name()).display(),
        heatmap.png.len(),
        heatmap.kills_of(Faction::A),
        heatmap.kills_of(Faction::B)
    );
    Ok(())
}
