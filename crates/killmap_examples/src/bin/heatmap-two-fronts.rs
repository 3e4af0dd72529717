use glam::Vec3;
use killmap::prelude::*;
use killmap_examples::{grid_minimap, init_tracing, ring_cluster, KillCluster};
use rand::rngs::StdRng;
use rand::SeedableRng;

const MAP: &str = "two_fronts";

/// Two factions fighting over several rounds:
/// - faction A dominates the north-west hall and a ring around the central room
/// - faction B dominates the south-east corridor
///
/// Round 2 only contains the central fight, so its heatmap differs from the aggregate.
fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(7);

    let mut kills = KillLog::new();
    kills.extend(
        MAP,
        1,
        Faction::A,
        KillCluster::new(Vec3::new(400.0, 0.0, -350.0), 80.0, 120).sample(&mut rng),
    );
    kills.extend(
        MAP,
        1,
        Faction::B,
        KillCluster::new(Vec3::new(-380.0, 0.0, 420.0), 90.0, 140).sample(&mut rng),
    );
    kills.extend(MAP, 2, Faction::A, ring_cluster(Vec3::ZERO, 150.0, 60, &mut rng));
    kills.extend(
        MAP,
        2,
        Faction::B,
        KillCluster::new(Vec3::ZERO, 40.0, 40).sample(&mut rng),
    );

    let mut geometry = GeometryRegistry::new();
    geometry.register(
        MAP,
        MapGeometry::from_extents(&MinimapExtents::new("0 30 0", "1800 200 2000"))?,
    );

    let config = HeatmapConfig::default();
    let mut backgrounds = BackgroundRegistry::new();
    backgrounds.register(MAP, grid_minimap(config.canvas.width, 96));

    let generator = HeatmapGenerator::try_new(config, &kills, &geometry, &backgrounds)?;
    let mut sink = DirectorySink::new("heatmap-two-fronts");
    let mut events = FnSink::new(|event: HeatmapEvent| {
        if let HeatmapEvent::DensityEstimated { faction, stats, .. } = event {
            println!("{faction:?}: {} kills binned, {} dropped", stats.binned, stats.dropped);
        }
    });

    let all = generator.generate_with_events(MAP, None, &mut sink, &mut events)?;
    println!("All rounds: {} vs {} kills", all.kill_counts[0], all.kill_counts[1]);

    let round = generator.generate(MAP, Some(2), &mut sink)?;
    println!(
        "Wrote {}",
        sink.path_for(&round.artifact_name()).display()
    );
    println!(
        "Round 2: {} vs {} kills, baseline {:.3}",
        round.kill_counts[0], round.kill_counts[1], round.summary.baseline
    );
    Ok(())
}
