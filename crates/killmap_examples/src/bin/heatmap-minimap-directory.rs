use glam::Vec3;
use killmap::prelude::*;
use killmap_examples::{grid_minimap, init_tracing, KillCluster};
use rand::rngs::StdRng;
use rand::SeedableRng;

const MINIMAPS: &str = "minimaps";
const MAP: &str = "directory_demo";

/// Loads the background from `minimaps/<map>.png` and writes `<map>.png`,
/// the layout used by the round-end hook. A missing minimap is reported as
/// an absent heatmap instead of aborting.
fn main() -> anyhow::Result<()> {
    init_tracing();
    std::fs::create_dir_all(MINIMAPS)?;
    grid_minimap(1024, 64).save(format!("{MINIMAPS}/{MAP}.png"))?;

    let mut rng = StdRng::seed_from_u64(11);
    let mut kills = KillLog::new();
    for (round, (a, b)) in [
        (Vec3::new(200.0, 0.0, 200.0), Vec3::new(-200.0, 0.0, -200.0)),
        (Vec3::new(100.0, 0.0, -300.0), Vec3::new(-50.0, 0.0, 250.0)),
    ]
    .into_iter()
    .enumerate()
    {
        let round = round as RoundId + 1;
        kills.extend(MAP, round, Faction::A, KillCluster::new(a, 70.0, 80).sample(&mut rng));
        kills.extend(MAP, round, Faction::B, KillCluster::new(b, 70.0, 80).sample(&mut rng));
    }

    let mut geometry = GeometryRegistry::new();
    geometry.register(
        MAP,
        MapGeometry::from_extents(&MinimapExtents::new("0 0 0", "1400 0 1400"))?,
    );
    geometry.register(
        "no_minimap",
        MapGeometry::from_extents(&MinimapExtents::new("0 0 0", "1000 0 1000"))?,
    );

    let backgrounds = DirectoryBackgrounds::new(MINIMAPS);
    let generator =
        HeatmapGenerator::try_new(HeatmapConfig::default(), &kills, &geometry, &backgrounds)?;
    let mut sink = DirectorySink::new(".");

    for map in [MAP, "no_minimap"] {
        match generator.generate(map, None, &mut sink) {
            Ok(heatmap) => println!("{map}: wrote {} bytes", heatmap.png.len()),
            Err(err) if err.is_missing_data() => println!("{map}: no heatmap ({err})"),
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
