//! End-to-end heatmap generation.
//!
//! [`render_heatmap`] runs the numeric pipeline on data already in memory.
//! [`HeatmapGenerator`] fetches that data from the collaborator traits first and
//! always hands the finished artifact to an [`ImageSink`] before returning it.
use glam::Vec3;
use image::RgbaImage;
use tracing::{debug, info, warn};

use super::config::HeatmapConfig;
use super::events::{EventSink, HeatmapEvent};
use super::sources::{BackgroundSource, GeometryProvider, ImageSink, KillSource};
use crate::error::{Error, Result};
use crate::kills::{Faction, FactionKills, RoundId};
use crate::projection::{CoordinateMapper, MapGeometry};
use crate::render::{postprocess, Renderer};
use crate::surface::{compose_with_summary, ContrastSummary};

/// A finished heatmap.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct Heatmap {
    /// Map the heatmap was generated for.
    pub map: String,
    /// Round filter used, `None` for all rounds.
    pub round: Option<RoundId>,
    /// Final inverted RGBA raster.
    pub image: RgbaImage,
    /// `image` encoded as PNG.
    pub png: Vec<u8>,
    /// Diagnostics from the contrast stage.
    pub summary: ContrastSummary,
    /// Kill counts per faction, `[A, B]`.
    pub kill_counts: [usize; 2],
}

impl Heatmap {
    /// Returns `true` if the factions' densities did not differ and the map is uniformly neutral.
    pub fn is_neutral(&self) -> bool {
        self.summary.degenerate
    }

    /// Name the artifact is stored under: the map name, suffixed with the round when
    /// the heatmap covers a single round.
    pub fn artifact_name(&self) -> String {
        match self.round {
            None => self.map.clone(),
            Some(id) => format!("{}_round_{id}", self.map),
        }
    }

    pub fn kills_of(&self, faction: Faction) -> usize {
        match faction {
            Faction::A => self.kill_counts[0],
            Faction::B => self.kill_counts[1],
        }
    }
}

/// Runs projection, density estimation, contrast, rendering and post-processing.
pub fn render_heatmap(
    map: &str,
    config: &HeatmapConfig,
    geometry: &MapGeometry,
    kills: &FactionKills,
    background: &RgbaImage,
) -> Result<Heatmap> {
    render_heatmap_with_events(map, None, config, geometry, kills, background, &mut ())
}

fn render_heatmap_with_events(
    map: &str,
    round: Option<RoundId>,
    config: &HeatmapConfig,
    geometry: &MapGeometry,
    kills: &FactionKills,
    background: &RgbaImage,
    sink: &mut impl EventSink,
) -> Result<Heatmap> {
    config.validate()?;
    if config.reject_empty && kills.is_empty() {
        return Err(Error::DegenerateData(format!(
            "no kills recorded for either faction on '{map}'"
        )));
    }

    let mapper = CoordinateMapper::try_new(geometry, config.canvas)?;
    let estimator = config.density_estimator();

    let mut densities = Vec::with_capacity(Faction::ALL.len());
    for faction in Faction::ALL {
        let points = mapper.project_all(kills.get(faction).iter().copied());
        let (density, stats) = estimator.estimate_with_stats(&points);
        if stats.dropped > 0 {
            let message = format!(
                "{} of {} kills projected outside the canvas",
                stats.dropped,
                points.len()
            );
            warn!("Map '{}', faction {:?}: {}.", map, faction, message);
            sink.send(HeatmapEvent::Warning {
                context: format!("{map}/{faction:?}"),
                message,
            });
        }
        sink.send(HeatmapEvent::DensityEstimated {
            faction,
            stats,
            peak: density.peak(),
        });
        densities.push(density);
    }

    let (advantage, summary) = compose_with_summary(&densities[0], &densities[1])?;
    if summary.degenerate {
        sink.send(HeatmapEvent::Warning {
            context: map.to_owned(),
            message: "faction densities do not differ; heatmap is neutral".into(),
        });
    }
    sink.send(HeatmapEvent::ContrastComposed { summary });

    let renderer = Renderer::try_new(config.canvas, config.colormap, config.background_alpha)?;
    let raster = renderer.render(&advantage, background)?;
    let (image, png) = postprocess(&raster)?;

    sink.send(HeatmapEvent::Rendered {
        size_px: image.dimensions(),
        png_bytes: png.len(),
    });

    let kill_counts = [kills.a.len(), kills.b.len()];
    info!(
        "Heatmap for '{}' (round {:?}): {} vs {} kills, {} bytes.",
        map,
        round,
        kill_counts[0],
        kill_counts[1],
        png.len()
    );

    Ok(Heatmap {
        map: map.to_owned(),
        round,
        image,
        png,
        summary,
        kill_counts,
    })
}

/// Generates heatmaps by pulling data from collaborators.
pub struct HeatmapGenerator<'a> {
    /// Configuration applied to every heatmap.
    pub config: HeatmapConfig,
    /// Source of kill positions.
    pub kills: &'a dyn KillSource,
    /// Source of map projection parameters.
    pub geometry: &'a dyn GeometryProvider,
    /// Source of minimap backgrounds.
    pub backgrounds: &'a dyn BackgroundSource,
}

impl<'a> HeatmapGenerator<'a> {
    pub fn try_new(
        config: HeatmapConfig,
        kills: &'a dyn KillSource,
        geometry: &'a dyn GeometryProvider,
        backgrounds: &'a dyn BackgroundSource,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            kills,
            geometry,
            backgrounds,
        })
    }

    /// Generates the heatmap for `map`, over one round or all rounds, and writes it to
    /// `out` under [`Heatmap::artifact_name`].
    ///
    /// Nothing is written unless generation succeeded; the returned heatmap still
    /// carries the encoded PNG for further distribution.
    pub fn generate(
        &self,
        map: &str,
        round: Option<RoundId>,
        out: &mut dyn ImageSink,
    ) -> Result<Heatmap> {
        self.generate_with_events(map, round, out, &mut ())
    }

    pub fn generate_with_events(
        &self,
        map: &str,
        round: Option<RoundId>,
        out: &mut dyn ImageSink,
        sink: &mut impl EventSink,
    ) -> Result<Heatmap> {
        let heatmap = self.render_from_sources(map, round, sink)?;
        let name = heatmap.artifact_name();
        out.write(&name, &heatmap.png)?;
        sink.send(HeatmapEvent::ArtifactWritten {
            name,
            bytes: heatmap.png.len(),
        });
        Ok(heatmap)
    }

    fn render_from_sources(
        &self,
        map: &str,
        round: Option<RoundId>,
        sink: &mut impl EventSink,
    ) -> Result<Heatmap> {
        sink.send(HeatmapEvent::JobStarted {
            map: map.to_owned(),
            round,
        });

        let geometry = self.geometry.fetch_geometry(map)?;

        let mut kills = FactionKills::default();
        for faction in Faction::ALL {
            let positions = self.kills.fetch_kills(map, faction, round)?;
            sink.send(HeatmapEvent::KillsFetched {
                faction,
                count: positions.len(),
            });
            *kills.get_mut(faction) = positions.into_iter().map(Vec3::from).collect();
        }
        debug!(
            "Fetched {} + {} kills for '{}'.",
            kills.a.len(),
            kills.b.len(),
            map
        );

        let background = self.backgrounds.fetch_background(map)?;

        render_heatmap_with_events(
            map,
            round,
            &self.config,
            &geometry,
            &kills,
            &background,
            sink,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use image::Rgba;
    use mint::Vector3;

    use super::*;
    use crate::pipeline::events::VecSink;
    use crate::pipeline::sources::{BackgroundRegistry, GeometryRegistry, KillLog, MemorySink};

    const MAP: &str = "ns2_veil";
    const SIZE: u32 = 64;

    fn config() -> HeatmapConfig {
        HeatmapConfig::new().with_canvas_size(SIZE).with_sigma(3.0)
    }

    fn geometry() -> MapGeometry {
        MapGeometry::try_new(Vec3::ZERO, Vec3::new(2048.0, 0.0, 2048.0)).unwrap()
    }

    fn black_background() -> RgbaImage {
        RgbaImage::from_pixel(SIZE, SIZE, Rgba([0, 0, 0, 255]))
    }

    fn center_cluster() -> Vec<Vec3> {
        (0..12)
            .map(|i| Vec3::new((i % 3) as f32 * 8.0, 0.0, (i / 3) as f32 * 8.0))
            .collect()
    }

    struct Fixture {
        kills: KillLog,
        geometry: GeometryRegistry,
        backgrounds: BackgroundRegistry,
    }

    impl Fixture {
        fn new() -> Self {
            let mut kills = KillLog::new();
            kills.extend(MAP, 1, Faction::A, center_cluster());
            let mut geometry_reg = GeometryRegistry::new();
            geometry_reg.register(MAP, geometry());
            let mut backgrounds = BackgroundRegistry::new();
            backgrounds.register(MAP, black_background());
            Self {
                kills,
                geometry: geometry_reg,
                backgrounds,
            }
        }

        fn generator(&self, config: HeatmapConfig) -> HeatmapGenerator<'_> {
            HeatmapGenerator::try_new(config, &self.kills, &self.geometry, &self.backgrounds)
                .unwrap()
        }
    }

    #[test]
    fn one_sided_cluster_is_strong_at_center_and_neutral_elsewhere() {
        let kills = FactionKills::new(center_cluster(), Vec::new());
        let heatmap = render_heatmap(MAP, &config(), &geometry(), &kills, &black_background())
            .unwrap();
        assert_eq!(heatmap.image.dimensions(), (SIZE, SIZE));
        assert!(!heatmap.is_neutral());

        // Red at +1, dimmed by the black background, then inverted.
        let center = heatmap.image.get_pixel(32, 32);
        assert!(center[1] > 200, "center {center:?}");
        assert!(center[0] < center[1]);
        assert_eq!(center[3], 255);

        // Neutral near-white, dimmed, then inverted to dark grey.
        let corner = heatmap.image.get_pixel(2, 60);
        assert!(corner[0] < 80 && corner[1] < 80 && corner[2] < 80, "corner {corner:?}");
        assert_eq!(heatmap.image.get_pixel(0, 0), heatmap.image.get_pixel(63, 63));
    }

    #[test]
    fn swapping_factions_flips_the_hue() {
        let a = render_heatmap(
            MAP,
            &config(),
            &geometry(),
            &FactionKills::new(center_cluster(), Vec::new()),
            &black_background(),
        )
        .unwrap();
        let b = render_heatmap(
            MAP,
            &config(),
            &geometry(),
            &FactionKills::new(Vec::new(), center_cluster()),
            &black_background(),
        )
        .unwrap();
        let pa = a.image.get_pixel(32, 32);
        let pb = b.image.get_pixel(32, 32);
        assert!(pa[0] < pa[2]);
        assert!(pb[0] > pb[2]);
    }

    #[test]
    fn no_kills_render_neutral_by_default() {
        let heatmap = render_heatmap(
            MAP,
            &config(),
            &geometry(),
            &FactionKills::default(),
            &black_background(),
        )
        .unwrap();
        assert!(heatmap.is_neutral());
        let first = *heatmap.image.get_pixel(0, 0);
        assert!(heatmap.image.pixels().all(|p| *p == first));
    }

    #[test]
    fn no_kills_can_be_rejected() {
        let err = render_heatmap(
            MAP,
            &config().with_reject_empty(true),
            &geometry(),
            &FactionKills::default(),
            &black_background(),
        )
        .unwrap_err();
        assert!(err.is_degenerate());
    }

    #[test]
    fn generator_pulls_from_collaborators_and_writes_artifact() {
        let fx = Fixture::new();
        let mut out = MemorySink::new();
        let heatmap = fx.generator(config()).generate(MAP, None, &mut out).unwrap();
        assert_eq!(heatmap.kills_of(Faction::A), 12);
        assert_eq!(heatmap.kills_of(Faction::B), 0);
        assert_eq!(heatmap.map, MAP);
        assert_eq!(out.len(), 1);
        assert_eq!(out.get(MAP), Some(heatmap.png.as_slice()));
    }

    #[test]
    fn round_filter_is_forwarded_and_keys_the_artifact() {
        let fx = Fixture::new();
        let mut out = MemorySink::new();
        let heatmap = fx
            .generator(config())
            .generate(MAP, Some(2), &mut out)
            .unwrap();
        assert_eq!(heatmap.kill_counts, [0, 0]);
        assert!(heatmap.is_neutral());
        assert_eq!(heatmap.round, Some(2));
        assert_eq!(heatmap.artifact_name(), "ns2_veil_round_2");
        assert_eq!(out.get("ns2_veil_round_2"), Some(heatmap.png.as_slice()));
        assert!(out.get(MAP).is_none());
    }

    struct CountingKills(AtomicUsize);

    impl KillSource for CountingKills {
        fn fetch_kills(
            &self,
            _map: &str,
            _faction: Faction,
            _round: Option<RoundId>,
        ) -> Result<Vec<Vector3<f32>>> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[test]
    fn unknown_map_fails_before_fetching_kills() {
        let fx = Fixture::new();
        let kills = CountingKills(AtomicUsize::new(0));
        let generator =
            HeatmapGenerator::try_new(config(), &kills, &fx.geometry, &fx.backgrounds).unwrap();
        let mut out = MemorySink::new();
        let err = generator
            .generate("ns2_unknown", None, &mut out)
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(kills.0.load(Ordering::SeqCst), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn missing_background_writes_nothing() {
        let mut fx = Fixture::new();
        fx.geometry.register("ns2_tram", geometry());
        let mut out = MemorySink::new();
        let err = fx
            .generator(config())
            .generate("ns2_tram", None, &mut out)
            .unwrap_err();
        assert!(matches!(err, Error::AssetMissing { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn events_cover_the_whole_job() {
        let fx = Fixture::new();
        let mut out = MemorySink::new();
        let mut events = VecSink::new();
        let heatmap = fx
            .generator(config())
            .generate_with_events(MAP, None, &mut out, &mut events)
            .unwrap();
        assert_eq!(out.get(MAP), Some(heatmap.png.as_slice()));

        let events = events.into_inner();
        assert!(matches!(events.first(), Some(HeatmapEvent::JobStarted { .. })));
        assert!(matches!(
            events.last(),
            Some(HeatmapEvent::ArtifactWritten { name, .. }) if name == MAP
        ));
        let densities = events
            .iter()
            .filter(|e| matches!(e, HeatmapEvent::DensityEstimated { .. }))
            .count();
        assert_eq!(densities, 2);
    }

    #[test]
    fn off_canvas_kills_are_dropped_with_a_warning() {
        let mut fx = Fixture::new();
        fx.kills
            .extend(MAP, 1, Faction::B, [Vec3::new(0.0, 0.0, 5000.0)]);
        let mut events = VecSink::new();
        fx.generator(config())
            .generate_with_events(MAP, None, &mut MemorySink::new(), &mut events)
            .unwrap();
        let dropped = events.as_slice().iter().find_map(|e| match e {
            HeatmapEvent::DensityEstimated {
                faction: Faction::B,
                stats,
                ..
            } => Some(stats.dropped),
            _ => None,
        });
        assert_eq!(dropped, Some(1));
        assert!(events
            .as_slice()
            .iter()
            .any(|e| matches!(e, HeatmapEvent::Warning { .. })));
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let fx = Fixture::new();
        let result = HeatmapGenerator::try_new(
            config().with_bins(32),
            &fx.kills,
            &fx.geometry,
            &fx.backgrounds,
        );
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn independent_maps_render_concurrently() {
        let mut fx = Fixture::new();
        fx.geometry.register("ns2_tram", geometry());
        fx.backgrounds.register("ns2_tram", black_background());
        fx.kills.extend("ns2_tram", 3, Faction::B, center_cluster());
        let generator = fx.generator(config());

        let (veil, tram) = std::thread::scope(|s| {
            let veil = s.spawn(|| generator.generate(MAP, None, &mut MemorySink::new()));
            let tram = s.spawn(|| generator.generate("ns2_tram", None, &mut MemorySink::new()));
            (veil.join(), tram.join())
        });
        let veil = veil.unwrap().unwrap();
        let tram = tram.unwrap().unwrap();
        assert_eq!(veil.kill_counts, [12, 0]);
        assert_eq!(tram.kill_counts, [0, 12]);
    }
}
