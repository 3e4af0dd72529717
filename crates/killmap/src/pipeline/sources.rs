//! Collaborator traits for kill data, map geometry, background assets and output,
//! plus in-memory and directory-backed implementations.
//!
//! - Implement [`KillSource`], [`GeometryProvider`] and [`BackgroundSource`] to feed
//!   the pipeline from your own storage.
//! - Implement [`ImageSink`] to receive finished PNG artifacts.
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec3;
use image::RgbaImage;
use mint::Vector3;
use tracing::debug;

use crate::error::{Error, Result};
use crate::kills::{Faction, KillEvent, RoundId};
use crate::projection::MapGeometry;

/// Supplies kill positions per map, faction and optional round.
pub trait KillSource: Send + Sync {
    /// Kill positions of `faction` on `map`. With `round == None`, all recorded rounds
    /// of the map are aggregated.
    fn fetch_kills(
        &self,
        map: &str,
        faction: Faction,
        round: Option<RoundId>,
    ) -> Result<Vec<Vector3<f32>>>;
}

/// Supplies projection parameters for named maps.
pub trait GeometryProvider: Send + Sync {
    /// Returns [`Error::NotFound`] for unknown maps.
    fn fetch_geometry(&self, map: &str) -> Result<MapGeometry>;
}

/// Supplies minimap background images.
pub trait BackgroundSource: Send + Sync {
    /// Returns [`Error::AssetMissing`] if no image exists for `map`.
    fn fetch_background(&self, map: &str) -> Result<RgbaImage>;
}

/// Receives finished PNG artifacts keyed by name.
pub trait ImageSink {
    fn write(&mut self, name: &str, png: &[u8]) -> Result<()>;
}

#[derive(Debug, Clone)]
struct KillRecord {
    map: String,
    round: RoundId,
    event: KillEvent,
}

/// In-memory kill log.
#[derive(Debug, Clone, Default)]
pub struct KillLog {
    records: Vec<KillRecord>,
}

impl KillLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, map: impl Into<String>, round: RoundId, event: KillEvent) {
        self.records.push(KillRecord {
            map: map.into(),
            round,
            event,
        });
    }

    /// Records every position as a kill by `faction`.
    pub fn extend(
        &mut self,
        map: &str,
        round: RoundId,
        faction: Faction,
        positions: impl IntoIterator<Item = Vec3>,
    ) {
        for position in positions {
            self.push(map, round, KillEvent::new(position, faction));
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl KillSource for KillLog {
    fn fetch_kills(
        &self,
        map: &str,
        faction: Faction,
        round: Option<RoundId>,
    ) -> Result<Vec<Vector3<f32>>> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.map == map && r.event.faction == faction)
            .filter(|r| round.is_none_or(|id| r.round == id))
            .map(|r| r.event.position.into())
            .collect())
    }
}

/// Registry of map geometries by map name.
#[derive(Debug, Clone, Default)]
pub struct GeometryRegistry {
    maps: HashMap<String, MapGeometry>,
}

impl GeometryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, map: impl Into<String>, geometry: MapGeometry) {
        self.maps.insert(map.into(), geometry);
    }

    pub fn contains(&self, map: &str) -> bool {
        self.maps.contains_key(map)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

impl GeometryProvider for GeometryRegistry {
    fn fetch_geometry(&self, map: &str) -> Result<MapGeometry> {
        self.maps.get(map).copied().ok_or_else(|| Error::NotFound {
            map: map.to_owned(),
        })
    }
}

/// Registry of background images by map name.
#[derive(Clone, Default)]
pub struct BackgroundRegistry {
    images: HashMap<String, Arc<RgbaImage>>,
}

impl BackgroundRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, map: impl Into<String>, image: RgbaImage) {
        self.images.insert(map.into(), Arc::new(image));
    }

    pub fn register_arc(&mut self, map: impl Into<String>, image: Arc<RgbaImage>) {
        self.images.insert(map.into(), image);
    }

    pub fn contains(&self, map: &str) -> bool {
        self.images.contains_key(map)
    }
}

impl BackgroundSource for BackgroundRegistry {
    fn fetch_background(&self, map: &str) -> Result<RgbaImage> {
        self.images
            .get(map)
            .map(|img| img.as_ref().clone())
            .ok_or_else(|| Error::AssetMissing {
                map: map.to_owned(),
            })
    }
}

/// Loads `<root>/<map>.png`.
#[derive(Debug, Clone)]
pub struct DirectoryBackgrounds {
    root: PathBuf,
}

impl DirectoryBackgrounds {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, map: &str) -> PathBuf {
        self.root.join(format!("{map}.png"))
    }
}

impl BackgroundSource for DirectoryBackgrounds {
    fn fetch_background(&self, map: &str) -> Result<RgbaImage> {
        let path = self.path_for(map);
        if !path.is_file() {
            return Err(Error::AssetMissing {
                map: map.to_owned(),
            });
        }
        debug!("Loading background '{}'.", path.display());
        Ok(image::open(&path)?.to_rgba8())
    }
}

/// Writes `<root>/<name>.png`, replacing any previous artifact atomically.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.png"))
    }
}

impl ImageSink for DirectorySink {
    fn write(&mut self, name: &str, png: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(name);
        let tmp = self.root.join(format!(".{name}.png.tmp"));
        fs::write(&tmp, png)?;
        fs::rename(&tmp, &path)?;
        debug!("Wrote {} bytes to '{}'.", png.len(), path.display());
        Ok(())
    }
}

/// Keeps written artifacts in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    artifacts: HashMap<String, Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.artifacts.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl ImageSink for MemorySink {
    fn write(&mut self, name: &str, png: &[u8]) -> Result<()> {
        self.artifacts.insert(name.to_owned(), png.to_vec());
        Ok(())
    }
}
