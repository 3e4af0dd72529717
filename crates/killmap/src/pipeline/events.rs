//! Event types and sinks for observing heatmap generation.
//!
//! This module defines [`HeatmapEvent`] and a set of sinks to emit, collect, or forward
//! events while running [`crate::pipeline::runner::HeatmapGenerator`].
use crate::kills::{Faction, RoundId};
use crate::surface::{BinningStats, ContrastSummary};

/// Describes events emitted while generating a heatmap.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum HeatmapEvent {
    /// Emitted when generation for a map starts.
    JobStarted {
        /// Map name.
        map: String,
        /// Round filter, `None` for all rounds.
        round: Option<RoundId>,
    },

    /// Emitted after kill positions of one faction were fetched.
    KillsFetched {
        faction: Faction,
        /// Number of kill positions returned by the source.
        count: usize,
    },

    /// Emitted after the density surface of one faction was estimated.
    DensityEstimated {
        faction: Faction,
        /// Points binned or dropped for lying off the canvas.
        stats: BinningStats,
        /// Peak density before normalization.
        peak: f32,
    },

    /// Emitted after both densities were combined.
    ContrastComposed {
        summary: ContrastSummary,
    },

    /// Emitted after the final raster was rendered and encoded.
    Rendered {
        /// Raster size (width, height) in pixels.
        size_px: (u32, u32),
        /// Encoded PNG size in bytes.
        png_bytes: usize,
    },

    /// Emitted after the artifact was handed to an [`crate::pipeline::ImageSink`].
    ArtifactWritten {
        /// Artifact name, see [`crate::pipeline::Heatmap::artifact_name`].
        name: String,
        /// Bytes written.
        bytes: usize,
    },

    /// Non-fatal warning generated during generation.
    Warning {
        /// Context string (e.g. map name, faction).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// A generic event sink that accepts [`HeatmapEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: HeatmapEvent);
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: HeatmapEvent) {}
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(HeatmapEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(HeatmapEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(HeatmapEvent),
{
    #[inline]
    fn send(&mut self, event: HeatmapEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<HeatmapEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<HeatmapEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[HeatmapEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: HeatmapEvent) {
        self.events.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    #[inline]
    fn send(&mut self, event: HeatmapEvent) {
        (**self).send(event);
    }
}
