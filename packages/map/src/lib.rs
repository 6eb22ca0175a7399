#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map markers for flood risk assessments.
//!
//! The map itself is an external widget reached through the [`MapWidget`]
//! trait: it can be initialized, take and drop markers, and move its
//! viewport. [`MarkerSet`] is the single owner of every marker placed on
//! it and guarantees that a reconciliation never leaves stale markers
//! behind.
//!
//! [`HeadlessMap`] implements the widget in memory for command-line use
//! and tests.

pub mod headless;
pub mod marker;
pub mod marker_set;
pub mod palette;

pub use headless::{HeadlessMap, MapView, PlacedMarker};
pub use marker::{Marker, MarkerDetail};
pub use marker_set::MarkerSet;
pub use palette::{band_color, marker_color};

use flood_workspace_reference::Coordinates;

/// Zoom level of the initial whole-country view.
pub const DEFAULT_ZOOM: u8 = 5;

/// Zoom level used after a single marker is added.
pub const CLOSE_ZOOM: u8 = 8;

/// Zoom level used after the full history is placed.
pub const WIDE_ZOOM: u8 = 6;

/// Opaque identifier a [`MapWidget`] assigns to each marker it places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerHandle(pub u64);

/// Capabilities the workspace needs from a map rendering widget.
///
/// Implementations only render. They do not track which markers belong to
/// which assessment; [`MarkerSet`] does that.
pub trait MapWidget {
    /// Sets the initial viewport.
    fn initialize(&mut self, center: Coordinates, zoom: u8);

    /// Places a marker and returns the handle used to remove it later.
    fn add_marker(&mut self, position: Coordinates, color: &str, popup: &str) -> MarkerHandle;

    /// Removes a previously placed marker. Unknown handles are ignored.
    fn remove_marker(&mut self, handle: MarkerHandle);

    /// Moves the viewport.
    fn set_view(&mut self, center: Coordinates, zoom: u8);
}
