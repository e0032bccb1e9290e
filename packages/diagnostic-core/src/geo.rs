//! Map-click to georeference bridge.
//!
//! Sync runs one way: a map click rewrites the georeference text, but typing
//! into the georeference field never moves the selected point.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::field::Field;
use crate::store::FieldStore;
use crate::validation::ValidationErrors;

/// Bogotá.
pub const DEFAULT_MAP_CENTER: GeoPoint = GeoPoint {
    lat: 4.711,
    lng: -74.0721,
};

pub const DEFAULT_ZOOM: u8 = 6;

/// A coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `"<lat>, <lng>"` with six decimals.
    pub fn to_georeference(&self) -> String {
        format!("{:.6}, {:.6}", self.lat, self.lng)
    }

    fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// What the map widget should display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapViewport {
    pub center: GeoPoint,
    pub zoom: u8,
    /// Present only once a point has been picked.
    pub marker: Option<GeoPoint>,
}

#[derive(Debug, Clone, Default)]
pub struct GeoSelector {
    selected: Option<GeoPoint>,
}

impl GeoSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a click and mirror it into the georeference field.
    ///
    /// Overwrites any typed georeference and clears its error. Clicks with a
    /// non-finite coordinate are dropped and `None` is returned.
    pub fn on_map_click(
        &mut self,
        lat: f64,
        lng: f64,
        store: &mut FieldStore,
        errors: &mut ValidationErrors,
    ) -> Option<GeoPoint> {
        let point = GeoPoint::new(lat, lng);
        if !point.is_finite() {
            warn!(lat, lng, "ignoring map click with non-finite coordinate");
            return None;
        }

        let georeference = point.to_georeference();
        debug!(%georeference, "map point selected");

        self.selected = Some(point);
        // Text fields always accept text.
        if let Err(err) = store.set(Field::Georeference, georeference) {
            warn!(error = %err, "georeference not written");
        }
        errors.clear(Field::Georeference);
        Some(point)
    }

    pub fn selected(&self) -> Option<GeoPoint> {
        self.selected
    }

    /// Selected point, or the default map center before any click.
    pub fn current_marker(&self) -> GeoPoint {
        self.selected.unwrap_or(DEFAULT_MAP_CENTER)
    }

    pub fn viewport(&self) -> MapViewport {
        MapViewport {
            center: self.current_marker(),
            zoom: DEFAULT_ZOOM,
            marker: self.selected,
        }
    }
}
