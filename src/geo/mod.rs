//! Map Plotting
//!
//! Web Mercator helpers used to draw property locations, development
//! application pins and waste collection routes on OpenStreetMap tiles.
//!
//! - [`LatLng`] / [`Bounds`]: geographic primitives
//! - [`MapView`]: a centre and zoom level, with bounds fitting
//! - [`MapPlan`]: markers and GeoJSON overlays resolved to a view
//! - [`Viewport`]: tiles and pixel projection for a fixed-size map box

pub mod geojson;
pub mod viewport;

pub use geojson::{feature_collection, geojson_paths, parse_geojson, GeoPath, PathKind};
pub use viewport::{tile_url, PlacedTile, Viewport};

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use thiserror::Error;

/// Side length of a map tile in pixels
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the Web Mercator projection
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Fallback map centre when a record has no location (Sydney CBD)
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: -33.8688,
    lon: 151.2093,
};

/// OpenStreetMap tile URL template
pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Errors raised while reading map data
#[derive(Error, Debug)]
pub enum GeoError {
    /// GeoJSON text could not be parsed
    #[error("Invalid GeoJSON: {0}")]
    InvalidGeoJson(String),
}

/// A geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Project to world pixel coordinates at `zoom`
    pub fn project(&self, zoom: u8) -> (f64, f64) {
        let scale = world_size(zoom);
        let lat = self.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let sin = lat.to_radians().sin();

        let x = (self.lon + 180.0) / 360.0 * scale;
        let y = (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * scale;
        (x, y)
    }

    /// Inverse of [`LatLng::project`]
    pub fn unproject(x: f64, y: f64, zoom: u8) -> Self {
        let scale = world_size(zoom);
        let lon = x / scale * 360.0 - 180.0;
        let n = PI - 2.0 * PI * y / scale;
        let lat = n.sinh().atan().to_degrees();
        Self { lat, lon }
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lon)
    }
}

/// Width of the whole world in pixels at `zoom`
pub fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * 2f64.powi(i32::from(zoom))
}

/// Axis-aligned geographic bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    /// Bounds of a single point
    pub fn point(p: LatLng) -> Self {
        Self {
            south_west: p,
            north_east: p,
        }
    }

    /// Smallest bounds covering all points, `None` when empty
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a LatLng>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Bounds::point(first);
        for p in iter {
            bounds.extend(*p);
        }
        Some(bounds)
    }

    /// Grow to include `p`
    pub fn extend(&mut self, p: LatLng) {
        self.south_west.lat = self.south_west.lat.min(p.lat);
        self.south_west.lon = self.south_west.lon.min(p.lon);
        self.north_east.lat = self.north_east.lat.max(p.lat);
        self.north_east.lon = self.north_east.lon.max(p.lon);
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south_west.lat
            && p.lat <= self.north_east.lat
            && p.lon >= self.south_west.lon
            && p.lon <= self.north_east.lon
    }

    /// Geographic midpoint
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lon + self.north_east.lon) / 2.0,
        )
    }
}

/// A map centre and zoom level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

impl MapView {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self { center, zoom }
    }

    /// Highest zoom (up to `max_zoom`) at which `bounds` fits inside a
    /// `width` x `height` pixel box with `padding` on every side.
    pub fn fit(bounds: Bounds, width: u32, height: u32, padding: f64, max_zoom: u8) -> Self {
        let avail_w = (f64::from(width) - 2.0 * padding).max(1.0);
        let avail_h = (f64::from(height) - 2.0 * padding).max(1.0);

        let mut zoom = max_zoom;
        loop {
            let (x1, y1) = bounds.south_west.project(zoom);
            let (x2, y2) = bounds.north_east.project(zoom);
            let fits = (x2 - x1).abs() <= avail_w && (y2 - y1).abs() <= avail_h;
            if fits || zoom == 0 {
                break;
            }
            zoom -= 1;
        }

        // Centre in projected space so the box is visually centred
        let (x1, y1) = bounds.south_west.project(zoom);
        let (x2, y2) = bounds.north_east.project(zoom);
        let center = LatLng::unproject((x1 + x2) / 2.0, (y1 + y2) / 2.0, zoom);

        Self { center, zoom }
    }
}

/// Size and fallback behaviour for one kind of embedded map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapSettings {
    pub width: u32,
    pub height: u32,
    pub padding: f64,
    pub max_zoom: u8,
    pub default_center: LatLng,
    pub default_zoom: u8,
}

impl MapSettings {
    /// Small non-interactive map beside a property or application card
    pub fn mini() -> Self {
        Self {
            width: 320,
            height: 180,
            padding: 10.0,
            max_zoom: 16,
            default_center: DEFAULT_CENTER,
            default_zoom: 12,
        }
    }

    /// Larger map for a waste collection route
    pub fn route() -> Self {
        Self {
            width: 640,
            height: 320,
            padding: 0.0,
            max_zoom: 18,
            default_center: DEFAULT_CENTER,
            default_zoom: 13,
        }
    }

    pub fn with_center(mut self, center: LatLng, zoom: u8) -> Self {
        self.default_center = center;
        self.default_zoom = zoom;
        self
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self::mini()
    }
}

/// Everything needed to draw one map: pins, overlay paths and the view
#[derive(Debug, Clone, PartialEq)]
pub struct MapPlan {
    pub markers: Vec<LatLng>,
    pub overlays: Vec<GeoPath>,
    pub view: MapView,
    pub width: u32,
    pub height: u32,
}

impl MapPlan {
    /// Fit the view to all markers and overlays, or fall back to the
    /// configured default centre when there is nothing to show.
    pub fn build(markers: Vec<LatLng>, overlays: Vec<GeoPath>, settings: &MapSettings) -> Self {
        let points = markers
            .iter()
            .chain(overlays.iter().flat_map(|path| path.points.iter()));

        let view = match Bounds::from_points(points) {
            Some(bounds) => MapView::fit(
                bounds,
                settings.width,
                settings.height,
                settings.padding,
                settings.max_zoom,
            ),
            None => MapView::new(settings.default_center, settings.default_zoom),
        };

        Self {
            markers,
            overlays,
            view,
            width: settings.width,
            height: settings.height,
        }
    }

    /// Property pin plus parcel boundary
    pub fn for_property(
        gps: Option<LatLng>,
        shape: Option<&serde_json::Value>,
        settings: &MapSettings,
    ) -> Self {
        Self::build(
            gps.into_iter().collect(),
            overlay_paths(shape, "shape_file_data"),
            settings,
        )
    }

    /// Development application pin
    pub fn for_application(gps: Option<LatLng>, settings: &MapSettings) -> Self {
        Self::build(gps.into_iter().collect(), Vec::new(), settings)
    }

    /// Collection truck route
    pub fn for_route(route: Option<&serde_json::Value>) -> Self {
        Self::build(
            Vec::new(),
            overlay_paths(route, "route_geojson"),
            &MapSettings::route(),
        )
    }

    pub fn has_geometry(&self) -> bool {
        !self.markers.is_empty() || !self.overlays.is_empty()
    }

    /// Tile layout and projection for this plan
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.view, self.width, self.height)
    }
}

/// Bad GeoJSON never breaks a map, it just draws nothing
fn overlay_paths(value: Option<&serde_json::Value>, field: &str) -> Vec<GeoPath> {
    match value {
        None | Some(serde_json::Value::Null) => Vec::new(),
        Some(value) => match parse_geojson(value) {
            Ok(parsed) => geojson_paths(&parsed),
            Err(e) => {
                tracing::warn!(field, error = %e, "Ignoring unreadable map data");
                Vec::new()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_plan_with_string_shape() {
        let shape = json!(
            r#"{"type":"Polygon","coordinates":[[[151.0,-33.0],[151.01,-33.0],[151.01,-33.01],[151.0,-33.0]]]}"#
        );
        let plan = MapPlan::for_property(
            Some(LatLng::new(-33.005, 151.005)),
            Some(&shape),
            &MapSettings::mini(),
        );
        assert_eq!(plan.markers.len(), 1);
        assert_eq!(plan.overlays.len(), 1);
        assert!(plan.view.zoom <= 16);
        assert_eq!(plan.width, 320);
    }

    #[test]
    fn test_property_plan_bad_shape_falls_back() {
        let plan = MapPlan::for_property(None, Some(&json!("not geojson")), &MapSettings::mini());
        assert!(!plan.has_geometry());
        assert_eq!(plan.view, MapView::new(DEFAULT_CENTER, 12));
    }

    #[test]
    fn test_route_plan_defaults_to_zoom_13() {
        let plan = MapPlan::for_route(None);
        assert_eq!(plan.view, MapView::new(DEFAULT_CENTER, 13));

        let route = json!({"type": "LineString", "coordinates": [[151.0, -33.0], [151.02, -33.01]]});
        let plan = MapPlan::for_route(Some(&route));
        assert_eq!(plan.overlays[0].kind, PathKind::Line);
        assert!(plan.view.zoom > 13);
    }

    #[test]
    fn test_application_plan() {
        let plan = MapPlan::for_application(None, &MapSettings::mini());
        assert_eq!(plan.view.zoom, 12);
        let plan = MapPlan::for_application(Some(LatLng::new(-33.9, 151.1)), &MapSettings::mini());
        assert_eq!(plan.view.zoom, 16);
    }

    #[test]
    fn test_project_round_trip_near_sydney() {
        let p = DEFAULT_CENTER;
        let (x, y) = p.project(15);
        let back = LatLng::unproject(x, y, 15);
        assert!((back.lat - p.lat).abs() < 1e-9);
        assert!((back.lon - p.lon).abs() < 1e-9);
    }

    #[test]
    fn test_project_origin() {
        let (x, y) = LatLng::new(0.0, 0.0).project(0);
        assert!((x - 128.0).abs() < 1e-9);
        assert!((y - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_extend_and_center() {
        let mut b = Bounds::point(LatLng::new(-33.0, 151.0));
        b.extend(LatLng::new(-34.0, 152.0));
        assert_eq!(b.south_west, LatLng::new(-34.0, 151.0));
        assert_eq!(b.north_east, LatLng::new(-33.0, 152.0));
        assert_eq!(b.center(), LatLng::new(-33.5, 151.5));
        assert!(b.contains(LatLng::new(-33.2, 151.9)));
        assert!(!b.contains(LatLng::new(-35.0, 151.5)));
    }

    #[test]
    fn test_bounds_from_no_points() {
        assert!(Bounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_fit_single_point_uses_max_zoom() {
        let p = LatLng::new(-33.87, 151.21);
        let view = MapView::fit(Bounds::point(p), 320, 180, 10.0, 16);
        assert_eq!(view.zoom, 16);
        assert!((view.center.lat - p.lat).abs() < 1e-6);
        assert!((view.center.lon - p.lon).abs() < 1e-6);
    }

    #[test]
    fn test_fit_wide_bounds_zooms_out() {
        let bounds = Bounds::from_points(&[LatLng::new(-33.0, 150.0), LatLng::new(-34.0, 152.0)])
            .unwrap();
        let view = MapView::fit(bounds, 320, 180, 10.0, 16);
        assert!(view.zoom < 10);

        // The chosen zoom fits, the next one up does not
        let (x1, _) = bounds.south_west.project(view.zoom);
        let (x2, _) = bounds.north_east.project(view.zoom);
        assert!((x2 - x1).abs() <= 300.0);
        let (x1, _) = bounds.south_west.project(view.zoom + 1);
        let (x2, _) = bounds.north_east.project(view.zoom + 1);
        let (_, y1) = bounds.south_west.project(view.zoom + 1);
        let (_, y2) = bounds.north_east.project(view.zoom + 1);
        assert!((x2 - x1).abs() > 300.0 || (y2 - y1).abs() > 160.0);
    }

    #[test]
    fn test_plan_without_geometry_uses_default() {
        let plan = MapPlan::build(vec![], vec![], &MapSettings::mini());
        assert!(!plan.has_geometry());
        assert_eq!(plan.view, MapView::new(DEFAULT_CENTER, 12));

        let plan = MapPlan::build(vec![], vec![], &MapSettings::route());
        assert_eq!(plan.view.zoom, 13);
    }

    #[test]
    fn test_custom_default_view() {
        let hobart = LatLng::new(-42.88, 147.33);
        let settings = MapSettings::mini().with_center(hobart, 10);

        let plan = MapPlan::for_application(None, &settings);
        assert_eq!(plan.view, MapView::new(hobart, 10));

        // Located records still fit their own view
        let plan = MapPlan::for_application(Some(LatLng::new(-33.9, 151.1)), &settings);
        assert_eq!(plan.view.zoom, 16);
    }

    #[test]
    fn test_plan_with_marker_fits() {
        let marker = LatLng::new(-35.28, 149.13);
        let plan = MapPlan::build(vec![marker], vec![], &MapSettings::mini());
        assert!(plan.has_geometry());
        assert_eq!(plan.view.zoom, 16);
        assert!((plan.view.center.lat - marker.lat).abs() < 1e-6);
    }
}
