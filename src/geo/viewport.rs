//! Tile layout for a fixed-size map box

use super::{LatLng, MapView, TILE_SIZE};

/// Tile subdomains rotated the same way Leaflet does
const SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

/// A tile and its top-left offset inside the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedTile {
    pub x: u32,
    pub y: u32,
    pub z: u8,
    /// Pixel offset from the viewport's left edge (may be negative)
    pub left: f64,
    /// Pixel offset from the viewport's top edge (may be negative)
    pub top: f64,
}

/// A `width` x `height` pixel window onto the map at a given view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub view: MapView,
    pub width: u32,
    pub height: u32,
    origin: (f64, f64),
}

impl Viewport {
    pub fn new(view: MapView, width: u32, height: u32) -> Self {
        let (cx, cy) = view.center.project(view.zoom);
        let origin = (cx - f64::from(width) / 2.0, cy - f64::from(height) / 2.0);
        Self {
            view,
            width,
            height,
            origin,
        }
    }

    /// Pixel position of `p` relative to the viewport's top-left corner
    pub fn to_pixel(&self, p: LatLng) -> (f64, f64) {
        let (x, y) = p.project(self.view.zoom);
        (x - self.origin.0, y - self.origin.1)
    }

    /// Whether `p` lands inside the visible box
    pub fn contains(&self, p: LatLng) -> bool {
        let (x, y) = self.to_pixel(p);
        x >= 0.0 && y >= 0.0 && x <= f64::from(self.width) && y <= f64::from(self.height)
    }

    /// Every tile that overlaps the viewport, row by row.
    ///
    /// Columns wrap around the antimeridian; rows outside the world are
    /// dropped.
    pub fn tiles(&self) -> Vec<PlacedTile> {
        let z = self.view.zoom;
        let count = 1i64 << z;

        let first_col = (self.origin.0 / TILE_SIZE).floor() as i64;
        let last_col = ((self.origin.0 + f64::from(self.width) - 1.0) / TILE_SIZE).floor() as i64;
        let first_row = (self.origin.1 / TILE_SIZE).floor() as i64;
        let last_row = ((self.origin.1 + f64::from(self.height) - 1.0) / TILE_SIZE).floor() as i64;

        let mut tiles = Vec::new();
        for row in first_row..=last_row {
            if row < 0 || row >= count {
                continue;
            }
            for col in first_col..=last_col {
                tiles.push(PlacedTile {
                    x: col.rem_euclid(count) as u32,
                    y: row as u32,
                    z,
                    left: col as f64 * TILE_SIZE - self.origin.0,
                    top: row as f64 * TILE_SIZE - self.origin.1,
                });
            }
        }
        tiles
    }
}

/// Fill a `{s}/{z}/{x}/{y}` tile URL template
pub fn tile_url(template: &str, tile: &PlacedTile) -> String {
    let subdomain = SUBDOMAINS[((tile.x + tile.y) % SUBDOMAINS.len() as u32) as usize];
    template
        .replace("{s}", subdomain)
        .replace("{z}", &tile.z.to_string())
        .replace("{x}", &tile.x.to_string())
        .replace("{y}", &tile.y.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{DEFAULT_CENTER, OSM_TILE_URL};

    #[test]
    fn test_center_projects_to_middle() {
        let viewport = Viewport::new(MapView::new(DEFAULT_CENTER, 15), 320, 180);
        let (x, y) = viewport.to_pixel(DEFAULT_CENTER);
        assert!((x - 160.0).abs() < 1e-6);
        assert!((y - 90.0).abs() < 1e-6);
        assert!(viewport.contains(DEFAULT_CENTER));
        assert!(!viewport.contains(LatLng::new(-37.81, 144.96)));
    }

    #[test]
    fn test_tiles_cover_viewport() {
        let viewport = Viewport::new(MapView::new(DEFAULT_CENTER, 12), 320, 180);
        let tiles = viewport.tiles();

        // A 320x180 box touches at most 3 columns and 2 rows of 256px tiles
        assert!(!tiles.is_empty());
        assert!(tiles.len() <= 6);

        for tile in &tiles {
            assert_eq!(tile.z, 12);
            assert!(tile.left > -256.0 && tile.left < 320.0);
            assert!(tile.top > -256.0 && tile.top < 180.0);
        }

        // Sydney at z12 is tile column 3768, row 2457
        assert!(tiles.iter().any(|t| t.x == 3768 && t.y == 2457));
    }

    #[test]
    fn test_zoom_zero_single_world_tile() {
        let viewport = Viewport::new(MapView::new(LatLng::new(0.0, 0.0), 0), 256, 256);
        let tiles = viewport.tiles();
        assert_eq!(tiles.len(), 1);
        assert_eq!((tiles[0].x, tiles[0].y), (0, 0));
        assert!(tiles[0].left.abs() < 1e-9);
    }

    #[test]
    fn test_tile_url_template() {
        let tile = PlacedTile {
            x: 3768,
            y: 2457,
            z: 12,
            left: 0.0,
            top: 0.0,
        };
        assert_eq!(
            tile_url(OSM_TILE_URL, &tile),
            "https://a.tile.openstreetmap.org/12/3768/2457.png"
        );
    }
}
