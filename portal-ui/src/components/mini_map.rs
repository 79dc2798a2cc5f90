//! Mini Map Component
//!
//! OpenStreetMap tiles laid out from a [`MapPlan`], with SVG overlays for
//! boundaries and routes and a pin per marker.

use leptos::*;

use localgov::geo::{tile_url, GeoPath, MapPlan, PathKind, PlacedTile, Viewport, OSM_TILE_URL};

#[component]
pub fn MiniMap(
    plan: MapPlan,
    #[prop(default = "mini-map")]
    class: &'static str,
) -> impl IntoView {
    let viewport = plan.viewport();

    let tiles = viewport
        .tiles()
        .into_iter()
        .map(|tile| {
            view! {
                <img
                    class="map-tile"
                    src=tile_url(OSM_TILE_URL, &tile)
                    style=tile_style(&tile)
                    alt=""
                />
            }
        })
        .collect_view();

    let overlays = plan
        .overlays
        .iter()
        .map(|path| overlay_view(&viewport, path))
        .collect_view();

    let pins = plan
        .markers
        .iter()
        .map(|p| {
            let (x, y) = viewport.to_pixel(*p);
            view! {
                <div class="map-pin" style=format!("left:{:.1}px;top:{:.1}px", x, y)>"📍"</div>
            }
        })
        .collect_view();

    view! {
        <div
            class=class
            style=format!("width:{}px;height:{}px", plan.width, plan.height)
        >
            {tiles}
            <svg
                class="map-overlay"
                width=plan.width
                height=plan.height
                viewBox=format!("0 0 {} {}", plan.width, plan.height)
            >
                {overlays}
            </svg>
            {pins}
            <span class="map-attribution">"© OpenStreetMap contributors"</span>
        </div>
    }
}

fn overlay_view(viewport: &Viewport, path: &GeoPath) -> View {
    let points = svg_points(viewport, path);
    match path.kind {
        PathKind::Ring => view! { <polygon class="map-shape" points=points /> }.into_view(),
        PathKind::Line => view! { <polyline class="map-route" points=points /> }.into_view(),
        PathKind::Point => match path.points.first() {
            Some(p) => {
                let (x, y) = viewport.to_pixel(*p);
                view! { <circle class="map-point" cx=x cy=y r="5" /> }.into_view()
            }
            None => ().into_view(),
        },
    }
}

fn tile_style(tile: &PlacedTile) -> String {
    format!(
        "position:absolute;left:{:.0}px;top:{:.0}px;width:256px;height:256px",
        tile.left, tile.top
    )
}

/// `x,y` pairs for an SVG `points` attribute
fn svg_points(viewport: &Viewport, path: &GeoPath) -> String {
    path.points
        .iter()
        .map(|p| {
            let (x, y) = viewport.to_pixel(*p);
            format!("{:.1},{:.1}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use localgov::geo::{MapView, DEFAULT_CENTER};

    #[test]
    fn test_svg_points_centre() {
        let viewport = Viewport::new(MapView::new(DEFAULT_CENTER, 14), 200, 100);
        let path = GeoPath {
            kind: PathKind::Line,
            points: vec![DEFAULT_CENTER, DEFAULT_CENTER],
        };
        assert_eq!(svg_points(&viewport, &path), "100.0,50.0 100.0,50.0");
    }

    #[test]
    fn test_tile_style() {
        let tile = PlacedTile {
            x: 1,
            y: 2,
            z: 3,
            left: -12.4,
            top: 40.0,
        };
        assert_eq!(
            tile_style(&tile),
            "position:absolute;left:-12px;top:40px;width:256px;height:256px"
        );
    }
}
