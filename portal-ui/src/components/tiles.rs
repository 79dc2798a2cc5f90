//! Category Tiles
//!
//! The nine category buttons across the top of the dashboard.

use leptos::*;

use localgov::dashboard::Tile;
use localgov::portal::Category;

#[component]
pub fn CategoryTiles(
    #[prop(into)]
    tiles: Signal<Vec<Tile>>,
    on_select: Callback<Category>,
) -> impl IntoView {
    view! {
        <div class="category-grid">
            {move || tiles.get().into_iter().map(|tile| {
                let category = tile.category;
                view! {
                    <button
                        class=tile_class(&tile)
                        on:click=move |_| on_select.call(category)
                    >
                        <span class="category-icon">{category.icon()}</span>
                        <span class="category-name">{category.name()}</span>
                        {(tile.count > 0).then(|| view! {
                            <span class="category-count">{tile.count}</span>
                        })}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}

fn tile_class(tile: &Tile) -> &'static str {
    if tile.selected {
        "category-card selected"
    } else {
        "category-card"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_class() {
        let mut tile = Tile {
            category: Category::Water,
            selected: false,
            count: 3,
        };
        assert_eq!(tile_class(&tile), "category-card");
        tile.selected = true;
        assert_eq!(tile_class(&tile), "category-card selected");
    }
}
