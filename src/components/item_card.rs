//! Item Card Component
//!
//! Read-only view of one created item with a delete action.

use leptos::prelude::*;

use item_board_core::{Item, ItemId};

fn format_coordinate(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn ItemCard(item: Item, on_delete: Callback<ItemId>) -> impl IntoView {
    let id = item.id.clone();
    let lat = format_coordinate(item.lat);
    let lon = format_coordinate(item.lon);

    view! {
        <div class="max-w-sm rounded overflow-hidden shadow-lg bg-white">
            <img class="w-full" src=item.image.clone() alt=item.keywords.clone() />
            <div class="px-6 py-4">
                <div class="font-bold text-xl mb-2" data-field="user_id">{item.user_id}</div>
                <p class="text-gray-700 text-base" data-field="description">{item.description}</p>
                <p class="text-gray-500 text-sm" data-field="location">
                    {format!("lat: {}, lon: {}", lat, lon)}
                </p>
                <p class="text-gray-500 text-sm" data-field="keywords">{item.keywords}</p>
            </div>
            <div class="px-6 pb-4">
                <button
                    data-action="delete"
                    class="bg-red-500 hover:bg-red-700 text-white font-bold py-1 px-3 rounded"
                    on:click=move |_| on_delete.run(id.clone())
                >
                    "Delete"
                </button>
            </div>
        </div>
    }
}
