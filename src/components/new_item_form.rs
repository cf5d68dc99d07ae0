//! New Item Form Component
//!
//! Creation form, created-items list and status message. Every request is
//! fire-and-forget: nothing is disabled while one is in flight and the last
//! response to arrive wins.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::info;

use item_board_core::{FormField, ItemApi, ItemId};

use crate::browser;
use crate::components::{CreatedItemsTitle, InputField, ItemCard, TextArea};
use crate::context::BoardContext;

/// Input rows: field, label, input type, placeholder
const INPUT_ROWS: &[(FormField, &str, &str, &str)] = &[
    (FormField::UserId, "UserID", "text", "Enter user_id"),
    (FormField::Lon, "Longitude", "number", "Enter longitude"),
    (FormField::Lat, "Latitude", "number", "Enter latitude"),
    (FormField::Image, "Image", "url", "Enter Image url"),
    (FormField::Keywords, "Keywords", "text", "Enter keywords"),
];

#[component]
pub fn NewItemForm() -> impl IntoView {
    let ctx = use_context::<BoardContext>().expect("BoardContext should be provided");
    let board = ctx.board;

    // Load on mount and whenever the reload trigger moves
    let reload_trigger = ctx.reload_trigger();
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        info!("[Board] Loading items, trigger={}", trigger);
        let api = ctx.api();
        spawn_local(async move {
            let result = api.list_items().await;
            board.update(|s| s.apply_loaded(result));
        });
    });

    let on_change = Callback::new(move |(name, value): (String, String)| {
        board.update(|s| s.handle_change(&name, value));
    });

    let create_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = board.with_untracked(|s| s.draft.clone());
        let api = ctx.api();
        spawn_local(async move {
            let result = api.create_item(&draft).await;
            board.update(|s| {
                s.apply_created(result, browser::next_placeholder_image);
            });
        });
    };

    let delete_item = Callback::new(move |id: ItemId| {
        let api = ctx.api();
        spawn_local(async move {
            let result = api.delete_item(&id).await;
            board.update(|s| s.apply_deleted(&id, result));
        });
    });

    let field_value = move |field: FormField| {
        Signal::derive(move || board.with(|s| s.draft.get(field).to_string()))
    };

    view! {
        <div class="container flex flex-col mx-auto p-4">
            <form
                class="max-w-md mx-auto bg-gray-50 shadow-md rounded px-8 pt-6 pb-8 mb-4 mt-4"
                on:submit=create_item
            >
                {INPUT_ROWS.iter().map(|&(field, label, input_type, placeholder)| view! {
                    <InputField
                        label=label
                        input_type=input_type
                        name=field.name()
                        placeholder=placeholder
                        value=field_value(field)
                        on_change=on_change
                    />
                }).collect_view()}

                <TextArea
                    label="Description"
                    name=FormField::Description.name()
                    placeholder="Enter description"
                    value=field_value(FormField::Description)
                    on_change=on_change
                />

                <div class="flex justify-center">
                    <button
                        data-action="create_item"
                        type="submit"
                        class="bg-gray-500 hover:bg-green-700 text-white font-bold py-2 px-4 mt-5 rounded"
                    >
                        "Create Item"
                    </button>
                </div>
            </form>

            <div aria-live="polite" class="container mx-auto mt-5">
                <CreatedItemsTitle />
                <ul class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                    <For
                        each=move || board.with(|s| s.items.clone())
                        key=|item| item.id.clone()
                        children=move |item| {
                            let data_id = item.id.to_string();
                            view! {
                                <li class="flex justify-center p-8" data-field="id" data-id=data_id>
                                    <ItemCard item=item on_delete=delete_item />
                                </li>
                            }
                        }
                    />
                </ul>
            </div>

            <Show when=move || board.with(|s| !s.message.is_empty())>
                <div class="message">{move || board.with(|s| s.message.clone())}</div>
            </Show>
        </div>
    }
}
