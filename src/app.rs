//! Item Board App
//!
//! Root component: resolves the API base once and provides the board context.

use leptos::prelude::*;

use item_board_core::BoardState;

use crate::browser;
use crate::components::NewItemForm;
use crate::context::BoardContext;

#[component]
pub fn App() -> impl IntoView {
    let config = browser::api_config_from_location();
    let board = RwSignal::new(BoardState::new(browser::next_placeholder_image()));

    provide_context(BoardContext::new(board, config));

    view! {
        <main class="container flex flex-col mx-auto p-4">
            <NewItemForm />
        </main>
    }
}
