use leptos::prelude::*;

#[component]
pub fn CreatedItemsTitle() -> impl IntoView {
    view! {
        <h2 class="text-2xl font-bold text-center mb-4">"Created Items"</h2>
    }
}
