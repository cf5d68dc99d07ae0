//! Text Area Component

use leptos::prelude::*;

/// Labelled multi-line input, same contract as `InputField`
#[component]
pub fn TextArea(
    #[prop(into)] label: String,
    #[prop(into)] name: String,
    #[prop(into)] placeholder: String,
    value: Signal<String>,
    on_change: Callback<(String, String)>,
) -> impl IntoView {
    let field_name = name.clone();

    view! {
        <div class="mb-4">
            <label class="block text-gray-700 text-sm font-bold mb-2" for=name.clone()>
                {label.clone()}
            </label>
            <textarea
                class="shadow appearance-none border rounded w-full py-2 px-3 text-gray-700"
                id=name.clone()
                name=name
                aria-label=label
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_change.run((field_name.clone(), event_target_value(&ev)))
            ></textarea>
        </div>
    }
}
