use leptos::*;

/// Search input bound to a signal; pages run their own substring filter over
/// whatever list they fetched.
#[component]
pub fn SearchBar(query: WriteSignal<String>, #[prop(into)] placeholder: String) -> impl IntoView {
    view! {
        <input
            type="text"
            class="search-bar"
            placeholder=placeholder
            on:input=move |e| query.set(event_target_value(&e))
        />
    }
}
