use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="site-footer">
            <p>{ "© RateMyClub. All rights reserved." }</p>
        </footer>
    }
}
