use crate::auth::CurrentUser;
use leptos::*;

/// Shared site header: brand link, nav, and session-aware actions. Reads the
/// signed-in user from context so every page shows the same session state.
#[component]
pub fn Header() -> impl IntoView {
    let current_user =
        use_context::<RwSignal<Option<CurrentUser>>>().expect("CurrentUser context provided");

    view! {
        <header class="site-header">
            <a class="brand" href="/">{ "RateMyClub" }</a>
            <nav>
                <a href="/explore-page">{ "Explore" }</a>
                <a href="/universities-page">{ "Universities" }</a>
                <a href="/rate-club">{ "Rate a Club" }</a>
                <a href="/my-reviews">{ "My Reviews" }</a>
                <a href="/about">{ "About" }</a>
            </nav>
            {move || match current_user.get() {
                None => view! {
                    <a class="button" href="/sign-up">{ "Sign In/Up" }</a>
                }.into_view(),
                Some(user) => {
                    let is_admin = user.is_admin();
                    view! {
                        <div class="session">
                            <span class="user-email">{ user.email.clone() }</span>
                            {is_admin.then(|| view! {
                                <a class="button" href="/admin-panel">{ "Admin Panel" }</a>
                            })}
                            <button
                                class="button logout"
                                on:click=move |_| current_user.set(None)
                            >
                                { "Log Out" }
                            </button>
                        </div>
                    }.into_view()
                }
            }}
        </header>
    }
}
