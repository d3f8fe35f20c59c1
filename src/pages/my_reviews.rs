use crate::auth::CurrentUser;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::reviews_list::ReviewsList;
use crate::models::review::Review;
use gloo_net::http::Request;
use leptos::logging::log;
use leptos::*;
use leptos_router::{use_navigate, A};
use wasm_bindgen_futures::spawn_local;

/// The signed-in user's published reviews. Edit sends the review back through
/// moderation via the rate-club page; Delete removes it outright.
#[component]
pub fn MyReviewsPage() -> impl IntoView {
    let user = use_context::<RwSignal<Option<CurrentUser>>>()
        .expect("CurrentUser context should be provided by App");
    let (reviews, set_reviews) = create_signal(Vec::<Review>::new());
    let navigate = use_navigate();

    create_effect(move |_| {
        let Some(current) = user.get() else {
            return;
        };
        spawn_local(async move {
            let url = format!("/api/reviews/approved?user={}", current.uid);
            match Request::get(&url).send().await {
                Ok(resp) => match resp.json::<Vec<Review>>().await {
                    Ok(list) => set_reviews.set(list),
                    Err(err) => log!("Failed to parse reviews: {:?}", err),
                },
                Err(err) => log!("Failed to fetch reviews: {:?}", err),
            }
        });
    });

    let on_edit = Callback::new(move |id: String| {
        navigate(&format!("/rate-club?edit={}", id), Default::default());
    });

    let on_delete = Callback::new(move |id: String| {
        let Some(current) = user.get_untracked() else {
            return;
        };
        spawn_local(async move {
            let result = Request::delete(&format!("/api/reviews/{}", id))
                .header("x-user-id", &current.uid)
                .header("x-user-email", &current.email)
                .send()
                .await;
            match result {
                Ok(resp) if resp.ok() => {
                    set_reviews.update(|list| list.retain(|review| review.id != id));
                }
                Ok(resp) => log!("Delete rejected with status {}", resp.status()),
                Err(err) => log!("Failed to delete review: {:?}", err),
            }
        });
    });

    view! {
        <div class="page my-reviews-page">
            <Header/>
            <main>
                <h1>{ "My Reviews" }</h1>
                {move || {
                    if user.get().is_none() {
                        view! {
                            <p class="signin-prompt">
                                { "Please " }
                                <A href="/sign-in">{ "sign in" }</A>
                                { " to see your reviews." }
                            </p>
                        }.into_view()
                    } else {
                        view! {
                            <ReviewsList reviews=reviews on_edit=on_edit on_delete=on_delete/>
                        }.into_view()
                    }
                }}
            </main>
            <Footer/>
        </div>
    }
}
