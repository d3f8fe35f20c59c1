use crate::auth::CurrentUser;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::reviews_list::ReviewsList;
use crate::models::review::{Review, VoteCounts, VoteKind};
use gloo_net::http::Request;
use leptos::logging::log;
use leptos::*;
use leptos_router::use_query_map;
use wasm_bindgen_futures::spawn_local;

/// Approved reviews for one club (`?university=&club=`), with like/dislike
/// voting. A second click on the same button retracts the vote; clicking the
/// other one switches it.
#[component]
pub fn UniversityReviewsPage() -> impl IntoView {
    let user = use_context::<RwSignal<Option<CurrentUser>>>()
        .expect("CurrentUser context should be provided by App");
    let query_map = use_query_map();
    let university =
        Signal::derive(move || query_map.with(|q| q.get("university").cloned().unwrap_or_default()));
    let club = Signal::derive(move || query_map.with(|q| q.get("club").cloned().unwrap_or_default()));

    let (reviews, set_reviews) = create_signal(Vec::<Review>::new());
    let (status, set_status) = create_signal(String::new());

    create_effect(move |_| {
        let uni = university.get();
        let club = club.get();
        if uni.is_empty() || club.is_empty() {
            return;
        }
        spawn_local(async move {
            let url = format!(
                "/api/reviews/approved?university={}&club={}",
                urlencoding::encode(&uni),
                urlencoding::encode(&club)
            );
            match Request::get(&url).send().await {
                Ok(resp) => match resp.json::<Vec<Review>>().await {
                    Ok(list) => set_reviews.set(list),
                    Err(err) => log!("Failed to parse reviews: {:?}", err),
                },
                Err(err) => log!("Failed to fetch reviews: {:?}", err),
            }
        });
    });

    let on_vote = Callback::new(move |(id, kind): (String, VoteKind)| {
        let Some(current) = user.get_untracked() else {
            set_status.set("Please sign in to vote on reviews.".into());
            return;
        };
        spawn_local(async move {
            let body = serde_json::json!({ "vote": kind });
            let request = Request::post(&format!("/api/reviews/{}/vote", id))
                .header("x-user-id", &current.uid)
                .header("x-user-email", &current.email)
                .json(&body);
            let request = match request {
                Ok(request) => request,
                Err(err) => {
                    log!("Failed to encode vote: {:?}", err);
                    return;
                }
            };
            match request.send().await {
                Ok(resp) if resp.ok() => match resp.json::<VoteCounts>().await {
                    Ok(counts) => {
                        set_reviews.update(|list| {
                            if let Some(review) = list.iter_mut().find(|review| review.id == id) {
                                review.likes = counts.likes;
                                review.dislikes = counts.dislikes;
                            }
                        });
                    }
                    Err(err) => log!("Failed to parse vote counts: {:?}", err),
                },
                Ok(resp) => log!("Vote rejected with status {}", resp.status()),
                Err(err) => log!("Failed to send vote: {:?}", err),
            }
        });
    });

    view! {
        <div class="page university-reviews-page">
            <Header/>
            <main>
                <h1>{move || format!("{} at {}", club.get(), university.get())}</h1>
                {move || {
                    let message = status.get();
                    (!message.is_empty()).then(|| view! {
                        <p class="status-message">{ message }</p>
                    })
                }}
                <ReviewsList reviews=reviews on_vote=on_vote/>
            </main>
            <Footer/>
        </div>
    }
}
