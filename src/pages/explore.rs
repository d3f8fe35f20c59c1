use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::reviews_list::ReviewsList;
use crate::components::search_bar::SearchBar;
use crate::models::review::Review;
use gloo_net::http::Request;
use leptos::logging::log;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

/// All approved reviews with a client-side substring filter over title,
/// body, club, university, and category. A linear scan over whatever was
/// fetched is plenty at this scale.
#[component]
pub fn ExplorePage() -> impl IntoView {
    let (reviews, set_reviews) = create_signal(Vec::<Review>::new());
    let (query, set_query) = create_signal(String::new());

    create_effect(move |_| {
        spawn_local(async move {
            match Request::get("/api/reviews/approved").send().await {
                Ok(resp) => match resp.json::<Vec<Review>>().await {
                    Ok(list) => set_reviews.set(list),
                    Err(err) => log!("Failed to parse reviews: {:?}", err),
                },
                Err(err) => log!("Failed to fetch reviews: {:?}", err),
            }
        });
    });

    let filtered = Signal::derive(move || {
        let needle = query.get().to_lowercase();
        reviews
            .get()
            .into_iter()
            .filter(|review| {
                review.detailed_review.to_lowercase().contains(&needle)
                    || review.review_title.to_lowercase().contains(&needle)
                    || review.club_name.to_lowercase().contains(&needle)
                    || review.university.to_lowercase().contains(&needle)
                    || review.category.to_lowercase().contains(&needle)
            })
            .collect::<Vec<_>>()
    });

    view! {
        <div class="page explore-page">
            <Header/>
            <main>
                <SearchBar query=set_query placeholder="Search reviews..."/>
                <h1>{ "Explore Reviews" }</h1>
                <ReviewsList reviews=filtered/>
            </main>
            <Footer/>
        </div>
    }
}
