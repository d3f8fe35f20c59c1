use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::search_bar::SearchBar;
use crate::models::review::ClubSummary;
use gloo_net::http::Request;
use leptos::logging::log;
use leptos::*;
use leptos_router::use_query_map;
use wasm_bindgen_futures::spawn_local;

/// Clubs of one university (`?university=`), with their approved review
/// counts, each linking to that club's reviews.
#[component]
pub fn UniversityClubsPage() -> impl IntoView {
    let query_map = use_query_map();
    let university =
        Signal::derive(move || query_map.with(|q| q.get("university").cloned().unwrap_or_default()));

    let (clubs, set_clubs) = create_signal(Vec::<ClubSummary>::new());
    let (query, set_query) = create_signal(String::new());

    create_effect(move |_| {
        let name = university.get();
        if name.is_empty() {
            return;
        }
        spawn_local(async move {
            let url = format!("/api/universities/{}/clubs", urlencoding::encode(&name));
            match Request::get(&url).send().await {
                Ok(resp) => match resp.json::<Vec<ClubSummary>>().await {
                    Ok(list) => set_clubs.set(list),
                    Err(err) => log!("Failed to parse clubs: {:?}", err),
                },
                Err(err) => log!("Failed to fetch clubs: {:?}", err),
            }
        });
    });

    let filtered = Signal::derive(move || {
        let needle = query.get().to_lowercase();
        clubs
            .get()
            .into_iter()
            .filter(|club| club.name.to_lowercase().contains(&needle))
            .collect::<Vec<_>>()
    });

    view! {
        <div class="page university-clubs-page">
            <Header/>
            <main>
                <h1>{move || format!("Clubs at {}", university.get())}</h1>
                <SearchBar query=set_query placeholder="Search clubs..."/>
                <ul class="club-list">
                    {move || {
                        let list = filtered.get();
                        if list.is_empty() {
                            return view! {
                                <p class="empty">{ "No clubs reviewed yet." }</p>
                            }.into_view();
                        }
                        let uni = university.get();
                        list.into_iter().map(|club| {
                            let href = format!(
                                "/university-reviews?university={}&club={}",
                                urlencoding::encode(&uni),
                                urlencoding::encode(&club.name)
                            );
                            let label = if club.review_count == 1 {
                                format!("{} (1 review)", club.name)
                            } else {
                                format!("{} ({} reviews)", club.name, club.review_count)
                            };
                            view! {
                                <li>
                                    <a href=href>{ label }</a>
                                </li>
                            }
                        }).collect::<Vec<_>>().into_view()
                    }}
                </ul>
            </main>
            <Footer/>
        </div>
    }
}
