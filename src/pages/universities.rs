use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::search_bar::SearchBar;
use gloo_net::http::Request;
use leptos::logging::log;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

/// Every university that has at least one approved review, each linking to
/// its clubs page.
#[component]
pub fn UniversitiesPage() -> impl IntoView {
    let (universities, set_universities) = create_signal(Vec::<String>::new());
    let (query, set_query) = create_signal(String::new());

    create_effect(move |_| {
        spawn_local(async move {
            match Request::get("/api/universities").send().await {
                Ok(resp) => match resp.json::<Vec<String>>().await {
                    Ok(list) => set_universities.set(list),
                    Err(err) => log!("Failed to parse universities: {:?}", err),
                },
                Err(err) => log!("Failed to fetch universities: {:?}", err),
            }
        });
    });

    let filtered = Signal::derive(move || {
        let needle = query.get().to_lowercase();
        universities
            .get()
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect::<Vec<_>>()
    });

    view! {
        <div class="page universities-page">
            <Header/>
            <main>
                <h1>{ "Universities" }</h1>
                <SearchBar query=set_query placeholder="Search universities..."/>
                <ul class="university-list">
                    {move || {
                        let list = filtered.get();
                        if list.is_empty() {
                            return view! {
                                <p class="empty">{ "No universities found." }</p>
                            }.into_view();
                        }
                        list.into_iter().map(|name| {
                            let href = format!(
                                "/university-clubs?university={}",
                                urlencoding::encode(&name)
                            );
                            view! {
                                <li>
                                    <a href=href>{ name }</a>
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
