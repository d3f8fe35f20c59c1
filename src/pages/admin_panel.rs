use crate::auth::CurrentUser;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::models::review::Review;
use gloo_net::http::Request;
use leptos::logging::log;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

/// Moderation queue. Approve publishes a pending review, Deny discards it.
/// Non-admins get sent back to the home page.
#[component]
pub fn AdminPanelPage() -> impl IntoView {
    let user = use_context::<RwSignal<Option<CurrentUser>>>()
        .expect("CurrentUser context should be provided by App");
    let (pending, set_pending) = create_signal(Vec::<Review>::new());
    let (status, set_status) = create_signal(String::new());

    create_effect(move |_| {
        let Some(current) = user.get() else {
            let navigate = leptos_router::use_navigate();
            navigate("/", Default::default());
            return;
        };
        if !current.is_admin() {
            let navigate = leptos_router::use_navigate();
            navigate("/", Default::default());
            return;
        }
        spawn_local(async move {
            let result = Request::get("/api/reviews/pending")
                .header("x-user-id", &current.uid)
                .header("x-user-email", &current.email)
                .send()
                .await;
            match result {
                Ok(resp) if resp.ok() => match resp.json::<Vec<Review>>().await {
                    Ok(list) => set_pending.set(list),
                    Err(err) => log!("Failed to parse pending reviews: {:?}", err),
                },
                Ok(resp) => log!("Pending fetch rejected with status {}", resp.status()),
                Err(err) => log!("Failed to fetch pending reviews: {:?}", err),
            }
        });
    });

    // Approve and Deny only differ in the endpoint; both drop the card from
    // the queue on success.
    let moderate = move |id: String, action: &'static str| {
        let Some(current) = user.get_untracked() else {
            return;
        };
        spawn_local(async move {
            let url = format!("/api/reviews/{}/{}", id, action);
            let result = Request::post(&url)
                .header("x-user-id", &current.uid)
                .header("x-user-email", &current.email)
                .send()
                .await;
            match result {
                Ok(resp) if resp.ok() => {
                    set_pending.update(|list| list.retain(|review| review.id != id));
                    set_status.set(format!(
                        "Review {}.",
                        if action == "approve" { "approved" } else { "denied" }
                    ));
                }
                Ok(resp) => {
                    let body = resp.text().await.unwrap_or_default();
                    set_status.set(if body.is_empty() {
                        "Moderation action failed.".into()
                    } else {
                        body
                    });
                }
                Err(err) => {
                    log!("Moderation request failed: {:?}", err);
                    set_status.set("Moderation action failed.".into());
                }
            }
        });
    };

    view! {
        <div class="page admin-panel-page">
            <Header/>
            <main>
                <h1>{ "Admin Panel" }</h1>
                {move || {
                    let message = status.get();
                    (!message.is_empty()).then(|| view! {
                        <p class="status-message">{ message }</p>
                    })
                }}
                <div class="pending-reviews">
                    {move || {
                        let list = pending.get();
                        if list.is_empty() {
                            return view! {
                                <p class="empty">{ "No reviews awaiting approval." }</p>
                            }.into_view();
                        }
                        list.into_iter().map(|review| {
                            let approve_id = review.id.clone();
                            let deny_id = review.id.clone();
                            view! {
                                <div class="pending-card">
                                    <h2>{ review.review_title.clone() }</h2>
                                    <p class="meta">
                                        { format!("{} - {} ({})", review.university, review.club_name, review.category) }
                                    </p>
                                    <p class="meta">{ format!("Submitted by {}", review.user_email) }</p>
                                    <p class="body">{ review.detailed_review.clone() }</p>
                                    <p class="meta">{ format!("Overall rating: {}/10", review.overall_rating) }</p>
                                    <div class="moderation-buttons">
                                        <button on:click=move |_| moderate(approve_id.clone(), "approve")>
                                            { "Approve" }
                                        </button>
                                        <button class="danger" on:click=move |_| moderate(deny_id.clone(), "deny")>
                                            { "Deny" }
                                        </button>
                                    </div>
                                </div>
                            }
                        }).collect::<Vec<_>>().into_view()
                    }}
                </div>
            </main>
            <Footer/>
        </div>
    }
}
