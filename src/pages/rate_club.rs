use crate::auth::CurrentUser;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::review_form::ReviewForm;
use crate::models::review::{Review, ReviewDraft};
use gloo_net::http::Request;
use leptos::logging::log;
use leptos::*;
use leptos_router::{use_navigate, use_query_map, A};
use wasm_bindgen_futures::spawn_local;

/// Submit a new review, or edit an existing one when `?edit=<id>` is present.
/// Either way the review lands back in moderation.
#[component]
pub fn RateClubPage() -> impl IntoView {
    let user = use_context::<RwSignal<Option<CurrentUser>>>()
        .expect("CurrentUser context should be provided by App");
    let query = use_query_map();
    let edit_id = Signal::derive(move || query.with(|q| q.get("edit").cloned()));

    // In edit mode the form waits for the prefill fetch; otherwise it renders
    // an empty draft immediately.
    let (initial, set_initial) = create_signal(
        edit_id
            .get_untracked()
            .is_none()
            .then(ReviewDraft::default),
    );
    let (status, set_status) = create_signal(String::new());

    create_effect(move |_| {
        if let Some(id) = edit_id.get() {
            spawn_local(async move {
                match Request::get(&format!("/api/reviews/{}", id)).send().await {
                    Ok(resp) if resp.ok() => match resp.json::<Review>().await {
                        Ok(review) => set_initial.set(Some(review.draft())),
                        Err(err) => log!("Failed to parse review {}: {:?}", id, err),
                    },
                    Ok(_) => set_status.set("That review could not be found.".into()),
                    Err(err) => log!("Failed to fetch review {}: {:?}", id, err),
                }
            });
        }
    });

    let navigate = use_navigate();

    view! {
        <div class="page rate-club-page">
            <Header/>
            <main>
                <h1>{move || if edit_id.get().is_some() { "Edit Your Review" } else { "Rate a Club" }}</h1>
                {move || {
                    let message = status.get();
                    (!message.is_empty()).then(|| view! {
                        <p class="status-message">{ message }</p>
                    })
                }}
                {move || {
                    let Some(current) = user.get() else {
                        return view! {
                            <p class="signin-prompt">
                                { "Please " }
                                <A href="/sign-in">{ "sign in" }</A>
                                { " to rate a club." }
                            </p>
                        }.into_view();
                    };
                    let Some(draft) = initial.get() else {
                        return view! { <p>{ "Loading review..." }</p> }.into_view();
                    };

                    let editing = edit_id.get();
                    let submit_label = if editing.is_some() { "Update Review" } else { "Submit Review" };
                    let navigate = navigate.clone();
                    let on_submit: Box<dyn Fn(ReviewDraft)> = Box::new(move |draft: ReviewDraft| {
                        if let Err(message) = draft.validate() {
                            set_status.set(message);
                            return;
                        }
                        let current = current.clone();
                        let editing = editing.clone();
                        let navigate = navigate.clone();
                        spawn_local(async move {
                            let request = match &editing {
                                Some(id) => Request::put(&format!("/api/reviews/{}", id)),
                                None => Request::post("/api/reviews"),
                            }
                            .header("x-user-id", &current.uid)
                            .header("x-user-email", &current.email)
                            .json(&draft);

                            let request = match request {
                                Ok(request) => request,
                                Err(err) => {
                                    log!("Failed to encode review: {:?}", err);
                                    set_status.set("Submission failed.".into());
                                    return;
                                }
                            };
                            match request.send().await {
                                Ok(resp) if resp.ok() => {
                                    navigate("/my-reviews", Default::default());
                                }
                                Ok(resp) => {
                                    let body = resp.text().await.unwrap_or_default();
                                    set_status.set(if body.is_empty() {
                                        "Submission failed.".into()
                                    } else {
                                        body
                                    });
                                }
                                Err(err) => {
                                    log!("Failed to submit review: {:?}", err);
                                    set_status.set("Submission failed.".into());
                                }
                            }
                        });
                    });

                    view! {
                        <p class="moderation-note">
                            { "Reviews are published after an admin approves them." }
                        </p>
                        <ReviewForm initial=draft submit_label=submit_label on_submit=on_submit/>
                    }.into_view()
                }}
            </main>
            <Footer/>
        </div>
    }
}
