use crate::models::review::{Review, VoteKind};
use leptos::*;

/// Renders review cards. Vote buttons appear when `on_vote` is wired up
/// (university-reviews page); Edit/Delete appear when the owner callbacks are
/// (my-reviews page).
#[component]
pub fn ReviewsList(
    #[prop(into)] reviews: Signal<Vec<Review>>,
    #[prop(optional, into)] on_vote: Option<Callback<(String, VoteKind)>>,
    #[prop(optional, into)] on_edit: Option<Callback<String>>,
    #[prop(optional, into)] on_delete: Option<Callback<String>>,
) -> impl IntoView {
    view! {
        <div class="reviews-list">
            {move || {
                let list = reviews.get();
                if list.is_empty() {
                    return view! {
                        <p class="empty">{ "No reviews yet." }</p>
                    }.into_view();
                }
                list.into_iter().map(|review| {
                    let vote_id = review.id.clone();
                    let edit_id = review.id.clone();
                    let delete_id = review.id.clone();
                    view! {
                        <div class="review-card">
                            <h2 class="review-title">{ review.review_title.clone() }</h2>
                            <p class="review-body">{ format!("\"{}\"", review.detailed_review) }</p>
                            <div class="review-metrics">
                                <p>{ format!("University: {}", review.university) }</p>
                                <p>{ format!("Club: {}", review.club_name) }</p>
                                <p>{ format!("Category: {}", review.category) }</p>
                                <p>{ format!("Rating: {}/10", review.overall_rating) }</p>
                                <p>{ format!("Organization: {}", review.organization) }</p>
                                <p>{ format!("Social Environment: {}", review.social_environment) }</p>
                                <p>{ format!("Value for Money: {}", review.value_for_money) }</p>
                                <p>{ format!("Networking: {}", review.networking) }</p>
                                <p>{ format!("Event Quality: {}", review.event_quality) }</p>
                                {(!review.pros.is_empty()).then(|| view! {
                                    <p>{ format!("Pros: {}", review.pros) }</p>
                                })}
                                {(!review.cons.is_empty()).then(|| view! {
                                    <p>{ format!("Cons: {}", review.cons) }</p>
                                })}
                                <p>{ if review.recommend { "Recommends this club" } else { "Does not recommend this club" } }</p>
                            </div>
                            {on_vote.map(|cb| {
                                let like_id = vote_id.clone();
                                let dislike_id = vote_id.clone();
                                view! {
                                    <div class="vote-buttons">
                                        <button on:click=move |_| cb.call((like_id.clone(), VoteKind::Like))>
                                            { format!("👍 {}", review.likes) }
                                        </button>
                                        <button on:click=move |_| cb.call((dislike_id.clone(), VoteKind::Dislike))>
                                            { format!("👎 {}", review.dislikes) }
                                        </button>
                                    </div>
                                }
                            })}
                            <div class="owner-actions">
                                {on_edit.map(|cb| view! {
                                    <button on:click=move |_| cb.call(edit_id.clone())>{ "Edit" }</button>
                                })}
                                {on_delete.map(|cb| view! {
                                    <button class="danger" on:click=move |_| cb.call(delete_id.clone())>{ "Delete" }</button>
                                })}
                            </div>
                        </div>
                    }
                }).collect::<Vec<_>>().into_view()
            }}
        </div>
    }
}
