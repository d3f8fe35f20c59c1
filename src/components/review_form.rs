use crate::models::review::ReviewDraft;
use leptos::ev::SubmitEvent;
use leptos::*;

const CATEGORIES: [&str; 6] = [
    "Academic",
    "Sports",
    "Cultural",
    "Social",
    "Volunteering",
    "Professional",
];

const CLUB_ROLES: [&str; 4] = ["Member", "Executive", "Volunteer", "Attendee"];

/// The rate-club form. Covers every field of a review draft; `initial` is
/// filled in when the page is editing an existing review. Range hints mirror
/// what the server re-validates.
#[component]
pub fn ReviewForm(
    #[prop(optional)] initial: ReviewDraft,
    #[prop(into, default = "Submit Review".to_string())] submit_label: String,
    on_submit: Box<dyn Fn(ReviewDraft)>,
) -> impl IntoView {
    let (university, set_university) = create_signal(initial.university);
    let (club_name, set_club_name) = create_signal(initial.club_name);
    let (category, set_category) = create_signal(initial.category);
    let (overall_rating, set_overall_rating) = create_signal(initial.overall_rating);
    let (organization, set_organization) = create_signal(initial.organization);
    let (social_environment, set_social_environment) = create_signal(initial.social_environment);
    let (value_for_money, set_value_for_money) = create_signal(initial.value_for_money);
    let (networking, set_networking) = create_signal(initial.networking);
    let (event_quality, set_event_quality) = create_signal(initial.event_quality);
    let (review_title, set_review_title) = create_signal(initial.review_title);
    let (detailed_review, set_detailed_review) = create_signal(initial.detailed_review);
    let (pros, set_pros) = create_signal(initial.pros);
    let (cons, set_cons) = create_signal(initial.cons);
    let (recommend, set_recommend) = create_signal(initial.recommend);
    let (is_member, set_is_member) = create_signal(initial.is_member);
    let (role, set_role) = create_signal(initial.role);

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit(ReviewDraft {
            university: university.get(),
            club_name: club_name.get(),
            category: category.get(),
            overall_rating: overall_rating.get(),
            organization: organization.get(),
            social_environment: social_environment.get(),
            value_for_money: value_for_money.get(),
            networking: networking.get(),
            event_quality: event_quality.get(),
            review_title: review_title.get(),
            detailed_review: detailed_review.get(),
            pros: pros.get(),
            cons: cons.get(),
            recommend: recommend.get(),
            is_member: is_member.get(),
            role: role.get(),
        });
    };

    // The five sub-ratings render identically; signals are Copy so the array
    // can be consumed by the view.
    let sub_ratings = [
        ("Organization (1-10)", organization, set_organization),
        ("Social Environment (1-10)", social_environment, set_social_environment),
        ("Value For Money (1-10)", value_for_money, set_value_for_money),
        ("Networking (1-10)", networking, set_networking),
        ("Event Quality (1-10)", event_quality, set_event_quality),
    ];

    view! {
        <form class="review-form" on:submit=handle_submit>
            <div class="field">
                <label>{ "University Name" }</label>
                <input
                    type="text"
                    prop:value=move || university.get()
                    on:input=move |e| set_university.set(event_target_value(&e))
                    required
                />
            </div>

            <div class="field">
                <label>{ "Club Name" }</label>
                <input
                    type="text"
                    prop:value=move || club_name.get()
                    on:input=move |e| set_club_name.set(event_target_value(&e))
                    required
                />
            </div>

            <div class="field">
                <label>{ "Club Category" }</label>
                <select
                    prop:value=move || category.get()
                    on:change=move |e| set_category.set(event_target_value(&e))
                    required
                >
                    <option value="">{ "Select a Category" }</option>
                    {CATEGORIES.iter().map(|cat| view! {
                        <option value=*cat>{ *cat }</option>
                    }).collect::<Vec<_>>()}
                </select>
            </div>

            <div class="field">
                <label>{ "Overall Rating (1-10)" }</label>
                <input
                    type="number"
                    min="1"
                    max="10"
                    prop:value=move || overall_rating.get().to_string()
                    on:input=move |e| {
                        set_overall_rating.set(event_target_value(&e).parse::<i64>().unwrap_or(0))
                    }
                    required
                />
            </div>

            {sub_ratings.into_iter().map(|(label, value, setter)| view! {
                <div class="field">
                    <label>{ label }</label>
                    <input
                        type="number"
                        min="0"
                        max="10"
                        prop:value=move || value.get().to_string()
                        on:input=move |e| {
                            setter.set(event_target_value(&e).parse::<i64>().unwrap_or(0))
                        }
                    />
                </div>
            }).collect::<Vec<_>>()}

            <div class="field">
                <label>{ "Title of Review" }</label>
                <input
                    type="text"
                    prop:value=move || review_title.get()
                    on:input=move |e| set_review_title.set(event_target_value(&e))
                    required
                />
            </div>

            <div class="field">
                <label>{ "Detailed Review" }</label>
                <textarea
                    prop:value=move || detailed_review.get()
                    on:input=move |e| set_detailed_review.set(event_target_value(&e))
                    required
                />
            </div>

            <div class="field">
                <label>{ "Pros" }</label>
                <input
                    type="text"
                    prop:value=move || pros.get()
                    on:input=move |e| set_pros.set(event_target_value(&e))
                />
            </div>

            <div class="field">
                <label>{ "Cons" }</label>
                <input
                    type="text"
                    prop:value=move || cons.get()
                    on:input=move |e| set_cons.set(event_target_value(&e))
                />
            </div>

            <div class="field checkbox">
                <label>{ "Would you recommend this club?" }</label>
                <input
                    type="checkbox"
                    prop:checked=move || recommend.get()
                    on:change=move |e| set_recommend.set(event_target_checked(&e))
                />
            </div>

            <div class="field checkbox">
                <label>{ "Are you a current or former member?" }</label>
                <input
                    type="checkbox"
                    prop:checked=move || is_member.get()
                    on:change=move |e| set_is_member.set(event_target_checked(&e))
                />
            </div>

            <div class="field">
                <label>{ "Your Role in the Club" }</label>
                <select
                    prop:value=move || role.get()
                    on:change=move |e| set_role.set(event_target_value(&e))
                >
                    <option value="">{ "Select a role" }</option>
                    {CLUB_ROLES.iter().map(|r| view! {
                        <option value=*r>{ *r }</option>
                    }).collect::<Vec<_>>()}
                </select>
            </div>

            <button type="submit">{ submit_label }</button>
        </form>
    }
}
