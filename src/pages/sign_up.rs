use crate::auth::CurrentUser;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::models::user::UserProfile;
use gloo_net::http::Request;
use leptos::logging::log;
use leptos::ev::SubmitEvent;
use leptos::*;
use leptos_router::{use_navigate, A};
use wasm_bindgen_futures::spawn_local;

/// Creates the profile document for a new account and signs the user in.
#[component]
pub fn SignUpPage() -> impl IntoView {
    let user = use_context::<RwSignal<Option<CurrentUser>>>()
        .expect("CurrentUser context should be provided by App");
    let (email, set_email) = create_signal(String::new());
    let (status, set_status) = create_signal(String::new());
    let navigate = use_navigate();

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let address = email.get();
        if address.trim().is_empty() || !address.contains('@') {
            set_status.set("Please enter a valid email address.".into());
            return;
        }
        let navigate = navigate.clone();
        spawn_local(async move {
            let body = serde_json::json!({ "email": address });
            let request = match Request::post("/api/auth/sign-up").json(&body) {
                Ok(request) => request,
                Err(err) => {
                    log!("Failed to encode sign-up request: {:?}", err);
                    return;
                }
            };
            match request.send().await {
                Ok(resp) if resp.ok() => match resp.json::<UserProfile>().await {
                    Ok(profile) => {
                        user.set(Some(CurrentUser {
                            uid: profile.uid,
                            email: profile.email,
                            role: profile.role,
                        }));
                        navigate("/", Default::default());
                    }
                    Err(err) => log!("Failed to parse profile: {:?}", err),
                },
                Ok(resp) => {
                    let body = resp.text().await.unwrap_or_default();
                    set_status.set(if body.is_empty() {
                        "Sign-up failed.".into()
                    } else {
                        body
                    });
                }
                Err(err) => {
                    log!("Sign-up request failed: {:?}", err);
                    set_status.set("Sign-up failed.".into());
                }
            }
        });
    };

    view! {
        <div class="page sign-up-page">
            <Header/>
            <main>
                <h1>{ "Sign Up" }</h1>
                {move || {
                    let message = status.get();
                    (!message.is_empty()).then(|| view! {
                        <p class="status-message">{ message }</p>
                    })
                }}
                <form class="auth-form" on:submit=handle_submit>
                    <div class="field">
                        <label>{ "Email" }</label>
                        <input
                            type="email"
                            prop:value=move || email.get()
                            on:input=move |e| set_email.set(event_target_value(&e))
                            required
                        />
                    </div>
                    <button type="submit">{ "Create Account" }</button>
                </form>
                <p>
                    { "Already have an account? " }
                    <A href="/sign-in">{ "Sign in" }</A>
                </p>
            </main>
            <Footer/>
        </div>
    }
}
