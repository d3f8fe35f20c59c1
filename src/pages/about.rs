use crate::components::footer::Footer;
use crate::components::header::Header;
use leptos::*;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="page about-page">
            <Header/>
            <main>
                <h1>{ "About RateMyClub" }</h1>
                <p>
                    { "RateMyClub helps students figure out which university clubs are \
                       actually worth their time. Every review is written anonymously by a \
                       student and checked by a moderator before it goes public." }
                </p>
                <p>
                    { "Reviews rate a club overall and across organization, social \
                       environment, value for money, networking, and event quality, so you \
                       can see at a glance where a club shines and where it falls short." }
                </p>
            </main>
            <Footer/>
        </div>
    }
}
