use crate::components::footer::Footer;
use crate::components::header::Header;
use leptos::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="page home-page">
            <Header/>
            <main>
                <section class="hero">
                    <h1>{ "Rate My Club" }</h1>
                    <p>{ "Honest, anonymous reviews of university clubs, written by students like you." }</p>
                    <div class="hero-actions">
                        <a class="button" href="/universities-page">{ "Browse Universities" }</a>
                        <a class="button" href="/explore-page">{ "Explore Reviews" }</a>
                        <a class="button primary" href="/rate-club">{ "Rate a Club" }</a>
                    </div>
                </section>

                <section class="feature">
                    <h2>{ "Find your university" }</h2>
                    <p>
                        { "We've collected club reviews from universities across the country. \
                           Search for your school to get started and explore the vibrant club scene." }
                    </p>
                </section>

                <section class="feature">
                    <h2>{ "Write an anonymous review" }</h2>
                    <p>
                        { "Share your experience with university clubs by writing a review. \
                           Help other students make informed decisions about which clubs to join. \
                           Your reviews are completely anonymous." }
                    </p>
                </section>
            </main>
            <Footer/>
        </div>
    }
}
