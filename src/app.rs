use crate::auth::CurrentUser;
use crate::pages::about::AboutPage;
use crate::pages::admin_panel::AdminPanelPage;
use crate::pages::explore::ExplorePage;
use crate::pages::home::HomePage;
use crate::pages::my_reviews::MyReviewsPage;
use crate::pages::rate_club::RateClubPage;
use crate::pages::sign_in::SignInPage;
use crate::pages::sign_up::SignUpPage;
use crate::pages::universities::UniversitiesPage;
use crate::pages::university_clubs::UniversityClubsPage;
use crate::pages::university_reviews::UniversityReviewsPage;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

/// Application shell: the signed-in user lives in a context signal so the
/// header and every page see the same session.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(create_rw_signal(None::<CurrentUser>));

    view! {
        <Stylesheet id="leptos" href="/pkg/ratemyclub.css"/>
        <Title text="Rate My Club"/>
        <Router>
            <Routes>
                <Route path="/" view=HomePage/>
                <Route path="/explore-page" view=ExplorePage/>
                <Route path="/rate-club" view=RateClubPage/>
                <Route path="/my-reviews" view=MyReviewsPage/>
                <Route path="/admin-panel" view=AdminPanelPage/>
                <Route path="/universities-page" view=UniversitiesPage/>
                <Route path="/university-clubs" view=UniversityClubsPage/>
                <Route path="/university-reviews" view=UniversityReviewsPage/>
                <Route path="/about" view=AboutPage/>
                <Route path="/sign-in" view=SignInPage/>
                <Route path="/sign-up" view=SignUpPage/>
            </Routes>
        </Router>
    }
}
