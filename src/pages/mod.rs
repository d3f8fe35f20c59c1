pub mod about;
pub mod admin_panel;
pub mod explore;
pub mod home;
pub mod my_reviews;
pub mod rate_club;
pub mod sign_in;
pub mod sign_up;
pub mod universities;
pub mod university_clubs;
pub mod university_reviews;
