#[cfg(feature = "ssr")]
use actix_web::{web, HttpRequest, HttpResponse};
#[cfg(feature = "ssr")]
use crate::auth::session_from_request;
#[cfg(feature = "ssr")]
use crate::db::{Collection, Database};
#[cfg(feature = "ssr")]
use crate::models::review::{ReviewDraft, VoteKind};
#[cfg(feature = "ssr")]
use crate::models::user::UserProfile;
#[cfg(feature = "ssr")]
use crate::reviews::{ReviewError, ReviewLifecycle};
#[cfg(feature = "ssr")]
use chrono::Utc;
#[cfg(feature = "ssr")]
use leptos::logging::log;
#[cfg(feature = "ssr")]
use std::collections::HashMap;
#[cfg(feature = "ssr")]
use std::sync::Arc;
#[cfg(feature = "ssr")]
use uuid::Uuid;

#[cfg(feature = "ssr")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "ssr")]
#[derive(Serialize, Deserialize)]
pub struct VoteRequest {
    pub vote: VoteKind,
}

#[cfg(feature = "ssr")]
#[derive(Serialize, Deserialize)]
pub struct AuthRequest {
    pub email: String,
}

#[cfg(feature = "ssr")]
fn workflow_error(err: ReviewError) -> HttpResponse {
    log!("[API] Review workflow error: {}", err);
    match err {
        ReviewError::Validation(_) => HttpResponse::BadRequest().body(err.to_string()),
        ReviewError::Unauthenticated => HttpResponse::Unauthorized().body(err.to_string()),
        ReviewError::Unauthorized => HttpResponse::Forbidden().body(err.to_string()),
        ReviewError::NotFound(_) => HttpResponse::NotFound().body(err.to_string()),
        ReviewError::Store(_) => HttpResponse::InternalServerError().body("store unavailable"),
    }
}

#[cfg(feature = "ssr")]
pub async fn submit_review(
    lifecycle: web::Data<ReviewLifecycle>,
    req: HttpRequest,
    draft: web::Json<ReviewDraft>,
) -> HttpResponse {
    let session = session_from_request(&req);
    log!("[API] Review submission for club: {}", draft.club_name);

    match lifecycle.submit(draft.into_inner(), session.as_ref()).await {
        Ok(review) => HttpResponse::Ok().json(review),
        Err(err) => workflow_error(err),
    }
}

#[cfg(feature = "ssr")]
pub async fn pending_reviews(
    lifecycle: web::Data<ReviewLifecycle>,
    req: HttpRequest,
) -> HttpResponse {
    let session = session_from_request(&req);
    match lifecycle.pending(session.as_ref()).await {
        Ok(reviews) => {
            log!("[API] Returning {} pending reviews", reviews.len());
            HttpResponse::Ok().json(reviews)
        }
        Err(err) => workflow_error(err),
    }
}

#[cfg(feature = "ssr")]
pub async fn approve_review(
    lifecycle: web::Data<ReviewLifecycle>,
    req: HttpRequest,
    id: web::Path<String>,
) -> HttpResponse {
    let session = session_from_request(&req);
    match lifecycle.approve(&id, session.as_ref()).await {
        Ok(_) => HttpResponse::Ok().body("Review approved"),
        Err(err) => workflow_error(err),
    }
}

#[cfg(feature = "ssr")]
pub async fn deny_review(
    lifecycle: web::Data<ReviewLifecycle>,
    req: HttpRequest,
    id: web::Path<String>,
) -> HttpResponse {
    let session = session_from_request(&req);
    match lifecycle.deny(&id, session.as_ref()).await {
        Ok(_) => HttpResponse::Ok().body("Review denied"),
        Err(err) => workflow_error(err),
    }
}

#[cfg(feature = "ssr")]
pub async fn edit_review(
    lifecycle: web::Data<ReviewLifecycle>,
    req: HttpRequest,
    id: web::Path<String>,
    draft: web::Json<ReviewDraft>,
) -> HttpResponse {
    let session = session_from_request(&req);
    match lifecycle.edit(&id, draft.into_inner(), session.as_ref()).await {
        Ok(review) => HttpResponse::Ok().json(review),
        Err(err) => workflow_error(err),
    }
}

#[cfg(feature = "ssr")]
pub async fn remove_review(
    lifecycle: web::Data<ReviewLifecycle>,
    req: HttpRequest,
    id: web::Path<String>,
) -> HttpResponse {
    let session = session_from_request(&req);
    match lifecycle.remove(&id, session.as_ref()).await {
        Ok(_) => HttpResponse::Ok().body("Review deleted"),
        Err(err) => workflow_error(err),
    }
}

#[cfg(feature = "ssr")]
pub async fn vote_review(
    lifecycle: web::Data<ReviewLifecycle>,
    req: HttpRequest,
    id: web::Path<String>,
    vote: web::Json<VoteRequest>,
) -> HttpResponse {
    let session = session_from_request(&req);
    match lifecycle.vote(&id, vote.vote, session.as_ref()).await {
        Ok(counts) => HttpResponse::Ok().json(counts),
        Err(err) => workflow_error(err),
    }
}

/// Point lookup across both collections, used by the edit form to prefill.
#[cfg(feature = "ssr")]
pub async fn get_review(db: web::Data<Arc<Database>>, id: web::Path<String>) -> HttpResponse {
    let found = match db.get_review(Collection::Pending, &id).await {
        Ok(Some(review)) => Some(review),
        Ok(None) => match db.get_review(Collection::Approved, &id).await {
            Ok(found) => found,
            Err(err) => {
                leptos::logging::error!("Failed to fetch review {}: {:?}", id, err);
                return HttpResponse::InternalServerError().body("Failed to fetch review");
            }
        },
        Err(err) => {
            leptos::logging::error!("Failed to fetch review {}: {:?}", id, err);
            return HttpResponse::InternalServerError().body("Failed to fetch review");
        }
    };
    match found {
        Some(review) => HttpResponse::Ok().json(review),
        None => HttpResponse::NotFound().body("Review not found"),
    }
}

/// Public read over the approved collection with optional equality filters
/// (`university`, `club`, `user`), matching the per-page queries.
#[cfg(feature = "ssr")]
pub async fn approved_reviews(
    db: web::Data<Arc<Database>>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    let result = if let Some(user) = query.get("user") {
        db.reviews_by_user(Collection::Approved, user).await
    } else if let Some(university) = query.get("university") {
        db.reviews_by_university(
            Collection::Approved,
            university,
            query.get("club").map(|club| club.as_str()),
        )
        .await
    } else {
        db.list_reviews(Collection::Approved).await
    };

    match result {
        Ok(reviews) => {
            log!("[API] Returning {} approved reviews", reviews.len());
            HttpResponse::Ok().json(reviews)
        }
        Err(err) => {
            leptos::logging::error!("Failed to fetch approved reviews: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch reviews")
        }
    }
}

#[cfg(feature = "ssr")]
pub async fn universities(db: web::Data<Arc<Database>>) -> HttpResponse {
    match db.universities().await {
        Ok(universities) => HttpResponse::Ok().json(universities),
        Err(err) => {
            leptos::logging::error!("Failed to fetch universities: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch universities")
        }
    }
}

#[cfg(feature = "ssr")]
pub async fn university_clubs(
    db: web::Data<Arc<Database>>,
    university: web::Path<String>,
) -> HttpResponse {
    match db.clubs_by_university(&university).await {
        Ok(clubs) => HttpResponse::Ok().json(clubs),
        Err(err) => {
            leptos::logging::error!("Failed to fetch clubs: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch clubs")
        }
    }
}

/// Creates the profile record for a freshly authenticated account. New
/// accounts never start with a role; admins are assigned out of band.
#[cfg(feature = "ssr")]
pub async fn sign_up(db: web::Data<Arc<Database>>, request: web::Json<AuthRequest>) -> HttpResponse {
    let email = request.email.trim().to_string();
    if email.is_empty() || !email.contains('@') {
        return HttpResponse::BadRequest().body("Please enter a valid email address.");
    }

    match db.get_user_by_email(&email).await {
        Ok(Some(_)) => {
            return HttpResponse::Conflict().body("This email is already registered.");
        }
        Ok(None) => {}
        Err(err) => {
            leptos::logging::error!("Sign-up lookup failed: {:?}", err);
            return HttpResponse::InternalServerError().body("Error creating account.");
        }
    }

    let profile = UserProfile {
        uid: Uuid::new_v4().to_string(),
        email,
        role: None,
        created_at: Some(Utc::now()),
    };
    match db.upsert_user(&profile).await {
        Ok(_) => {
            log!("[API] Created account for {}", profile.email);
            HttpResponse::Ok().json(profile)
        }
        Err(err) => {
            leptos::logging::error!("Sign-up failed: {:?}", err);
            HttpResponse::InternalServerError().body("Error creating account.")
        }
    }
}

/// Resolves a profile by email once the identity provider has verified the
/// credentials.
#[cfg(feature = "ssr")]
pub async fn sign_in(db: web::Data<Arc<Database>>, request: web::Json<AuthRequest>) -> HttpResponse {
    match db.get_user_by_email(request.email.trim()).await {
        Ok(Some(profile)) => HttpResponse::Ok().json(profile),
        Ok(None) => HttpResponse::NotFound().body("No account for that email."),
        Err(err) => {
            leptos::logging::error!("Sign-in lookup failed: {:?}", err);
            HttpResponse::InternalServerError().body("Error signing in.")
        }
    }
}

#[cfg(feature = "ssr")]
pub async fn user_role(db: web::Data<Arc<Database>>, uid: web::Path<String>) -> HttpResponse {
    match db.get_role(&uid).await {
        Ok(role) => HttpResponse::Ok().json(role),
        Err(err) => {
            leptos::logging::error!("Role lookup failed: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch role")
        }
    }
}
