#[cfg(feature = "ssr")]
mod reviews_impl {
    use crate::auth::Session;
    use crate::db::{Collection, Database};
    use crate::models::review::{Review, ReviewDraft, VoteCounts, VoteKind};
    use leptos::logging::log;
    use std::sync::Arc;
    use thiserror::Error;
    use uuid::Uuid;

    /// Everything that can go wrong in the review workflow. Handlers map
    /// these onto HTTP status codes; pages show the message.
    #[derive(Debug, Error)]
    pub enum ReviewError {
        #[error("invalid review: {0}")]
        Validation(String),
        #[error("you must be signed in to do that")]
        Unauthenticated,
        #[error("you are not allowed to do that")]
        Unauthorized,
        #[error("review {0} not found")]
        NotFound(String),
        #[error("store unavailable: {0}")]
        Store(#[from] rusqlite::Error),
    }

    /// Owns the review state machine:
    ///
    /// ```text
    ///         submit
    ///   none ────────► pending
    ///                    │ approve        │ deny
    ///                    ▼                ▼
    ///                approved          (deleted)
    ///                    │ edit
    ///                    ▼
    ///                 pending   (approved copy removed)
    /// ```
    ///
    /// Every operation takes the caller's session explicitly instead of
    /// reading ambient state, so tests can run the whole workflow with fake
    /// sessions.
    #[derive(Clone)]
    pub struct ReviewLifecycle {
        db: Arc<Database>,
    }

    impl ReviewLifecycle {
        pub fn new(db: Arc<Database>) -> Self {
            ReviewLifecycle { db }
        }

        /// Validates the draft and inserts it into the moderation queue with
        /// zeroed vote state.
        pub async fn submit(
            &self,
            draft: ReviewDraft,
            session: Option<&Session>,
        ) -> Result<Review, ReviewError> {
            let session = session.ok_or(ReviewError::Unauthenticated)?;
            draft.validate().map_err(ReviewError::Validation)?;

            let review = Review::from_draft(
                Uuid::new_v4().to_string(),
                draft,
                &session.user_id,
                &session.email,
            );
            self.db.insert_review(Collection::Pending, &review).await?;
            log!("[REVIEWS] {} submitted review {}", session.user_id, review.id);
            Ok(review)
        }

        /// Publishes a pending review. Admin only. Approving an id that is
        /// already approved is a no-op, so a double-clicked Approve button
        /// cannot duplicate or lose anything.
        pub async fn approve(
            &self,
            id: &str,
            session: Option<&Session>,
        ) -> Result<(), ReviewError> {
            self.require_admin(session).await?;
            if self.db.promote(id).await? {
                return Ok(());
            }
            // Nothing pending: already approved is fine, unknown id is not.
            if self.db.get_review(Collection::Approved, id).await?.is_some() {
                return Ok(());
            }
            Err(ReviewError::NotFound(id.to_string()))
        }

        /// Rejects a pending review. Admin only. The record is deleted; the
        /// submitter is not notified.
        pub async fn deny(&self, id: &str, session: Option<&Session>) -> Result<(), ReviewError> {
            self.require_admin(session).await?;
            if self.db.delete_review(Collection::Pending, id).await? {
                log!("[REVIEWS] Review {} denied", id);
                Ok(())
            } else {
                Err(ReviewError::NotFound(id.to_string()))
            }
        }

        /// Rewrites an owned review and sends it back through moderation:
        /// the updated record replaces any pending copy and the approved copy
        /// disappears in the same transaction. Vote state resets, since the
        /// edited text is not what was voted on.
        pub async fn edit(
            &self,
            id: &str,
            draft: ReviewDraft,
            session: Option<&Session>,
        ) -> Result<Review, ReviewError> {
            let session = session.ok_or(ReviewError::Unauthenticated)?;
            draft.validate().map_err(ReviewError::Validation)?;

            let existing = self
                .find(id)
                .await?
                .ok_or_else(|| ReviewError::NotFound(id.to_string()))?;
            if existing.user_id != session.user_id {
                return Err(ReviewError::Unauthorized);
            }

            let updated = Review::from_draft(
                id.to_string(),
                draft,
                &existing.user_id,
                &existing.user_email,
            );
            self.db.replace_pending_and_unpublish(&updated).await?;
            log!("[REVIEWS] Review {} edited, back in moderation", id);
            Ok(updated)
        }

        /// Deletes a review from whichever collection currently holds it.
        /// Allowed for the submitter and for admins.
        pub async fn remove(&self, id: &str, session: Option<&Session>) -> Result<(), ReviewError> {
            let session = session.ok_or(ReviewError::Unauthenticated)?;
            let (collection, existing) = match self.locate(id).await? {
                Some(found) => found,
                None => return Err(ReviewError::NotFound(id.to_string())),
            };

            if existing.user_id != session.user_id && !self.is_admin(session).await? {
                return Err(ReviewError::Unauthorized);
            }
            self.db.delete_review(collection, id).await?;
            Ok(())
        }

        /// Casts, retracts, or switches a vote on an approved review and
        /// returns the updated counters.
        pub async fn vote(
            &self,
            id: &str,
            kind: VoteKind,
            session: Option<&Session>,
        ) -> Result<VoteCounts, ReviewError> {
            let session = session.ok_or(ReviewError::Unauthenticated)?;
            self.db
                .apply_vote(id, &session.user_id, kind)
                .await?
                .ok_or_else(|| ReviewError::NotFound(id.to_string()))
        }

        /// The moderation queue, admin only.
        pub async fn pending(&self, session: Option<&Session>) -> Result<Vec<Review>, ReviewError> {
            self.require_admin(session).await?;
            Ok(self.db.list_reviews(Collection::Pending).await?)
        }

        async fn find(&self, id: &str) -> Result<Option<Review>, ReviewError> {
            Ok(self.locate(id).await?.map(|(_, review)| review))
        }

        async fn locate(&self, id: &str) -> Result<Option<(Collection, Review)>, ReviewError> {
            if let Some(review) = self.db.get_review(Collection::Pending, id).await? {
                return Ok(Some((Collection::Pending, review)));
            }
            if let Some(review) = self.db.get_review(Collection::Approved, id).await? {
                return Ok(Some((Collection::Approved, review)));
            }
            Ok(None)
        }

        async fn is_admin(&self, session: &Session) -> Result<bool, ReviewError> {
            Ok(self.db.get_role(&session.user_id).await?.as_deref() == Some("admin"))
        }

        async fn require_admin(&self, session: Option<&Session>) -> Result<(), ReviewError> {
            let session = session.ok_or(ReviewError::Unauthenticated)?;
            if self.is_admin(session).await? {
                Ok(())
            } else {
                Err(ReviewError::Unauthorized)
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::models::user::UserProfile;
        use chrono::Utc;

        async fn setup() -> ReviewLifecycle {
            let db = Database::new(":memory:").unwrap();
            db.create_schema().await.unwrap();
            let db = Arc::new(db);
            db.upsert_user(&UserProfile {
                uid: "admin".into(),
                email: "admin@test.edu".into(),
                role: Some("admin".into()),
                created_at: Some(Utc::now()),
            })
            .await
            .unwrap();
            db.upsert_user(&UserProfile {
                uid: "student".into(),
                email: "student@test.edu".into(),
                role: None,
                created_at: Some(Utc::now()),
            })
            .await
            .unwrap();
            ReviewLifecycle::new(db)
        }

        fn admin() -> Session {
            Session {
                user_id: "admin".into(),
                email: "admin@test.edu".into(),
            }
        }

        fn student() -> Session {
            Session {
                user_id: "student".into(),
                email: "student@test.edu".into(),
            }
        }

        fn draft() -> ReviewDraft {
            ReviewDraft {
                university: "Test University".into(),
                club_name: "Chess Club".into(),
                category: "Academic".into(),
                overall_rating: 8,
                organization: 7,
                social_environment: 9,
                value_for_money: 6,
                networking: 5,
                event_quality: 8,
                review_title: "Great club".into(),
                detailed_review: "Weekly meetings are well run.".into(),
                pros: "Friendly".into(),
                cons: "Crowded".into(),
                recommend: true,
                is_member: true,
                role: "Member".into(),
            }
        }

        #[tokio::test]
        async fn submit_starts_pending_with_zero_votes() {
            let lifecycle = setup().await;
            let review = lifecycle.submit(draft(), Some(&student())).await.unwrap();

            let stored = lifecycle
                .db
                .get_review(Collection::Pending, &review.id)
                .await
                .unwrap()
                .expect("review should be pending");
            assert_eq!(stored.likes, 0);
            assert_eq!(stored.dislikes, 0);
            assert!(stored.liked_by.is_empty());
            assert!(stored.disliked_by.is_empty());
            assert_eq!(stored.user_id, "student");
            assert_eq!(stored.user_email, "student@test.edu");
        }

        #[tokio::test]
        async fn submit_requires_session_and_valid_draft() {
            let lifecycle = setup().await;
            assert!(matches!(
                lifecycle.submit(draft(), None).await,
                Err(ReviewError::Unauthenticated)
            ));

            let mut bad = draft();
            bad.university = "".into();
            assert!(matches!(
                lifecycle.submit(bad, Some(&student())).await,
                Err(ReviewError::Validation(_))
            ));
        }

        #[tokio::test]
        async fn approve_moves_review_to_approved() {
            let lifecycle = setup().await;
            let review = lifecycle.submit(draft(), Some(&student())).await.unwrap();

            lifecycle.approve(&review.id, Some(&admin())).await.unwrap();

            let approved = lifecycle
                .db
                .get_review(Collection::Approved, &review.id)
                .await
                .unwrap()
                .expect("review should be approved");
            assert_eq!(approved, review);
            assert!(lifecycle
                .db
                .get_review(Collection::Pending, &review.id)
                .await
                .unwrap()
                .is_none());
        }

        #[tokio::test]
        async fn approve_is_idempotent() {
            let lifecycle = setup().await;
            let review = lifecycle.submit(draft(), Some(&student())).await.unwrap();

            lifecycle.approve(&review.id, Some(&admin())).await.unwrap();
            let first = lifecycle
                .db
                .get_review(Collection::Approved, &review.id)
                .await
                .unwrap()
                .unwrap();

            // Second approve is a no-op, not an error, and changes nothing
            lifecycle.approve(&review.id, Some(&admin())).await.unwrap();
            let second = lifecycle
                .db
                .get_review(Collection::Approved, &review.id)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(first, second);
            assert_eq!(
                lifecycle.db.list_reviews(Collection::Approved).await.unwrap().len(),
                1
            );
        }

        #[tokio::test]
        async fn approve_requires_admin() {
            let lifecycle = setup().await;
            let review = lifecycle.submit(draft(), Some(&student())).await.unwrap();

            assert!(matches!(
                lifecycle.approve(&review.id, Some(&student())).await,
                Err(ReviewError::Unauthorized)
            ));
            assert!(matches!(
                lifecycle.approve(&review.id, None).await,
                Err(ReviewError::Unauthenticated)
            ));

            assert!(matches!(
                lifecycle.approve("no-such-id", Some(&admin())).await,
                Err(ReviewError::NotFound(_))
            ));
        }

        #[tokio::test]
        async fn deny_deletes_pending_for_good() {
            let lifecycle = setup().await;
            let review = lifecycle.submit(draft(), Some(&student())).await.unwrap();

            lifecycle.deny(&review.id, Some(&admin())).await.unwrap();

            assert!(lifecycle
                .db
                .get_review(Collection::Pending, &review.id)
                .await
                .unwrap()
                .is_none());
            assert!(lifecycle
                .db
                .get_review(Collection::Approved, &review.id)
                .await
                .unwrap()
                .is_none());
        }

        #[tokio::test]
        async fn edit_sends_review_back_to_moderation() {
            let lifecycle = setup().await;
            let review = lifecycle.submit(draft(), Some(&student())).await.unwrap();
            lifecycle.approve(&review.id, Some(&admin())).await.unwrap();

            // Approved review shows up in the university query
            let at_university = lifecycle
                .db
                .reviews_by_university(Collection::Approved, "Test University", None)
                .await
                .unwrap();
            assert_eq!(at_university.len(), 1);

            let mut change = draft();
            change.club_name = "New Name".into();
            lifecycle.edit(&review.id, change, Some(&student())).await.unwrap();

            assert!(lifecycle
                .db
                .get_review(Collection::Approved, &review.id)
                .await
                .unwrap()
                .is_none());
            let pending = lifecycle
                .db
                .get_review(Collection::Pending, &review.id)
                .await
                .unwrap()
                .expect("edited review should be pending again");
            assert_eq!(pending.club_name, "New Name");
            assert_eq!(pending.user_id, "student");
        }

        #[tokio::test]
        async fn edit_resets_vote_state() {
            let lifecycle = setup().await;
            let review = lifecycle.submit(draft(), Some(&student())).await.unwrap();
            lifecycle.approve(&review.id, Some(&admin())).await.unwrap();
            lifecycle
                .vote(&review.id, VoteKind::Like, Some(&admin()))
                .await
                .unwrap();

            lifecycle.edit(&review.id, draft(), Some(&student())).await.unwrap();
            let pending = lifecycle
                .db
                .get_review(Collection::Pending, &review.id)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(pending.likes, 0);
            assert!(pending.liked_by.is_empty());
        }

        #[tokio::test]
        async fn edit_enforces_ownership() {
            let lifecycle = setup().await;
            let review = lifecycle.submit(draft(), Some(&student())).await.unwrap();

            assert!(matches!(
                lifecycle.edit(&review.id, draft(), Some(&admin())).await,
                Err(ReviewError::Unauthorized)
            ));
            assert!(matches!(
                lifecycle.edit(&review.id, draft(), None).await,
                Err(ReviewError::Unauthenticated)
            ));
        }

        #[tokio::test]
        async fn remove_finds_record_in_either_collection() {
            let lifecycle = setup().await;

            // Still pending: owner removes it
            let pending = lifecycle.submit(draft(), Some(&student())).await.unwrap();
            lifecycle.remove(&pending.id, Some(&student())).await.unwrap();
            assert!(lifecycle
                .db
                .get_review(Collection::Pending, &pending.id)
                .await
                .unwrap()
                .is_none());

            // Approved: owner removes it from the approved collection
            let approved = lifecycle.submit(draft(), Some(&student())).await.unwrap();
            lifecycle.approve(&approved.id, Some(&admin())).await.unwrap();
            lifecycle.remove(&approved.id, Some(&student())).await.unwrap();
            assert!(lifecycle
                .db
                .get_review(Collection::Approved, &approved.id)
                .await
                .unwrap()
                .is_none());
        }

        #[tokio::test]
        async fn remove_enforces_owner_or_admin() {
            let lifecycle = setup().await;
            let review = lifecycle.submit(draft(), Some(&student())).await.unwrap();
            lifecycle.approve(&review.id, Some(&admin())).await.unwrap();

            let stranger = Session {
                user_id: "someone-else".into(),
                email: "other@test.edu".into(),
            };
            assert!(matches!(
                lifecycle.remove(&review.id, Some(&stranger)).await,
                Err(ReviewError::Unauthorized)
            ));

            // Admin may moderate someone else's review away
            lifecycle.remove(&review.id, Some(&admin())).await.unwrap();
        }

        #[tokio::test]
        async fn vote_toggles_and_switches() {
            let lifecycle = setup().await;
            let review = lifecycle.submit(draft(), Some(&student())).await.unwrap();
            lifecycle.approve(&review.id, Some(&admin())).await.unwrap();
            let voter = Session {
                user_id: "voter".into(),
                email: "voter@test.edu".into(),
            };

            let counts = lifecycle
                .vote(&review.id, VoteKind::Like, Some(&voter))
                .await
                .unwrap();
            assert_eq!(counts, VoteCounts { likes: 1, dislikes: 0 });

            // Same vote again toggles off
            let counts = lifecycle
                .vote(&review.id, VoteKind::Like, Some(&voter))
                .await
                .unwrap();
            assert_eq!(counts, VoteCounts { likes: 0, dislikes: 0 });

            // Like then dislike switches, adjusting each side by exactly one
            lifecycle
                .vote(&review.id, VoteKind::Like, Some(&voter))
                .await
                .unwrap();
            let counts = lifecycle
                .vote(&review.id, VoteKind::Dislike, Some(&voter))
                .await
                .unwrap();
            assert_eq!(counts, VoteCounts { likes: 0, dislikes: 1 });

            let stored = lifecycle
                .db
                .get_review(Collection::Approved, &review.id)
                .await
                .unwrap()
                .unwrap();
            assert!(stored.liked_by.is_empty());
            assert_eq!(stored.disliked_by, vec!["voter".to_string()]);
        }

        #[tokio::test]
        async fn votes_from_two_users_both_persist() {
            let lifecycle = setup().await;
            let review = lifecycle.submit(draft(), Some(&student())).await.unwrap();
            lifecycle.approve(&review.id, Some(&admin())).await.unwrap();

            for uid in ["u1", "u2"] {
                let session = Session {
                    user_id: uid.into(),
                    email: format!("{uid}@test.edu"),
                };
                lifecycle
                    .vote(&review.id, VoteKind::Like, Some(&session))
                    .await
                    .unwrap();
            }

            let stored = lifecycle
                .db
                .get_review(Collection::Approved, &review.id)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(stored.likes, 2);
            assert_eq!(stored.liked_by.len(), 2);
        }

        #[tokio::test]
        async fn vote_on_missing_review_is_not_found() {
            let lifecycle = setup().await;
            let voter = student();

            assert!(matches!(
                lifecycle.vote("no-such-id", VoteKind::Like, Some(&voter)).await,
                Err(ReviewError::NotFound(_))
            ));
            assert!(matches!(
                lifecycle.vote("no-such-id", VoteKind::Like, None).await,
                Err(ReviewError::Unauthenticated)
            ));

            // Nothing was created as a side effect
            assert!(lifecycle.db.list_reviews(Collection::Approved).await.unwrap().is_empty());
            assert!(lifecycle.db.list_reviews(Collection::Pending).await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn pending_queue_is_admin_only() {
            let lifecycle = setup().await;
            lifecycle.submit(draft(), Some(&student())).await.unwrap();

            let queue = lifecycle.pending(Some(&admin())).await.unwrap();
            assert_eq!(queue.len(), 1);

            assert!(matches!(
                lifecycle.pending(Some(&student())).await,
                Err(ReviewError::Unauthorized)
            ));
        }
    }
}

#[cfg(feature = "ssr")]
pub use reviews_impl::{ReviewError, ReviewLifecycle};
