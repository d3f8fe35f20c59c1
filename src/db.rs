#[cfg(feature = "ssr")]
mod db_impl {
    use crate::models::review::{ClubSummary, Review, VoteCounts, VoteKind};
    use crate::models::user::UserProfile;
    use chrono::{DateTime, Utc};
    use leptos::logging;
    use leptos::logging::log;
    use rusqlite::{Connection, Error};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::models::review::ReviewDraft;

        // Helper function to create test database
        async fn create_test_db() -> Database {
            let db = Database::new(":memory:").unwrap();
            db.create_schema().await.unwrap();
            db
        }

        fn sample_review(id: &str, user_id: &str) -> Review {
            let draft = ReviewDraft {
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
            };
            Review::from_draft(id.into(), draft, user_id, "user@test.edu")
        }

        // Test database schema creation
        #[tokio::test]
        async fn test_schema_creation() {
            log!("[TEST] Starting test_schema_creation");
            let db = create_test_db().await;

            // Verify tables exist
            let conn = db.conn.lock().await;
            let mut stmt = conn
                .prepare("SELECT name FROM sqlite_master WHERE type='table'")
                .unwrap();
            let tables: Vec<String> = stmt
                .query_map([], |row| row.get(0))
                .unwrap()
                .collect::<Result<_, _>>()
                .unwrap();

            assert!(tables.contains(&"pending_reviews".to_string()));
            assert!(tables.contains(&"approved_reviews".to_string()));
            assert!(tables.contains(&"users".to_string()));
        }

        #[tokio::test]
        async fn test_review_round_trip() {
            log!("[TEST] Starting test_review_round_trip");
            let db = create_test_db().await;
            let review = sample_review("r1", "u1");

            db.insert_review(Collection::Pending, &review).await.unwrap();
            let stored = db
                .get_review(Collection::Pending, "r1")
                .await
                .unwrap()
                .expect("pending review should exist");
            assert_eq!(stored, review);

            // Replace semantics: inserting the same id overwrites
            let mut updated = review.clone();
            updated.club_name = "Go Club".into();
            db.insert_review(Collection::Pending, &updated).await.unwrap();
            let stored = db
                .get_review(Collection::Pending, "r1")
                .await
                .unwrap()
                .unwrap();
            assert_eq!(stored.club_name, "Go Club");
            assert_eq!(db.list_reviews(Collection::Pending).await.unwrap().len(), 1);
        }

        #[tokio::test]
        async fn test_promote_moves_between_collections() {
            log!("[TEST] Starting test_promote_moves_between_collections");
            let db = create_test_db().await;
            let review = sample_review("r1", "u1");
            db.insert_review(Collection::Pending, &review).await.unwrap();

            assert!(db.promote("r1").await.unwrap());
            assert!(db.get_review(Collection::Pending, "r1").await.unwrap().is_none());
            let approved = db
                .get_review(Collection::Approved, "r1")
                .await
                .unwrap()
                .expect("approved review should exist");
            assert_eq!(approved, review);

            // Nothing left to promote
            assert!(!db.promote("r1").await.unwrap());
        }

        #[tokio::test]
        async fn test_replace_pending_and_unpublish() {
            log!("[TEST] Starting test_replace_pending_and_unpublish");
            let db = create_test_db().await;
            let review = sample_review("r1", "u1");
            db.insert_review(Collection::Approved, &review).await.unwrap();

            let mut edited = review.clone();
            edited.club_name = "New Name".into();
            db.replace_pending_and_unpublish(&edited).await.unwrap();

            assert!(db.get_review(Collection::Approved, "r1").await.unwrap().is_none());
            let pending = db
                .get_review(Collection::Pending, "r1")
                .await
                .unwrap()
                .unwrap();
            assert_eq!(pending.club_name, "New Name");
        }

        #[tokio::test]
        async fn test_apply_vote_persists() {
            log!("[TEST] Starting test_apply_vote_persists");
            let db = create_test_db().await;
            let review = sample_review("r1", "u1");
            db.insert_review(Collection::Approved, &review).await.unwrap();

            let counts = db
                .apply_vote("r1", "voter", VoteKind::Like)
                .await
                .unwrap()
                .expect("review should exist");
            assert_eq!(counts, VoteCounts { likes: 1, dislikes: 0 });

            let stored = db
                .get_review(Collection::Approved, "r1")
                .await
                .unwrap()
                .unwrap();
            assert_eq!(stored.likes, 1);
            assert_eq!(stored.liked_by, vec!["voter".to_string()]);

            // Voting on a missing id touches nothing
            assert!(db.apply_vote("missing", "voter", VoteKind::Like).await.unwrap().is_none());
        }

        #[tokio::test]
        async fn test_queries_by_user_and_university() {
            log!("[TEST] Starting test_queries_by_user_and_university");
            let db = create_test_db().await;
            let mut a = sample_review("a", "u1");
            a.university = "Uni A".into();
            a.club_name = "Chess Club".into();
            let mut b = sample_review("b", "u2");
            b.university = "Uni A".into();
            b.club_name = "Debate Society".into();
            let mut c = sample_review("c", "u1");
            c.university = "Uni B".into();
            for review in [&a, &b, &c] {
                db.insert_review(Collection::Approved, review).await.unwrap();
            }

            let mine = db.reviews_by_user(Collection::Approved, "u1").await.unwrap();
            assert_eq!(mine.len(), 2);

            let at_a = db
                .reviews_by_university(Collection::Approved, "Uni A", None)
                .await
                .unwrap();
            assert_eq!(at_a.len(), 2);

            let chess = db
                .reviews_by_university(Collection::Approved, "Uni A", Some("Chess Club"))
                .await
                .unwrap();
            assert_eq!(chess.len(), 1);
            assert_eq!(chess[0].id, "a");
        }

        #[tokio::test]
        async fn test_university_and_club_aggregation() {
            log!("[TEST] Starting test_university_and_club_aggregation");
            let db = create_test_db().await;
            let mut a = sample_review("a", "u1");
            a.university = "Uni B".into();
            a.club_name = "Chess Club".into();
            let mut b = sample_review("b", "u2");
            b.university = "Uni A".into();
            b.club_name = "Chess Club".into();
            let mut c = sample_review("c", "u3");
            c.university = "Uni A".into();
            c.club_name = "Chess Club".into();
            let mut d = sample_review("d", "u4");
            d.university = "Uni A".into();
            d.club_name = "Debate Society".into();
            for review in [&a, &b, &c, &d] {
                db.insert_review(Collection::Approved, review).await.unwrap();
            }

            let universities = db.universities().await.unwrap();
            assert_eq!(universities, vec!["Uni A".to_string(), "Uni B".to_string()]);

            let clubs = db.clubs_by_university("Uni A").await.unwrap();
            assert_eq!(
                clubs,
                vec![
                    ClubSummary { name: "Chess Club".into(), review_count: 2 },
                    ClubSummary { name: "Debate Society".into(), review_count: 1 },
                ]
            );
        }

        #[tokio::test]
        async fn test_user_profiles_and_roles() {
            log!("[TEST] Starting test_user_profiles_and_roles");
            let db = create_test_db().await;
            let user = UserProfile {
                uid: "u1".into(),
                email: "student@test.edu".into(),
                role: None,
                created_at: Some(Utc::now()),
            };
            db.upsert_user(&user).await.unwrap();
            assert_eq!(db.get_role("u1").await.unwrap(), None);

            let admin = UserProfile {
                uid: "a1".into(),
                email: "admin@test.edu".into(),
                role: Some("admin".into()),
                created_at: Some(Utc::now()),
            };
            db.upsert_user(&admin).await.unwrap();
            assert_eq!(db.get_role("a1").await.unwrap(), Some("admin".to_string()));

            let by_email = db
                .get_user_by_email("admin@test.edu")
                .await
                .unwrap()
                .expect("profile should exist");
            assert_eq!(by_email.uid, "a1");
            assert!(by_email.is_admin());
        }
    }

    /// The two review collections. Pending reviews await moderation, approved
    /// reviews are public and votable. A review id lives in at most one of
    /// them at any time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Collection {
        Pending,
        Approved,
    }

    impl Collection {
        fn table(self) -> &'static str {
            match self {
                Collection::Pending => "pending_reviews",
                Collection::Approved => "approved_reviews",
            }
        }
    }

    const REVIEW_COLUMNS: &str = "id, user_id, user_email, university, club_name, category, \
         overall_rating, organization, social_environment, value_for_money, networking, \
         event_quality, review_title, detailed_review, pros, cons, recommend, is_member, \
         role, timestamp, likes, dislikes, liked_by, disliked_by";

    fn review_from_row(row: &rusqlite::Row<'_>) -> Result<Review, Error> {
        let timestamp: Option<String> = row.get(19)?;
        let liked_by: String = row.get(22)?;
        let disliked_by: String = row.get(23)?;
        Ok(Review {
            id: row.get(0)?,
            user_id: row.get(1)?,
            user_email: row.get(2)?,
            university: row.get(3)?,
            club_name: row.get(4)?,
            category: row.get(5)?,
            overall_rating: row.get(6)?,
            organization: row.get(7)?,
            social_environment: row.get(8)?,
            value_for_money: row.get(9)?,
            networking: row.get(10)?,
            event_quality: row.get(11)?,
            review_title: row.get(12)?,
            detailed_review: row.get(13)?,
            pros: row.get(14)?,
            cons: row.get(15)?,
            recommend: row.get(16)?,
            is_member: row.get(17)?,
            role: row.get(18)?,
            timestamp: timestamp
                .and_then(|ts| DateTime::parse_from_rfc3339(&ts).ok())
                .map(|ts| ts.with_timezone(&Utc)),
            likes: row.get(20)?,
            dislikes: row.get(21)?,
            liked_by: serde_json::from_str(&liked_by).unwrap_or_default(),
            disliked_by: serde_json::from_str(&disliked_by).unwrap_or_default(),
        })
    }

    // Works on both a Connection and a Transaction (which derefs to one), so
    // the transactional move paths share the same write.
    fn upsert_review(
        conn: &Connection,
        collection: Collection,
        review: &Review,
    ) -> Result<(), Error> {
        let sql = format!(
            "INSERT OR REPLACE INTO {} ({})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                     ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24)",
            collection.table(),
            REVIEW_COLUMNS
        );
        conn.execute(
            &sql,
            rusqlite::params![
                &review.id,
                &review.user_id,
                &review.user_email,
                &review.university,
                &review.club_name,
                &review.category,
                review.overall_rating,
                review.organization,
                review.social_environment,
                review.value_for_money,
                review.networking,
                review.event_quality,
                &review.review_title,
                &review.detailed_review,
                &review.pros,
                &review.cons,
                review.recommend,
                review.is_member,
                &review.role,
                review.timestamp.map(|ts| ts.to_rfc3339()),
                review.likes,
                review.dislikes,
                serde_json::to_string(&review.liked_by).unwrap_or_else(|_| "[]".into()),
                serde_json::to_string(&review.disliked_by).unwrap_or_else(|_| "[]".into()),
            ],
        )?;
        Ok(())
    }

    // Define a struct to represent a database connection
    #[derive(Debug)]
    pub struct Database {
        conn: Arc<Mutex<Connection>>,
    }

    impl Database {
        // Create a new database connection
        pub fn new(db_path: &str) -> Result<Self, Error> {
            let conn = Connection::open(db_path)?;
            logging::log!("Database connection established at: {}", db_path);
            Ok(Database {
                conn: Arc::new(Mutex::new(conn)),
            })
        }

        // Create the database schema
        pub async fn create_schema(&self) -> Result<(), Error> {
            let conn = self.conn.lock().await;

            // Same column set for both review collections; a review moves
            // between them on approve/edit.
            for table in ["pending_reviews", "approved_reviews"] {
                conn.execute_batch(&format!(
                    "CREATE TABLE IF NOT EXISTS {table} (
                        id TEXT PRIMARY KEY,
                        user_id TEXT NOT NULL,
                        user_email TEXT NOT NULL,
                        university TEXT NOT NULL,
                        club_name TEXT NOT NULL,
                        category TEXT NOT NULL,
                        overall_rating INTEGER NOT NULL,
                        organization INTEGER NOT NULL DEFAULT 0,
                        social_environment INTEGER NOT NULL DEFAULT 0,
                        value_for_money INTEGER NOT NULL DEFAULT 0,
                        networking INTEGER NOT NULL DEFAULT 0,
                        event_quality INTEGER NOT NULL DEFAULT 0,
                        review_title TEXT NOT NULL,
                        detailed_review TEXT NOT NULL,
                        pros TEXT NOT NULL DEFAULT '',
                        cons TEXT NOT NULL DEFAULT '',
                        recommend INTEGER NOT NULL DEFAULT 0,
                        is_member INTEGER NOT NULL DEFAULT 0,
                        role TEXT NOT NULL DEFAULT '',
                        timestamp TEXT,
                        likes INTEGER NOT NULL DEFAULT 0,
                        dislikes INTEGER NOT NULL DEFAULT 0,
                        liked_by TEXT NOT NULL DEFAULT '[]',
                        disliked_by TEXT NOT NULL DEFAULT '[]'
                    );"
                ))
                .map_err(|e| {
                    eprintln!("Failed creating {} table: {}", table, e);
                    e
                })?;
            }

            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS users (
                    uid TEXT PRIMARY KEY,
                    email TEXT NOT NULL UNIQUE,
                    role TEXT,
                    created_at TEXT
                );",
            )
            .map_err(|e| {
                eprintln!("Failed creating users table: {}", e);
                e
            })?;
            Ok(())
        }

        /// Insert with replace semantics: re-inserting an id overwrites the
        /// record in that collection.
        pub async fn insert_review(
            &self,
            collection: Collection,
            review: &Review,
        ) -> Result<(), Error> {
            let conn = self.conn.lock().await;
            upsert_review(&conn, collection, review)?;
            log!("[DB] Review {} stored in {}", review.id, collection.table());
            Ok(())
        }

        pub async fn get_review(
            &self,
            collection: Collection,
            id: &str,
        ) -> Result<Option<Review>, Error> {
            let conn = self.conn.lock().await;
            let sql = format!(
                "SELECT {} FROM {} WHERE id = ?",
                REVIEW_COLUMNS,
                collection.table()
            );
            match conn.query_row(&sql, [id], review_from_row) {
                Ok(review) => Ok(Some(review)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        }

        pub async fn list_reviews(&self, collection: Collection) -> Result<Vec<Review>, Error> {
            let conn = self.conn.lock().await;
            let sql = format!(
                "SELECT {} FROM {} ORDER BY timestamp DESC",
                REVIEW_COLUMNS,
                collection.table()
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], review_from_row)?;
            rows.collect()
        }

        pub async fn reviews_by_user(
            &self,
            collection: Collection,
            user_id: &str,
        ) -> Result<Vec<Review>, Error> {
            let conn = self.conn.lock().await;
            let sql = format!(
                "SELECT {} FROM {} WHERE user_id = ? ORDER BY timestamp DESC",
                REVIEW_COLUMNS,
                collection.table()
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([user_id], review_from_row)?;
            rows.collect()
        }

        pub async fn reviews_by_university(
            &self,
            collection: Collection,
            university: &str,
            club_name: Option<&str>,
        ) -> Result<Vec<Review>, Error> {
            let conn = self.conn.lock().await;
            match club_name {
                Some(club) => {
                    let sql = format!(
                        "SELECT {} FROM {} WHERE university = ? AND club_name = ?
                         ORDER BY timestamp DESC",
                        REVIEW_COLUMNS,
                        collection.table()
                    );
                    let mut stmt = conn.prepare(&sql)?;
                    let rows = stmt.query_map([university, club], review_from_row)?;
                    rows.collect()
                }
                None => {
                    let sql = format!(
                        "SELECT {} FROM {} WHERE university = ? ORDER BY timestamp DESC",
                        REVIEW_COLUMNS,
                        collection.table()
                    );
                    let mut stmt = conn.prepare(&sql)?;
                    let rows = stmt.query_map([university], review_from_row)?;
                    rows.collect()
                }
            }
        }

        /// Moves a pending review into the approved collection in a single
        /// transaction, so no reader ever observes the record in both (or
        /// neither) collection. Returns false if there was nothing pending.
        pub async fn promote(&self, id: &str) -> Result<bool, Error> {
            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;

            let sql = format!("SELECT {} FROM pending_reviews WHERE id = ?", REVIEW_COLUMNS);
            let review = match tx.query_row(&sql, [id], review_from_row) {
                Ok(review) => review,
                Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(false),
                Err(e) => return Err(e),
            };

            upsert_review(&tx, Collection::Approved, &review)?;
            tx.execute("DELETE FROM pending_reviews WHERE id = ?", [id])?;

            tx.commit()?;
            log!("[DB] Review {} promoted to approved_reviews", id);
            Ok(true)
        }

        /// Writes the edited record back into the pending collection and
        /// removes any approved copy, atomically, so the review re-enters
        /// moderation without a visible duplicate.
        pub async fn replace_pending_and_unpublish(&self, review: &Review) -> Result<(), Error> {
            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;

            upsert_review(&tx, Collection::Pending, review)?;
            tx.execute("DELETE FROM approved_reviews WHERE id = ?", [&review.id])?;

            tx.commit()?;
            log!("[DB] Review {} back in moderation queue", review.id);
            Ok(())
        }

        pub async fn delete_review(&self, collection: Collection, id: &str) -> Result<bool, Error> {
            let conn = self.conn.lock().await;
            let sql = format!("DELETE FROM {} WHERE id = ?", collection.table());
            let deleted = conn.execute(&sql, [id])?;
            if deleted > 0 {
                log!("[DB] Review {} deleted from {}", id, collection.table());
            }
            Ok(deleted > 0)
        }

        /// Applies one vote toggle inside a transaction. The read, the
        /// set/counter update, and the write commit together, so counters
        /// cannot drift from the vote sets. Returns None if the review is not
        /// in the approved collection.
        pub async fn apply_vote(
            &self,
            id: &str,
            voter_id: &str,
            kind: VoteKind,
        ) -> Result<Option<VoteCounts>, Error> {
            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;

            let sql = format!("SELECT {} FROM approved_reviews WHERE id = ?", REVIEW_COLUMNS);
            let mut review = match tx.query_row(&sql, [id], review_from_row) {
                Ok(review) => review,
                Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
                Err(e) => return Err(e),
            };

            let counts = review.toggle_vote(voter_id, kind);
            tx.execute(
                "UPDATE approved_reviews
                 SET likes = ?1, dislikes = ?2, liked_by = ?3, disliked_by = ?4
                 WHERE id = ?5",
                rusqlite::params![
                    review.likes,
                    review.dislikes,
                    serde_json::to_string(&review.liked_by).unwrap_or_else(|_| "[]".into()),
                    serde_json::to_string(&review.disliked_by).unwrap_or_else(|_| "[]".into()),
                    id,
                ],
            )?;

            tx.commit()?;
            Ok(Some(counts))
        }

        /// Distinct universities with at least one approved review, sorted.
        pub async fn universities(&self) -> Result<Vec<String>, Error> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT DISTINCT university FROM approved_reviews ORDER BY university",
            )?;
            let rows = stmt.query_map([], |row| row.get(0))?;
            rows.collect()
        }

        /// Clubs of one university with their approved review counts, sorted
        /// by club name.
        pub async fn clubs_by_university(
            &self,
            university: &str,
        ) -> Result<Vec<ClubSummary>, Error> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT club_name, COUNT(*) FROM approved_reviews
                 WHERE university = ?
                 GROUP BY club_name
                 ORDER BY club_name",
            )?;
            let rows = stmt.query_map([university], |row| {
                Ok(ClubSummary {
                    name: row.get(0)?,
                    review_count: row.get(1)?,
                })
            })?;
            rows.collect()
        }

        pub async fn upsert_user(&self, user: &UserProfile) -> Result<(), Error> {
            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT INTO users (uid, email, role, created_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(uid) DO UPDATE SET
                    email = excluded.email,
                    role = excluded.role",
                rusqlite::params![
                    &user.uid,
                    &user.email,
                    &user.role,
                    user.created_at.map(|ts| ts.to_rfc3339()),
                ],
            )?;
            log!("[DB] User profile stored for {}", user.uid);
            Ok(())
        }

        pub async fn get_user(&self, uid: &str) -> Result<Option<UserProfile>, Error> {
            let conn = self.conn.lock().await;
            match conn.query_row(
                "SELECT uid, email, role, created_at FROM users WHERE uid = ?",
                [uid],
                user_from_row,
            ) {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        }

        pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserProfile>, Error> {
            let conn = self.conn.lock().await;
            match conn.query_row(
                "SELECT uid, email, role, created_at FROM users WHERE email = ?",
                [email],
                user_from_row,
            ) {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        }

        /// Point lookup used by the moderation gate: `"admin"` or None.
        pub async fn get_role(&self, uid: &str) -> Result<Option<String>, Error> {
            Ok(self.get_user(uid).await?.and_then(|user| user.role))
        }
    }

    fn user_from_row(row: &rusqlite::Row<'_>) -> Result<UserProfile, Error> {
        let created_at: Option<String> = row.get(3)?;
        Ok(UserProfile {
            uid: row.get(0)?,
            email: row.get(1)?,
            role: row.get(2)?,
            created_at: created_at
                .and_then(|ts| DateTime::parse_from_rfc3339(&ts).ok())
                .map(|ts| ts.with_timezone(&Utc)),
        })
    }
}

#[cfg(feature = "ssr")]
pub use db_impl::{Collection, Database};
