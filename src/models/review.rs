// src/models/review.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A club review. Lives in exactly one of the two collections at a time:
/// `pending_reviews` (awaiting moderation) or `approved_reviews` (public,
/// votable). Serde names match the stored document fields, which is why the
/// sub-ratings serialize in PascalCase.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "userEmail")]
    pub user_email: String,
    pub university: String,
    #[serde(rename = "clubName")]
    pub club_name: String,
    pub category: String,
    #[serde(rename = "overallRating")]
    pub overall_rating: i64,
    #[serde(rename = "Organization")]
    pub organization: i64,
    #[serde(rename = "SocialEnvironment")]
    pub social_environment: i64,
    #[serde(rename = "ValueForMoney")]
    pub value_for_money: i64,
    #[serde(rename = "Networking")]
    pub networking: i64,
    #[serde(rename = "EventQuality")]
    pub event_quality: i64,
    #[serde(rename = "reviewTitle")]
    pub review_title: String,
    #[serde(rename = "detailedReview")]
    pub detailed_review: String,
    pub pros: String,
    pub cons: String,
    pub recommend: bool,
    #[serde(rename = "isMember")]
    pub is_member: bool,
    /// Self-reported role in the club (Member, Executive, ...), free text.
    pub role: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub likes: i64,
    pub dislikes: i64,
    #[serde(rename = "likedBy", default)]
    pub liked_by: Vec<String>,
    #[serde(rename = "dislikedBy", default)]
    pub disliked_by: Vec<String>,
}

/// The submitter-editable subset of a review, as posted by the rate-club form.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ReviewDraft {
    pub university: String,
    #[serde(rename = "clubName")]
    pub club_name: String,
    pub category: String,
    #[serde(rename = "overallRating")]
    pub overall_rating: i64,
    #[serde(rename = "Organization")]
    pub organization: i64,
    #[serde(rename = "SocialEnvironment")]
    pub social_environment: i64,
    #[serde(rename = "ValueForMoney")]
    pub value_for_money: i64,
    #[serde(rename = "Networking")]
    pub networking: i64,
    #[serde(rename = "EventQuality")]
    pub event_quality: i64,
    #[serde(rename = "reviewTitle")]
    pub review_title: String,
    #[serde(rename = "detailedReview")]
    pub detailed_review: String,
    pub pros: String,
    pub cons: String,
    pub recommend: bool,
    #[serde(rename = "isMember")]
    pub is_member: bool,
    pub role: String,
}

impl ReviewDraft {
    /// Re-validates what the form promises client-side. Required text fields
    /// must be non-empty, the overall rating must be 1-10, sub-ratings may be
    /// 0 (unrated) but never outside 0-10.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("university", &self.university),
            ("clubName", &self.club_name),
            ("category", &self.category),
            ("reviewTitle", &self.review_title),
            ("detailedReview", &self.detailed_review),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{} is required", name));
            }
        }
        if !(1..=10).contains(&self.overall_rating) {
            return Err("overallRating must be between 1 and 10".into());
        }
        let sub_ratings = [
            ("Organization", self.organization),
            ("SocialEnvironment", self.social_environment),
            ("ValueForMoney", self.value_for_money),
            ("Networking", self.networking),
            ("EventQuality", self.event_quality),
        ];
        for (name, value) in sub_ratings {
            if !(0..=10).contains(&value) {
                return Err(format!("{} must be between 0 and 10", name));
            }
        }
        Ok(())
    }
}

/// Which of the two vote sets a voter is touching.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Like,
    Dislike,
}

/// Counter snapshot returned after a vote, so the page can update in place.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteCounts {
    pub likes: i64,
    pub dislikes: i64,
}

/// A club with its approved review count, for the university-clubs page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClubSummary {
    pub name: String,
    #[serde(rename = "reviewCount")]
    pub review_count: i64,
}

impl Review {
    /// Builds a fresh pending review from a draft. Counters start at zero and
    /// both vote sets empty.
    pub fn from_draft(id: String, draft: ReviewDraft, user_id: &str, user_email: &str) -> Self {
        Review {
            id,
            user_id: user_id.to_string(),
            user_email: user_email.to_string(),
            university: draft.university,
            club_name: draft.club_name,
            category: draft.category,
            overall_rating: draft.overall_rating,
            organization: draft.organization,
            social_environment: draft.social_environment,
            value_for_money: draft.value_for_money,
            networking: draft.networking,
            event_quality: draft.event_quality,
            review_title: draft.review_title,
            detailed_review: draft.detailed_review,
            pros: draft.pros,
            cons: draft.cons,
            recommend: draft.recommend,
            is_member: draft.is_member,
            role: draft.role,
            timestamp: Some(Utc::now()),
            likes: 0,
            dislikes: 0,
            liked_by: Vec::new(),
            disliked_by: Vec::new(),
        }
    }

    /// Applies one vote with toggle semantics: voting the same kind again
    /// retracts it, voting the opposite kind switches it. A user id is never
    /// in both sets, and the counters always equal the set sizes.
    pub fn toggle_vote(&mut self, voter_id: &str, kind: VoteKind) -> VoteCounts {
        let (own, other) = match kind {
            VoteKind::Like => (&mut self.liked_by, &mut self.disliked_by),
            VoteKind::Dislike => (&mut self.disliked_by, &mut self.liked_by),
        };
        if own.iter().any(|id| id == voter_id) {
            own.retain(|id| id != voter_id);
        } else {
            other.retain(|id| id != voter_id);
            own.push(voter_id.to_string());
        }
        self.likes = self.liked_by.len() as i64;
        self.dislikes = self.disliked_by.len() as i64;
        VoteCounts {
            likes: self.likes,
            dislikes: self.dislikes,
        }
    }

    /// The editable subset, used to prefill the edit form.
    pub fn draft(&self) -> ReviewDraft {
        ReviewDraft {
            university: self.university.clone(),
            club_name: self.club_name.clone(),
            category: self.category.clone(),
            overall_rating: self.overall_rating,
            organization: self.organization,
            social_environment: self.social_environment,
            value_for_money: self.value_for_money,
            networking: self.networking,
            event_quality: self.event_quality,
            review_title: self.review_title.clone(),
            detailed_review: self.detailed_review.clone(),
            pros: self.pros.clone(),
            cons: self.cons.clone(),
            recommend: self.recommend,
            is_member: self.is_member,
            role: self.role.clone(),
        }
    }

    pub fn vote_counts(&self) -> VoteCounts {
        VoteCounts {
            likes: self.likes,
            dislikes: self.dislikes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn missing_required_field_fails() {
        let mut d = draft();
        d.club_name = "  ".into();
        assert!(d.validate().unwrap_err().contains("clubName"));
    }

    #[test]
    fn overall_rating_out_of_range_fails() {
        let mut d = draft();
        d.overall_rating = 0;
        assert!(d.validate().is_err());
        d.overall_rating = 11;
        assert!(d.validate().is_err());
    }

    #[test]
    fn unrated_sub_rating_is_allowed() {
        let mut d = draft();
        d.networking = 0;
        assert!(d.validate().is_ok());
        d.networking = 11;
        assert!(d.validate().is_err());
    }

    #[test]
    fn from_draft_starts_with_zero_votes() {
        let review = Review::from_draft("r1".into(), draft(), "u1", "u1@test.edu");
        assert_eq!(review.likes, 0);
        assert_eq!(review.dislikes, 0);
        assert!(review.liked_by.is_empty());
        assert!(review.disliked_by.is_empty());
        assert!(review.timestamp.is_some());
    }

    #[test]
    fn toggle_vote_on_and_off() {
        let mut review = Review::from_draft("r1".into(), draft(), "u1", "u1@test.edu");
        let counts = review.toggle_vote("voter", VoteKind::Like);
        assert_eq!(counts.likes, 1);
        assert_eq!(review.liked_by, vec!["voter".to_string()]);

        let counts = review.toggle_vote("voter", VoteKind::Like);
        assert_eq!(counts.likes, 0);
        assert!(review.liked_by.is_empty());
    }

    #[test]
    fn switching_vote_never_double_counts() {
        let mut review = Review::from_draft("r1".into(), draft(), "u1", "u1@test.edu");
        review.toggle_vote("voter", VoteKind::Like);
        let counts = review.toggle_vote("voter", VoteKind::Dislike);
        assert_eq!(counts.likes, 0);
        assert_eq!(counts.dislikes, 1);
        assert!(review.liked_by.is_empty());
        assert_eq!(review.disliked_by, vec!["voter".to_string()]);
    }

    #[test]
    fn distinct_voters_keep_independent_votes() {
        let mut review = Review::from_draft("r1".into(), draft(), "u1", "u1@test.edu");
        review.toggle_vote("a", VoteKind::Like);
        let counts = review.toggle_vote("b", VoteKind::Like);
        assert_eq!(counts.likes, 2);
        assert_eq!(review.liked_by.len(), 2);
    }

    #[test]
    fn counters_track_set_sizes() {
        let mut review = Review::from_draft("r1".into(), draft(), "u1", "u1@test.edu");
        for voter in ["a", "b", "c"] {
            review.toggle_vote(voter, VoteKind::Like);
        }
        review.toggle_vote("b", VoteKind::Dislike);
        assert_eq!(review.likes, review.liked_by.len() as i64);
        assert_eq!(review.dislikes, review.disliked_by.len() as i64);
    }
}
