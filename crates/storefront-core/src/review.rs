use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Highest star rating a shopper can give.
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewAuthor {
    pub name: String,
}

/// A published product review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Absent when the account was deleted after posting.
    #[serde(default)]
    pub user: Option<ReviewAuthor>,
}

impl Review {
    /// `★★★☆☆` for a rating of 3. Ratings above [`MAX_RATING`] are clamped.
    #[must_use]
    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating.min(MAX_RATING));
        let mut out = "★".repeat(filled);
        out.push_str(&"☆".repeat(usize::from(MAX_RATING) - filled));
        out
    }

    #[must_use]
    pub fn author_name(&self) -> &str {
        self.user.as_ref().map_or("Ẩn danh", |u| u.name.as_str())
    }
}

/// Body of `POST /api/reviews`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub product_id: i64,
    pub rating: u8,
    pub comment: String,
}

impl NewReview {
    /// Whether `rating` is a star count the backend accepts (1 to 5).
    #[must_use]
    pub fn has_valid_rating(&self) -> bool {
        (1..=MAX_RATING).contains(&self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_review() {
        let review: Review = serde_json::from_value(serde_json::json!({
            "id": 4,
            "rating": 4,
            "comment": "Khoan khỏe, pin trâu",
            "createdAt": "2025-12-01T03:00:00.000Z",
            "user": { "name": "Trần Bình" }
        }))
        .unwrap();
        assert_eq!(review.author_name(), "Trần Bình");
        assert_eq!(review.stars(), "★★★★☆");
        assert!(review.created_at.is_some());
    }

    #[test]
    fn missing_author_and_comment_are_tolerated() {
        let review: Review =
            serde_json::from_value(serde_json::json!({ "id": 5, "rating": 9, "comment": null }))
                .unwrap();
        assert_eq!(review.author_name(), "Ẩn danh");
        assert_eq!(review.stars(), "★★★★★");
        assert!(review.comment.is_none());
    }

    #[test]
    fn new_review_rating_bounds() {
        let mut review = NewReview {
            product_id: 7,
            rating: 0,
            comment: String::new(),
        };
        assert!(!review.has_valid_rating());
        review.rating = 5;
        assert!(review.has_valid_rating());
        review.rating = 6;
        assert!(!review.has_valid_rating());

        let value = serde_json::to_value(&review).unwrap();
        assert_eq!(value["productId"], 7);
    }
}
