//! Questionnaire and result data models shared with the backend.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound of a single category score (5 questions × rating 5).
pub const MAX_CATEGORY_SCORE: f64 = 25.0;

/// One of the four personality/career dimensions a question maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Analytical,
    Creative,
    Social,
    Leadership,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 4] = [
        Category::Analytical,
        Category::Creative,
        Category::Social,
        Category::Leadership,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analytical => "analytical",
            Self::Creative => "creative",
            Self::Social => "social",
            Self::Leadership => "leadership",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Analytical => "Analytical",
            Self::Creative => "Creative",
            Self::Social => "Social",
            Self::Leadership => "Leadership",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Analytical => "🔬",
            Self::Creative => "🎨",
            Self::Social => "👥",
            Self::Leadership => "👑",
        }
    }

    /// Short guidance shown when this is the dominant category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Analytical => {
                "You excel at problem-solving and analytical thinking. Consider careers that involve research, data analysis, and technical expertise."
            }
            Self::Creative => {
                "You have strong creative abilities and innovative thinking. Explore careers in design, arts, and creative industries."
            }
            Self::Social => {
                "You have excellent interpersonal skills. Consider careers focused on helping others and team collaboration."
            }
            Self::Leadership => {
                "You are a natural leader with vision and decisiveness. Explore management and entrepreneurial roles."
            }
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "analytical" => Ok(Self::Analytical),
            "creative" => Ok(Self::Creative),
            "social" => Ok(Self::Social),
            "leadership" => Ok(Self::Leadership),
            other => Err(format!(
                "unknown category {other:?} (expected analytical, creative, social or leadership)"
            )),
        }
    }
}

/// A questionnaire item. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(alias = "_id")]
    pub id: String,
    pub text: String,
    pub category: Category,
    pub order: u32,
}

/// A Likert rating, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Returns `None` for anything outside 1..=5.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Strongly Disagree",
            2 => "Disagree",
            3 => "Neutral",
            4 => "Agree",
            _ => "Strongly Agree",
        }
    }

    /// Every rating in ascending order.
    pub fn all() -> impl Iterator<Item = Rating> {
        (Self::MIN..=Self::MAX).map(Rating)
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("rating must be between 1 and 5, got {value}"))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("rating must be a whole number from 1 to 5, got {s:?}"))?;
        Self::try_from(value)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payload posted to the scoring backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub answers: Vec<Rating>,
}

/// Per-category scores computed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryScores {
    pub analytical: f64,
    pub creative: f64,
    pub social: f64,
    pub leadership: f64,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Analytical => self.analytical,
            Category::Creative => self.creative,
            Category::Social => self.social,
            Category::Leadership => self.leadership,
        }
    }
}

/// Scored assessment returned by the backend. The client never recomputes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawResult")]
pub struct AssessmentResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub respondent_name: String,
    pub respondent_email: String,
    pub category_scores: CategoryScores,
    pub dominant_category: Category,
    pub recommended_careers: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Wire shape of a result. Backends may send the stored document's own
/// field names (`_id`, `name`, `email`, `createdAt`) next to or instead of
/// the canonical ones; canonical names win when both are present.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResult {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    mongo_id: Option<String>,
    #[serde(default)]
    respondent_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    respondent_email: Option<String>,
    #[serde(default)]
    email: Option<String>,
    category_scores: CategoryScores,
    dominant_category: Category,
    recommended_careers: Vec<String>,
    #[serde(default)]
    submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<RawResult> for AssessmentResult {
    type Error = String;

    fn try_from(raw: RawResult) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.id.or(raw.mongo_id),
            respondent_name: raw
                .respondent_name
                .or(raw.name)
                .ok_or("missing field `respondentName`")?,
            respondent_email: raw
                .respondent_email
                .or(raw.email)
                .ok_or("missing field `respondentEmail`")?,
            category_scores: raw.category_scores,
            dominant_category: raw.dominant_category,
            recommended_careers: raw.recommended_careers,
            submitted_at: raw
                .submitted_at
                .or(raw.created_at)
                .ok_or("missing field `submittedAt`")?,
        })
    }
}

/// Informational career domain shown alongside results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerDomain {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(alias = "color", default)]
    pub color_theme: String,
    #[serde(default)]
    pub careers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(Rating::new(0).is_none());
        assert!(Rating::new(6).is_none());
        assert_eq!(Rating::new(1).map(Rating::value), Some(1));
        assert_eq!(Rating::new(5).map(Rating::value), Some(5));
        assert_eq!(Rating::all().count(), 5);
    }

    #[test]
    fn rating_from_str_rejects_junk() {
        assert_eq!("3".parse::<Rating>().unwrap().value(), 3);
        assert_eq!(" 4 ".parse::<Rating>().unwrap().value(), 4);
        assert!("2.5".parse::<Rating>().is_err());
        assert!("-1".parse::<Rating>().is_err());
        assert!("7".parse::<Rating>().is_err());
        assert!("yes".parse::<Rating>().is_err());
    }

    #[test]
    fn rating_serde_is_a_plain_integer() {
        let json = serde_json::to_string(&Rating::new(4).unwrap()).unwrap();
        assert_eq!(json, "4");
        assert!(serde_json::from_str::<Rating>("0").is_err());
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn rating_labels() {
        assert_eq!(Rating::new(1).unwrap().label(), "Strongly Disagree");
        assert_eq!(Rating::new(3).unwrap().label(), "Neutral");
        assert_eq!(Rating::new(5).unwrap().label(), "Strongly Agree");
    }

    #[test]
    fn category_display_matches_serde() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(format!("\"{category}\""), json);
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("artistic".parse::<Category>().is_err());
    }

    #[test]
    fn question_accepts_mongo_id() {
        let q: Question = serde_json::from_value(serde_json::json!({
            "_id": "665f1c",
            "text": "I enjoy solving puzzles",
            "category": "analytical",
            "order": 1
        }))
        .unwrap();
        assert_eq!(q.id, "665f1c");
        assert_eq!(q.category, Category::Analytical);
    }

    #[test]
    fn submission_wire_shape() {
        let submission = Submission {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            answers: vec![Rating::new(5).unwrap(), Rating::new(3).unwrap()],
        };
        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "Ada", "email": "ada@example.com", "answers": [5, 3]})
        );
    }

    #[test]
    fn result_accepts_backend_field_names() {
        let result: AssessmentResult = serde_json::from_value(serde_json::json!({
            "_id": "abc123",
            "name": "Ada",
            "email": "ada@example.com",
            "categoryScores": {"analytical": 21.0, "creative": 12.5, "social": 9.0, "leadership": 15.0},
            "dominantCategory": "analytical",
            "recommendedCareers": ["Data Scientist", "Software Engineer", "Research Analyst"],
            "createdAt": "2026-10-01T12:00:00Z",
            "answers": [5, 4, 3]
        }))
        .unwrap();
        assert_eq!(result.id.as_deref(), Some("abc123"));
        assert_eq!(result.respondent_name, "Ada");
        assert_eq!(result.dominant_category, Category::Analytical);
        assert_eq!(result.category_scores.get(Category::Creative), 12.5);
        assert_eq!(result.recommended_careers.len(), 3);
    }

    #[test]
    fn result_prefers_canonical_names_when_both_are_sent() {
        let result: AssessmentResult = serde_json::from_value(serde_json::json!({
            "_id": "abc123",
            "id": "abc123",
            "name": "Ada L.",
            "respondentName": "Ada",
            "email": "old@example.com",
            "respondentEmail": "ada@example.com",
            "categoryScores": {"analytical": 21.0, "creative": 12.5, "social": 9.0, "leadership": 15.0},
            "dominantCategory": "analytical",
            "recommendedCareers": ["Data Scientist", "Software Engineer", "Research Analyst"],
            "submittedAt": "2026-10-01T12:00:00Z",
            "createdAt": "2026-10-01T11:59:58Z",
            "updatedAt": "2026-10-01T11:59:58Z"
        }))
        .unwrap();
        assert_eq!(result.id.as_deref(), Some("abc123"));
        assert_eq!(result.respondent_name, "Ada");
        assert_eq!(result.respondent_email, "ada@example.com");
        assert_eq!(result.submitted_at.to_rfc3339(), "2026-10-01T12:00:00+00:00");
    }

    #[test]
    fn result_serde_survives_a_file_round_trip() {
        let result: AssessmentResult = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "categoryScores": {"analytical": 1.0, "creative": 2.0, "social": 3.0, "leadership": 4.0},
            "dominantCategory": "leadership",
            "recommendedCareers": ["CEO"],
            "createdAt": "2026-10-01T12:00:00Z"
        }))
        .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["respondentName"], "Ada");
        assert!(json.get("id").is_none());
        let back: AssessmentResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn result_without_timestamp_is_rejected() {
        let err = serde_json::from_value::<AssessmentResult>(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "categoryScores": {"analytical": 1.0, "creative": 2.0, "social": 3.0, "leadership": 4.0},
            "dominantCategory": "leadership",
            "recommendedCareers": []
        }))
        .unwrap_err();
        assert!(err.to_string().contains("submittedAt"));
    }

    #[test]
    fn career_domain_accepts_color_alias() {
        let domain: CareerDomain = serde_json::from_value(serde_json::json!({
            "name": "creative",
            "displayName": "Creative",
            "icon": "🎨",
            "color": "from-pink-500 to-rose-600",
            "careers": ["Graphic Designer", "Writer"]
        }))
        .unwrap();
        assert_eq!(domain.display_name, "Creative");
        assert_eq!(domain.color_theme, "from-pink-500 to-rose-600");
        assert_eq!(domain.careers.len(), 2);
    }
}
