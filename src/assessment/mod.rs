//! Questionnaire domain types shared by the wizard, the API client and the
//! result report.

pub mod model;

pub use model::{
    AssessmentResult, CareerDomain, Category, CategoryScores, MAX_CATEGORY_SCORE, Question,
    Rating, Submission,
};
