//! Plain-text rendering for the terminal: questions, results, domains.

use crate::assessment::{
    AssessmentResult, CareerDomain, Category, MAX_CATEGORY_SCORE, Question, Rating,
};
use crate::wizard::{AnswerSlot, Progress};

/// Width of score and progress bars, in characters.
const BAR_WIDTH: usize = 20;

fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Score as a percentage of the category maximum, clamped to 0..=100.
pub fn score_percent(score: f64) -> f64 {
    (score / MAX_CATEGORY_SCORE * 100.0).clamp(0.0, 100.0)
}

fn medal(rank: usize) -> String {
    match rank {
        0 => "🥇".to_string(),
        1 => "🥈".to_string(),
        2 => "🥉".to_string(),
        n => format!("{}.", n + 1),
    }
}

pub fn render_progress(progress: Progress) -> String {
    format!(
        "{} Question {} of {} ({}%)",
        bar(progress.current as f64 / progress.total.max(1) as f64),
        progress.current,
        progress.total,
        progress.percent()
    )
}

/// A question with its Likert options, marking the current selection.
pub fn render_question(question: &Question, progress: Progress, current: AnswerSlot) -> String {
    let mut lines = vec![
        render_progress(progress),
        String::new(),
        question.text.clone(),
        String::new(),
    ];
    for rating in Rating::all() {
        let marker = if current.rating() == Some(rating) { '>' } else { ' ' };
        lines.push(format!(" {marker} {rating}) {}", rating.label()));
    }
    lines.join("\n")
}

/// The full result screen. `domains` may be empty if they could not be fetched.
pub fn render_result(result: &AssessmentResult, domains: &[CareerDomain]) -> String {
    let dominant = result.dominant_category;
    let mut parts = vec![
        "# Your Assessment Results".to_string(),
        format!(
            "{} <{}> · {}",
            result.respondent_name,
            result.respondent_email,
            result.submitted_at.format("%Y-%m-%d %H:%M UTC")
        ),
        String::new(),
        format!("## Dominant category: {} {}", dominant.icon(), dominant.label()),
        dominant.description().to_string(),
        String::new(),
        "## Category scores".to_string(),
    ];

    for category in Category::ALL {
        let score = result.category_scores.get(category);
        let pct = score_percent(score);
        let star = if category == dominant { " *" } else { "" };
        parts.push(format!(
            "{} {:<11} {} {:>3.0}%  {} / {}{}",
            category.icon(),
            category.label(),
            bar(pct / 100.0),
            pct,
            score.round(),
            MAX_CATEGORY_SCORE,
            star
        ));
    }

    parts.push(String::new());
    parts.push("## Recommended careers".to_string());
    for (rank, career) in result.recommended_careers.iter().enumerate() {
        parts.push(format!("{} {}", medal(rank), career));
    }

    if let Some(domain) = domains.iter().find(|d| d.name == dominant.as_str()) {
        parts.push(String::new());
        parts.push(format!("## More {} careers", domain.display_name));
        for career in &domain.careers {
            parts.push(format!("- {career}"));
        }
    }

    parts.join("\n")
}

pub fn render_domains(domains: &[CareerDomain]) -> String {
    let mut parts = Vec::new();
    for domain in domains {
        parts.push(format!("{} {}", domain.icon, domain.display_name));
        for career in &domain.careers {
            parts.push(format!("  - {career}"));
        }
    }
    parts.join("\n")
}

/// One line per past assessment, newest first as returned by the backend.
pub fn render_history(results: &[AssessmentResult]) -> String {
    if results.is_empty() {
        return "No assessments found.".to_string();
    }
    results
        .iter()
        .map(|r| {
            format!(
                "{}  {}  {} {}  {}",
                r.submitted_at.format("%Y-%m-%d"),
                r.id.as_deref().unwrap_or("-"),
                r.dominant_category.icon(),
                r.dominant_category.label(),
                r.recommended_careers.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_questions(questions: &[Question]) -> String {
    questions
        .iter()
        .map(|q| format!("{:>2}. [{}] {}", q.order, q.category, q.text))
        .collect::<Vec<_>>()
        .join("\n")
}
