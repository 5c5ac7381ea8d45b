//! Coloured status cells shown in admin lists and detail pages.
//!
//! Thresholds are fixed; every renderer is a pure function of the record so
//! the colour rules can be tested without a database.

use chrono::NaiveDate;
use entity::{
    budget, csr_report, event, event_feedback, governance_body, initiative, kpi, kpi_metric,
    milestone, progress_report, risk, risk_assessment, stakeholder, task,
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Orange,
    Red,
    DarkRed,
    Blue,
    Gray,
}

impl Color {
    pub fn css(self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Orange => "orange",
            Color::Red => "red",
            Color::DarkRed => "darkred",
            Color::Blue => "blue",
            Color::Gray => "gray",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Badge {
    pub label: String,
    pub color: Color,
    /// Secondary line, e.g. the raw figures behind a percentage.
    pub detail: Option<String>,
}

impl Badge {
    pub fn new(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            color,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn not_available() -> Self {
        Self::new("N/A", Color::Gray)
    }

    pub fn html(&self) -> String {
        let mut out = format!(
            "<span style=\"color: {};\">{}</span>",
            self.color.css(),
            escape(&self.label)
        );
        if let Some(detail) = &self.detail {
            out.push_str("<br><small>");
            out.push_str(&escape(detail));
            out.push_str("</small>");
        }
        out
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

pub fn money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{:02}", cents % 100)
}

fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

pub fn progress_color(pct: f64) -> Color {
    if pct >= 75.0 {
        Color::Green
    } else if pct >= 50.0 {
        Color::Orange
    } else {
        Color::Red
    }
}

pub fn utilization_color(pct: f64) -> Color {
    if pct > 90.0 {
        Color::Red
    } else if pct > 75.0 {
        Color::Orange
    } else {
        Color::Green
    }
}

pub fn achievement_color(pct: f64) -> Color {
    if pct >= 100.0 {
        Color::Green
    } else if pct >= 75.0 {
        Color::Orange
    } else {
        Color::Red
    }
}

pub fn risk_score_color(score: i32) -> Color {
    if score > 15 {
        Color::Red
    } else if score > 10 {
        Color::Orange
    } else {
        Color::Green
    }
}

pub fn risk_level_color(level: risk::RiskLevel) -> Color {
    match level {
        risk::RiskLevel::Low => Color::Green,
        risk::RiskLevel::Medium => Color::Orange,
        risk::RiskLevel::High => Color::Red,
        risk::RiskLevel::Critical => Color::DarkRed,
    }
}

/// `done/total` with the completion share underneath.
pub fn ratio(done: u64, total: u64) -> Badge {
    let pct = if total == 0 {
        0.0
    } else {
        done as f64 / total as f64 * 100.0
    };
    let color = if total > 0 && done == total {
        Color::Green
    } else if pct >= 50.0 {
        Color::Orange
    } else {
        Color::Red
    };
    Badge::new(format!("{done}/{total}"), color).with_detail(format!("({})", percent(pct)))
}

pub fn progress(pct: f64) -> Badge {
    let pct = pct.clamp(0.0, 100.0);
    Badge::new(percent(pct), progress_color(pct))
}

pub fn budget_utilization(spent_cents: i64, budget_cents: i64) -> Badge {
    if budget_cents == 0 {
        return Badge::not_available();
    }
    let pct = (spent_cents as f64 / budget_cents as f64 * 100.0).clamp(0.0, 100.0);
    Badge::new(
        format!("{} ({})", money(spent_cents), percent(pct)),
        utilization_color(pct),
    )
    .with_detail(format!("of {}", money(budget_cents)))
}

pub fn initiative_budget(record: &initiative::Model, _today: NaiveDate) -> Badge {
    budget_utilization(record.actual_spend_cents, record.budget_cents)
}

pub fn initiative_timeline(record: &initiative::Model, today: NaiveDate) -> Badge {
    let pct = record.timeline_progress(today);
    let color = if pct > 90.0 { Color::Orange } else { Color::Blue };
    Badge::new(percent(pct), color).with_detail(record.end_date.format("%Y-%m-%d").to_string())
}

/// Inputs to the weighted initiative health score.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HealthInputs {
    pub timeline_pct: Option<f64>,
    pub spend_cents: i64,
    pub budget_cents: i64,
    pub high_risks: u64,
    pub total_risks: u64,
    pub achieved_kpis: u64,
    pub total_kpis: u64,
}

impl HealthInputs {
    /// Elapsed timeline share, unclamped so overruns count against health.
    pub fn for_initiative(record: &initiative::Model, today: NaiveDate) -> Self {
        let total = record.duration_days();
        let timeline_pct = (total > 0)
            .then(|| (today - record.start_date).num_days() as f64 / total as f64 * 100.0);
        Self {
            timeline_pct,
            spend_cents: record.actual_spend_cents,
            budget_cents: record.budget_cents,
            ..Self::default()
        }
    }

    fn timeline_health(&self) -> f64 {
        match self.timeline_pct {
            Some(pct) => overrun_health(pct),
            None => 0.0,
        }
    }

    fn budget_health(&self) -> f64 {
        if self.budget_cents == 0 {
            return 100.0;
        }
        overrun_health(self.spend_cents as f64 / self.budget_cents as f64 * 100.0)
    }

    fn risk_health(&self) -> f64 {
        if self.total_risks == 0 {
            return 100.0;
        }
        (100.0 - self.high_risks as f64 / self.total_risks as f64 * 100.0).max(0.0)
    }

    fn progress_health(&self) -> f64 {
        if self.total_kpis == 0 {
            return 100.0;
        }
        self.achieved_kpis as f64 / self.total_kpis as f64 * 100.0
    }

    pub fn score(&self) -> f64 {
        self.timeline_health() * 0.3
            + self.budget_health() * 0.3
            + self.risk_health() * 0.2
            + self.progress_health() * 0.2
    }
}

fn overrun_health(pct: f64) -> f64 {
    (100.0 - (pct - 100.0).max(0.0)).max(0.0)
}

pub fn health(inputs: &HealthInputs) -> Badge {
    let score = inputs.score();
    let (label, color) = if score >= 80.0 {
        ("Healthy", Color::Green)
    } else if score >= 60.0 {
        ("At Risk", Color::Orange)
    } else {
        ("Critical", Color::Red)
    };
    Badge::new(label, color).with_detail(percent(score))
}

pub fn risk_totals(high: u64, total: u64) -> Badge {
    let color = if high > 0 { Color::Red } else { Color::Green };
    Badge::new(format!("{total} total"), color).with_detail(format!("{high} critical"))
}

pub fn task_progress(record: &task::Model, _today: NaiveDate) -> Badge {
    progress(f64::from(record.progress))
}

pub fn task_due(record: &task::Model, today: NaiveDate) -> Badge {
    if record.status == task::Status::Completed {
        return Badge::new("Completed", Color::Green);
    }
    let days = record.days_until_due(today);
    if days < 0 {
        Badge::new(format!("Overdue by {} days", -days), Color::Red)
    } else if days <= 7 {
        Badge::new(format!("Due in {days} days"), Color::Orange)
    } else {
        Badge::new(format!("Due in {days} days"), Color::Green)
    }
}

pub fn milestone_progress(record: &milestone::Model, _today: NaiveDate) -> Badge {
    progress(f64::from(record.progress))
}

pub fn milestone_delay(record: &milestone::Model, today: NaiveDate) -> Badge {
    if record.status == milestone::Status::Completed {
        return Badge::new("Completed", Color::Green);
    }
    let remaining = record.days_remaining(today);
    if remaining < 0 {
        Badge::new(format!("Delayed by {} days", -remaining), Color::Red)
    } else {
        Badge::new(format!("{remaining} days remaining"), Color::Green)
    }
}

pub fn risk_score(record: &risk::Model, _today: NaiveDate) -> Badge {
    let score = record.risk_score();
    Badge::new(score.to_string(), risk_score_color(score))
        .with_detail(format!("{} x {}", record.probability, record.impact))
}

pub fn risk_level(record: &risk::Model, _today: NaiveDate) -> Badge {
    let label = serde_json::to_value(record.risk_level)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default();
    Badge::new(label, risk_level_color(record.risk_level))
}

pub fn kpi_achievement(record: &kpi::Model, _today: NaiveDate) -> Badge {
    let pct = record.achievement_percentage();
    Badge::new(percent(pct), achievement_color(pct)).with_detail(format!(
        "{} / {} {}",
        record.current_value, record.target_value, record.unit_of_measure
    ))
}

pub fn kpi_metric_completion(record: &kpi_metric::Model, _today: NaiveDate) -> Badge {
    let pct = record.completion_percentage();
    Badge::new(percent(pct), achievement_color(pct))
}

pub fn last_contact(record: &stakeholder::Model, today: NaiveDate) -> Badge {
    let Some(days) = record.days_since_contact(today) else {
        return Badge::new("No contact recorded", Color::Gray);
    };
    let color = if days > 90 {
        Color::Red
    } else if days > 30 {
        Color::Orange
    } else {
        Color::Green
    };
    Badge::new(format!("{days} days ago"), color)
}

pub fn event_participants(record: &event::Model, _today: NaiveDate) -> Badge {
    let label = format!("{} / {}", record.current_participants, record.max_participants);
    if record.is_full() {
        Badge::new(format!("{label} (FULL)"), Color::Red)
    } else {
        Badge::new(label, Color::Green)
    }
}

pub fn event_budget(record: &event::Model, _today: NaiveDate) -> Badge {
    budget_utilization(record.actual_spend_cents, record.budget_cents)
}

pub fn variance(variance_cents: i64, variance_pct: f64) -> Badge {
    let color = if variance_cents > 0 {
        Color::Red
    } else {
        Color::Green
    };
    Badge::new(money(variance_cents), color).with_detail(percent(variance_pct))
}

pub fn budget_variance(record: &budget::Model, _today: NaiveDate) -> Badge {
    variance(record.variance_amount(), record.variance_percentage())
}

pub fn approval(approved: bool) -> Badge {
    if approved {
        Badge::new("Approved", Color::Green)
    } else {
        Badge::new("Pending", Color::Orange)
    }
}

pub fn budget_approval(record: &budget::Model, _today: NaiveDate) -> Badge {
    approval(record.approved_by.is_some())
}

pub fn assessment_score(record: &risk_assessment::Model, _today: NaiveDate) -> Badge {
    let score = record.risk_score();
    let color = if score >= 6 {
        Color::Red
    } else if score >= 3 {
        Color::Orange
    } else {
        Color::Green
    };
    Badge::new(score.to_string(), color)
}

pub fn feedback_rating(record: &event_feedback::Model, _today: NaiveDate) -> Badge {
    let filled = record.rating.clamp(0, 5) as usize;
    let stars = format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled));
    let color = if record.rating >= 4 {
        Color::Green
    } else if record.rating >= 3 {
        Color::Orange
    } else {
        Color::Red
    };
    Badge::new(stars, color)
}

pub fn committee_status(record: &governance_body::Model, today: NaiveDate) -> Badge {
    if !record.is_active {
        Badge::new("Inactive", Color::Red)
    } else if record.tenure_expired(today) {
        Badge::new("Tenure Expired", Color::Orange)
    } else {
        Badge::new("Active", Color::Green)
    }
}

pub fn csr_report_status(record: &csr_report::Model, _today: NaiveDate) -> Badge {
    use csr_report::Status;
    match record.status {
        Status::Draft => Badge::new("Draft", Color::Gray),
        Status::Review => Badge::new("Under Review", Color::Orange),
        Status::Approved => Badge::new("Approved", Color::Green),
        Status::Published => Badge::new("Published", Color::Blue),
    }
}

pub fn sdg_metrics(record: &csr_report::Model, _today: NaiveDate) -> Badge {
    let (sdg5, sdg8) = record.sdg_metric_counts();
    Badge::new(format!("SDG 5: {sdg5} / SDG 8: {sdg8}"), Color::Blue).with_detail(format!(
        "{} spent, {} per beneficiary",
        money(record.budget_utilized_cents),
        money(record.cost_per_beneficiary_cents)
    ))
}

pub fn progress_report_status(record: &progress_report::Model, _today: NaiveDate) -> Badge {
    use progress_report::Status;
    let badge = match record.status {
        Status::Draft => Badge::new("Draft", Color::Gray),
        Status::Submitted => Badge::new("Submitted", Color::Blue),
        Status::Reviewed => Badge::new("Reviewed", Color::Orange),
        Status::Approved => Badge::new("Approved", Color::Green),
    };
    if record.reviewed_by.is_some() {
        badge
    } else {
        badge.with_detail("Not reviewed")
    }
}

pub fn yes_no(value: bool) -> Badge {
    if value {
        Badge::new("Yes", Color::Green)
    } else {
        Badge::new("No", Color::Gray)
    }
}

pub fn count(n: u64, noun: &str) -> Badge {
    let plural = if n == 1 { "" } else { "s" };
    Badge::new(format!("{n} {noun}{plural}"), Color::Gray)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn progress_thresholds() {
        assert_eq!(progress(75.0).color, Color::Green);
        assert_eq!(progress(50.0).color, Color::Orange);
        assert_eq!(progress(49.9).color, Color::Red);
        assert_eq!(progress(140.0).label, "100.0%");
    }

    #[test]
    fn utilization_thresholds() {
        assert_eq!(budget_utilization(95, 100).color, Color::Red);
        assert_eq!(budget_utilization(80, 100).color, Color::Orange);
        assert_eq!(budget_utilization(75, 100).color, Color::Green);
        assert_eq!(budget_utilization(10, 0), Badge::not_available());
    }

    #[test]
    fn achievement_and_score_thresholds() {
        assert_eq!(achievement_color(100.0), Color::Green);
        assert_eq!(achievement_color(80.0), Color::Orange);
        assert_eq!(achievement_color(10.0), Color::Red);
        assert_eq!(risk_score_color(16), Color::Red);
        assert_eq!(risk_score_color(12), Color::Orange);
        assert_eq!(risk_score_color(10), Color::Green);
    }

    #[test]
    fn risk_levels_map_to_colors() {
        assert_eq!(risk_level_color(risk::RiskLevel::Low), Color::Green);
        assert_eq!(risk_level_color(risk::RiskLevel::Critical), Color::DarkRed);
    }

    #[test]
    fn ratios_only_go_green_when_complete() {
        assert_eq!(ratio(4, 4).color, Color::Green);
        assert_eq!(ratio(2, 4).color, Color::Orange);
        assert_eq!(ratio(1, 4).color, Color::Red);
        assert_eq!(ratio(0, 0).color, Color::Red);
        assert_eq!(ratio(3, 4).label, "3/4");
    }

    #[test]
    fn healthy_when_nothing_is_wrong() {
        let inputs = HealthInputs {
            timeline_pct: Some(40.0),
            spend_cents: 100,
            budget_cents: 1_000,
            ..Default::default()
        };
        assert_eq!(inputs.score(), 100.0);
        assert_eq!(health(&inputs).label, "Healthy");
    }

    #[test]
    fn overruns_and_risks_pull_health_down() {
        let inputs = HealthInputs {
            timeline_pct: Some(150.0),
            spend_cents: 1_500,
            budget_cents: 1_000,
            high_risks: 2,
            total_risks: 2,
            achieved_kpis: 0,
            total_kpis: 1,
        };
        // 50 * 0.3 + 50 * 0.3 + 0 + 0
        assert!((inputs.score() - 30.0).abs() < 1e-9);
        let badge = health(&inputs);
        assert_eq!((badge.label.as_str(), badge.color), ("Critical", Color::Red));
    }

    #[test]
    fn at_risk_band() {
        let inputs = HealthInputs {
            timeline_pct: Some(50.0),
            high_risks: 1,
            total_risks: 1,
            achieved_kpis: 0,
            total_kpis: 2,
            ..Default::default()
        };
        // 30 + 30 + 0 + 0
        assert_eq!(health(&inputs).label, "At Risk");
    }

    #[test]
    fn zero_length_timeline_counts_as_unhealthy() {
        let inputs = HealthInputs::default();
        assert_eq!(inputs.score(), 70.0);
    }

    #[test]
    fn milestone_delay_labels() {
        let record = milestone::Model {
            id: uuid::Uuid::nil(),
            initiative_id: uuid::Uuid::nil(),
            title: "Baseline survey".into(),
            description: String::new(),
            target_date: day(2024, 3, 1),
            actual_completion_date: None,
            status: milestone::Status::InProgress,
            deliverables: String::new(),
            responsible_person_id: uuid::Uuid::nil(),
            progress: 40,
            notes: String::new(),
            created_at: entity::now(),
            updated_at: entity::now(),
        };
        let late = milestone_delay(&record, day(2024, 3, 11));
        assert_eq!((late.label.as_str(), late.color), ("Delayed by 10 days", Color::Red));
        let early = milestone_delay(&record, day(2024, 2, 20));
        assert_eq!(early.label, "10 days remaining");
        let done = milestone::Model {
            status: milestone::Status::Completed,
            ..record
        };
        assert_eq!(milestone_delay(&done, day(2024, 5, 1)).label, "Completed");
    }

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(123_456_789), "$1,234,567.89");
        assert_eq!(money(5), "$0.05");
        assert_eq!(money(-250_000), "-$2,500.00");
    }

    #[test]
    fn html_escapes_labels() {
        let badge = Badge::new("<b>", Color::Red).with_detail("a & b");
        assert_eq!(
            badge.html(),
            "<span style=\"color: red;\">&lt;b&gt;</span><br><small>a &amp; b</small>"
        );
    }

    #[test]
    fn feedback_stars_follow_the_rating() {
        let record = event_feedback::Model {
            id: uuid::Uuid::nil(),
            event_id: uuid::Uuid::nil(),
            participant_name: String::new(),
            email: String::new(),
            rating: 3,
            feedback_text: "Fine".into(),
            suggestions: String::new(),
            would_recommend: true,
            areas_of_improvement: String::new(),
            is_anonymous: true,
            submitted_at: entity::now(),
        };
        let badge = feedback_rating(&record, day(2024, 1, 1));
        assert_eq!(badge.label, "★★★☆☆");
        assert_eq!(badge.color, Color::Orange);
        let badge = feedback_rating(&event_feedback::Model { rating: 5, ..record }, day(2024, 1, 1));
        assert_eq!((badge.label.as_str(), badge.color), ("★★★★★", Color::Green));
    }

    #[test]
    fn counts_pluralise() {
        assert_eq!(count(1, "participant").label, "1 participant");
        assert_eq!(count(0, "participant").label, "0 participants");
    }
}
