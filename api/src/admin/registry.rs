//! The admin models, grouped the way the site index lists them.

use chrono::NaiveDate;
use entity::{
    annual_budget, brainstorming_session, budget, budget_tracking, company, core_committee,
    csr_proposal, csr_report, department, diversity_metric, event, event_feedback, execution_log,
    execution_log_participant, financial_tracking, governance_body, governance_body_member,
    governance_meeting, governance_meeting_attendee, impact_story, industry, initiative, job,
    job_application, job_seeker, kpi, kpi_metric, member, metric_progress, milestone,
    program_logbook, progress_report, risk, risk_assessment, sdg_mapping, stakeholder,
    student_volunteer, task, user,
};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter};

use super::badge::{self, Badge, HealthInputs};
use super::resource::{BoxFuture, Fieldset, ListColumn, ModelAdmin, Resource};

type Col<M> = ListColumn<M>;

pub fn resources() -> Vec<Box<dyn Resource>> {
    vec![
        // users
        Box::new(users()),
        Box::new(members()),
        Box::new(departments()),
        Box::new(volunteers()),
        Box::new(core_committee()),
        // initiatives
        Box::new(initiatives()),
        Box::new(stakeholders()),
        Box::new(events()),
        Box::new(milestones()),
        Box::new(tasks()),
        Box::new(risks()),
        Box::new(kpis()),
        Box::new(budgets()),
        Box::new(brainstorming_sessions()),
        Box::new(event_feedback()),
        Box::new(execution_logs()),
        // governance
        Box::new(risk_assessments()),
        Box::new(csr_proposals()),
        Box::new(governance_bodies()),
        Box::new(governance_meetings()),
        // monitoring
        Box::new(kpi_metrics()),
        Box::new(metric_progress()),
        Box::new(financial_tracking()),
        // documentation
        Box::new(logbook()),
        Box::new(impact_stories()),
        Box::new(sdg_mappings()),
        Box::new(csr_reports()),
        Box::new(progress_reports()),
        // sustainability
        Box::new(annual_budgets()),
        Box::new(budget_tracking()),
        // program design
        Box::new(diversity_metrics()),
        // job portal
        Box::new(industries()),
        Box::new(companies()),
        Box::new(job_seekers()),
        Box::new(jobs()),
        Box::new(applications()),
    ]
}

fn users() -> ModelAdmin<user::Entity, user::ActiveModel> {
    ModelAdmin::new("users", "users", "user", "users")
        .columns(vec![
            Col::field("username"),
            Col::field("email"),
            Col::field("first_name"),
            Col::field("last_name"),
            Col::field("is_staff"),
            Col::field("is_active"),
        ])
        .search(&["username", "email", "first_name", "last_name"])
        .filters(&["is_staff", "is_superuser", "is_active"])
        .ordering(&["username"])
        .hidden(&["password_hash"])
        .read_only()
}

fn members() -> ModelAdmin<member::Entity, member::ActiveModel> {
    ModelAdmin::new("members", "users", "member", "members")
        .columns(vec![
            Col::field("user_id"),
            Col::field("member_type"),
            Col::field("status"),
            Col::field("join_date"),
            Col::field("last_active"),
        ])
        .search(&["skills", "certifications", "bio"])
        .filters(&["member_type", "status", "join_date"])
        .ordering(&["-join_date"])
        .fieldsets(vec![
            Fieldset::new("Membership", &["user_id", "member_type", "join_date", "status"]),
            Fieldset::new(
                "Profile",
                &["skills", "certifications", "bio", "profile_picture"],
            ),
            Fieldset::new(
                "Contact",
                &[
                    "phone_number",
                    "emergency_contact",
                    "linkedin_profile",
                    "github_profile",
                ],
            )
            .collapsed(),
        ])
}

fn departments() -> ModelAdmin<department::Entity, department::ActiveModel> {
    ModelAdmin::new("departments", "users", "department", "departments")
        .columns(vec![
            Col::field("name"),
            Col::field("head_id"),
            Col::field("established_on"),
            Col::field("is_active"),
        ])
        .search(&["name", "description"])
        .filters(&["is_active"])
        .ordering(&["name"])
        .inline("volunteers", "department_id")
}

fn volunteers() -> ModelAdmin<student_volunteer::Entity, student_volunteer::ActiveModel> {
    ModelAdmin::new("volunteers", "users", "student volunteer", "student volunteers")
        .columns(vec![
            Col::field("name"),
            Col::field("university"),
            Col::field("current_semester"),
            Col::field("status"),
            Col::field("application_date"),
        ])
        .search(&["name", "email", "university"])
        .filters(&["status", "sex", "university_permission", "department_id"])
        .ordering(&["-application_date"])
        .managed(&["application_date"])
        .fieldsets(vec![
            Fieldset::new(
                "Personal information",
                &["name", "email", "phone_number", "address", "sex"],
            ),
            Fieldset::new(
                "Academic",
                &["university", "current_semester", "department_id"],
            ),
            Fieldset::new(
                "Placement",
                &[
                    "event_id",
                    "initiative_id",
                    "work_duration_months",
                    "university_permission",
                ],
            ),
            Fieldset::new(
                "Documents",
                &["resume", "photograph", "completion_certificate"],
            ),
            Fieldset::new(
                "Review",
                &["status", "approved_by", "approval_date", "rejection_reason"],
            ),
        ])
        .member_action("approve", "Approve selected volunteers", |update, member| {
            update
                .col_expr(
                    student_volunteer::Column::Status,
                    Expr::value(student_volunteer::Status::Approved),
                )
                .col_expr(
                    student_volunteer::Column::ApprovalDate,
                    Expr::value(entity::now()),
                )
                .col_expr(
                    student_volunteer::Column::ApprovedBy,
                    Expr::value(Some(member)),
                )
        })
        .action("reject", "Reject selected volunteers", |update, _| {
            update.col_expr(
                student_volunteer::Column::Status,
                Expr::value(student_volunteer::Status::Rejected),
            )
        })
}

fn core_committee() -> ModelAdmin<core_committee::Entity, core_committee::ActiveModel> {
    ModelAdmin::new("core-committee", "users", "core committee member", "core committee")
        .columns(vec![
            Col::field("member_id"),
            Col::field("role"),
            Col::field("term_start"),
            Col::field("term_end"),
            Col::field("is_active"),
        ])
        .search(&["responsibilities", "achievements"])
        .filters(&["role", "is_active"])
        .ordering(&["-term_start"])
}

fn kpis_achieved<'a>(
    db: &'a DatabaseConnection,
    record: &'a initiative::Model,
    _today: NaiveDate,
) -> BoxFuture<'a, Result<Badge, DbErr>> {
    Box::pin(async move {
        let (done, total) = kpi_counts(db, record).await?;
        Ok(badge::ratio(done, total))
    })
}

fn milestones_completed<'a>(
    db: &'a DatabaseConnection,
    record: &'a initiative::Model,
    _today: NaiveDate,
) -> BoxFuture<'a, Result<Badge, DbErr>> {
    Box::pin(async move {
        let scope = milestone::Entity::find().filter(milestone::Column::InitiativeId.eq(record.id));
        let total = scope.clone().count(db).await?;
        let done = scope
            .filter(milestone::Column::Status.eq(milestone::Status::Completed))
            .count(db)
            .await?;
        Ok(badge::ratio(done, total))
    })
}

fn risk_overview<'a>(
    db: &'a DatabaseConnection,
    record: &'a initiative::Model,
    _today: NaiveDate,
) -> BoxFuture<'a, Result<Badge, DbErr>> {
    Box::pin(async move {
        let (high, total) = risk_counts(db, record).await?;
        Ok(badge::risk_totals(high, total))
    })
}

fn initiative_health<'a>(
    db: &'a DatabaseConnection,
    record: &'a initiative::Model,
    today: NaiveDate,
) -> BoxFuture<'a, Result<Badge, DbErr>> {
    Box::pin(async move {
        let (high_risks, total_risks) = risk_counts(db, record).await?;
        let (achieved_kpis, total_kpis) = kpi_counts(db, record).await?;
        let inputs = HealthInputs {
            high_risks,
            total_risks,
            achieved_kpis,
            total_kpis,
            ..HealthInputs::for_initiative(record, today)
        };
        Ok(badge::health(&inputs))
    })
}

async fn kpi_counts(
    db: &DatabaseConnection,
    record: &initiative::Model,
) -> Result<(u64, u64), DbErr> {
    let scope = kpi::Entity::find().filter(kpi::Column::InitiativeId.eq(record.id));
    let total = scope.clone().count(db).await?;
    let done = scope.filter(kpi::Column::Achieved.eq(true)).count(db).await?;
    Ok((done, total))
}

async fn risk_counts(
    db: &DatabaseConnection,
    record: &initiative::Model,
) -> Result<(u64, u64), DbErr> {
    let scope = risk::Entity::find().filter(risk::Column::InitiativeId.eq(record.id));
    let total = scope.clone().count(db).await?;
    let high = scope
        .filter(risk::Column::RiskLevel.is_in([risk::RiskLevel::High, risk::RiskLevel::Critical]))
        .count(db)
        .await?;
    Ok((high, total))
}

fn initiatives() -> ModelAdmin<initiative::Entity, initiative::ActiveModel> {
    ModelAdmin::new("initiatives", "initiatives", "initiative", "initiatives")
        .columns(vec![
            Col::field("name"),
            Col::field("status"),
            Col::field("sdg_alignment"),
            Col::field("department_id"),
            Col::query("progress", "Progress", kpis_achieved),
            Col::badge("budget", "Budget", badge::initiative_budget),
            Col::badge("timeline", "Timeline", badge::initiative_timeline),
            Col::query("milestones", "Milestones", milestones_completed),
            Col::query("risks", "Risks", risk_overview),
            Col::query("health", "Health", initiative_health),
        ])
        .search(&["name", "description"])
        .filters(&["status", "department_id", "sdg_alignment", "start_date"])
        .ordering(&["-created_at"])
        .page_size(20)
        .fieldsets(vec![
            Fieldset::new(
                "Basic information",
                &["name", "description", "department_id", "created_by"],
            ),
            Fieldset::new(
                "Timeline and budget",
                &["start_date", "end_date", "budget_cents", "actual_spend_cents"],
            ),
            Fieldset::new(
                "Status and alignment",
                &["status", "sdg_alignment"],
            ),
            Fieldset::new(
                "Impact",
                &[
                    "target_beneficiaries",
                    "success_metrics",
                    "challenges_faced",
                    "lessons_learned",
                ],
            ),
            Fieldset::new("Attachments", &["attachments"]).collapsed(),
        ])
        .inline("kpis", "initiative_id")
        .inline("milestones", "initiative_id")
        .inline("risks", "initiative_id")
        .inline("budgets", "initiative_id")
        .action("put_on_hold", "Put selected initiatives on hold", |update, _| {
            update.col_expr(
                initiative::Column::Status,
                Expr::value(initiative::Status::OnHold),
            )
        })
        .action("mark_completed", "Mark selected initiatives completed", |update, _| {
            update.col_expr(
                initiative::Column::Status,
                Expr::value(initiative::Status::Completed),
            )
        })
}

fn stakeholders() -> ModelAdmin<stakeholder::Entity, stakeholder::ActiveModel> {
    ModelAdmin::new("stakeholders", "initiatives", "stakeholder", "stakeholders")
        .columns(vec![
            Col::field("name"),
            Col::field("organization_type"),
            Col::field("contact_person"),
            Col::field("involvement_level"),
            Col::badge("last_contact", "Last contact", badge::last_contact),
        ])
        .search(&["name", "contact_person", "email"])
        .filters(&["organization_type", "involvement_level"])
        .ordering(&["name"])
        .fieldsets(vec![
            Fieldset::new(
                "Organization",
                &["name", "organization_type", "involvement_level"],
            ),
            Fieldset::new(
                "Contact",
                &["contact_person", "email", "phone", "address", "last_contact"],
            ),
            Fieldset::new(
                "Engagement",
                &["resources_provided", "expectations", "contribution_type", "notes"],
            ),
        ])
}

fn events() -> ModelAdmin<event::Entity, event::ActiveModel> {
    ModelAdmin::new("events", "initiatives", "event", "events")
        .columns(vec![
            Col::field("name"),
            Col::field("event_type"),
            Col::field("start_date"),
            Col::field("status"),
            Col::badge("participants", "Participants", badge::event_participants),
            Col::badge("budget", "Budget", badge::event_budget),
        ])
        .search(&["name", "description", "location"])
        .filters(&["event_type", "status", "initiative_id", "start_date"])
        .ordering(&["-start_date"])
        .fieldsets(vec![
            Fieldset::new(
                "Event",
                &["initiative_id", "name", "event_type", "description", "organizer_id"],
            ),
            Fieldset::new(
                "Schedule and venue",
                &["start_date", "end_date", "location", "virtual_meeting_link"],
            ),
            Fieldset::new(
                "Participation",
                &["status", "max_participants", "current_participants"],
            ),
            Fieldset::new(
                "Budget and follow-up",
                &["budget_cents", "actual_spend_cents", "feedback_summary", "materials"],
            )
            .collapsed(),
        ])
        .inline("event-feedback", "event_id")
}

fn milestones() -> ModelAdmin<milestone::Entity, milestone::ActiveModel> {
    ModelAdmin::new("milestones", "initiatives", "milestone", "milestones")
        .columns(vec![
            Col::field("title"),
            Col::field("initiative_id"),
            Col::field("target_date"),
            Col::field("status"),
            Col::badge("progress", "Progress", badge::milestone_progress),
            Col::badge("delay", "Schedule", badge::milestone_delay),
        ])
        .search(&["title", "description"])
        .filters(&["status", "initiative_id", "target_date"])
        .ordering(&["target_date"])
        .inline("tasks", "milestone_id")
}

fn tasks() -> ModelAdmin<task::Entity, task::ActiveModel> {
    ModelAdmin::new("tasks", "initiatives", "task", "tasks")
        .columns(vec![
            Col::field("title"),
            Col::field("initiative_id"),
            Col::field("assigned_to"),
            Col::field("priority"),
            Col::field("status"),
            Col::badge("progress", "Progress", badge::task_progress),
            Col::badge("due", "Due", badge::task_due),
        ])
        .search(&["title", "description"])
        .filters(&["status", "priority", "initiative_id", "milestone_id", "assigned_to"])
        .ordering(&["due_date", "priority"])
}

fn risks() -> ModelAdmin<risk::Entity, risk::ActiveModel> {
    ModelAdmin::new("risks", "initiatives", "risk", "risks")
        .columns(vec![
            Col::field("risk_type"),
            Col::field("initiative_id"),
            Col::badge("level", "Level", badge::risk_level),
            Col::badge("score", "Score", badge::risk_score),
            Col::field("status"),
            Col::field("review_date"),
        ])
        .search(&["description", "mitigation_plan"])
        .filters(&["risk_type", "risk_level", "status", "initiative_id"])
        .ordering(&["-probability", "-impact"])
}

fn kpis() -> ModelAdmin<kpi::Entity, kpi::ActiveModel> {
    ModelAdmin::new("kpis", "initiatives", "KPI", "KPIs")
        .columns(vec![
            Col::field("name"),
            Col::field("initiative_id"),
            Col::field("target_value"),
            Col::field("current_value"),
            Col::badge("achievement", "Achievement", badge::kpi_achievement),
            Col::field("target_date"),
        ])
        .search(&["name", "description"])
        .filters(&["achieved", "measurement_frequency", "initiative_id"])
        .ordering(&["target_date"])
        .managed(&["achieved"])
}

fn budgets() -> ModelAdmin<budget::Entity, budget::ActiveModel> {
    ModelAdmin::new("budgets", "initiatives", "budget item", "budget items")
        .columns(vec![
            Col::field("item_name"),
            Col::field("initiative_id"),
            Col::field("budget_type"),
            Col::field("estimated_cents"),
            Col::field("actual_cents"),
            Col::badge("variance", "Variance", badge::budget_variance),
            Col::badge("approval", "Approval", badge::budget_approval),
        ])
        .search(&["item_name", "description"])
        .filters(&["budget_type", "initiative_id", "date_required"])
        .ordering(&["date_required"])
}

fn brainstorming_sessions()
-> ModelAdmin<brainstorming_session::Entity, brainstorming_session::ActiveModel> {
    ModelAdmin::new(
        "brainstorming-sessions",
        "initiatives",
        "brainstorming session",
        "brainstorming sessions",
    )
    .columns(vec![
        Col::field("initiative_id"),
        Col::field("session_type"),
        Col::field("date"),
        Col::field("facilitator_id"),
        Col::field("participants_count"),
        Col::field("location"),
    ])
    .search(&["agenda", "summary"])
    .filters(&["session_type", "date", "initiative_id"])
    .ordering(&["-date"])
    .fieldsets(vec![
        Fieldset::new(
            "Session Information",
            &["initiative_id", "session_type", "date", "location", "facilitator_id"],
        ),
        Fieldset::new("Participation", &["participants_count", "materials_used"]),
        Fieldset::new("Content", &["agenda", "summary", "key_outcomes", "next_steps"]),
        Fieldset::new(
            "Additional Information",
            &["notes", "attachments", "feedback_summary"],
        )
        .collapsed(),
    ])
}

fn event_feedback() -> ModelAdmin<event_feedback::Entity, event_feedback::ActiveModel> {
    ModelAdmin::new("event-feedback", "initiatives", "feedback", "feedback")
        .columns(vec![
            Col::field("event_id"),
            Col::field("participant_name"),
            Col::badge("rating", "Rating", badge::feedback_rating),
            Col::field("would_recommend"),
            Col::field("submitted_at"),
        ])
        .search(&["participant_name", "feedback_text", "suggestions"])
        .filters(&["rating", "would_recommend", "is_anonymous", "submitted_at", "event_id"])
        .ordering(&["-submitted_at"])
        .managed(&["submitted_at"])
        .fieldsets(vec![
            Fieldset::new("Event Information", &["event_id"]),
            Fieldset::new(
                "Feedback Details",
                &[
                    "rating",
                    "feedback_text",
                    "suggestions",
                    "would_recommend",
                    "areas_of_improvement",
                ],
            ),
            Fieldset::new(
                "Participant Information",
                &["participant_name", "email", "is_anonymous"],
            ),
        ])
}

fn log_participants<'a>(
    db: &'a DatabaseConnection,
    record: &'a execution_log::Model,
    _today: NaiveDate,
) -> BoxFuture<'a, Result<Badge, DbErr>> {
    Box::pin(async move {
        let n = execution_log_participant::Entity::find()
            .filter(execution_log_participant::Column::LogId.eq(record.id))
            .count(db)
            .await?;
        Ok(badge::count(n, "participant"))
    })
}

fn execution_logs() -> ModelAdmin<execution_log::Entity, execution_log::ActiveModel> {
    ModelAdmin::new("execution-logs", "initiatives", "execution log", "execution logs")
        .columns(vec![
            Col::field("initiative_id"),
            Col::field("date"),
            Col::query("participants", "Participants", log_participants),
            Col::badge("photos", "Has Photos", |record, _| badge::yes_no(record.has_photos())),
            Col::field("created_by"),
            Col::field("created_at"),
        ])
        .search(&["activity", "outcomes", "challenges"])
        .filters(&["date", "created_at", "initiative_id"])
        .ordering(&["-date"])
        .fieldsets(vec![
            Fieldset::new("Basic Information", &["initiative_id", "date", "activity", "outcomes"]),
            Fieldset::new("Execution Details", &["challenges", "photos", "notes"]),
            Fieldset::new("System Information", &["created_by"]).collapsed(),
        ])
}

fn risk_assessments() -> ModelAdmin<risk_assessment::Entity, risk_assessment::ActiveModel> {
    ModelAdmin::new("risk-assessments", "governance", "risk assessment", "risk assessments")
        .columns(vec![
            Col::field("risk_type"),
            Col::field("initiative_id"),
            Col::field("status"),
            Col::badge("score", "Score", badge::assessment_score),
            Col::field("next_review_date"),
        ])
        .search(&["description", "mitigation_plan", "lessons_learned"])
        .filters(&["risk_type", "status", "likelihood", "impact", "initiative_id"])
        .ordering(&["-likelihood", "-impact"])
        .fieldsets(vec![
            Fieldset::new(
                "Risk",
                &["initiative_id", "risk_type", "description", "likelihood", "impact"],
            ),
            Fieldset::new(
                "Ownership",
                &["status", "identified_by", "assigned_to", "next_review_date"],
            ),
            Fieldset::new(
                "Response",
                &["mitigation_plan", "contingency_plan", "fallback_strategy"],
            ),
            Fieldset::new(
                "Resolution",
                &["actual_impact", "resolution_date", "lessons_learned", "attachments"],
            )
            .collapsed(),
        ])
}

fn csr_proposals() -> ModelAdmin<csr_proposal::Entity, csr_proposal::ActiveModel> {
    ModelAdmin::new("csr-proposals", "governance", "CSR proposal", "CSR proposals")
        .columns(vec![
            Col::field("title"),
            Col::field("company_name"),
            Col::field("status"),
            Col::field("requested_cents"),
            Col::field("approved_cents"),
            Col::field("submission_deadline"),
        ])
        .search(&["title", "company_name", "executive_summary"])
        .filters(&["status", "initiative_id", "submission_deadline"])
        .ordering(&["submission_deadline"])
}

fn committee_members<'a>(
    db: &'a DatabaseConnection,
    record: &'a governance_body::Model,
    _today: NaiveDate,
) -> BoxFuture<'a, Result<Badge, DbErr>> {
    Box::pin(async move {
        let n = governance_body_member::Entity::find()
            .filter(governance_body_member::Column::BodyId.eq(record.id))
            .count(db)
            .await?;
        Ok(badge::count(n, "member"))
    })
}

fn governance_bodies() -> ModelAdmin<governance_body::Entity, governance_body::ActiveModel> {
    ModelAdmin::new("governance-bodies", "governance", "governance body", "governance bodies")
        .columns(vec![
            Col::field("name"),
            Col::field("committee_type"),
            Col::field("chairperson_id"),
            Col::query("members", "Members", committee_members),
            Col::field("meeting_frequency"),
            Col::badge("status", "Status", badge::committee_status),
        ])
        .search(&["name", "description", "terms_of_reference"])
        .filters(&["committee_type", "is_active", "meeting_frequency"])
        .ordering(&["name"])
        .fieldsets(vec![
            Fieldset::new("Basic Information", &["name", "committee_type", "description"]),
            Fieldset::new("Leadership", &["chairperson_id", "secretary_id"]),
            Fieldset::new(
                "Terms",
                &["formation_date", "tenure_end_date", "meeting_frequency"],
            ),
            Fieldset::new("Requirements", &["quorum_requirement", "terms_of_reference"]),
            Fieldset::new("Status", &["is_active"]),
        ])
        .inline("governance-meetings", "governance_body_id")
        .action("deactivate", "Mark selected bodies inactive", |update, _| {
            update.col_expr(governance_body::Column::IsActive, Expr::value(false))
        })
}

fn meeting_attendance<'a>(
    db: &'a DatabaseConnection,
    record: &'a governance_meeting::Model,
    _today: NaiveDate,
) -> BoxFuture<'a, Result<Badge, DbErr>> {
    Box::pin(async move {
        let present = governance_meeting_attendee::Entity::find()
            .filter(governance_meeting_attendee::Column::MeetingId.eq(record.id))
            .count(db)
            .await?;
        let total = governance_body_member::Entity::find()
            .filter(governance_body_member::Column::BodyId.eq(record.governance_body_id))
            .count(db)
            .await?;
        Ok(Badge::new(format!("{present}/{total} members"), badge::Color::Gray))
    })
}

fn governance_meetings() -> ModelAdmin<governance_meeting::Entity, governance_meeting::ActiveModel>
{
    ModelAdmin::new(
        "governance-meetings",
        "governance",
        "governance meeting",
        "governance meetings",
    )
    .columns(vec![
        Col::field("governance_body_id"),
        Col::field("meeting_date"),
        Col::query("attendance", "Attendance", meeting_attendance),
        Col::field("next_meeting_date"),
    ])
    .search(&["agenda", "minutes", "decisions_made"])
    .filters(&["governance_body_id", "meeting_date"])
    .ordering(&["-meeting_date"])
    .fieldsets(vec![
        Fieldset::new(
            "Meeting Information",
            &["governance_body_id", "meeting_date", "next_meeting_date"],
        ),
        Fieldset::new("Content", &["agenda", "minutes", "decisions_made", "action_items"]),
        Fieldset::new("Documentation", &["attachments"]).collapsed(),
    ])
}

fn kpi_metrics() -> ModelAdmin<kpi_metric::Entity, kpi_metric::ActiveModel> {
    ModelAdmin::new("kpi-metrics", "monitoring", "KPI metric", "KPI metrics")
        .columns(vec![
            Col::field("name"),
            Col::field("initiative_id"),
            Col::field("metric_type"),
            Col::badge("completion", "Completion", badge::kpi_metric_completion),
            Col::field("monitoring_frequency"),
        ])
        .search(&["name", "description"])
        .filters(&["metric_type", "monitoring_frequency", "start_date", "initiative_id"])
        .ordering(&["name"])
        .inline("metric-progress", "metric_id")
}

fn metric_progress() -> ModelAdmin<metric_progress::Entity, metric_progress::ActiveModel> {
    ModelAdmin::new("metric-progress", "monitoring", "metric reading", "metric progress")
        .columns(vec![
            Col::field("metric_id"),
            Col::field("value"),
            Col::field("date_recorded"),
            Col::field("recorded_by"),
        ])
        .search(&["notes"])
        .filters(&["metric_id", "date_recorded"])
        .ordering(&["-date_recorded"])
}

fn financial_tracking() -> ModelAdmin<financial_tracking::Entity, financial_tracking::ActiveModel> {
    ModelAdmin::new(
        "financial-tracking",
        "monitoring",
        "financial record",
        "financial tracking",
    )
    .columns(vec![
        Col::field("initiative_id"),
        Col::field("month"),
        Col::field("category"),
        Col::field("budgeted_cents"),
        Col::field("actual_cents"),
    ])
    .search(&["description", "variance_notes"])
    .filters(&["category", "initiative_id", "month"])
    .ordering(&["-month"])
}

fn logbook() -> ModelAdmin<program_logbook::Entity, program_logbook::ActiveModel> {
    ModelAdmin::new("logbook", "documentation", "logbook entry", "program logbook")
        .columns(vec![
            Col::field("date"),
            Col::field("initiative_id"),
            Col::field("activity_type"),
            Col::field("participants_count"),
            Col::field("milestone_reached"),
        ])
        .search(&["activity_description", "challenges_faced", "next_steps"])
        .filters(&["activity_type", "milestone_reached", "initiative_id"])
        .ordering(&["-date"])
        .managed(&["date"])
}

fn impact_stories() -> ModelAdmin<impact_story::Entity, impact_story::ActiveModel> {
    ModelAdmin::new("impact-stories", "documentation", "impact story", "impact stories")
        .columns(vec![
            Col::field("title"),
            Col::field("initiative_id"),
            Col::field("story_type"),
            Col::field("approval_status"),
            Col::field("is_anonymous"),
        ])
        .search(&["title", "challenge_description", "outcome", "testimonial"])
        .filters(&["story_type", "approval_status", "is_anonymous", "initiative_id"])
        .ordering(&["-created_at"])
}

fn sdg_mappings() -> ModelAdmin<sdg_mapping::Entity, sdg_mapping::ActiveModel> {
    ModelAdmin::new("sdg-mappings", "documentation", "SDG mapping", "SDG mappings")
        .columns(vec![
            Col::field("initiative_id"),
            Col::field("sdg"),
            Col::field("impact_area"),
            Col::field("baseline_value"),
            Col::field("target_value"),
            Col::field("current_value"),
        ])
        .search(&["program_outcome", "impact_area", "metrics"])
        .filters(&["sdg", "collection_frequency", "initiative_id"])
        .ordering(&["sdg"])
}

fn csr_reports() -> ModelAdmin<csr_report::Entity, csr_report::ActiveModel> {
    ModelAdmin::new("csr-reports", "documentation", "CSR report", "CSR reports")
        .columns(vec![
            Col::field("initiative_id"),
            Col::field("report_type"),
            Col::field("period_start"),
            Col::field("period_end"),
            Col::badge("sdg_metrics", "SDG Metrics", badge::sdg_metrics),
            Col::badge("status", "Status", badge::csr_report_status),
        ])
        .search(&["executive_summary", "program_highlights", "beneficiary_impact"])
        .filters(&["report_type", "status", "period_start", "initiative_id"])
        .ordering(&["-period_end", "report_type"])
        .fieldsets(vec![
            Fieldset::new(
                "Report Information",
                &["initiative_id", "report_type", "period_start", "period_end"],
            ),
            Fieldset::new("SDG Metrics", &["sdg5_metrics", "sdg8_metrics"]),
            Fieldset::new(
                "Report Content",
                &[
                    "executive_summary",
                    "program_highlights",
                    "beneficiary_impact",
                    "sdg_alignment_narrative",
                    "challenges_learnings",
                    "future_plans",
                ],
            ),
            Fieldset::new(
                "Financial Information",
                &[
                    "budget_utilized_cents",
                    "cost_per_beneficiary_cents",
                    "dashboard_link",
                ],
            ),
            Fieldset::new(
                "Report Status",
                &["status", "prepared_by", "reviewed_by", "report_file"],
            ),
            Fieldset::new("Feedback", &["stakeholder_feedback"]).collapsed(),
        ])
        .action("publish", "Publish selected reports", |update, _| {
            update.col_expr(
                csr_report::Column::Status,
                Expr::value(csr_report::Status::Published),
            )
        })
}

fn progress_reports() -> ModelAdmin<progress_report::Entity, progress_report::ActiveModel> {
    ModelAdmin::new("progress-reports", "documentation", "progress report", "progress reports")
        .columns(vec![
            Col::field("initiative_id"),
            Col::field("reporting_period"),
            Col::field("period_start"),
            Col::field("period_end"),
            Col::badge("status", "Status", badge::progress_report_status),
            Col::field("prepared_by"),
        ])
        .search(&["executive_summary", "achievements", "challenges", "next_steps"])
        .filters(&["reporting_period", "status", "period_start", "initiative_id"])
        .ordering(&["-period_end", "reporting_period"])
        .fieldsets(vec![
            Fieldset::new(
                "Report Information",
                &["initiative_id", "reporting_period", "period_start", "period_end"],
            ),
            Fieldset::new(
                "Report Content",
                &["executive_summary", "achievements", "challenges", "kpi_updates"],
            ),
            Fieldset::new("Financial & Next Steps", &["financial_summary", "next_steps"]),
            Fieldset::new(
                "Review Process",
                &["prepared_by", "reviewed_by", "review_comments", "status"],
            ),
            Fieldset::new("Documentation", &["report_file"]).collapsed(),
        ])
        .member_action("review", "Mark selected reports reviewed", |update, member| {
            update
                .col_expr(
                    progress_report::Column::Status,
                    Expr::value(progress_report::Status::Reviewed),
                )
                .col_expr(progress_report::Column::ReviewedBy, Expr::value(Some(member)))
        })
}

fn annual_budgets() -> ModelAdmin<annual_budget::Entity, annual_budget::ActiveModel> {
    ModelAdmin::new("annual-budgets", "sustainability", "annual budget", "annual budgets")
        .columns(vec![
            Col::field("fiscal_year"),
            Col::field("total_cents"),
            Col::field("status"),
            Col::field("approved_by"),
        ])
        .search(&["fiscal_year", "notes"])
        .filters(&["status"])
        .ordering(&["-fiscal_year"])
        .fieldsets(vec![
            Fieldset::new("Budget", &["fiscal_year", "total_cents", "status"]),
            Fieldset::new(
                "Allocation",
                &[
                    "staff_salaries_cents",
                    "operational_costs_cents",
                    "program_costs_cents",
                    "marketing_costs_cents",
                    "contingency_fund_cents",
                ],
            ),
            Fieldset::new(
                "Approval",
                &["prepared_by", "approved_by", "detailed_breakdown", "notes"],
            ),
        ])
        .inline("budget-tracking", "annual_budget_id")
}

fn budget_tracking() -> ModelAdmin<budget_tracking::Entity, budget_tracking::ActiveModel> {
    ModelAdmin::new(
        "budget-tracking",
        "sustainability",
        "budget tracking entry",
        "budget tracking",
    )
    .columns(vec![
        Col::field("annual_budget_id"),
        Col::field("month"),
        Col::field("category"),
        Col::field("budgeted_cents"),
        Col::field("actual_cents"),
    ])
    .filters(&["category", "annual_budget_id", "month"])
    .ordering(&["-month"])
}

fn diversity_metrics() -> ModelAdmin<diversity_metric::Entity, diversity_metric::ActiveModel> {
    ModelAdmin::new(
        "diversity-metrics",
        "program_design",
        "diversity metric",
        "diversity metrics",
    )
    .columns(vec![
        Col::field("initiative_id"),
        Col::field("date_recorded"),
        Col::field("total_participants"),
        Col::field("women_participants_count"),
        Col::field("marginalized_participants_count"),
    ])
    .filters(&["initiative_id", "date_recorded"])
    .ordering(&["-date_recorded"])
    .managed(&["date_recorded"])
}

fn industries() -> ModelAdmin<industry::Entity, industry::ActiveModel> {
    ModelAdmin::new("industries", "job_portal", "industry", "industries")
        .columns(vec![Col::field("name"), Col::field("created_at")])
        .search(&["name"])
        .ordering(&["name"])
}

fn companies() -> ModelAdmin<company::Entity, company::ActiveModel> {
    ModelAdmin::new("companies", "job_portal", "company", "companies")
        .columns(vec![
            Col::field("company_name"),
            Col::field("industry_id"),
            Col::field("company_size"),
            Col::field("location"),
            Col::field("is_verified"),
            Col::field("is_featured"),
        ])
        .search(&["company_name", "description", "location"])
        .filters(&["is_verified", "is_featured", "company_size", "industry_id"])
        .ordering(&["company_name"])
        .managed(&["slug"])
        .inline("jobs", "company_id")
        .action("verify", "Mark selected companies as verified", |update, _| {
            update.col_expr(company::Column::IsVerified, Expr::value(true))
        })
        .action("feature", "Feature selected companies", |update, _| {
            update.col_expr(company::Column::IsFeatured, Expr::value(true))
        })
}

fn job_seekers() -> ModelAdmin<job_seeker::Entity, job_seeker::ActiveModel> {
    ModelAdmin::new("job-seekers", "job_portal", "job seeker", "job seekers")
        .columns(vec![
            Col::field("user_id"),
            Col::field("experience_years"),
            Col::field("preferred_locations"),
            Col::field("is_available"),
            Col::field("profile_visibility"),
        ])
        .search(&["education", "preferred_job_types", "preferred_locations"])
        .filters(&["is_available", "profile_visibility"])
        .ordering(&["-created_at"])
        .managed(&["slug"])
}

fn jobs() -> ModelAdmin<job::Entity, job::ActiveModel> {
    ModelAdmin::new("jobs", "job_portal", "job", "jobs")
        .columns(vec![
            Col::field("title"),
            Col::field("company_id"),
            Col::field("job_type"),
            Col::field("experience_level"),
            Col::field("status"),
            Col::field("is_featured"),
            Col::field("applications_count"),
            Col::field("deadline"),
        ])
        .search(&["title", "description", "location"])
        .filters(&[
            "status",
            "job_type",
            "experience_level",
            "is_remote",
            "is_featured",
            "company_id",
            "industry_id",
        ])
        .ordering(&["-posted_date"])
        .managed(&["slug", "posted_date"])
        .inline("applications", "job_id")
        .action("activate", "Activate selected jobs", |update, _| {
            update.col_expr(job::Column::Status, Expr::value(job::Status::Active))
        })
        .action("feature", "Feature selected jobs", |update, _| {
            update.col_expr(job::Column::IsFeatured, Expr::value(true))
        })
        .action("close", "Close selected jobs", |update, _| {
            update.col_expr(job::Column::Status, Expr::value(job::Status::Closed))
        })
}

fn applications() -> ModelAdmin<job_application::Entity, job_application::ActiveModel> {
    ModelAdmin::new("applications", "job_portal", "job application", "job applications")
        .columns(vec![
            Col::field("job_id"),
            Col::field("applicant_id"),
            Col::field("status"),
            Col::field("is_viewed"),
            Col::field("applied_date"),
        ])
        .search(&["cover_letter", "notes"])
        .filters(&["status", "is_viewed", "job_id", "applicant_id"])
        .ordering(&["-applied_date"])
        .managed(&["applied_date"])
        .action("mark_viewed", "Mark selected applications as viewed", |update, _| {
            update
                .col_expr(job_application::Column::IsViewed, Expr::value(true))
                .col_expr(job_application::Column::ViewedDate, Expr::value(entity::now()))
        })
        .action("mark_reviewing", "Move selected applications to reviewing", |update, _| {
            update.col_expr(
                job_application::Column::Status,
                Expr::value(job_application::Status::Reviewing),
            )
        })
        .action("mark_shortlisted", "Shortlist selected applications", |update, _| {
            update.col_expr(
                job_application::Column::Status,
                Expr::value(job_application::Status::Shortlisted),
            )
        })
}
