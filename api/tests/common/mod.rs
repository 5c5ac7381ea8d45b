#![allow(dead_code)]

use std::sync::Arc;

use api::{AppSchema, Viewer, build_schema};
use api::graphql::GraphqlSchema;
use async_graphql::{Request, Response, Variables};
use chrono::{Duration, NaiveDate};
use entity::{
    brainstorming_session, csr_report, department, event, initiative, kpi, member, risk,
    stakeholder, task, user,
};
use migration::{Migrator, MigratorTrait};
use platform_authn::{JwtConfig, JwtService};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, Database, DatabaseConnection};
use serde_json::{Value, json};
use uuid::Uuid;

pub const PASSWORD: &str = "correct horse battery";

pub struct TestEnv {
    pub db: Arc<DatabaseConnection>,
    pub jwt: Arc<JwtService>,
    pub schema: GraphqlSchema,
    pub viewer: Viewer,
    pub department_id: Uuid,
}

pub async fn setup() -> TestEnv {
    let conn = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&conn, None).await.unwrap();
    let db = Arc::new(conn);
    let jwt = Arc::new(JwtService::new(JwtConfig::new("test-secret", 5, 7)));

    let account = api::auth::create_superuser(db.as_ref(), "admin", "admin@example.org", PASSWORD)
        .await
        .unwrap();
    let viewer = Viewer::load(db.as_ref(), account.id).await.unwrap().unwrap();

    let department = department::ActiveModel {
        name: Set("Programs".into()),
        description: Set("Field programs".into()),
        head_id: Set(viewer.member_id),
        established_on: Set(day(2020, 1, 1)),
        budget_allocation_cents: Set(5_000_000),
        contact_email: Set(Some("programs@example.org".into())),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(db.as_ref())
    .await
    .unwrap();

    let AppSchema(schema) = build_schema(db.clone(), jwt.clone());
    TestEnv {
        db,
        jwt,
        schema,
        viewer,
        department_id: department.id,
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

impl TestEnv {
    pub fn member_id(&self) -> Uuid {
        self.viewer.member_id.unwrap()
    }

    pub async fn exec(&self, query: &str, vars: Value) -> Response {
        self.exec_as(Some(self.viewer.clone()), query, vars).await
    }

    pub async fn exec_as(&self, viewer: Option<Viewer>, query: &str, vars: Value) -> Response {
        let mut request = Request::new(query).variables(Variables::from_json(vars));
        if let Some(viewer) = viewer {
            request = request.data(viewer);
        }
        self.schema.execute(request).await
    }

    /// Run `query` and return its data, failing on any error.
    pub async fn data(&self, query: &str, vars: Value) -> Value {
        let resp = self.exec(query, vars).await;
        assert!(resp.errors.is_empty(), "unexpected errors: {:?}", resp.errors);
        resp.data.into_json().unwrap()
    }

    /// Active user without a member profile.
    pub async fn plain_user(&self, username: &str) -> Viewer {
        let account = user::ActiveModel {
            username: Set(username.into()),
            email: Set(format!("{username}@example.org")),
            password_hash: Set(platform_authn::hash_password(PASSWORD).unwrap()),
            first_name: Set(String::new()),
            last_name: Set(String::new()),
            is_staff: Set(false),
            is_superuser: Set(false),
            is_active: Set(true),
            last_login: Set(None),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .unwrap();
        Viewer::load(self.db.as_ref(), account.id).await.unwrap().unwrap()
    }

    pub async fn second_member(&self, username: &str) -> Uuid {
        let viewer = self.plain_user(username).await;
        member::ActiveModel {
            user_id: Set(viewer.user_id),
            member_type: Set(member::MemberType::Regular),
            join_date: Set(day(2023, 3, 1)),
            status: Set(member::Status::Active),
            skills: Set(String::new()),
            certifications: Set(String::new()),
            bio: Set(String::new()),
            linkedin_profile: Set(None),
            github_profile: Set(None),
            profile_picture: Set(None),
            phone_number: Set(None),
            emergency_contact: Set(None),
            last_active: Set(None),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .unwrap()
        .id
    }

    pub async fn initiative(&self, name: &str, status: initiative::Status) -> initiative::Model {
        self.initiative_by(name, status, self.member_id()).await
    }

    pub async fn initiative_by(
        &self,
        name: &str,
        status: initiative::Status,
        created_by: Uuid,
    ) -> initiative::Model {
        initiative::ActiveModel {
            name: Set(name.into()),
            description: Set(format!("{name} programme")),
            start_date: Set(day(2024, 1, 1)),
            end_date: Set(day(2024, 12, 31)),
            budget_cents: Set(1_000_000),
            actual_spend_cents: Set(250_000),
            status: Set(status),
            sdg_alignment: Set(initiative::Sdg::QualityEducation),
            department_id: Set(self.department_id),
            created_by: Set(created_by),
            target_beneficiaries: Set("Students".into()),
            success_metrics: Set("Enrolment".into()),
            challenges_faced: Set(None),
            lessons_learned: Set(None),
            attachments: Set(None),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .unwrap()
    }

    pub async fn stakeholder(&self, name: &str) -> stakeholder::Model {
        stakeholder::ActiveModel {
            name: Set(name.into()),
            organization_type: Set(stakeholder::OrganizationType::Ngo),
            contact_person: Set("Asha Rao".into()),
            email: Set("partners@example.org".into()),
            phone: Set("+91 555 0100".into()),
            address: Set("Pune".into()),
            involvement_level: Set(stakeholder::InvolvementLevel::High),
            resources_provided: Set(String::new()),
            expectations: Set(String::new()),
            contribution_type: Set("Funding".into()),
            notes: Set(String::new()),
            last_contact: Set(None),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .unwrap()
    }

    pub async fn task(
        &self,
        initiative_id: Uuid,
        title: &str,
        due_in_days: i64,
        priority: task::Priority,
    ) -> task::Model {
        let today = entity::today();
        task::ActiveModel {
            initiative_id: Set(initiative_id),
            milestone_id: Set(None),
            title: Set(title.into()),
            description: Set(String::new()),
            assigned_to: Set(Some(self.member_id())),
            priority: Set(priority),
            status: Set(task::Status::Todo),
            start_date: Set(today - Duration::days(30)),
            due_date: Set(today + Duration::days(due_in_days)),
            completion_date: Set(None),
            progress: Set(0),
            comments: Set(String::new()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .unwrap()
    }

    pub async fn risk(
        &self,
        initiative_id: Uuid,
        level: risk::RiskLevel,
        probability: i32,
        impact: i32,
    ) -> risk::Model {
        risk::ActiveModel {
            initiative_id: Set(initiative_id),
            risk_type: Set(risk::RiskType::Financial),
            description: Set(format!("{level:?} funding gap")),
            risk_level: Set(level),
            probability: Set(probability),
            impact: Set(impact),
            mitigation_plan: Set("Diversify donors".into()),
            contingency_plan: Set(String::new()),
            owner_id: Set(self.member_id()),
            status: Set(risk::Status::Identified),
            review_date: Set(day(2024, 6, 30)),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .unwrap()
    }

    pub async fn kpi(&self, initiative_id: Uuid, name: &str, target: f64, current: f64) -> kpi::Model {
        kpi::ActiveModel {
            initiative_id: Set(initiative_id),
            name: Set(name.into()),
            description: Set(String::new()),
            target_value: Set(target),
            current_value: Set(current),
            unit_of_measure: Set("people".into()),
            measurement_frequency: Set(kpi::Frequency::Monthly),
            data_source: Set("Attendance sheets".into()),
            responsible_person_id: Set(self.member_id()),
            baseline_value: Set(None),
            target_date: Set(day(2024, 12, 1)),
            achieved: Set(false),
            notes: Set(String::new()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .unwrap()
    }

    pub async fn event(&self, initiative_id: Uuid, name: &str, starts_in_days: i64) -> event::Model {
        let start = entity::now() + Duration::days(starts_in_days);
        event::ActiveModel {
            initiative_id: Set(initiative_id),
            name: Set(name.into()),
            event_type: Set(event::EventType::Workshop),
            description: Set(String::new()),
            start_date: Set(start),
            end_date: Set(start + Duration::hours(3)),
            location: Set("Community hall".into()),
            virtual_meeting_link: Set(None),
            organizer_id: Set(self.member_id()),
            status: Set(event::Status::Planned),
            max_participants: Set(2),
            current_participants: Set(0),
            budget_cents: Set(10_000),
            actual_spend_cents: Set(0),
            feedback_summary: Set(String::new()),
            materials: Set(None),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .unwrap()
    }

    pub async fn brainstorming(
        &self,
        initiative_id: Uuid,
        session_type: brainstorming_session::SessionType,
        date: NaiveDate,
    ) -> brainstorming_session::Model {
        brainstorming_session::ActiveModel {
            initiative_id: Set(initiative_id),
            session_type: Set(session_type),
            date: Set(date),
            location: Set("Community hall".into()),
            facilitator_id: Set(self.member_id()),
            participants_count: Set(18),
            agenda: Set("Map water sources".into()),
            summary: Set("Three sites shortlisted".into()),
            key_outcomes: Set("Site survey planned".into()),
            next_steps: Set("Survey in March".into()),
            notes: Set(String::new()),
            materials_used: Set("Chart paper".into()),
            attachments: Set(None),
            feedback_summary: Set(String::new()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .unwrap()
    }

    pub async fn csr_report(&self, initiative_id: Uuid) -> csr_report::Model {
        csr_report::ActiveModel {
            initiative_id: Set(initiative_id),
            report_type: Set(csr_report::ReportType::Quarterly),
            period_start: Set(day(2024, 1, 1)),
            period_end: Set(day(2024, 3, 31)),
            sdg5_metrics: Set(json!({"women_trained": 120})),
            sdg8_metrics: Set(json!({"placements": 45})),
            executive_summary: Set("Quarter one".into()),
            program_highlights: Set(String::new()),
            beneficiary_impact: Set(String::new()),
            sdg_alignment_narrative: Set(String::new()),
            challenges_learnings: Set(String::new()),
            future_plans: Set(String::new()),
            dashboard_link: Set(String::new()),
            budget_utilized_cents: Set(250_000),
            cost_per_beneficiary_cents: Set(2_000),
            status: Set(csr_report::Status::Draft),
            prepared_by: Set(self.member_id()),
            reviewed_by: Set(None),
            report_file: Set(None),
            stakeholder_feedback: Set(String::new()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .unwrap()
    }
}
