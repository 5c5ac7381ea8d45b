use async_graphql::{ComplexObject, Context, Enum, ID, SimpleObject};
use chrono::{DateTime, NaiveDate, Utc};
use entity::{brainstorming_session, event, initiative, kpi, risk, stakeholder, task};
use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder};

use super::context::{database, db_error, to_id};

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(remote = "initiative::Status")]
pub enum InitiativeStatus {
    Planned,
    InProgress,
    Completed,
    OnHold,
    Cancelled,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(name = "SdgGoal", remote = "initiative::Sdg")]
pub enum Sdg {
    #[graphql(name = "SDG_1")]
    NoPoverty,
    #[graphql(name = "SDG_2")]
    ZeroHunger,
    #[graphql(name = "SDG_3")]
    GoodHealth,
    #[graphql(name = "SDG_4")]
    QualityEducation,
    #[graphql(name = "SDG_5")]
    GenderEquality,
    #[graphql(name = "SDG_6")]
    CleanWater,
    #[graphql(name = "SDG_7")]
    CleanEnergy,
    #[graphql(name = "SDG_8")]
    DecentWork,
    #[graphql(name = "SDG_9")]
    Industry,
    #[graphql(name = "SDG_10")]
    ReducedInequalities,
    #[graphql(name = "SDG_11")]
    SustainableCities,
    #[graphql(name = "SDG_12")]
    ResponsibleConsumption,
    #[graphql(name = "SDG_13")]
    ClimateAction,
    #[graphql(name = "SDG_14")]
    LifeBelowWater,
    #[graphql(name = "SDG_15")]
    LifeOnLand,
    #[graphql(name = "SDG_16")]
    PeaceJustice,
    #[graphql(name = "SDG_17")]
    Partnerships,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(remote = "event::EventType")]
pub enum EventType {
    Workshop,
    Seminar,
    Training,
    Community,
    Meeting,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(remote = "brainstorming_session::SessionType")]
pub enum SessionType {
    Internal,
    Community,
    Stakeholder,
    Fgd,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(remote = "event::Status")]
pub enum EventStatus {
    Planned,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(remote = "stakeholder::OrganizationType")]
pub enum OrganizationType {
    Ngo,
    Govt,
    Corp,
    Comm,
    Acad,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(remote = "stakeholder::InvolvementLevel")]
pub enum InvolvementLevel {
    High,
    Medium,
    Low,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(remote = "task::Status")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Completed,
    OnHold,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(remote = "task::Priority")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(remote = "risk::RiskType")]
pub enum RiskType {
    Financial,
    Operational,
    Strategic,
    Compliance,
    Reputation,
    Safety,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(remote = "risk::RiskLevel")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(remote = "risk::Status")]
pub enum RiskStatus {
    Identified,
    Assessed,
    Mitigated,
    Closed,
    Occurred,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
#[graphql(remote = "kpi::Frequency")]
pub enum MeasurementFrequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Initiative", complex)]
pub struct InitiativeNode {
    pub id: ID,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget_cents: i64,
    pub actual_spend_cents: i64,
    pub status: InitiativeStatus,
    pub sdg_alignment: Sdg,
    pub department_id: ID,
    pub created_by: ID,
    pub target_beneficiaries: String,
    pub success_metrics: String,
    pub challenges_faced: Option<String>,
    pub lessons_learned: Option<String>,
    pub attachments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[graphql(skip)]
    pub(crate) record: initiative::Model,
}

impl From<initiative::Model> for InitiativeNode {
    fn from(model: initiative::Model) -> Self {
        Self {
            id: to_id(model.id),
            name: model.name.clone(),
            description: model.description.clone(),
            start_date: model.start_date,
            end_date: model.end_date,
            budget_cents: model.budget_cents,
            actual_spend_cents: model.actual_spend_cents,
            status: model.status.into(),
            sdg_alignment: model.sdg_alignment.into(),
            department_id: to_id(model.department_id),
            created_by: to_id(model.created_by),
            target_beneficiaries: model.target_beneficiaries.clone(),
            success_metrics: model.success_metrics.clone(),
            challenges_faced: model.challenges_faced.clone(),
            lessons_learned: model.lessons_learned.clone(),
            attachments: model.attachments.clone(),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            record: model,
        }
    }
}

#[ComplexObject]
impl InitiativeNode {
    /// Actual spend as a percentage of budget.
    async fn budget_utilization(&self) -> f64 {
        self.record.budget_utilization()
    }

    /// Elapsed share of the planned timeline, 0 to 100.
    async fn timeline_progress(&self) -> f64 {
        self.record.timeline_progress(entity::today())
    }

    async fn stakeholders(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<StakeholderNode>> {
        let db = database(ctx)?;
        let rows = self
            .record
            .find_related(stakeholder::Entity)
            .order_by_asc(stakeholder::Column::Name)
            .all(db.as_ref())
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(StakeholderNode::from).collect())
    }

    async fn events(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<EventNode>> {
        let db = database(ctx)?;
        let rows = event::Entity::find()
            .filter(event::Column::InitiativeId.eq(self.record.id))
            .order_by_desc(event::Column::StartDate)
            .all(db.as_ref())
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(EventNode::from).collect())
    }

    async fn tasks(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<TaskNode>> {
        let db = database(ctx)?;
        let rows = task::Entity::find()
            .filter(task::Column::InitiativeId.eq(self.record.id))
            .order_by_asc(task::Column::DueDate)
            .all(db.as_ref())
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(TaskNode::from).collect())
    }

    async fn risks(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<RiskNode>> {
        let db = database(ctx)?;
        let rows = risk::Entity::find()
            .filter(risk::Column::InitiativeId.eq(self.record.id))
            .order_by_desc(risk::Column::Probability)
            .all(db.as_ref())
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(RiskNode::from).collect())
    }

    async fn brainstorming_sessions(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Vec<BrainstormingSessionNode>> {
        let db = database(ctx)?;
        let rows = brainstorming_session::Entity::find()
            .filter(brainstorming_session::Column::InitiativeId.eq(self.record.id))
            .order_by_desc(brainstorming_session::Column::Date)
            .all(db.as_ref())
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(BrainstormingSessionNode::from).collect())
    }

    async fn kpis(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<KpiNode>> {
        let db = database(ctx)?;
        let rows = kpi::Entity::find()
            .filter(kpi::Column::InitiativeId.eq(self.record.id))
            .order_by_asc(kpi::Column::Name)
            .all(db.as_ref())
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(KpiNode::from).collect())
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Event", complex)]
pub struct EventNode {
    pub id: ID,
    pub initiative_id: ID,
    pub name: String,
    pub event_type: EventType,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub virtual_meeting_link: Option<String>,
    pub organizer_id: ID,
    pub status: EventStatus,
    pub max_participants: i32,
    pub current_participants: i32,
    pub budget_cents: i64,
    pub actual_spend_cents: i64,
    pub feedback_summary: String,
    pub materials: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[graphql(skip)]
    pub(crate) record: event::Model,
}

impl From<event::Model> for EventNode {
    fn from(model: event::Model) -> Self {
        Self {
            id: to_id(model.id),
            initiative_id: to_id(model.initiative_id),
            name: model.name.clone(),
            event_type: model.event_type.into(),
            description: model.description.clone(),
            start_date: model.start_date.into(),
            end_date: model.end_date.into(),
            location: model.location.clone(),
            virtual_meeting_link: model.virtual_meeting_link.clone(),
            organizer_id: to_id(model.organizer_id),
            status: model.status.into(),
            max_participants: model.max_participants,
            current_participants: model.current_participants,
            budget_cents: model.budget_cents,
            actual_spend_cents: model.actual_spend_cents,
            feedback_summary: model.feedback_summary.clone(),
            materials: model.materials.clone(),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            record: model,
        }
    }
}

#[ComplexObject]
impl EventNode {
    async fn is_full(&self) -> bool {
        self.record.is_full()
    }

    async fn registration_open(&self) -> bool {
        self.record.registration_open()
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Stakeholder", complex)]
pub struct StakeholderNode {
    pub id: ID,
    pub name: String,
    pub organization_type: OrganizationType,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub involvement_level: InvolvementLevel,
    pub resources_provided: String,
    pub expectations: String,
    pub contribution_type: String,
    pub notes: String,
    pub last_contact: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[graphql(skip)]
    pub(crate) record: stakeholder::Model,
}

impl From<stakeholder::Model> for StakeholderNode {
    fn from(model: stakeholder::Model) -> Self {
        Self {
            id: to_id(model.id),
            name: model.name.clone(),
            organization_type: model.organization_type.into(),
            contact_person: model.contact_person.clone(),
            email: model.email.clone(),
            phone: model.phone.clone(),
            address: model.address.clone(),
            involvement_level: model.involvement_level.into(),
            resources_provided: model.resources_provided.clone(),
            expectations: model.expectations.clone(),
            contribution_type: model.contribution_type.clone(),
            notes: model.notes.clone(),
            last_contact: model.last_contact,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            record: model,
        }
    }
}

#[ComplexObject]
impl StakeholderNode {
    async fn days_since_contact(&self) -> Option<i64> {
        self.record.days_since_contact(entity::today())
    }

    async fn initiatives(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<InitiativeNode>> {
        let db = database(ctx)?;
        let rows = self
            .record
            .find_related(initiative::Entity)
            .order_by_desc(initiative::Column::CreatedAt)
            .all(db.as_ref())
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(InitiativeNode::from).collect())
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Task", complex)]
pub struct TaskNode {
    pub id: ID,
    pub initiative_id: ID,
    pub milestone_id: Option<ID>,
    pub title: String,
    pub description: String,
    pub assigned_to: Option<ID>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub completion_date: Option<NaiveDate>,
    pub progress: i32,
    pub comments: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[graphql(skip)]
    pub(crate) record: task::Model,
}

impl From<task::Model> for TaskNode {
    fn from(model: task::Model) -> Self {
        Self {
            id: to_id(model.id),
            initiative_id: to_id(model.initiative_id),
            milestone_id: model.milestone_id.map(to_id),
            title: model.title.clone(),
            description: model.description.clone(),
            assigned_to: model.assigned_to.map(to_id),
            priority: model.priority.into(),
            status: model.status.into(),
            start_date: model.start_date,
            due_date: model.due_date,
            completion_date: model.completion_date,
            progress: model.progress,
            comments: model.comments.clone(),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            record: model,
        }
    }
}

#[ComplexObject]
impl TaskNode {
    async fn is_delayed(&self) -> bool {
        self.record.is_delayed(entity::today())
    }

    /// Negative once the due date has passed.
    async fn days_until_due(&self) -> i64 {
        self.record.days_until_due(entity::today())
    }

    /// Whether every task this one depends on is completed.
    async fn can_start(&self, ctx: &Context<'_>) -> async_graphql::Result<bool> {
        let db = database(ctx)?;
        self.record.can_start(db.as_ref()).await.map_err(db_error)
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Risk", complex)]
pub struct RiskNode {
    pub id: ID,
    pub initiative_id: ID,
    pub risk_type: RiskType,
    pub description: String,
    pub risk_level: RiskLevel,
    pub probability: i32,
    pub impact: i32,
    pub mitigation_plan: String,
    pub contingency_plan: String,
    pub owner_id: ID,
    pub status: RiskStatus,
    pub review_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[graphql(skip)]
    pub(crate) record: risk::Model,
}

impl From<risk::Model> for RiskNode {
    fn from(model: risk::Model) -> Self {
        Self {
            id: to_id(model.id),
            initiative_id: to_id(model.initiative_id),
            risk_type: model.risk_type.into(),
            description: model.description.clone(),
            risk_level: model.risk_level.into(),
            probability: model.probability,
            impact: model.impact,
            mitigation_plan: model.mitigation_plan.clone(),
            contingency_plan: model.contingency_plan.clone(),
            owner_id: to_id(model.owner_id),
            status: model.status.into(),
            review_date: model.review_date,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            record: model,
        }
    }
}

#[ComplexObject]
impl RiskNode {
    /// Probability times impact, 1 to 25.
    async fn risk_score(&self) -> i32 {
        self.record.risk_score()
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Kpi", complex)]
pub struct KpiNode {
    pub id: ID,
    pub initiative_id: ID,
    pub name: String,
    pub description: String,
    pub target_value: f64,
    pub current_value: f64,
    pub unit_of_measure: String,
    pub measurement_frequency: MeasurementFrequency,
    pub data_source: String,
    pub responsible_person_id: ID,
    pub baseline_value: Option<f64>,
    pub target_date: NaiveDate,
    pub achieved: bool,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[graphql(skip)]
    pub(crate) record: kpi::Model,
}

impl From<kpi::Model> for KpiNode {
    fn from(model: kpi::Model) -> Self {
        Self {
            id: to_id(model.id),
            initiative_id: to_id(model.initiative_id),
            name: model.name.clone(),
            description: model.description.clone(),
            target_value: model.target_value,
            current_value: model.current_value,
            unit_of_measure: model.unit_of_measure.clone(),
            measurement_frequency: model.measurement_frequency.into(),
            data_source: model.data_source.clone(),
            responsible_person_id: to_id(model.responsible_person_id),
            baseline_value: model.baseline_value,
            target_date: model.target_date,
            achieved: model.achieved,
            notes: model.notes.clone(),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            record: model,
        }
    }
}

#[ComplexObject]
impl KpiNode {
    async fn achievement_percentage(&self) -> f64 {
        self.record.achievement_percentage()
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "BrainstormingSession")]
pub struct BrainstormingSessionNode {
    pub id: ID,
    pub initiative_id: ID,
    pub session_type: SessionType,
    pub date: NaiveDate,
    pub location: String,
    pub facilitator_id: ID,
    pub participants_count: i32,
    pub agenda: String,
    pub summary: String,
    pub key_outcomes: String,
    pub next_steps: String,
    pub notes: String,
    pub materials_used: String,
    pub attachments: Option<String>,
    pub feedback_summary: String,
    pub created_at: DateTime<Utc>,
}

impl From<brainstorming_session::Model> for BrainstormingSessionNode {
    fn from(model: brainstorming_session::Model) -> Self {
        Self {
            id: to_id(model.id),
            initiative_id: to_id(model.initiative_id),
            session_type: model.session_type.into(),
            date: model.date,
            location: model.location,
            facilitator_id: to_id(model.facilitator_id),
            participants_count: model.participants_count,
            agenda: model.agenda,
            summary: model.summary,
            key_outcomes: model.key_outcomes,
            next_steps: model.next_steps,
            notes: model.notes,
            materials_used: model.materials_used,
            attachments: model.attachments,
            feedback_summary: model.feedback_summary,
            created_at: model.created_at.into(),
        }
    }
}
