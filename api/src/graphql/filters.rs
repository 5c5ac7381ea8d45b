use async_graphql::{ID, InputObject};
use chrono::{DateTime, NaiveDate, Utc};
use entity::{brainstorming_session, event, initiative, kpi, risk, stakeholder, task};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ColumnTrait, QueryFilter, Select};

use super::context::{icontains, parse_uuid};
use super::types::{
    EventStatus, EventType, InitiativeStatus, InvolvementLevel, MeasurementFrequency,
    OrganizationType, RiskLevel, RiskStatus, RiskType, Sdg, SessionType, TaskPriority,
    TaskStatus,
};

fn stamp(value: DateTime<Utc>) -> DateTimeWithTimeZone {
    value.into()
}

#[derive(InputObject, Clone, Default)]
pub struct InitiativeFilter {
    pub name: Option<String>,
    pub name_icontains: Option<String>,
    pub status: Option<InitiativeStatus>,
    pub sdg_alignment: Option<Sdg>,
    pub department: Option<ID>,
    pub start_date_gte: Option<NaiveDate>,
    pub start_date_lte: Option<NaiveDate>,
    pub end_date_gte: Option<NaiveDate>,
    pub end_date_lte: Option<NaiveDate>,
    pub created_at_gte: Option<DateTime<Utc>>,
    pub created_at_lte: Option<DateTime<Utc>>,
}

impl InitiativeFilter {
    pub(crate) fn apply(
        self,
        mut select: Select<initiative::Entity>,
    ) -> async_graphql::Result<Select<initiative::Entity>> {
        use initiative::Column;
        if let Some(name) = self.name {
            select = select.filter(Column::Name.eq(name));
        }
        if let Some(needle) = self.name_icontains {
            select = select.filter(icontains(Column::Name, &needle));
        }
        if let Some(status) = self.status {
            select = select.filter(Column::Status.eq(initiative::Status::from(status)));
        }
        if let Some(sdg) = self.sdg_alignment {
            select = select.filter(Column::SdgAlignment.eq(initiative::Sdg::from(sdg)));
        }
        if let Some(department) = &self.department {
            select = select.filter(Column::DepartmentId.eq(parse_uuid(department)?));
        }
        if let Some(date) = self.start_date_gte {
            select = select.filter(Column::StartDate.gte(date));
        }
        if let Some(date) = self.start_date_lte {
            select = select.filter(Column::StartDate.lte(date));
        }
        if let Some(date) = self.end_date_gte {
            select = select.filter(Column::EndDate.gte(date));
        }
        if let Some(date) = self.end_date_lte {
            select = select.filter(Column::EndDate.lte(date));
        }
        if let Some(at) = self.created_at_gte {
            select = select.filter(Column::CreatedAt.gte(stamp(at)));
        }
        if let Some(at) = self.created_at_lte {
            select = select.filter(Column::CreatedAt.lte(stamp(at)));
        }
        Ok(select)
    }
}

#[derive(InputObject, Clone, Default)]
pub struct EventFilter {
    pub name: Option<String>,
    pub name_icontains: Option<String>,
    pub status: Option<EventStatus>,
    pub event_type: Option<EventType>,
    pub initiative: Option<ID>,
    pub start_date_gte: Option<DateTime<Utc>>,
    pub start_date_lte: Option<DateTime<Utc>>,
}

impl EventFilter {
    pub(crate) fn apply(
        self,
        mut select: Select<event::Entity>,
    ) -> async_graphql::Result<Select<event::Entity>> {
        use event::Column;
        if let Some(name) = self.name {
            select = select.filter(Column::Name.eq(name));
        }
        if let Some(needle) = self.name_icontains {
            select = select.filter(icontains(Column::Name, &needle));
        }
        if let Some(status) = self.status {
            select = select.filter(Column::Status.eq(event::Status::from(status)));
        }
        if let Some(kind) = self.event_type {
            select = select.filter(Column::EventType.eq(event::EventType::from(kind)));
        }
        if let Some(initiative) = &self.initiative {
            select = select.filter(Column::InitiativeId.eq(parse_uuid(initiative)?));
        }
        if let Some(at) = self.start_date_gte {
            select = select.filter(Column::StartDate.gte(stamp(at)));
        }
        if let Some(at) = self.start_date_lte {
            select = select.filter(Column::StartDate.lte(stamp(at)));
        }
        Ok(select)
    }
}

#[derive(InputObject, Clone, Default)]
pub struct BrainstormingSessionFilter {
    pub session_type: Option<SessionType>,
    pub initiative: Option<ID>,
    pub date_gte: Option<NaiveDate>,
    pub date_lte: Option<NaiveDate>,
}

impl BrainstormingSessionFilter {
    pub(crate) fn apply(
        self,
        mut select: Select<brainstorming_session::Entity>,
    ) -> async_graphql::Result<Select<brainstorming_session::Entity>> {
        use brainstorming_session::Column;
        if let Some(kind) = self.session_type {
            select = select
                .filter(Column::SessionType.eq(brainstorming_session::SessionType::from(kind)));
        }
        if let Some(initiative) = &self.initiative {
            select = select.filter(Column::InitiativeId.eq(parse_uuid(initiative)?));
        }
        if let Some(day) = self.date_gte {
            select = select.filter(Column::Date.gte(day));
        }
        if let Some(day) = self.date_lte {
            select = select.filter(Column::Date.lte(day));
        }
        Ok(select)
    }
}

#[derive(InputObject, Clone, Default)]
pub struct StakeholderFilter {
    pub name: Option<String>,
    pub name_icontains: Option<String>,
    pub organization_type: Option<OrganizationType>,
    pub involvement_level: Option<InvolvementLevel>,
}

impl StakeholderFilter {
    pub(crate) fn apply(
        self,
        mut select: Select<stakeholder::Entity>,
    ) -> async_graphql::Result<Select<stakeholder::Entity>> {
        use stakeholder::Column;
        if let Some(name) = self.name {
            select = select.filter(Column::Name.eq(name));
        }
        if let Some(needle) = self.name_icontains {
            select = select.filter(icontains(Column::Name, &needle));
        }
        if let Some(kind) = self.organization_type {
            select = select
                .filter(Column::OrganizationType.eq(stakeholder::OrganizationType::from(kind)));
        }
        if let Some(level) = self.involvement_level {
            select = select
                .filter(Column::InvolvementLevel.eq(stakeholder::InvolvementLevel::from(level)));
        }
        Ok(select)
    }
}

#[derive(InputObject, Clone, Default)]
pub struct TaskFilter {
    pub title_icontains: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub initiative: Option<ID>,
    pub assigned_to: Option<ID>,
    pub due_date_gte: Option<NaiveDate>,
    pub due_date_lte: Option<NaiveDate>,
}

impl TaskFilter {
    pub(crate) fn apply(
        self,
        mut select: Select<task::Entity>,
    ) -> async_graphql::Result<Select<task::Entity>> {
        use task::Column;
        if let Some(needle) = self.title_icontains {
            select = select.filter(icontains(Column::Title, &needle));
        }
        if let Some(status) = self.status {
            select = select.filter(Column::Status.eq(task::Status::from(status)));
        }
        if let Some(priority) = self.priority {
            select = select.filter(Column::Priority.eq(task::Priority::from(priority)));
        }
        if let Some(initiative) = &self.initiative {
            select = select.filter(Column::InitiativeId.eq(parse_uuid(initiative)?));
        }
        if let Some(member) = &self.assigned_to {
            select = select.filter(Column::AssignedTo.eq(parse_uuid(member)?));
        }
        if let Some(date) = self.due_date_gte {
            select = select.filter(Column::DueDate.gte(date));
        }
        if let Some(date) = self.due_date_lte {
            select = select.filter(Column::DueDate.lte(date));
        }
        Ok(select)
    }
}

#[derive(InputObject, Clone, Default)]
pub struct RiskFilter {
    pub risk_level: Option<RiskLevel>,
    pub risk_type: Option<RiskType>,
    pub status: Option<RiskStatus>,
    pub initiative: Option<ID>,
}

impl RiskFilter {
    pub(crate) fn apply(
        self,
        mut select: Select<risk::Entity>,
    ) -> async_graphql::Result<Select<risk::Entity>> {
        use risk::Column;
        if let Some(level) = self.risk_level {
            select = select.filter(Column::RiskLevel.eq(risk::RiskLevel::from(level)));
        }
        if let Some(kind) = self.risk_type {
            select = select.filter(Column::RiskType.eq(risk::RiskType::from(kind)));
        }
        if let Some(status) = self.status {
            select = select.filter(Column::Status.eq(risk::Status::from(status)));
        }
        if let Some(initiative) = &self.initiative {
            select = select.filter(Column::InitiativeId.eq(parse_uuid(initiative)?));
        }
        Ok(select)
    }
}

#[derive(InputObject, Clone, Default)]
pub struct KpiFilter {
    pub name_icontains: Option<String>,
    pub achieved: Option<bool>,
    pub measurement_frequency: Option<MeasurementFrequency>,
    pub initiative: Option<ID>,
}

impl KpiFilter {
    pub(crate) fn apply(
        self,
        mut select: Select<kpi::Entity>,
    ) -> async_graphql::Result<Select<kpi::Entity>> {
        use kpi::Column;
        if let Some(needle) = self.name_icontains {
            select = select.filter(icontains(Column::Name, &needle));
        }
        if let Some(achieved) = self.achieved {
            select = select.filter(Column::Achieved.eq(achieved));
        }
        if let Some(frequency) = self.measurement_frequency {
            select =
                select.filter(Column::MeasurementFrequency.eq(kpi::Frequency::from(frequency)));
        }
        if let Some(initiative) = &self.initiative {
            select = select.filter(Column::InitiativeId.eq(parse_uuid(initiative)?));
        }
        Ok(select)
    }
}
