use async_graphql::{Context, ID, Object};
use entity::{brainstorming_session, event, initiative, kpi, risk, stakeholder, task};
use platform_api::pagination::OffsetConnection;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::Instrument;

use super::context::{database, db_error, paginate, parse_uuid, require_viewer};
use super::filters::{
    BrainstormingSessionFilter, EventFilter, InitiativeFilter, KpiFilter, RiskFilter,
    StakeholderFilter, TaskFilter,
};
use super::types::{
    BrainstormingSessionNode, EventNode, InitiativeNode, KpiNode, RiskNode, StakeholderNode,
    TaskNode,
};

#[derive(Default)]
pub struct InitiativeQuery;

#[Object]
impl InitiativeQuery {
    async fn initiative(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<InitiativeNode>> {
        require_viewer(ctx)?;
        let db = database(ctx)?;
        let record = initiative::Entity::find_by_id(parse_uuid(&id)?)
            .one(db.as_ref())
            .await
            .map_err(db_error)?;
        Ok(record.map(InitiativeNode::from))
    }

    async fn event(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<EventNode>> {
        require_viewer(ctx)?;
        let db = database(ctx)?;
        let record = event::Entity::find_by_id(parse_uuid(&id)?)
            .one(db.as_ref())
            .await
            .map_err(db_error)?;
        Ok(record.map(EventNode::from))
    }

    async fn stakeholder(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<StakeholderNode>> {
        require_viewer(ctx)?;
        let db = database(ctx)?;
        let record = stakeholder::Entity::find_by_id(parse_uuid(&id)?)
            .one(db.as_ref())
            .await
            .map_err(db_error)?;
        Ok(record.map(StakeholderNode::from))
    }

    async fn task(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<TaskNode>> {
        require_viewer(ctx)?;
        let db = database(ctx)?;
        let record = task::Entity::find_by_id(parse_uuid(&id)?)
            .one(db.as_ref())
            .await
            .map_err(db_error)?;
        Ok(record.map(TaskNode::from))
    }

    async fn risk(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<RiskNode>> {
        require_viewer(ctx)?;
        let db = database(ctx)?;
        let record = risk::Entity::find_by_id(parse_uuid(&id)?)
            .one(db.as_ref())
            .await
            .map_err(db_error)?;
        Ok(record.map(RiskNode::from))
    }

    async fn kpi(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<KpiNode>> {
        require_viewer(ctx)?;
        let db = database(ctx)?;
        let record = kpi::Entity::find_by_id(parse_uuid(&id)?)
            .one(db.as_ref())
            .await
            .map_err(db_error)?;
        Ok(record.map(KpiNode::from))
    }

    async fn all_initiatives(
        &self,
        ctx: &Context<'_>,
        filter: Option<InitiativeFilter>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> async_graphql::Result<OffsetConnection<InitiativeNode>> {
        require_viewer(ctx)?;
        let db = database(ctx)?;
        let select = filter
            .unwrap_or_default()
            .apply(initiative::Entity::find())?
            .order_by_desc(initiative::Column::CreatedAt);
        paginate(db.as_ref(), select, after, before, first, last, InitiativeNode::from)
            .instrument(tracing::info_span!("initiatives.list"))
            .await
    }

    async fn all_events(
        &self,
        ctx: &Context<'_>,
        filter: Option<EventFilter>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> async_graphql::Result<OffsetConnection<EventNode>> {
        require_viewer(ctx)?;
        let db = database(ctx)?;
        let select = filter
            .unwrap_or_default()
            .apply(event::Entity::find())?
            .order_by_desc(event::Column::StartDate);
        paginate(db.as_ref(), select, after, before, first, last, EventNode::from)
            .instrument(tracing::info_span!("events.list"))
            .await
    }

    async fn brainstorming_session(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<BrainstormingSessionNode>> {
        require_viewer(ctx)?;
        let db = database(ctx)?;
        let record = brainstorming_session::Entity::find_by_id(parse_uuid(&id)?)
            .one(db.as_ref())
            .await
            .map_err(db_error)?;
        Ok(record.map(BrainstormingSessionNode::from))
    }

    async fn all_brainstorming_sessions(
        &self,
        ctx: &Context<'_>,
        filter: Option<BrainstormingSessionFilter>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> async_graphql::Result<OffsetConnection<BrainstormingSessionNode>> {
        require_viewer(ctx)?;
        let db = database(ctx)?;
        let select = filter
            .unwrap_or_default()
            .apply(brainstorming_session::Entity::find())?
            .order_by_desc(brainstorming_session::Column::Date);
        paginate(
            db.as_ref(),
            select,
            after,
            before,
            first,
            last,
            BrainstormingSessionNode::from,
        )
        .instrument(tracing::info_span!("brainstorming_sessions.list"))
        .await
    }

    async fn all_stakeholders(
        &self,
        ctx: &Context<'_>,
        filter: Option<StakeholderFilter>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> async_graphql::Result<OffsetConnection<StakeholderNode>> {
        require_viewer(ctx)?;
        let db = database(ctx)?;
        let select = filter
            .unwrap_or_default()
            .apply(stakeholder::Entity::find())?
            .order_by_asc(stakeholder::Column::Name);
        paginate(db.as_ref(), select, after, before, first, last, StakeholderNode::from)
            .instrument(tracing::info_span!("stakeholders.list"))
            .await
    }

    async fn all_tasks(
        &self,
        ctx: &Context<'_>,
        filter: Option<TaskFilter>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> async_graphql::Result<OffsetConnection<TaskNode>> {
        require_viewer(ctx)?;
        let db = database(ctx)?;
        let select = filter
            .unwrap_or_default()
            .apply(task::Entity::find())?
            .order_by_asc(task::Column::DueDate)
            .order_by_asc(task::Column::Priority);
        paginate(db.as_ref(), select, after, before, first, last, TaskNode::from)
            .instrument(tracing::info_span!("tasks.list"))
            .await
    }

    async fn all_risks(
        &self,
        ctx: &Context<'_>,
        filter: Option<RiskFilter>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> async_graphql::Result<OffsetConnection<RiskNode>> {
        require_viewer(ctx)?;
        let db = database(ctx)?;
        let select = filter
            .unwrap_or_default()
            .apply(risk::Entity::find())?
            .order_by_desc(risk::Column::RiskLevel)
            .order_by_desc(risk::Column::Probability);
        paginate(db.as_ref(), select, after, before, first, last, RiskNode::from)
            .instrument(tracing::info_span!("risks.list"))
            .await
    }

    async fn all_kpis(
        &self,
        ctx: &Context<'_>,
        filter: Option<KpiFilter>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> async_graphql::Result<OffsetConnection<KpiNode>> {
        require_viewer(ctx)?;
        let db = database(ctx)?;
        let select = filter
            .unwrap_or_default()
            .apply(kpi::Entity::find())?
            .order_by_asc(kpi::Column::Name);
        paginate(db.as_ref(), select, after, before, first, last, KpiNode::from)
            .instrument(tracing::info_span!("kpis.list"))
            .await
    }

    /// Initiatives created by the viewer's member profile.
    async fn my_initiatives(
        &self,
        ctx: &Context<'_>,
        filter: Option<InitiativeFilter>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> async_graphql::Result<OffsetConnection<InitiativeNode>> {
        let viewer = require_viewer(ctx)?;
        let db = database(ctx)?;
        let mut select = filter.unwrap_or_default().apply(initiative::Entity::find())?;
        select = match viewer.member_id {
            Some(member) => select.filter(initiative::Column::CreatedBy.eq(member)),
            None => select.filter(Expr::value(false)),
        };
        let select = select.order_by_desc(initiative::Column::CreatedAt);
        paginate(db.as_ref(), select, after, before, first, last, InitiativeNode::from)
            .instrument(tracing::info_span!("initiatives.mine", username = %viewer.username))
            .await
    }

    /// Tasks assigned to the viewer's member profile.
    async fn my_tasks(
        &self,
        ctx: &Context<'_>,
        filter: Option<TaskFilter>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> async_graphql::Result<OffsetConnection<TaskNode>> {
        let viewer = require_viewer(ctx)?;
        let db = database(ctx)?;
        let mut select = filter.unwrap_or_default().apply(task::Entity::find())?;
        select = match viewer.member_id {
            Some(member) => select.filter(task::Column::AssignedTo.eq(member)),
            None => select.filter(Expr::value(false)),
        };
        let select = select
            .order_by_asc(task::Column::DueDate)
            .order_by_asc(task::Column::Priority);
        paginate(db.as_ref(), select, after, before, first, last, TaskNode::from)
            .instrument(tracing::info_span!("tasks.mine", username = %viewer.username))
            .await
    }

    /// Events that have not started yet, soonest first.
    async fn upcoming_events(
        &self,
        ctx: &Context<'_>,
        filter: Option<EventFilter>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> async_graphql::Result<OffsetConnection<EventNode>> {
        require_viewer(ctx)?;
        let db = database(ctx)?;
        let select = filter
            .unwrap_or_default()
            .apply(event::Entity::find())?
            .filter(event::Column::StartDate.gte(entity::now()))
            .order_by_asc(event::Column::StartDate);
        paginate(db.as_ref(), select, after, before, first, last, EventNode::from)
            .instrument(tracing::info_span!("events.upcoming"))
            .await
    }

    /// Risks rated high or critical.
    async fn high_priority_risks(
        &self,
        ctx: &Context<'_>,
        filter: Option<RiskFilter>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> async_graphql::Result<OffsetConnection<RiskNode>> {
        require_viewer(ctx)?;
        let db = database(ctx)?;
        let select = filter
            .unwrap_or_default()
            .apply(risk::Entity::find())?
            .filter(risk::Column::RiskLevel.is_in([risk::RiskLevel::High, risk::RiskLevel::Critical]))
            .order_by_desc(risk::Column::Probability)
            .order_by_desc(risk::Column::Impact);
        paginate(db.as_ref(), select, after, before, first, last, RiskNode::from)
            .instrument(tracing::info_span!("risks.high_priority"))
            .await
    }
}
