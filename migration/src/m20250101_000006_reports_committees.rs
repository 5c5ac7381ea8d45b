use entity::{
    brainstorming_session, csr_report, csr_report_story, event_feedback, execution_log,
    execution_log_participant, governance_body, governance_body_member, governance_meeting,
    governance_meeting_attendee, metric_progress, progress_report,
};
use sea_orm_migration::prelude::*;

use crate::schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        schema::create(manager, brainstorming_session::Entity).await?;
        schema::create(manager, event_feedback::Entity).await?;
        schema::create(manager, execution_log::Entity).await?;
        schema::create(manager, execution_log_participant::Entity).await?;

        schema::create(manager, governance_body::Entity).await?;
        schema::create(manager, governance_body_member::Entity).await?;
        schema::create(manager, governance_meeting::Entity).await?;
        schema::create(manager, governance_meeting_attendee::Entity).await?;

        schema::create(manager, metric_progress::Entity).await?;

        schema::create(manager, csr_report::Entity).await?;
        schema::create(manager, csr_report_story::Entity).await?;
        schema::unique_together(
            manager,
            "ux_csr_report_initiative_type_period",
            csr_report::Entity,
            &[
                csr_report::Column::InitiativeId,
                csr_report::Column::ReportType,
                csr_report::Column::PeriodStart,
                csr_report::Column::PeriodEnd,
            ],
        )
        .await?;
        schema::create(manager, progress_report::Entity).await?;
        schema::unique_together(
            manager,
            "ux_progress_report_initiative_period",
            progress_report::Entity,
            &[
                progress_report::Column::InitiativeId,
                progress_report::Column::PeriodStart,
                progress_report::Column::PeriodEnd,
            ],
        )
        .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        schema::drop(manager, progress_report::Entity).await?;
        schema::drop(manager, csr_report_story::Entity).await?;
        schema::drop(manager, csr_report::Entity).await?;
        schema::drop(manager, metric_progress::Entity).await?;
        schema::drop(manager, governance_meeting_attendee::Entity).await?;
        schema::drop(manager, governance_meeting::Entity).await?;
        schema::drop(manager, governance_body_member::Entity).await?;
        schema::drop(manager, governance_body::Entity).await?;
        schema::drop(manager, execution_log_participant::Entity).await?;
        schema::drop(manager, execution_log::Entity).await?;
        schema::drop(manager, event_feedback::Entity).await?;
        schema::drop(manager, brainstorming_session::Entity).await
    }
}
