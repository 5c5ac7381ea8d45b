use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Impact stories featured in a CSR report.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "csr_report_story")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub report_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub story_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::csr_report::Entity",
        from = "Column::ReportId",
        to = "super::csr_report::Column::Id",
        on_delete = "Cascade"
    )]
    Report,
    #[sea_orm(
        belongs_to = "super::impact_story::Entity",
        from = "Column::StoryId",
        to = "super::impact_story::Column::Id",
        on_delete = "Cascade"
    )]
    Story,
}

impl Related<super::csr_report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Report.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
