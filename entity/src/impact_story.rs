use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::sdg_mapping::FocusSdg;
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "impact_story")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub initiative_id: Uuid,
    pub title: String,
    pub story_type: StoryType,
    pub participant_name: String,
    pub is_anonymous: bool,
    pub sdg_alignment: FocusSdg,
    pub challenge_description: String,
    pub solution_provided: String,
    pub outcome: String,
    pub testimonial: String,
    pub metrics_achieved: Json,
    pub media_attachments: Option<String>,
    pub approval_status: ApprovalStatus,
    pub collected_by: Uuid,
    pub approved_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Name shown publicly; hidden for anonymous participants.
    pub fn display_name(&self) -> &str {
        if self.is_anonymous {
            "Anonymous"
        } else {
            &self.participant_name
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoryType {
    #[sea_orm(string_value = "SUCCESS")]
    Success,
    #[sea_orm(string_value = "TRANSFORMATION")]
    Transformation,
    #[sea_orm(string_value = "TESTIMONIAL")]
    Testimonial,
    #[sea_orm(string_value = "CASE_STUDY")]
    CaseStudy,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    #[sea_orm(string_value = "DRAFT")]
    Draft,
    #[sea_orm(string_value = "REVIEW")]
    Review,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "PUBLISHED")]
    Published,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::initiative::Entity",
        from = "Column::InitiativeId",
        to = "super::initiative::Column::Id",
        on_delete = "Cascade"
    )]
    Initiative,
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::CollectedBy",
        to = "super::member::Column::Id",
        on_delete = "Cascade"
    )]
    Collector,
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::ApprovedBy",
        to = "super::member::Column::Id",
        on_delete = "SetNull"
    )]
    Approver,
}

impl Related<super::initiative::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Initiative.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_not_blank("title", &self.title);
        if !self.metrics_achieved.is_object() {
            errors.add("metrics_achieved", "Metrics must be a JSON object");
        }
        errors.into_result()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        hooks::assign_id(&mut self.id);
        hooks::stamp(&mut self.created_at, &mut self.updated_at, insert);
        hooks::validated::<Self, Model>(&self)?;
        Ok(self)
    }
}
