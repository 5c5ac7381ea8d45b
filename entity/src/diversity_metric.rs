use chrono::NaiveDate;
use sea_orm::ActiveValue;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "diversity_metric")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub initiative_id: Uuid,
    pub date_recorded: NaiveDate,
    pub women_participants_count: i32,
    pub lgbtqia_participants_count: i32,
    pub marginalized_participants_count: i32,
    pub total_participants: i32,
    pub recorded_by: Option<Uuid>,
    pub notes: String,
    pub created_at: DateTimeWithTimeZone,
}

fn share(count: i32, total: i32) -> f64 {
    if total > 0 {
        f64::from(count) / f64::from(total) * 100.0
    } else {
        0.0
    }
}

impl Model {
    pub fn women_percentage(&self) -> f64 {
        share(self.women_participants_count, self.total_participants)
    }

    pub fn lgbtqia_percentage(&self) -> f64 {
        share(self.lgbtqia_participants_count, self.total_participants)
    }

    pub fn marginalized_percentage(&self) -> f64 {
        share(self.marginalized_participants_count, self.total_participants)
    }
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
        from = "Column::RecordedBy",
        to = "super::member::Column::Id",
        on_delete = "SetNull"
    )]
    Recorder,
}

impl Related<super::initiative::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Initiative.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_non_negative("women_participants_count", self.women_participants_count);
        errors.check_non_negative("lgbtqia_participants_count", self.lgbtqia_participants_count);
        errors.check_non_negative(
            "marginalized_participants_count",
            self.marginalized_participants_count,
        );
        errors.check_non_negative("total_participants", self.total_participants);
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
        hooks::stamp_created(&mut self.created_at, insert);
        if insert && matches!(self.date_recorded, ActiveValue::NotSet) {
            self.date_recorded = ActiveValue::Set(hooks::today());
        }
        hooks::validated::<Self, Model>(&self)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::share;

    #[test]
    fn shares_guard_against_empty_totals() {
        assert_eq!(share(5, 0), 0.0);
        assert_eq!(share(15, 60), 25.0);
    }
}
