use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

use crate::hooks::{self, current};
use crate::validation::{Validate, ValidationErrors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kpi")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub initiative_id: Uuid,
    pub name: String,
    pub description: String,
    pub target_value: f64,
    pub current_value: f64,
    pub unit_of_measure: String,
    pub measurement_frequency: Frequency,
    pub data_source: String,
    #[sea_orm(indexed)]
    pub responsible_person_id: Uuid,
    pub baseline_value: Option<f64>,
    pub target_date: NaiveDate,
    pub achieved: bool,
    pub notes: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Percentage of target reached; zero when no target is set.
    pub fn achievement_percentage(&self) -> f64 {
        if self.target_value == 0.0 {
            0.0
        } else {
            self.current_value / self.target_value * 100.0
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    #[sea_orm(string_value = "DAILY")]
    Daily,
    #[sea_orm(string_value = "WEEKLY")]
    Weekly,
    #[sea_orm(string_value = "MONTHLY")]
    Monthly,
    #[sea_orm(string_value = "QUARTERLY")]
    Quarterly,
    #[sea_orm(string_value = "YEARLY")]
    Yearly,
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
        from = "Column::ResponsiblePersonId",
        to = "super::member::Column::Id",
        on_delete = "Cascade"
    )]
    ResponsiblePerson,
}

impl Related<super::initiative::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Initiative.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_not_blank("name", &self.name);
        errors.check_non_negative("target_value", self.target_value);
        errors.check_non_negative("current_value", self.current_value);
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
        if let (Some(current_value), Some(target)) =
            (current(&self.current_value), current(&self.target_value))
        {
            let achieved = current_value >= target;
            self.achieved = Set(achieved);
        }
        hooks::validated::<Self, Model>(&self)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kpi(target: f64, current: f64) -> Model {
        let now = hooks::now();
        Model {
            id: Uuid::nil(),
            initiative_id: Uuid::nil(),
            name: "Women trained".into(),
            description: String::new(),
            target_value: target,
            current_value: current,
            unit_of_measure: "people".into(),
            measurement_frequency: Frequency::Monthly,
            data_source: String::new(),
            responsible_person_id: Uuid::nil(),
            baseline_value: None,
            target_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            achieved: false,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn zero_target_reports_zero_percent() {
        assert_eq!(kpi(0.0, 35.0).achievement_percentage(), 0.0);
        assert_eq!(kpi(200.0, 150.0).achievement_percentage(), 75.0);
    }

    #[test]
    fn negative_values_rejected() {
        let err = kpi(-1.0, -2.0).validate().unwrap_err();
        assert!(err.has_field("target_value"));
        assert!(err.has_field("current_value"));
    }
}
