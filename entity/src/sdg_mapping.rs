use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

/// The two goals the programme reports against.
#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
pub enum FocusSdg {
    #[sea_orm(string_value = "SDG5")]
    #[serde(rename = "SDG5")]
    GenderEquality,
    #[sea_orm(string_value = "SDG8")]
    #[serde(rename = "SDG8")]
    DecentWork,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sdg_mapping")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub initiative_id: Uuid,
    pub sdg: FocusSdg,
    pub program_outcome: String,
    pub impact_area: String,
    pub metrics: Json,
    pub baseline_value: Option<f64>,
    pub target_value: f64,
    pub current_value: f64,
    pub measurement_method: String,
    pub data_source: String,
    pub collection_frequency: Frequency,
    pub responsible_person_id: Uuid,
    pub notes: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn progress_percentage(&self) -> f64 {
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
    #[sea_orm(string_value = "WEEKLY")]
    Weekly,
    #[sea_orm(string_value = "MONTHLY")]
    Monthly,
    #[sea_orm(string_value = "QUARTERLY")]
    Quarterly,
    #[sea_orm(string_value = "ANNUAL")]
    Annual,
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
        if !self.metrics.is_object() {
            errors.add("metrics", "Metrics must be a JSON object");
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn progress_against_target() {
        let now = hooks::now();
        let mut mapping = Model {
            id: Uuid::nil(),
            initiative_id: Uuid::nil(),
            sdg: FocusSdg::GenderEquality,
            program_outcome: String::new(),
            impact_area: String::new(),
            metrics: json!({"women_in_leadership": 12}),
            baseline_value: Some(4.0),
            target_value: 40.0,
            current_value: 10.0,
            measurement_method: String::new(),
            data_source: String::new(),
            collection_frequency: Frequency::Quarterly,
            responsible_person_id: Uuid::nil(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(mapping.progress_percentage(), 25.0);
        mapping.target_value = 0.0;
        assert_eq!(mapping.progress_percentage(), 0.0);
        assert_eq!(serde_json::to_value(mapping.sdg).unwrap(), json!("SDG5"));
    }
}
