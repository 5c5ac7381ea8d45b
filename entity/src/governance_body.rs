use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hooks;
use crate::validation::{Validate, ValidationErrors};

/// A standing committee: oversight, finance, audit or programme.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "governance_body")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub committee_type: CommitteeType,
    pub description: String,
    pub chairperson_id: Uuid,
    pub secretary_id: Uuid,
    pub formation_date: NaiveDate,
    pub tenure_end_date: NaiveDate,
    pub meeting_frequency: MeetingFrequency,
    pub quorum_requirement: String,
    pub terms_of_reference: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn tenure_expired(&self, today: NaiveDate) -> bool {
        self.tenure_end_date < today
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommitteeType {
    #[sea_orm(string_value = "OVERSIGHT")]
    Oversight,
    #[sea_orm(string_value = "FINANCE")]
    Finance,
    #[sea_orm(string_value = "AUDIT")]
    Audit,
    #[sea_orm(string_value = "PROGRAM")]
    Program,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingFrequency {
    #[sea_orm(string_value = "WEEKLY")]
    Weekly,
    #[sea_orm(string_value = "BIWEEKLY")]
    Biweekly,
    #[sea_orm(string_value = "MONTHLY")]
    Monthly,
    #[sea_orm(string_value = "QUARTERLY")]
    Quarterly,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::ChairpersonId",
        to = "super::member::Column::Id",
        on_delete = "Cascade"
    )]
    Chairperson,
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::SecretaryId",
        to = "super::member::Column::Id",
        on_delete = "Cascade"
    )]
    Secretary,
    #[sea_orm(has_many = "super::governance_body_member::Entity")]
    Members,
    #[sea_orm(has_many = "super::governance_meeting::Entity")]
    Meetings,
}

impl Related<super::governance_body_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::governance_meeting::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Meetings.def()
    }
}

impl Validate for Model {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_not_blank("name", &self.name);
        if self.tenure_end_date < self.formation_date {
            errors.add("tenure_end_date", "Tenure must end after the formation date");
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

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn body(formed: NaiveDate, ends: NaiveDate) -> Model {
        let now = hooks::now();
        Model {
            id: Uuid::nil(),
            name: "Finance Committee".into(),
            committee_type: CommitteeType::Finance,
            description: String::new(),
            chairperson_id: Uuid::nil(),
            secretary_id: Uuid::nil(),
            formation_date: formed,
            tenure_end_date: ends,
            meeting_frequency: MeetingFrequency::Monthly,
            quorum_requirement: String::new(),
            terms_of_reference: String::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn tenure_cannot_end_before_formation() {
        let err = body(day(2024, 6, 1), day(2024, 1, 1)).validate().unwrap_err();
        assert!(err.has_field("tenure_end_date"));
    }

    #[test]
    fn tenure_expires_after_its_end_date() {
        let record = body(day(2022, 1, 1), day(2024, 12, 31));
        assert!(!record.tenure_expired(day(2024, 12, 31)));
        assert!(record.tenure_expired(day(2025, 1, 1)));
    }
}
