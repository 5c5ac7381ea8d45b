pub use sea_orm_migration::prelude::*;

mod schema;

mod m20250101_000001_users;
mod m20250101_000002_initiatives;
mod m20250101_000003_governance_monitoring;
mod m20250101_000004_documentation_sustainability;
mod m20250101_000005_job_portal;
mod m20250101_000006_reports_committees;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_users::Migration),
            Box::new(m20250101_000002_initiatives::Migration),
            Box::new(m20250101_000003_governance_monitoring::Migration),
            Box::new(m20250101_000004_documentation_sustainability::Migration),
            Box::new(m20250101_000005_job_portal::Migration),
            Box::new(m20250101_000006_reports_committees::Migration),
        ]
    }
}
