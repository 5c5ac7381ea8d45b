mod common;

use entity::{initiative, initiative_stakeholder};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::{Value, json};
use uuid::Uuid;

use common::{TestEnv, setup};

const CREATE: &str = r#"
    mutation Create($input: InitiativeInput!) {
        createInitiative(input: $input) {
            success
            errors
            initiative {
                id name status sdgAlignment budgetCents actualSpendCents
                createdBy departmentId budgetUtilization
                stakeholders { id name }
            }
        }
    }
"#;

const UPDATE: &str = r#"
    mutation Update($id: ID!, $input: InitiativeInput!) {
        updateInitiative(id: $id, input: $input) {
            success
            errors
            initiative { id name status lessonsLearned stakeholders { name } }
        }
    }
"#;

const DELETE: &str = r#"
    mutation Delete($id: ID!) {
        deleteInitiative(id: $id) { success errors initiative { id name } }
    }
"#;

fn input(env: &TestEnv, name: &str) -> Value {
    json!({
        "name": name,
        "description": "After-school literacy circles",
        "startDate": "2024-02-01",
        "endDate": "2024-11-30",
        "budgetCents": 400000,
        "actualSpendCents": 100000,
        "sdgAlignment": "SDG_4",
        "departmentId": env.department_id.to_string(),
        "targetBeneficiaries": "Grade 3 readers",
        "successMetrics": "Reading fluency",
    })
}

async fn stakeholder_links(env: &TestEnv, initiative_id: Uuid) -> u64 {
    initiative_stakeholder::Entity::find()
        .filter(initiative_stakeholder::Column::InitiativeId.eq(initiative_id))
        .count(env.db.as_ref())
        .await
        .unwrap()
}

#[tokio::test]
async fn create_copies_input_and_links_stakeholders() {
    let env = setup().await;
    let partner = env.stakeholder("Room to Read").await;
    let mut vars = input(&env, "Reading Circles");
    vars["stakeholderIds"] = json!([partner.id.to_string()]);

    let data = env.data(CREATE, json!({ "input": vars })).await;
    let payload = &data["createInitiative"];
    assert_eq!(payload["success"], true);
    assert!(payload["errors"].is_null());

    let created = &payload["initiative"];
    assert_eq!(created["name"], "Reading Circles");
    assert_eq!(created["status"], "PLANNED");
    assert_eq!(created["sdgAlignment"], "SDG_4");
    assert_eq!(created["createdBy"], env.member_id().to_string());
    assert_eq!(created["budgetUtilization"], 25.0);
    assert_eq!(created["stakeholders"][0]["name"], "Room to Read");

    let id = Uuid::parse_str(created["id"].as_str().unwrap()).unwrap();
    assert_eq!(stakeholder_links(&env, id).await, 1);
}

#[tokio::test]
async fn create_reports_validation_errors() {
    let env = setup().await;
    let mut vars = input(&env, "Backwards");
    vars["endDate"] = json!("2024-01-15");
    vars["actualSpendCents"] = json!(900000);

    let data = env.data(CREATE, json!({ "input": vars })).await;
    let payload = &data["createInitiative"];
    assert_eq!(payload["success"], false);
    assert!(payload["initiative"].is_null());
    let errors: Vec<&str> = payload["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e.as_str().unwrap())
        .collect();
    assert!(errors.contains(&"end_date: End date must be after start date"));
    assert!(errors.contains(&"actual_spend_cents: Actual spend cannot exceed budget"));
    assert_eq!(
        initiative::Entity::find().count(env.db.as_ref()).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn create_requires_a_member_profile_and_a_department() {
    let env = setup().await;
    let outsider = env.plain_user("visitor").await;
    let resp = env
        .exec_as(Some(outsider), CREATE, json!({ "input": input(&env, "Orphan") }))
        .await;
    assert!(resp.errors.is_empty());
    let data = resp.data.into_json().unwrap();
    assert_eq!(
        data["createInitiative"]["errors"],
        json!(["Only members can create initiatives"])
    );

    let mut vars = input(&env, "Nowhere");
    vars["departmentId"] = json!(Uuid::new_v4().to_string());
    let data = env.data(CREATE, json!({ "input": vars })).await;
    assert_eq!(data["createInitiative"]["errors"], json!(["Department not found"]));
}

#[tokio::test]
async fn anonymous_requests_are_rejected() {
    let env = setup().await;
    let resp = env
        .exec_as(None, CREATE, json!({ "input": input(&env, "Anon") }))
        .await;
    assert_eq!(resp.errors.len(), 1);
    let code = resp.errors[0]
        .extensions
        .as_ref()
        .and_then(|ext| ext.get("code"))
        .cloned();
    assert_eq!(
        code,
        Some(async_graphql::Value::String("UNAUTHENTICATED".into()))
    );
}

#[tokio::test]
async fn update_rewrites_fields_and_replaces_stakeholders() {
    let env = setup().await;
    let record = env.initiative("Clean Water", initiative::Status::Planned).await;
    let first = env.stakeholder("Water Aid").await;
    let second = env.stakeholder("District Office").await;

    let mut vars = input(&env, "Clean Water Phase 2");
    vars["status"] = json!("IN_PROGRESS");
    vars["lessonsLearned"] = json!("Involve panchayats early");
    vars["stakeholderIds"] = json!([first.id.to_string()]);
    let data = env
        .data(UPDATE, json!({ "id": record.id.to_string(), "input": vars.clone() }))
        .await;
    let updated = &data["updateInitiative"]["initiative"];
    assert_eq!(updated["name"], "Clean Water Phase 2");
    assert_eq!(updated["status"], "IN_PROGRESS");
    assert_eq!(updated["lessonsLearned"], "Involve panchayats early");

    vars["stakeholderIds"] = json!([second.id.to_string(), Uuid::new_v4().to_string()]);
    let data = env
        .data(UPDATE, json!({ "id": record.id.to_string(), "input": vars }))
        .await;
    assert_eq!(
        data["updateInitiative"]["initiative"]["stakeholders"],
        json!([{ "name": "District Office" }])
    );
    assert_eq!(stakeholder_links(&env, record.id).await, 1);
}

#[tokio::test]
async fn update_of_missing_initiative_fails_softly() {
    let env = setup().await;
    let data = env
        .data(
            UPDATE,
            json!({ "id": Uuid::new_v4().to_string(), "input": input(&env, "Ghost") }),
        )
        .await;
    assert_eq!(data["updateInitiative"]["success"], false);
    assert_eq!(data["updateInitiative"]["errors"], json!(["Initiative not found"]));
}

#[tokio::test]
async fn delete_returns_the_removed_record() {
    let env = setup().await;
    let record = env.initiative("Sunset", initiative::Status::Completed).await;
    env.kpi(record.id, "Households reached", 100.0, 40.0).await;

    let data = env.data(DELETE, json!({ "id": record.id.to_string() })).await;
    let payload = &data["deleteInitiative"];
    assert_eq!(payload["success"], true);
    assert_eq!(payload["initiative"]["name"], "Sunset");
    assert!(
        initiative::Entity::find_by_id(record.id)
            .one(env.db.as_ref())
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(
        entity::kpi::Entity::find().count(env.db.as_ref()).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn delete_of_missing_initiative_reports_not_found() {
    let env = setup().await;
    let data = env
        .data(DELETE, json!({ "id": Uuid::new_v4().to_string() }))
        .await;
    assert_eq!(
        data["deleteInitiative"],
        json!({ "success": false, "errors": ["Initiative not found"], "initiative": null })
    );
}
