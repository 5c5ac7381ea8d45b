mod common;

use entity::{brainstorming_session, initiative, risk, task};
use serde_json::{Value, json};

use common::{day, setup};

fn names(connection: &Value, field: &str) -> Vec<String> {
    connection["edges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|edge| edge["node"][field].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn initiative_connection_pages_with_offset_cursors() {
    let env = setup().await;
    for name in ["Alpha", "Bravo", "Charlie", "Delta", "Echo"] {
        env.initiative(name, initiative::Status::Planned).await;
    }
    let query = r#"
        query Page($after: String) {
            allInitiatives(first: 2, after: $after) {
                totalCount
                pageInfo { hasNextPage hasPreviousPage endCursor }
                edges { cursor node { name } }
            }
        }
    "#;

    let data = env.data(query, json!({})).await;
    let page = &data["allInitiatives"];
    assert_eq!(page["totalCount"], 5);
    assert_eq!(page["pageInfo"]["hasNextPage"], true);
    assert_eq!(page["pageInfo"]["hasPreviousPage"], false);
    assert_eq!(page["edges"].as_array().unwrap().len(), 2);

    let after = page["pageInfo"]["endCursor"].clone();
    let data = env.data(query, json!({ "after": after })).await;
    let page = &data["allInitiatives"];
    assert_eq!(page["edges"].as_array().unwrap().len(), 2);
    assert_eq!(page["pageInfo"]["hasPreviousPage"], true);

    let seen_first = names(&env.data(query, json!({})).await["allInitiatives"], "name");
    let seen_second = names(page, "name");
    assert!(seen_first.iter().all(|name| !seen_second.contains(name)));
}

#[tokio::test]
async fn initiative_filters_combine() {
    let env = setup().await;
    env.initiative("Water for Schools", initiative::Status::InProgress).await;
    env.initiative("Water for Clinics", initiative::Status::Planned).await;
    env.initiative("Library Vans", initiative::Status::InProgress).await;

    let query = r#"
        query Filtered($filter: InitiativeFilter) {
            allInitiatives(filter: $filter) { totalCount edges { node { name } } }
        }
    "#;
    let data = env
        .data(
            query,
            json!({ "filter": { "nameIcontains": "WATER", "status": "IN_PROGRESS" } }),
        )
        .await;
    assert_eq!(names(&data["allInitiatives"], "name"), vec!["Water for Schools"]);

    let data = env
        .data(
            query,
            json!({ "filter": { "department": env.department_id.to_string(), "sdgAlignment": "SDG_4" } }),
        )
        .await;
    assert_eq!(data["allInitiatives"]["totalCount"], 3);

    let data = env
        .data(query, json!({ "filter": { "startDateGte": "2025-01-01" } }))
        .await;
    assert_eq!(data["allInitiatives"]["totalCount"], 0);
}

#[tokio::test]
async fn my_initiatives_only_lists_the_viewers_own() {
    let env = setup().await;
    let colleague = env.second_member("colleague").await;
    env.initiative("Mine", initiative::Status::Planned).await;
    env.initiative_by("Theirs", initiative::Status::Planned, colleague)
        .await;

    let query = "{ myInitiatives { totalCount edges { node { name } } } }";
    let data = env.data(query, json!({})).await;
    assert_eq!(names(&data["myInitiatives"], "name"), vec!["Mine"]);

    let outsider = env.plain_user("outsider").await;
    let resp = env.exec_as(Some(outsider), query, json!({})).await;
    assert!(resp.errors.is_empty());
    assert_eq!(resp.data.into_json().unwrap()["myInitiatives"]["totalCount"], 0);
}

#[tokio::test]
async fn tasks_are_ordered_by_due_date_and_filterable() {
    let env = setup().await;
    let parent = env.initiative("Health Camps", initiative::Status::InProgress).await;
    env.task(parent.id, "Book venue", 9, task::Priority::Low).await;
    env.task(parent.id, "Recruit doctors", 3, task::Priority::High).await;
    env.task(parent.id, "Print flyers", 6, task::Priority::Medium).await;

    let data = env
        .data("{ myTasks { edges { node { title } } } }", json!({}))
        .await;
    assert_eq!(
        names(&data["myTasks"], "title"),
        vec!["Recruit doctors", "Print flyers", "Book venue"]
    );

    let query = r#"
        query Tasks($filter: TaskFilter) {
            allTasks(filter: $filter) { edges { node { title priority } } }
        }
    "#;
    let data = env
        .data(query, json!({ "filter": { "priority": "HIGH", "initiative": parent.id.to_string() } }))
        .await;
    assert_eq!(names(&data["allTasks"], "title"), vec!["Recruit doctors"]);
}

#[tokio::test]
async fn upcoming_events_skip_past_ones() {
    let env = setup().await;
    let parent = env.initiative("Youth Forum", initiative::Status::InProgress).await;
    env.event(parent.id, "Kickoff", -3).await;
    env.event(parent.id, "Debate night", 2).await;
    env.event(parent.id, "Finals", 10).await;

    let data = env
        .data(
            "{ upcomingEvents { totalCount edges { node { name isFull registrationOpen } } } }",
            json!({}),
        )
        .await;
    assert_eq!(
        names(&data["upcomingEvents"], "name"),
        vec!["Debate night", "Finals"]
    );
    let first = &data["upcomingEvents"]["edges"][0]["node"];
    assert_eq!(first["isFull"], false);
    assert_eq!(first["registrationOpen"], false);
}

#[tokio::test]
async fn high_priority_risks_carry_their_score() {
    let env = setup().await;
    let parent = env.initiative("Flood Relief", initiative::Status::InProgress).await;
    env.risk(parent.id, risk::RiskLevel::Low, 2, 2).await;
    env.risk(parent.id, risk::RiskLevel::High, 3, 4).await;
    env.risk(parent.id, risk::RiskLevel::Critical, 5, 5).await;

    let data = env
        .data(
            "{ highPriorityRisks { totalCount edges { node { riskLevel probability riskScore } } } }",
            json!({}),
        )
        .await;
    let page = &data["highPriorityRisks"];
    assert_eq!(page["totalCount"], 2);
    assert_eq!(page["edges"][0]["node"]["riskScore"], 25);
    assert_eq!(page["edges"][1]["node"]["riskLevel"], "HIGH");
    assert_eq!(page["edges"][1]["node"]["riskScore"], 12);
}

#[tokio::test]
async fn kpis_expose_achievement() {
    let env = setup().await;
    let parent = env.initiative("Skilling", initiative::Status::InProgress).await;
    let reached = env.kpi(parent.id, "Women trained", 200.0, 250.0).await;
    let open = env.kpi(parent.id, "Placements", 100.0, 40.0).await;
    let unset = env.kpi(parent.id, "Baseline survey", 0.0, 0.0).await;
    assert!(reached.achieved);
    assert!(!open.achieved);

    let query = r#"
        query Kpi($id: ID!) { kpi(id: $id) { achieved achievementPercentage } }
    "#;
    let data = env.data(query, json!({ "id": reached.id.to_string() })).await;
    assert_eq!(data["kpi"]["achievementPercentage"], 125.0);
    let data = env.data(query, json!({ "id": open.id.to_string() })).await;
    assert_eq!(data["kpi"]["achieved"], false);
    assert_eq!(data["kpi"]["achievementPercentage"], 40.0);
    let data = env.data(query, json!({ "id": unset.id.to_string() })).await;
    assert_eq!(data["kpi"]["achievementPercentage"], 0.0);

    let data = env
        .data(
            "{ allKpis(filter: { achieved: false }) { edges { node { name } } } }",
            json!({}),
        )
        .await;
    assert_eq!(names(&data["allKpis"], "name"), vec!["Placements"]);

    let data = env
        .data("{ allKpis { edges { node { name } } } }", json!({}))
        .await;
    assert_eq!(
        names(&data["allKpis"], "name"),
        vec!["Baseline survey", "Placements", "Women trained"]
    );
    let data = env
        .data(
            "query Kpis($id: ID!) { initiative(id: $id) { kpis { name } } }",
            json!({ "id": parent.id.to_string() }),
        )
        .await;
    assert_eq!(data["initiative"]["kpis"][0]["name"], "Baseline survey");
    assert_eq!(data["initiative"]["kpis"][2]["name"], "Women trained");
}

#[tokio::test]
async fn initiative_lists_related_records() {
    let env = setup().await;
    let parent = env.initiative("Mangroves", initiative::Status::InProgress).await;
    env.kpi(parent.id, "Saplings planted", 1000.0, 300.0).await;
    env.risk(parent.id, risk::RiskLevel::Medium, 2, 3).await;

    let query = r#"
        query One($id: ID!) {
            initiative(id: $id) { name kpis { name } risks { riskScore } tasks { id } }
        }
    "#;
    let data = env.data(query, json!({ "id": parent.id.to_string() })).await;
    let node = &data["initiative"];
    assert_eq!(node["kpis"], json!([{ "name": "Saplings planted" }]));
    assert_eq!(node["risks"], json!([{ "riskScore": 6 }]));
    assert_eq!(node["tasks"], json!([]));

    let data = env
        .data(query, json!({ "id": uuid::Uuid::new_v4().to_string() }))
        .await;
    assert!(data["initiative"].is_null());
}

#[tokio::test]
async fn brainstorming_sessions_filter_by_type_and_date() {
    let env = setup().await;
    let parent = env.initiative("Clean Water", initiative::Status::InProgress).await;
    let other = env.initiative("School Meals", initiative::Status::Planned).await;
    env.brainstorming(parent.id, brainstorming_session::SessionType::Community, day(2024, 2, 10))
        .await;
    env.brainstorming(parent.id, brainstorming_session::SessionType::Fgd, day(2024, 3, 5))
        .await;
    env.brainstorming(other.id, brainstorming_session::SessionType::Fgd, day(2024, 4, 20))
        .await;

    let data = env
        .data(
            r#"{ allBrainstormingSessions(filter: { sessionType: FGD }) {
                    totalCount edges { node { date sessionType } } } }"#,
            json!({}),
        )
        .await;
    let page = &data["allBrainstormingSessions"];
    assert_eq!(page["totalCount"], 2);
    assert_eq!(names(page, "date"), vec!["2024-04-20", "2024-03-05"]);

    let data = env
        .data(
            r#"query Sessions($initiative: ID!) {
                allBrainstormingSessions(filter: {
                    initiative: $initiative, dateGte: "2024-03-01", dateLte: "2024-12-31"
                }) { totalCount }
                initiative(id: $initiative) { brainstormingSessions { sessionType participantsCount } }
            }"#,
            json!({ "initiative": parent.id.to_string() }),
        )
        .await;
    assert_eq!(data["allBrainstormingSessions"]["totalCount"], 1);
    let sessions = &data["initiative"]["brainstormingSessions"];
    assert_eq!(sessions[0]["sessionType"], "FGD");
    assert_eq!(sessions[1]["sessionType"], "COMMUNITY");
    assert_eq!(sessions[1]["participantsCount"], 18);
}
