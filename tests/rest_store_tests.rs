//! `RestStore` against a minimal in-process JSON store.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use scenario_dashboard::models::{Direction, NewScenario, NewVehicle, RecordId};
use scenario_dashboard::store::{DataStore, RestStore};
use scenario_dashboard::{Config, Dashboard, DashboardError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct StubDb {
    tables: HashMap<String, Vec<Value>>,
    next_id: u64,
}

type Db = Arc<Mutex<StubDb>>;

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

async fn list(
    State(db): State<Db>,
    Path(resource): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Vec<Value>> {
    let db = db.lock().unwrap();
    let rows = db.tables.get(&resource).cloned().unwrap_or_default();
    let rows = rows
        .into_iter()
        .filter(|row| {
            query
                .iter()
                .all(|(key, wanted)| row.get(key).map(text_of).as_deref() == Some(wanted.as_str()))
        })
        .collect();
    Json(rows)
}

async fn create(
    State(db): State<Db>,
    Path(resource): Path<String>,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut db = db.lock().unwrap();
    db.next_id += 1;
    // Numeric ids, like older json-server releases.
    body["id"] = Value::from(db.next_id);
    db.tables.entry(resource).or_default().push(body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn replace(
    State(db): State<Db>,
    Path((resource, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut db = db.lock().unwrap();
    let rows = db.tables.get_mut(&resource).ok_or(StatusCode::NOT_FOUND)?;
    let row = rows
        .iter_mut()
        .find(|row| text_of(&row["id"]) == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *row = body.clone();
    Ok(Json(body))
}

async fn remove(
    State(db): State<Db>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<Json<Value>, StatusCode> {
    let mut db = db.lock().unwrap();
    let rows = db.tables.get_mut(&resource).ok_or(StatusCode::NOT_FOUND)?;
    let index = rows
        .iter()
        .position(|row| text_of(&row["id"]) == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(rows.remove(index)))
}

async fn spawn_stub() -> (RestStore, Db) {
    let db: Db = Arc::default();
    let app = Router::new()
        .route("/{resource}", get(list).post(create))
        .route("/{resource}/{id}", put(replace).delete(remove))
        .with_state(db.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = Config {
        api_url: format!("http://{addr}"),
        ..Config::default()
    };
    (RestStore::new(&config).unwrap(), db)
}

fn vehicle(scenario_id: &RecordId, name: &str) -> NewVehicle {
    NewVehicle {
        scenario_id: scenario_id.clone(),
        name: name.to_string(),
        speed: 5.0,
        position_x: 10.0,
        position_y: 20.0,
        direction: Direction::Upwards,
    }
}

#[tokio::test]
async fn scenario_round_trip_over_http() {
    let (store, _db) = spawn_stub().await;

    let created = store
        .create_scenario(&NewScenario {
            name: "rush".to_string(),
            time: 12,
        })
        .await
        .unwrap();
    assert_eq!(created.id, RecordId::new("1"));

    let mut edited = created.clone();
    edited.name = "rush hour".to_string();
    store.update_scenario(&edited).await.unwrap();

    let scenarios = store.list_scenarios().await.unwrap();
    assert_eq!(scenarios, vec![edited]);

    store.delete_scenario(&created.id).await.unwrap();
    assert!(store.list_scenarios().await.unwrap().is_empty());
}

#[tokio::test]
async fn vehicles_are_filtered_by_scenario_query() {
    let (store, db) = spawn_stub().await;
    let a = RecordId::new("1");
    let b = RecordId::new("2");
    store.create_vehicle(&vehicle(&a, "one")).await.unwrap();
    store.create_vehicle(&vehicle(&b, "two")).await.unwrap();
    store.create_vehicle(&vehicle(&a, "three")).await.unwrap();

    let in_a = store.list_vehicles(Some(&a)).await.unwrap();
    assert_eq!(
        in_a.iter().map(|v| v.name.as_str()).collect::<Vec<_>>(),
        vec!["one", "three"]
    );
    assert_eq!(store.list_vehicles(None).await.unwrap().len(), 3);

    let stored = db.lock().unwrap().tables["vehicles"][0].clone();
    assert_eq!(stored["scenarioId"], "1");
    assert_eq!(stored["positionY"], 20.0);
    assert_eq!(stored["direction"], "upwards");
}

#[tokio::test]
async fn missing_records_surface_the_status() {
    let (store, _db) = spawn_stub().await;
    let err = store
        .delete_vehicle(&RecordId::new("77"))
        .await
        .unwrap_err();
    match err {
        DashboardError::Status { status, context } => {
            assert_eq!(status, 404);
            assert_eq!(context, "Failed to delete vehicle");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn delete_all_uses_resource_paths() {
    let (store, db) = spawn_stub().await;
    let dashboard = Dashboard::new(store);
    let scenario = dashboard
        .store()
        .create_scenario(&NewScenario {
            name: "s".to_string(),
            time: 1,
        })
        .await
        .unwrap();
    for name in ["a", "b"] {
        dashboard
            .store()
            .create_vehicle(&vehicle(&scenario.id, name))
            .await
            .unwrap();
    }

    let summary = dashboard.delete_all().await.unwrap();
    assert_eq!(summary.scenarios, 1);
    assert_eq!(summary.vehicles, 2);

    let db = db.lock().unwrap();
    assert!(db.tables["vehicles"].is_empty());
    assert!(db.tables["scenarios"].is_empty());
}

#[tokio::test]
async fn unreachable_store_is_an_http_error() {
    let config = Config {
        api_url: "http://127.0.0.1:1".to_string(),
        ..Config::default()
    };
    let store = RestStore::new(&config).unwrap();
    assert!(matches!(
        store.list_scenarios().await,
        Err(DashboardError::Http(_))
    ));
}
