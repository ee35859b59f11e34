//! HTTP integration tests for the card server.
//!
//! Starts the axum router on a random port and exercises it with reqwest,
//! both directly and through the submission form.

use odyssey::api::{OdysseyApi, OdysseyPaths};
use odyssey::client::{AddCardResponse, HttpCardClient};
use odyssey::form::{CardForm, SubmitStatus};
use odyssey::model::Card;
use odyssey::server::{self, AppState};
use odyssey::store::fs::JsonFileStore;
use odyssey::store::memory::fixtures::seven_cards;
use odyssey::store::memory::InMemoryStore;
use odyssey::store::CardStore;
use serde_json::{json, Value};
use tempfile::TempDir;

fn ember_wyrm_payload() -> Value {
    json!({
        "name": "Ember Wyrm",
        "rarity": "epic",
        "image": "https://cards.example/ember.webp",
        "lore": "Sleeps in the caldera.",
        "stats": {
            "hp": 500, "attack": 120, "defense": 80, "mana": 60,
            "speed": 40, "intelligence": 30, "total": 830,
            "range": "Flying", "type": "elemental"
        }
    })
}

fn api<S: CardStore>(store: S) -> OdysseyApi<S> {
    OdysseyApi::new(store, OdysseyPaths::new(std::env::temp_dir()))
}

/// Bind to port 0 and return the base URL.
async fn start_server<S: CardStore + Send + 'static>(state: AppState<S>) -> String {
    let app = server::router_with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn stored<S: CardStore>(state: &AppState<S>) -> Vec<Card> {
    state.with_api(|api| api.store().load()).unwrap()
}

#[tokio::test]
async fn ember_wyrm_is_stored_with_next_id() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data/cards.json");
    let mut store = JsonFileStore::new(&path);
    store.save(&seven_cards()).unwrap();

    let base = start_server(AppState::new(api(store))).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/add-card"))
        .json(&ember_wyrm_payload())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: AddCardResponse = resp.json().await.unwrap();
    assert_eq!(body.message, "Card added successfully!");
    assert_eq!(body.card.id, 8);
    assert_eq!(body.card.stats.total, 830);

    let on_disk = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(on_disk.len(), 8);
    assert_eq!(on_disk[7].name, "Ember Wyrm");
    assert_eq!(on_disk[7].stats.kind, "elemental");

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("[\n  {"));
}

#[tokio::test]
async fn client_total_is_replaced_by_the_stat_sum() {
    let state = AppState::new(api(InMemoryStore::new()));
    let base = start_server(state.clone()).await;

    let mut payload = ember_wyrm_payload();
    payload["stats"]["total"] = json!(1);
    payload["id"] = json!(500);
    let body: Value = reqwest::Client::new()
        .post(format!("{base}/add-card"))
        .json(&payload)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["card"]["id"], 1);
    assert_eq!(body["card"]["stats"]["total"], 830);
    assert_eq!(stored(&state)[0].stats.total, 830);
}

#[tokio::test]
async fn responses_allow_any_origin() {
    let base = start_server(AppState::new(api(InMemoryStore::new()))).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/add-card"))
        .header("origin", "http://localhost:5173")
        .json(&ember_wyrm_payload())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");

    let preflight = client
        .request(reqwest::Method::OPTIONS, format!("{base}/add-card"))
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();
    assert_eq!(preflight.status(), 204);
    assert_eq!(preflight.headers()["access-control-allow-origin"], "*");
    assert!(preflight.headers()["access-control-allow-methods"]
        .to_str()
        .unwrap()
        .contains("POST"));
}

#[tokio::test]
async fn write_failure_answers_500_and_keeps_store() {
    let store = InMemoryStore::with_cards(&seven_cards())
        .unwrap()
        .fail_writes(true);
    let state = AppState::new(api(store));
    let base = start_server(state.clone()).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/add-card"))
        .json(&ember_wyrm_payload())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    assert_eq!(resp.text().await.unwrap(), "Error writing file");
    assert_eq!(stored(&state), seven_cards());
}

#[tokio::test]
async fn read_failure_answers_500_without_writing() {
    let store = InMemoryStore::new().fail_reads(true);
    let state = AppState::new(api(store));
    let base = start_server(state.clone()).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/add-card"))
        .json(&ember_wyrm_payload())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    assert_eq!(resp.text().await.unwrap(), "Error reading file");
    let writes = state.with_api(|api| Ok(api.store().writes())).unwrap();
    assert_eq!(writes, 0);
}

#[tokio::test]
async fn corrupt_store_is_rejected_by_default() {
    let state = AppState::new(api(InMemoryStore::with_document("[{\"id\": 1,")));
    let base = start_server(state.clone()).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/add-card"))
        .json(&ember_wyrm_payload())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    let document = state
        .with_api(|api| Ok(api.store().document().map(str::to_string)))
        .unwrap();
    assert_eq!(document.as_deref(), Some("[{\"id\": 1,"));
}

#[tokio::test]
async fn exhausted_ids_fail_cleanly_and_keep_serving() {
    let doc = format!(r#"[{{"id": {}, "name": "Last"}}]"#, u64::MAX);
    let state = AppState::new(api(InMemoryStore::with_document(doc.clone())));
    let base = start_server(state.clone()).await;
    let client = reqwest::Client::new();

    for _ in 0..2 {
        let resp = client
            .post(format!("{base}/add-card"))
            .json(&ember_wyrm_payload())
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 500);
        assert_eq!(resp.text().await.unwrap(), "Error saving card");
    }

    let document = state
        .with_api(|api| Ok(api.store().document().map(str::to_string)))
        .unwrap();
    assert_eq!(document.as_deref(), Some(doc.as_str()));
}

#[tokio::test]
async fn append_leaves_existing_records_as_written() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cards.json");
    let doc = r#"[
  {"id": 1, "name": "Old", "rarity": "Legendary", "stats": {"hp": 7, "total": 7}},
  {"id": 2, "name": "Odd", "rarity": "uncommon", "lore": "", "artist": "M. Vale"}
]"#;
    std::fs::write(&path, doc).unwrap();

    let base = start_server(AppState::new(api(JsonFileStore::new(&path)))).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/add-card"))
        .json(&ember_wyrm_payload())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let before: Vec<Value> = serde_json::from_str(doc).unwrap();
    let after: Vec<Value> = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(&after[..2], &before[..]);
    assert_eq!(after[2]["id"], 3);
    assert_eq!(after[2]["name"], "Ember Wyrm");
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    let base = start_server(AppState::new(api(InMemoryStore::new()))).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/add-card"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn concurrent_appends_are_serialized() {
    let state = AppState::new(api(InMemoryStore::with_cards(&seven_cards()).unwrap()));
    let base = start_server(state.clone()).await;
    let client = reqwest::Client::new();

    let requests = (0..20).map(|i| {
        let client = client.clone();
        let url = format!("{base}/add-card");
        let mut payload = ember_wyrm_payload();
        payload["name"] = json!(format!("Wyrm {i}"));
        tokio::spawn(async move {
            let resp = client.post(url).json(&payload).send().await.unwrap();
            assert_eq!(resp.status(), 200);
            resp.json::<AddCardResponse>().await.unwrap().card.id
        })
    });

    let mut ids = Vec::new();
    for handle in requests.collect::<Vec<_>>() {
        ids.push(handle.await.unwrap());
    }
    ids.sort_unstable();
    assert_eq!(ids, (8..=27).collect::<Vec<u64>>());

    let cards = stored(&state);
    assert_eq!(cards.len(), 27);
    let mut names: Vec<String> = cards[7..].iter().map(|c| c.name.clone()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 20);
}

#[tokio::test]
async fn form_submission_against_live_server() {
    let state = AppState::new(api(InMemoryStore::with_cards(&seven_cards()).unwrap()));
    let base = start_server(state.clone()).await;

    let mut form = CardForm::new();
    form.set("name", "Ember Wyrm").unwrap();
    form.set("rarity", "epic").unwrap();
    form.set("hp", "500").unwrap();
    form.set("attack", "120").unwrap();
    form.set("defense", "80").unwrap();
    form.set("mana", "60").unwrap();
    form.set("speed", "40").unwrap();
    form.set("intelligence", "30").unwrap();

    let status = form.submit(&HttpCardClient::new(&base)).await.clone();
    match status {
        SubmitStatus::Saved(card) => {
            assert_eq!(card.id, 8);
            assert_eq!(card.stats.total, 830);
        }
        other => panic!("expected Saved, got {:?}", other),
    }
    assert_eq!(stored(&state).len(), 8);
}

#[tokio::test]
async fn form_distinguishes_rejected_from_unreachable() {
    let failing = AppState::new(api(InMemoryStore::new().fail_writes(true)));
    let base = start_server(failing).await;

    let mut form = CardForm::new();
    form.set("name", "Bog Imp").unwrap();
    let status = form.submit(&HttpCardClient::new(&base)).await;
    assert_eq!(status.message(), "Error saving card.");

    // Grab a free port, then close it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let status = form.submit(&HttpCardClient::new(dead)).await;
    assert_eq!(status.message(), "Error: Is the card server running?");
}
