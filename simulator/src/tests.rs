use super::*;
use axum::{
    body::{to_bytes, Body},
    http::Request,
};
use parlor_execution::mocks::stacked_session;
use parlor_types::casino::{Rank, Stage, Winner, STARTING_CHIPS};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower::ServiceExt;

fn seeded() -> Arc<Simulator> {
    Arc::new(Simulator::new(SessionConfig {
        seed: Some(7),
        ..SessionConfig::default()
    }))
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn post_ok<T: DeserializeOwned>(router: &Router, uri: &str, body: Option<Value>) -> T {
    let (status, bytes) = send(router, "POST", uri, body).await;
    assert_eq!(status, StatusCode::OK, "{}", String::from_utf8_lossy(&bytes));
    serde_json::from_slice(&bytes).unwrap()
}

async fn create(router: &Router) -> Created {
    let (status, bytes) = send(router, "POST", "/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn test_execute_keeps_sessions_apart() {
    let simulator = seeded();
    let (first, _) = simulator.create_session().unwrap();
    let (second, _) = simulator.create_session().unwrap();
    assert_ne!(first, second);
    assert_eq!(simulator.session_count(), 2);

    let response = simulator
        .execute(first, |session| session.place_blackjack_bet(100))
        .unwrap();
    assert_eq!(response.session.balance, STARTING_CHIPS - 100);
    assert_eq!(simulator.view(second).unwrap().balance, STARTING_CHIPS);
}

#[test]
fn test_execute_reports_engine_errors() {
    let simulator = seeded();
    let (id, _) = simulator.create_session().unwrap();

    let err = simulator
        .execute(id, |session| session.place_blackjack_bet(0))
        .unwrap_err();
    assert!(matches!(err, ApiError::Game(GameError::InvalidStake)));

    let missing = Uuid::new_v4();
    assert!(matches!(
        simulator.view(missing),
        Err(ApiError::SessionNotFound(id)) if id == missing
    ));
}

#[test]
fn test_seeded_sessions_differ() {
    let simulator = seeded();
    let (first, _) = simulator.create_session().unwrap();
    let (second, _) = simulator.create_session().unwrap();

    let spin = |id| {
        simulator
            .execute(id, |session| {
                let mut outcomes = Vec::new();
                for _ in 0..8 {
                    session.place_roulette_bet(BetKind::Red, 1)?;
                    outcomes.push(session.spin_wheel()?.outcome);
                }
                Ok(outcomes)
            })
            .unwrap()
            .result
    };
    assert_ne!(spin(first), spin(second));
}

#[tokio::test]
async fn test_create_and_get_session() {
    let router = Api::new(seeded()).router();
    let created = create(&router).await;
    assert_eq!(created.session.balance, STARTING_CHIPS);
    assert_eq!(created.session.chips.len(), 6);

    let (status, bytes) = send(&router, "GET", &format!("/sessions/{}", created.id), None).await;
    assert_eq!(status, StatusCode::OK);
    let view: SessionView = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(view, created.session);
}

#[tokio::test]
async fn test_close_session() {
    let simulator = seeded();
    let router = Api::new(simulator.clone()).router();
    let id = create(&router).await.id;
    assert_eq!(simulator.session_count(), 1);

    let uri = format!("/sessions/{id}");
    let (status, _) = send(&router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(simulator.session_count(), 0);

    let (status, _) = send(&router, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&router, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let router = Api::new(seeded()).router();
    let uri = format!("/sessions/{}/blackjack/deal", Uuid::new_v4());
    let (status, bytes) = send(&router, "POST", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
    assert!(body.error.starts_with("session not found"));
}

#[tokio::test]
async fn test_engine_error_is_unprocessable() {
    let router = Api::new(seeded()).router();
    let id = create(&router).await.id;

    let uri = format!("/sessions/{id}/blackjack/bet");
    let (status, bytes) = send(&router, "POST", &uri, Some(json!({ "amount": 5000 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body.error, GameError::InvalidStake.to_string());

    let uri = format!("/sessions/{id}/blackjack/shoe");
    let (status, _) = send(&router, "POST", &uri, Some(json!({ "decks": 3 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_blackjack_over_http() {
    let simulator = seeded();
    // Player 10+Q, dealer 10+7
    let id = simulator
        .insert(stacked_session(1, &[Rank::Ten, Rank::Ten, Rank::Queen, Rank::Seven]))
        .unwrap();
    let router = Api::new(simulator).router();

    let bet: CommandResponse<()> = post_ok(
        &router,
        &format!("/sessions/{id}/blackjack/bet"),
        Some(json!({ "amount": 50 })),
    )
    .await;
    assert_eq!(bet.session.balance, STARTING_CHIPS - 50);

    let dealt: CommandResponse<()> =
        post_ok(&router, &format!("/sessions/{id}/blackjack/deal"), None).await;
    assert_eq!(dealt.session.blackjack.stage, Stage::InPlay);
    assert_eq!(dealt.session.blackjack.player.value, 20);
    assert_eq!(dealt.session.blackjack.dealer.value, 7);

    let stood: CommandResponse<u64> =
        post_ok(&router, &format!("/sessions/{id}/blackjack/stand"), None).await;
    assert_eq!(stood.result, 100);
    let outcome = stood.session.blackjack.outcome.unwrap();
    assert_eq!(outcome.winner, Winner::Player);
    assert_eq!(stood.session.balance, STARTING_CHIPS + 50);

    let fresh: CommandResponse<()> =
        post_ok(&router, &format!("/sessions/{id}/blackjack/new"), None).await;
    assert_eq!(fresh.session.blackjack.stage, Stage::AwaitingBet);
}

#[tokio::test]
async fn test_roulette_over_http() {
    let router = Api::new(seeded()).router();
    let id = create(&router).await.id;

    let placed: CommandResponse<()> = post_ok(
        &router,
        &format!("/sessions/{id}/roulette/bet"),
        Some(json!({ "kind": { "type": "straight", "target": 17 }, "stake": 10 })),
    )
    .await;
    assert_eq!(placed.session.roulette.pending.len(), 1);

    post_ok::<CommandResponse<()>>(
        &router,
        &format!("/sessions/{id}/roulette/bet"),
        Some(json!({ "kind": { "type": "dozen", "target": "first" }, "stake": 20 })),
    )
    .await;

    let spun: CommandResponse<SpinReport> =
        post_ok(&router, &format!("/sessions/{id}/roulette/spin"), None).await;
    assert_eq!(spun.result.total_stake, 30);
    assert_eq!(spun.session.balance, STARTING_CHIPS - 30 + spun.result.total_payout);
    assert_eq!(spun.session.roulette.history, vec![spun.result.outcome]);

    let repeated: CommandResponse<u64> =
        post_ok(&router, &format!("/sessions/{id}/roulette/repeat"), None).await;
    assert_eq!(repeated.result, 30);

    let cleared: CommandResponse<u64> =
        post_ok(&router, &format!("/sessions/{id}/roulette/clear"), None).await;
    assert_eq!(cleared.result, 30);
    assert!(cleared.session.roulette.pending.is_empty());

    // Spinning with nothing on the table is rejected
    let (status, _) = send(&router, "POST", &format!("/sessions/{id}/roulette/spin"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_reset_and_new_round_over_http() {
    let router = Api::new(seeded()).router();
    let id = create(&router).await.id;

    post_ok::<CommandResponse<()>>(
        &router,
        &format!("/sessions/{id}/roulette/bet"),
        Some(json!({ "kind": { "type": "red" }, "stake": 400 })),
    )
    .await;

    // Pending bets block a bankroll reset
    let (status, _) = send(&router, "POST", &format!("/sessions/{id}/bankroll/reset"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let refunded: CommandResponse<u64> =
        post_ok(&router, &format!("/sessions/{id}/roulette/round"), None).await;
    assert_eq!(refunded.result, 400);
    assert_eq!(refunded.session.balance, STARTING_CHIPS);

    let reset: CommandResponse<()> =
        post_ok(&router, &format!("/sessions/{id}/bankroll/reset"), None).await;
    assert_eq!(reset.session.balance, STARTING_CHIPS);
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let router = Api::new(seeded()).router();
    let id = create(&router).await.id;

    let uri = format!("/sessions/{id}/roulette/bet");
    let (status, _) = send(&router, "POST", &uri, Some(json!({ "kind": "nope" }))).await;
    assert!(status.is_client_error());

    let view = Api::new(seeded()).router();
    let (status, _) = send(&view, "GET", "/sessions/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
