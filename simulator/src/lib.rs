use axum::{
    extract::{Path, State as AxumState},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use parlor_execution::{Session, SessionConfig};
use parlor_types::{casino::BetKind, casino::GameError, SessionView, SpinReport};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, RwLock,
    },
};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use uuid::Uuid;

pub mod config;
pub use config::{Config, ConfigError, ValidatedConfig};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("session state unavailable")]
    Poisoned,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Game(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Poisoned => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Result of a command together with the session state it left behind.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse<T> {
    pub result: T,
    pub session: SessionView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
    pub id: Uuid,
    pub session: SessionView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShoeRequest {
    pub decks: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BetRequest {
    pub amount: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouletteBetRequest {
    pub kind: BetKind,
    pub stake: u64,
}

/// Hosts independent sessions, each behind its own lock.
pub struct Simulator {
    config: SessionConfig,
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>,
    created: AtomicU64,
}

impl Simulator {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
            created: AtomicU64::new(0),
        }
    }

    /// Open a session with the configured table settings.
    ///
    /// With a fixed seed, the n-th session is seeded with `seed + n` so
    /// runs are reproducible without every session dealing the same cards.
    pub fn create_session(&self) -> Result<(Uuid, SessionView), ApiError> {
        let index = self.created.fetch_add(1, Ordering::Relaxed);
        let config = SessionConfig {
            seed: self.config.seed.map(|seed| seed.wrapping_add(index)),
            ..self.config
        };
        let session = Session::new(config)?;
        let view = session.view();
        let id = self.insert(session)?;
        Ok((id, view))
    }

    /// Register an already built session.
    pub fn insert(&self, session: Session) -> Result<Uuid, ApiError> {
        let id = Uuid::new_v4();
        let mut sessions = match self.sessions.write() {
            Ok(sessions) => sessions,
            Err(e) => {
                tracing::error!("Failed to acquire write lock in insert: {}", e);
                return Err(ApiError::Poisoned);
            }
        };
        sessions.insert(id, Arc::new(Mutex::new(session)));
        info!(%id, "session created");
        Ok(id)
    }

    fn get(&self, id: Uuid) -> Result<Arc<Mutex<Session>>, ApiError> {
        let sessions = match self.sessions.read() {
            Ok(sessions) => sessions,
            Err(e) => {
                tracing::error!("Failed to acquire read lock in get: {}", e);
                return Err(ApiError::Poisoned);
            }
        };
        sessions
            .get(&id)
            .cloned()
            .ok_or(ApiError::SessionNotFound(id))
    }

    pub fn view(&self, id: Uuid) -> Result<SessionView, ApiError> {
        let session = self.get(id)?;
        let session = session.lock().map_err(|_| ApiError::Poisoned)?;
        Ok(session.view())
    }

    /// Run one command against a session.
    ///
    /// The session stays locked for the whole command, so only one mutation
    /// of a bankroll is in flight at a time.
    pub fn execute<T, F>(&self, id: Uuid, command: F) -> Result<CommandResponse<T>, ApiError>
    where
        F: FnOnce(&mut Session) -> Result<T, GameError>,
    {
        let session = self.get(id)?;
        let mut session = session.lock().map_err(|_| ApiError::Poisoned)?;
        match command(&mut *session) {
            Ok(result) => Ok(CommandResponse {
                result,
                session: session.view(),
            }),
            Err(err) => {
                warn!(%id, %err, "command rejected");
                Err(err.into())
            }
        }
    }

    /// Drop a session. Chips still at stake go with it.
    pub fn remove(&self, id: Uuid) -> Result<(), ApiError> {
        let mut sessions = match self.sessions.write() {
            Ok(sessions) => sessions,
            Err(e) => {
                tracing::error!("Failed to acquire write lock in remove: {}", e);
                return Err(ApiError::Poisoned);
            }
        };
        sessions
            .remove(&id)
            .map(|_| info!(%id, "session closed"))
            .ok_or(ApiError::SessionNotFound(id))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or_default()
    }
}

pub struct Api {
    simulator: Arc<Simulator>,
}

impl Api {
    pub fn new(simulator: Arc<Simulator>) -> Self {
        Self { simulator }
    }

    pub fn router(&self) -> Router {
        // Configure CORS
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);

        Router::new()
            .route("/sessions", post(create_session))
            .route("/sessions/:id", get(get_session).delete(close_session))
            .route("/sessions/:id/bankroll/reset", post(reset_bankroll))
            .route("/sessions/:id/blackjack/shoe", post(configure_shoe))
            .route("/sessions/:id/blackjack/bet", post(blackjack_bet))
            .route("/sessions/:id/blackjack/deal", post(deal))
            .route("/sessions/:id/blackjack/hit", post(hit))
            .route("/sessions/:id/blackjack/double", post(double))
            .route("/sessions/:id/blackjack/stand", post(stand))
            .route("/sessions/:id/blackjack/new", post(new_blackjack_round))
            .route("/sessions/:id/roulette/round", post(new_roulette_round))
            .route("/sessions/:id/roulette/bet", post(roulette_bet))
            .route("/sessions/:id/roulette/clear", post(clear_roulette_bets))
            .route("/sessions/:id/roulette/repeat", post(repeat_roulette_bets))
            .route("/sessions/:id/roulette/spin", post(spin))
            .layer(cors)
            .with_state(self.simulator.clone())
    }
}

type Shared = AxumState<Arc<Simulator>>;
type Reply<T> = Result<Json<CommandResponse<T>>, ApiError>;

async fn create_session(AxumState(simulator): Shared) -> Result<impl IntoResponse, ApiError> {
    let (id, session) = simulator.create_session()?;
    Ok((StatusCode::CREATED, Json(Created { id, session })))
}

async fn get_session(
    AxumState(simulator): Shared,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    simulator.view(id).map(Json)
}

async fn close_session(
    AxumState(simulator): Shared,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    simulator.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reset_bankroll(AxumState(simulator): Shared, Path(id): Path<Uuid>) -> Reply<()> {
    simulator.execute(id, Session::reset_bankroll).map(Json)
}

async fn configure_shoe(
    AxumState(simulator): Shared,
    Path(id): Path<Uuid>,
    Json(request): Json<ShoeRequest>,
) -> Reply<()> {
    simulator
        .execute(id, |session| session.configure_shoe(request.decks))
        .map(Json)
}

async fn blackjack_bet(
    AxumState(simulator): Shared,
    Path(id): Path<Uuid>,
    Json(request): Json<BetRequest>,
) -> Reply<()> {
    simulator
        .execute(id, |session| session.place_blackjack_bet(request.amount))
        .map(Json)
}

async fn deal(AxumState(simulator): Shared, Path(id): Path<Uuid>) -> Reply<()> {
    simulator.execute(id, Session::deal_blackjack).map(Json)
}

/// `result` is whether the player may act again.
async fn hit(AxumState(simulator): Shared, Path(id): Path<Uuid>) -> Reply<bool> {
    simulator.execute(id, Session::hit).map(Json)
}

async fn double(AxumState(simulator): Shared, Path(id): Path<Uuid>) -> Reply<u64> {
    simulator.execute(id, Session::double).map(Json)
}

async fn stand(AxumState(simulator): Shared, Path(id): Path<Uuid>) -> Reply<u64> {
    simulator
        .execute(id, Session::stand_and_resolve_dealer)
        .map(Json)
}

async fn new_blackjack_round(AxumState(simulator): Shared, Path(id): Path<Uuid>) -> Reply<()> {
    simulator.execute(id, Session::new_blackjack_round).map(Json)
}

/// `result` is the amount refunded.
async fn new_roulette_round(AxumState(simulator): Shared, Path(id): Path<Uuid>) -> Reply<u64> {
    simulator
        .execute(id, |session| Ok(session.new_roulette_round()))
        .map(Json)
}

async fn roulette_bet(
    AxumState(simulator): Shared,
    Path(id): Path<Uuid>,
    Json(request): Json<RouletteBetRequest>,
) -> Reply<()> {
    simulator
        .execute(id, |session| {
            session.place_roulette_bet(request.kind, request.stake)
        })
        .map(Json)
}

async fn clear_roulette_bets(AxumState(simulator): Shared, Path(id): Path<Uuid>) -> Reply<u64> {
    simulator
        .execute(id, |session| Ok(session.clear_roulette_bets()))
        .map(Json)
}

async fn repeat_roulette_bets(AxumState(simulator): Shared, Path(id): Path<Uuid>) -> Reply<u64> {
    simulator.execute(id, Session::repeat_roulette_bets).map(Json)
}

async fn spin(AxumState(simulator): Shared, Path(id): Path<Uuid>) -> Reply<SpinReport> {
    simulator.execute(id, Session::spin_wheel).map(Json)
}

#[cfg(test)]
mod tests;
