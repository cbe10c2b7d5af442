//! Single binary web server: JSON REST API over the bracket engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//!
//! Identity arrives in X-User-Id / X-User-Role headers, injected by the
//! fronting auth layer; this binary trusts them as-is.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpRequest, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use esports_bracket_web::{
    launch, submit_score, FormatType, MatchId, PlayerId, Requester, Tournament, TournamentError,
    TournamentId, UserRole,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory store: tournaments by id. A write guard over the map entry
/// serializes every mutation of one tournament, which is what makes launch
/// and match decisions race-free.
type AppState = Data<RwLock<HashMap<TournamentId, Tournament>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    format: FormatType,
    number_participants: u32,
    #[serde(default)]
    number_players_per_team: Option<u32>,
    start_date: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RegisterTeamBody {
    name: String,
    #[serde(default)]
    players: Vec<PlayerId>,
}

#[derive(Deserialize)]
struct SubmitScoreBody {
    score_team1: i64,
    score_team2: i64,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id.
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

#[derive(serde::Serialize)]
struct ScoreResponse<'a> {
    updated_matches: &'a [MatchId],
    tournament: &'a Tournament,
}

/// Identity from the auth headers. None when X-User-Id is absent or invalid.
fn requester_from(req: &HttpRequest) -> Option<Requester> {
    let id = req
        .headers()
        .get("x-user-id")?
        .to_str()
        .ok()?
        .parse()
        .ok()?;
    let role = match req
        .headers()
        .get("x-user-role")
        .and_then(|v| v.to_str().ok())
    {
        Some("admin") => UserRole::Admin,
        Some("banned") => UserRole::Banned,
        _ => UserRole::User,
    };
    Some(Requester { id, role })
}

fn missing_identity() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Missing user identity" }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Map engine rejections to status codes; bodies stay structured so the UI
/// can show the reason.
fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::Unauthorized => HttpResponse::Forbidden().json(body),
        TournamentError::MatchNotFound(_) => HttpResponse::NotFound().json(body),
        TournamentError::InvariantViolation(_) => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "esports-bracket-web",
    })
}

/// Create a tournament; the requesting user becomes its creator.
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    req: HttpRequest,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    let Some(requester) = requester_from(&req) else {
        return missing_identity();
    };
    if !(2..=128).contains(&body.number_participants) {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "number_participants must be between 2 and 128" }));
    }
    if let Some(n) = body.number_players_per_team {
        if !(1..=10).contains(&n) {
            return HttpResponse::BadRequest().json(
                serde_json::json!({ "error": "number_players_per_team must be between 1 and 10" }),
            );
        }
    }
    let tournament = Tournament::new(
        body.name.trim(),
        body.format,
        body.number_participants,
        body.number_players_per_team,
        body.start_date,
        requester.id,
    );
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.insert(id, tournament);
    HttpResponse::Ok().json(g.get(&id))
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get(&path.id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => not_found(),
    }
}

/// Delete a tournament (creator or admin). Teams and matches go with it.
#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(
    state: AppState,
    req: HttpRequest,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let Some(requester) = requester_from(&req) else {
        return missing_identity();
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let Some(t) = g.get(&path.id) else {
        return not_found();
    };
    if !requester.may_manage(t) {
        return error_response(&TournamentError::Unauthorized);
    }
    g.remove(&path.id);
    HttpResponse::NoContent().finish()
}

/// Register a team with its roster (registration phase only).
#[post("/api/tournaments/{id}/teams")]
async fn api_register_team(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RegisterTeamBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let Some(t) = g.get_mut(&path.id) else {
        return not_found();
    };
    match t.add_team(body.name.trim(), body.players.clone()) {
        Ok(_) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Launch: generate the bracket and open scoring (creator or admin, once).
#[post("/api/tournaments/{id}/launch")]
async fn api_launch_tournament(
    state: AppState,
    req: HttpRequest,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let Some(requester) = requester_from(&req) else {
        return missing_identity();
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let Some(t) = g.get_mut(&path.id) else {
        return not_found();
    };
    match launch(t, &requester, Utc::now(), &mut rand::thread_rng()) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Submit a score for one match; a clinching score advances the winner.
#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_submit_score(
    state: AppState,
    req: HttpRequest,
    path: Path<TournamentMatchPath>,
    body: Json<SubmitScoreBody>,
) -> HttpResponse {
    let Some(requester) = requester_from(&req) else {
        return missing_identity();
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let Some(t) = g.get_mut(&path.id) else {
        return not_found();
    };
    match submit_score(t, path.match_id, body.score_team1, body.score_team2, &requester) {
        Ok(updated) => HttpResponse::Ok().json(ScoreResponse {
            updated_matches: &updated,
            tournament: t,
        }),
        Err(e) => error_response(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, Tournament>::new()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_delete_tournament)
            .service(api_register_team)
            .service(api_launch_tournament)
            .service(api_submit_score)
    })
    .bind(bind)?
    .run()
    .await
}
