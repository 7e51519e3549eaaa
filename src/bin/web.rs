//! Single binary web server exposing the tournament engine as a REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Set SHUFFLE_SEED to make the group-stage draw reproducible.

use actix_web::{
    get, post, put,
    web::{Bytes, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use club_tournament::{
    club_leaderboard, confirm_winner, create_finals_from_semis, create_group_stage,
    create_knockout_matches, create_next_knockout_round, create_semifinals_from_groups,
    create_swiss_next_round, finalize_match, group_standings, podium, tournament_stage,
    InMemoryStore, MatchFilter, MatchId, MatchScore, MatchStore, PlayerId, PlayerOrder,
    ScoreBoard, ScoringEvent, ServerConfig, Side, TournamentError,
};
use rand::rngs::StdRng;
use serde::Deserialize;
use tokio::sync::RwLock;

/// Everything the API mutates: stored matches/players, live scores, draw RNG.
struct ClubState {
    store: InMemoryStore,
    scoreboard: ScoreBoard,
    rng: StdRng,
}

type AppState = Data<RwLock<ClubState>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct RosterRow {
    name: String,
}

#[derive(Deserialize)]
struct PlayersQuery {
    #[serde(default)]
    order: PlayerOrder,
}

#[derive(Deserialize)]
struct SetMatchWinnerBody {
    winner_id: PlayerId,
    #[serde(default)]
    score: Option<MatchScore>,
}

#[derive(Deserialize)]
struct ConfirmBody {
    side: Side,
}

/// Optional roster; all registered players when omitted.
#[derive(Deserialize, Default)]
struct RosterBody {
    #[serde(default)]
    player_ids: Option<Vec<PlayerId>>,
}

#[derive(Deserialize)]
struct SwissBody {
    round: u32,
    #[serde(default)]
    player_ids: Option<Vec<PlayerId>>,
}

#[derive(Deserialize)]
struct KnockoutBody {
    round: u32,
    player_ids: Vec<PlayerId>,
}

#[derive(Deserialize)]
struct NextKnockoutBody {
    round: u32,
    #[serde(default)]
    bye_advanced: Vec<PlayerId>,
}

/// Path segment: match id (e.g. /api/matches/{id}/winner)
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    if e.is_not_found() {
        HttpResponse::NotFound().json(body)
    } else {
        HttpResponse::BadRequest().json(body)
    }
}

fn roster_or_all(store: &InMemoryStore, ids: Option<Vec<PlayerId>>) -> Vec<PlayerId> {
    ids.unwrap_or_else(|| {
        store
            .list_players(PlayerOrder::Created)
            .into_iter()
            .map(|p| p.id)
            .collect()
    })
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "club-tournament",
    })
}

#[get("/api/players")]
async fn api_list_players(state: AppState, query: Query<PlayersQuery>) -> HttpResponse {
    let g = state.read().await;
    HttpResponse::Ok().json(g.store.list_players(query.order))
}

/// Register a player. Names are unique (case-insensitive).
#[post("/api/players")]
async fn api_add_player(state: AppState, body: Json<AddPlayerBody>) -> HttpResponse {
    let mut g = state.write().await;
    match g.store.add_player(&body.name) {
        Ok(player) => HttpResponse::Ok().json(player),
        Err(e) => error_response(&e),
    }
}

/// Import a roster from CSV with a `name` header. Names already registered are skipped.
#[post("/api/players/import")]
async fn api_import_players(state: AppState, body: Bytes) -> HttpResponse {
    let mut reader = csv::Reader::from_reader(body.as_ref());
    let rows: Result<Vec<RosterRow>, csv::Error> = reader.deserialize().collect();
    let rows = match rows {
        Ok(rows) => rows,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": format!("Invalid CSV: {}", e) }))
        }
    };

    let mut g = state.write().await;
    let mut added = Vec::new();
    for row in rows {
        match g.store.add_player(&row.name) {
            Ok(player) => added.push(player),
            Err(TournamentError::DuplicatePlayer) => {
                log::warn!("Import: skipping existing player {:?}", row.name)
            }
            Err(e) => return error_response(&e),
        }
    }
    log::info!("Imported {} player(s)", added.len());
    HttpResponse::Ok().json(added)
}

/// List matches, filtered by round, group and decided status.
#[get("/api/matches")]
async fn api_list_matches(state: AppState, filter: Query<MatchFilter>) -> HttpResponse {
    let g = state.read().await;
    HttpResponse::Ok().json(g.store.find_matches(&filter))
}

/// Record a winner directly (no live scoring).
#[put("/api/matches/{id}/winner")]
async fn api_set_match_winner(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<SetMatchWinnerBody>,
) -> HttpResponse {
    let mut g = state.write().await;
    let g = &mut *g;
    match finalize_match(&mut g.store, path.id, body.winner_id, body.score) {
        Ok(m) => {
            g.scoreboard.reset(m.id);
            HttpResponse::Ok().json(m)
        }
        Err(e) => error_response(&e),
    }
}

/// Live score of a match and which side (if any) may be confirmed.
#[get("/api/matches/{id}/score")]
async fn api_get_score(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let g = state.read().await;
    if let Err(e) = g.store.get_match(path.id) {
        return error_response(&e);
    }
    let score = g.scoreboard.state(path.id);
    HttpResponse::Ok().json(serde_json::json!({
        "state": score,
        "tiebreak_active": score.in_tiebreak(),
        "confirmable": score.confirmable_winner(),
    }))
}

/// Apply a checkbox toggle to the live score of an undecided match.
#[post("/api/matches/{id}/score")]
async fn api_apply_score(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<ScoringEvent>,
) -> HttpResponse {
    let mut g = state.write().await;
    match g.store.get_match(path.id) {
        Ok(m) if m.is_decided() => {
            return error_response(&TournamentError::MatchAlreadyDecided(m.id))
        }
        Ok(_) => {}
        Err(e) => return error_response(&e),
    }
    match g.scoreboard.apply(path.id, body.into_inner()) {
        Ok(score) => HttpResponse::Ok().json(serde_json::json!({
            "state": score,
            "tiebreak_active": score.in_tiebreak(),
            "confirmable": score.confirmable_winner(),
        })),
        Err(e) => error_response(&e),
    }
}

/// Confirm the winner from the live score and finalize the match.
#[post("/api/matches/{id}/score/confirm")]
async fn api_confirm_winner(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<ConfirmBody>,
) -> HttpResponse {
    let mut g = state.write().await;
    let g = &mut *g;
    match confirm_winner(&mut g.store, &mut g.scoreboard, path.id, body.side) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => error_response(&e),
    }
}

/// Draw two groups of 4 and create their round-robin matches.
#[post("/api/stages/group")]
async fn api_create_group_stage(state: AppState, body: Option<Json<RosterBody>>) -> HttpResponse {
    let mut g = state.write().await;
    let g = &mut *g;
    let ids = body.map(|b| b.into_inner()).unwrap_or_default().player_ids;
    let roster = roster_or_all(&g.store, ids);
    match create_group_stage(&mut g.store, &roster, &mut g.rng) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(&e),
    }
}

/// Pair the next Swiss round without repeats.
#[post("/api/stages/swiss")]
async fn api_create_swiss_round(state: AppState, body: Json<SwissBody>) -> HttpResponse {
    let mut g = state.write().await;
    let body = body.into_inner();
    let roster = roster_or_all(&g.store, body.player_ids);
    match create_swiss_next_round(&mut g.store, &roster, body.round) {
        Ok(round) => HttpResponse::Ok().json(round),
        Err(e) => error_response(&e),
    }
}

/// Create a knockout round from an explicit entrant list.
#[post("/api/stages/knockout")]
async fn api_create_knockout(state: AppState, body: Json<KnockoutBody>) -> HttpResponse {
    let mut g = state.write().await;
    match create_knockout_matches(&mut g.store, &body.player_ids, body.round) {
        Ok(round) => HttpResponse::Ok().json(round),
        Err(e) => error_response(&e),
    }
}

/// Create the next knockout round from the previous round's winners.
#[post("/api/stages/knockout/next")]
async fn api_next_knockout(state: AppState, body: Json<NextKnockoutBody>) -> HttpResponse {
    let mut g = state.write().await;
    match create_next_knockout_round(&mut g.store, body.round, &body.bye_advanced) {
        Ok(round) => HttpResponse::Ok().json(round),
        Err(e) => error_response(&e),
    }
}

/// Group stage -> semifinals (all group matches must be decided).
#[post("/api/stages/semifinals")]
async fn api_create_semifinals(state: AppState) -> HttpResponse {
    let mut g = state.write().await;
    match create_semifinals_from_groups(&mut g.store) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(&e),
    }
}

/// Semifinals -> final and 3rd-place playoff.
#[post("/api/stages/finals")]
async fn api_create_finals(state: AppState) -> HttpResponse {
    let mut g = state.write().await;
    match create_finals_from_semis(&mut g.store) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(&e),
    }
}

/// Current tournament stage, with the podium once done.
#[get("/api/stage")]
async fn api_stage(state: AppState) -> HttpResponse {
    let g = state.read().await;
    let matches = g.store.find_matches(&MatchFilter::default());
    HttpResponse::Ok().json(serde_json::json!({
        "stage": tournament_stage(&matches),
        "podium": podium(&matches),
    }))
}

#[get("/api/standings")]
async fn api_standings(state: AppState) -> HttpResponse {
    let g = state.read().await;
    HttpResponse::Ok().json(group_standings(&g.store))
}

#[get("/api/leaderboard")]
async fn api_leaderboard(state: AppState) -> HttpResponse {
    let g = state.read().await;
    HttpResponse::Ok().json(club_leaderboard(&g.store))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    if let Some(seed) = config.shuffle_seed {
        log::info!("Using fixed shuffle seed {}", seed);
    }
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = Data::new(RwLock::new(ClubState {
        store: InMemoryStore::new(),
        scoreboard: ScoreBoard::new(),
        rng: config.rng(),
    }));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_list_players)
            .service(api_add_player)
            .service(api_import_players)
            .service(api_list_matches)
            .service(api_set_match_winner)
            .service(api_get_score)
            .service(api_apply_score)
            .service(api_confirm_winner)
            .service(api_create_group_stage)
            .service(api_create_swiss_round)
            .service(api_create_knockout)
            .service(api_next_knockout)
            .service(api_create_semifinals)
            .service(api_create_finals)
            .service(api_stage)
            .service(api_standings)
            .service(api_leaderboard)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
