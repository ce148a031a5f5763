use super::*;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use lgm_core::ID;
use lgm_gameplay::BattleError;
use lgm_gameplay::Prompt;
use lgm_gameplay::Submission;
use lgm_gameroom::Arena;
use lgm_gameroom::ArenaError;
use lgm_gameroom::Protocol;
use lgm_gameroom::ServerMessage;
use tokio::sync::broadcast;

/// Maps coordinator failures onto HTTP status codes. Rule violations are
/// the client's problem (422), a completed or raced session is a conflict
/// (409), and judge/store outages are service unavailability (503).
fn fail(e: ArenaError) -> HttpResponse {
    match e {
        ArenaError::NotFound => HttpResponse::NotFound().body(e.to_string()),
        ArenaError::Conflict => HttpResponse::Conflict().body(e.to_string()),
        ArenaError::Rule(BattleError::Completed) => HttpResponse::Conflict().body(e.to_string()),
        ArenaError::Rule(BattleError::NotWaiting) => HttpResponse::Conflict().body(e.to_string()),
        ArenaError::Rule(_) => HttpResponse::UnprocessableEntity().body(e.to_string()),
        ArenaError::Judge(_) => HttpResponse::ServiceUnavailable().body(e.to_string()),
        ArenaError::Store(_) => HttpResponse::ServiceUnavailable().body(e.to_string()),
        ArenaError::Saturated => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

pub async fn open(arena: web::Data<Arena>, body: web::Json<OpenRequest>) -> impl Responder {
    let body = body.into_inner();
    let mode = match Protocol::mode(&body.mode) {
        Ok(mode) => mode,
        Err(e) => return HttpResponse::UnprocessableEntity().body(e.to_string()),
    };
    let prompt = Prompt::new(body.prompt, body.reference);
    match arena.into_inner().open(mode, prompt, body.label).await {
        Ok((id, code)) => HttpResponse::Ok().json(OpenResponse {
            battle_id: id.to_string(),
            code: code.map(|c| c.to_string()),
        }),
        Err(e) => fail(e),
    }
}

pub async fn join(
    arena: web::Data<Arena>,
    path: web::Path<String>,
    body: web::Json<JoinRequest>,
) -> impl Responder {
    match arena
        .into_inner()
        .join(&path.into_inner(), body.into_inner().label)
        .await
    {
        Ok((id, side)) => HttpResponse::Ok().json(JoinResponse {
            battle_id: id.to_string(),
            side,
        }),
        Err(e) => fail(e),
    }
}

pub async fn plea(
    arena: web::Data<Arena>,
    path: web::Path<uuid::Uuid>,
    body: web::Json<PleaRequest>,
) -> impl Responder {
    let id = ID::from(path.into_inner());
    let body = body.into_inner();
    let card = match Protocol::card(&body.card) {
        Ok(card) => card,
        Err(e) => return HttpResponse::UnprocessableEntity().body(e.to_string()),
    };
    let sub = Submission::new(body.side, card, body.justification);
    match arena.into_inner().submit(id, sub).await {
        Ok((next, plea, verdict)) => {
            HttpResponse::Ok().json(PleaResponse::new(&next, &plea, &verdict))
        }
        Err(e) => fail(e),
    }
}

pub async fn snapshot(arena: web::Data<Arena>, path: web::Path<uuid::Uuid>) -> impl Responder {
    match arena.snapshot(ID::from(path.into_inner())).await {
        Ok(battle) => HttpResponse::Ok().json(BattleView::from(&battle)),
        Err(e) => fail(e),
    }
}

pub async fn pleas(arena: web::Data<Arena>, path: web::Path<uuid::Uuid>) -> impl Responder {
    match arena.pleas(ID::from(path.into_inner())).await {
        Ok(pleas) => {
            HttpResponse::Ok().json(pleas.iter().map(PleaRecord::from).collect::<Vec<_>>())
        }
        Err(e) => fail(e),
    }
}

/// Upgrades to WebSocket and bridges the battle's hint stream to the
/// client. Sends the connection frame, then forwards hints until either
/// side closes; a lagged watcher skips ahead rather than disconnecting,
/// since every frame is an invalidation hint, not state.
pub async fn watch(
    arena: web::Data<Arena>,
    path: web::Path<uuid::Uuid>,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    use futures::StreamExt;
    let id = ID::from(path.into_inner());
    let (battle, mut rx) = match arena.into_inner().watch(id).await {
        Ok(watch) => watch,
        Err(e) => return fail(e).map_into_right_body(),
    };
    match actix_ws::handle(&req, body) {
        Ok((response, mut session, mut stream)) => {
            actix_web::rt::spawn(async move {
                if session
                    .text(ServerMessage::connected(&battle).to_json())
                    .await
                    .is_err()
                {
                    return;
                }
                log::debug!("[watch {}] connected", id);
                'sesh: loop {
                    tokio::select! {
                        biased;
                        msg = rx.recv() => match msg {
                            Ok(msg) => if session.text(msg.to_json()).await.is_err() { break 'sesh },
                            Err(broadcast::error::RecvError::Lagged(n)) => {
                                log::debug!("[watch {}] dropped {} hints", id, n);
                                continue 'sesh
                            }
                            Err(broadcast::error::RecvError::Closed) => break 'sesh,
                        },
                        msg = stream.next() => match msg {
                            Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                            Some(Err(_)) => break 'sesh,
                            None => break 'sesh,
                            _ => continue 'sesh,
                        },
                    }
                }
                log::debug!("[watch {}] disconnected", id);
            });
            response.map_into_left_body()
        }
        Err(e) => HttpResponse::InternalServerError()
            .body(e.to_string())
            .map_into_right_body(),
    }
}
