use actix_web::{HttpResponse, Result, web};
use uuid::Uuid;

use crate::{
    cities::{CITIES, city_menu},
    config::Config,
    messenger::Messenger,
    model::{IncomingMessage, MessagingEvent, OutgoingMessage, VerifyQuery, WebhookPayload},
    weather::WeatherClient,
};

pub const EVENT_RECEIVED: &str = "EVENT_RECEIVED";

/// Shared by every worker; built once from [`Config`].
pub struct AppState {
    pub verify_token: String,
    pub weather: WeatherClient,
    pub messenger: Messenger,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::new();
        AppState {
            verify_token: config.verify_token.clone(),
            weather: WeatherClient::new(
                client.clone(),
                &config.weather_api_url,
                &config.weather_api_key,
            ),
            messenger: Messenger::new(client, &config.send_api_url, &config.page_access_token),
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/webhook", web::get().to(verify_webhook))
        .route("/webhook", web::post().to(receive_webhook))
        .route("/health", web::get().to(health_check))
        .route(
            "/",
            web::get().to(|| async {
                HttpResponse::Ok().json(serde_json::json!({
                    "message": "Weather Messenger Bot API",
                    "status": "running",
                    "webhook": "/webhook",
                    "cities": CITIES.iter().map(|city| city.name).collect::<Vec<_>>(),
                }))
            }),
        );
}

pub async fn health_check() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "Weather Messenger Bot"
    })))
}

/// Subscription handshake sent once when the webhook is registered.
pub async fn verify_webhook(
    query: web::Query<VerifyQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let query = query.into_inner();

    let (Some(mode), Some(token)) = (query.mode, query.verify_token) else {
        log::warn!("Webhook verification without hub.mode or hub.verify_token");
        return Ok(HttpResponse::BadRequest().body("Missing hub.mode or hub.verify_token"));
    };

    if mode == "subscribe" && token == state.verify_token {
        log::info!("WEBHOOK_VERIFIED");
        Ok(HttpResponse::Ok()
            .content_type("text/plain")
            .body(query.challenge.unwrap_or_default()))
    } else {
        log::warn!("Webhook verification rejected: mode={}", mode);
        Ok(HttpResponse::Forbidden().finish())
    }
}

/// Acknowledges a batch straight away; replies are sent from spawned tasks.
pub async fn receive_webhook(
    payload: web::Json<WebhookPayload>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let payload = payload.into_inner();

    if payload.object != "page" {
        log::warn!("Ignoring webhook for object '{}'", payload.object);
        return Ok(HttpResponse::NotFound().finish());
    }

    for entry in payload.entry {
        let Some(raw) = entry.messaging.into_iter().next() else {
            log::warn!("Webhook entry without messaging events");
            continue;
        };
        match serde_json::from_value::<MessagingEvent>(raw) {
            Ok(event) => dispatch_event(&state, event),
            Err(e) => log::warn!("Skipping unreadable messaging event: {}", e),
        }
    }

    Ok(HttpResponse::Ok().content_type("text/plain").body(EVENT_RECEIVED))
}

fn dispatch_event(state: &web::Data<AppState>, event: MessagingEvent) {
    let sender_psid = event.sender.id;
    log::info!("Sender PSID: {}", sender_psid);

    if let Some(message) = event.message {
        let state = state.clone();
        let event_id = Uuid::new_v4();
        log::debug!("[{}] message text {:?}", event_id, message.text);

        tokio::spawn(async move {
            handle_message(&state, event_id, &sender_psid, &message).await;
        });
    } else if let Some(postback) = event.postback {
        // Quick replies carry the city selection; postbacks are never sent by our menu.
        log::info!(
            "Ignoring postback from {} with payload {:?}",
            sender_psid,
            postback.payload
        );
    }
}

async fn handle_message(
    state: &AppState,
    event_id: Uuid,
    sender_psid: &str,
    message: &IncomingMessage,
) {
    let response = reply_for(&state.weather, message).await;

    match state.messenger.send(sender_psid, &response).await {
        Ok(()) => log::info!("[{}] message sent!", event_id),
        Err(e) => log::error!("[{}] Unable to send message: {}", event_id, e),
    }
}

/// A quick reply selects a city; anything else gets the city menu.
pub async fn reply_for(weather: &WeatherClient, message: &IncomingMessage) -> OutgoingMessage {
    match &message.quick_reply {
        Some(quick_reply) => OutgoingMessage::text(weather.reply_for(&quick_reply.payload).await),
        None => city_menu(),
    }
}
