//! Long-poll event loop
//!
//! Wires the database, the service context, and the Bot API together, then
//! pulls updates forever and feeds them through the dispatcher.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use gate_common::{AppConfig, AppError};
use gate_db::{
    create_pool, run_migrations, PgAdmissionStore, PgApplicationRepository, PgInviteRepository,
    PgMemberRepository,
};
use gate_service::dto::{DecisionOutcome, EventOutcome};
use gate_service::services::{EventDispatcher, GroupSettings, ServiceContextBuilder};
use gate_service::texts;

use crate::telegram::types::{BotCommand, Update};
use crate::telegram::{BotApi, TelegramGateway};
use crate::updates::{map_update, MappedUpdate};

const ALLOWED_UPDATES: &[&str] = &["message", "callback_query", "chat_join_request", "chat_member"];

/// How long to back off after a failed poll before trying again
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Build every dependency and run the long-poll loop. Never returns under
/// normal operation.
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = gate_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established, migrations applied");

    let api = BotApi::new(&config.bot.token);
    let gateway = Arc::new(TelegramGateway::new(api.clone()));

    let settings = GroupSettings::new(
        config.bot.group_chat_id,
        config.bot.admin_user_id,
        config.invite.ttl(),
    );

    let ctx = ServiceContextBuilder::new()
        .settings(settings)
        .member_repo(Arc::new(PgMemberRepository::new(pool.clone())))
        .application_repo(Arc::new(PgApplicationRepository::new(pool.clone())))
        .invite_repo(Arc::new(PgInviteRepository::new(pool.clone())))
        .admission_store(Arc::new(PgAdmissionStore::new(pool)))
        .gateway(gateway)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let dispatcher = EventDispatcher::new(ctx);

    register_commands(&api).await;

    info!(
        group_chat = %config.bot.group_chat_id,
        "Gateway adapter started, polling for updates"
    );

    let mut offset: i64 = 0;
    loop {
        let updates = match api
            .get_updates(offset, config.bot.poll_timeout_secs, ALLOWED_UPDATES)
            .await
        {
            Ok(updates) => updates,
            Err(e) => {
                warn!(error = %e, "Polling for updates failed");
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            handle_update(&api, &dispatcher, update).await;
        }
    }
}

/// Register the private-chat command menu; a failure here is not fatal
async fn register_commands(api: &BotApi) {
    let commands = [
        BotCommand {
            command: "apply".to_string(),
            description: "Request membership".to_string(),
        },
        BotCommand {
            command: "setbio".to_string(),
            description: "Set your member bio".to_string(),
        },
        BotCommand {
            command: "look_bio".to_string(),
            description: "Look up a member's bio".to_string(),
        },
        BotCommand {
            command: "help".to_string(),
            description: "How this works".to_string(),
        },
    ];
    if let Err(e) = api.set_my_commands(&commands).await {
        warn!(error = %e, "Failed to register bot commands");
    }
}

/// Process one update to completion; errors end up in the log and, where a
/// human is waiting, in a short non-technical reply
async fn handle_update(api: &BotApi, dispatcher: &EventDispatcher, update: Update) {
    let origin_chat = update.message.as_ref().map(|m| m.chat.id);

    match map_update(update) {
        MappedUpdate::Ignore => {}

        MappedUpdate::Reply { chat_id, text } => {
            if let Err(e) = api.send_message(chat_id, &text, None).await {
                warn!(chat_id, error = %e, "Failed to send reply");
            }
        }

        MappedUpdate::AnswerCallback { callback_id, text } => {
            if let Err(e) = api.answer_callback_query(&callback_id, &text).await {
                warn!(error = %e, "Failed to answer callback query");
            }
        }

        MappedUpdate::Event { event, callback_id } => {
            let event_type = event.event_type();
            match dispatcher.handle(event).await {
                Ok(outcome) => {
                    if let Some(callback_id) = callback_id {
                        answer_decision(api, &callback_id, &outcome).await;
                    }
                }
                Err(e) => {
                    error!(event_type, error = %e, "Event handling failed");
                    if let Some(callback_id) = callback_id {
                        let text = if e.is_retryable() {
                            texts::APPROVAL_FAILED_TEXT
                        } else {
                            texts::SOMETHING_WENT_WRONG_TEXT
                        };
                        if let Err(e) = api.answer_callback_query(&callback_id, text).await {
                            warn!(error = %e, "Failed to answer callback query");
                        }
                    } else if let Some(chat_id) = origin_chat {
                        if let Err(e) = api
                            .send_message(chat_id, texts::SOMETHING_WENT_WRONG_TEXT, None)
                            .await
                        {
                            warn!(chat_id, error = %e, "Failed to send apology");
                        }
                    }
                }
            }
        }
    }
}

/// Acknowledge an admin's button press with what actually happened
async fn answer_decision(api: &BotApi, callback_id: &str, outcome: &EventOutcome) {
    let text = match outcome {
        EventOutcome::Decision(DecisionOutcome::Approved(_)) => texts::APPLICATION_APPROVED_ADMIN_TEXT,
        EventOutcome::Decision(DecisionOutcome::Denied) => texts::APPLICATION_DENIED_ADMIN_TEXT,
        EventOutcome::Decision(DecisionOutcome::NotFound) => texts::APPLICATION_NOT_FOUND_TEXT,
        _ => return,
    };
    if let Err(e) = api.answer_callback_query(callback_id, text).await {
        warn!(error = %e, "Failed to answer callback query");
    }
}
