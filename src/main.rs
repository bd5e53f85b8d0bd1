//! LessonBot Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use std::time::Duration;
use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::{ShutdownToken, UpdateHandler};
use teloxide::update_listeners::webhooks;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn, error};

use LessonBot::{
    config::Settings,
    utils::logging,
    services::ShellRebuilder,
    state::{termination_signal, SessionController, ShutdownReason, ShutdownSignal},
    handlers::{Command, ReplyTimeout, handle_message},
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", LessonBot::info());

    // Load users and lessons
    let rebuilder = Arc::new(ShellRebuilder::new(settings.rebuild.clone()));
    let mut controller = SessionController::open(&settings, rebuilder).await?;

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);
    let me = bot.get_me().await?;
    info!("Authorized on account {}", me.username());
    controller.set_bot_username(me.username());
    let controller = Arc::new(controller);

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to publish command list");
    }

    let mut dispatcher = Dispatcher::builder(bot.clone(), create_handler())
        .dependencies(dptree::deps![
            controller.clone(),
            ReplyTimeout(settings.bot.reply_timeout())
        ])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .build();

    // Stop the dispatcher on a termination signal or after a rebuild
    let shutdown = controller.shutdown_signal();
    tokio::spawn(stop_dispatcher_on_shutdown(shutdown.clone(), dispatcher.shutdown_token()));
    tokio::spawn(async move {
        match termination_signal().await {
            Ok(name) => {
                shutdown.request(ShutdownReason::Signal(name.to_string()));
            }
            Err(e) => error!(error = %e, "Failed to listen for termination signals"),
        }
    });

    match settings.bot.webhook_url()? {
        Some(url) => {
            info!("Starting bot with webhook at {}", url);
            let listener = webhooks::axum(
                bot.clone(),
                webhooks::Options::new(settings.bot.listen_addr, url),
            )
            .await?;

            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
        None => {
            info!("No webhook domain configured, starting bot with polling mode...");
            dispatcher.dispatch().await;
        }
    }

    // Persist state before exiting
    if let Err(e) = controller.flush().await {
        error!(error = %e, "State was not fully saved");
    }

    let reason = controller
        .shutdown_signal()
        .reason()
        .unwrap_or_else(|| ShutdownReason::Signal("listener stopped".to_string()));
    info!("Caught signal {}: shutting down.", reason);

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(handle_messages))
}

/// Handle text messages and commands
async fn handle_messages(
    bot: Bot,
    msg: Message,
    controller: Arc<SessionController>,
    timeout: ReplyTimeout,
) -> HandlerResult {
    if let Err(e) = handle_message(bot, msg, controller, timeout).await {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }

    Ok(())
}

/// Wait for a shutdown request and stop the dispatcher
async fn stop_dispatcher_on_shutdown(shutdown: ShutdownSignal, token: ShutdownToken) {
    let reason = shutdown.wait().await;
    info!(reason = %reason, "Stopping dispatcher");

    loop {
        match token.shutdown() {
            Ok(stopped) => {
                stopped.await;
                return;
            }
            // Dispatcher has not started yet
            Err(_) => tokio::time::sleep(Duration::from_millis(200)).await,
        }
    }
}
