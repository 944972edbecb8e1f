//! Telegram staff registration bot

use teloxide::prelude::*;

use crate::services::staff::StaffService;

const USAGE: &str =
    "Send your desired username and the registration password like this: username@password";

/// Run the registration listener until the process stops.
///
/// Staff members register themselves by sending `username@password`;
/// the password comes from the `telegram.registration_password`
/// setting. Registered chats receive new-booking alerts.
pub async fn run_registration_bot(bot: Bot, staff: StaffService, password: String) {
    tracing::info!("Starting Telegram registration bot");

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let staff = staff.clone();
        let password = password.clone();
        async move {
            let Some(text) = msg.text() else {
                return Ok(());
            };

            if text.starts_with("/start") {
                bot.send_message(msg.chat.id, USAGE).await?;
                return Ok(());
            }

            let Some((username, attempt)) = parse_credentials(text) else {
                bot.send_message(msg.chat.id, USAGE).await?;
                return Ok(());
            };

            if attempt != password {
                bot.send_message(msg.chat.id, "Wrong password").await?;
                return Ok(());
            }

            match staff.register(username, &msg.chat.id.to_string()).await {
                Ok(_) => {
                    bot.send_message(msg.chat.id, format!("Welcome aboard, {}!", username))
                        .await?;
                }
                Err(err) => {
                    tracing::error!("Staff registration failed: {}", err);
                    bot.send_message(msg.chat.id, "Registration failed, try again later")
                        .await?;
                }
            }

            Ok(())
        }
    })
    .await;
}

/// Split `username@password`; text before the first `@` is the
/// username, text after the last `@` is the password.
fn parse_credentials(text: &str) -> Option<(&str, &str)> {
    if !text.contains('@') {
        return None;
    }
    let username = text.split('@').next().unwrap_or_default().trim();
    let password = text.rsplit('@').next().unwrap_or_default().trim();
    Some((username, password))
}
