use anyhow::Context;
use log::{error, info};
use std::time::Duration;

mod chat;
mod game;
mod session;
mod store;

use chat::twitch::TwitchChat;
use session::Session;
use store::{JsonFileStore, RecordStore};

/// File the best-streak record is persisted in.
const RECORD_PATH: &str = "numerica.json";

const RECONNECT_DELAY: Duration = Duration::from_secs(10);

fn main() -> anyhow::Result<()> {
    env_logger::try_init().unwrap_or(());

    // Without a channel there is nothing to subscribe to
    let Some(channel) = std::env::args().nth(1) else {
        eprintln!("usage: numerica-bot <channel>");
        return Ok(());
    };
    let channel = channel.trim_start_matches('#').to_ascii_lowercase();

    let store = JsonFileStore::new(RECORD_PATH);

    loop {
        // The record is durable and shared across sessions; the round
        // state below is fresh for every connection
        let record = store
            .load()
            .with_context(|| format!("failed to load record from {RECORD_PATH}"))?;
        if record.best_count > 0 {
            info!(
                "Max score so far: {} by {}",
                record.best_count, record.best_contributor
            );
        }

        let chat = match TwitchChat::connect(&channel) {
            Ok(chat) => chat,
            Err(e) => {
                error!("Failed to connect to Twitch chat: {e}");
                std::thread::sleep(RECONNECT_DELAY);
                continue;
            }
        };
        info!("Watching #{channel} for the counting game");

        let mut session = Session::new(chat, &store, record);
        if let Err(e) = session.run() {
            error!(
                "Chat connection lost ({e}), reconnecting in {} seconds...",
                RECONNECT_DELAY.as_secs()
            );
        }
        std::thread::sleep(RECONNECT_DELAY);
    }
}
