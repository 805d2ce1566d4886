use log::{debug, info, warn};

use crate::{
    chat::{ChatError, ChatEvent, ChatSource},
    game::{parse_value, Contribution, Outcome, RoundState},
    store::{Record, RecordStore},
};


/// One game session: a single channel subscription driving a fresh round.
///
/// The round state lives and dies with the session; the record is loaded
/// by the caller and persisted through the store whenever it improves.
pub struct Session<'a, C, S> {
    chat: C,
    store: &'a S,
    round: RoundState,
    record: Record,
}

impl<'a, C: ChatSource, S: RecordStore> Session<'a, C, S> {
    pub fn new(chat: C, store: &'a S, record: Record) -> Self {
        Session {
            chat,
            store,
            round: RoundState::default(),
            record,
        }
    }

    /// Pump chat events into the game until the connection fails.
    pub fn run(&mut self) -> Result<(), ChatError> {
        loop {
            let event = self.chat.next_event()?;
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: ChatEvent) {
        if event.is_echo {
            return;
        }
        let Some(user) = event.sender() else {
            debug!("Dropping message without a sender identity");
            return;
        };
        let Some(value) = parse_value(&event.text) else {
            return;
        };
        let contribution = Contribution {
            contributor: user.to_owned(),
            value,
        };

        let (next, outcome) = self.round.apply(&contribution);
        self.round = next;

        match outcome {
            Outcome::Ignored => {
                debug!(
                    "Ignoring repeat contribution from {}",
                    contribution.contributor
                );
            }
            Outcome::Extended(count) => {
                info!("{} counted {}", contribution.contributor, count);
                if self.record.register(count, &contribution.contributor) {
                    info!(
                        "New record: {} by {}",
                        self.record.best_count, self.record.best_contributor
                    );
                    if let Err(e) = self.store.save(&self.record) {
                        warn!("Failed to persist the record: {e}");
                    }
                }
            }
            Outcome::Missed => {
                debug!(
                    "{} sent {} with no streak running",
                    contribution.contributor, contribution.value
                );
            }
            Outcome::Broken => {
                info!("Game over! Blame on {}", contribution.contributor);
            }
        }
        debug!(
            "Round is now {} at count {}",
            self.round.status, self.round.count
        );
    }
}
