use super::Contribution;

/// Where the round currently stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// No streak is running.
    #[default]
    Idle,
    /// A streak is running, `count` is at least 1.
    Started,
    /// A running streak was just broken.
    GameOver,
}

/// State of the current round. Recreated fresh for every session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundState {
    pub status: Status,
    /// Length of the current streak.
    pub count: u32,
    /// The user whose message most recently caused the current status.
    /// `None` until the first contribution of the session is processed,
    /// so that no real identity can match it.
    pub contributor: Option<String>,
}

/// What a single contribution did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Same user as the previous contribution; no transition.
    Ignored,
    /// The streak advanced to the contained count.
    Extended(u32),
    /// Wrong number while no streak was running.
    Missed,
    /// Wrong number broke a live streak.
    Broken,
}

impl RoundState {
    /// Apply one contribution and return the next state plus what happened.
    ///
    /// The same-contributor check comes first: a repeated contributor is
    /// ignored even if their number would have been correct. On a wrong
    /// number the contributor is still recorded, so the presentation layer
    /// can assign blame.
    pub fn apply(&self, contribution: &Contribution) -> (RoundState, Outcome) {
        let user = contribution.contributor.as_str();
        if self.contributor.as_deref() == Some(user) {
            return (self.clone(), Outcome::Ignored);
        }

        if contribution.value == u64::from(self.count) + 1 {
            let count = self.count + 1;
            let next = RoundState {
                status: Status::Started,
                count,
                contributor: Some(user.to_owned()),
            };
            (next, Outcome::Extended(count))
        } else {
            let (status, outcome) = if self.count == 0 {
                (Status::Idle, Outcome::Missed)
            } else {
                (Status::GameOver, Outcome::Broken)
            };
            let next = RoundState {
                status,
                count: 0,
                contributor: Some(user.to_owned()),
            };
            (next, outcome)
        }
    }
}
