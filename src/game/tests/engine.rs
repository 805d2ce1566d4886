use super::super::{Contribution, Outcome, RoundState, Status};

fn contribution(user: &str, value: u64) -> Contribution {
    Contribution {
        contributor: user.to_owned(),
        value,
    }
}

fn started(count: u32, user: &str) -> RoundState {
    RoundState {
        status: Status::Started,
        count,
        contributor: Some(user.to_owned()),
    }
}

#[test]
fn first_correct_number_starts_a_streak() {
    let (next, outcome) = RoundState::default().apply(&contribution("alice", 1));

    assert_eq!(outcome, Outcome::Extended(1));
    assert_eq!(next, started(1, "alice"));
}

#[test]
fn different_user_with_next_number_extends_the_streak() {
    let (next, outcome) = started(4, "alice").apply(&contribution("bob", 5));

    assert_eq!(outcome, Outcome::Extended(5));
    assert_eq!(next, started(5, "bob"));
}

#[test]
fn repeated_contributor_is_ignored_regardless_of_value() {
    let state = started(4, "alice");

    // Even the correct next number doesn't count from the same user
    for value in [5, 6, 1, 999] {
        let (next, outcome) = state.apply(&contribution("alice", value));
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(next, state);
    }
}

#[test]
fn fresh_state_never_suppresses() {
    // The initial contributor sentinel must not match any real identity,
    // including a user whose name is the empty string.
    let (next, outcome) = RoundState::default().apply(&contribution("", 1));

    assert_eq!(outcome, Outcome::Extended(1));
    assert_eq!(next.contributor.as_deref(), Some(""));
}

#[test]
fn wrong_number_with_no_streak_stays_idle() {
    let state = RoundState {
        status: Status::Idle,
        count: 0,
        contributor: Some("alice".to_owned()),
    };
    let (next, outcome) = state.apply(&contribution("bob", 7));

    assert_eq!(outcome, Outcome::Missed);
    assert_eq!(next.status, Status::Idle);
    assert_eq!(next.count, 0);
    assert_eq!(next.contributor.as_deref(), Some("bob"));
}

#[test]
fn wrong_number_breaks_a_live_streak() {
    let (next, outcome) = started(2, "bob").apply(&contribution("alice", 2));

    assert_eq!(outcome, Outcome::Broken);
    assert_eq!(next.status, Status::GameOver);
    assert_eq!(next.count, 0);
    // The breaker is recorded for blame
    assert_eq!(next.contributor.as_deref(), Some("alice"));
}

#[test]
fn duplicates_and_skips_are_failures() {
    // Duplicate of the current count
    let (_, outcome) = started(3, "alice").apply(&contribution("bob", 3));
    assert_eq!(outcome, Outcome::Broken);

    // Skipping ahead
    let (_, outcome) = started(3, "alice").apply(&contribution("bob", 5));
    assert_eq!(outcome, Outcome::Broken);
}

#[test]
fn game_over_with_count_zero_resets_to_idle_on_miss() {
    let state = RoundState {
        status: Status::GameOver,
        count: 0,
        contributor: Some("alice".to_owned()),
    };
    let (next, outcome) = state.apply(&contribution("bob", 3));

    assert_eq!(outcome, Outcome::Missed);
    assert_eq!(next.status, Status::Idle);
}

#[test]
fn streak_can_restart_after_game_over() {
    let state = RoundState {
        status: Status::GameOver,
        count: 0,
        contributor: Some("alice".to_owned()),
    };
    let (next, outcome) = state.apply(&contribution("bob", 1));

    assert_eq!(outcome, Outcome::Extended(1));
    assert_eq!(next, started(1, "bob"));
}

#[test]
fn full_round_walkthrough() {
    let mut state = RoundState::default();
    let script = [
        ("alice", 1, Outcome::Extended(1)),
        ("bob", 2, Outcome::Extended(2)),
        // Wrong number from a different user, streak of 2 breaks
        ("alice", 2, Outcome::Broken),
        // Count is back to 0, so a miss keeps the round idle
        ("carol", 3, Outcome::Missed),
        // Same contributor as the previous event, ignored
        ("carol", 4, Outcome::Ignored),
    ];

    for (user, value, expected) in script {
        let (next, outcome) = state.apply(&contribution(user, value));
        assert_eq!(outcome, expected, "{user} sent {value}");
        state = next;
    }

    assert_eq!(state.status, Status::Idle);
    assert_eq!(state.count, 0);
    assert_eq!(state.contributor.as_deref(), Some("carol"));
}
