pub use message::{parse_value, Contribution};
pub use state::{Outcome, RoundState, Status};

mod message;
mod state;
#[cfg(test)]
mod tests;
