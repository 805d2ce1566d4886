use thiserror::Error;

pub mod twitch;

#[cfg(test)]
mod tests;

/// A single inbound chat message event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    /// Channel the message was posted in.
    pub channel: String,
    /// The sender's display name, if the server provided one.
    pub display_name: Option<String>,
    /// The sender's login name.
    pub login: Option<String>,
    /// The message text.
    pub text: String,
    /// True when the message originated from our own connection.
    pub is_echo: bool,
}

impl ChatEvent {
    /// The identity a contribution is attributed to: the display name when
    /// present and non-empty, the login otherwise. `None` means the event
    /// carries no usable identity and should be discarded.
    pub fn sender(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| self.login.as_deref().filter(|name| !name.is_empty()))
    }
}

/// A source of chat events for one channel subscription.
///
/// Events are pulled one at a time, so a consumer sees them strictly in
/// arrival order and no event can be delivered after the source is dropped.
pub trait ChatSource {
    /// Block until the next chat message arrives.
    fn next_event(&mut self) -> Result<ChatEvent, ChatError>;
}

/// Failure modes for chat connections.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("connection closed")]
    ConnectionClosed,
    #[error("server requested reconnect")]
    ServerReconnect,
    #[error("websocket error")]
    WebSocket(#[from] tungstenite::Error),
}
