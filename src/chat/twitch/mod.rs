use lazy_regex::regex;
use log::{debug, trace};
use rand::Rng;
use std::{collections::VecDeque, net::TcpStream};
use tungstenite::{stream::MaybeTlsStream, Message, WebSocket};

use super::{ChatError, ChatEvent, ChatSource};


const TWITCH_IRC_URL: &str = "wss://irc-ws.chat.twitch.tv:443";

/// An anonymous, read-only connection to a single Twitch chat channel.
pub struct TwitchChat {
    socket: WebSocket<MaybeTlsStream<TcpStream>>,
    /// Our own (anonymous) login, used to flag echo messages.
    nick: String,
    /// IRC lines received but not yet handled. One websocket frame can
    /// carry several lines.
    pending: VecDeque<String>,
}

impl TwitchChat {
    /// Connect and join the given channel as an anonymous spectator.
    pub fn connect(channel: &str) -> Result<Self, ChatError> {
        let nick = format!("justinfan{}", rand::thread_rng().gen_range(10_000..100_000));
        let (mut socket, _response) = tungstenite::connect(TWITCH_IRC_URL)?;

        socket.send(Message::Text(
            "CAP REQ :twitch.tv/tags twitch.tv/commands".into(),
        ))?;
        socket.send(Message::Text(format!("NICK {nick}")))?;
        socket.send(Message::Text(format!("JOIN #{channel}")))?;

        Ok(TwitchChat {
            socket,
            nick,
            pending: VecDeque::new(),
        })
    }

    /// Handle one IRC line, returning a chat event if it carries one.
    fn handle_line(&mut self, line: &str) -> Result<Option<ChatEvent>, ChatError> {
        if let Some(reply) = ping_reply(line) {
            self.socket.send(Message::Text(reply))?;
            return Ok(None);
        }
        if let Some(mut event) = parse_privmsg(line) {
            event.is_echo = event.login.as_deref() == Some(self.nick.as_str());
            return Ok(Some(event));
        }
        // Only non-message lines can carry server commands
        if is_reconnect(line) {
            return Err(ChatError::ServerReconnect);
        }
        trace!("Ignoring IRC line: {line}");
        Ok(None)
    }
}

impl ChatSource for TwitchChat {
    fn next_event(&mut self) -> Result<ChatEvent, ChatError> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                if let Some(event) = self.handle_line(&line)? {
                    return Ok(event);
                }
                continue;
            }
            match self.socket.read()? {
                Message::Text(frame) => {
                    self.pending.extend(frame.lines().map(str::to_owned));
                }
                Message::Ping(payload) => self.socket.send(Message::Pong(payload))?,
                Message::Close(frame) => {
                    debug!("Server closed the connection: {frame:?}");
                    return Err(ChatError::ConnectionClosed);
                }
                _ => {}
            }
        }
    }
}

impl Drop for TwitchChat {
    fn drop(&mut self) {
        // Unsubscribe on teardown; the server may already be gone
        let _ = self.socket.close(None);
    }
}

/// The PONG response a server PING line requires, if it is one.
fn ping_reply(line: &str) -> Option<String> {
    line.strip_prefix("PING")
        .map(|payload| format!("PONG{payload}"))
}

/// Whether the server asked us to drop and re-establish the connection.
fn is_reconnect(line: &str) -> bool {
    line == "RECONNECT" || line.ends_with(" RECONNECT")
}

/// Parse a PRIVMSG line into a chat event. Any other line yields `None`.
fn parse_privmsg(line: &str) -> Option<ChatEvent> {
    let re = regex!(r"^(?:@(\S+) )?:(\S+?)!\S+ PRIVMSG #(\S+) :(.*)$");
    let captures = re.captures(line)?;

    let tags = captures.get(1).map_or("", |m| m.as_str());
    let login = captures.get(2)?.as_str();
    let channel = captures.get(3)?.as_str();
    let text = captures.get(4)?.as_str();

    Some(ChatEvent {
        channel: channel.to_owned(),
        display_name: tag_value(tags, "display-name"),
        login: Some(login.to_owned()),
        text: text.to_owned(),
        is_echo: false,
    })
}

/// Look up a non-empty IRCv3 tag value by key.
fn tag_value(tags: &str, key: &str) -> Option<String> {
    tags.split(';').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key && !v.is_empty()).then(|| unescape_tag(v))
    })
}

/// Undo IRCv3 tag value escaping.
fn unescape_tag(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(':') => out.push(';'),
            Some('s') => out.push(' '),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
