use super::ChatEvent;

fn event(display_name: Option<&str>, login: Option<&str>) -> ChatEvent {
    ChatEvent {
        channel: "somechannel".to_owned(),
        display_name: display_name.map(str::to_owned),
        login: login.map(str::to_owned),
        text: "1".to_owned(),
        is_echo: false,
    }
}

#[test]
fn sender_prefers_the_display_name() {
    assert_eq!(event(Some("Alice"), Some("alice")).sender(), Some("Alice"));
}

#[test]
fn sender_falls_back_to_the_login() {
    assert_eq!(event(None, Some("alice")).sender(), Some("alice"));
    assert_eq!(event(Some(""), Some("alice")).sender(), Some("alice"));
}

#[test]
fn sender_is_absent_when_both_names_are_missing() {
    assert_eq!(event(None, None).sender(), None);
    assert_eq!(event(Some(""), Some("")).sender(), None);
}
