use std::sync::Arc;
use tokio::sync::RwLock;

use funbox_bot::{AppState, Lang, SharedState, effective_lang_from_parts, parse_lang};

fn empty_state() -> SharedState {
    Arc::new(RwLock::new(AppState::default()))
}

#[test]
fn parses_short_tags() {
    assert_eq!(parse_lang("zh"), Some(Lang::Zh));
    assert_eq!(parse_lang("EN"), Some(Lang::En));
    assert_eq!(parse_lang("it"), None);
}

#[tokio::test]
async fn detects_language_from_language_code() {
    let state = empty_state();
    let detected = effective_lang_from_parts(&state, Some("en"), Some(200), 100, Lang::Zh).await;
    assert_eq!(detected, Lang::En);
}

#[tokio::test]
async fn detects_language_from_locale_prefix() {
    let state = empty_state();
    let detected =
        effective_lang_from_parts(&state, Some("zh-hans"), Some(300), 101, Lang::En).await;
    assert_eq!(detected, Lang::Zh);
}

#[tokio::test]
async fn stored_preference_beats_language_code() {
    let state = empty_state();
    state.write().await.user_langs.insert((7, 8), Lang::En);
    let detected = effective_lang_from_parts(&state, Some("zh"), Some(8), 7, Lang::Zh).await;
    assert_eq!(detected, Lang::En);
}

#[tokio::test]
async fn unknown_code_uses_default() {
    let state = empty_state();
    let detected = effective_lang_from_parts(&state, Some("ru"), None, 1, Lang::En).await;
    assert_eq!(detected, Lang::En);
    let detected = effective_lang_from_parts(&state, None, None, 1, Lang::Zh).await;
    assert_eq!(detected, Lang::Zh);
}
