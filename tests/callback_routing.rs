use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use funbox_bot::{
    AppState, Config, ContentLibrary, Lang, SharedState, callback_reply, format_with,
};
use teloxide::types::CallbackQuery;

fn query(data: Option<&str>) -> CallbackQuery {
    let mut value = serde_json::json!({
        "id": "4382bfdwdsb323b2d9",
        "from": {
            "id": 42,
            "is_bot": false,
            "first_name": "Ada",
            "language_code": "en"
        },
        "chat_instance": "-7654321"
    });
    if let Some(data) = data {
        value["data"] = serde_json::json!(data);
    }
    serde_json::from_value(value).unwrap()
}

fn config() -> Config {
    Config {
        bot_token: "123:abc".to_string(),
        default_lang: Lang::Zh,
        content_dir: PathBuf::from("content"),
    }
}

// routing needs no Bot, so a failed answer_callback_query cannot drop the press
#[tokio::test]
async fn press_is_routed_without_touching_the_api() {
    let state: SharedState = Arc::new(RwLock::new(AppState::default()));
    let library = ContentLibrary::builtin().unwrap();

    let reply = callback_reply(&query(Some("game_guess")), &state, &config(), &library)
        .await
        .unwrap();
    let prompt = format_with(&library.en.games.guess.prompt, &[("min", "1"), ("max", "5")]);
    assert_eq!(reply.text, prompt);
    let secret = state.read().await.sessions[&(42, 42)].pending_secret;
    assert!(secret.is_some());

    let answer = callback_reply(&query(Some("game_guess_9")), &state, &config(), &library)
        .await
        .unwrap();
    assert!(answer.text.contains(&secret.unwrap().to_string()));
}

#[tokio::test]
async fn navigation_press_creates_no_session() {
    let state: SharedState = Arc::new(RwLock::new(AppState::default()));
    let library = ContentLibrary::builtin().unwrap();
    for data in ["menu_games", "mood_quote", "xyz_not_a_real_token"] {
        assert!(callback_reply(&query(Some(data)), &state, &config(), &library)
            .await
            .is_some());
    }
    assert!(state.read().await.sessions.is_empty());
}

#[tokio::test]
async fn query_without_data_has_no_reply() {
    let state: SharedState = Arc::new(RwLock::new(AppState::default()));
    let library = ContentLibrary::builtin().unwrap();
    assert!(callback_reply(&query(None), &state, &config(), &library)
        .await
        .is_none());
}
