use funbox_bot::content::format_with;
use funbox_bot::menu::{GUESS_MAX, GUESS_MIN};
use funbox_bot::router::start_reply;
use funbox_bot::{Action, AppState, ContentLibrary, Lang};
use rand::{SeedableRng, rngs::StdRng};
use std::time::SystemTime;

// /start -> games -> number guess -> press "3" twice
#[test]
fn start_guess_and_replay() {
    let library = ContentLibrary::builtin().unwrap();
    let content = library.get(Lang::En);
    let mut app = AppState::default();
    let mut rng = StdRng::seed_from_u64(314);
    let key = (100i64, 200u64);

    let welcome = start_reply(content);
    let root = welcome.menu.expect("start attaches the root menu");
    assert_eq!(root.navigation_buttons().count(), 5);

    app.apply_action(key, &Action::parse("menu_games"), content, &mut rng, SystemTime::now());
    assert!(app.sessions.get(&key).is_none());

    let keypad = app
        .apply_action(key, &Action::parse("game_guess"), content, &mut rng, SystemTime::now())
        .menu
        .unwrap();
    let options: Vec<_> = keypad
        .buttons()
        .filter(|b| matches!(b.action, Action::GuessAnswer(Some(_))))
        .map(|b| b.label.clone())
        .collect();
    assert_eq!(options, vec!["1", "2", "3", "4", "5"]);

    let secret = app.sessions[&key].pending_secret.unwrap();
    assert!((GUESS_MIN..=GUESS_MAX).contains(&secret));

    let first = app.apply_action(key, &Action::parse("game_guess_3"), content, &mut rng, SystemTime::now());
    let win = format_with(&content.games.guess.win, &[("secret", "3")]);
    assert!(
        first.text == win || first.text.contains(&secret.to_string()),
        "text was: {}",
        first.text
    );
    assert_eq!(first.text == win, secret == 3);

    let second = app.apply_action(key, &Action::parse("game_guess_3"), content, &mut rng, SystemTime::now());
    assert_eq!(first, second);
    assert_eq!(app.sessions[&key].pending_secret, Some(secret));
}

#[test]
fn sessions_are_scoped_per_conversation() {
    let library = ContentLibrary::builtin().unwrap();
    let content = library.get(Lang::Zh);
    let mut app = AppState::default();
    let mut rng = StdRng::seed_from_u64(1);

    app.apply_action((1, 1), &Action::GuessStart, content, &mut rng, SystemTime::now());
    let other = app.apply_action((1, 2), &Action::GuessAnswer(Some(1)), content, &mut rng, SystemTime::now());
    assert_eq!(other.text, content.games.guess.expired);
    assert!(app.sessions.get(&(1, 2)).is_none());
}
