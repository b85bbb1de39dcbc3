use funbox_bot::content::{builtin_content, format_with};
use funbox_bot::menu::{GUESS_MAX, GUESS_MIN, build_menu};
use funbox_bot::{Action, Lang, MenuId, SessionState, route};
use rand::{SeedableRng, rngs::StdRng};
use std::time::SystemTime;

#[test]
fn answer_wins_iff_it_matches_and_always_reveals_secret() {
    let content = builtin_content(Lang::En).unwrap();
    for seed in 0..50u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = SessionState::default();
        route(&Action::GuessStart, &mut session, &content, &mut rng, SystemTime::now());
        let secret = session.pending_secret.expect("start stores a secret");
        assert!((GUESS_MIN..=GUESS_MAX).contains(&secret));

        for guess in GUESS_MIN..=GUESS_MAX {
            let reply = route(
                &Action::GuessAnswer(Some(guess)),
                &mut session,
                &content,
                &mut rng,
                SystemTime::now(),
            );
            let secret_s = secret.to_string();
            let win = format_with(&content.games.guess.win, &[("secret", &secret_s)]);
            let lose = format_with(&content.games.guess.lose, &[("secret", &secret_s)]);
            if guess == secret {
                assert_eq!(reply.text, win);
            } else {
                assert_eq!(reply.text, lose);
            }
            assert!(reply.text.contains(&secret_s));
            assert_eq!(reply.menu, Some(build_menu(MenuId::Games, &content)));
        }
        // answering leaves the secret in place
        assert_eq!(session.pending_secret, Some(secret));
    }
}

#[test]
fn answer_without_start_is_expired() {
    let content = builtin_content(Lang::Zh).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    for guess in GUESS_MIN..=GUESS_MAX {
        let mut session = SessionState::default();
        let reply = route(
            &Action::GuessAnswer(Some(guess)),
            &mut session,
            &content,
            &mut rng,
            SystemTime::now(),
        );
        assert_eq!(reply.text, content.games.guess.expired);
        assert!(session.is_empty());
    }
}

#[test]
fn malformed_guess_is_treated_as_expired() {
    let content = builtin_content(Lang::En).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let mut session = SessionState::default();
    route(&Action::GuessStart, &mut session, &content, &mut rng, SystemTime::now());
    let before = session.clone();

    for token in ["game_guess_x", "game_guess_", "game_guess_3.5"] {
        let action = Action::parse(token);
        assert_eq!(action, Action::GuessAnswer(None), "token {}", token);
        let reply = route(&action, &mut session, &content, &mut rng, SystemTime::now());
        assert_eq!(reply.text, content.games.guess.expired);
        assert_eq!(session, before);
    }
}

#[test]
fn new_start_replaces_the_secret() {
    let content = builtin_content(Lang::En).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let mut session = SessionState::default();
    let mut seen = std::collections::HashSet::new();
    for _ in 0..100 {
        route(&Action::GuessStart, &mut session, &content, &mut rng, SystemTime::now());
        seen.insert(session.pending_secret.unwrap());
    }
    // every value of the keypad range gets drawn eventually
    assert_eq!(seen.len(), (GUESS_MAX - GUESS_MIN + 1) as usize);
}
