use funbox_bot::content::builtin_content;
use funbox_bot::menu::build_menu;
use funbox_bot::{Action, Lang, MenuId, SessionState, route};
use rand::{SeedableRng, rngs::StdRng};
use std::time::SystemTime;

#[test]
fn unknown_token_falls_back_to_root_menu() {
    for lang in Lang::ALL {
        let content = builtin_content(lang).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        for token in ["xyz_not_a_real_token", "", "menu_", "MENU_MAIN", "brain_reaction_clickx"] {
            let mut session = SessionState::default();
            let action = Action::parse(token);
            assert_eq!(action, Action::Unknown(token.to_string()));
            let reply = route(&action, &mut session, &content, &mut rng, SystemTime::now());
            assert_eq!(reply.text, content.fallback);
            assert_eq!(reply.menu, Some(build_menu(MenuId::Main, &content)));
            assert!(session.is_empty());
        }
    }
}
