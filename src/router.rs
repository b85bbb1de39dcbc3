use crate::action::{Action, Category, Gesture, MenuId};
use crate::content::{Content, emoji_combo, format_with, pick};
use crate::menu::{
    GUESS_MAX, GUESS_MIN, Menu, build_menu, gesture_label, guess_keypad, memory_keypad,
    menu_title, reaction_keypad, rps_keypad,
};
use crate::session::{SessionState, elapsed_millis};
use rand::{Rng, distributions::Uniform};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Number of faces on the dice.
pub const DICE_SIDES: i32 = 6;
/// Inclusive range the memory drill draws from.
pub const MEMORY_MIN: i32 = 100;
pub const MEMORY_MAX: i32 = 9999;

/// What the transport shows in place of the previous message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub menu: Option<Menu>,
}

impl Reply {
    pub fn with_menu(text: impl Into<String>, menu: Menu) -> Self {
        Self {
            text: text.into(),
            menu: Some(menu),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: None,
        }
    }
}

/// Outcome of one rock-paper-scissors round from the user's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RpsOutcome {
    Draw,
    Win,
    Lose,
}

pub fn rps_outcome(user: Gesture, bot: Gesture) -> RpsOutcome {
    if user == bot {
        RpsOutcome::Draw
    } else if user.beats(bot) {
        RpsOutcome::Win
    } else {
        RpsOutcome::Lose
    }
}

/// Return a random integer in the inclusive range [min, max].
pub fn rand_in_range<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    let distr = Uniform::new_inclusive(min, max);
    rng.sample(distr)
}

/// Handle one button press.
///
/// Never fails: unknown actions fall back to the root menu and answers
/// without a matching challenge render the feature's expired text. `session`
/// is only written by the start transitions.
pub fn route<R: Rng + ?Sized>(
    action: &Action,
    session: &mut SessionState,
    content: &Content,
    rng: &mut R,
    now: SystemTime,
) -> Reply {
    debug!(action = %action, "routing action");
    match action {
        Action::Menu(id) => Reply::with_menu(menu_title(*id, content), build_menu(*id, content)),
        Action::Content(category) => content_line(*category, content, rng),
        Action::RpsPrompt => Reply::with_menu(content.games.rps.prompt.clone(), rps_keypad(content)),
        Action::RpsPlay(gesture) => rps_play(*gesture, content, rng),
        Action::Dice => {
            let n = rand_in_range(rng, 1, DICE_SIDES);
            let text = format_with(&content.games.dice.result, &[("n", &n.to_string())]);
            Reply::with_menu(text, build_menu(MenuId::Games, content))
        }
        Action::GuessStart => guess_start(session, content, rng),
        Action::GuessAnswer(guess) => guess_answer(*guess, session, content),
        Action::EmojiCombo => {
            let combo = emoji_combo(&content.games.emoji.glyphs, rng);
            let text = format_with(&content.games.emoji.result, &[("combo", &combo)]);
            Reply::with_menu(text, build_menu(MenuId::Games, content))
        }
        Action::MemoryStart => memory_start(session, content, rng),
        Action::MemoryAnswer(answer) => memory_answer(*answer, session, content),
        Action::ReactionStart => {
            session.reaction_issued_at = Some(now);
            Reply::with_menu(
                content.games.reaction.prompt.clone(),
                reaction_keypad(content),
            )
        }
        Action::ReactionClick => reaction_click(session, content, now),
        Action::Unknown(raw) => {
            warn!(token = %raw, "unsupported action token");
            fallback(content)
        }
    }
}

/// Reply for tokens the router does not know.
pub fn fallback(content: &Content) -> Reply {
    Reply::with_menu(content.fallback.clone(), build_menu(MenuId::Main, content))
}

fn content_line<R: Rng + ?Sized>(category: Category, content: &Content, rng: &mut R) -> Reply {
    let menu = build_menu(category.menu(), content);
    let Some(table) = content.table(category) else {
        warn!(%category, "content table missing");
        return fallback(content);
    };
    match pick(&table.lines, rng) {
        Some(line) => Reply::with_menu(format!("{}{}", table.heading, line), menu),
        None => {
            warn!(%category, "content table empty");
            fallback(content)
        }
    }
}

fn rps_play<R: Rng + ?Sized>(gesture: Option<Gesture>, content: &Content, rng: &mut R) -> Reply {
    let texts = &content.games.rps;
    let games = build_menu(MenuId::Games, content);
    let Some(user) = gesture else {
        warn!("malformed rock-paper-scissors move");
        return Reply::with_menu(texts.expired.clone(), games);
    };
    let bot = Gesture::ALL[rng.gen_range(0..Gesture::ALL.len())];
    let outcome = match rps_outcome(user, bot) {
        RpsOutcome::Draw => texts.draw.as_str(),
        RpsOutcome::Win => texts.win.as_str(),
        RpsOutcome::Lose => texts.lose.as_str(),
    };
    let text = format_with(
        &texts.result,
        &[
            ("user", gesture_label(user, content)),
            ("bot", gesture_label(bot, content)),
            ("outcome", outcome),
        ],
    );
    Reply::with_menu(text, games)
}

fn guess_start<R: Rng + ?Sized>(session: &mut SessionState, content: &Content, rng: &mut R) -> Reply {
    let secret = rand_in_range(rng, GUESS_MIN, GUESS_MAX);
    session.pending_secret = Some(secret);
    let text = format_with(
        &content.games.guess.prompt,
        &[
            ("min", &GUESS_MIN.to_string()),
            ("max", &GUESS_MAX.to_string()),
        ],
    );
    Reply::with_menu(text, guess_keypad(content))
}

fn guess_answer(guess: Option<i32>, session: &SessionState, content: &Content) -> Reply {
    let texts = &content.games.guess;
    let games = build_menu(MenuId::Games, content);
    let (Some(secret), Some(guess)) = (session.pending_secret, guess) else {
        warn!(?guess, "digit guess without a live challenge");
        return Reply::with_menu(texts.expired.clone(), games);
    };
    let template = if guess == secret { &texts.win } else { &texts.lose };
    Reply::with_menu(
        format_with(template, &[("secret", &secret.to_string())]),
        games,
    )
}

fn memory_start<R: Rng + ?Sized>(session: &mut SessionState, content: &Content, rng: &mut R) -> Reply {
    let number = rand_in_range(rng, MEMORY_MIN, MEMORY_MAX);
    session.pending_memory = Some(number);
    let text = format_with(&content.games.memory.prompt, &[("number", &number.to_string())]);
    Reply::with_menu(text, memory_keypad(number, content))
}

fn memory_answer(answer: Option<i32>, session: &SessionState, content: &Content) -> Reply {
    let texts = &content.games.memory;
    let brain = build_menu(MenuId::Brain, content);
    let (Some(stored), Some(answer)) = (session.pending_memory, answer) else {
        warn!(?answer, "memory answer without a live drill");
        return Reply::with_menu(texts.expired.clone(), brain);
    };
    let template = if answer == stored { &texts.success } else { &texts.mismatch };
    Reply::with_menu(
        format_with(template, &[("number", &stored.to_string())]),
        brain,
    )
}

fn reaction_click(session: &SessionState, content: &Content, now: SystemTime) -> Reply {
    let texts = &content.games.reaction;
    let brain = build_menu(MenuId::Brain, content);
    let Some(issued_at) = session.reaction_issued_at else {
        warn!("reaction click without a live challenge");
        return Reply::with_menu(texts.expired.clone(), brain);
    };
    let ms = elapsed_millis(issued_at, now);
    if ms < 0 {
        warn!(ms, "clock went backwards during reaction test");
    }
    Reply::with_menu(format_with(&texts.result, &[("ms", &ms.to_string())]), brain)
}

/// `/start`: welcome text with the root menu.
pub fn start_reply(content: &Content) -> Reply {
    Reply::with_menu(
        content.commands.start.clone(),
        build_menu(MenuId::Main, content),
    )
}

pub fn help_reply(content: &Content) -> Reply {
    Reply::text(content.commands.help.clone())
}

pub fn about_reply(content: &Content) -> Reply {
    Reply::text(content.commands.about.clone())
}
