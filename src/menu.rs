use crate::action::{Action, Category, Gesture, MenuId};
use crate::content::Content;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Smallest value offered on the digit-guess keypad.
pub const GUESS_MIN: i32 = 1;
/// Largest value offered on the digit-guess keypad.
pub const GUESS_MAX: i32 = 5;

/// A labelled button bound to an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: Action,
}

impl Button {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Rows of buttons, rendered top to bottom, left to right.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Menu {
    pub rows: Vec<Vec<Button>>,
}

impl Menu {
    pub fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    /// Buttons that navigate to another menu.
    pub fn navigation_buttons(&self) -> impl Iterator<Item = &Button> {
        self.buttons().filter(|b| b.action.is_navigation())
    }

    pub fn to_markup(&self) -> InlineKeyboardMarkup {
        InlineKeyboardMarkup::new(self.rows.iter().map(|row| {
            row.iter()
                .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.action.token()))
                .collect::<Vec<_>>()
        }))
    }
}

fn content_button(content: &Content, category: Category) -> Button {
    Button::new(content.label(category), Action::Content(category))
}

fn back_to(content: &Content, menu: MenuId) -> Button {
    let label = match menu {
        MenuId::Games => &content.menus.back_games,
        MenuId::Brain => &content.menus.back_brain,
        _ => &content.menus.back_main,
    };
    Button::new(label.clone(), Action::Menu(menu))
}

/// Title shown above a menu.
pub fn menu_title(id: MenuId, content: &Content) -> &str {
    let m = &content.menus;
    match id {
        MenuId::Main => m.main.title.as_str(),
        MenuId::Mood => m.mood.title.as_str(),
        MenuId::Games => m.games.title.as_str(),
        MenuId::Brain => m.brain.title.as_str(),
        MenuId::Daily => m.daily.title.as_str(),
        MenuId::Cards => m.cards.title.as_str(),
    }
}

/// Layout of a named menu. Pure: the same id and pack always give the
/// same layout.
pub fn build_menu(id: MenuId, content: &Content) -> Menu {
    let m = &content.menus;
    let g = &content.games;
    let rows = match id {
        MenuId::Main => vec![
            vec![Button::new(m.mood.label.clone(), Action::Menu(MenuId::Mood))],
            vec![
                Button::new(m.games.label.clone(), Action::Menu(MenuId::Games)),
                Button::new(m.brain.label.clone(), Action::Menu(MenuId::Brain)),
            ],
            vec![
                Button::new(m.daily.label.clone(), Action::Menu(MenuId::Daily)),
                Button::new(m.cards.label.clone(), Action::Menu(MenuId::Cards)),
            ],
        ],
        MenuId::Mood => vec![
            vec![
                content_button(content, Category::MoodSentence),
                content_button(content, Category::MoodColor),
            ],
            vec![
                content_button(content, Category::MoodRelax),
                content_button(content, Category::MoodQuote),
            ],
            vec![back_to(content, MenuId::Main)],
        ],
        MenuId::Games => vec![
            vec![
                Button::new(g.rps.label.clone(), Action::RpsPrompt),
                Button::new(g.dice.label.clone(), Action::Dice),
            ],
            vec![
                Button::new(g.guess.label.clone(), Action::GuessStart),
                Button::new(g.emoji.label.clone(), Action::EmojiCombo),
            ],
            vec![back_to(content, MenuId::Main)],
        ],
        MenuId::Brain => vec![
            vec![content_button(content, Category::BrainTask)],
            vec![
                Button::new(g.memory.label.clone(), Action::MemoryStart),
                content_button(content, Category::BrainPuzzle),
            ],
            vec![Button::new(g.reaction.label.clone(), Action::ReactionStart)],
            vec![back_to(content, MenuId::Main)],
        ],
        MenuId::Daily => vec![
            vec![
                content_button(content, Category::DailyTodo),
                content_button(content, Category::DailyBreak),
            ],
            vec![
                content_button(content, Category::DailyClean),
                content_button(content, Category::DailyContact),
            ],
            vec![back_to(content, MenuId::Main)],
        ],
        MenuId::Cards => vec![
            vec![
                content_button(content, Category::CardTip),
                content_button(content, Category::CardIdea),
            ],
            vec![
                content_button(content, Category::CardSelf),
                content_button(content, Category::CardGoal),
            ],
            vec![back_to(content, MenuId::Main)],
        ],
    };
    Menu::new(rows)
}

/// Label of a rock-paper-scissors move in the active pack.
pub fn gesture_label(gesture: Gesture, content: &Content) -> &str {
    let rps = &content.games.rps;
    match gesture {
        Gesture::Rock => rps.rock.as_str(),
        Gesture::Paper => rps.paper.as_str(),
        Gesture::Scissors => rps.scissors.as_str(),
    }
}

pub fn rps_keypad(content: &Content) -> Menu {
    Menu::new(vec![
        Gesture::ALL
            .into_iter()
            .map(|g| Button::new(gesture_label(g, content), Action::RpsPlay(Some(g))))
            .collect(),
        vec![back_to(content, MenuId::Games)],
    ])
}

pub fn guess_keypad(content: &Content) -> Menu {
    Menu::new(vec![
        (GUESS_MIN..=GUESS_MAX)
            .map(|n| Button::new(n.to_string(), Action::GuessAnswer(Some(n))))
            .collect(),
        vec![back_to(content, MenuId::Games)],
    ])
}

/// Single "ready" button carrying the number to confirm.
pub fn memory_keypad(number: i32, content: &Content) -> Menu {
    Menu::new(vec![
        vec![Button::new(
            content.games.memory.ready.clone(),
            Action::MemoryAnswer(Some(number)),
        )],
        vec![back_to(content, MenuId::Brain)],
    ])
}

pub fn reaction_keypad(content: &Content) -> Menu {
    Menu::new(vec![
        vec![Button::new(
            content.games.reaction.click.clone(),
            Action::ReactionClick,
        )],
        vec![back_to(content, MenuId::Brain)],
    ])
}
