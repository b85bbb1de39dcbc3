use serde::Deserialize;
use std::fmt;

/// Prefix shared by the digit-guess answer tokens (`game_guess_3`).
pub const GUESS_ANSWER_PREFIX: &str = "game_guess_";
/// Prefix shared by the rock-paper-scissors move tokens (`game_rps_rock`).
pub const RPS_PLAY_PREFIX: &str = "game_rps_";
/// Prefix shared by the memory drill answer tokens (`brain_memory_answer_1234`).
pub const MEMORY_ANSWER_PREFIX: &str = "brain_memory_answer_";

/// Named menus of the navigation tree. `Main` is the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuId {
    Main,
    Mood,
    Games,
    Brain,
    Daily,
    Cards,
}

impl MenuId {
    pub const ALL: [MenuId; 6] = [
        MenuId::Main,
        MenuId::Mood,
        MenuId::Games,
        MenuId::Brain,
        MenuId::Daily,
        MenuId::Cards,
    ];

    pub fn token(self) -> &'static str {
        match self {
            MenuId::Main => "menu_main",
            MenuId::Mood => "menu_mood",
            MenuId::Games => "menu_games",
            MenuId::Brain => "menu_brain",
            MenuId::Daily => "menu_daily",
            MenuId::Cards => "menu_cards",
        }
    }

    /// The menu one level closer to the root, `None` for the root itself.
    pub fn parent(self) -> Option<MenuId> {
        match self {
            MenuId::Main => None,
            _ => Some(MenuId::Main),
        }
    }
}

/// Stateless features that render one random line from a content table.
///
/// The serde names double as the wire tokens and as the keys of the
/// `tables` object in a content pack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    MoodSentence,
    MoodColor,
    MoodRelax,
    MoodQuote,
    BrainTask,
    BrainPuzzle,
    DailyTodo,
    DailyBreak,
    DailyClean,
    DailyContact,
    CardTip,
    CardIdea,
    CardSelf,
    CardGoal,
}

impl Category {
    pub const ALL: [Category; 14] = [
        Category::MoodSentence,
        Category::MoodColor,
        Category::MoodRelax,
        Category::MoodQuote,
        Category::BrainTask,
        Category::BrainPuzzle,
        Category::DailyTodo,
        Category::DailyBreak,
        Category::DailyClean,
        Category::DailyContact,
        Category::CardTip,
        Category::CardIdea,
        Category::CardSelf,
        Category::CardGoal,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Category::MoodSentence => "mood_sentence",
            Category::MoodColor => "mood_color",
            Category::MoodRelax => "mood_relax",
            Category::MoodQuote => "mood_quote",
            Category::BrainTask => "brain_task",
            Category::BrainPuzzle => "brain_puzzle",
            Category::DailyTodo => "daily_todo",
            Category::DailyBreak => "daily_break",
            Category::DailyClean => "daily_clean",
            Category::DailyContact => "daily_contact",
            Category::CardTip => "card_tip",
            Category::CardIdea => "card_idea",
            Category::CardSelf => "card_self",
            Category::CardGoal => "card_goal",
        }
    }

    /// Menu the result of this category is rendered under.
    pub fn menu(self) -> MenuId {
        match self {
            Category::MoodSentence
            | Category::MoodColor
            | Category::MoodRelax
            | Category::MoodQuote => MenuId::Mood,
            Category::BrainTask | Category::BrainPuzzle => MenuId::Brain,
            Category::DailyTodo
            | Category::DailyBreak
            | Category::DailyClean
            | Category::DailyContact => MenuId::Daily,
            Category::CardTip | Category::CardIdea | Category::CardSelf | Category::CardGoal => {
                MenuId::Cards
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Rock-paper-scissors moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    Rock,
    Paper,
    Scissors,
}

impl Gesture {
    pub const ALL: [Gesture; 3] = [Gesture::Rock, Gesture::Paper, Gesture::Scissors];

    pub fn tag(self) -> &'static str {
        match self {
            Gesture::Rock => "rock",
            Gesture::Paper => "paper",
            Gesture::Scissors => "scissors",
        }
    }

    pub fn parse(s: &str) -> Option<Gesture> {
        match s {
            "rock" => Some(Gesture::Rock),
            "paper" => Some(Gesture::Paper),
            "scissors" => Some(Gesture::Scissors),
            _ => None,
        }
    }

    /// True when `self` wins against `other`.
    pub fn beats(self, other: Gesture) -> bool {
        matches!(
            (self, other),
            (Gesture::Rock, Gesture::Scissors)
                | (Gesture::Scissors, Gesture::Paper)
                | (Gesture::Paper, Gesture::Rock)
        )
    }
}

/// A parsed button press.
///
/// Parameterized families keep a `None` payload when the trailing parameter
/// is missing or malformed; the router renders those like an expired game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Menu(MenuId),
    Content(Category),
    RpsPrompt,
    RpsPlay(Option<Gesture>),
    Dice,
    GuessStart,
    GuessAnswer(Option<i32>),
    EmojiCombo,
    MemoryStart,
    MemoryAnswer(Option<i32>),
    ReactionStart,
    ReactionClick,
    Unknown(String),
}

impl Action {
    /// Parse raw callback data. Never fails: anything unrecognized becomes
    /// `Action::Unknown`.
    pub fn parse(token: &str) -> Action {
        if let Some(action) = Self::parse_exact(token) {
            return action;
        }
        if token.starts_with(MEMORY_ANSWER_PREFIX) {
            return Action::MemoryAnswer(trailing_param(token).parse().ok());
        }
        if token.starts_with(GUESS_ANSWER_PREFIX) {
            return Action::GuessAnswer(trailing_param(token).parse().ok());
        }
        if token.starts_with(RPS_PLAY_PREFIX) {
            return Action::RpsPlay(Gesture::parse(trailing_param(token)));
        }
        Action::Unknown(token.to_string())
    }

    fn parse_exact(token: &str) -> Option<Action> {
        if let Some(menu) = MenuId::ALL.into_iter().find(|m| m.token() == token) {
            return Some(Action::Menu(menu));
        }
        if let Some(category) = Category::ALL.into_iter().find(|c| c.token() == token) {
            return Some(Action::Content(category));
        }
        let action = match token {
            "game_rps" => Action::RpsPrompt,
            "game_dice" => Action::Dice,
            "game_guess" => Action::GuessStart,
            "game_emoji" => Action::EmojiCombo,
            "brain_memory" => Action::MemoryStart,
            "brain_reaction" => Action::ReactionStart,
            "brain_reaction_click" => Action::ReactionClick,
            _ => return None,
        };
        Some(action)
    }

    /// Wire form of this action, suitable for Telegram `callback_data`.
    pub fn token(&self) -> String {
        match self {
            Action::Menu(menu) => menu.token().to_string(),
            Action::Content(category) => category.token().to_string(),
            Action::RpsPrompt => "game_rps".to_string(),
            Action::RpsPlay(gesture) => {
                format!("{}{}", RPS_PLAY_PREFIX, gesture.map(Gesture::tag).unwrap_or(""))
            }
            Action::Dice => "game_dice".to_string(),
            Action::GuessStart => "game_guess".to_string(),
            Action::GuessAnswer(guess) => format!("{}{}", GUESS_ANSWER_PREFIX, opt_num(*guess)),
            Action::EmojiCombo => "game_emoji".to_string(),
            Action::MemoryStart => "brain_memory".to_string(),
            Action::MemoryAnswer(n) => format!("{}{}", MEMORY_ANSWER_PREFIX, opt_num(*n)),
            Action::ReactionStart => "brain_reaction".to_string(),
            Action::ReactionClick => "brain_reaction_click".to_string(),
            Action::Unknown(raw) => raw.clone(),
        }
    }

    /// True for navigation actions.
    pub fn is_navigation(&self) -> bool {
        matches!(self, Action::Menu(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// Segment after the final `_` separator.
fn trailing_param(token: &str) -> &str {
    token.rsplit_once('_').map(|(_, tail)| tail).unwrap_or("")
}

fn opt_num(n: Option<i32>) -> String {
    n.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_tokens_win_over_prefix_families() {
        assert_eq!(Action::parse("game_rps"), Action::RpsPrompt);
        assert_eq!(Action::parse("game_guess"), Action::GuessStart);
        assert_eq!(Action::parse("brain_memory"), Action::MemoryStart);
        assert_eq!(Action::parse("brain_reaction_click"), Action::ReactionClick);
    }

    #[test]
    fn parameter_comes_from_final_segment() {
        assert_eq!(Action::parse("game_guess_4"), Action::GuessAnswer(Some(4)));
        assert_eq!(Action::parse("game_guess_x_2"), Action::GuessAnswer(Some(2)));
        assert_eq!(
            Action::parse("brain_memory_answer_4821"),
            Action::MemoryAnswer(Some(4821))
        );
        assert_eq!(
            Action::parse("game_rps_paper"),
            Action::RpsPlay(Some(Gesture::Paper))
        );
    }

    #[test]
    fn gesture_cycle() {
        assert!(Gesture::Rock.beats(Gesture::Scissors));
        assert!(Gesture::Scissors.beats(Gesture::Paper));
        assert!(Gesture::Paper.beats(Gesture::Rock));
        for g in Gesture::ALL {
            assert!(!g.beats(g));
        }
    }
}
