use crate::Lang;
use crate::action::Category;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::{
    collections::{HashMap, HashSet},
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Number of glyphs in one rendered emoji combo.
pub const EMOJI_COMBO_SIZE: usize = 5;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content pack {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse content pack: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("content table `{0}` is missing or empty")]
    EmptyTable(Category),
    #[error("emoji glyph set has {found} glyphs, at least {needed} are required")]
    TooFewGlyphs { found: usize, needed: usize },
    #[error("emoji glyph `{0}` appears more than once")]
    DuplicateGlyph(String),
    #[error("template `{field}` must contain `{{{placeholder}}}`")]
    MissingPlaceholder {
        field: &'static str,
        placeholder: &'static str,
    },
}

/// One content table: the button label that opens it, an optional heading
/// prepended to every line, and the candidate lines.
#[derive(Clone, Debug, Deserialize)]
pub struct Table {
    pub label: String,
    #[serde(default)]
    pub heading: String,
    pub lines: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CommandTexts {
    pub start: String,
    pub help: String,
    pub about: String,
    pub lang_current: String,
    pub lang_available: String,
    pub lang_set: String,
    pub lang_invalid: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MenuText {
    pub label: String,
    pub title: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MenuTexts {
    pub main: MenuText,
    pub mood: MenuText,
    pub games: MenuText,
    pub brain: MenuText,
    pub daily: MenuText,
    pub cards: MenuText,
    pub back_main: String,
    pub back_games: String,
    pub back_brain: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RpsTexts {
    pub label: String,
    pub prompt: String,
    pub rock: String,
    pub paper: String,
    pub scissors: String,
    pub result: String,
    pub draw: String,
    pub win: String,
    pub lose: String,
    pub expired: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DiceTexts {
    pub label: String,
    pub result: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GuessTexts {
    pub label: String,
    pub prompt: String,
    pub win: String,
    pub lose: String,
    pub expired: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EmojiTexts {
    pub label: String,
    pub glyphs: Vec<String>,
    pub result: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MemoryTexts {
    pub label: String,
    pub prompt: String,
    pub ready: String,
    pub success: String,
    pub mismatch: String,
    pub expired: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReactionTexts {
    pub label: String,
    pub prompt: String,
    pub click: String,
    pub result: String,
    pub expired: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GameTexts {
    pub rps: RpsTexts,
    pub dice: DiceTexts,
    pub guess: GuessTexts,
    pub emoji: EmojiTexts,
    pub memory: MemoryTexts,
    pub reaction: ReactionTexts,
}

/// A content pack: every piece of copy the bot renders in one language.
#[derive(Clone, Debug, Deserialize)]
pub struct Content {
    pub language_name: String,
    pub fallback: String,
    pub commands: CommandTexts,
    pub menus: MenuTexts,
    pub tables: HashMap<Category, Table>,
    pub games: GameTexts,
}

impl Content {
    /// Check the invariants the router relies on: every category has a
    /// non-empty table, the emoji set can fill a combo without repeats and
    /// every game template carries the values it must show.
    pub fn validate(&self) -> Result<(), ContentError> {
        self.check_placeholders()?;
        for category in Category::ALL {
            match self.tables.get(&category) {
                Some(table) if !table.lines.is_empty() => {}
                _ => return Err(ContentError::EmptyTable(category)),
            }
        }
        let glyphs = &self.games.emoji.glyphs;
        let mut seen = HashSet::new();
        for glyph in glyphs {
            if !seen.insert(glyph.as_str()) {
                return Err(ContentError::DuplicateGlyph(glyph.clone()));
            }
        }
        if glyphs.len() < EMOJI_COMBO_SIZE {
            return Err(ContentError::TooFewGlyphs {
                found: glyphs.len(),
                needed: EMOJI_COMBO_SIZE,
            });
        }
        Ok(())
    }

    fn check_placeholders(&self) -> Result<(), ContentError> {
        let g = &self.games;
        let required: [(&'static str, &str, &'static str); 11] = [
            ("games.rps.result", &g.rps.result, "user"),
            ("games.rps.result", &g.rps.result, "bot"),
            ("games.rps.result", &g.rps.result, "outcome"),
            ("games.dice.result", &g.dice.result, "n"),
            ("games.guess.win", &g.guess.win, "secret"),
            ("games.guess.lose", &g.guess.lose, "secret"),
            ("games.emoji.result", &g.emoji.result, "combo"),
            ("games.memory.prompt", &g.memory.prompt, "number"),
            ("games.memory.success", &g.memory.success, "number"),
            ("games.memory.mismatch", &g.memory.mismatch, "number"),
            ("games.reaction.result", &g.reaction.result, "ms"),
        ];
        for (field, template, placeholder) in required {
            if !template.contains(&format!("{{{}}}", placeholder)) {
                return Err(ContentError::MissingPlaceholder { field, placeholder });
            }
        }
        Ok(())
    }

    pub fn table(&self, category: Category) -> Option<&Table> {
        self.tables.get(&category)
    }

    /// Button label for a category, the raw token if the table is absent.
    pub fn label(&self, category: Category) -> &str {
        self.table(category)
            .map(|t| t.label.as_str())
            .unwrap_or(category.token())
    }
}

/// Every loaded pack, one per supported language.
#[derive(Clone, Debug)]
pub struct ContentLibrary {
    pub zh: Content,
    pub en: Content,
}

impl ContentLibrary {
    /// The built-in packs compiled into the binary.
    pub fn builtin() -> Result<Self, ContentError> {
        Ok(Self {
            zh: builtin_content(Lang::Zh)?,
            en: builtin_content(Lang::En)?,
        })
    }

    pub fn get(&self, lang: Lang) -> &Content {
        match lang {
            Lang::Zh => &self.zh,
            Lang::En => &self.en,
        }
    }

    fn slot_mut(&mut self, lang: Lang) -> &mut Content {
        match lang {
            Lang::Zh => &mut self.zh,
            Lang::En => &mut self.en,
        }
    }
}

/// Parse and validate a pack from its JSON text.
pub fn parse_content(raw: &str) -> Result<Content, ContentError> {
    let content: Content = serde_json::from_str(raw)?;
    content.validate()?;
    Ok(content)
}

/// The pack compiled into the binary for `lang`.
pub fn builtin_content(lang: Lang) -> Result<Content, ContentError> {
    let raw = match lang {
        Lang::Zh => include_str!("../content/zh.json"),
        Lang::En => include_str!("../content/en.json"),
    };
    parse_content(raw)
}

/// Load and validate a pack from a JSON file on disk.
pub fn load_content_file(path: &Path) -> Result<Content, ContentError> {
    let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_content(&raw)
}

/// Start from the built-in packs and replace each one for which `dir`
/// holds a valid `<lang>.json`. Files that fail to load keep the built-in
/// pack for that language. A missing directory is not an error.
pub fn load_all_content(dir: &Path) -> Result<ContentLibrary, ContentError> {
    let mut library = ContentLibrary::builtin()?;
    let Ok(entries) = dir.read_dir() else {
        tracing::debug!(dir = %dir.display(), "no content override directory");
        return Ok(library);
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if !is_json {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(lang) = crate::parse_lang(stem) else {
            tracing::warn!("skipping unknown language file: {}", path.display());
            continue;
        };
        match load_content_file(&path) {
            Ok(content) => {
                tracing::info!(path = %path.display(), "loaded content override");
                *library.slot_mut(lang) = content;
            }
            Err(e) => {
                tracing::warn!("failed to load {}: {}. Keeping built-in pack.", path.display(), e);
            }
        }
    }
    Ok(library)
}

/// Pick one line uniformly at random. `None` only for an empty slice.
pub fn pick<'a, R: Rng + ?Sized>(lines: &'a [String], rng: &mut R) -> Option<&'a str> {
    lines.choose(rng).map(String::as_str)
}

/// Draw `EMOJI_COMBO_SIZE` glyphs without replacement, joined by spaces.
pub fn emoji_combo<R: Rng + ?Sized>(glyphs: &[String], rng: &mut R) -> String {
    glyphs
        .choose_multiple(rng, EMOJI_COMBO_SIZE)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Simple template formatter: replace `{key}` with `value` for each pair in `pairs`.
pub fn format_with(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut s = template.to_string();
    for (k, v) in pairs {
        s = s.replace(&format!("{{{}}}", k), v);
    }
    s
}
