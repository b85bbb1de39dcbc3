pub mod action;
pub mod config;
pub mod content;
pub mod menu;
pub mod router;
pub mod session;

use anyhow::Result;
use rand::Rng;
use std::{collections::HashMap, sync::Arc, time::SystemTime};
use teloxide::{
    ApiError, RequestError,
    payloads::{EditMessageTextSetters, SendMessageSetters},
    prelude::*,
    utils::command::BotCommands,
};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

pub use action::{Action, Category, Gesture, MenuId};
pub use config::{Config, ConfigError};
pub use content::{Content, ContentError, ContentLibrary, format_with};
pub use menu::{Button, Menu};
pub use router::{Reply, route};
pub use session::{SessionKey, SessionState};

/// Shared application state
#[derive(Debug, Default)]
pub struct AppState {
    // key: (chat_id, user_id)
    pub sessions: HashMap<SessionKey, SessionState>,
    // language chosen with /lang
    pub user_langs: HashMap<SessionKey, Lang>,
}

pub type SharedState = Arc<RwLock<AppState>>;
pub type SharedConfig = Arc<Config>;
pub type SharedLibrary = Arc<ContentLibrary>;

impl AppState {
    /// Route one button press against the session stored under `key`.
    ///
    /// The session is copied out, routed, and written back only when the
    /// router changed it, so navigation never allocates a session.
    pub fn apply_action<R: Rng + ?Sized>(
        &mut self,
        key: SessionKey,
        action: &Action,
        content: &Content,
        rng: &mut R,
        now: SystemTime,
    ) -> Reply {
        let before = self.sessions.get(&key);
        let mut session = before.cloned().unwrap_or_default();
        let reply = route(action, &mut session, content, rng, now);
        let changed = match before {
            Some(b) => b != &session,
            None => !session.is_empty(),
        };
        if changed {
            self.sessions.insert(key, session);
        }
        reply
    }

    /// `/lang [code]`: show the current language or store a new preference.
    pub fn lang_command(
        &mut self,
        key: SessionKey,
        arg: &str,
        current: Lang,
        library: &ContentLibrary,
    ) -> Reply {
        let arg = arg.trim();
        let content = library.get(current);
        if arg.is_empty() {
            let mut reply = format_with(
                &content.commands.lang_current,
                &[
                    ("name", &content.language_name),
                    ("tag", lang_tag(&current)),
                ],
            );
            reply.push('\n');
            let available = Lang::ALL
                .iter()
                .map(|l| format!("{} ({})", library.get(*l).language_name, lang_tag(l)))
                .collect::<Vec<_>>()
                .join(", ");
            reply.push_str(&format_with(
                &content.commands.lang_available,
                &[("list", &available)],
            ));
            return Reply::text(reply);
        }
        match parse_lang(arg) {
            Some(new_lang) => {
                self.user_langs.insert(key, new_lang);
                let chosen = library.get(new_lang);
                Reply::text(format_with(
                    &chosen.commands.lang_set,
                    &[("name", &chosen.language_name)],
                ))
            }
            None => Reply::text(content.commands.lang_invalid.clone()),
        }
    }
}

/// Supported languages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lang {
    Zh,
    En,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::Zh, Lang::En];
}

/// Parse a short language tag into `Lang`.
pub fn parse_lang(s: &str) -> Option<Lang> {
    match s.to_lowercase().as_str() {
        "zh" => Some(Lang::Zh),
        "en" => Some(Lang::En),
        _ => None,
    }
}

/// Return the short tag for a Lang variant (e.g. Lang::En -> "en").
pub fn lang_tag(l: &Lang) -> &'static str {
    match l {
        Lang::Zh => "zh",
        Lang::En => "en",
    }
}

/// Determine the effective language for an update: the user's stored
/// preference, then the Telegram language code (or its two-letter prefix),
/// then `default`.
pub async fn effective_lang_from_parts(
    state: &SharedState,
    user_language_code: Option<&str>,
    user_id: Option<u64>,
    chat_id: i64,
    default: Lang,
) -> Lang {
    if let Some(uid) = user_id {
        let lock = state.read().await;
        if let Some(&l) = lock.user_langs.get(&(chat_id, uid)) {
            return l;
        }
    }
    if let Some(lang_code) = user_language_code {
        if let Some(parsed) = parse_lang(lang_code) {
            return parsed;
        }
        // locale-style codes such as "en-US"
        if let Some(prefix) = lang_code.get(..2) {
            if let Some(parsed) = parse_lang(prefix) {
                return parsed;
            }
        }
    }
    default
}

/// Bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "FunBox commands:")]
pub enum Command {
    #[command(description = "open the main menu")]
    Start,
    #[command(description = "show usage")]
    Help,
    #[command(description = "about this bot")]
    About,
    #[command(description = "show or switch the language, e.g. /lang en")]
    Lang(String),
}

async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> Result<()> {
    let mut req = bot.send_message(chat_id, reply.text);
    if let Some(menu) = reply.menu {
        req = req.reply_markup(menu.to_markup());
    }
    req.await?;
    Ok(())
}

/// Replace the pressed message in place, or send a new one when the
/// original is no longer accessible.
async fn edit_reply(bot: &Bot, q: &CallbackQuery, reply: Reply) -> Result<()> {
    let Some(msg) = q.message.as_ref().and_then(|m| m.regular_message()) else {
        return send_reply(bot, ChatId::from(q.from.id), reply).await;
    };
    let mut req = bot.edit_message_text(msg.chat.id, msg.id, reply.text);
    if let Some(menu) = reply.menu {
        req = req.reply_markup(menu.to_markup());
    }
    match req.await {
        // re-rendering an unchanged menu
        Ok(_) | Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: SharedState,
    config: SharedConfig,
    library: SharedLibrary,
) -> Result<()> {
    let user = msg.from.as_ref();
    let user_id = user.map(|u| u.id.0);
    let chat_id = msg.chat.id.0;
    let lang = effective_lang_from_parts(
        &state,
        user.and_then(|u| u.language_code.as_deref()),
        user_id,
        chat_id,
        config.default_lang,
    )
    .await;
    let content = library.get(lang);
    info!(chat_id, ?user_id, ?cmd, "command");

    let reply = match cmd {
        Command::Start => router::start_reply(content),
        Command::Help => router::help_reply(content),
        Command::About => router::about_reply(content),
        Command::Lang(arg) => match user_id {
            Some(uid) => state
                .write()
                .await
                .lang_command((chat_id, uid), &arg, lang, &library),
            None => Reply::text(content.commands.lang_invalid.clone()),
        },
    };
    send_reply(&bot, msg.chat.id, reply).await
}

async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: SharedState,
    config: SharedConfig,
    library: SharedLibrary,
) -> Result<()> {
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        warn!(user_id = q.from.id.0, "failed to answer callback query: {}", e);
    }
    match callback_reply(&q, &state, &config, &library).await {
        Some(reply) => edit_reply(&bot, &q, reply).await,
        None => Ok(()),
    }
}

/// Route a button press against shared state. `None` for queries that
/// carry no callback data.
pub async fn callback_reply(
    q: &CallbackQuery,
    state: &SharedState,
    config: &Config,
    library: &ContentLibrary,
) -> Option<Reply> {
    let Some(data) = q.data.as_deref() else {
        debug!("callback query without data");
        return None;
    };

    let user_id = q.from.id.0;
    let chat_id = q
        .message
        .as_ref()
        .and_then(|m| m.regular_message())
        .map(|m| m.chat.id.0)
        .unwrap_or(user_id as i64);
    let lang = effective_lang_from_parts(
        state,
        q.from.language_code.as_deref(),
        Some(user_id),
        chat_id,
        config.default_lang,
    )
    .await;
    let content = library.get(lang);

    let action = Action::parse(data);
    debug!(chat_id, user_id, action = %action, "callback");

    let mut lock = state.write().await;
    Some(lock.apply_action(
        (chat_id, user_id),
        &action,
        content,
        &mut rand::thread_rng(),
        SystemTime::now(),
    ))
}

/// Run the bot: load config and content packs, register commands and
/// dispatch updates until interrupted.
pub async fn run_bot() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("funbox_bot=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    let library = content::load_all_content(&config.content_dir)?;
    info!(
        default_lang = lang_tag(&config.default_lang),
        content_dir = %config.content_dir.display(),
        "configuration loaded"
    );

    let bot = Bot::new(&config.bot_token);
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("failed to register bot commands: {}", e);
    }

    let state: SharedState = Arc::new(RwLock::new(AppState::default()));
    let shared_config: SharedConfig = Arc::new(config);
    let library: SharedLibrary = Arc::new(library);

    let handler = dptree::entry()
        .branch(Update::filter_message().filter_command::<Command>().endpoint(
            |bot: Bot,
             msg: Message,
             cmd: Command,
             state: SharedState,
             config: SharedConfig,
             library: SharedLibrary| async move {
                if let Err(err) = handle_command(bot, msg, cmd, state, config, library).await {
                    error!("command handler error: {:?}", err);
                }
                respond(())
            },
        ))
        .branch(Update::filter_callback_query().endpoint(
            |bot: Bot,
             q: CallbackQuery,
             state: SharedState,
             config: SharedConfig,
             library: SharedLibrary| async move {
                if let Err(err) = handle_callback(bot, q, state, config, library).await {
                    error!("callback handler error: {:?}", err);
                }
                respond(())
            },
        ));

    info!("FunBox bot started");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state, shared_config, library])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
