use std::time::SystemTime;

/// Identity a session is scoped to: (chat id, user id).
pub type SessionKey = (i64, u64);

/// In-flight mini-game data for one conversation.
///
/// Each game owns its own slot, so starting one game never overwrites
/// another game's pending challenge. Answers read a slot without clearing
/// it: replaying an answer is idempotent until the next start.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Secret of the digit-guess game.
    pub pending_secret: Option<i32>,
    /// Number shown by the memory drill.
    pub pending_memory: Option<i32>,
    /// When the reaction timer's button was issued.
    pub reaction_issued_at: Option<SystemTime>,
}

impl SessionState {
    pub fn is_empty(&self) -> bool {
        self == &SessionState::default()
    }
}

/// Whole milliseconds from `issued_at` to `now`, truncated.
///
/// A clock that stepped backwards yields a negative count instead of an
/// error.
pub fn elapsed_millis(issued_at: SystemTime, now: SystemTime) -> i64 {
    match now.duration_since(issued_at) {
        Ok(d) => i64::try_from(d.as_millis()).unwrap_or(i64::MAX),
        Err(e) => i64::try_from(e.duration().as_millis())
            .map(|ms| -ms)
            .unwrap_or(i64::MIN),
    }
}
