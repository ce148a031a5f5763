//! Core type aliases, identity types, and constants for logomachy.
//!
//! This crate provides the foundational types and configuration parameters
//! used throughout the logomachy workspace.

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Points awarded per approved move and accumulated per participant.
pub type Points = i16;
/// Side index within a battle (0 or 1).
pub type Side = usize;
/// Per-battle monotonic move sequence number.
pub type Seq = i16;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
    /// Cast ID<T> to ID<U> while preserving the underlying UUID.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

// ============================================================================
// BATTLE PARAMETERS
// ============================================================================
/// Number of sides in a battle.
pub const SIDES: usize = 2;
/// Cards dealt to each side at the start of a battle.
pub const HAND_SIZE: usize = 7;
/// Per-move ceiling on awarded points. The judge owns the rubric; we only
/// clamp its total into [0, POINTS_CAP].
pub const POINTS_CAP: Points = 5;

// ============================================================================
// COORDINATION PARAMETERS
// ============================================================================
/// Upper bound on a single judge adjudication (seconds).
pub const JUDGE_TIMEOUT: u64 = 30;
/// Pause before an automated side takes its turn (seconds).
pub const AUTO_DELAY: u64 = 2;
/// Transient-failure retry budget for automated moves.
pub const AUTO_RETRIES: usize = 3;
/// Buffered events per battle broadcast channel. Laggards drop and refetch.
pub const BROADCAST_CAPACITY: usize = 64;

// ============================================================================
// SESSION DIRECTORY PARAMETERS
// ============================================================================
/// Characters in a human-shareable join code.
pub const CODE_LENGTH: usize = 6;
/// Collision retry budget when issuing a join code. Exhaustion is fatal.
pub const CODE_RETRIES: usize = 8;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

#[cfg(test)]
mod tests {
    use super::*;
    struct Marker;
    #[test]
    fn id_roundtrips_through_uuid() {
        let id = ID::<Marker>::default();
        assert_eq!(id, ID::from(uuid::Uuid::from(id)));
    }
    #[test]
    fn id_cast_preserves_inner() {
        struct Other;
        let id = ID::<Marker>::default();
        assert_eq!(id.inner(), id.cast::<Other>().inner());
    }
}
