use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::error::CheckersError;
use crate::game::Match;
use crate::types::{GameState, Move, MoveResult, Position};

type MatchHandle = Arc<RwLock<Match>>;

/// Matches keyed by id.
///
/// Each match sits behind its own lock: submissions hold the write lock for
/// the whole validate-and-apply, reads hold the read lock while copying a
/// snapshot. Matches never share state.
pub struct Registry {
    matches: DashMap<String, MatchHandle>,
    /// Matches created and not yet removed; reserved before insertion so
    /// concurrent creators cannot overshoot `max_matches`.
    slots: AtomicUsize,
    config: RegistryConfig,
}

impl Registry {
    pub fn new(config: RegistryConfig) -> Result<Self, CheckersError> {
        config.validate()?;
        Ok(Self {
            matches: DashMap::new(),
            slots: AtomicUsize::new(0),
            config,
        })
    }

    /// Returns the current state of `match_id`, creating a fresh match on
    /// first sight.
    pub fn create_or_fetch(&self, match_id: &str) -> Result<GameState, CheckersError> {
        if let Some(handle) = self.handle(match_id) {
            return Ok(handle.read().to_game_state());
        }

        self.config.check_match_id(match_id)?;
        let handle = match self.matches.entry(match_id.to_owned()) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                self.reserve_slot()?;
                debug!(match_id, "match created");
                Arc::clone(entry.insert(Arc::new(RwLock::new(Match::new()))).value())
            }
        };
        let state = handle.read().to_game_state();
        Ok(state)
    }

    /// Drops `match_id`, returning its final state. Frees a creation slot.
    pub fn remove(&self, match_id: &str) -> Option<GameState> {
        let (_, handle) = self.matches.remove(match_id)?;
        self.slots.fetch_sub(1, Ordering::AcqRel);
        debug!(match_id, "match removed");
        let state = handle.read().to_game_state();
        Some(state)
    }

    /// Submits `from -> to` to an existing match.
    pub fn submit_move(
        &self,
        match_id: &str,
        from: Position,
        to: Position,
    ) -> Result<MoveResult, CheckersError> {
        let handle = self.handle(match_id).ok_or_else(|| CheckersError::NotFound {
            match_id: match_id.to_owned(),
        })?;

        let result = handle.write().submit_move(from, to);
        if let Err(err) = &result {
            warn!(match_id, %from, %to, error = %err, "move rejected");
        }
        result
    }

    pub fn legal_moves(&self, match_id: &str) -> Result<Vec<Move>, CheckersError> {
        let handle = self.handle(match_id).ok_or_else(|| CheckersError::NotFound {
            match_id: match_id.to_owned(),
        })?;
        let moves = handle.read().legal_moves();
        Ok(moves)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    fn reserve_slot(&self) -> Result<(), CheckersError> {
        let capacity = self.config.max_matches;
        self.slots
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |used| {
                (capacity == 0 || used < capacity).then_some(used + 1)
            })
            .map(|_| ())
            .map_err(|_| {
                warn!(capacity, "registry full");
                CheckersError::RegistryFull { capacity }
            })
    }

    // Clones the handle so no map shard guard is held while locking the match.
    fn handle(&self, match_id: &str) -> Option<MatchHandle> {
        self.matches.get(match_id).map(|entry| Arc::clone(entry.value()))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            matches: DashMap::new(),
            slots: AtomicUsize::new(0),
            config: RegistryConfig::default(),
        }
    }
}
