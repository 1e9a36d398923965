/// Drag-and-drop reorder engine
///
/// Holds the working copy of a setlist's song sequence during a drag
/// gesture. The view renders the working order for immediate feedback; the
/// persisted sequence only changes on drop, as one whole-array write. On a
/// failed write the engine re-resolves from the store, so the view snaps
/// back to whatever is actually persisted.
use crate::error::{Result, SetlistError};
use cantor_core::{
    traits::DocumentStore,
    types::{SetlistId, SongId, UserId},
    CantorError,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Phase of the drag gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragState {
    /// No gesture active
    Idle,

    /// A song is being dragged; the working order already reflects the
    /// current hover position
    Dragging {
        /// The song being moved
        song_id: SongId,
        /// Index the song occupied when the drag started
        from: usize,
    },

    /// A drop is being written to the store. New drags are rejected until
    /// the write settles.
    Committing,
}

/// Reorder engine for one setlist
pub struct ReorderEngine<S> {
    store: Arc<S>,
    setlist_id: SetlistId,
    caller: UserId,
    /// Last order known to be persisted
    committed: Vec<SongId>,
    /// Order currently shown, including any in-flight drag preview
    working: Vec<SongId>,
    state: DragState,
    call_timeout: Duration,
}

impl<S: DocumentStore> ReorderEngine<S> {
    /// Create an engine over a setlist's current persisted order
    pub fn new(
        store: Arc<S>,
        setlist_id: SetlistId,
        caller: UserId,
        order: Vec<SongId>,
    ) -> Self {
        Self {
            store,
            setlist_id,
            caller,
            committed: order.clone(),
            working: order,
            state: DragState::Idle,
            call_timeout: crate::collection::DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Override the store-call deadline
    pub fn set_call_timeout(&mut self, timeout: Duration) {
        self.call_timeout = timeout;
    }

    /// Order currently shown
    pub fn order(&self) -> &[SongId] {
        &self.working
    }

    /// Current gesture phase
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Start dragging the song at `index`.
    ///
    /// Rejected while a previous drop is still committing, so overlapping
    /// gestures can never interleave their writes.
    pub fn begin_drag(&mut self, index: usize) -> Result<()> {
        match self.state {
            DragState::Committing => return Err(SetlistError::CommitInProgress),
            DragState::Dragging { .. } => return Err(SetlistError::DragInProgress),
            DragState::Idle => {}
        }

        let song_id = self
            .working
            .get(index)
            .cloned()
            .ok_or(SetlistError::IndexOutOfBounds {
                index,
                len: self.working.len(),
            })?;

        debug!(song = %song_id, from = index, "drag started");
        self.state = DragState::Dragging {
            song_id,
            from: index,
        };
        Ok(())
    }

    /// Move the dragged song to hover position `target`.
    ///
    /// Splices the working order so the view previews the result; targets
    /// past the end clamp to the last position.
    pub fn drag_over(&mut self, target: usize) -> Result<()> {
        let DragState::Dragging { ref song_id, .. } = self.state else {
            return Err(SetlistError::NoActiveDrag);
        };

        let current = self
            .working
            .iter()
            .position(|id| id == song_id)
            .ok_or(SetlistError::NoActiveDrag)?;

        let song_id = self.working.remove(current);
        let target = target.min(self.working.len());
        self.working.insert(target, song_id);
        Ok(())
    }

    /// Cancel the gesture and restore the last persisted order
    pub fn cancel_drag(&mut self) {
        if matches!(self.state, DragState::Dragging { .. }) {
            self.working.clone_from(&self.committed);
            self.state = DragState::Idle;
        }
    }

    /// Drop the dragged song at its current hover position.
    ///
    /// Dropping at the original position makes no store call at all. A
    /// moved drop writes the whole working order; if the write fails or
    /// times out, the engine re-resolves the persisted order and returns
    /// the error.
    pub async fn end_drag(&mut self) -> Result<()> {
        let DragState::Dragging { .. } = self.state else {
            return Err(SetlistError::NoActiveDrag);
        };

        if self.working == self.committed {
            debug!("drop at original position, nothing to write");
            self.state = DragState::Idle;
            return Ok(());
        }

        self.state = DragState::Committing;
        let result = self.write_working_order().await;
        self.state = DragState::Idle;

        match result {
            Ok(()) => {
                self.committed.clone_from(&self.working);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "reorder write failed, re-resolving persisted order");
                self.rollback().await;
                Err(e)
            }
        }
    }

    /// Insert a library song at `index`, persisting immediately.
    ///
    /// Already-present songs are left where they are (union semantics).
    pub async fn insert_from_pool(&mut self, song_id: SongId, index: usize) -> Result<()> {
        match self.state {
            DragState::Committing => return Err(SetlistError::CommitInProgress),
            DragState::Dragging { .. } => return Err(SetlistError::DragInProgress),
            DragState::Idle => {}
        }

        if self.working.contains(&song_id) {
            return Ok(());
        }

        let index = index.min(self.working.len());
        self.working.insert(index, song_id);

        self.state = DragState::Committing;
        let result = self.write_working_order().await;
        self.state = DragState::Idle;

        match result {
            Ok(()) => {
                self.committed.clone_from(&self.working);
                Ok(())
            }
            Err(e) => {
                self.rollback().await;
                Err(e)
            }
        }
    }

    async fn write_working_order(&self) -> Result<()> {
        let fut = self
            .store
            .set_song_ids(&self.setlist_id, &self.working, &self.caller);
        match tokio::time::timeout(self.call_timeout, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(SetlistError::Core(CantorError::Timeout(self.call_timeout))),
        }
    }

    /// Restore the working order from the store after a failed write.
    ///
    /// If the re-read itself fails, fall back to the last order this engine
    /// knew to be persisted.
    async fn rollback(&mut self) {
        match self.store.get_setlist(&self.setlist_id, &self.caller).await {
            Ok(Some(setlist)) => {
                self.committed = setlist.song_ids;
                self.working.clone_from(&self.committed);
            }
            Ok(None) | Err(_) => {
                self.working.clone_from(&self.committed);
            }
        }
    }
}
