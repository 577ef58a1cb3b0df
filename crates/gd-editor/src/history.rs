//! Undo/redo over full canvas snapshots.
//!
//! The undo stack holds every retained snapshot with the current state on
//! top; the redo stack holds undone snapshots, most recently undone on top.
//! Restoring is delegated to a caller-supplied closure and the stacks only
//! move once that closure succeeds, so a corrupt snapshot leaves history
//! exactly as it was.
//!
//! Recording is debounced by the session: bursts of scene events re-arm a
//! single `Debouncer`, and one snapshot is taken once input settles.

use crate::error::EditorError;
use std::collections::VecDeque;

pub struct History {
    undo: VecDeque<String>,
    redo: Vec<String>,
    /// Maximum retained snapshots, current one included.
    max_depth: usize,
    /// Whether a state below the current one is retained.
    undo_available: bool,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo: VecDeque::with_capacity(max_depth.max(1)),
            redo: Vec::new(),
            max_depth: max_depth.max(1),
            undo_available: false,
        }
    }

    /// Reset to a single floor entry. Called after surface creation and
    /// after a project load.
    pub fn initialize(&mut self, snapshot: String) {
        self.undo.clear();
        self.redo.clear();
        self.undo.push_back(snapshot);
        self.undo_available = false;
        log::debug!("history initialized");
    }

    /// Push a new state. Identical consecutive snapshots are skipped.
    /// Returns whether anything was recorded.
    pub fn record(&mut self, snapshot: String) -> bool {
        if self.undo.back() == Some(&snapshot) {
            log::trace!("history record skipped: unchanged");
            return false;
        }
        self.undo.push_back(snapshot);
        while self.undo.len() > self.max_depth {
            // Oldest entry falls off; the next one becomes the floor.
            self.undo.pop_front();
        }
        self.redo.clear();
        self.undo_available = self.undo.len() > 1;
        log::debug!("history recorded ({} entries)", self.undo.len());
        true
    }

    /// Restore the previous state through `restore`, then move the current
    /// state onto the redo stack.
    pub fn undo_with(
        &mut self,
        restore: impl FnOnce(&str) -> Result<(), EditorError>,
    ) -> Result<(), EditorError> {
        if !self.undo_available {
            return Err(EditorError::NothingToUndo);
        }
        let previous = self
            .undo
            .len()
            .checked_sub(2)
            .and_then(|i| self.undo.get(i))
            .ok_or(EditorError::NothingToUndo)?;
        restore(previous)?;

        if let Some(current) = self.undo.pop_back() {
            self.redo.push(current);
        }
        self.undo_available = self.undo.len() > 1;
        log::debug!("undo ({} undo / {} redo)", self.undo.len(), self.redo.len());
        Ok(())
    }

    /// Restore the most recently undone state through `restore`, then make
    /// it current again.
    pub fn redo_with(
        &mut self,
        restore: impl FnOnce(&str) -> Result<(), EditorError>,
    ) -> Result<(), EditorError> {
        let next = self.redo.last().ok_or(EditorError::NothingToRedo)?;
        restore(next)?;

        if let Some(next) = self.redo.pop() {
            self.undo.push_back(next);
            while self.undo.len() > self.max_depth {
                self.undo.pop_front();
            }
        }
        self.undo_available = self.undo.len() > 1;
        log::debug!("redo ({} undo / {} redo)", self.undo.len(), self.redo.len());
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.undo_available
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// The snapshot the scene should currently match.
    pub fn current(&self) -> Option<&str> {
        self.undo.back().map(String::as_str)
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}

// ─── Debouncer ───────────────────────────────────────────────────────────

/// Single-slot delayed task. Every trigger pushes the deadline out; the
/// task fires once after `window_ms` of quiet.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window_ms: f64,
    deadline: Option<f64>,
}

impl Debouncer {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms: window_ms.max(0.0),
            deadline: None,
        }
    }

    /// (Re)arm the timer.
    pub fn trigger(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.window_ms);
    }

    /// True exactly once when the quiet window has elapsed.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Disarm, returning whether a task was pending. Used to run a pending
    /// task early.
    pub fn take_pending(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }
}

// ─── Restore guard ───────────────────────────────────────────────────────

/// Non-reentrant flag held while a snapshot is being restored. Scene
/// events raised in that window are not recorded.
#[derive(Debug, Default)]
pub struct RestoreGuard {
    active: bool,
}

impl RestoreGuard {
    pub fn begin(&mut self) -> Result<(), EditorError> {
        if self.active {
            return Err(EditorError::RestoreInProgress);
        }
        self.active = true;
        Ok(())
    }

    pub fn end(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restore_into(target: &mut String) -> impl FnOnce(&str) -> Result<(), EditorError> + '_ {
        move |snap| {
            *target = snap.to_owned();
            Ok(())
        }
    }

    #[test]
    fn floor_cannot_be_undone() {
        let mut history = History::new(50);
        history.initialize("s0".into());
        let mut scene = String::new();
        assert!(matches!(
            history.undo_with(restore_into(&mut scene)),
            Err(EditorError::NothingToUndo)
        ));
        assert!(scene.is_empty());
    }

    #[test]
    fn undo_redo_walks_the_stacks() {
        let mut history = History::new(50);
        history.initialize("s0".into());
        assert!(history.record("s1".into()));
        assert!(history.record("s2".into()));
        assert!(!history.record("s2".into()), "identical snapshot skipped");

        let mut scene = String::new();
        history.undo_with(restore_into(&mut scene)).unwrap();
        assert_eq!(scene, "s1");
        history.undo_with(restore_into(&mut scene)).unwrap();
        assert_eq!(scene, "s0");
        assert!(!history.can_undo());
        assert_eq!(history.redo_depth(), 2);

        history.redo_with(restore_into(&mut scene)).unwrap();
        assert_eq!(scene, "s1");
        assert_eq!(history.current(), Some("s1"));
        assert!(history.can_undo());

        // A new record discards the remaining redo state.
        history.record("s3".into());
        assert!(!history.can_redo());
        assert!(matches!(
            history.redo_with(restore_into(&mut scene)),
            Err(EditorError::NothingToRedo)
        ));
    }

    #[test]
    fn failed_restore_leaves_stacks_alone() {
        let mut history = History::new(50);
        history.initialize("s0".into());
        history.record("s1".into());
        let err = history.undo_with(|_| Err(EditorError::RestoreInProgress));
        assert!(err.is_err());
        assert_eq!(history.current(), Some("s1"));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn cap_drops_oldest_but_keeps_a_floor() {
        let mut history = History::new(3);
        history.initialize("s0".into());
        for s in ["s1", "s2", "s3", "s4"] {
            history.record(s.into());
        }
        assert_eq!(history.undo_depth(), 3);

        let mut scene = String::new();
        history.undo_with(restore_into(&mut scene)).unwrap();
        history.undo_with(restore_into(&mut scene)).unwrap();
        assert_eq!(scene, "s2");
        assert!(!history.can_undo());
    }

    #[test]
    fn debouncer_coalesces_bursts() {
        let mut d = Debouncer::new(300.0);
        d.trigger(0.0);
        d.trigger(100.0);
        d.trigger(250.0);
        assert!(!d.poll(500.0));
        assert!(d.poll(550.0));
        assert!(!d.poll(1000.0), "fires once");

        d.trigger(0.0);
        assert!(d.take_pending());
        assert!(!d.is_pending());
    }

    #[test]
    fn guard_is_not_reentrant() {
        let mut guard = RestoreGuard::default();
        guard.begin().unwrap();
        assert!(matches!(guard.begin(), Err(EditorError::RestoreInProgress)));
        guard.end();
        assert!(guard.begin().is_ok());
    }
}
