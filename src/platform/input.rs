//! Pointer tracking
//!
//! Input events may arrive from a different context than the frame tick, so
//! the map sits behind a mutex and the tick only ever sees whole snapshots.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use glam::Vec2;

use super::PointerSource;
use crate::sim::Pointer;

/// Pointer id used for the mouse (touches use their platform identifiers)
pub const MOUSE_POINTER_ID: i64 = -1;

/// Last-known position of every active pointer, keyed by id.
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    pointers: Arc<Mutex<BTreeMap<i64, Vec2>>>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_map<R>(&self, f: impl FnOnce(&mut BTreeMap<i64, Vec2>) -> R) -> R {
        // Entries are plain coordinates; a poisoned lock is still usable
        let mut map = self.pointers.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut map)
    }

    /// Pointer went down (mouse button / touch start)
    pub fn press(&self, id: i64, x: f32, y: f32) {
        self.with_map(|map| {
            map.insert(id, Vec2::new(x, y));
        });
    }

    /// Pointer moved. Mouse moves register even without a press, matching
    /// hover-to-steer on desktop.
    pub fn moved(&self, id: i64, x: f32, y: f32) {
        self.with_map(|map| {
            map.insert(id, Vec2::new(x, y));
        });
    }

    /// Pointer lifted or cancelled
    pub fn release(&self, id: i64) {
        self.with_map(|map| {
            map.remove(&id);
        });
    }

    /// Forget every pointer (focus loss)
    pub fn clear(&self) {
        self.with_map(|map| map.clear());
    }

    pub fn len(&self) -> usize {
        self.with_map(|map| map.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PointerSource for PointerTracker {
    fn active_pointers(&self) -> Vec<Pointer> {
        self.with_map(|map| {
            map.iter()
                .map(|(&id, &pos)| Pointer { id, pos })
                .collect()
        })
    }
}

/// Fixed pointer list (scripted input, tests)
impl PointerSource for Vec<Pointer> {
    fn active_pointers(&self) -> Vec<Pointer> {
        self.clone()
    }
}
