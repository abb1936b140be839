//! Handle table for sessions handed across the boundary.
//!
//! A handle packs `(generation << 16) | (slot + 1)`. Destroying a session bumps
//! its slot's generation, so a stale handle no longer resolves even after the
//! slot is reused. A slot whose generation is exhausted is retired instead of
//! wrapping. `0` never resolves.

use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;

use crate::error::EstimatorError;
use crate::session::ScoreSession;

pub const NULL_HANDLE: u32 = 0;

const SLOT_BITS: u32 = 16;
const SLOT_MASK: u32 = (1 << SLOT_BITS) - 1;
const MAX_SLOTS: usize = SLOT_MASK as usize;

static SESSIONS: Lazy<Mutex<HandleTable>> = Lazy::new(|| Mutex::new(HandleTable::default()));

#[derive(Default)]
struct Slot {
    generation: u16,
    session: Option<ScoreSession>,
}

#[derive(Default)]
pub struct HandleTable {
    slots: Vec<Slot>,
    free: Vec<usize>,
}

impl HandleTable {
    /// Stores a session. Returns `None` when every slot is taken.
    pub fn insert(&mut self, session: ScoreSession) -> Option<u32> {
        let index = match self.free.pop() {
            Some(index) => index,
            None if self.slots.len() < MAX_SLOTS => {
                self.slots.push(Slot::default());
                self.slots.len() - 1
            }
            None => return None,
        };

        let slot = &mut self.slots[index];
        slot.session = Some(session);
        Some(encode(index, slot.generation))
    }

    pub fn remove(&mut self, handle: u32) -> Result<ScoreSession, EstimatorError> {
        let index = self.resolve(handle)?;
        let slot = &mut self.slots[index];
        let session = slot.session.take().ok_or(EstimatorError::UnknownHandle(handle))?;
        match slot.generation.checked_add(1) {
            Some(next) => {
                slot.generation = next;
                self.free.push(index);
            }
            None => tracing::debug!(slot = index, "retired handle slot"),
        }
        Ok(session)
    }

    pub fn get(&self, handle: u32) -> Result<&ScoreSession, EstimatorError> {
        let index = self.resolve(handle)?;
        self.slots[index]
            .session
            .as_ref()
            .ok_or(EstimatorError::UnknownHandle(handle))
    }

    pub fn get_mut(&mut self, handle: u32) -> Result<&mut ScoreSession, EstimatorError> {
        let index = self.resolve(handle)?;
        self.slots[index]
            .session
            .as_mut()
            .ok_or(EstimatorError::UnknownHandle(handle))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.session.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn resolve(&self, handle: u32) -> Result<usize, EstimatorError> {
        let (index, generation) = decode(handle).ok_or(EstimatorError::UnknownHandle(handle))?;
        match self.slots.get(index) {
            Some(slot) if slot.generation == generation => Ok(index),
            _ => Err(EstimatorError::UnknownHandle(handle)),
        }
    }
}

fn encode(index: usize, generation: u16) -> u32 {
    (u32::from(generation) << SLOT_BITS) | (index as u32 + 1)
}

fn decode(handle: u32) -> Option<(usize, u16)> {
    let slot = handle & SLOT_MASK;
    if slot == 0 {
        return None;
    }
    Some(((slot - 1) as usize, (handle >> SLOT_BITS) as u16))
}

fn table() -> MutexGuard<'static, HandleTable> {
    SESSIONS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registers a session in the process-wide table.
pub fn register(session: ScoreSession) -> u32 {
    match table().insert(session) {
        Some(handle) => handle,
        None => {
            tracing::warn!(max_slots = MAX_SLOTS, "handle table full");
            NULL_HANDLE
        }
    }
}

pub fn release(handle: u32) -> Result<(), EstimatorError> {
    table().remove(handle).map(drop)
}

pub fn with_session<R>(handle: u32, f: impl FnOnce(&ScoreSession) -> R) -> Result<R, EstimatorError> {
    let table = table();
    table.get(handle).map(f)
}

pub fn with_session_mut<R>(
    handle: u32,
    f: impl FnOnce(&mut ScoreSession) -> R,
) -> Result<R, EstimatorError> {
    let mut table = table();
    table.get_mut(handle).map(f)
}
