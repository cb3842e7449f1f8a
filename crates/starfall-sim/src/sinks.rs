//! Collaborator interfaces injected into the engine.
//!
//! The simulation never reaches for global handles: notifications, sound
//! cues and reward payouts all go through these traits.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::{info, trace};

use starfall_core::enums::ResourceKind;
use starfall_core::events::{AudioCue, Notice};

/// Fire-and-forget user-facing messages.
pub trait NotificationSink {
    fn notify(&mut self, notice: &Notice);
}

/// Fire-and-forget sound triggers. Must never block the simulation.
pub trait AudioCueSink {
    fn play(&mut self, cue: AudioCue);
}

/// Accumulator for kill rewards.
pub trait RewardLedger {
    fn add_resource(&mut self, kind: ResourceKind, amount: u64);
}

/// The full set of collaborators handed to the engine.
pub struct Collaborators {
    pub notifications: Box<dyn NotificationSink>,
    pub audio: Box<dyn AudioCueSink>,
    pub ledger: Box<dyn RewardLedger>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            notifications: Box::new(TracingSink),
            audio: Box::new(TracingSink),
            ledger: Box::new(Wallet::default()),
        }
    }
}

/// Writes notices and cues to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, notice: &Notice) {
        info!(%notice, "Notice");
    }
}

impl AudioCueSink for TracingSink {
    fn play(&mut self, cue: AudioCue) {
        trace!(?cue, "Audio cue");
    }
}

/// Shared, inspectable notice history. Clones observe the same log.
#[derive(Debug, Clone, Default)]
pub struct NoticeLog(Rc<RefCell<Vec<Notice>>>);

impl NoticeLog {
    pub fn notices(&self) -> Vec<Notice> {
        self.0.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl NotificationSink for NoticeLog {
    fn notify(&mut self, notice: &Notice) {
        self.0.borrow_mut().push(notice.clone());
    }
}

/// Shared, inspectable audio cue history.
#[derive(Debug, Clone, Default)]
pub struct CueLog(Rc<RefCell<Vec<AudioCue>>>);

impl CueLog {
    pub fn cues(&self) -> Vec<AudioCue> {
        self.0.borrow().clone()
    }

    pub fn count(&self, cue: AudioCue) -> usize {
        self.0.borrow().iter().filter(|c| **c == cue).count()
    }
}

impl AudioCueSink for CueLog {
    fn play(&mut self, cue: AudioCue) {
        self.0.borrow_mut().push(cue);
    }
}

/// In-memory resource balances. Clones share the same balances.
#[derive(Debug, Clone, Default)]
pub struct Wallet(Rc<RefCell<BTreeMap<ResourceKind, u64>>>);

impl Wallet {
    pub fn balance(&self, kind: ResourceKind) -> u64 {
        self.0.borrow().get(&kind).copied().unwrap_or(0)
    }
}

impl RewardLedger for Wallet {
    fn add_resource(&mut self, kind: ResourceKind, amount: u64) {
        let mut balances = self.0.borrow_mut();
        let balance = balances.entry(kind).or_insert(0);
        *balance = balance.saturating_add(amount);
    }
}
