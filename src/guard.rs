//! Single-slot guard for the one operation a session may run at a time.

use std::sync::atomic::{AtomicBool, Ordering};

/// Slot that at most one operation holds
#[derive(Debug, Default)]
pub struct OperationSlot {
    held: AtomicBool,
}

impl OperationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the slot, or `None` when another operation holds it
    ///
    /// The slot is released when the returned guard drops.
    pub fn try_acquire(&self) -> Option<OperationGuard<'_>> {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| OperationGuard { slot: self })
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

/// Proof of holding an [`OperationSlot`]
#[derive(Debug)]
#[must_use = "the slot is released as soon as the guard is dropped"]
pub struct OperationGuard<'a> {
    slot: &'a OperationSlot,
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        self.slot.held.store(false, Ordering::Release);
    }
}
