use std::collections::VecDeque;

/// Issues variable indices for one scope
///
/// Player scopes churn constantly, so their allocators keep a FIFO queue of
/// indices freed by deletion and hand those back out, oldest first, before
/// minting a new one. The global scope is long-lived and low-churn; its
/// allocator only counts upward and deleted indices become permanent gaps.
/// The asymmetry is part of the observable contract.
#[derive(Debug, Clone)]
pub struct IndexAllocator {
    next: u32,
    free: Option<VecDeque<u32>>,
}

impl IndexAllocator {
    /// Allocator for the global scope: counts upward, never reuses
    ///
    /// Mints starting from 1, matching the counter the scripting side has
    /// always observed for global variables.
    pub fn monotonic() -> Self {
        Self {
            next: 1,
            free: None,
        }
    }

    /// Allocator for a player scope: recycles freed indices FIFO
    ///
    /// Mints starting from 0 on a fresh scope.
    pub fn recycling() -> Self {
        Self {
            next: 0,
            free: Some(VecDeque::new()),
        }
    }

    /// Issue an index
    ///
    /// A recycling allocator returns the oldest freed index if one is
    /// waiting; otherwise a fresh index is minted.
    pub fn acquire(&mut self) -> u32 {
        if let Some(free) = &mut self.free {
            if let Some(index) = free.pop_front() {
                return index;
            }
        }
        let index = self.next;
        self.next += 1;
        index
    }

    /// Return a deleted variable's index to the allocator
    ///
    /// On a monotonic allocator the index is discarded and stays a gap
    /// forever.
    pub fn release(&mut self, index: u32) {
        if let Some(free) = &mut self.free {
            free.push_back(index);
        }
    }

    /// One past the greatest index ever minted by this allocator
    ///
    /// This is the raw counter the free-queue-empty branch of the legacy
    /// upper-index query reports.
    pub fn watermark(&self) -> u32 {
        self.next
    }

    /// Whether a freed index is waiting for reuse
    pub fn has_free(&self) -> bool {
        self.free.as_ref().is_some_and(|q| !q.is_empty())
    }
}
