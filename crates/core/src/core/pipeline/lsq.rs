//! Load/Store Queue and single-entry store buffer.
//!
//! Unlike the ALU Issue Queue, entry selection here cannot use a plain
//! first-ready scan: a load must never execute ahead of an older store whose
//! address is still unknown, since that store might alias it. Each cycle we
//! compute a left-to-right prefix-OR hazard vector (`hazard[i]` is true once
//! any older entry is a store with an unresolved address) and pick the oldest
//! entry that is both ready and hazard-free — a left-preferring pairwise
//! reduction over the hazard-gated ready vector, not the queue's generic
//! first-match `choose()`.
//!
//! As with the ALU Issue Queue, a chosen entry is marked `issued` rather than
//! removed: it leaves the queue only when Commit retires it.

use crate::common::constants::LSQ_DEPTH;
use crate::common::queue::CircularQueue;
use crate::core::maptable::PhysReg;
use crate::core::pipeline::activelist::ActiveListTag;
use crate::isa::decode::MemWidth;

/// One Load/Store Queue entry.
#[derive(Debug, Clone, Copy)]
pub struct LsqEntry {
    /// Active List tag of the instruction this entry serves.
    pub tag: ActiveListTag,
    /// Load (`true`) or store (`false`).
    pub is_load: bool,
    /// Access width.
    pub width: MemWidth,
    /// Physical register holding the address base (`rs1`).
    pub base: PhysReg,
    /// Physical register holding store data (`rs2`), meaningful for stores.
    pub data_src: PhysReg,
    /// Sign-extended address-offset immediate.
    pub imm: i32,
    /// Effective address, filled in once `rs1 + imm` has been computed.
    pub addr: Option<u32>,
    /// Store data, filled in at the same time as `addr` for stores.
    pub store_data: Option<u32>,
    /// Destination physical register, meaningful for loads.
    pub dest: PhysReg,
    /// Set once this entry has been handed to the LSU (a load, via
    /// [`Lsq::choose_issue`]) or signaled ready to commit (a store, via
    /// [`Lsq::ready_store`]), so it isn't selected again while it waits in
    /// the queue for Commit to retire it.
    pub issued: bool,
}

/// An entry that has left the LSQ proper and is waiting to drain to data memory.
#[derive(Debug, Clone, Copy)]
pub struct StoreBufferEntry {
    pub addr: u32,
    pub data: u32,
    pub width: MemWidth,
}

/// Load/Store Queue plus its single-entry store buffer.
#[derive(Debug, Clone, Default)]
pub struct Lsq {
    queue: CircularQueue<LsqEntry, LSQ_DEPTH>,
    store_buffer: Option<StoreBufferEntry>,
}

impl Lsq {
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: CircularQueue::new(),
            store_buffer: None,
        }
    }

    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.queue.is_full()
    }

    /// Dispatches a new entry (called from rename), address not yet known.
    pub fn dispatch(&mut self, entry: LsqEntry) -> Option<usize> {
        self.queue.push(entry)
    }

    /// Records the computed effective address (and, for a store, its data),
    /// once the LSU's address-generation adder has produced it.
    pub fn set_address(&mut self, tag: ActiveListTag, addr: u32, store_data: Option<u32>) {
        if let Some(entry) = self.queue.slot_mut(tag) {
            entry.addr = Some(addr);
            entry.store_data = store_data;
        }
    }

    /// Finds the oldest entry still missing its address whose base register
    /// (and, for a store, data register) is ready, computes `base + imm`
    /// through the LSU's adder, and records it. Returns the entry's tag.
    pub fn generate_address(
        &mut self,
        is_ready: impl Fn(PhysReg) -> bool,
        read: impl Fn(PhysReg) -> u32,
    ) -> Option<ActiveListTag> {
        let slot = self
            .queue
            .iter_valid()
            .find(|(_, _, e)| {
                e.addr.is_none() && is_ready(e.base) && (e.is_load || is_ready(e.data_src))
            })
            .map(|(_, slot, _)| slot)?;

        let (base, data_src, imm, is_load) = {
            let e = self.queue.slot(slot)?;
            (e.base, e.data_src, e.imm, e.is_load)
        };
        let addr = read(base).wrapping_add(imm as u32);
        let data = (!is_load).then(|| read(data_src));
        if let Some(e) = self.queue.slot_mut(slot) {
            e.addr = Some(addr);
            e.store_data = data;
        }
        Some(slot)
    }

    /// Selects the oldest not-yet-issued load ready to access memory this
    /// cycle: its address is known, and no older store with an unresolved
    /// address precedes it (that store might alias it). Stores never come
    /// from here — their readiness is signaled separately, via
    /// [`Lsq::ready_store`] — but an older store still blocks younger loads
    /// until its own address resolves, via the hazard prefix below.
    ///
    /// The selected load is marked `issued` but stays queued: it is only
    /// removed once Commit retires it, via [`Lsq::retire_head`].
    pub fn choose_issue(&mut self) -> Option<LsqEntry> {
        let entries: Vec<(usize, LsqEntry)> =
            self.queue.iter_valid().map(|(_, slot, e)| (slot, *e)).collect();

        let mut hazard = false;
        let mut selected = None;
        for (slot, entry) in &entries {
            let ready = entry.is_load && !entry.issued && entry.addr.is_some() && !hazard;
            if ready && selected.is_none() {
                selected = Some(*slot);
            }
            if !entry.is_load && entry.addr.is_none() {
                hazard = true;
            }
        }

        let slot = selected?;
        if let Some(e) = self.queue.slot_mut(slot) {
            e.issued = true;
        }
        self.queue.slot(slot).copied()
    }

    /// Signals Active List readiness for the oldest not-yet-signaled store
    /// whose address and data are both known. This only marks the
    /// instruction ready to commit; the store does not touch memory yet and
    /// stays queued — the actual move into the store buffer happens only
    /// once Commit retires it, via [`Lsq::retire_head`].
    pub fn ready_store(&mut self) -> Option<ActiveListTag> {
        let slot = self
            .queue
            .iter_valid()
            .find(|(_, _, e)| !e.is_load && !e.issued && e.addr.is_some())
            .map(|(_, slot, _)| slot)?;
        let tag = self.queue.slot(slot)?.tag;
        if let Some(e) = self.queue.slot_mut(slot) {
            e.issued = true;
        }
        Some(tag)
    }

    /// Whether the single-entry store buffer is currently occupied.
    #[must_use]
    pub const fn store_buffer_full(&self) -> bool {
        self.store_buffer.is_some()
    }

    /// Called from Commit when it retires a load or a store: pops the LSQ
    /// head, which — since in-order retirement guarantees every older memory
    /// op has already left the queue — must be this very instruction's
    /// entry. A popped store feeds the store buffer (the caller must have
    /// already checked [`Lsq::store_buffer_full`]); this is the only path by
    /// which a store becomes architecturally visible, keeping it past the
    /// commit point. A popped load is simply discarded.
    pub fn retire_head(&mut self) -> Option<LsqEntry> {
        let entry = self.queue.pop()?;
        if !entry.is_load {
            self.store_buffer = Some(StoreBufferEntry {
                addr: entry.addr.unwrap_or(0),
                data: entry.store_data.unwrap_or(0),
                width: entry.width,
            });
        }
        Some(entry)
    }

    /// Drains the store buffer to data memory, one entry per cycle, freeing it
    /// for the next store the queue selects.
    pub fn drain_store_buffer(&mut self) -> Option<StoreBufferEntry> {
        self.store_buffer.take()
    }

    /// Discards every queued entry and the store buffer (flush).
    pub fn flush(&mut self) {
        self.queue.clear();
        self.store_buffer = None;
    }

    /// Discards queued entries only. A store already in the store buffer has
    /// passed its architectural commit point and must still reach memory, so
    /// a structural flush at commit clears the queue but leaves it alone.
    pub fn flush_queue(&mut self) {
        self.queue.clear();
    }
}
