//! Node pool
//! ---------
//!
//! Every [`PathNode`] lives in a slot of a `NodePool`. Slots are constructed
//! once and then recycled: `take` hands out a blank node, `release` clears it
//! and puts the slot back. Free slots sit on a stack of indices, so both
//! operations are O(1) and a `take` immediately followed by a `release` leaves
//! the pool exactly as it was.
//!
//! When no slot is free the pool grows by a multiplicative factor (1.7 by
//! default). Growth only appends slots; indices of existing slots and the
//! handles already issued for them stay valid.

use tracing::debug;

use crate::config::{HierarchyConfig, DEFAULT_GROWTH_FACTOR};
use crate::node::{NodeId, PathNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Free,
    Used,
}

#[derive(Debug)]
struct Slot {
    node: PathNode,
    generation: u32,
    state: SlotState,
}

/// Free/used accounting of a pool at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PoolStats {
    pub capacity: usize,
    pub used: usize,
    pub free: usize,
    /// Number of times the pool had to grow since it was created.
    pub grow_count: usize,
}

#[derive(Debug)]
pub struct NodePool {
    slots: Vec<Slot>,
    /// Free slot indices; the next `take` pops from the end.
    free: Vec<u32>,
    used: usize,
    growth_factor: f64,
    grow_count: usize,
}

impl Default for NodePool {
    fn default() -> Self {
        NodePool::new(0, DEFAULT_GROWTH_FACTOR)
    }
}

impl NodePool {
    /// Creates a pool with `capacity` blank slots.
    ///
    /// `growth_factor` must be greater than 1; see [`HierarchyConfig::validate`].
    ///
    /// # Panics
    ///
    /// If `growth_factor` is not finite or not above 1.
    pub fn new(capacity: usize, growth_factor: f64) -> Self {
        assert!(
            growth_factor.is_finite() && growth_factor > 1.0,
            "pool growth factor must be above 1, got {growth_factor}"
        );
        let mut pool = NodePool {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            used: 0,
            growth_factor,
            grow_count: 0,
        };
        pool.extend_to(capacity);
        pool
    }

    pub fn with_config(config: &HierarchyConfig) -> Self {
        NodePool::new(config.initial_capacity, config.growth_factor)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn free(&self) -> usize {
        self.free.len()
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            capacity: self.capacity(),
            used: self.used,
            free: self.free.len(),
            grow_count: self.grow_count,
        }
    }

    /// Hands out a blank node, growing the pool if every slot is in use.
    pub fn take(&mut self) -> NodeId {
        if self.free.is_empty() {
            self.grow();
        }
        let index = match self.free.pop() {
            Some(index) => index,
            None => unreachable!("pool grew but has no free slot"),
        };
        let slot = &mut self.slots[index as usize];
        debug_assert_eq!(slot.state, SlotState::Free);
        slot.node.clear();
        slot.state = SlotState::Used;
        self.used += 1;
        NodeId {
            index,
            generation: slot.generation,
        }
    }

    /// Clears the node behind `id` and marks its slot free.
    ///
    /// # Panics
    ///
    /// If `id` does not name a slot currently in use: out of range, already
    /// released, or issued before an earlier release of the same slot.
    pub fn release(&mut self, id: NodeId) {
        let capacity = self.slots.len();
        let slot = match self.slots.get_mut(id.index as usize) {
            Some(slot) => slot,
            None => panic!("release of node {id} outside a pool of {capacity} slots"),
        };
        assert!(
            slot.state == SlotState::Used,
            "release of node {id} whose slot is already free"
        );
        assert!(
            slot.generation == id.generation,
            "release of stale node {id}, slot is at generation {}",
            slot.generation
        );
        slot.node.clear();
        slot.state = SlotState::Free;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.used -= 1;
    }

    /// Makes sure `additional` more `take` calls succeed without growing.
    pub fn grow_to_contain(&mut self, additional: usize) {
        while self.free.len() < additional {
            self.grow();
        }
    }

    /// Restarts allocation at slot 0.
    ///
    /// After a bulk release the free stack holds indices in release order;
    /// this rebuilds it so the next cycle hands out free slots in ascending
    /// index order.
    pub fn reset_item_pointers(&mut self) {
        self.free.clear();
        self.free.extend(
            self.slots
                .iter()
                .enumerate()
                .rev()
                .filter(|(_, slot)| slot.state == SlotState::Free)
                .map(|(index, _)| index as u32),
        );
        debug_assert_eq!(self.free.len() + self.used, self.slots.len());
    }

    /// Whether `id` names a slot that is in use at the handle's generation.
    pub fn contains(&self, id: NodeId) -> bool {
        self.slots
            .get(id.index as usize)
            .map_or(false, |slot| {
                slot.state == SlotState::Used && slot.generation == id.generation
            })
    }

    pub fn try_get(&self, id: NodeId) -> Option<&PathNode> {
        if self.contains(id) {
            Some(&self.slots[id.index as usize].node)
        } else {
            None
        }
    }

    /// # Panics
    ///
    /// If `id` is stale or was never issued by this pool.
    pub fn get(&self, id: NodeId) -> &PathNode {
        match self.try_get(id) {
            Some(node) => node,
            None => panic!("node {id} is not live in this pool"),
        }
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut PathNode {
        assert!(self.contains(id), "node {id} is not live in this pool");
        &mut self.slots[id.index as usize].node
    }

    fn grow(&mut self) {
        let capacity = self.slots.len();
        let grown = (capacity as f64 * self.growth_factor).ceil() as usize;
        let target = grown.max(capacity + 1);
        debug!(from = capacity, to = target, "growing node pool");
        self.extend_to(target);
        self.grow_count += 1;
    }

    /// Appends blank slots up to `target`, lowest new index on top of the
    /// free stack.
    fn extend_to(&mut self, target: usize) {
        let start = self.slots.len();
        if target <= start {
            return;
        }
        assert!(target <= u32::MAX as usize, "node pool exceeds u32 slots");
        self.slots.reserve(target - start);
        for _ in start..target {
            self.slots.push(Slot {
                node: PathNode::blank(),
                generation: 0,
                state: SlotState::Free,
            });
        }
        // New slots go underneath whatever is already free so recently
        // released slots are reused first.
        let mut fresh: Vec<u32> = (start as u32..target as u32).rev().collect();
        fresh.extend_from_slice(&self.free);
        self.free = fresh;
    }
}
