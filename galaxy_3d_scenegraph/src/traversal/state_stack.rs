/// StateStack - per-slot stacks of state bindings
///
/// Each slot nests independently. A slot is dirty when its active binding
/// changed since it was last recorded; `record` emits only dirty slots.

use std::sync::Arc;
use crate::error::{Error, Result};
use crate::node::StateCommand;
use crate::render::CommandList;

#[derive(Debug, Default)]
struct SlotStack {
    bindings: Vec<Arc<dyn StateCommand>>,
    dirty: bool,
}

/// Independent binding stacks for slots `0..max_slot`
#[derive(Debug)]
pub struct StateStack {
    slots: Vec<SlotStack>,
}

impl StateStack {
    pub fn new(max_slot: u32) -> Self {
        let mut slots = Vec::with_capacity(max_slot as usize);
        slots.resize_with(max_slot as usize, SlotStack::default);
        Self { slots }
    }

    /// Number of slots
    pub fn max_slot(&self) -> u32 {
        self.slots.len() as u32
    }

    fn slot_mut(&mut self, slot: u32) -> Result<&mut SlotStack> {
        let max_slot = self.max_slot();
        self.slots
            .get_mut(slot as usize)
            .ok_or(Error::SlotOutOfRange { slot, max_slot })
    }

    /// Make `binding` the active binding of `slot`, shadowing the previous one
    pub fn push(&mut self, slot: u32, binding: Arc<dyn StateCommand>) -> Result<()> {
        let stack = self.slot_mut(slot)?;
        stack.bindings.push(binding);
        stack.dirty = true;
        Ok(())
    }

    /// Restore the binding that was active before the last push on `slot`
    pub fn pop(&mut self, slot: u32) -> Result<()> {
        let stack = self.slot_mut(slot)?;
        if stack.bindings.pop().is_none() {
            return Err(Error::StateStackUnderflow { slot });
        }
        // With nothing left there is nothing to re-record.
        stack.dirty = !stack.bindings.is_empty();
        Ok(())
    }

    pub fn active_binding(&self, slot: u32) -> Result<Option<&Arc<dyn StateCommand>>> {
        self.slots
            .get(slot as usize)
            .map(|stack| stack.bindings.last())
            .ok_or(Error::SlotOutOfRange { slot, max_slot: self.max_slot() })
    }

    /// Depth of one slot's stack
    pub fn depth(&self, slot: u32) -> usize {
        self.slots.get(slot as usize).map_or(0, |stack| stack.bindings.len())
    }

    /// Sum of every slot's depth
    pub fn total_depth(&self) -> usize {
        self.slots.iter().map(|stack| stack.bindings.len()).sum()
    }

    pub fn is_dirty(&self) -> bool {
        self.slots.iter().any(|stack| stack.dirty)
    }

    /// Force every non-empty slot to be recorded again
    pub fn mark_all_dirty(&mut self) {
        for stack in &mut self.slots {
            stack.dirty = !stack.bindings.is_empty();
        }
    }

    /// Record the active binding of every dirty slot, lowest slot first
    ///
    /// Slots stay dirty if recording fails.
    pub fn record(&mut self, commands: &mut dyn CommandList) -> Result<()> {
        for stack in &mut self.slots {
            if !stack.dirty {
                continue;
            }
            if let Some(binding) = stack.bindings.last() {
                binding.record(commands)?;
            }
            stack.dirty = false;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "state_stack_tests.rs"]
mod tests;
