//! Buffer manager: a list of managed buffers, exactly one of which is current.

use crate::buffer::Buffer;
use crate::change::ChangeTracker;
use crate::error::{TextError, TextResult};

/// One text buffer paired with the change tracker that exclusively owns its
/// undo history. Named buffers are addressable and persistent for the life
/// of the session; scratch buffers are temporary and unnamed.
pub struct ManagedBuffer {
    pub id: u64,
    pub name: Option<String>,
    pub buffer: Buffer,
    pub tracker: ChangeTracker,
}

pub struct BufferManager {
    buffers: Vec<ManagedBuffer>,
    current: usize,
    next_id: u64,
    max_sequences: usize,
    max_bytes: usize,
}

impl BufferManager {
    pub fn new(max_sequences: usize, max_bytes: usize) -> Self {
        let mut mgr = Self {
            buffers: Vec::new(),
            current: 0,
            next_id: 0,
            max_sequences,
            max_bytes,
        };
        mgr.create_scratch();
        mgr
    }

    fn fresh_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn index_of_id(&self, id: u64) -> Option<usize> {
        self.buffers.iter().position(|b| b.id == id)
    }

    fn index_of_name(&self, name: &str) -> Option<usize> {
        self.buffers.iter().position(|b| b.name.as_deref() == Some(name))
    }

    pub fn create_named(&mut self, name: impl Into<String>) -> TextResult<u64> {
        let name = name.into();
        if self.index_of_name(&name).is_some() {
            return Err(TextError::NameExists(name));
        }
        let id = self.fresh_id();
        let had_none = self.buffers.is_empty();
        self.buffers.push(ManagedBuffer {
            id,
            name: Some(name),
            buffer: Buffer::new(),
            tracker: ChangeTracker::new(self.max_sequences, self.max_bytes),
        });
        if had_none {
            self.current = self.buffers.len() - 1;
        }
        Ok(id)
    }

    pub fn create_scratch(&mut self) -> u64 {
        let id = self.fresh_id();
        let had_none = self.buffers.is_empty();
        self.buffers.push(ManagedBuffer {
            id,
            name: None,
            buffer: Buffer::new(),
            tracker: ChangeTracker::new(self.max_sequences, self.max_bytes),
        });
        if had_none {
            self.current = self.buffers.len() - 1;
        }
        id
    }

    /// Deletes the buffer with `id`. Switches the current pointer away if it
    /// pointed at the deleted buffer; if none remain, creates a replacement
    /// scratch buffer so the manager is never left empty.
    pub fn delete(&mut self, id: u64) -> TextResult<()> {
        let idx = self.index_of_id(id).ok_or(TextError::IdNotFound(id))?;
        let was_current = idx == self.current;
        self.buffers.remove(idx);
        if self.buffers.is_empty() {
            self.create_scratch();
            self.current = 0;
            return Ok(());
        }
        if was_current {
            self.current = idx.min(self.buffers.len() - 1);
        } else if idx < self.current {
            self.current -= 1;
        }
        Ok(())
    }

    pub fn rename(&mut self, id: u64, name: impl Into<String>) -> TextResult<()> {
        let name = name.into();
        if self.index_of_name(&name).is_some() {
            return Err(TextError::NameExists(name));
        }
        let idx = self.index_of_id(id).ok_or(TextError::IdNotFound(id))?;
        self.buffers[idx].name = Some(name);
        Ok(())
    }

    pub fn switch_to_id(&mut self, id: u64) -> TextResult<()> {
        self.current = self.index_of_id(id).ok_or(TextError::IdNotFound(id))?;
        Ok(())
    }

    pub fn switch_to_name(&mut self, name: &str) -> TextResult<()> {
        self.current = self
            .index_of_name(name)
            .ok_or_else(|| TextError::NameNotFound(name.to_string()))?;
        Ok(())
    }

    /// Buffer ids in insertion order.
    pub fn list(&self) -> Vec<u64> {
        self.buffers.iter().map(|b| b.id).collect()
    }

    pub fn current(&self) -> &ManagedBuffer {
        &self.buffers[self.current]
    }

    pub fn current_mut(&mut self) -> &mut ManagedBuffer {
        &mut self.buffers[self.current]
    }

    pub fn current_id(&self) -> u64 {
        self.buffers[self.current].id
    }

    pub fn get(&self, id: u64) -> Option<&ManagedBuffer> {
        self.index_of_id(id).map(|i| &self.buffers[i])
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut ManagedBuffer> {
        self.index_of_id(id).map(move |i| &mut self.buffers[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_scratch_buffer() {
        let mgr = BufferManager::new(100, 1 << 20);
        assert_eq!(mgr.list().len(), 1);
        assert!(mgr.current().name.is_none());
    }

    #[test]
    fn create_named_rejects_duplicate() {
        let mut mgr = BufferManager::new(100, 1 << 20);
        mgr.create_named("main").unwrap();
        assert!(matches!(mgr.create_named("main"), Err(TextError::NameExists(_))));
    }

    #[test]
    fn deleting_current_switches_to_another() {
        let mut mgr = BufferManager::new(100, 1 << 20);
        let first = mgr.current_id();
        let second = mgr.create_scratch();
        mgr.switch_to_id(second).unwrap();
        mgr.delete(second).unwrap();
        assert_eq!(mgr.current_id(), first);
    }

    #[test]
    fn deleting_last_buffer_creates_replacement_scratch() {
        let mut mgr = BufferManager::new(100, 1 << 20);
        let only = mgr.current_id();
        mgr.delete(only).unwrap();
        assert_eq!(mgr.list().len(), 1);
        assert_ne!(mgr.current_id(), only);
    }

    #[test]
    fn rename_promotes_scratch_to_named() {
        let mut mgr = BufferManager::new(100, 1 << 20);
        let id = mgr.current_id();
        mgr.rename(id, "scripts").unwrap();
        assert_eq!(mgr.get(id).unwrap().name.as_deref(), Some("scripts"));
        mgr.switch_to_name("scripts").unwrap();
        assert_eq!(mgr.current_id(), id);
    }

    #[test]
    fn list_preserves_insertion_order() {
        let mut mgr = BufferManager::new(100, 1 << 20);
        let a = mgr.current_id();
        let b = mgr.create_scratch();
        let c = mgr.create_scratch();
        assert_eq!(mgr.list(), vec![a, b, c]);
    }
}
