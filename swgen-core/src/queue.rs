use std::collections::{HashSet, VecDeque};

use crate::reflect::TypeInfo;

/// A type whose definition was referenced but not built yet.
#[derive(Debug, Clone)]
pub struct DeferredEntry {
    pub identity: String,
    pub info: TypeInfo,
}

/// FIFO of pending definitions, holding each identity at most once.
#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    pending: VecDeque<DeferredEntry>,
    queued: HashSet<String>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `info` unless its identity is already waiting. Returns whether
    /// it was added.
    pub fn enqueue(&mut self, info: TypeInfo) -> bool {
        if !self.queued.insert(info.identity.clone()) {
            return false;
        }
        self.pending.push_back(DeferredEntry {
            identity: info.identity.clone(),
            info,
        });
        true
    }

    pub fn pop(&mut self) -> Option<DeferredEntry> {
        let entry = self.pending.pop_front()?;
        self.queued.remove(&entry.identity);
        Some(entry)
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.queued.contains(identity)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.queued.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::TypeKind;

    fn info(identity: &str) -> TypeInfo {
        TypeInfo::new(identity, TypeKind::Struct(Vec::new()))
    }

    #[test]
    fn fifo_without_duplicates() {
        let mut queue = DeferredQueue::new();
        assert!(queue.enqueue(info("a")));
        assert!(queue.enqueue(info("b")));
        assert!(!queue.enqueue(info("a")));
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.pop().unwrap().identity, "a");
        assert!(!queue.contains("a"));
        assert!(queue.enqueue(info("a")));
        assert_eq!(queue.pop().unwrap().identity, "b");
        assert_eq!(queue.pop().unwrap().identity, "a");
        assert!(queue.pop().is_none());
    }
}
