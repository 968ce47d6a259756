//! Transition events and the shared bus they travel on
//!
//! Each controller allocates a unique `TickChannel` and tags every event it
//! emits with it. Controllers sharing one bus only ever consume events
//! carrying their own channel, so concurrently simulated critters cannot
//! trigger each other's transitions.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::engine::state::CritterStateKind;

static NEXT_CHANNEL: AtomicU64 = AtomicU64::new(0);

/// Per-controller scoping id for transition events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickChannel(u64);

impl TickChannel {
    /// Allocate a channel id no other controller in this process holds
    pub fn allocate() -> Self {
        Self(NEXT_CHANNEL.fetch_add(1, Ordering::Relaxed))
    }
}

/// A request to move a controller to `target`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEvent {
    pub channel: TickChannel,
    pub target: CritterStateKind,
}

/// FIFO of transition events shared by every critter in one host loop
#[derive(Debug, Default)]
pub struct TransitionBus {
    queue: VecDeque<TransitionEvent>,
}

impl TransitionBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: TransitionEvent) {
        self.queue.push_back(event);
    }

    /// Remove and return this channel's events, leaving other channels'
    /// events queued in order
    pub fn drain(&mut self, channel: TickChannel) -> Vec<TransitionEvent> {
        let mut mine = Vec::new();
        let mut rest = VecDeque::with_capacity(self.queue.len());
        for event in self.queue.drain(..) {
            if event.channel == channel {
                mine.push(event);
            } else {
                rest.push_back(event);
            }
        }
        self.queue = rest;
        mine
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_unique() {
        assert_ne!(TickChannel::allocate(), TickChannel::allocate());
    }

    #[test]
    fn test_drain_only_own_channel() {
        let mut bus = TransitionBus::new();
        let a = TickChannel::allocate();
        let b = TickChannel::allocate();

        bus.emit(TransitionEvent { channel: a, target: CritterStateKind::Wall });
        bus.emit(TransitionEvent { channel: b, target: CritterStateKind::Ally });
        bus.emit(TransitionEvent { channel: a, target: CritterStateKind::Attack });

        let mine = bus.drain(a);
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].target, CritterStateKind::Wall);
        assert_eq!(mine[1].target, CritterStateKind::Attack);

        // b's event is untouched
        assert_eq!(bus.len(), 1);
        let theirs = bus.drain(b);
        assert_eq!(theirs.len(), 1);
        assert_eq!(theirs[0].target, CritterStateKind::Ally);
        assert!(bus.is_empty());
    }
}
