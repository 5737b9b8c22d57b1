//! FrameMailbox: single-slot handoff from the PPM producer to the main loop.
//!
//! The producer (an edge-capture interrupt or task) publishes whole frames;
//! the consumer (the cooperative loop) takes them. The slot holds only the
//! newest frame: publishing again before the consumer looked overwrites it.
//!
//! # Ordering
//!
//! Both sides touch the slot only inside the mutex. `publish` writes all
//! channels and raises the ready flag in one critical section, and `take`
//! copies the frame and lowers the flag in one critical section. The
//! consumer therefore only ever reads a frame that was completely written,
//! and a frame published after `take` returns always leaves the flag raised
//! for the next tick.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::input::ChannelSource;
use crate::types::ChannelFrame;

#[derive(Clone, Copy)]
struct Slot {
    frame: ChannelFrame,
    ready: bool,
}

/// Latest-value frame mailbox.
///
/// Use `CriticalSectionRawMutex` when the producer runs in interrupt
/// context, `NoopRawMutex` when both sides share one executor.
pub struct FrameMailbox<M: RawMutex> {
    slot: Mutex<M, Cell<Slot>>,
}

impl<M: RawMutex> FrameMailbox<M> {
    /// Create an empty mailbox. All channels read zero until the first frame.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Cell::new(Slot {
                frame: ChannelFrame::ZERO,
                ready: false,
            })),
        }
    }

    /// Producer side: store `frame` and flag it as new.
    pub fn publish(&self, frame: ChannelFrame) {
        self.slot.lock(|slot| slot.set(Slot { frame, ready: true }));
    }

    /// Consumer side: return the frame if it is new, clearing the flag.
    pub fn take(&self) -> Option<ChannelFrame> {
        self.slot.lock(|slot| {
            let current = slot.get();
            if !current.ready {
                return None;
            }
            slot.set(Slot {
                ready: false,
                ..current
            });
            Some(current.frame)
        })
    }

    /// Check for a new frame without consuming it.
    pub fn is_ready(&self) -> bool {
        self.slot.lock(|slot| slot.get().ready)
    }

    /// Latest value of one channel, regardless of the ready flag.
    pub fn channel(&self, index: usize) -> Option<u8> {
        self.slot.lock(|slot| slot.get().frame.channel(index))
    }
}

impl<M: RawMutex> Default for FrameMailbox<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> ChannelSource for &FrameMailbox<M> {
    fn take_frame(&mut self) -> Option<ChannelFrame> {
        self.take()
    }

    fn channel(&self, index: usize) -> Option<u8> {
        FrameMailbox::channel(self, index)
    }
}
