use std::cell::{Cell, RefCell};

/// One entered loop level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frame(u64);

/// Book-keeping for nested loop levels.
///
/// A frame is pushed when a loop level starts and popped when a stop is
/// requested, so `depth` reflects stop requests immediately, before the
/// native loop has actually unwound.
#[derive(Debug, Default)]
pub(crate) struct LoopStack {
    frames: RefCell<Vec<Frame>>,
    next: Cell<u64>,
}

impl LoopStack {
    pub(crate) fn push(&self) -> Frame {
        let frame = Frame(self.next.get());
        self.next.set(frame.0 + 1);
        self.frames.borrow_mut().push(frame);
        frame
    }

    pub(crate) fn pop(&self) -> Option<Frame> {
        self.frames.borrow_mut().pop()
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Drop `frame` and everything above it if it is still on the stack.
    ///
    /// Returns whether anything was dropped, i.e. whether the native loop
    /// returned without being asked to.
    pub(crate) fn discard(&self, frame: Frame) -> bool {
        let mut frames = self.frames.borrow_mut();
        match frames.iter().position(|f| *f == frame) {
            Some(at) => {
                frames.truncate(at);
                true
            }
            None => false,
        }
    }
}
