use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::{LoopError, ObjectError};
use crate::object::Object;

type Task = Box<dyn FnOnce()>;

#[derive(Default)]
struct EngineState {
    queue: RefCell<VecDeque<Task>>,
    depth: Cell<usize>,
    quit_requests: Cell<usize>,
}

// ── Engine ────────────────────────────────────────────────────────────────

/// The headless toolkit context: a task queue drained by a nested,
/// blocking main loop.
///
/// Posted tasks stand in for the input a windowing system would deliver.
/// [`run`](Engine::run) dispatches them one at a time until [`quit`](Engine::quit)
/// is requested; a task may itself call `run`, which opens a nested level
/// that keeps draining the same queue. `quit` always unwinds the innermost
/// level, after the task that requested it returns.
#[derive(Clone, Default)]
pub struct Engine(Rc<EngineState>);

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a native widget of `class`.
    pub fn create(&self, class: &str) -> Result<Object, ObjectError> {
        Object::new(class)
    }

    /// Queue a task for the main loop.
    pub fn post(&self, task: impl FnOnce() + 'static) {
        self.0.queue.borrow_mut().push_back(Box::new(task));
    }

    pub fn pending(&self) -> usize {
        self.0.queue.borrow().len()
    }

    /// Number of main loop levels currently running.
    pub fn depth(&self) -> usize {
        self.0.depth.get()
    }

    /// Run one main loop level until a quit request reaches it.
    ///
    /// Fails with [`LoopError::Starved`] when the queue drains first, since
    /// nothing could ever ask the level to stop.
    pub fn run(&self) -> Result<(), LoopError> {
        let level = self.0.depth.get() + 1;
        self.0.depth.set(level);
        log::debug!("entering main loop level {level}");

        let result = loop {
            if self.0.quit_requests.get() > 0 {
                self.0.quit_requests.set(self.0.quit_requests.get() - 1);
                break Ok(());
            }
            let task = self.0.queue.borrow_mut().pop_front();
            match task {
                Some(task) => task(),
                None => break Err(LoopError::Starved { level }),
            }
        };

        self.0.depth.set(level - 1);
        log::debug!("left main loop level {level}");
        result
    }

    /// Ask the innermost running level to return.
    pub fn quit(&self) {
        let pending = self.0.quit_requests.get();
        if pending >= self.0.depth.get() {
            log::warn!("quit requested but no main loop level is left to stop");
            return;
        }
        self.0.quit_requests.set(pending + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_run_in_order_until_quit() {
        let engine = Engine::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let log = log.clone();
            engine.post(move || log.borrow_mut().push(i));
        }
        let e = engine.clone();
        engine.post(move || e.quit());
        engine.post(|| unreachable!("runs after quit"));

        engine.run().unwrap();
        assert_eq!(*log.borrow(), [0, 1, 2]);
        assert_eq!(engine.depth(), 0);
        assert_eq!(engine.pending(), 1);
    }

    #[test]
    fn nested_levels_unwind_innermost_first() {
        let engine = Engine::new();
        let depths = Rc::new(RefCell::new(Vec::new()));

        let (e, d) = (engine.clone(), depths.clone());
        engine.post(move || {
            d.borrow_mut().push(e.depth());
            e.run().unwrap();
            d.borrow_mut().push(e.depth());
        });
        let (e, d) = (engine.clone(), depths.clone());
        engine.post(move || {
            d.borrow_mut().push(e.depth());
            e.quit();
        });
        let (e, d) = (engine.clone(), depths.clone());
        engine.post(move || {
            d.borrow_mut().push(e.depth());
            e.quit();
        });

        engine.run().unwrap();
        assert_eq!(*depths.borrow(), [1, 2, 1, 1]);
    }

    #[test]
    fn empty_queue_starves_the_loop() {
        let engine = Engine::new();
        assert_eq!(engine.run(), Err(LoopError::Starved { level: 1 }));
        assert_eq!(engine.depth(), 0);
    }

    #[test]
    fn quit_without_running_loop_is_ignored() {
        let engine = Engine::new();
        engine.quit();
        assert_eq!(engine.run(), Err(LoopError::Starved { level: 1 }));
    }
}
