//! Queue of `ChatEvent`s between the conversation controller and the UI.
//!
//! The controller pushes an event for every appended message, every
//! exchange start and finish, session change and clear. The app drains the
//! queue once per frame and folds it into `UiState`, so the UI never has to
//! diff the message log. Everything runs on the browser's single thread.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use kbchat_types::event::ChatEvent;

/// Handle to the shared queue. Clones publish to and drain the same queue.
#[derive(Clone, Default)]
pub struct EventBus {
    queue: Rc<RefCell<VecDeque<ChatEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: ChatEvent) {
        log::trace!("chat event: {:?}", event);
        self.queue.borrow_mut().push_back(event);
    }

    /// Take every queued event, oldest first.
    pub fn drain(&self) -> Vec<ChatEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// True when the UI has events it has not folded in yet.
    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }
}
