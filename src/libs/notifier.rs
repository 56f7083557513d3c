//! User notification surface.
//!
//! The timer service reports side effects (like abandoning a previous timer)
//! through an injected notifier instead of printing from inside the state
//! machine. Production code uses `ConsoleNotifier`; tests inject their own
//! recording implementation.

use crate::libs::messages::Message;
use crate::{msg_error, msg_success, msg_warning};

/// Fire-and-forget notification sink.
pub trait Notify {
    fn success(&self, message: Message);
    fn warning(&self, message: Message);
    fn error(&self, message: Message);
}

/// Console notifier routing through the application message macros.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notify for ConsoleNotifier {
    fn success(&self, message: Message) {
        msg_success!(message);
    }

    fn warning(&self, message: Message) {
        msg_warning!(message);
    }

    fn error(&self, message: Message) {
        msg_error!(message);
    }
}
