//! Progress observers
//!
//! A drive operation reports progress as an ordered sequence of
//! [`DriveEvent`]s. Anything implementing [`DriveObserver`] can receive them:
//! the callback set used by UI code, an mpsc channel, or a plain `Vec` in tests.

use shared::DriveEvent;
use tokio::sync::mpsc;

/// Receiver of drive progress events
pub trait DriveObserver: Send {
    fn notify(&mut self, event: DriveEvent);
}

impl DriveObserver for () {
    fn notify(&mut self, _event: DriveEvent) {}
}

impl DriveObserver for Vec<DriveEvent> {
    fn notify(&mut self, event: DriveEvent) {
        self.push(event);
    }
}

impl DriveObserver for mpsc::UnboundedSender<DriveEvent> {
    fn notify(&mut self, event: DriveEvent) {
        // A closed stream means nobody is listening any more.
        let _ = self.send(event);
    }
}

impl<O: DriveObserver + ?Sized> DriveObserver for &mut O {
    fn notify(&mut self, event: DriveEvent) {
        (**self).notify(event);
    }
}

impl<O: DriveObserver + ?Sized> DriveObserver for Box<O> {
    fn notify(&mut self, event: DriveEvent) {
        (**self).notify(event);
    }
}

type Handler = Box<dyn FnMut() + Send>;
type MessageHandler = Box<dyn FnMut(&str) + Send>;
type CountdownHandler = Box<dyn FnMut(u32) + Send>;

/// Optional per-event handlers
///
/// Every handler is optional; a missing handler ignores its event.
#[derive(Default)]
pub struct DriveCallbacks {
    on_start: Option<Handler>,
    on_success: Option<MessageHandler>,
    on_error: Option<MessageHandler>,
    on_countdown_update: Option<CountdownHandler>,
    on_complete: Option<Handler>,
    on_cancelled: Option<Handler>,
}

impl DriveCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    pub fn on_success(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    pub fn on_error(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub fn on_countdown_update(mut self, f: impl FnMut(u32) + Send + 'static) -> Self {
        self.on_countdown_update = Some(Box::new(f));
        self
    }

    pub fn on_complete(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn on_cancelled(mut self, f: impl FnMut() + Send + 'static) -> Self {
        self.on_cancelled = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for DriveCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveCallbacks")
            .field("on_start", &self.on_start.is_some())
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_countdown_update", &self.on_countdown_update.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .field("on_cancelled", &self.on_cancelled.is_some())
            .finish()
    }
}

impl DriveObserver for DriveCallbacks {
    fn notify(&mut self, event: DriveEvent) {
        match event {
            DriveEvent::Started => {
                if let Some(f) = self.on_start.as_mut() {
                    f();
                }
            }
            DriveEvent::CountdownTick { seconds_remaining } => {
                if let Some(f) = self.on_countdown_update.as_mut() {
                    f(seconds_remaining);
                }
            }
            DriveEvent::Succeeded { response } => {
                if let Some(f) = self.on_success.as_mut() {
                    f(&response);
                }
            }
            DriveEvent::Failed { message } => {
                if let Some(f) = self.on_error.as_mut() {
                    f(&message);
                }
            }
            DriveEvent::Completed => {
                if let Some(f) = self.on_complete.as_mut() {
                    f();
                }
            }
            DriveEvent::Cancelled => {
                if let Some(f) = self.on_cancelled.as_mut() {
                    f();
                }
            }
        }
    }
}
