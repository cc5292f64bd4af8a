//! Core drive logic: guard state and progress observers

pub mod observer;
pub mod state;

pub use observer::{DriveCallbacks, DriveObserver};
pub use state::{Admission, DriveState};
