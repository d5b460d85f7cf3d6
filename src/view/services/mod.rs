//! Application services for view synchronization.

mod controller;
mod debounce;
mod drag;

pub use controller::{
    ControllerConfig, ControllerError, ControllerResult, FetchOutcome, MutationOutcome,
    ViewController, ViewSnapshot,
};
pub use debounce::{DebounceGate, DebounceTicket};
pub use drag::{DragHandler, DropOutcome};
