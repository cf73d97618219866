//! Browser session management
//!
//! The workflow depends on the `BrowserDriver` capability only. This module
//! provides the chromiumoxide implementation, the bounded-wait helpers and
//! the driver diagnostic log.

pub mod driver;
pub mod driver_log;
pub mod session;
pub mod wait;

pub use driver::{BrowserDriver, ElementSnapshot, Locator};
pub use session::ChromiumSession;
pub use wait::{Clock, ManualClock, TokioClock, Waiter};
