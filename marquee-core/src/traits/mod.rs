//! Hardware abstraction traits
//!
//! These traits define the interface between the display logic and the
//! LED driver / timing implementations.

pub mod sink;
pub mod ticker;

pub use sink::{MatrixSink, SinkError, FIRST_ROW, LAST_ROW};
pub use ticker::{Ticker, WatchdogTicker};
