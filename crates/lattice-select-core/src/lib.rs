//! Core systems for Lattice Select.
//!
//! This crate provides the UI-agnostic foundation the select widget builds on:
//!
//! - **Signal/Slot System**: Type-safe, synchronous notification channel
//! - **Property System**: Value cells with change detection
//! - **Logging**: Tracing targets, span names and tree formatting options
//! - **Errors**: The shared [`SelectError`] type
//!
//! # Signal/Slot Example
//!
//! ```
//! use lattice_select_core::Signal;
//!
//! let opened = Signal::<()>::new();
//! let conn_id = opened.connect(|_| println!("panel opened"));
//! opened.emit(());
//! opened.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod property;
pub mod signal;

pub use error::{Result, SelectError};
pub use logging::{PerfSpan, TreeFormatOptions, TreeStyle};
pub use property::Property;
pub use signal::{ConnectionId, Signal};
