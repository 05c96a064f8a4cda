//! Glissade Core
//!
//! Foundational primitives shared by the Glissade crates:
//!
//! - **Element handles**: opaque references to host-owned elements. The
//!   slider never owns element lifetime, it only refers to them.
//! - **Event emission**: a small publish/subscribe observer list embedded by
//!   composition into widgets (`on` / `once` / `off` / `emit`).
//!
//! # Example
//!
//! ```rust
//! use glissade_core::events::{Event, EventEmitter};
//!
//! #[derive(Debug)]
//! enum Ping {
//!     Hello,
//! }
//!
//! impl Event for Ping {
//!     type Kind = ();
//!     fn kind(&self) -> Self::Kind {}
//! }
//!
//! let mut emitter = EventEmitter::<Ping>::new();
//! let id = emitter.on((), |event| println!("{:?}", event));
//! assert_eq!(emitter.emit(&Ping::Hello), 1);
//! assert!(emitter.off(id));
//! ```

pub mod element;
pub mod events;

pub use element::ElementId;
pub use events::{Event, EventEmitter, ListenerId};
