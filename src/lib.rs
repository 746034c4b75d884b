//! # cast-presentation-server
//!
//! Remote-display presentation service: keeps a presentation alive on a
//! cast display and hands its rendering surface to an external renderer,
//! negotiating the surface's display configuration on the way.
//!
//! # Architecture
//!
//! ```text
//! cast-presentation-server
//!   ├─> Display Events (embedding host channel, or replay script)
//!   ├─> Presentation Manager (show/dismiss, at most one active)
//!   ├─> Config Selector (surface format negotiation, AA fallback)
//!   └─> Surface Sink (publication to the external renderer)
//! ```
//!
//! # Data Flow
//!
//! **Lifecycle Path:** Display event → Presentation Manager → Presentation Host
//!
//! **Surface Path:** Texture available → Config Selector → Surface Sink → Renderer
//!
//! The selector core ([`display`]) is pure and synchronous; everything
//! async lives in [`server`]. Hosts that own a live display system embed
//! [`presentation::PresentationManager`] directly and call it from their
//! toolkit callbacks.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Service configuration
pub mod config;

/// Display configuration negotiation (requests, queries, selection)
pub mod display;

/// Presentation and surface lifecycle
pub mod presentation;

/// Startup diagnostics and user-facing error formatting
pub mod runtime;

/// Event loop, headless seams, and scripted replay
pub mod server;
