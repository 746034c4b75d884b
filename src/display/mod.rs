//! Display configuration negotiation.
//!
//! Everything the renderer needs to agree with the display system on a
//! surface format:
//!
//! ```text
//! ConfigRequest ──► AttribSpec ──► ConfigQuery (live EGL or DisplayProfile)
//!                                       │
//!                                       ▼
//!                 select_config() ──► Selection / SelectionError
//! ```
//!
//! The selector is pure and synchronous; host integration layers call it
//! once at surface setup time. Candidate handles stay owned by the display
//! system throughout.

pub mod attribs;
pub mod profile;
pub mod query;
pub mod request;
pub mod selector;

pub use attribs::{AttribSpec, ConfigAttrib, ATTRIB_NONE};
pub use profile::{CandidateConfig, DisplayProfile, ProfileError};
pub use query::{ConfigQuery, QueryError};
pub use request::{ConfigRequest, Multisampling};
pub use selector::{select_config, summarize, ConfigSummary, Selection, SelectionError};
