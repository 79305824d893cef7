//! UI-independent dashboard state.
//!
//! Owns the session gate, the per-panel remote-list lifecycle with its
//! locale-keyed cache, and the AI-summary modal flow. The render layer reads
//! this state and forwards fetch outcomes back into it; it holds no logic of
//! its own.

pub mod mocks;
mod panel;
mod session;
mod summary;
mod traits;

pub use panel::{FetchDecision, Panel, RemoteData};
pub use session::{SessionGate, SessionState};
pub use summary::{request_summary, summary_failure_message, SummarySlot, SummaryViewer};
pub use traits::{AuthApi, SummaryApi, SummaryKind};
