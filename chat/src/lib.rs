//! Chat session state and orchestration shared by the browser and terminal
//! clients.
//!
//! This crate is UI-framework agnostic: it owns the wire models, the
//! four-step thinking timeline, the [`ChatStore`] that chat events are
//! reduced into, the [`ChatBackend`] transport seam, and the async
//! [`controller`] operations that tie them together.

pub mod backend;
pub mod cancel;
pub mod clock;
pub mod controller;
pub mod model;
pub mod store;
pub mod timeline;

pub use backend::{ApiError, ByteStream, ChatBackend};
pub use cancel::CancelHandle;
pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use controller::{StoreAccess, TurnOutcome};
pub use model::{
    DEFAULT_SESSION_TITLE, DatabaseInfo, Message, QueryTable, Role, Session, SessionDetail, SqlEntry,
    TableInfo,
};
pub use store::{ChatStore, TurnRequest};
pub use timeline::{StepKey, StepStatus, ThinkingStep};
