mod backend;
mod scripted;

pub use backend::{MockBackend, RecordedRequest};
pub use scripted::ScriptedTransport;
