/// Use cases module containing application business logic orchestration
mod editor_session;

pub use editor_session::BomEditorSession;
