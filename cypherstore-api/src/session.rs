use crate::{Record, Statement};
use futures::Stream;

/// A connection-scoped handle able to run Cypher statements.
///
/// Implemented by the database driver integration, not by this workspace.
/// A stream returned from [`Session::run`] yields zero or more records and
/// then ends, or yields an error; it never yields records after an error.
pub trait Session {
    /// Error produced by the driver. Surfaced to store callers unchanged.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Stream of records produced by one statement.
    type Records<'a>: Stream<Item = Result<Record, Self::Error>> + 'a
    where
        Self: 'a;

    /// Runs a statement. Parameters travel inside the statement.
    fn run(&mut self, statement: Statement) -> Self::Records<'_>;

    /// Releases the session. Called once the stream has been drained.
    fn close(&mut self);
}

/// Factory for sessions. Pooling, if any, lives behind this trait.
pub trait Driver {
    type Session: Session;

    fn session(&self) -> Self::Session;
}
