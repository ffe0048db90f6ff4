#![allow(dead_code)]

use cypherstore::{
    Driver, Identity, NodeValue, PropertyMap, Record, RelationshipValue, Session, Statement, Value,
};
use futures::stream;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Once;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("cypherstore=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .try_init();
    });
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("database unavailable: {0}")]
pub struct MockError(pub String);

type Reply = Vec<Result<Record, MockError>>;

#[derive(Default)]
struct Shared {
    replies: VecDeque<Reply>,
    statements: Vec<Statement>,
    opened: usize,
    closed: usize,
}

/// Driver whose sessions answer from a queue of scripted replies and record
/// every statement they are given.
#[derive(Clone, Default)]
pub struct ScriptedDriver {
    shared: Rc<RefCell<Shared>>,
}

impl ScriptedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the records returned by the next statement.
    pub fn reply(&self, records: Vec<Record>) -> &Self {
        self.shared
            .borrow_mut()
            .replies
            .push_back(records.into_iter().map(Ok).collect());
        self
    }

    /// Queues a stream that yields `records` and then fails.
    pub fn fail_after(&self, records: Vec<Record>, message: &str) -> &Self {
        let mut reply: Reply = records.into_iter().map(Ok).collect();
        reply.push(Err(MockError(message.to_string())));
        self.shared.borrow_mut().replies.push_back(reply);
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.fail_after(Vec::new(), message)
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.shared.borrow().statements.clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.statements()
            .iter()
            .map(|s| s.text().to_string())
            .collect()
    }

    pub fn last(&self) -> Statement {
        self.statements().pop().expect("no statement was run")
    }

    pub fn opened(&self) -> usize {
        self.shared.borrow().opened
    }

    pub fn closed(&self) -> usize {
        self.shared.borrow().closed
    }
}

impl Driver for ScriptedDriver {
    type Session = ScriptedSession;

    fn session(&self) -> ScriptedSession {
        self.shared.borrow_mut().opened += 1;
        ScriptedSession {
            shared: Rc::clone(&self.shared),
        }
    }
}

pub struct ScriptedSession {
    shared: Rc<RefCell<Shared>>,
}

impl Session for ScriptedSession {
    type Error = MockError;
    type Records<'a>
        = stream::Iter<std::vec::IntoIter<Result<Record, MockError>>>
    where
        Self: 'a;

    fn run(&mut self, statement: Statement) -> Self::Records<'_> {
        let mut shared = self.shared.borrow_mut();
        shared.statements.push(statement);
        let reply = shared.replies.pop_front().unwrap_or_default();
        stream::iter(reply)
    }

    fn close(&mut self) {
        self.shared.borrow_mut().closed += 1;
    }
}

pub fn props(pairs: &[(&str, serde_json::Value)]) -> PropertyMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

pub fn node(id: i64, labels: &[&str], properties: PropertyMap) -> Value {
    Value::Node(NodeValue {
        identity: Identity::new(id),
        labels: labels.iter().map(|l| l.to_string()).collect(),
        properties,
    })
}

pub fn relation(id: i64, rel_type: &str, start: i64, end: i64) -> Value {
    Value::Relationship(RelationshipValue {
        identity: Identity::new(id),
        start: Identity::new(start),
        end: Identity::new(end),
        rel_type: rel_type.to_string(),
        properties: PropertyMap::new(),
    })
}

pub fn row(column: &str, value: impl Into<Value>) -> Record {
    Record::default().with(column, value)
}
