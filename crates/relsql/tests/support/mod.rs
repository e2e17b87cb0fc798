#![allow(dead_code)]

use relsql::{
    driver::{Operation, Response, Sql},
    schema::{Child, Field, FieldKind, Model, Parent},
    stmt::{Row, Value},
    Connection, Result, Source,
};

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

/// An in-memory connection that logs every operation and replays scripted
/// responses in order.
///
/// Once the script runs out, queries return no rows, statements affect no
/// rows and batches report their statement count.
#[derive(Debug, Clone, Default)]
pub struct ExecLog {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    ops: VecDeque<Operation>,
    script: VecDeque<Response>,
}

impl ExecLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the response to the next operation without one.
    pub fn respond(&self, response: Response) {
        self.state.lock().unwrap().script.push_back(response);
    }

    pub fn respond_rows(&self, rows: Vec<Row>) {
        self.respond(Response::values(rows));
    }

    pub fn respond_count(&self, count: u64) {
        self.respond(Response::count(count));
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().unwrap().ops.is_empty()
    }

    /// Removes and returns the oldest logged operation.
    #[track_caller]
    pub fn pop(&self) -> Operation {
        self.state
            .lock()
            .unwrap()
            .ops
            .pop_front()
            .expect("no operations in log")
    }

    /// Pops a parameterized operation, returning its text and values.
    #[track_caller]
    pub fn pop_sql(&self) -> (String, Vec<Value>) {
        match self.pop() {
            Operation::Execute(Sql { text, params }) | Operation::Query(Sql { text, params }) => {
                (text, params)
            }
            op => panic!("expected a statement, got {op:#?}"),
        }
    }

    /// Pops a batch, returning its statements.
    #[track_caller]
    pub fn pop_batch(&self) -> Vec<String> {
        match self.pop() {
            Operation::Batch(statements) => statements,
            op => panic!("expected a batch, got {op:#?}"),
        }
    }
}

#[async_trait::async_trait]
impl Connection for ExecLog {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        let mut state = self.state.lock().unwrap();

        let response = state.script.pop_front().unwrap_or_else(|| match &op {
            Operation::Query(_) => Response::empty(),
            Operation::Execute(_) => Response::count(0),
            Operation::Batch(statements) => Response::count(statements.len() as u64),
        });

        state.ops.push_back(op);
        Ok(response)
    }
}

pub fn row<const N: usize>(columns: [(&str, Value); N]) -> Row {
    columns.into_iter().collect()
}

/// A parent model with an auto-increment key and a child collection.
pub fn unit() -> Model {
    Model::new("unit")
        .with_field(Field::new("id", FieldKind::Int).auto())
        .with_field(Field::new("name", FieldKind::Str).nullable(false))
        .with_id("id")
        .with_label(&["name"])
        .with_order(&["+name"])
        .with_unique("name", &["name"])
        .with_child("tests", Child::new("test", "unit_id", "id"))
}

pub fn test() -> Model {
    Model::new("test")
        .with_field(Field::new("id", FieldKind::Int).auto())
        .with_field(Field::new("unit_id", FieldKind::Int))
        .with_field(Field::new("name", FieldKind::Str))
        .with_id("id")
        .with_label(&["unit_id", "name"])
        .with_parent("unit_id", Parent::new("unit", "id"))
}

/// A model with documents, injected and defaulted fields.
pub fn meta() -> Model {
    Model::new("meta")
        .with_field(Field::new("id", FieldKind::Int).auto())
        .with_field(Field::new("name", FieldKind::Str))
        .with_field(Field::new("flag", FieldKind::Bool).default(false))
        .with_field(Field::new("stuff", FieldKind::List))
        .with_field(Field::new("things", FieldKind::Map))
        .with_field(Field::new("color", FieldKind::Str).inject("things__color"))
        .with_field(Field::new("created", FieldKind::Str).default_with(|| Value::from("now")))
        .with_id("id")
}

/// A model whose `updated` stamp is rewritten by every update.
pub fn audit() -> Model {
    Model::new("audit")
        .with_field(Field::new("id", FieldKind::Int).auto())
        .with_field(Field::new("name", FieldKind::Str))
        .with_field(
            Field::new("updated", FieldKind::Str)
                .default_with(|| Value::from("now"))
                .replace(),
        )
        .with_id("id")
}

/// A model without a primary key.
pub fn plain() -> Model {
    Model::new("plain")
        .with_field(Field::new("name", FieldKind::Str))
        .with_label(&["name"])
}

pub fn source(log: &ExecLog) -> Source {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let mut source = Source::new("relsql", log.clone());
    for model in [unit(), test(), meta(), audit(), plain()] {
        source.register(model).unwrap();
    }
    source
}
