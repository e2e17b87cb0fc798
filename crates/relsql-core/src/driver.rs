mod operation;
pub use operation::{Operation, Sql};

mod response;
pub use response::{Response, Rows};

use crate::{async_trait, Result};

use std::fmt::Debug;

/// A connection to the database.
///
/// Every operation is awaited to completion before the next is issued; a
/// connection is never shared between concurrent callers.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Execute a database operation
    async fn exec(&mut self, op: Operation) -> Result<Response>;
}

#[async_trait]
impl Connection for Box<dyn Connection> {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        (**self).exec(op).await
    }
}
