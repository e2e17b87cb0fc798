mod filter;
pub use filter::{Criteria, Filter};

mod row;
pub use row::Row;

mod value;
pub use value::Value;
