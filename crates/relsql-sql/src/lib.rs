pub mod define;
pub use define::{column_define, define, extract_define, field_define};

pub mod migration;
pub use migration::{model_add, model_change, model_remove};

pub mod naming;

pub mod path;

pub mod predicate;

pub mod query;

pub mod serializer;
pub use serializer::Serializer;

pub mod stmt;
pub use stmt::Statement;
