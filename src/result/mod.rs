mod query_result;
mod record;

pub use query_result::QueryResult;
pub use record::Record;
