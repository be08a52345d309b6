pub mod dataset;
pub mod extract;
pub mod ingest;
pub mod schema;
