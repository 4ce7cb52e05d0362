pub mod bigquery;
pub mod storage;
