//! Indexer layer tests
//!
//! End-to-end behaviour of `index_path` against a real store.

mod test_dedup;
mod test_extraction;
