//! Model integration tests
//!
//! Tests are organized by area: storage and addressing, cursor iteration,
//! sorting, bulk operations, import, and encoding.

mod bulk_tests;
mod marshal_tests;
