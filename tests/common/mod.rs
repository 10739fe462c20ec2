// Common test utilities and fixtures

pub mod fixtures;

// Re-export commonly used items
// Note: These may appear unused in some test binaries
#[allow(unused_imports)]
pub use fixtures::{write_corrupted_pdf, write_docx, write_pdf, TestTree};
#[allow(unused_imports)]
pub use helpers::{create_test_services, test_config, FlakyStore};
