//! Extraction through the full pipeline

use crate::common::{create_test_services, write_corrupted_pdf, write_docx, write_pdf, TestTree};

#[test]
fn test_corrupted_pdf_is_indexed_with_empty_content() {
    let (services, _storage) = create_test_services();
    let tree = TestTree::with_files(&[("after.txt", "processed after the broken pdf")]);
    write_corrupted_pdf(&tree.path().join("corrupted.pdf"));

    let stats = services.index_path(tree.path(), "docs").unwrap();

    assert_eq!(stats.files_indexed, 2);
    assert_eq!(stats.extraction_failures, 1);

    // Still discoverable by title
    let response = services.search("corrupted", Some("docs"), false, None).unwrap();
    assert_eq!(response.count, 1);
    assert_eq!(response.hits[0].document.title, "corrupted.pdf");
    assert_eq!(response.hits[0].document.content, "");

    let response = services.search("processed", Some("docs"), false, None).unwrap();
    assert_eq!(response.count, 1);
}

#[test]
fn test_docx_paragraphs_are_searchable() {
    let (services, _storage) = create_test_services();
    let tree = TestTree::with_files(&[]);
    write_docx(
        &tree.path().join("minutes.docx"),
        &["Board meeting minutes", "Budget approved unanimously"],
    );

    let stats = services.index_path(tree.path(), "docs").unwrap();
    assert_eq!(stats.files_indexed, 1);
    assert_eq!(stats.extraction_failures, 0);

    let response = services.search("unanimously", Some("docs"), false, None).unwrap();
    assert_eq!(response.count, 1);
    assert_eq!(
        response.hits[0].document.content,
        "Board meeting minutes\nBudget approved unanimously\n"
    );
}

#[test]
fn test_pdf_pages_are_searchable() {
    let (services, _storage) = create_test_services();
    let tree = TestTree::with_files(&[]);
    write_pdf(
        &tree.path().join("handbook.pdf"),
        &["Chapter one covers onboarding", "Chapter two covers payroll"],
    );

    let stats = services.index_path(tree.path(), "docs").unwrap();
    assert_eq!(stats.files_indexed, 1);
    assert_eq!(stats.extraction_failures, 0);

    let response = services.search("payroll", Some("docs"), false, None).unwrap();
    assert_eq!(response.count, 1);
    let content = &response.hits[0].document.content;
    let first = content.find("onboarding").unwrap();
    let second = content.find("payroll").unwrap();
    assert!(first < second);
}

#[test]
fn test_damaged_docx_keeps_leading_text() {
    let (services, _storage) = create_test_services();
    let tree = TestTree::with_files(&[]);
    // The second run closes with a mismatched tag
    write_docx(
        &tree.path().join("damaged.docx"),
        &["Recovered paragraph", "broken</w:x>"],
    );

    let stats = services.index_path(tree.path(), "docs").unwrap();
    assert_eq!(stats.files_indexed, 1);
    assert_eq!(stats.extraction_failures, 0);

    let response = services.search("recovered", Some("docs"), false, None).unwrap();
    assert_eq!(response.count, 1);
    assert!(response.hits[0]
        .document
        .content
        .starts_with("Recovered paragraph\n"));
}

#[test]
fn test_malformed_docx_is_indexed_with_empty_content() {
    let (services, _storage) = create_test_services();
    let tree = TestTree::with_files(&[("broken.docx", "plain text pretending to be docx")]);

    let stats = services.index_path(tree.path(), "docs").unwrap();

    assert_eq!(stats.files_indexed, 1);
    assert_eq!(stats.extraction_failures, 1);
}

#[test]
fn test_plain_text_is_verbatim() {
    let (services, _storage) = create_test_services();
    let source = "// 中文注释\r\nint main() { return 0; } // 🔥\n";
    let tree = TestTree::with_files(&[("main.cpp", source)]);

    services.index_path(tree.path(), "docs").unwrap();

    let response = services.search("main", Some("docs"), false, None).unwrap();
    assert_eq!(response.hits[0].document.content, source);
}
