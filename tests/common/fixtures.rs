// Test fixtures for integration testing

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Scratch directory tree with known files
#[allow(dead_code)]
pub struct TestTree {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl TestTree {
    /// Create a tree from (relative_path, content) pairs
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let tree = Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        };
        for (path, content) in files {
            tree.write(path, content.as_bytes());
        }
        tree
    }

    /// A mixed tree: supported, unsupported and lock files
    pub fn mixed() -> Self {
        let tree = Self::with_files(&[
            ("notes.txt", "an error was logged during startup"),
            ("src/Main.java", "class Main { void run() { throw new Error(); } }"),
            ("src/util.c", "int add(int a, int b) { return a + b; }"),
            ("src/engine.cpp", "void start() { /* no error here */ }"),
            ("image.png", "not really a png"),
            ("~$notes.txt", "office lock file"),
        ]);
        write_docx(
            &tree.path().join("reports/summary.docx"),
            &["Quarterly summary", "One error in the billing run"],
        );
        tree
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write raw bytes at a relative path, creating parents
    pub fn write(&self, relative: &str, bytes: &[u8]) -> PathBuf {
        let full_path = self.dir.path().join(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create directories");
        }
        fs::write(&full_path, bytes).expect("Failed to write file");
        full_path
    }
}

/// Write a minimal docx container with one paragraph per entry
#[allow(dead_code)]
pub fn write_docx(path: &Path, paragraphs: &[&str]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create directories");
    }
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();

    let mut zip = ZipWriter::new(File::create(path).expect("Failed to create docx"));
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .expect("Failed to start docx part");
    write!(
        zip,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    )
    .expect("Failed to write docx body");
    zip.finish().expect("Failed to finish docx");
}

/// Write bytes that no PDF parser accepts (e.g. a truncated download)
#[allow(dead_code)]
pub fn write_corrupted_pdf(path: &Path) {
    fs::write(path, b"<html>502 Bad Gateway</html>\x00\x01\x02").expect("Failed to write pdf");
}

/// Write a minimal PDF with one Helvetica text line per page
#[allow(dead_code)]
pub fn write_pdf(path: &Path, pages: &[&str]) {
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            (0..pages.len())
                .map(|i| format!("{} 0 R", 4 + 2 * i))
                .collect::<Vec<_>>()
                .join(" "),
            pages.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];
    for (i, text) in pages.iter().enumerate() {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            5 + 2 * i
        ));
        let stream = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        objects.push(format!(
            "<< /Length {} >>\nstream\n{stream}\nendstream",
            stream.len()
        ));
    }

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{body}\nendobj\n", i + 1));
    }
    let xref = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        pdf.push_str(&format!("{offset:010} 00000 n \n"));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%%EOF\n",
        objects.len() + 1
    ));
    fs::write(path, pdf).expect("Failed to write pdf");
}
