//! Tantivy integration for document storage and search.
//!
//! This module wraps Tantivy operations for creating, writing and
//! querying a single named index.

use crate::core::error::{DocsiftError, Result};
use crate::core::storage::fields;
use crate::core::types::{Document, Highlights};
use chrono::Utc;
use std::path::Path;
use tantivy::collector::{Count, TopDocs};
use tantivy::query::{BooleanQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::*;
use tantivy::snippet::SnippetGenerator;
use tantivy::{
    doc, Index, IndexReader, IndexWriter, ReloadPolicy, Searcher, TantivyDocument, Term,
};

/// Current schema version
/// Version 1: Initial document schema (author, title, path, content, fingerprint)
pub const SCHEMA_VERSION: u32 = 1;

const HIGHLIGHT_PREFIX: &str = "<em>";
const HIGHLIGHT_POSTFIX: &str = "</em>";

/// Create the Tantivy schema for document indexing
///
/// Fields:
/// - id: Store-assigned identifier (STRING | STORED)
/// - doc_type: Document type label (STRING | STORED)
/// - author, title, path, content: Full-text searchable (TEXT | STORED)
/// - file_fingerprint: Content hash, exact match only (STRING | STORED)
/// - indexed_at: Timestamp (Date | STORED)
pub fn create_schema() -> Schema {
    let mut builder = Schema::builder();

    // Keyword fields
    builder.add_text_field(fields::ID, STRING | STORED);
    builder.add_text_field(fields::DOC_TYPE, STRING | STORED);

    // Searchable text
    builder.add_text_field(fields::AUTHOR, TEXT | STORED);
    builder.add_text_field(fields::TITLE, TEXT | STORED);
    builder.add_text_field(fields::PATH, TEXT | STORED);
    builder.add_text_field(fields::CONTENT, TEXT | STORED);

    // Dedup key
    builder.add_text_field(fields::FILE_FINGERPRINT, STRING | STORED);

    // Timestamp
    builder.add_date_field(fields::INDEXED_AT, STORED);

    builder.build()
}

/// Tantivy index wrapper
///
/// The writer is acquired on the first [`add_document`], so a handle
/// that only answers queries never takes the index lock and can run
/// while another process is writing.
///
/// [`add_document`]: TantivyIndex::add_document
pub struct TantivyIndex {
    /// Tantivy index instance
    index: Index,

    /// Schema definition
    schema: Schema,

    /// Index writer, created on first write
    writer: Option<IndexWriter>,

    /// Memory budget for the writer
    writer_heap_bytes: usize,

    /// Reader reloaded after every commit
    reader: IndexReader,

    /// Documents added since the last commit
    pending: usize,

    /// Per-handle counter mixed into assigned ids
    sequence: u32,
}

impl std::fmt::Debug for TantivyIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TantivyIndex")
            .field("schema", &"<schema>")
            .field("writable", &self.writer.is_some())
            .field("pending", &self.pending)
            .finish()
    }
}

impl TantivyIndex {
    /// Create a new Tantivy index at the given path
    pub fn create(index_dir: &Path, writer_heap_bytes: usize) -> Result<Self> {
        std::fs::create_dir_all(index_dir)?;

        let index = Index::create_in_dir(index_dir, create_schema())
            .map_err(|e| DocsiftError::StorageError(format!("Failed to create index: {e}")))?;

        Self::from_index(index, writer_heap_bytes)
    }

    /// Open an existing Tantivy index
    pub fn open(index_dir: &Path, writer_heap_bytes: usize) -> Result<Self> {
        let index = Index::open_in_dir(index_dir)
            .map_err(|e| DocsiftError::StorageError(format!("Failed to open index: {e}")))?;

        Self::from_index(index, writer_heap_bytes)
    }

    fn from_index(index: Index, writer_heap_bytes: usize) -> Result<Self> {
        let schema = index.schema();

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| DocsiftError::StorageError(format!("Failed to create reader: {e}")))?;

        Ok(Self {
            index,
            schema,
            writer: None,
            writer_heap_bytes,
            reader,
            pending: 0,
            sequence: 0,
        })
    }

    fn writer(&mut self) -> Result<&mut IndexWriter> {
        if self.writer.is_none() {
            let writer = self.index.writer(self.writer_heap_bytes).map_err(|e| {
                DocsiftError::StorageError(format!("Failed to create writer: {e}"))
            })?;
            self.writer = Some(writer);
        }

        match self.writer.as_mut() {
            Some(writer) => Ok(writer),
            None => Err(DocsiftError::StorageError(
                "Index writer unavailable".to_string(),
            )),
        }
    }

    /// Whether this handle holds the index writer
    pub fn is_writable(&self) -> bool {
        self.writer.is_some()
    }

    /// Searcher over the latest committed state
    ///
    /// Without a writer, commits come from another handle (possibly
    /// another process), so the reader is refreshed first.
    fn searcher(&self) -> Result<Searcher> {
        if self.writer.is_none() {
            self.reader
                .reload()
                .map_err(|e| DocsiftError::StorageError(format!("Failed to reload reader: {e}")))?;
        }
        Ok(self.reader.searcher())
    }

    fn field(&self, name: &str) -> Result<Field> {
        self.schema
            .get_field(name)
            .map_err(|e| DocsiftError::StorageError(format!("Missing {name} field: {e}")))
    }

    /// Add a document, returning its assigned id
    ///
    /// The document becomes visible to queries after [`commit`].
    ///
    /// [`commit`]: TantivyIndex::commit
    pub fn add_document(&mut self, doc_type: &str, document: &Document) -> Result<String> {
        let id = self.next_id();
        let now = Utc::now();

        let doc = doc!(
            self.field(fields::ID)? => id.as_str(),
            self.field(fields::DOC_TYPE)? => doc_type,
            self.field(fields::AUTHOR)? => document.author.as_str(),
            self.field(fields::TITLE)? => document.title.as_str(),
            self.field(fields::PATH)? => document.path.as_str(),
            self.field(fields::CONTENT)? => document.content.as_str(),
            self.field(fields::FILE_FINGERPRINT)? => document.file_fingerprint.as_str(),
            self.field(fields::INDEXED_AT)? => tantivy::DateTime::from_timestamp_secs(
                now.timestamp()
            ),
        );

        self.writer()?
            .add_document(doc)
            .map_err(|e| DocsiftError::StorageError(format!("Failed to add document: {e}")))?;
        self.pending += 1;

        Ok(id)
    }

    /// Time-ordered id, unique per index
    fn next_id(&mut self) -> String {
        self.sequence = self.sequence.wrapping_add(1);
        format!(
            "{:014x}{:06x}",
            Utc::now().timestamp_micros(),
            self.sequence & 0x00ff_ffff
        )
    }

    /// Commit pending documents and refresh the reader
    pub fn commit(&mut self) -> Result<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        writer
            .commit()
            .map_err(|e| DocsiftError::StorageError(format!("Failed to commit: {e}")))?;
        self.reader
            .reload()
            .map_err(|e| DocsiftError::StorageError(format!("Failed to reload reader: {e}")))?;
        self.pending = 0;
        Ok(())
    }

    /// Documents added since the last commit
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Number of committed documents
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    fn type_filter(&self, doc_type: &str) -> Result<Box<dyn Query>> {
        let field = self.field(fields::DOC_TYPE)?;
        Ok(Box::new(TermQuery::new(
            Term::from_field_text(field, doc_type),
            IndexRecordOption::Basic,
        )))
    }

    /// Count committed documents of `doc_type` whose keyword field
    /// equals `value`
    pub fn count_term(&self, doc_type: &str, field_name: &str, value: &str) -> Result<u64> {
        let field = self.field(field_name)?;
        let term_query: Box<dyn Query> = Box::new(TermQuery::new(
            Term::from_field_text(field, value),
            IndexRecordOption::Basic,
        ));

        let query = BooleanQuery::new(vec![
            (Occur::Must, term_query),
            (Occur::Must, self.type_filter(doc_type)?),
        ]);

        let searcher = self.searcher()?;
        let count = searcher
            .search(&query, &Count)
            .map_err(|e| DocsiftError::SearchFailed(format!("Term query failed: {e}")))?;

        Ok(count as u64)
    }

    /// Run a query-string search restricted to `doc_type`
    ///
    /// Returns `(score, document, highlights)` in relevance order.
    /// Highlights are `Some` only when `highlight_fields` is non-empty
    /// and hold fragments only for fields that matched.
    pub fn search(
        &self,
        query_str: &str,
        doc_type: &str,
        highlight_fields: &[String],
        limit: usize,
        snippet_max_chars: usize,
    ) -> Result<Vec<(f32, Document, Option<Highlights>)>> {
        let default_fields = fields::DEFAULT_SEARCH
            .iter()
            .map(|name| self.field(name))
            .collect::<Result<Vec<_>>>()?;

        let query_parser = QueryParser::for_index(&self.index, default_fields);
        let user_query = query_parser
            .parse_query(query_str)
            .map_err(|e| DocsiftError::InvalidQuery(format!("Failed to parse query: {e}")))?;

        let query = BooleanQuery::new(vec![
            (Occur::Must, user_query.box_clone()),
            (Occur::Must, self.type_filter(doc_type)?),
        ]);

        let searcher = self.searcher()?;
        let top_docs = searcher
            .search(&query, &TopDocs::with_limit(limit.max(1)))
            .map_err(|e| DocsiftError::SearchFailed(format!("Search failed: {e}")))?;

        let mut generators = Vec::with_capacity(highlight_fields.len());
        for name in highlight_fields {
            let field = self.field(name)?;
            let mut generator = SnippetGenerator::create(&searcher, &*user_query, field)
                .map_err(|e| {
                    DocsiftError::SearchFailed(format!("Failed to build highlighter: {e}"))
                })?;
            generator.set_max_num_chars(snippet_max_chars);
            generators.push((name.clone(), generator));
        }

        let mut results = Vec::with_capacity(top_docs.len());
        for (score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher.doc(doc_address).map_err(|e| {
                DocsiftError::SearchFailed(format!("Failed to retrieve document: {e}"))
            })?;

            let highlights = if generators.is_empty() {
                None
            } else {
                let mut map = Highlights::new();
                for (name, generator) in &generators {
                    let mut snippet = generator.snippet_from_doc(&doc);
                    if snippet.is_empty() {
                        continue;
                    }
                    snippet.set_snippet_prefix_postfix(HIGHLIGHT_PREFIX, HIGHLIGHT_POSTFIX);
                    map.insert(name.clone(), vec![snippet.to_html()]);
                }
                Some(map)
            };

            results.push((score, self.to_document(&doc)?, highlights));
        }

        Ok(results)
    }

    fn to_document(&self, doc: &TantivyDocument) -> Result<Document> {
        let text = |name: &str| -> Result<String> {
            let field = self.field(name)?;
            Ok(doc
                .get_first(field)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string())
        };

        Ok(Document {
            id: Some(text(fields::ID)?),
            author: text(fields::AUTHOR)?,
            title: text(fields::TITLE)?,
            path: text(fields::PATH)?,
            content: text(fields::CONTENT)?,
            file_fingerprint: text(fields::FILE_FINGERPRINT)?,
        })
    }
}
