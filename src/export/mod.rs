//! Result set and CSV export
//!
//! Files are UTF-8 with a leading byte-order mark so spreadsheet tools pick
//! the right encoding for Chinese text. Columns are fixed:
//! `News ID, Title, Date, Content`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::article::ArticleRecord;
use crate::error::ScrapeResult;

/// Export column header, in order
pub const COLUMNS: [&str; 4] = ["News ID", "Title", "Date", "Content"];

/// UTF-8 byte-order mark written before the header
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Ordered collection of article records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<ArticleRecord>,
}

impl ResultSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ArticleRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    /// Rendered rows, sentinels filled in
    pub fn rows(&self) -> impl Iterator<Item = [String; 4]> + '_ {
        self.records.iter().map(ArticleRecord::to_row)
    }

    /// Write the set to `path`, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns an IO or CSV error if the file cannot be created or written.
    pub fn write_csv(&self, path: &Path) -> ScrapeResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = BufWriter::new(File::create(path)?);
        self.write_csv_to(file)?;
        debug!("Wrote {} rows to {}", self.len(), path.display());
        Ok(())
    }

    /// Write BOM, header and rows to any writer
    ///
    /// # Errors
    ///
    /// Returns an IO or CSV error if writing fails.
    pub fn write_csv_to<W: Write>(&self, mut out: W) -> ScrapeResult<()> {
        out.write_all(UTF8_BOM)?;
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(out);
        writer.write_record(COLUMNS)?;
        for row in self.rows() {
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl From<Vec<ArticleRecord>> for ResultSet {
    fn from(records: Vec<ArticleRecord>) -> Self {
        Self { records }
    }
}

impl IntoIterator for ResultSet {
    type Item = ArticleRecord;
    type IntoIter = std::vec::IntoIter<ArticleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(set: &ResultSet) -> Vec<u8> {
        let mut buf = Vec::new();
        set.write_csv_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn empty_set_writes_bom_and_header() {
        let bytes = render(&ResultSet::new());
        assert!(bytes.starts_with(UTF8_BOM));
        assert_eq!(&bytes[UTF8_BOM.len()..], b"News ID,Title,Date,Content\n");
    }

    #[test]
    fn multiline_content_is_quoted() {
        let mut set = ResultSet::new();
        set.push(ArticleRecord {
            news_id: Some("1".into()),
            title: Some("標題, 含逗號".into()),
            date: Some("2024-01-02".into()),
            content: Some("第一段\n第二段".into()),
            ..ArticleRecord::new(1, "https://udndata.com/a/1")
        });
        let text = String::from_utf8(render(&set)).unwrap();
        let body = text.trim_start_matches('\u{feff}');
        assert_eq!(
            body,
            "News ID,Title,Date,Content\n1,\"標題, 含逗號\",2024-01-02,\"第一段\n第二段\"\n"
        );
    }

    #[test]
    fn rows_keep_insertion_order() {
        let set: ResultSet = (1..=3)
            .map(|i| ArticleRecord::new(i, format!("https://udndata.com/a/{i}")))
            .collect::<Vec<_>>()
            .into();
        let titles: Vec<String> = set.rows().map(|row| row[1].clone()).collect();
        assert_eq!(
            titles,
            [
                "Article 1 (title extraction failed)",
                "Article 2 (title extraction failed)",
                "Article 3 (title extraction failed)"
            ]
        );
    }

    #[test]
    fn write_csv_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        ResultSet::new().write_csv(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
    }
}
