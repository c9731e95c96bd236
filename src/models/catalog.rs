use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Columns every catalog source must provide
pub const REQUIRED_COLUMNS: [&str; 3] = ["Tags", "AnswerText", "QuestionText"];

/// Errors raised while loading the catalog
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("Failed to open catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Malformed catalog row {line}: {message}")]
    MalformedRow { line: u64, message: String },

    #[error("Catalog contains no entries")]
    Empty,
}

/// One describable clothing or accessory option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Comma or space separated keywords
    #[serde(rename = "Tags")]
    pub tags: String,
    /// Human-readable item description
    #[serde(rename = "AnswerText")]
    pub answer: String,
    #[serde(rename = "QuestionText")]
    pub question: String,
}

impl CatalogEntry {
    pub fn new(
        tags: impl Into<String>,
        answer: impl Into<String>,
        question: impl Into<String>,
    ) -> Self {
        Self {
            tags: tags.into(),
            answer: answer.into(),
            question: question.into(),
        }
    }
}

/// Read-only collection of catalog entries
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Loads the catalog from a CSV file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| DataLoadError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let catalog = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            entries = catalog.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Parses CSV data with a header row
    ///
    /// Column order is free and extra columns are ignored, but `Tags`,
    /// `AnswerText` and `QuestionText` must all be present.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataLoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| DataLoadError::MalformedRow {
                line: 1,
                message: format!("Failed to read headers: {e}"),
            })?
            .clone();

        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(DataLoadError::MissingColumn(column));
            }
        }

        let mut entries = Vec::new();
        for record in reader.deserialize::<CatalogEntry>() {
            let entry = record.map_err(|e| DataLoadError::MalformedRow {
                line: e.position().map(|p| p.line()).unwrap_or(0),
                message: e.to_string(),
            })?;
            entries.push(entry);
        }

        Self::from_entries(entries)
    }

    /// Builds a catalog from in-memory entries
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, DataLoadError> {
        if entries.is_empty() {
            return Err(DataLoadError::Empty);
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tag text of every entry, in catalog order
    pub fn tag_texts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.tags.as_str())
    }

    /// Question text of every entry, in catalog order
    pub fn question_texts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.question.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
QuestionText,AnswerText,Tags
What to wear to the office?,Navy wool blazer,\"formal, office, blazer, wool, blue\"
Weekend look?,Light denim jeans,\"casual, jeans, denim, blue\"
";

    #[test]
    fn test_from_reader_parses_rows() {
        let catalog = Catalog::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[0].answer, "Navy wool blazer");
        assert_eq!(catalog.entries()[1].tags, "casual, jeans, denim, blue");
    }

    #[test]
    fn test_missing_column_rejected() {
        let data = "QuestionText,Tags\nq,casual\n";
        let result = Catalog::from_reader(data.as_bytes());
        assert!(matches!(result, Err(DataLoadError::MissingColumn("AnswerText"))));
    }

    #[test]
    fn test_header_only_is_empty() {
        let data = "QuestionText,AnswerText,Tags\n";
        let result = Catalog::from_reader(data.as_bytes());
        assert!(matches!(result, Err(DataLoadError::Empty)));
    }

    #[test]
    fn test_extra_columns_ignored() {
        let data = "Id,Tags,QuestionText,AnswerText\n1,\"casual, shirt\",q,White shirt\n";
        let catalog = Catalog::from_reader(data.as_bytes()).unwrap();
        assert_eq!(catalog.get(0).unwrap().answer, "White shirt");
    }

    #[test]
    fn test_missing_file() {
        let result = Catalog::load("/nonexistent/catalog.csv");
        assert!(matches!(result, Err(DataLoadError::Io { .. })));

        let error = result.unwrap_err();
        let source = std::error::Error::source(&error).unwrap();
        let io = source.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_short_row_is_malformed() {
        let data = "QuestionText,AnswerText,Tags\nq,White shirt,\"casual, shirt\"\nq,Jeans\n";
        let result = Catalog::from_reader(data.as_bytes());
        assert!(matches!(result, Err(DataLoadError::MalformedRow { .. })));
    }
}
