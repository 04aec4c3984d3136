use csv::ReaderBuilder;
use mogost_common::ToolkitError;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Tabular view of a CSV file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvView {
    pub file_name: String,
    /// First record of the file
    pub headers: Vec<String>,
    /// Every record after the header
    pub rows: Vec<Vec<String>>,
    /// Number of data rows (header excluded)
    pub total_rows: usize,
    /// Width of the header record
    pub total_columns: usize,
    /// Header plus the first data rows in preview mode, all records otherwise
    pub preview_rows: Vec<Vec<String>>,
}

/// Reads CSV content into a [`CsvView`]
#[derive(Debug, Clone)]
pub struct CsvViewer {
    preview_rows: usize,
}

impl CsvViewer {
    pub fn new() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }

    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    pub fn view_file(&self, path: &Path, preview: bool) -> mogost_common::Result<CsvView> {
        let file = File::open(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.view_reader(&file_name, file, preview)
    }

    /// Parse CSV content. The first record is the header; every record must
    /// have the same number of fields.
    pub fn view_reader<R: Read>(
        &self,
        file_name: &str,
        reader: R,
        preview: bool,
    ) -> mogost_common::Result<CsvView> {
        let mut reader = ReaderBuilder::new().has_headers(false).from_reader(reader);

        let mut records = reader
            .records()
            .map(|record| {
                record
                    .map(|r| r.iter().map(str::to_string).collect::<Vec<_>>())
                    .map_err(|e| ToolkitError::Csv(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if records.is_empty() {
            return Err(ToolkitError::InvalidInput("CSV file is empty".to_string()));
        }

        let rows = records.split_off(1);
        let headers = records.remove(0);

        let preview_rows = if preview {
            std::iter::once(headers.clone())
                .chain(rows.iter().take(self.preview_rows).cloned())
                .collect()
        } else {
            std::iter::once(headers.clone())
                .chain(rows.iter().cloned())
                .collect()
        };

        debug!(
            "Read {} rows x {} columns from {}",
            rows.len(),
            headers.len(),
            file_name
        );

        Ok(CsvView {
            file_name: file_name.to_string(),
            total_rows: rows.len(),
            total_columns: headers.len(),
            headers,
            rows,
            preview_rows,
        })
    }
}

impl Default for CsvViewer {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a file name carries the `.csv` extension accepted for upload
pub fn is_csv_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "csv")
}
