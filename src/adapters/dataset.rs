use crate::domain::model::{LoanRecord, LoanStatus};
use crate::utils::error::{FormError, Result};
use std::io::Read;
use std::path::Path;

/// Processed loan applications, one [`LoanRecord`] per CSV row.
#[derive(Debug, Clone, Default)]
pub struct LoanDataset {
    records: Vec<LoanRecord>,
}

impl LoanDataset {
    pub fn new(records: Vec<LoanRecord>) -> Self {
        Self { records }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            records = dataset.len(),
            "Loaded loan dataset"
        );
        Ok(dataset)
    }

    /// Reads CSV with a header row. Columns are matched by name; unknown columns are ignored.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if !headers.iter().any(|header| header == "status") {
            return Err(FormError::DatasetError {
                message: "dataset has no 'status' column".to_string(),
            });
        }

        let records = csv_reader
            .deserialize::<LoanRecord>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[LoanRecord] {
        &self.records
    }

    pub fn with_status(&self, status: LoanStatus) -> impl Iterator<Item = &LoanRecord> + '_ {
        let code = status.code();
        self.records
            .iter()
            .filter(move |record| record.status == Some(code))
    }
}
