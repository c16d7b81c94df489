use crate::config::CrawlRequest;
use crate::error::{Error, Result};
use crate::results::ArticleRecord;
use crate::utils::output_file_name;
use std::fs;
use std::path::PathBuf;

/// Durable destination for a finished crawl
pub trait RecordSink {
    /// Persist `records` for `request`, returning where they were written
    fn write(&mut self, request: &CrawlRequest, records: &[ArticleRecord]) -> Result<PathBuf>;
}

/// Writes each crawl to its own CSV file inside an output directory
#[derive(Debug, Clone)]
pub struct CsvSink {
    output_dir: PathBuf,
}

impl CsvSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Path the file for `request` is written to
    pub fn path_for(&self, request: &CrawlRequest) -> PathBuf {
        self.output_dir.join(output_file_name(
            request.query.as_str(),
            request.total_pages,
        ))
    }
}

impl RecordSink for CsvSink {
    fn write(&mut self, request: &CrawlRequest, records: &[ArticleRecord]) -> Result<PathBuf> {
        if records.is_empty() {
            return Err(Error::EmptyCollection);
        }

        fs::create_dir_all(&self.output_dir)?;
        let path = self.path_for(request);

        let mut writer = csv::Writer::from_path(&path)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        ::log::debug!("Wrote {} articles to {}", records.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchQuery;

    fn request(query: &str, total_pages: u32) -> CrawlRequest {
        CrawlRequest::new(SearchQuery::new(query).unwrap(), total_pages).unwrap()
    }

    #[test]
    fn test_writes_header_and_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let mut sink = CsvSink::new(&out);
        let records = vec![
            ArticleRecord::new("A", "Cat1"),
            ArticleRecord::new("B, with comma", "Cat2"),
            ArticleRecord::new(" \"quoted\" ", "Cat3"),
        ];

        let path = sink.write(&request("climate", 2), &records).unwrap();
        assert_eq!(path, out.join("articles-climate-2-page.csv"));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["TITLE", "CATEGORY"]);

        let read_back = reader
            .deserialize::<ArticleRecord>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(read_back, records);
    }

    #[test]
    fn test_file_name_replaces_every_space() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvSink::new(dir.path());

        let path = sink
            .write(
                &request("climate change now", 3),
                &[ArticleRecord::new("A", "Cat1")],
            )
            .unwrap();
        assert_eq!(
            path.file_name().unwrap(),
            "articles-climate-change-now-3-page.csv"
        );
    }

    #[test]
    fn test_empty_collection_is_rejected_without_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let mut sink = CsvSink::new(&out);

        let result = sink.write(&request("climate", 1), &[]);
        assert!(matches!(result, Err(Error::EmptyCollection)));
        assert!(!out.exists());
    }

    #[test]
    fn test_unwritable_destination_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("out");
        fs::write(&blocker, "not a directory").unwrap();
        let mut sink = CsvSink::new(&blocker);

        let result = sink.write(&request("climate", 1), &[ArticleRecord::new("A", "Cat1")]);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
