use crate::core::loader::{self, LoaderOptions};
use crate::core::{projector, writer};
use crate::core::{ConfigProvider, Pipeline, Record, Storage, TransformResult};
use crate::utils::error::Result;

/// CSV export → roster JSON.
pub struct StudentPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> StudentPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for StudentPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        let input_path = self.config.input_path();
        tracing::debug!("Reading input from: {}", input_path);

        let bytes = self.storage.read_file(input_path).await?;
        let options = LoaderOptions {
            delimiter: self.config.delimiter(),
        };
        loader::load_records(&bytes, &options)
    }

    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
        let students = projector::project_all(&data)?;
        Ok(TransformResult { students })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.config.output_path();
        writer::write_dataset(&self.storage, output_path, &result.students).await?;
        tracing::debug!("Roster saved with {} students", result.len());
        Ok(output_path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::utils::error::EtlError;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn put_file(&self, path: &str, data: &[u8]) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files
                .get(path)
                .cloned()
                .ok_or_else(|| EtlError::InputNotFound {
                    path: path.to_string(),
                })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    const CSV: &str = "\
Student ID,Full Name,Gender,Gmail,Program,Year Level,University
1,Ana Cruz,F,ana@x.com,BSCS,3,ABC U
2,Ben Reyes,M,ben@x.com,BSIT,1,ABC U
";

    #[tokio::test]
    async fn test_extract_reads_configured_input() {
        let storage = MockStorage::default();
        storage.put_file("students_data_2.0.csv", CSV.as_bytes()).await;
        let pipeline = StudentPipeline::new(storage, RunConfig::default());

        let records = pipeline.extract().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("Full Name"), Some(&json!("Ben Reyes")));
    }

    #[tokio::test]
    async fn test_extract_missing_input() {
        let pipeline = StudentPipeline::new(MockStorage::default(), RunConfig::default());

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, EtlError::InputNotFound { .. }));
    }

    #[tokio::test]
    async fn test_transform_preserves_count_and_order() {
        let storage = MockStorage::default();
        storage.put_file("students_data_2.0.csv", CSV.as_bytes()).await;
        let pipeline = StudentPipeline::new(storage, RunConfig::default());

        let records = pipeline.extract().await.unwrap();
        let result = pipeline.transform(records).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.students[0].student_id, json!(1));
        assert_eq!(result.students[1].student_id, json!(2));
        assert!(result.students.iter().all(|s| s.age.is_empty()));
    }

    #[tokio::test]
    async fn test_load_writes_configured_output() {
        let storage = MockStorage::default();
        storage.put_file("students_data_2.0.csv", CSV.as_bytes()).await;
        let pipeline = StudentPipeline::new(storage.clone(), RunConfig::default());

        let records = pipeline.extract().await.unwrap();
        let result = pipeline.transform(records).await.unwrap();
        let output_path = pipeline.load(result).await.unwrap();

        assert_eq!(output_path, "students.json");
        let written = storage.get_file("students.json").await.unwrap();
        let parsed: Value = serde_json::from_slice(&written).unwrap();
        assert_eq!(parsed[0]["email"], json!("ana@x.com"));
        assert_eq!(parsed[1]["course"], json!("BSIT"));
        assert_eq!(parsed[1]["age"], json!(""));
    }

    #[tokio::test]
    async fn test_load_empty_dataset() {
        let storage = MockStorage::default();
        let pipeline = StudentPipeline::new(storage.clone(), RunConfig::default());

        pipeline.load(TransformResult::default()).await.unwrap();

        assert_eq!(storage.get_file("students.json").await.unwrap(), b"[]");
    }
}
