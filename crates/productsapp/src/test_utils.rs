use crate::repository::ProductRepository;
use crate::store::fs_backend::FsBackend;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub repo: ProductRepository<FsBackend>,
    pub data_file: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    /// A repository over an empty collection document.
    pub fn new() -> Self {
        Self::with_document("[]")
    }

    /// A repository over a document with the given raw contents.
    pub fn with_document(contents: &str) -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let data_file = temp_dir.path().join("products.json");
        fs::write(&data_file, contents).expect("failed to seed document");
        Self::from_parts(temp_dir, data_file)
    }

    /// A repository whose document does not exist yet.
    pub fn without_document() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let data_file = temp_dir.path().join("products.json");
        Self::from_parts(temp_dir, data_file)
    }

    fn from_parts(temp_dir: TempDir, data_file: PathBuf) -> Self {
        let repo = ProductRepository::new(FsBackend::new(&data_file));
        Self {
            _temp_dir: temp_dir,
            repo,
            data_file,
        }
    }

    pub fn read_document(&self) -> String {
        fs::read_to_string(&self.data_file).expect("failed to read document")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductsError;
    use crate::model::Fields;
    use crate::query::ProductQuery;
    use serde_json::{json, Value};

    #[test]
    fn create_writes_pretty_json_array() {
        let env = TestEnv::new();
        let mut fields = Fields::new();
        fields.insert("name".into(), json!("Widget"));

        let created = env.repo.create(fields).unwrap();

        let raw = env.read_document();
        assert!(raw.starts_with("[\n  {"));
        let on_disk: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(on_disk[0]["id"], json!(created.id));
        assert_eq!(on_disk[0]["name"], json!("Widget"));
    }

    #[test]
    fn missing_document_is_a_read_error() {
        let env = TestEnv::without_document();
        assert!(matches!(
            env.repo.list(&ProductQuery::default()),
            Err(ProductsError::StorageRead { .. })
        ));
    }
}
