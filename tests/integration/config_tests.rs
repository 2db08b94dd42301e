//! Configuration integration tests
//!
//! Load a YAML file from disk and drive an upload with it.

#[cfg(test)]
mod tests {
    use crate::common::{Outcome, ScriptedApi, requests};
    use batch_uploader::config::Validate;
    use batch_uploader::{Config, UploadError, Uploader};
    use std::io::Write;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};

    const CONFIG: &str = r#"
batching:
  chunk_size: 3
  retry:
    max_attempts: 4
    backoff_multiplier_ms: 0
    backoff_min_ms: 0
    backoff_max_ms: 0
logging:
  level: "batch_uploader=debug"
"#;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_file_config_drives_upload() {
        let file = write_config(CONFIG);
        let config = assert_ok!(Config::from_file(file.path()).await);
        assert_eq!(config.logging().level, "batch_uploader=debug");

        let api = ScriptedApi::new();
        api.script("req-4", &[Outcome::Transient]);
        let mut uploader =
            Uploader::new(requests(7), Arc::new(api.clone())).with_config(config.batching());

        assert_err!(uploader.execute().await);

        assert_eq!(uploader.batches().len(), 3);
        assert_eq!(api.submissions("req-4"), 4);
    }

    #[tokio::test]
    async fn test_invalid_file_is_rejected() {
        let file = write_config("batching:\n  retry:\n    max_attempts: 0\n");
        let err = assert_err!(Config::from_file(file.path()).await);
        assert!(matches!(err, UploadError::Config(msg) if msg.contains("Batching config error")));
    }

    #[test]
    fn test_retry_config_to_policy() {
        let config = assert_ok!(Config::from_yaml(
            "batching:\n  retry:\n    backoff_multiplier_ms: 250\n    backoff_max_ms: 3000\n"
        ));
        assert_ok!(config.batching().validate());

        let policy = config.batching().retry.to_policy();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.backoff(1), Duration::from_secs(1));
        assert_eq!(policy.backoff(4), Duration::from_secs(2));
        assert_eq!(policy.backoff(6), Duration::from_secs(3));
    }
}
