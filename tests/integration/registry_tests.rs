//! Default API registry integration tests
//!
//! The registry is process-wide, so every check on it lives in a single test.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::OtherApi;
    use crate::common::{ScriptedApi, requests};
    use batch_uploader::{
        RetryPolicy, UploadError, Uploader, clear_default_api, default_api, set_default_api,
    };
    use std::sync::Arc;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_default_api_lifecycle() {
        clear_default_api();
        assert!(matches!(
            default_api::<ScriptedApi>(),
            Err(UploadError::Config(_))
        ));
        assert!(Uploader::<ScriptedApi>::with_default_api(requests(1)).is_err());

        let api = ScriptedApi::new();
        set_default_api(Arc::new(api.clone()));

        assert_ok!(default_api::<ScriptedApi>());
        let err = assert_err!(default_api::<OtherApi>());
        assert!(err.to_string().contains("OtherApi"));

        let mut uploader = assert_ok!(Uploader::<ScriptedApi>::with_default_api(requests(3)))
            .with_retry_policy(RetryPolicy::no_wait());
        assert_ok!(uploader.execute().await);
        assert_eq!(api.rounds(), vec![requests(3)]);

        clear_default_api();
        assert!(default_api::<ScriptedApi>().is_err());
    }
}
