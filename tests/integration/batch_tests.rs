//! Batch execution integration tests

#[cfg(test)]
mod tests {
    use crate::common::{Outcome, ScriptedApi, requests};
    use batch_uploader::{Batch, MAX_BATCH_SIZE, RetryPolicy, UploadError, should_retry_batch};
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use tokio_test::{assert_err, assert_ok};

    fn batch(api: &ScriptedApi, n: usize) -> Batch<ScriptedApi> {
        assert_ok!(Batch::with_retry_policy(
            requests(n),
            Arc::new(api.clone()),
            RetryPolicy::no_wait()
        ))
    }

    #[tokio::test]
    async fn test_full_batch_succeeds_in_one_round() {
        let api = ScriptedApi::new();
        let mut batch = batch(&api, MAX_BATCH_SIZE);

        assert_ok!(batch.execute().await);

        assert_eq!(api.rounds().len(), 1);
        assert_eq!(api.rounds()[0].len(), MAX_BATCH_SIZE);
        assert!(batch.errors().all(|e| e.is_none()));
        let ids: Vec<_> = batch
            .responses()
            .map(|r| r.and_then(|r| r.object_id()))
            .collect();
        assert_eq!(ids[7].as_deref(), Some("req-7"));
    }

    #[tokio::test]
    async fn test_oversized_batch_is_rejected() {
        let api = ScriptedApi::new();
        let err = assert_err!(Batch::new(requests(MAX_BATCH_SIZE + 1), Arc::new(api)));
        assert!(matches!(err, UploadError::OversizedBatch { size: 51, max: 50 }));
    }

    #[tokio::test]
    async fn test_only_failed_transient_requests_are_resubmitted() {
        let api = ScriptedApi::new();
        api.script("req-1", &[Outcome::Transient, Outcome::Ok])
            .script("req-3", &[Outcome::Dropped, Outcome::Ok])
            .script("req-4", &[Outcome::Permanent]);
        let mut batch = batch(&api, 5);

        // req-4 stays failed, but not for a transient reason
        assert_ok!(batch.execute().await);

        assert_eq!(
            api.rounds(),
            vec![
                requests(5),
                vec!["req-1".to_string(), "req-3".to_string()]
            ]
        );
        assert_eq!(batch.attempts(), 2);
        assert!(!should_retry_batch(batch.slots()));

        let errors: Vec<_> = batch.errors().collect();
        assert!(errors[..4].iter().all(|e| e.is_none()));
        let permanent = errors[4].unwrap();
        assert!(!permanent.is_transient);
        assert_eq!(permanent.http_status, Some(400));
        assert_eq!(permanent.description, "Invalid parameter");
    }

    #[tokio::test]
    async fn test_server_errors_are_retried_until_exhausted() {
        let api = ScriptedApi::new();
        api.script("req-0", &[Outcome::ServerError]);
        let mut batch = batch(&api, 2);

        let err = assert_err!(batch.execute().await);

        assert!(matches!(
            err,
            UploadError::RetriesExhausted {
                attempts: 5,
                pending: 1
            }
        ));
        assert_eq!(api.submissions("req-0"), 5);
        assert_eq!(api.submissions("req-1"), 1);

        let error = batch.errors().next().flatten().unwrap();
        assert!(error.is_transient);
        assert_eq!(error.http_status, Some(500));
    }

    #[tokio::test]
    async fn test_attempt_budget_from_policy() {
        let api = ScriptedApi::new();
        api.script("req-0", &[Outcome::Transient]);
        let mut batch = assert_ok!(Batch::with_retry_policy(
            requests(1),
            Arc::new(api.clone()),
            RetryPolicy::no_wait().with_max_attempts(3)
        ));

        assert_err!(batch.execute().await);
        assert_eq!(api.rounds().len(), 3);
    }

    #[tokio::test]
    async fn test_waits_between_rounds() {
        let api = ScriptedApi::new();
        api.script("req-0", &[Outcome::Transient, Outcome::Transient, Outcome::Ok]);
        let policy = RetryPolicy::default().with_backoff(
            Duration::from_millis(10),
            Duration::from_millis(10),
            Duration::from_millis(100),
        );
        let mut batch = assert_ok!(Batch::with_retry_policy(
            requests(1),
            Arc::new(api.clone()),
            policy
        ));

        let start = Instant::now();
        assert_ok!(batch.execute().await);

        // 10ms after the first round, 20ms after the second
        assert!(start.elapsed() >= Duration::from_millis(30));
        assert_eq!(batch.attempts(), 3);
    }

    #[tokio::test]
    async fn test_items_keep_request_order() {
        let api = ScriptedApi::new();
        api.script("req-2", &[Outcome::Permanent]);
        let mut batch = batch(&api, 4);
        assert_ok!(batch.execute().await);

        let items: Vec<_> = batch.items().collect();
        assert_eq!(items.len(), 4);
        for (i, (request, response, error)) in items.into_iter().enumerate() {
            assert_eq!(request, &format!("req-{}", i));
            assert_eq!(error.is_some(), i == 2);
            assert_eq!(response.is_some(), i != 2);
        }
    }
}
