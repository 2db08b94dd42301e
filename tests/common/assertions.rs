//! Custom test assertions

use batch_uploader::{BatchApi, Uploader};

/// Assertions over an executed uploader
pub trait UploaderAssertions {
    /// Every executed request has exactly one of response or error
    fn assert_all_settled(&self);

    /// `items()` pairs up with `requests()` in order
    fn assert_items_aligned(&self);
}

impl<C> UploaderAssertions for Uploader<C>
where
    C: BatchApi,
    C::Request: PartialEq + std::fmt::Debug,
{
    fn assert_all_settled(&self) {
        for (i, (request, response, error)) in self.items().enumerate() {
            assert!(
                response.is_some() != error.is_some(),
                "Expected request #{} ({:?}) to be settled exactly once, got response={:?} error={:?}",
                i,
                request,
                response,
                error
            );
        }
    }

    fn assert_items_aligned(&self) {
        let requests: Vec<_> = self.requests().collect();
        let items: Vec<_> = self.items().map(|(request, _, _)| request).collect();
        assert_eq!(items.len(), requests.len());
        assert_eq!(items, requests);
    }
}
