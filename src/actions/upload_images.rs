use futures::future::try_join_all;

use crate::api::{ApiClient, FilePart, UploadedFile};
use crate::ClientError;

/// Uploads a batch of images concurrently.
pub struct UploadImagesAction {
    api: ApiClient,
}

impl UploadImagesAction {
    pub fn new(api: ApiClient) -> Self {
        UploadImagesAction { api }
    }

    /// Issues every upload at once and waits for all of them.
    ///
    /// # Returns
    ///
    /// - `Ok(files)` - one entry per input, in input order
    /// - `Err(_)` - the first failure; the batch as a whole is failed even if
    ///   other uploads went through
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "upload_images", skip_all, fields(count = files.len()), err)
    )]
    pub async fn execute(&self, files: Vec<FilePart>) -> Result<Vec<UploadedFile>, ClientError> {
        let count = files.len();
        let uploaded = try_join_all(files.into_iter().map(|file| self.api.upload_image(file))).await?;

        log::info!(
            target: "storefront_client",
            "msg=\"images uploaded\" count={count}"
        );

        Ok(uploaded)
    }
}
