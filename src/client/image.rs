//! Image page controller.

use super::api::ProxyApi;
use super::form::ImageForm;
use super::{ClientError, UsageRefresh};

/// One generated image as the page shows it. The URL doubles as the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub key: String,
    pub url: String,
}

#[derive(Default)]
pub struct ImageController {
    pub form: ImageForm,
    images: Vec<ImageView>,
}

impl ImageController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn images(&self) -> &[ImageView] {
        &self.images
    }

    /// Generate images from the form.
    ///
    /// The previous batch is cleared before the request goes out and replaced
    /// only on success. Entries without a URL are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidForm`] for a blank prompt (images are
    /// left as they were), or the request/response error otherwise.
    pub async fn submit(&mut self, api: &dyn ProxyApi, usage: &dyn UsageRefresh) -> Result<(), ClientError> {
        let request = self.form.validate()?;
        self.images.clear();

        let result = api.generate_images(&request).await;
        usage.refresh();

        match result {
            Ok(data) => {
                self.images = data
                    .into_iter()
                    .filter_map(|d| d.url)
                    .map(|url| ImageView { key: url.clone(), url })
                    .collect();
                self.form.reset();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "image request failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "image_test.rs"]
mod tests;
