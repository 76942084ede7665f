// SPDX-FileCopyrightText: 2026 Setu Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Virtual try-on: a user photo plus a product go to the mocked backend
//! overlay, and the answer is revealed after a fixed processing delay.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use setu_config::SetuConfig;
use setu_core::api::{TryOnRequest, TryOnResponse};
use setu_core::{Product, RetailApi, SetuError};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum TryOnError {
    /// A product was picked before any photo was supplied. The message is
    /// the alert shown to the user.
    #[error("Please upload a clear front-facing photo to try on.")]
    MissingPhoto,

    #[error("cannot read photo {}: {source}", .path.display())]
    Photo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not an image (expected png, jpeg, gif, webp or bmp)", .0.display())]
    UnsupportedImage(PathBuf),

    #[error("try-on failed: {0}")]
    Backend(#[from] SetuError),
}

/// A user photo held in memory as a `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserImage {
    file_name: Option<String>,
    data_url: String,
}

impl UserImage {
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self {
            file_name: None,
            data_url: format!("data:{mime};base64,{}", STANDARD.encode(bytes)),
        }
    }

    /// Reads an image file. The mime type is taken from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, TryOnError> {
        let path = path.as_ref();
        let mime = image_mime(path).ok_or_else(|| TryOnError::UnsupportedImage(path.into()))?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| TryOnError::Photo {
                path: path.into(),
                source,
            })?;
        debug!(path = %path.display(), bytes = bytes.len(), mime, "photo loaded");

        let mut image = Self::from_bytes(mime, &bytes);
        image.file_name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        Ok(image)
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}

fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => return None,
    };
    Some(mime)
}

/// State of the try-on screen.
pub struct TryOnSession {
    api: Arc<dyn RetailApi>,
    processing_delay: Duration,
    photo: Option<UserImage>,
    selected: Option<Product>,
    loading: bool,
    result: Option<TryOnResponse>,
}

impl TryOnSession {
    pub fn new(api: Arc<dyn RetailApi>, processing_delay: Duration) -> Self {
        Self {
            api,
            processing_delay,
            photo: None,
            selected: None,
            loading: false,
            result: None,
        }
    }

    pub fn from_config(api: Arc<dyn RetailApi>, config: &SetuConfig) -> Self {
        Self::new(
            api,
            Duration::from_millis(config.tryon.processing_delay_ms),
        )
    }

    /// Replaces the current photo. A shown result stays until the next try-on.
    pub fn set_photo(&mut self, photo: UserImage) {
        self.photo = Some(photo);
    }

    pub fn photo(&self) -> Option<&UserImage> {
        self.photo.as_ref()
    }

    pub fn selected(&self) -> Option<&Product> {
        self.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&TryOnResponse> {
        self.result.as_ref()
    }

    /// Runs one try-on for `product`.
    ///
    /// Without a photo nothing is requested. Otherwise the previous result is
    /// dropped, the backend is called, and a successful answer is kept only
    /// after the processing delay. A failed call clears loading and leaves
    /// the result empty.
    pub async fn try_on(&mut self, product: Product) -> Result<&TryOnResponse, TryOnError> {
        let Some(photo) = &self.photo else {
            return Err(TryOnError::MissingPhoto);
        };
        let request = TryOnRequest {
            product_id: product.id,
            model_image_url: None,
            user_image_url: Some(photo.data_url().to_string()),
        };

        self.selected = Some(product);
        self.loading = true;
        self.result = None;

        let response = match self.api.virtual_try_on(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(product_id = request.product_id, error = %e, "virtual try-on failed");
                self.loading = false;
                return Err(e.into());
            }
        };

        tokio::time::sleep(self.processing_delay).await;
        info!(
            product_id = response.product_id,
            fit = %response.fit_rating,
            "try-on result ready"
        );
        self.loading = false;
        Ok(self.result.insert(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use setu_test_utils::{BackendCall, Endpoint, Failure, MockBackend, navy_blazer, oxford_shirt};
    use std::io::Write;

    fn session(backend: &Arc<MockBackend>) -> TryOnSession {
        TryOnSession::new(backend.clone(), Duration::from_millis(1500))
    }

    #[test]
    fn bytes_become_base64_data_url() {
        let image = UserImage::from_bytes("image/png", b"hello");
        assert_eq!(image.data_url(), "data:image/png;base64,aGVsbG8=");
        assert_eq!(image.file_name(), None);
    }

    #[test]
    fn mime_follows_extension() {
        assert_eq!(image_mime(Path::new("me.JPG")), Some("image/jpeg"));
        assert_eq!(image_mime(Path::new("me.webp")), Some("image/webp"));
        assert_eq!(image_mime(Path::new("notes.txt")), None);
        assert_eq!(image_mime(Path::new("no_extension")), None);
    }

    #[tokio::test]
    async fn photo_is_read_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(&[0x89, b'P', b'N', b'G']).unwrap();

        let image = UserImage::from_path(file.path()).await.unwrap();
        assert_eq!(image.data_url(), "data:image/png;base64,iVBORw==");
        assert!(image.file_name().unwrap().ends_with(".png"));
    }

    #[tokio::test]
    async fn unreadable_or_non_image_files_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = UserImage::from_path(dir.path().join("gone.jpg")).await;
        assert!(matches!(missing, Err(TryOnError::Photo { .. })));

        let text = UserImage::from_path(dir.path().join("notes.txt")).await;
        assert!(matches!(text, Err(TryOnError::UnsupportedImage(_))));
    }

    #[tokio::test]
    async fn missing_photo_issues_no_request() {
        let backend = Arc::new(MockBackend::with_products(vec![oxford_shirt()]));
        let mut tryon = session(&backend);

        let err = tryon.try_on(oxford_shirt()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please upload a clear front-facing photo to try on."
        );
        assert!(backend.calls().is_empty());
        assert!(tryon.selected().is_none());
        assert!(!tryon.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn result_is_revealed_after_processing_delay() {
        let backend = Arc::new(MockBackend::with_products(vec![oxford_shirt()]));
        let mut tryon = session(&backend);
        tryon.set_photo(UserImage::from_bytes("image/png", b"me"));

        let started = tokio::time::Instant::now();
        let result = tryon.try_on(oxford_shirt()).await.unwrap();
        assert_eq!(result.fit_rating, "Good Fit");
        assert!(started.elapsed() >= Duration::from_millis(1500));

        assert_eq!(
            backend.calls(),
            vec![BackendCall::VirtualTryOn(TryOnRequest {
                product_id: 1,
                model_image_url: None,
                user_image_url: Some("data:image/png;base64,bWU=".into()),
            })]
        );
        assert!(!tryon.is_loading());
        assert_eq!(tryon.selected().map(|p| p.id), Some(1));
        assert!(tryon.result().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_call_clears_loading_and_result() {
        let backend = Arc::new(MockBackend::with_products(vec![
            oxford_shirt(),
            navy_blazer(),
        ]));
        let mut tryon = session(&backend);
        tryon.set_photo(UserImage::from_bytes("image/jpeg", b"me"));
        tryon.try_on(oxford_shirt()).await.unwrap();

        backend.fail(Endpoint::TryOn, Failure::Transport);
        let err = tryon.try_on(navy_blazer()).await.unwrap_err();
        assert!(matches!(err, TryOnError::Backend(SetuError::Transport { .. })));
        assert!(!tryon.is_loading());
        assert!(tryon.result().is_none());
        assert_eq!(tryon.selected().map(|p| p.id), Some(2));
    }
}
