use std::path::PathBuf;

use anyhow::Context as _;
use uuid::Uuid;

use forkful_domain::data_uri::ImagePayload;

use crate::domain::repository::{ImageKind, ImageStore};
use crate::error::CookbookServiceError;

/// Filesystem-backed image store. References are paths relative to the
/// media root, served by the static-files collaborator under `/media/`.
#[derive(Clone)]
pub struct FsImageStore {
    pub media_root: PathBuf,
}

impl ImageStore for FsImageStore {
    async fn store(
        &self,
        kind: ImageKind,
        payload: &ImagePayload,
    ) -> Result<String, CookbookServiceError> {
        let file_name = format!("{}.{}", Uuid::new_v4(), payload.extension);
        let reference = match kind {
            ImageKind::Recipe => format!("recipes/images/{file_name}"),
            ImageKind::Avatar => format!("users/images/{file_name}"),
        };
        let path = self.media_root.join(&reference);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("create image directory")?;
        }
        tokio::fs::write(&path, &payload.bytes)
            .await
            .context("write image file")?;
        Ok(reference)
    }
}
