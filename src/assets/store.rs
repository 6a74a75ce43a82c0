use std::path::Path;

use crate::assets::image::{PremulImage, load_image, load_image_opaque};
use crate::foundation::error::{OverlayError, OverlayResult};
use crate::pipeline::workspace::Workspace;

/// Every image a job composites, decoded once up front.
#[derive(Clone, Debug)]
pub struct OverlayAssets {
    /// Bio card background.
    pub bio_card_art: PremulImage,
    /// Bubble behind the avatar.
    pub bubble: PremulImage,
    /// Circular avatar stencil, loaded without its alpha channel.
    pub avatar_stencil: PremulImage,
    /// Logo card background.
    pub logo_card_art: PremulImage,
    /// Uploaded creator photo.
    pub creator: PremulImage,
    /// Uploaded logo.
    pub logo: PremulImage,
}

impl OverlayAssets {
    /// Load the static art and the job's uploaded images from `workspace`.
    ///
    /// Any unreadable or undecodable file is reported as [`OverlayError::AssetLoad`].
    #[tracing::instrument(skip_all, fields(root = %workspace.root().display()))]
    pub fn load(workspace: &Workspace) -> OverlayResult<Self> {
        let assets = Self {
            bio_card_art: load_asset(&workspace.bio_card_art())?,
            bubble: load_asset(&workspace.bubble_art())?,
            avatar_stencil: load_image_opaque(&workspace.avatar_stencil())
                .map_err(|e| OverlayError::asset_load(format!("{e:#}")))?,
            logo_card_art: load_asset(&workspace.logo_card_art())?,
            creator: load_asset(&workspace.creator_image())?,
            logo: load_asset(&workspace.logo_image())?,
        };
        tracing::debug!(
            bio_card_w = assets.bio_card_art.width,
            bio_card_h = assets.bio_card_art.height,
            logo_card_w = assets.logo_card_art.width,
            logo_card_h = assets.logo_card_art.height,
            "overlay assets loaded"
        );
        Ok(assets)
    }
}

fn load_asset(path: &Path) -> OverlayResult<PremulImage> {
    load_image(path).map_err(|e| OverlayError::asset_load(format!("{e:#}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
