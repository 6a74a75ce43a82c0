use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{OverlayError, OverlayResult};

/// File and directory names inside a job's working directory.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WorkspaceLayout {
    /// Uploaded source video.
    pub input_video: String,
    /// Uploaded creator photo.
    pub creator_image: String,
    /// Uploaded logo.
    pub logo_image: String,
    /// Bio card background art.
    pub bio_card_art: String,
    /// Decorative bubble drawn behind the avatar.
    pub bubble_art: String,
    /// Circular avatar stencil.
    pub avatar_stencil: String,
    /// Logo card background art.
    pub logo_card_art: String,
    /// Finished video.
    pub output_video: String,
    /// Temporary subtree, removed at job end.
    pub temp_dir: String,
    /// Decoded frames, inside `temp_dir`.
    pub raw_frames_dir: String,
    /// Annotated frames, inside `temp_dir`.
    pub edited_frames_dir: String,
    /// Intermediate encode without audio, inside `temp_dir`.
    pub silent_video: String,
    /// Optional extra fonts.
    pub fonts_dir: String,
}

impl Default for WorkspaceLayout {
    fn default() -> Self {
        Self {
            input_video: "rawvideo.mp4".to_string(),
            creator_image: "creator.jpg".to_string(),
            logo_image: "expeerly-logo.png".to_string(),
            bio_card_art: "bioslider1080x1920.png".to_string(),
            bubble_art: "bubble1080x1920.png".to_string(),
            avatar_stencil: "mask.png".to_string(),
            logo_card_art: "logoslider1080x1920.png".to_string(),
            output_video: "edited_video.mp4".to_string(),
            temp_dir: "temp".to_string(),
            raw_frames_dir: "raw-frames".to_string(),
            edited_frames_dir: "edited-frames".to_string(),
            silent_video: "no-audio.mp4".to_string(),
            fonts_dir: "fonts".to_string(),
        }
    }
}

impl WorkspaceLayout {
    /// Every name must be a non-empty relative path that stays below the root.
    ///
    /// Cleanup removes several of these paths recursively, so an empty, absolute or `..` name
    /// would reach outside the working directory.
    pub fn validate(&self) -> OverlayResult<()> {
        for (field, name) in self.named_entries() {
            check_relative_name(field, name)?;
        }
        Ok(())
    }

    fn named_entries(&self) -> [(&'static str, &str); 13] {
        [
            ("input_video", self.input_video.as_str()),
            ("creator_image", self.creator_image.as_str()),
            ("logo_image", self.logo_image.as_str()),
            ("bio_card_art", self.bio_card_art.as_str()),
            ("bubble_art", self.bubble_art.as_str()),
            ("avatar_stencil", self.avatar_stencil.as_str()),
            ("logo_card_art", self.logo_card_art.as_str()),
            ("output_video", self.output_video.as_str()),
            ("temp_dir", self.temp_dir.as_str()),
            ("raw_frames_dir", self.raw_frames_dir.as_str()),
            ("edited_frames_dir", self.edited_frames_dir.as_str()),
            ("silent_video", self.silent_video.as_str()),
            ("fonts_dir", self.fonts_dir.as_str()),
        ]
    }
}

fn check_relative_name(field: &str, name: &str) -> OverlayResult<()> {
    let path = Path::new(name);
    let mut components = path.components().peekable();
    if components.peek().is_none() {
        return Err(OverlayError::validation(format!(
            "workspace.{field} must not be empty"
        )));
    }
    for c in components {
        if !matches!(c, std::path::Component::Normal(_)) {
            return Err(OverlayError::validation(format!(
                "workspace.{field} must be a relative path below the workspace root, got '{name}'"
            )));
        }
    }
    Ok(())
}

/// A cleanup step that did not succeed.
#[derive(Debug)]
pub struct CleanupFailure {
    /// Path that could not be removed.
    pub path: PathBuf,
    /// Underlying error.
    pub error: std::io::Error,
}

/// A job's working directory: the uploaded inputs, static art, temp subtree and output.
///
/// Only one job may use a workspace at a time.
#[derive(Clone, Debug)]
pub struct Workspace {
    root: PathBuf,
    layout: WorkspaceLayout,
}

impl Workspace {
    /// Workspace rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, layout: WorkspaceLayout) -> Self {
        Self {
            root: root.into(),
            layout,
        }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File name layout.
    pub fn layout(&self) -> &WorkspaceLayout {
        &self.layout
    }

    /// Uploaded source video.
    pub fn input_video(&self) -> PathBuf {
        self.root.join(&self.layout.input_video)
    }

    /// Uploaded creator photo.
    pub fn creator_image(&self) -> PathBuf {
        self.root.join(&self.layout.creator_image)
    }

    /// Uploaded logo.
    pub fn logo_image(&self) -> PathBuf {
        self.root.join(&self.layout.logo_image)
    }

    /// Bio card background art.
    pub fn bio_card_art(&self) -> PathBuf {
        self.root.join(&self.layout.bio_card_art)
    }

    /// Bubble art.
    pub fn bubble_art(&self) -> PathBuf {
        self.root.join(&self.layout.bubble_art)
    }

    /// Avatar stencil.
    pub fn avatar_stencil(&self) -> PathBuf {
        self.root.join(&self.layout.avatar_stencil)
    }

    /// Logo card background art.
    pub fn logo_card_art(&self) -> PathBuf {
        self.root.join(&self.layout.logo_card_art)
    }

    /// Finished video.
    pub fn output_video(&self) -> PathBuf {
        self.root.join(&self.layout.output_video)
    }

    /// Temporary subtree.
    pub fn temp_dir(&self) -> PathBuf {
        self.root.join(&self.layout.temp_dir)
    }

    /// Decoded frames.
    pub fn raw_frames_dir(&self) -> PathBuf {
        self.temp_dir().join(&self.layout.raw_frames_dir)
    }

    /// Annotated frames.
    pub fn edited_frames_dir(&self) -> PathBuf {
        self.temp_dir().join(&self.layout.edited_frames_dir)
    }

    /// Intermediate silent encode.
    pub fn silent_video(&self) -> PathBuf {
        self.temp_dir().join(&self.layout.silent_video)
    }

    /// Extra fonts directory.
    pub fn fonts_dir(&self) -> PathBuf {
        self.root.join(&self.layout.fonts_dir)
    }

    /// The three uploaded inputs, in upload order.
    pub fn inputs(&self) -> [PathBuf; 3] {
        [self.input_video(), self.creator_image(), self.logo_image()]
    }

    /// Check that every uploaded input is present.
    pub fn validate_inputs(&self) -> OverlayResult<()> {
        let missing: Vec<String> = self
            .inputs()
            .iter()
            .filter(|p| !p.is_file())
            .map(|p| p.display().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(OverlayError::validation(format!(
                "missing required input file(s): {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    /// Drop any stale output and temp subtree, then create empty frame directories.
    pub fn prepare_temp(&self) -> OverlayResult<()> {
        self.layout.validate()?;
        let output = self.output_video();
        remove_path(&output)
            .with_context(|| format!("remove stale output '{}'", output.display()))?;
        let temp = self.temp_dir();
        remove_path(&temp)
            .with_context(|| format!("remove stale temp dir '{}'", temp.display()))?;

        for dir in [self.raw_frames_dir(), self.edited_frames_dir()] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("create frame dir '{}'", dir.display()))?;
        }
        Ok(())
    }

    /// Remove the temp subtree and the uploaded inputs; after a failure also remove any partial
    /// output. Every step is attempted; failures are returned rather than raised.
    ///
    /// Nothing is removed when the layout fails [`WorkspaceLayout::validate`].
    pub fn cleanup(&self, succeeded: bool) -> Vec<CleanupFailure> {
        if let Err(e) = self.layout.validate() {
            return vec![CleanupFailure {
                path: self.root.clone(),
                error: std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()),
            }];
        }

        let mut targets = vec![self.temp_dir()];
        targets.extend(self.inputs());
        if !succeeded {
            targets.push(self.output_video());
        }

        targets
            .into_iter()
            .filter_map(|path| match remove_path(&path) {
                Ok(()) => None,
                Err(error) => Some(CleanupFailure { path, error }),
            })
            .collect()
    }

    /// Path of the finished video, or [`OverlayError::OutputNotFound`].
    pub fn finished_output(&self) -> OverlayResult<PathBuf> {
        let path = self.output_video();
        if path.is_file() {
            Ok(path)
        } else {
            Err(OverlayError::output_not_found(format!(
                "'{}' does not exist",
                path.display()
            )))
        }
    }
}

fn remove_path(path: &Path) -> std::io::Result<()> {
    let meta = match std::fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };
    let res = if meta.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    match res {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/workspace.rs"]
mod tests;
