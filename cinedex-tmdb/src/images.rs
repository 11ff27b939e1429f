use std::path::{Component, Path, PathBuf};

/// Provider image categories, each mirrored into its own subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Poster,
    Backdrop,
    Season,
    Still,
    Profile,
}

impl ImageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageKind::Poster => "poster",
            ImageKind::Backdrop => "backdrop",
            ImageKind::Season => "season",
            ImageKind::Still => "still",
            ImageKind::Profile => "profile",
        }
    }

    /// Size segment the provider serves this kind of image at.
    fn size_prefix(&self) -> &'static str {
        match self {
            ImageKind::Poster | ImageKind::Season | ImageKind::Profile => {
                "t/p/w220_and_h330_face"
            }
            ImageKind::Backdrop => "t/p/w1920_and_h1080_bestv2",
            ImageKind::Still => "t/p/w227_and_h127_bestv2",
        }
    }
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full download URL for a provider-relative image path like `/abc.jpg`.
pub fn image_url(image_base: &str, kind: ImageKind, path: &str) -> String {
    format!(
        "{}/{}/{}",
        image_base.trim_end_matches('/'),
        kind.size_prefix(),
        path.trim_start_matches('/')
    )
}

/// Where an image of `kind` is stored under `root`.
///
/// Returns `None` unless `path` names a single file, so a provider path can
/// never place a file outside `root/<kind>`.
pub fn local_image_path(root: &Path, kind: ImageKind, path: &str) -> Option<PathBuf> {
    let name = Path::new(path.trim_start_matches('/'));
    let mut components = name.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(file)), None) => Some(root.join(kind.as_str()).join(file)),
        _ => None,
    }
}
