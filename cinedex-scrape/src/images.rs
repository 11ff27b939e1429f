use cinedex_tmdb::{Catalog, ImageKind};

/// Mirror one provider image. A missing or empty path is skipped and a
/// failed download is logged; neither affects the caller.
pub(crate) fn mirror_image<C: Catalog + ?Sized>(catalog: &C, kind: ImageKind, path: Option<&str>) {
    let Some(path) = path.filter(|p| !p.is_empty()) else {
        return;
    };
    if let Err(e) = catalog.download_image(kind, path) {
        log::warn!("{} image {} not saved: {}", kind, path, e);
    }
}
