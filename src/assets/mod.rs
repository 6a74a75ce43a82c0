//! Raster assets: the premultiplied image type, decode/save, and the per-job overlay art store.

/// Premultiplied RGBA8 images plus decode and PNG save.
pub mod image;
/// Static overlay art and job input images loaded once per job.
pub mod store;
