pub(crate) mod block_font;
pub(crate) mod raster;
