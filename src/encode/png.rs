use std::path::{Path, PathBuf};

use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::error::{PixmorphError, PixmorphResult},
    particles::buffer::ParticleBuffer,
    render::raster::{FrameRGBA, RasterOpts, rasterize},
};

#[derive(Clone, Debug)]
/// Options for [`PngSequenceSink`].
pub struct PngSequenceOpts {
    /// Output directory, created on `begin`.
    pub dir: PathBuf,
    /// File name prefix; frames are written as `<prefix>_<idx:05>.png`.
    pub prefix: String,
    /// Rasterizer settings applied to every frame.
    pub raster: RasterOpts,
}

/// Sink that rasterizes every frame and writes it as a numbered PNG.
pub struct PngSequenceSink {
    opts: PngSequenceOpts,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Create a new PNG sequence sink.
    pub fn new(opts: PngSequenceOpts) -> Self {
        Self {
            opts,
            written: Vec::new(),
        }
    }

    /// Paths written by the current export, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn frame_path(&self, idx: u64) -> PathBuf {
        self.opts
            .dir
            .join(format!("{}_{idx:05}.png", self.opts.prefix))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> PixmorphResult<()> {
        std::fs::create_dir_all(&self.opts.dir).map_err(|e| {
            PixmorphError::io(format!(
                "create output dir '{}': {e}",
                self.opts.dir.display()
            ))
        })?;
        self.written.clear();
        self.written.reserve(cfg.frame_count as usize);
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, time: f64, frame: &ParticleBuffer) -> PixmorphResult<()> {
        let rgba = rasterize(frame, time, &self.opts.raster)?;
        let path = self.frame_path(idx);
        write_png(&path, &rgba)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> PixmorphResult<()> {
        tracing::info!(
            frames = self.written.len(),
            dir = %self.opts.dir.display(),
            "png sequence written"
        );
        Ok(())
    }
}

/// Write one rasterized frame as PNG.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> PixmorphResult<()> {
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| PixmorphError::io(format!("write png '{}': {e}", path.display())))
}
