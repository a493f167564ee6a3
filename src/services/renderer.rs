use saturation_key::{
    Host, PixelFormat, Rect, RenderArgs, RenderOutcome, SaturationFilter,
};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::error::{ImageError, ServiceError};
use crate::models::AppConfig;
use crate::rendering::{decode_png, encode_png, FrameBuffer};
use crate::services::{Deadline, RayonDispatcher, ThresholdCurve};

/// What to render: threshold curve, evaluation time and region.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub threshold: ThresholdCurve,
    pub time: f64,
    /// Output region; the whole frame when `None`
    pub window: Option<Rect>,
    /// Abort the render once this much time has passed
    pub deadline: Option<Duration>,
}

impl RenderRequest {
    pub fn new(threshold: ThresholdCurve) -> Self {
        Self {
            threshold,
            time: 0.0,
            window: None,
            deadline: None,
        }
    }
}

/// An encoded render result.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub outcome: RenderOutcome,
}

/// Decodes, keys and re-encodes images on a shared worker pool.
pub struct RenderService {
    dispatcher: RayonDispatcher,
    optimize: bool,
}

impl RenderService {
    pub fn new(threads: Option<usize>, optimize: bool) -> Result<Self, ServiceError> {
        Ok(Self {
            dispatcher: RayonDispatcher::new(threads)?,
            optimize,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ServiceError> {
        Self::new(config.threads, config.optimize)
    }

    pub fn threads(&self) -> usize {
        self.dispatcher.threads()
    }

    /// Key `source` into a new RGBA8 frame of the same size.
    ///
    /// Pixels outside the window stay transparent black.
    pub fn render_frame(
        &self,
        source: &FrameBuffer,
        request: &RenderRequest,
    ) -> Result<(FrameBuffer, RenderOutcome), ServiceError> {
        let window = request.window.unwrap_or_else(|| source.bounds());
        if window.x2 < window.x1 || window.y2 < window.y1 {
            return Err(ServiceError::Window(format!("inverted corners {window}")));
        }

        let mut output = FrameBuffer::blank(source.width(), source.height(), PixelFormat::RGBA8)?;
        let deadline = Deadline::after(request.deadline);
        let filter = SaturationFilter::new(Host::new(
            &request.threshold,
            &self.dispatcher,
            &deadline,
        ));

        let started = Instant::now();
        let outcome = filter.render(
            source,
            &mut output,
            RenderArgs {
                time: request.time,
                window,
            },
        )?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            RenderOutcome::Rendered { rows } => tracing::info!(
                width = source.width(),
                height = source.height(),
                %window,
                rows,
                threads = self.threads(),
                threshold = request.threshold.value(request.time),
                elapsed_ms,
                "Rendered saturation key"
            ),
            RenderOutcome::Aborted { rows_completed } => tracing::warn!(
                %window,
                rows_completed,
                elapsed_ms,
                "Render aborted"
            ),
        }

        Ok((output, outcome))
    }

    /// Decode a PNG, key it and encode the result.
    pub fn render_png(
        &self,
        png: &[u8],
        request: &RenderRequest,
    ) -> Result<RenderedImage, ServiceError> {
        let source = decode_png(png)?;
        let (output, outcome) = self.render_frame(&source, request)?;
        let png = encode_png(&output, self.optimize)?;
        Ok(RenderedImage {
            png,
            width: output.width(),
            height: output.height(),
            outcome,
        })
    }

    /// Render `input` to `output`. Nothing is written if the render was
    /// aborted.
    pub fn render_file(
        &self,
        input: &Path,
        output: &Path,
        request: &RenderRequest,
    ) -> Result<RenderOutcome, ServiceError> {
        let bytes = std::fs::read(input).map_err(ImageError::from)?;
        let rendered = self.render_png(&bytes, request)?;
        if rendered.outcome.is_aborted() {
            return Ok(rendered.outcome);
        }
        std::fs::write(output, &rendered.png).map_err(ImageError::from)?;
        tracing::debug!(
            path = %output.display(),
            bytes = rendered.png.len(),
            "Wrote PNG"
        );
        Ok(rendered.outcome)
    }
}
