pub mod deadline;
pub mod dispatcher;
pub mod renderer;
pub mod threshold_curve;

pub use deadline::Deadline;
pub use dispatcher::RayonDispatcher;
pub use renderer::{RenderRequest, RenderService, RenderedImage};
pub use threshold_curve::ThresholdCurve;
