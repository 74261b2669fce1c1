use crate::error::ChartResult;
use crate::render::{BarRenderFrame, Renderer};

/// No-op renderer used by tests and headless plot usage.
///
/// Records how many frames and figures were submitted so behavior can be
/// asserted without a concrete backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer {
    frames_rendered: usize,
    figures_rendered: usize,
}

impl NullRenderer {
    #[must_use]
    pub fn frames_rendered(self) -> usize {
        self.frames_rendered
    }

    #[must_use]
    pub fn figures_rendered(self) -> usize {
        self.figures_rendered
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &BarRenderFrame) -> ChartResult<()> {
        self.frames_rendered += 1;
        self.figures_rendered += frame.figures.len();
        Ok(())
    }
}
