/// Startup-time failures from the render backend.
///
/// All variants are fatal to rendering: without a compiled program and a
/// live device there is no partial-functionality mode, so callers
/// propagate these instead of retrying.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),
    #[error("pipeline creation failed: {0}")]
    PipelineLink(String),
    #[error("no usable GPU context: {0}")]
    ContextUnavailable(String),
}
