use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("Cannot serialize report")]
    SerializationError(#[from] serde_json::Error),
    #[error("Cannot render SVG chart: {0}")]
    SvgRenderFailure(String),
    #[error("Cannot render HTML chart: {0}")]
    HtmlRenderFailure(String),
    #[error("Figure '{0}' has no panels to draw")]
    EmptyFigure(String),
}
