use super::chart::create_panel_chart;
use super::figure::Figure;
use crate::error::ReportError;
use charming::theme::Theme;
use charming::HtmlRenderer;
use std::path::{Path, PathBuf};

/// Save `figure` as an interactive HTML chart.
///
/// A figure with several panels is saved as one file per panel, numbered
/// `<stem>-1.html`, `<stem>-2.html`, ... Returns the written paths.
pub fn render_html(
    figure: &Figure,
    path: &Path,
    size: (u32, u32),
    dark: bool,
) -> Result<Vec<PathBuf>, ReportError> {
    if figure.panels.is_empty() {
        return Err(ReportError::EmptyFigure(figure.title.clone()));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut written = Vec::with_capacity(figure.panels.len());
    for (index, panel) in figure.panels.iter().enumerate() {
        let panel_path = if figure.panels.len() == 1 {
            path.to_path_buf()
        } else {
            numbered_path(path, index + 1)
        };
        let chart = create_panel_chart(figure, panel, dark);
        let theme = if dark { Theme::Dark } else { Theme::Default };
        let mut renderer =
            HtmlRenderer::new(&figure.title, size.0 as u64, size.1 as u64).theme(theme);
        renderer
            .save(&chart, &panel_path)
            .map_err(|e| ReportError::HtmlRenderFailure(format!("{}", e)))?;
        written.push(panel_path);
    }
    Ok(written)
}

fn numbered_path(path: &Path, number: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}-{number}.html"))
}
