use std::io::BufRead;

use crate::{
    foundation::error::{LayoutError, LayoutResult},
    page::model::{DEFAULT_COLUMN_WIDTH, Page},
};

const PAGE_SIZE: &str = "PAGESIZE:";
const OPTION: &str = "COLS,WIDTH,HEIGHT,FILE:";
const LAYOUT_TARGET: &str = "Generating Layout file ";

/// One line of the typesetter's sizing output.
#[derive(Clone, Debug, PartialEq)]
pub enum ReportLine {
    PageSize {
        width: f64,
        height: f64,
    },
    ArticleSize {
        num_cols: i64,
        width: f64,
        length: f64,
        source: String,
    },
    LayoutTarget(String),
    /// Anything else the typesetter printed.
    Text(String),
}

fn bad_line(line_no: usize, msg: impl std::fmt::Display) -> LayoutError {
    LayoutError::report(format!("line {line_no}: {msg}"))
}

fn parse_pt(field: &str, what: &str, line_no: usize) -> LayoutResult<f64> {
    let field = field.trim();
    let digits = field
        .strip_suffix("pt")
        .ok_or_else(|| bad_line(line_no, format!("{what} '{field}' is not a length in pt")))?;
    digits
        .trim()
        .parse::<f64>()
        .map_err(|e| bad_line(line_no, format!("{what} '{field}': {e}")))
}

/// Parse a single report line. Surrounding whitespace is ignored.
pub fn parse_line(line: &str, line_no: usize) -> LayoutResult<ReportLine> {
    let line = line.trim();

    if let Some(rest) = line.strip_prefix(PAGE_SIZE) {
        let fields: Vec<&str> = rest.split(',').collect();
        let [w, h] = fields.as_slice() else {
            return Err(bad_line(
                line_no,
                format!("expected '<w>pt,<h>pt' after {PAGE_SIZE}, got '{}'", rest.trim()),
            ));
        };
        return Ok(ReportLine::PageSize {
            width: parse_pt(w, "page width", line_no)?,
            height: parse_pt(h, "page height", line_no)?,
        });
    }

    if let Some(rest) = line.strip_prefix(OPTION) {
        let fields: Vec<&str> = rest.splitn(4, ',').collect();
        let [cols, w, l, source] = fields.as_slice() else {
            return Err(bad_line(
                line_no,
                format!("expected '<n>,<w>pt,<h>pt,<file>' after {OPTION}"),
            ));
        };
        let num_cols = cols
            .trim()
            .parse::<i64>()
            .map_err(|e| bad_line(line_no, format!("column count '{}': {e}", cols.trim())))?;
        let source = source.trim();
        if source.is_empty() {
            return Err(bad_line(line_no, "option without a source file"));
        }
        return Ok(ReportLine::ArticleSize {
            num_cols,
            width: parse_pt(w, "width", line_no)?,
            length: parse_pt(l, "height", line_no)?,
            source: source.to_string(),
        });
    }

    if let Some(name) = line.strip_prefix(LAYOUT_TARGET) {
        let name = name.trim();
        if name.is_empty() {
            return Err(bad_line(line_no, "layout file name is empty"));
        }
        return Ok(ReportLine::LayoutTarget(name.to_string()));
    }

    Ok(ReportLine::Text(line.to_string()))
}

/// Builds a [`Page`] from report lines as they arrive.
#[derive(Debug, Default)]
pub struct SizeReportReader {
    page: Option<Page>,
    target: Option<String>,
    line_no: usize,
}

impl SizeReportReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the next line and return what it was.
    pub fn feed(&mut self, line: &str) -> LayoutResult<ReportLine> {
        self.line_no += 1;
        let n = self.line_no;
        let parsed = parse_line(line, n)?;

        match &parsed {
            ReportLine::PageSize { width, height } => {
                match self.page.as_ref().map(|p| (p.width(), p.height())) {
                    Some(dims) if dims == (*width, *height) => {
                        tracing::debug!(line = n, "page size repeated");
                    }
                    Some(_) => return Err(bad_line(n, "page size declared twice")),
                    None => {
                        let page = Page::new(*width, *height, DEFAULT_COLUMN_WIDTH)
                            .map_err(|e| bad_line(n, e))?;
                        self.page = Some(page);
                    }
                }
            }
            ReportLine::ArticleSize {
                num_cols,
                width,
                length,
                source,
            } => {
                let page = self
                    .page
                    .as_mut()
                    .ok_or_else(|| bad_line(n, "article option before the page size"))?;
                if page.articles().last().is_none_or(|a| a.source() != source) {
                    page.new_article(source.clone());
                }
                if let Some(article) = page.last_article_mut() {
                    article
                        .add_option(*num_cols, *width, *length)
                        .map_err(|e| bad_line(n, e))?;
                }
            }
            ReportLine::LayoutTarget(name) => {
                tracing::info!(target_file = %name, "writing layout to");
                self.target = Some(name.clone());
            }
            ReportLine::Text(text) => {
                tracing::debug!(line = n, "{text}");
            }
        }
        Ok(parsed)
    }

    /// The finished page. Fails if the report never declared one.
    pub fn finish(self) -> LayoutResult<Page> {
        let mut page = self
            .page
            .ok_or_else(|| LayoutError::report("no PAGESIZE line in size report"))?;
        if let Some(target) = self.target {
            page.set_output_target(target);
        }

        tracing::info!(
            width = page.width(),
            height = page.height(),
            area = page.area(),
            articles = page.articles().len(),
            options = page.option_count(),
            "page size"
        );
        for art in page.articles() {
            for opt in art.options() {
                tracing::info!(
                    article = art.id(),
                    source = art.source(),
                    cols = opt.num_cols(),
                    width = opt.layout_width(),
                    height = opt.layout_height(),
                    area = opt.area(),
                    "option"
                );
            }
        }
        Ok(page)
    }
}

/// Read a whole size report.
///
/// Typesetter logs are not always valid UTF-8; stray bytes are replaced rather
/// than rejected.
pub fn read_size_report<R: BufRead>(reader: R) -> LayoutResult<Page> {
    use anyhow::Context as _;

    let mut report = SizeReportReader::new();
    for line in reader.split(b'\n') {
        let line = line.context("read size report")?;
        report.feed(&String::from_utf8_lossy(&line))?;
    }
    report.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/report/size_report.rs"]
mod tests;
