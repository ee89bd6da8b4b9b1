use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use crate::foundation::{
    core::Area,
    error::{LayoutError, LayoutResult},
};

/// 11 picas, in millimetres.
pub const DEFAULT_COLUMN_WIDTH: f64 = 46.56666663;

/// Widest rough-sizing option generated by [`Page::add_estimated_article`].
pub const MAX_COLS_PER_ARTICLE: u32 = 4;

/// Source identifier marking an article whose size cannot be changed (e.g. an image).
pub const FIXED_SIZE_SOURCE: &str = "RASTER";

/// One way of setting an article: across `num_cols` columns, occupying `width x length`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ArticleOption {
    num_cols: u32,
    width: f64,
    length: f64,
}

impl ArticleOption {
    pub fn new(num_cols: i64, width: f64, length: f64) -> LayoutResult<Self> {
        if num_cols <= 0 {
            return Err(LayoutError::invalid_option(format!(
                "column count must be a positive integer, got {num_cols}"
            )));
        }
        let num_cols = u32::try_from(num_cols).map_err(|_| {
            LayoutError::invalid_option(format!("column count {num_cols} is out of range"))
        })?;
        for (name, v) in [("width", width), ("length", length)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(LayoutError::invalid_option(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        Ok(Self {
            num_cols,
            width,
            length,
        })
    }

    pub fn num_cols(&self) -> u32 {
        self.num_cols
    }

    /// Layout width, including the gutters between its columns.
    pub fn layout_width(&self) -> f64 {
        self.width
    }

    /// Layout height; not column inches.
    pub fn layout_height(&self) -> f64 {
        self.length
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn area(&self) -> f64 {
        self.width * self.length
    }
}

/// A piece of content to be placed, with every size it can be set at.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Article {
    id: usize,
    source: String,
    options: Vec<ArticleOption>, // ascending by area
}

impl Article {
    pub fn new(id: usize, source: impl Into<String>) -> Self {
        Self {
            id,
            source: source.into(),
            options: Vec::new(),
        }
    }

    /// Add a sizing option, keeping options sorted smallest area first.
    ///
    /// Options of equal area keep their insertion order.
    pub fn add_option(&mut self, num_cols: i64, width: f64, length: f64) -> LayoutResult<()> {
        let option = ArticleOption::new(num_cols, width, length)?;
        let pos = self
            .options
            .partition_point(|o| o.area() <= option.area());
        self.options.insert(pos, option);
        Ok(())
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn options(&self) -> &[ArticleOption] {
        &self.options
    }

    pub fn option(&self, idx: usize) -> Option<&ArticleOption> {
        self.options.get(idx)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn is_fixed_size(&self) -> bool {
        self.source == FIXED_SIZE_SOURCE
    }
}

/// The page being laid out, owning the articles to place on it.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Page {
    width: f64,
    height: f64,
    column_width: f64,
    pub(crate) articles: Vec<Article>,
    output_target: String,
}

impl Page {
    pub fn new(width: f64, height: f64, column_width: f64) -> LayoutResult<Self> {
        for (name, v) in [
            ("width", width),
            ("height", height),
            ("column_width", column_width),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(LayoutError::validation(format!(
                    "page {name} must be finite and > 0, got {v}"
                )));
            }
        }
        Ok(Self {
            width,
            height,
            column_width,
            articles: Vec::new(),
            output_target: String::new(),
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn column_width(&self) -> f64 {
        self.column_width
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn bounds(&self) -> Area {
        Area::new(self.width, self.height, 0.0, 0.0)
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn article(&self, idx: usize) -> Option<&Article> {
        self.articles.get(idx)
    }

    pub fn last_article_mut(&mut self) -> Option<&mut Article> {
        self.articles.last_mut()
    }

    pub fn output_target(&self) -> &str {
        &self.output_target
    }

    pub fn set_output_target(&mut self, target: impl Into<String>) {
        self.output_target = target.into();
    }

    /// Append a new, option-less article; its id is its position at creation.
    pub fn new_article(&mut self, source: impl Into<String>) -> &mut Article {
        let id = self.articles.len();
        self.articles.push(Article::new(id, source));
        let last = self.articles.len() - 1;
        &mut self.articles[last]
    }

    /// Rough sizing: one option per column count that fits the page width, each
    /// `heading` tall plus the column length shared across the columns.
    pub fn add_estimated_article(
        &mut self,
        source: impl Into<String>,
        heading: f64,
        column_length: f64,
    ) -> LayoutResult<&Article> {
        if !heading.is_finite() || heading < 0.0 {
            return Err(LayoutError::validation(format!(
                "estimate heading must be finite and >= 0, got {heading}"
            )));
        }
        if !column_length.is_finite() || column_length <= 0.0 {
            return Err(LayoutError::validation(format!(
                "estimate column_length must be finite and > 0, got {column_length}"
            )));
        }
        let mut art = Article::new(self.articles.len(), source);
        for cols in 1..=MAX_COLS_PER_ARTICLE {
            let width = f64::from(cols) * self.column_width;
            if width > self.width {
                break;
            }
            art.add_option(
                i64::from(cols),
                width,
                heading + column_length / f64::from(cols),
            )?;
        }
        if art.is_empty() {
            return Err(LayoutError::validation(format!(
                "page is narrower than one column for article '{}'",
                art.source()
            )));
        }
        self.articles.push(art);
        Ok(&self.articles[self.articles.len() - 1])
    }

    /// Total number of options across all articles.
    pub fn option_count(&self) -> usize {
        self.articles.iter().map(Article::len).sum()
    }

    /// Number of option combinations the selector will enumerate (saturating).
    pub fn combination_count(&self) -> u64 {
        self.articles
            .iter()
            .fold(1u64, |acc, a| acc.saturating_mul(a.len() as u64))
    }

    /// Check that the page is ready to be laid out.
    pub fn validate(&self) -> LayoutResult<()> {
        if self.articles.is_empty() {
            return Err(LayoutError::validation("page has no articles"));
        }
        for art in &self.articles {
            if art.is_empty() {
                return Err(LayoutError::validation(format!(
                    "article #{} ('{}') has no options",
                    art.id,
                    art.source
                )));
            }
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> LayoutResult<Self> {
        let def: PageDef = serde_json::from_str(s)
            .map_err(|e| LayoutError::serde(format!("page JSON: {e}")))?;
        def.build()
    }

    pub fn from_reader(r: impl Read) -> LayoutResult<Self> {
        let def: PageDef = serde_json::from_reader(r)
            .map_err(|e| LayoutError::serde(format!("page JSON: {e}")))?;
        def.build()
    }

    pub fn from_path(path: impl AsRef<Path>) -> LayoutResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            LayoutError::validation(format!("open page JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct PageDef {
    width: f64,
    height: f64,
    #[serde(default = "default_column_width")]
    column_width: f64,
    #[serde(default)]
    output_target: String,
    articles: Vec<ArticleDef>,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ArticleDef {
    source: String,
    #[serde(default)]
    options: Vec<OptionDef>,
    #[serde(default)]
    estimate: Option<EstimateDef>,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionDef {
    num_cols: i64,
    width: f64,
    length: f64,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct EstimateDef {
    #[serde(default)]
    heading: f64,
    column_length: f64,
}

fn default_column_width() -> f64 {
    DEFAULT_COLUMN_WIDTH
}

impl PageDef {
    fn build(self) -> LayoutResult<Page> {
        let mut page = Page::new(self.width, self.height, self.column_width)?;
        page.set_output_target(self.output_target);
        for art in self.articles {
            match (art.options.is_empty(), art.estimate) {
                (false, None) => {
                    let a = page.new_article(art.source);
                    for o in art.options {
                        a.add_option(o.num_cols, o.width, o.length)?;
                    }
                }
                (true, Some(est)) => {
                    page.add_estimated_article(art.source, est.heading, est.column_length)?;
                }
                (false, Some(_)) => {
                    return Err(LayoutError::validation(format!(
                        "article '{}' has both options and an estimate",
                        art.source
                    )));
                }
                (true, None) => {
                    return Err(LayoutError::validation(format!(
                        "article '{}' has no options",
                        art.source
                    )));
                }
            }
        }
        Ok(page)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/model.rs"]
mod tests;
