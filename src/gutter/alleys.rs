use std::collections::BTreeSet;

use crate::{
    foundation::{core::Area, math::Coord},
    layout::worst_fit::Placement,
    page::model::Page,
};

/// An empty strip between placed articles, drawn by the typesetter as a rule.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Alley {
    Vertical { x: f64, y_start: f64, y_end: f64 },
    Horizontal { y: f64, x_start: f64, x_end: f64 },
}

impl Alley {
    pub fn length(&self) -> f64 {
        match *self {
            Alley::Vertical { y_start, y_end, .. } => y_end - y_start,
            Alley::Horizontal { x_start, x_end, .. } => x_end - x_start,
        }
    }

    /// Both ends of the segment as `(x, y)` points.
    pub fn endpoints(&self) -> [(f64, f64); 2] {
        match *self {
            Alley::Vertical { x, y_start, y_end } => [(x, y_start), (x, y_end)],
            Alley::Horizontal { y, x_start, x_end } => [(x_start, y), (x_end, y)],
        }
    }
}

/// Where one article goes, and across how many columns.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ArticleDirective {
    pub id: usize,
    pub source: String,
    pub area: Area,
    pub num_cols: u32,
}

impl From<&Placement<'_>> for ArticleDirective {
    fn from(p: &Placement<'_>) -> Self {
        Self {
            id: p.article.id(),
            source: p.article.source().to_string(),
            area: p.area,
            num_cols: p.option.num_cols(),
        }
    }
}

/// Everything the typesetter needs to set the page: the text block, the alleys
/// between articles, and each article's box.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayoutDescription {
    pub output_target: String,
    /// Right-most edge of any placement.
    pub text_width: f64,
    /// Page width not covered by the text block.
    pub h_margin: f64,
    /// Bottom-most edge of any placement.
    pub text_height: f64,
    /// Page height not covered by the text block.
    pub v_margin: f64,
    /// Vertical alleys first, then horizontal.
    pub alleys: Vec<Alley>,
    pub articles: Vec<ArticleDirective>,
}

type Corner = (Coord, Coord);

fn corner(x: f64, y: f64) -> Corner {
    (Coord(x), Coord(y))
}

struct Grid<'a> {
    areas: &'a [Area],
    corners: BTreeSet<Corner>,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl<'a> Grid<'a> {
    fn new(areas: &'a [Area]) -> Self {
        let mut corners = BTreeSet::new();
        let mut xs = BTreeSet::new();
        let mut ys = BTreeSet::new();
        for a in areas {
            for (x, y) in a.corners() {
                corners.insert(corner(x, y));
                xs.insert(Coord(x));
                ys.insert(Coord(y));
            }
        }
        Self {
            areas,
            corners,
            xs: xs.into_iter().map(|c| c.0).collect(),
            ys: ys.into_iter().map(|c| c.0).collect(),
        }
    }

    fn is_corner(&self, p: (f64, f64)) -> bool {
        self.corners.contains(&corner(p.0, p.1))
    }

    /// Whether some single article has both points among its own corners.
    fn edge_of_one(&self, from: (f64, f64), to: (f64, f64)) -> bool {
        self.areas
            .iter()
            .any(|a| a.has_corner(from) && a.has_corner(to))
    }

    /// Walk one grid line greedily: from each corner, run to the nearest later corner
    /// the same article shares, then carry on from there.
    fn scan_line(&self, stops: &[f64], point: impl Fn(f64) -> (f64, f64)) -> Vec<(f64, f64)> {
        let mut segments = Vec::new();
        let mut i = 0;
        while i + 1 < stops.len() {
            let from = point(stops[i]);
            if self.is_corner(from) {
                let next = (i + 1..stops.len()).find(|&j| {
                    let to = point(stops[j]);
                    self.is_corner(to) && self.edge_of_one(from, to)
                });
                if let Some(j) = next {
                    segments.push((stops[i], stops[j]));
                    i = j;
                    continue;
                }
            }
            i += 1;
        }
        segments
    }
}

fn interior(lines: &[f64]) -> &[f64] {
    if lines.len() > 2 {
        &lines[1..lines.len() - 1]
    } else {
        &[]
    }
}

/// Find the alleys separating a set of placed boxes.
///
/// Alleys follow article edges on interior grid lines only; the outline of the
/// layout is left to the page margins.
pub fn extract_alleys(areas: &[Area]) -> Vec<Alley> {
    let grid = Grid::new(areas);
    let mut alleys = Vec::new();

    for &x in interior(&grid.xs) {
        for (y_start, y_end) in grid.scan_line(&grid.ys, |y| (x, y)) {
            alleys.push(Alley::Vertical { x, y_start, y_end });
        }
    }
    for &y in interior(&grid.ys) {
        for (x_start, x_end) in grid.scan_line(&grid.xs, |x| (x, y)) {
            alleys.push(Alley::Horizontal { y, x_start, x_end });
        }
    }
    alleys
}

/// Build the description handed to the typesetter for a finished layout.
pub fn describe(page: &Page, placements: &[Placement<'_>]) -> LayoutDescription {
    let areas: Vec<Area> = placements.iter().map(|p| p.area).collect();
    let max_x = areas.iter().map(Area::x2).fold(0.0, f64::max);
    let max_y = areas.iter().map(Area::y2).fold(0.0, f64::max);
    let alleys = extract_alleys(&areas);
    tracing::debug!(
        alleys = alleys.len(),
        text_width = max_x,
        text_height = max_y,
        "described layout"
    );

    LayoutDescription {
        output_target: page.output_target().to_string(),
        text_width: max_x,
        h_margin: page.width() - max_x,
        text_height: max_y,
        v_margin: page.height() - max_y,
        alleys,
        articles: placements.iter().map(ArticleDirective::from).collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gutter/alleys.rs"]
mod tests;
