use crate::{
    foundation::error::{LayoutError, LayoutResult},
    page::model::Page,
};

/// Every choice of one option index per article, in odometer order: the first
/// article's index changes slowest and the last article's fastest.
///
/// Yields nothing when any article has no options, and a single empty combination
/// for an empty article list.
#[derive(Clone, Debug)]
pub struct Combinations {
    radices: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl Combinations {
    pub fn new(radices: Vec<usize>) -> Self {
        let next = if radices.contains(&0) {
            None
        } else {
            Some(vec![0; radices.len()])
        };
        Self { radices, next }
    }

    pub fn for_page(page: &Page) -> Self {
        Self::new(page.articles().iter().map(|a| a.len()).collect())
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;
        let mut succ = current.clone();
        for slot in (0..succ.len()).rev() {
            succ[slot] += 1;
            if succ[slot] < self.radices[slot] {
                self.next = Some(succ);
                return Some(current);
            }
            succ[slot] = 0;
        }
        Some(current)
    }
}

/// The chosen option per article (in article order) and its total area.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Selection {
    pub indices: Vec<usize>,
    pub total_area: f64,
}

/// Pick the combination with the largest total area that still fits the page area.
///
/// Enumeration is exhaustive. Ties go to the combination enumerated first.
#[tracing::instrument(skip(page), fields(articles = page.articles().len()))]
pub fn find_best_options(page: &Page) -> LayoutResult<Selection> {
    let target = page.area();
    tracing::debug!(
        combinations = page.combination_count(),
        options = page.option_count(),
        "enumerating option combinations"
    );

    let mut best: Option<Selection> = None;
    for combo in Combinations::for_page(page) {
        let total_area: f64 = page
            .articles()
            .iter()
            .zip(&combo)
            .map(|(art, &idx)| art.options()[idx].area())
            .sum();
        if total_area > target {
            continue;
        }
        if best.as_ref().is_none_or(|b| total_area > b.total_area) {
            best = Some(Selection {
                indices: combo,
                total_area,
            });
        }
    }

    let best = best.ok_or(LayoutError::NoFeasibleCombination { page_area: target })?;
    tracing::info!(
        total_area = best.total_area,
        page_area = target,
        indices = ?best.indices,
        "best option combination"
    );
    Ok(best)
}

#[cfg(test)]
#[path = "../../tests/unit/select/combinations.rs"]
mod tests;
