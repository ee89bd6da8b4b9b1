use smallvec::SmallVec;

use crate::{
    foundation::{
        core::Area,
        error::{LayoutError, LayoutResult},
        math::{SPLIT_EPSILON, approx_gt},
    },
    page::model::{Article, ArticleOption, Page},
};

/// Which way leftover free space is cut after placing an article.
///
/// ```text
///  WidthFirst    HeightFirst
///  -----         -----
///  |A| |         |A|_|
///  |-| |         |   |
///  |_|_|         |___|
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitPolicy {
    /// Right strip spans the full height; bottom strip is as wide as the article.
    #[default]
    WidthFirst,
    /// Bottom strip spans the full width; right strip is as tall as the article.
    HeightFirst,
}

/// An article set at one of its options, at a position on the page.
#[derive(Clone, Copy, Debug)]
pub struct Placement<'p> {
    pub area: Area,
    pub article: &'p Article,
    pub option: &'p ArticleOption,
}

impl<'p> Placement<'p> {
    pub fn with_area(&self, area: Area) -> Self {
        Self { area, ..*self }
    }
}

/// A cell of the page: either taken by an article or still free.
#[derive(Clone, Copy, Debug)]
pub enum Space<'p> {
    Placed(Placement<'p>),
    Free(Area),
}

impl Space<'_> {
    pub fn area(&self) -> Area {
        match self {
            Space::Placed(p) => p.area,
            Space::Free(a) => *a,
        }
    }
}

/// A single placement attempt that ran out of room. Only ever seen inside the search.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    #[error("no free area fits article #{article_id} at {width}x{height}")]
    NoFreeArea {
        article_id: usize,
        width: f64,
        height: f64,
    },
}

/// Disjoint free rectangles, in the order the packer scans them.
#[derive(Clone, Debug)]
pub struct FreeList {
    areas: Vec<Area>,
}

impl FreeList {
    pub fn new(bounds: Area) -> Self {
        Self {
            areas: vec![bounds],
        }
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    /// Index of the free area that fits `w x h` with the most room to spare.
    ///
    /// On equal leftover the earliest area in scan order wins.
    pub fn worst_fit(&self, w: f64, h: f64) -> Option<usize> {
        let needed = w * h;
        let mut best: Option<(usize, f64)> = None;
        for (idx, a) in self.areas.iter().enumerate() {
            if a.w < w || a.h < h {
                continue;
            }
            let leftover = a.size() - needed;
            if best.is_none_or(|(_, most)| leftover > most) {
                best = Some((idx, leftover));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Take `w x h` from the top-left corner of free area `idx`; the remainder replaces
    /// it in place, right-hand strip first.
    pub fn carve(&mut self, idx: usize, w: f64, h: f64, policy: SplitPolicy) -> Area {
        let free = self.areas[idx];
        let rest = split(free, w, h, policy);
        self.areas.splice(idx..=idx, rest);
        Area::new(w, h, free.x, free.y)
    }
}

fn split(free: Area, w: f64, h: f64, policy: SplitPolicy) -> SmallVec<[Area; 2]> {
    let mut rest = SmallVec::new();
    let wider = approx_gt(free.w, w, SPLIT_EPSILON);
    let taller = approx_gt(free.h, h, SPLIT_EPSILON);
    match policy {
        SplitPolicy::WidthFirst => {
            if wider {
                rest.push(Area::new(free.w - w, free.h, free.x + w, free.y));
            }
            if taller {
                rest.push(Area::new(w, free.h - h, free.x, free.y + h));
            }
        }
        SplitPolicy::HeightFirst => {
            if wider {
                rest.push(Area::new(free.w - w, h, free.x + w, free.y));
            }
            if taller {
                rest.push(Area::new(free.w, free.h - h, free.x, free.y + h));
            }
        }
    }
    rest
}

/// A complete packing: one placement per article, in article order.
#[derive(Clone, Debug)]
pub struct Packing<'p> {
    pub placements: Vec<Placement<'p>>,
    /// Option index used for each article, in article order.
    pub indices: Vec<usize>,
    pub free: Vec<Area>,
    /// Option assignments tried before this one succeeded, itself included.
    pub attempts: u64,
}

impl<'p> Packing<'p> {
    pub fn spaces(&self) -> impl Iterator<Item = Space<'p>> + '_ {
        self.placements
            .iter()
            .copied()
            .map(Space::Placed)
            .chain(self.free.iter().copied().map(Space::Free))
    }
}

/// Place every article at exactly the given option, largest leftover first.
///
/// `indices` must hold a valid option index per article.
pub fn place_articles<'p>(
    page: &'p Page,
    indices: &[usize],
    policy: SplitPolicy,
) -> Result<Packing<'p>, PlacementError> {
    let mut free = FreeList::new(page.bounds());
    let mut placements = Vec::with_capacity(indices.len());

    for (article, &idx) in page.articles().iter().zip(indices) {
        let option = &article.options()[idx];
        let (w, h) = (option.layout_width(), option.layout_height());
        let slot = free.worst_fit(w, h).ok_or(PlacementError::NoFreeArea {
            article_id: article.id(),
            width: w,
            height: h,
        })?;
        let area = free.carve(slot, w, h, policy);
        tracing::trace!(article = article.id(), %area, cols = option.num_cols(), "placed");
        placements.push(Placement {
            area,
            article,
            option,
        });
    }

    Ok(Packing {
        placements,
        indices: indices.to_vec(),
        free: free.areas,
        attempts: 1,
    })
}

/// Lay the page out by worst fit, backing off to smaller options until it fits.
///
/// `preferred` holds the largest option index allowed per article (articles already
/// sorted largest first). The last article's index is the outermost loop of the
/// search; earlier articles are re-tried from their preferred index for each of its
/// candidates, and the first article's index changes fastest.
#[tracing::instrument(skip(page, preferred), fields(articles = page.articles().len()))]
pub fn worst_fit<'p>(
    page: &'p Page,
    preferred: &[usize],
    policy: SplitPolicy,
) -> LayoutResult<Packing<'p>> {
    if preferred.len() != page.articles().len() {
        return Err(LayoutError::validation(format!(
            "{} preferred options for {} articles",
            preferred.len(),
            page.articles().len()
        )));
    }
    if let Some((art, &idx)) = page
        .articles()
        .iter()
        .zip(preferred)
        .find(|(art, idx)| **idx >= art.len())
    {
        return Err(LayoutError::validation(format!(
            "preferred option {idx} out of range for article #{} ({} options)",
            art.id(),
            art.len()
        )));
    }

    let mut search = Search {
        page,
        preferred,
        policy,
        attempts: 0,
    };
    let mut indices = preferred.to_vec();
    match search.descend(&mut indices, preferred.len()) {
        Some(mut packing) => {
            packing.attempts = search.attempts;
            tracing::info!(
                attempts = search.attempts,
                unfilled = packing.free.len(),
                "layout found"
            );
            Ok(packing)
        }
        None => Err(LayoutError::NoFeasibleLayout {
            attempts: search.attempts,
        }),
    }
}

struct Search<'a, 'p> {
    page: &'p Page,
    preferred: &'a [usize],
    policy: SplitPolicy,
    attempts: u64,
}

impl<'p> Search<'_, 'p> {
    /// Try every index for the article at `depth - 1` (from preferred down to 0),
    /// solving the articles before it for each.
    fn descend(&mut self, indices: &mut [usize], depth: usize) -> Option<Packing<'p>> {
        let Some(slot) = depth.checked_sub(1) else {
            self.attempts += 1;
            return match place_articles(self.page, indices, self.policy) {
                Ok(packing) => Some(packing),
                Err(err) => {
                    tracing::debug!(?indices, %err, "attempt failed, backtracking");
                    None
                }
            };
        };
        for idx in (0..=self.preferred[slot]).rev() {
            indices[slot] = idx;
            if let Some(found) = self.descend(indices, slot) {
                return Some(found);
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/worst_fit.rs"]
mod tests;
