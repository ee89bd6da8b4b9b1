use crate::{
    foundation::error::LayoutResult,
    gutter::alleys::{LayoutDescription, describe},
    layout::{
        stretch::stretch_edges,
        worst_fit::{SplitPolicy, worst_fit},
    },
    page::model::Page,
    select::{combinations::find_best_options, order::sort_articles_by_size},
};

/// Knobs for a layout run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutOpts {
    pub split: SplitPolicy,
    /// Push unobstructed article edges out to the layout's bounding box.
    pub stretch_edges: bool,
}

/// Lay out a page end to end and describe the result for the typesetter.
///
/// Reorders the page's articles largest first as a side effect. Nothing is returned
/// unless every article found a place.
#[tracing::instrument(skip(page), fields(articles = page.articles().len()))]
pub fn plan_page(page: &mut Page, opts: &LayoutOpts) -> LayoutResult<LayoutDescription> {
    page.validate()?;
    let selection = find_best_options(page)?;
    let preferred = sort_articles_by_size(page, &selection.indices)?;

    let page: &Page = page;
    let packing = worst_fit(page, &preferred, opts.split)?;
    for p in &packing.placements {
        tracing::info!(
            article = p.article.id(),
            area = %p.area,
            cols = p.option.num_cols(),
            "placing article"
        );
    }

    let placements = if opts.stretch_edges {
        stretch_edges(&packing.placements)
    } else {
        packing.placements
    };
    Ok(describe(page, &placements))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
