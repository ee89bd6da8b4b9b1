use crate::{
    foundation::error::{LayoutError, LayoutResult},
    page::model::{Article, Page},
};

/// Reorder the page's articles so the largest selected option comes first.
///
/// `selection` holds one option index per article in the current article order. The
/// returned indices follow the new order, so each article keeps its chosen option.
/// Articles of equal selected area keep their relative order.
pub fn sort_articles_by_size(page: &mut Page, selection: &[usize]) -> LayoutResult<Vec<usize>> {
    if selection.len() != page.articles.len() {
        return Err(LayoutError::validation(format!(
            "selection has {} entries for {} articles",
            selection.len(),
            page.articles.len()
        )));
    }

    let mut keyed = Vec::with_capacity(selection.len());
    for (pos, (art, &idx)) in page.articles.iter().zip(selection).enumerate() {
        let option = art.option(idx).ok_or_else(|| {
            LayoutError::validation(format!(
                "option index {idx} out of range for article #{}",
                art.id()
            ))
        })?;
        keyed.push((option.area(), pos, idx));
    }
    // stable: equal areas stay in page order
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut slots: Vec<Option<Article>> = page.articles.drain(..).map(Some).collect();
    for &(_, pos, _) in &keyed {
        if let Some(art) = slots[pos].take() {
            page.articles.push(art);
        }
    }

    let order: Vec<usize> = page.articles.iter().map(Article::id).collect();
    tracing::debug!(?order, "articles ordered by selected area");
    Ok(keyed.into_iter().map(|(_, _, idx)| idx).collect())
}

#[cfg(test)]
#[path = "../../tests/unit/select/order.rs"]
mod tests;
