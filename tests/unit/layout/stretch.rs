use super::*;
use crate::page::model::{FIXED_SIZE_SOURCE, Page};

fn page_of(sources: &[&str], sizes: &[(f64, f64)]) -> Page {
    let mut page = Page::new(100.0, 100.0, 10.0).unwrap();
    for (src, &(w, h)) in sources.iter().zip(sizes) {
        page.new_article(*src).add_option(1, w, h).unwrap();
    }
    page
}

fn placed<'p>(page: &'p Page, areas: &[Area]) -> Vec<Placement<'p>> {
    page.articles()
        .iter()
        .zip(areas)
        .map(|(article, &area)| Placement {
            area,
            article,
            option: &article.options()[0],
        })
        .collect()
}

#[test]
fn ragged_bottom_is_closed() {
    let page = page_of(&["a", "b"], &[(10.0, 20.0), (10.0, 18.0)]);
    let input = placed(
        &page,
        &[Area::new(10.0, 20.0, 0.0, 0.0), Area::new(10.0, 18.0, 10.0, 0.0)],
    );
    let out = stretch_edges(&input);
    assert_eq!(out[0].area, Area::new(10.0, 20.0, 0.0, 0.0));
    assert_eq!(out[1].area, Area::new(10.0, 20.0, 10.0, 0.0));
}

#[test]
fn fixed_size_articles_keep_their_area() {
    let page = page_of(&["a", FIXED_SIZE_SOURCE], &[(10.0, 20.0), (10.0, 18.0)]);
    let input = placed(
        &page,
        &[Area::new(10.0, 20.0, 0.0, 0.0), Area::new(10.0, 18.0, 10.0, 0.0)],
    );
    let out = stretch_edges(&input);
    assert_eq!(out[1].area, input[1].area);
}

#[test]
fn blocked_top_edge_stays_put() {
    // B sits under the wider A, so only its right edge moves out.
    let page = page_of(&["a", "b"], &[(20.0, 10.0), (15.0, 10.0)]);
    let input = placed(
        &page,
        &[Area::new(20.0, 10.0, 0.0, 0.0), Area::new(15.0, 10.0, 0.0, 10.0)],
    );
    let out = stretch_edges(&input);
    assert_eq!(out[0].area, input[0].area);
    assert_eq!(out[1].area, Area::new(20.0, 10.0, 0.0, 10.0));
}

#[test]
fn bounding_box_is_preserved() {
    let page = page_of(&["a", "b", "c"], &[(30.0, 40.0), (20.0, 25.0), (20.0, 12.0)]);
    let input = placed(
        &page,
        &[
            Area::new(30.0, 40.0, 0.0, 0.0),
            Area::new(20.0, 25.0, 30.0, 0.0),
            Area::new(20.0, 12.0, 30.0, 25.0),
        ],
    );
    let before = Area::bounding_box(input.iter().map(|p| &p.area)).unwrap();
    let out = stretch_edges(&input);
    let after = Area::bounding_box(out.iter().map(|p| &p.area)).unwrap();
    assert_eq!(before, after);
    for p in &out {
        assert!(before.contains_area(&p.area), "{} escapes {}", p.area, before);
    }
    assert_eq!(out[2].area, Area::new(20.0, 15.0, 30.0, 25.0));
}

#[test]
fn corner_contact_does_not_block() {
    let a = Area::new(10.0, 10.0, 0.0, 0.0);
    assert_eq!(blocked_by(&a, &Area::new(10.0, 10.0, 10.0, 10.0)), Blocked::default());
    let right = blocked_by(&a, &Area::new(10.0, 10.0, 10.0, 0.0));
    assert!(right.right && !right.left && !right.above && !right.below);
}

#[test]
fn empty_input_is_empty_output() {
    assert!(stretch_edges(&[]).is_empty());
}
