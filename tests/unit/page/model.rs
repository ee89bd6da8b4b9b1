use super::*;

fn areas(art: &Article) -> Vec<f64> {
    art.options().iter().map(ArticleOption::area).collect()
}

#[test]
fn option_rejects_non_positive_columns() {
    assert!(matches!(
        ArticleOption::new(0, 10.0, 10.0),
        Err(LayoutError::InvalidOption(_))
    ));
    assert!(matches!(
        ArticleOption::new(-2, 10.0, 10.0),
        Err(LayoutError::InvalidOption(_))
    ));
    assert!(matches!(
        ArticleOption::new(1, 0.0, 10.0),
        Err(LayoutError::InvalidOption(_))
    ));
    assert!(matches!(
        ArticleOption::new(1, 10.0, f64::NAN),
        Err(LayoutError::InvalidOption(_))
    ));
    let ok = ArticleOption::new(2, 20.0, 30.0).unwrap();
    assert_eq!(ok.num_cols(), 2);
    assert_eq!(ok.layout_width(), 20.0);
    assert_eq!(ok.layout_height(), 30.0);
    assert_eq!(ok.area(), 600.0);
}

#[test]
fn add_option_keeps_ascending_area_order() {
    let mut art = Article::new(0, "a.tex");
    art.add_option(3, 30.0, 10.0).unwrap(); // 300
    art.add_option(1, 10.0, 50.0).unwrap(); // 500
    art.add_option(2, 20.0, 10.0).unwrap(); // 200
    art.add_option(4, 40.0, 20.0).unwrap(); // 800
    assert_eq!(areas(&art), vec![200.0, 300.0, 500.0, 800.0]);
}

#[test]
fn equal_area_options_keep_insertion_order() {
    let mut art = Article::new(0, "a.tex");
    art.add_option(1, 10.0, 20.0).unwrap();
    art.add_option(2, 20.0, 10.0).unwrap();
    let cols: Vec<u32> = art.options().iter().map(ArticleOption::num_cols).collect();
    assert_eq!(cols, vec![1, 2]);
}

#[test]
fn rejected_option_leaves_article_untouched() {
    let mut art = Article::new(0, "a.tex");
    art.add_option(1, 10.0, 20.0).unwrap();
    assert!(art.add_option(0, 10.0, 20.0).is_err());
    assert_eq!(art.len(), 1);
}

#[test]
fn page_rejects_degenerate_dimensions() {
    assert!(Page::new(0.0, 10.0, DEFAULT_COLUMN_WIDTH).is_err());
    assert!(Page::new(10.0, -1.0, DEFAULT_COLUMN_WIDTH).is_err());
    assert!(Page::new(10.0, 10.0, 0.0).is_err());
    assert!(Page::new(f64::INFINITY, 10.0, 1.0).is_err());
    let page = Page::new(100.0, 50.0, 10.0).unwrap();
    assert_eq!(page.area(), 5000.0);
    assert_eq!(page.bounds(), Area::new(100.0, 50.0, 0.0, 0.0));
}

#[test]
fn new_article_ids_follow_creation_order() {
    let mut page = Page::new(100.0, 100.0, 10.0).unwrap();
    page.new_article("a.tex").add_option(1, 10.0, 10.0).unwrap();
    page.new_article("b.tex").add_option(1, 10.0, 10.0).unwrap();
    let ids: Vec<usize> = page.articles().iter().map(Article::id).collect();
    assert_eq!(ids, vec![0, 1]);
    assert_eq!(page.articles()[1].source(), "b.tex");
}

#[test]
fn counts_options_and_combinations() {
    let mut page = Page::new(100.0, 100.0, 10.0).unwrap();
    let a = page.new_article("a");
    a.add_option(1, 1.0, 1.0).unwrap();
    a.add_option(2, 2.0, 1.0).unwrap();
    let b = page.new_article("b");
    for c in 1..=3 {
        b.add_option(c, c as f64, 1.0).unwrap();
    }
    assert_eq!(page.option_count(), 5);
    assert_eq!(page.combination_count(), 6);
}

#[test]
fn fixed_size_sentinel_is_recognised() {
    assert!(Article::new(0, FIXED_SIZE_SOURCE).is_fixed_size());
    assert!(!Article::new(0, "raster.tex").is_fixed_size());
}

#[test]
fn estimated_article_stops_at_page_width() {
    let mut page = Page::new(100.0, 300.0, 40.0).unwrap();
    let art = page.add_estimated_article("story", 10.0, 120.0).unwrap();
    let opts: Vec<(u32, f64, f64)> = art
        .options()
        .iter()
        .map(|o| (o.num_cols(), o.layout_width(), o.layout_height()))
        .collect();
    // 3 columns would be 120pt wide, wider than the page.
    assert_eq!(opts.len(), 2);
    assert!(opts.contains(&(1, 40.0, 130.0)));
    assert!(opts.contains(&(2, 80.0, 70.0)));
}

#[test]
fn estimated_article_needs_one_column_of_room() {
    let mut page = Page::new(30.0, 300.0, 40.0).unwrap();
    assert!(page.add_estimated_article("story", 10.0, 120.0).is_err());
    assert!(page.articles().is_empty());
}

#[test]
fn validate_requires_articles_with_options() {
    let mut page = Page::new(100.0, 100.0, 10.0).unwrap();
    assert!(page.validate().is_err());
    page.new_article("empty");
    assert!(page.validate().is_err());
    page.last_article_mut()
        .unwrap()
        .add_option(1, 10.0, 10.0)
        .unwrap();
    page.validate().unwrap();
}

#[test]
fn json_page_loads_through_validating_constructors() {
    let json = r#"{
        "width": 600,
        "height": 400,
        "column_width": 50,
        "output_target": "front.lay",
        "articles": [
            { "source": "lead.tex", "options": [
                { "num_cols": 2, "width": 100, "length": 50 },
                { "num_cols": 1, "width": 50, "length": 60 }
            ] },
            { "source": "brief.tex", "estimate": { "heading": 5, "column_length": 40 } }
        ]
    }"#;
    let page = Page::from_json_str(json).unwrap();
    assert_eq!(page.width(), 600.0);
    assert_eq!(page.column_width(), 50.0);
    assert_eq!(page.output_target(), "front.lay");
    assert_eq!(page.articles().len(), 2);
    assert_eq!(areas(&page.articles()[0]), vec![3000.0, 5000.0]);
    assert_eq!(page.articles()[1].len(), 4);
    assert_eq!(page.articles()[1].id(), 1);
}

#[test]
fn json_page_defaults_column_width() {
    let json = r#"{"width": 10, "height": 10,
        "articles": [{"source": "a", "options": [{"num_cols": 1, "width": 1, "length": 1}]}]}"#;
    let page = Page::from_json_str(json).unwrap();
    assert_eq!(page.column_width(), DEFAULT_COLUMN_WIDTH);
    assert_eq!(page.output_target(), "");
}

#[test]
fn json_page_rejects_bad_input() {
    let bad_cols = r#"{"width": 10, "height": 10,
        "articles": [{"source": "a", "options": [{"num_cols": 0, "width": 1, "length": 1}]}]}"#;
    assert!(matches!(
        Page::from_json_str(bad_cols),
        Err(LayoutError::InvalidOption(_))
    ));

    let no_options = r#"{"width": 10, "height": 10, "articles": [{"source": "a"}]}"#;
    assert!(matches!(
        Page::from_json_str(no_options),
        Err(LayoutError::Validation(_))
    ));

    let unknown = r#"{"width": 10, "height": 10, "articles": [], "colour": "red"}"#;
    assert!(matches!(
        Page::from_json_str(unknown),
        Err(LayoutError::Serde(_))
    ));
}
