use super::*;

#[test]
fn single_box_has_no_alleys() {
    assert!(extract_alleys(&[Area::new(100.0, 100.0, 0.0, 0.0)]).is_empty());
    assert!(extract_alleys(&[]).is_empty());
}

#[test]
fn side_by_side_boxes_share_one_vertical_alley() {
    let alleys = extract_alleys(&[
        Area::new(10.0, 20.0, 0.0, 0.0),
        Area::new(10.0, 20.0, 10.0, 0.0),
    ]);
    assert_eq!(
        alleys,
        vec![Alley::Vertical {
            x: 10.0,
            y_start: 0.0,
            y_end: 20.0
        }]
    );
    assert_eq!(alleys[0].length(), 20.0);
}

#[test]
fn banner_over_two_columns() {
    // A spans the top; B and C sit side by side underneath.
    let alleys = extract_alleys(&[
        Area::new(20.0, 10.0, 0.0, 0.0),
        Area::new(10.0, 10.0, 0.0, 10.0),
        Area::new(10.0, 10.0, 10.0, 10.0),
    ]);
    assert_eq!(
        alleys,
        vec![
            Alley::Vertical {
                x: 10.0,
                y_start: 10.0,
                y_end: 20.0
            },
            Alley::Horizontal {
                y: 10.0,
                x_start: 0.0,
                x_end: 10.0
            },
            Alley::Horizontal {
                y: 10.0,
                x_start: 10.0,
                x_end: 20.0
            },
        ]
    );
}

#[test]
fn corners_of_different_boxes_do_not_make_an_alley() {
    // B's corners at (10,10) and (10,20) lie on A's right edge, but A alone owns
    // both (10,0) and (10,30), so the scan runs the full height and skips over B.
    let alleys = extract_alleys(&[
        Area::new(10.0, 30.0, 0.0, 0.0),
        Area::new(5.0, 10.0, 10.0, 10.0),
    ]);
    let verticals: Vec<_> = alleys
        .iter()
        .filter(|a| matches!(a, Alley::Vertical { .. }))
        .collect();
    assert_eq!(
        verticals,
        vec![&Alley::Vertical {
            x: 10.0,
            y_start: 0.0,
            y_end: 30.0
        }]
    );
}

#[test]
fn every_endpoint_is_a_corner() {
    let areas = [
        Area::new(30.0, 40.0, 0.0, 0.0),
        Area::new(20.0, 25.0, 30.0, 0.0),
        Area::new(20.0, 15.0, 30.0, 25.0),
    ];
    for alley in extract_alleys(&areas) {
        for p in alley.endpoints() {
            assert!(areas.iter().any(|a| a.has_corner(p)), "{p:?} of {alley:?}");
        }
    }
}

#[test]
fn describe_reports_text_block_and_articles() {
    let mut page = Page::new(100.0, 80.0, 10.0).unwrap();
    page.set_output_target("front.lay");
    page.new_article("lead.tex").add_option(2, 60.0, 50.0).unwrap();
    let art = &page.articles()[0];
    let placements = [Placement {
        area: Area::new(60.0, 50.0, 0.0, 0.0),
        article: art,
        option: &art.options()[0],
    }];

    let desc = describe(&page, &placements);
    assert_eq!(desc.output_target, "front.lay");
    assert_eq!(desc.text_width, 60.0);
    assert_eq!(desc.h_margin, 40.0);
    assert_eq!(desc.text_height, 50.0);
    assert_eq!(desc.v_margin, 30.0);
    assert!(desc.alleys.is_empty());
    assert_eq!(
        desc.articles,
        vec![ArticleDirective {
            id: 0,
            source: "lead.tex".to_string(),
            area: Area::new(60.0, 50.0, 0.0, 0.0),
            num_cols: 2,
        }]
    );
}

#[test]
fn alleys_serialize_with_a_kind_tag() {
    let json = serde_json::to_value(Alley::Horizontal {
        y: 1.0,
        x_start: 2.0,
        x_end: 3.0,
    })
    .unwrap();
    assert_eq!(json["kind"], "horizontal");
    assert_eq!(json["x_end"], 3.0);
}
