//! newsfit lays out a newspaper page from articles that can each be set at several sizes.
//!
//! # Pipeline overview
//!
//! 1. **Select**: pick one option per article so the total area is as large as possible
//!    without exceeding the page ([`find_best_options`])
//! 2. **Order**: sort articles largest first ([`sort_articles_by_size`])
//! 3. **Pack**: worst-fit placement, backtracking to smaller options when an article has
//!    nowhere to go ([`worst_fit`])
//! 4. **Stretch** (optional): push unobstructed edges out to the layout's bounding box
//!    ([`stretch_edges`])
//! 5. **Describe**: find the alleys between articles and emit the layout for the
//!    typesetter ([`describe`], [`LayFile`])
//!
//! [`plan_page`] runs all of them. The [`Typesetter`] drives the LaTeX passes on either
//! side: the sizing pass that reports each article's options and the final pass that
//! sets the page from the layout file.
#![forbid(unsafe_code)]

pub mod foundation;
pub mod gutter;
pub mod layout;
pub mod page;
pub mod pipeline;
pub mod report;
pub mod select;
pub mod typeset;

pub use foundation::core::{Area, Point, Rect};
pub use foundation::error::{LayoutError, LayoutResult};
pub use gutter::alleys::{Alley, ArticleDirective, LayoutDescription, describe, extract_alleys};
pub use layout::stretch::stretch_edges;
pub use layout::worst_fit::{Packing, Placement, PlacementError, Space, SplitPolicy, worst_fit};
pub use page::model::{Article, ArticleOption, Page};
pub use pipeline::{LayoutOpts, plan_page};
pub use report::lay_file::{LayFile, write_lay_file};
pub use report::size_report::{SizeReportReader, read_size_report};
pub use select::combinations::{Selection, find_best_options};
pub use select::order::sort_articles_by_size;
pub use typeset::latex::{Pass, Typesetter, TypesetterConfig};
