use crate::{foundation::core::Area, layout::worst_fit::Placement};

/// Sides of a placement on which another placement stops it from growing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Blocked {
    pub left: bool,
    pub right: bool,
    pub above: bool,
    pub below: bool,
}

impl std::ops::BitOr for Blocked {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            left: self.left || rhs.left,
            right: self.right || rhs.right,
            above: self.above || rhs.above,
            below: self.below || rhs.below,
        }
    }
}

impl std::ops::BitOrAssign for Blocked {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

/// On which sides of `pos` does `other` sit, counting only what would stop `pos`
/// being pushed out to the edge.
///
/// Sharing an edge is not an overlap. An overlapping neighbour blocks a side when it
/// reaches further toward that side than `pos` does.
pub fn blocked_by(pos: &Area, other: &Area) -> Blocked {
    let mut b = Blocked::default();
    if other.x2() > pos.x && other.x < pos.x2() {
        b.below = other.y2() > pos.y2();
        b.above = other.y < pos.y;
    }
    if other.y2() > pos.y && other.y < pos.y2() {
        b.left = other.x < pos.x;
        b.right = other.x2() > pos.x2();
    }
    b
}

/// Grow placements with nothing beside them out to the bounding box of the layout,
/// closing the ragged margin left when columns set at slightly different lengths.
///
/// Placements are visited in order and each sees the already-stretched version of
/// those before it. Fixed-size articles are never resized.
pub fn stretch_edges<'p>(placements: &[Placement<'p>]) -> Vec<Placement<'p>> {
    let mut out = placements.to_vec();
    let Some(bounds) = Area::bounding_box(placements.iter().map(|p| &p.area)) else {
        return out;
    };

    for i in 0..out.len() {
        if out[i].article.is_fixed_size() {
            continue;
        }
        let a = out[i].area;
        let mut blocked = Blocked::default();
        for (j, other) in out.iter().enumerate() {
            if j != i {
                blocked |= blocked_by(&a, &other.area);
            }
        }

        let x1 = if blocked.left { a.x } else { bounds.x };
        let y1 = if blocked.above { a.y } else { bounds.y };
        let x2 = if blocked.right { a.x2() } else { bounds.x2() };
        let y2 = if blocked.below { a.y2() } else { bounds.y2() };
        let stretched = Area::new(x2 - x1, y2 - y1, x1, y1);
        if stretched != a {
            tracing::debug!(
                article = out[i].article.id(),
                from = %a,
                to = %stretched,
                ?blocked,
                "stretched"
            );
            out[i] = out[i].with_area(stretched);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/layout/stretch.rs"]
mod tests;
