pub use kurbo::{Point, Rect};

/// An axis-aligned rectangle on the page, in points, origin top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Area {
    pub w: f64,
    pub h: f64,
    pub x: f64,
    pub y: f64,
}

impl Area {
    pub fn new(w: f64, h: f64, x: f64, y: f64) -> Self {
        Self { w, h, x, y }
    }

    pub fn size(&self) -> f64 {
        self.w * self.h
    }

    pub fn x2(&self) -> f64 {
        self.x + self.w
    }

    pub fn y2(&self) -> f64 {
        self.y + self.h
    }

    /// The four corners: top-left, bottom-left, top-right, bottom-right.
    pub fn corners(&self) -> [(f64, f64); 4] {
        let (x1, y1, x2, y2) = (self.x, self.y, self.x2(), self.y2());
        [(x1, y1), (x1, y2), (x2, y1), (x2, y2)]
    }

    pub fn has_corner(&self, p: (f64, f64)) -> bool {
        self.corners().contains(&p)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x2(), self.y2())
    }

    pub fn from_rect(r: Rect) -> Self {
        let r = r.abs();
        Self::new(r.width(), r.height(), r.x0, r.y0)
    }

    /// Area of the intersection with `other`; zero when they only touch.
    pub fn overlap_area(&self, other: &Area) -> f64 {
        let i = self.rect().intersect(other.rect());
        i.width().max(0.0) * i.height().max(0.0)
    }

    /// Smallest area containing both.
    pub fn union(&self, other: &Area) -> Area {
        Self::from_rect(self.rect().union(other.rect()))
    }

    /// Whether `other` lies entirely inside this area (edges may coincide).
    pub fn contains_area(&self, other: &Area) -> bool {
        other.x >= self.x && other.y >= self.y && other.x2() <= self.x2() && other.y2() <= self.y2()
    }

    /// Bounding box of a set of areas, `None` when empty.
    pub fn bounding_box<'a>(areas: impl IntoIterator<Item = &'a Area>) -> Option<Area> {
        areas.into_iter().fold(None, |acc, a| match acc {
            None => Some(*a),
            Some(b) => Some(b.union(a)),
        })
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}x{}@{},{}]", self.w, self.h, self.x, self.y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
