//! Normalized landmark → screen pixels.

use crate::config::{MapRegion, PointerConfig};
use crate::model::{Layout, Point, Rect, Size};

use super::sample::Landmark;

#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateMapper {
    pub region: MapRegion,
    pub mirror_x: bool,
    pub degenerate_px: f64,
}

impl CoordinateMapper {
    pub fn from_config(cfg: &PointerConfig) -> Self {
        Self { region: cfg.region, mirror_x: cfg.mirror_x, degenerate_px: cfg.degenerate_px }
    }

    pub fn region_rect(&self, layout: &Layout) -> Rect {
        match self.region {
            MapRegion::Viewport => layout.viewport,
            MapRegion::Container => layout.play_area,
        }
    }

    /// Scale (and optionally mirror) a landmark into viewport pixels.
    /// Returns `None` for the near-origin points the recognizer emits when it
    /// loses the hand; the check runs before mirroring so a lost hand cannot
    /// masquerade as a point on the far edge.
    pub fn map(&self, lm: Landmark, layout: &Layout) -> Option<Point> {
        let region = self.region_rect(layout);
        let mut px = lm.x * region.width;
        let py = lm.y * region.height;
        if px < self.degenerate_px && py < self.degenerate_px {
            return None;
        }
        if self.mirror_x {
            px = region.width - px;
        }
        Some(Point::new(region.x + px, region.y + py))
    }

    /// Keep an element of `elem` size at `p` inside the mapping region, then
    /// inside the viewport.
    pub fn clip(&self, p: Point, elem: Size, layout: &Layout) -> Point {
        let inner = self.region_rect(layout).clamp_point(p, elem);
        layout.viewport.clamp_point(inner, elem)
    }

    /// Position relative to `container`, for elements rendered inside it.
    pub fn to_local(p: Point, container: &Rect) -> Point {
        Point::new(p.x - container.x, p.y - container.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GridDims;

    fn layout() -> Layout {
        let mut l = Layout::compute(Size::new(1000.0, 500.0), GridDims::new(2, 2));
        l.play_area = Rect::new(100.0, 50.0, 400.0, 200.0);
        l
    }

    fn mapper(region: MapRegion, mirror_x: bool) -> CoordinateMapper {
        CoordinateMapper { region, mirror_x, degenerate_px: 5.0 }
    }

    #[test]
    fn scales_to_viewport() {
        let p = mapper(MapRegion::Viewport, false).map(Landmark { x: 0.5, y: 0.2 }, &layout());
        assert_eq!(p, Some(Point::new(500.0, 100.0)));
    }

    #[test]
    fn mirrors_horizontally() {
        let p = mapper(MapRegion::Viewport, true).map(Landmark { x: 0.2, y: 0.5 }, &layout());
        assert_eq!(p, Some(Point::new(800.0, 250.0)));
    }

    #[test]
    fn container_region_offsets_by_origin() {
        let l = layout();
        let m = mapper(MapRegion::Container, false);
        let p = m.map(Landmark { x: 0.5, y: 0.5 }, &l).unwrap();
        assert_eq!(p, Point::new(300.0, 150.0));
        assert_eq!(CoordinateMapper::to_local(p, &l.play_area), Point::new(200.0, 100.0));
    }

    #[test]
    fn near_origin_means_no_hand() {
        let m = mapper(MapRegion::Viewport, true);
        assert_eq!(m.map(Landmark { x: 0.0, y: 0.0 }, &layout()), None);
        assert_eq!(m.map(Landmark { x: 0.004, y: 0.009 }, &layout()), None);
        assert!(m.map(Landmark { x: 0.0, y: 0.5 }, &layout()).is_some(), "only one axis near zero is valid");
    }

    #[test]
    fn clip_respects_container_then_viewport() {
        let l = layout();
        let m = mapper(MapRegion::Container, false);
        let p = m.clip(Point::new(900.0, 10.0), Size::new(32.0, 32.0), &l);
        assert_eq!(p, Point::new(468.0, 50.0));
        let v = mapper(MapRegion::Viewport, false).clip(Point::new(-20.0, 600.0), Size::new(32.0, 32.0), &l);
        assert_eq!(v, Point::new(0.0, 468.0));
    }
}
