//! Map painting. Everything goes through [`Surface`], implemented for the browser's
//! 2-D canvas context and by a recorder in tests.

use std::f64::consts::PI;
use web_sys::CanvasRenderingContext2d;

use crate::model::is_peak_hour;
use crate::state::Viewport;

pub const TAU: f64 = PI * 2.0;

pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn scale(&mut self, s: f64);
    fn set_fill(&mut self, color: &str);
    fn set_stroke(&mut self, color: &str);
    fn set_line_width(&mut self, w: f64);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: &str);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn bezier_to(&mut self, c1: (f64, f64), c2: (f64, f64), end: (f64, f64));
    fn arc(&mut self, x: f64, y: f64, r: f64);
    fn fill(&mut self);
    fn stroke(&mut self);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, width: f64, height: f64) {
        self.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
        self.clear_rect(0.0, 0.0, width, height);
    }
    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }
    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }
    fn translate(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::translate(self, x, y).ok();
    }
    fn scale(&mut self, s: f64) {
        CanvasRenderingContext2d::scale(self, s, s).ok();
    }
    fn set_fill(&mut self, color: &str) {
        self.set_fill_style_str(color);
    }
    fn set_stroke(&mut self, color: &str) {
        self.set_stroke_style_str(color);
    }
    fn set_line_width(&mut self, w: f64) {
        CanvasRenderingContext2d::set_line_width(self, w);
    }
    fn set_font(&mut self, font: &str) {
        CanvasRenderingContext2d::set_font(self, font);
    }
    fn set_text_align(&mut self, align: &str) {
        CanvasRenderingContext2d::set_text_align(self, align);
    }
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
    }
    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }
    fn close_path(&mut self) {
        CanvasRenderingContext2d::close_path(self);
    }
    fn move_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }
    fn line_to(&mut self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }
    fn bezier_to(&mut self, c1: (f64, f64), c2: (f64, f64), end: (f64, f64)) {
        self.bezier_curve_to(c1.0, c1.1, c2.0, c2.1, end.0, end.1);
    }
    fn arc(&mut self, x: f64, y: f64, r: f64) {
        CanvasRenderingContext2d::arc(self, x, y, r.max(0.0), 0.0, TAU).ok();
    }
    fn fill(&mut self) {
        CanvasRenderingContext2d::fill(self);
    }
    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }
    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        CanvasRenderingContext2d::fill_text(self, text, x, y).ok();
    }
}

/// Traffic multiplier: 3 during rush windows, 1 otherwise.
pub fn traffic_intensity(hour: u8) -> usize {
    if is_peak_hour(hour) { 3 } else { 1 }
}

/// Pulse halo radius in screen pixels, driven by wall-clock seconds.
pub fn halo_radius_px(time_secs: f64) -> f64 {
    (time_secs * 5.0).sin() * 2.0 + 8.0
}

/// Schematic city laid out in world units relative to the current surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapScene {
    pub width: f64,
    pub height: f64,
}

struct Poi {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    color: &'static str,
    label: &'static str,
}

const POIS: [Poi; 2] = [
    Poi { x: 250.0, y: 50.0, w: 80.0, h: 50.0, color: "#8ac926", label: "City Park" },
    Poi { x: 350.0, y: 150.0, w: 60.0, h: 40.0, color: "#ffbe0b", label: "Mall" },
];

impl MapScene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn user_position(&self) -> (f64, f64) {
        (100.0, self.height / 2.0)
    }

    pub fn destination(&self) -> (f64, f64) {
        (self.width - 100.0, self.height / 2.3)
    }

    /// Marker centres along the main road and the feeder road.
    pub fn traffic_points(&self, hour: u8) -> Vec<(f64, f64, f64)> {
        let k = traffic_intensity(hour);
        let (w, h) = (self.width, self.height);
        let main = 5 * k;
        let feeder = 3 * k;
        let mut pts = Vec::with_capacity(main + feeder);
        for i in 0..main {
            let t = i as f64 / main as f64;
            pts.push((50.0 + t * (w - 100.0), h / 2.0 + 30.0 * (t * TAU).sin(), 4.0));
        }
        for i in 0..feeder {
            let t = i as f64 / feeder as f64;
            pts.push((150.0 + t * 50.0, h / 2.0 - t * 100.0, 3.0));
        }
        pts
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub surface_width: f64,
    pub surface_height: f64,
    pub time_secs: f64,
    pub hour: u8,
    /// Without a location fix the user marker is left out.
    pub has_fix: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct MapRenderer {
    pub scene: MapScene,
}

impl MapRenderer {
    pub fn new(scene: MapScene) -> Self {
        Self { scene }
    }

    /// Re-lays the scene for a resized surface. Returns whether anything moved.
    pub fn fit(&mut self, width: f64, height: f64) -> bool {
        let next = MapScene::new(width, height);
        let changed = next != self.scene;
        if changed {
            tracing::debug!(width = next.width, height = next.height, "map scene refit");
            self.scene = next;
        }
        changed
    }

    /// Paints one frame. Reads the viewport, never mutates it.
    pub fn paint(&self, s: &mut dyn Surface, vp: &Viewport, frame: &FrameInput) {
        let inv = 1.0 / vp.scale;
        s.clear(frame.surface_width, frame.surface_height);
        s.save();
        s.translate(vp.pan_x, vp.pan_y);
        s.scale(vp.scale);

        self.paint_background(s, vp, frame);
        self.paint_roads(s, inv);
        self.paint_pois(s, inv);
        if frame.has_fix {
            self.paint_user(s, inv, frame.time_secs);
        }
        self.paint_destination(s, inv);
        self.paint_traffic(s, inv, frame.hour);

        s.restore();
    }

    fn paint_background(&self, s: &mut dyn Surface, vp: &Viewport, frame: &FrameInput) {
        let (x0, y0) = vp.to_world(0.0, 0.0);
        s.set_fill("#a8d8ea");
        s.fill_rect(
            x0,
            y0,
            frame.surface_width / vp.scale,
            frame.surface_height / vp.scale,
        );
    }

    fn paint_roads(&self, s: &mut dyn Surface, inv: f64) {
        let (w, h) = (self.scene.width, self.scene.height);
        s.set_stroke("#555");
        s.set_line_width(6.0 * inv);
        s.begin_path();
        s.move_to(50.0, h / 2.0);
        s.bezier_to((150.0, h / 3.0), (250.0, h / 2.5), (w - 50.0, h / 2.3));
        s.stroke();

        s.set_line_width(4.0 * inv);
        let streets = [
            ((100.0, 100.0), (300.0, 100.0)),
            ((200.0, 50.0), (200.0, 200.0)),
            ((300.0, h / 2.0), (400.0, h - 100.0)),
        ];
        for ((x1, y1), (x2, y2)) in streets {
            s.begin_path();
            s.move_to(x1, y1);
            s.line_to(x2, y2);
            s.stroke();
        }

        s.set_fill("#333");
        s.set_font(&font(12.0 * inv));
        s.fill_text("Main St", 150.0, h / 3.0 - 10.0 * inv);
        s.fill_text("2nd Ave", 220.0, 120.0);
    }

    fn paint_pois(&self, s: &mut dyn Surface, inv: f64) {
        s.set_text_align("center");
        for poi in &POIS {
            s.set_fill(poi.color);
            s.fill_rect(poi.x, poi.y, poi.w, poi.h);
            s.set_fill("#333");
            s.set_font(&font(10.0 * inv));
            s.fill_text(poi.label, poi.x + poi.w / 2.0, poi.y + poi.h / 2.0 + 4.0 * inv);
        }
        s.set_text_align("start");
    }

    fn paint_user(&self, s: &mut dyn Surface, inv: f64, time_secs: f64) {
        let (x, y) = self.scene.user_position();
        s.set_fill("red");
        s.begin_path();
        s.arc(x, y, 6.0 * inv);
        s.fill();

        s.set_stroke("rgba(255, 0, 0, 0.5)");
        s.set_line_width(2.0 * inv);
        s.begin_path();
        s.arc(x, y, halo_radius_px(time_secs) * inv);
        s.stroke();

        s.set_fill("#333");
        s.set_font(&font(12.0 * inv));
        s.fill_text("You", x + 20.0 * inv, y + 5.0 * inv);
    }

    fn paint_destination(&self, s: &mut dyn Surface, inv: f64) {
        let (x, y) = self.scene.destination();
        s.set_fill("green");
        s.begin_path();
        s.arc(x, y, 10.0 * inv);
        s.fill();
        s.set_fill("#333");
        s.set_font(&font(12.0 * inv));
        s.fill_text("Work", x + 20.0 * inv, y + 5.0 * inv);
    }

    fn paint_traffic(&self, s: &mut dyn Surface, inv: f64, hour: u8) {
        s.set_fill("rgba(220, 53, 69, 0.7)");
        for (x, y, r) in self.scene.traffic_points(hour) {
            s.begin_path();
            s.arc(x, y, r * inv);
            s.fill();
        }
    }
}

fn font(px: f64) -> String {
    format!("{:.3}px Arial", px)
}

pub const CHART_WIDTH: f64 = 400.0;
pub const CHART_HEIGHT: f64 = 150.0;

/// Congestion-by-hour line chart with a marker at `now_hour` (fractional hours).
pub fn paint_traffic_chart(s: &mut dyn Surface, curve: &[f64], now_hour: f64) {
    let (w, h) = (CHART_WIDTH, CHART_HEIGHT);
    s.clear(w, h);
    s.set_fill("#f8f9fa");
    s.fill_rect(0.0, 0.0, w, h);

    s.set_stroke("#e9ecef");
    s.set_line_width(1.0);
    for row in 0..=5 {
        let y = row as f64 * 30.0;
        s.begin_path();
        s.move_to(0.0, y);
        s.line_to(w, y);
        s.stroke();
    }
    for col in 0..=6 {
        let x = col as f64 * w / 6.0;
        s.begin_path();
        s.move_to(x, 0.0);
        s.line_to(x, h);
        s.stroke();
    }

    if curve.len() >= 2 {
        let span = (curve.len() - 1) as f64;
        let points: Vec<(f64, f64)> = curve
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64 / span * w, h - v / 100.0 * h))
            .collect();

        s.set_stroke("#f94144");
        s.set_line_width(2.0);
        s.begin_path();
        for (i, (x, y)) in points.iter().enumerate() {
            if i == 0 {
                s.move_to(*x, *y);
            } else {
                s.line_to(*x, *y);
            }
        }
        s.stroke();

        s.set_fill("rgba(249, 65, 68, 0.1)");
        s.begin_path();
        s.move_to(points[0].0, h);
        for (x, y) in &points {
            s.line_to(*x, *y);
        }
        s.line_to(points[points.len() - 1].0, h);
        s.close_path();
        s.fill();
    }

    let now_x = now_hour.clamp(0.0, 24.0) / 24.0 * w;
    s.set_stroke("#4361ee");
    s.set_line_width(1.0);
    s.begin_path();
    s.move_to(now_x, 0.0);
    s.line_to(now_x, h);
    s.stroke();

    s.set_fill("#495057");
    s.set_font("10px Arial");
    s.set_text_align("center");
    for hour in (0..=24).step_by(3) {
        s.fill_text(&format!("{}:00", hour), hour as f64 / 24.0 * w, 145.0);
    }
    s.set_font("bold 12px Arial");
    s.set_fill("#212529");
    s.fill_text("Traffic Congestion Throughout the Day", w / 2.0, 15.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Save,
        Restore,
        Translate(f64, f64),
        Scale(f64),
        Fill(String),
        Stroke(String),
        LineWidth(f64),
        Font(String),
        Rect(f64, f64, f64, f64),
        Arc(f64, f64, f64),
        Text(String),
        Path,
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Recorder {
        fn arcs(&self) -> Vec<(f64, f64, f64)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Arc(x, y, r) => Some((*x, *y, *r)),
                    _ => None,
                })
                .collect()
        }

        fn fills(&self) -> Vec<String> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Fill(c) => Some(c.clone()),
                    _ => None,
                })
                .collect()
        }

        fn position(&self, wanted: &Op) -> usize {
            self.ops
                .iter()
                .position(|op| op == wanted)
                .unwrap_or_else(|| panic!("{:?} not painted", wanted))
        }
    }

    impl Surface for Recorder {
        fn clear(&mut self, _w: f64, _h: f64) {
            self.ops.push(Op::Clear);
        }
        fn save(&mut self) {
            self.ops.push(Op::Save);
        }
        fn restore(&mut self) {
            self.ops.push(Op::Restore);
        }
        fn translate(&mut self, x: f64, y: f64) {
            self.ops.push(Op::Translate(x, y));
        }
        fn scale(&mut self, s: f64) {
            self.ops.push(Op::Scale(s));
        }
        fn set_fill(&mut self, color: &str) {
            self.ops.push(Op::Fill(color.to_string()));
        }
        fn set_stroke(&mut self, color: &str) {
            self.ops.push(Op::Stroke(color.to_string()));
        }
        fn set_line_width(&mut self, w: f64) {
            self.ops.push(Op::LineWidth(w));
        }
        fn set_font(&mut self, font: &str) {
            self.ops.push(Op::Font(font.to_string()));
        }
        fn set_text_align(&mut self, _align: &str) {}
        fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
            self.ops.push(Op::Rect(x, y, w, h));
        }
        fn begin_path(&mut self) {
            self.ops.push(Op::Path);
        }
        fn close_path(&mut self) {}
        fn move_to(&mut self, _x: f64, _y: f64) {}
        fn line_to(&mut self, _x: f64, _y: f64) {}
        fn bezier_to(&mut self, _c1: (f64, f64), _c2: (f64, f64), _end: (f64, f64)) {}
        fn arc(&mut self, x: f64, y: f64, r: f64) {
            self.ops.push(Op::Arc(x, y, r));
        }
        fn fill(&mut self) {}
        fn stroke(&mut self) {}
        fn fill_text(&mut self, text: &str, _x: f64, _y: f64) {
            self.ops.push(Op::Text(text.to_string()));
        }
    }

    fn frame(hour: u8, time_secs: f64, has_fix: bool) -> FrameInput {
        FrameInput {
            surface_width: 800.0,
            surface_height: 600.0,
            time_secs,
            hour,
            has_fix,
        }
    }

    fn render(vp: &Viewport, f: &FrameInput) -> Recorder {
        let mut rec = Recorder::default();
        MapRenderer::new(MapScene::new(800.0, 600.0)).paint(&mut rec, vp, f);
        rec
    }

    #[test]
    fn clears_then_applies_transform() {
        let vp = Viewport { scale: 2.0, pan_x: 30.0, pan_y: -12.0 };
        let rec = render(&vp, &frame(12, 0.0, true));
        assert_eq!(
            &rec.ops[..4],
            &[Op::Clear, Op::Save, Op::Translate(30.0, -12.0), Op::Scale(2.0)]
        );
        assert_eq!(rec.ops.last(), Some(&Op::Restore));
    }

    #[test]
    fn background_covers_visible_world_rect() {
        let vp = Viewport { scale: 2.0, pan_x: 30.0, pan_y: -12.0 };
        let rec = render(&vp, &frame(12, 0.0, true));
        assert!(rec.ops.contains(&Op::Rect(-15.0, 6.0, 400.0, 300.0)));
    }

    #[test]
    fn layers_paint_in_fixed_order() {
        let rec = render(&Viewport::default(), &frame(12, 0.0, true));
        let background = rec.position(&Op::Fill("#a8d8ea".into()));
        let roads = rec.position(&Op::Stroke("#555".into()));
        let park = rec.position(&Op::Text("City Park".into()));
        let user = rec.position(&Op::Fill("red".into()));
        let dest = rec.position(&Op::Fill("green".into()));
        let traffic = rec.position(&Op::Fill("rgba(220, 53, 69, 0.7)".into()));
        assert!(background < roads);
        assert!(roads < park);
        assert!(park < user);
        assert!(user < dest);
        assert!(dest < traffic);
    }

    #[test]
    fn traffic_triples_in_rush_hour() {
        let scene = MapScene::new(800.0, 600.0);
        assert_eq!(scene.traffic_points(12).len(), 8);
        assert_eq!(scene.traffic_points(8).len(), 24);
        assert_eq!(scene.traffic_points(17).len(), 24);
        assert_eq!(scene.traffic_points(19).len(), 8);
    }

    #[test]
    fn sizes_are_divided_by_scale() {
        let vp = Viewport { scale: 2.0, ..Viewport::default() };
        let rec = render(&vp, &frame(12, 0.0, true));
        assert!(rec.ops.contains(&Op::LineWidth(3.0)));
        assert!(rec.ops.contains(&Op::LineWidth(2.0)));
        assert!(rec.ops.contains(&Op::Font("6.000px Arial".into())));
        let (dx, dy) = MapScene::new(800.0, 600.0).destination();
        assert!(rec.arcs().contains(&(dx, dy, 5.0)));
    }

    #[test]
    fn halo_pulses_with_wall_clock() {
        let (ux, uy) = MapScene::new(800.0, 600.0).user_position();
        let halo_at = |t: f64| {
            render(&Viewport::default(), &frame(12, t, true))
                .arcs()
                .into_iter()
                .filter(|(x, y, _)| *x == ux && *y == uy)
                .map(|(_, _, r)| r)
                .nth(1)
                .expect("halo arc")
        };
        assert!((halo_at(0.0) - 8.0).abs() < 1e-9);
        let peak = PI / 10.0;
        assert!((halo_at(peak) - 10.0).abs() < 1e-9);
        assert!((halo_radius_px(3.0 * PI / 10.0) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn refit_moves_destination_with_surface() {
        let mut renderer = MapRenderer::new(MapScene::new(800.0, 400.0));
        assert!(!renderer.fit(800.0, 400.0));
        assert!(renderer.fit(1200.0, 400.0));

        let mut rec = Recorder::default();
        let wide = FrameInput {
            surface_width: 1200.0,
            surface_height: 400.0,
            ..frame(12, 0.0, true)
        };
        renderer.paint(&mut rec, &Viewport::default(), &wide);
        let (dx, dy) = renderer.scene.destination();
        assert_eq!(dx, 1100.0);
        assert!(rec.arcs().contains(&(dx, dy, 10.0)));
        assert!(!rec.arcs().iter().any(|(x, _, _)| *x == 700.0));
    }

    #[test]
    fn no_user_marker_without_fix() {
        let rec = render(&Viewport::default(), &frame(12, 0.0, false));
        assert!(!rec.fills().contains(&"red".to_string()));
        assert!(!rec.ops.contains(&Op::Text("You".into())));
        assert!(rec.ops.contains(&Op::Text("Work".into())));
    }

    #[test]
    fn paint_leaves_viewport_alone() {
        let vp = Viewport { scale: 1.7, pan_x: 4.0, pan_y: 5.0 };
        let before = vp;
        render(&vp, &frame(8, 12.5, true));
        assert_eq!(vp, before);
    }

    #[test]
    fn chart_labels_every_three_hours() {
        let mut rec = Recorder::default();
        let curve = vec![40.0; 25];
        paint_traffic_chart(&mut rec, &curve, 9.5);
        let labels: Vec<String> = rec
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(t) if t.ends_with(":00") => Some(t.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels.len(), 9);
        assert_eq!(labels.first().map(String::as_str), Some("0:00"));
        assert_eq!(labels.last().map(String::as_str), Some("24:00"));
    }
}
