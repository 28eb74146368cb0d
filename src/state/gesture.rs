// Drag / pinch / wheel interpretation on top of the viewport.
use super::viewport::Viewport;

pub const ZOOM_BUTTON_FACTOR: f64 = 1.2;
pub const WHEEL_ZOOM_IN: f64 = 1.1;
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One interaction at a time: a single-pointer drag or a two-finger pinch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        last: Point,
    },
    Pinching {
        baseline: f64,
    },
}

/// What a handled event did to the viewport, so the caller can repaint or notify.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEffect {
    None,
    Panned,
    Zoomed { percent: u32 },
}

impl GestureEffect {
    pub fn changed(self) -> bool {
        !matches!(self, GestureEffect::None)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GestureController {
    state: GestureState,
}

impl GestureController {
    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn pointer_down(&mut self, p: Point) {
        self.state = GestureState::Dragging { last: p };
    }

    pub fn pointer_move(&mut self, p: Point, vp: &mut Viewport) -> GestureEffect {
        match &mut self.state {
            GestureState::Dragging { last } => {
                let (dx, dy) = (p.x - last.x, p.y - last.y);
                *last = p;
                vp.pan(dx, dy);
                GestureEffect::Panned
            }
            _ => GestureEffect::None,
        }
    }

    pub fn pointer_up(&mut self) {
        self.state = GestureState::Idle;
    }

    /// `touches` is the full list of active touches after the start event.
    pub fn touch_start(&mut self, touches: &[Point]) {
        match touches {
            [] => {}
            [single] => self.state = GestureState::Dragging { last: *single },
            [a, b, ..] => {
                self.state = GestureState::Pinching {
                    baseline: a.distance(*b),
                }
            }
        }
    }

    pub fn touch_move(&mut self, touches: &[Point], vp: &mut Viewport) -> GestureEffect {
        match (touches, self.state) {
            ([single], GestureState::Dragging { .. }) => self.pointer_move(*single, vp),
            ([single], GestureState::Pinching { .. }) => {
                // second finger vanished without an end event; continue as a drag
                self.state = GestureState::Dragging { last: *single };
                GestureEffect::None
            }
            ([a, b, ..], GestureState::Pinching { baseline }) => {
                let distance = a.distance(*b);
                self.state = GestureState::Pinching { baseline: distance };
                if baseline <= f64::EPSILON || distance <= f64::EPSILON {
                    return GestureEffect::None;
                }
                vp.set_scale(distance / baseline);
                GestureEffect::Zoomed {
                    percent: vp.zoom_percent(),
                }
            }
            ([a, b, ..], GestureState::Dragging { .. }) => {
                self.state = GestureState::Pinching {
                    baseline: a.distance(*b),
                };
                GestureEffect::None
            }
            _ => GestureEffect::None,
        }
    }

    /// `remaining` is the touch list after the end/cancel event.
    pub fn touch_end(&mut self, remaining: &[Point]) {
        self.state = match remaining {
            [] => GestureState::Idle,
            [single] => GestureState::Dragging { last: *single },
            [a, b, ..] => GestureState::Pinching {
                baseline: a.distance(*b),
            },
        };
    }

    /// Returns `None` when the event should fall through to page scrolling.
    pub fn wheel(
        &mut self,
        delta_y: f64,
        ctrl_held: bool,
        vp: &mut Viewport,
    ) -> Option<GestureEffect> {
        if !ctrl_held {
            return None;
        }
        vp.set_scale(if delta_y < 0.0 {
            WHEEL_ZOOM_IN
        } else {
            WHEEL_ZOOM_OUT
        });
        Some(GestureEffect::Zoomed {
            percent: vp.zoom_percent(),
        })
    }

    pub fn zoom_in(&self, vp: &mut Viewport) -> GestureEffect {
        vp.set_scale(ZOOM_BUTTON_FACTOR);
        GestureEffect::Zoomed {
            percent: vp.zoom_percent(),
        }
    }

    pub fn zoom_out(&self, vp: &mut Viewport) -> GestureEffect {
        vp.set_scale(1.0 / ZOOM_BUTTON_FACTOR);
        GestureEffect::Zoomed {
            percent: vp.zoom_percent(),
        }
    }
}
