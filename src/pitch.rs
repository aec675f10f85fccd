// StatsBomb pitch: 120 x 80, attacking towards x = 120, goal centred on y = 40.
pub const FINAL_THIRD_X: f64 = 80.0;
pub const BOX_X: f64 = 102.0;
pub const BOX_Y_MIN: f64 = 18.0;
pub const BOX_Y_MAX: f64 = 62.0;
pub const GOAL: PitchPoint = PitchPoint { x: 120.0, y: 40.0 };
pub const DEEP_ZONE_RADIUS: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchPoint {
    pub x: f64,
    pub y: f64,
}

impl PitchPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: PitchPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

pub fn in_final_third(loc: Option<PitchPoint>) -> bool {
    loc.is_some_and(|p| p.x >= FINAL_THIRD_X)
}

pub fn in_box(loc: Option<PitchPoint>) -> bool {
    loc.is_some_and(|p| p.x >= BOX_X && (BOX_Y_MIN..=BOX_Y_MAX).contains(&p.y))
}

/// Radius-20 circle around the goal mouth.
pub fn in_deep_zone(loc: Option<PitchPoint>) -> bool {
    loc.is_some_and(|p| p.distance_to(GOAL) <= DEEP_ZONE_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> Option<PitchPoint> {
        Some(PitchPoint::new(x, y))
    }

    #[test]
    fn absent_location_is_never_in_a_zone() {
        assert!(!in_final_third(None));
        assert!(!in_box(None));
        assert!(!in_deep_zone(None));
    }

    #[test]
    fn final_third_starts_at_eighty() {
        assert!(!in_final_third(at(79.9, 40.0)));
        assert!(in_final_third(at(80.0, 0.0)));
    }

    #[test]
    fn box_edges_are_inclusive() {
        assert!(in_box(at(102.0, 18.0)));
        assert!(in_box(at(120.0, 62.0)));
        assert!(!in_box(at(101.9, 40.0)));
        assert!(!in_box(at(110.0, 62.1)));
    }

    #[test]
    fn deep_zone_is_a_circle_around_goal() {
        assert!(in_deep_zone(at(100.0, 40.0)));
        assert!(in_deep_zone(at(120.0, 60.0)));
        assert!(!in_deep_zone(at(105.0, 25.0)));
        // inside the box but outside the circle
        assert!(in_box(at(103.0, 20.0)));
        assert!(!in_deep_zone(at(103.0, 20.0)));
    }
}
