use std::collections::HashMap;

/// Colors handed out to method lanes, in order of first appearance.
pub const PALETTE: [&str; 10] = [
    "mediumvioletred",
    "lime",
    "orchid",
    "salmon",
    "seagreen",
    "indigo",
    "tomato",
    "turquoise",
    "brown",
    "steelblue",
];

/// Shared bucket for time spent outside any resolvable method.
pub const OTHER: &str = "Other";
const OTHER_COLOR: &str = "grey";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneAssignment {
    pub color: &'static str,
    pub lane: usize,
    /// Absolute x of the last label drawn for this category.
    pub last_text: Option<f64>,
}

/// First-seen category to lane/color bindings for one participant.
///
/// Lane 0 belongs to [`OTHER`]; every other category takes the next lane in
/// rotation, wrapping back to 1 once `lanes` is reached.
#[derive(Debug, Clone)]
pub struct LaneRegistry {
    assignments: HashMap<String, LaneAssignment>,
    next: usize,
    lanes: usize,
}

impl LaneRegistry {
    pub fn new(lanes: usize) -> Self {
        let mut assignments = HashMap::new();
        assignments.insert(
            OTHER.to_string(),
            LaneAssignment {
                color: OTHER_COLOR,
                lane: 0,
                last_text: None,
            },
        );
        Self {
            assignments,
            next: 1,
            lanes: lanes.max(1),
        }
    }

    /// `Other` and every `<file>:Other` key share the lane-0 bucket.
    pub fn is_other(key: &str) -> bool {
        key.rsplit(':').next() == Some(OTHER)
    }

    pub fn get_or_create(&mut self, key: &str) -> LaneAssignment {
        let key = Self::canonical(key);
        if let Some(existing) = self.assignments.get(key) {
            return *existing;
        }

        let assignment = LaneAssignment {
            color: PALETTE[self.next % PALETTE.len()],
            lane: self.next,
            last_text: None,
        };
        self.assignments.insert(key.to_string(), assignment);

        self.next = (self.next + 1) % self.lanes;
        if self.next == 0 {
            self.next = 1;
        }

        assignment
    }

    pub fn get(&self, key: &str) -> Option<&LaneAssignment> {
        self.assignments.get(Self::canonical(key))
    }

    pub fn record_text_position(&mut self, key: &str, x: f64) {
        let assignment = self.get_or_create(key);
        self.assignments.insert(
            Self::canonical(key).to_string(),
            LaneAssignment {
                last_text: Some(x),
                ..assignment
            },
        );
    }

    /// Number of registered categories, the pre-bound `Other` included.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    fn canonical(key: &str) -> &str {
        if Self::is_other(key) {
            OTHER
        } else {
            key
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_is_pre_bound_to_lane_zero() {
        let mut registry = LaneRegistry::new(19);
        assert_eq!(registry.len(), 1);

        let other = registry.get_or_create("Buffer.java:Other");
        assert_eq!(other.lane, 0);
        assert_eq!(other.color, "grey");
        assert_eq!(registry.len(), 1);

        let first = registry.get_or_create("Buffer.java:insert");
        assert_eq!(first.lane, 1);
        assert_eq!(first.color, "lime");
    }

    #[test]
    fn lanes_wrap_past_the_last_lane_skipping_zero() {
        let mut registry = LaneRegistry::new(19);
        let lanes: Vec<usize> = (0..19)
            .map(|i| registry.get_or_create(&format!("File.java:m{i}")).lane)
            .collect();

        let mut expected: Vec<usize> = (1..=18).collect();
        expected.push(1);
        assert_eq!(lanes, expected);
    }

    #[test]
    fn repeat_lookups_are_stable() {
        let mut registry = LaneRegistry::new(19);
        let a = registry.get_or_create("A.java:run");
        registry.get_or_create("B.java:run");
        assert_eq!(registry.get_or_create("A.java:run"), a);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn text_position_is_recorded_per_category() {
        let mut registry = LaneRegistry::new(19);
        registry.get_or_create("A.java:run");
        registry.record_text_position("A.java:run", 212.0);

        assert_eq!(registry.get("A.java:run").unwrap().last_text, Some(212.0));
        assert_eq!(registry.get("Other").unwrap().last_text, None);
    }
}
