//! Priority encoding adapter.
//!
//! Todoist stores priority inverted: the wire value 1 is the highest
//! user-visible priority ("p1") and 4 the lowest. Everything outside this
//! module works on the monotonic *urgency* scale instead, where a larger
//! number means more urgent. The conversion lives here and nowhere else, so
//! read and write paths cannot disagree about the direction.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

const MIN_URGENCY: u8 = 1;
const MAX_URGENCY: u8 = 4;

/// A task priority in Todoist's native wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Priority(u8);

impl Priority {
    /// The least urgent priority ("p4"), Todoist's default for new tasks.
    pub const LOWEST: Priority = Priority(4);

    /// The most urgent priority ("p1").
    pub const HIGHEST: Priority = Priority(1);

    /// Build from the wire value, clamping out-of-range input to 1..=4.
    pub fn from_raw(raw: u8) -> Self {
        Priority(raw.clamp(MIN_URGENCY, MAX_URGENCY))
    }

    /// The wire value, 1 (most urgent) ..= 4 (least urgent).
    pub fn raw(self) -> u8 {
        self.0
    }

    /// The urgency, 1 (least urgent) ..= 4 (most urgent).
    pub fn urgency(self) -> u8 {
        MAX_URGENCY + MIN_URGENCY - self.0
    }

    /// Build from an urgency value, clamping to 1..=4.
    pub fn from_urgency(urgency: u8) -> Self {
        Priority(MAX_URGENCY + MIN_URGENCY - urgency.clamp(MIN_URGENCY, MAX_URGENCY))
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::LOWEST
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u8::deserialize(deserializer)?;
        Ok(Priority::from_raw(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_inverts_wire_value() {
        assert_eq!(Priority::from_raw(1).urgency(), 4);
        assert_eq!(Priority::from_raw(4).urgency(), 1);
        assert_eq!(Priority::HIGHEST.urgency(), 4);
        assert_eq!(Priority::LOWEST.urgency(), 1);
    }

    #[test]
    fn round_trips_through_urgency() {
        for raw in 1..=4 {
            let priority = Priority::from_raw(raw);
            assert_eq!(Priority::from_urgency(priority.urgency()), priority);
        }
    }

    #[test]
    fn out_of_range_values_clamp() {
        assert_eq!(Priority::from_raw(0), Priority::HIGHEST);
        assert_eq!(Priority::from_raw(9), Priority::LOWEST);
        assert_eq!(Priority::from_urgency(0), Priority::LOWEST);
        assert_eq!(Priority::from_urgency(9), Priority::HIGHEST);
    }

    #[test]
    fn default_is_least_urgent() {
        assert_eq!(Priority::default(), Priority::LOWEST);
    }
}
