//! Days, slots and the timetable that bounds them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A teaching weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Day {
    /// All weekdays in calendar order.
    pub const ALL: [Day; 5] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];

    /// Zero-based position in the week.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
        };
        f.write_str(name)
    }
}

/// One bookable `(day, hour)` unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotId {
    pub day: Day,
    pub hour: u8,
}

impl SlotId {
    pub const fn new(day: Day, hour: u8) -> Self {
        Self { day, hour }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}:00", self.day, self.hour)
    }
}

/// The fixed universe of slots: a set of days crossed with an ordered
/// list of start hours.
///
/// # Examples
///
/// ```
/// use u_slotmatch::model::{Day, SlotId, Timetable};
///
/// let timetable = Timetable::default();
/// assert_eq!(timetable.slot_count(), 28);
/// assert!(timetable.contains(SlotId::new(Day::Tue, 10)));
/// assert!(!timetable.contains(SlotId::new(Day::Mon, 10)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    days: Vec<Day>,
    hours: Vec<u8>,
}

impl Default for Timetable {
    fn default() -> Self {
        Self {
            days: vec![Day::Tue, Day::Wed, Day::Thu, Day::Fri],
            hours: vec![10, 11, 12, 14, 15, 16, 17],
        }
    }
}

impl Timetable {
    /// Creates a timetable. Days and hours are sorted and deduplicated.
    pub fn new(mut days: Vec<Day>, mut hours: Vec<u8>) -> Self {
        days.sort();
        days.dedup();
        hours.sort();
        hours.dedup();
        Self { days, hours }
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn hours(&self) -> &[u8] {
        &self.hours
    }

    pub fn slot_count(&self) -> usize {
        self.days.len() * self.hours.len()
    }

    pub fn contains(&self, slot: SlotId) -> bool {
        self.days.contains(&slot.day) && self.hours.contains(&slot.hour)
    }

    /// Slots on the given days in day-major, hour-minor order.
    ///
    /// Days outside the timetable are ignored.
    pub fn slots_on(&self, days: &[Day]) -> Vec<SlotId> {
        self.days
            .iter()
            .filter(|d| days.contains(d))
            .flat_map(|&day| self.hours.iter().map(move |&hour| SlotId::new(day, hour)))
            .collect()
    }

    /// Every slot in the timetable.
    pub fn all_slots(&self) -> Vec<SlotId> {
        self.slots_on(&self.days)
    }
}
