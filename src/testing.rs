//! Shared fixtures for unit and property tests.

use rand::seq::index::sample;

use crate::cost::CostTable;
use crate::model::{Day, PreferenceModel, Student, Timetable};
use crate::problem::Instance;
use crate::random::create_rng;

pub const HOURS: [u8; 7] = [10, 11, 12, 14, 15, 16, 17];

/// Tue..Thu at the usual seven hours: 21 slots.
pub fn three_days() -> Timetable {
    Timetable::new(vec![Day::Tue, Day::Wed, Day::Thu], HOURS.to_vec())
}

/// Students with three distinct uniformly drawn preferences each.
pub fn random_model(students: usize, timetable: Timetable, seed: u64) -> PreferenceModel {
    let mut rng = create_rng(Some(seed));
    let slots = timetable.all_slots();
    let students = (0..students)
        .map(|i| {
            let prefs = sample(&mut rng, slots.len(), 3)
                .into_iter()
                .map(|idx| slots[idx])
                .collect();
            Student::new(format!("s{i:02}"), prefs)
        })
        .collect();
    PreferenceModel::from_students(students, timetable).unwrap()
}

pub fn random_instance(students: usize, seed: u64) -> Instance {
    Instance::new(
        &random_model(students, three_days(), seed),
        CostTable::default(),
        None,
    )
    .unwrap()
}
