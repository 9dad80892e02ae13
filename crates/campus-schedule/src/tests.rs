//! Unit tests for campus-schedule.

use campus_core::{LocationId, Tick};

use crate::{Activity, Schedule};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn act(target: u32, start: u64, dwell: u32) -> Activity {
    Activity::new(LocationId(target), Tick(start), dwell)
}

/// Breakfast, morning class, lunch — seconds of day.
fn morning() -> Vec<Activity> {
    vec![
        act(1, Tick::from_hms(7, 0, 0).0, 1_200),
        act(2, Tick::from_hms(8, 0, 0).0, 6_000),
        act(1, Tick::from_hms(11, 40, 0).0, 1_200),
    ]
}

// ── Schedule ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod schedule {
    use super::*;
    use crate::ScheduleError;

    #[test]
    fn valid_schedule_keeps_order() {
        let s = Schedule::new(morning()).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.get(1).unwrap().target, LocationId(2));
        assert!(s.get(3).is_none());
    }

    #[test]
    fn empty_schedule() {
        let s = Schedule::empty();
        assert!(s.is_empty());
        assert!(s.get(0).is_none());
        assert!(Schedule::new(vec![]).unwrap().is_empty());
    }

    #[test]
    fn out_of_order_rejected() {
        let mut acts = morning();
        acts.swap(0, 1);
        let err = Schedule::new(acts).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidOrdering { index: 1, .. }));
    }

    #[test]
    fn overlap_with_previous_dwell_rejected() {
        // Second activity starts before the first one's dwell is over.
        let err = Schedule::new(vec![act(1, 100, 50), act(2, 120, 10)]).unwrap_err();
        match err {
            ScheduleError::InvalidOrdering { index, start, previous_end } => {
                assert_eq!(index, 1);
                assert_eq!(start, Tick(120));
                assert_eq!(previous_end, Tick(150));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn start_equal_to_previous_end_rejected() {
        assert!(Schedule::new(vec![act(1, 100, 50), act(2, 150, 10)]).is_err());
        assert!(Schedule::new(vec![act(1, 100, 50), act(2, 151, 10)]).is_ok());
    }

    #[test]
    fn equal_starts_rejected_even_with_zero_dwell() {
        assert!(Schedule::new(vec![act(1, 100, 0), act(2, 100, 0)]).is_err());
    }

    #[test]
    fn start_past_day_rejected() {
        let err = Schedule::new(vec![act(1, 90_000, 10)]).unwrap_err();
        assert!(matches!(err, ScheduleError::StartOutOfDay { index: 0, .. }));
    }

    #[test]
    fn check_targets() {
        let s = Schedule::new(morning()).unwrap();
        assert!(s.check_targets(3).is_ok());
        assert!(matches!(
            s.check_targets(2),
            Err(ScheduleError::UnknownLocation(LocationId(2)))
        ));
    }
}

// ── Clock parsing ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod clock {
    use campus_core::Tick;

    use crate::parse_clock;

    #[test]
    fn formats() {
        assert_eq!(parse_clock("27000").unwrap(), Tick(27_000));
        assert_eq!(parse_clock("07:15").unwrap(), Tick::from_hms(7, 15, 0));
        assert_eq!(parse_clock(" 20:30:05 ").unwrap(), Tick::from_hms(20, 30, 5));
        assert_eq!(parse_clock("24:00").unwrap(), Tick(86_400));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_clock("7h15").is_err());
        assert!(parse_clock("07:75").is_err());
        assert!(parse_clock("25:00").is_err());
        assert!(parse_clock("").is_err());
        assert!(parse_clock("1:2:3:4").is_err());
    }

    #[test]
    fn huge_hours_are_an_error_not_an_overflow() {
        assert!(matches!(
            parse_clock("5124095576030432:00"),
            Err(crate::ScheduleError::Parse(_))
        ));
        assert!(parse_clock("18446744073709551615:00:00").is_err());
        assert!(parse_clock("24:00:01").is_err());
    }
}

// ── Generation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod generate {
    use campus_core::{AgentId, AgentRng, LocationId, Tick};

    use crate::{Destination, ScheduleError, ScheduleTemplate, TemplateSlot};

    fn canteens() -> Vec<Destination> {
        vec![
            Destination::Location(LocationId(10)),
            Destination::Location(LocationId(11)),
            Destination::Location(LocationId(12)),
        ]
    }

    fn template() -> ScheduleTemplate {
        ScheduleTemplate::new(vec![
            TemplateSlot { start: Tick::from_hms(7, 0, 0),   dwell_secs: 1_200, choices: canteens() },
            TemplateSlot {
                start:      Tick::from_hms(8, 0, 0),
                dwell_secs: 6_000,
                choices:    vec![Destination::Location(LocationId(20)), Destination::Location(LocationId(21))],
            },
            TemplateSlot { start: Tick::from_hms(20, 30, 0), dwell_secs: 1_800, choices: vec![Destination::Home] },
        ])
    }

    #[test]
    fn same_seed_same_schedule() {
        let t = template();
        let a = t.generate(LocationId(0), &mut AgentRng::new(7, AgentId(4))).unwrap();
        let b = t.generate(LocationId(0), &mut AgentRng::new(7, AgentId(4))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn choices_come_from_slot() {
        let t = template();
        for agent in 0..50 {
            let s = t.generate(LocationId(3), &mut AgentRng::new(1, AgentId(agent))).unwrap();
            assert_eq!(s.len(), 3);
            assert!((10..=12).contains(&s.get(0).unwrap().target.0));
            assert!((20..=21).contains(&s.get(1).unwrap().target.0));
            assert_eq!(s.get(2).unwrap().target, LocationId(3), "home resolves per agent");
        }
    }

    #[test]
    fn empty_slot_is_an_error() {
        let t = ScheduleTemplate::new(vec![TemplateSlot {
            start:      Tick(10),
            dwell_secs: 1,
            choices:    vec![],
        }]);
        let err = t.generate(LocationId(0), &mut AgentRng::new(0, AgentId(0))).unwrap_err();
        assert!(matches!(err, ScheduleError::EmptySlot(0)));
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use campus_core::{LocationId, Tick};

    use crate::{ScheduleError, load_schedules_reader};

    fn resolve(name: &str) -> Option<LocationId> {
        match name {
            "Dorm" => Some(LocationId(0)),
            "Canteen" => Some(LocationId(1)),
            "F3a" => Some(LocationId(2)),
            _ => None,
        }
    }

    const CSV: &str = "\
agent_id,target,start,dwell_secs\n\
0,Canteen,07:00,1200\n\
0,F3a,08:00,6000\n\
0,home,20:30,1800\n\
2,F3a,28800,60\n\
";

    #[test]
    fn loads_rows_per_agent() {
        let homes = [LocationId(0), LocationId(0), LocationId(1)];
        let schedules = load_schedules_reader(Cursor::new(CSV), &homes, resolve).unwrap();
        assert_eq!(schedules.len(), 3);

        assert_eq!(schedules[0].len(), 3);
        assert_eq!(schedules[0].get(0).unwrap().target, LocationId(1));
        assert_eq!(schedules[0].get(1).unwrap().start, Tick::from_hms(8, 0, 0));
        assert_eq!(schedules[0].get(2).unwrap().target, LocationId(0));

        assert!(schedules[1].is_empty(), "agent without rows gets an empty schedule");

        assert_eq!(schedules[2].get(0).unwrap().start, Tick(28_800));
    }

    #[test]
    fn home_resolves_per_agent() {
        let homes = [LocationId(2)];
        let csv = "agent_id,target,start,dwell_secs\n0,home,08:00,10\n";
        let schedules = load_schedules_reader(Cursor::new(csv), &homes, resolve).unwrap();
        assert_eq!(schedules[0].get(0).unwrap().target, LocationId(2));
    }

    #[test]
    fn unknown_location_fails_fast() {
        let homes = [LocationId(0)];
        let csv = "agent_id,target,start,dwell_secs\n0,Gym,08:00,10\n";
        let err = load_schedules_reader(Cursor::new(csv), &homes, resolve).unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownLocationName(n) if n == "Gym"));
    }

    #[test]
    fn unknown_agent_fails_fast() {
        let homes = [LocationId(0)];
        let csv = "agent_id,target,start,dwell_secs\n5,Dorm,08:00,10\n";
        let err = load_schedules_reader(Cursor::new(csv), &homes, resolve).unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownAgent(5)));
    }

    #[test]
    fn misordered_rows_rejected() {
        let homes = [LocationId(0)];
        let csv = "agent_id,target,start,dwell_secs\n0,Dorm,09:00,10\n0,F3a,08:00,10\n";
        let err = load_schedules_reader(Cursor::new(csv), &homes, resolve).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidOrdering { .. }));
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let homes = [LocationId(0)];
        let csv = "agent_id,target,start,dwell_secs\nzero,Dorm,08:00,10\n";
        let err = load_schedules_reader(Cursor::new(csv), &homes, resolve).unwrap_err();
        assert!(matches!(err, ScheduleError::Parse(_)));
    }
}
