//! Unit tests for campus-scenario.

use campus_core::{LocationId, Tick, UnreachablePolicy};

use crate::{Scenario, ScenarioError, ScheduleSource};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Dorm — Gate — Library, with a Canteen off the gate and an island Lab.
const CAMPUS: &str = r#"{
    "config": { "start_secs": 25200, "end_secs": 86400, "seed": 7,
                "unreachable_policy": "skip" },
    "locations": {
        "Dorm":    [0.10, 0.80],
        "Gate":    [0.30, 0.60],
        "Library": [0.60, 0.30],
        "Canteen": [0.30, 0.90],
        "Lab":     [0.90, 0.90]
    },
    "edges": [
        { "id": 1, "start": "Dorm", "end": "Gate",    "length": 40.0, "time_cost": 30.0 },
        { "id": 2, "start": "Gate", "end": "Library", "length": 60.0, "time_cost": 45.0 },
        { "id": 3, "start": "Gate", "end": "Canteen", "length": 30.0, "time_cost": 20.0 }
    ],
    "agents": [
        { "id": 0, "name": "Ada",   "home": "Dorm" },
        { "id": 1, "name": "Brook", "home": "Dorm", "class_name": "CS1" },
        { "id": 2, "name": "Chen",  "home": "Canteen" }
    ],
    "schedules": {
        "0": [
            { "target": "Library", "start_secs": 28800, "dwell_secs": 3000 },
            { "target": "home",    "start": "18:00",    "dwell_secs": 600 }
        ]
    },
    "timetable": {
        "subjects": [
            { "building": "Library", "start_time": "10:00", "end_time": "11:40" },
            { "building": "Canteen", "start_time": "12:00", "end_time": "12:30" },
            { "building": "Library", "start_time": "08:00", "end_time": "09:40" }
        ],
        "classes": [
            { "class_name": "CS1", "content": "Library-Canteen" }
        ]
    }
}"#;

fn load_err(json: &str) -> ScenarioError {
    match Scenario::from_json_str(json) {
        Ok(_) => panic!("expected the scenario to be rejected"),
        Err(e) => e,
    }
}

fn id(s: &Scenario, name: &str) -> LocationId {
    s.graph.location_id(name).unwrap()
}

// ── Resolution ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod resolve {
    use super::*;

    #[test]
    fn builds_graph_from_segments() {
        let s = Scenario::from_json_str(CAMPUS).unwrap();
        assert_eq!(s.graph.location_count(), 5);
        assert_eq!(s.graph.edge_count(), 6, "each segment yields two edges");
        assert!(s.graph.edge_between(id(&s, "Library"), id(&s, "Gate")).is_some());
        assert!(!s.graph.is_reachable(id(&s, "Dorm"), id(&s, "Lab")));
    }

    #[test]
    fn location_ids_follow_name_order() {
        let s = Scenario::from_json_str(CAMPUS).unwrap();
        let names: Vec<&str> = s.graph.location_names.iter().map(String::as_str).collect();
        assert_eq!(names, ["Canteen", "Dorm", "Gate", "Lab", "Library"]);
    }

    #[test]
    fn config_is_read() {
        let s = Scenario::from_json_str(CAMPUS).unwrap();
        assert_eq!(s.config.start_secs, 25_200);
        assert_eq!(s.config.seed, 7);
        assert_eq!(s.config.unreachable_policy, UnreachablePolicy::Skip);
        assert_eq!(s.config.output_interval_ticks, 60, "unset fields keep defaults");
    }

    #[test]
    fn agents_and_homes() {
        let s = Scenario::from_json_str(CAMPUS).unwrap();
        assert_eq!(s.agents.len(), 3);
        assert_eq!(s.agents[1].name, "Brook");
        assert_eq!(s.homes(), vec![id(&s, "Dorm"), id(&s, "Dorm"), id(&s, "Canteen")]);
    }

    #[test]
    fn explicit_schedule_resolves_home_and_clock_strings() {
        let s = Scenario::from_json_str(CAMPUS).unwrap();
        assert_eq!(s.sources[0], ScheduleSource::Explicit);
        let sched = &s.schedules[0];
        assert_eq!(sched.len(), 2);
        assert_eq!(sched.get(0).unwrap().target, id(&s, "Library"));
        assert_eq!(sched.get(1).unwrap().target, id(&s, "Dorm"));
        assert_eq!(sched.get(1).unwrap().start, Tick::from_hms(18, 0, 0));
    }

    #[test]
    fn agent_without_source_gets_empty_schedule() {
        let s = Scenario::from_json_str(CAMPUS).unwrap();
        assert_eq!(s.sources[2], ScheduleSource::Empty);
        assert!(s.schedules[2].is_empty());
    }

    #[test]
    fn into_sim_runs() {
        let s = Scenario::from_json_str(CAMPUS).unwrap();
        let mut sim = s.into_sim(campus_graph::DijkstraPathFinder).unwrap();
        assert_eq!(sim.agents.len(), 3);
        let summary = sim.step();
        assert_eq!(summary.clock, Tick(25_201));
    }
}

// ── Timetable ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod timetable {
    use super::*;

    #[test]
    fn class_subjects_in_time_order_then_home() {
        let s = Scenario::from_json_str(CAMPUS).unwrap();
        assert_eq!(s.sources[1], ScheduleSource::Timetable);

        let sched = &s.schedules[1];
        let acts: Vec<(LocationId, Tick, u32)> =
            sched.activities().iter().map(|a| (a.target, a.start, a.dwell_secs)).collect();
        assert_eq!(
            acts,
            vec![
                (id(&s, "Library"), Tick::from_hms(8, 0, 0),   6_000),
                (id(&s, "Library"), Tick::from_hms(10, 0, 0),  6_000),
                (id(&s, "Canteen"), Tick::from_hms(12, 0, 0),  1_800),
                (id(&s, "Dorm"),    Tick::from_hms(20, 30, 0), 1_800),
            ]
        );
    }

    #[test]
    fn unknown_class_rejected() {
        let json = CAMPUS.replace(r#""class_name": "CS1""#, r#""class_name": "EE9""#);
        assert!(matches!(
            load_err(&json),
            ScenarioError::UnknownClass { agent: 1, class } if class == "EE9"
        ));
    }

    #[test]
    fn unknown_building_in_content_rejected() {
        let json = CAMPUS.replace("Library-Canteen", "Library-Gym");
        assert!(matches!(
            load_err(&json),
            ScenarioError::UnknownLocation { name, .. } if name == "Gym"
        ));
    }
}

// ── Generation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod generate {
    use super::*;

    const GENERATED: &str = r#"{
        "config": { "seed": 11 },
        "locations": { "Dorm": [0.1, 0.1], "A": [0.5, 0.5], "B": [0.9, 0.9] },
        "edges": [
            { "id": 0, "start": "Dorm", "end": "A", "length": 1.0, "time_cost": 10.0 },
            { "id": 1, "start": "A",    "end": "B", "length": 1.0, "time_cost": 10.0 }
        ],
        "agents": [
            { "id": 0, "home": "Dorm" },
            { "id": 1, "home": "B" }
        ],
        "generate": [
            { "start": "08:00", "dwell_secs": 3600, "choices": ["A", "B"] },
            { "start": 72000,   "dwell_secs": 600,  "choices": ["home"] }
        ]
    }"#;

    #[test]
    fn template_fills_missing_schedules() {
        let s = Scenario::from_json_str(GENERATED).unwrap();
        assert_eq!(s.sources, vec![ScheduleSource::Generated; 2]);
        for (sched, home) in s.schedules.iter().zip(s.homes()) {
            assert_eq!(sched.len(), 2);
            let first = sched.get(0).unwrap().target;
            assert!(first == id(&s, "A") || first == id(&s, "B"));
            assert_eq!(sched.get(1).unwrap().target, home);
            assert_eq!(sched.get(1).unwrap().start, Tick(72_000));
        }
    }

    #[test]
    fn generation_is_seeded() {
        let a = Scenario::from_json_str(GENERATED).unwrap();
        let b = Scenario::from_json_str(GENERATED).unwrap();
        assert_eq!(a.schedules, b.schedules);
    }
}

// ── Load-time errors ──────────────────────────────────────────────────────────

#[cfg(test)]
mod errors {
    use super::*;

    #[test]
    fn unknown_edge_endpoint() {
        let json = CAMPUS.replace(r#""end": "Canteen""#, r#""end": "Gym""#);
        match load_err(&json) {
            ScenarioError::UnknownLocation { name, context } => {
                assert_eq!(name, "Gym");
                assert_eq!(context, "edge 3");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn unknown_home() {
        let json = CAMPUS.replace(r#""home": "Canteen""#, r#""home": "Pool""#);
        assert!(matches!(load_err(&json), ScenarioError::UnknownLocation { name, .. } if name == "Pool"));
    }

    #[test]
    fn unknown_schedule_target() {
        let json = CAMPUS.replace(r#""target": "Library""#, r#""target": "Attic""#);
        assert!(matches!(load_err(&json), ScenarioError::UnknownLocation { name, .. } if name == "Attic"));
    }

    #[test]
    fn invalid_edge_time_cost() {
        let json = CAMPUS.replace(r#""time_cost": 20.0"#, r#""time_cost": 0.0"#);
        assert!(matches!(
            load_err(&json),
            ScenarioError::Graph(campus_graph::GraphError::InvalidEdge { .. })
        ));
    }

    #[test]
    fn misordered_schedule() {
        let json = CAMPUS.replace(r#""start": "18:00""#, r#""start": "08:10""#);
        assert!(matches!(
            load_err(&json),
            ScenarioError::Schedule {
                agent: 0,
                source: campus_schedule::ScheduleError::InvalidOrdering { .. }
            }
        ));
    }

    #[test]
    fn schedule_for_missing_agent() {
        let json = CAMPUS.replace(r#""schedules": {"#, r#""schedules": { "9": [],"#);
        assert!(matches!(load_err(&json), ScenarioError::UnknownAgent(9)));
    }

    #[test]
    fn agent_ids_must_be_dense() {
        let json = CAMPUS.replace(r#"{ "id": 2, "name": "Chen""#, r#"{ "id": 5, "name": "Chen""#);
        assert!(matches!(
            load_err(&json),
            ScenarioError::AgentIdOrder { position: 2, found: 5, count: 3 }
        ));
    }

    #[test]
    fn config_out_of_day() {
        let json = CAMPUS.replace(r#""end_secs": 86400"#, r#""end_secs": 90000"#);
        assert!(matches!(load_err(&json), ScenarioError::Config(_)));
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(load_err("{ not json"), ScenarioError::Json(_)));
    }

    #[test]
    fn missing_file() {
        let err = Scenario::load(std::path::Path::new("/definitely/not/here.json"));
        assert!(matches!(err, Err(ScenarioError::Io(_))));
    }
}
