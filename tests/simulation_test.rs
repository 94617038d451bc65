use roadsim::simulation::{DisplayTime, SimWorld, TraceEvent};
use std::process::Command;

fn network(name: &str) -> String {
    format!("{}/tests/networks/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn roadsim(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_roadsim"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute roadsim")
}

/// Source A sends three vehicles five seconds apart down a two second road
/// into sink B
#[test]
fn test_source_to_sink_scenario() {
    let mut world = SimWorld::new_with_seed(5);
    world.silence_trace();
    world.record_trace();
    world.add_source("A", 0.0, 3, 5.0).unwrap();
    world.add_sink("B").unwrap();
    world.add_road_between("A", "B", 2.0).unwrap();

    let summary = world.run().unwrap();

    assert_eq!(summary.events_triggered, 6);
    assert_eq!(summary.final_time, 12.0);
    assert_eq!(summary.events_pending, 0);

    let lines: Vec<String> = world.trace().iter().map(|e| e.to_string()).collect();
    assert_eq!(
        lines,
        vec![
            "Vehicle entered Road A B 2.0 at 0.0",
            "Vehicle arrived at Intersection B sink at 2.0",
            "Vehicle entered Road A B 2.0 at 5.0",
            "Vehicle arrived at Intersection B sink at 7.0",
            "Vehicle entered Road A B 2.0 at 10.0",
            "Vehicle arrived at Intersection B sink at 12.0",
        ]
    );
}

#[test]
fn test_trace_times_never_decrease() {
    let mut world = SimWorld::new_with_seed(11);
    world.silence_trace();
    world.record_trace();
    let text = std::fs::read_to_string(network("stoplight.net")).unwrap();
    roadsim::description::read_network(&text, &mut world);
    assert_eq!(world.diagnostics().count(), 0);

    world.run_until(100.0).unwrap();

    let times: Vec<f32> = world.trace().iter().map(TraceEvent::time).collect();
    assert!(!times.is_empty());
    assert!(times.windows(2).all(|pair| pair[0] <= pair[1]));
    let delivered = world
        .trace()
        .iter()
        .filter(|e| matches!(e, TraceEvent::Arrived { intersection, .. } if intersection.starts_with("Intersection Exit ")))
        .count();
    assert_eq!(delivered, 8);
}

/// Two worlds built from the same description never share state
#[test]
fn test_independent_worlds() {
    let build = |count: i32| {
        let mut world = SimWorld::new();
        world.silence_trace();
        world.add_source("A", 0.0, count, 1.0).unwrap();
        world.add_sink("B").unwrap();
        world.add_road_between("A", "B", 1.0).unwrap();
        world
    };
    let mut small = build(1);
    let mut large = build(10);

    assert_eq!(large.run().unwrap().events_triggered, 20);
    assert_eq!(small.run().unwrap().events_triggered, 2);
}

#[test]
fn test_time_format() {
    let cases: [(f32, &str); 7] = [
        (2.0, "2.0"),
        (7.5, "7.5"),
        (-1.0, "-1.0"),
        (0.0001, "0.0001"),
        (1e10, "10000000000.0"),
        (1e20, "1e20"),
        (1e-5, "1e-5"),
    ];
    for (time, text) in cases {
        assert_eq!(DisplayTime(time).to_string(), text);
    }
}

#[test]
fn test_cli_prints_trace() {
    let output = roadsim(&[&network("source_to_sink.net")]);

    assert!(
        output.status.success(),
        "roadsim failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "Vehicle entered Road A B 2.0 at 0.0",
            "Vehicle arrived at Intersection B sink at 2.0",
            "Vehicle entered Road A B 2.0 at 5.0",
            "Vehicle arrived at Intersection B sink at 7.0",
            "Vehicle entered Road A B 2.0 at 10.0",
            "Vehicle arrived at Intersection B sink at 12.0",
        ]
    );
}

#[test]
fn test_cli_stops_at_horizon() {
    let output = roadsim(&[&network("stoplight.net"), "--until", "100", "--seed", "3"]);

    assert!(
        output.status.success(),
        "roadsim failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Vehicle arrived at Intersection Light stoplight 1.0 5.0 at 2.0"));
    assert_eq!(
        stdout
            .lines()
            .filter(|line| line.starts_with("Vehicle arrived at Intersection Exit sink"))
            .count(),
        8
    );
}

#[test]
fn test_cli_dumps_network_with_errors() {
    let output = roadsim(&[&network("broken.net")]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "Intersection A source 0.0 3 5.0\nIntersection B sink\nRoad A B 2.0\n"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("RoadNetwork: Intersection redefined: A"));
    assert!(stderr.contains("RoadNetwork: No such destination intersection: Road A C"));
}

#[test]
fn test_cli_missing_file() {
    let output = roadsim(&[&network("does_not_exist.net")]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Can't open the file"));
}
