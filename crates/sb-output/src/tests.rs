//! Integration tests for sb-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CONTRIBUTION_HEADERS, CsvWriter, SNAPSHOT_HEADERS, STEERING_HEADERS};
    use crate::row::{AgentSnapshotRow, ContributionRow, SteeringTraceRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn records(path: std::path::PathBuf) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    fn snap_row(agent_id: u32, tick: u64) -> AgentSnapshotRow {
        AgentSnapshotRow {
            agent_id,
            tick,
            time_secs:   tick as f32 * 0.5,
            x:           agent_id as f32,
            y:           -1.5,
            vx:          0.0,
            vy:          2.0,
            bearing_deg: 0.0,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("agent_snapshots.csv").exists());
        assert!(dir.path().join("steering_trace.csv").exists());
        assert!(dir.path().join("contributions.csv").exists());
    }

    #[test]
    fn output_dir_is_created() {
        let dir = tmp();
        let nested = dir.path().join("a").join("b");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("steering_trace.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(headers(dir.path().join("agent_snapshots.csv")), SNAPSHOT_HEADERS);
        assert_eq!(headers(dir.path().join("steering_trace.csv")), STEERING_HEADERS);
        assert_eq!(headers(dir.path().join("contributions.csv")), CONTRIBUTION_HEADERS);
        assert_eq!(
            headers(dir.path().join("agent_snapshots.csv")),
            ["agent_id", "tick", "time_secs", "x", "y", "vx", "vy", "bearing_deg"]
        );
    }

    #[test]
    fn snapshot_rows_written_in_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 4), snap_row(1, 4), snap_row(2, 4)]).unwrap();
        w.finish().unwrap();

        let rows = records(dir.path().join("agent_snapshots.csv"));
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "0"); // agent_id
        assert_eq!(&rows[0][1], "4"); // tick
        assert_eq!(&rows[0][2], "2"); // time_secs
        assert_eq!(&rows[2][3], "2"); // x
        assert_eq!(&rows[1][4], "-1.5");
    }

    #[test]
    fn abstaining_contribution_has_empty_force() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = ContributionRow {
            agent_id:    3,
            tick:        1,
            behavior_id: 0,
            behavior:    "seek",
            weight:      2.0,
            activation:  0.0,
            normal:      None,
            tangent:     None,
        };
        w.write_contributions(&[row, ContributionRow { normal: Some(1.0), tangent: Some(-2.0), ..row }])
            .unwrap();
        w.finish().unwrap();

        let rows = records(dir.path().join("contributions.csv"));
        assert_eq!(&rows[0][3], "seek");
        assert_eq!(&rows[0][6], "");
        assert_eq!(&rows[0][7], "");
        assert_eq!(&rows[1][6], "1");
        assert_eq!(&rows[1][7], "-2");
    }

    #[test]
    fn steering_row_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = SteeringTraceRow {
            agent_id:        7,
            tick:            9,
            active:          2,
            weight_sum:      3.0,
            blended_normal:  0.5,
            blended_tangent: 12.0,
            normal:          0.5,
            tangent:         10.0,
            fx:              0.5,
            fy:              10.0,
            governor_fx:     0.0,
            governor_fy:     0.0,
        };
        w.write_steering(&[row]).unwrap();
        w.finish().unwrap();

        let rows = records(dir.path().join("steering_trace.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "7");
        assert_eq!(&rows[0][2], "2");
        assert_eq!(&rows[0][5], "12");
        assert_eq!(&rows[0][7], "10");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call should not panic
    }

    #[test]
    fn csv_empty_batches_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
        w.write_steering(&[]).unwrap();
        w.write_contributions(&[]).unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use sb_agent::AgentStoreBuilder;
    use sb_behavior::{Cruise, Seek, Target};
    use sb_core::{AgentId, KinematicState, SimConfig, Vec2};
    use sb_sim::SimBuilder;
    use tempfile::TempDir;

    use crate::{CsvWriter, SimOutputObserver};

    fn config(total_ticks: u64, interval: u64) -> SimConfig {
        SimConfig {
            dt:                    0.02,
            total_ticks,
            seed:                  1,
            num_threads:           Some(1),
            output_interval_ticks: interval,
        }
    }

    fn count_rows(dir: &TempDir, file: &str) -> usize {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().count()
    }

    fn run(config: SimConfig, contributions: bool) -> TempDir {
        let agents = AgentStoreBuilder::new(1)
            .agent(KinematicState::default())
            .agent(KinematicState::at_rest(Vec2::new(5.0, 0.0), 90.0, 1.0))
            .agent(KinematicState::at_rest(Vec2::new(-5.0, 0.0), 180.0, 1.0))
            .build();
        let mut sim = SimBuilder::new(config.clone(), agents).build().unwrap();
        for agent in [AgentId(0), AgentId(1), AgentId(2)] {
            let c = sim.controller_mut(agent).unwrap();
            c.add(Cruise::new(1.0));
            c.add(Seek::new(Target::Agent(AgentId(0)), 1.0));
        }

        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &config);
        if !contributions {
            obs = obs.without_contributions();
        }
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");
        dir
    }

    #[test]
    fn interval_controls_all_files() {
        // output_interval = 2 → ticks 0, 2, 4 are recorded, 3 agents each.
        let dir = run(config(6, 2), true);
        assert_eq!(count_rows(&dir, "agent_snapshots.csv"), 9);
        assert_eq!(count_rows(&dir, "steering_trace.csv"), 9);
        // Two behaviours per agent.
        assert_eq!(count_rows(&dir, "contributions.csv"), 18);
    }

    #[test]
    fn zero_interval_writes_headers_only() {
        let dir = run(config(5, 0), true);
        assert_eq!(count_rows(&dir, "agent_snapshots.csv"), 0);
        assert_eq!(count_rows(&dir, "steering_trace.csv"), 0);
        assert_eq!(count_rows(&dir, "contributions.csv"), 0);
    }

    #[test]
    fn contributions_can_be_skipped() {
        let dir = run(config(4, 1), false);
        assert_eq!(count_rows(&dir, "steering_trace.csv"), 12);
        assert_eq!(count_rows(&dir, "contributions.csv"), 0);
    }

    #[test]
    fn seek_on_self_abstains_in_trace() {
        let dir = run(config(1, 1), true);
        let mut rdr = csv::Reader::from_path(dir.path().join("contributions.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        // Agent 0 seeking itself: no direction, so no force.
        let own_seek = rows.iter().find(|r| &r[0] == "0" && &r[3] == "seek").unwrap();
        assert_eq!(&own_seek[7], "");
        let other = rows.iter().find(|r| &r[0] == "1" && &r[3] == "seek").unwrap();
        assert_ne!(&other[7], "");
    }
}
