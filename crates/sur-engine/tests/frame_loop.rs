use std::time::Duration;

use sur_engine::{FrameHost, LoopControl, run_loop};

/// Replays a fixed list of frame timestamps, then repeats the last one.
struct ScriptedHost {
    start: Duration,
    ticks: Vec<Duration>,
    next: usize,
}

impl ScriptedHost {
    fn new(start_ms: u64, ticks_ms: &[u64]) -> Self {
        Self {
            start: Duration::from_millis(start_ms),
            ticks: ticks_ms.iter().copied().map(Duration::from_millis).collect(),
            next: 0,
        }
    }
}

impl FrameHost for ScriptedHost {
    fn now(&mut self) -> Duration {
        self.start
    }

    fn next_frame(&mut self) -> Duration {
        let tick = self.ticks.get(self.next).or(self.ticks.last()).copied().unwrap_or(self.start);
        self.next += 1;
        tick
    }
}

#[test]
fn stop_on_nth_call_runs_exactly_n_times() {
    let mut host = ScriptedHost::new(0, &[16, 32, 48, 64, 80, 96]);
    let mut calls = 0;
    let frames = run_loop(&mut host, |_dt| {
        calls += 1;
        if calls == 4 { LoopControl::Stop } else { LoopControl::Continue }
    });
    assert_eq!(calls, 4);
    assert_eq!(frames, 4);
}

#[test]
fn deltas_measure_elapsed_seconds() {
    let mut host = ScriptedHost::new(1_000, &[1_016, 1_050, 1_050, 3_050]);
    let mut seen = Vec::new();
    run_loop(&mut host, |dt| {
        seen.push(dt);
        if seen.len() == 4 { LoopControl::Stop } else { LoopControl::Continue }
    });
    let expected = [0.016, 0.034, 0.0, 2.0];
    for (got, want) in seen.iter().zip(expected) {
        assert!((got - want).abs() < 1e-5, "got {got}, want {want}");
    }
}

#[test]
fn deltas_are_never_negative() {
    let mut host = ScriptedHost::new(500, &[400, 510, 505, 520]);
    let mut seen = Vec::new();
    run_loop(&mut host, |dt| {
        seen.push(dt);
        if seen.len() == 4 { LoopControl::Stop } else { LoopControl::Continue }
    });
    assert!(seen.iter().all(|dt| *dt >= 0.0));
    assert_eq!(seen[0], 0.0);
}

#[test]
#[should_panic(expected = "reached frame 5")]
fn unit_callbacks_keep_running() {
    let mut host = ScriptedHost::new(0, &[10]);
    let mut calls = 0;
    // Returns `()` on every call; only the panic can end the loop.
    run_loop(&mut host, |_| {
        calls += 1;
        if calls == 5 {
            panic!("reached frame {calls}");
        }
    });
}

#[test]
#[should_panic(expected = "callback failed on call 2")]
fn callback_panics_propagate() {
    let mut host = ScriptedHost::new(0, &[16, 32, 48]);
    let mut calls = 0;
    run_loop(&mut host, |_| {
        calls += 1;
        if calls == 2 {
            panic!("callback failed on call {calls}");
        }
        LoopControl::Continue
    });
}

#[test]
fn stop_on_first_call() {
    let mut host = ScriptedHost::new(0, &[10]);
    assert_eq!(run_loop(&mut host, |_| LoopControl::Stop), 1);
}
