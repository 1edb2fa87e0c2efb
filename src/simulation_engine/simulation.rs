// simulation.rs
use crate::error::Result;
use crate::global_variables::TICK_INTERVAL_MS;
use crate::models::{Scenario, Vehicle};
use crate::simulation_engine::grid::Canvas;
use crate::simulation_engine::movement::advance_all;
use crate::simulation_engine::render::{Frame, FrameRenderer};
use tokio::sync::watch;
use tokio::time::{interval_at, sleep_until, Duration, Instant};

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The scenario's time ran out.
    DurationElapsed,
    /// The stop signal fired.
    Stopped,
    /// Nothing to animate; the run never started.
    NoVehicles,
}

/// Outcome of `Simulation::run`.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub scenario: Scenario,
    pub ticks: u64,
    pub elapsed: Duration,
    pub reason: StopReason,
    /// Positions after the last tick. These are never written back to the store.
    pub vehicles: Vec<Vehicle>,
}

/// Fixed-timestep animation of one scenario's vehicles.
///
/// The simulation works on its own copy of the vehicles.
#[derive(Debug, Clone)]
pub struct Simulation {
    scenario: Scenario,
    vehicles: Vec<Vehicle>,
    canvas: Canvas,
    tick_interval: Duration,
    ticks: u64,
}

impl Simulation {
    pub fn new(scenario: Scenario, vehicles: Vec<Vehicle>) -> Self {
        Self {
            scenario,
            vehicles,
            canvas: Canvas::default(),
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            ticks: 0,
        }
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval.max(Duration::from_millis(1));
        self
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// How long the run lasts before it stops by itself.
    pub fn duration(&self) -> Duration {
        self.scenario.duration()
    }

    /// Recomputes every vehicle's position once.
    pub fn tick(&mut self) {
        advance_all(&mut self.vehicles);
        self.ticks += 1;
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            tick: self.ticks,
            canvas: &self.canvas,
            vehicles: &self.vehicles,
        }
    }

    /// Draws the initial frame, then ticks and redraws on every interval
    /// until the scenario's duration elapses or `stop` turns true.
    ///
    /// A dropped stop sender counts as a stop.
    pub async fn run<R: FrameRenderer>(
        mut self,
        mut renderer: R,
        mut stop: watch::Receiver<bool>,
    ) -> Result<SimulationReport> {
        if self.vehicles.is_empty() {
            log::info!(
                "Scenario {} has no vehicles; simulation not started",
                self.scenario.id
            );
            return Ok(self.into_report(Duration::ZERO, StopReason::NoVehicles));
        }

        let started = Instant::now();
        log::info!(
            "Starting simulation of scenario {} ({} vehicles, {}s, tick {:?})",
            self.scenario.id,
            self.vehicles.len(),
            self.scenario.time,
            self.tick_interval
        );
        // Both clocks start before the first draw so a slow frame cannot push the deadline.
        let deadline = sleep_until(started + self.duration());
        tokio::pin!(deadline);
        let mut ticker = interval_at(started + self.tick_interval, self.tick_interval);
        renderer.draw(&self.frame())?;

        let reason = if *stop.borrow() {
            StopReason::Stopped
        } else {
            loop {
                tokio::select! {
                    biased;
                    _ = &mut deadline => break StopReason::DurationElapsed,
                    changed = stop.changed() => {
                        if changed.is_err() || *stop.borrow() {
                            break StopReason::Stopped;
                        }
                    }
                    _ = ticker.tick() => {
                        self.tick();
                        log::debug!("tick {} of scenario {}", self.ticks, self.scenario.id);
                        renderer.draw(&self.frame())?;
                    }
                }
            }
        };

        let elapsed = started.elapsed();
        log::info!(
            "Simulation of scenario {} ended after {} ticks: {:?}",
            self.scenario.id,
            self.ticks,
            reason
        );
        Ok(self.into_report(elapsed, reason))
    }

    fn into_report(self, elapsed: Duration, reason: StopReason) -> SimulationReport {
        SimulationReport {
            scenario: self.scenario,
            ticks: self.ticks,
            elapsed,
            reason,
            vehicles: self.vehicles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, RecordId};
    use tokio::time::sleep;

    /// Keeps the tick number and first vehicle position of every frame.
    #[derive(Default)]
    struct Recorder {
        frames: Vec<(u64, f64, f64)>,
    }

    impl FrameRenderer for Recorder {
        fn draw(&mut self, frame: &Frame<'_>) -> Result<()> {
            let first = &frame.vehicles[0];
            self.frames
                .push((frame.tick, first.position_x, first.position_y));
            Ok(())
        }
    }

    fn scenario(time: f64) -> Scenario {
        Scenario {
            id: RecordId::new("1"),
            name: "test".to_string(),
            time,
        }
    }

    fn car(direction: Direction, speed: f64) -> Vehicle {
        Vehicle {
            id: RecordId::new("10"),
            scenario_id: RecordId::new("1"),
            name: "car".to_string(),
            speed,
            position_x: 200.0,
            position_y: 300.0,
            direction: Some(direction),
        }
    }

    #[test]
    fn tick_advances_and_counts() {
        let mut sim = Simulation::new(scenario(10.0), vec![car(Direction::Upwards, 4.0)]);
        sim.tick();
        sim.tick();
        assert_eq!(sim.ticks(), 2);
        assert_eq!(sim.vehicles()[0].position_y, 308.0);
        assert_eq!(sim.frame().tick, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn runs_until_duration_elapses() {
        let sim = Simulation::new(scenario(1.0), vec![car(Direction::Towards, 10.0)])
            .with_tick_interval(Duration::from_millis(300));
        let (_stop_tx, stop_rx) = watch::channel(false);
        let mut recorder = Recorder::default();

        let report = sim.run(&mut recorder, stop_rx).await.unwrap();

        assert_eq!(report.reason, StopReason::DurationElapsed);
        assert_eq!(report.ticks, 3);
        assert_eq!(report.vehicles[0].position_x, 230.0);
        assert_eq!(
            recorder.frames,
            vec![
                (0, 200.0, 300.0),
                (1, 210.0, 300.0),
                (2, 220.0, 300.0),
                (3, 230.0, 300.0)
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_wins_over_a_tick_at_the_same_instant() {
        let sim = Simulation::new(scenario(3.0), vec![car(Direction::Upwards, 1.0)])
            .with_tick_interval(Duration::from_millis(1000));
        let (_stop_tx, stop_rx) = watch::channel(false);
        let mut recorder = Recorder::default();

        let report = sim.run(&mut recorder, stop_rx).await.unwrap();

        assert_eq!(report.reason, StopReason::DurationElapsed);
        assert_eq!(report.ticks, 2);
        assert_eq!(recorder.frames.len(), 3);
        assert_eq!(report.vehicles[0].position_y, 302.0);
    }

    #[tokio::test(start_paused = true)]
    async fn fractional_duration_is_honoured() {
        let sim = Simulation::new(scenario(1.5), vec![car(Direction::Towards, 1.0)])
            .with_tick_interval(Duration::from_millis(400));
        let (_stop_tx, stop_rx) = watch::channel(false);

        let report = sim.run(Recorder::default(), stop_rx).await.unwrap();

        assert_eq!(report.reason, StopReason::DurationElapsed);
        assert_eq!(report.ticks, 3);
        assert_eq!(report.elapsed, Duration::from_millis(1500));
    }

    /// Blocks on the first frame like a large PNG encode would.
    struct SlowFirstFrame {
        delay: std::time::Duration,
        frames: u64,
    }

    impl FrameRenderer for SlowFirstFrame {
        fn draw(&mut self, _frame: &Frame<'_>) -> Result<()> {
            if self.frames == 0 {
                std::thread::sleep(self.delay);
            }
            self.frames += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn slow_first_frame_does_not_delay_the_deadline() {
        let sim = Simulation::new(scenario(1.0), vec![car(Direction::Towards, 1.0)])
            .with_tick_interval(Duration::from_millis(250));
        let (_stop_tx, stop_rx) = watch::channel(false);
        let mut renderer = SlowFirstFrame {
            delay: std::time::Duration::from_millis(60),
            frames: 0,
        };

        let report = sim.run(&mut renderer, stop_rx).await.unwrap();

        assert_eq!(report.reason, StopReason::DurationElapsed);
        assert_eq!(report.ticks, 3);
        assert_eq!(renderer.frames, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_signal_ends_the_run() {
        let sim = Simulation::new(scenario(60.0), vec![car(Direction::Backwards, 5.0)])
            .with_tick_interval(Duration::from_millis(1000));
        let (stop_tx, stop_rx) = watch::channel(false);
        tokio::spawn(async move {
            sleep(Duration::from_millis(2500)).await;
            stop_tx.send(true).unwrap();
        });

        let report = sim.run(Recorder::default(), stop_rx).await.unwrap();

        assert_eq!(report.reason, StopReason::Stopped);
        assert_eq!(report.ticks, 2);
        assert_eq!(report.vehicles[0].position_x, 190.0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_stop_sender_stops_the_run() {
        let sim = Simulation::new(scenario(60.0), vec![car(Direction::Towards, 1.0)]);
        let (stop_tx, stop_rx) = watch::channel(false);
        drop(stop_tx);

        let report = sim.run(Recorder::default(), stop_rx).await.unwrap();
        assert_eq!(report.reason, StopReason::Stopped);
        assert_eq!(report.ticks, 0);
    }

    #[tokio::test]
    async fn empty_scenario_never_starts() {
        let sim = Simulation::new(scenario(5.0), vec![]);
        let (_stop_tx, stop_rx) = watch::channel(false);
        let mut recorder = Recorder::default();

        let report = sim.run(&mut recorder, stop_rx).await.unwrap();

        assert_eq!(report.reason, StopReason::NoVehicles);
        assert!(recorder.frames.is_empty());
    }
}
