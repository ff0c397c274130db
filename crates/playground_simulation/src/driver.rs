//! Frame Driver: единственный планировщик кадра
//!
//! Кадр (Bevy schedules):
//! 1. First: advance_frame_driver: Idle → Running, SimulationClock
//! 2. FixedUpdate: 0..=max_substeps physics sub-steps (Rapier)
//! 3. Update: команды сцены, hit sounds, viewport, orbit camera
//! 4. PostUpdate: Sync Step, затем transform propagation и рендер
//!
//! Idle → Running один раз, назад в Idle не возвращается.
//! Stopped: явный stop signal (StopFrameDriver): physics pipeline
//! выключается, Sync Step и камера больше не работают.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum DriverPhase {
    /// До первого кадра
    #[default]
    Idle,
    /// Steady loop
    Running,
    /// Остановлен stop signal'ом (терминальное состояние)
    Stopped,
}

#[derive(Resource, Debug, Default)]
pub struct FrameDriver {
    phase: DriverPhase,
    frames: u64,
}

impl FrameDriver {
    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == DriverPhase::Running
    }

    /// Кадров отработано в Running
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Idle → Running. Возвращает true если переход произошёл.
    pub fn start(&mut self) -> bool {
        if self.phase == DriverPhase::Idle {
            self.phase = DriverPhase::Running;
            true
        } else {
            false
        }
    }

    /// Любое состояние → Stopped. Возвращает true если driver ещё не был остановлен.
    pub fn stop(&mut self) -> bool {
        if self.phase == DriverPhase::Stopped {
            return false;
        }
        self.phase = DriverPhase::Stopped;
        true
    }
}

/// Event: stop signal для Frame Driver
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct StopFrameDriver;

/// Simulation Clock: elapsed с момента старта + delta от прошлого кадра
///
/// Инвариант: elapsed монотонно не убывает, delta ≥ 0. Не сбрасывается.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    pub elapsed: f64,
    pub previous: f64,
    pub delta: f64,
}

impl SimulationClock {
    pub fn advance(&mut self, elapsed: f64) {
        let elapsed = elapsed.max(self.elapsed);
        self.previous = self.elapsed;
        self.elapsed = elapsed;
        self.delta = elapsed - self.previous;
    }
}

/// Система (First): запуск driver'а + обновление часов
pub fn advance_frame_driver(
    mut driver: ResMut<FrameDriver>,
    mut clock: ResMut<SimulationClock>,
    time: Res<Time<Real>>,
) {
    if driver.start() {
        crate::logger::log_info("Frame driver running");
    }
    if !driver.is_running() {
        return;
    }

    driver.frames += 1;
    clock.advance(time.elapsed_secs_f64());
}

/// Система: обработать stop signal
pub fn handle_stop_requests(mut stops: EventReader<StopFrameDriver>, mut driver: ResMut<FrameDriver>) {
    if stops.read().count() == 0 {
        return;
    }

    if driver.stop() {
        crate::logger::log_info(&format!("Frame driver stopped after {} frames", driver.frames));
    }
}

/// Run condition: кадр активен
pub fn frame_driver_running(driver: Res<FrameDriver>) -> bool {
    driver.is_running()
}
