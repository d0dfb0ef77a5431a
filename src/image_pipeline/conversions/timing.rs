use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: String,
    pub duration: Duration,
    pub count: usize,
}

/// Accumulated time per stage across a whole run.
#[derive(Debug, Default, Clone)]
pub struct PipelineTimings {
    order: Vec<String>,
    steps: HashMap<String, StepTiming>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, name: impl Into<String>, duration: Duration) {
        let name = name.into();
        if !self.steps.contains_key(&name) {
            self.order.push(name.clone());
        }
        let step = self.steps.entry(name.clone()).or_insert(StepTiming {
            name,
            duration: Duration::ZERO,
            count: 0,
        });
        step.duration += duration;
        step.count += 1;
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.values().map(|s| s.duration).sum()
    }

    pub fn get_step(&self, name: &str) -> Option<&StepTiming> {
        self.steps.get(name)
    }

    /// Steps in the order they were first recorded.
    pub fn steps(&self) -> impl Iterator<Item = &StepTiming> {
        self.order.iter().filter_map(|name| self.steps.get(name))
    }

    pub fn log_summary(&self) {
        let total = self.total_duration();
        debug!("Stage timings, total {:.3}ms", total.as_secs_f64() * 1000.0);
        for step in self.steps() {
            let percentage = if total.as_secs_f64() > 0.0 {
                (step.duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            } else {
                0.0
            };
            debug!(
                "  {:<8} {:>12.3}ms ({:>5.1}%) over {} file(s)",
                step.name,
                step.duration.as_secs_f64() * 1000.0,
                percentage,
                step.count
            );
        }
    }
}

pub struct Timer {
    start: Instant,
    name: &'static str,
}

impl Timer {
    pub fn start(name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            name,
        }
    }

    pub fn stop(self, timings: &mut PipelineTimings) {
        timings.add_step(self.name, self.start.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_accumulate_in_first_seen_order() {
        let mut timings = PipelineTimings::new();
        timings.add_step("decode", Duration::from_millis(3));
        timings.add_step("encode", Duration::from_millis(5));
        timings.add_step("decode", Duration::from_millis(4));

        let names: Vec<&str> = timings.steps().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["decode", "encode"]);

        let decode = timings.get_step("decode").unwrap();
        assert_eq!(decode.duration, Duration::from_millis(7));
        assert_eq!(decode.count, 2);
        assert_eq!(timings.total_duration(), Duration::from_millis(12));
    }

    #[test]
    fn test_timer_records_into_timings() {
        let mut timings = PipelineTimings::new();
        Timer::start("flip").stop(&mut timings);
        assert_eq!(timings.get_step("flip").unwrap().count, 1);
    }
}
