use serde::{Deserialize, Serialize};

/// Controls how many genotypes are created, bred and kept each generation.
///
/// # Configuration Parameters
///
/// - `initial_size`: number of random genotypes the first generation starts from
/// - `child_count`: number of offspring bred per generation
/// - `child_cull_count`: number of survivors kept after each generation
/// - `elite_count`: number of the fittest current members that compete with the
///   offspring for survival, unchanged
///
/// The population therefore starts at `initial_size` and settles at
/// `child_cull_count` members after the first generation.
///
/// # Examples
///
/// ```rust
/// use fx_ga_minimize::models::Schedule;
///
/// // Two founders, fifty children per generation, twenty survivors
/// let schedule = Schedule::default();
///
/// // Wider search without elitism
/// let schedule = Schedule::new(20, 200, 50, 0)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    pub initial_size: usize,
    pub child_count: usize,
    pub child_cull_count: usize,
    pub elite_count: usize,
}

#[derive(Debug, thiserror::Error)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum ScheduleError {
    #[error("initial_size must be at least 1")]
    EmptyInitialPopulation,
    #[error("child_cull_count must be at least 1")]
    ZeroCull,
    #[error(
        "child_cull_count must not exceed child_count. child_cull_count = {child_cull_count}, child_count = {child_count}"
    )]
    CullExceedsChildren {
        child_cull_count: usize,
        child_count: usize,
    },
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            initial_size: 2,
            child_count: 50,
            child_cull_count: 20,
            elite_count: 10,
        }
    }
}

impl Schedule {
    pub fn new(
        initial_size: usize,
        child_count: usize,
        child_cull_count: usize,
        elite_count: usize,
    ) -> Result<Self, ScheduleError> {
        let schedule = Self {
            initial_size,
            child_count,
            child_cull_count,
            elite_count,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Checks a schedule that may have been built directly or deserialized.
    pub(crate) fn validate(&self) -> Result<(), ScheduleError> {
        if self.initial_size == 0 {
            return Err(ScheduleError::EmptyInitialPopulation);
        }

        if self.child_cull_count == 0 {
            return Err(ScheduleError::ZeroCull);
        }

        if self.child_cull_count > self.child_count {
            return Err(ScheduleError::CullExceedsChildren {
                child_cull_count: self.child_cull_count,
                child_count: self.child_count,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_is_valid() {
        assert!(Schedule::default().validate().is_ok());
    }

    #[test]
    fn it_rejects_an_empty_initial_population() {
        assert_eq!(
            Schedule::new(0, 50, 20, 10).unwrap_err(),
            ScheduleError::EmptyInitialPopulation
        );
    }

    #[test]
    fn it_rejects_a_zero_cull() {
        assert_eq!(Schedule::new(2, 50, 0, 10).unwrap_err(), ScheduleError::ZeroCull);
    }

    #[test]
    fn it_rejects_a_cull_larger_than_the_brood() {
        assert_eq!(
            Schedule::new(2, 10, 11, 0).unwrap_err(),
            ScheduleError::CullExceedsChildren {
                child_cull_count: 11,
                child_count: 10
            }
        );
    }

    #[test]
    fn it_allows_keeping_every_child() {
        assert!(Schedule::new(1, 10, 10, 0).is_ok());
    }
}
