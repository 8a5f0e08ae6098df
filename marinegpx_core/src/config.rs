use crate::{error::GraphError, kinematics::DEFAULT_WINDOW, model::TimeUnit};

/// Everything the loading pipeline can be told to do differently. Built by
/// the caller (normally from the command line) and passed in by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    /// Number of speeds in the rolling average. Must be at least 1.
    pub window: usize,
    /// Discard marks that are not strictly inside the track's bounds.
    pub filter_marks: bool,
    /// How elapsed time should be presented.
    pub time_unit: TimeUnit,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            filter_marks: true,
            time_unit: TimeUnit::Auto,
        }
    }
}

impl GraphConfig {
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.window == 0 {
            return Err(GraphError::InvalidWindow(self.window));
        }

        Ok(())
    }
}
