//! Query configuration.

use crate::domain::DayNameStyle;

/// Defaults applied by [`Timetable`](super::Timetable) queries.
#[derive(Debug, Clone, Default)]
pub struct QueryConfig {
    /// Radius, in degrees, used by nearest-stop searches that don't give one.
    /// `None` means unbounded.
    pub max_stop_distance: Option<f64>,

    /// Day names used when formatting service days.
    pub day_name_style: DayNameStyle,
}

impl QueryConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_stop_distance: Option<f64>, day_name_style: DayNameStyle) -> Self {
        Self {
            max_stop_distance,
            day_name_style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = QueryConfig::default();

        assert_eq!(config.max_stop_distance, None);
        assert_eq!(config.day_name_style, DayNameStyle::Normal);
    }

    #[test]
    fn custom_config() {
        let config = QueryConfig::new(Some(0.01), DayNameStyle::Min);

        assert_eq!(config.max_stop_distance, Some(0.01));
        assert_eq!(config.day_name_style, DayNameStyle::Min);
    }
}
