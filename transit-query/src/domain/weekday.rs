//! Sets of weekdays a service runs on.

use chrono::Weekday;
use std::fmt;
use std::str::FromStr;

use super::{CalendarEntry, ScheduleError};

/// Weekdays in service-calendar order, Sunday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

const ALL_DAYS: u8 = 0b111_1111;

/// Vocabulary used when naming days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayNameStyle {
    /// Sunday, Monday, ...
    #[default]
    Normal,
    /// Sun, Mon, ...
    Short,
    /// Su, Mo, ...
    Min,
}

impl DayNameStyle {
    /// The name of `day` in this style.
    pub fn name(self, day: Weekday) -> &'static str {
        const NORMAL: [&str; 7] = [
            "Sunday",
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
        ];
        const SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
        const MIN: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

        let idx = day.num_days_from_sunday() as usize;
        match self {
            DayNameStyle::Normal => NORMAL[idx],
            DayNameStyle::Short => SHORT[idx],
            DayNameStyle::Min => MIN[idx],
        }
    }
}

impl FromStr for DayNameStyle {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(DayNameStyle::Normal),
            "short" => Ok(DayNameStyle::Short),
            "min" => Ok(DayNameStyle::Min),
            other => Err(ScheduleError::InvalidArgument(format!(
                "unknown day name style: {other}"
            ))),
        }
    }
}

/// The days of the week a service operates on.
///
/// Stored as a 7-bit mask with bit 0 for Sunday through bit 6 for Saturday.
///
/// # Examples
///
/// ```
/// use transit_query::domain::{DayNameStyle, WeekdaySet};
///
/// let weekdays = WeekdaySet::from_flags([false, true, true, true, true, true, false]);
/// assert_eq!(weekdays.format(DayNameStyle::Short).unwrap(), "Mon - Fri");
///
/// let weekend = WeekdaySet::from_flags([true, false, false, false, false, false, true]);
/// assert_eq!(weekend.format(DayNameStyle::Normal).unwrap(), "Sunday & Saturday");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// A set with no days.
    pub const EMPTY: Self = Self(0);

    /// A set with all seven days.
    pub const DAILY: Self = Self(ALL_DAYS);

    pub fn new() -> Self {
        Self::EMPTY
    }

    /// Build a set from seven flags, Sunday first.
    pub fn from_flags(flags: [bool; 7]) -> Self {
        let mask = flags
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .fold(0u8, |mask, (idx, _)| mask | (1 << idx));
        Self(mask)
    }

    /// Build a set from a calendar entry's weekday flags.
    pub fn from_calendar(entry: &CalendarEntry) -> Self {
        Self::from_flags(entry.flags())
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= bit(day);
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & bit(day) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Days in the set, Sunday first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + use<> {
        let set = *self;
        WEEKDAYS.into_iter().filter(move |day| set.contains(*day))
    }

    /// True if the days form one uninterrupted ascending run, Sunday first.
    ///
    /// Saturday and Sunday are not adjacent: `{Sat, Sun}` is not contiguous.
    pub fn is_contiguous(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        let run = self.0 >> self.0.trailing_zeros();
        run & (run + 1) == 0
    }

    /// True if both sets hold exactly the same days.
    pub fn same_days(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|day| other.contains(day))
    }

    /// Describe the days of service, such as `"Daily"` or `"Mon - Fri"`.
    ///
    /// Fails with [`ScheduleError::InvalidState`] for an empty set.
    pub fn format(&self, style: DayNameStyle) -> Result<String, ScheduleError> {
        let days: Vec<Weekday> = self.iter().collect();

        match days.as_slice() {
            [] => Err(ScheduleError::InvalidState("not active on any days")),
            _ if days.len() == WEEKDAYS.len() => Ok("Daily".to_string()),
            [only] => Ok(format!("{} Only", style.name(*only))),
            [first, .., last] if self.is_contiguous() => {
                Ok(format!("{} - {}", style.name(*first), style.name(*last)))
            }
            _ => Ok(days
                .iter()
                .map(|day| style.name(*day))
                .collect::<Vec<_>>()
                .join(" & ")),
        }
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::new();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Debug for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

fn bit(day: Weekday) -> u8 {
    1 << day.num_days_from_sunday()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(days: &[Weekday]) -> WeekdaySet {
        days.iter().copied().collect()
    }

    #[test]
    fn from_flags_maps_sunday_first() {
        let s = WeekdaySet::from_flags([true, false, false, true, false, false, false]);
        assert!(s.contains(Weekday::Sun));
        assert!(s.contains(Weekday::Wed));
        assert!(!s.contains(Weekday::Mon));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn iter_is_ascending_from_sunday() {
        let s = set(&[Weekday::Sat, Weekday::Mon, Weekday::Sun]);
        let days: Vec<_> = s.iter().collect();
        assert_eq!(days, vec![Weekday::Sun, Weekday::Mon, Weekday::Sat]);
    }

    #[test]
    fn format_empty_is_invalid_state() {
        let err = WeekdaySet::EMPTY.format(DayNameStyle::Normal).unwrap_err();
        assert_eq!(err, ScheduleError::InvalidState("not active on any days"));
    }

    #[test]
    fn format_daily() {
        assert_eq!(WeekdaySet::DAILY.format(DayNameStyle::Normal).unwrap(), "Daily");
        assert_eq!(WeekdaySet::DAILY.format(DayNameStyle::Min).unwrap(), "Daily");
    }

    #[test]
    fn format_single_day() {
        let s = set(&[Weekday::Fri]);
        assert_eq!(s.format(DayNameStyle::Normal).unwrap(), "Friday Only");
        assert_eq!(s.format(DayNameStyle::Short).unwrap(), "Fri Only");
        assert_eq!(s.format(DayNameStyle::Min).unwrap(), "Fr Only");
    }

    #[test]
    fn format_contiguous_run() {
        let s = set(&[
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ]);
        assert_eq!(s.format(DayNameStyle::Normal).unwrap(), "Monday - Friday");
        assert_eq!(s.format(DayNameStyle::Short).unwrap(), "Mon - Fri");

        let s = set(&[Weekday::Sun, Weekday::Mon]);
        assert_eq!(s.format(DayNameStyle::Min).unwrap(), "Su - Mo");
    }

    #[test]
    fn format_non_contiguous() {
        let s = set(&[Weekday::Sun, Weekday::Wed]);
        assert_eq!(s.format(DayNameStyle::Normal).unwrap(), "Sunday & Wednesday");

        let s = set(&[Weekday::Sat, Weekday::Sun]);
        assert_eq!(s.format(DayNameStyle::Short).unwrap(), "Sun & Sat");

        let s = set(&[Weekday::Mon, Weekday::Tue, Weekday::Thu]);
        assert_eq!(s.format(DayNameStyle::Short).unwrap(), "Mon & Tue & Thu");
    }

    #[test]
    fn style_from_str() {
        assert_eq!("normal".parse::<DayNameStyle>().unwrap(), DayNameStyle::Normal);
        assert_eq!("short".parse::<DayNameStyle>().unwrap(), DayNameStyle::Short);
        assert_eq!("min".parse::<DayNameStyle>().unwrap(), DayNameStyle::Min);
        assert!(matches!(
            "tiny".parse::<DayNameStyle>(),
            Err(ScheduleError::InvalidArgument(_))
        ));
    }

    #[test]
    fn same_days() {
        let a = set(&[Weekday::Mon, Weekday::Fri]);
        let b = set(&[Weekday::Fri, Weekday::Mon]);
        let c = set(&[Weekday::Mon]);
        assert!(a.same_days(&b));
        assert!(!a.same_days(&c));
        assert!(!c.same_days(&a));
    }

    #[test]
    fn debug_lists_days() {
        let s = set(&[Weekday::Tue, Weekday::Sun]);
        assert_eq!(format!("{:?}", s), "{Sun, Tue}");
    }
}
