//! Service calendars.

use crate::domain::{CalendarEntry, ScheduleError, WeekdaySet};
use crate::store::{DocumentStore, keys};

/// The weekdays a service runs on.
pub async fn service_days<C>(calendar: &C, service_id: &str) -> Result<WeekdaySet, ScheduleError>
where
    C: DocumentStore<CalendarEntry>,
{
    let entry = calendar.get(&keys::calendar_key(service_id)).await?;
    Ok(WeekdaySet::from_calendar(&entry))
}
