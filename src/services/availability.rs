//! Disabled dates and booking availability checks

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        disabled_date::{CreateDisabledDate, UpdateDisabledDate},
        DisabledDate,
    },
    repository::DisabledDateStore,
};

/// First bookable half-hour slot of a service day
fn first_slot() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap()
}

/// Last bookable half-hour slot of a service day
fn last_slot() -> NaiveTime {
    NaiveTime::from_hms_opt(22, 30, 0).unwrap()
}

#[derive(Clone)]
pub struct AvailabilityService {
    disabled_dates: Arc<dyn DisabledDateStore>,
}

impl AvailabilityService {
    pub fn new(disabled_dates: Arc<dyn DisabledDateStore>) -> Self {
        Self { disabled_dates }
    }

    pub async fn list(&self) -> AppResult<Vec<DisabledDate>> {
        self.disabled_dates.find_all().await
    }

    pub async fn list_range(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<DisabledDate>> {
        self.disabled_dates.find_by_date_range(start, end).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<DisabledDate> {
        self.disabled_dates
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Disabled date with id {} not found", id)))
    }

    pub async fn create(&self, data: CreateDisabledDate) -> AppResult<DisabledDate> {
        let date = parse_date(&data.date)?;
        let (start_time, end_time) =
            parse_time_range(data.start_time.as_deref(), data.end_time.as_deref())?;

        let record = DisabledDate {
            id: Uuid::new_v4(),
            date,
            start_time,
            end_time,
            description: data.description,
            is_recurring: data.is_recurring.unwrap_or(false),
            created_at: Utc::now(),
        };
        self.disabled_dates.save(&record).await?;
        Ok(record)
    }

    /// Replace a stored record; an omitted `is_recurring` keeps the
    /// current value, omitted times make the block whole-day.
    pub async fn update(&self, id: Uuid, data: UpdateDisabledDate) -> AppResult<DisabledDate> {
        let existing = self.get(id).await?;
        let date = parse_date(&data.date)?;
        let (start_time, end_time) =
            parse_time_range(data.start_time.as_deref(), data.end_time.as_deref())?;

        let record = DisabledDate {
            id,
            date,
            start_time,
            end_time,
            description: data.description,
            is_recurring: data.is_recurring.unwrap_or(existing.is_recurring),
            created_at: existing.created_at,
        };
        self.disabled_dates.save(&record).await?;
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.disabled_dates.delete_by_id(id).await? {
            return Err(AppError::NotFound(format!(
                "Disabled date with id {} not found",
                id
            )));
        }
        Ok(())
    }

    /// Whether any block applies to the date, whole-day or partial
    pub async fn is_date_disabled(&self, date: NaiveDate) -> AppResult<bool> {
        if !self.disabled_dates.find_by_date(date).await?.is_empty() {
            return Ok(true);
        }
        let recurring = self.disabled_dates.find_recurring().await?;
        Ok(recurring.iter().any(|rule| recurs_on(rule.date, date)))
    }

    /// Whether a specific date and time falls inside a block
    pub async fn is_date_time_disabled(&self, date_time: NaiveDateTime) -> AppResult<bool> {
        let date = date_time.date();
        let time = date_time.time();

        let mut records = self.disabled_dates.find_by_date(date).await?;
        let recurring = self.disabled_dates.find_recurring().await?;
        records.extend(
            recurring
                .into_iter()
                .filter(|rule| rule.date != date && recurs_on(rule.date, date)),
        );

        Ok(records.iter().any(|record| blocks_time(record, time)))
    }

    /// All blocked half-hour slots in an inclusive date range.
    ///
    /// Recurring rules are projected onto every matching date of the
    /// range. Consumers must tolerate repeated slots.
    pub async fn disabled_slots(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<NaiveDateTime>> {
        let explicit = self.disabled_dates.find_by_date_range(start, end).await?;
        let recurring = self.disabled_dates.find_recurring().await?;

        let mut slots = Vec::new();
        for record in &explicit {
            push_slots(record, record.date, &mut slots);
        }

        let mut date = start;
        while date <= end {
            for rule in &recurring {
                if recurs_on(rule.date, date) {
                    push_slots(rule, date, &mut slots);
                }
            }
            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        Ok(slots)
    }
}

/// A recurring rule matches on day-of-month and month; the stored year
/// is ignored.
fn recurs_on(rule_date: NaiveDate, date: NaiveDate) -> bool {
    rule_date.day() == date.day() && rule_date.month() == date.month()
}

/// Whether a record blocks the given time of its date.
///
/// Rows with only one endpoint set block the date as a whole but no
/// specific time.
fn blocks_time(record: &DisabledDate, time: NaiveTime) -> bool {
    if record.is_whole_day() {
        return true;
    }
    match record.time_range() {
        Some((start, end)) => time >= start && time <= end,
        None => false,
    }
}

/// Half-hour slots from `from` to `to`, both endpoints included
fn half_hour_slots(from: NaiveTime, to: NaiveTime) -> Vec<NaiveTime> {
    let mut slots = Vec::new();
    let mut secs = from.num_seconds_from_midnight();
    let end = to.num_seconds_from_midnight();
    while secs <= end {
        if let Some(slot) = NaiveTime::from_num_seconds_from_midnight_opt(secs, 0) {
            slots.push(slot);
        }
        secs += 1800;
    }
    slots
}

fn push_slots(record: &DisabledDate, date: NaiveDate, out: &mut Vec<NaiveDateTime>) {
    let times = if record.is_whole_day() {
        half_hour_slots(first_slot(), last_slot())
    } else if let Some((start, end)) = record.time_range() {
        half_hour_slots(start, end)
    } else {
        Vec::new()
    };
    out.extend(times.into_iter().map(|time| date.and_time(time)));
}

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date: {} (use YYYY-MM-DD)", value)))
}

fn parse_time(value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::Validation(format!("Invalid time: {} (use HH:MM)", value)))
}

fn parse_time_range(
    start: Option<&str>,
    end: Option<&str>,
) -> AppResult<(Option<NaiveTime>, Option<NaiveTime>)> {
    match (start, end) {
        (None, None) => Ok((None, None)),
        (Some(start), Some(end)) => {
            let start = parse_time(start)?;
            let end = parse_time(end)?;
            if start >= end {
                return Err(AppError::Validation(
                    "start_time must be before end_time".to_string(),
                ));
            }
            Ok((Some(start), Some(end)))
        }
        _ => Err(AppError::Validation(
            "start_time and end_time must be provided together".to_string(),
        )),
    }
}
