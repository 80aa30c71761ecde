//! A hand-rolled 5-field cron matcher (`minute hour dom month dow`). No
//! crate in the retrieved pack parses cron expressions, so this is a
//! small table-driven parser in the same spirit as the teacher's own
//! small parsers (e.g. its shell lexer): parse once at `set`-time,
//! validate eagerly, match cheaply on every tick.
//!
//! Field grammar per position: `*`, `N`, `N-M`, `N,M,...`, and an
//! optional `/step` suffix on any of those. `dom`/`dow` are combined with
//! AND, not cron's traditional OR-when-both-restricted special case —
//! see DESIGN.md.

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::error::SchedulerError;

#[derive(Debug, Clone)]
struct FieldSet {
    min: u32,
    set: Vec<bool>,
}

impl FieldSet {
    fn parse(field: &str, min: u32, max: u32) -> Result<Self, SchedulerError> {
        let mut set = vec![false; (max - min + 1) as usize];
        for part in field.split(',') {
            Self::parse_part(part, min, max, &mut set)?;
        }
        Ok(Self { min, set })
    }

    fn parse_part(part: &str, min: u32, max: u32, set: &mut [bool]) -> Result<(), SchedulerError> {
        let invalid = || SchedulerError::InvalidCron(format!("bad field part '{part}'"));

        let (range_str, step) = match part.split_once('/') {
            Some((r, s)) => (r, Some(s.parse::<u32>().map_err(|_| invalid())?)),
            None => (part, None),
        };
        let (start, end) = if range_str == "*" {
            (min, max)
        } else if let Some((a, b)) = range_str.split_once('-') {
            (a.parse::<u32>().map_err(|_| invalid())?, b.parse::<u32>().map_err(|_| invalid())?)
        } else {
            let v: u32 = range_str.parse().map_err(|_| invalid())?;
            (v, v)
        };
        if start < min || end > max || start > end {
            return Err(SchedulerError::InvalidCron(format!("'{part}' out of range {min}-{max}")));
        }
        let step = step.unwrap_or(1).max(1);
        let mut v = start;
        while v <= end {
            set[(v - min) as usize] = true;
            v += step;
        }
        Ok(())
    }

    fn contains(&self, value: u32) -> bool {
        if value < self.min {
            return false;
        }
        let idx = (value - self.min) as usize;
        self.set.get(idx).copied().unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub struct CronExpr {
    minute: FieldSet,
    hour: FieldSet,
    dom: FieldSet,
    month: FieldSet,
    dow: FieldSet,
}

impl CronExpr {
    pub fn parse(expr: &str) -> Result<Self, SchedulerError> {
        let fields: Vec<&str> = expr.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(SchedulerError::InvalidCron(format!(
                "expected 5 space-separated fields, got {}: '{expr}'",
                fields.len()
            )));
        }
        Ok(Self {
            minute: FieldSet::parse(fields[0], 0, 59)?,
            hour: FieldSet::parse(fields[1], 0, 23)?,
            dom: FieldSet::parse(fields[2], 1, 31)?,
            month: FieldSet::parse(fields[3], 1, 12)?,
            dow: FieldSet::parse(fields[4], 0, 7)?,
        })
    }

    /// Whether this expression fires at `at`'s minute boundary. `dow`
    /// accepts both 0 and 7 as Sunday, matching classic cron.
    pub fn matches(&self, at: DateTime<Utc>) -> bool {
        let dow = at.weekday().num_days_from_sunday();
        self.minute.contains(at.minute())
            && self.hour.contains(at.hour())
            && self.dom.contains(at.day())
            && self.month.contains(at.month())
            && (self.dow.contains(dow) || (dow == 0 && self.dow.contains(7)))
    }
}

#[cfg(test)]
#[path = "cron_tests.rs"]
mod tests;
