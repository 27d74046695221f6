//! Database module - workout log records and SQLite storage

use std::collections::HashSet;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// One recorded training session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLog {
    /// Stable across edits; empty ids get one assigned on import
    #[serde(default)]
    pub id: String,
    pub date: DateTime<Utc>,
    pub exercise: String,
    // Strength
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    // Cardio (km) / cardio and flex (minutes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl WorkoutLog {
    /// Bare log with only the required fields set
    pub fn new(id: impl Into<String>, date: DateTime<Utc>, exercise: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date,
            exercise: exercise.into(),
            sets: None,
            reps: None,
            weight: None,
            distance: None,
            duration: None,
            note: None,
        }
    }

    /// Reject values the aggregations cannot make sense of
    pub fn validate(&self) -> Result<()> {
        if self.exercise.trim().is_empty() {
            bail!("exercise name is empty");
        }
        let fields = [
            ("sets", self.sets),
            ("reps", self.reps),
            ("weight", self.weight),
            ("distance", self.distance),
            ("duration", self.duration),
        ];
        for (name, value) in fields {
            if let Some(v) = value
                && (!v.is_finite() || v < 0.0)
            {
                bail!("{} must be a non-negative number, got {}", name, v);
            }
        }
        Ok(())
    }
}

/// Random 128-bit hex id for new logs
pub fn new_log_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}

/// Parse logs coming from outside (file import, sync payload).
///
/// Accepts a bare array or `{ "logs": [...] }`. Any malformed entry fails
/// the whole batch, so nothing with an unparseable date reaches analytics.
pub fn parse_logs(json: &str) -> Result<Vec<WorkoutLog>> {
    let value: Value = serde_json::from_str(json).context("invalid JSON")?;
    let entries = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("logs") {
            Some(Value::Array(items)) => items,
            _ => bail!("expected a `logs` array"),
        },
        _ => bail!("expected a JSON array of workout logs"),
    };

    let mut seen = HashSet::new();
    let mut logs = Vec::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        let mut log: WorkoutLog = serde_json::from_value(entry)
            .with_context(|| format!("log #{} is malformed", i))?;
        log.validate()
            .with_context(|| format!("log #{} ({}) is invalid", i, log.exercise))?;
        if log.id.is_empty() {
            log.id = new_log_id();
        }
        if !seen.insert(log.id.clone()) {
            bail!("duplicate log id `{}`", log.id);
        }
        logs.push(log);
    }

    Ok(logs)
}

/// Database wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database {}", path))?;
        let db = Self { conn };
        db.init_schema()?;
        debug!("Database ready at {}", path);
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                date TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;
        Ok(())
    }

    /// Add or replace a single log
    pub fn add_log(&self, log: &WorkoutLog) -> Result<()> {
        self.upsert_logs(std::slice::from_ref(log))?;
        Ok(())
    }

    /// Insert or replace a batch of logs in one transaction
    pub fn upsert_logs(&self, logs: &[WorkoutLog]) -> Result<usize> {
        for log in logs {
            log.validate()
                .with_context(|| format!("workout {} is invalid", log.id))?;
        }

        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO workouts (id, date, data) VALUES (?1, ?2, ?3)",
            )?;
            for log in logs {
                let data = serde_json::to_string(log)?;
                stmt.execute(params![
                    log.id,
                    log.date.to_rfc3339_opts(SecondsFormat::Millis, true),
                    data,
                ])?;
            }
        }
        tx.commit()?;
        info!("Stored {} workout logs", logs.len());
        Ok(logs.len())
    }

    /// Get all logs, oldest first
    pub fn get_logs(&self) -> Result<Vec<WorkoutLog>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, data FROM workouts ORDER BY date ASC, created_at ASC")?;

        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut logs = Vec::with_capacity(rows.len());
        for (id, data) in rows {
            let mut log: WorkoutLog = serde_json::from_str(&data)
                .with_context(|| format!("workout row {} is corrupt", id))?;
            log.id = id;
            logs.push(log);
        }
        Ok(logs)
    }

    /// Delete a log, returns false if it did not exist
    pub fn delete_log(&self, id: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM workouts WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn create_log(id: &str, day: u32, exercise: &str) -> WorkoutLog {
        let mut log = WorkoutLog::new(id, at(day, 8), exercise);
        log.sets = Some(3.0);
        log.reps = Some(10.0);
        log
    }

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[
            {"id":"a","date":"2024-01-01T08:00:00Z","exercise":"跑步","distance":5},
            {"id":"b","date":"2024-01-02T08:00:00Z","exercise":"跑步","duration":30}
        ]"#;
        let logs = parse_logs(json).unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].distance, Some(5.0));
        assert_eq!(logs[1].duration, Some(30.0));
        assert_eq!(logs[1].sets, None);
    }

    #[test]
    fn test_parse_wrapped_payload() {
        let json = r#"{"logs":[{"id":"a","date":"2024-01-01T08:00:00+08:00","exercise":"卧推","sets":3,"reps":8,"weight":60,"note":"ok"}]}"#;
        let logs = parse_logs(json).unwrap();
        assert_eq!(logs[0].date, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(logs[0].note.as_deref(), Some("ok"));
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        let json = r#"[{"id":"a","date":"yesterday","exercise":"跑步"}]"#;
        let err = parse_logs(json).unwrap_err();
        assert!(format!("{:#}", err).contains("log #0"));
    }

    #[test]
    fn test_parse_rejects_duplicates_and_negatives() {
        let dup = r#"[
            {"id":"a","date":"2024-01-01T08:00:00Z","exercise":"跑步"},
            {"id":"a","date":"2024-01-02T08:00:00Z","exercise":"跑步"}
        ]"#;
        assert!(parse_logs(dup).is_err());

        let negative = r#"[{"id":"a","date":"2024-01-01T08:00:00Z","exercise":"跑步","distance":-1}]"#;
        assert!(parse_logs(negative).is_err());
    }

    #[test]
    fn test_parse_assigns_missing_ids() {
        let json = r#"[{"date":"2024-01-01T08:00:00Z","exercise":"瑜伽","duration":20}]"#;
        let logs = parse_logs(json).unwrap();
        assert_eq!(logs[0].id.len(), 32);
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let log = WorkoutLog::new("x", at(1, 8), "拉伸");
        let json = serde_json::to_string(&log).unwrap();
        assert_eq!(json, r#"{"id":"x","date":"2024-03-01T08:00:00Z","exercise":"拉伸"}"#);
    }

    #[test]
    fn test_store_roundtrip_in_date_order() {
        let db = Database::open(":memory:").unwrap();
        db.upsert_logs(&[create_log("late", 5, "深蹲"), create_log("early", 2, "硬拉")])
            .unwrap();

        let logs = db.get_logs().unwrap();
        let ids: Vec<_> = logs.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
        assert_eq!(logs[1], create_log("late", 5, "深蹲"));
    }

    #[test]
    fn test_upsert_replaces_existing() {
        let db = Database::open(":memory:").unwrap();
        db.add_log(&create_log("a", 1, "深蹲")).unwrap();

        let mut edited = create_log("a", 1, "深蹲");
        edited.weight = Some(80.0);
        db.add_log(&edited).unwrap();

        let logs = db.get_logs().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].weight, Some(80.0));
    }

    #[test]
    fn test_delete_log() {
        let db = Database::open(":memory:").unwrap();
        db.add_log(&create_log("a", 1, "深蹲")).unwrap();
        assert!(db.delete_log("a").unwrap());
        assert!(!db.delete_log("a").unwrap());
        assert!(db.get_logs().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_rejects_invalid_values() {
        let db = Database::open(":memory:").unwrap();

        let mut nan = create_log("nan", 1, "深蹲");
        nan.weight = Some(f64::NAN);
        assert!(db.upsert_logs(&[create_log("ok", 2, "硬拉"), nan]).is_err());

        let mut negative = create_log("neg", 1, "跑步");
        negative.distance = Some(-5.0);
        assert!(db.add_log(&negative).is_err());

        // nothing from a rejected batch is stored
        assert!(db.get_logs().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_row_is_an_error() {
        let db = Database::open(":memory:").unwrap();
        db.add_log(&create_log("good", 1, "深蹲")).unwrap();
        db.conn
            .execute(
                "INSERT INTO workouts (id, date, data) VALUES (?1, ?2, ?3)",
                params![
                    "bad",
                    "2024-03-02T00:00:00.000Z",
                    r#"{"id":"bad","date":"garbage","exercise":"深蹲"}"#
                ],
            )
            .unwrap();

        let err = db.get_logs().unwrap_err();
        assert!(err.to_string().contains("workout row bad is corrupt"));
    }
}
