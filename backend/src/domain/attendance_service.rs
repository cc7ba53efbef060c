//! Attendance intake and read-back.

use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::attendance::{RecordAttendanceCommand, RecordAttendanceResult};
use crate::domain::errors::{ServiceError, ValidationError};
use crate::domain::models::attendance::{AttendanceMode, AttendanceRecord};
use crate::domain::validation::{parse_date, parse_time, require_identifier};
use crate::storage::{AttendanceRepository, DbConnection};

#[derive(Clone)]
pub struct AttendanceService {
    attendance_repository: AttendanceRepository,
    mode: AttendanceMode,
}

impl AttendanceService {
    pub fn new(db: Arc<DbConnection>, mode: AttendanceMode) -> Self {
        if mode == AttendanceMode::Compat {
            warn!(
                "Attendance is keyed by worker id only: recording a worker again replaces \
                 their earlier row even on a different day (set attendance_mode = \"daily\" \
                 to keep one row per day)"
            );
        }
        Self {
            attendance_repository: AttendanceRepository::new((*db).clone()),
            mode,
        }
    }

    pub fn mode(&self) -> AttendanceMode {
        self.mode
    }

    /// Validate and upsert a "Record Attendance" submission
    pub async fn record_attendance(
        &self,
        command: RecordAttendanceCommand,
    ) -> Result<RecordAttendanceResult, ServiceError> {
        info!("Recording attendance for worker {} on {}", command.worker_id, command.date);

        let record = Self::validate(&command)?;
        self.attendance_repository
            .upsert_attendance(&record, self.mode)
            .await?;

        let success_message = format!(
            "Attendance recorded for {} on {}",
            if record.worker_name.is_empty() { &record.worker_id } else { &record.worker_name },
            record.date
        );
        info!("{}", success_message);

        Ok(RecordAttendanceResult {
            record,
            success_message,
        })
    }

    fn validate(command: &RecordAttendanceCommand) -> Result<AttendanceRecord, ValidationError> {
        let worker_id = require_identifier("Worker ID", &command.worker_id)?;
        let date = parse_date("Date", &command.date)?;
        let time_of_arrival = parse_time("Time of Arrival", &command.time_of_arrival)?;
        let time_of_departure = match command.time_of_departure.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(parse_time("Time of Departure", raw)?),
            _ => None,
        };

        if let Some(departure) = time_of_departure {
            if departure < time_of_arrival {
                return Err(ValidationError::DepartureBeforeArrival {
                    arrival: time_of_arrival,
                    departure,
                });
            }
        }

        Ok(AttendanceRecord {
            worker_id,
            worker_name: command.worker_name.trim().to_string(),
            date,
            time_of_arrival,
            time_of_departure,
        })
    }

    pub async fn list_attendance(&self) -> Result<Vec<AttendanceRecord>, ServiceError> {
        Ok(self.attendance_repository.list_attendance(self.mode).await?)
    }

    /// The worker's row; in daily mode, their most recent day
    pub async fn get_attendance(&self, worker_id: &str) -> Result<AttendanceRecord, ServiceError> {
        let worker_id = worker_id.trim();
        self.attendance_repository
            .get_attendance(worker_id, self.mode)
            .await?
            .ok_or_else(|| ServiceError::not_found("Attendance record for worker", worker_id))
    }
}
