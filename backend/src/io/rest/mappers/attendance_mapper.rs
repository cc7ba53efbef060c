use crate::domain::commands::attendance::RecordAttendanceCommand;
use crate::domain::models::attendance::AttendanceRecord as DomainAttendanceRecord;
use shared::{AttendanceRecord as SharedAttendanceRecord, RecordAttendanceRequest};

pub struct AttendanceMapper;

impl AttendanceMapper {
    pub fn to_command(dto: RecordAttendanceRequest) -> RecordAttendanceCommand {
        RecordAttendanceCommand {
            worker_id: dto.worker_id,
            worker_name: dto.worker_name,
            date: dto.date,
            time_of_arrival: dto.time_of_arrival,
            time_of_departure: dto.time_of_departure,
        }
    }

    pub fn to_dto(domain: DomainAttendanceRecord) -> SharedAttendanceRecord {
        SharedAttendanceRecord {
            worker_id: domain.worker_id,
            worker_name: domain.worker_name,
            date: domain.date.format("%Y-%m-%d").to_string(),
            time_of_arrival: domain.time_of_arrival.format("%H:%M:%S").to_string(),
            time_of_departure: domain
                .time_of_departure
                .map(|t| t.format("%H:%M:%S").to_string()),
        }
    }
}
