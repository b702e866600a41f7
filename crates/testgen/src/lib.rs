pub mod generator;

pub use generator::{find_matching, generate_mult_schedules, generate_single_schedule, GenParams, ScheduleRecord};
