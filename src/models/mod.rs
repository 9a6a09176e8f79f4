pub mod checkpoint;
pub mod report_row;
pub mod round;
pub mod scan_event;
pub mod summary;
