pub mod audit;
pub mod config;
pub mod setup;
pub mod stats;
pub mod users;
pub mod weeks;
pub mod weigh_ins;

/// The date all date-relative computations run against.
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
