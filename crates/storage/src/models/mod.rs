pub mod audit;
pub mod config;
pub mod pot;
pub mod user;
pub mod week;
pub mod weigh_in;

pub use audit::AuditEntry;
pub use config::BattleConfig;
pub use pot::PotContribution;
pub use user::User;
pub use weigh_in::WeighIn;
