pub mod audit;
pub mod config;
pub mod setup;
pub mod stats;
pub mod user;
pub mod week;
pub mod weigh_in;

use rust_decimal::Decimal;

/// Plausible human weight band shared by every weight-carrying request.
pub(crate) fn validate_weight(weight: &Decimal) -> Result<(), validator::ValidationError> {
    let min = Decimal::from(30);
    let max = Decimal::from(300);

    if *weight > min && *weight < max {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("weight_out_of_range");
        error.message = Some("weight must be between 30 and 300 kg".into());
        Err(error)
    }
}
