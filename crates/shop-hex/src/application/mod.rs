pub mod item_service;
pub mod order_service;
pub mod user_service;

use crate::errors::AppError;
use shop_types::validator::is_valid_id;

/// Validates a numeric id and narrows it to the store's integer type.
/// Ids at or past 2^63 have no `i64` counterpart and are rejected.
pub(crate) fn checked_id(id: f64) -> Result<i64, AppError> {
    if !is_valid_id(id) || id >= i64::MAX as f64 {
        return Err(AppError::bad_request());
    }
    Ok(id as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_id_narrows_valid_ids() {
        assert_eq!(checked_id(1.0).unwrap(), 1);
        assert_eq!(checked_id(9_007_199_254_740_992.0).unwrap(), 1 << 53);
    }

    #[test]
    fn checked_id_rejects_ids_past_i64() {
        for id in [1e19, i64::MAX as f64, f64::MAX] {
            assert!(matches!(checked_id(id), Err(AppError::BadRequest(_))));
        }
    }
}
