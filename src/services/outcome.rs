//! Shared handling of form submissions.

use crate::errors::AppResult;

/// `Some(saved)` when the write committed, `None` when the commit failed and
/// the form should be offered again. Any other error propagates.
pub(crate) fn committed<T>(result: AppResult<T>, action: &str) -> AppResult<Option<T>> {
    match result {
        Ok(saved) => Ok(Some(saved)),
        Err(e) if e.is_save_failure() => {
            tracing::warn!(error = %e, "{} failed; offering the form again", action);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use sea_orm::DbErr;

    #[test]
    fn save_failure_becomes_retry() {
        let result: AppResult<i32> = Err(AppError::save_failed(DbErr::Custom("locked".into())));
        assert_eq!(committed(result, "create student").unwrap(), None);
    }

    #[test]
    fn other_errors_propagate() {
        let result: AppResult<i32> = Err(AppError::NotFound);
        assert!(matches!(committed(result, "edit student"), Err(AppError::NotFound)));

        assert_eq!(committed(Ok(7), "edit student").unwrap(), Some(7));
    }
}
