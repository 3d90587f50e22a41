//! Error conversion glue between layers.
//!
//! The domain layer does not know about repository or service errors, so the
//! `From` impls bridging them live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod server {
    use crate::domain::types::TypeConstraintError;
    use crate::forms::FormError;
    use crate::repository::errors::RepositoryError;
    use crate::services::ServiceError;
    use crate::uploads::UploadError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::TypeConstraint(val.to_string())
        }
    }

    impl From<RepositoryError> for ServiceError {
        fn from(val: RepositoryError) -> Self {
            match val {
                RepositoryError::NotFound => ServiceError::NotFound,
                RepositoryError::ConstraintViolation(message) => ServiceError::Conflict(message),
                RepositoryError::ValidationError(message) => ServiceError::Form(message),
                other => ServiceError::Internal(other.to_string()),
            }
        }
    }

    impl From<FormError> for ServiceError {
        fn from(val: FormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<UploadError> for ServiceError {
        fn from(val: UploadError) -> Self {
            ServiceError::Upload(val.to_string())
        }
    }
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;
    use crate::services::ServiceError;

    #[test]
    fn constraint_violation_becomes_conflict() {
        let err = ServiceError::from(RepositoryError::ConstraintViolation("dup".into()));
        assert!(matches!(err, ServiceError::Conflict(message) if message == "dup"));
    }

    #[test]
    fn connection_error_becomes_internal() {
        let err = ServiceError::from(RepositoryError::ConnectionError("down".into()));
        assert!(matches!(err, ServiceError::Internal(_)));
    }

    #[test]
    fn type_constraint_becomes_repository_validation() {
        let err = RepositoryError::from(TypeConstraintError::NegativeStock);
        assert!(matches!(err, RepositoryError::ValidationError(_)));
    }
}
