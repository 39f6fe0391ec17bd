use sea_orm::DbErr;

/// An error from a write operation
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The row addressed by id does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    /// Any database failure, constraint violations included
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
