use super::model::ProductKey;
use thiserror::Error;

/// How an error is surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Nothing was sent; the user is warned
    Warning,
    /// The backend rejected the change or could not be reached
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("product row {0} not found")]
    RowNotFound(ProductKey),

    #[error("column {0} not found")]
    ColumnNotFound(usize),

    #[error("product {key} has no line item in column {column}")]
    NoTargetLineItem { key: ProductKey, column: usize },

    #[error("another cell is still being saved")]
    EditInProgress,

    #[error("no cell is being edited")]
    NoActiveEdit,

    #[error("line item update failed: {0}")]
    MutationFailed(String),
}

impl MatrixError {
    /// Row or column vanished between render and edit
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MatrixError::RowNotFound(_) | MatrixError::ColumnNotFound(_)
        )
    }

    pub fn severity(&self) -> Severity {
        match self {
            MatrixError::MutationFailed(_) => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// Toast text shown in the console
    pub fn user_message(&self) -> String {
        match self {
            MatrixError::RowNotFound(_) | MatrixError::ColumnNotFound(_) => {
                "La fila o columna ya no existe".to_string()
            }
            MatrixError::NoTargetLineItem { .. } => {
                "No se encontró el detalle para actualizar".to_string()
            }
            MatrixError::EditInProgress => "Espere a que termine el guardado".to_string(),
            MatrixError::NoActiveEdit => "No hay ninguna celda en edición".to_string(),
            MatrixError::MutationFailed(reason) => reason.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_product::ProductId;

    #[test]
    fn test_severity() {
        let key = ProductKey::Product(ProductId(1));
        assert_eq!(
            MatrixError::NoTargetLineItem { key, column: 0 }.severity(),
            Severity::Warning
        );
        assert_eq!(
            MatrixError::MutationFailed("HTTP 500".into()).severity(),
            Severity::Error
        );
        assert!(MatrixError::ColumnNotFound(4).is_not_found());
    }
}
