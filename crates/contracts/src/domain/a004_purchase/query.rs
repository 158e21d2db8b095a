use serde::{Deserialize, Serialize};

/// Number of purchases requested when the filter does not say otherwise
pub const DEFAULT_RANGE_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Query string of `/api/compra/rango/{proveedor_id}/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRangeQuery {
    #[serde(rename = "fecha_inicio", skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,

    #[serde(rename = "fecha_fin", skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,

    pub limit: usize,

    pub order: SortOrder,
}

impl Default for PurchaseRangeQuery {
    fn default() -> Self {
        Self {
            date_from: None,
            date_to: None,
            limit: DEFAULT_RANGE_LIMIT,
            order: SortOrder::Asc,
        }
    }
}

impl PurchaseRangeQuery {
    /// Build from filter inputs, where an empty string means "no bound"
    pub fn from_filters(date_from: &str, date_to: &str, limit: usize) -> Self {
        let bound = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        Self {
            date_from: bound(date_from),
            date_to: bound(date_to),
            limit: limit.max(1),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_filters_drops_empty_bounds() {
        let query = PurchaseRangeQuery::from_filters("", " 2024-01-31 ", 0);
        assert_eq!(query.date_from, None);
        assert_eq!(query.date_to.as_deref(), Some("2024-01-31"));
        assert_eq!(query.limit, 1);
        assert_eq!(query.order, SortOrder::Asc);
    }

    #[test]
    fn test_default_limit() {
        assert_eq!(PurchaseRangeQuery::default().limit, 3);
    }
}
