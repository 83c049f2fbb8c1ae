use thiserror::Error;

use crate::location::Location;

/// One raw row from the order table, before any validation. Coordinates are
/// kept as the original strings so that parse failures can be reported
/// verbatim.
#[derive(Debug, Clone, Default)]
pub struct OrderRecord {
    /// 1-based data row in the source table, for exclusion reports.
    pub row: usize,
    pub latitude: String,
    pub longitude: String,
    pub customer_name: Option<String>,
    pub city: Option<String>,
    pub order_value: Option<String>,
}

/// A validated customer ready to be placed into a problem instance.
#[derive(Debug, Clone)]
pub struct Customer {
    location: Location,
    customer_name: Option<String>,
    city: Option<String>,
    order_value: Option<String>,
}

impl Customer {
    pub fn new(
        location: Location,
        customer_name: Option<String>,
        city: Option<String>,
        order_value: Option<String>,
    ) -> Self {
        Self {
            location,
            customer_name,
            city,
            order_value,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.customer_name.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn order_value(&self) -> Option<&str> {
        self.order_value.as_deref()
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExclusionReason {
    #[error("latitude {0:?} is not a number")]
    InvalidLatitude(String),

    #[error("longitude {0:?} is not a number")]
    InvalidLongitude(String),

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("coordinate ({lat}, {lon}) is outside the service area")]
    OutsideServiceArea { lat: f64, lon: f64 },
}

/// A record dropped during instance building, together with why. Exclusions
/// are always returned to the caller and logged, never silently discarded.
#[derive(Debug, Clone)]
pub struct ExcludedRecord {
    pub record: OrderRecord,
    pub reason: ExclusionReason,
}
