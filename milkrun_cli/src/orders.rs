use std::path::Path;

use anyhow::{Context, anyhow};
use tracing::debug;

use milkrun_core::orders::OrderRecord;

/// Column names in the order list. Only latitude and longitude are
/// required; the display columns are picked up when present.
pub struct OrderColumns {
    pub latitude: String,
    pub longitude: String,
    pub customer_name: String,
    pub city: String,
    pub order_value: String,
}

pub fn read_orders(path: &Path, columns: &OrderColumns) -> anyhow::Result<Vec<OrderRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening order list {}", path.display()))?;

    let headers = reader.headers()?.clone();
    debug!("CSV columns: {:?}", headers.iter().collect::<Vec<_>>());

    let position = |name: &str| headers.iter().position(|header| header == name);

    let latitude = position(&columns.latitude).ok_or_else(|| {
        anyhow!(
            "latitude column {:?} not found, available columns: {:?}",
            columns.latitude,
            headers.iter().collect::<Vec<_>>()
        )
    })?;
    let longitude = position(&columns.longitude).ok_or_else(|| {
        anyhow!(
            "longitude column {:?} not found, available columns: {:?}",
            columns.longitude,
            headers.iter().collect::<Vec<_>>()
        )
    })?;

    let customer_name = position(&columns.customer_name);
    let city = position(&columns.city);
    let order_value = position(&columns.order_value);

    let optional = |record: &csv::StringRecord, index: Option<usize>| -> Option<String> {
        index
            .and_then(|index| record.get(index))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let mut records = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("reading data row {}", index + 1))?;

        records.push(OrderRecord {
            row: index + 1,
            latitude: record.get(latitude).unwrap_or_default().to_string(),
            longitude: record.get(longitude).unwrap_or_default().to_string(),
            customer_name: optional(&record, customer_name),
            city: optional(&record, city),
            order_value: optional(&record, order_value),
        });
    }

    debug!("Read {} order records from {}", records.len(), path.display());

    Ok(records)
}
