//! Order batches loaded from CSV.
//!
//! The file needs a header row with `name`, `tier` and `location` columns in
//! any order. Fields are trimmed and blank lines skipped.

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{Error, Result};
use crate::order::{DeliveryTier, OrderRequest};

const REQUIRED_COLUMNS: [&str; 3] = ["name", "tier", "location"];

/// Load order requests from a CSV file.
pub fn load_orders_from_path(path: &Path) -> Result<Vec<OrderRequest>> {
    let file = fs::File::open(path)?;
    let orders = load_orders(file)?;
    debug!(path = %path.display(), count = orders.len(), "loaded order batch");
    Ok(orders)
}

/// Load order requests from any CSV reader.
pub fn load_orders<R: Read>(reader: R) -> Result<Vec<OrderRequest>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut indices = [0usize; 3];
    for (slot, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(column))
            .ok_or_else(|| Error::InvalidOrderRecord {
                line: 1,
                message: format!("missing required column '{column}'"),
            })?;
    }

    let mut orders = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);
        orders.push(parse_record(&record, indices, line)?);
    }
    Ok(orders)
}

fn parse_record(record: &StringRecord, [name, tier, location]: [usize; 3], line: u64) -> Result<OrderRequest> {
    let field = |index: usize, column: &str| {
        record
            .get(index)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::InvalidOrderRecord {
                line,
                message: format!("empty '{column}' field"),
            })
    };

    let name = field(name, "name")?;
    let tier = field(tier, "tier")?
        .parse::<DeliveryTier>()
        .map_err(|err| Error::InvalidOrderRecord {
            line,
            message: err.to_string(),
        })?;
    let location = field(location, "location")?;

    Ok(OrderRequest::new(name, tier, location))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_orders_with_reordered_columns() {
        let csv = "location,name,tier\nB, Rice ,fast\nC,Tea,standard\n";
        let orders = load_orders(csv.as_bytes()).unwrap();
        assert_eq!(
            orders,
            vec![
                OrderRequest::new("Rice", DeliveryTier::Expedited, "B"),
                OrderRequest::new("Tea", DeliveryTier::Standard, "C"),
            ]
        );
    }

    #[test]
    fn missing_column_is_reported() {
        let err = load_orders("name,location\nRice,B\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("missing required column 'tier'"));
    }

    #[test]
    fn bad_tier_reports_line_number() {
        let csv = "name,tier,location\nRice,fast,B\nTea,urgent,C\n";
        match load_orders(csv.as_bytes()) {
            Err(Error::InvalidOrderRecord { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("urgent"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_name_is_rejected() {
        let csv = "name,tier,location\n ,fast,B\n";
        assert!(matches!(
            load_orders(csv.as_bytes()),
            Err(Error::InvalidOrderRecord { line: 2, .. })
        ));
    }
}
