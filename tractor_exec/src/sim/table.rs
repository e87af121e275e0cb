//! Console table output of a simulation's time series

use super::SimRecord;

/// Width of each column of the table
const COLUMN_WIDTH: usize = 10;

/// Get the header line of the table.
pub fn header() -> String {
    ["Time", "X", "Y", "Speed", "Angle", "Acceleration"]
        .iter()
        .map(|h| format!("{:^width$}", h, width = COLUMN_WIDTH))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a single record as a line of the table.
pub fn row(record: &SimRecord) -> String {
    [
        record.time_s,
        record.x_m,
        record.y_m,
        record.speed_ms,
        record.heading_rad,
        record.accel_mss,
    ]
    .iter()
    .map(|v| format!("{:width$.2}", v, width = COLUMN_WIDTH))
    .collect::<Vec<_>>()
    .join(" ")
}

/// Print the whole table to stdout.
pub fn print<'a, I>(records: I)
where
    I: IntoIterator<Item = &'a SimRecord>,
{
    println!("{}", header());

    for r in records {
        println!("{}", row(r));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_header() {
        assert_eq!(
            header(),
            "   Time        X          Y        Speed      Angle    Acceleration"
        );
    }

    #[test]
    fn test_row() {
        let record = SimRecord {
            time_s: 0.0,
            x_m: 0.006,
            y_m: -1.234,
            speed_ms: 0.05,
            heading_rad: 1.107148,
            accel_mss: 12.5,
        };

        assert_eq!(
            row(&record),
            "      0.00       0.01      -1.23       0.05       1.11      12.50"
        );
    }
}
