//! Table — space separated `<bucket> <new> <old>` rows.

use std::io::{self, Write};

use engine::{BucketKey, VisitorTree};

use crate::conf::Granularity;

pub fn header(granularity: Granularity) -> &'static str {
    match granularity {
        Granularity::Year => "year new old",
        Granularity::Month => "month new old",
        Granularity::Day => "day new old",
    }
}

/// Write the header and one row per bucket, ascending, skipping years before `min_year`.
pub fn write_table<W: Write>(
    out: &mut W,
    tree: &VisitorTree,
    granularity: Granularity,
    min_year: i32,
) -> io::Result<()> {
    writeln!(out, "{}", header(granularity))?;

    for year in tree.years_since(min_year) {
        if granularity == Granularity::Year {
            write_row(out, tree, BucketKey::Year(year))?;
            continue;
        }
        for month in tree.months_of(year) {
            if granularity == Granularity::Month {
                write_row(out, tree, BucketKey::Month(year, month))?;
                continue;
            }
            for day in tree.days_of(year, month) {
                write_row(out, tree, BucketKey::Day(year, month, day))?;
            }
        }
    }

    Ok(())
}

fn write_row<W: Write>(out: &mut W, tree: &VisitorTree, key: BucketKey) -> io::Result<()> {
    let count = tree.query(key);
    writeln!(out, "{} {} {}", key, count.new, count.old)
}
