/// Report specifications and tabular rendering.
///
/// Each report applies one sort specification to the shared record slice
/// and renders the result as a fixed five-column table. Sorts for distinct
/// reports are independent (records are read-only, engine state is local),
/// so they run in parallel; results are collected in spec order to keep the
/// output deterministic.
use std::io::{self, Write};

use rayon::prelude::*;

use crate::record::{Field, Record};
use crate::sort::{Direction, SortError, SortKey, sort_records};

/// Column widths of the report table. The divider rule spans their sum.
const COL_WIDTHS: [usize; 5] = [25, 25, 15, 25, 15];
const RULE_WIDTH: usize = 100;

/// Title plus the ordered key list for one report.
#[derive(Debug, Clone)]
pub struct ReportSpec {
    pub title: String,
    pub keys: Vec<SortKey<Field>>,
}

impl ReportSpec {
    pub fn new(title: &str) -> ReportSpec {
        ReportSpec {
            title: format!("SORT BY ({})", title),
            keys: Vec::new(),
        }
    }

    /// Add one (field, direction) key; chainable.
    pub fn key(mut self, field: Field, direction: Direction) -> ReportSpec {
        self.keys.push(SortKey::new(field, direction));
        self
    }

    /// Parse a CLI spec string: a comma list of `field[:asc|desc]`.
    /// Direction defaults to ascending. The title is derived from the keys.
    pub fn parse(spec: &str) -> Result<ReportSpec, String> {
        let mut keys = Vec::new();
        let mut names = Vec::new();

        for part in spec.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(format!("empty key in sort specification '{}'", spec));
            }
            let (field_name, direction) = match part.split_once(':') {
                Some((f, d)) => (f.trim(), Direction::parse(d.trim())?),
                None => (part, Direction::Ascending),
            };
            let field = Field::parse(field_name)?;
            names.push(format!("{} {}", field.as_str(), direction.as_str()));
            keys.push(SortKey::new(field, direction));
        }

        Ok(ReportSpec {
            title: format!("SORT BY ({})", names.join(", ")),
            keys,
        })
    }
}

/// The three reports the tool produces when none are requested explicitly.
pub fn default_specs() -> Vec<ReportSpec> {
    vec![
        ReportSpec::new("Gender ASC, LastName ASC")
            .key(Field::Gender, Direction::Ascending)
            .key(Field::LastName, Direction::Ascending),
        ReportSpec::new("DateOfBirth ASC").key(Field::DateOfBirth, Direction::Ascending),
        ReportSpec::new("LastName DESC").key(Field::LastName, Direction::Descending),
    ]
}

/// Sort the records once per spec. Each invocation is independent, so the
/// passes run in parallel; the result vector matches spec order.
pub fn sort_all(
    records: &[Record],
    specs: &[ReportSpec],
) -> Vec<Result<Vec<usize>, SortError>> {
    specs
        .par_iter()
        .map(|spec| sort_records(records, &spec.keys))
        .collect()
}

/// Render one report: title, header, divider rule, one row per record in
/// `order`, two trailing blank lines.
pub fn render_report(
    title: &str,
    records: &[Record],
    order: &[usize],
    writer: &mut impl Write,
) -> io::Result<()> {
    writeln!(writer, "{}", title)?;
    writeln!(writer)?;
    writeln!(
        writer,
        "{:<w0$}{:<w1$}{:<w2$}{:<w3$}{:<w4$}",
        "LAST NAME",
        "FIRST NAME",
        "GENDER",
        "DATE OF BIRTH",
        "COLOR",
        w0 = COL_WIDTHS[0],
        w1 = COL_WIDTHS[1],
        w2 = COL_WIDTHS[2],
        w3 = COL_WIDTHS[3],
        w4 = COL_WIDTHS[4],
    )?;
    writeln!(writer, "{}", "-".repeat(RULE_WIDTH))?;

    for &idx in order {
        let r = &records[idx];
        writeln!(
            writer,
            "{:<w0$}{:<w1$}{:<w2$}{:<w3$}{:<w4$}",
            r.last_name,
            r.first_name,
            r.gender,
            r.date_of_birth.to_string(),
            r.favorite_color,
            w0 = COL_WIDTHS[0],
            w1 = COL_WIDTHS[1],
            w2 = COL_WIDTHS[2],
            w3 = COL_WIDTHS[3],
            w4 = COL_WIDTHS[4],
        )?;
    }

    writeln!(writer)?;
    writeln!(writer)?;
    Ok(())
}

/// Log every failed sort on stderr, once per spec. Failures are isolated:
/// one bad report never blocks the others.
pub fn report_failures(specs: &[ReportSpec], results: &[Result<Vec<usize>, SortError>]) {
    for (spec, result) in specs.iter().zip(results) {
        if let Err(e) = result {
            eprintln!("recsort: report '{}' failed: {}", spec.title, e);
        }
    }
}

/// Run every report against `records` and render to `writer`.
///
/// A spec whose sort fails is reported on stderr and skipped; the remaining
/// reports still render. Returns the number of reports written.
pub fn write_reports(
    records: &[Record],
    specs: &[ReportSpec],
    writer: &mut impl Write,
) -> io::Result<usize> {
    let results = sort_all(records, specs);
    report_failures(specs, &results);
    write_sorted_reports(records, specs, &results, writer)
}

/// Render pre-computed sort results, skipping failed specs (used when the
/// same reports go to more than one output channel: the sort runs once and
/// failures are logged once, rendering repeats per channel).
pub fn write_sorted_reports(
    records: &[Record],
    specs: &[ReportSpec],
    results: &[Result<Vec<usize>, SortError>],
    writer: &mut impl Write,
) -> io::Result<usize> {
    let mut written = 0;
    for (spec, result) in specs.iter().zip(results) {
        if let Ok(order) = result {
            render_report(&spec.title, records, order, writer)?;
            written += 1;
        }
    }
    Ok(written)
}
