use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use std::process;

use anyhow::Context;
use clap::Parser;

use recsort::common;
use recsort::common::io::{FileData, read_file, split_lines};
use recsort::record::{Record, parse_records};
use recsort::report::{ReportSpec, default_specs, report_failures, sort_all, write_sorted_reports};

#[derive(Parser)]
#[command(
    name = "recsort",
    about = "Multi-key sorted reports over personal-record text files"
)]
struct Cli {
    /// Sort keys for one report: comma list of FIELD[:asc|desc].
    /// Repeat the flag for additional reports
    #[arg(short = 's', long = "sort-by", value_name = "KEYS")]
    sort_by: Vec<String>,

    /// Also write the reports to FILE
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<String>,

    /// Record files to read ('-' or none means standard input)
    files: Vec<String>,
}

fn main() {
    common::reset_sigpipe();
    let cli = Cli::parse();

    // Specs are validated up front: a bad field or direction name is a
    // configuration error and must never surface mid-sort.
    let mut specs: Vec<ReportSpec> = Vec::new();
    for raw in &cli.sort_by {
        match ReportSpec::parse(raw) {
            Ok(spec) => specs.push(spec),
            Err(e) => {
                eprintln!("recsort: invalid sort specification '{}': {}", raw, e);
                process::exit(2);
            }
        }
    }
    if specs.is_empty() {
        specs = default_specs();
    }

    if let Err(e) = run(&cli, &specs) {
        eprintln!("recsort: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli, specs: &[ReportSpec]) -> anyhow::Result<()> {
    let inputs: Vec<String> = if cli.files.is_empty() {
        vec!["-".to_string()]
    } else {
        cli.files.clone()
    };

    let mut records: Vec<Record> = Vec::new();
    for input in &inputs {
        let data = if input == "-" {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            FileData::Owned(buf)
        } else {
            read_file(Path::new(input)).with_context(|| format!("open failed: {}", input))?
        };

        let lines: Vec<Cow<'_, str>> = split_lines(&data)
            .iter()
            .map(|&(s, e)| String::from_utf8_lossy(&data[s..e]))
            .collect();
        records.extend(parse_records(lines.iter().map(|l| l.as_ref())));
    }

    if records.is_empty() {
        anyhow::bail!("no records parsed from input");
    }

    // One independent sort per report; each spec's failure is logged once
    // and both output channels render the same precomputed order.
    let results = sort_all(&records, specs);
    report_failures(specs, &results);

    let stdout = io::stdout();
    let mut console = BufWriter::new(stdout.lock());
    write_sorted_reports(&records, specs, &results, &mut console)?;
    console.flush()?;

    if let Some(ref path) = cli.output {
        let file = File::create(path).with_context(|| format!("create failed: {}", path))?;
        let mut writer = BufWriter::new(file);
        write_sorted_reports(&records, specs, &results, &mut writer)?;
        writer.flush()?;
    }

    Ok(())
}
