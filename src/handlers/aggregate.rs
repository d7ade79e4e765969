use std::{
    fs::File,
    io::{self, BufReader, Read, Write},
};

use anyhow::Context;

use super::write_json;
use crate::{
    config::AggregateArgs,
    services::aggregate::{InputRecord, OutputRecord},
};

pub fn aggregate_command(args: &AggregateArgs) -> anyhow::Result<OutputRecord> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &args.input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            process(BufReader::new(file), &mut out, args.pretty)
        }
        None => process(io::stdin().lock(), &mut out, args.pretty),
    }
}

/// Reads one input record from `reader` and writes the output record to
/// `writer`, followed by a newline.
pub fn process<R: Read, W: Write>(
    mut reader: R,
    writer: W,
    pretty: bool,
) -> anyhow::Result<OutputRecord> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .context("failed to read input record")?;

    let record = InputRecord::from_json_str(&input)?;
    tracing::debug!(elements = record.data.len(), "parsed input record");

    let output = record.aggregate()?;
    tracing::info!(
        string_len = output.string_len,
        int_sum = output.int_sum,
        "aggregated input record"
    );

    write_json(writer, &output, pretty)?;
    Ok(output)
}
