use std::{
    fs,
    io::{Read, Write},
};

use anyhow::Context;
use serde_json::json;

use super::write_json;
use crate::{
    config::{ParseHandwritingArgs, SummaryArgs},
    services::cookbook::{parse_handwriting, Cookbook, RecipeSummary},
};

/// Prints `{"msg": <cleaned name>}`.
pub fn parse_handwriting_command<W: Write>(
    args: &ParseHandwritingArgs,
    writer: W,
) -> anyhow::Result<String> {
    let name = parse_handwriting(&args.input)?;
    tracing::debug!(input = %args.input, name = %name, "parsed handwriting");

    write_json(writer, &json!({ "msg": name }), false)?;
    Ok(name)
}

pub fn summary_command<W: Write>(args: &SummaryArgs, writer: W) -> anyhow::Result<RecipeSummary> {
    let file = fs::File::open(&args.cookbook)
        .with_context(|| format!("failed to open {}", args.cookbook.display()))?;
    summarize(file, &args.name, writer, args.pretty)
}

/// Loads a cookbook (a JSON array of entries) from `reader` and writes the
/// summary of `recipe_name`.
pub fn summarize<R: Read, W: Write>(
    mut reader: R,
    recipe_name: &str,
    writer: W,
    pretty: bool,
) -> anyhow::Result<RecipeSummary> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .context("failed to read cookbook")?;

    let cookbook = Cookbook::from_json_str(&input).context("failed to load cookbook")?;
    tracing::debug!(entries = cookbook.len(), "cookbook loaded");

    let summary = cookbook.summary(recipe_name)?;
    write_json(writer, &summary, pretty)?;
    Ok(summary)
}
