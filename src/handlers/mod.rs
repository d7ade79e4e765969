use std::io::Write;

use serde::Serialize;

pub mod aggregate;
pub mod cookbook;
pub mod postgres;

/// Writes `value` as one JSON document followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(
    mut writer: W,
    value: &T,
    pretty: bool,
) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
