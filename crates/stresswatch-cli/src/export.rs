//! CSV artifact export.
//!
//! The column names (`Ticker,Stress Score`), instrument row order and the
//! trailing `Composite` row are a compatibility contract with downstream
//! spreadsheet consumers; do not reorder.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use stresswatch_core::CompositeReading;

use crate::error::CliError;

pub fn write_csv(path: impl AsRef<Path>, reading: &CompositeReading) -> Result<(), CliError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "Ticker,Stress Score")?;
    for component in &reading.components {
        writeln!(writer, "{},{:.2}", component.name, component.score)?;
    }
    writeln!(writer, "Composite,{:.2}", reading.composite)?;
    writer.flush()?;

    Ok(())
}
