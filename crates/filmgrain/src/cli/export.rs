use std::path::Path;

use anyhow::Result;

use crate::context::AppContext;

pub fn run_export(files: &[String], out: &Path) -> Result<()> {
    let ctx = AppContext::resolve()?;
    let outcome = ctx.exiftool().export_metadata(files, out)?;
    eprintln!("{}", outcome.message);
    Ok(())
}

pub fn run_import(files: &[String], from: &Path) -> Result<()> {
    let ctx = AppContext::resolve()?;
    let outcome = ctx.exiftool().import_metadata(files, from)?;
    if !outcome.message.is_empty() {
        eprintln!("{}", outcome.message);
    }
    Ok(())
}
