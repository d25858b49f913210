use anyhow::Result;

use crate::context::AppContext;

pub fn run(files: &[String], tags: &[String]) -> Result<()> {
    let ctx = AppContext::resolve()?;
    let outcome = ctx.exiftool().remove_metadata(files, tags)?;
    eprintln!("{}", outcome.message);
    Ok(())
}
