use anyhow::Result;

use crate::context::AppContext;

pub fn run(files: &[String]) -> Result<()> {
    let ctx = AppContext::resolve()?;
    let outcome = ctx.exiftool().get_metadata(files)?;
    println!("{}", outcome.message);
    Ok(())
}
