//! `nupack push` command

use anyhow::Result;

use crate::cli::PushArgs;
use nupack::ops::publish;

pub fn execute(args: PushArgs) -> Result<()> {
    let output = publish(&args.package)?;
    print!("{output}");
    Ok(())
}
