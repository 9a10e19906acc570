//! Derive a cache key.

use anyhow::Result;
use fincache_data::CallArgs;

use crate::cli::KeyArgs;

pub async fn run(args: KeyArgs) -> Result<()> {
    let call_args: CallArgs = args.args.into_iter().collect();
    println!("{}", call_args.key(&args.prefix));
    Ok(())
}
