pub(crate) mod common;
mod modules;
mod options;

use std::io::stdout;

use erased_serde::Serializer;
use structopt::StructOpt;

use crate::common::Run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let opt = options::Options::from_args();
    let ctx = common::Context::new(opt.source);

    opt.command
        .run(
            &ctx,
            &mut <dyn Serializer>::erase(&mut serde_json::Serializer::pretty(stdout())),
        )
        .await?;

    println!();
    Ok(())
}
