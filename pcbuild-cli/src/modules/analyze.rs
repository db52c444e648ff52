use std::path::PathBuf;

use crate::{common::read_build, run_impl_enum};
use pcbuild::modules::analyst::analyze;
use structopt::StructOpt;

#[derive(StructOpt)]
pub struct Analyze {
    /// JSON build configuration
    #[structopt(parse(from_os_str))]
    build: PathBuf,
}

run_impl_enum!(Analyze, self, _ctx, ser, {
    let config = read_build(&self.build).await?;
    erased_serde::serialize(&analyze(&config), ser)?;
});
