use std::path::PathBuf;

use crate::{common::read_build, run_impl_enum};
use pcbuild::modules::{builds::check_sockets, socket::SocketCheck};
use serde::Serialize;
use structopt::StructOpt;

#[derive(StructOpt)]
pub struct Check {
    /// JSON build configuration
    #[structopt(parse(from_os_str))]
    build: PathBuf,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    #[serde(flatten)]
    sockets: SocketCheck,
    message: String,
    parts: usize,
    total_price: f64,
}

run_impl_enum!(Check, self, _ctx, ser, {
    let config = read_build(&self.build).await?;
    let sockets = SocketCheck::new(config.cpu.as_ref(), config.motherboard.as_ref());

    erased_serde::serialize(
        &Report {
            message: sockets.message(),
            sockets,
            parts: config.part_count(),
            total_price: config.total_price(),
        },
        ser,
    )?;

    check_sockets(&config)?;
});
