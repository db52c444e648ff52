use std::path::PathBuf;

use crate::{
    modules::{
        analyze::Analyze, catalog::Catalog, check::Check, recommend::Recommend, socket::Socket,
    },
    run_impl_enum,
};
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "pcbuild-cli")]
pub struct Options {
    #[structopt(flatten)]
    pub source: SourceOptions,
    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(StructOpt)]
pub struct SourceOptions {
    /// Realtime Database holding the component catalogs
    #[structopt(long, env = "PCBUILD_DATABASE_URL")]
    pub database_url: Option<String>,
    /// Database auth token
    #[structopt(long, env = "PCBUILD_AUTH", hide_env_values = true)]
    pub auth: Option<String>,
    /// Directory of exported `<category>.json` catalogs, used instead of the database
    #[structopt(long, env = "PCBUILD_SNAPSHOT", parse(from_os_str))]
    pub snapshot: Option<PathBuf>,
}

#[derive(StructOpt)]
pub enum Command {
    /// Browse one component category
    Catalog(Catalog),
    /// Score a build
    Analyze(Analyze),
    /// Suggest builds for a preset
    Recommend(Recommend),
    /// Resolve a CPU's socket
    Socket(Socket),
    /// Check a build's CPU and motherboard sockets
    Check(Check),
}

run_impl_enum!(Command, self, ctx, ser, {
    match self {
        Self::Catalog(c) => c.run(ctx, ser).await?,
        Self::Analyze(a) => a.run(ctx, ser).await?,
        Self::Recommend(r) => r.run(ctx, ser).await?,
        Self::Socket(s) => s.run(ctx, ser).await?,
        Self::Check(c) => c.run(ctx, ser).await?,
    }
});
