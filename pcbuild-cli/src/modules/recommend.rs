use crate::run_impl_enum;
use pcbuild::{modules::recommend::generate_from, schemas::analysis::Preset};
use structopt::StructOpt;

#[derive(StructOpt)]
pub struct Recommend {
    /// gaming, office, creator or budget
    preset: Preset,
    #[structopt(long, default_value = "9")]
    count: usize,
}

run_impl_enum!(Recommend, self, ctx, ser, {
    let source = ctx.catalog_source()?;
    let builds = generate_from(source.as_ref(), self.preset, self.count).await?;
    if builds.is_empty() {
        log::warn!("no {} builds could be assembled from the catalog", self.preset);
    }
    erased_serde::serialize(&builds, ser)?;
});
