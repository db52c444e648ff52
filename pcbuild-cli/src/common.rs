use std::path::Path;

use anyhow::{bail, Context as _};
use async_trait::async_trait;
use erased_serde::Serializer;
use pcbuild::{
    modules::catalog::{CatalogSource, FirebaseSource, SnapshotSource},
    schemas::build::BuildConfiguration,
};

use crate::options::SourceOptions;

/// What every command may need besides its own arguments.
pub struct Context {
    source: SourceOptions,
}

impl Context {
    pub fn new(source: SourceOptions) -> Self {
        Self { source }
    }

    /// The configured catalog source. A snapshot directory wins over a database URL.
    pub fn catalog_source(&self) -> anyhow::Result<Box<dyn CatalogSource>> {
        if let Some(dir) = &self.source.snapshot {
            log::debug!("reading catalogs from snapshot {}", dir.display());
            return Ok(Box::new(SnapshotSource::new(dir)));
        }

        match &self.source.database_url {
            Some(url) => {
                log::debug!("reading catalogs from {}", url);
                Ok(Box::new(FirebaseSource::new(
                    url,
                    self.source.auth.clone(),
                )?))
            }
            None => bail!("no catalog source: pass --snapshot or --database-url"),
        }
    }
}

/// Read a build configuration saved as JSON.
pub async fn read_build(path: &Path) -> anyhow::Result<BuildConfiguration> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

#[async_trait]
pub trait Run {
    async fn run(
        &self,
        ctx: &Context,
        serializer: &mut (dyn Serializer + Send),
    ) -> anyhow::Result<()>;
}

#[macro_export]
macro_rules! run_impl_enum {
    ($i:ident, $self:ident, $ctx:ident, $ser:ident, $b:block) => {
        #[async_trait::async_trait]
        impl $crate::common::Run for $i {
            async fn run(
                &$self,
                $ctx: &$crate::common::Context,
                $ser: &mut (dyn erased_serde::Serializer + Send),
            ) -> anyhow::Result<()> {
                $b;

                Ok(())
            }
        }
    };
}
