use crate::run_impl_enum;
use pcbuild::{
    modules::catalog::{load_category, CatalogQuery, CatalogSource, SortOrder},
    schemas::components::{
        Case, Category, Component, Cpu, InternalHardDrive, Memory, Monitor, Motherboard,
        PowerSupply, VideoCard,
    },
};
use serde::{de::DeserializeOwned, Serialize};
use structopt::StructOpt;

#[derive(StructOpt)]
pub struct Catalog {
    /// e.g. `cpu`, `video-card` or `powerSupply`
    category: Category,
    #[structopt(long)]
    search: Option<String>,
    #[structopt(long)]
    min_price: Option<f64>,
    #[structopt(long)]
    max_price: Option<f64>,
    /// price-asc, price-desc, name-asc or name-desc
    #[structopt(long, default_value = "price-asc")]
    sort: SortOrder,
    #[structopt(long, default_value = "1")]
    page: usize,
}

impl Catalog {
    fn query(&self) -> CatalogQuery {
        CatalogQuery {
            search: self.search.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            sort: self.sort,
            page: self.page,
        }
    }
}

async fn list<T>(
    source: &dyn CatalogSource,
    query: &CatalogQuery,
    ser: &mut (dyn erased_serde::Serializer + Send),
) -> anyhow::Result<()>
where
    T: Component + DeserializeOwned + Serialize + Send,
{
    let items = load_category::<T>(source, None).await?;
    erased_serde::serialize(&query.apply(items), ser)?;
    Ok(())
}

run_impl_enum!(Catalog, self, ctx, ser, {
    let source = ctx.catalog_source()?;
    let source = source.as_ref();
    let query = self.query();

    match self.category {
        Category::Cpu => list::<Cpu>(source, &query, ser).await?,
        Category::Memory => list::<Memory>(source, &query, ser).await?,
        Category::Motherboard => list::<Motherboard>(source, &query, ser).await?,
        Category::VideoCard => list::<VideoCard>(source, &query, ser).await?,
        Category::Case => list::<Case>(source, &query, ser).await?,
        Category::PowerSupply => list::<PowerSupply>(source, &query, ser).await?,
        Category::InternalHardDrive => list::<InternalHardDrive>(source, &query, ser).await?,
        Category::Monitor => list::<Monitor>(source, &query, ser).await?,
    }
});
