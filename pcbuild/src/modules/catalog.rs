use anyhow::{bail, Context};
use async_trait::async_trait;
use reqwest::Url;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::{
    common::Client,
    schemas::components::{
        Case, Category, Component, Cpu, InternalHardDrive, Memory, Monitor, Motherboard,
        PowerSupply, VideoCard,
    },
};

/// Somewhere the raw component catalogs can be read from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// The raw JSON stored under `components/<category>`, or `None` if there is nothing there.
    async fn fetch(&self, category: Category) -> anyhow::Result<Option<Value>>;
}

/// Reads catalogs over the Firebase Realtime Database REST API.
pub struct FirebaseSource {
    client: Client,
    base_url: Url,
    auth: Option<String>,
}

impl FirebaseSource {
    pub fn new(base_url: &str, auth: Option<String>) -> anyhow::Result<Self> {
        let mut base_url =
            Url::parse(base_url).with_context(|| format!("invalid database url {:?}", base_url))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            client: Client::new()?,
            base_url,
            auth,
        })
    }

    fn url(&self, category: Category) -> anyhow::Result<Url> {
        let mut url = self
            .base_url
            .join(&format!("components/{}.json", category.path()))?;
        if let Some(auth) = &self.auth {
            url.query_pairs_mut().append_pair("auth", auth);
        }
        Ok(url)
    }
}

#[async_trait]
impl CatalogSource for FirebaseSource {
    async fn fetch(&self, category: Category) -> anyhow::Result<Option<Value>> {
        let res = self
            .client
            .0
            .get(self.url(category)?)
            .send()
            .await?
            .error_for_status()?;
        let value: Value = res.json().await?;
        Ok((!value.is_null()).then(|| value))
    }
}

/// Reads catalogs exported to `<dir>/<category>.json`.
pub struct SnapshotSource {
    dir: PathBuf,
}

impl SnapshotSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl CatalogSource for SnapshotSource {
    async fn fetch(&self, category: Category) -> anyhow::Result<Option<Value>> {
        let path = self.dir.join(format!("{}.json", category.path()));
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let value: Value = serde_json::from_slice(&bytes)
                    .with_context(|| format!("parsing {}", path.display()))?;
                Ok((!value.is_null()).then(|| value))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }
}

/// Flatten a stored category into its records.
/// Keyed objects (push ids) yield their values in key order; arrays drop `null` holes.
fn records(category: Category, value: Value) -> Vec<Value> {
    match value {
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        Value::Array(items) => items.into_iter().filter(|v| !v.is_null()).collect(),
        Value::Null => Vec::new(),
        other => {
            log::warn!("{} catalog is not a collection: {}", category, other);
            Vec::new()
        }
    }
}

/// Load one category, optionally keeping only records matching `search`.
///
/// # Errors
/// Errors if the source could not be read. Individual malformed records are skipped.
pub async fn load_category<T>(source: &dyn CatalogSource, search: Option<&str>) -> anyhow::Result<Vec<T>>
where
    T: Component + DeserializeOwned,
{
    let category = T::category();
    let value = source
        .fetch(category)
        .await
        .with_context(|| format!("loading {} catalog", category))?;

    let mut skipped = 0usize;
    let items: Vec<T> = value
        .map(|value| records(category, value))
        .unwrap_or_default()
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<T>(record) {
            Ok(item) => Some(item),
            Err(e) => {
                skipped += 1;
                log::warn!("skipping malformed {} record: {}", category, e);
                None
            }
        })
        .filter(|item| search.map_or(true, |query| item.matches(query)))
        .collect();

    log::debug!(
        "loaded {} {} records ({} skipped)",
        items.len(),
        category,
        skipped
    );
    Ok(items)
}

/// Every component catalog, held in memory.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Catalog {
    pub cpus: Vec<Cpu>,
    pub memory: Vec<Memory>,
    pub motherboards: Vec<Motherboard>,
    pub video_cards: Vec<VideoCard>,
    pub cases: Vec<Case>,
    pub power_supplies: Vec<PowerSupply>,
    pub drives: Vec<InternalHardDrive>,
    pub monitors: Vec<Monitor>,
}

impl Catalog {
    /// Load all eight categories concurrently.
    pub async fn load(source: &dyn CatalogSource) -> anyhow::Result<Self> {
        let (cpus, memory, motherboards, video_cards, cases, power_supplies, drives, monitors) = futures::try_join!(
            load_category::<Cpu>(source, None),
            load_category::<Memory>(source, None),
            load_category::<Motherboard>(source, None),
            load_category::<VideoCard>(source, None),
            load_category::<Case>(source, None),
            load_category::<PowerSupply>(source, None),
            load_category::<InternalHardDrive>(source, None),
            load_category::<Monitor>(source, None),
        )?;

        Ok(Self {
            cpus,
            memory,
            motherboards,
            video_cards,
            cases,
            power_supplies,
            drives,
            monitors,
        })
    }

    /// A copy without any record whose price is not positive.
    pub fn priced(&self) -> Self {
        fn keep<T: Component + Clone>(items: &[T]) -> Vec<T> {
            items.iter().filter(|i| i.price() > 0.0).cloned().collect()
        }

        Self {
            cpus: keep(&self.cpus),
            memory: keep(&self.memory),
            motherboards: keep(&self.motherboards),
            video_cards: keep(&self.video_cards),
            cases: keep(&self.cases),
            power_supplies: keep(&self.power_supplies),
            drives: keep(&self.drives),
            monitors: keep(&self.monitors),
        }
    }
}

/// How a catalog listing is ordered.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::PriceAsc
    }
}

impl FromStr for SortOrder {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "name-asc" => Ok(Self::NameAsc),
            "name-desc" => Ok(Self::NameDesc),
            _ => bail!("no such sort order: {}", s),
        }
    }
}

/// Listings grow in pages of this many records.
pub const PAGE_SIZE: usize = 50;

/// A browse request over one category.
#[derive(Debug, Clone)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: SortOrder,
    /// 1-based. A listing at page `n` holds the first `n * PAGE_SIZE` matches.
    pub page: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search: None,
            min_price: None,
            max_price: None,
            sort: SortOrder::default(),
            page: 1,
        }
    }
}

impl CatalogQuery {
    /// Filter, sort and page `items`. Records without a positive price are never listed.
    pub fn apply<T: Component>(&self, items: Vec<T>) -> Vec<T> {
        let mut items: Vec<T> = items
            .into_iter()
            .filter(|item| item.price() > 0.0)
            .filter(|item| self.min_price.map_or(true, |min| item.price() >= min))
            .filter(|item| self.max_price.map_or(true, |max| item.price() <= max))
            .filter(|item| {
                self.search
                    .as_deref()
                    .map_or(true, |query| item.matches(query))
            })
            .collect();

        match self.sort {
            SortOrder::PriceAsc => items.sort_by(|a, b| a.price().total_cmp(&b.price())),
            SortOrder::PriceDesc => items.sort_by(|a, b| b.price().total_cmp(&a.price())),
            SortOrder::NameAsc => {
                items.sort_by_key(|item| item.name().to_lowercase());
            }
            SortOrder::NameDesc => {
                items.sort_by_key(|item| std::cmp::Reverse(item.name().to_lowercase()));
            }
        }

        items.truncate(self.page.max(1).saturating_mul(PAGE_SIZE));
        items
    }
}

#[cfg(test)]
mod tests {
    use super::{load_category, Catalog, CatalogQuery, FirebaseSource, SnapshotSource, SortOrder, PAGE_SIZE};
    use crate::schemas::components::{Category, Cpu, Memory, Monitor};
    use std::fs;

    fn snapshot() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("cpu.json"),
            r#"{
                "-Nx01": {"name": "AMD Ryzen 5 7600", "price": "229", "manufacturer": "AMD", "series": "AMD Ryzen 5"},
                "-Nx02": {"name": "Intel Core i5-13400F", "price": 199.99, "manufacturer": "Intel"},
                "-Nx03": "garbage"
            }"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("memory.json"),
            r#"[null, {"name": "Kingston Fury Beast 16GB", "price": 54.99, "modules": "2 x 8GB"}]"#,
        )
        .unwrap();
        dir
    }

    #[tokio::test]
    async fn test_snapshot_category() {
        let dir = snapshot();
        let source = SnapshotSource::new(dir.path());

        let cpus = load_category::<Cpu>(&source, None).await.unwrap();
        assert_eq!(cpus.len(), 2);
        assert_eq!(cpus[0].name, "AMD Ryzen 5 7600");
        assert_eq!(cpus[0].price, 229.0);

        let intel = load_category::<Cpu>(&source, Some("intel")).await.unwrap();
        assert_eq!(intel.len(), 1);
        assert_eq!(intel[0].price, 199.99);

        let memory = load_category::<Memory>(&source, None).await.unwrap();
        assert_eq!(memory.len(), 1);
        assert_eq!(memory[0].modules, "2 x 8GB");

        let monitors = load_category::<Monitor>(&source, None).await.unwrap();
        assert!(monitors.is_empty());
    }

    #[tokio::test]
    async fn test_full_catalog() {
        let dir = snapshot();
        let catalog = Catalog::load(&SnapshotSource::new(dir.path())).await.unwrap();
        assert_eq!(catalog.cpus.len(), 2);
        assert_eq!(catalog.memory.len(), 1);
        assert!(catalog.video_cards.is_empty());
        assert!(catalog.drives.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cpu.json"), "{ not json").unwrap();
        let result = load_category::<Cpu>(&SnapshotSource::new(dir.path()), None).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_firebase_urls() {
        let source =
            FirebaseSource::new("https://pc-builds-default-rtdb.firebaseio.com", None).unwrap();
        assert_eq!(
            source.url(Category::VideoCard).unwrap().as_str(),
            "https://pc-builds-default-rtdb.firebaseio.com/components/video-card.json"
        );

        let source =
            FirebaseSource::new("https://example.com/db", Some("secret".into())).unwrap();
        assert_eq!(
            source.url(Category::PowerSupply).unwrap().as_str(),
            "https://example.com/db/components/power-supply.json?auth=secret"
        );

        assert!(FirebaseSource::new("not a url", None).is_err());
    }

    fn cpu(name: &str, price: f64) -> Cpu {
        Cpu {
            name: name.into(),
            price,
            ..Default::default()
        }
    }

    #[test]
    fn test_query() {
        let cpus = vec![
            cpu("b", 300.0),
            cpu("A", 100.0),
            cpu("c", 0.0),
            cpu("d", 200.0),
        ];

        let names = |query: CatalogQuery| {
            query
                .apply(cpus.clone())
                .into_iter()
                .map(|c| c.name)
                .collect::<Vec<_>>()
        };

        assert_eq!(names(CatalogQuery::default()), vec!["A", "d", "b"]);
        assert_eq!(
            names(CatalogQuery {
                sort: SortOrder::PriceDesc,
                ..Default::default()
            }),
            vec!["b", "d", "A"]
        );
        assert_eq!(
            names(CatalogQuery {
                sort: SortOrder::NameAsc,
                ..Default::default()
            }),
            vec!["A", "b", "d"]
        );
        assert_eq!(
            names(CatalogQuery {
                sort: SortOrder::NameDesc,
                min_price: Some(150.0),
                max_price: Some(300.0),
                ..Default::default()
            }),
            vec!["d", "b"]
        );
    }

    #[test]
    fn test_paging() {
        let cpus: Vec<Cpu> = (1..=120).map(|i| cpu("x", f64::from(i))).collect();
        assert_eq!(CatalogQuery::default().apply(cpus.clone()).len(), PAGE_SIZE);
        let query = CatalogQuery {
            page: 3,
            ..Default::default()
        };
        assert_eq!(query.apply(cpus.clone()).len(), 120);

        let last = CatalogQuery {
            page: usize::MAX,
            ..Default::default()
        };
        assert_eq!(last.apply(cpus).len(), 120);
    }
}
