use anyhow::bail;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};
use std::{fmt::Display, str::FromStr};

use crate::common::{contains_ci, ImageLink, Lenient, Price, Text};

/// One of the eight slots of a build, and the catalog that fills it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Cpu,
    Memory,
    Motherboard,
    VideoCard,
    Case,
    PowerSupply,
    InternalHardDrive,
    Monitor,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Self::Cpu,
        Self::Memory,
        Self::Motherboard,
        Self::VideoCard,
        Self::Case,
        Self::PowerSupply,
        Self::InternalHardDrive,
        Self::Monitor,
    ];

    /// The key of this category under `components/` in the remote store.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Memory => "memory",
            Self::Motherboard => "motherboard",
            Self::VideoCard => "video-card",
            Self::Case => "case",
            Self::PowerSupply => "power-supply",
            Self::InternalHardDrive => "internal-hard-drive",
            Self::Monitor => "monitor",
        }
    }

    /// The slot name used in a serialized [`BuildConfiguration`](crate::schemas::build::BuildConfiguration).
    pub fn slot(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Memory => "memory",
            Self::Motherboard => "motherboard",
            Self::VideoCard => "videoCard",
            Self::Case => "case",
            Self::PowerSupply => "powerSupply",
            Self::InternalHardDrive => "internalHardDrive",
            Self::Monitor => "monitor",
        }
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        match Self::ALL
            .iter()
            .find(|c| c.path().eq_ignore_ascii_case(wanted) || c.slot().eq_ignore_ascii_case(wanted))
        {
            Some(category) => Ok(*category),
            None => bail!("no such component category: {}", s),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Behaviour shared by every catalog record.
pub trait Component {
    fn category() -> Category
    where
        Self: Sized;

    fn name(&self) -> &str;

    fn price(&self) -> f64;

    /// Free-text search over the fields a user would type for this category.
    /// `query` is matched case-insensitively.
    fn matches(&self, query: &str) -> bool;
}

/// Lowercases `query` once and checks it against each of `fields`.
fn any_field_matches(query: &str, fields: &[&str]) -> bool {
    let query = query.to_lowercase();
    fields.iter().any(|field| contains_ci(field, &query))
}

macro_rules! impl_component {
    ($t:ident, $category:ident, [$($field:ident),+]) => {
        impl Component for $t {
            fn category() -> Category {
                Category::$category
            }

            fn name(&self) -> &str {
                &self.name
            }

            fn price(&self) -> f64 {
                self.price
            }

            fn matches(&self, query: &str) -> bool {
                any_field_matches(query, &[$(self.$field.as_str()),+])
            }
        }
    };
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Cpu {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub name: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Price>")]
    pub price: f64,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Lenient<u32>>")]
    pub core_count: u32,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Lenient<u32>>")]
    pub thread_count: u32,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Lenient<f64>>")]
    pub core_clock: f64,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Lenient<f64>>")]
    pub boost_clock: f64,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Lenient<u32>>")]
    pub tdp: u32,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub microarchitecture: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub graphics: String,
    #[serde(default, rename = "link_image")]
    #[serde_as(deserialize_as = "DefaultOnError<ImageLink>")]
    pub image_link: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub manufacturer: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub series: String,
}

impl_component!(Cpu, Cpu, [name, manufacturer, series]);

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Memory {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub name: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Price>")]
    pub price: f64,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub speed: String,
    /// Module layout such as `"2 x 16GB"`, which also encodes total capacity.
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub modules: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Lenient<f64>>")]
    pub cas_latency: f64,
    #[serde(default, rename = "link_image")]
    #[serde_as(deserialize_as = "DefaultOnError<ImageLink>")]
    pub image_link: String,
}

impl_component!(Memory, Memory, [name, speed, modules]);

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Motherboard {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub name: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Price>")]
    pub price: f64,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub socket: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub form_factor: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Lenient<u32>>")]
    pub max_memory: u32,
    #[serde(default, rename = "link_image")]
    #[serde_as(deserialize_as = "DefaultOnError<ImageLink>")]
    pub image_link: String,
}

impl_component!(Motherboard, Motherboard, [name, socket, form_factor]);

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct VideoCard {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub name: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Price>")]
    pub price: f64,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub chipset: String,
    /// Video memory in GB.
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Lenient<f64>>")]
    pub memory: f64,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Lenient<f64>>")]
    pub core_clock: f64,
    #[serde(default, rename = "link_image")]
    #[serde_as(deserialize_as = "DefaultOnError<ImageLink>")]
    pub image_link: String,
}

impl_component!(VideoCard, VideoCard, [name, chipset]);

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Case {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub name: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Price>")]
    pub price: f64,
    #[serde(default, rename = "type")]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub kind: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub color: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub psu: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub side_panel: String,
    #[serde(default, rename = "link_image")]
    #[serde_as(deserialize_as = "DefaultOnError<ImageLink>")]
    pub image_link: String,
}

impl_component!(Case, Case, [name, kind, color]);

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct PowerSupply {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub name: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Price>")]
    pub price: f64,
    #[serde(default, rename = "type")]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub kind: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub efficiency: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Lenient<u32>>")]
    pub wattage: u32,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub modular: String,
    #[serde(default, rename = "link_image")]
    #[serde_as(deserialize_as = "DefaultOnError<ImageLink>")]
    pub image_link: String,
}

impl_component!(PowerSupply, PowerSupply, [name, kind, efficiency]);

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct InternalHardDrive {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub name: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Price>")]
    pub price: f64,
    /// Capacity such as `"1 TB"` or `"500GB"`.
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub capacity: String,
    #[serde(default, rename = "type")]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub kind: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub cache: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub form_factor: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub interface: String,
    #[serde(default, rename = "link_image")]
    #[serde_as(deserialize_as = "DefaultOnError<ImageLink>")]
    pub image_link: String,
}

impl_component!(InternalHardDrive, InternalHardDrive, [name, kind, capacity]);

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Monitor {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub name: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Price>")]
    pub price: f64,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub resolution: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub size: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Lenient<u32>>")]
    pub refresh_rate: u32,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub response_time: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError<Text>")]
    pub panel_type: String,
    #[serde(default, rename = "link_image")]
    #[serde_as(deserialize_as = "DefaultOnError<ImageLink>")]
    pub image_link: String,
}

impl_component!(Monitor, Monitor, [name, resolution, panel_type]);
