use serde::de::{Deserializer, Visitor};
use serde_with::DeserializeAs;
use std::{fmt, marker::PhantomData};

/// Convert something like "$312.03" or "1,299.99" to a number.
///
/// ## Example
/// ```txt
/// "$312.03" -> 312.03
/// "312.03"  -> 312.03
/// "1,299"   -> 1299.0
/// "4.5 GHz" -> 4.5
/// "8.8.4.4" -> None
/// ```
pub(crate) fn parse_number<T: AsRef<str>>(s: T) -> Option<f64> {
    s.as_ref()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect::<String>()
        .parse::<f64>()
        .ok()
}

/// Case-insensitive substring check. `needle` is expected to already be lowercase.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Numbers that can be recovered from loosely typed catalog data.
pub trait LenientNumber: Sized + Default {
    fn from_f64(v: f64) -> Option<Self>;
}

impl LenientNumber for f64 {
    fn from_f64(v: f64) -> Option<Self> {
        v.is_finite().then(|| v)
    }
}

impl LenientNumber for u32 {
    fn from_f64(v: f64) -> Option<Self> {
        (v.is_finite() && v >= 0.0 && v <= f64::from(u32::MAX)).then(|| v as u32)
    }
}

/// Accept a JSON number or a numeric string, falling back to zero.
///
/// Catalog snapshots were imported from CSV, so the same field can hold `129.99`,
/// `"129.99"`, `"$129.99"`, `""` or `null` depending on the row.
/// Non-finite results are also treated as zero.
pub struct Lenient<T>
where
    T: LenientNumber,
{
    _t: PhantomData<T>,
}

impl<'de, T> DeserializeAs<'de, T> for Lenient<T>
where
    T: LenientNumber,
{
    fn deserialize_as<D>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Helper<TT>
        where
            TT: LenientNumber,
        {
            _tt: PhantomData<TT>,
        }

        impl<'de, TT> Visitor<'de> for Helper<TT>
        where
            TT: LenientNumber,
        {
            type Value = TT;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or a numeric string")
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(TT::from_f64(v).unwrap_or_default())
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                self.visit_f64(v as f64)
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                self.visit_f64(v as f64)
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(parse_number(v).and_then(TT::from_f64).unwrap_or_default())
            }

            fn visit_bool<E>(self, _v: bool) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(TT::default())
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(TT::default())
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(TT::default())
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_any(self)
            }
        }

        deserializer.deserialize_any(Helper::<T> { _tt: PhantomData })
    }
}

/// A [`Lenient`] price. Negative amounts become zero.
pub struct Price;

impl<'de> DeserializeAs<'de, f64> for Price {
    fn deserialize_as<D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Lenient::<f64>::deserialize_as(deserializer).map(|price| price.max(0.0))
    }
}

/// Accept a string, or a scalar rendered as one. `null` becomes the empty string.
pub struct Text;

impl<'de> DeserializeAs<'de, String> for Text {
    fn deserialize_as<D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Helper;

        impl<'de> Visitor<'de> for Helper {
            type Value = String;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or a scalar")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(v.to_string())
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(v)
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(v.to_string())
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(v.to_string())
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(v.to_string())
            }

            fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(v.to_string())
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(String::new())
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(String::new())
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_any(self)
            }
        }

        deserializer.deserialize_any(Helper)
    }
}

/// Keep an image link only if it is an absolute URL. Anything else becomes `""`.
pub struct ImageLink;

impl<'de> DeserializeAs<'de, String> for ImageLink {
    fn deserialize_as<D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Text::deserialize_as(deserializer)?;
        if raw.is_empty() {
            return Ok(raw);
        }
        match reqwest::Url::parse(&raw) {
            Ok(url) => Ok(url.to_string()),
            Err(e) => {
                log::debug!("dropping invalid image link {:?}: {}", raw, e);
                Ok(String::new())
            }
        }
    }
}

/// A wrapped [`reqwest::Client`] shared by every remote catalog read.
pub struct Client(pub reqwest::Client);

impl Client {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self(
            reqwest::Client::builder()
                .user_agent(concat!("pcbuild/", env!("CARGO_PKG_VERSION")))
                .build()?,
        ))
    }
}
