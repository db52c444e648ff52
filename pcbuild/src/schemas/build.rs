use serde::{Deserialize, Serialize};

use crate::schemas::components::{
    Case, Component, Cpu, InternalHardDrive, Memory, Monitor, Motherboard, PowerSupply, VideoCard,
};

/// A PC build: at most one component per category, any slot may be empty.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfiguration {
    #[serde(default)]
    pub cpu: Option<Cpu>,
    #[serde(default)]
    pub memory: Option<Memory>,
    #[serde(default)]
    pub motherboard: Option<Motherboard>,
    #[serde(default)]
    pub video_card: Option<VideoCard>,
    #[serde(default)]
    pub case: Option<Case>,
    #[serde(default)]
    pub power_supply: Option<PowerSupply>,
    #[serde(default)]
    pub internal_hard_drive: Option<InternalHardDrive>,
    #[serde(default)]
    pub monitor: Option<Monitor>,
}

impl BuildConfiguration {
    /// Every filled slot, in slot order.
    pub fn parts(&self) -> Vec<&dyn Component> {
        let mut parts: Vec<&dyn Component> = Vec::with_capacity(8);
        if let Some(p) = &self.cpu {
            parts.push(p);
        }
        if let Some(p) = &self.memory {
            parts.push(p);
        }
        if let Some(p) = &self.motherboard {
            parts.push(p);
        }
        if let Some(p) = &self.video_card {
            parts.push(p);
        }
        if let Some(p) = &self.case {
            parts.push(p);
        }
        if let Some(p) = &self.power_supply {
            parts.push(p);
        }
        if let Some(p) = &self.internal_hard_drive {
            parts.push(p);
        }
        if let Some(p) = &self.monitor {
            parts.push(p);
        }
        parts
    }

    pub fn part_count(&self) -> usize {
        self.parts().len()
    }

    pub fn is_empty(&self) -> bool {
        self.part_count() == 0
    }

    /// Sum of the prices of all present components. Empty slots and non-finite prices count as 0.
    pub fn total_price(&self) -> f64 {
        self.parts()
            .iter()
            .map(|p| p.price())
            .filter(|price| price.is_finite())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::BuildConfiguration;
    use crate::{
        common::tests::roughly_equal,
        schemas::components::{Cpu, Monitor},
    };

    #[test]
    fn test_total_price() {
        let config = BuildConfiguration {
            cpu: Some(Cpu {
                name: "Intel Core i5-12400F".into(),
                price: 149.99,
                ..Default::default()
            }),
            monitor: Some(Monitor {
                name: "Dell S2721DGF".into(),
                price: 299.0,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(config.part_count(), 2);
        assert!(roughly_equal(config.total_price(), 448.99));
        assert_eq!(BuildConfiguration::default().total_price(), 0.0);
        assert!(BuildConfiguration::default().is_empty());
    }

    #[test]
    fn test_slot_names() {
        let config: BuildConfiguration = serde_json::from_str(
            r#"{"cpu": null, "videoCard": {"name": "RTX 4070", "price": "599"}, "powerSupply": null}"#,
        )
        .unwrap();
        assert_eq!(config.video_card.as_ref().unwrap().price, 599.0);
        assert!(config.internal_hard_drive.is_none());

        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("internalHardDrive").unwrap().is_null());
        assert_eq!(json["videoCard"]["name"], "RTX 4070");
    }
}
