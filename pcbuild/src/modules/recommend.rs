//! Tiered build suggestions for a usage preset.
//!
//! Each category is narrowed to parts that suit the preset and tier, sorted by
//! price, and one part is taken at the tier's quantile. Three neighbouring
//! offsets per tier give three nearby-priced variants.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    modules::{
        catalog::{Catalog, CatalogSource},
        socket::{resolve_cpu_socket, sockets_match},
    },
    schemas::{
        analysis::{Preset, SuggestedBuild, Tier},
        build::BuildConfiguration,
        components::{Component, Cpu, InternalHardDrive, Monitor, Motherboard},
    },
};

/// Suggestions produced when no count is given.
pub const DEFAULT_COUNT: usize = 9;

const OFFSETS: [isize; 3] = [-1, 0, 1];

lazy_static! {
    static ref MEMORY_MODULES: Regex = Regex::new(r"(?i)(\d+)\s*x\s*(\d+)\s*GB").unwrap();
    static ref CAPACITY: Regex = Regex::new(r"(?i)([\d.]+)\s*(TB|GB)").unwrap();
    static ref SSD: Regex = Regex::new(r"(?i)ssd").unwrap();
    static ref INTEGRATED_GRAPHICS: Regex = Regex::new(r"(?i)vega|radeon|uhd|iris").unwrap();
    static ref CPU_VENDOR: Regex = Regex::new(r"(?i)intel|amd").unwrap();
    static ref FULL_HD: Regex = Regex::new(r"(?i)1920x1080|1080p").unwrap();
    static ref HIGH_RES: Regex = Regex::new(r"(?i)2560x1440|3840x2160|1440p|4k").unwrap();
}

/// Total capacity of a memory kit described like `"2x16GB"`. Unparseable means 0.
pub(crate) fn memory_total_gb(modules: &str) -> u32 {
    MEMORY_MODULES
        .captures(modules)
        .and_then(|caps| {
            let count: u32 = caps.get(1)?.as_str().parse().ok()?;
            let size: u32 = caps.get(2)?.as_str().parse().ok()?;
            count.checked_mul(size)
        })
        .unwrap_or(0)
}

/// A drive capacity like `"1 TB"` or `"500GB"` in GB. Unparseable means 0.
pub(crate) fn capacity_gb(capacity: &str) -> f64 {
    CAPACITY
        .captures(capacity)
        .and_then(|caps| {
            let amount: f64 = caps.get(1)?.as_str().parse().ok()?;
            if caps.get(2)?.as_str().eq_ignore_ascii_case("tb") {
                Some(amount * 1024.0)
            } else {
                Some(amount)
            }
        })
        .unwrap_or(0.0)
}

fn has_integrated_graphics(cpu: &Cpu) -> bool {
    INTEGRATED_GRAPHICS.is_match(&cpu.graphics)
}

fn is_ssd_of_at_least(drive: &InternalHardDrive, gb: f64) -> bool {
    SSD.is_match(&drive.kind) && capacity_gb(&drive.capacity) >= gb
}

/// Sort `candidates` by price and take the one at the tier's quantile, moved by `offset`
/// and clamped to the list. Parts without a positive price are ignored.
pub(crate) fn pick<'a, T: Component>(
    candidates: Vec<&'a T>,
    tier: Tier,
    offset: isize,
) -> Option<&'a T> {
    let mut sorted: Vec<&T> = candidates.into_iter().filter(|c| c.price() > 0.0).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.price().total_cmp(&b.price()));

    let base = (sorted.len() as f64 * tier.quantile()).floor() as isize;
    let index = (base + offset).max(0).min(sorted.len() as isize - 1) as usize;
    Some(sorted[index])
}

fn pick_where<'a, T, F>(items: &'a [T], keep: F, tier: Tier, offset: isize) -> Option<&'a T>
where
    T: Component,
    F: Fn(&T) -> bool,
{
    pick(items.iter().filter(|i| keep(*i)).collect(), tier, offset)
}

/// Like [`pick_where`], but falls back to the whole category when nothing passes `keep`.
fn pick_or_any<'a, T, F>(items: &'a [T], keep: F, tier: Tier, offset: isize) -> Option<&'a T>
where
    T: Component,
    F: Fn(&T) -> bool,
{
    pick_where(items, keep, tier, offset).or_else(|| pick(items.iter().collect(), tier, offset))
}

fn pick_cpu(catalog: &Catalog, preset: Preset, tier: Tier, offset: isize) -> Option<&Cpu> {
    let cpus = &catalog.cpus;
    let high = tier.is_high();
    match preset {
        Preset::Gaming => {
            let (cores, boost) = if high { (8, 4.5) } else { (6, 4.0) };
            pick_or_any(
                cpus,
                |c| c.core_count >= cores && c.boost_clock >= boost,
                tier,
                offset,
            )
        }
        Preset::Creator => {
            let (cores, threads) = if high { (12, 20) } else { (8, 16) };
            pick_or_any(
                cpus,
                |c| c.core_count >= cores && c.thread_count >= threads,
                tier,
                offset,
            )
        }
        Preset::Office => pick_where(
            cpus,
            |c| c.core_count >= 4 && CPU_VENDOR.is_match(&c.manufacturer),
            tier,
            offset,
        )
        .or_else(|| pick_where(cpus, has_integrated_graphics, tier, offset))
        .or_else(|| pick(cpus.iter().collect(), tier, offset)),
        Preset::Budget => pick_where(cpus, has_integrated_graphics, tier, offset)
            .or_else(|| pick_or_any(cpus, |c| c.core_count >= 4, tier, offset)),
    }
}

/// Prefer boards whose socket matches the CPU. Without one, any board at the same
/// position is used, even if it does not fit.
fn pick_motherboard<'a>(
    catalog: &'a Catalog,
    cpu: Option<&Cpu>,
    tier: Tier,
    offset: isize,
) -> Option<&'a Motherboard> {
    let socket = cpu.and_then(|cpu| resolve_cpu_socket(&cpu.name, &cpu.microarchitecture));
    match socket {
        Some(socket) => pick_or_any(
            &catalog.motherboards,
            |board| sockets_match(&board.socket, socket),
            tier,
            offset,
        ),
        None => pick(catalog.motherboards.iter().collect(), tier, offset),
    }
}

fn pick_monitor(catalog: &Catalog, preset: Preset, tier: Tier, offset: isize) -> Option<&Monitor> {
    let monitors = &catalog.monitors;
    match preset {
        Preset::Gaming => {
            let refresh = if tier.is_high() { 144 } else { 120 };
            pick_or_any(monitors, |m| m.refresh_rate >= refresh, tier, offset)
        }
        Preset::Office => pick_or_any(
            monitors,
            |m| m.refresh_rate >= 60 && FULL_HD.is_match(&m.resolution),
            tier,
            offset,
        ),
        Preset::Creator => pick_or_any(
            monitors,
            |m| HIGH_RES.is_match(&m.resolution),
            tier,
            offset,
        ),
        Preset::Budget => pick(monitors.iter().collect(), tier, offset),
    }
}

/// Assemble one candidate build.
fn make_build(catalog: &Catalog, preset: Preset, tier: Tier, offset: isize) -> BuildConfiguration {
    let high = tier.is_high();

    let cpu = pick_cpu(catalog, preset, tier, offset);

    let video_card = match preset {
        Preset::Gaming | Preset::Creator => {
            let memory = match (preset, high) {
                (Preset::Creator, true) => 16.0,
                (Preset::Creator, false) | (_, true) => 12.0,
                _ => 8.0,
            };
            pick_or_any(&catalog.video_cards, |g| g.memory >= memory, tier, offset)
        }
        Preset::Office | Preset::Budget => None,
    };

    let memory_gb = match (preset, high) {
        (Preset::Creator, true) => 64,
        (Preset::Creator, false) | (_, true) => 32,
        _ => 16,
    };
    let memory = pick_or_any(
        &catalog.memory,
        |m| memory_total_gb(&m.modules) >= memory_gb,
        tier,
        offset,
    );

    let drive_gb = match (preset, high) {
        (Preset::Creator, true) => 2000.0,
        (Preset::Creator, false) | (_, true) => 1000.0,
        _ => 500.0,
    };
    let internal_hard_drive = pick_or_any(
        &catalog.drives,
        |d| is_ssd_of_at_least(d, drive_gb),
        tier,
        offset,
    );

    let (min_watts, max_watts) = match (preset, high) {
        (Preset::Gaming, true) => (750, u32::MAX),
        (Preset::Gaming, false) => (650, u32::MAX),
        (Preset::Creator, true) => (850, u32::MAX),
        (Preset::Creator, false) => (750, u32::MAX),
        (Preset::Office, true) => (450, 700),
        (Preset::Office, false) => (450, 600),
        (Preset::Budget, _) => (450, 650),
    };
    let power_supply = pick_or_any(
        &catalog.power_supplies,
        |p| p.wattage >= min_watts && p.wattage <= max_watts,
        tier,
        offset,
    );

    let monitor = pick_monitor(catalog, preset, tier, offset);
    let motherboard = pick_motherboard(catalog, cpu, tier, offset);
    // cases only follow the tier
    let case = pick(catalog.cases.iter().collect(), tier, 0);

    BuildConfiguration {
        cpu: cpu.cloned(),
        memory: memory.cloned(),
        motherboard: motherboard.cloned(),
        video_card: video_card.cloned(),
        case: case.cloned(),
        power_supply: power_supply.cloned(),
        internal_hard_drive: internal_hard_drive.cloned(),
        monitor: monitor.cloned(),
    }
}

fn suggest(
    catalog: &Catalog,
    preset: Preset,
    tier: Tier,
    offset: isize,
    label: String,
) -> Option<SuggestedBuild> {
    let config = make_build(catalog, preset, tier, offset);
    let total = config.total_price();
    if total.is_finite() && total > 0.0 {
        Some(SuggestedBuild {
            label,
            total,
            config,
        })
    } else {
        None
    }
}

/// Suggest up to `count` builds for `preset`, cheapest first.
///
/// Candidates are produced tier by tier (budget, mid, high) and offset by offset
/// within a tier, stopping once `count` are collected. If the full sweep falls
/// short, one default candidate per tier is added.
pub fn generate(catalog: &Catalog, preset: Preset, count: usize) -> Vec<SuggestedBuild> {
    let catalog = catalog.priced();
    let mut results = Vec::new();

    'tiers: for tier in Tier::ALL.iter() {
        for (i, offset) in OFFSETS.iter().enumerate() {
            let label = format!("{} - {} • Option {}", preset.title(), tier.label(), i + 1);
            if let Some(build) = suggest(&catalog, preset, *tier, *offset, label) {
                results.push(build);
            }
            if results.len() >= count {
                break 'tiers;
            }
        }
    }

    if results.len() < count {
        log::debug!(
            "only {} of {} {} builds, adding tier defaults",
            results.len(),
            count,
            preset
        );
        for tier in Tier::ALL.iter() {
            let label = format!("{} - {} • Fallback", preset.title(), tier.label());
            if let Some(build) = suggest(&catalog, preset, *tier, 0, label) {
                results.push(build);
            }
            if results.len() >= count {
                break;
            }
        }
    }

    results.sort_by(|a, b| a.total.total_cmp(&b.total));
    results.truncate(count);
    results
}

/// Load the full catalog from `source`, then [`generate`].
pub async fn generate_from(
    source: &dyn CatalogSource,
    preset: Preset,
    count: usize,
) -> anyhow::Result<Vec<SuggestedBuild>> {
    let catalog = Catalog::load(source).await?;
    Ok(generate(&catalog, preset, count))
}

#[cfg(test)]
mod tests {
    use super::{capacity_gb, generate, generate_from, memory_total_gb, pick, DEFAULT_COUNT};
    use crate::{
        modules::{
            catalog::{Catalog, SnapshotSource},
            socket::is_compatible,
        },
        schemas::{
            analysis::{Preset, SuggestedBuild, Tier},
            components::{
                Case, Cpu, InternalHardDrive, Memory, Monitor, Motherboard, PowerSupply, VideoCard,
            },
        },
    };

    fn cpu(
        name: &str,
        cores: u32,
        threads: u32,
        boost: f64,
        graphics: &str,
        microarchitecture: &str,
        price: f64,
    ) -> Cpu {
        Cpu {
            name: name.into(),
            core_count: cores,
            thread_count: threads,
            core_clock: boost - 1.0,
            boost_clock: boost,
            graphics: graphics.into(),
            microarchitecture: microarchitecture.into(),
            manufacturer: name.split_whitespace().next().unwrap_or_default().into(),
            price,
            ..Default::default()
        }
    }

    fn board(name: &str, socket: &str, price: f64) -> Motherboard {
        Motherboard {
            name: name.into(),
            socket: socket.into(),
            price,
            ..Default::default()
        }
    }

    fn gpu(name: &str, memory: f64, price: f64) -> VideoCard {
        VideoCard {
            name: name.into(),
            memory,
            price,
            ..Default::default()
        }
    }

    fn kit(name: &str, modules: &str, price: f64) -> Memory {
        Memory {
            name: name.into(),
            modules: modules.into(),
            price,
            ..Default::default()
        }
    }

    fn psu(wattage: u32, price: f64) -> PowerSupply {
        PowerSupply {
            name: format!("{}W PSU", wattage),
            wattage,
            price,
            ..Default::default()
        }
    }

    fn drive(name: &str, kind: &str, capacity: &str, price: f64) -> InternalHardDrive {
        InternalHardDrive {
            name: name.into(),
            kind: kind.into(),
            capacity: capacity.into(),
            price,
            ..Default::default()
        }
    }

    fn case(name: &str, price: f64) -> Case {
        Case {
            name: name.into(),
            price,
            ..Default::default()
        }
    }

    fn monitor(name: &str, resolution: &str, refresh_rate: u32, price: f64) -> Monitor {
        Monitor {
            name: name.into(),
            resolution: resolution.into(),
            refresh_rate,
            price,
            ..Default::default()
        }
    }

    fn catalog() -> Catalog {
        Catalog {
            cpus: vec![
                cpu("AMD Ryzen 9 7950X", 16, 32, 5.7, "Radeon", "Zen 4", 550.0),
                cpu("Intel Core i3-12100", 4, 8, 4.3, "Intel UHD Graphics 730", "Alder Lake", 110.0),
                cpu("AMD Ryzen 5 5600", 6, 12, 4.4, "", "Zen 3", 130.0),
                cpu("Intel Core i5-12400F", 6, 12, 4.4, "", "Alder Lake", 150.0),
                cpu("AMD Ryzen 5 7600X", 6, 12, 5.3, "Radeon", "Zen 4", 230.0),
                cpu("AMD Ryzen 7 7700X", 8, 16, 5.4, "Radeon", "Zen 4", 300.0),
                cpu("Intel Core i7-13700K", 16, 24, 5.4, "Intel UHD Graphics 770", "Raptor Lake", 400.0),
                cpu("Unpriced Chip", 64, 128, 6.0, "", "Zen 4", 0.0),
            ],
            motherboards: vec![
                board("MSI B550 Tomahawk", "AM4", 110.0),
                board("ASUS B650 Prime", "AM5", 180.0),
                board("Gigabyte B760 DS3H", "LGA1700", 140.0),
                board("ASUS X670E Hero", "AM5", 350.0),
                board("MSI Z790 Edge", "LGA1700", 300.0),
            ],
            video_cards: vec![
                gpu("AMD Radeon RX 6600", 8.0, 200.0),
                gpu("NVIDIA GeForce RTX 4060", 8.0, 300.0),
                gpu("NVIDIA GeForce RTX 4070", 12.0, 550.0),
                gpu("AMD Radeon RX 7900 XT", 20.0, 700.0),
                gpu("NVIDIA GeForce RTX 4090", 24.0, 1600.0),
            ],
            memory: vec![
                kit("Kingston Fury 16GB", "2 x 8GB", 50.0),
                kit("Corsair Vengeance 32GB DDR5", "2x16GB", 100.0),
                kit("G.Skill Trident 64GB", "2x32GB", 200.0),
            ],
            power_supplies: vec![
                psu(450, 50.0),
                psu(550, 60.0),
                psu(650, 80.0),
                psu(750, 100.0),
                psu(850, 130.0),
            ],
            drives: vec![
                drive("Samsung 980 1TB", "SSD", "1 TB", 70.0),
                drive("WD Black 2TB", "SSD", "2 TB", 130.0),
                drive("Seagate Barracuda 2TB", "7200RPM", "2 TB", 55.0),
                drive("Crucial P3 500GB", "SSD", "500GB", 45.0),
            ],
            cases: vec![case("Budget Case", 60.0), case("Mid Case", 90.0), case("Big Case", 150.0)],
            monitors: vec![
                monitor("AOC 24 75Hz", "1920x1080", 75, 130.0),
                monitor("LG 27GP850 165Hz", "2560x1440", 165, 300.0),
                monitor("ASUS 24 144Hz", "1920x1080", 144, 180.0),
                monitor("Dell U3223QE", "3840x2160", 60, 400.0),
            ],
        }
    }

    fn find<'a>(builds: &'a [SuggestedBuild], label: &str) -> &'a SuggestedBuild {
        builds
            .iter()
            .find(|b| b.label == label)
            .unwrap_or_else(|| panic!("no build labelled {:?}", label))
    }

    #[test]
    fn test_parsers() {
        assert_eq!(memory_total_gb("2x16GB"), 32);
        assert_eq!(memory_total_gb("2 x 8GB"), 16);
        assert_eq!(memory_total_gb("4x32 gb"), 128);
        assert_eq!(memory_total_gb("16GB"), 0);
        assert_eq!(memory_total_gb(""), 0);

        assert_eq!(capacity_gb("1 TB"), 1024.0);
        assert_eq!(capacity_gb("2TB"), 2048.0);
        assert_eq!(capacity_gb("500GB"), 500.0);
        assert_eq!(capacity_gb("1.5 tb"), 1536.0);
        assert_eq!(capacity_gb("unknown"), 0.0);
    }

    #[test]
    fn test_spaced_module_strings_pass_memory_filter() {
        let catalog = Catalog {
            memory: vec![
                kit("Spaced 2 x 8GB", "2 x 8GB", 60.0),
                kit("Compact 2x8GB", "2x8GB", 70.0),
                kit("Single 16GB", "16GB", 40.0),
                kit("Half 1x8GB", "1x8GB", 30.0),
            ],
            ..Default::default()
        };

        // the 16 GB budget filter admits both spellings of a 2 x 8 GB kit, nothing else
        let builds = generate(&catalog, Preset::Gaming, 3);
        let memory = |label: &str| {
            find(&builds, label)
                .config
                .memory
                .as_ref()
                .unwrap()
                .name
                .clone()
        };
        assert_eq!(memory("Gaming - Budget • Option 1"), "Spaced 2 x 8GB");
        assert_eq!(memory("Gaming - Budget • Option 2"), "Spaced 2 x 8GB");
        assert_eq!(memory("Gaming - Budget • Option 3"), "Compact 2x8GB");
    }

    #[test]
    fn test_pick() {
        let cases: Vec<Case> = [7.0, 3.0, 10.0, 1.0, 5.0, 2.0, 9.0, 4.0, 8.0, 6.0, 0.0]
            .iter()
            .map(|p| case("c", *p))
            .collect();
        let price = |tier: Tier, offset: isize| {
            pick(cases.iter().collect(), tier, offset).map(|c| c.price)
        };

        // ten priced cases: indices 1, 5 and 8
        assert_eq!(price(Tier::Budget, 0), Some(2.0));
        assert_eq!(price(Tier::Budget, -1), Some(1.0));
        assert_eq!(price(Tier::Budget, 1), Some(3.0));
        assert_eq!(price(Tier::Mid, 0), Some(6.0));
        assert_eq!(price(Tier::High, 0), Some(9.0));
        assert_eq!(price(Tier::High, 1), Some(10.0));
        assert_eq!(price(Tier::High, 5), Some(10.0));
        assert_eq!(price(Tier::Budget, -5), Some(1.0));

        let one = vec![case("only", 42.0)];
        assert_eq!(pick(one.iter().collect(), Tier::High, 1).unwrap().price, 42.0);

        let none: Vec<&Case> = Vec::new();
        assert!(pick(none, Tier::Mid, 0).is_none());
        assert!(pick(vec![&case("free", 0.0)], Tier::Mid, 0).is_none());
    }

    #[test]
    fn test_invariants_for_every_preset() {
        let catalog = catalog();
        for preset in Preset::ALL.iter() {
            let builds = generate(&catalog, *preset, DEFAULT_COUNT);
            assert_eq!(builds.len(), DEFAULT_COUNT);

            for pair in builds.windows(2) {
                assert!(pair[0].total <= pair[1].total);
            }

            for build in builds.iter() {
                assert_eq!(build.total, build.config.total_price());
                assert!(build.total > 0.0);
                assert_eq!(build.config.video_card.is_some(), preset.wants_discrete_gpu());
                assert!(is_compatible(
                    build.config.cpu.as_ref(),
                    build.config.motherboard.as_ref()
                ));
                assert_ne!(build.config.cpu.as_ref().unwrap().name, "Unpriced Chip");
            }
        }
    }

    #[test]
    fn test_gaming_high_end() {
        let builds = generate(&catalog(), Preset::Gaming, DEFAULT_COUNT);

        // cores >= 8 and boost >= 4.5: 7700X, 13700K, 7950X
        let top = find(&builds, "Gaming - High-end • Option 2");
        assert_eq!(top.config.cpu.as_ref().unwrap().name, "AMD Ryzen 9 7950X");
        assert_eq!(top.config.motherboard.as_ref().unwrap().socket, "AM5");
        assert_eq!(
            top.config.video_card.as_ref().unwrap().name,
            "NVIDIA GeForce RTX 4090"
        );
        assert_eq!(top.config.case.as_ref().unwrap().name, "Big Case");

        let lower = find(&builds, "Gaming - High-end • Option 1");
        assert_eq!(lower.config.cpu.as_ref().unwrap().name, "Intel Core i7-13700K");
        assert_eq!(lower.config.motherboard.as_ref().unwrap().socket, "LGA1700");
        // the case ignores the offset
        assert_eq!(lower.config.case.as_ref().unwrap().name, "Big Case");
    }

    #[test]
    fn test_office_mid_range() {
        let builds = generate(&catalog(), Preset::Office, DEFAULT_COUNT);
        let build = find(&builds, "Office - Mid-range • Option 2");
        assert_eq!(build.config.cpu.as_ref().unwrap().name, "AMD Ryzen 5 7600X");
        assert!(build.config.video_card.is_none());
        assert_eq!(build.config.power_supply.as_ref().unwrap().wattage, 550);
        assert_eq!(build.config.monitor.as_ref().unwrap().name, "ASUS 24 144Hz");
    }

    #[test]
    fn test_budget_prefers_integrated_graphics() {
        let builds = generate(&catalog(), Preset::Budget, DEFAULT_COUNT);
        let build = find(&builds, "Budget - Budget • Option 2");
        assert_eq!(build.config.cpu.as_ref().unwrap().name, "Intel Core i3-12100");
        assert_eq!(build.config.motherboard.as_ref().unwrap().socket, "LGA1700");
        assert!(build.config.video_card.is_none());
    }

    #[test]
    fn test_mismatched_board_beats_no_board() {
        let mut catalog = catalog();
        catalog.motherboards = vec![board("MSI B550 Tomahawk", "AM4", 110.0)];
        catalog.cpus = vec![cpu("Intel Core i5-12400F", 6, 12, 4.4, "", "Alder Lake", 150.0)];

        for build in generate(&catalog, Preset::Gaming, DEFAULT_COUNT) {
            assert_eq!(build.config.motherboard.as_ref().unwrap().socket, "AM4");
            assert!(!is_compatible(
                build.config.cpu.as_ref(),
                build.config.motherboard.as_ref()
            ));
        }
    }

    #[test]
    fn test_count() {
        let catalog = catalog();

        let three = generate(&catalog, Preset::Creator, 3);
        assert_eq!(three.len(), 3);
        assert!(three.iter().all(|b| b.label.starts_with("Creator - Budget")));

        let twelve = generate(&catalog, Preset::Creator, 12);
        assert_eq!(twelve.len(), 12);
        assert_eq!(
            twelve.iter().filter(|b| b.label.ends_with("• Fallback")).count(),
            3
        );

        assert!(generate(&catalog, Preset::Creator, 0).is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        assert!(generate(&Catalog::default(), Preset::Gaming, DEFAULT_COUNT).is_empty());
    }

    #[tokio::test]
    async fn test_generate_from_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("case.json"),
            r#"{"a": {"name": "Only Case", "price": "75"}}"#,
        )
        .unwrap();

        let builds = generate_from(&SnapshotSource::new(dir.path()), Preset::Office, 2)
            .await
            .unwrap();
        assert_eq!(builds.len(), 2);
        assert!(builds.iter().all(|b| b.total == 75.0));
    }
}
