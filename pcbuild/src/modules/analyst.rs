//! Heuristic analysis of a build: performance, compatibility, power draw and value.
//!
//! Everything here is a pure function of the [`BuildConfiguration`].

use std::convert::TryFrom;

use crate::{
    common::contains_ci,
    schemas::{
        analysis::{
            AnalysisResult, CompatibilityResult, CompatibilityStatus, PerformanceScore,
            PowerConsumption, PsuRating,
        },
        build::BuildConfiguration,
        components::{Memory, VideoCard},
    },
};

/// Idle draw of board, fans and peripherals.
const BASE_POWER: u32 = 100;
const DEFAULT_CPU_TDP: u32 = 65;
const DEFAULT_GPU_POWER: u32 = 150;
const MEMORY_POWER: u32 = 10;
const STORAGE_POWER: u32 = 10;
const MONITOR_POWER: u32 = 30;

/// A GPU recognised by name.
struct GpuModel {
    keyword: &'static str,
    /// Replaces the memory-tier score when set.
    score: Option<f64>,
    watts: u32,
}

/// Evaluated top to bottom, first match wins.
const GPU_MODELS: &[GpuModel] = &[
    GpuModel {
        keyword: "rtx 4090",
        score: Some(100.0),
        watts: 450,
    },
    GpuModel {
        keyword: "rtx 4080",
        score: Some(95.0),
        watts: 320,
    },
    GpuModel {
        keyword: "rtx 4070",
        score: Some(85.0),
        watts: 200,
    },
    GpuModel {
        keyword: "rtx 3080",
        score: Some(80.0),
        watts: 320,
    },
    GpuModel {
        keyword: "rtx 3070",
        score: Some(75.0),
        watts: 220,
    },
    GpuModel {
        keyword: "rtx 3060",
        score: None,
        watts: 170,
    },
    GpuModel {
        keyword: "gtx",
        score: None,
        watts: 150,
    },
];

/// `(minimum GB of video memory, score)`, largest first.
const GPU_MEMORY_TIERS: &[(f64, f64)] = &[(12.0, 90.0), (8.0, 75.0), (6.0, 60.0), (4.0, 45.0)];
const GPU_MEMORY_FALLBACK: f64 = 30.0;

/// `(name keywords, score)`, largest capacity first.
const MEMORY_NAME_TIERS: &[(&[&str], f64)] = &[
    (&["32gb", "32 gb"], 90.0),
    (&["16gb", "16 gb"], 75.0),
    (&["8gb", "8 gb"], 60.0),
];
const MEMORY_NAME_FALLBACK: f64 = 40.0;

/// Analyze a build.
pub fn analyze(config: &BuildConfiguration) -> AnalysisResult {
    let performance = analyze_performance(config);
    let compatibility = analyze_compatibility(config);
    let power_consumption = analyze_power_consumption(config);
    let price_efficiency = analyze_price_efficiency(config);
    let recommendations = generate_recommendations(config, &performance, &compatibility);

    let overall_score = overall_score(&performance, compatibility.status, price_efficiency);

    log::debug!(
        "analyzed build with {} parts: overall {}, {:?}",
        config.part_count(),
        overall_score,
        compatibility.status
    );

    AnalysisResult {
        overall_score,
        performance,
        compatibility,
        power_consumption,
        price_efficiency,
        recommendations,
    }
}

/// Round and clamp into `0..=100`. NaN ends up as 0.
fn clamp_score(x: f64) -> u32 {
    x.round().max(0.0).min(100.0) as u32
}

fn gpu_model(gpu: &VideoCard) -> Option<&'static GpuModel> {
    let name = gpu.name.to_lowercase();
    GPU_MODELS.iter().find(|model| name.contains(model.keyword))
}

fn gpu_score(gpu: &VideoCard) -> f64 {
    gpu_model(gpu)
        .and_then(|model| model.score)
        .unwrap_or_else(|| {
            GPU_MEMORY_TIERS
                .iter()
                .find(|(min, _)| gpu.memory >= *min)
                .map(|(_, score)| *score)
                .unwrap_or(GPU_MEMORY_FALLBACK)
        })
}

fn gpu_power(gpu: &VideoCard) -> u32 {
    gpu_model(gpu)
        .map(|model| model.watts)
        .unwrap_or(DEFAULT_GPU_POWER)
}

/// Memory is tiered by the capacity written in its name, not by `modules`.
fn memory_score(memory: &Memory) -> f64 {
    let name = memory.name.to_lowercase();
    MEMORY_NAME_TIERS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| name.contains(k)))
        .map(|(_, score)| *score)
        .unwrap_or(MEMORY_NAME_FALLBACK)
}

fn analyze_performance(config: &BuildConfiguration) -> PerformanceScore {
    let mut gaming = 0.0;
    let mut workstation = 0.0;
    let mut general = 0.0;

    if let Some(cpu) = &config.cpu {
        let core_score = (f64::from(cpu.core_count) * 8.0).min(100.0);
        let clock_score = (cpu.core_clock / 3000.0 * 60.0).min(60.0);

        general += core_score * 0.4 + clock_score * 0.3;
        workstation += core_score * 0.5 + clock_score * 0.3;
        gaming += (core_score * 0.3 + clock_score * 0.4).min(70.0);
    }

    if let Some(gpu) = &config.video_card {
        let score = gpu_score(gpu);
        gaming += score * 0.7;
        workstation += score * 0.4;
        general += score * 0.3;
    }

    if let Some(memory) = &config.memory {
        let score = memory_score(memory);
        gaming += score * 0.2;
        workstation += score * 0.3;
        general += score * 0.3;
    }

    PerformanceScore {
        gaming: clamp_score(gaming),
        workstation: clamp_score(workstation),
        general: clamp_score(general),
    }
}

/// Estimated whole-system draw in watts. Saturates at `u32::MAX`.
pub fn estimate_power(config: &BuildConfiguration) -> u32 {
    let mut total = BASE_POWER;

    if let Some(cpu) = &config.cpu {
        total = total.saturating_add(if cpu.tdp > 0 { cpu.tdp } else { DEFAULT_CPU_TDP });
    }
    if let Some(gpu) = &config.video_card {
        total = total.saturating_add(gpu_power(gpu));
    }
    if config.memory.is_some() {
        total = total.saturating_add(MEMORY_POWER);
    }
    if config.internal_hard_drive.is_some() {
        total = total.saturating_add(STORAGE_POWER);
    }
    if config.monitor.is_some() {
        total = total.saturating_add(MONITOR_POWER);
    }

    total
}

/// `ceil(watts * tenths / 10)` without going through floating point. Saturates at `u32::MAX`.
fn scale_up(watts: u32, tenths: u32) -> u32 {
    let scaled = (u64::from(watts) * u64::from(tenths) + 9) / 10;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Whether `psu_watts` is at least `tenths / 10` times the estimated draw.
fn psu_covers(psu_watts: u32, estimated: u32, tenths: u32) -> bool {
    u64::from(psu_watts) * 10 >= u64::from(estimated) * u64::from(tenths)
}

/// Whether `psu_watts` falls short of 1.2x the estimated draw.
fn psu_underprovisioned(psu_watts: u32, estimated: u32) -> bool {
    !psu_covers(psu_watts, estimated, 12)
}

fn analyze_compatibility(config: &BuildConfiguration) -> CompatibilityResult {
    let mut result = CompatibilityResult::default();

    if let Some(psu) = &config.power_supply {
        if config.cpu.is_some() || config.video_card.is_some() {
            let estimated = estimate_power(config);
            if psu_underprovisioned(psu.wattage, estimated) {
                result.flag(
                    CompatibilityStatus::Warning,
                    format!(
                        "The {}W PSU may be insufficient for the system (recommended: {}W)",
                        psu.wattage,
                        scale_up(estimated, 12)
                    ),
                );
            }
        }
    }

    if let (Some(memory), Some(motherboard)) = (&config.memory, &config.motherboard) {
        if contains_ci(&memory.name, "ddr5") && !contains_ci(&motherboard.name, "ddr5") {
            result.flag(
                CompatibilityStatus::Warning,
                "DDR5 RAM may not be compatible with this motherboard".to_string(),
            );
        }
    }

    result
}

fn analyze_power_consumption(config: &BuildConfiguration) -> PowerConsumption {
    let estimated = estimate_power(config);
    let recommended = scale_up(estimated, 13);

    let mut recommendation = format!("Recommended PSU: {}W or higher", recommended);

    let rating = config.power_supply.as_ref().map(|psu| {
        let rating = if psu.wattage >= recommended {
            PsuRating::Good
        } else if psu_covers(psu.wattage, estimated, 11) {
            PsuRating::Acceptable
        } else {
            PsuRating::Insufficient
        };
        recommendation += &format!(" (Current PSU {}W - {})", psu.wattage, rating);
        rating
    });

    PowerConsumption {
        estimated,
        recommended,
        recommendation,
        rating,
    }
}

/// A relative value-for-money figure. Parts without a positive price are left out.
fn analyze_price_efficiency(config: &BuildConfiguration) -> u32 {
    let mut value = 0.0;

    if let Some(cpu) = config.cpu.as_ref().filter(|cpu| cpu.price > 0.0) {
        value += f64::from(cpu.core_count) * cpu.core_clock / cpu.price * 1000.0;
    }
    if let Some(gpu) = config.video_card.as_ref().filter(|gpu| gpu.price > 0.0) {
        value += gpu.memory * gpu.core_clock / gpu.price * 100.0;
    }

    clamp_score(value / 100.0)
}

fn generate_recommendations(
    config: &BuildConfiguration,
    performance: &PerformanceScore,
    compatibility: &CompatibilityResult,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if performance.gaming < 60 && config.video_card.is_some() {
        recommendations.push("Upgrade the graphics card to improve gaming performance".to_string());
    }

    if performance.workstation < 60 && config.cpu.is_some() {
        recommendations.push("Consider a CPU with more cores for workstation tasks".to_string());
    }

    if config
        .memory
        .as_ref()
        .map_or(true, |memory| contains_ci(&memory.name, "8gb"))
    {
        recommendations.push("Upgrade RAM to 16GB or 32GB to ensure performance".to_string());
    }

    if compatibility.status == CompatibilityStatus::Incompatible {
        recommendations.push("Re-check compatibility between components".to_string());
    }

    if let Some(psu) = &config.power_supply {
        if psu_underprovisioned(psu.wattage, estimate_power(config)) {
            recommendations.push("Upgrade the power supply to ensure system stability".to_string());
        }
    }

    if config.internal_hard_drive.is_none() {
        recommendations.push("Add an SSD to improve system speed".to_string());
    }

    if let (Some(cpu), Some(gpu)) = (&config.cpu, &config.video_card) {
        if gpu.price > cpu.price * 2.0 {
            recommendations
                .push("The CPU may bottleneck the GPU; consider upgrading the CPU".to_string());
        } else if cpu.price > gpu.price * 2.0 {
            recommendations.push("The GPU may not fully utilize the CPU capability".to_string());
        }
    }

    recommendations
}

fn overall_score(
    performance: &PerformanceScore,
    status: CompatibilityStatus,
    price_efficiency: u32,
) -> u32 {
    let compatibility = match status {
        CompatibilityStatus::Compatible => 30.0,
        CompatibilityStatus::Warning => 20.0,
        CompatibilityStatus::Incompatible => 10.0,
    };

    clamp_score(performance.average() * 0.5 + compatibility + f64::from(price_efficiency) * 0.2)
}
