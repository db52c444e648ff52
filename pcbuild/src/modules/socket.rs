//! CPU socket resolution and CPU/motherboard compatibility.
//!
//! Catalog CPUs do not carry a socket, so it is derived: first from the
//! microarchitecture, then from keywords in the product name.

use lazy_static::lazy_static;
use maplit::hashmap;
use serde::Serialize;
use std::collections::HashMap;

use crate::schemas::components::{Cpu, Motherboard};

lazy_static! {
    static ref MICROARCHITECTURE_SOCKETS: HashMap<&'static str, &'static str> = hashmap! {
        "Zen" => "AM4",
        "Zen+" => "AM4",
        "Zen 2" => "AM4",
        "Zen 3" => "AM4",
        "Zen 4" => "AM5",
        "Zen 5" => "AM5",
        "Alder Lake" => "LGA1700",
        "Raptor Lake" => "LGA1700",
        "Raptor Lake Refresh" => "LGA1700",
        "Arrow Lake" => "LGA1851",
        "Rocket Lake" => "LGA1200",
        "Comet Lake" => "LGA1200",
        "Coffee Lake" => "LGA1151",
        "Coffee Lake Refresh" => "LGA1151",
        "Kaby Lake" => "LGA1151",
        "Skylake" => "LGA1151",
        "Haswell" => "LGA1150",
        "Haswell Refresh" => "LGA1150",
        "Broadwell" => "LGA2011-3",
        "Sandy Bridge" => "LGA1155",
        "Ivy Bridge" => "LGA1155",
    };
}

/// A keyword rule over a lowercased CPU name.
struct NameRule {
    /// Every one of these must appear.
    all: &'static [&'static str],
    /// At least one of these must appear. Empty means no constraint.
    any: &'static [&'static str],
    socket: &'static str,
}

impl NameRule {
    fn matches(&self, name: &str) -> bool {
        self.all.iter().all(|k| name.contains(k))
            && (self.any.is_empty() || self.any.iter().any(|k| name.contains(k)))
    }
}

/// Evaluated top to bottom, first match wins.
const NAME_RULES: &[NameRule] = &[
    NameRule {
        all: &["threadripper"],
        any: &["3"],
        socket: "sTRX4",
    },
    NameRule {
        all: &["threadripper"],
        any: &[],
        socket: "sTR4",
    },
    NameRule {
        all: &["ryzen"],
        any: &["9", "8"],
        socket: "AM5",
    },
    NameRule {
        all: &["ryzen"],
        any: &["7000", "8000", "9000"],
        socket: "AM5",
    },
    NameRule {
        all: &["ryzen"],
        any: &["5000", "3000"],
        socket: "AM4",
    },
    NameRule {
        all: &["core ultra"],
        any: &[],
        socket: "LGA1851",
    },
    NameRule {
        all: &["core i"],
        any: &["14", "13", "12"],
        socket: "LGA1700",
    },
    NameRule {
        all: &["core i"],
        any: &["11", "10"],
        socket: "LGA1200",
    },
    NameRule {
        all: &["core i"],
        any: &["9", "8", "7", "6"],
        socket: "LGA1151",
    },
    NameRule {
        all: &["core i"],
        any: &["4"],
        socket: "LGA1150",
    },
];

/// Work out which socket a CPU uses.
///
/// An exact microarchitecture match wins. Otherwise the name is checked against
/// keyword rules. `None` means the CPU is not recognised.
pub fn resolve_cpu_socket(name: &str, microarchitecture: &str) -> Option<&'static str> {
    if let Some(socket) = MICROARCHITECTURE_SOCKETS.get(microarchitecture) {
        return Some(*socket);
    }

    let name = name.to_lowercase();
    NAME_RULES
        .iter()
        .find(|rule| rule.matches(&name))
        .map(|rule| rule.socket)
}

/// Socket identifiers compare case-insensitively, ignoring surrounding whitespace.
pub fn sockets_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Whether `cpu` fits `motherboard`.
///
/// Missing parts or sockets that cannot be determined never block a build, so
/// those cases report `true`.
pub fn is_compatible(cpu: Option<&Cpu>, motherboard: Option<&Motherboard>) -> bool {
    SocketCheck::new(cpu, motherboard).compatible
}

/// The outcome of a socket comparison, with both sides as they were resolved.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SocketCheck {
    pub cpu_socket: Option<String>,
    pub motherboard_socket: Option<String>,
    pub compatible: bool,
}

impl SocketCheck {
    pub fn new(cpu: Option<&Cpu>, motherboard: Option<&Motherboard>) -> Self {
        let cpu_socket =
            cpu.and_then(|cpu| resolve_cpu_socket(&cpu.name, &cpu.microarchitecture));
        let motherboard_socket = motherboard
            .map(|board| board.socket.as_str())
            .filter(|socket| !socket.trim().is_empty());

        let compatible = match (cpu_socket, motherboard_socket) {
            (Some(a), Some(b)) => sockets_match(a, b),
            _ => true,
        };

        Self {
            cpu_socket: cpu_socket.map(str::to_string),
            motherboard_socket: motherboard_socket.map(str::to_string),
            compatible,
        }
    }

    /// A one-line summary suitable for showing next to the selected parts.
    pub fn message(&self) -> String {
        if self.compatible {
            "CPU and motherboard sockets are compatible".to_string()
        } else {
            format!(
                "Socket incompatible: CPU ({}) - Motherboard ({})",
                self.cpu_socket.as_deref().unwrap_or("N/A"),
                self.motherboard_socket.as_deref().unwrap_or("N/A"),
            )
        }
    }
}
