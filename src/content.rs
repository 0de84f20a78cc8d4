//! Static hotspot descriptions shown over the product viewer.

/// One overlay button on the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotspot {
    /// Value of the button's `data-hotspot` attribute.
    pub id: &'static str,
    /// Short label.
    pub title: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Icon path relative to the page.
    pub icon: &'static str,
}

/// Every hotspot, in display order.
pub const HOTSPOTS: &[Hotspot] = &[
    Hotspot {
        id: "anc",
        title: "Adaptive ANC",
        description: "Reduces ambient noise in real time",
        icon: "icons/Transparency.svg",
    },
    Hotspot {
        id: "transparency",
        title: "Transparency",
        description: "Lets outside sound in naturally",
        icon: "icons/Transparency.svg",
    },
    Hotspot {
        id: "mics",
        title: "Beamforming Mics",
        description: "Focus on your voice",
        icon: "icons/BeaformingMic.svg",
    },
    Hotspot {
        id: "charging",
        title: "Fast Charging",
        description: "5 min = 1 hour play",
        icon: "icons/FastCharging.svg",
    },
    Hotspot {
        id: "driver",
        title: "Custom Driver",
        description: "Low distortion & deep bass",
        icon: "icons/CustomDriver.svg",
    },
];

/// Look up a hotspot by id.
#[must_use]
pub fn find(id: &str) -> Option<&'static Hotspot> {
    HOTSPOTS.iter().find(|h| h.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        for (i, a) in HOTSPOTS.iter().enumerate() {
            assert!(HOTSPOTS[i + 1..].iter().all(|b| b.id != a.id), "{}", a.id);
        }
    }

    #[test]
    fn lookup() {
        assert_eq!(find("mics").map(|h| h.title), Some("Beamforming Mics"));
        assert_eq!(find("nope"), None);
    }
}
