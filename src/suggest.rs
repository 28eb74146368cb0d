//! Commute suggestion generation.
//!
//! `generate` draws the ±5 minute jitter from the caller's RNG; `generate_with_base`
//! is the deterministic core once the base commute time is fixed.

use rand::Rng;

use crate::model::{is_peak_hour, ActionKind, CommuteOption, Tier};
use crate::network::EffectiveType;

pub const BASE_MINUTES: f64 = 30.0;
pub const MORNING_PEAK_MINUTES: f64 = 45.0;
pub const EVENING_PEAK_MINUTES: f64 = 50.0;
pub const WEEKEND_FACTOR: f64 = 0.8;
pub const JITTER_MINUTES: f64 = 5.0;

/// Base commute time before jitter.
pub fn base_minutes(hour: u8, is_weekend: bool) -> f64 {
    let mut base = if (7..=9).contains(&hour) {
        MORNING_PEAK_MINUTES
    } else if (16..=18).contains(&hour) {
        EVENING_PEAK_MINUTES
    } else {
        BASE_MINUTES
    };
    if is_weekend {
        base *= WEEKEND_FACTOR;
    }
    base
}

pub fn generate<R: Rng + ?Sized>(
    lat: f64,
    lng: f64,
    hour: u8,
    is_weekend: bool,
    network: EffectiveType,
    rng: &mut R,
) -> Vec<CommuteOption> {
    let jitter = rng.gen_range(-JITTER_MINUTES..=JITTER_MINUTES);
    let base = base_minutes(hour, is_weekend) + jitter;
    tracing::debug!(lat, lng, hour, is_weekend, ?network, base, "generating suggestions");
    generate_with_base(base, hour, is_weekend, network)
}

fn minutes(v: f64) -> u32 {
    v.round().max(0.0) as u32
}

fn litres(v: f64) -> String {
    format!("{:.1} liters", v)
}

fn detail(label: &str, value: impl Into<String>) -> (String, String) {
    (label.to_string(), value.into())
}

/// Fixed-order candidate list for an already-jittered base time.
pub fn generate_with_base(
    base: f64,
    hour: u8,
    is_weekend: bool,
    network: EffectiveType,
) -> Vec<CommuteOption> {
    let peak = is_peak_hour(hour);
    let wait = 30 - (hour as u32 % 30);
    let mut out = Vec::with_capacity(5);

    out.push(CommuteOption {
        name: "Leave Now".into(),
        estimated_minutes: (minutes(base), minutes(base * 1.3)),
        description: if is_weekend {
            "Weekend traffic is lighter than usual".into()
        } else {
            "Typical commute time".into()
        },
        tier: if peak { Tier::Good } else { Tier::Fair },
        icon: "car".into(),
        action: ActionKind::StartNavigation,
        details: vec![
            detail("Route", "Standard route via Main St"),
            detail("Traffic", "Moderate"),
            detail("Fuel", litres(base / 10.0)),
        ],
    });

    out.push(CommuteOption {
        name: format!("Leave in {} mins", wait),
        estimated_minutes: (minutes(base * 0.8), minutes(base)),
        description: "Traffic is expected to improve slightly".into(),
        tier: if peak { Tier::Good } else { Tier::Best },
        icon: "clock".into(),
        action: ActionKind::SetReminder,
        details: vec![
            detail("Route", "Standard route via Main St"),
            detail("Traffic", "Improving"),
            detail("Fuel", litres(base * 0.8 / 10.0)),
        ],
    });

    if network.supports_remote_work() {
        out.push(CommuteOption {
            name: "Work Remotely".into(),
            estimated_minutes: (0, 0),
            description: "Your network connection is suitable for remote work".into(),
            tier: Tier::Best,
            icon: "laptop-house".into(),
            action: ActionKind::RemoteWork,
            details: vec![
                detail("Connection", "Stable video call possible"),
                detail("Suggestion", "Schedule afternoon meetings"),
            ],
        });
    }

    out.push(CommuteOption {
        name: "Alternative Route".into(),
        estimated_minutes: (minutes(base * 0.9), minutes(base * 1.1)),
        description: "Slightly longer but more consistent".into(),
        tier: Tier::Fair,
        icon: "road".into(),
        action: ActionKind::ShowAlternative,
        details: vec![
            detail("Route", "Via Highway 27 and 5th Ave"),
            detail("Traffic", "Light"),
            detail("Fuel", litres(base * 0.9 / 8.0)),
        ],
    });

    out.push(CommuteOption {
        name: "Public Transport".into(),
        estimated_minutes: (minutes(base * 1.2), minutes(base * 1.5)),
        description: "Reliable but slower with walking segments".into(),
        tier: Tier::Fair,
        icon: "bus".into(),
        action: ActionKind::ShowTransit,
        details: vec![
            detail("Route", "Bus #42 to Central Station"),
            detail("Schedule", "Every 15 mins"),
            detail("Cost", "$2.50"),
        ],
    });

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NetworkClass;
    use crate::network::{classify, NetworkSample};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn names(opts: &[CommuteOption]) -> Vec<String> {
        opts.iter().map(|o| o.name.clone()).collect()
    }

    #[test]
    fn excellent_network_gets_five_options() {
        let mut rng = StdRng::seed_from_u64(7);
        let opts = generate(51.5, -0.12, 8, false, EffectiveType::Wifi, &mut rng);
        assert_eq!(opts.len(), 5);
        assert_eq!(opts[2].action, ActionKind::RemoteWork);
        assert_eq!(opts[2].estimated_minutes, (0, 0));
        assert_eq!(opts[2].tier, Tier::Best);
    }

    #[test]
    fn weak_network_omits_remote_work_without_reordering() {
        for effective in [
            EffectiveType::G3,
            EffectiveType::G2,
            EffectiveType::Slow2g,
            EffectiveType::Unknown,
        ] {
            let opts = generate_with_base(30.0, 12, false, effective);
            assert_eq!(
                names(&opts),
                vec![
                    "Leave Now",
                    "Leave in 18 mins",
                    "Alternative Route",
                    "Public Transport"
                ]
            );
        }
    }

    #[test]
    fn rush_hour_on_weak_network_yields_four_options() {
        let mut rng = StdRng::seed_from_u64(19);
        let opts = generate(51.5, -0.12, 8, false, EffectiveType::G3, &mut rng);
        assert_eq!(opts.len(), 4);
        assert_eq!(opts[1].name, "Leave in 22 mins");
        assert!(opts.iter().all(|o| o.action != ActionKind::RemoteWork));
    }

    #[test]
    fn slow_4g_still_offers_remote_work() {
        // downlink of 1.5 Mbps classifies as Fair, the type alone decides
        let sample = NetworkSample {
            effective_type: EffectiveType::G4,
            downlink_mbps: Some(1.5),
            latency_ms: 80,
        };
        assert_eq!(classify(&sample), NetworkClass::Fair);
        let opts = generate_with_base(45.0, 8, false, sample.effective_type);
        assert_eq!(opts.len(), 5);
        assert_eq!(opts[2].action, ActionKind::RemoteWork);
    }

    #[test]
    fn order_is_fixed() {
        let opts = generate_with_base(30.0, 12, false, EffectiveType::G4);
        let actions: Vec<ActionKind> = opts.iter().map(|o| o.action).collect();
        assert_eq!(
            actions,
            vec![
                ActionKind::StartNavigation,
                ActionKind::SetReminder,
                ActionKind::RemoteWork,
                ActionKind::ShowAlternative,
                ActionKind::ShowTransit,
            ]
        );
    }

    #[test]
    fn base_time_follows_peak_windows_and_weekend() {
        assert_eq!(base_minutes(6, false), 30.0);
        assert_eq!(base_minutes(7, false), 45.0);
        assert_eq!(base_minutes(9, false), 45.0);
        assert_eq!(base_minutes(10, false), 30.0);
        assert_eq!(base_minutes(12, false), 30.0);
        assert_eq!(base_minutes(16, false), 50.0);
        assert_eq!(base_minutes(18, false), 50.0);
        assert_eq!(base_minutes(19, false), 30.0);
        assert!((base_minutes(8, true) - 36.0).abs() < 1e-9);
    }

    #[test]
    fn first_lower_bound_tracks_base_within_jitter() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let peak = generate(0.0, 0.0, 8, false, EffectiveType::Wifi, &mut rng);
            let (lo, _) = peak[0].estimated_minutes;
            assert!((40..=50).contains(&lo), "peak lower bound {}", lo);

            let midday = generate(0.0, 0.0, 12, false, EffectiveType::Wifi, &mut rng);
            let (lo, _) = midday[0].estimated_minutes;
            assert!((25..=35).contains(&lo), "midday lower bound {}", lo);
        }
    }

    #[test]
    fn ranges_derive_from_single_base() {
        let opts = generate_with_base(40.0, 12, false, EffectiveType::Wifi);
        assert_eq!(opts[0].estimated_minutes, (40, 52));
        assert_eq!(opts[1].estimated_minutes, (32, 40));
        assert_eq!(opts[3].estimated_minutes, (36, 44));
        assert_eq!(opts[4].estimated_minutes, (48, 60));
        assert_eq!(opts[0].time_label(), "40-52 mins");
    }

    #[test]
    fn tiers_depend_on_peak() {
        let off_peak = generate_with_base(30.0, 12, false, EffectiveType::Wifi);
        assert_eq!(off_peak[0].tier, Tier::Fair);
        assert_eq!(off_peak[1].tier, Tier::Best);
        let rush = generate_with_base(50.0, 17, false, EffectiveType::Wifi);
        assert_eq!(rush[0].tier, Tier::Good);
        assert_eq!(rush[1].tier, Tier::Good);
        assert_eq!(rush[3].tier, Tier::Fair);
        assert_eq!(rush[4].tier, Tier::Fair);
    }

    #[test]
    fn wait_minutes_and_weekend_copy() {
        let opts = generate_with_base(24.0, 0, true, EffectiveType::G2);
        assert_eq!(opts[0].name, "Leave Now");
        assert_eq!(opts[0].description, "Weekend traffic is lighter than usual");
        assert_eq!(opts[1].name, "Leave in 30 mins");
        let evening = generate_with_base(24.0, 23, true, EffectiveType::G2);
        assert_eq!(evening[1].name, "Leave in 7 mins");
    }

    #[test]
    fn details_keep_declared_order() {
        let opts = generate_with_base(40.0, 12, false, EffectiveType::G2);
        let labels: Vec<&str> = opts[0].details.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(labels, vec!["Route", "Traffic", "Fuel"]);
        assert_eq!(opts[0].details[2].1, "4.0 liters");
        // no remote-work card on 2g, so the alternative route sits at index 2
        assert_eq!(opts[2].action, ActionKind::ShowAlternative);
        assert_eq!(opts[2].details[2].1, "4.5 liters");
        assert_eq!(opts[3].details[2].1, "$2.50");
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let a = generate(1.0, 2.0, 9, false, EffectiveType::G4, &mut StdRng::seed_from_u64(3));
        let b = generate(1.0, 2.0, 9, false, EffectiveType::G4, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
