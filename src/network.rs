//! Connection quality: classification of a connection sample plus the browser check.

use rand::Rng;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::error::NetworkError;
use crate::model::NetworkClass;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectiveType {
    Slow2g,
    G2,
    G3,
    G4,
    Wifi,
    Unknown,
}

impl EffectiveType {
    /// `navigator.connection.effectiveType` values ("slow-2g", "3g", "4g", ...).
    pub fn parse(raw: &str) -> Self {
        let raw = raw.to_ascii_lowercase();
        if raw.contains("wifi") {
            EffectiveType::Wifi
        } else if raw.contains("4g") {
            EffectiveType::G4
        } else if raw.contains("3g") {
            EffectiveType::G3
        } else if raw.contains("slow-2g") {
            EffectiveType::Slow2g
        } else if raw.contains("2g") {
            EffectiveType::G2
        } else {
            EffectiveType::Unknown
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EffectiveType::Slow2g => "slow-2g",
            EffectiveType::G2 => "2g",
            EffectiveType::G3 => "3g",
            EffectiveType::G4 => "4g",
            EffectiveType::Wifi => "wifi",
            EffectiveType::Unknown => "Unknown",
        }
    }

    fn broadband(self) -> bool {
        matches!(self, EffectiveType::G4 | EffectiveType::Wifi)
    }

    /// Video calls need a 4g or wifi link; the downlink figure is not consulted.
    pub fn supports_remote_work(self) -> bool {
        self.broadband()
    }

    pub fn icon(self) -> &'static str {
        match self {
            EffectiveType::Wifi => "wifi",
            EffectiveType::G4 | EffectiveType::G3 | EffectiveType::G2 | EffectiveType::Slow2g => {
                "mobile-alt"
            }
            EffectiveType::Unknown => "network-wired",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkSample {
    pub effective_type: EffectiveType,
    pub downlink_mbps: Option<f64>,
    pub latency_ms: u32,
}

pub fn classify(sample: &NetworkSample) -> NetworkClass {
    let downlink = sample.downlink_mbps.unwrap_or(0.0);
    let broadband = sample.effective_type.broadband();
    if sample.effective_type == EffectiveType::Unknown && sample.downlink_mbps.is_none() {
        NetworkClass::Unknown
    } else if broadband && sample.downlink_mbps.is_none() {
        // type alone is the only signal; trust it
        NetworkClass::Good
    } else if broadband && downlink > 5.0 {
        NetworkClass::Excellent
    } else if broadband && downlink > 2.0 {
        NetworkClass::Good
    } else if sample.effective_type == EffectiveType::G3 || downlink > 1.0 {
        NetworkClass::Fair
    } else {
        NetworkClass::Poor
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NetworkReport {
    pub class: NetworkClass,
    pub status_text: &'static str,
    /// CSS modifier: good / fair / poor.
    pub status_class: &'static str,
    /// 0..=100 fill of the quality bar.
    pub quality_percent: f64,
    pub icon: &'static str,
    pub sample: NetworkSample,
}

impl NetworkReport {
    pub fn from_sample(sample: NetworkSample) -> Self {
        let class = classify(&sample);
        let lat = sample.latency_ms as f64;
        let (status_text, status_class, quality) = match class {
            NetworkClass::Excellent => {
                ("Excellent Connection", "good", 90.0 - (lat / 10.0).min(30.0))
            }
            NetworkClass::Good => ("Good Connection", "good", 75.0 - (lat / 10.0).min(25.0)),
            NetworkClass::Fair => ("Fair Connection", "fair", 50.0 - (lat / 20.0).min(20.0)),
            NetworkClass::Poor => ("Poor Connection", "poor", 30.0 - (lat / 30.0).min(15.0)),
            NetworkClass::Unknown => ("Unknown Connection", "fair", 0.0),
        };
        Self {
            class,
            status_text,
            status_class,
            quality_percent: quality.clamp(0.0, 100.0),
            icon: sample.effective_type.icon(),
            sample,
        }
    }

    pub fn downlink_label(&self) -> String {
        match self.sample.downlink_mbps {
            Some(d) if d > 0.0 => format!("{} Mbps", d),
            _ => "Unknown".to_string(),
        }
    }
}

/// Round-trip estimate layered on top of the check's own timer delay.
pub fn simulated_latency_ms<R: Rng + ?Sized>(
    effective: EffectiveType,
    check_ms: f64,
    rng: &mut R,
) -> u32 {
    let extra = match effective {
        EffectiveType::Slow2g | EffectiveType::G2 => 200.0 + rng.gen_range(0.0..300.0),
        EffectiveType::G3 => 100.0 + rng.gen_range(0.0..200.0),
        _ => 50.0 + rng.gen_range(0.0..100.0),
    };
    (check_ms + extra).round() as u32
}

/// Raw connection fields read from `navigator.connection`.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionInfo {
    pub effective_type: EffectiveType,
    pub downlink_mbps: Option<f64>,
}

/// `navigator.connection` is not in the stable web-sys surface; read it reflectively.
pub fn read_connection() -> Result<ConnectionInfo, NetworkError> {
    let window = web_sys::window().ok_or(NetworkError::Unsupported)?;
    let navigator = window.navigator();
    if !navigator.on_line() {
        return Err(NetworkError::Offline);
    }
    let connection = js_sys::Reflect::get(&navigator, &JsValue::from_str("connection"))
        .map_err(|_| NetworkError::Unsupported)?;
    if connection.is_undefined() || connection.is_null() {
        return Err(NetworkError::Unsupported);
    }
    let effective_type = js_sys::Reflect::get(&connection, &JsValue::from_str("effectiveType"))
        .ok()
        .and_then(|v| v.as_string())
        .map(|s| EffectiveType::parse(&s))
        .unwrap_or(EffectiveType::Unknown);
    let downlink_mbps = js_sys::Reflect::get(&connection, &JsValue::from_str("downlink"))
        .ok()
        .and_then(|v| v.as_f64());
    Ok(ConnectionInfo {
        effective_type,
        downlink_mbps,
    })
}

/// Link type assumed when `navigator.connection` could not be read. Browsers without
/// the Network Information API are treated as 4g; offline never qualifies.
pub fn fallback_link(err: &NetworkError) -> EffectiveType {
    match err {
        NetworkError::Unsupported => EffectiveType::G4,
        NetworkError::Offline => EffectiveType::Unknown,
    }
}

/// The connection object, for subscribing to its `change` event.
pub fn connection_target() -> Option<web_sys::EventTarget> {
    use wasm_bindgen::JsCast;
    let navigator = web_sys::window()?.navigator();
    js_sys::Reflect::get(&navigator, &JsValue::from_str("connection"))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
        .and_then(|v| v.dyn_into::<web_sys::EventTarget>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample(effective: &str, downlink: Option<f64>, latency_ms: u32) -> NetworkSample {
        NetworkSample {
            effective_type: EffectiveType::parse(effective),
            downlink_mbps: downlink,
            latency_ms,
        }
    }

    #[test]
    fn parse_effective_types() {
        assert_eq!(EffectiveType::parse("4g"), EffectiveType::G4);
        assert_eq!(EffectiveType::parse("slow-2g"), EffectiveType::Slow2g);
        assert_eq!(EffectiveType::parse("2g"), EffectiveType::G2);
        assert_eq!(EffectiveType::parse("WIFI"), EffectiveType::Wifi);
        assert_eq!(EffectiveType::parse("5g-ish"), EffectiveType::Unknown);
    }

    #[test]
    fn classification_thresholds() {
        assert_eq!(classify(&sample("4g", Some(10.0), 60)), NetworkClass::Excellent);
        assert_eq!(classify(&sample("wifi", Some(6.0), 60)), NetworkClass::Excellent);
        assert_eq!(classify(&sample("4g", Some(3.0), 60)), NetworkClass::Good);
        assert_eq!(classify(&sample("4g", Some(1.5), 60)), NetworkClass::Fair);
        assert_eq!(classify(&sample("3g", Some(0.4), 60)), NetworkClass::Fair);
        assert_eq!(classify(&sample("2g", Some(0.2), 60)), NetworkClass::Poor);
        assert_eq!(classify(&sample("2g", Some(1.2), 60)), NetworkClass::Fair);
        assert_eq!(classify(&sample("unknown", None, 60)), NetworkClass::Unknown);
        assert_eq!(classify(&sample("wifi", None, 60)), NetworkClass::Good);
    }

    #[test]
    fn remote_work_follows_link_type_only() {
        let qualifying: Vec<EffectiveType> = [
            EffectiveType::Slow2g,
            EffectiveType::G2,
            EffectiveType::G3,
            EffectiveType::G4,
            EffectiveType::Wifi,
            EffectiveType::Unknown,
        ]
        .into_iter()
        .filter(|t| t.supports_remote_work())
        .collect();
        assert_eq!(qualifying, vec![EffectiveType::G4, EffectiveType::Wifi]);
    }

    #[test]
    fn missing_connection_api_assumes_4g() {
        assert_eq!(fallback_link(&NetworkError::Unsupported), EffectiveType::G4);
        assert!(fallback_link(&NetworkError::Unsupported).supports_remote_work());
        assert_eq!(fallback_link(&NetworkError::Offline), EffectiveType::Unknown);
    }

    #[test]
    fn report_quality_penalises_latency() {
        let fast = NetworkReport::from_sample(sample("4g", Some(10.0), 100));
        assert_eq!(fast.status_text, "Excellent Connection");
        assert!((fast.quality_percent - 80.0).abs() < 1e-9);
        let slow = NetworkReport::from_sample(sample("4g", Some(10.0), 900));
        assert!((slow.quality_percent - 60.0).abs() < 1e-9);
        let poor = NetworkReport::from_sample(sample("2g", Some(0.1), 300));
        assert_eq!(poor.status_class, "poor");
        assert!((poor.quality_percent - 20.0).abs() < 1e-9);
        assert_eq!(poor.icon, "mobile-alt");
        assert_eq!(poor.downlink_label(), "0.1 Mbps");
    }

    #[test]
    fn latency_ranges_by_type() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let l2 = simulated_latency_ms(EffectiveType::G2, 50.0, &mut rng);
            assert!((250..=550).contains(&l2));
            let l3 = simulated_latency_ms(EffectiveType::G3, 50.0, &mut rng);
            assert!((150..=350).contains(&l3));
            let l4 = simulated_latency_ms(EffectiveType::G4, 50.0, &mut rng);
            assert!((100..=200).contains(&l4));
        }
    }
}
