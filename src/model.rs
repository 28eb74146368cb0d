//! Core data types for the commute dashboard.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeContext {
    /// 0..=23, local.
    pub hour: u8,
    pub is_weekend: bool,
}

/// Morning (07-09) and evening (16-18) rush windows, inclusive.
pub fn is_peak_hour(hour: u8) -> bool {
    (7..=9).contains(&hour) || (16..=18).contains(&hour)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NetworkClass {
    Unknown,
    Poor,
    Fair,
    Good,
    Excellent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Best,
    Good,
    Fair,
}

impl Tier {
    pub fn accent_color(self) -> &'static str {
        match self {
            Tier::Best | Tier::Good => "#28a745",
            Tier::Fair => "#ffc107",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    StartNavigation,
    SetReminder,
    RemoteWork,
    ShowAlternative,
    ShowTransit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tab {
    Suggestions,
    Traffic,
    Weather,
    AltRoutes,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Suggestions, Tab::Traffic, Tab::Weather, Tab::AltRoutes];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Suggestions => "Suggestions",
            Tab::Traffic => "Traffic",
            Tab::Weather => "Weather",
            Tab::AltRoutes => "Alt Routes",
        }
    }
}

/// User-visible consequence of picking a suggestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionEffect {
    pub notice: &'static str,
    pub switch_to: Option<Tab>,
}

impl ActionKind {
    pub fn button_text(self) -> &'static str {
        match self {
            ActionKind::StartNavigation => "Start Navigation",
            ActionKind::SetReminder => "Set Reminder",
            ActionKind::RemoteWork => "Setup Remote Work",
            ActionKind::ShowAlternative => "View Alternative",
            ActionKind::ShowTransit => "View Transit Options",
        }
    }

    pub fn effect(self) -> ActionEffect {
        let (notice, switch_to) = match self {
            ActionKind::StartNavigation => ("Starting navigation to work...", None),
            ActionKind::SetReminder => ("Reminder set for suggested departure time", None),
            ActionKind::RemoteWork => ("Setting up your remote work environment...", None),
            ActionKind::ShowAlternative => {
                ("Showing alternative route details", Some(Tab::AltRoutes))
            }
            ActionKind::ShowTransit => ("Showing public transport options", None),
        };
        ActionEffect { notice, switch_to }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommuteOption {
    pub name: String,
    /// Whole minutes, (min, max).
    pub estimated_minutes: (u32, u32),
    pub description: String,
    pub tier: Tier,
    pub icon: String,
    pub action: ActionKind,
    /// Ordered label/value rows shown on the card.
    pub details: Vec<(String, String)>,
}

impl CommuteOption {
    pub fn time_label(&self) -> String {
        format!("{}-{} mins", self.estimated_minutes.0, self.estimated_minutes.1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: f64,
}

impl LocationFix {
    /// Watch updates closer than this (degrees) are ignored.
    pub const MOVE_THRESHOLD_DEG: f64 = 0.0001;

    pub fn moved_from(&self, prev: &LocationFix) -> bool {
        (self.latitude - prev.latitude).abs() > Self::MOVE_THRESHOLD_DEG
            || (self.longitude - prev.longitude).abs() > Self::MOVE_THRESHOLD_DEG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_windows_are_inclusive() {
        let peaks: Vec<u8> = (0..24).filter(|h| is_peak_hour(*h)).collect();
        assert_eq!(peaks, vec![7, 8, 9, 16, 17, 18]);
    }

    #[test]
    fn only_show_alternative_switches_tab() {
        let all = [
            ActionKind::StartNavigation,
            ActionKind::SetReminder,
            ActionKind::RemoteWork,
            ActionKind::ShowAlternative,
            ActionKind::ShowTransit,
        ];
        for kind in all {
            let effect = kind.effect();
            assert!(!effect.notice.is_empty());
            assert_eq!(
                effect.switch_to.is_some(),
                kind == ActionKind::ShowAlternative
            );
        }
    }

    #[test]
    fn location_moves_past_threshold() {
        let a = LocationFix { latitude: 51.5, longitude: -0.12, accuracy_m: 10.0 };
        let near = LocationFix { latitude: 51.50005, ..a };
        let far = LocationFix { longitude: -0.1202, ..a };
        assert!(!near.moved_from(&a));
        assert!(far.moved_from(&a));
    }
}
