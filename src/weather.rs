//! Synthetic weather, congestion and alternative-route content for the side tabs.

use rand::Rng;
use std::f64::consts::PI;

const COMPASS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

#[derive(Clone, Debug, PartialEq)]
pub struct WeatherReport {
    pub condition: &'static str,
    pub icon: &'static str,
    pub temp_c: f64,
    pub temp_f: f64,
    pub wind_mph: f64,
    pub wind_dir: &'static str,
    pub advice: &'static str,
}

pub fn mock_weather<R: Rng + ?Sized>(hour: u8, rng: &mut R) -> WeatherReport {
    let temp_c = 20.0 + (hour as f64 / 24.0 * PI * 2.0).sin() * 5.0;
    let daytime = (6..=18).contains(&hour);
    WeatherReport {
        condition: if daytime { "Sunny" } else { "Clear" },
        icon: if daytime { "☀️" } else { "🌙" },
        temp_c,
        temp_f: temp_c * 9.0 / 5.0 + 32.0,
        wind_mph: 5.0 + rng.gen_range(0.0..5.0),
        wind_dir: COMPASS[rng.gen_range(0..COMPASS.len())],
        advice: if daytime {
            "Perfect weather for commuting"
        } else {
            "Clear night, safe for travel"
        },
    }
}

/// 25 hourly congestion samples (0..=24), percent of capacity.
pub fn congestion_curve<R: Rng + ?Sized>(rng: &mut R) -> Vec<f64> {
    (0..=24)
        .map(|i| {
            let h = i as f64;
            let base = 20.0
                + 30.0 * (-((h - 7.5) / 2.0).powi(2)).exp()
                + 35.0 * (-((h - 17.0) / 2.0).powi(2)).exp();
            base * rng.gen_range(0.9..1.1)
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AltRoute {
    pub title: &'static str,
    pub summary: &'static str,
}

pub const ALT_ROUTES: [AltRoute; 3] = [
    AltRoute {
        title: "Via Riverside Drive",
        summary: "+5 minutes, but 20% less traffic",
    },
    AltRoute {
        title: "Express Bus Lane",
        summary: "Available 7-10AM, saves 10-15 minutes",
    },
    AltRoute {
        title: "Bike Path",
        summary: "35 minutes, healthy option",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn weather_follows_hour() {
        let mut rng = StdRng::seed_from_u64(1);
        let noon = mock_weather(12, &mut rng);
        assert_eq!(noon.condition, "Sunny");
        assert!((noon.temp_c - 20.0).abs() < 1e-9);
        assert!((noon.temp_f - 68.0).abs() < 1e-9);
        let six = mock_weather(6, &mut rng);
        assert!((six.temp_c - 25.0).abs() < 1e-9);
        let night = mock_weather(22, &mut rng);
        assert_eq!(night.condition, "Clear");
        assert!((5.0..10.0).contains(&night.wind_mph));
        assert!(COMPASS.contains(&night.wind_dir));
    }

    #[test]
    fn congestion_peaks_in_rush_hours() {
        let mut rng = StdRng::seed_from_u64(9);
        let curve = congestion_curve(&mut rng);
        assert_eq!(curve.len(), 25);
        assert!(curve[17] > curve[12]);
        assert!(curve[8] > curve[3]);
        assert!(curve.iter().all(|v| (15.0..70.0).contains(v)));
    }
}
