// ---------------------------------------------------------------------------
// Filter state: which selector is chosen in each categorical dimension
// ---------------------------------------------------------------------------

/// Viewing angles (degrees) the camera was positioned at.
pub const VIEWING_ANGLES: [i32; 7] = [-45, -30, -15, 0, 15, 30, 45];

pub const DEFAULT_METRIC: &str = "Contrast";
pub const DEFAULT_HOUR: &str = "9-12AM";

/// A selector counts as chosen only when it is present and non-empty.
pub fn is_selected(selector: Option<&str>) -> bool {
    selector.is_some_and(|s| !s.is_empty())
}

/// Current choice in every filter dimension.
///
/// `weather` / `hour` set to `None` means "no filter chosen".
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub metric: String,
    pub weather: Option<String>,
    pub hour: Option<String>,
    pub angle: i32,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            metric: DEFAULT_METRIC.to_string(),
            weather: None,
            hour: Some(DEFAULT_HOUR.to_string()),
            angle: 0,
        }
    }
}

fn toggle(slot: &mut Option<String>, label: &str) {
    if slot.as_deref() == Some(label) {
        *slot = None;
    } else {
        *slot = Some(label.to_string());
    }
}

impl Selection {
    /// Choose a weather condition; choosing the current one clears it.
    pub fn toggle_weather(&mut self, label: &str) {
        toggle(&mut self.weather, label);
    }

    /// Choose an hour bucket; choosing the current one clears it.
    pub fn toggle_hour(&mut self, label: &str) {
        toggle(&mut self.hour, label);
    }

    pub fn set_metric(&mut self, label: &str) {
        self.metric = label.to_string();
    }

    /// Returns `false` (and keeps the old angle) for angles that were not measured.
    pub fn set_angle(&mut self, angle: i32) -> bool {
        if VIEWING_ANGLES.contains(&angle) {
            self.angle = angle;
            true
        } else {
            false
        }
    }

    /// The category key the selected angle is stored under.
    pub fn angle_key(&self) -> String {
        self.angle.to_string()
    }

    pub fn weather(&self) -> Option<&str> {
        self.weather.as_deref()
    }

    pub fn hour(&self) -> Option<&str> {
        self.hour.as_deref()
    }

    /// Heading for the combined chart.
    pub fn title(&self) -> String {
        let hour = self
            .hour()
            .filter(|h| !h.is_empty())
            .unwrap_or("All Hours");
        let weather = self
            .weather()
            .filter(|w| !w.is_empty())
            .unwrap_or("All Weather Conditions");
        format!("Average IQA Values for {hour} on a {weather} Day")
    }
}

// ---------------------------------------------------------------------------
// Cross-product of filter choices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCombination {
    pub weather: String,
    pub hour: String,
}

/// Every (weather, hour) pair, weather-major.
pub fn combinations(weather: &[&str], hours: &[&str]) -> Vec<FilterCombination> {
    weather
        .iter()
        .flat_map(|w| {
            hours.iter().map(move |h| FilterCombination {
                weather: w.to_string(),
                hour: h.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_same_value_clears_it() {
        let mut sel = Selection::default();
        sel.toggle_weather("Sunny");
        assert_eq!(sel.weather(), Some("Sunny"));
        sel.toggle_weather("Rainy");
        assert_eq!(sel.weather(), Some("Rainy"));
        sel.toggle_weather("Rainy");
        assert_eq!(sel.weather(), None);

        sel.toggle_hour(DEFAULT_HOUR);
        assert_eq!(sel.hour(), None);
    }

    #[test]
    fn rejects_unmeasured_angle() {
        let mut sel = Selection::default();
        assert!(sel.set_angle(-30));
        assert!(!sel.set_angle(10));
        assert_eq!(sel.angle, -30);
        assert_eq!(sel.angle_key(), "-30");
    }

    #[test]
    fn title_falls_back_to_all() {
        let mut sel = Selection::default();
        assert_eq!(
            sel.title(),
            "Average IQA Values for 9-12AM on a All Weather Conditions Day"
        );
        sel.toggle_weather("Cloudy");
        sel.toggle_hour(DEFAULT_HOUR);
        assert_eq!(sel.title(), "Average IQA Values for All Hours on a Cloudy Day");
    }

    #[test]
    fn empty_selector_is_not_selected() {
        assert!(is_selected(Some("Sunny")));
        assert!(!is_selected(Some("")));
        assert!(!is_selected(None));
    }

    #[test]
    fn combinations_are_weather_major() {
        let combos = combinations(&["Sunny", "Rainy"], &["9-12AM", "3PM-5PM"]);
        let pairs: Vec<(&str, &str)> = combos
            .iter()
            .map(|c| (c.weather.as_str(), c.hour.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Sunny", "9-12AM"),
                ("Sunny", "3PM-5PM"),
                ("Rainy", "9-12AM"),
                ("Rainy", "3PM-5PM"),
            ]
        );
        assert!(combinations(&[], &["9-12AM"]).is_empty());
    }
}
