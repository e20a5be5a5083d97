//! Status readout: a heading plus name, time, and brightness lines.

use daylight_clock::daylight::brightness_label;

pub const HEADING: &str = "상태창";
pub const DEFAULT_NAME: &str = "잔잔";

/// Text of the status window.
///
/// The time and metric lines are refreshed on every tick; between ticks they
/// keep their last value.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusPanel {
    name: String,
    timestamp: String,
    metric: String,
}

impl StatusPanel {
    pub fn new(name: impl Into<String>, timestamp: impl Into<String>, brightness: u8) -> Self {
        Self {
            name: name.into(),
            timestamp: timestamp.into(),
            metric: brightness_label(brightness),
        }
    }

    pub fn refresh(&mut self, timestamp: &str, brightness: u8) {
        self.timestamp.clear();
        self.timestamp.push_str(timestamp);
        self.metric = brightness_label(brightness);
    }

    pub fn name_line(&self) -> String {
        format!("이름: {}", self.name)
    }

    pub fn time_line(&self) -> String {
        format!("시간: {}", self.timestamp)
    }

    pub fn metric_line(&self) -> &str {
        &self.metric
    }

    /// Name, time, and metric, top to bottom.
    pub fn lines(&self) -> [String; 3] {
        [self.name_line(), self.time_line(), self.metric.clone()]
    }

    /// Single-line rendering for the window title.
    pub fn title(&self) -> String {
        let [name, time, metric] = self.lines();
        format!("{HEADING} | {name} | {time} | {metric}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_distinct_lines() {
        let panel = StatusPanel::new(DEFAULT_NAME, "0년 1월 1일 0:0", 0);
        assert_eq!(panel.lines(), ["이름: 잔잔", "시간: 0년 1월 1일 0:0", "0 , 0"]);
    }

    #[test]
    fn refresh_replaces_time_and_metric() {
        let mut panel = StatusPanel::new("Rin", "0년 1월 1일 0:0", 0);
        panel.refresh("0년 1월 1일 12:0", 255);
        assert_eq!(panel.time_line(), "시간: 0년 1월 1일 12:0");
        assert_eq!(panel.metric_line(), "255 , ff");
        assert_eq!(panel.name_line(), "이름: Rin");
    }

    #[test]
    fn title_joins_heading_and_lines() {
        let panel = StatusPanel::new(DEFAULT_NAME, "1년 2월 3일 4:5", 10);
        assert_eq!(
            panel.title(),
            "상태창 | 이름: 잔잔 | 시간: 1년 2월 3일 4:5 | 10 , a"
        );
    }
}
