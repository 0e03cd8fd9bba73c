use crate::constants::SAMPLE_LIMIT;
use itertools::Itertools;

/// Per-run accounting: one phase per cleanup step, each with a count and a
/// few sample ids so the operator can eyeball what was touched.
pub struct RunReport {
    title: String,
    phases: Vec<Phase>,
}

pub struct Phase {
    pub label: String,
    pub count: usize,
    pub samples: Vec<String>,
}

impl RunReport {
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            phases: vec![],
        }
    }

    pub fn record<S: Into<String>>(&mut self, label: S, count: usize, keys: &[String]) {
        self.phases.push(Phase {
            label: label.into(),
            count,
            samples: keys.iter().take(SAMPLE_LIMIT).cloned().collect(),
        });
    }

    pub fn total(&self) -> usize {
        self.phases.iter().map(|p| p.count).sum()
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn render(&self) -> String {
        let mut lines = vec![];
        lines.push(format!("=== {} summary ===", self.title));
        for phase in &self.phases {
            let mut line = format!("{}: {}", phase.label, phase.count);
            if !phase.samples.is_empty() {
                let sampled = phase.samples.iter().join(", ");
                let suffix = if phase.count > phase.samples.len() {
                    format!(", ... and {} more", phase.count - phase.samples.len())
                } else {
                    String::new()
                };
                line.push_str(&format!(" ({sampled}{suffix})"));
            }
            lines.push(line);
        }
        lines.push(format!("total mutations: {}", self.total()));
        lines.join("\n")
    }

    pub fn print_summary(&self) {
        println!("\n{}", self.render());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_is_deterministic_and_ordered() {
        let mut report = RunReport::new("cleanup-mock-data");
        report.record("mock league", 1, &["pvl_2025_season1".to_string()]);
        report.record("mock teams", 2, &["team_a".to_string(), "team_b".to_string()]);
        report.record("mock players", 0, &[]);
        let expected = "=== cleanup-mock-data summary ===\n\
                        mock league: 1 (pvl_2025_season1)\n\
                        mock teams: 2 (team_a, team_b)\n\
                        mock players: 0\n\
                        total mutations: 3";
        assert_eq!(expected, report.render());
        assert_eq!(expected, report.render());
    }

    #[test]
    fn test_samples_capped() {
        let keys: Vec<String> = (0..20).map(|i| format!("k{i}")).collect();
        let mut report = RunReport::new("big");
        report.record("lots", keys.len(), &keys);
        let phase = &report.phases()[0];
        assert_eq!(crate::constants::SAMPLE_LIMIT, phase.samples.len());
        assert!(report.render().contains("... and 15 more"));
    }

    #[test]
    fn test_total_sums_phases() {
        let mut report = RunReport::new("t");
        report.record("a", 3, &[]);
        report.record("b", 4, &[]);
        assert_eq!(7, report.total());
    }
}
