//! Training summary report

use std::path::PathBuf;
use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::model::ClassificationMetrics;

/// Which rows the reported metrics were computed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricsScope {
    #[default]
    Holdout,
    Training,
}

/// Summary of a training run
#[derive(Debug, Default)]
pub struct TrainingSummary {
    pub total_rows: usize,
    pub leavers: usize,
    pub training_rows: usize,
    pub holdout_rows: usize,
    pub trees: usize,
    pub metrics: Option<ClassificationMetrics>,
    pub metrics_scope: MetricsScope,
    pub artifacts_dir: Option<PathBuf>,
    pub exported_features: Option<PathBuf>,
    load_time: Duration,
    prepare_time: Duration,
    fit_time: Duration,
    save_time: Duration,
}

impl TrainingSummary {
    pub fn new(total_rows: usize, leavers: usize) -> Self {
        Self {
            total_rows,
            leavers,
            ..Default::default()
        }
    }

    pub fn set_split(&mut self, training_rows: usize, holdout_rows: usize) {
        self.training_rows = training_rows;
        self.holdout_rows = holdout_rows;
        self.metrics_scope = if holdout_rows == 0 {
            MetricsScope::Training
        } else {
            MetricsScope::Holdout
        };
    }

    pub fn set_load_time(&mut self, d: Duration) {
        self.load_time = d;
    }

    pub fn set_prepare_time(&mut self, d: Duration) {
        self.prepare_time = d;
    }

    pub fn set_fit_time(&mut self, d: Duration) {
        self.fit_time = d;
    }

    pub fn set_save_time(&mut self, d: Duration) {
        self.save_time = d;
    }

    pub fn total_time(&self) -> Duration {
        self.load_time + self.prepare_time + self.fit_time + self.save_time
    }

    /// Share of rows labelled as leavers
    pub fn leaver_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            self.leavers as f64 / self.total_rows as f64
        }
    }

    /// Build the overview table
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Rows"), Cell::new(self.total_rows)]);
        table.add_row(vec![
            Cell::new("🚪 Leavers"),
            Cell::new(format!(
                "{} ({:.1}%)",
                self.leavers,
                self.leaver_rate() * 100.0
            )),
        ]);
        table.add_row(vec![
            Cell::new("🏋️  Training / holdout"),
            Cell::new(format!("{} / {}", self.training_rows, self.holdout_rows)),
        ]);
        table.add_row(vec![Cell::new("🌲 Trees"), Cell::new(self.trees)]);

        if let Some(m) = &self.metrics {
            let label = match self.metrics_scope {
                MetricsScope::Holdout => "holdout",
                MetricsScope::Training => "training",
            };
            let color = if m.accuracy >= 0.85 {
                Color::Green
            } else if m.accuracy >= 0.7 {
                Color::Yellow
            } else {
                Color::Red
            };
            table.add_row(vec![
                Cell::new(format!("🎯 Accuracy ({})", label)),
                Cell::new(format!("{:.3}", m.accuracy))
                    .fg(color)
                    .add_attribute(Attribute::Bold),
            ]);
            table.add_row(vec![
                Cell::new("   Precision"),
                Cell::new(format!("{:.3}", m.precision)),
            ]);
            table.add_row(vec![
                Cell::new("   Recall"),
                Cell::new(format!("{:.3}", m.recall)),
            ]);
            table.add_row(vec![Cell::new("   F1"), Cell::new(format!("{:.3}", m.f1))]);
        }

        table.add_row(vec![
            Cell::new("⏱  Total time"),
            Cell::new(format!("{:.2}s", self.total_time().as_secs_f64())),
        ]);
        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("TRAINING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.table().to_string().lines() {
            println!("    {}", line);
        }

        if let Some(m) = &self.metrics {
            let c = &m.confusion;
            println!();
            println!(
                "      {}",
                style("Confusion matrix (rows: actual, columns: predicted)").yellow()
            );
            println!("                 stay    leave");
            println!(
                "        stay   {:>5}    {:>5}",
                c.true_negative, c.false_positive
            );
            println!(
                "        leave  {:>5}    {:>5}",
                c.false_negative, c.true_positive
            );
        }

        if let Some(dir) = &self.artifacts_dir {
            println!();
            println!("      {} {}", style("Artifacts:").dim(), dir.display());
        }
        if let Some(path) = &self.exported_features {
            println!("      {} {}", style("Features:").dim(), path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConfusionMatrix;

    #[test]
    fn test_split_sets_scope() {
        let mut s = TrainingSummary::new(100, 16);
        s.set_split(80, 20);
        assert_eq!(s.metrics_scope, MetricsScope::Holdout);
        s.set_split(100, 0);
        assert_eq!(s.metrics_scope, MetricsScope::Training);
    }

    #[test]
    fn test_leaver_rate() {
        assert!((TrainingSummary::new(200, 50).leaver_rate() - 0.25).abs() < 1e-12);
        assert_eq!(TrainingSummary::new(0, 0).leaver_rate(), 0.0);
    }

    #[test]
    fn test_table_lists_metrics() {
        let mut s = TrainingSummary::new(10, 5);
        s.set_split(8, 2);
        s.metrics = Some(ClassificationMetrics::from_confusion(ConfusionMatrix {
            true_positive: 1,
            false_positive: 0,
            true_negative: 1,
            false_negative: 0,
        }));
        let rendered = s.table().to_string();
        assert!(rendered.contains("Accuracy (holdout)"));
        assert!(rendered.contains("1.000"));
    }
}
