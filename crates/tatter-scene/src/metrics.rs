//! Metrics collected during a headless run.

use serde::{Deserialize, Serialize};

/// Metrics collected from one scene run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub scene: String,
    pub material: String,
    /// Ticks executed (paused ticks excluded).
    pub ticks: u64,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per tick (seconds).
    pub avg_tick_time: f64,
    pub min_tick_time: f64,
    pub max_tick_time: f64,
    pub point_count: usize,
    pub pinned_count: usize,
    /// Sticks at scene load.
    pub initial_sticks: usize,
    /// Active sticks at the end of the run.
    pub sticks_remaining: usize,
    /// Sticks lost to overstretching or tearing.
    pub sticks_broken: usize,
    pub tears: u32,
    pub contacts_resolved: u64,
    /// Mean tension after the last tick.
    pub final_tension: f64,
    /// Largest distance any point moved from its start position.
    pub max_displacement: f64,
}

impl RunMetrics {
    /// CSV header row.
    pub fn to_csv_header() -> String {
        "scene,material,ticks,points,pinned,initial_sticks,sticks_remaining,sticks_broken,tears,contacts,total_wall_time_s,avg_tick_ms,min_tick_ms,max_tick_ms,final_tension,max_displacement".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6},{:.3}",
            self.scene,
            self.material,
            self.ticks,
            self.point_count,
            self.pinned_count,
            self.initial_sticks,
            self.sticks_remaining,
            self.sticks_broken,
            self.tears,
            self.contacts_resolved,
            self.total_wall_time,
            self.avg_tick_time * 1000.0,
            self.min_tick_time * 1000.0,
            self.max_tick_time * 1000.0,
            self.final_tension,
            self.max_displacement,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[RunMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }

    /// Fraction of the initial sticks still holding.
    pub fn integrity(&self) -> f64 {
        if self.initial_sticks == 0 {
            1.0
        } else {
            self.sticks_remaining as f64 / self.initial_sticks as f64
        }
    }
}
