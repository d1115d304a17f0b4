//! Console report of the plant ranking and a monthly preview.

use std::fmt;

use super::capacity_factor::MonthlyCapacityFactor;
use super::ranking::{PlantRanking, bottom, top};

/// Top and bottom plants plus the first monthly rows, ready to print.
#[derive(Debug, Clone)]
pub struct RankingReport {
    /// Highest-ranked plants, best first.
    pub top: Vec<PlantRanking>,
    /// Lowest-ranked plants, in ranking order.
    pub bottom: Vec<PlantRanking>,
    /// Leading rows of the monthly capacity-factor table.
    pub preview: Vec<MonthlyCapacityFactor>,
    /// First and last report years covered.
    pub span: Option<(i32, i32)>,
}

impl RankingReport {
    /// Builds a report from a complete ranking.
    ///
    /// # Arguments
    ///
    /// * `ranking` - Plants sorted by average capacity factor, best first
    /// * `monthly` - Monthly capacity-factor rows
    /// * `size` - Plants shown in each of the top and bottom tables
    /// * `preview_rows` - Monthly rows shown in the preview
    /// * `span` - Report years covered
    pub fn new(
        ranking: &[PlantRanking],
        monthly: &[MonthlyCapacityFactor],
        size: usize,
        preview_rows: usize,
        span: Option<(i32, i32)>,
    ) -> Self {
        Self {
            top: top(ranking, size).to_vec(),
            bottom: bottom(ranking, size).to_vec(),
            preview: monthly.iter().take(preview_rows).cloned().collect(),
            span,
        }
    }

    fn span_label(&self) -> String {
        match self.span {
            Some((first, last)) => format!(" ({first}\u{2013}{last})"),
            None => String::new(),
        }
    }
}

fn write_ranking(f: &mut fmt::Formatter<'_>, rows: &[PlantRanking]) -> fmt::Result {
    writeln!(f, "  {:<40} {:>15} {:>6}", "Plant Name", "CapacityFactor", "Years")?;
    for r in rows {
        writeln!(
            f,
            "  {:<40} {:>15.4} {:>6}",
            r.plant, r.capacity_factor, r.years
        )?;
    }
    Ok(())
}

impl fmt::Display for RankingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let span = self.span_label();
        writeln!(
            f,
            "Top {} plants by average capacity factor{span}:",
            self.top.len()
        )?;
        write_ranking(f, &self.top)?;
        writeln!(f)?;
        writeln!(
            f,
            "Bottom {} plants by average capacity factor{span}:",
            self.bottom.len()
        )?;
        write_ranking(f, &self.bottom)?;

        if self.preview.is_empty() {
            return Ok(());
        }
        writeln!(f)?;
        writeln!(
            f,
            "  {:<32} {:>8} {:>8} {:>5} {:<10} {:>14} {:>10}",
            "Plant Name", "CF", "RawCF", "YEAR", "Month", "Netgen_MWh", "Cap (MW)"
        )?;
        for m in &self.preview {
            writeln!(
                f,
                "  {:<32} {:>8.4} {:>8.4} {:>5} {:<10} {:>14.1} {:>10.1}",
                m.plant,
                m.capacity_factor,
                m.raw_capacity_factor,
                m.year,
                m.month.name(),
                m.netgen_mwh,
                m.capacity_mw
            )?;
        }
        Ok(())
    }
}
