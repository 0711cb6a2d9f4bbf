use aq_core::{band_range, color_for, Category, ColorToken, Pollutant};
use serde::Serialize;

/// One row of the map legend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub category: Category,
    pub label: &'static str,
    pub color: ColorToken,
    /// "lower - upper" in the pollutant's unit; `None` for the no-data row
    pub range: Option<String>,
}

/// Legend rows for a pollutant in severity order, ending with the no-data row.
///
/// Pollutants without a threshold table only get the no-data row.
pub fn legend(pollutant: Pollutant) -> Vec<LegendEntry> {
    let mut entries: Vec<LegendEntry> = Category::ALL
        .into_iter()
        .filter_map(|category| {
            let range = band_range(category, pollutant)?;
            Some(LegendEntry {
                category,
                label: category.label(),
                color: color_for(category),
                range: Some(format!("{} - {}", range.start, range.end)),
            })
        })
        .collect();

    entries.push(LegendEntry {
        category: Category::Unknown,
        label: Category::Unknown.label(),
        color: color_for(Category::Unknown),
        range: None,
    });
    entries
}
