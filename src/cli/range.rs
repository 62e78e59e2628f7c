use super::{SelectedCountry, ui};
use crate::core::inflation::{self, CountryDateRange};
use crate::core::{CpiDataset, CpiProvider};
use anyhow::Result;
use comfy_table::Cell;

struct CoverageRow {
    key: String,
    name: String,
    range: Option<CountryDateRange>,
}

/// Shows which years have CPI data, for one country or every country in the
/// dataset.
pub async fn run(country: Option<&str>, cpi_provider: &dyn CpiProvider) -> Result<()> {
    let pb = ui::new_spinner("Fetching CPI data...");
    let dataset = cpi_provider.fetch_dataset().await;
    pb.finish_and_clear();
    let dataset = dataset?;

    let rows = coverage_rows(&dataset, country);
    if rows.is_empty() {
        println!("The CPI dataset contains no countries.");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Country"),
        ui::header_cell("First year"),
        ui::header_cell("Last year"),
        ui::header_cell("Data points"),
    ]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.key),
            Cell::new(&row.name),
            ui::format_optional_cell(row.range.map(|r| r.start_year), |y| y.to_string()),
            ui::format_optional_cell(row.range.map(|r| r.end_year), |y| y.to_string()),
            ui::format_optional_cell(row.range.map(|r| r.data_point_count), |n| n.to_string()),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn coverage_rows(dataset: &CpiDataset, country: Option<&str>) -> Vec<CoverageRow> {
    let selections: Vec<SelectedCountry> = match country {
        Some(input) => vec![SelectedCountry::resolve(input)],
        None => dataset
            .countries()
            .into_iter()
            .map(SelectedCountry::from_dataset_key)
            .collect(),
    };

    selections
        .into_iter()
        .map(|selected| CoverageRow {
            range: inflation::country_date_range(dataset, &selected.key),
            name: selected
                .country
                .map(|c| c.name())
                .unwrap_or("Unknown")
                .to_string(),
            key: selected.key,
        })
        .collect()
}
