use super::{SelectedCountry, ui};
use crate::CalculateArgs;
use crate::core::inflation::{self, InflationCalculation, YearSelection};
use crate::core::{CpiProvider, CurrencyRateProvider};
use anyhow::{Result, bail};
use comfy_table::Cell;
use serde::Serialize;
use tracing::{debug, error};

#[derive(Debug, Clone, PartialEq, Serialize)]
struct ConvertedValue {
    currency: String,
    value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct CalculationReport {
    country: String,
    #[serde(flatten)]
    calculation: InflationCalculation,
    #[serde(skip_serializing_if = "Option::is_none")]
    converted: Option<ConvertedValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversion_error: Option<String>,
}

#[derive(Debug, PartialEq)]
enum Outcome {
    Calculated(CalculationReport),
    Unavailable { start_year: i32, end_year: i32 },
}

pub async fn run(
    args: &CalculateArgs,
    cpi_provider: &dyn CpiProvider,
    currency_provider: &dyn CurrencyRateProvider,
    default_country: &str,
) -> Result<()> {
    let selected = SelectedCountry::resolve(args.country.as_deref().unwrap_or(default_country));

    let pb = ui::new_spinner("Fetching CPI data...");
    let outcome = calculate(args, &selected, cpi_provider, currency_provider).await;
    pb.finish_and_clear();

    match outcome? {
        Outcome::Calculated(report) if args.json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Outcome::Calculated(report) => display_report(&report, &selected),
        Outcome::Unavailable {
            start_year,
            end_year,
        } => {
            println!(
                "{}",
                ui::style_text(
                    &format!(
                        "Insufficient CPI data for {} to compare {start_year} with {end_year}.",
                        selected.display_name()
                    ),
                    ui::StyleType::Error
                )
            );
        }
    }
    Ok(())
}

async fn calculate(
    args: &CalculateArgs,
    selected: &SelectedCountry,
    cpi_provider: &dyn CpiProvider,
    currency_provider: &dyn CurrencyRateProvider,
) -> Result<Outcome> {
    if args.convert_to.is_some() && selected.currency_code().is_none() {
        bail!("No currency is known for {}", selected.key);
    }

    let dataset = cpi_provider.fetch_dataset().await?;
    let range = inflation::country_date_range(&dataset, &selected.key);
    let end_year = args
        .to
        .or(range.map(|r| r.end_year))
        .unwrap_or(args.from);
    debug!(country = %selected.key, ?range, end_year, "Validating year selection");

    if let YearSelection::Rejected(reason) =
        inflation::validate_year_selection(args.from, end_year, range.as_ref())
    {
        bail!("{reason}");
    }

    let Some(calculation) = inflation::calculate_inflation(
        args.amount,
        args.from,
        end_year,
        &selected.key,
        &dataset,
    )?
    else {
        return Ok(Outcome::Unavailable {
            start_year: args.from,
            end_year,
        });
    };

    let mut report = CalculationReport {
        country: selected.key.clone(),
        calculation,
        converted: None,
        conversion_error: None,
    };

    if let (Some(target), Some(local)) = (&args.convert_to, selected.currency_code()) {
        let target = target.to_uppercase();
        match currency_provider
            .convert(report.calculation.adjusted_value, local, &target)
            .await
        {
            Ok(value) => {
                report.converted = Some(ConvertedValue {
                    currency: target,
                    value,
                })
            }
            Err(e) => {
                error!("Currency conversion error: {e:#}");
                report.conversion_error = Some(format!("{e:#}"));
            }
        }
    }

    Ok(Outcome::Calculated(report))
}

fn display_report(report: &CalculationReport, selected: &SelectedCountry) {
    let calc = &report.calculation;
    let symbol = selected.currency_symbol();

    println!(
        "\n{}: {} in {} money, restated for {}",
        ui::style_text(&selected.display_name(), ui::StyleType::Title),
        ui::format_money(calc.original_amount, symbol),
        calc.original_year,
        calc.target_year
    );

    let mut summary = ui::new_styled_table();
    summary.set_header(vec![ui::header_cell("Measure"), ui::header_cell("Value")]);
    summary.add_row(vec![
        Cell::new(format!("Amount in {}", calc.original_year)),
        ui::amount_cell(ui::format_money(calc.original_amount, symbol)),
    ]);
    summary.add_row(vec![
        Cell::new(format!("Equivalent in {}", calc.target_year)),
        ui::amount_cell(ui::format_money(calc.adjusted_value, symbol)),
    ]);
    summary.add_row(vec![
        Cell::new("Average annual inflation"),
        ui::change_cell(calc.average_inflation),
    ]);
    summary.add_row(vec![
        Cell::new("Change in price level"),
        ui::change_cell(calc.purchasing_power_change),
    ]);
    if let Some(converted) = &report.converted {
        summary.add_row(vec![
            Cell::new(format!("Equivalent in {} (latest rate)", converted.currency)),
            ui::amount_cell(ui::format_money(converted.value, None)),
        ]);
    } else if report.conversion_error.is_some() {
        summary.add_row(vec![Cell::new("Currency conversion"), ui::na_cell(true)]);
    }
    println!("{summary}");

    if let Some(e) = &report.conversion_error {
        println!("{}", ui::style_text(e, ui::StyleType::Error));
    }
    if calc.is_deflation {
        println!(
            "{}",
            ui::style_text(
                "Prices fell on average over this period (deflation).",
                ui::StyleType::Subtle
            )
        );
    }

    let mut trajectory = ui::new_styled_table();
    trajectory.set_header(vec![
        ui::header_cell("Year"),
        ui::header_cell(&format!("Value of {} amount", calc.original_year)),
        ui::header_cell(&format!("Change since {}", calc.original_year)),
    ]);
    for point in &calc.yearly_values {
        let change = (point.value / calc.original_amount - 1.0) * 100.0;
        trajectory.add_row(vec![
            Cell::new(point.year),
            ui::format_optional_cell(Some(point.value), |v| ui::format_money(v, symbol)),
            ui::change_cell(change),
        ]);
    }
    println!(
        "\n{}",
        ui::style_text("Year by year", ui::StyleType::TotalLabel)
    );
    println!("{trajectory}");
}
