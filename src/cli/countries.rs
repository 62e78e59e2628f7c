use super::ui;
use crate::core::Country;
use comfy_table::Cell;

/// Prints the built-in country catalogue.
pub fn run() {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(""),
        ui::header_cell("Code"),
        ui::header_cell("Country"),
        ui::header_cell("Currency"),
        ui::header_cell("Symbol"),
    ]);
    for country in Country::all() {
        let info = country.info();
        table.add_row(vec![
            Cell::new(info.flag),
            Cell::new(info.code),
            Cell::new(info.name),
            Cell::new(info.currency_code),
            Cell::new(info.currency_symbol),
        ]);
    }
    println!("{table}");
}
